//! Object-graph annotator: fills dictionary description fields in place.
//!
//! The walker visits a response body (a single object, a collection, a map,
//! or nothing), finds description fields through each type's descriptor, reads
//! the companion code field and writes the resolved text back.
//!
//! Work per call is bounded by the depth limit together with the per-call
//! visited set. The visited set alone cannot bound a long acyclic chain; the
//! depth cutoff does.

use std::{
    any::TypeId,
    collections::{HashMap, HashSet},
    sync::{Arc, PoisonError, RwLock, TryLockError},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::{
    error::FieldError,
    reflect::{Field, FieldDescriptor, FieldKind, Node, Reflect, Shape, SharedObject, TypeDescriptor},
    resolver::CompositeResolver,
};

pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const DEFAULT_DESCRIPTION_SUFFIX: &str = "_desc";

/// What to write into a description field when no source has text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissPolicy {
    /// Write the empty string.
    #[default]
    Blank,
    /// Leave the field unchanged.
    Keep,
    /// Write the raw code.
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatorOptions {
    /// Objects deeper than this (the body is depth 0) are left alone.
    pub max_depth: usize,
    /// Stripped from a description field's name to find its companion.
    pub description_suffix: String,
    pub on_miss: MissPolicy,
}

impl Default for AnnotatorOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            description_suffix: DEFAULT_DESCRIPTION_SUFFIX.to_string(),
            on_miss: MissPolicy::default(),
        }
    }
}

/// Identity of a visited object. Owned objects are told apart by address and
/// type (a struct and its first field can share an address), shared objects
/// by their allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Identity {
    Owned(usize, TypeId),
    Shared(usize),
}

impl Identity {
    fn owned(object: &dyn Reflect) -> Self {
        let address = (object as *const dyn Reflect).cast::<()>() as usize;
        Identity::Owned(address, object.descriptor().type_id())
    }

    fn shared(object: &SharedObject) -> Self {
        Identity::Shared(Arc::as_ptr(object).cast::<()>() as usize)
    }
}

/// A description field, by owning object and field name.
type Target = (Identity, &'static str);

/// A description field waiting for text.
struct Lookup {
    target: Target,
    namespace: &'static str,
    code: String,
}

/// State of one `process` call. Never shared between calls.
///
/// The graph is walked twice: the first pass reads codes, the second writes
/// the text resolved in between, so no lock is held during a source lookup.
#[derive(Default)]
struct Walk {
    visited: HashSet<Identity>,
    lookups: Vec<Lookup>,
    /// Set once lookups are resolved; the walk then writes instead of reads.
    resolved: Option<HashMap<Target, String>>,
}

impl Walk {
    fn is_writing(&self) -> bool {
        self.resolved.is_some()
    }
}

/// State of one type scan.
#[derive(Default)]
struct Scan {
    /// Types whose fields are being scanned further up.
    on_path: HashSet<TypeId>,
    /// type → largest depth budget it was scanned with and found nothing
    exhausted: HashMap<TypeId, usize>,
    /// A depth cutoff or a revisit cut the current subtree short.
    truncated: bool,
}

pub struct Annotator {
    resolver: Arc<CompositeResolver>,
    options: AnnotatorOptions,
    /// type → whether its graph can hold description fields
    processable: RwLock<HashMap<TypeId, bool>>,
}

impl std::fmt::Debug for Annotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Annotator")
            .field("resolver", &self.resolver)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Annotator {
    pub fn new(resolver: Arc<CompositeResolver>) -> Self {
        Self::with_options(resolver, AnnotatorOptions::default())
    }

    pub fn with_options(resolver: Arc<CompositeResolver>, options: AnnotatorOptions) -> Self {
        Self {
            resolver,
            options,
            processable: RwLock::new(HashMap::new()),
        }
    }

    pub fn resolver(&self) -> &CompositeResolver {
        &self.resolver
    }

    pub fn options(&self) -> &AnnotatorOptions {
        &self.options
    }

    /// Fill every description field reachable from `body` with text in
    /// `language`.
    ///
    /// Never fails: fields that cannot be resolved are logged and left to the
    /// miss policy or untouched. Shared objects are locked only while their
    /// fields are read or written; one that another thread holds at that
    /// moment is skipped with a warning.
    pub fn process(&self, body: &mut dyn Field, language: &str) {
        let mut walk = Walk::default();
        self.visit(body.node(), &mut walk, 0);
        if walk.lookups.is_empty() {
            return;
        }

        let resolved = std::mem::take(&mut walk.lookups)
            .into_iter()
            .filter_map(|lookup| {
                let text = self.resolve(language, &lookup)?;
                Some((lookup.target, text))
            })
            .collect();
        walk.resolved = Some(resolved);
        walk.visited.clear();
        self.visit(body.node(), &mut walk, 0);
    }

    /// Text for one lookup after the miss policy; `None` leaves the field.
    fn resolve(&self, language: &str, lookup: &Lookup) -> Option<String> {
        match self.resolver.text(language, lookup.namespace, &lookup.code) {
            Some(text) => Some(text),
            None => match self.options.on_miss {
                MissPolicy::Blank => Some(String::new()),
                MissPolicy::Keep => None,
                MissPolicy::Code => Some(lookup.code.clone()),
            },
        }
    }

    /// Whether objects of this type can hold description fields, directly or
    /// through nested fields. Memoized per type.
    pub fn is_processable(&self, descriptor: &'static TypeDescriptor) -> bool {
        if descriptor.always_process() {
            return true;
        }
        if let Some(known) = self.cached(descriptor.type_id()) {
            return known;
        }

        let (processable, _) = self.scan(descriptor, 0, &mut Scan::default());
        self.remember(descriptor.type_id(), processable);
        processable
    }

    fn cached(&self, type_id: TypeId) -> Option<bool> {
        self.processable
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    fn remember(&self, type_id: TypeId, processable: bool) {
        self.processable
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(type_id, processable);
    }

    /// Returns whether a description field was found, and whether a negative
    /// answer holds for this type regardless of where the scan started.
    fn scan(
        &self,
        descriptor: &'static TypeDescriptor,
        depth: usize,
        state: &mut Scan,
    ) -> (bool, bool) {
        if depth > self.options.max_depth {
            state.truncated = true;
            return (false, false);
        }
        let type_id = descriptor.type_id();
        let budget = self.options.max_depth - depth;
        if state.on_path.contains(&type_id)
            || state.exhausted.get(&type_id).is_some_and(|&seen| seen >= budget)
        {
            state.truncated = true;
            return (false, false);
        }

        let outer = std::mem::take(&mut state.truncated);
        state.on_path.insert(type_id);
        let found = descriptor.fields().iter().any(|field| match field.kind() {
            FieldKind::Description { .. } => true,
            FieldKind::Plain => self.shape_may_hold(field.shape(), depth + 1, state),
        });
        state.on_path.remove(&type_id);

        let complete = !state.truncated;
        state.truncated |= outer;
        if !found {
            let seen = state.exhausted.entry(type_id).or_insert(budget);
            *seen = (*seen).max(budget);
        }
        (found, complete)
    }

    fn shape_may_hold(&self, shape: Shape, depth: usize, state: &mut Scan) -> bool {
        match shape {
            Shape::Primitive => false,
            Shape::Dynamic => true,
            Shape::Seq(element) | Shape::Map(element) => {
                self.shape_may_hold(element(), depth, state)
            }
            Shape::Object(descriptor) => {
                let descriptor = descriptor();
                if descriptor.always_process() {
                    return true;
                }
                if let Some(known) = self.cached(descriptor.type_id()) {
                    return known;
                }
                let (found, complete) = self.scan(descriptor, depth, state);
                // Positive answers hold at any depth budget, negative ones only if
                // nothing was cut short.
                if found || complete {
                    self.remember(descriptor.type_id(), found);
                }
                found
            }
        }
    }

    fn visit(&self, node: Node<'_>, walk: &mut Walk, depth: usize) {
        match node {
            Node::Null | Node::Primitive => {}
            Node::Object(object) => self.visit_object(object, walk, depth),
            Node::Shared(shared) => self.visit_shared(&shared, walk, depth, false),
            Node::Seq(elements) | Node::Map(elements) => {
                for element in elements {
                    self.visit(element, walk, depth);
                }
            }
        }
    }

    fn visit_object(&self, object: &mut dyn Reflect, walk: &mut Walk, depth: usize) {
        if depth > self.options.max_depth {
            debug!(
                owner = object.descriptor().name(),
                depth,
                max_depth = self.options.max_depth,
                "maximum recursion depth exceeded"
            );
            return;
        }
        if !walk.visited.insert(Identity::owned(object)) {
            trace!(owner = object.descriptor().name(), "object already visited");
            return;
        }
        self.process_fields(object, walk, depth);
    }

    /// Shared objects are checked against the visited set before locking, so a
    /// cycle back to an object whose lock this call holds is skipped.
    fn visit_shared(
        &self,
        shared: &SharedObject,
        walk: &mut Walk,
        depth: usize,
        require_processable: bool,
    ) {
        if depth > self.options.max_depth {
            debug!(depth, max_depth = self.options.max_depth, "maximum recursion depth exceeded");
            return;
        }
        let identity = Identity::shared(shared);
        if walk.visited.contains(&identity) {
            trace!("shared object already visited");
            return;
        }

        let mut object = match shared.try_lock() {
            Ok(object) => object,
            Err(TryLockError::Poisoned(poisoned)) => {
                debug!("shared object lock poisoned, continuing");
                poisoned.into_inner()
            }
            Err(TryLockError::WouldBlock) => {
                warn!("shared object is locked elsewhere, skipping");
                return;
            }
        };

        if require_processable && !self.is_processable(object.descriptor()) {
            return;
        }
        walk.visited.insert(identity);
        self.process_fields(&mut *object, walk, depth);
    }

    fn process_fields(&self, object: &mut dyn Reflect, walk: &mut Walk, depth: usize) {
        let descriptor = object.descriptor();
        for field in descriptor.fields() {
            if let Err(e) = self.process_field(object, field, walk, depth) {
                warn!(
                    owner = descriptor.name(),
                    field = field.name(),
                    error = %e,
                    "field left unresolved"
                );
            }
        }
    }

    fn process_field(
        &self,
        object: &mut dyn Reflect,
        field: &FieldDescriptor,
        walk: &mut Walk,
        depth: usize,
    ) -> Result<(), FieldError> {
        let owner = object.descriptor().name();

        if let FieldKind::Description {
            namespace,
            companion,
        } = field.kind()
        {
            return match walk.resolved.as_mut() {
                Some(resolved) => self.write(object, field, resolved),
                None => self.read(object, field, namespace, companion, &mut walk.lookups),
            };
        }

        let Some(value) = object.field_mut(field.name()) else {
            // Reported once, while reading.
            if walk.is_writing() {
                return Ok(());
            }
            return Err(FieldError::MissingField {
                owner,
                field: field.name(),
            });
        };

        match value.node() {
            Node::Null | Node::Primitive => {}
            Node::Object(nested) => {
                if self.is_processable(nested.descriptor()) {
                    self.visit_object(nested, walk, depth + 1);
                }
            }
            Node::Shared(shared) => self.visit_shared(&shared, walk, depth + 1, true),
            node @ (Node::Seq(_) | Node::Map(_)) => self.visit(node, walk, depth + 1),
        }
        Ok(())
    }

    /// Queue a lookup for one description field from its companion code field.
    fn read(
        &self,
        object: &dyn Reflect,
        field: &FieldDescriptor,
        namespace: &'static str,
        companion: Option<&'static str>,
        lookups: &mut Vec<Lookup>,
    ) -> Result<(), FieldError> {
        let owner = object.descriptor().name();

        let Some(companion) = self.companion_name(field.name(), companion) else {
            debug!(owner, field = field.name(), "no companion code field name");
            return Ok(());
        };

        let code = match object.field(&companion) {
            Some(value) => match value.as_text() {
                Some(code) => code.to_string(),
                None => {
                    debug!(owner, field = field.name(), companion = %companion, "companion is not text");
                    return Ok(());
                }
            },
            None => {
                return Err(FieldError::MissingCompanion {
                    owner,
                    field: field.name(),
                    companion,
                });
            }
        };

        lookups.push(Lookup {
            target: (Identity::owned(object), field.name()),
            namespace,
            code,
        });
        Ok(())
    }

    fn write(
        &self,
        object: &mut dyn Reflect,
        field: &FieldDescriptor,
        resolved: &mut HashMap<Target, String>,
    ) -> Result<(), FieldError> {
        let Some(text) = resolved.remove(&(Identity::owned(object), field.name())) else {
            return Ok(());
        };

        let owner = object.descriptor().name();
        let target = object.field_mut(field.name()).ok_or(FieldError::MissingField {
            owner,
            field: field.name(),
        })?;
        if !target.set_text(text) {
            return Err(FieldError::NotText {
                owner,
                field: field.name(),
            });
        }
        Ok(())
    }

    /// The explicit companion if set, otherwise the field name without the
    /// description suffix. `None` if that leaves nothing.
    fn companion_name(&self, field: &str, explicit: Option<&str>) -> Option<String> {
        if let Some(explicit) = explicit.map(str::trim).filter(|name| !name.is_empty()) {
            return Some(explicit.to_string());
        }
        field
            .strip_suffix(self.options.description_suffix.as_str())
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .map(str::to_string)
    }
}
