use super::SharedSource;

/// Order sources for querying.
///
/// Sources named in `configured` come first, in that order; names without a
/// matching source are skipped. Everything else follows sorted by name, so the
/// result never depends on the iteration order of `sources`.
pub fn ordered_sources(configured: &[String], sources: Vec<SharedSource>) -> Vec<SharedSource> {
    let mut remaining = sources;
    let mut ordered = Vec::with_capacity(remaining.len());

    for name in configured {
        if let Some(index) = remaining.iter().position(|source| source.name() == name) {
            ordered.push(remaining.remove(index));
        }
    }

    remaining.sort_by(|a, b| a.name().cmp(b.name()));
    ordered.extend(remaining);
    ordered
}
