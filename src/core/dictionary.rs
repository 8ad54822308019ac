//! Dictionary items: the coded values that get a localized description.
//!
//! A dictionary is a closed set of codes sharing one namespace, e.g. every
//! order status lives under `order_status`. Text sources are queried with the
//! dictionary key `namespace.code`.

/// A single coded value of a dictionary.
pub trait DictionaryItem: Send + Sync {
    /// The namespace shared by every item of the dictionary (e.g. `order_status`).
    fn namespace(&self) -> &str;

    /// The raw code as it appears in business data (e.g. `pending`).
    fn code(&self) -> &str;

    /// The lookup key presented to text sources.
    fn key(&self) -> String {
        dictionary_key(self.namespace(), self.code())
    }
}

/// Type-level view of a dictionary: its namespace and the full item set.
///
/// Implemented by the [`dictionary!`](crate::dictionary) macro, which also
/// guarantees every item reports [`Dictionary::NAMESPACE`].
pub trait Dictionary: DictionaryItem + Sized + 'static {
    const NAMESPACE: &'static str;

    fn items() -> &'static [Self];

    fn from_code(code: &str) -> Option<&'static Self> {
        Self::items().iter().find(|item| item.code() == code)
    }
}

/// Build the key `namespace.code` used to query text sources.
pub fn dictionary_key(namespace: &str, code: &str) -> String {
    format!("{}.{}", namespace, code)
}

/// Declare a dictionary enumeration.
///
/// ```
/// dictdesc::dictionary! {
///     /// Lifecycle of an order.
///     pub enum OrderStatus("order_status") {
///         Pending = "pending",
///         Shipped = "shipped",
///     }
/// }
///
/// use dictdesc::core::{Dictionary, DictionaryItem};
///
/// assert_eq!(OrderStatus::Shipped.key(), "order_status.shipped");
/// assert_eq!(OrderStatus::from_code("pending"), Some(&OrderStatus::Pending));
/// ```
///
/// Items behave as primitive-like values when they appear inside reflected
/// objects: the walker never descends into them.
#[macro_export]
macro_rules! dictionary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($namespace:literal) {
            $( $(#[$item_meta:meta])* $item:ident = $code:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$item_meta])* $item, )*
        }

        impl $crate::core::dictionary::DictionaryItem for $name {
            fn namespace(&self) -> &str {
                <Self as $crate::core::dictionary::Dictionary>::NAMESPACE
            }

            fn code(&self) -> &str {
                match self {
                    $( Self::$item => $code, )*
                }
            }
        }

        impl $crate::core::dictionary::Dictionary for $name {
            const NAMESPACE: &'static str = $namespace;

            fn items() -> &'static [Self] {
                &[$( Self::$item, )*]
            }
        }

        impl $crate::core::reflect::Field for $name {
            fn shape() -> $crate::core::reflect::Shape {
                $crate::core::reflect::Shape::Primitive
            }

            fn node(&mut self) -> $crate::core::reflect::Node<'_> {
                $crate::core::reflect::Node::Primitive
            }
        }
    };
}
