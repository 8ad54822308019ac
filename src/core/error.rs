use thiserror::Error;

/// Errors raised while assembling a resolver.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DictError {
    #[error("no text sources registered")]
    NoSources,

    #[error("text source registered twice: {0}")]
    DuplicateSource(String),
}

/// A traversal anomaly on a single field.
///
/// Never escapes [`Annotator::process`](crate::core::Annotator::process):
/// the field is left as it was and the error is logged.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FieldError {
    #[error("{owner}.{field}: field is not accessible")]
    MissingField {
        owner: &'static str,
        field: &'static str,
    },

    #[error("{owner}.{field}: companion code field `{companion}` not found")]
    MissingCompanion {
        owner: &'static str,
        field: &'static str,
        companion: String,
    },

    #[error("{owner}.{field}: description field cannot hold text")]
    NotText {
        owner: &'static str,
        field: &'static str,
    },
}
