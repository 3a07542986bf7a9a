use crate::contract::ClientError;

/// Error type shared by every operation in this crate.
///
/// `NotFound` is raised by lifecycle internals and translated into absence by
/// the read paths; every other variant is surfaced to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind} {name:?} not found")]
    NotFound { kind: &'static str, name: String },

    /// Rejected before any remote mutation; recoverable by correcting input.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A collaborator call failed for any reason other than absence.
    #[error("{context}: {source}")]
    Remote {
        context: String,
        source: ClientError,
    },

    #[error("could not render configuration template: {0}")]
    Template(#[from] minijinja::Error),

    #[error("could not parse configuration XML: {0}")]
    Xml(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        Error::Xml(err.to_string())
    }

    /// Wraps a collaborator error with operation context, for use as a
    /// `map_err` argument.
    pub(crate) fn remote(context: impl Into<String>) -> impl FnOnce(ClientError) -> Self {
        let context = context.into();
        move |source| Error::Remote { context, source }
    }
}
