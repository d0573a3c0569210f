use crate::spec::CallbackError;
use thiserror::Error as ThisError;

///
/// BuildError
///
/// Structured failures raised while assembling an entity. Every failure
/// is fatal to the `build_one` call in progress; there is no retry and
/// no partial result.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("user callback failed: {source}")]
    Callback {
        #[source]
        source: CallbackError,
    },

    #[error("entity constructor failed: {source}")]
    Construction {
        #[source]
        source: CallbackError,
    },

    #[error("build failed at {path}: {source}")]
    Context {
        path: String,
        #[source]
        source: Box<Self>,
    },
}

impl BuildError {
    /// Wrap a generator or computed-function failure.
    #[must_use]
    pub fn callback(source: CallbackError) -> Self {
        Self::Callback { source }
    }

    /// Wrap an entity-constructor failure.
    #[must_use]
    pub fn construction(source: CallbackError) -> Self {
        Self::Construction { source }
    }

    /// Prepend a field segment to the error path.
    #[must_use]
    pub fn with_field(self, field: impl AsRef<str>) -> Self {
        let field = field.as_ref();
        match self {
            Self::Context { path, source } => Self::Context {
                path: format!("{field}.{path}"),
                source,
            },
            source => Self::Context {
                path: field.to_string(),
                source: Box::new(source),
            },
        }
    }

    /// Return the full contextual path, if available.
    #[must_use]
    pub const fn path(&self) -> Option<&str> {
        match self {
            Self::Context { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }

    /// Return the innermost, non-context error variant.
    #[must_use]
    pub fn leaf(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.leaf(),
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boom() -> CallbackError {
        "boom".into()
    }

    #[test]
    fn with_field_composes_outermost_first() {
        let err = BuildError::callback(boom())
            .with_field("username")
            .with_field("friend")
            .with_field("friend");

        assert_eq!(err.path(), Some("friend.friend.username"));
        assert!(matches!(err.leaf(), BuildError::Callback { .. }));
    }

    #[test]
    fn leaf_of_plain_error_is_itself() {
        let err = BuildError::construction(boom());

        assert!(err.path().is_none());
        assert!(matches!(err.leaf(), BuildError::Construction { .. }));
    }

    #[test]
    fn display_includes_path_and_source() {
        let err = BuildError::callback(boom()).with_field("age");

        assert_eq!(err.to_string(), "build failed at age: user callback failed: boom");
    }
}
