//! Grammar error types.

use thiserror::Error;

use crate::descriptor::ArgType;

/// A single argument token failed conversion.
///
/// Carries the argument's display name and the converter's reason; the
/// dispatcher surfaces both to the actor verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("argument '{argument}': {reason}")]
pub struct ConvertError {
    /// Display name of the argument position that failed.
    pub argument: String,
    /// The converter's failure reason, ready for actor-visible output.
    pub reason: String,
}

/// Failure of the conversion pipeline as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// One token failed to convert. Per-invocation and recoverable; the
    /// pipeline stops at the first such failure.
    #[error(transparent)]
    Conversion(#[from] ConvertError),

    /// A declared non-text argument type has no registered converter.
    ///
    /// A configuration defect, not an invocation failure: the descriptor
    /// references a type the registry cannot convert. Registration-time
    /// validation is expected to catch this before any invocation does.
    #[error("no converter registered for {} (argument '{argument}')", .ty.label())]
    MissingConverter {
        /// Display name of the argument whose type is unconvertible.
        argument: String,
        /// The unconvertible type.
        ty: ArgType,
    },
}

impl PipelineError {
    /// Static label for log fields.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Conversion(_) => "conversion_failed",
            Self::MissingConverter { .. } => "missing_converter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_error_display() {
        let err = ConvertError {
            argument: "amount".to_string(),
            reason: "'abc' is not a whole number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "argument 'amount': 'abc' is not a whole number"
        );
    }

    #[test]
    fn test_missing_converter_display() {
        let err = PipelineError::MissingConverter {
            argument: "when".to_string(),
            ty: ArgType::Duration,
        };
        assert_eq!(
            err.to_string(),
            "no converter registered for duration (argument 'when')"
        );
        assert_eq!(err.error_code(), "missing_converter");
    }
}
