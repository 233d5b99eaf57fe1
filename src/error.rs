//! Unified error handling for commandeer.
//!
//! Two taxonomies, mirroring how failures propagate. Registration-time
//! configuration errors are fatal `Result::Err` values the embedding plugin
//! must surface at startup. Invocation-time failures never escape the
//! dispatcher: each becomes one actor-visible message plus a `false`
//! handled result, labeled in the log by `error_code()`.

use commandeer_grammar::{ArgType, ConvertError, PipelineError};
use thiserror::Error;

/// Errors raised while registering commands, flows, or related fixtures.
///
/// All of these are configuration defects. They are never tolerated
/// silently and never produced at invocation time.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),

    #[error("alias '{alias}' on command '{command}' collides with an existing name")]
    DuplicateAlias {
        command: String,
        alias: String,
    },

    #[error("alias pattern '{pattern}' on command '{command}' is malformed: {source}")]
    MalformedAliasPattern {
        command: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(
        "command '{command}' argument '{argument}' declares type {} but no converter is registered",
        .ty.label()
    )]
    MissingConverter {
        command: String,
        argument: String,
        ty: ArgType,
    },

    #[error("pseudo-command '{0}' is already registered")]
    DuplicatePseudoCommand(String),

    #[error("confirmation flow '{0}' is already registered")]
    DuplicateFlow(String),

    #[error("help topic '{0}' is already registered")]
    DuplicateHelpTopic(String),
}

/// Why one invocation stopped before (or at) handler execution.
///
/// The dispatcher turns these into actor-visible text and `debug!` fields;
/// they are never returned to the caller as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchFailure {
    /// The first token resolved to no registered command or alias.
    UnknownCommand,
    /// The actor holds none of the required permission nodes.
    NoPermission,
    /// A console-like actor invoked an in-game-only command.
    InGameOnly,
    /// The actor's cooldown has not elapsed.
    CooldownActive {
        /// Whole seconds left, rounded up.
        remaining_secs: i64,
    },
    /// No declared sub-command fits the token shape.
    NoArgumentMatch,
    /// A token failed its converter.
    Conversion {
        /// Display name of the failing argument.
        argument: String,
        /// The converter's reason, surfaced verbatim.
        reason: String,
    },
    /// A descriptor referenced an unconvertible type at invocation time.
    /// Registration validation should have made this unreachable.
    Internal,
    /// The external cancellation hook vetoed execution.
    Vetoed,
    /// The handler ran and reported failure.
    HandlerRejected,
}

impl DispatchFailure {
    /// Static label for log fields.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown_command",
            Self::NoPermission => "no_permission",
            Self::InGameOnly => "in_game_only",
            Self::CooldownActive { .. } => "cooldown_active",
            Self::NoArgumentMatch => "no_argument_match",
            Self::Conversion { .. } => "conversion_failed",
            Self::Internal => "internal_error",
            Self::Vetoed => "vetoed",
            Self::HandlerRejected => "handler_rejected",
        }
    }
}

impl From<PipelineError> for DispatchFailure {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Conversion(ConvertError { argument, reason }) => {
                Self::Conversion { argument, reason }
            }
            PipelineError::MissingConverter { .. } => Self::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DispatchFailure::UnknownCommand.error_code(), "unknown_command");
        assert_eq!(
            DispatchFailure::CooldownActive { remaining_secs: 5 }.error_code(),
            "cooldown_active"
        );
        assert_eq!(DispatchFailure::HandlerRejected.error_code(), "handler_rejected");
    }

    #[test]
    fn test_pipeline_error_mapping() {
        let conversion: DispatchFailure = PipelineError::Conversion(ConvertError {
            argument: "amount".into(),
            reason: "bad".into(),
        })
        .into();
        assert!(matches!(conversion, DispatchFailure::Conversion { .. }));

        let missing: DispatchFailure = PipelineError::MissingConverter {
            argument: "when".into(),
            ty: ArgType::Duration,
        }
        .into();
        assert_eq!(missing, DispatchFailure::Internal);
    }

    #[test]
    fn test_registration_error_display() {
        let err = RegistrationError::MissingConverter {
            command: "mute".into(),
            argument: "for".into(),
            ty: ArgType::Duration,
        };
        assert_eq!(
            err.to_string(),
            "command 'mute' argument 'for' declares type duration but no converter is registered"
        );
    }
}
