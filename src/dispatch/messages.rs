//! Actor-visible message builders.
//!
//! Localized formatting and color injection belong to the host; these are
//! the framework's plain-text defaults, one line per failure.

pub(crate) fn unknown_command() -> &'static str {
    "Unknown command."
}

pub(crate) fn no_permission() -> &'static str {
    "You don't have permission to do that."
}

pub(crate) fn in_game_only() -> &'static str {
    "That command can only be used in game."
}

pub(crate) fn cooldown_wait(seconds: i64) -> String {
    format!("Please wait {seconds}s before using another command.")
}

pub(crate) fn invalid_arguments() -> &'static str {
    "Invalid arguments."
}

pub(crate) fn conversion_failure(argument: &str, reason: &str) -> String {
    format!("Argument '{argument}' is invalid: {reason}")
}

pub(crate) fn internal_error() -> &'static str {
    "Something went wrong handling that command."
}
