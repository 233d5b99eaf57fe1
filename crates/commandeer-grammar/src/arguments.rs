//! The finished artifact of a successful invocation.

use std::sync::Arc;

use chrono::Duration;

use crate::color::ChatColor;
use crate::descriptor::{CommandSpec, SubCommandSpec};
use crate::value::{ArgValue, ValueList};

/// Converted arguments plus the command and sub-command they resolved to.
///
/// Created once per successful invocation by the converter pipeline and
/// handed read-only to the command handler; an omitted optional trailing
/// argument simply shortens the value array by one.
#[derive(Debug, Clone)]
pub struct Arguments {
    command: Arc<CommandSpec>,
    values: ValueList,
    sub_index: Option<usize>,
}

impl Arguments {
    /// Assemble from pipeline output. Values are in original token order.
    pub fn new(command: Arc<CommandSpec>, values: ValueList, sub_index: Option<usize>) -> Self {
        Self { command, values, sub_index }
    }

    /// The trivial artifact for a command that declares no sub-commands.
    pub fn no_args(command: Arc<CommandSpec>) -> Self {
        Self {
            command,
            values: ValueList::new(),
            sub_index: None,
        }
    }

    /// The resolved command.
    pub fn command(&self) -> &CommandSpec {
        &self.command
    }

    /// Index of the matched sub-command within the command's declaration
    /// list, or `None` for a command with no sub-commands.
    pub fn sub_index(&self) -> Option<usize> {
        self.sub_index
    }

    /// The matched sub-command descriptor, if any.
    pub fn sub_command(&self) -> Option<&SubCommandSpec> {
        self.command.sub_commands().get(self.sub_index?)
    }

    /// All converted values, in original order.
    pub fn values(&self) -> &[ArgValue] {
        &self.values
    }

    /// The value at a position.
    pub fn value(&self, index: usize) -> Option<&ArgValue> {
        self.values.get(index)
    }

    /// The text at a position, for literals and text arguments.
    pub fn text(&self, index: usize) -> Option<&str> {
        self.value(index)?.as_str()
    }

    /// The integer at a position.
    pub fn int(&self, index: usize) -> Option<i64> {
        self.value(index)?.as_int()
    }

    /// The boolean at a position.
    pub fn boolean(&self, index: usize) -> Option<bool> {
        self.value(index)?.as_bool()
    }

    /// The duration at a position.
    pub fn duration(&self, index: usize) -> Option<Duration> {
        self.value(index)?.as_duration()
    }

    /// The color at a position.
    pub fn color(&self, index: usize) -> Option<ChatColor> {
        self.value(index)?.as_color()
    }

    /// Number of converted values. One less than the descriptor count when
    /// an optional trailing argument was omitted.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values were converted.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ArgSpec, ArgType, SubCommandSpec};
    use smallvec::smallvec;

    fn shop_spec() -> Arc<CommandSpec> {
        Arc::new(
            CommandSpec::new("shop").sub_command(SubCommandSpec::new(vec![
                ArgSpec::literal("price"),
                ArgSpec::required("amount", ArgType::Integer),
            ])),
        )
    }

    #[test]
    fn test_accessors() {
        let args = Arguments::new(
            shop_spec(),
            smallvec![ArgValue::Text("price".into()), ArgValue::Int(42)],
            Some(0),
        );
        assert_eq!(args.len(), 2);
        assert_eq!(args.text(0), Some("price"));
        assert_eq!(args.int(1), Some(42));
        assert_eq!(args.int(0), None);
        assert_eq!(args.value(2), None);
        assert_eq!(args.sub_command().unwrap().len(), 2);
    }

    #[test]
    fn test_no_args() {
        let args = Arguments::no_args(shop_spec());
        assert!(args.is_empty());
        assert_eq!(args.sub_index(), None);
        assert!(args.sub_command().is_none());
    }
}
