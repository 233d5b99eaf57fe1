//! Declarative command descriptors.
//!
//! A command is described once, at registration time: its name, alias
//! patterns, permission nodes, and an ordered list of sub-command shapes.
//! Each sub-command is an ordered list of argument positions. Descriptors
//! are immutable after construction; the dispatcher shares them behind
//! `Arc` and hands references to handlers.

/// How an argument position consumes its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ArgKind {
    /// A token must be present at this position.
    Required,
    /// The token may be omitted. Only meaningful at the final position.
    Optional,
    /// The token must equal the argument's display name, case-insensitively.
    Literal,
}

/// The type a variable argument token is converted into.
///
/// `Text` is the default and needs no registered converter; the other types
/// resolve through the [`ConverterRegistry`](crate::ConverterRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ArgType {
    /// Raw token text, passed through unconverted.
    Text,
    /// Base-10 signed integer.
    Integer,
    /// Exact `true`/`false`, case-insensitive.
    Boolean,
    /// Colon-delimited duration parts, e.g. `1d:12h:30m`.
    Duration,
    /// A chat color or display attribute name, or its single-character code.
    Color,
}

impl ArgType {
    /// Short lowercase label for log fields and error text.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Duration => "duration",
            Self::Color => "color",
        }
    }
}

/// A single argument position in a sub-command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    name: String,
    kind: ArgKind,
    ty: ArgType,
}

impl ArgSpec {
    /// A variable argument whose token must be present.
    pub fn required(name: impl Into<String>, ty: ArgType) -> Self {
        Self { name: name.into(), kind: ArgKind::Required, ty }
    }

    /// A variable argument whose token may be omitted at the final position.
    pub fn optional(name: impl Into<String>, ty: ArgType) -> Self {
        Self { name: name.into(), kind: ArgKind::Optional, ty }
    }

    /// A fixed keyword; the token must equal `name` case-insensitively.
    ///
    /// Literals are always `Text` and pass through conversion unchanged.
    pub fn literal(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: ArgKind::Literal, ty: ArgType::Text }
    }

    /// The display name shown in usage strings and failure reasons.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How this position consumes its token.
    pub fn kind(&self) -> ArgKind {
        self.kind
    }

    /// The conversion target type.
    pub fn ty(&self) -> ArgType {
        self.ty
    }

    /// Render for usage strings: `word` / `<name>` / `[name]`.
    pub fn usage_token(&self) -> String {
        match self.kind {
            ArgKind::Literal => self.name.clone(),
            ArgKind::Required => format!("<{}>", self.name),
            ArgKind::Optional => format!("[{}]", self.name),
        }
    }
}

/// One declared argument shape for a command, with its own gate.
///
/// A sub-command's permission set and in-game flag are re-checked after the
/// matcher picks it, on top of the command-level checks.
#[derive(Debug, Clone)]
pub struct SubCommandSpec {
    args: Vec<ArgSpec>,
    permissions: Vec<String>,
    in_game_only: bool,
    description: String,
}

impl SubCommandSpec {
    /// A sub-command over the given ordered argument positions.
    pub fn new(args: Vec<ArgSpec>) -> Self {
        Self {
            args,
            permissions: Vec::new(),
            in_game_only: false,
            description: String::new(),
        }
    }

    /// Set the human-readable description shown in usage listings.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Add a permission node. The set has any-of semantics.
    pub fn permission(mut self, node: impl Into<String>) -> Self {
        self.permissions.push(node.into());
        self
    }

    /// Restrict this sub-command to in-game actors.
    pub fn in_game_only(mut self) -> Self {
        self.in_game_only = true;
        self
    }

    /// The ordered argument positions.
    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    /// Number of argument positions.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether this sub-command takes no arguments.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// The permission set; empty means unrestricted.
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    /// Whether only in-game actors may invoke this sub-command.
    pub fn is_in_game_only(&self) -> bool {
        self.in_game_only
    }

    /// The human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Render the argument shape, e.g. `price <amount> [buyer]`.
    pub fn usage(&self) -> String {
        self.args
            .iter()
            .map(ArgSpec::usage_token)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The full declaration of one command.
///
/// Built once by the owning plugin and handed to the dispatcher's registry;
/// never mutated afterwards. Alias entries are pattern strings here — the
/// registry compiles and validates them at registration time.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    name: String,
    aliases: Vec<String>,
    permissions: Vec<String>,
    in_game_only: bool,
    sub_commands: Vec<SubCommandSpec>,
}

impl CommandSpec {
    /// A command with the given primary name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            permissions: Vec::new(),
            in_game_only: false,
            sub_commands: Vec::new(),
        }
    }

    /// Add an alias pattern matched against the first invocation token.
    pub fn alias(mut self, pattern: impl Into<String>) -> Self {
        self.aliases.push(pattern.into());
        self
    }

    /// Add a command-level permission node (any-of semantics).
    pub fn permission(mut self, node: impl Into<String>) -> Self {
        self.permissions.push(node.into());
        self
    }

    /// Restrict the whole command to in-game actors.
    pub fn in_game_only(mut self) -> Self {
        self.in_game_only = true;
        self
    }

    /// Append a sub-command. Declaration order is match priority.
    pub fn sub_command(mut self, sub: SubCommandSpec) -> Self {
        self.sub_commands.push(sub);
        self
    }

    /// The primary name. Unique case-insensitively within a registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared alias patterns, uncompiled.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The command-level permission set; empty means unrestricted.
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    /// Whether only in-game actors may invoke this command.
    pub fn is_in_game_only(&self) -> bool {
        self.in_game_only
    }

    /// The declared sub-commands, in declaration order.
    pub fn sub_commands(&self) -> &[SubCommandSpec] {
        &self.sub_commands
    }

    /// Render one usage line per sub-command.
    ///
    /// `prefix` is the invocation prefix, typically `/`. A command with no
    /// sub-commands renders a single bare line.
    pub fn usage_lines(&self, prefix: &str) -> Vec<String> {
        if self.sub_commands.is_empty() {
            return vec![format!("{prefix}{}", self.name)];
        }
        self.sub_commands
            .iter()
            .map(|sub| {
                let shape = sub.usage();
                let mut line = if shape.is_empty() {
                    format!("{prefix}{}", self.name)
                } else {
                    format!("{prefix}{} {shape}", self.name)
                };
                if !sub.description().is_empty() {
                    line.push_str(" - ");
                    line.push_str(sub.description());
                }
                line
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_tokens() {
        assert_eq!(ArgSpec::literal("price").usage_token(), "price");
        assert_eq!(
            ArgSpec::required("amount", ArgType::Integer).usage_token(),
            "<amount>"
        );
        assert_eq!(
            ArgSpec::optional("buyer", ArgType::Text).usage_token(),
            "[buyer]"
        );
    }

    #[test]
    fn test_literal_is_text() {
        let spec = ArgSpec::literal("info");
        assert_eq!(spec.kind(), ArgKind::Literal);
        assert_eq!(spec.ty(), ArgType::Text);
    }

    #[test]
    fn test_usage_lines() {
        let spec = CommandSpec::new("shop")
            .sub_command(
                SubCommandSpec::new(vec![
                    ArgSpec::literal("price"),
                    ArgSpec::required("amount", ArgType::Integer),
                ])
                .describe("Set the sale price"),
            )
            .sub_command(SubCommandSpec::new(vec![ArgSpec::literal("info")]));

        let lines = spec.usage_lines("/");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "/shop price <amount> - Set the sale price");
        assert_eq!(lines[1], "/shop info");
    }

    #[test]
    fn test_usage_lines_no_sub_commands() {
        let spec = CommandSpec::new("reload");
        assert_eq!(spec.usage_lines("/"), vec!["/reload".to_string()]);
    }
}
