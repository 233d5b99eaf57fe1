//! Command registry.
//!
//! Maps invocation names to declared commands and their handlers, plus the
//! zero-argument pseudo-command table and registered help topics. All
//! registration happens through `&mut` methods during plugin startup; the
//! dispatcher only reads afterwards.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use commandeer_grammar::{Arguments, CommandSpec, ConverterRegistry};
use regex::Regex;
use tracing::info;

use crate::actor::Actor;
use crate::error::RegistrationError;

/// Trait implemented by all command handlers.
///
/// The handler receives the invoking actor and the converted [`Arguments`];
/// for a command that declares no sub-commands the arguments are empty.
/// The returned boolean is the invocation's success result.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Perform the command.
    async fn execute(&self, actor: &dyn Actor, args: &Arguments) -> bool;
}

/// A zero-argument word handled before command resolution.
///
/// Pseudo-commands carry no grammar: they either handle the bare word or
/// report not-handled, in which case dispatch continues as if the word
/// might be a real command.
pub trait PseudoCommand: Send + Sync {
    /// Handle the bare word. Returns whether it was handled.
    fn execute(&self, actor: &dyn Actor) -> bool;
}

/// One registered command: its immutable spec, compiled alias patterns,
/// and the handler instance.
pub struct RegisteredCommand {
    spec: Arc<CommandSpec>,
    aliases: Vec<Regex>,
    handler: Box<dyn CommandHandler>,
}

impl RegisteredCommand {
    /// The declared command spec.
    pub fn spec(&self) -> &Arc<CommandSpec> {
        &self.spec
    }

    /// The handler instance.
    pub fn handler(&self) -> &dyn CommandHandler {
        self.handler.as_ref()
    }

    fn alias_matches(&self, token: &str) -> bool {
        self.aliases.iter().any(|alias| alias.is_match(token))
    }
}

/// Registry of commands, pseudo-commands, and help topics.
pub struct CommandRegistry {
    /// Lowercase primary name to registered command.
    commands: HashMap<String, RegisteredCommand>,
    /// Lowercase word to pseudo-command.
    pseudo_commands: HashMap<String, Box<dyn PseudoCommand>>,
    /// Lowercase topic name to help text.
    help_topics: HashMap<String, String>,
    /// Per-command dispatch counters, keyed like `commands`.
    dispatch_counts: HashMap<String, AtomicU64>,
}

impl CommandRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            pseudo_commands: HashMap::new(),
            help_topics: HashMap::new(),
            dispatch_counts: HashMap::new(),
        }
    }

    /// Register a command and its handler.
    ///
    /// Validates the whole declaration up front: the name must be new
    /// (case-insensitively, against names and raw alias strings), every
    /// alias pattern must compile, and every declared argument type must
    /// have a converter (or be text). Any violation is fatal.
    pub fn register(
        &mut self,
        spec: CommandSpec,
        handler: Box<dyn CommandHandler>,
        converters: &ConverterRegistry,
    ) -> Result<(), RegistrationError> {
        let name = spec.name().to_ascii_lowercase();
        if self.is_known_word(&name) {
            return Err(RegistrationError::DuplicateCommand(name));
        }

        let mut aliases = Vec::with_capacity(spec.aliases().len());
        for pattern in spec.aliases() {
            let lowered = pattern.to_ascii_lowercase();
            if lowered == name || self.is_known_word(&lowered) {
                return Err(RegistrationError::DuplicateAlias {
                    command: name,
                    alias: pattern.clone(),
                });
            }
            // Anchored and case-insensitive; a plain word is a valid pattern.
            let compiled = Regex::new(&format!("(?i)^(?:{pattern})$")).map_err(|source| {
                RegistrationError::MalformedAliasPattern {
                    command: name.clone(),
                    pattern: pattern.clone(),
                    source,
                }
            })?;
            aliases.push(compiled);
        }

        for sub in spec.sub_commands() {
            for arg in sub.args() {
                if !converters.can_convert(arg.ty()) {
                    return Err(RegistrationError::MissingConverter {
                        command: name,
                        argument: arg.name().to_string(),
                        ty: arg.ty(),
                    });
                }
            }
        }

        info!(
            command = %name,
            sub_commands = spec.sub_commands().len(),
            aliases = spec.aliases().len(),
            "command registered"
        );
        self.dispatch_counts.insert(name.clone(), AtomicU64::new(0));
        self.commands.insert(
            name,
            RegisteredCommand {
                spec: Arc::new(spec),
                aliases,
                handler,
            },
        );
        Ok(())
    }

    /// Register a pseudo-command word.
    pub fn register_pseudo_command(
        &mut self,
        word: &str,
        command: Box<dyn PseudoCommand>,
    ) -> Result<(), RegistrationError> {
        let word = word.to_ascii_lowercase();
        if self.pseudo_commands.contains_key(&word) {
            return Err(RegistrationError::DuplicatePseudoCommand(word));
        }
        info!(word = %word, "pseudo-command registered");
        self.pseudo_commands.insert(word, command);
        Ok(())
    }

    /// Whether a pseudo-command word is already taken.
    pub fn has_pseudo_command(&self, word: &str) -> bool {
        self.pseudo_commands
            .contains_key(&word.to_ascii_lowercase())
    }

    /// Register a named help topic.
    pub fn register_help_topic(
        &mut self,
        name: &str,
        text: impl Into<String>,
    ) -> Result<(), RegistrationError> {
        let name = name.to_ascii_lowercase();
        if self.help_topics.contains_key(&name) {
            return Err(RegistrationError::DuplicateHelpTopic(name));
        }
        self.help_topics.insert(name, text.into());
        Ok(())
    }

    /// Resolve a first token to a command, by exact name then alias scan.
    pub fn resolve(&self, token: &str) -> Option<&RegisteredCommand> {
        let lower = token.to_ascii_lowercase();
        if let Some(command) = self.commands.get(&lower) {
            return Some(command);
        }
        self.commands
            .values()
            .find(|command| command.alias_matches(&lower))
    }

    /// The pseudo-command registered under a word, if any.
    pub fn pseudo_command(&self, word: &str) -> Option<&dyn PseudoCommand> {
        self.pseudo_commands
            .get(&word.to_ascii_lowercase())
            .map(Box::as_ref)
    }

    /// The help text registered under a topic name, if any.
    pub fn help_topic(&self, name: &str) -> Option<&str> {
        self.help_topics
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// All registered commands, sorted by primary name.
    pub fn commands_sorted(&self) -> Vec<&RegisteredCommand> {
        let mut commands: Vec<_> = self.commands.values().collect();
        commands.sort_by(|a, b| a.spec.name().cmp(b.spec.name()));
        commands
    }

    /// Record one dispatch of a resolved command.
    pub fn record_dispatch(&self, name: &str) {
        if let Some(counter) = self.dispatch_counts.get(&name.to_ascii_lowercase()) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Dispatch counts for all commands used at least once, most-used first.
    pub fn stats(&self) -> Vec<(String, u64)> {
        let mut stats: Vec<_> = self
            .dispatch_counts
            .iter()
            .map(|(name, count)| (name.clone(), count.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();
        stats.sort_by(|a, b| b.1.cmp(&a.1));
        stats
    }

    fn is_known_word(&self, word: &str) -> bool {
        self.commands.contains_key(word)
            || self
                .commands
                .values()
                .any(|command| command.alias_matches(word))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
