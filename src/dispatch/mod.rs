//! Dispatch orchestration.
//!
//! One `dispatch` call takes a raw invocation line through help and
//! pseudo-command short-circuits, the cooldown gate, command resolution,
//! permission and in-game checks, sub-command matching, and conversion,
//! then invokes the handler. Every failure is reported to the actor as one
//! message and logged by its `error_code()`; nothing propagates to the
//! caller except the final handled/not-handled boolean.

mod help;
mod messages;

use std::sync::Arc;

use chrono::Utc;
use commandeer_grammar::{Arguments, CommandSpec, ConverterRegistry, match_sub_command};
use tracing::{debug, error, warn};

use crate::actor::{Actor, MessageSink, MetadataStore};
use crate::config::{DispatchConfig, PluginInfo};
use crate::confirm::{ConfirmationCommand, ConfirmationRegistry, FlowHandle};
use crate::cooldown::{CooldownTracker, CooldownVerdict};
use crate::error::{DispatchFailure, RegistrationError};
use crate::registry::{CommandHandler, CommandRegistry, PseudoCommand};

/// External veto over command execution.
///
/// Consulted after conversion succeeds and before the handler runs. A veto
/// skips the handler and the invocation reports unhandled; the vetoing
/// collaborator owns any user feedback.
pub trait DispatchHook: Send + Sync {
    /// Return `false` to veto this invocation.
    fn before_execute(&self, actor: &dyn Actor, args: &Arguments) -> bool;
}

/// The per-plugin dispatch entry point.
///
/// Registration happens through `&mut` methods during startup; afterwards
/// the dispatcher is shared immutably and `dispatch` takes `&self`.
pub struct Dispatcher {
    info: PluginInfo,
    config: DispatchConfig,
    registry: CommandRegistry,
    converters: ConverterRegistry,
    sink: Arc<dyn MessageSink>,
    cooldowns: Option<CooldownTracker>,
    hook: Option<Box<dyn DispatchHook>>,
}

impl Dispatcher {
    /// A dispatcher with the default converter set.
    ///
    /// The cooldown gate is active only when the config enables it; the
    /// metadata store backs the per-actor cooldown stamps.
    pub fn new(
        info: PluginInfo,
        config: DispatchConfig,
        sink: Arc<dyn MessageSink>,
        metadata: Arc<dyn MetadataStore>,
    ) -> Self {
        let cooldowns = config
            .cooldown()
            .map(|cooldown| CooldownTracker::new(metadata, cooldown));
        Self {
            info,
            config,
            registry: CommandRegistry::new(),
            converters: ConverterRegistry::default(),
            sink,
            cooldowns,
            hook: None,
        }
    }

    /// Install the external cancellation hook.
    pub fn set_hook(&mut self, hook: Box<dyn DispatchHook>) {
        self.hook = Some(hook);
    }

    /// Mutable access to the converter table, for overrides and additions.
    ///
    /// Override converters before registering commands: registration
    /// validates declared argument types against this table.
    pub fn converters_mut(&mut self) -> &mut ConverterRegistry {
        &mut self.converters
    }

    /// Register a command and its handler.
    pub fn register(
        &mut self,
        spec: CommandSpec,
        handler: Box<dyn CommandHandler>,
    ) -> Result<(), RegistrationError> {
        self.registry.register(spec, handler, &self.converters)
    }

    /// Register a zero-argument pseudo-command word.
    pub fn register_pseudo_command(
        &mut self,
        word: &str,
        command: Box<dyn PseudoCommand>,
    ) -> Result<(), RegistrationError> {
        self.registry.register_pseudo_command(word, command)
    }

    /// Register a named help topic.
    pub fn register_help_topic(
        &mut self,
        name: &str,
        text: impl Into<String>,
    ) -> Result<(), RegistrationError> {
        self.registry.register_help_topic(name, text)
    }

    /// Wire a confirmation flow's accept and decline words in as
    /// pseudo-commands.
    ///
    /// Words another flow already claimed are skipped: the word routes
    /// through the registry, which resolves per pending entry, so one
    /// pseudo-command serves every flow sharing the word.
    pub fn register_confirmation<P>(
        &mut self,
        confirmations: &Arc<ConfirmationRegistry>,
        handle: &FlowHandle<P>,
    ) -> Result<(), RegistrationError> {
        let Some((accept, decline)) = confirmations.flow_words(handle) else {
            warn!(flow = handle.id().as_str(), "flow has no registered words");
            return Ok(());
        };
        if !self.registry.has_pseudo_command(&accept) {
            self.registry.register_pseudo_command(
                &accept,
                Box::new(ConfirmationCommand::accept(
                    Arc::clone(confirmations),
                    accept.clone(),
                )),
            )?;
        }
        if !self.registry.has_pseudo_command(&decline) {
            self.registry.register_pseudo_command(
                &decline,
                Box::new(ConfirmationCommand::decline(
                    Arc::clone(confirmations),
                    decline.clone(),
                )),
            )?;
        }
        Ok(())
    }

    /// The command registry, for listings and stats.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Dispatch one raw invocation line for an actor.
    ///
    /// Returns whether the invocation was handled successfully. Failures
    /// are reported to the actor; this never panics or errors.
    pub async fn dispatch(&self, actor: &dyn Actor, line: &str) -> bool {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        // Bare invocation: plugin summary.
        let Some((first, rest)) = tokens.split_first() else {
            self.send_all(actor, help::summary(&self.info, &self.config));
            return true;
        };

        // Leading help trigger: page, topic, or page 1.
        if self.config.is_help_trigger(first) {
            return self.show_help(actor, rest);
        }

        // A bare word may be a pseudo-command. Not-handled falls through to
        // normal resolution.
        if rest.is_empty() {
            if let Some(pseudo) = self.registry.pseudo_command(first) {
                if pseudo.execute(actor) {
                    debug!(actor = %actor.name(), word = %first, "pseudo-command handled");
                    return true;
                }
            }
        }

        // Cooldown gate. Rejection does not refresh the stamp.
        if let Some(cooldowns) = &self.cooldowns {
            if !actor.has_permission(&self.config.cooldown_exempt_permission) {
                let verdict = cooldowns.check(actor.id(), Utc::now());
                if matches!(verdict, CooldownVerdict::Wait(_)) {
                    let secs = verdict.remaining_secs();
                    self.send(actor, &messages::cooldown_wait(secs));
                    return self.fail(
                        actor,
                        first,
                        DispatchFailure::CooldownActive { remaining_secs: secs },
                    );
                }
            }
        }

        // Resolve by name or alias.
        let Some(command) = self.registry.resolve(first) else {
            self.send(actor, messages::unknown_command());
            return self.fail(actor, first, DispatchFailure::UnknownCommand);
        };
        let spec = Arc::clone(command.spec());
        self.registry.record_dispatch(spec.name());

        // Command-level gates.
        if !actor.has_any_permission(spec.permissions()) {
            self.send(actor, messages::no_permission());
            return self.fail(actor, first, DispatchFailure::NoPermission);
        }
        if spec.is_in_game_only() && !actor.is_in_game() {
            self.send(actor, messages::in_game_only());
            return self.fail(actor, first, DispatchFailure::InGameOnly);
        }

        // Trailing help trigger: detailed usage for this command.
        if rest.last().is_some_and(|token| self.config.is_help_trigger(token)) {
            self.send_all(actor, help::command_usage(&spec, actor, &self.info.command_prefix));
            return true;
        }

        let args = match self.build_arguments(actor, first, &spec, rest) {
            Ok(args) => args,
            Err(handled) => return handled,
        };

        // External veto, then the handler.
        if let Some(hook) = &self.hook {
            if !hook.before_execute(actor, &args) {
                return self.fail(actor, first, DispatchFailure::Vetoed);
            }
        }
        let handled = command.handler().execute(actor, &args).await;
        if handled {
            debug!(actor = %actor.name(), command = spec.name(), "command handled");
        } else {
            self.fail(actor, first, DispatchFailure::HandlerRejected);
        }
        handled
    }

    /// Match and convert the argument tokens.
    ///
    /// The error side carries the dispatch result for the caller to return
    /// (always `false` today; typed so the failure paths stay in one place).
    fn build_arguments(
        &self,
        actor: &dyn Actor,
        first: &str,
        spec: &Arc<CommandSpec>,
        rest: &[&str],
    ) -> Result<Arguments, bool> {
        // A command with no sub-commands expects no arguments at all.
        if spec.sub_commands().is_empty() {
            if rest.is_empty() {
                return Ok(Arguments::no_args(Arc::clone(spec)));
            }
            self.reject_arguments(actor, spec);
            return Err(self.fail(actor, first, DispatchFailure::NoArgumentMatch));
        }

        let Some(index) = match_sub_command(spec.sub_commands(), rest) else {
            self.reject_arguments(actor, spec);
            return Err(self.fail(actor, first, DispatchFailure::NoArgumentMatch));
        };

        // Sub-command gates, re-checked on top of the command-level ones.
        let sub = &spec.sub_commands()[index];
        if !actor.has_any_permission(sub.permissions()) {
            self.send(actor, messages::no_permission());
            return Err(self.fail(actor, first, DispatchFailure::NoPermission));
        }
        if sub.is_in_game_only() && !actor.is_in_game() {
            self.send(actor, messages::in_game_only());
            return Err(self.fail(actor, first, DispatchFailure::InGameOnly));
        }

        match self.converters.convert(Arc::clone(spec), index, rest) {
            Ok(args) => Ok(args),
            Err(pipeline_err) => {
                let failure: DispatchFailure = pipeline_err.into();
                match &failure {
                    DispatchFailure::Conversion { argument, reason } => {
                        self.send(actor, &messages::conversion_failure(argument, reason));
                    }
                    _ => {
                        // Registration validation makes this unreachable.
                        error!(command = spec.name(), "converter missing at invocation time");
                        self.send(actor, messages::internal_error());
                    }
                }
                Err(self.fail(actor, first, failure))
            }
        }
    }

    fn show_help(&self, actor: &dyn Actor, rest: &[&str]) -> bool {
        let lines = match rest.first() {
            Some(token) => {
                if let Ok(page) = token.parse::<usize>() {
                    help::command_list_page(&self.registry, actor, &self.info, &self.config, page)
                } else if let Some(topic) = self.registry.help_topic(token) {
                    topic.lines().map(str::to_string).collect()
                } else {
                    help::command_list_page(&self.registry, actor, &self.info, &self.config, 1)
                }
            }
            None => help::command_list_page(&self.registry, actor, &self.info, &self.config, 1),
        };
        self.send_all(actor, lines);
        true
    }

    fn reject_arguments(&self, actor: &dyn Actor, spec: &CommandSpec) {
        self.send(actor, messages::invalid_arguments());
        self.send_all(
            actor,
            help::command_usage(spec, actor, &self.info.command_prefix),
        );
    }

    fn send(&self, actor: &dyn Actor, text: &str) {
        self.sink.deliver(actor.id(), text);
    }

    fn send_all(&self, actor: &dyn Actor, lines: Vec<String>) {
        for line in lines {
            self.send(actor, &line);
        }
    }

    fn fail(&self, actor: &dyn Actor, command: &str, failure: DispatchFailure) -> bool {
        debug!(
            actor = %actor.name(),
            command = %command,
            code = failure.error_code(),
            "dispatch failed"
        );
        false
    }
}
