//! Confirmation state machine.
//!
//! A process-wide table of prompted actors. Each actor has at most one
//! live entry across *all* flows: prompting an already-prompted actor
//! evicts the previous entry first (terminating its owner), and each entry
//! carries at most one pending deadline.
//!
//! Deadlines fire on the scheduler, asynchronously to the dispatch path,
//! so a deadline can race an explicit accept/decline/re-prompt on the same
//! actor. Every transition goes through an atomic remove on the entry
//! table; whichever caller actually removes the entry fires its callback,
//! and the loser is a silent no-op. Entries are generation-tagged so a
//! stale deadline can never evict a successor entry.

mod flow;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, error, info};

pub use flow::{FlowCallback, FlowHandle, FlowId, FlowSpec};

use flow::{ErasedFlow, Payload};

use crate::actor::{Actor, ActorId};
use crate::error::RegistrationError;
use crate::registry::PseudoCommand;
use crate::schedule::{ScheduledTask, Scheduler};

/// Which explicit transition a word maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Settlement {
    Accept,
    Decline,
}

/// One prompted actor.
struct Entry {
    flow: Arc<ErasedFlow>,
    payload: Payload,
    generation: u64,
    deadline: Option<ScheduledTask>,
}

/// The process-wide table of prompted actors.
///
/// Constructed once and shared by reference with every component that
/// prompts; there is no hidden global.
pub struct ConfirmationRegistry {
    flows: RwLock<HashMap<FlowId, Arc<ErasedFlow>>>,
    entries: DashMap<ActorId, Entry>,
    scheduler: Arc<dyn Scheduler>,
    generation: AtomicU64,
}

impl ConfirmationRegistry {
    /// A registry scheduling deadlines on the given scheduler.
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            flows: RwLock::new(HashMap::new()),
            entries: DashMap::new(),
            scheduler,
            generation: AtomicU64::new(0),
        }
    }

    /// Register a flow and obtain the typed handle that prompts under it.
    pub fn register_flow<P: Send + Sync + 'static>(
        &self,
        spec: FlowSpec<P>,
    ) -> Result<FlowHandle<P>, RegistrationError> {
        let id = FlowId::new(spec.id);
        let mut flows = self.flows.write();
        if flows.contains_key(&id) {
            return Err(RegistrationError::DuplicateFlow(spec.id.to_string()));
        }
        flows.insert(id, Arc::new(ErasedFlow::from_spec(spec)));
        info!(flow = id.as_str(), "confirmation flow registered");
        Ok(FlowHandle::new(id))
    }

    /// The accept and decline words a flow was registered with.
    pub fn flow_words<P>(&self, handle: &FlowHandle<P>) -> Option<(String, String)> {
        let flows = self.flows.read();
        let flow = flows.get(&handle.id())?;
        Some((flow.accept_word.clone(), flow.decline_word.clone()))
    }

    /// Prompt an actor under a flow.
    ///
    /// An existing entry for the actor — whichever flow owns it — is
    /// evicted first: its deadline is cancelled and its flow's terminate
    /// callback fires with the previous payload. A positive `timeout`
    /// schedules a deadline that declines-by-expiry through the flow's
    /// timeout callback.
    pub fn prompt<P: Send + Sync + 'static>(
        self: &Arc<Self>,
        handle: &FlowHandle<P>,
        actor: ActorId,
        payload: P,
        timeout: Option<Duration>,
    ) {
        self.prompt_inner(handle, actor, payload, timeout, true);
    }

    /// Like [`prompt`](Self::prompt), but replacing an existing entry does
    /// not fire its terminate callback.
    pub fn prompt_silently<P: Send + Sync + 'static>(
        self: &Arc<Self>,
        handle: &FlowHandle<P>,
        actor: ActorId,
        payload: P,
        timeout: Option<Duration>,
    ) {
        self.prompt_inner(handle, actor, payload, timeout, false);
    }

    fn prompt_inner<P: Send + Sync + 'static>(
        self: &Arc<Self>,
        handle: &FlowHandle<P>,
        actor: ActorId,
        payload: P,
        timeout: Option<Duration>,
        notify_previous: bool,
    ) {
        let flow = self.flows.read().get(&handle.id()).cloned();
        let Some(flow) = flow else {
            // Unreachable through a handle from register_flow.
            error!(flow = handle.id().as_str(), "prompt under unregistered flow");
            return;
        };

        self.evict(actor, notify_previous);

        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        debug!(actor = %actor, flow = flow.id.as_str(), "actor prompted");
        self.entries.insert(
            actor,
            Entry {
                flow,
                payload: Box::new(payload),
                generation,
                deadline: None,
            },
        );

        let Some(timeout) = timeout.filter(|timeout| !timeout.is_zero()) else {
            return;
        };

        let registry = Arc::clone(self);
        let task = self.scheduler.schedule(
            timeout,
            Box::new(move || registry.expire(actor, generation)),
        );

        // Attach the deadline unless the entry already changed hands.
        match self.entries.get_mut(&actor) {
            Some(mut entry) if entry.generation == generation => entry.deadline = Some(task),
            _ => task.cancel(),
        }
    }

    /// Accept the actor's pending prompt via a pseudo-command word.
    ///
    /// Handled only when an entry exists and its flow registered `via_word`
    /// as the accept word; anything else reports not-handled and leaves
    /// the table unchanged.
    pub fn accept(&self, actor: ActorId, via_word: &str) -> bool {
        self.settle(actor, via_word, Settlement::Accept)
    }

    /// Decline the actor's pending prompt via a pseudo-command word.
    pub fn decline(&self, actor: ActorId, via_word: &str) -> bool {
        self.settle(actor, via_word, Settlement::Decline)
    }

    fn settle(&self, actor: ActorId, via_word: &str, settlement: Settlement) -> bool {
        let word = via_word.to_ascii_lowercase();
        let removed = self.entries.remove_if(&actor, |_, entry| match settlement {
            Settlement::Accept => entry.flow.accept_word == word,
            Settlement::Decline => entry.flow.decline_word == word,
        });

        let Some((_, mut entry)) = removed else {
            return false;
        };
        if let Some(deadline) = entry.deadline.take() {
            deadline.cancel();
        }

        debug!(
            actor = %actor,
            flow = entry.flow.id.as_str(),
            settlement = ?settlement,
            "confirmation settled"
        );
        match settlement {
            Settlement::Accept => (entry.flow.on_accept)(actor, entry.payload),
            Settlement::Decline => (entry.flow.on_decline)(actor, entry.payload),
        }
        true
    }

    /// Deadline path. Fires the timeout callback only when this exact
    /// entry generation is still live; a stale deadline removes nothing.
    fn expire(&self, actor: ActorId, generation: u64) {
        let removed = self
            .entries
            .remove_if(&actor, |_, entry| entry.generation == generation);
        if let Some((_, entry)) = removed {
            debug!(actor = %actor, flow = entry.flow.id.as_str(), "confirmation timed out");
            (entry.flow.on_timeout)(actor, entry.payload);
        }
    }

    /// Remove the actor's entry without firing any callback.
    ///
    /// Returns whether an entry existed.
    pub fn remove(&self, actor: ActorId) -> bool {
        self.evict(actor, false)
    }

    /// Disconnect cleanup: drop the entry, fire nothing.
    pub fn handle_disconnect(&self, actor: ActorId) {
        if self.remove(actor) {
            debug!(actor = %actor, "confirmation dropped on disconnect");
        }
    }

    fn evict(&self, actor: ActorId, notify: bool) -> bool {
        let Some((_, mut entry)) = self.entries.remove(&actor) else {
            return false;
        };
        if let Some(deadline) = entry.deadline.take() {
            deadline.cancel();
        }
        if notify {
            debug!(
                actor = %actor,
                flow = entry.flow.id.as_str(),
                "previous confirmation terminated"
            );
            (entry.flow.on_terminate)(actor, entry.payload);
        }
        true
    }

    /// Whether the actor currently awaits a response.
    pub fn is_prompted(&self, actor: ActorId) -> bool {
        self.entries.contains_key(&actor)
    }

    /// The flow owning the actor's pending prompt, if any.
    pub fn owner_of(&self, actor: ActorId) -> Option<FlowId> {
        self.entries.get(&actor).map(|entry| entry.flow.id)
    }

    /// Number of actors currently prompted.
    pub fn prompted_count(&self) -> usize {
        self.entries.len()
    }
}

/// Pseudo-command routing one word into the registry.
///
/// Word-level, not flow-level: several flows may share a word, and the
/// pending entry's own flow decides whether the word applies to it.
pub struct ConfirmationCommand {
    registry: Arc<ConfirmationRegistry>,
    word: String,
    settlement: Settlement,
}

impl ConfirmationCommand {
    /// The accept pseudo-command for a word.
    pub fn accept(registry: Arc<ConfirmationRegistry>, word: impl Into<String>) -> Self {
        Self {
            registry,
            word: word.into(),
            settlement: Settlement::Accept,
        }
    }

    /// The decline pseudo-command for a word.
    pub fn decline(registry: Arc<ConfirmationRegistry>, word: impl Into<String>) -> Self {
        Self {
            registry,
            word: word.into(),
            settlement: Settlement::Decline,
        }
    }
}

impl PseudoCommand for ConfirmationCommand {
    fn execute(&self, actor: &dyn Actor) -> bool {
        match self.settlement {
            Settlement::Accept => self.registry.accept(actor.id(), &self.word),
            Settlement::Decline => self.registry.decline(actor.id(), &self.word),
        }
    }
}
