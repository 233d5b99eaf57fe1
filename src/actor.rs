//! Collaborator abstractions: actors, message delivery, per-actor metadata.
//!
//! The host runtime owns the real implementations; the framework only sees
//! these traits. `InMemoryMetadataStore` is the in-process default for
//! hosts without their own transient metadata facility.

use std::fmt;

use dashmap::DashMap;
use uuid::Uuid;

/// Stable unique identifier for an actor within a server session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Wrap an existing host-assigned identifier.
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// A fresh random identifier, for console-equivalents and tests.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The invoker of a command: an in-game player or a console-equivalent.
pub trait Actor: Send + Sync {
    /// The stable identifier.
    fn id(&self) -> ActorId;

    /// Display name, used in log fields.
    fn name(&self) -> &str;

    /// Whether the actor holds a permission node.
    fn has_permission(&self, node: &str) -> bool;

    /// Whether this is an in-game actor, as opposed to e.g. the console.
    fn is_in_game(&self) -> bool;

    /// Any-of check over a permission set. An empty set is unrestricted.
    fn has_any_permission(&self, nodes: &[String]) -> bool {
        nodes.is_empty() || nodes.iter().any(|node| self.has_permission(node))
    }
}

/// Delivery sink for actor-visible text.
///
/// Keyed by [`ActorId`] so callers that no longer hold the actor (deadline
/// tasks, confirmation callbacks) can still message it.
pub trait MessageSink: Send + Sync {
    /// Deliver one formatted line to the actor, if it is still reachable.
    fn deliver(&self, target: ActorId, text: &str);
}

/// Per-actor transient key/value strings.
pub trait MetadataStore: Send + Sync {
    /// The value stored under a key, if any.
    fn get(&self, actor: ActorId, key: &str) -> Option<String>;

    /// Store or replace the value under a key.
    fn set(&self, actor: ActorId, key: &str, value: String);

    /// Remove one key.
    fn remove(&self, actor: ActorId, key: &str);

    /// Drop everything for an actor (disconnect cleanup).
    fn clear_actor(&self, actor: ActorId);
}

/// DashMap-backed metadata store, the in-process default.
#[derive(Debug, Default)]
pub struct InMemoryMetadataStore {
    entries: DashMap<(ActorId, String), String>,
}

impl InMemoryMetadataStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataStore for InMemoryMetadataStore {
    fn get(&self, actor: ActorId, key: &str) -> Option<String> {
        self.entries
            .get(&(actor, key.to_string()))
            .map(|entry| entry.value().clone())
    }

    fn set(&self, actor: ActorId, key: &str, value: String) {
        self.entries.insert((actor, key.to_string()), value);
    }

    fn remove(&self, actor: ActorId, key: &str) {
        self.entries.remove(&(actor, key.to_string()));
    }

    fn clear_actor(&self, actor: ActorId) {
        self.entries.retain(|(id, _), _| *id != actor);
    }
}
