//! Confirmation flow declarations.
//!
//! A flow binds an identity and an accept/decline word pair to four
//! callbacks. Registration returns a typed [`FlowHandle`]; because only
//! that handle can prompt under its flow, the payload stored for an entry
//! is always the flow's declared payload type, and the registry resolves
//! it back without exposing any cast to callers.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use tracing::error;

use crate::actor::ActorId;

/// Identity of a registered confirmation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowId(&'static str);

impl FlowId {
    pub(crate) const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// The flow's name.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One flow callback, fired with the prompted actor and the stored payload.
pub type FlowCallback<P> = Box<dyn Fn(ActorId, P) + Send + Sync>;

/// Declaration of a confirmation flow.
///
/// Unset callbacks default to no-ops, so a flow that only cares about
/// accept can declare just that.
pub struct FlowSpec<P> {
    /// Unique flow name.
    pub id: &'static str,
    /// Pseudo-command word that accepts a pending prompt.
    pub accept_word: &'static str,
    /// Pseudo-command word that declines a pending prompt.
    pub decline_word: &'static str,
    /// Fired when the prompted actor accepts.
    pub on_accept: FlowCallback<P>,
    /// Fired when the prompted actor declines.
    pub on_decline: FlowCallback<P>,
    /// Fired when the prompt's deadline elapses unanswered.
    pub on_timeout: FlowCallback<P>,
    /// Fired when another prompt replaces this flow's pending entry.
    pub on_terminate: FlowCallback<P>,
}

impl<P> FlowSpec<P> {
    /// A flow with the given identity and words, and no-op callbacks.
    pub fn new(id: &'static str, accept_word: &'static str, decline_word: &'static str) -> Self {
        Self {
            id,
            accept_word,
            decline_word,
            on_accept: Box::new(|_, _| {}),
            on_decline: Box::new(|_, _| {}),
            on_timeout: Box::new(|_, _| {}),
            on_terminate: Box::new(|_, _| {}),
        }
    }

    /// Set the accept callback.
    pub fn on_accept<F>(mut self, callback: F) -> Self
    where
        F: Fn(ActorId, P) + Send + Sync + 'static,
    {
        self.on_accept = Box::new(callback);
        self
    }

    /// Set the decline callback.
    pub fn on_decline<F>(mut self, callback: F) -> Self
    where
        F: Fn(ActorId, P) + Send + Sync + 'static,
    {
        self.on_decline = Box::new(callback);
        self
    }

    /// Set the timeout callback.
    pub fn on_timeout<F>(mut self, callback: F) -> Self
    where
        F: Fn(ActorId, P) + Send + Sync + 'static,
    {
        self.on_timeout = Box::new(callback);
        self
    }

    /// Set the terminate callback.
    pub fn on_terminate<F>(mut self, callback: F) -> Self
    where
        F: Fn(ActorId, P) + Send + Sync + 'static,
    {
        self.on_terminate = Box::new(callback);
        self
    }
}

/// Capability to prompt under one registered flow.
///
/// Returned by `register_flow` and the only way to create entries for that
/// flow, which is what keeps the stored payload type consistent.
pub struct FlowHandle<P> {
    id: FlowId,
    _payload: PhantomData<fn(P)>,
}

impl<P> FlowHandle<P> {
    pub(crate) const fn new(id: FlowId) -> Self {
        Self { id, _payload: PhantomData }
    }

    /// The flow's identity.
    pub const fn id(&self) -> FlowId {
        self.id
    }
}

impl<P> Clone for FlowHandle<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for FlowHandle<P> {}

impl<P> fmt::Debug for FlowHandle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FlowHandle").field(&self.id).finish()
    }
}

/// Type-erased payload as stored in the entry table.
pub(crate) type Payload = Box<dyn Any + Send + Sync>;

pub(crate) type ErasedCallback = Box<dyn Fn(ActorId, Payload) + Send + Sync>;

/// A flow with its callbacks erased over the payload type.
pub(crate) struct ErasedFlow {
    pub id: FlowId,
    pub accept_word: String,
    pub decline_word: String,
    pub on_accept: ErasedCallback,
    pub on_decline: ErasedCallback,
    pub on_timeout: ErasedCallback,
    pub on_terminate: ErasedCallback,
}

impl ErasedFlow {
    pub(crate) fn from_spec<P: Send + Sync + 'static>(spec: FlowSpec<P>) -> Self {
        let id = spec.id;
        Self {
            id: FlowId::new(id),
            accept_word: spec.accept_word.to_ascii_lowercase(),
            decline_word: spec.decline_word.to_ascii_lowercase(),
            on_accept: erase(spec.on_accept, id, "accept"),
            on_decline: erase(spec.on_decline, id, "decline"),
            on_timeout: erase(spec.on_timeout, id, "timeout"),
            on_terminate: erase(spec.on_terminate, id, "terminate"),
        }
    }
}

fn erase<P: Send + Sync + 'static>(
    callback: FlowCallback<P>,
    flow: &'static str,
    stage: &'static str,
) -> ErasedCallback {
    Box::new(move |actor, payload| match payload.downcast::<P>() {
        Ok(payload) => callback(actor, *payload),
        // Entries are created only through the flow's typed handle, so a
        // mismatch here is a registry defect, not a caller mistake.
        Err(_) => error!(flow, stage, actor = %actor, "confirmation payload type mismatch"),
    })
}
