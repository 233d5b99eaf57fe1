//! Integration test common infrastructure.
//!
//! Provides actor doubles, a recording message sink, and a handler double
//! for asserting on full dispatch flows.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use commandeer::{Actor, ActorId, Arguments, CommandHandler, MessageSink};
use parking_lot::Mutex;

/// Actor double with explicit permissions and in-game flag.
pub struct TestActor {
    id: ActorId,
    name: String,
    permissions: Vec<String>,
    in_game: bool,
}

impl TestActor {
    /// An in-game actor with no permissions.
    pub fn player(name: &str) -> Self {
        Self {
            id: ActorId::random(),
            name: name.to_string(),
            permissions: Vec::new(),
            in_game: true,
        }
    }

    /// A console-equivalent actor: not in game, no permissions.
    pub fn console() -> Self {
        Self {
            id: ActorId::random(),
            name: "console".to_string(),
            permissions: Vec::new(),
            in_game: false,
        }
    }

    /// Grant permission nodes.
    pub fn with_permissions(mut self, nodes: &[&str]) -> Self {
        self.permissions
            .extend(nodes.iter().map(|node| node.to_string()));
        self
    }
}

impl Actor for TestActor {
    fn id(&self) -> ActorId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, node: &str) -> bool {
        self.permissions.iter().any(|held| held == node)
    }

    fn is_in_game(&self) -> bool {
        self.in_game
    }
}

/// Sink that records every delivered line.
#[derive(Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<(ActorId, String)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Lines delivered to one actor, in order.
    pub fn lines_for(&self, actor: ActorId) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(target, _)| *target == actor)
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// Whether any line delivered to the actor contains the needle.
    pub fn saw(&self, actor: ActorId, needle: &str) -> bool {
        self.lines_for(actor).iter().any(|line| line.contains(needle))
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl MessageSink for RecordingSink {
    fn deliver(&self, target: ActorId, text: &str) {
        self.lines.lock().push((target, text.to_string()));
    }
}

/// Handler double recording each invocation's converted values.
pub struct RecordingHandler {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    result: bool,
}

impl RecordingHandler {
    /// A handler that reports success.
    pub fn succeeding() -> (Self, Arc<Mutex<Vec<Vec<String>>>>) {
        Self::with_result(true)
    }

    /// A handler that runs but reports failure.
    pub fn failing() -> (Self, Arc<Mutex<Vec<Vec<String>>>>) {
        Self::with_result(false)
    }

    fn with_result(result: bool) -> (Self, Arc<Mutex<Vec<Vec<String>>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                calls: calls.clone(),
                result,
            },
            calls,
        )
    }
}

#[async_trait]
impl CommandHandler for RecordingHandler {
    async fn execute(&self, _actor: &dyn Actor, args: &Arguments) -> bool {
        let rendered = args.values().iter().map(ToString::to_string).collect();
        self.calls.lock().push(rendered);
        self.result
    }
}
