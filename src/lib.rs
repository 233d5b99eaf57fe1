//! # commandeer
//!
//! Command dispatch for server plugins: a raw, whitespace-delimited
//! invocation line is matched against declared commands and sub-commands,
//! its tokens are converted into typed values, permission and cooldown
//! policy is enforced, and actions that need a human yes/no go through a
//! confirmation flow with timeout-driven eviction.
//!
//! The declarative grammar (descriptors, matcher, converters) lives in the
//! `commandeer-grammar` crate, re-exported here as [`grammar`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use commandeer::{
//!     Actor, ActorId, ArgSpec, ArgType, Arguments, CommandHandler, CommandSpec,
//!     DispatchConfig, Dispatcher, InMemoryMetadataStore, MessageSink, PluginInfo,
//!     SubCommandSpec,
//! };
//!
//! struct ChatSink;
//!
//! impl MessageSink for ChatSink {
//!     fn deliver(&self, _target: ActorId, text: &str) {
//!         println!("{text}");
//!     }
//! }
//!
//! struct SetPriceHandler;
//!
//! #[async_trait]
//! impl CommandHandler for SetPriceHandler {
//!     async fn execute(&self, _actor: &dyn Actor, args: &Arguments) -> bool {
//!         let amount = args.int(1).unwrap_or(0);
//!         amount > 0
//!     }
//! }
//!
//! let mut dispatcher = Dispatcher::new(
//!     PluginInfo::new("Shops", "1.0"),
//!     DispatchConfig::default(),
//!     Arc::new(ChatSink),
//!     Arc::new(InMemoryMetadataStore::new()),
//! );
//!
//! dispatcher
//!     .register(
//!         CommandSpec::new("shop").sub_command(
//!             SubCommandSpec::new(vec![
//!                 ArgSpec::literal("price"),
//!                 ArgSpec::required("amount", ArgType::Integer),
//!             ])
//!             .describe("Set the sale price"),
//!         ),
//!         Box::new(SetPriceHandler),
//!     )
//!     .unwrap();
//! ```

#![deny(clippy::all)]

pub mod actor;
pub mod config;
pub mod confirm;
pub mod cooldown;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod schedule;

/// The declarative grammar crate.
pub use commandeer_grammar as grammar;

pub use actor::{Actor, ActorId, InMemoryMetadataStore, MessageSink, MetadataStore};
pub use config::{ConfigError, DispatchConfig, PluginInfo};
pub use confirm::{
    ConfirmationCommand, ConfirmationRegistry, FlowCallback, FlowHandle, FlowId, FlowSpec,
};
pub use cooldown::{CooldownTracker, CooldownVerdict};
pub use dispatch::{DispatchHook, Dispatcher};
pub use error::{DispatchFailure, RegistrationError};
pub use grammar::{
    ArgKind, ArgSpec, ArgType, ArgValue, Arguments, ChatColor, CommandSpec, ConverterRegistry,
    SubCommandSpec,
};
pub use registry::{CommandHandler, CommandRegistry, PseudoCommand, RegisteredCommand};
pub use schedule::{ScheduledTask, Scheduler, TokioScheduler};
