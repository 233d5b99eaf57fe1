//! # commandeer-grammar
//!
//! The declarative core of the commandeer dispatch framework: command,
//! sub-command, and argument descriptors; the matcher that fits a raw token
//! array to one declared shape; and the converter registry that turns
//! matched tokens into typed values.
//!
//! ## Features
//!
//! - Immutable command/sub-command/argument descriptors with usage rendering
//! - Declaration-order sub-command matching with optional trailing arguments
//! - Pluggable per-type argument converters with structured failure reasons
//! - Built-in integer, boolean, duration, and chat color converters
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use commandeer_grammar::{
//!     ArgSpec, ArgType, CommandSpec, ConverterRegistry, SubCommandSpec,
//!     match_sub_command,
//! };
//!
//! let spec = Arc::new(
//!     CommandSpec::new("shop").sub_command(
//!         SubCommandSpec::new(vec![
//!             ArgSpec::literal("price"),
//!             ArgSpec::required("amount", ArgType::Integer),
//!         ])
//!         .describe("Set the sale price"),
//!     ),
//! );
//!
//! let tokens = ["price", "42"];
//! let index = match_sub_command(spec.sub_commands(), &tokens).unwrap();
//! let registry = ConverterRegistry::default();
//! let args = registry.convert(spec.clone(), index, &tokens).unwrap();
//! assert_eq!(args.int(1), Some(42));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod arguments;
pub mod color;
pub mod convert;
pub mod descriptor;
pub mod duration;
pub mod error;
pub mod matcher;
pub mod value;

pub use arguments::Arguments;
pub use color::ChatColor;
pub use convert::ConverterRegistry;
pub use descriptor::{ArgKind, ArgSpec, ArgType, CommandSpec, SubCommandSpec};
pub use duration::parse_duration;
pub use error::{ConvertError, PipelineError};
pub use matcher::match_sub_command;
pub use value::{ArgValue, ValueList};
