//! Argument conversion.
//!
//! A registry maps each [`ArgType`] to a conversion function; the pipeline
//! walks a matched sub-command's argument positions, converting each raw
//! token and short-circuiting on the first failure.
//!
//! Fixed literals pass through unconverted — the matcher already validated
//! them. Text arguments with no registered converter also pass through;
//! any other type with no converter is a configuration defect reported as
//! [`PipelineError::MissingConverter`], distinct from ordinary per-token
//! failure.

use std::collections::HashMap;
use std::sync::Arc;

use crate::arguments::Arguments;
use crate::color::ChatColor;
use crate::descriptor::{ArgKind, ArgType, CommandSpec};
use crate::duration::parse_duration;
use crate::error::{ConvertError, PipelineError};
use crate::value::{ArgValue, ValueList};

/// A conversion function: one raw token in, a typed value or a reason out.
///
/// The reason string is surfaced to the actor verbatim, prefixed with the
/// argument's display name.
pub type Converter = Box<dyn Fn(&str) -> Result<ArgValue, String> + Send + Sync>;

/// Per-type converter table.
///
/// `Default` pre-populates the integer, boolean, duration, and color
/// converters; `register` overrides per type.
pub struct ConverterRegistry {
    converters: HashMap<ArgType, Converter>,
}

impl ConverterRegistry {
    /// A registry with no converters at all. Text still passes through.
    pub fn empty() -> Self {
        Self { converters: HashMap::new() }
    }

    /// Register or override the converter for a type.
    pub fn register<F>(&mut self, ty: ArgType, converter: F)
    where
        F: Fn(&str) -> Result<ArgValue, String> + Send + Sync + 'static,
    {
        self.converters.insert(ty, Box::new(converter));
    }

    /// The converter registered for a type, if any.
    pub fn lookup(&self, ty: ArgType) -> Option<&Converter> {
        self.converters.get(&ty)
    }

    /// Whether a converter is registered for a type.
    pub fn has(&self, ty: ArgType) -> bool {
        self.converters.contains_key(&ty)
    }

    /// Whether the pipeline can handle a descriptor of this type: either a
    /// converter is registered or the type is `Text` (passthrough).
    pub fn can_convert(&self, ty: ArgType) -> bool {
        ty == ArgType::Text || self.has(ty)
    }

    /// Run the pipeline for a matched sub-command.
    ///
    /// `sub_index` must come from the matcher, so the tokens already fit the
    /// sub-command's shape; a missing optional trailing token yields a value
    /// array one shorter than the descriptor list.
    pub fn convert(
        &self,
        command: Arc<CommandSpec>,
        sub_index: usize,
        tokens: &[&str],
    ) -> Result<Arguments, PipelineError> {
        let sub = &command.sub_commands()[sub_index];
        let mut values = ValueList::with_capacity(tokens.len());

        for (spec, token) in sub.args().iter().zip(tokens.iter()) {
            let value = if spec.kind() == ArgKind::Literal {
                ArgValue::Text((*token).to_string())
            } else if let Some(converter) = self.lookup(spec.ty()) {
                converter(token).map_err(|reason| ConvertError {
                    argument: spec.name().to_string(),
                    reason,
                })?
            } else if spec.ty() == ArgType::Text {
                ArgValue::Text((*token).to_string())
            } else {
                return Err(PipelineError::MissingConverter {
                    argument: spec.name().to_string(),
                    ty: spec.ty(),
                });
            };
            values.push(value);
        }

        Ok(Arguments::new(command, values, Some(sub_index)))
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(ArgType::Integer, convert_integer);
        registry.register(ArgType::Boolean, convert_boolean);
        registry.register(ArgType::Duration, convert_duration);
        registry.register(ArgType::Color, convert_color);
        registry
    }
}

/// Base-10 `i64`. Overflow and non-numeric text reject.
fn convert_integer(token: &str) -> Result<ArgValue, String> {
    token
        .parse::<i64>()
        .map(ArgValue::Int)
        .map_err(|_| format!("'{token}' is not a whole number"))
}

/// Exact `true`/`false` only, case-insensitive. `1`/`yes` reject.
fn convert_boolean(token: &str) -> Result<ArgValue, String> {
    if token.eq_ignore_ascii_case("true") {
        Ok(ArgValue::Bool(true))
    } else if token.eq_ignore_ascii_case("false") {
        Ok(ArgValue::Bool(false))
    } else {
        Err(format!("'{token}' is not true or false"))
    }
}

fn convert_duration(token: &str) -> Result<ArgValue, String> {
    parse_duration(token)
        .map(ArgValue::Duration)
        .ok_or_else(|| format!("'{token}' is not a duration like 1d:12h:30m"))
}

fn convert_color(token: &str) -> Result<ArgValue, String> {
    ChatColor::parse(token)
        .map(ArgValue::Color)
        .ok_or_else(|| format!("'{token}' is not a color name or code"))
}
