//! Help output: plugin summary, paginated command list, per-command usage.
//!
//! Commands and sub-commands the actor lacks permission for are filtered
//! out of every listing.

use commandeer_grammar::CommandSpec;

use crate::actor::Actor;
use crate::config::{DispatchConfig, PluginInfo};
use crate::registry::CommandRegistry;

/// The plugin summary shown for a bare invocation.
pub(crate) fn summary(info: &PluginInfo, config: &DispatchConfig) -> Vec<String> {
    let trigger = config
        .help_triggers
        .first()
        .map(String::as_str)
        .unwrap_or("help");
    vec![
        format!("{} v{}", info.name, info.version),
        format!(
            "Type '{}{trigger}' for the command list.",
            info.command_prefix
        ),
    ]
}

/// One usage line per sub-command the actor may invoke, across all
/// registered commands, sorted by command name.
fn visible_lines(registry: &CommandRegistry, actor: &dyn Actor, prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for command in registry.commands_sorted() {
        let spec = command.spec();
        if !actor.has_any_permission(spec.permissions()) {
            continue;
        }
        if spec.sub_commands().is_empty() {
            lines.extend(spec.usage_lines(prefix));
            continue;
        }
        for (line, sub) in spec.usage_lines(prefix).iter().zip(spec.sub_commands()) {
            if actor.has_any_permission(sub.permissions()) {
                lines.push(line.clone());
            }
        }
    }
    lines
}

/// A page of the command list. Out-of-range pages clamp into range.
pub(crate) fn command_list_page(
    registry: &CommandRegistry,
    actor: &dyn Actor,
    info: &PluginInfo,
    config: &DispatchConfig,
    page: usize,
) -> Vec<String> {
    let lines = visible_lines(registry, actor, &info.command_prefix);
    if lines.is_empty() {
        return vec!["No commands available.".to_string()];
    }

    let page_size = config.help_page_size;
    let page_count = lines.len().div_ceil(page_size);
    let page = page.clamp(1, page_count);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(lines.len());

    let mut out = Vec::with_capacity(end - start + 1);
    out.push(format!("{} commands (page {page}/{page_count})", info.name));
    out.extend(lines[start..end].iter().cloned());
    out
}

/// Detailed usage for one command.
pub(crate) fn command_usage(spec: &CommandSpec, actor: &dyn Actor, prefix: &str) -> Vec<String> {
    let mut out = vec![format!("Usage for {prefix}{}:", spec.name())];
    if spec.sub_commands().is_empty() {
        out.push(format!("  {prefix}{}", spec.name()));
        return out;
    }
    for (line, sub) in spec.usage_lines(prefix).iter().zip(spec.sub_commands()) {
        if actor.has_any_permission(sub.permissions()) {
            out.push(format!("  {line}"));
        }
    }
    out
}
