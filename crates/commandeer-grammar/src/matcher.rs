//! Sub-command shape matching.
//!
//! Given a command's declared sub-command list and the raw tokens of one
//! invocation, pick the sub-command the tokens fit. Only token count and
//! fixed literals are checked here; variable positions accept any token and
//! type validation happens later, in conversion.

use crate::descriptor::{ArgKind, SubCommandSpec};

/// How a candidate sub-command fits the token array.
enum Fit {
    /// Token count equals the descriptor count and every literal matches.
    Exact,
    /// One token short, absorbed by an optional final descriptor.
    Provisional,
    /// Does not fit.
    None,
}

/// Select the sub-command the tokens fit, by declaration order.
///
/// The first exact-length fit wins immediately. A provisional fit (final
/// optional argument omitted) is remembered but only returned if the scan
/// finds no exact fit anywhere in the list. Returns `None` when nothing
/// fits, including for an empty sub-command list.
pub fn match_sub_command(sub_commands: &[SubCommandSpec], tokens: &[&str]) -> Option<usize> {
    let mut provisional: Option<usize> = None;

    for (index, sub) in sub_commands.iter().enumerate() {
        match fit(sub, tokens) {
            Fit::Exact => return Some(index),
            Fit::Provisional => {
                if provisional.is_none() {
                    provisional = Some(index);
                }
            }
            Fit::None => {}
        }
    }

    provisional
}

fn fit(sub: &SubCommandSpec, tokens: &[&str]) -> Fit {
    let declared = sub.len();
    let short_by_one = tokens.len() + 1 == declared
        && sub
            .args()
            .last()
            .is_some_and(|spec| spec.kind() == ArgKind::Optional);

    if tokens.len() != declared && !short_by_one {
        return Fit::None;
    }

    // Walk the provided positions. A missing token can only be the final,
    // optional one, which the zip simply skips.
    for (spec, token) in sub.args().iter().zip(tokens.iter()) {
        if spec.kind() == ArgKind::Literal && !token.eq_ignore_ascii_case(spec.name()) {
            return Fit::None;
        }
    }

    if short_by_one { Fit::Provisional } else { Fit::Exact }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ArgSpec, ArgType};

    fn price_amount() -> SubCommandSpec {
        SubCommandSpec::new(vec![
            ArgSpec::literal("price"),
            ArgSpec::required("amount", ArgType::Integer),
        ])
    }

    #[test]
    fn test_literal_and_required() {
        let subs = vec![price_amount()];
        assert_eq!(match_sub_command(&subs, &["price", "42"]), Some(0));
        assert_eq!(match_sub_command(&subs, &["PRICE", "42"]), Some(0));
        assert_eq!(match_sub_command(&subs, &["amount", "42"]), None);
        assert_eq!(match_sub_command(&subs, &["price"]), None);
        assert_eq!(match_sub_command(&subs, &["price", "42", "extra"]), None);
    }

    #[test]
    fn test_first_declared_wins() {
        let subs = vec![
            SubCommandSpec::new(vec![ArgSpec::required("a", ArgType::Text)]),
            SubCommandSpec::new(vec![ArgSpec::required("b", ArgType::Text)]),
        ];
        assert_eq!(match_sub_command(&subs, &["anything"]), Some(0));
    }

    #[test]
    fn test_exact_preferred_over_earlier_provisional() {
        // First candidate fits only by dropping its optional tail; a later
        // exact-length candidate must win.
        let subs = vec![
            SubCommandSpec::new(vec![
                ArgSpec::required("name", ArgType::Text),
                ArgSpec::optional("page", ArgType::Integer),
            ]),
            SubCommandSpec::new(vec![ArgSpec::required("name", ArgType::Text)]),
        ];
        assert_eq!(match_sub_command(&subs, &["target"]), Some(1));
    }

    #[test]
    fn test_provisional_when_no_exact() {
        let subs = vec![SubCommandSpec::new(vec![
            ArgSpec::literal("list"),
            ArgSpec::optional("page", ArgType::Integer),
        ])];
        assert_eq!(match_sub_command(&subs, &["list", "2"]), Some(0));
        assert_eq!(match_sub_command(&subs, &["list"]), Some(0));
    }

    #[test]
    fn test_required_needs_exact_length() {
        let subs = vec![SubCommandSpec::new(vec![ArgSpec::required(
            "target",
            ArgType::Text,
        )])];
        assert_eq!(match_sub_command(&subs, &["bob"]), Some(0));
        assert_eq!(match_sub_command(&subs, &[]), None);
        assert_eq!(match_sub_command(&subs, &["bob", "alice"]), None);
    }

    #[test]
    fn test_zero_descriptors_need_zero_tokens() {
        let subs = vec![SubCommandSpec::new(Vec::new())];
        assert_eq!(match_sub_command(&subs, &[]), Some(0));
        assert_eq!(match_sub_command(&subs, &["stray"]), None);
    }

    #[test]
    fn test_empty_sub_command_list_never_matches() {
        assert_eq!(match_sub_command(&[], &[]), None);
        assert_eq!(match_sub_command(&[], &["x"]), None);
    }

    #[test]
    fn test_literal_mismatch_fails_only_that_candidate() {
        let subs = vec![
            SubCommandSpec::new(vec![
                ArgSpec::literal("buy"),
                ArgSpec::required("amount", ArgType::Integer),
            ]),
            SubCommandSpec::new(vec![
                ArgSpec::literal("sell"),
                ArgSpec::required("amount", ArgType::Integer),
            ]),
        ];
        assert_eq!(match_sub_command(&subs, &["sell", "3"]), Some(1));
    }

    #[test]
    fn test_first_provisional_kept_when_several() {
        let subs = vec![
            SubCommandSpec::new(vec![
                ArgSpec::literal("list"),
                ArgSpec::optional("page", ArgType::Integer),
            ]),
            SubCommandSpec::new(vec![
                ArgSpec::literal("list"),
                ArgSpec::optional("filter", ArgType::Text),
            ]),
        ];
        assert_eq!(match_sub_command(&subs, &["list"]), Some(0));
    }
}
