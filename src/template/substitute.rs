//! Literal placeholder replacement.
use super::tokens::{ReplaceMode, Token, TokenMap};

/// Outcome of one substitution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    /// Document text after replacement.
    pub text: String,
    /// Tokens replaced at least once, in order of first replacement.
    pub replaced: Vec<Token>,
    /// [`ReplaceMode::First`] tokens whose placeholder occurred again in the
    /// template after the first replacement.
    pub leftover: Vec<Token>,
}

/// Replace mapped placeholders in `template`.
///
/// Matching is literal (no patterns). Tokens in [`ReplaceMode::First`]
/// replace their first occurrence only; [`ReplaceMode::All`] tokens replace
/// every occurrence. The template is scanned once from left to right, so
/// text inserted for one token is never searched for another. Placeholders
/// without a mapping are left untouched.
#[must_use]
pub fn substitute(template: &str, tokens: &TokenMap) -> String {
    substitute_tracked(template, tokens).text
}

/// [`substitute`], also reporting which tokens were replaced and which
/// placeholders of the template were left behind.
///
/// Only placeholders read from `template` are counted. Text inserted as a
/// value is never inspected, so values that happen to contain a
/// placeholder are not reported.
#[must_use]
pub fn substitute_tracked(template: &str, tokens: &TokenMap) -> Substitution {
    let mut result = Substitution {
        text: String::with_capacity(template.len()),
        ..Substitution::default()
    };
    let mut rest = template;

    while let Some(pos) = rest.find('{') {
        let (before, tail) = rest.split_at(pos);
        result.text.push_str(before);

        let matched = tokens.iter().find_map(|(token, value)| {
            tail.strip_prefix(token.placeholder())
                .map(|after| (token, value, after))
        });

        match matched {
            Some((token, _, after))
                if token.mode() == ReplaceMode::First && result.replaced.contains(&token) =>
            {
                result.text.push_str(token.placeholder());
                if !result.leftover.contains(&token) {
                    result.leftover.push(token);
                }
                rest = after;
            }
            Some((token, value, after)) => {
                result.text.push_str(value);
                if !result.replaced.contains(&token) {
                    result.replaced.push(token);
                }
                rest = after;
            }
            None => {
                result.text.push('{');
                rest = tail.strip_prefix('{').unwrap_or_default();
            }
        }
    }
    result.text.push_str(rest);
    result
}
