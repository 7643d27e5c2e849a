//! `{name}` / `{name:format}` placeholder substitution.
//!
//! The engine only finds tokens and splices values back in; what a name means
//! is decided entirely by the caller's resolver.

use std::convert::Infallible;
use std::sync::LazyLock;

use regex::Regex;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9]+)(?::([^}]*))?\}").unwrap());

/// One placeholder occurrence in a template string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceholderToken {
    /// Full token text including braces, e.g. `{Date:yyyyMMdd}`.
    pub raw: String,
    pub name: String,
    /// `None` when the token has no `:`; `Some("")` for `{Name:}`.
    pub format: Option<String>,
}

/// Distinct tokens of `template` in order of first appearance.
pub fn tokens(template: &str) -> Vec<PlaceholderToken> {
    let mut found: Vec<PlaceholderToken> = Vec::new();
    for captures in TOKEN_PATTERN.captures_iter(template) {
        let raw = &captures[0];
        if found.iter().any(|token| token.raw == raw) {
            continue;
        }
        found.push(PlaceholderToken {
            raw: raw.to_string(),
            name: captures[1].to_string(),
            format: captures.get(2).map(|m| m.as_str().to_string()),
        });
    }
    found
}

/// Substitute every placeholder in `template` using `resolve`.
///
/// Each distinct token is resolved once and every textual occurrence of it in
/// the working string is replaced. Names the resolver does not know should map
/// to a fallback (usually the empty string); the engine never fails on them.
pub fn evaluate<F>(template: &str, mut resolve: F) -> String
where
    F: FnMut(&PlaceholderToken) -> String,
{
    match try_evaluate(template, |token| Ok::<_, Infallible>(resolve(token))) {
        Ok(rendered) => rendered,
        Err(never) => match never {},
    }
}

/// Fallible variant of [`evaluate`]; stops at the first resolver error.
pub fn try_evaluate<F, E>(template: &str, mut resolve: F) -> Result<String, E>
where
    F: FnMut(&PlaceholderToken) -> Result<String, E>,
{
    let mut working = template.to_string();
    for token in tokens(template) {
        let value = resolve(&token)?;
        working = working.replace(&token.raw, &value);
    }
    Ok(working)
}
