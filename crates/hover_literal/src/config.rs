//! Locator configuration.
//!
//! Loading settings from an editor store is the embedder's job; this module
//! only defines the knobs and their defaults.

/// How the JSON decoder treats escapes outside the JSON grammar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum JsonEscapePolicy {
    /// Reject the literal: an unknown escape, a `\u` without four hex
    /// digits, or a trailing lone `\` produces a [`DecodeError`](crate::DecodeError).
    #[default]
    Strict,
    /// Best effort: `\a` reads as `a`, `\uzzzz` as `zzzz`, and a trailing
    /// `\` stays as is.
    Lenient,
}

/// Policy the JSON and JSONC locators use unless configured otherwise.
pub const DEFAULT_JSON_ESCAPE_POLICY: JsonEscapePolicy = JsonEscapePolicy::Strict;

/// Settings shared by all locators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocatorConfig {
    pub json_escape_policy: JsonEscapePolicy,
}

impl LocatorConfig {
    /// Config with the given JSON escape policy.
    pub const fn with_json_escape_policy(json_escape_policy: JsonEscapePolicy) -> Self {
        Self { json_escape_policy }
    }
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self::with_json_escape_policy(DEFAULT_JSON_ESCAPE_POLICY)
    }
}
