/*!
 * Detection of text that must never be machine-translated.
 *
 * A text leaf is placeholder-only when, once every interpolation or format
 * directive has been removed, no alphabetic character is left.
 */

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Marker for ICU plural expressions produced by Angular's i18n extraction
pub const PLURAL_MARKER: &str = "{VAR_PLURAL";

/// Built-in interpolation and format-directive patterns
static BUILTIN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // {{ expression }}
        r"\{\{.*?\}\}",
        // ${expression}
        r"\$\{[^}]*\}",
        // {name}, {0}, {VAR_SELECT}, {$INTERPOLATION}
        r"\{\$?[A-Za-z0-9_.\-]*\}",
        // printf-style: %s %d %1$s %.2f %@ %%
        r"%(?:\d+\$)?[-+ 0#]*\d*(?:\.\d+)?[sdifuxXeEgGcpo@%]",
        // character and entity references that survived unescaping
        r"&(?:[A-Za-z]+|#\d+|#x[0-9A-Fa-f]+);",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("built-in placeholder pattern"))
    .collect()
});

/// Predicate deciding whether a text leaf is made of placeholders only
#[derive(Debug, Clone)]
pub struct PlaceholderFilter {
    extra: Vec<Regex>,
}

impl Default for PlaceholderFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderFilter {
    /// Filter using only the built-in patterns
    pub fn new() -> Self {
        Self { extra: Vec::new() }
    }

    /// Filter with additional user-supplied regular expressions
    pub fn with_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let extra = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).with_context(|| format!("Invalid placeholder pattern: {}", pattern))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { extra })
    }

    /// True when nothing human-readable remains after stripping placeholders
    pub fn is_placeholder_only(&self, text: &str) -> bool {
        let mut rest = text.to_string();
        for pattern in BUILTIN_PATTERNS.iter().chain(self.extra.iter()) {
            if pattern.is_match(&rest) {
                rest = pattern.replace_all(&rest, "").into_owned();
            }
        }
        !rest.chars().any(char::is_alphabetic)
    }
}

/// True when the text carries an ICU plural expression
pub fn has_plural_marker(text: &str) -> bool {
    text.contains(PLURAL_MARKER)
}
