//! `locale:key` glob patterns
//!
//! Patterns select translations for `add` and `reset`. `*` matches any run of
//! characters and `?` a single one. A pattern without a `:` names a whole locale,
//! so `en` is read as `en:*`.

use crate::artifacts::objects::change::TranslationKey;
use anyhow::Context;

#[derive(Debug, Clone)]
pub struct KeyPattern {
    source: String,
    matcher: regex::Regex,
}

impl KeyPattern {
    pub fn try_parse(pattern: &str) -> anyhow::Result<Self> {
        if pattern.is_empty() {
            anyhow::bail!("pattern cannot be empty");
        }

        let source = if pattern.contains(':') {
            pattern.to_string()
        } else {
            format!("{pattern}:*")
        };

        let mut expression = String::from("^");
        for c in source.chars() {
            match c {
                '*' => expression.push_str(".*"),
                '?' => expression.push('.'),
                other => expression.push_str(&regex::escape(&other.to_string())),
            }
        }
        expression.push('$');

        let matcher = regex::Regex::new(&expression)
            .with_context(|| format!("invalid key pattern: {pattern}"))?;

        Ok(Self { source, matcher })
    }

    pub fn matches(&self, key: &TranslationKey) -> bool {
        self.matcher.is_match(&key.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}
