//! Working tree
//!
//! The materialized `locale -> key -> value` table the user edits. It is mutable and
//! holds no history; history lives in the commit graph and the working tree is rebuilt
//! from it on checkout.
//!
//! Locale maps never stay empty: removing the last key of a locale removes the locale,
//! so two trees with the same translations always compare (and hash) equal.

use crate::artifacts::core::ContentHasher;
use crate::artifacts::objects::change::{Change, TranslationKey};
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkingTree {
    locales: BTreeMap<String, BTreeMap<String, String>>,
}

impl WorkingTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.locales
            .get(locale)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
    }

    /// Set a value, returning the previous one
    pub fn set(&mut self, locale: &str, key: &str, value: String) -> Option<String> {
        self.locales
            .entry(locale.to_string())
            .or_default()
            .insert(key.to_string(), value)
    }

    /// Remove a value, returning it
    pub fn remove(&mut self, locale: &str, key: &str) -> Option<String> {
        let keys = self.locales.get_mut(locale)?;
        let removed = keys.remove(key);
        if keys.is_empty() {
            self.locales.remove(locale);
        }
        removed
    }

    /// Write `value` into `locale:key`, deleting the key for `None`
    pub fn put(&mut self, locale: &str, key: &str, value: Option<String>) -> Option<String> {
        match value {
            Some(value) => self.set(locale, key, value),
            None => self.remove(locale, key),
        }
    }

    /// Apply a change forward: add/modify sets the new value, delete removes the key
    pub fn apply(&mut self, change: &Change) {
        self.put(&change.locale, &change.key, change.new_value.clone());
    }

    /// Apply a change backward, restoring its old value
    pub fn revert(&mut self, change: &Change) {
        self.put(&change.locale, &change.key, change.old_value.clone());
    }

    pub fn clear(&mut self) {
        self.locales.clear();
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    pub fn locale(&self, locale: &str) -> Option<&BTreeMap<String, String>> {
        self.locales.get(locale)
    }

    /// All entries in `(locale, key)` order
    pub fn entries(&self) -> impl Iterator<Item = (TranslationKey, &str)> {
        self.locales.iter().flat_map(|(locale, keys)| {
            keys.iter()
                .map(move |(key, value)| (TranslationKey::new(locale, key), value.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.locales.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Digest of the serialized tree, used for integrity checks only
    pub fn tree_hash(&self) -> ObjectId {
        let mut hasher = ContentHasher::new();
        for (key, value) in self.entries() {
            hasher = hasher.update(&key.locale).update(&key.key).update(value);
        }
        hasher.finish()
    }
}
