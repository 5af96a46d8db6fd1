//! Whole-prompt categorization and the editable result it produces.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::category::{categorize_phrase, CategorizedPhrase, CategoryRegistry, OTHER_CATEGORY};
use crate::error::{PromptForgeError, Result};
use crate::extract::extract_phrases;

/// One phrase inside a category bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseEntry {
    pub phrase: String,
    pub confidence: f64,
}

/// Result of categorizing a whole prompt
///
/// `total_phrases` counts extracted phrases. After [`remove_phrase`] it is
/// decremented, so it need not match the sum of the buckets.
///
/// [`remove_phrase`]: CategorizationResult::remove_phrase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizationResult {
    /// Non-empty buckets, in registry order followed by `Other`
    pub categories: IndexMap<String, Vec<PhraseEntry>>,
    pub total_phrases: usize,
    /// Per-phrase records in extraction order
    pub all_results: Vec<CategorizedPhrase>,
}

/// Categorize every phrase of `text` and group them by category.
pub fn categorize_prompt(text: &str, registry: &CategoryRegistry) -> CategorizationResult {
    let phrases = extract_phrases(text);

    let mut categories: IndexMap<String, Vec<PhraseEntry>> = registry
        .names()
        .into_iter()
        .chain(std::iter::once(OTHER_CATEGORY))
        .map(|name| (name.to_string(), Vec::new()))
        .collect();

    let mut all_results = Vec::with_capacity(phrases.len());
    for phrase in &phrases {
        let result = categorize_phrase(phrase, registry);
        if let Some(bucket) = categories.get_mut(&result.category) {
            bucket.push(PhraseEntry {
                phrase: result.phrase.clone(),
                confidence: result.confidence,
            });
        }
        all_results.push(result);
    }

    categories.retain(|_, bucket| !bucket.is_empty());

    tracing::debug!(
        phrases = phrases.len(),
        categories = categories.len(),
        "prompt categorized"
    );

    CategorizationResult {
        categories,
        total_phrases: phrases.len(),
        all_results,
    }
}

impl CategorizationResult {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Phrases of one category, if present
    pub fn phrases_in(&self, category: &str) -> Option<&[PhraseEntry]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Replace the text of one entry
    pub fn edit_phrase(&mut self, category: &str, index: usize, text: &str) -> Result<()> {
        let entry = self.entry_mut(category, index)?;
        entry.phrase = text.to_string();
        Ok(())
    }

    /// Remove one entry, dropping the category when it becomes empty
    pub fn remove_phrase(&mut self, category: &str, index: usize) -> Result<PhraseEntry> {
        let bucket = self.bucket_mut(category)?;
        if index >= bucket.len() {
            return Err(PromptForgeError::PhraseIndexOutOfRange {
                category: category.to_string(),
                index,
                len: bucket.len(),
            });
        }

        let removed = bucket.remove(index);
        if bucket.is_empty() {
            self.categories.shift_remove(category);
        }
        self.total_phrases = self.total_phrases.saturating_sub(1);

        Ok(removed)
    }

    fn bucket_mut(&mut self, category: &str) -> Result<&mut Vec<PhraseEntry>> {
        self.categories
            .get_mut(category)
            .ok_or_else(|| PromptForgeError::CategoryNotFound {
                name: category.to_string(),
            })
    }

    fn entry_mut(&mut self, category: &str, index: usize) -> Result<&mut PhraseEntry> {
        let bucket = self.bucket_mut(category)?;
        let len = bucket.len();
        bucket
            .get_mut(index)
            .ok_or_else(|| PromptForgeError::PhraseIndexOutOfRange {
                category: category.to_string(),
                index,
                len,
            })
    }
}
