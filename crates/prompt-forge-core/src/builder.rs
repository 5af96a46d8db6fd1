//! Prompt composition from library selections.

use indexmap::IndexSet;

use crate::error::{PromptForgeError, Result};
use crate::library::Library;

pub const DEFAULT_SEPARATOR: &str = ", ";

/// Tracks selected prompt types and phrases, both in selection order.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    separator: String,
    types: IndexSet<String>,
    phrases: IndexSet<String>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    pub fn with_separator(separator: &str) -> Self {
        Self {
            separator: separator.to_string(),
            types: IndexSet::new(),
            phrases: IndexSet::new(),
        }
    }

    pub fn select_type(&mut self, library: &Library, prompt_type: &str) -> Result<()> {
        if library.phrases(prompt_type).is_none() {
            return Err(PromptForgeError::PromptTypeNotFound {
                name: prompt_type.to_string(),
            });
        }
        self.types.insert(prompt_type.to_string());
        Ok(())
    }

    /// Deselect a type together with every phrase it contains
    pub fn deselect_type(&mut self, library: &Library, prompt_type: &str) {
        if !self.types.shift_remove(prompt_type) {
            return;
        }
        for phrase in library.phrases(prompt_type).unwrap_or_default() {
            self.phrases.shift_remove(phrase);
        }
    }

    /// Select a phrase offered by one of the selected types
    pub fn select_phrase(&mut self, library: &Library, phrase: &str) -> Result<()> {
        let offered = self
            .types
            .iter()
            .any(|prompt_type| library.contains(prompt_type, phrase));
        if !offered {
            return Err(PromptForgeError::PhraseNotInLibrary {
                phrase: phrase.to_string(),
            });
        }
        self.phrases.insert(phrase.to_string());
        Ok(())
    }

    /// Select every phrase of a type, selecting the type first
    pub fn select_all(&mut self, library: &Library, prompt_type: &str) -> Result<()> {
        self.select_type(library, prompt_type)?;
        for phrase in library.phrases(prompt_type).unwrap_or_default() {
            self.phrases.insert(phrase.clone());
        }
        Ok(())
    }

    pub fn deselect_phrase(&mut self, phrase: &str) -> bool {
        self.phrases.shift_remove(phrase)
    }

    /// Phrases available for selection, grouped by selected type in selection order
    pub fn visible_phrases<'a>(&'a self, library: &'a Library) -> Vec<(&'a str, &'a [String])> {
        self.types
            .iter()
            .filter_map(|t| library.phrases(t).map(|phrases| (t.as_str(), phrases)))
            .collect()
    }

    pub fn selected_types(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(String::as_str)
    }

    pub fn selected_phrases(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// Join the selected phrases; empty when nothing is selected
    pub fn build(&self) -> String {
        self.phrases
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_joins_in_selection_order() {
        let library = Library::seed();
        let mut builder = PromptBuilder::new();
        builder.select_type(&library, "Fire Poi").unwrap();
        builder.select_type(&library, "Trippy Visuals").unwrap();
        builder.select_phrase(&library, "surreal dreamscape").unwrap();
        builder.select_phrase(&library, "spinning fire poi").unwrap();
        builder.select_phrase(&library, "surreal dreamscape").unwrap();

        assert_eq!(builder.phrase_count(), 2);
        assert_eq!(builder.build(), "surreal dreamscape, spinning fire poi");
    }

    #[test]
    fn test_empty_builder() {
        assert_eq!(PromptBuilder::new().build(), "");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let library = Library::seed();
        let mut builder = PromptBuilder::new();
        assert!(matches!(
            builder.select_type(&library, "Underwater"),
            Err(PromptForgeError::PromptTypeNotFound { .. })
        ));
    }

    #[test]
    fn test_phrase_requires_selected_type() {
        let library = Library::seed();
        let mut builder = PromptBuilder::new();
        builder.select_type(&library, "Bigfoot").unwrap();
        assert!(matches!(
            builder.select_phrase(&library, "spinning fire poi"),
            Err(PromptForgeError::PhraseNotInLibrary { .. })
        ));
    }

    #[test]
    fn test_deselect_type_drops_its_phrases() {
        let library = Library::seed();
        let mut builder = PromptBuilder::new();
        builder.select_type(&library, "Fire Poi").unwrap();
        builder.select_type(&library, "Bigfoot").unwrap();
        builder.select_phrase(&library, "spinning fire poi").unwrap();
        builder.select_phrase(&library, "bigfoot howling").unwrap();

        builder.deselect_type(&library, "Fire Poi");
        assert_eq!(builder.build(), "bigfoot howling");
        assert_eq!(builder.selected_types().collect::<Vec<_>>(), vec!["Bigfoot"]);
    }

    #[test]
    fn test_select_all_and_custom_separator() {
        let mut library = Library::new();
        library.add_phrase("Fog", "low fog");
        library.add_phrase("Fog", "fog bank");

        let mut builder = PromptBuilder::with_separator(" | ");
        builder.select_all(&library, "Fog").unwrap();
        assert_eq!(builder.build(), "low fog | fog bank");
        assert!(builder.deselect_phrase("low fog"));
        assert!(!builder.deselect_phrase("low fog"));
        assert_eq!(builder.build(), "fog bank");
    }

    #[test]
    fn test_visible_phrases_follow_selection_order() {
        let library = Library::seed();
        let mut builder = PromptBuilder::new();
        builder.select_type(&library, "Trippy Visuals").unwrap();
        builder.select_type(&library, "Fire Poi").unwrap();

        let visible = builder.visible_phrases(&library);
        let names: Vec<_> = visible.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["Trippy Visuals", "Fire Poi"]);
        assert_eq!(visible[0].1.len(), 14);
        assert_eq!(visible[1].1.len(), 10);

        builder.deselect_type(&library, "Trippy Visuals");
        builder.select_type(&library, "Trippy Visuals").unwrap();
        let names: Vec<_> = builder
            .visible_phrases(&library)
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(names, vec!["Fire Poi", "Trippy Visuals"]);
    }
}
