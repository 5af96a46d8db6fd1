//! Phrase library: prompt types and their curated phrases.
//!
//! The library is persisted as pretty-printed JSON, keeping both prompt type
//! order and phrase order. Phrases are unique within a prompt type.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{PromptForgeError, Result};
use crate::export::PromptData;

/// Seed library used when no library file exists yet
const SEED_LIBRARY: &[(&str, &[&str])] = &[
    (
        "Fire Poi",
        &[
            "spinning fire poi",
            "flowing fire trails",
            "circular fire patterns",
            "poi dancer silhouette",
            "ember sparks flying",
            "fire poi choreography",
            "double poi spinning",
            "fire circle motion",
            "glowing fire arcs",
            "night fire performance",
        ],
    ),
    (
        "Bigfoot",
        &[
            "bigfoot in misty forest",
            "sasquatch footprints",
            "cryptid in shadows",
            "tall hairy creature",
            "bigfoot walking away",
            "mysterious forest encounter",
            "blurry bigfoot footage",
            "sasquatch among trees",
            "cryptozoology documentary style",
            "bigfoot howling",
        ],
    ),
    (
        "Trippy Visuals",
        &[
            "kaleidoscope patterns",
            "psychedelic colors",
            "fractal geometry",
            "morphing shapes",
            "rainbow color trails",
            "liquid light effects",
            "geometric mandala",
            "swirling vortex",
            "neon glow effects",
            "surreal dreamscape",
            "color bleeding",
            "prismatic refraction",
            "infinite tunnel",
            "warping reality",
        ],
    ),
];

/// Summary of a merge into the library
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    /// Phrases newly added
    pub added: usize,
    /// Phrases already present in their prompt type
    pub skipped: usize,
    /// Prompt types created by the merge, in creation order
    pub new_categories: Vec<String>,
}

/// Prompt type name to unique phrases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    types: IndexMap<String, Vec<String>>,
}

impl Library {
    /// Empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Library pre-populated with the bundled prompt types
    pub fn seed() -> Self {
        let types = SEED_LIBRARY
            .iter()
            .map(|(name, phrases)| {
                (
                    name.to_string(),
                    phrases.iter().map(|p| p.to_string()).collect(),
                )
            })
            .collect();
        Self { types }
    }

    /// Load from a JSON file, or the seed library when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "library file missing, using seed library");
            return Ok(Self::seed());
        }

        let content = fs::read_to_string(path)?;
        let raw: IndexMap<String, Vec<String>> =
            serde_json::from_str(&content).map_err(|e| PromptForgeError::LibraryParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        // Normalise files edited by hand so the uniqueness invariant holds
        let mut library = Self::new();
        for (name, phrases) in raw {
            library.types.entry(name.clone()).or_default();
            for phrase in phrases {
                library.add_phrase(&name, &phrase);
            }
        }

        tracing::info!(path = %path.display(), types = library.types.len(), "library loaded");
        Ok(library)
    }

    /// Save as pretty JSON, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        tracing::info!(path = %path.display(), "library saved");
        Ok(())
    }

    /// Prompt type names in library order
    pub fn prompt_types(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    pub fn phrases(&self, prompt_type: &str) -> Option<&[String]> {
        self.types.get(prompt_type).map(Vec::as_slice)
    }

    pub fn phrase_count(&self, prompt_type: &str) -> usize {
        self.types.get(prompt_type).map_or(0, Vec::len)
    }

    pub fn contains(&self, prompt_type: &str, phrase: &str) -> bool {
        self.types
            .get(prompt_type)
            .is_some_and(|phrases| phrases.iter().any(|p| p == phrase))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Add a phrase, creating the prompt type if needed.
    ///
    /// Returns `false` when the phrase was already present.
    pub fn add_phrase(&mut self, prompt_type: &str, phrase: &str) -> bool {
        let phrases = self.types.entry(prompt_type.to_string()).or_default();
        if phrases.iter().any(|p| p == phrase) {
            return false;
        }
        phrases.push(phrase.to_string());
        true
    }

    /// Union exported phrases into the library, per category.
    pub fn merge(&mut self, data: &PromptData) -> MergeReport {
        let mut report = MergeReport::default();

        for (category, phrases) in data {
            if !self.types.contains_key(category) {
                self.types.insert(category.clone(), Vec::new());
                report.new_categories.push(category.clone());
            }
            for phrase in phrases {
                if self.add_phrase(category, phrase) {
                    report.added += 1;
                } else {
                    report.skipped += 1;
                }
            }
        }

        tracing::debug!(
            added = report.added,
            skipped = report.skipped,
            new_categories = report.new_categories.len(),
            "library merged"
        );
        report
    }
}
