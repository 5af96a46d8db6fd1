pub mod analysis;
pub mod builder;
pub mod category;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod library;

pub use analysis::{categorize_prompt, CategorizationResult, PhraseEntry};
pub use builder::PromptBuilder;
pub use config::Config;
pub use error::{PromptForgeError, Result};
pub use export::{export_to_prompt_data, PromptData};
pub use extract::extract_phrases;
pub use library::{Library, MergeReport};

// Category system
pub use category::{
    categorize_phrase, CategoriesConfig, CategorizedPhrase, CategoryClassifier,
    CategoryConfigEntry, CategoryDef, CategoryRegistry, CompiledCategory, BUILTIN_CATEGORIES,
    OTHER_CATEGORY,
};
