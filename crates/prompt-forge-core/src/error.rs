use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptForgeError {
    #[error("Invalid pattern in category '{category}': {pattern} ({source})")]
    InvalidPattern {
        category: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid weight for category '{category}': {weight} - must be greater than zero")]
    InvalidWeight { category: String, weight: f64 },

    #[error("Duplicate category definition: {name}")]
    DuplicateCategory { name: String },

    #[error("Reserved category name: '{name}' - used for unmatched phrases")]
    ReservedCategory { name: String },

    #[error("Category not found: {name}")]
    CategoryNotFound { name: String },

    #[error("Phrase index {index} out of range for category '{category}' ({len} phrases)")]
    PhraseIndexOutOfRange {
        category: String,
        index: usize,
        len: usize,
    },

    #[error("Prompt type not found in library: {name}")]
    PromptTypeNotFound { name: String },

    #[error("Phrase is not available in the selected prompt types: {phrase}")]
    PhraseNotInLibrary { phrase: String },

    #[error("Prompt text is empty")]
    EmptyPrompt,

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Config key not found: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Failed to parse library {path}: {message}")]
    LibraryParse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, PromptForgeError>;

impl PromptForgeError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyPrompt => 2,
            Self::CategoryNotFound { .. } | Self::PromptTypeNotFound { .. } => 3,
            Self::PhraseIndexOutOfRange { .. } | Self::PhraseNotInLibrary { .. } => 4,
            Self::InvalidPattern { .. }
            | Self::InvalidWeight { .. }
            | Self::DuplicateCategory { .. }
            | Self::ReservedCategory { .. } => 5,
            Self::ConfigParse { .. } | Self::LibraryParse { .. } => 6,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(PromptForgeError::EmptyPrompt.exit_code(), 2);
        assert_eq!(
            PromptForgeError::CategoryNotFound {
                name: "Colors".to_string()
            }
            .exit_code(),
            3
        );
        assert_eq!(
            PromptForgeError::ConfigKeyNotFound {
                key: "x".to_string()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_index_error_message() {
        let err = PromptForgeError::PhraseIndexOutOfRange {
            category: "Lighting".to_string(),
            index: 4,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "Phrase index 4 out of range for category 'Lighting' (2 phrases)"
        );
    }
}
