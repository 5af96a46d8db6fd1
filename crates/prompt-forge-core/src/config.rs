use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::builder::DEFAULT_SEPARATOR;
use crate::category::{CategoriesConfig, CategoryRegistry};
use crate::error::{PromptForgeError, Result};

const CONFIG_FILE: &str = "config.toml";

const DEFAULT_LIBRARY_FILE: &str = "library.json";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# prompt-forge configuration file
# Location: ~/.prompt-forge/config.toml

[library]
# Phrase library file (relative paths resolve against this directory)
# Default: "library.json"
file = "library.json"

[prompt]
# Text placed between selected phrases when building a prompt
# Default: ", "
separator = ", "

# Custom categories for prompt analysis.
# A built-in name replaces that category in place; new names are appended.
# Patterns are regular expressions matched case-insensitively.
#
# [categories."Camera"]
# keywords = ["dolly", "close-up", "drone"]
# patterns = ['\w+ shot']
# weight = 6
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,

    #[serde(default)]
    pub prompt: PromptConfig,

    #[serde(default, skip_serializing_if = "is_empty_categories")]
    pub categories: CategoriesConfig,
}

/// Library-related configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryConfig {
    /// Library file path
    #[serde(default = "default_library_file")]
    pub file: String,
}

/// Prompt building configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptConfig {
    /// Joiner between selected phrases
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_library_file() -> String {
    DEFAULT_LIBRARY_FILE.to_string()
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn is_empty_categories(categories: &CategoriesConfig) -> bool {
    categories.categories.is_empty()
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            file: default_library_file(),
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
        }
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| PromptForgeError::ConfigParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Resolve the library file against the base directory
    pub fn library_path(&self, base_dir: &Path) -> PathBuf {
        let file = Path::new(&self.library.file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            base_dir.join(file)
        }
    }

    /// Build the category registry: builtins plus configured categories
    pub fn registry(&self) -> Result<CategoryRegistry> {
        CategoryRegistry::builtin()?.with_config(&self.categories)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "library.file" => Some(self.library.file.clone()),
            "prompt.separator" => Some(format!("{:?}", self.prompt.separator)),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "library.file" => {
                self.library.file = value.trim().to_string();
                Ok(())
            }
            "prompt.separator" => {
                self.prompt.separator = unquote(value).to_string();
                Ok(())
            }
            _ => Err(PromptForgeError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        ["library.file", "prompt.separator"]
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }
}

/// Strip one pair of matching quotes, keeping inner whitespace
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
