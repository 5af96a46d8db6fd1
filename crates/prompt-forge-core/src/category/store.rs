//! Category Registry
//!
//! カテゴリ定義のランタイムストア。
//! ビルトインと`config.toml`の定義をマージし、起動時に一度だけ検証・コンパイルする。

use std::collections::HashSet;

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{PromptForgeError, Result};

use super::builtin::{CategoryDef, BUILTIN_CATEGORIES, OTHER_CATEGORY};

/// コンパイル済みカテゴリ定義
#[derive(Debug, Clone)]
pub struct CompiledCategory {
    def: CategoryDef,
    lowered_keywords: Vec<String>,
    patterns: Vec<Regex>,
}

impl CompiledCategory {
    /// 定義を検証してパターンをコンパイル
    pub fn compile(def: CategoryDef) -> Result<Self> {
        if !(def.weight.is_finite() && def.weight > 0.0) {
            return Err(PromptForgeError::InvalidWeight {
                category: def.name.clone(),
                weight: def.weight,
            });
        }

        let patterns = def
            .patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| PromptForgeError::InvalidPattern {
                        category: def.name.clone(),
                        pattern: p.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let lowered_keywords = def.keywords.iter().map(|k| k.to_lowercase()).collect();

        Ok(Self {
            def,
            lowered_keywords,
            patterns,
        })
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn weight(&self) -> f64 {
        self.def.weight
    }

    /// 小文字化済みキーワード
    pub fn keywords(&self) -> &[String] {
        &self.lowered_keywords
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    /// 元の定義
    pub fn def(&self) -> &CategoryDef {
        &self.def
    }
}

/// カテゴリ定義のレジストリ（順序付き、読み取り専用）
///
/// 反復順はレンダリング順であり、同点時のタイブレーク順でもある。
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<CompiledCategory>,
}

impl CategoryRegistry {
    /// ビルトインカテゴリのみで初期化
    pub fn builtin() -> Result<Self> {
        Self::from_defs(BUILTIN_CATEGORIES.iter().map(CategoryDef::from))
    }

    /// 定義列から構築
    ///
    /// 重複名・予約名`Other`・不正な重み・不正なパターンはエラー。
    pub fn from_defs(defs: impl IntoIterator<Item = CategoryDef>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut categories = Vec::new();

        for def in defs {
            if def.name == OTHER_CATEGORY {
                return Err(PromptForgeError::ReservedCategory { name: def.name });
            }
            if !seen.insert(def.name.clone()) {
                return Err(PromptForgeError::DuplicateCategory { name: def.name });
            }
            categories.push(CompiledCategory::compile(def)?);
        }

        tracing::info!(count = categories.len(), "category registry built");
        Ok(Self { categories })
    }

    /// 設定でオーバーライド
    ///
    /// - 同名カテゴリは同じ位置で置き換え
    /// - 新規カテゴリは末尾に追加（設定ファイルの記述順）
    pub fn with_config(self, config: &CategoriesConfig) -> Result<Self> {
        if config.categories.is_empty() {
            return Ok(self);
        }

        let mut defs: Vec<CategoryDef> = self.categories.into_iter().map(|c| c.def).collect();

        for (name, entry) in &config.categories {
            let def = CategoryDef {
                name: name.clone(),
                keywords: entry.keywords.clone(),
                patterns: entry.patterns.clone(),
                weight: entry.weight,
            };
            match defs.iter_mut().find(|d| d.name == *name) {
                Some(existing) => *existing = def,
                None => defs.push(def),
            }
        }

        Self::from_defs(defs)
    }

    /// カテゴリ定義を取得
    pub fn get(&self, name: &str) -> Option<&CompiledCategory> {
        self.categories.iter().find(|c| c.name() == name)
    }

    /// `(name, definition)`を定義順に反復
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CompiledCategory)> {
        self.categories.iter().map(|c| (c.name(), c))
    }

    /// カテゴリ名一覧（定義順）
    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// `config.toml`のcategoriesセクション
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoriesConfig {
    #[serde(flatten)]
    pub categories: IndexMap<String, CategoryConfigEntry>,
}

/// 個別カテゴリの設定エントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfigEntry {
    /// キーワード
    #[serde(default)]
    pub keywords: Vec<String>,
    /// 正規表現パターン
    #[serde(default)]
    pub patterns: Vec<String>,
    /// スコア倍率
    pub weight: f64,
}
