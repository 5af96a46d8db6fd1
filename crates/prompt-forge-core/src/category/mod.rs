//! # Category Module
//!
//! プロンプトのフレーズを意味的なカテゴリに分類する機能を提供する。
//!
//! ## 設計目的
//!
//! 動画生成プロンプトを「Subject」「Lighting」「Colors」などの
//! カテゴリに分解し、フレーズライブラリに取り込めるようにする。
//! 分類はキーワードと正規表現によるルールベースで、確率的な要素はない。
//!
//! - キーワード一致: 2点
//! - パターン一致: 3点
//! - 合計 × カテゴリの重み = スコア
//! - 最高スコアが5未満なら`Other`
//!
//! ## モジュール構成
//!
//! - `builtin`: ビルトインカテゴリ定義
//! - `store`: 検証・コンパイル済みのカテゴリレジストリ
//! - `classifier`: スコアリングと分類
//!
//! ## 使用例
//!
//! ```rust
//! use prompt_forge_core::category::{CategoryClassifier, CategoryRegistry};
//!
//! let registry = CategoryRegistry::builtin().unwrap();
//! assert!(registry.get("Lighting").is_some());
//!
//! let classifier = CategoryClassifier::new(registry);
//! let result = classifier.categorize_phrase("spinning fire poi");
//! assert_eq!(result.category, "Action & Movement");
//! ```

mod builtin;
mod classifier;
mod store;

// Re-exports
pub use builtin::{BuiltinCategory, CategoryDef, BUILTIN_CATEGORIES, OTHER_CATEGORY};
pub use classifier::{
    apply_confidence_floor, categorize_phrase, pick_best, score_all, score_phrase,
    CategorizedPhrase, CategoryClassifier, CategoryScore, CONFIDENCE_FLOOR, KEYWORD_POINTS,
    PATTERN_POINTS,
};
pub use store::{CategoriesConfig, CategoryConfigEntry, CategoryRegistry, CompiledCategory};
