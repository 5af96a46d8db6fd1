//! Category Classifier
//!
//! フレーズをCategoryRegistryの定義に基づいてスコアリングし、分類する。
//!
//! 分類は4段階に分かれており、それぞれ単独でテストできる：
//! score-all → pick-best（同点は先勝ち）→ 閾値判定 → `Other`への置き換え

use serde::{Deserialize, Serialize};

use crate::analysis::{self, CategorizationResult};
use crate::error::Result;

use super::builtin::OTHER_CATEGORY;
use super::store::{CategoryRegistry, CompiledCategory};

/// キーワード一致1件あたりの点数
pub const KEYWORD_POINTS: f64 = 2.0;

/// パターン一致1件あたりの点数
pub const PATTERN_POINTS: f64 = 3.0;

/// これ未満のスコアは`Other`に分類される
pub const CONFIDENCE_FLOOR: f64 = 5.0;

/// 1カテゴリに対するスコア
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScore<'a> {
    pub category: &'a str,
    pub score: f64,
}

/// フレーズの分類結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedPhrase {
    pub phrase: String,
    /// カテゴリ名または`Other`
    pub category: String,
    /// 重み付きスコア（確率ではない）
    pub confidence: f64,
}

/// フレーズを1カテゴリに対してスコアリング
pub fn score_phrase(phrase: &str, category: &CompiledCategory) -> f64 {
    let lower = phrase.to_lowercase();

    let keyword_hits = category
        .keywords()
        .iter()
        .filter(|k| lower.contains(k.as_str()))
        .count();
    let pattern_hits = category
        .patterns()
        .iter()
        .filter(|p| p.is_match(&lower))
        .count();

    let points = keyword_hits as f64 * KEYWORD_POINTS + pattern_hits as f64 * PATTERN_POINTS;
    points * category.weight()
}

/// 全カテゴリのスコアを定義順に計算
pub fn score_all<'a>(phrase: &str, registry: &'a CategoryRegistry) -> Vec<CategoryScore<'a>> {
    registry
        .iter()
        .map(|(name, category)| CategoryScore {
            category: name,
            score: score_phrase(phrase, category),
        })
        .collect()
}

/// 最高スコアを選択
///
/// 厳密に大きいスコアのみが先頭を置き換える。同点なら先に現れたカテゴリが勝つ。
pub fn pick_best<'a>(scores: &[CategoryScore<'a>]) -> Option<CategoryScore<'a>> {
    let mut best: Option<CategoryScore<'a>> = None;
    for candidate in scores {
        match best {
            Some(current) if candidate.score <= current.score => {}
            _ => best = Some(*candidate),
        }
    }
    best
}

/// 閾値判定
///
/// 閾値未満（またはカテゴリなし）なら`Other`。スコアはそのまま保持する。
pub fn apply_confidence_floor(best: Option<CategoryScore<'_>>) -> (String, f64) {
    match best {
        Some(best) if best.score >= CONFIDENCE_FLOOR => (best.category.to_string(), best.score),
        Some(best) => (OTHER_CATEGORY.to_string(), best.score),
        None => (OTHER_CATEGORY.to_string(), 0.0),
    }
}

/// フレーズを分類
pub fn categorize_phrase(phrase: &str, registry: &CategoryRegistry) -> CategorizedPhrase {
    let scores = score_all(phrase, registry);
    let (category, confidence) = apply_confidence_floor(pick_best(&scores));

    tracing::debug!(phrase, category = %category, confidence, "phrase categorized");

    CategorizedPhrase {
        phrase: phrase.to_string(),
        category,
        confidence,
    }
}

/// カテゴリ分類器
///
/// レジストリを所有する。`Send + Sync`なので`Arc`で共有できる。
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    registry: CategoryRegistry,
}

impl CategoryClassifier {
    /// 新規分類器を作成
    pub fn new(registry: CategoryRegistry) -> Self {
        Self { registry }
    }

    /// ビルトインカテゴリのみで分類器を構築
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(CategoryRegistry::builtin()?))
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// 利用可能なカテゴリ名を取得
    pub fn category_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// フレーズを分類
    pub fn categorize_phrase(&self, phrase: &str) -> CategorizedPhrase {
        categorize_phrase(phrase, &self.registry)
    }

    /// プロンプト全体を分類
    pub fn categorize_prompt(&self, text: &str) -> CategorizationResult {
        analysis::categorize_prompt(text, &self.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryDef;

    fn def(name: &str, keywords: &[&str], patterns: &[&str], weight: f64) -> CategoryDef {
        CategoryDef {
            name: name.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            weight,
        }
    }

    fn builtin() -> CategoryRegistry {
        CategoryRegistry::builtin().unwrap()
    }

    #[test]
    fn test_score_keyword_only() {
        let registry = builtin();
        let action = registry.get("Action & Movement").unwrap();
        // "twirling" keyword only; no pattern matches
        assert_eq!(score_phrase("twirling ribbons", action), 2.0 * 9.0);
    }

    #[test]
    fn test_score_keyword_and_pattern() {
        let registry = builtin();
        let action = registry.get("Action & Movement").unwrap();
        // "spinning" keyword + `\w+ing\s+(fire|poi|flames)`
        assert_eq!(score_phrase("spinning fire poi", action), (2.0 + 3.0) * 9.0);
    }

    #[test]
    fn test_score_is_case_insensitive() {
        let registry = builtin();
        let style = registry.get("Style & Artistic References").unwrap();
        // keyword "salvador dali" + pattern "Salvador Dali"
        assert_eq!(score_phrase("SALVADOR DALI clocks", style), (2.0 + 3.0) * 6.0);
    }

    #[test]
    fn test_word_classes_are_unicode() {
        let registry = builtin();
        let subject = registry.get("Subject & Main Focus").unwrap();
        // `\w+\s+in\s+` matches "café in "
        assert_eq!(score_phrase("café in paris", subject), 3.0 * 10.0);

        // full-width digit satisfies `\d+k.*lighting`
        let result = categorize_phrase("２k lighting", &registry);
        assert_eq!(result.category, "Lighting");
        assert_eq!(result.confidence, (2.0 * 2.0 + 2.0 * 3.0) * 7.0);
    }

    #[test]
    fn test_score_no_match_is_zero() {
        let registry = builtin();
        for (_, category) in registry.iter() {
            assert_eq!(score_phrase("zzz qqq", category), 0.0);
        }
    }

    #[test]
    fn test_weight_is_flat_multiplier() {
        let registry =
            CategoryRegistry::from_defs(vec![def("half", &["mist"], &["mist\\b"], 0.5)]).unwrap();
        let (_, half) = registry.iter().next().unwrap();
        assert_eq!(score_phrase("morning mist", half), 2.5);
    }

    #[test]
    fn test_pick_best_first_wins_tie() {
        let scores = [
            CategoryScore {
                category: "a",
                score: 10.0,
            },
            CategoryScore {
                category: "b",
                score: 10.0,
            },
            CategoryScore {
                category: "c",
                score: 4.0,
            },
        ];
        assert_eq!(pick_best(&scores).unwrap().category, "a");
    }

    #[test]
    fn test_pick_best_strictly_greater_replaces() {
        let scores = [
            CategoryScore {
                category: "a",
                score: 6.0,
            },
            CategoryScore {
                category: "b",
                score: 6.5,
            },
        ];
        assert_eq!(pick_best(&scores).unwrap().category, "b");
        assert!(pick_best(&[]).is_none());
    }

    #[test]
    fn test_floor_overrides_to_other_keeping_score() {
        let best = Some(CategoryScore {
            category: "Colors",
            score: 4.0,
        });
        assert_eq!(
            apply_confidence_floor(best),
            (OTHER_CATEGORY.to_string(), 4.0)
        );

        let at_floor = Some(CategoryScore {
            category: "Colors",
            score: CONFIDENCE_FLOOR,
        });
        assert_eq!(apply_confidence_floor(at_floor).0, "Colors");
        assert_eq!(
            apply_confidence_floor(None),
            (OTHER_CATEGORY.to_string(), 0.0)
        );
    }

    #[test]
    fn test_categorize_spinning_fire_poi() {
        let result = categorize_phrase("spinning fire poi", &builtin());
        assert_eq!(result.phrase, "spinning fire poi");
        assert_eq!(result.category, "Action & Movement");
        assert_eq!(result.confidence, 45.0);
    }

    #[test]
    fn test_categorize_unmatched_is_other() {
        let result = categorize_phrase("a quiet afternoon", &builtin());
        assert_eq!(result.category, OTHER_CATEGORY);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_categorize_sub_floor_is_other() {
        let registry = CategoryRegistry::from_defs(vec![def("tiny", &["fog"], &[], 2.0)]).unwrap();
        let result = categorize_phrase("fog bank", &registry);
        assert_eq!(result.category, OTHER_CATEGORY);
        assert_eq!(result.confidence, 4.0);
    }

    #[test]
    fn test_categorize_tie_goes_to_earlier_category() {
        let registry = CategoryRegistry::from_defs(vec![
            def("first", &["ember"], &[], 5.0),
            def("second", &["ember"], &[], 5.0),
        ])
        .unwrap();
        let result = categorize_phrase("ember glow", &registry);
        assert_eq!(result.category, "first");
        assert_eq!(result.confidence, 10.0);

        let reversed = CategoryRegistry::from_defs(vec![
            def("second", &["ember"], &[], 5.0),
            def("first", &["ember"], &[], 5.0),
        ])
        .unwrap();
        assert_eq!(categorize_phrase("ember glow", &reversed).category, "second");
    }

    #[test]
    fn test_categorize_is_deterministic() {
        let registry = builtin();
        let a = categorize_phrase("8k cinematic neon lighting", &registry);
        let b = categorize_phrase("8k cinematic neon lighting", &registry);
        assert_eq!(a, b);
        assert_eq!(a.category, "Lighting");
    }

    #[test]
    fn test_classifier_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CategoryClassifier>();

        let classifier = CategoryClassifier::builtin().unwrap();
        assert_eq!(classifier.category_names().len(), 9);
        assert_eq!(
            classifier.categorize_phrase("prismatic refraction").category,
            "Visual Effects & Modifications"
        );
    }
}
