//! Builtin Category Definitions
//!
//! コード内で定義されるビルトインカテゴリ。
//! 定義順はタイブレーク順でもある。

use serde::{Deserialize, Serialize};

/// どのカテゴリも閾値に届かなかったフレーズの分類先
pub const OTHER_CATEGORY: &str = "Other";

/// ビルトインカテゴリ定義
pub const BUILTIN_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        name: "Subject & Main Focus",
        keywords: &[
            "dancer",
            "person",
            "figure",
            "character",
            "creature",
            "subject",
            "portrait",
            "face",
            "body",
            "irises",
            "eyes",
        ],
        patterns: &[r"\w+\s+in\s+", r"captured from", r"\w+\s+performing"],
        weight: 10.0,
    },
    BuiltinCategory {
        name: "Action & Movement",
        keywords: &[
            "spinning", "twirling", "dancing", "moving", "flowing", "running", "jumping",
            "walking", "flying", "swirling", "rotating", "motion",
        ],
        patterns: &[r"\w+ing\s+(fire|poi|flames)", r"-spin", r"mid-\w+"],
        weight: 9.0,
    },
    BuiltinCategory {
        name: "Visual Effects & Modifications",
        keywords: &[
            "blur",
            "glow",
            "melting",
            "dripping",
            "liquid",
            "chrome",
            "metallic",
            "holographic",
            "bioluminescent",
            "refraction",
            "reflection",
            "gloss",
            "streaks",
            "smoke",
            "embers",
        ],
        patterns: &[
            r"motion blur",
            r"\w+ melting",
            r"\w+ dripping",
            r"HUD elements",
        ],
        weight: 8.0,
    },
    BuiltinCategory {
        name: "Patterns & Geometric Elements",
        keywords: &[
            "fractal",
            "fractals",
            "mandala",
            "mandalas",
            "pattern",
            "patterns",
            "geometric",
            "recursive",
            "kaleidoscope",
            "kaleidoscopic",
            "symmetry",
        ],
        patterns: &[r"recursive \w+", r"\w+ patterns?", r"intricate \w+"],
        weight: 8.0,
    },
    BuiltinCategory {
        name: "Colors",
        keywords: &[
            "cyan", "magenta", "yellow", "rainbow", "neon", "color", "red", "blue", "green",
            "purple", "orange", "prismatic",
        ],
        patterns: &[r"\w+-\w+-\w+ color", r"color \w+", r"rainbow \w+"],
        weight: 7.0,
    },
    BuiltinCategory {
        name: "Lighting",
        keywords: &[
            "lighting",
            "glow",
            "glowing",
            "light",
            "luminescent",
            "neon",
            "bright",
            "dark",
            "shadow",
            "illuminated",
            "cinematic lighting",
        ],
        patterns: &[r"\d+k.*lighting", r"cinematic.*lighting", r"\w+ light"],
        weight: 7.0,
    },
    BuiltinCategory {
        name: "Style & Artistic References",
        keywords: &[
            "psychedelic",
            "surreal",
            "dreamscape",
            "Salvador Dali",
            "proportions",
            "warped",
            "acid-trip",
            "hyper-",
            "style",
            "artistic",
        ],
        patterns: &[r"\w+ style", r"Salvador Dali", r"hyper-\w+"],
        weight: 6.0,
    },
    BuiltinCategory {
        name: "Background & Environment",
        keywords: &[
            "background",
            "environment",
            "scene",
            "setting",
            "landscape",
            "backdrop",
            "atmosphere",
            "chaos",
        ],
        patterns: &[r"\w+ background", r"amid the \w+"],
        weight: 5.0,
    },
    BuiltinCategory {
        name: "Quality & Technical Specifications",
        keywords: &[
            "8k",
            "4k",
            "ultra",
            "high",
            "detailed",
            "resolution",
            "cinematic",
            "professional",
            "hd",
            "uhd",
        ],
        patterns: &[r"\d+k", r"ultra-\w+", r"high-\w+"],
        weight: 4.0,
    },
];

/// ビルトインカテゴリの静的定義
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    /// カテゴリ名（一意識別子）
    pub name: &'static str,
    /// 部分一致で判定するキーワード
    pub keywords: &'static [&'static str],
    /// 正規表現パターン（大文字小文字を区別しない）
    pub patterns: &'static [&'static str],
    /// スコア倍率
    pub weight: f64,
}

/// ランタイムカテゴリ定義
///
/// ビルトインまたは`config.toml`から構築される。パターンは未コンパイルの文字列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDef {
    /// カテゴリ名
    pub name: String,
    /// キーワード
    #[serde(default)]
    pub keywords: Vec<String>,
    /// 正規表現パターン
    #[serde(default)]
    pub patterns: Vec<String>,
    /// スコア倍率
    pub weight: f64,
}

impl From<&BuiltinCategory> for CategoryDef {
    fn from(builtin: &BuiltinCategory) -> Self {
        Self {
            name: builtin.name.to_string(),
            keywords: builtin.keywords.iter().map(|s| s.to_string()).collect(),
            patterns: builtin.patterns.iter().map(|s| s.to_string()).collect(),
            weight: builtin.weight,
        }
    }
}
