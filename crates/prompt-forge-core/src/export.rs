//! Flattening categorized results back into the library's shape.

use indexmap::IndexMap;

use crate::analysis::CategorizationResult;

/// Category name to ordered phrase texts, ready to merge into a [`Library`].
///
/// [`Library`]: crate::library::Library
pub type PromptData = IndexMap<String, Vec<String>>;

/// Project each surviving bucket to its phrase texts, preserving order.
pub fn export_to_prompt_data(result: &CategorizationResult) -> PromptData {
    result
        .categories
        .iter()
        .map(|(category, entries)| {
            let phrases = entries.iter().map(|e| e.phrase.clone()).collect();
            (category.clone(), phrases)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::categorize_prompt;
    use crate::category::CategoryRegistry;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_export_round_trip() {
        let registry = CategoryRegistry::builtin().unwrap();
        let result = categorize_prompt(
            "neon lighting, spinning fire poi, dark shadow, quiet afternoon",
            &registry,
        );
        let exported = export_to_prompt_data(&result);

        let expected: PromptData = [
            (
                "Action & Movement".to_string(),
                vec!["spinning fire poi".to_string()],
            ),
            (
                "Lighting".to_string(),
                vec!["neon lighting".to_string(), "dark shadow".to_string()],
            ),
            ("Other".to_string(), vec!["quiet afternoon".to_string()]),
        ]
        .into_iter()
        .collect();
        assert_eq!(exported, expected);
        assert_eq!(
            exported.keys().collect::<Vec<_>>(),
            result.categories.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_export_reflects_edits() {
        let registry = CategoryRegistry::builtin().unwrap();
        let mut result = categorize_prompt("neon lighting, dark shadow", &registry);
        result.edit_phrase("Lighting", 1, "deep shadow").unwrap();
        result.remove_phrase("Lighting", 0).unwrap();

        let exported = export_to_prompt_data(&result);
        assert_eq!(exported["Lighting"], vec!["deep shadow".to_string()]);
    }

    #[test]
    fn test_export_empty() {
        assert!(export_to_prompt_data(&CategorizationResult::default()).is_empty());
    }
}
