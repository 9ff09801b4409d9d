// Match scoring
//
// *Le Score* (The Score) - Fraction-of-filters match computation

use crate::selection::Selection;
use lecatalogue::Method;
use serde::Serialize;

/// Match outcome for one (method, selection) pair, prior to tiering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Category ids where method and selection overlap, restricted to
    /// categories the user filtered on. Sorted for stable output.
    pub matched_categories: Vec<String>,

    /// Number of categories the user filtered on.
    pub total_filtered: usize,

    /// `matched / filtered`, or 1.0 when nothing was filtered: with no
    /// filters applied there is nothing to mismatch.
    pub match_percentage: f32,
}

impl MatchResult {
    /// Whether the method satisfied every filtered category.
    pub fn is_full_match(&self) -> bool {
        self.matched_categories.len() == self.total_filtered
    }

    /// Whether the method satisfied none of the filtered categories.
    pub fn is_zero_match(&self) -> bool {
        self.total_filtered > 0 && self.matched_categories.is_empty()
    }
}

/// Score a method against a selection.
///
/// A filtered category counts as matched when the method declares no values
/// for it (no declared constraint reads as universally compatible) or when
/// the declared and chosen value sets intersect. Scoring never fails:
/// missing or empty attribute data always degrades to "no constraint"
/// rather than disqualifying the method.
pub fn score_method(method: &Method, selection: &Selection) -> MatchResult {
    let mut matched_categories = Vec::new();
    let mut total_filtered = 0;

    for (category_id, chosen) in selection.filtered() {
        total_filtered += 1;

        let matches = match method.values_for(category_id) {
            None => true,
            Some(declared) if declared.is_empty() => true,
            Some(declared) => declared.intersection(chosen).next().is_some(),
        };

        if matches {
            matched_categories.push(category_id.to_string());
        }
    }

    let match_percentage = if total_filtered == 0 {
        1.0
    } else {
        matched_categories.len() as f32 / total_filtered as f32
    };

    MatchResult {
        matched_categories,
        total_filtered,
        match_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surveys() -> Method {
        Method::new("Surveys")
            .with_attribute("sem_level", ["Individual", "Community"])
            .with_attribute("technology_access", ["Medium", "High"])
    }

    #[test]
    fn test_no_filters_scores_full() {
        let result = score_method(&surveys(), &Selection::new());
        assert_eq!(result.total_filtered, 0);
        assert_eq!(result.match_percentage, 1.0);
        assert!(result.is_full_match());
        assert!(!result.is_zero_match());
    }

    #[test]
    fn test_full_match() {
        let selection = Selection::new()
            .with("sem_level", ["Individual"])
            .with("technology_access", ["High"]);

        let result = score_method(&surveys(), &selection);
        assert_eq!(result.total_filtered, 2);
        assert_eq!(result.matched_categories, vec!["sem_level", "technology_access"]);
        assert_eq!(result.match_percentage, 1.0);
    }

    #[test]
    fn test_partial_match() {
        let selection = Selection::new()
            .with("sem_level", ["Individual"])
            .with("technology_access", ["Low"]);

        let result = score_method(&surveys(), &selection);
        assert_eq!(result.matched_categories, vec!["sem_level"]);
        assert_eq!(result.match_percentage, 0.5);
    }

    #[test]
    fn test_undeclared_category_counts_as_match() {
        // Surveys declares nothing for resources; the permissive default
        // must not disqualify it.
        let selection = Selection::new().with("resources", ["Low"]);

        let result = score_method(&surveys(), &selection);
        assert_eq!(result.matched_categories, vec!["resources"]);
        assert_eq!(result.match_percentage, 1.0);
    }

    #[test]
    fn test_zero_match() {
        let selection = Selection::new()
            .with("sem_level", ["Institutional"])
            .with("technology_access", ["Low"]);

        let result = score_method(&surveys(), &selection);
        assert!(result.matched_categories.is_empty());
        assert_eq!(result.match_percentage, 0.0);
        assert!(result.is_zero_match());
    }

    #[test]
    fn test_unknown_selection_category_still_counts_as_filtered() {
        // Stale ids from a UI must not break scoring; the method has no
        // constraint there, so it matches.
        let selection = Selection::new().with("retired_category", ["Anything"]);

        let result = score_method(&surveys(), &selection);
        assert_eq!(result.total_filtered, 1);
        assert_eq!(result.match_percentage, 1.0);
    }

    #[test]
    fn test_matched_categories_are_sorted() {
        let selection = Selection::new()
            .with("technology_access", ["High"])
            .with("sem_level", ["Individual"]);

        let result = score_method(&surveys(), &selection);
        assert_eq!(result.matched_categories, vec!["sem_level", "technology_access"]);
    }
}
