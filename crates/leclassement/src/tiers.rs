// Tier classification
//
// *Les Paliers* (The Tiers) - Bucketing every catalog method by score and
// semantic validity

use crate::rules::{RuleSet, SemanticValidator};
use crate::score::score_method;
use crate::selection::Selection;
use lecatalogue::{Catalog, Method};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Match percentage at or above which a partial match is still a good
/// alternative rather than a stretch option.
pub const GOOD_ALTERNATIVE_THRESHOLD: f32 = 0.8;

/// Suggestion tier for a classified method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Satisfies every filtered category.
    BestFit,
    /// Satisfies at least 80% of filtered categories.
    GoodAlternative,
    /// Satisfies some, but fewer than 80%, of filtered categories.
    StretchOption,
    /// Vetoed by a semantic rule; never shown as a suggestion.
    Excluded,
}

/// A method together with its match outcome for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct RankedMethod {
    /// The catalog method.
    pub method: Method,

    /// Fraction of filtered categories the method satisfied.
    pub match_percentage: f32,

    /// Filtered category ids the method satisfied, sorted.
    pub matched_categories: Vec<String>,

    /// Why the method was vetoed, in rule order. Empty unless excluded.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclusion_reasons: Vec<String>,
}

/// The partition of a catalog for one selection.
///
/// Every bucket is ordered by descending match percentage with ties in
/// stable catalog order. Only the first three are suggestion tiers:
/// `excluded` holds semantically vetoed methods for diagnostics, and
/// `unlisted` holds methods that matched none of the applied filters. Both
/// are kept so the partition is complete, but must never be rendered as
/// suggestions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Classification {
    /// Methods satisfying every filtered category.
    pub best_fit: Vec<RankedMethod>,

    /// Methods at or above the good-alternative threshold.
    pub good_alternatives: Vec<RankedMethod>,

    /// Methods matching some filters, below the threshold.
    pub stretch_options: Vec<RankedMethod>,

    /// Methods vetoed by semantic rules.
    pub excluded: Vec<RankedMethod>,

    /// Methods matching none of the applied filters.
    pub unlisted: Vec<RankedMethod>,
}

impl Classification {
    /// Entries in one suggestion tier.
    pub fn tier(&self, tier: Tier) -> &[RankedMethod] {
        match tier {
            Tier::BestFit => &self.best_fit,
            Tier::GoodAlternative => &self.good_alternatives,
            Tier::StretchOption => &self.stretch_options,
            Tier::Excluded => &self.excluded,
        }
    }

    /// Total number of classified methods across every bucket.
    ///
    /// Always equals the catalog size: no method is silently dropped.
    pub fn len(&self) -> usize {
        self.best_fit.len()
            + self.good_alternatives.len()
            + self.stretch_options.len()
            + self.excluded.len()
            + self.unlisted.len()
    }

    /// Whether no methods were classified (empty catalog).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The recommendation engine: validates, scores, and tiers every method of
/// a catalog against one selection.
///
/// Holds only its rule configuration, so a single instance may serve any
/// number of concurrent or repeated classifications over a shared read-only
/// catalog.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    validator: SemanticValidator,
}

impl Recommender {
    /// Create a recommender over the given rule configuration.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            validator: SemanticValidator::new(rules),
        }
    }

    /// The active rule configuration.
    pub fn rules(&self) -> &RuleSet {
        self.validator.rules()
    }

    /// Classify every catalog method into tiers for one selection.
    ///
    /// Semantic validation runs first and overrides any score. Non-vetoed
    /// methods bucket by match percentage: a full match is a best fit, at
    /// least 80% a good alternative, anything above zero a stretch option,
    /// and a zero match with filters applied is unlisted. With no filters
    /// applied, every non-vetoed method is a best fit at 100%.
    pub fn classify(&self, catalog: &Catalog, selection: &Selection) -> Classification {
        let mut classification = Classification::default();

        for method in catalog.methods() {
            let verdict = self.validator.validate(method, selection);
            let score = score_method(method, selection);

            let entry = RankedMethod {
                method: method.clone(),
                match_percentage: score.match_percentage,
                matched_categories: score.matched_categories.clone(),
                exclusion_reasons: verdict.reasons().to_vec(),
            };

            if verdict.is_excluded() {
                classification.excluded.push(entry);
            } else if score.is_full_match() {
                classification.best_fit.push(entry);
            } else if score.match_percentage >= GOOD_ALTERNATIVE_THRESHOLD {
                classification.good_alternatives.push(entry);
            } else if score.match_percentage > 0.0 {
                classification.stretch_options.push(entry);
            } else {
                debug!("Unlisted (matched no filters): {}", method.name);
                classification.unlisted.push(entry);
            }
        }

        // Stable sort keeps catalog order within equal percentages. Best
        // fit and unlisted are uniform (1.0 and 0.0) and stay in catalog
        // order as-is.
        for bucket in [
            &mut classification.good_alternatives,
            &mut classification.stretch_options,
            &mut classification.excluded,
        ] {
            bucket.sort_by(|a, b| {
                b.match_percentage
                    .partial_cmp(&a.match_percentage)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lecatalogue::Category;
    use rstest::rstest;

    /// Catalog with five single-value categories and one method declaring
    /// `matched` agreeing values out of five.
    fn boundary_catalog(matched: usize) -> (Catalog, Selection) {
        let categories: Vec<Category> = (0..5).map(|i| Category::new(format!("C{i}"))).collect();

        let mut method = Method::new("Probe");
        let mut selection = Selection::new();
        for i in 0..5 {
            let id = format!("c{i}");
            selection.set(&id, ["Yes"]);
            let value = if i < matched { "Yes" } else { "No" };
            method = method.with_attribute(id, [value]);
        }

        (Catalog::new(categories, vec![method]), selection)
    }

    #[rstest]
    #[case(5, Some(Tier::BestFit))]
    #[case(4, Some(Tier::GoodAlternative))]
    #[case(3, Some(Tier::StretchOption))]
    #[case(1, Some(Tier::StretchOption))]
    #[case(0, None)]
    fn test_tier_boundaries(#[case] matched: usize, #[case] expected: Option<Tier>) {
        let (catalog, selection) = boundary_catalog(matched);
        let classification = Recommender::default().classify(&catalog, &selection);

        match expected {
            Some(tier) => {
                assert_eq!(classification.tier(tier).len(), 1, "expected {tier:?}");
                assert!(classification.unlisted.is_empty());
            }
            None => assert_eq!(classification.unlisted.len(), 1),
        }
        assert_eq!(classification.len(), 1);
    }

    #[test]
    fn test_four_of_five_is_exactly_the_threshold() {
        let (catalog, selection) = boundary_catalog(4);
        let classification = Recommender::default().classify(&catalog, &selection);

        let entry = &classification.good_alternatives[0];
        assert_eq!(entry.match_percentage, GOOD_ALTERNATIVE_THRESHOLD);
        assert_eq!(entry.matched_categories.len(), 4);
    }

    #[test]
    fn test_no_filters_puts_everything_in_best_fit() {
        let catalog = Catalog::new(
            Vec::new(),
            vec![Method::new("A"), Method::new("B"), Method::new("C")],
        );
        let classification = Recommender::default().classify(&catalog, &Selection::new());

        assert_eq!(classification.best_fit.len(), 3);
        assert!(classification
            .best_fit
            .iter()
            .all(|entry| entry.match_percentage == 1.0));
    }

    #[test]
    fn test_buckets_order_by_percentage_then_catalog_order() {
        let categories: Vec<Category> = (0..4).map(|i| Category::new(format!("C{i}"))).collect();
        let mut selection = Selection::new();
        for i in 0..4 {
            selection.set(format!("c{i}"), ["Yes"]);
        }

        // half declares 2/4, quarter-a and quarter-b declare 1/4 each;
        // the two quarter methods tie and must keep catalog order.
        let half = Method::new("Half")
            .with_attribute("c0", ["Yes"])
            .with_attribute("c1", ["Yes"])
            .with_attribute("c2", ["No"])
            .with_attribute("c3", ["No"]);
        let quarter_a = Method::new("Quarter A")
            .with_attribute("c0", ["Yes"])
            .with_attribute("c1", ["No"])
            .with_attribute("c2", ["No"])
            .with_attribute("c3", ["No"]);
        let quarter_b = Method::new("Quarter B")
            .with_attribute("c0", ["Yes"])
            .with_attribute("c1", ["No"])
            .with_attribute("c2", ["No"])
            .with_attribute("c3", ["No"]);

        let catalog = Catalog::new(categories, vec![quarter_a, half, quarter_b]);
        let classification = Recommender::default().classify(&catalog, &selection);

        let names: Vec<&str> = classification
            .stretch_options
            .iter()
            .map(|entry| entry.method.name.as_str())
            .collect();
        assert_eq!(names, vec!["Half", "Quarter A", "Quarter B"]);
    }

    #[test]
    fn test_semantic_veto_overrides_full_match() {
        let catalog = Catalog::new(
            vec![Category::new("Technology Access")],
            vec![Method::new("Participatory Video/Digital Storytelling")
                .with_attribute("technology_access", ["Low", "Medium", "High"])],
        );
        // The method's own attributes claim Low support; the allow-list
        // overrides that claim.
        let selection = Selection::new().with("technology_access", ["Low"]);

        let classification = Recommender::default().classify(&catalog, &selection);
        assert!(classification.best_fit.is_empty());
        assert_eq!(classification.excluded.len(), 1);
        assert_eq!(classification.excluded[0].match_percentage, 1.0);
        assert!(!classification.excluded[0].exclusion_reasons.is_empty());
    }

    #[test]
    fn test_empty_catalog_classifies_to_empty_buckets() {
        let classification =
            Recommender::default().classify(&Catalog::default(), &Selection::new());
        assert!(classification.is_empty());
    }
}
