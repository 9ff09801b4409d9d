// Semantic validity rules
//
// *Les Règles* (The Rules) - Categorical vetoes that override percentage
// scoring

use crate::selection::Selection;
use lecatalogue::Method;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Injectable configuration for the semantic-validity rules.
///
/// The two method allow-lists are deliberately configuration rather than
/// catalog attributes: the rules exist to override catalog data that is
/// known to be unreliable, so they must not read it. Names that appear in
/// no catalog simply never fire. The whole struct deserializes from TOML or
/// JSON, so data corrections never touch validator logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Category id carrying the ecological/measurement level.
    pub level_category: String,

    /// Category id carrying technology access.
    pub technology_category: String,

    /// The lowest technology-access tier.
    pub low_technology_value: String,

    /// Category id carrying cultural restrictiveness.
    pub cultural_category: String,

    /// The most restrictive cultural tier.
    pub high_restrictiveness_value: String,

    /// Methods that require reliable technology access, by name.
    pub high_tech_methods: BTreeSet<String>,

    /// Visual or identity-exposing methods, by name.
    pub visibility_methods: BTreeSet<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            level_category: "sem_level".to_string(),
            technology_category: "technology_access".to_string(),
            low_technology_value: "Low".to_string(),
            cultural_category: "cultural_restrictiveness".to_string(),
            high_restrictiveness_value: "High".to_string(),
            high_tech_methods: [
                "Participatory Video/Digital Storytelling",
                "Digital Diaries",
                "Mobile-Based Surveys",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            visibility_methods: ["Photovoice", "Participatory Video/Digital Storytelling"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Outcome of semantic validation for one method.
///
/// Reasons are ordered by rule evaluation order; a method may accumulate
/// several. No reasons means the method is semantically coherent for the
/// selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Verdict {
    reasons: Vec<String>,
}

impl Verdict {
    /// Whether any rule vetoed the method.
    pub fn is_excluded(&self) -> bool {
        !self.reasons.is_empty()
    }

    /// Human-readable reasons, in rule order.
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Consume the verdict, yielding its reasons.
    pub fn into_reasons(self) -> Vec<String> {
        self.reasons
    }
}

/// Rule engine deciding whether a (method, selection) pair is categorically
/// incompatible.
///
/// Runs independently of, and prior to, percentage scoring; a veto here
/// overrides any score, including a full match. Evaluation never fails:
/// absence of a referenced category on either side means the rule does not
/// apply.
#[derive(Debug, Clone, Default)]
pub struct SemanticValidator {
    rules: RuleSet,
}

impl SemanticValidator {
    /// Create a validator over the given rule configuration.
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// The active rule configuration.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Evaluate every rule against one (method, selection) pair.
    pub fn validate(&self, method: &Method, selection: &Selection) -> Verdict {
        let mut reasons = Vec::new();

        if let Some(reason) = self.check_level_overlap(method, selection) {
            reasons.push(reason);
        }
        if let Some(reason) = self.check_technology_floor(method, selection) {
            reasons.push(reason);
        }
        if let Some(reason) = self.check_cultural_visibility(method, selection) {
            reasons.push(reason);
        }

        if !reasons.is_empty() {
            debug!("Vetoed {}: {}", method.name, reasons.join("; "));
        }

        Verdict { reasons }
    }

    /// Level-overlap rule: the method declares measurement levels, the user
    /// filtered on levels, and the two sets share nothing. A method with no
    /// declared level is exempt, since it is not claiming incompatibility.
    fn check_level_overlap(&self, method: &Method, selection: &Selection) -> Option<String> {
        let declared = method.values_for(&self.rules.level_category)?;
        if declared.is_empty() {
            return None;
        }
        let chosen = selection.values(&self.rules.level_category)?;

        if declared.intersection(chosen).next().is_some() {
            return None;
        }

        Some(format!(
            "Measurement level mismatch: method measures at [{}], selection requires [{}]",
            join(declared),
            join(chosen)
        ))
    }

    /// Technology-floor rule: a requires-reliable-technology method against
    /// a selection of exactly the lowest access tier. A user who also
    /// selected a higher tier has not ruled digital methods out, so the
    /// rule fires only on the singleton.
    fn check_technology_floor(&self, method: &Method, selection: &Selection) -> Option<String> {
        if !self.rules.high_tech_methods.contains(&method.name) {
            return None;
        }
        let chosen = selection.values(&self.rules.technology_category)?;

        if chosen.len() == 1 && chosen.contains(&self.rules.low_technology_value) {
            return Some(format!(
                "Requires reliable technology access, but only {} access was selected",
                self.rules.low_technology_value
            ));
        }
        None
    }

    /// Cultural-visibility rule: a visual/identity-exposing method against
    /// a selection of exactly the most restrictive cultural tier. Fires
    /// only on the singleton, same as the technology floor.
    fn check_cultural_visibility(&self, method: &Method, selection: &Selection) -> Option<String> {
        if !self.rules.visibility_methods.contains(&method.name) {
            return None;
        }
        let chosen = selection.values(&self.rules.cultural_category)?;

        if chosen.len() == 1 && chosen.contains(&self.rules.high_restrictiveness_value) {
            return Some(format!(
                "Involves visible or identity-exposing participation, but cultural restrictiveness is {}",
                self.rules.high_restrictiveness_value
            ));
        }
        None
    }
}

fn join(values: &BTreeSet<String>) -> String {
    values.iter().cloned().collect::<Vec<_>>().join(", ")
}
