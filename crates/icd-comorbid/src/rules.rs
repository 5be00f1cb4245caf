//! Hierarchical exclusion rules between comorbidity categories.
//!
//! Some published mappings define mutually exclusive category pairs: a visit
//! coded with complicated diabetes must not also score uncomplicated
//! diabetes. Rules form an ordered chain applied after raw matching, in
//! declaration order.

/// One exclusion: when `when_present` matched, clear `clear`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExclusionRule {
    /// Category whose presence triggers the rule.
    pub when_present: String,
    /// Category cleared by the rule.
    pub clear: String,
}

impl ExclusionRule {
    /// Creates a rule from category names.
    pub fn new(when_present: impl Into<String>, clear: impl Into<String>) -> Self {
        Self {
            when_present: when_present.into(),
            clear: clear.into(),
        }
    }
}

/// An ordered chain of exclusion rules.
///
/// Application order is significant and follows insertion order; published
/// rule sets form a strict priority chain, so no two rules ever contend for
/// the same cell in opposite directions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExclusionRuleSet {
    rules: Vec<ExclusionRule>,
}

impl ExclusionRuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule set from an ordered list of rules.
    pub fn from_rules(rules: Vec<ExclusionRule>) -> Self {
        Self { rules }
    }

    /// Appends a rule at the end of the chain.
    pub fn push(&mut self, rule: ExclusionRule) {
        self.rules.push(rule);
    }

    /// Iterates rules in application order.
    pub fn iter(&self) -> impl Iterator<Item = &ExclusionRule> {
        self.rules.iter()
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_set_preserves_order() {
        let mut rules = ExclusionRuleSet::new();
        rules.push(ExclusionRule::new("DiabetesComplicated", "DiabetesUncomplicated"));
        rules.push(ExclusionRule::new("MetastaticCancer", "SolidTumor"));

        let order: Vec<&str> = rules.iter().map(|r| r.when_present.as_str()).collect();
        assert_eq!(order, ["DiabetesComplicated", "MetastaticCancer"]);
        assert_eq!(rules.len(), 2);
        assert!(!rules.is_empty());
    }
}
