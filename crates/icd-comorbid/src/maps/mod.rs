//! Builtin comorbidity map definitions.
//!
//! Ships the Quan adaptations of the Charlson (17 categories) and
//! Elixhauser (31 categories) coding algorithms for both the ICD-9 and
//! ICD-10 families, as range tables ready for [`MapBuilder`]. Tables carry
//! the published code lists; single codes appear as one-code ranges.
//!
//! [`MapBuilder`]: crate::map::MapBuilder

mod charlson;
mod elixhauser;

use icd_types::Taxonomy;

use crate::error::ComorbidResult;
use crate::expand::CodeRange;
use crate::map::CategoryDefinition;
use crate::rules::{ExclusionRule, ExclusionRuleSet};

/// One published category: its name and inclusive `(start, end)` ranges.
type CategoryTable = (&'static str, &'static [(&'static str, &'static str)]);

/// Returns the Quan-Charlson category definitions for a taxonomy family.
///
/// The CM revisions use their base family's table.
///
/// # Errors
/// Fails only if a table entry does not parse, which the crate's tests rule
/// out for the shipped tables.
pub fn charlson_definitions(taxonomy: Taxonomy) -> ComorbidResult<Vec<CategoryDefinition>> {
    let table = if taxonomy.is_icd9_family() {
        charlson::ICD9
    } else {
        charlson::ICD10
    };
    definitions_from_table(table, taxonomy)
}

/// Returns the Quan-Elixhauser category definitions for a taxonomy family.
///
/// # Errors
/// Fails only if a table entry does not parse.
pub fn elixhauser_definitions(taxonomy: Taxonomy) -> ComorbidResult<Vec<CategoryDefinition>> {
    let table = if taxonomy.is_icd9_family() {
        elixhauser::ICD9
    } else {
        elixhauser::ICD10
    };
    definitions_from_table(table, taxonomy)
}

/// Exclusion chain for the Charlson hierarchy: the severe form of a
/// condition supersedes the mild form.
pub fn charlson_exclusion_rules() -> ExclusionRuleSet {
    ExclusionRuleSet::from_rules(vec![
        ExclusionRule::new("DiabetesComplicated", "DiabetesUncomplicated"),
        ExclusionRule::new("LiverSevere", "LiverMild"),
        ExclusionRule::new("MetastaticCancer", "Cancer"),
    ])
}

/// Exclusion chain for the Elixhauser hierarchy.
pub fn elixhauser_exclusion_rules() -> ExclusionRuleSet {
    ExclusionRuleSet::from_rules(vec![
        ExclusionRule::new("DiabetesComplicated", "DiabetesUncomplicated"),
        ExclusionRule::new("HypertensionComplicated", "HypertensionUncomplicated"),
        ExclusionRule::new("MetastaticCancer", "SolidTumor"),
    ])
}

fn definitions_from_table(
    table: &[CategoryTable],
    taxonomy: Taxonomy,
) -> ComorbidResult<Vec<CategoryDefinition>> {
    let mut definitions = Vec::with_capacity(table.len());
    for (name, ranges) in table {
        let mut parsed = Vec::with_capacity(ranges.len());
        for (start, end) in *ranges {
            parsed.push(CodeRange::new(taxonomy, start, end, false)?);
        }
        definitions.push(CategoryDefinition {
            name: (*name).to_string(),
            ranges: parsed,
        });
    }
    Ok(definitions)
}
