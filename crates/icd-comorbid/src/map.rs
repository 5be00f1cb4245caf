//! Comorbidity map construction.
//!
//! A [`ComorbidityMap`] is an insertion-ordered mapping from category name
//! to an ordered, deduplicated code set, built by expanding each category's
//! ranges. Construction collects per-range diagnostics instead of aborting,
//! so one bad definition never blocks the rest of the map, and rebuilding
//! from identical definitions reproduces identical category→code-set
//! results.

use std::collections::HashMap;

use icd_types::{IcdCode, Taxonomy};
use tracing::{debug, warn};

use crate::catalog::TaxonomyCatalog;
use crate::error::ComorbidError;
use crate::expand::{expand_range_detailed, CodeRange};
use crate::rules::ExclusionRuleSet;

/// One named category and the ranges that define it.
///
/// A category may be defined by multiple disjoint ranges; their expansions
/// are unioned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryDefinition {
    /// Display name of the category.
    pub name: String,
    /// Ranges whose union forms the category's code set.
    pub ranges: Vec<CodeRange>,
}

impl CategoryDefinition {
    /// Creates a definition from a name and its ranges.
    pub fn new(name: impl Into<String>, ranges: Vec<CodeRange>) -> Self {
        Self {
            name: name.into(),
            ranges,
        }
    }
}

/// A non-fatal problem found while building a map.
///
/// Diagnostics are reported, never silently dropped, and never abort the
/// build of sibling categories.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapDiagnostic {
    /// A range's start sorted after its end; the range contributed nothing.
    InvertedRange {
        /// Category the bad range belonged to.
        category: String,
        /// Range start, short form.
        start: String,
        /// Range end, short form.
        end: String,
    },
    /// A code string in a definition failed to parse.
    MalformedCode {
        /// Category the value belonged to.
        category: String,
        /// The offending value.
        value: String,
    },
    /// A syntactically valid code was excluded by strict validity.
    UndefinedCode {
        /// Category the code belonged to.
        category: String,
        /// The excluded code, short form.
        code: String,
    },
    /// A range could not be expanded for a reason other than inversion.
    ExpansionFailed {
        /// Category the range belonged to.
        category: String,
        /// Rendered error message.
        message: String,
    },
    /// The same code appears in two categories an exclusion rule declares
    /// mutually exclusive.
    ExclusiveOverlap {
        /// The overlapping code, short form.
        code: String,
        /// The rule's trigger category.
        first: String,
        /// The rule's cleared category.
        second: String,
    },
}

/// An insertion-ordered category → code-set mapping.
///
/// Immutable after construction and safe to share read-only across
/// concurrent classification calls.
///
/// # Example
///
/// ```
/// use icd_comorbid::{CodeRange, MapBuilder, TaxonomyCatalog};
/// use icd_types::Taxonomy;
///
/// let mut builder = MapBuilder::new();
/// builder.add_range("CHF", CodeRange::new(Taxonomy::Icd9, "428", "428.9", false).unwrap());
/// builder.add_range("Diabetes", CodeRange::new(Taxonomy::Icd9, "250", "250.9", false).unwrap());
/// let build = builder.build(&TaxonomyCatalog::empty());
///
/// assert!(build.diagnostics.is_empty());
/// assert_eq!(build.map.category_names().collect::<Vec<_>>(), ["CHF", "Diabetes"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComorbidityMap {
    categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Category {
    name: String,
    codes: Vec<IcdCode>,
}

impl ComorbidityMap {
    /// Returns the number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns true when the map has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterates category names in insertion order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Returns a category's code set by name.
    pub fn codes(&self, category: &str) -> Option<&[IcdCode]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.codes.as_slice())
    }

    /// Returns a category's position in insertion order.
    pub fn position(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == category)
    }

    /// Iterates `(name, codes)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[IcdCode])> {
        self.categories
            .iter()
            .map(|c| (c.name.as_str(), c.codes.as_slice()))
    }

    /// Returns the total number of codes across all categories.
    pub fn code_count(&self) -> usize {
        self.categories.iter().map(|c| c.codes.len()).sum()
    }
}

/// The outcome of a map build: the map plus collected diagnostics.
#[derive(Debug, Clone)]
pub struct MapBuild {
    /// The constructed map. Categories whose every range failed still appear
    /// with an empty code set, keeping the column set stable.
    pub map: ComorbidityMap,
    /// Everything worth reporting, in category order.
    pub diagnostics: Vec<MapDiagnostic>,
}

/// Accumulates category definitions and builds a [`ComorbidityMap`].
#[derive(Debug, Default)]
pub struct MapBuilder {
    definitions: Vec<CategoryDefinition>,
    rules: Option<ExclusionRuleSet>,
}

impl MapBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with complete definitions.
    pub fn from_definitions(definitions: Vec<CategoryDefinition>) -> Self {
        Self {
            definitions,
            rules: None,
        }
    }

    /// Validates exclusive-category overlap against a rule set at build
    /// time (a warning-level diagnostic, not an error).
    pub fn with_rules(mut self, rules: ExclusionRuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Appends a range to a category, creating the category in insertion
    /// order on first mention.
    pub fn add_range(&mut self, category: &str, range: CodeRange) -> &mut Self {
        match self.definitions.iter_mut().find(|d| d.name == category) {
            Some(def) => def.ranges.push(range),
            None => self
                .definitions
                .push(CategoryDefinition::new(category, vec![range])),
        }
        self
    }

    /// Expands every definition and assembles the map.
    ///
    /// Deterministic: identical definitions and catalog produce an
    /// identical map, category by category and code by code.
    pub fn build(&self, catalog: &TaxonomyCatalog) -> MapBuild {
        let mut categories = Vec::with_capacity(self.definitions.len());
        let mut diagnostics = Vec::new();

        for def in &self.definitions {
            let mut codes: Vec<IcdCode> = Vec::new();
            for range in &def.ranges {
                match expand_range_detailed(range, catalog) {
                    Ok(expansion) => {
                        codes.extend(expansion.codes);
                        for code in expansion.undefined {
                            diagnostics.push(MapDiagnostic::UndefinedCode {
                                category: def.name.clone(),
                                code: code.as_short().to_string(),
                            });
                        }
                    }
                    Err(ComorbidError::InvertedRange { start, end }) => {
                        warn!(category = %def.name, %start, %end, "inverted range skipped");
                        diagnostics.push(MapDiagnostic::InvertedRange {
                            category: def.name.clone(),
                            start,
                            end,
                        });
                    }
                    Err(err) => {
                        warn!(category = %def.name, error = %err, "range expansion failed");
                        diagnostics.push(MapDiagnostic::ExpansionFailed {
                            category: def.name.clone(),
                            message: err.to_string(),
                        });
                    }
                }
            }
            codes.sort();
            codes.dedup();
            categories.push(Category {
                name: def.name.clone(),
                codes,
            });
        }

        let map = ComorbidityMap { categories };
        if let Some(rules) = &self.rules {
            check_exclusive_overlap(&map, rules, &mut diagnostics);
        }
        debug!(
            categories = map.len(),
            codes = map.code_count(),
            diagnostics = diagnostics.len(),
            "comorbidity map built"
        );
        MapBuild { map, diagnostics }
    }
}

/// Reports codes claimed by both sides of an exclusion rule.
fn check_exclusive_overlap(
    map: &ComorbidityMap,
    rules: &ExclusionRuleSet,
    diagnostics: &mut Vec<MapDiagnostic>,
) {
    for rule in rules.iter() {
        let (Some(first), Some(second)) = (map.codes(&rule.when_present), map.codes(&rule.clear))
        else {
            continue;
        };
        // Both sets are sorted; walk them together.
        let (mut i, mut j) = (0, 0);
        while i < first.len() && j < second.len() {
            match first[i].cmp(&second[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    warn!(
                        code = first[i].as_short(),
                        first = %rule.when_present,
                        second = %rule.clear,
                        "code claimed by mutually exclusive categories"
                    );
                    diagnostics.push(MapDiagnostic::ExclusiveOverlap {
                        code: first[i].as_short().to_string(),
                        first: rule.when_present.clone(),
                        second: rule.clear.clone(),
                    });
                    i += 1;
                    j += 1;
                }
            }
        }
    }
}

/// Inverted index from code to category positions.
///
/// Built once per map and shared by every classification run against it;
/// membership checks are then amortized O(1) per looked-up form instead of
/// a scan over all categories.
#[derive(Debug, Clone)]
pub struct CodeIndex {
    slots: HashMap<(Taxonomy, String), Vec<u32>>,
}

impl CodeIndex {
    /// Builds the index for a map.
    pub fn from_map(map: &ComorbidityMap) -> Self {
        let mut slots: HashMap<(Taxonomy, String), Vec<u32>> = HashMap::new();
        for (position, category) in map.categories.iter().enumerate() {
            for code in &category.codes {
                let key = (base_revision(code.taxonomy()), code.as_short().to_string());
                let categories = slots.entry(key).or_default();
                // Codes within a category are unique, so no duplicate check.
                categories.push(position as u32);
            }
        }
        Self { slots }
    }

    /// Returns the category positions containing this exact code.
    ///
    /// Clinical modifications share their base revision's slot, so an
    /// ICD-9-CM record matches an ICD-9 map entry.
    pub fn categories_for(&self, code: &IcdCode) -> &[u32] {
        self.slots
            .get(&(base_revision(code.taxonomy()), code.as_short().to_string()))
            .map_or(&[], Vec::as_slice)
    }
}

/// Collapses a clinical modification onto its base revision for matching.
fn base_revision(taxonomy: Taxonomy) -> Taxonomy {
    if taxonomy.is_icd9_family() {
        Taxonomy::Icd9
    } else {
        Taxonomy::Icd10
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ExclusionRule;

    fn range(start: &str, end: &str) -> CodeRange {
        CodeRange::new(Taxonomy::Icd9, start, end, false).unwrap()
    }

    fn build_chf_dm() -> MapBuild {
        let mut builder = MapBuilder::new();
        builder.add_range("CHF", range("428.0", "428.9"));
        builder.add_range("Diabetes", range("250.00", "250.93"));
        builder.build(&TaxonomyCatalog::empty())
    }

    #[test]
    fn test_build_preserves_insertion_order() {
        let build = build_chf_dm();
        let names: Vec<&str> = build.map.category_names().collect();
        assert_eq!(names, ["CHF", "Diabetes"]);
        assert_eq!(build.map.position("Diabetes"), Some(1));
        assert!(build.diagnostics.is_empty());
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = build_chf_dm();
        let second = build_chf_dm();
        assert_eq!(first.map, second.map);
    }

    #[test]
    fn test_multiple_ranges_union_and_dedup() {
        let mut builder = MapBuilder::new();
        builder.add_range("CHF", range("428.0", "428.5"));
        builder.add_range("CHF", range("428.3", "428.9"));
        let build = builder.build(&TaxonomyCatalog::empty());

        let codes = build.map.codes("CHF").unwrap();
        assert_eq!(codes.len(), 10);
        assert!(codes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_inverted_range_reported_without_blocking_siblings() {
        let mut builder = MapBuilder::new();
        builder.add_range("Broken", range("500", "100"));
        builder.add_range("CHF", range("428.0", "428.9"));
        let build = builder.build(&TaxonomyCatalog::empty());

        assert_eq!(build.map.len(), 2);
        assert!(build.map.codes("Broken").unwrap().is_empty());
        assert_eq!(build.map.codes("CHF").unwrap().len(), 10);
        assert!(matches!(
            build.diagnostics.as_slice(),
            [MapDiagnostic::InvertedRange { category, .. }] if category == "Broken"
        ));
    }

    #[test]
    fn test_undefined_codes_reported_when_strict() {
        let mut catalog_builder = crate::catalog::CatalogBuilder::new();
        catalog_builder
            .add_short_codes(Taxonomy::Icd9, ["4280", "4289"])
            .unwrap();
        let catalog = catalog_builder.build();

        let mut builder = MapBuilder::new();
        builder.add_range(
            "CHF",
            CodeRange::new(Taxonomy::Icd9, "428.0", "428.9", true).unwrap(),
        );
        let build = builder.build(&catalog);

        assert_eq!(build.map.codes("CHF").unwrap().len(), 2);
        let undefined = build
            .diagnostics
            .iter()
            .filter(|d| matches!(d, MapDiagnostic::UndefinedCode { .. }))
            .count();
        assert_eq!(undefined, 8);
    }

    #[test]
    fn test_exclusive_overlap_reported_at_build_time() {
        let mut builder = MapBuilder::new();
        builder.add_range("DiabetesComplicated", range("250.4", "250.9"));
        builder.add_range("DiabetesUncomplicated", range("250.0", "250.5"));
        let rules = ExclusionRuleSet::from_rules(vec![ExclusionRule::new(
            "DiabetesComplicated",
            "DiabetesUncomplicated",
        )]);
        let build = builder.with_rules(rules).build(&TaxonomyCatalog::empty());

        let overlaps: Vec<&str> = build
            .diagnostics
            .iter()
            .filter_map(|d| match d {
                MapDiagnostic::ExclusiveOverlap { code, .. } => Some(code.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(overlaps, ["2504", "2505"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_map_and_diagnostics_serde_round_trip() {
        let build = build_chf_dm();
        let json = serde_json::to_string(&build.map).unwrap();
        let back: ComorbidityMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, build.map);

        let diagnostic = MapDiagnostic::UndefinedCode {
            category: "CHF".to_string(),
            code: "4282".to_string(),
        };
        let json = serde_json::to_string(&diagnostic).unwrap();
        let back: MapDiagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, diagnostic);
    }

    #[test]
    fn test_code_index_lookup() {
        let build = build_chf_dm();
        let index = CodeIndex::from_map(&build.map);

        let chf = IcdCode::parse_short("4280", Taxonomy::Icd9).unwrap();
        assert_eq!(index.categories_for(&chf), [0]);

        // Clinical modification matches the base revision's entries.
        let chf_cm = IcdCode::parse_short("4280", Taxonomy::Icd9Cm).unwrap();
        assert_eq!(index.categories_for(&chf_cm), [0]);

        let miss = IcdCode::parse_short("V450", Taxonomy::Icd9).unwrap();
        assert!(index.categories_for(&miss).is_empty());
    }
}
