//! Visit classification against a comorbidity map.
//!
//! Groups `(visit, code)` records by visit, looks every code up in the
//! map's inverted index (walking truncation ancestors so a five-digit code
//! matches a four-digit map entry), and produces a visit × category matrix
//! of flags or counts. Records that cannot be interpreted are skipped and
//! reported, never fatal; real-world datasets always contain malformed
//! codes.

use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use icd_types::{IcdCode, Taxonomy};
use tracing::{debug, warn};

use crate::map::{CodeIndex, ComorbidityMap};
use crate::rules::ExclusionRuleSet;

/// One diagnosis-code occurrence within a visit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitCodeRecord {
    /// Identifier of the visit (encounter, admission) this code belongs to.
    pub visit_id: String,
    /// The code as it appears in the dataset, short or decimal form.
    pub code: String,
    /// Taxonomy of the code; guessed from syntax when absent.
    pub taxonomy: Option<Taxonomy>,
    /// Present-on-admission flag when the dataset carries one. Stored for
    /// the caller; classification does not interpret it.
    pub present_on_admission: Option<bool>,
}

impl VisitCodeRecord {
    /// Creates a record with no taxonomy hint.
    pub fn new(visit_id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            visit_id: visit_id.into(),
            code: code.into(),
            taxonomy: None,
            present_on_admission: None,
        }
    }

    /// Creates a record with an explicit taxonomy.
    pub fn with_taxonomy(
        visit_id: impl Into<String>,
        code: impl Into<String>,
        taxonomy: Taxonomy,
    ) -> Self {
        Self {
            visit_id: visit_id.into(),
            code: code.into(),
            taxonomy: Some(taxonomy),
            present_on_admission: None,
        }
    }
}

/// Output cell semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputMode {
    /// Cells are 0/1 presence flags.
    #[default]
    Flags,
    /// Cells count matching codes per visit per category.
    Counts,
}

/// Classification options.
#[derive(Debug, Clone, Default)]
pub struct ClassifyConfig {
    /// Flags or counts.
    pub mode: OutputMode,
    /// Explicit row ordering. Listed visits appear first, in this order,
    /// even with zero records; unlisted visits follow in encounter order.
    pub visit_order: Option<Vec<String>>,
}

impl ClassifyConfig {
    /// Default flag-mode configuration.
    pub fn flags() -> Self {
        Self::default()
    }

    /// Count-mode configuration.
    pub fn counts() -> Self {
        Self {
            mode: OutputMode::Counts,
            ..Self::default()
        }
    }
}

/// Why a record was excluded from classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipReason {
    /// The code failed to parse under its (given or guessed) taxonomy.
    Malformed,
    /// No taxonomy hint was given and the guess was ambiguous.
    AmbiguousTaxonomy,
    /// No taxonomy hint was given and the code matches no grammar.
    UnknownTaxonomy,
}

/// A record excluded from classification, with its input position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedRecord {
    /// Index of the record in the input slice.
    pub index: usize,
    /// Visit the record belonged to.
    pub visit_id: String,
    /// The code as given.
    pub code: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// A visit × category matrix plus the skip summary.
///
/// Rows are distinct visits (first-encounter order unless an explicit
/// ordering was configured); columns are the map's categories in map order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    visit_ids: Vec<String>,
    categories: Vec<String>,
    mode: OutputMode,
    cells: Vec<u32>,
    skipped: Vec<SkippedRecord>,
}

impl ClassificationResult {
    /// Returns the number of visit rows.
    pub fn visit_count(&self) -> usize {
        self.visit_ids.len()
    }

    /// Returns the row visit identifiers, in row order.
    pub fn visit_ids(&self) -> &[String] {
        &self.visit_ids
    }

    /// Returns the column category names, in map order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns the configured output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Returns a cell by visit and category name, `None` when either is
    /// unknown.
    pub fn get(&self, visit_id: &str, category: &str) -> Option<u32> {
        let row = self.visit_ids.iter().position(|v| v == visit_id)?;
        let col = self.categories.iter().position(|c| c == category)?;
        Some(self.cells[row * self.categories.len() + col])
    }

    /// Returns a presence flag by visit and category name.
    pub fn flag(&self, visit_id: &str, category: &str) -> bool {
        self.get(visit_id, category).is_some_and(|v| v > 0)
    }

    /// Returns one row's cells by row index.
    pub fn row(&self, row: usize) -> &[u32] {
        let width = self.categories.len();
        &self.cells[row * width..(row + 1) * width]
    }

    /// Iterates `(visit_id, cells)` rows.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.visit_ids
            .iter()
            .enumerate()
            .map(|(i, v)| (v.as_str(), self.row(i)))
    }

    /// Returns the records excluded from classification, in input order.
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }
}

/// Classifies records against a map.
///
/// Builds the map's inverted index internally; use
/// [`classify_with_index`] to amortize the index across calls.
///
/// # Example
///
/// ```
/// use icd_comorbid::{classify, ClassifyConfig, CodeRange, MapBuilder, TaxonomyCatalog};
/// use icd_comorbid::VisitCodeRecord;
/// use icd_types::Taxonomy;
///
/// let mut builder = MapBuilder::new();
/// builder.add_range("CHF", CodeRange::new(Taxonomy::Icd9, "428", "428.9", false).unwrap());
/// let map = builder.build(&TaxonomyCatalog::empty()).map;
///
/// let records = vec![
///     VisitCodeRecord::with_taxonomy("v1", "428.0", Taxonomy::Icd9),
///     VisitCodeRecord::with_taxonomy("v2", "250.00", Taxonomy::Icd9),
/// ];
/// let result = classify(&records, &map, &ClassifyConfig::flags());
/// assert!(result.flag("v1", "CHF"));
/// assert!(!result.flag("v2", "CHF"));
/// ```
pub fn classify(
    records: &[VisitCodeRecord],
    map: &ComorbidityMap,
    config: &ClassifyConfig,
) -> ClassificationResult {
    let index = CodeIndex::from_map(map);
    classify_with_index(records, map, &index, config)
}

/// Classifies records using a prebuilt [`CodeIndex`].
pub fn classify_with_index(
    records: &[VisitCodeRecord],
    map: &ComorbidityMap,
    index: &CodeIndex,
    config: &ClassifyConfig,
) -> ClassificationResult {
    let categories: Vec<String> = map.category_names().map(str::to_string).collect();
    let width = categories.len();
    let (visit_ids, row_of) = assign_rows(records, config);

    let mut cells = vec![0u32; visit_ids.len() * width];
    let mut skipped = Vec::new();

    for (position, record) in records.iter().enumerate() {
        let row = row_of[position];
        match interpret(record) {
            Ok(code) => {
                apply_code(&code, index, config.mode, &mut cells[row * width..(row + 1) * width]);
            }
            Err(reason) => {
                warn!(
                    visit = %record.visit_id,
                    code = %record.code,
                    ?reason,
                    "record skipped"
                );
                skipped.push(SkippedRecord {
                    index: position,
                    visit_id: record.visit_id.clone(),
                    code: record.code.clone(),
                    reason,
                });
            }
        }
    }

    debug!(
        visits = visit_ids.len(),
        records = records.len(),
        skipped = skipped.len(),
        "classification complete"
    );
    ClassificationResult {
        visit_ids,
        categories,
        mode: config.mode,
        cells,
        skipped,
    }
}

/// Classifies records, then applies an exclusion rule chain in order.
pub fn classify_with_rules(
    records: &[VisitCodeRecord],
    map: &ComorbidityMap,
    config: &ClassifyConfig,
    rules: &ExclusionRuleSet,
) -> ClassificationResult {
    let mut result = classify(records, map, config);
    apply_exclusions(&mut result, rules);
    result
}

/// Parallel classification partitioned by visit.
///
/// Output is identical to [`classify`]: no visit's cells depend on another
/// visit's records, so partitions need no shared state beyond the immutable
/// map and index.
#[cfg(feature = "parallel")]
pub fn classify_parallel(
    records: &[VisitCodeRecord],
    map: &ComorbidityMap,
    config: &ClassifyConfig,
) -> ClassificationResult {
    let index = CodeIndex::from_map(map);
    let categories: Vec<String> = map.category_names().map(str::to_string).collect();
    let width = categories.len();
    let (visit_ids, row_of) = assign_rows(records, config);

    // Bucket record positions by row so each row is an independent task.
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); visit_ids.len()];
    for (position, &row) in row_of.iter().enumerate() {
        buckets[row].push(position);
    }

    let per_row: Vec<(Vec<u32>, Vec<SkippedRecord>)> = buckets
        .par_iter()
        .map(|positions| {
            let mut row_cells = vec![0u32; width];
            let mut row_skipped = Vec::new();
            for &position in positions {
                let record = &records[position];
                match interpret(record) {
                    Ok(code) => apply_code(&code, &index, config.mode, &mut row_cells),
                    Err(reason) => row_skipped.push(SkippedRecord {
                        index: position,
                        visit_id: record.visit_id.clone(),
                        code: record.code.clone(),
                        reason,
                    }),
                }
            }
            (row_cells, row_skipped)
        })
        .collect();

    let mut cells = Vec::with_capacity(visit_ids.len() * width);
    let mut skipped = Vec::new();
    for (row_cells, row_skipped) in per_row {
        cells.extend(row_cells);
        skipped.extend(row_skipped);
    }
    // Restore input order for the summary; buckets shuffled it by visit.
    skipped.sort_by_key(|s| s.index);

    ClassificationResult {
        visit_ids,
        categories,
        mode: config.mode,
        cells,
        skipped,
    }
}

/// Resolves each record to a row, building the row set as configured.
///
/// Row lookup is a hash map keyed by visit id, so assignment stays linear
/// in the record count however many visits a batch spans.
fn assign_rows(records: &[VisitCodeRecord], config: &ClassifyConfig) -> (Vec<String>, Vec<usize>) {
    let mut visit_ids: Vec<String> = Vec::new();
    let mut row_lookup: HashMap<&str, usize> = HashMap::new();
    if let Some(order) = &config.visit_order {
        for visit_id in order {
            if !row_lookup.contains_key(visit_id.as_str()) {
                row_lookup.insert(visit_id, visit_ids.len());
                visit_ids.push(visit_id.clone());
            }
        }
    }
    let mut row_of = Vec::with_capacity(records.len());
    for record in records {
        let row = match row_lookup.get(record.visit_id.as_str()) {
            Some(&row) => row,
            None => {
                let row = visit_ids.len();
                row_lookup.insert(&record.visit_id, row);
                visit_ids.push(record.visit_id.clone());
                row
            }
        };
        row_of.push(row);
    }
    (visit_ids, row_of)
}

/// Parses a record's code, guessing the taxonomy when no hint is given.
fn interpret(record: &VisitCodeRecord) -> Result<IcdCode, SkipReason> {
    let taxonomy = match record.taxonomy {
        Some(taxonomy) => taxonomy,
        None => Taxonomy::guess(&record.code).map_err(|err| match err {
            icd_types::GuessError::Ambiguous(_) => SkipReason::AmbiguousTaxonomy,
            icd_types::GuessError::NoMatch(_) => SkipReason::UnknownTaxonomy,
        })?,
    };
    IcdCode::parse_lenient(&record.code, taxonomy).map_err(|_| SkipReason::Malformed)
}

/// Applies one code's category matches to a row.
///
/// The code and its truncation ancestors are looked up so that a record
/// more specific than the map's entries still matches; each category is
/// applied at most once per code regardless of how many ancestor forms hit.
fn apply_code(code: &IcdCode, index: &CodeIndex, mode: OutputMode, row: &mut [u32]) {
    let mut matched: Vec<u32> = Vec::new();
    let mut current = Some(code.clone());
    while let Some(form) = current {
        for &category in index.categories_for(&form) {
            if !matched.contains(&category) {
                matched.push(category);
            }
        }
        current = form.parent();
    }
    for category in matched {
        let cell = &mut row[category as usize];
        match mode {
            OutputMode::Flags => *cell = 1,
            OutputMode::Counts => *cell += 1,
        }
    }
}

/// Clears excluded categories per rule, in chain order.
fn apply_exclusions(result: &mut ClassificationResult, rules: &ExclusionRuleSet) {
    let width = result.categories.len();
    for rule in rules.iter() {
        let when = result.categories.iter().position(|c| *c == rule.when_present);
        let clear = result.categories.iter().position(|c| *c == rule.clear);
        let (Some(when), Some(clear)) = (when, clear) else {
            warn!(
                when_present = %rule.when_present,
                clear = %rule.clear,
                "exclusion rule names a category absent from the map"
            );
            continue;
        };
        for row in 0..result.visit_ids.len() {
            if result.cells[row * width + when] > 0 {
                result.cells[row * width + clear] = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TaxonomyCatalog;
    use crate::expand::CodeRange;
    use crate::map::MapBuilder;
    use crate::rules::{ExclusionRule, ExclusionRuleSet};

    fn test_map() -> ComorbidityMap {
        let mut builder = MapBuilder::new();
        builder.add_range(
            "CHF",
            CodeRange::new(Taxonomy::Icd9, "428", "428.9", false).unwrap(),
        );
        builder.add_range(
            "Diabetes",
            CodeRange::new(Taxonomy::Icd9, "250.00", "250.93", false).unwrap(),
        );
        builder.add_range(
            "Cancer",
            CodeRange::new(Taxonomy::Icd9, "199.0", "199.2", false).unwrap(),
        );
        builder.build(&TaxonomyCatalog::empty()).map
    }

    #[test]
    fn test_classify_basic_matrix() {
        let records = vec![
            VisitCodeRecord::with_taxonomy("v1", "428.0", Taxonomy::Icd9),
            VisitCodeRecord::with_taxonomy("v1", "250.00", Taxonomy::Icd9),
            VisitCodeRecord::with_taxonomy("v2", "199.1", Taxonomy::Icd9),
        ];
        let result = classify(&records, &test_map(), &ClassifyConfig::flags());

        assert_eq!(result.visit_ids(), ["v1", "v2"]);
        assert!(result.flag("v1", "CHF"));
        assert!(result.flag("v1", "Diabetes"));
        assert!(!result.flag("v1", "Cancer"));
        assert!(!result.flag("v2", "CHF"));
        assert!(!result.flag("v2", "Diabetes"));
        assert!(result.flag("v2", "Cancer"));
        assert!(result.skipped().is_empty());
    }

    #[test]
    fn test_empty_input_keeps_columns() {
        let result = classify(&[], &test_map(), &ClassifyConfig::flags());
        assert_eq!(result.visit_count(), 0);
        assert_eq!(result.categories(), ["CHF", "Diabetes", "Cancer"]);
    }

    #[test]
    fn test_counts_mode() {
        let records = vec![
            VisitCodeRecord::with_taxonomy("v1", "4280", Taxonomy::Icd9),
            VisitCodeRecord::with_taxonomy("v1", "4281", Taxonomy::Icd9),
            VisitCodeRecord::with_taxonomy("v1", "25000", Taxonomy::Icd9),
        ];
        let result = classify(&records, &test_map(), &ClassifyConfig::counts());
        assert_eq!(result.get("v1", "CHF"), Some(2));
        assert_eq!(result.get("v1", "Diabetes"), Some(1));
        assert_eq!(result.get("v1", "Cancer"), Some(0));
    }

    #[test]
    fn test_deep_code_matches_by_truncation() {
        // The map holds 428.0; a five-digit record must still match.
        let mut builder = MapBuilder::new();
        builder.add_range(
            "CHF",
            CodeRange::new(Taxonomy::Icd9, "428.0", "428.9", false).unwrap(),
        );
        let map = builder.build(&TaxonomyCatalog::empty()).map;

        let records = vec![VisitCodeRecord::with_taxonomy("v1", "42801", Taxonomy::Icd9)];
        let result = classify(&records, &map, &ClassifyConfig::flags());
        assert!(result.flag("v1", "CHF"));
    }

    #[test]
    fn test_truncation_does_not_double_count() {
        // Both 428 and 428.0 are in the category; one record counts once.
        let mut builder = MapBuilder::new();
        builder.add_range(
            "CHF",
            CodeRange::new(Taxonomy::Icd9, "428", "428.9", false).unwrap(),
        );
        let map = builder.build(&TaxonomyCatalog::empty()).map;

        let records = vec![VisitCodeRecord::with_taxonomy("v1", "4280", Taxonomy::Icd9)];
        let result = classify(&records, &map, &ClassifyConfig::counts());
        assert_eq!(result.get("v1", "CHF"), Some(1));
    }

    #[test]
    fn test_malformed_and_ambiguous_records_skipped() {
        let records = vec![
            VisitCodeRecord::with_taxonomy("v1", "428.0", Taxonomy::Icd9),
            VisitCodeRecord::new("v1", "not a code"),
            VisitCodeRecord::new("v1", "E950"),
            VisitCodeRecord::with_taxonomy("v1", "42.8.0", Taxonomy::Icd9),
        ];
        let result = classify(&records, &test_map(), &ClassifyConfig::flags());

        assert!(result.flag("v1", "CHF"));
        let reasons: Vec<SkipReason> = result.skipped().iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            [
                SkipReason::UnknownTaxonomy,
                SkipReason::AmbiguousTaxonomy,
                SkipReason::Malformed,
            ]
        );
        assert_eq!(result.skipped()[0].index, 1);
    }

    #[test]
    fn test_multibyte_record_is_skipped_not_fatal() {
        // A record whose code contains multi-byte characters must come back
        // as a skip, regardless of the taxonomy hint.
        let records = vec![
            VisitCodeRecord::with_taxonomy("v1", "éé", Taxonomy::Icd10),
            VisitCodeRecord::with_taxonomy("v1", "éé", Taxonomy::Icd9),
            VisitCodeRecord::with_taxonomy("v1", "428.0", Taxonomy::Icd9),
        ];
        let result = classify(&records, &test_map(), &ClassifyConfig::flags());

        assert_eq!(result.skipped().len(), 2);
        assert!(result
            .skipped()
            .iter()
            .all(|s| s.reason == SkipReason::Malformed));
        assert!(result.flag("v1", "CHF"));
    }

    #[test]
    fn test_visit_without_valid_codes_still_has_row() {
        let records = vec![
            VisitCodeRecord::new("v1", "garbage"),
            VisitCodeRecord::with_taxonomy("v2", "428.0", Taxonomy::Icd9),
        ];
        let result = classify(&records, &test_map(), &ClassifyConfig::flags());
        assert_eq!(result.visit_ids(), ["v1", "v2"]);
        assert!(result.row(0).iter().all(|&c| c == 0));
    }

    #[test]
    fn test_explicit_visit_order() {
        let records = vec![
            VisitCodeRecord::with_taxonomy("v2", "428.0", Taxonomy::Icd9),
            VisitCodeRecord::with_taxonomy("v3", "199.1", Taxonomy::Icd9),
        ];
        let config = ClassifyConfig {
            visit_order: Some(vec!["v1".to_string(), "v2".to_string()]),
            ..ClassifyConfig::flags()
        };
        let result = classify(&records, &test_map(), &config);

        // v1 appears (all false) even without records; v3 is appended.
        assert_eq!(result.visit_ids(), ["v1", "v2", "v3"]);
        assert!(result.row(0).iter().all(|&c| c == 0));
        assert!(result.flag("v2", "CHF"));
    }

    #[test]
    fn test_row_assignment_over_many_interleaved_visits() {
        // Rows must stay keyed per visit, not per record, with records for
        // the same visit scattered through the batch; duplicate entries in
        // an explicit ordering collapse to one row.
        let records: Vec<VisitCodeRecord> = (0..300)
            .map(|i| VisitCodeRecord::with_taxonomy(format!("v{}", i % 50), "428.0", Taxonomy::Icd9))
            .collect();
        let config = ClassifyConfig {
            visit_order: Some(vec!["v7".to_string(), "v7".to_string(), "v3".to_string()]),
            ..ClassifyConfig::counts()
        };
        let result = classify(&records, &test_map(), &config);

        assert_eq!(result.visit_count(), 50);
        assert_eq!(result.visit_ids()[..3], ["v7", "v3", "v0"]);
        assert!(result
            .visit_ids()
            .iter()
            .all(|v| result.get(v, "CHF") == Some(6)));
    }

    #[test]
    fn test_exclusion_rules_clear_in_order() {
        let mut builder = MapBuilder::new();
        builder.add_range(
            "DiabetesComplicated",
            CodeRange::new(Taxonomy::Icd9, "250.4", "250.9", false).unwrap(),
        );
        builder.add_range(
            "DiabetesUncomplicated",
            CodeRange::new(Taxonomy::Icd9, "250.0", "250.3", false).unwrap(),
        );
        let map = builder.build(&TaxonomyCatalog::empty()).map;
        let rules = ExclusionRuleSet::from_rules(vec![ExclusionRule::new(
            "DiabetesComplicated",
            "DiabetesUncomplicated",
        )]);

        let records = vec![
            VisitCodeRecord::with_taxonomy("v1", "250.0", Taxonomy::Icd9),
            VisitCodeRecord::with_taxonomy("v1", "250.7", Taxonomy::Icd9),
            VisitCodeRecord::with_taxonomy("v2", "250.0", Taxonomy::Icd9),
        ];
        let result = classify_with_rules(&records, &map, &ClassifyConfig::flags(), &rules);

        assert!(result.flag("v1", "DiabetesComplicated"));
        assert!(!result.flag("v1", "DiabetesUncomplicated"));
        // v2 only matched the uncomplicated form; nothing to clear.
        assert!(result.flag("v2", "DiabetesUncomplicated"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_record_and_skip_serde_round_trip() {
        let record = VisitCodeRecord::with_taxonomy("v1", "428.0", Taxonomy::Icd9);
        let json = serde_json::to_string(&record).unwrap();
        let back: VisitCodeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);

        let skip = SkippedRecord {
            index: 3,
            visit_id: "v1".to_string(),
            code: "bogus".to_string(),
            reason: SkipReason::Malformed,
        };
        let json = serde_json::to_string(&skip).unwrap();
        let back: SkippedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, skip);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let records: Vec<VisitCodeRecord> = (0..200)
            .map(|i| {
                let code = match i % 4 {
                    0 => "428.0",
                    1 => "250.00",
                    2 => "199.1",
                    _ => "bogus",
                };
                VisitCodeRecord::new(format!("v{}", i % 23), code)
            })
            .collect();
        let map = test_map();
        let config = ClassifyConfig::counts();

        let sequential = classify(&records, &map, &config);
        let parallel = classify_parallel(&records, &map, &config);
        assert_eq!(sequential, parallel);
    }
}
