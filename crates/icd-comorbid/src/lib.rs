//! # icd-comorbid
//!
//! Comorbidity classification over ICD-9 and ICD-10 diagnosis codes:
//! expands code ranges, assembles category-to-codes comorbidity maps, and
//! classifies visit records into a visit × category matrix.
//!
//! ## Quick start
//!
//! ```
//! use icd_comorbid::maps::{charlson_definitions, charlson_exclusion_rules};
//! use icd_comorbid::{classify_with_rules, ClassifyConfig, MapBuilder, TaxonomyCatalog};
//! use icd_comorbid::VisitCodeRecord;
//! use icd_types::Taxonomy;
//!
//! let defs = charlson_definitions(Taxonomy::Icd9).unwrap();
//! let map = MapBuilder::from_definitions(defs)
//!     .build(&TaxonomyCatalog::empty())
//!     .map;
//!
//! let records = vec![
//!     VisitCodeRecord::with_taxonomy("1000", "428.0", Taxonomy::Icd9),
//!     VisitCodeRecord::with_taxonomy("1000", "250.7", Taxonomy::Icd9),
//! ];
//! let result = classify_with_rules(
//!     &records,
//!     &map,
//!     &ClassifyConfig::flags(),
//!     &charlson_exclusion_rules(),
//! );
//! assert!(result.flag("1000", "CongestiveHeartFailure"));
//! assert!(result.flag("1000", "DiabetesComplicated"));
//! ```
//!
//! ## Features
//!
//! - `parallel` (default): visit-partitioned parallel classification via
//!   rayon ([`classify_parallel`]).
//! - `serde`: serialization for maps, records and diagnostics.

#![warn(missing_docs)]

pub mod catalog;
pub mod classify;
pub mod error;
pub mod expand;
pub mod loader;
pub mod map;
pub mod maps;
pub mod rules;

// Re-export icd-types for convenience
pub use icd_types;

pub use catalog::{CatalogBuilder, TaxonomyCatalog};
#[cfg(feature = "parallel")]
pub use classify::classify_parallel;
pub use classify::{
    classify, classify_with_index, classify_with_rules, ClassificationResult, ClassifyConfig,
    OutputMode, SkipReason, SkippedRecord, VisitCodeRecord,
};
pub use error::{ComorbidError, ComorbidResult};
pub use expand::{expand_range, expand_range_detailed, CodeRange, RangeExpansion};
pub use loader::{
    load_catalog, load_category_definitions, load_leaf_codes, LoaderConfig,
};
pub use map::{
    CategoryDefinition, CodeIndex, ComorbidityMap, MapBuild, MapBuilder, MapDiagnostic,
};
pub use rules::{ExclusionRule, ExclusionRuleSet};
