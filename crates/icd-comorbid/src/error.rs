//! Error types for the comorbidity engine.

use icd_types::{CodeParseError, GuessError, Taxonomy};
use thiserror::Error;

/// Errors that can occur during expansion, map construction or table loading.
#[derive(Error, Debug)]
pub enum ComorbidError {
    /// I/O error reading a reference table.
    #[error("IO error reading reference table: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error in a reference table.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A code string failed to parse.
    #[error("code parse error: {0}")]
    Code(#[from] CodeParseError),

    /// Taxonomy guessing failed for an unlabeled code.
    #[error("taxonomy guess failed: {0}")]
    Guess(#[from] GuessError),

    /// Range start sorts after range end in taxonomy order.
    #[error("inverted range: '{start}' sorts after '{end}'")]
    InvertedRange {
        /// The range start, short form.
        start: String,
        /// The range end, short form.
        end: String,
    },

    /// Range endpoints belong to different code grammars.
    #[error("range endpoints '{start}' and '{end}' belong to different taxonomies")]
    TaxonomyMismatch {
        /// The range start as given.
        start: String,
        /// The range end as given.
        end: String,
    },

    /// Unknown taxonomy label in a reference table.
    #[error("unknown taxonomy label: {value}")]
    UnknownTaxonomy {
        /// The unrecognized label.
        value: String,
    },

    /// A taxonomy with no table in the catalog was asked for defined codes.
    #[error("no leaf-code table loaded for taxonomy {taxonomy}")]
    MissingCatalogTable {
        /// The taxonomy without a table.
        taxonomy: Taxonomy,
    },

    /// Invalid header in a reference table file.
    #[error("invalid header: expected column '{expected}' at position {position}, found '{found}'")]
    UnexpectedColumn {
        /// The column position.
        position: usize,
        /// Expected column name.
        expected: String,
        /// Found column name.
        found: String,
    },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },
}

/// Result type for comorbidity engine operations.
pub type ComorbidResult<T> = Result<T, ComorbidError>;
