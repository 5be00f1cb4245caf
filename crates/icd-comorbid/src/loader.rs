//! Reference-table loading.
//!
//! Provides a streaming parser for tab-delimited reference tables: leaf-code
//! tables (one officially assigned code per line) and category definition
//! tables (one `(category, start, end)` range per line). Individual bad rows
//! become diagnostics rather than aborting the load, so one typo in a large
//! table does not discard the rest of it.

use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use icd_types::{IcdCode, Taxonomy};
use tracing::{debug, warn};

use crate::catalog::{CatalogBuilder, TaxonomyCatalog};
use crate::error::{ComorbidError, ComorbidResult};
use crate::expand::CodeRange;
use crate::map::CategoryDefinition;

/// Parsing options for reference tables.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Field delimiter; tables ship tab-delimited.
    pub delimiter: u8,
    /// Whether the first row is a header to validate.
    pub has_headers: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            has_headers: true,
        }
    }
}

/// Trait for rows parsed from a reference table.
pub trait TableRow: Sized {
    /// Expected leading column names, validated against the header row.
    const EXPECTED_COLUMNS: &'static [&'static str];

    /// Parses a row from a CSV record.
    fn from_record(record: &StringRecord) -> ComorbidResult<Self>;
}

/// One leaf code from a code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafCodeRow {
    /// The code in short or decimal form.
    pub code: String,
}

impl TableRow for LeafCodeRow {
    const EXPECTED_COLUMNS: &'static [&'static str] = &["code"];

    fn from_record(record: &StringRecord) -> ComorbidResult<Self> {
        let code = record.get(0).unwrap_or("").trim().to_string();
        Ok(Self { code })
    }
}

/// One category range from a definition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRangeRow {
    /// Category the range belongs to.
    pub category: String,
    /// Inclusive range start, short or decimal form.
    pub start: String,
    /// Inclusive range end.
    pub end: String,
}

impl TableRow for CategoryRangeRow {
    const EXPECTED_COLUMNS: &'static [&'static str] = &["category", "start", "end"];

    fn from_record(record: &StringRecord) -> ComorbidResult<Self> {
        Ok(Self {
            category: record.get(0).unwrap_or("").trim().to_string(),
            start: record.get(1).unwrap_or("").trim().to_string(),
            end: record.get(2).unwrap_or("").trim().to_string(),
        })
    }
}

/// A streaming reference-table parser.
///
/// Reads row-by-row so large code tables never sit in memory twice.
pub struct TableParser<R: Read, T: TableRow> {
    reader: Reader<R>,
    rows_read: usize,
    _marker: PhantomData<T>,
}

impl<T: TableRow> TableParser<BufReader<File>, T> {
    /// Opens a table file and validates its header row.
    ///
    /// # Errors
    /// Returns [`ComorbidError::FileNotFound`] when the path does not exist
    /// and [`ComorbidError::UnexpectedColumn`] when the header does not
    /// match the row type's columns.
    pub fn from_path<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> ComorbidResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ComorbidError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), config)
    }
}

impl<R: Read, T: TableRow> TableParser<R, T> {
    /// Creates a parser from any reader.
    pub fn from_reader(reader: R, config: &LoaderConfig) -> ComorbidResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(config.has_headers)
            .flexible(false)
            .from_reader(reader);

        if config.has_headers {
            Self::validate_headers(&mut csv_reader)?;
        }

        Ok(Self {
            reader: csv_reader,
            rows_read: 0,
            _marker: PhantomData,
        })
    }

    fn validate_headers(reader: &mut Reader<R>) -> ComorbidResult<()> {
        let headers = reader.headers()?;
        for (i, expected) in T::EXPECTED_COLUMNS.iter().enumerate() {
            let found = headers.get(i).unwrap_or("");
            // Tolerate a UTF-8 BOM at the start of the file.
            let found = found.trim_start_matches('\u{feff}');
            if found != *expected {
                return Err(ComorbidError::UnexpectedColumn {
                    position: i,
                    expected: (*expected).to_string(),
                    found: found.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the number of rows read so far.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }
}

impl<R: Read, T: TableRow> Iterator for TableParser<R, T> {
    type Item = ComorbidResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    self.rows_read += 1;
                    if record.is_empty() || record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }
                    return Some(T::from_record(&record));
                }
                Ok(false) => return None,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// One rejected row from a load, with its table line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDiagnostic {
    /// One-based row number, excluding the header.
    pub row: usize,
    /// What was wrong with the row.
    pub message: String,
}

/// The outcome of loading a leaf-code table.
#[derive(Debug)]
pub struct LeafCodeLoad {
    /// Codes that parsed, in table order.
    pub codes: Vec<IcdCode>,
    /// Rows that were rejected.
    pub diagnostics: Vec<LoadDiagnostic>,
}

/// Loads a taxonomy's leaf-code table.
///
/// Rows that fail to parse under the taxonomy's grammar become diagnostics;
/// I/O and malformed-CSV errors abort the load.
pub fn load_leaf_codes<P: AsRef<Path>>(
    path: P,
    taxonomy: Taxonomy,
    config: &LoaderConfig,
) -> ComorbidResult<LeafCodeLoad> {
    let parser = TableParser::<_, LeafCodeRow>::from_path(path, config)?;
    read_leaf_codes(parser, taxonomy)
}

/// Loads leaf codes from any reader, for tables not backed by a file.
pub fn load_leaf_codes_from<R: Read>(
    reader: R,
    taxonomy: Taxonomy,
    config: &LoaderConfig,
) -> ComorbidResult<LeafCodeLoad> {
    let parser = TableParser::<_, LeafCodeRow>::from_reader(reader, config)?;
    read_leaf_codes(parser, taxonomy)
}

fn read_leaf_codes<R: Read>(
    parser: TableParser<R, LeafCodeRow>,
    taxonomy: Taxonomy,
) -> ComorbidResult<LeafCodeLoad> {
    let mut codes = Vec::new();
    let mut diagnostics = Vec::new();
    for (row, result) in parser.enumerate() {
        let parsed = result?;
        match IcdCode::parse_lenient(&parsed.code, taxonomy) {
            Ok(code) => codes.push(code),
            Err(e) => {
                warn!(row = row + 1, code = %parsed.code, error = %e, "leaf code rejected");
                diagnostics.push(LoadDiagnostic {
                    row: row + 1,
                    message: e.to_string(),
                });
            }
        }
    }
    debug!(
        taxonomy = %taxonomy,
        codes = codes.len(),
        rejected = diagnostics.len(),
        "leaf-code table loaded"
    );
    Ok(LeafCodeLoad { codes, diagnostics })
}

/// Loads a leaf-code table straight into a single-taxonomy catalog.
pub fn load_catalog<P: AsRef<Path>>(
    path: P,
    taxonomy: Taxonomy,
    config: &LoaderConfig,
) -> ComorbidResult<TaxonomyCatalog> {
    let load = load_leaf_codes(path, taxonomy, config)?;
    let mut builder = CatalogBuilder::new();
    for code in load.codes {
        builder.add_code(code);
    }
    Ok(builder.build())
}

/// The outcome of loading a category definition table.
#[derive(Debug)]
pub struct DefinitionLoad {
    /// Definitions in first-appearance category order.
    pub definitions: Vec<CategoryDefinition>,
    /// Rows that were rejected.
    pub diagnostics: Vec<LoadDiagnostic>,
}

/// Loads a category definition table.
///
/// Categories keep the order of their first row. Rows whose endpoints fail
/// to parse become diagnostics and the category keeps its remaining ranges.
pub fn load_category_definitions<P: AsRef<Path>>(
    path: P,
    taxonomy: Taxonomy,
    defined: bool,
    config: &LoaderConfig,
) -> ComorbidResult<DefinitionLoad> {
    let parser = TableParser::<_, CategoryRangeRow>::from_path(path, config)?;
    read_category_definitions(parser, taxonomy, defined)
}

/// Loads category definitions from any reader.
pub fn load_category_definitions_from<R: Read>(
    reader: R,
    taxonomy: Taxonomy,
    defined: bool,
    config: &LoaderConfig,
) -> ComorbidResult<DefinitionLoad> {
    let parser = TableParser::<_, CategoryRangeRow>::from_reader(reader, config)?;
    read_category_definitions(parser, taxonomy, defined)
}

fn read_category_definitions<R: Read>(
    parser: TableParser<R, CategoryRangeRow>,
    taxonomy: Taxonomy,
    defined: bool,
) -> ComorbidResult<DefinitionLoad> {
    let mut definitions: Vec<CategoryDefinition> = Vec::new();
    let mut diagnostics = Vec::new();
    for (row, result) in parser.enumerate() {
        let parsed = result?;
        match CodeRange::new(taxonomy, &parsed.start, &parsed.end, defined) {
            Ok(range) => {
                match definitions.iter_mut().find(|d| d.name == parsed.category) {
                    Some(def) => def.ranges.push(range),
                    None => definitions.push(CategoryDefinition {
                        name: parsed.category,
                        ranges: vec![range],
                    }),
                }
            }
            Err(e) => {
                warn!(
                    row = row + 1,
                    category = %parsed.category,
                    start = %parsed.start,
                    end = %parsed.end,
                    error = %e,
                    "definition row rejected"
                );
                diagnostics.push(LoadDiagnostic {
                    row: row + 1,
                    message: e.to_string(),
                });
            }
        }
    }
    debug!(
        taxonomy = %taxonomy,
        categories = definitions.len(),
        rejected = diagnostics.len(),
        "definition table loaded"
    );
    Ok(DefinitionLoad {
        definitions,
        diagnostics,
    })
}
