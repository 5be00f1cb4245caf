//! Code-range expansion.
//!
//! Expands a `(start, end)` pair into the ordered, deduplicated set of codes
//! it covers. Enumeration granularity follows the endpoints: with
//! `g = max(depth(start), depth(end))`, every syntactically constructible
//! code of depth at most `g` that sorts within the range (parent-first
//! taxonomy order) is produced. When `defined` is requested, the enumeration
//! is intersected with the catalog's leaf table and the defined leaf
//! descendants of every in-range code are appended, so a defined expansion
//! is a complete leaf-code set.

use icd_types::{IcdCode, Taxonomy};

use crate::catalog::TaxonomyCatalog;
use crate::error::{ComorbidError, ComorbidResult};

/// A range of codes within one taxonomy.
///
/// # Example
///
/// ```
/// use icd_comorbid::{expand_range, CodeRange, TaxonomyCatalog};
/// use icd_types::Taxonomy;
///
/// let range = CodeRange::new(Taxonomy::Icd9, "428.0", "428.9", false).unwrap();
/// let codes = expand_range(&range, &TaxonomyCatalog::empty()).unwrap();
/// let decimals: Vec<String> = codes.iter().map(|c| c.as_decimal()).collect();
/// assert_eq!(
///     decimals,
///     ["428.0", "428.1", "428.2", "428.3", "428.4",
///      "428.5", "428.6", "428.7", "428.8", "428.9"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeRange {
    /// The taxonomy both endpoints belong to.
    pub taxonomy: Taxonomy,
    /// Inclusive range start.
    pub start: IcdCode,
    /// Inclusive range end.
    pub end: IcdCode,
    /// Restrict expansion to the catalog's officially assigned codes.
    pub defined: bool,
}

impl CodeRange {
    /// Parses a range from endpoint strings in either format.
    ///
    /// # Errors
    /// Fails when an endpoint does not parse under the taxonomy's grammar.
    /// An inverted range is accepted here and surfaces when expanded, so a
    /// single bad definition is attributable to its category.
    pub fn new(taxonomy: Taxonomy, start: &str, end: &str, defined: bool) -> ComorbidResult<Self> {
        Ok(Self {
            taxonomy,
            start: IcdCode::parse_lenient(start, taxonomy)?,
            end: IcdCode::parse_lenient(end, taxonomy)?,
            defined,
        })
    }

    /// Builds a single-code range (`start == end`).
    pub fn single(taxonomy: Taxonomy, code: &str, defined: bool) -> ComorbidResult<Self> {
        Self::new(taxonomy, code, code, defined)
    }
}

/// A detailed expansion: the kept codes plus what strict validity excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeExpansion {
    /// The expanded codes, in taxonomy order, deduplicated.
    pub codes: Vec<IcdCode>,
    /// Syntactically valid in-range codes absent from the catalog's table.
    /// Empty unless the range requested `defined`.
    pub undefined: Vec<IcdCode>,
}

/// Expands a range into its ordered set of codes.
///
/// See the module documentation for the enumeration rules.
///
/// # Errors
/// - [`ComorbidError::InvertedRange`] when start sorts after end.
/// - [`ComorbidError::MissingCatalogTable`] when `defined` was requested but
///   the catalog has no table for the range's taxonomy.
pub fn expand_range(range: &CodeRange, catalog: &TaxonomyCatalog) -> ComorbidResult<Vec<IcdCode>> {
    Ok(expand_range_detailed(range, catalog)?.codes)
}

/// Expands a range, additionally reporting codes excluded by strict validity.
pub fn expand_range_detailed(
    range: &CodeRange,
    catalog: &TaxonomyCatalog,
) -> ComorbidResult<RangeExpansion> {
    if range.start > range.end {
        return Err(ComorbidError::InvertedRange {
            start: range.start.as_short().to_string(),
            end: range.end.as_short().to_string(),
        });
    }
    if range.defined && !catalog.has_table(range.taxonomy) {
        return Err(ComorbidError::MissingCatalogTable {
            taxonomy: range.taxonomy,
        });
    }

    let granularity = range.start.depth().max(range.end.depth());
    let enumerated = enumerate_in_range(range, granularity)?;

    if !range.defined {
        return Ok(RangeExpansion {
            codes: enumerated,
            undefined: Vec::new(),
        });
    }

    let mut codes = Vec::new();
    let mut undefined = Vec::new();
    for code in enumerated {
        // Defined descendants count whether or not the enumerated code is
        // itself assignable: 428.2 may be a pure heading whose leaves are
        // 428.20-428.23.
        codes.extend_from_slice(catalog.descendants_of(&code));
        if catalog.is_defined(&code) {
            codes.push(code);
        } else {
            undefined.push(code);
        }
    }
    codes.sort();
    codes.dedup();
    Ok(RangeExpansion { codes, undefined })
}

/// Enumerates codes of depth `<= granularity` within the range, in order.
fn enumerate_in_range(range: &CodeRange, granularity: usize) -> ComorbidResult<Vec<IcdCode>> {
    let taxonomy = range.taxonomy;
    let mut out = Vec::new();
    let mut minor = String::new();

    for major in MajorIter::over(range) {
        let cap = minor_cap(&major, taxonomy).min(granularity);
        push_minors(
            &mut out,
            &major,
            &mut minor,
            cap,
            taxonomy,
            &range.start,
            &range.end,
        )?;
    }
    Ok(out)
}

/// Depth-first, parent-first minor enumeration for one major.
fn push_minors(
    out: &mut Vec<IcdCode>,
    major: &str,
    minor: &mut String,
    cap: usize,
    taxonomy: Taxonomy,
    start: &IcdCode,
    end: &IcdCode,
) -> ComorbidResult<()> {
    let code = IcdCode::from_parts(major, minor, taxonomy)?;
    if code > *end {
        return Ok(());
    }
    if code >= *start {
        out.push(code);
    }
    if minor.len() < cap {
        for ch in minor_alphabet(taxonomy) {
            minor.push(ch);
            push_minors(out, major, minor, cap, taxonomy, start, end)?;
            minor.pop();
        }
    }
    Ok(())
}

/// Valid characters for a minor position, in taxonomy order.
fn minor_alphabet(taxonomy: Taxonomy) -> impl Iterator<Item = char> {
    let digits = '0'..='9';
    let letters = if taxonomy.is_icd10_family() {
        Some('A'..='Z')
    } else {
        None
    };
    digits.chain(letters.into_iter().flatten())
}

/// Grammar limit on minor length for a given major.
fn minor_cap(major: &str, taxonomy: Taxonomy) -> usize {
    if taxonomy.is_icd10_family() {
        4
    } else if major.starts_with('E') {
        1
    } else {
        2
    }
}

/// Iterates canonical majors between two endpoints, spanning the ICD-9
/// numeric/V/E boundaries when necessary.
struct MajorIter {
    taxonomy: Taxonomy,
    current: u32,
    last: u32,
}

impl MajorIter {
    fn over(range: &CodeRange) -> Self {
        Self {
            taxonomy: range.taxonomy,
            current: major_rank(range.start.major(), range.taxonomy),
            last: major_rank(range.end.major(), range.taxonomy),
        }
    }
}

impl Iterator for MajorIter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.current <= self.last {
            let rank = self.current;
            self.current += 1;
            if let Some(major) = major_from_rank(rank, self.taxonomy) {
                return Some(major);
            }
        }
        None
    }
}

/// Rank of a major on a single axis.
///
/// ICD-9: numeric 001-999 rank 1-999, V00-V99 rank 1000-1099, E000-E999
/// rank 2000-2999. ICD-10: letter band times 100 plus the two digits.
fn major_rank(major: &str, taxonomy: Taxonomy) -> u32 {
    if taxonomy.is_icd10_family() {
        let bytes = major.as_bytes();
        let letter = u32::from(bytes[0].to_ascii_uppercase() - b'A');
        let digits: u32 = major[1..].parse().unwrap_or(0);
        return letter * 100 + digits;
    }
    let digits = |s: &str| s.parse::<u32>().unwrap_or(0);
    match major.as_bytes().first() {
        Some(b'V') => 1000 + digits(&major[1..]),
        Some(b'E') => 2000 + digits(&major[1..]),
        _ => digits(major),
    }
}

/// Inverse of [`major_rank`]; `None` for gaps between rank bands.
fn major_from_rank(rank: u32, taxonomy: Taxonomy) -> Option<String> {
    if taxonomy.is_icd10_family() {
        let letter = char::from(b'A' + u8::try_from(rank / 100).ok()?);
        return Some(format!("{}{:02}", letter, rank % 100));
    }
    match rank {
        1..=999 => Some(format!("{:03}", rank)),
        1000..=1099 => Some(format!("V{:02}", rank - 1000)),
        2000..=2999 => Some(format!("E{:03}", rank - 2000)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogBuilder;

    fn shorts(codes: &[IcdCode]) -> Vec<&str> {
        codes.iter().map(IcdCode::as_short).collect()
    }

    #[test]
    fn test_expand_single_major_minor_range() {
        let range = CodeRange::new(Taxonomy::Icd9, "428.0", "428.9", false).unwrap();
        let codes = expand_range(&range, &TaxonomyCatalog::empty()).unwrap();
        let expected: Vec<String> = (0..=9).map(|d| format!("428{}", d)).collect();
        assert_eq!(shorts(&codes), expected);
    }

    #[test]
    fn test_expand_major_only_range() {
        let range = CodeRange::new(Taxonomy::Icd9, "401", "405", false).unwrap();
        let codes = expand_range(&range, &TaxonomyCatalog::empty()).unwrap();
        assert_eq!(shorts(&codes), ["401", "402", "403", "404", "405"]);
    }

    #[test]
    fn test_expand_includes_interior_majors() {
        let range = CodeRange::new(Taxonomy::Icd9, "428.8", "429.1", false).unwrap();
        let codes = expand_range(&range, &TaxonomyCatalog::empty()).unwrap();
        assert_eq!(shorts(&codes), ["4288", "4289", "429", "4290", "4291"]);
    }

    #[test]
    fn test_expand_spans_numeric_to_v_boundary() {
        let range = CodeRange::new(Taxonomy::Icd9, "998", "V01", false).unwrap();
        let codes = expand_range(&range, &TaxonomyCatalog::empty()).unwrap();
        assert_eq!(shorts(&codes), ["998", "999", "V00", "V01"]);
    }

    #[test]
    fn test_expand_spans_v_to_e_boundary() {
        let range = CodeRange::new(Taxonomy::Icd9, "V99", "E001", false).unwrap();
        let codes = expand_range(&range, &TaxonomyCatalog::empty()).unwrap();
        assert_eq!(shorts(&codes), ["V99", "E000", "E001"]);
    }

    #[test]
    fn test_expand_e_codes_single_minor_digit() {
        let range = CodeRange::new(Taxonomy::Icd9, "E950.0", "E950.9", false).unwrap();
        let codes = expand_range(&range, &TaxonomyCatalog::empty()).unwrap();
        let expected: Vec<String> = (0..=9).map(|d| format!("E950{}", d)).collect();
        assert_eq!(shorts(&codes), expected);
    }

    #[test]
    fn test_expand_icd10_digit_minors() {
        let range = CodeRange::new(Taxonomy::Icd10, "I50.1", "I50.9", false).unwrap();
        let codes = expand_range(&range, &TaxonomyCatalog::empty()).unwrap();
        let expected: Vec<String> = (1..=9).map(|d| format!("I50{}", d)).collect();
        assert_eq!(shorts(&codes), expected);
    }

    #[test]
    fn test_expand_icd10_across_majors() {
        let range = CodeRange::new(Taxonomy::Icd10, "K70", "K72", false).unwrap();
        let codes = expand_range(&range, &TaxonomyCatalog::empty()).unwrap();
        assert_eq!(shorts(&codes), ["K70", "K71", "K72"]);
    }

    #[test]
    fn test_inverted_range_is_an_error() {
        let range = CodeRange::new(Taxonomy::Icd9, "500", "100", false).unwrap();
        let err = expand_range(&range, &TaxonomyCatalog::empty()).unwrap_err();
        assert!(matches!(err, ComorbidError::InvertedRange { .. }));
    }

    #[test]
    fn test_defined_expansion_intersects_and_descends() {
        let mut builder = CatalogBuilder::new();
        builder
            .add_short_codes(
                Taxonomy::Icd9,
                ["4280", "4281", "42820", "42821", "4289"],
            )
            .unwrap();
        let catalog = builder.build();

        let range = CodeRange::new(Taxonomy::Icd9, "428.0", "428.9", true).unwrap();
        let expansion = expand_range_detailed(&range, &catalog).unwrap();

        // 428.2 is a heading: not itself defined, but its leaves are kept.
        assert_eq!(
            shorts(&expansion.codes),
            ["4280", "4281", "42820", "42821", "4289"]
        );
        let undefined: Vec<&str> = expansion.undefined.iter().map(IcdCode::as_short).collect();
        assert!(undefined.contains(&"4282"));
        assert!(undefined.contains(&"4283"));
        assert_eq!(undefined.len(), 7);
    }

    #[test]
    fn test_defined_expansion_without_table_errors() {
        let range = CodeRange::new(Taxonomy::Icd10Cm, "I50", "I51", true).unwrap();
        let err = expand_range(&range, &TaxonomyCatalog::empty()).unwrap_err();
        assert!(matches!(err, ComorbidError::MissingCatalogTable { .. }));
    }

    #[test]
    fn test_defined_major_with_no_children_is_kept_when_leaf_valid() {
        let mut builder = CatalogBuilder::new();
        builder.add_short_codes(Taxonomy::Icd9, ["429"]).unwrap();
        let catalog = builder.build();

        let range = CodeRange::new(Taxonomy::Icd9, "428", "430", true).unwrap();
        let codes = expand_range(&range, &catalog).unwrap();
        assert_eq!(shorts(&codes), ["429"]);
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let range = CodeRange::new(Taxonomy::Icd9, "250.00", "250.33", false).unwrap();
        let first = expand_range(&range, &TaxonomyCatalog::empty()).unwrap();
        let second = expand_range(&range, &TaxonomyCatalog::empty()).unwrap();
        assert_eq!(first, second);
        assert!(first.windows(2).all(|w| w[0] < w[1]), "output must be sorted unique");
    }

    #[test]
    fn test_mixed_depth_endpoints() {
        let range = CodeRange::new(Taxonomy::Icd9, "4280", "428.11", false).unwrap();
        let codes = expand_range(&range, &TaxonomyCatalog::empty()).unwrap();
        assert_eq!(
            shorts(&codes),
            ["4280", "42800", "42801", "42802", "42803", "42804", "42805",
             "42806", "42807", "42808", "42809", "4281", "42810", "42811"]
        );
    }
}
