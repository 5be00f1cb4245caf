//! Short↔decimal format conversion.
//!
//! Free functions convert a single code string; [`ConversionCache`] memoizes
//! conversion by distinct input value for bulk workloads, where real-world
//! datasets repeat a small label set across millions of rows.

use std::collections::HashMap;

use crate::{CodeParseError, IcdCode, Taxonomy};

/// Converts a short-form code string to decimal form.
///
/// Idempotent with [`decimal_to_short`]: converting back yields the
/// canonical short form of the input.
///
/// # Examples
///
/// ```
/// use icd_types::{convert, Taxonomy};
///
/// assert_eq!(convert::short_to_decimal("4280", Taxonomy::Icd9).unwrap(), "428.0");
/// assert_eq!(convert::short_to_decimal("V4511", Taxonomy::Icd9).unwrap(), "V45.11");
/// assert_eq!(convert::short_to_decimal("I509", Taxonomy::Icd10).unwrap(), "I50.9");
/// ```
///
/// # Errors
/// Fails when the input does not parse under the taxonomy's short grammar.
pub fn short_to_decimal(value: &str, taxonomy: Taxonomy) -> Result<String, CodeParseError> {
    Ok(IcdCode::parse_short(value, taxonomy)?.as_decimal())
}

/// Converts a decimal-form code string to canonical short form.
///
/// Ambiguously short ICD-9 majors are zero-padded (`1.1` → `0011`).
///
/// # Errors
/// Fails when the input does not parse under the taxonomy's decimal grammar.
pub fn decimal_to_short(value: &str, taxonomy: Taxonomy) -> Result<String, CodeParseError> {
    Ok(IcdCode::parse_decimal(value, taxonomy)?.as_short().to_string())
}

/// A memoizing converter for bulk format conversion.
///
/// Each distinct input string is parsed exactly once; repeated occurrences
/// hit the cache, including repeated *invalid* values, which are cached as
/// `None` so that malformed entries keep their positions in bulk output
/// instead of being dropped.
///
/// # Examples
///
/// ```
/// use icd_types::{ConversionCache, Taxonomy};
///
/// let mut cache = ConversionCache::new(Taxonomy::Icd9);
/// let out = cache.short_to_decimal_all(["4280", "bogus", "4280"]);
/// assert_eq!(out, vec![Some("428.0".to_string()), None, Some("428.0".to_string())]);
/// assert_eq!(cache.distinct_seen(), 2);
/// ```
#[derive(Debug)]
pub struct ConversionCache {
    taxonomy: Taxonomy,
    to_decimal: HashMap<String, Option<String>>,
    to_short: HashMap<String, Option<String>>,
}

impl ConversionCache {
    /// Creates an empty cache for one taxonomy.
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy,
            to_decimal: HashMap::new(),
            to_short: HashMap::new(),
        }
    }

    /// Returns the taxonomy this cache converts under.
    pub fn taxonomy(&self) -> Taxonomy {
        self.taxonomy
    }

    /// Converts one short-form value, consulting the cache first.
    ///
    /// Returns `None` for values that do not parse; the failure itself is
    /// cached so the value is never re-parsed.
    pub fn short_to_decimal(&mut self, value: &str) -> Option<String> {
        if let Some(hit) = self.to_decimal.get(value) {
            return hit.clone();
        }
        let converted = short_to_decimal(value, self.taxonomy).ok();
        self.to_decimal.insert(value.to_string(), converted.clone());
        converted
    }

    /// Converts one decimal-form value, consulting the cache first.
    pub fn decimal_to_short(&mut self, value: &str) -> Option<String> {
        if let Some(hit) = self.to_short.get(value) {
            return hit.clone();
        }
        let converted = decimal_to_short(value, self.taxonomy).ok();
        self.to_short.insert(value.to_string(), converted.clone());
        converted
    }

    /// Bulk short→decimal conversion, one output element per input element.
    pub fn short_to_decimal_all<'a, I>(&mut self, values: I) -> Vec<Option<String>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        values.into_iter().map(|v| self.short_to_decimal(v)).collect()
    }

    /// Bulk decimal→short conversion, one output element per input element.
    pub fn decimal_to_short_all<'a, I>(&mut self, values: I) -> Vec<Option<String>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        values.into_iter().map(|v| self.decimal_to_short(v)).collect()
    }

    /// Returns the number of cache entries: distinct `(direction, value)`
    /// pairs seen so far.
    ///
    /// The two directions cache independently, so the same string converted
    /// both ways counts once per direction.
    pub fn distinct_seen(&self) -> usize {
        self.to_decimal.len() + self.to_short.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_to_decimal_round_trip() {
        for s in ["4280", "42801", "001", "V4511", "E9501", "428"] {
            let decimal = short_to_decimal(s, Taxonomy::Icd9).unwrap();
            let back = decimal_to_short(&decimal, Taxonomy::Icd9).unwrap();
            assert_eq!(back, s, "round trip failed for {}", s);
        }
    }

    #[test]
    fn test_decimal_to_short_pads() {
        assert_eq!(decimal_to_short("1.1", Taxonomy::Icd9).unwrap(), "0011");
        assert_eq!(decimal_to_short("V45.11", Taxonomy::Icd9).unwrap(), "V4511");
        assert_eq!(decimal_to_short("I50.9", Taxonomy::Icd10).unwrap(), "I509");
    }

    #[test]
    fn test_conversion_errors() {
        assert!(short_to_decimal("", Taxonomy::Icd9).is_err());
        assert!(short_to_decimal("428.0", Taxonomy::Icd9).is_err());
        assert!(decimal_to_short("42.8.0", Taxonomy::Icd9).is_err());
    }

    #[test]
    fn test_cache_memoizes_failures() {
        let mut cache = ConversionCache::new(Taxonomy::Icd9);
        assert_eq!(cache.short_to_decimal("nope"), None);
        assert_eq!(cache.short_to_decimal("nope"), None);
        assert_eq!(cache.distinct_seen(), 1);
    }

    #[test]
    fn test_distinct_seen_counts_per_direction() {
        let mut cache = ConversionCache::new(Taxonomy::Icd9);
        cache.short_to_decimal("4280");
        cache.decimal_to_short("4280");
        assert_eq!(cache.distinct_seen(), 2);
    }

    #[test]
    fn test_cache_bulk_preserves_positions() {
        let mut cache = ConversionCache::new(Taxonomy::Icd9);
        let out = cache.decimal_to_short_all(["428.0", "", "250.00", "428.0"]);
        assert_eq!(
            out,
            vec![
                Some("4280".to_string()),
                None,
                Some("25000".to_string()),
                Some("4280".to_string()),
            ]
        );
        // Three distinct inputs, parsed once each.
        assert_eq!(cache.distinct_seen(), 3);
    }
}
