//! Taxonomy reference-table catalog.
//!
//! A [`TaxonomyCatalog`] holds the officially assigned leaf codes for each
//! taxonomy edition, loaded once at process start and read-only thereafter.
//! It replaces any notion of process-global cached tables: callers construct
//! it explicitly and thread it through expansion and map building, so
//! repeated builds from identical inputs are verifiably deterministic and
//! many classifications can share one catalog across threads.

use std::collections::BTreeMap;

use icd_types::{IcdCode, Taxonomy};

use crate::error::ComorbidResult;

/// Immutable per-taxonomy tables of defined leaf codes.
///
/// Tables are stored sorted in taxonomy order and deduplicated, which makes
/// definedness checks a binary search and descendant queries a contiguous
/// slice scan (parent-first ordering puts every descendant of a code
/// directly after it).
///
/// # Example
///
/// ```
/// use icd_comorbid::CatalogBuilder;
/// use icd_types::{IcdCode, Taxonomy};
///
/// let mut builder = CatalogBuilder::new();
/// builder.add_short_codes(Taxonomy::Icd9, ["4280", "42820", "42821"]).unwrap();
/// let catalog = builder.build();
///
/// let chf = IcdCode::parse_short("4280", Taxonomy::Icd9).unwrap();
/// assert!(catalog.is_defined(&chf));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyCatalog {
    tables: BTreeMap<Taxonomy, Vec<IcdCode>>,
}

impl TaxonomyCatalog {
    /// Creates a catalog with no tables.
    ///
    /// Expansion with `defined = false` never consults the catalog, so an
    /// empty catalog is sufficient for purely syntactic work.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true when the code is present in its taxonomy's table.
    pub fn is_defined(&self, code: &IcdCode) -> bool {
        self.tables
            .get(&code.taxonomy())
            .is_some_and(|table| table.binary_search(code).is_ok())
    }

    /// Returns the defined descendants of a code, excluding the code itself.
    ///
    /// The result is in taxonomy order. Returns an empty slice when the
    /// taxonomy has no table or the code has no defined children.
    pub fn descendants_of(&self, code: &IcdCode) -> &[IcdCode] {
        let Some(table) = self.tables.get(&code.taxonomy()) else {
            return &[];
        };
        let lo = table.partition_point(|c| c <= code);
        let mut hi = lo;
        while hi < table.len() && table[hi].is_self_or_descendant_of(code) {
            hi += 1;
        }
        &table[lo..hi]
    }

    /// Returns true when a leaf-code table has been loaded for the taxonomy.
    pub fn has_table(&self, taxonomy: Taxonomy) -> bool {
        self.tables.contains_key(&taxonomy)
    }

    /// Returns the number of leaf codes loaded for a taxonomy.
    pub fn leaf_count(&self, taxonomy: Taxonomy) -> usize {
        self.tables.get(&taxonomy).map_or(0, Vec::len)
    }

    /// Returns the taxonomies with loaded tables.
    pub fn taxonomies(&self) -> impl Iterator<Item = Taxonomy> + '_ {
        self.tables.keys().copied()
    }

    /// Returns the full sorted leaf table for a taxonomy, if loaded.
    pub fn leaf_codes(&self, taxonomy: Taxonomy) -> Option<&[IcdCode]> {
        self.tables.get(&taxonomy).map(Vec::as_slice)
    }
}

/// Accumulates leaf codes, then freezes them into a [`TaxonomyCatalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    tables: BTreeMap<Taxonomy, Vec<IcdCode>>,
}

impl CatalogBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single already-parsed code.
    pub fn add_code(&mut self, code: IcdCode) -> &mut Self {
        self.tables.entry(code.taxonomy()).or_default().push(code);
        self
    }

    /// Parses and adds short-form codes for one taxonomy.
    ///
    /// # Errors
    /// Fails on the first code that does not parse; reference tables are
    /// expected to be clean, unlike patient data.
    pub fn add_short_codes<'a, I>(&mut self, taxonomy: Taxonomy, codes: I) -> ComorbidResult<&mut Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let table = self.tables.entry(taxonomy).or_default();
        for raw in codes {
            table.push(IcdCode::parse_short(raw, taxonomy)?);
        }
        Ok(self)
    }

    /// Sorts, deduplicates and freezes the tables.
    pub fn build(mut self) -> TaxonomyCatalog {
        for table in self.tables.values_mut() {
            table.sort();
            table.dedup();
        }
        TaxonomyCatalog {
            tables: self.tables,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TaxonomyCatalog {
        let mut builder = CatalogBuilder::new();
        builder
            .add_short_codes(
                Taxonomy::Icd9,
                ["4280", "4281", "42820", "42821", "4289", "4290", "V4511"],
            )
            .unwrap();
        builder
            .add_short_codes(Taxonomy::Icd10, ["I509", "I5020", "I5021"])
            .unwrap();
        builder.build()
    }

    fn icd9(s: &str) -> IcdCode {
        IcdCode::parse_short(s, Taxonomy::Icd9).unwrap()
    }

    #[test]
    fn test_is_defined() {
        let catalog = catalog();
        assert!(catalog.is_defined(&icd9("4280")));
        assert!(catalog.is_defined(&icd9("V4511")));
        assert!(!catalog.is_defined(&icd9("4282")));
        assert!(!catalog.is_defined(&IcdCode::parse_short("4280", Taxonomy::Icd9Cm).unwrap()));
    }

    #[test]
    fn test_descendants_are_contiguous() {
        let catalog = catalog();
        let kids: Vec<&str> = catalog
            .descendants_of(&icd9("428"))
            .iter()
            .map(IcdCode::as_short)
            .collect();
        assert_eq!(kids, ["4280", "4281", "42820", "42821", "4289"]);

        let none = catalog.descendants_of(&icd9("430"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_descendants_exclude_self() {
        let catalog = catalog();
        let kids: Vec<&str> = catalog
            .descendants_of(&icd9("4282"))
            .iter()
            .map(IcdCode::as_short)
            .collect();
        assert_eq!(kids, ["42820", "42821"]);
        assert!(catalog.descendants_of(&icd9("42821")).is_empty());
    }

    #[test]
    fn test_build_dedups() {
        let mut builder = CatalogBuilder::new();
        builder
            .add_short_codes(Taxonomy::Icd9, ["4280", "4280"])
            .unwrap();
        builder.add_code(icd9("4280"));
        let catalog = builder.build();
        assert_eq!(catalog.leaf_count(Taxonomy::Icd9), 1);
    }

    #[test]
    fn test_tables_are_per_taxonomy() {
        let catalog = catalog();
        assert_eq!(catalog.leaf_count(Taxonomy::Icd9), 7);
        assert_eq!(catalog.leaf_count(Taxonomy::Icd10), 3);
        assert_eq!(catalog.leaf_count(Taxonomy::Icd9Cm), 0);
        assert!(!catalog.has_table(Taxonomy::Icd10Cm));
        let taxonomies: Vec<Taxonomy> = catalog.taxonomies().collect();
        assert_eq!(taxonomies, [Taxonomy::Icd9, Taxonomy::Icd10]);
    }
}
