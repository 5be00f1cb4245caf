//! # icd-types
//!
//! Type definitions for ICD-9 and ICD-10 family diagnosis/procedure codes.
//!
//! This crate provides the canonical code representation shared by the
//! comorbidity engine: a code value in short form, tagged with its taxonomy,
//! plus bidirectional short↔decimal format conversion.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use icd_types::{CodeFormat, IcdCode, Taxonomy};
//!
//! // Parse a decimal-form ICD-9 code; storage is canonical short form.
//! let chf = IcdCode::parse("428.0", Taxonomy::Icd9, CodeFormat::Decimal).unwrap();
//! assert_eq!(chf.as_short(), "4280");
//! assert_eq!(chf.as_decimal(), "428.0");
//!
//! // Taxonomy can be guessed from syntax when unambiguous.
//! assert_eq!(Taxonomy::guess("I50.9"), Ok(Taxonomy::Icd10));
//! ```
//!
//! ## Without Serde
//!
//! To use this crate without serde (zero dependencies):
//!
//! ```toml
//! [dependencies]
//! icd-types = { version = "0.1", default-features = false }
//! ```

#![warn(missing_docs)]

mod code;
pub mod convert;
mod taxonomy;

// Re-export all public types at crate root
pub use code::{CodeFormat, CodeParseError, CodeParts, IcdCode};
pub use convert::ConversionCache;
pub use taxonomy::{GuessError, Taxonomy};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_exported() {
        let _format = CodeFormat::Short;
        let _taxonomy = Taxonomy::Icd9Cm;
        let _cache = ConversionCache::new(Taxonomy::Icd10);
        let code = IcdCode::parse_short("4280", Taxonomy::Icd9).unwrap();
        let _parts: CodeParts = code.to_parts();
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let code = IcdCode::parse_short("E9501", Taxonomy::Icd9Cm).unwrap();
        let json = serde_json::to_string(&code).unwrap();
        let parsed: IcdCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, parsed);
    }
}
