//! Canonical ICD code values.
//!
//! This module provides the [`IcdCode`] struct: an immutable code value in
//! canonical short form, tagged with its [`Taxonomy`]. Parsing normalizes
//! case, strips the decimal point and left-pads ICD-9 majors to their
//! canonical width, so two spellings of the same code always compare equal.

use std::cmp::Ordering;

use crate::Taxonomy;

/// Error type for code parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeParseError {
    /// The input was empty or whitespace only.
    Empty,
    /// The input does not conform to the taxonomy's code grammar.
    Malformed {
        /// The offending input value.
        value: String,
        /// The taxonomy whose grammar was applied.
        taxonomy: Taxonomy,
    },
}

impl std::fmt::Display for CodeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty code"),
            Self::Malformed { value, taxonomy } => {
                write!(f, "'{}' is not a valid {} code", value, taxonomy)
            }
        }
    }
}

impl std::error::Error for CodeParseError {}

/// Whether a code string carries a decimal point.
///
/// Short form is the storage and matching form (`4280`); decimal form is the
/// display form (`428.0`). The two are interconvertible without loss for
/// every valid code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CodeFormat {
    /// No decimal point, majors zero-padded (`4280`, `V4511`, `E9501`).
    Short,
    /// Decimal point between major and minor (`428.0`, `V45.11`, `E950.1`).
    Decimal,
}

/// The major and minor components of a code.
///
/// The major is the top-level category (`428` in `428.0`); the minor is the
/// subsidiary classification after it, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeParts {
    /// Major (category) component, canonically padded.
    pub major: String,
    /// Minor component; empty when the code is a bare major.
    pub minor: String,
}

/// An immutable ICD code in canonical short form.
///
/// # Examples
///
/// ```
/// use icd_types::{IcdCode, Taxonomy};
///
/// let chf = IcdCode::parse_decimal("428.0", Taxonomy::Icd9).unwrap();
/// assert_eq!(chf.as_short(), "4280");
/// assert_eq!(chf.as_decimal(), "428.0");
/// assert_eq!(chf.major(), "428");
/// assert_eq!(chf.minor(), "0");
///
/// // Ambiguously short ICD-9 majors are zero-padded.
/// let plague = IcdCode::parse_short("1", Taxonomy::Icd9).unwrap();
/// assert_eq!(plague.as_short(), "001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IcdCode {
    short: String,
    taxonomy: Taxonomy,
}

impl IcdCode {
    /// Parses a code in the given format.
    ///
    /// # Errors
    /// Returns [`CodeParseError`] when the input is empty or does not
    /// conform to the taxonomy's grammar.
    pub fn parse(value: &str, taxonomy: Taxonomy, format: CodeFormat) -> Result<Self, CodeParseError> {
        match format {
            CodeFormat::Short => Self::parse_short(value, taxonomy),
            CodeFormat::Decimal => Self::parse_decimal(value, taxonomy),
        }
    }

    /// Parses a short-form code (`4280`, `V4511`, `E9501`, `I509`).
    pub fn parse_short(value: &str, taxonomy: Taxonomy) -> Result<Self, CodeParseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CodeParseError::Empty);
        }
        if trimmed.contains('.') {
            return Err(malformed(value, taxonomy));
        }
        let upper = trimmed.to_ascii_uppercase();
        let (major, minor) = split_short(&upper, taxonomy).ok_or_else(|| malformed(value, taxonomy))?;
        Self::from_parts(&major, &minor, taxonomy)
    }

    /// Parses a decimal-form code (`428.0`, `V45.11`, `E950.1`, `I50.9`).
    ///
    /// A decimal-form input without a point is accepted when it is a bare
    /// major (`428`), since the canonical decimal grammar only inserts the
    /// point when a minor exists.
    pub fn parse_decimal(value: &str, taxonomy: Taxonomy) -> Result<Self, CodeParseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CodeParseError::Empty);
        }
        let upper = trimmed.to_ascii_uppercase();
        let (major, minor) = match upper.split_once('.') {
            Some((maj, min)) => (maj.to_string(), min.to_string()),
            None => (upper, String::new()),
        };
        Self::from_parts(&major, &minor, taxonomy)
    }

    /// Parses a code whose format is unknown but whose taxonomy is.
    ///
    /// Dispatches on the presence of a decimal point: `428.0` parses as
    /// decimal form, `4280` as short form. Definition tables and patient
    /// datasets mix the two freely.
    pub fn parse_lenient(value: &str, taxonomy: Taxonomy) -> Result<Self, CodeParseError> {
        if value.contains('.') {
            Self::parse_decimal(value, taxonomy)
        } else {
            Self::parse_short(value, taxonomy)
        }
    }

    /// Parses an unlabeled code, guessing the taxonomy from its syntax.
    ///
    /// # Errors
    /// Fails when the taxonomy guess is ambiguous or matches no grammar;
    /// see [`Taxonomy::guess`].
    pub fn parse_guess(value: &str) -> Result<Self, CodeParseError> {
        let taxonomy = Taxonomy::guess(value).map_err(|_| malformed(value, Taxonomy::Icd9))?;
        let trimmed = value.trim();
        if trimmed.contains('.') {
            Self::parse_decimal(trimmed, taxonomy)
        } else {
            Self::parse_short(trimmed, taxonomy)
        }
    }

    /// Builds a code from explicit major and minor components.
    ///
    /// The major is padded to canonical width for the ICD-9 family; the
    /// minor must satisfy the taxonomy's minor grammar (digits for ICD-9,
    /// alphanumerics for ICD-10, with the taxonomy's length limits).
    pub fn from_parts(major: &str, minor: &str, taxonomy: Taxonomy) -> Result<Self, CodeParseError> {
        let padded = pad_major(major, taxonomy).ok_or_else(|| malformed(major, taxonomy))?;
        if !minor_is_valid(minor, &padded, taxonomy) {
            return Err(malformed(&format!("{}.{}", major, minor), taxonomy));
        }
        let mut short = padded;
        short.push_str(&minor.to_ascii_uppercase());
        Ok(Self { short, taxonomy })
    }

    /// Returns the canonical short form.
    pub fn as_short(&self) -> &str {
        &self.short
    }

    /// Returns the decimal display form.
    ///
    /// The point is inserted only when a minor exists, so a bare major
    /// renders unchanged.
    pub fn as_decimal(&self) -> String {
        let (major, minor) = self.split();
        if minor.is_empty() {
            major.to_string()
        } else {
            format!("{}.{}", major, minor)
        }
    }

    /// Returns the taxonomy this code belongs to.
    pub fn taxonomy(&self) -> Taxonomy {
        self.taxonomy
    }

    /// Returns the major component.
    pub fn major(&self) -> &str {
        self.split().0
    }

    /// Returns the minor component (empty for a bare major).
    pub fn minor(&self) -> &str {
        self.split().1
    }

    /// Decomposes the code into owned major and minor parts.
    pub fn to_parts(&self) -> CodeParts {
        let (major, minor) = self.split();
        CodeParts {
            major: major.to_string(),
            minor: minor.to_string(),
        }
    }

    /// Returns the minor length: 0 for a bare major, up to 2 for ICD-9,
    /// up to 4 for the ICD-10 family.
    pub fn depth(&self) -> usize {
        self.split().1.len()
    }

    /// Returns the parent code one level up, or `None` for a bare major.
    ///
    /// Truncates the minor by one character: `42801` → `4280` → `428`.
    pub fn parent(&self) -> Option<IcdCode> {
        let (major, minor) = self.split();
        if minor.is_empty() {
            return None;
        }
        let mut short = String::with_capacity(self.short.len() - 1);
        short.push_str(major);
        short.push_str(&minor[..minor.len() - 1]);
        Some(Self {
            short,
            taxonomy: self.taxonomy,
        })
    }

    /// Returns true when `self` is `other` or a descendant of it.
    pub fn is_self_or_descendant_of(&self, other: &IcdCode) -> bool {
        self.taxonomy.same_family(other.taxonomy) && self.short.starts_with(&other.short)
    }

    fn split(&self) -> (&str, &str) {
        let len = major_len(&self.short, self.taxonomy);
        self.short.split_at(len.min(self.short.len()))
    }
}

impl std::fmt::Display for IcdCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.short)
    }
}

impl PartialOrd for IcdCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IcdCode {
    /// Taxonomy order: grammar family first, then major in canonical major
    /// order (ICD-9: numeric 001–999, then V00–V99, then E000–E999), then
    /// minor lexicographically. Lexicographic minors give parent-first
    /// ordering, so `4280` sorts before `42801` which sorts before `4281`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.taxonomy
            .cmp(&other.taxonomy)
            .then_with(|| {
                major_rank(self.major(), self.taxonomy)
                    .cmp(&major_rank(other.major(), other.taxonomy))
            })
            .then_with(|| self.minor().cmp(other.minor()))
    }
}

/// Ranks an ICD-9 major across the numeric/V/E boundary. ICD-10 majors rank
/// lexicographically; their leading letter never denotes a separate band.
fn major_rank(major: &str, taxonomy: Taxonomy) -> (u8, u32, [u8; 3]) {
    let bytes = major.as_bytes();
    if taxonomy.is_icd10_family() {
        let mut key = [0u8; 3];
        for (slot, &b) in key.iter_mut().zip(bytes.iter()) {
            *slot = b;
        }
        return (3, 0, key);
    }
    match bytes.first() {
        Some(b'V') => (1, major[1..].parse().unwrap_or(0), [0; 3]),
        Some(b'E') => (2, major[1..].parse().unwrap_or(0), [0; 3]),
        _ => (0, major.parse().unwrap_or(0), [0; 3]),
    }
}

fn malformed(value: &str, taxonomy: Taxonomy) -> CodeParseError {
    CodeParseError::Malformed {
        value: value.trim().to_string(),
        taxonomy,
    }
}

/// Canonical length of the major prefix within a short-form code.
///
/// ICD-9 numeric and V majors occupy three characters (`428`, `V45`), E
/// majors four (`E950`); ICD-10 majors always three.
fn major_len(short: &str, taxonomy: Taxonomy) -> usize {
    if taxonomy.is_icd9_family() && short.starts_with('E') {
        4
    } else {
        3
    }
}

/// Splits an unpadded short string into raw (major, minor) parts.
///
/// Returns `None` when the string cannot be carved up under the taxonomy's
/// grammar at all; component-level validation happens in `from_parts`.
fn split_short(upper: &str, taxonomy: Taxonomy) -> Option<(String, String)> {
    if taxonomy.is_icd10_family() {
        // Byte length and index are only meaningful on ASCII input; a
        // multi-byte character can land on the split point.
        if upper.len() < 3 || !upper.is_char_boundary(3) {
            return None;
        }
        let (major, minor) = upper.split_at(3);
        return Some((major.to_string(), minor.to_string()));
    }

    // ICD-9 family: the digit count decides where the major ends, because
    // ambiguously short inputs ("1", "V1", "E95") are all-major.
    let (prefix, digits) = match upper.as_bytes().first()? {
        b'V' => ("V", &upper[1..]),
        b'E' => ("E", &upper[1..]),
        _ => ("", upper),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let major_digits = match prefix {
        "V" => 2,
        "E" => 3,
        _ => 3,
    };
    let cut = digits.len().min(major_digits);
    Some((
        format!("{}{}", prefix, &digits[..cut]),
        digits[cut..].to_string(),
    ))
}

/// Pads a major to canonical width and validates it.
fn pad_major(major: &str, taxonomy: Taxonomy) -> Option<String> {
    let upper = major.trim().to_ascii_uppercase();
    if taxonomy.is_icd10_family() {
        let bytes = upper.as_bytes();
        if bytes.len() == 3
            && bytes[0].is_ascii_alphabetic()
            && bytes[1].is_ascii_digit()
            && bytes[2].is_ascii_digit()
        {
            return Some(upper);
        }
        return None;
    }

    let (prefix, width, digits) = match upper.as_bytes().first()? {
        b'V' => ("V", 2, &upper[1..]),
        b'E' => ("E", 3, &upper[1..]),
        _ => ("", 3, upper.as_str()),
    };
    if digits.is_empty() || digits.len() > width || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{}{:0>width$}", prefix, digits, width = width))
}

/// Validates a minor against the taxonomy's grammar and length limit.
fn minor_is_valid(minor: &str, padded_major: &str, taxonomy: Taxonomy) -> bool {
    if minor.is_empty() {
        return true;
    }
    if taxonomy.is_icd10_family() {
        return minor.len() <= 4 && minor.bytes().all(|b| b.is_ascii_alphanumeric());
    }
    // ICD-9: digits only; E codes take a single minor digit, others two.
    let max = if padded_major.starts_with('E') { 1 } else { 2 };
    minor.len() <= max && minor.bytes().all(|b| b.is_ascii_digit())
}
