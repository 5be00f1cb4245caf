//! ICD taxonomy (coding scheme) identification.
//!
//! This module provides the [`Taxonomy`] enum identifying which coding
//! scheme a code belongs to, together with syntactic version guessing for
//! unlabeled code strings.

/// Error type for taxonomy guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    /// The string matches no known ICD grammar.
    NoMatch(String),
    /// The string matches more than one grammar and no hint was given.
    Ambiguous(String),
}

impl std::fmt::Display for GuessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMatch(s) => write!(f, "'{}' matches no known ICD code grammar", s),
            Self::Ambiguous(s) => write!(
                f,
                "'{}' is valid under more than one ICD taxonomy; a taxonomy hint is required",
                s
            ),
        }
    }
}

impl std::error::Error for GuessError {}

/// Identifies the coding scheme a code value belongs to.
///
/// A code string is meaningless without its taxonomy: `4280` is congestive
/// heart failure in ICD-9 but not a valid ICD-10 code at all, while `E950`
/// parses under both grammars with different meanings. Every [`crate::IcdCode`]
/// therefore carries its taxonomy explicitly.
///
/// # Examples
///
/// ```
/// use icd_types::Taxonomy;
///
/// assert_eq!(Taxonomy::guess("4280"), Ok(Taxonomy::Icd9));
/// assert_eq!(Taxonomy::guess("I50.9"), Ok(Taxonomy::Icd10));
/// assert!(Taxonomy::guess("E950").is_err()); // valid in both
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Taxonomy {
    /// ICD-9 (WHO ninth revision).
    Icd9,
    /// ICD-9-CM (US clinical modification). Shares the ICD-9 grammar.
    Icd9Cm,
    /// ICD-10 (WHO tenth revision).
    Icd10,
    /// ICD-10-CM (US clinical modification). Shares the ICD-10 grammar.
    Icd10Cm,
}

impl Taxonomy {
    /// Returns the lowercase string form used in definition tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Icd9 => "icd9",
            Self::Icd9Cm => "icd9cm",
            Self::Icd10 => "icd10",
            Self::Icd10Cm => "icd10cm",
        }
    }

    /// Returns true for ICD-9 and ICD-9-CM.
    pub fn is_icd9_family(self) -> bool {
        matches!(self, Self::Icd9 | Self::Icd9Cm)
    }

    /// Returns true for ICD-10 and ICD-10-CM.
    pub fn is_icd10_family(self) -> bool {
        matches!(self, Self::Icd10 | Self::Icd10Cm)
    }

    /// Returns true when two taxonomies share a code grammar.
    ///
    /// A clinical modification uses the same syntactic rules as its base
    /// revision, so `Icd9` and `Icd9Cm` are grammar-compatible.
    pub fn same_family(self, other: Taxonomy) -> bool {
        (self.is_icd9_family() && other.is_icd9_family())
            || (self.is_icd10_family() && other.is_icd10_family())
    }

    /// Guesses the taxonomy of an unlabeled code string by syntax.
    ///
    /// The decimal point, if any, is ignored; only the character pattern is
    /// examined. Returns [`GuessError::Ambiguous`] when the string parses
    /// under both grammars (for example `E950` or `V45`) and
    /// [`GuessError::NoMatch`] when it parses under neither. Clinical
    /// modifications cannot be distinguished syntactically, so the base
    /// revision is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use icd_types::{GuessError, Taxonomy};
    ///
    /// assert_eq!(Taxonomy::guess("250.00"), Ok(Taxonomy::Icd9));
    /// assert_eq!(Taxonomy::guess("A04.7"), Ok(Taxonomy::Icd10));
    /// assert_eq!(
    ///     Taxonomy::guess("not a code"),
    ///     Err(GuessError::NoMatch("not a code".to_string()))
    /// );
    /// ```
    pub fn guess(code: &str) -> Result<Taxonomy, GuessError> {
        let trimmed = code.trim();
        let compact: String = trimmed.chars().filter(|&c| c != '.').collect();

        let nine = matches_icd9(&compact);
        let ten = matches_icd10(&compact);

        match (nine, ten) {
            (true, false) => Ok(Taxonomy::Icd9),
            (false, true) => Ok(Taxonomy::Icd10),
            (true, true) => Err(GuessError::Ambiguous(trimmed.to_string())),
            (false, false) => Err(GuessError::NoMatch(trimmed.to_string())),
        }
    }
}

impl std::fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Taxonomy {
    type Err = GuessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "icd9" => Ok(Self::Icd9),
            "icd9cm" | "icd9-cm" => Ok(Self::Icd9Cm),
            "icd10" => Ok(Self::Icd10),
            "icd10cm" | "icd10-cm" => Ok(Self::Icd10Cm),
            _ => Err(GuessError::NoMatch(s.to_string())),
        }
    }
}

/// ICD-9 short grammar: digits, or a `V`/`E` prefix followed by digits.
///
/// Numeric and V codes are at most 5 characters; E codes at most 5 as well
/// (`E` + three-digit major + one minor digit).
fn matches_icd9(compact: &str) -> bool {
    let mut chars = compact.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let rest: &str = &compact[first.len_utf8()..];

    match first.to_ascii_uppercase() {
        'V' => {
            !rest.is_empty()
                && rest.len() <= 4
                && rest.chars().all(|c| c.is_ascii_digit())
        }
        'E' => {
            !rest.is_empty()
                && rest.len() <= 4
                && rest.chars().all(|c| c.is_ascii_digit())
        }
        c if c.is_ascii_digit() => {
            compact.len() <= 5 && compact.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// ICD-10 short grammar: a letter, two digits, then up to four alphanumerics.
fn matches_icd10(compact: &str) -> bool {
    let bytes = compact.as_bytes();
    if bytes.len() < 3 || bytes.len() > 7 {
        return false;
    }
    bytes[0].is_ascii_alphabetic()
        && bytes[1].is_ascii_digit()
        && bytes[2].is_ascii_digit()
        && bytes[3..].iter().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_icd9_numeric() {
        assert_eq!(Taxonomy::guess("428"), Ok(Taxonomy::Icd9));
        assert_eq!(Taxonomy::guess("4280"), Ok(Taxonomy::Icd9));
        assert_eq!(Taxonomy::guess("250.00"), Ok(Taxonomy::Icd9));
        assert_eq!(Taxonomy::guess("1"), Ok(Taxonomy::Icd9));
    }

    #[test]
    fn test_guess_icd10() {
        assert_eq!(Taxonomy::guess("I50"), Ok(Taxonomy::Icd10));
        assert_eq!(Taxonomy::guess("I50.9"), Ok(Taxonomy::Icd10));
        assert_eq!(Taxonomy::guess("S72.044G"), Ok(Taxonomy::Icd10));
    }

    #[test]
    fn test_guess_ambiguous() {
        // E950 is an ICD-9 external-cause code and an ICD-10 code (E95.0).
        assert_eq!(
            Taxonomy::guess("E950"),
            Err(GuessError::Ambiguous("E950".to_string()))
        );
        // V45 is an ICD-9 V code and a valid ICD-10 major.
        assert_eq!(
            Taxonomy::guess("V45"),
            Err(GuessError::Ambiguous("V45".to_string()))
        );
    }

    #[test]
    fn test_guess_no_match() {
        assert!(matches!(Taxonomy::guess(""), Err(GuessError::NoMatch(_))));
        assert!(matches!(
            Taxonomy::guess("428000"),
            Err(GuessError::NoMatch(_))
        ));
        assert!(matches!(
            Taxonomy::guess("IX50"),
            Err(GuessError::NoMatch(_))
        ));
    }

    #[test]
    fn test_family_predicates() {
        assert!(Taxonomy::Icd9Cm.is_icd9_family());
        assert!(Taxonomy::Icd10Cm.is_icd10_family());
        assert!(Taxonomy::Icd9.same_family(Taxonomy::Icd9Cm));
        assert!(!Taxonomy::Icd9.same_family(Taxonomy::Icd10Cm));
    }

    #[test]
    fn test_from_str_round_trip() {
        for t in [
            Taxonomy::Icd9,
            Taxonomy::Icd9Cm,
            Taxonomy::Icd10,
            Taxonomy::Icd10Cm,
        ] {
            assert_eq!(t.as_str().parse::<Taxonomy>(), Ok(t));
        }
        assert!("snomed".parse::<Taxonomy>().is_err());
    }
}
