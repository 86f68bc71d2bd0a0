//! Brazilian taxpayer identifiers (CPF).
//!
//! A CPF is eleven decimal digits where the last two are check digits derived
//! from the first nine. Callers may submit the identifier formatted
//! (`123.456.789-09`) or bare (`12345678909`); punctuation and spaces are
//! ignored before validation, but numerals outside ASCII (`²`, `٥`) make the
//! input invalid rather than silently disappearing.
//!
//! Validation is split into two steps: [`parse_digits`] extracts exactly
//! eleven digits (or nothing), and [`CpfDigits::has_valid_check_digits`]
//! reduces those digits to a yes/no answer. [`is_valid_cpf`] chains both.

use std::fmt;

use thiserror::Error;

/// Number of digits in a CPF once punctuation is removed.
pub const CPF_LENGTH: usize = 11;

/// Eleven CPF digits, each in `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CpfDigits([u8; CPF_LENGTH]);

/// Extract the digits of a CPF, ignoring separators.
///
/// Returns `None` unless exactly [`CPF_LENGTH`] ASCII digits are present, or
/// if any other numeric character (superscripts, fractions, non-Latin
/// digits) appears.
///
/// # Examples
/// ```
/// use assim_backend::domain::cpf::parse_digits;
///
/// assert!(parse_digits("529.982.247-25").is_some());
/// assert!(parse_digits("5299822472").is_none());
/// assert!(parse_digits("529.982.247-25\u{00B2}").is_none());
/// ```
pub fn parse_digits(input: &str) -> Option<CpfDigits> {
    let mut digits = [0_u8; CPF_LENGTH];
    let mut count = 0_usize;

    for ch in input.chars() {
        if !ch.is_numeric() {
            continue;
        }
        let value = ch.to_digit(10).filter(|_| ch.is_ascii_digit())?;
        // A twelfth digit has no slot and rejects the input.
        let slot = digits.get_mut(count)?;
        *slot = u8::try_from(value).ok()?;
        count += 1;
    }

    (count == CPF_LENGTH).then_some(CpfDigits(digits))
}

/// Compute the check digit that follows `body`.
///
/// The weight of the first digit is `body.len() + 1` and decreases by one per
/// position, so a nine-digit body yields the first check digit and a ten-digit
/// body the second.
fn check_digit(body: &[u8]) -> u8 {
    let weight = u32::try_from(body.len()).unwrap_or(u32::MAX).saturating_add(1);
    let sum: u32 = body
        .iter()
        .zip((0..weight).rev())
        .map(|(digit, factor)| u32::from(*digit) * (factor + 1))
        .sum();
    let remainder = (sum * 10) % 11;
    u8::try_from(remainder).ok().filter(|value| *value < 10).unwrap_or(0)
}

impl CpfDigits {
    /// Whether all eleven digits are the same (`000.000.000-00`, `111...`).
    pub fn is_repeated_sequence(&self) -> bool {
        let [first, rest @ ..] = &self.0;
        rest.iter().all(|digit| digit == first)
    }

    /// Whether both check digits match the digits preceding them and the
    /// sequence is not a single repeated digit.
    pub fn has_valid_check_digits(&self) -> bool {
        if self.is_repeated_sequence() {
            return false;
        }
        let [body @ .., first_check, second_check] = &self.0;
        let (with_first_check, _) = self.0.split_at(CPF_LENGTH - 1);
        check_digit(body) == *first_check && check_digit(with_first_check) == *second_check
    }

    /// Borrow the digits as numeric values.
    pub fn as_array(&self) -> &[u8; CPF_LENGTH] {
        &self.0
    }
}

impl fmt::Display for CpfDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .iter()
            .try_for_each(|digit| write!(f, "{digit}"))
    }
}

/// Decide whether `input` is a structurally valid CPF with correct check
/// digits.
///
/// Never fails: empty, short, long, repeated, or mistyped input is simply
/// `false`.
///
/// # Examples
/// ```
/// use assim_backend::domain::cpf::is_valid_cpf;
///
/// assert!(is_valid_cpf("529.982.247-25"));
/// assert!(!is_valid_cpf("529.982.247-26"));
/// assert!(!is_valid_cpf("000.000.000-00"));
/// ```
pub fn is_valid_cpf(input: &str) -> bool {
    if input.is_empty() {
        return false;
    }
    parse_digits(input).is_some_and(|digits| digits.has_valid_check_digits())
}

/// [`is_valid_cpf`] for input that may be absent; `None` is never valid.
pub fn is_valid_optional_cpf(input: Option<&str>) -> bool {
    input.is_some_and(is_valid_cpf)
}

/// Reasons a CPF was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpfValidationError {
    /// Nothing but whitespace was supplied.
    #[error("CPF must not be empty")]
    Empty,
    /// Wrong length, repeated digits, or mismatched check digits.
    #[error("CPF is invalid")]
    Invalid,
}

/// A CPF that passed validation.
///
/// Keeps the caller's formatting (trimmed) alongside the parsed digits so
/// stored values match what was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cpf {
    raw: String,
    digits: CpfDigits,
}

impl Cpf {
    /// Validate and construct a CPF.
    ///
    /// # Examples
    /// ```
    /// use assim_backend::domain::cpf::{Cpf, CpfValidationError};
    ///
    /// let cpf = Cpf::new(" 529.982.247-25 ").expect("valid CPF");
    /// assert_eq!(cpf.as_str(), "529.982.247-25");
    /// assert_eq!(cpf.digits().to_string(), "52998224725");
    /// assert_eq!(Cpf::new("   "), Err(CpfValidationError::Empty));
    /// ```
    pub fn new(value: impl AsRef<str>) -> Result<Self, CpfValidationError> {
        let raw = value.as_ref().trim();
        if raw.is_empty() {
            return Err(CpfValidationError::Empty);
        }
        let digits = parse_digits(raw)
            .filter(CpfDigits::has_valid_check_digits)
            .ok_or(CpfValidationError::Invalid)?;
        Ok(Self {
            raw: raw.to_owned(),
            digits,
        })
    }

    /// The submitted text, trimmed.
    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }

    /// The eleven parsed digits.
    pub fn digits(&self) -> CpfDigits {
        self.digits
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
