//! Part number and quantity input types.
//!
//! Both values arrive as free-form text from forms or the CLI. Each type has
//! two constructors:
//!
//! - `coerce` - lenient: anything that is not numeric becomes `0`
//! - `parse` - strict: rejects bad input with an [`InputError`]
//!
//! Lenient coercion is what the store applies by default; existing rows were
//! written that way.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors produced by strict input validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The value is not a number.
    #[error("{field} must be numeric")]
    NotNumeric {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The value exceeds the column width.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },
    /// The quantity has a fractional part.
    #[error("quantity must be a whole number")]
    FractionalQuantity,
    /// The quantity is below zero.
    #[error("quantity cannot be negative")]
    NegativeQuantity,
    /// The quantity does not fit the column.
    #[error("quantity must be at most {max}")]
    QuantityTooLarge {
        /// Largest accepted quantity.
        max: i32,
    },
    /// The address is empty or whitespace.
    #[error("address cannot be empty")]
    EmptyAddress,
}

/// Returns `true` if `s` reads as a decimal number.
///
/// Accepts surrounding whitespace, an optional sign, digits with at most one
/// decimal point (at least one digit overall), and an optional exponent.
/// Hex, `inf` and `nan` are not numeric.
///
/// ```
/// use delivery_tracker_core::is_numeric;
///
/// assert!(is_numeric("42"));
/// assert!(is_numeric(" -4.5e3 "));
/// assert!(is_numeric(".5"));
/// assert!(!is_numeric("abc"));
/// assert!(!is_numeric("4 2"));
/// assert!(!is_numeric(""));
/// ```
#[must_use]
pub fn is_numeric(s: &str) -> bool {
    let bytes = s.trim_matches(is_php_space).as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut digits = i - int_start;

    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let frac_start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

const fn is_php_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

// =============================================================================
// Part Number
// =============================================================================

/// A part number as stored in the `orders.part_number` column.
///
/// Always numeric text. Leading zeros and signs are kept as entered so the
/// stored value matches what the dispatcher typed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PartNumber(String);

impl PartNumber {
    /// Column width of `orders.part_number`.
    pub const MAX_LENGTH: usize = 30;

    /// Coerce arbitrary input, falling back to `0` when it is not numeric.
    ///
    /// Length is not checked here; an over-long value is rejected by the
    /// database on insert.
    #[must_use]
    pub fn coerce(s: &str) -> Self {
        if is_numeric(s) {
            Self(s.trim_matches(is_php_space).to_owned())
        } else {
            Self::zero()
        }
    }

    /// Parse a part number strictly.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not numeric or exceeds 30 characters.
    pub fn parse(s: &str) -> Result<Self, InputError> {
        if !is_numeric(s) {
            return Err(InputError::NotNumeric {
                field: "part_number",
            });
        }
        let trimmed = s.trim_matches(is_php_space);
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(InputError::TooLong {
                field: "part_number",
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The fallback part number.
    #[must_use]
    pub fn zero() -> Self {
        Self("0".to_owned())
    }

    /// Returns the part number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PartNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PartNumber {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PartNumber {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PartNumber {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// Number of parts in a delivery.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(transparent)]
pub struct Quantity(i32);

impl Quantity {
    /// Create a quantity from an integer.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Coerce arbitrary input, falling back to `0` when it is not numeric.
    ///
    /// Numeric input is cast the way an integer column would take it: the
    /// fractional part is dropped and out-of-range values saturate.
    #[must_use]
    pub fn coerce(s: &str) -> Self {
        if !is_numeric(s) {
            return Self(0);
        }
        let trimmed = s.trim_matches(is_php_space);

        if let Ok(whole) = trimmed.parse::<i64>() {
            let clamped = whole.clamp(i64::from(i32::MIN), i64::from(i32::MAX));
            return Self(i32::try_from(clamped).unwrap_or_default());
        }

        // `as` saturates at the i32 bounds and maps NaN to zero.
        #[allow(clippy::cast_possible_truncation)]
        let quantity = trimmed
            .parse::<f64>()
            .map_or(Self(0), |value| Self(value.trunc() as i32));
        quantity
    }

    /// Parse a quantity strictly: a non-negative whole number that fits the
    /// column.
    ///
    /// Whole numbers written with a decimal point or exponent (`5.0`, `1e3`)
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not numeric, is negative, exceeds
    /// `i32::MAX`, or has a fractional part.
    pub fn parse(s: &str) -> Result<Self, InputError> {
        const TOO_LARGE: InputError = InputError::QuantityTooLarge { max: i32::MAX };

        if !is_numeric(s) {
            return Err(InputError::NotNumeric { field: "quantity" });
        }
        let trimmed = s.trim_matches(is_php_space);

        if let Ok(whole) = trimmed.parse::<i64>() {
            if whole < 0 {
                return Err(InputError::NegativeQuantity);
            }
            return i32::try_from(whole).map(Self).map_err(|_| TOO_LARGE);
        }

        let value = trimmed
            .parse::<f64>()
            .map_err(|_| InputError::NotNumeric { field: "quantity" })?;
        if value < 0.0 {
            return Err(InputError::NegativeQuantity);
        }
        if value > f64::from(i32::MAX) {
            return Err(TOO_LARGE);
        }
        if value.fract() > 0.0 {
            return Err(InputError::FractionalQuantity);
        }
        // Whole and within 0..=i32::MAX here
        #[allow(clippy::cast_possible_truncation)]
        let quantity = Self(value as i32);
        Ok(quantity)
    }

    /// Get the underlying integer.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Quantity {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Quantity {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i32 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Quantity {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let v = <i32 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(v))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Quantity {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_accepts_decimal_forms() {
        for s in ["0", "42", "-5", "+5", "4.5", "4.", ".5", "1e3", "1E-3", " 12 ", "\t7\n"] {
            assert!(is_numeric(s), "{s:?} should be numeric");
        }
    }

    #[test]
    fn test_is_numeric_rejects_other_text() {
        for s in ["", " ", "abc", "xyz", "4 2", "4.5.6", ".", "-", "1e", "0x1A", "inf", "NaN", "12abc"] {
            assert!(!is_numeric(s), "{s:?} should not be numeric");
        }
    }

    #[test]
    fn test_part_number_coerce() {
        assert_eq!(PartNumber::coerce("42").as_str(), "42");
        assert_eq!(PartNumber::coerce(" 0042 ").as_str(), "0042");
        assert_eq!(PartNumber::coerce("abc").as_str(), "0");
        assert_eq!(PartNumber::coerce("").as_str(), "0");
    }

    #[test]
    fn test_part_number_parse_strict() {
        assert_eq!(PartNumber::parse("42").unwrap().as_str(), "42");
        assert_eq!(
            PartNumber::parse("abc"),
            Err(InputError::NotNumeric {
                field: "part_number"
            })
        );
        assert_eq!(
            PartNumber::parse(&"9".repeat(31)),
            Err(InputError::TooLong {
                field: "part_number",
                max: 30
            })
        );
    }

    #[test]
    fn test_quantity_coerce() {
        assert_eq!(Quantity::coerce("5").get(), 5);
        assert_eq!(Quantity::coerce("xyz").get(), 0);
        assert_eq!(Quantity::coerce("4.9").get(), 4);
        assert_eq!(Quantity::coerce("-4.9").get(), -4);
        assert_eq!(Quantity::coerce("1e3").get(), 1000);
        assert_eq!(Quantity::coerce("99999999999").get(), i32::MAX);
    }

    #[test]
    fn test_quantity_parse_strict() {
        assert_eq!(Quantity::parse(" 12 ").unwrap().get(), 12);
        assert_eq!(
            Quantity::parse("xyz"),
            Err(InputError::NotNumeric { field: "quantity" })
        );
        assert_eq!(Quantity::parse("4.5"), Err(InputError::FractionalQuantity));
        assert_eq!(Quantity::parse("-1"), Err(InputError::NegativeQuantity));
        assert_eq!(Quantity::parse("-2.5"), Err(InputError::NegativeQuantity));
    }

    #[test]
    fn test_quantity_parse_accepts_whole_decimal_and_exponent_forms() {
        assert_eq!(Quantity::parse("5.0").unwrap().get(), 5);
        assert_eq!(Quantity::parse("1e3").unwrap().get(), 1000);
        assert_eq!(Quantity::parse("+7").unwrap().get(), 7);
        assert_eq!(Quantity::parse("2147483647").unwrap().get(), i32::MAX);
    }

    #[test]
    fn test_quantity_parse_rejects_out_of_range() {
        let too_large = Err(InputError::QuantityTooLarge { max: i32::MAX });
        assert_eq!(Quantity::parse("2147483648"), too_large);
        assert_eq!(Quantity::parse("99999999999"), too_large);
        assert_eq!(Quantity::parse("99999999999999999999999"), too_large);
        assert_eq!(Quantity::parse("1e12"), too_large);
        assert_eq!(
            Quantity::parse("99999999999").unwrap_err().to_string(),
            "quantity must be at most 2147483647"
        );
    }
}
