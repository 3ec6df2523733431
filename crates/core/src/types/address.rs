//! Delivery address type.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::input::InputError;

/// Escape markup-significant characters.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with their HTML entities. Other
/// characters, including non-ASCII text, pass through unchanged.
///
/// ```
/// use delivery_tracker_core::escape_markup;
///
/// assert_eq!(escape_markup("<b>Main St</b>"), "&lt;b&gt;Main St&lt;/b&gt;");
/// assert_eq!(escape_markup("O'Hare & Co"), "O&#039;Hare &amp; Co");
/// ```
#[must_use]
pub fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// A delivery destination, held in escaped form.
///
/// Addresses are escaped once, on the way into the store, and are safe to
/// emit into HTML verbatim afterwards. Never escape an `Address` again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Column width of `orders.address`.
    pub const MAX_LENGTH: usize = 250;

    /// Escape raw input for storage.
    #[must_use]
    pub fn escape(raw: &str) -> Self {
        Self(escape_markup(raw))
    }

    /// Escape raw input and check it against the column constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank or the escaped text exceeds
    /// 250 characters.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        if raw.trim().is_empty() {
            return Err(InputError::EmptyAddress);
        }
        let escaped = escape_markup(raw);
        if escaped.chars().count() > Self::MAX_LENGTH {
            return Err(InputError::TooLong {
                field: "address",
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(escaped))
    }

    /// Wrap text read back from the database. It is already escaped.
    #[must_use]
    pub const fn from_stored(escaped: String) -> Self {
        Self(escaped)
    }

    /// Returns the escaped address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Address {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Address {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::from_stored(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Address {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
