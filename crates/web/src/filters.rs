//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Pluralizes "delivery" for a count.
///
/// Usage in templates: `{{ deliveries.len()|deliveries_label }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn deliveries_label(count: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let count = count.to_string();
    let noun = if count == "1" { "delivery" } else { "deliveries" };
    Ok(format!("{count} {noun}"))
}
