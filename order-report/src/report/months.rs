//! Month labels for the activation pivot
//!
//! Labels look like `MARZO 2024`. The month word comes from a fixed table so
//! output never depends on the runtime locale.

use chrono::{NaiveDate, NaiveDateTime};

/// English month name (as produced by `%B`) -> report month name
pub const MONTH_NAMES: [(&str, &str); 12] = [
    ("January", "ENERO"),
    ("February", "FEBRERO"),
    ("March", "MARZO"),
    ("April", "ABRIL"),
    ("May", "MAYO"),
    ("June", "JUNIO"),
    ("July", "JULIO"),
    ("August", "AGOSTO"),
    ("September", "SEPTIEMBRE"),
    ("October", "OCTUBRE"),
    ("November", "NOVIEMBRE"),
    ("December", "DICIEMBRE"),
];

/// Translate an English month name; unknown names pass through
pub fn translate(english: &str) -> &str {
    MONTH_NAMES
        .iter()
        .find(|(en, _)| *en == english)
        .map(|(_, local)| *local)
        .unwrap_or(english)
}

/// Inverse of [`translate`]
pub fn untranslate(local: &str) -> &str {
    MONTH_NAMES
        .iter()
        .find(|(_, l)| *l == local)
        .map(|(en, _)| *en)
        .unwrap_or(local)
}

/// Month label for a datetime, e.g. `MARZO 2024`
pub fn month_label(dt: NaiveDateTime) -> String {
    let english = dt.format("%B %Y").to_string();
    if let Some((month, year)) = english.split_once(' ') {
        return format!("{} {}", translate(month), year);
    }
    english
}

/// First day of the month a label names; `None` when it cannot be read back
pub fn label_to_date(label: &str) -> Option<NaiveDate> {
    let (month, year) = label.trim().split_once(' ')?;
    let english = format!("01 {} {}", untranslate(month), year.trim());
    NaiveDate::parse_from_str(&english, "%d %B %Y").ok()
}

/// Order labels most recent first
///
/// `labels` is expected in first-seen order. Labels that cannot be parsed
/// back into a date are placed after all dated ones, keeping their
/// first-seen order.
pub fn sort_most_recent_first(labels: &mut [String]) {
    labels.sort_by(|a, b| match (label_to_date(a), label_to_date(b)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
