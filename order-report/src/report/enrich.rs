//! Enrichment: date parsing, days-open computation, deduplication

use chrono::NaiveDate;

use super::dates::{DateParser, days_between};
use super::schema::{FieldPolicy, fields};
use super::types::{DISPLAY_DATE_FORMAT, Table, Value};

pub const POLICY: FieldPolicy = FieldPolicy {
    stage: "enrich",
    required: &[fields::CREATION_DATE, fields::SUBSCRIPTION],
    tolerated: &[fields::ACTIVATION_DATE, fields::INTERACTION],
};

/// Enrich a normalized table relative to the run date `as_of`
pub fn enrich(mut table: Table, parser: &DateParser, as_of: NaiveDate) -> Table {
    let mut unparsed_activation = 0usize;
    table.map_column(fields::ACTIVATION_DATE, |value| {
        match parser.parse(value) {
            Some(dt) => Value::Text(dt.format(DISPLAY_DATE_FORMAT).to_string()),
            None => {
                if !value.is_null() {
                    unparsed_activation += 1;
                }
                Value::Null
            }
        }
    });

    let mut unparsed_creation = 0usize;
    table.map_column(fields::CREATION_DATE, |value| match parser.parse(value) {
        Some(dt) => Value::DateTime(dt),
        None => {
            if !value.is_null() {
                unparsed_creation += 1;
            }
            Value::Null
        }
    });

    if unparsed_activation + unparsed_creation > 0 {
        log::debug!(
            "Unparseable dates treated as missing: {} creation, {} activation",
            unparsed_creation,
            unparsed_activation
        );
    }

    table.derive_column(fields::DAYS_OPEN, |row| {
        row.get(fields::CREATION_DATE)
            .as_datetime()
            .map(|created| Value::Int(days_between(created, as_of)))
            .unwrap_or(Value::Null)
    });

    let before = table.len();
    deduplicate(&mut table);
    log::debug!("Deduplicated {} rows to {}", before, table.len());

    table
}

/// Drop repeated orders, keeping the first occurrence
///
/// The key is (subscription, interaction) when the interaction column
/// exists, otherwise subscription alone.
pub fn deduplicate(table: &mut Table) {
    let with_interaction = table.has_column(fields::INTERACTION);

    table.retain_first_by(|row| {
        let subscription = row.get(fields::SUBSCRIPTION).dedup_key();
        if with_interaction {
            format!("{}\u{1f}{}", subscription, row.get(fields::INTERACTION).dedup_key())
        } else {
            subscription
        }
    });
}
