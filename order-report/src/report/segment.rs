//! Report views derived from the enriched order table

use super::schema::{DEACTIVATION_COLUMNS, FieldPolicy, category, fields, status};
use super::types::{DISPLAY_DATE_FORMAT, Row, Table, Value};

pub const POLICY: FieldPolicy = FieldPolicy {
    stage: "segment",
    required: &[fields::STATUS, fields::CATEGORY],
    tolerated: &[
        fields::ACTIVATION_DATE,
        fields::OFFER,
        fields::RESPONSIBLE,
        fields::CUSTOMER_NAME,
        fields::INTERACTION,
        fields::COMMERCIAL_MODEL,
    ],
};

/// The four tabular views of the report
#[derive(Debug, Clone)]
pub struct Segments {
    pub all: Table,
    pub open: Table,
    pub top_open: Table,
    pub deactivations: Table,
}

/// Split the enriched table into report views
///
/// `top_open_limit` caps the in-progress view (20 in the standard report).
pub fn segment(enriched: Table, top_open_limit: usize) -> Segments {
    let open = open_orders(&enriched);
    let top_open = top_open_in_progress(&open, top_open_limit);
    let deactivations = open_deactivations(&enriched);

    log::debug!(
        "Segments: {} total, {} open, {} top in-progress, {} open deactivations",
        enriched.len(),
        open.len(),
        top_open.len(),
        deactivations.len()
    );

    Segments {
        all: enriched,
        open,
        top_open,
        deactivations,
    }
}

fn is_completed(row: &Row<'_>) -> bool {
    row.get(fields::STATUS).is_text(status::COMPLETED)
}

fn is_deactivation(row: &Row<'_>) -> bool {
    row.get(fields::CATEGORY).is_text(category::DEACTIVATION)
}

/// Orders whose status is anything but `Completed` (missing status included)
pub fn open_orders(table: &Table) -> Table {
    table.filter(|row| !is_completed(&row))
}

/// Oldest in-progress, non-deactivation orders
///
/// Sorted by days open descending (stable, missing last) and cut to `limit`.
/// The creation date becomes display text and the activation date is dropped.
pub fn top_open_in_progress(open: &Table, limit: usize) -> Table {
    let mut top = open.filter(|row| {
        row.get(fields::STATUS).is_text(status::IN_PROGRESS) && !is_deactivation(&row)
    });

    top.sort_desc_nulls_last(fields::DAYS_OPEN);
    top.truncate(limit);

    top.map_column(fields::CREATION_DATE, |value| match value {
        Value::DateTime(dt) => Value::Text(dt.format(DISPLAY_DATE_FORMAT).to_string()),
        _ => Value::Null,
    });
    top.drop_columns(&[fields::ACTIVATION_DATE]);

    top
}

/// Deactivation orders not yet completed, reduced to the fields ops needs
pub fn open_deactivations(table: &Table) -> Table {
    let mut deactivations = table
        .filter(|row| is_deactivation(&row) && !is_completed(&row))
        .select(DEACTIVATION_COLUMNS);

    deactivations.sort_desc_nulls_last(fields::DAYS_OPEN);
    deactivations
}
