//! Header normalization: trim, rename to the canonical schema, drop noise columns

use std::collections::HashSet;

use super::schema::{DROPPED_COLUMNS, canonical_name};
use super::types::Table;

/// Normalize a raw input table to canonical column names
///
/// Idempotent: canonical names map to themselves and are never dropped.
pub fn normalize(mut table: Table) -> Table {
    let originals: Vec<String> = table.columns().to_vec();
    let mut seen = HashSet::new();
    let mut keep = Vec::with_capacity(originals.len());

    for (idx, original) in originals.iter().enumerate() {
        let trimmed = original.trim_start_matches('\u{feff}').trim();
        let name = canonical_name(trimmed).to_string();

        if !seen.insert(name.clone()) {
            log::warn!(
                "Column '{}' (position {}) duplicates '{}' after normalization; keeping the first",
                original,
                idx + 1,
                name
            );
            keep.push(false);
            continue;
        }

        if *original != name {
            table.rename_column_at(idx, &name);
        }
        keep.push(true);
    }

    table.retain_columns(&keep);
    table.drop_columns(DROPPED_COLUMNS);

    log::debug!(
        "Normalized {} input columns to {}",
        originals.len(),
        table.columns().len()
    );

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::schema::fields;
    use crate::report::types::Value;

    fn raw_table() -> Table {
        let mut table = Table::new([
            " Order Status ",
            "Order ID",
            "Subscription",
            "Custom Column",
            "Monto",
            "Fecha Activación",
        ]);
        table.push_row(vec![
            "Completed".into(),
            Value::Int(1),
            "SUB-1".into(),
            "x".into(),
            Value::Float(9.5),
            "2024-03-01".into(),
        ]);
        table
    }

    #[test]
    fn test_normalize_renames_and_drops() {
        let table = normalize(raw_table());

        assert_eq!(
            table.columns().to_vec(),
            vec![
                fields::STATUS.to_string(),
                fields::SUBSCRIPTION.to_string(),
                "Custom Column".to_string(),
                fields::ACTIVATION_DATE.to_string(),
            ]
        );
        assert_eq!(table.get(0, fields::STATUS), &Value::from("Completed"));
        assert_eq!(table.get(0, "Custom Column"), &Value::from("x"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(raw_table());
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_duplicate_headers_keep_first() {
        let mut table = Table::new(["Order Status", "ESTADO"]);
        table.push_row(vec!["InProgress".into(), "Completed".into()]);

        let table = normalize(table);

        assert_eq!(table.columns().to_vec(), vec![fields::STATUS.to_string()]);
        assert_eq!(table.get(0, fields::STATUS), &Value::from("InProgress"));
    }

    #[test]
    fn test_bom_is_stripped_from_first_header() {
        let table = normalize(Table::new(["\u{feff}Order Status", "Main Offer"]));
        assert!(table.has_column(fields::STATUS));
        assert!(table.has_column(fields::OFFER));
    }
}
