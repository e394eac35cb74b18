//! Order report pipeline
//!
//! Normalize → enrich → segment → aggregate, turning one raw export table
//! into the five ordered sheets of the general report. Pure transformation:
//! reading the export and writing the workbook live in `source` and `sink`.

pub mod aggregate;
pub mod dates;
pub mod enrich;
pub mod error;
pub mod months;
pub mod normalize;
pub mod schema;
pub mod segment;
pub mod types;

use chrono::NaiveDate;

pub use aggregate::{AggregateOptions, MonthBlock};
pub use dates::DateParser;
pub use error::ReportError;
pub use types::{Table, Value};

/// Sheet names, in workbook order
pub mod sheet_names {
    pub const ALL_ORDERS: &str = "All Orders";
    pub const OPEN_ORDERS: &str = "Open Orders";
    pub const TOP_OPEN: &str = "Top 20 + Open";
    pub const DEACTIVATIONS: &str = "Deactivations";
    pub const ACTIVATIONS: &str = "Activations by Model";
}

/// Knobs for one report run
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Reference date for days-open and the output file name
    pub as_of: NaiveDate,
    pub top_open_limit: usize,
    pub day_first: bool,
    pub aggregate: AggregateOptions,
}

#[cfg(test)]
impl ReportOptions {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            top_open_limit: 20,
            day_first: false,
            aggregate: AggregateOptions::default(),
        }
    }
}

/// Content of one output sheet
#[derive(Debug, Clone, PartialEq)]
pub enum SheetContent {
    /// A single table starting at the first row
    Table(Table),
    /// Titled tables at fixed row offsets
    Blocks(Vec<MonthBlock>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: &'static str,
    pub content: SheetContent,
}

/// The complete report, sheets in output order
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub as_of: NaiveDate,
    pub sheets: Vec<Sheet>,
}

#[cfg(test)]
impl Report {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Table content of a sheet, `None` for block sheets or unknown names
    pub fn table(&self, name: &str) -> Option<&Table> {
        match &self.sheet(name)?.content {
            SheetContent::Table(table) => Some(table),
            SheetContent::Blocks(_) => None,
        }
    }

    pub fn blocks(&self, name: &str) -> Option<&[MonthBlock]> {
        match &self.sheet(name)?.content {
            SheetContent::Blocks(blocks) => Some(blocks),
            SheetContent::Table(_) => None,
        }
    }
}

/// Field policies of every stage, checked before any stage runs
pub const STAGE_POLICIES: &[schema::FieldPolicy] =
    &[enrich::POLICY, segment::POLICY, aggregate::POLICY];

/// Run the whole pipeline over a raw export table
pub fn build_report(raw: Table, options: &ReportOptions) -> Result<Report, ReportError> {
    if raw.columns().is_empty() {
        return Err(ReportError::EmptyInput);
    }

    let normalized = normalize::normalize(raw);
    schema::validate(&normalized, STAGE_POLICIES)?;

    let parser = DateParser::new(options.day_first);
    let enriched = enrich::enrich(normalized, &parser, options.as_of);

    // Aggregation reads the enriched table, whose creation dates are already typed
    let blocks = aggregate::activation_blocks(&enriched, &parser, &options.aggregate);
    let segments = segment::segment(enriched, options.top_open_limit);

    log::info!(
        "Report for {}: {} orders, {} open, {} open deactivations, {} activation months",
        options.as_of,
        segments.all.len(),
        segments.open.len(),
        segments.deactivations.len(),
        blocks.len()
    );

    Ok(Report {
        as_of: options.as_of,
        sheets: vec![
            Sheet {
                name: sheet_names::ALL_ORDERS,
                content: SheetContent::Table(segments.all),
            },
            Sheet {
                name: sheet_names::OPEN_ORDERS,
                content: SheetContent::Table(segments.open),
            },
            Sheet {
                name: sheet_names::TOP_OPEN,
                content: SheetContent::Table(segments.top_open),
            },
            Sheet {
                name: sheet_names::DEACTIVATIONS,
                content: SheetContent::Table(segments.deactivations),
            },
            Sheet {
                name: sheet_names::ACTIVATIONS,
                content: SheetContent::Blocks(blocks),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::schema::fields;
    use super::*;

    fn export() -> Table {
        let mut table = Table::new([
            "Order Status",
            "Order Creation Date",
            "Responsible",
            "Nombre Cliente",
            "Main Offer",
            "Subscription",
            "Order Category",
            "Modelo Comercial",
            "Ejecutivo",
            "Fecha Activación",
        ]);
        table.push_row(
            [
                "Completed",
                "2024-03-01",
                "Ana",
                "ACME",
                "Fiber 500",
                "SUB-1",
                "SalesOrder",
                "Retail",
                "Luis",
                "2024-03-05",
            ]
            .into_iter()
            .map(Value::from)
            .collect(),
        );
        table.push_row(
            [
                "InProgress",
                "2024-02-01",
                "Ana",
                "Globex",
                "Fiber 300",
                "SUB-2",
                "Deactivation",
                "Wholesale",
                "Luis",
                "",
            ]
            .into_iter()
            .map(Value::from_cell)
            .collect(),
        );
        table
    }

    fn options() -> ReportOptions {
        ReportOptions::new(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap())
    }

    #[test]
    fn test_sheets_in_fixed_order() {
        let report = build_report(export(), &options()).unwrap();
        let names: Vec<&str> = report.sheets.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "All Orders",
                "Open Orders",
                "Top 20 + Open",
                "Deactivations",
                "Activations by Model"
            ]
        );
    }

    #[test]
    fn test_end_to_end_scenario() {
        let report = build_report(export(), &options()).unwrap();

        let blocks = report.blocks(sheet_names::ACTIVATIONS).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "MARZO 2024");
        assert!(!blocks[0].table.is_empty());

        let deactivations = report.table(sheet_names::DEACTIVATIONS).unwrap();
        assert_eq!(deactivations.len(), 1);
        assert_eq!(deactivations.get(0, fields::SUBSCRIPTION), &Value::from("SUB-2"));
        assert_eq!(deactivations.get(0, fields::DAYS_OPEN), &Value::Int(39));

        let all = report.table(sheet_names::ALL_ORDERS).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.get(0, fields::ACTIVATION_DATE), &Value::from("05/03/2024"));
        assert_eq!(all.get(0, fields::DAYS_OPEN), &Value::Int(10));

        // The in-progress order is a deactivation, so the top view is empty
        assert!(report.table(sheet_names::TOP_OPEN).unwrap().is_empty());
        assert_eq!(report.table(sheet_names::OPEN_ORDERS).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_required_field_fails_fast() {
        let mut raw = export();
        raw.drop_columns(&["Order Category"]);

        let err = build_report(raw, &options()).unwrap_err();
        assert_eq!(
            err,
            ReportError::MissingRequiredField {
                stage: "segment",
                field: fields::CATEGORY,
            }
        );
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let mut raw = export();
        raw.drop_columns(&["Fecha Activación", "Responsible", "Main Offer"]);

        let report = build_report(raw, &options()).unwrap();

        assert!(report.blocks(sheet_names::ACTIVATIONS).unwrap().is_empty());
        let deactivations = report.table(sheet_names::DEACTIVATIONS).unwrap();
        assert!(!deactivations.has_column(fields::OFFER));
        assert_eq!(deactivations.len(), 1);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = build_report(Table::default(), &options()).unwrap_err();
        assert_eq!(err, ReportError::EmptyInput);
    }
}
