//! Monthly activation cross-tabulation (offer × commercial model)

use std::collections::{BTreeMap, BTreeSet};

use super::dates::DateParser;
use super::months::{month_label, sort_most_recent_first};
use super::schema::{FieldPolicy, category, fields, status};
use super::types::{Row, Table, Value};

pub const POLICY: FieldPolicy = FieldPolicy {
    stage: "aggregate",
    required: &[fields::STATUS, fields::CATEGORY, fields::CREATION_DATE],
    tolerated: &[fields::OFFER, fields::COMMERCIAL_MODEL],
};

/// Count table for one month: rows are offers, columns commercial models
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossTab {
    pub offers: Vec<String>,
    pub models: Vec<String>,
    /// `counts[offer][model]`
    counts: Vec<Vec<u64>>,
}

impl CrossTab {
    /// Build from (offer, model) pairs, one pair per counted subscription
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut cells: BTreeMap<(String, String), u64> = BTreeMap::new();
        let mut models = BTreeSet::new();
        let mut offers = BTreeSet::new();

        for (offer, model) in pairs {
            offers.insert(offer.clone());
            models.insert(model.clone());
            *cells.entry((offer, model)).or_insert(0) += 1;
        }

        let offers: Vec<String> = offers.into_iter().collect();
        let models: Vec<String> = models.into_iter().collect();
        let counts = offers
            .iter()
            .map(|offer| {
                models
                    .iter()
                    .map(|model| {
                        cells
                            .get(&(offer.clone(), model.clone()))
                            .copied()
                            .unwrap_or(0)
                    })
                    .collect()
            })
            .collect();

        Self {
            offers,
            models,
            counts,
        }
    }

    pub fn count(&self, offer: usize, model: usize) -> u64 {
        self.counts[offer][model]
    }

    pub fn row_total(&self, offer: usize) -> u64 {
        self.counts[offer].iter().sum()
    }

    pub fn column_total(&self, model: usize) -> u64 {
        self.counts.iter().map(|row| row[model]).sum()
    }

    pub fn grand_total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Render with a leading offer column and trailing total row/column
    pub fn to_table(&self, total_label: &str) -> Table {
        let mut columns = vec![fields::OFFER.to_string()];
        columns.extend(self.models.iter().cloned());
        columns.push(total_label.to_string());

        let mut table = Table::new(columns);

        for (i, offer) in self.offers.iter().enumerate() {
            let mut cells = vec![Value::Text(offer.clone())];
            cells.extend((0..self.models.len()).map(|j| Value::Int(self.count(i, j) as i64)));
            cells.push(Value::Int(self.row_total(i) as i64));
            table.push_row(cells);
        }

        let mut totals = vec![Value::Text(total_label.to_string())];
        totals.extend((0..self.models.len()).map(|j| Value::Int(self.column_total(j) as i64)));
        totals.push(Value::Int(self.grand_total() as i64));
        table.push_row(totals);

        table
    }
}

/// One month's block on the activations sheet
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBlock {
    /// Zero-based sheet row holding the title
    pub start_row: u32,
    pub title: String,
    /// Header row at `start_row + 1`, body below it
    pub table: Table,
}

impl MonthBlock {
    /// Rows the block occupies: title, header, body
    pub fn height(&self) -> u32 {
        2 + self.table.len() as u32
    }
}

/// Settings for the activation sheet
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub total_label: String,
    /// Blank rows between one block's table and the next title
    pub block_gap: u32,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            total_label: "Suma total".to_string(),
            block_gap: 2,
        }
    }
}

fn is_activation(row: &Row<'_>) -> bool {
    row.get(fields::STATUS).is_text(status::COMPLETED)
        && row.get(fields::CATEGORY).is_text(category::SALES_ORDER)
}

/// Activation rows tagged with their month label, in input order
fn labelled_activations<'a>(
    table: &'a Table,
    parser: &DateParser,
) -> Vec<(String, Row<'a>)> {
    table
        .rows()
        .filter(is_activation)
        .filter_map(|row| {
            parser
                .parse(row.get(fields::CREATION_DATE))
                .map(|dt| (month_label(dt), row))
        })
        .collect()
}

/// Per-month cross-tabulations, most recent month first
pub fn monthly_crosstabs(table: &Table, parser: &DateParser) -> Vec<(String, CrossTab)> {
    if !table.has_column(fields::OFFER) || !table.has_column(fields::COMMERCIAL_MODEL) {
        log::warn!(
            "'{}' or '{}' column missing; activation pivot left empty",
            fields::OFFER,
            fields::COMMERCIAL_MODEL
        );
        return Vec::new();
    }

    let labelled = labelled_activations(table, parser);

    let mut months: Vec<String> = Vec::new();
    for (label, _) in &labelled {
        if !months.contains(label) {
            months.push(label.clone());
        }
    }
    sort_most_recent_first(&mut months);

    months
        .into_iter()
        .map(|month| {
            let pairs = labelled
                .iter()
                .filter(|(label, _)| *label == month)
                .filter(|(_, row)| !row.get(fields::SUBSCRIPTION).is_null())
                .filter_map(|(_, row)| {
                    let offer = row.get(fields::OFFER).label()?;
                    let model = row.get(fields::COMMERCIAL_MODEL).label()?;
                    Some((offer, model))
                });
            let crosstab = CrossTab::from_pairs(pairs);
            (month, crosstab)
        })
        .collect()
}

/// Lay monthly cross-tabulations out as stacked, titled blocks
pub fn stack_blocks(crosstabs: Vec<(String, CrossTab)>, options: &AggregateOptions) -> Vec<MonthBlock> {
    let mut start_row = 0u32;
    let mut blocks = Vec::with_capacity(crosstabs.len());

    for (title, crosstab) in crosstabs {
        let block = MonthBlock {
            start_row,
            title,
            table: crosstab.to_table(&options.total_label),
        };
        start_row += block.height() + options.block_gap;
        blocks.push(block);
    }

    blocks
}

/// Build the activation sheet blocks from the enriched table
pub fn activation_blocks(
    table: &Table,
    parser: &DateParser,
    options: &AggregateOptions,
) -> Vec<MonthBlock> {
    let blocks = stack_blocks(monthly_crosstabs(table, parser), options);
    log::debug!("Activation pivot: {} month blocks", blocks.len());
    blocks
}
