use analytics::RiskReport;
use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use configuration::OutputFormat;
use core_types::Periodicity;
use ndarray::Array2;

/// Rounds half away from zero to `precision` decimal places.
///
/// Display only; the computation itself is never rounded. Non-finite values
/// pass through unchanged.
pub fn round_for_display(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10_f64.powi(precision as i32);
    (value * scale).round() / scale
}

pub fn render_report(report: &RiskReport, format: OutputFormat, precision: u32) -> Result<()> {
    let mut shown = report.clone();
    shown.variance = round_for_display(report.variance, precision);
    shown.standard_deviation = round_for_display(report.standard_deviation, precision);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shown)?),
        OutputFormat::Table => {
            let observations = shown
                .observation_count
                .map_or_else(|| "-".to_string(), |count| count.to_string());

            let mut table = new_table();
            table.set_header(vec!["Metric", "Value"]);
            table.add_row(vec![Cell::new("Data type"), Cell::new(shown.data_type)]);
            table.add_row(vec![Cell::new("Assets"), Cell::new(shown.asset_count)]);
            table.add_row(vec![Cell::new("Observations"), Cell::new(observations)]);
            table.add_row(vec![Cell::new("Annualization"), Cell::new(shown.annualization)]);
            table.add_row(vec![
                Cell::new("Standard deviation (σ)"),
                Cell::new(shown.standard_deviation),
            ]);
            table.add_row(vec![Cell::new("Variance (σ²)"), Cell::new(shown.variance)]);
            println!("{table}");
        }
    }

    Ok(())
}

/// Rows of a matrix, rounded for display.
fn rounded_rows(matrix: &Array2<f64>, precision: u32) -> Vec<Vec<f64>> {
    matrix
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|v| round_for_display(*v, precision)).collect())
        .collect()
}

pub fn render_matrix(matrix: &Array2<f64>, format: OutputFormat, precision: u32) -> Result<()> {
    let rounded = rounded_rows(matrix, precision);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rounded)?),
        OutputFormat::Table => {
            let mut table = new_table();
            let mut header = vec![Cell::new("")];
            header.extend((1..=matrix.ncols()).map(|i| Cell::new(format!("Asset {i}"))));
            table.set_header(header);

            for (i, row) in rounded.iter().enumerate() {
                let mut cells = vec![Cell::new(format!("Asset {}", i + 1))];
                cells.extend(row.iter().map(|v| Cell::new(v)));
                table.add_row(cells);
            }
            println!("{table}");
        }
    }

    Ok(())
}

pub fn render_periodicities() {
    let mut table = new_table();
    table.set_header(vec!["Periodicity", "Periods per year"]);
    for periodicity in Periodicity::ALL {
        table.add_row(vec![Cell::new(periodicity), Cell::new(periodicity.factor())]);
    }
    println!("{table}");
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table
}
