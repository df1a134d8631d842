/// CSV and console summaries for batch exports.

use std::path::Path;

use csv::Writer;
use serde::Serialize;

use crate::error::Result;
use crate::exporter::ExportResult;

/// One CSV row; column names come from the serde renames.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Source")]
    source: &'a str,
    #[serde(rename = "Flight_Number")]
    flight_number: &'a str,
    #[serde(rename = "Output_Filename")]
    output_filename: &'a str,
    #[serde(rename = "Original_Points")]
    original_points: usize,
    #[serde(rename = "Processed_Points")]
    processed_points: usize,
    #[serde(rename = "Points_Added_%")]
    points_added_percent: String,
    #[serde(rename = "Original_Distance_km")]
    original_distance_km: String,
    #[serde(rename = "Processed_Distance_km")]
    processed_distance_km: String,
    #[serde(rename = "Status")]
    status: &'a str,
}

impl<'a> From<&'a ExportResult> for ExportRow<'a> {
    fn from(result: &'a ExportResult) -> Self {
        let points_added = if result.original_points > 0 {
            (result.processed_points as f64 - result.original_points as f64)
                / result.original_points as f64
                * 100.0
        } else {
            0.0
        };

        ExportRow {
            source: &result.source,
            flight_number: &result.flight_number,
            output_filename: &result.output_filename,
            original_points: result.original_points,
            processed_points: result.processed_points,
            points_added_percent: format!("{:.1}", points_added),
            original_distance_km: format!("{:.2}", result.original_distance_km),
            processed_distance_km: format!("{:.2}", result.processed_distance_km),
            status: &result.status,
        }
    }
}

pub fn save_results_to_csv(results: &[ExportResult], csv_path: &Path) -> Result<()> {
    let mut wtr = Writer::from_path(csv_path)?;

    for result in results {
        wtr.serialize(ExportRow::from(result))?;
    }

    wtr.flush()?;
    log::info!("Export results saved to {}", csv_path.display());
    Ok(())
}

pub fn print_export_summary(results: &[ExportResult]) {
    let successful: Vec<_> = results.iter().filter(|r| r.is_success()).collect();
    let errors = results.len() - successful.len();

    println!("\n🎯 EXPORT SUMMARY");
    println!("=================");
    println!("Histories processed: {}", results.len());
    println!("✅ Exported: {}", successful.len());
    println!("❌ Errors: {}", errors);

    if successful.is_empty() {
        return;
    }

    let original_points: usize = successful.iter().map(|r| r.original_points).sum();
    let processed_points: usize = successful.iter().map(|r| r.processed_points).sum();
    let total_km: f64 = successful.iter().map(|r| r.processed_distance_km).sum();

    println!("\n✈️  TRACKS:");
    println!("Original fixes: {}", original_points);
    println!("Exported points: {}", processed_points);
    println!("Total exported distance: {:.1}km", total_km);
}
