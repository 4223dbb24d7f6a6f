//! Example demonstrating a quarterly attendance report
//!
//! This example shows how to use the analytics engine to:
//! 1. Load activity records from a raw JSON batch
//! 2. Pick a reporting period and enable comparison mode
//! 3. Resolve, filter and aggregate both periods
//! 4. Render the numbers a dashboard widget would display
//!
//! To run this example:
//! ```bash
//! cargo run --example quarterly_report
//! ```

use opsboard_rust::api::{
    compare_by, month_bucket, parse_records_json, ActivityRecord, Period, PeriodSelection,
};

fn main() -> anyhow::Result<()> {
    println!("=== OpsBoard Quarterly Attendance Report ===\n");

    // Step 1: records as they arrive from the data-fetch layer
    println!("1. Parsing raw records...");
    let records = parse_records_json(
        r#"[
        {"record_id": "ws-101", "start": "2024-01-09T09:00:00Z", "end": "2024-01-09T12:00:00Z",
         "measures": {"participants": 14}},
        {"record_id": "ws-102", "start": "2024-02-13", "measures": {"participants": 9}},
        {"record_id": "ws-103", "start": "2024-03-05T13:00:00Z", "end": "2024-03-05T17:00:00Z",
         "measures": {"participants": 17}},
        {"record_id": "ws-090", "start": "2023-02-07", "measures": {"participants": 11}},
        {"record_id": "ws-091", "start": "2023-03-21", "measures": {"participants": 6}}
    ]"#,
    )?;
    println!("   {} records loaded\n", records.len());

    // Step 2: primary period Q1 2024, compared against the previous year
    println!("2. Selecting periods...");
    let mut selection = PeriodSelection::new(Period::Quarterly {
        year: 2024,
        quarter: 1,
    });
    selection.enable_comparison(None)?;
    let range = selection.primary.resolve()?;
    println!(
        "   Primary:    {} ({} to {}, {} days)",
        selection.primary,
        range.start,
        range.end,
        range.days()
    );
    if let Some(comparison) = selection.comparison {
        println!("   Comparison: {}\n", comparison);
    }

    // Step 3: run the pipeline
    println!("3. Aggregating...");
    let breakdown = compare_by(
        &records,
        &selection.primary,
        selection.comparison.as_ref(),
        |r: &ActivityRecord| r.measure("participants"),
        month_bucket,
    )?;
    let result = &breakdown.result;

    // Step 4: what the widget renders
    println!(
        "   {}: {} participants across {} workshops (avg {:.1})",
        result.primary_label, result.primary.total, result.primary.count, result.primary.average
    );
    if let (Some(comparison), Some(label)) = (&result.comparison, &result.comparison_label) {
        println!(
            "   {}: {} participants across {} workshops",
            label, comparison.total, comparison.count
        );
    }
    if let Some(delta) = result.percentage_change {
        println!("   Change: {:+.1}%", delta);
    }
    println!(
        "   Peak month: {} ({} participants)",
        result.primary.peak_label, result.primary.peak_value
    );

    println!("\n   Monthly trend:");
    for point in &breakdown.primary_series.points {
        println!("     {:<4} {:>5.0}", point.label, point.value);
    }

    Ok(())
}
