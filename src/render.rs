//! Read-only console views over `SessionState`. Every optional field may
//! be absent; missing data is simply not printed.

use crate::models::{AnalysisResult, SessionState, Severity};
use crate::services::insights::{strong_correlations, STRONG_CORRELATION_THRESHOLD};

pub fn upload_summary(state: &SessionState) {
    if let Some(error) = &state.error {
        println!("Upload failed: {}", error);
    }

    if let Some(dataset) = &state.current_dataset {
        println!(
            "Loaded {} ({} sheet{})",
            dataset.filename.as_deref().unwrap_or("dataset"),
            dataset.sheets.len(),
            if dataset.sheets.len() == 1 { "" } else { "s" }
        );
        for name in &dataset.sheets {
            if let Some(sheet) = dataset.all_sheets_data.get(name) {
                println!(
                    "  {}: {} rows x {} columns, {:.0}% complete, {} duplicate rows",
                    name,
                    sheet.rows,
                    sheet.columns,
                    sheet.data_quality.completeness,
                    sheet.data_quality.duplicate_rows
                );
            }
        }
    }

    for warning in &state.warnings {
        let marker = match warning.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        println!("  [{}] {}", marker, warning.message);
    }

    if let Some(insights) = &state.insights {
        if let Some(stats) = &insights.summary_stats {
            println!("Summary statistics:");
            for (column, values) in stats {
                let mean = values.get("mean").and_then(|v| v.as_f64());
                let median = values.get("50%").and_then(|v| v.as_f64());
                let std = values.get("std").and_then(|v| v.as_f64());
                if let (Some(mean), Some(median), Some(std)) = (mean, median, std) {
                    println!(
                        "  {}: mean {:.2}, median {:.2}, std {:.2}",
                        column, mean, median, std
                    );
                }
            }
        }
        let pairs = strong_correlations(insights, STRONG_CORRELATION_THRESHOLD);
        if !pairs.is_empty() {
            println!("Strong correlations:");
            for pair in pairs {
                println!("  {} ~ {}: {:.2}", pair.left, pair.right, pair.value);
            }
        }
        if let Some(unique_counts) = &insights.unique_counts {
            for (column, counts) in unique_counts {
                let top: Vec<String> = counts
                    .iter()
                    .take(3)
                    .map(|(value, n)| format!("{} ({})", value, n))
                    .collect();
                if !top.is_empty() {
                    println!("  top values of {}: {}", column, top.join(", "));
                }
            }
        }
    }
}

pub fn analysis(result: &AnalysisResult) {
    println!("{}", result.analysis);

    if !result.metrics.is_empty() {
        println!("Metrics:");
        for (name, value) in &result.metrics {
            println!("  {}: {}", name, value);
        }
    }

    // Failed chart entries carry no usable plot spec.
    let charts: Vec<&str> = result
        .visualizations
        .iter()
        .filter(|viz| viz.success)
        .map(|viz| viz.title.as_str())
        .collect();
    if !charts.is_empty() {
        println!("Charts: {}", charts.join(", "));
    }
}
