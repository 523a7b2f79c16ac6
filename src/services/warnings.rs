use crate::models::{Severity, UploadResult, WarningRecord};

/// Flattens the heterogeneous warning shapes of an upload response into
/// one uniform list. Pure and total: a response with nothing usable
/// yields an empty list, never an error.
///
/// Ordering mirrors the backend exactly. Sheets come out in the order of
/// the `sheets` sequence and each sheet's warnings keep their original
/// order; nothing is sorted, reordered by severity, or deduplicated.
pub fn normalize(result: &UploadResult) -> Vec<WarningRecord> {
    if !result.success {
        return result
            .sheet_errors
            .iter()
            .flatten()
            .map(|entry| WarningRecord {
                sheet: Some(entry.sheet.clone()),
                kind: "sheet_error".to_string(),
                message: format!("Sheet \"{}\": {}", entry.sheet, entry.error),
                severity: Severity::Error,
            })
            .collect();
    }

    let mut records = Vec::new();
    for sheet_name in &result.sheets {
        let Some(sheet) = result.all_sheets_data.get(sheet_name) else {
            continue;
        };
        for raw in &sheet.warnings {
            records.push(WarningRecord {
                sheet: Some(sheet_name.clone()),
                kind: raw.kind.clone().unwrap_or_else(|| "general".to_string()),
                message: raw.message.clone(),
                severity: match raw.severity.as_deref() {
                    Some("error") => Severity::Error,
                    _ => Severity::Warning,
                },
            });
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SheetData, SheetError, WarningRaw};
    use std::collections::HashMap;

    fn raw(kind: Option<&str>, message: &str, severity: Option<&str>) -> WarningRaw {
        WarningRaw {
            kind: kind.map(String::from),
            message: message.to_string(),
            severity: severity.map(String::from),
        }
    }

    fn sheet_with(warnings: Vec<WarningRaw>) -> SheetData {
        SheetData {
            rows: 10,
            columns: 3,
            warnings,
            ..Default::default()
        }
    }

    fn success_with(sheets: Vec<(&str, Vec<WarningRaw>)>) -> UploadResult {
        let mut all_sheets_data = HashMap::new();
        let mut names = Vec::new();
        for (name, warnings) in sheets {
            names.push(name.to_string());
            all_sheets_data.insert(name.to_string(), sheet_with(warnings));
        }
        UploadResult {
            success: true,
            sheets: names,
            all_sheets_data,
            ..Default::default()
        }
    }

    #[test]
    fn success_flattens_warnings_in_sheet_order() {
        let result = success_with(vec![
            (
                "A",
                vec![
                    raw(Some("duplicate_rows"), "Found 3 duplicate rows", Some("warning")),
                    raw(Some("mixed_types"), "Mixed data types found in columns: x", None),
                ],
            ),
            ("B", vec![]),
        ]);

        let records = normalize(&result);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.sheet.as_deref() == Some("A")));
        assert_eq!(records[0].kind, "duplicate_rows");
        assert_eq!(records[1].kind, "mixed_types");
    }

    #[test]
    fn severity_defaults_to_warning_when_absent() {
        let result = success_with(vec![("A", vec![raw(None, "something", None)])]);
        let records = normalize(&result);
        assert_eq!(records[0].severity, Severity::Warning);
        assert_eq!(records[0].kind, "general");
    }

    #[test]
    fn unknown_severities_are_downgraded_to_warning() {
        // The backend emits "info" for cosmetic issues like spaces in
        // column names; the display model only knows error and warning.
        let result = success_with(vec![(
            "A",
            vec![raw(Some("column_names"), "Some column names contain spaces", Some("info"))],
        )]);
        assert_eq!(normalize(&result)[0].severity, Severity::Warning);
    }

    #[test]
    fn failure_maps_sheet_errors() {
        let result = UploadResult {
            success: false,
            error: Some("No valid sheets found in file".to_string()),
            sheet_errors: Some(vec![SheetError {
                sheet: "S1".to_string(),
                error: "bad header".to_string(),
                error_type: None,
            }]),
            ..Default::default()
        };

        let records = normalize(&result);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, "sheet_error");
        assert_eq!(records[0].severity, Severity::Error);
        assert_eq!(records[0].message, "Sheet \"S1\": bad header");
        assert_eq!(records[0].sheet.as_deref(), Some("S1"));
    }

    #[test]
    fn failure_without_sheet_errors_yields_nothing() {
        let result = UploadResult {
            success: false,
            error: Some("Invalid or corrupt Excel file".to_string()),
            ..Default::default()
        };
        assert!(normalize(&result).is_empty());
    }

    #[test]
    fn sheets_missing_from_the_data_map_are_skipped() {
        let mut result = success_with(vec![("A", vec![raw(None, "m", None)])]);
        result.sheets.push("Ghost".to_string());
        assert_eq!(normalize(&result).len(), 1);
    }

    #[test]
    fn normalize_is_idempotent() {
        let result = success_with(vec![
            ("A", vec![raw(Some("duplicate_rows"), "dups", Some("warning"))]),
            ("B", vec![raw(Some("mixed_types"), "mixed", Some("error"))]),
        ]);
        assert_eq!(normalize(&result), normalize(&result));
    }
}
