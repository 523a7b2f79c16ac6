use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A candidate file picked by the user, before any network interaction.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl FileUpload {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Upload response body. The backend sends this shape for successful and
/// failed uploads alike; `success` discriminates. Fields default so a
/// partial failure payload still deserializes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub sheets: Vec<String>,
    #[serde(default)]
    pub all_sheets_data: HashMap<String, SheetData>,
    #[serde(default)]
    pub insights: Option<Insights>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub dataset_id: Option<DatasetId>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub sheet_errors: Option<Vec<SheetError>>,
}

/// The backend assigns integer dataset ids but the query contract takes
/// them as opaque values; whatever came down is sent back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetId {
    Num(i64),
    Text(String),
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetId::Num(n) => write!(f, "{}", n),
            DatasetId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Per-sheet structure and quality metadata, as parsed server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetData {
    #[serde(default)]
    pub rows: u64,
    #[serde(default)]
    pub columns: u64,
    #[serde(default)]
    pub column_names: Vec<String>,
    #[serde(default)]
    pub column_types: BTreeMap<String, String>,
    #[serde(default)]
    pub data_quality: DataQuality,
    #[serde(default)]
    pub warnings: Vec<WarningRaw>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataQuality {
    #[serde(default)]
    pub completeness: f64,
    #[serde(default)]
    pub duplicate_rows: u64,
    #[serde(default)]
    pub type_consistency: BTreeMap<String, TypeConsistency>,
    #[serde(default)]
    pub missing_values_by_column: Option<BTreeMap<String, u64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeConsistency {
    Consistent,
    Mixed,
}

/// A warning as shaped by the backend. Only `message` is guaranteed;
/// extra fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningRaw {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub message: String,
    #[serde(default)]
    pub severity: Option<String>,
}

/// One entry of `sheet_errors` on a failed (or partially failed) upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetError {
    pub sheet: String,
    pub error: String,
    #[serde(default)]
    pub error_type: Option<String>,
}

/// Normalized, display-ready warning. Built fresh on every upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarningRecord {
    pub sheet: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Server-derived statistics for the primary sheet. Read-only once
/// attached to the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Insights {
    #[serde(default)]
    pub summary_stats: Option<BTreeMap<String, BTreeMap<String, Value>>>,
    #[serde(default)]
    pub correlations: Option<BTreeMap<String, BTreeMap<String, f64>>>,
    #[serde(default)]
    pub unique_counts: Option<BTreeMap<String, BTreeMap<String, u64>>>,
}

/// The rendered output of one natural-language query. Replaced wholesale
/// on every successful query.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub analysis: String,
    pub metrics: BTreeMap<String, MetricValue>,
    pub visualizations: Vec<VizResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Num(f64),
    Text(String),
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Num(n) => write!(f, "{}", n),
            MetricValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One chart payload. `plot_data` only carries a chart spec when
/// `success` is true; consumers skip failed entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub plot_data: String,
}

/// Request body for the query endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub query: String,
    pub file_path: String,
    pub dataset_id: DatasetId,
}

/// Query response body, for successes and failures alike.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub metrics: BTreeMap<String, MetricValue>,
    #[serde(default)]
    pub visualizations: Vec<VizResult>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The single source of truth the rest of the app reads. Either no
/// dataset is loaded or a fully populated one is; nothing in between is
/// ever observable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionState {
    pub current_dataset: Option<UploadResult>,
    pub insights: Option<Insights>,
    pub analysis_result: Option<AnalysisResult>,
    pub warnings: Vec<WarningRecord>,
    pub loading: bool,
    pub error: Option<String>,
}
