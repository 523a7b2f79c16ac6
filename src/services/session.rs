use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::clients::backend::SheetApi;
use crate::error::ErrorKind;
use crate::models::{
    AnalysisResult, FileUpload, QueryRequest, SessionState, UploadResult,
};
use crate::services::warnings;

pub const NO_DATASET_MESSAGE: &str = "Please upload a file first";
const QUERY_FAILED_MESSAGE: &str = "An error occurred while processing your query.";

/// Owns the `SessionState` aggregate and the two transitions that mutate
/// it. Transitions never fail across this boundary: every outcome lands
/// in the state's `error` field and callers only read snapshots.
///
/// Overlapping requests are disambiguated by a monotonically increasing
/// token taken at entry; a response whose token is no longer the latest
/// is discarded instead of overwriting newer state. Response-side
/// mutations happen under one lock acquisition, so observers never see a
/// half-applied transition. The lock is never held across an await.
pub struct Session<A: SheetApi> {
    api: A,
    state: Mutex<SessionState>,
    request_seq: AtomicU64,
}

impl<A: SheetApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(SessionState::default()),
            request_seq: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.lock().clone()
    }

    /// Starts a fresh upload. The prior session is discarded in full up
    /// front; a failed upload leaves no dataset to analyze against.
    pub async fn begin_upload(&self, file: FileUpload) -> SessionState {
        let token = self.next_token();
        {
            let mut state = self.state.lock();
            if state.loading {
                tracing::warn!("upload started while another request is in flight");
            }
            state.error = None;
            state.warnings.clear();
            state.current_dataset = None;
            state.insights = None;
            state.analysis_result = None;
            state.loading = true;
        }

        let outcome = self.api.upload(&file).await;

        let mut state = self.state.lock();
        if self.is_stale(token) {
            tracing::warn!("discarding stale upload response (token {})", token);
            return state.clone();
        }
        state.loading = false;
        match outcome {
            Ok(result) if result.success => {
                state.warnings = warnings::normalize(&result);
                state.insights = result.insights.clone();
                state.current_dataset = Some(result);
                state.error = None;
            }
            Ok(result) => {
                tracing::warn!(
                    "upload rejected by server: {:?} ({:?})",
                    result.error,
                    result.error_type
                );
                state.warnings = warnings::normalize(&result);
                state.error = Some(upload_error_message(&result));
                state.current_dataset = None;
            }
            Err(err) => {
                tracing::error!("upload request failed: {}", err);
                state.error = Some(ErrorKind::GeneralError.message().to_string());
                state.current_dataset = None;
            }
        }
        state.clone()
    }

    /// Runs one natural-language query against the current dataset. Fails
    /// fast without a network call when no dataset is loaded. A failed
    /// query keeps the previous analysis result.
    pub async fn submit_query(&self, query: &str) -> SessionState {
        let request = {
            let mut state = self.state.lock();
            let Some(dataset) = state.current_dataset.as_ref() else {
                state.error = Some(NO_DATASET_MESSAGE.to_string());
                return state.clone();
            };
            // file_path and dataset_id are read at call time so a dataset
            // swapped in by a later upload is never referenced by proxy.
            let Some((file_path, dataset_id)) =
                dataset.file_path.clone().zip(dataset.dataset_id.clone())
            else {
                state.error = Some(NO_DATASET_MESSAGE.to_string());
                return state.clone();
            };
            state.error = None;
            state.loading = true;
            QueryRequest {
                query: query.to_string(),
                file_path,
                dataset_id,
            }
        };
        let token = self.next_token();

        let outcome = self.api.query(&request).await;

        let mut state = self.state.lock();
        if self.is_stale(token) {
            tracing::warn!("discarding stale query response (token {})", token);
            return state.clone();
        }
        state.loading = false;
        match outcome {
            Ok(response) if response.success => {
                state.analysis_result = Some(AnalysisResult {
                    analysis: response.analysis.unwrap_or_default(),
                    metrics: response.metrics,
                    visualizations: response.visualizations,
                });
                state.error = None;
            }
            Ok(response) => {
                tracing::warn!("query rejected by server: {:?}", response.error);
                state.error = Some(
                    response
                        .error
                        .unwrap_or_else(|| QUERY_FAILED_MESSAGE.to_string()),
                );
            }
            Err(err) => {
                tracing::error!("query request failed: {}", err);
                state.error = Some(QUERY_FAILED_MESSAGE.to_string());
            }
        }
        state.clone()
    }

    fn next_token(&self) -> u64 {
        self.request_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_stale(&self, token: u64) -> bool {
        token != self.request_seq.load(Ordering::SeqCst)
    }
}

/// Picks the user-facing message for a rejected upload: the fixed table
/// entry when the kind is recognized, the server's wording for known
/// shapes with unknown kinds, and the generic fallback when the response
/// carried no kind at all (raw server text is not surfaced then).
fn upload_error_message(result: &UploadResult) -> String {
    match result.error_type.as_deref() {
        Some(tag) => match ErrorKind::from_tag(tag) {
            Some(kind) => kind.message().to_string(),
            None => result
                .error
                .clone()
                .unwrap_or_else(|| ErrorKind::GeneralError.message().to_string()),
        },
        None => ErrorKind::GeneralError.message().to_string(),
    }
}
