use anyhow::{bail, Result};
use bytes::Bytes;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

mod config;
mod error;
mod logging;
mod render;
pub mod models;
pub mod services;
pub mod clients;

use clients::backend::HttpSheetApi;
use models::FileUpload;
use services::session::Session;
use services::validation;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::Config::new()?;

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: sheet_client <spreadsheet>");
    };
    let path = Path::new(&path);

    let bytes = tokio::fs::read(path).await?;
    let file = FileUpload {
        filename: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string()),
        mime_type: guess_mime(path).to_string(),
        bytes: Bytes::from(bytes),
    };

    // The gate runs before any network interaction; a rejected file never
    // reaches the session machine.
    if let Err(kind) = validation::validate(&file) {
        println!("{}", kind.message());
        return Ok(());
    }

    let api = HttpSheetApi::new(&config)?;
    let session = Session::new(api);

    let state = session.begin_upload(file).await;
    render::upload_summary(&state);
    if state.current_dataset.is_none() {
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"query> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();
        if query.is_empty() || query == "exit" {
            break;
        }

        let state = session.submit_query(query).await;
        if let Some(error) = &state.error {
            println!("{}", error);
        } else if let Some(result) = &state.analysis_result {
            render::analysis(result);
        }
    }

    Ok(())
}

fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        Some("csv") => "text/csv",
        _ => "application/octet-stream",
    }
}
