#[derive(Debug)]
pub enum AppError {
    InvalidInput(String),
    IoError(std::io::Error),
    HttpError(String),
    ParseError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::IoError(err) => write!(f, "IO error: {}", err),
            AppError::HttpError(msg) => write!(f, "HTTP Error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

/// Error kinds the backend reports via `error_type`, plus the two kinds
/// raised client-side before any upload. Each maps to the fixed
/// user-facing message shown instead of the server's own wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileTooLarge,
    PasswordProtected,
    InvalidFile,
    NoSheets,
    NoValidSheets,
    EmptySheet,
    InsufficientData,
    LowQualityData,
    GeneralError,
    TypeError,
}

impl ErrorKind {
    /// Maps a backend `error_type` tag to a known kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "file_too_large" => Some(ErrorKind::FileTooLarge),
            "password_protected" => Some(ErrorKind::PasswordProtected),
            "invalid_file" => Some(ErrorKind::InvalidFile),
            "no_sheets" => Some(ErrorKind::NoSheets),
            "no_valid_sheets" => Some(ErrorKind::NoValidSheets),
            "empty_sheet" => Some(ErrorKind::EmptySheet),
            "insufficient_data" => Some(ErrorKind::InsufficientData),
            "low_quality_data" => Some(ErrorKind::LowQualityData),
            "general_error" => Some(ErrorKind::GeneralError),
            "type_error" => Some(ErrorKind::TypeError),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::FileTooLarge => {
                "File size exceeds 16MB limit. Please upload a smaller file."
            }
            ErrorKind::PasswordProtected => {
                "Password protected Excel files are not supported. Please remove the password protection."
            }
            ErrorKind::InvalidFile => {
                "Invalid or corrupt Excel file. Please check the file and try again."
            }
            ErrorKind::NoSheets => "Excel file contains no sheets. Please add data to the file.",
            ErrorKind::NoValidSheets => {
                "No valid sheets found in the file. Please ensure sheets contain valid data."
            }
            ErrorKind::EmptySheet => "One or more sheets are empty. Please add data to the sheets.",
            ErrorKind::InsufficientData => {
                "Sheets must contain at least 2 rows and 2 columns of data."
            }
            ErrorKind::LowQualityData => {
                "One or more sheets contain too much missing data (>50%)."
            }
            ErrorKind::GeneralError => "An error occurred while processing the file.",
            ErrorKind::TypeError => "Please upload an Excel file (.xlsx or .xls)",
        }
    }
}
