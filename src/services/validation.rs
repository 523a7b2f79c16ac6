use crate::error::ErrorKind;
use crate::models::FileUpload;

/// Hard ceiling enforced client-side before any bytes leave the machine.
/// Matches the server's MAX_CONTENT_LENGTH.
pub const MAX_FILE_SIZE: usize = 16 * 1024 * 1024;

/// MIME types the backend can actually parse.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
    "text/csv",
];

/// Synchronous pre-upload check of type and size. On rejection the
/// caller shows `ErrorKind::message()` and must not start an upload.
pub fn validate(file: &FileUpload) -> Result<(), ErrorKind> {
    if !ACCEPTED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(ErrorKind::TypeError);
    }
    if file.size() > MAX_FILE_SIZE {
        return Err(ErrorKind::FileTooLarge);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn file(mime_type: &str, size: usize) -> FileUpload {
        FileUpload {
            filename: "report.xlsx".to_string(),
            mime_type: mime_type.to_string(),
            bytes: Bytes::from(vec![0u8; size]),
        }
    }

    #[test]
    fn accepts_all_listed_spreadsheet_types() {
        for mime in ACCEPTED_MIME_TYPES {
            assert!(validate(&file(mime, 1024)).is_ok(), "rejected {}", mime);
        }
    }

    #[test]
    fn rejects_unlisted_types() {
        for mime in ["application/pdf", "image/png", "text/plain", ""] {
            assert_eq!(validate(&file(mime, 1024)), Err(ErrorKind::TypeError));
        }
    }

    #[test]
    fn rejects_oversized_files_of_accepted_type() {
        assert_eq!(
            validate(&file(ACCEPTED_MIME_TYPES[0], MAX_FILE_SIZE + 1)),
            Err(ErrorKind::FileTooLarge)
        );
    }

    #[test]
    fn accepts_file_at_exactly_the_limit() {
        assert!(validate(&file(ACCEPTED_MIME_TYPES[0], MAX_FILE_SIZE)).is_ok());
    }

    #[test]
    fn type_check_wins_over_size_check() {
        // An oversized PDF is a type error, not a size error.
        assert_eq!(
            validate(&file("application/pdf", MAX_FILE_SIZE + 1)),
            Err(ErrorKind::TypeError)
        );
    }

    #[test]
    fn rejection_messages_come_from_the_fixed_table() {
        let err = validate(&file("image/png", 10)).unwrap_err();
        assert_eq!(err.message(), "Please upload an Excel file (.xlsx or .xls)");
        let err = validate(&file(ACCEPTED_MIME_TYPES[1], MAX_FILE_SIZE + 1)).unwrap_err();
        assert_eq!(
            err.message(),
            "File size exceeds 16MB limit. Please upload a smaller file."
        );
    }
}
