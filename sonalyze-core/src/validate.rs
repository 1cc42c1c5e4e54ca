use crate::error::ValidationError;

/// Largest file the client will try to upload (10 MB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types the upload endpoint accepts.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "audio/mpeg",
    "audio/wav",
    "audio/flac",
    "audio/mp4",
    "audio/aac",
    "audio/ogg",
];

/// Pre-flight check run before any upload request is issued.
/// The server remains authoritative.
pub fn validate_upload(size: u64, mime: &str) -> Result<(), ValidationError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge { size });
    }
    if !ALLOWED_MIME_TYPES.contains(&mime) {
        return Err(ValidationError::UnsupportedType {
            mime: mime.to_string(),
        });
    }
    Ok(())
}

/// Guess an upload MIME type from a filename extension.
pub fn mime_from_filename(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "flac" => Some("audio/flac"),
        "m4a" | "mp4" => Some("audio/mp4"),
        "aac" => Some("audio/aac"),
        "ogg" | "oga" => Some("audio/ogg"),
        _ => None,
    }
}
