use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identifier of an uploaded audio file.
pub type AudioId = u64;

/// Analysis status reported by the server for an upload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Processing,
    Completed,
    Failed,
    #[default]
    #[serde(other)]
    Pending,
}

impl AnalysisStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Explicit `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single uploaded audio file and whatever analysis the server has
/// produced for it so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioUpload {
    pub id: AudioId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_filename: String,
    /// Stored size in bytes
    #[serde(default, deserialize_with = "null_as_default")]
    pub filesize: u64,
    /// Upload timestamp as sent by the server
    #[serde(default, deserialize_with = "null_as_default")]
    pub uploaded_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AnalysisStatus,
    /// Tempo estimate in beats per minute
    #[serde(default)]
    pub bpm: Option<f64>,
    /// Musical key (e.g. "C# minor")
    #[serde(default)]
    pub key: Option<String>,
    /// Integrated loudness in LUFS
    #[serde(default)]
    pub lufs: Option<f64>,
    /// JSON-serialized array of amplitudes
    #[serde(default)]
    pub frequency_spectrum: Option<String>,
}

impl AudioUpload {
    pub fn is_completed(&self) -> bool {
        self.status == AnalysisStatus::Completed
    }

    pub fn is_failed(&self) -> bool {
        self.status == AnalysisStatus::Failed
    }
}

fn one() -> u32 {
    1
}

/// One page of `/api/my-uploads`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadsPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub audios: Vec<AudioUpload>,
    /// Total number of pages
    #[serde(default = "one", deserialize_with = "null_as_default")]
    pub pages: u32,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u32>,
}

/// Aggregate account statistics, computed server-side.
///
/// Two generations of the backend spell the counters differently, so both
/// spellings are accepted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default, alias = "total_audios", deserialize_with = "null_as_default")]
    pub total_uploads: u64,
    #[serde(default, alias = "completed_audios", deserialize_with = "null_as_default")]
    pub completed_analyses: u64,
    #[serde(default, alias = "pending_audios", deserialize_with = "null_as_default")]
    pub pending_analyses: u64,
    #[serde(default, alias = "failed_audios", deserialize_with = "null_as_default")]
    pub failed_analyses: u64,
    #[serde(default)]
    pub average_bpm: Option<f64>,
    #[serde(default)]
    pub average_lufs: Option<f64>,
    #[serde(default)]
    pub total_size_mb: Option<f64>,
}

/// The signed-in user. Read-only from the dashboard's point of view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

/// Body of a successful `POST /api/upload`.
#[derive(Clone, Debug, Deserialize)]
pub struct UploadResponse {
    pub audio: AudioUpload,
}

/// Body of `GET /api/audio/{id}/transcription`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TranscriptionResponse {
    #[serde(default)]
    pub transcription: Option<String>,
}

/// Error body the server attaches to non-success responses.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// A file picked for upload, already read into memory.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_decodes_with_missing_analysis() {
        let rec: AudioUpload = serde_json::from_str(
            r#"{"id": 7, "original_filename": "a.wav", "filesize": 1024,
                "uploaded_at": "2024-05-01T10:00:00", "status": "processing"}"#,
        )
        .unwrap();
        assert_eq!(rec.id, 7);
        assert_eq!(rec.status, AnalysisStatus::Processing);
        assert!(rec.bpm.is_none());
        assert!(rec.key.is_none());
        assert!(rec.frequency_spectrum.is_none());
    }

    #[test]
    fn test_unknown_status_is_pending() {
        let rec: AudioUpload =
            serde_json::from_str(r#"{"id": 1, "status": "queued"}"#).unwrap();
        assert_eq!(rec.status, AnalysisStatus::Pending);
    }

    #[test]
    fn test_stats_accepts_both_spellings() {
        let new: Stats = serde_json::from_str(
            r#"{"total_uploads": 4, "completed_analyses": 2, "pending_analyses": 1,
                "total_size_mb": 12.5}"#,
        )
        .unwrap();
        let old: Stats = serde_json::from_str(
            r#"{"total_audios": 4, "completed_audios": 2, "pending_audios": 1,
                "failed_audios": 1, "average_bpm": 120.5, "average_lufs": -14.0}"#,
        )
        .unwrap();
        assert_eq!(new.total_uploads, old.total_uploads);
        assert_eq!(new.completed_analyses, old.completed_analyses);
        assert_eq!(new.pending_analyses, old.pending_analyses);
        assert_eq!(old.failed_analyses, 1);
        assert_eq!(new.total_size_mb, Some(12.5));
        assert_eq!(old.average_bpm, Some(120.5));
    }

    #[test]
    fn test_null_fields_decode_as_missing() {
        let rec: AudioUpload = serde_json::from_str(
            r#"{"id": 1, "status": null, "original_filename": null, "filesize": null,
                "uploaded_at": null, "bpm": null}"#,
        )
        .unwrap();
        assert_eq!(rec.status, AnalysisStatus::Pending);
        assert_eq!(rec.original_filename, "");
        assert_eq!(rec.filesize, 0);
        assert!(rec.bpm.is_none());

        let page: UploadsPage =
            serde_json::from_str(r#"{"audios": null, "pages": null}"#).unwrap();
        assert!(page.audios.is_empty());
        assert_eq!(page.pages, 0);

        let stats: Stats =
            serde_json::from_str(r#"{"total_audios": null, "failed_analyses": 2}"#).unwrap();
        assert_eq!(stats.total_uploads, 0);
        assert_eq!(stats.failed_analyses, 2);
    }

    #[test]
    fn test_status_names() {
        let rec: AudioUpload =
            serde_json::from_str(r#"{"id": 2, "status": "failed"}"#).unwrap();
        assert!(rec.is_failed());
        assert_eq!(serde_json::to_string(&AnalysisStatus::Pending).unwrap(), r#""pending""#);
    }

    #[test]
    fn test_page_defaults_to_one_page() {
        let page: UploadsPage = serde_json::from_str(r#"{"audios": []}"#).unwrap();
        assert_eq!(page.pages, 1);
        assert!(page.audios.is_empty());
    }
}
