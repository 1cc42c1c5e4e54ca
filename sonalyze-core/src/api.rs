use crate::error::ApiError;
use crate::types::{AudioId, AudioUpload, Stats, UploadFile, UploadsPage};

/// The backend round trips the dashboard performs.
///
/// Futures are not required to be `Send`: the browser client runs on a
/// single-threaded executor.
#[allow(async_fn_in_trait)]
pub trait DashboardApi {
    /// `GET /api/my-uploads?page=&per_page=`
    async fn list_uploads(&self, page: u32, per_page: u32) -> Result<UploadsPage, ApiError>;

    /// `GET /api/stats`
    async fn fetch_stats(&self) -> Result<Stats, ApiError>;

    /// `POST /api/upload`, multipart field `audio`
    async fn upload(&self, file: &UploadFile) -> Result<AudioUpload, ApiError>;

    /// `DELETE /api/audio/{id}`
    async fn delete_audio(&self, id: AudioId) -> Result<(), ApiError>;

    /// `POST /api/audio/{id}/reanalyze`
    async fn reanalyze(&self, id: AudioId) -> Result<(), ApiError>;

    /// `GET /api/audio/{id}/transcription`. `None` when the server has no text.
    async fn transcription(&self, id: AudioId) -> Result<Option<String>, ApiError>;
}
