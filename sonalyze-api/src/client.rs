use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use sonalyze_core::{
    ApiError, AudioId, AudioUpload, DashboardApi, ErrorBody, Stats, TranscriptionResponse,
    UploadFile, UploadResponse, UploadsPage,
};

use crate::endpoints::Endpoints;

/// Authenticated client for the dashboard's REST API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, token)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str, token: impl Into<String>) -> Self {
        Self {
            http,
            endpoints: Endpoints::new(base_url),
            token: token.into(),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Address of the rendered transcription PDF.
    pub fn transcription_pdf_url(&self, id: AudioId) -> String {
        self.endpoints.transcription_pdf(id)
    }

    /// Address of the stored audio file.
    pub fn download_url(&self, id: AudioId) -> String {
        self.endpoints.download(id)
    }

    /// Fetch the rendered transcription PDF.
    pub async fn transcription_pdf(&self, id: AudioId) -> Result<Vec<u8>, ApiError> {
        self.fetch_bytes(self.http.get(self.endpoints.transcription_pdf(id)))
            .await
    }

    /// Fetch the stored audio file.
    pub async fn download_audio(&self, id: AudioId) -> Result<Vec<u8>, ApiError> {
        self.fetch_bytes(self.http.get(self.endpoints.download(id))).await
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("HTTP request failed: {e}")))?;

        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        log::debug!("HTTP {status}: {body}");
        Err(ApiError::Status {
            status,
            message: server_message(&body),
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        self.send(req)
            .await?
            .json()
            .await
            .map_err(|e| {
                if e.is_decode() {
                    ApiError::Decode(format!("Failed to parse JSON: {e}"))
                } else {
                    ApiError::Transport(format!("Failed to read body: {e}"))
                }
            })
    }

    async fn fetch_bytes(&self, req: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        self.send(req)
            .await?
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| ApiError::Transport(format!("Failed to read body: {e}")))
    }
}

/// The `error` field of a JSON error body, if there is one.
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
}

impl DashboardApi for ApiClient {
    async fn list_uploads(&self, page: u32, per_page: u32) -> Result<UploadsPage, ApiError> {
        self.fetch_json(self.http.get(self.endpoints.my_uploads(page, per_page)))
            .await
    }

    async fn fetch_stats(&self) -> Result<Stats, ApiError> {
        self.fetch_json(self.http.get(self.endpoints.stats())).await
    }

    async fn upload(&self, file: &UploadFile) -> Result<AudioUpload, ApiError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|e| ApiError::Transport(format!("Invalid MIME type: {e}")))?;
        let form = Form::new().part("audio", part);
        let resp: UploadResponse = self
            .fetch_json(self.http.post(self.endpoints.upload()).multipart(form))
            .await?;
        Ok(resp.audio)
    }

    async fn delete_audio(&self, id: AudioId) -> Result<(), ApiError> {
        self.send(self.http.delete(self.endpoints.audio(id))).await?;
        Ok(())
    }

    async fn reanalyze(&self, id: AudioId) -> Result<(), ApiError> {
        self.send(self.http.post(self.endpoints.reanalyze(id))).await?;
        Ok(())
    }

    async fn transcription(&self, id: AudioId) -> Result<Option<String>, ApiError> {
        let resp: TranscriptionResponse = self
            .fetch_json(self.http.get(self.endpoints.transcription(id)))
            .await?;
        Ok(resp.transcription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and hand back the raw request head.
    async fn serve_once(status: &str, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&buf).to_string()
        });
        (format!("http://{addr}"), handle)
    }

    #[test]
    fn test_server_message() {
        assert_eq!(server_message(r#"{"error": "Token expirado"}"#).as_deref(), Some("Token expirado"));
        assert_eq!(server_message(r#"{"error": ""}"#), None);
        assert_eq!(server_message("<html>502</html>"), None);
    }

    #[tokio::test]
    async fn test_list_sends_bearer_and_decodes() {
        let body = r#"{"audios": [{"id": 3, "original_filename": "a.mp3", "filesize": 10,
            "uploaded_at": "2024-01-01T00:00:00", "status": "completed", "bpm": 90.0}],
            "pages": 4}"#;
        let (base, server) = serve_once("200 OK", body).await;
        let client = ApiClient::new(&base, "secret-token");

        let page = client.list_uploads(2, 10).await.unwrap();
        assert_eq!(page.pages, 4);
        assert_eq!(page.audios[0].id, 3);

        let head = server.await.unwrap();
        assert!(head.starts_with("GET /api/my-uploads?page=2&per_page=10 "));
        assert!(head.to_ascii_lowercase().contains("authorization: bearer secret-token"));
    }

    #[tokio::test]
    async fn test_error_status_carries_server_message() {
        let (base, server) = serve_once("400 Bad Request", r#"{"error": "Arquivo inválido"}"#).await;
        let client = ApiClient::new(&base, "t");
        let err = client.reanalyze(8).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                message: Some("Arquivo inválido".into())
            }
        );
        let head = server.await.unwrap();
        assert!(head.starts_with("POST /api/audio/8/reanalyze "));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base, server) = serve_once("200 OK", r#"{"audios": [{"id": "x"}]}"#).await;
        let client = ApiClient::new(&base, "t");
        let err = client.list_uploads(1, 10).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_list_tolerates_null_fields() {
        let body = r#"{"audios": [{"id": 5, "original_filename": null, "status": null}],
            "pages": null}"#;
        let (base, server) = serve_once("200 OK", body).await;
        let client = ApiClient::new(&base, "t");
        let page = client.list_uploads(1, 10).await.unwrap();
        assert_eq!(page.audios[0].id, 5);
        assert_eq!(page.audios[0].status, sonalyze_core::AnalysisStatus::Pending);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = ApiClient::new(&format!("http://{addr}"), "t");
        let err = client.fetch_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
