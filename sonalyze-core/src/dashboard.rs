use crate::api::DashboardApi;
use crate::error::DashboardError;
use crate::messages::Locale;
use crate::state::{DashboardState, FollowUp, TranscriptionStep};
use crate::types::{AudioId, UploadFile, UserProfile};

/// Drives a [`DashboardState`] against a backend.
///
/// Each operation runs its state transition, performs the round trip and
/// applies the result, including any follow-up request. Errors are returned
/// to the caller and also left in `state().error` as localized text.
pub struct Dashboard<A> {
    api: A,
    state: DashboardState,
}

impl<A: DashboardApi> Dashboard<A> {
    pub fn new(api: A, locale: Locale) -> Self {
        Self {
            api,
            state: DashboardState::new(locale),
        }
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.state.profile = Some(profile);
        self
    }

    /// Open directly at `page` with `per_page` records per page.
    pub fn starting_at(mut self, page: u32, per_page: u32) -> Self {
        self.state.start_at(page, per_page);
        self
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Initial load, and what runs after every page change: the current
    /// page of uploads plus statistics.
    pub async fn load(&mut self) -> Result<(), DashboardError> {
        let listed = self.refresh_uploads().await;
        self.refresh_stats().await;
        listed
    }

    pub async fn refresh_uploads(&mut self) -> Result<(), DashboardError> {
        let result = self
            .api
            .list_uploads(self.state.current_page, self.state.per_page)
            .await;
        self.state.finish_list(result)?;
        Ok(())
    }

    pub async fn refresh_stats(&mut self) {
        let result = self.api.fetch_stats().await;
        self.state.finish_stats(result);
    }

    /// Switch page. Returns `Ok(false)` without any request when the page
    /// does not change.
    pub async fn go_to_page(&mut self, page: u32) -> Result<bool, DashboardError> {
        if !self.state.set_page(page) {
            return Ok(false);
        }
        self.load().await?;
        Ok(true)
    }

    pub async fn upload(&mut self, file: &UploadFile) -> Result<AudioId, DashboardError> {
        self.state.begin_upload(file.size(), &file.mime)?;
        let result = self.api.upload(file).await;
        let id = result.as_ref().map(|a| a.id).unwrap_or_default();
        let follow = self.state.finish_upload(result)?;
        self.follow_up(follow).await;
        Ok(id)
    }

    /// Delete after asking `confirm` with the localized prompt.
    pub async fn delete(
        &mut self,
        id: AudioId,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<(), DashboardError> {
        if !confirm(self.state.delete_prompt()) {
            return Err(DashboardError::Cancelled);
        }
        let result = self.api.delete_audio(id).await;
        let follow = self.state.finish_delete(id, result)?;
        self.follow_up(follow).await;
        Ok(())
    }

    pub async fn reanalyze(&mut self, id: AudioId) -> Result<(), DashboardError> {
        let result = self.api.reanalyze(id).await;
        let follow = self.state.finish_reanalyze(id, result)?;
        self.follow_up(follow).await;
        Ok(())
    }

    /// Show or hide the transcription for `id`, fetching it the first time.
    /// Returns the text when it ends up visible.
    pub async fn toggle_transcription(
        &mut self,
        id: AudioId,
    ) -> Result<Option<&str>, DashboardError> {
        if self.state.request_transcription(id) == TranscriptionStep::Fetch {
            let result = self.api.transcription(id).await;
            self.state.finish_transcription(id, result)?;
        }
        Ok(self.state.visible_transcription().map(|(_, text)| text))
    }

    pub fn toggle_spectrum(&mut self, id: AudioId) {
        self.state.toggle_spectrum(id);
    }

    pub fn set_registration(&mut self, open: bool) {
        self.state.set_registration(open);
    }

    pub fn dismiss_error(&mut self) {
        self.state.dismiss_error();
    }

    async fn follow_up(&mut self, follow: FollowUp) {
        if follow == FollowUp::RefreshStats {
            self.refresh_stats().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::types::{AnalysisStatus, AudioUpload, Stats, UploadsPage};
    use crate::validate::MAX_UPLOAD_BYTES;
    use std::cell::RefCell;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        List(u32, u32),
        Stats,
        Upload(String),
        Delete(AudioId),
        Reanalyze(AudioId),
        Transcription(AudioId),
    }

    /// Backend double: serves a fixed catalogue and records every call.
    struct MockApi {
        audios: Vec<AudioUpload>,
        pages: u32,
        calls: RefCell<Vec<Call>>,
        fail_with: Option<ApiError>,
    }

    impl MockApi {
        fn new(ids: &[AudioId]) -> Self {
            Self {
                audios: ids.iter().copied().map(record).collect(),
                pages: 3,
                calls: RefCell::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(mut self, err: ApiError) -> Self {
            self.fail_with = Some(err);
            self
        }

        fn record(&self, call: Call) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.borrow().iter().filter(|c| pred(c)).count()
        }
    }

    fn record(id: AudioId) -> AudioUpload {
        AudioUpload {
            id,
            original_filename: format!("take{id}.wav"),
            filesize: 4096,
            uploaded_at: "2024-05-01T10:00:00".into(),
            status: AnalysisStatus::Failed,
            bpm: Some(98.0),
            key: Some("D minor".into()),
            lufs: Some(-12.0),
            frequency_spectrum: None,
        }
    }

    impl DashboardApi for MockApi {
        async fn list_uploads(&self, page: u32, per_page: u32) -> Result<UploadsPage, ApiError> {
            self.record(Call::List(page, per_page))?;
            Ok(UploadsPage {
                audios: self.audios.clone(),
                pages: self.pages,
                ..Default::default()
            })
        }

        async fn fetch_stats(&self) -> Result<Stats, ApiError> {
            self.calls.borrow_mut().push(Call::Stats);
            Ok(Stats {
                total_uploads: self.audios.len() as u64,
                ..Default::default()
            })
        }

        async fn upload(&self, file: &UploadFile) -> Result<AudioUpload, ApiError> {
            self.record(Call::Upload(file.name.clone()))?;
            Ok(AudioUpload {
                original_filename: file.name.clone(),
                status: AnalysisStatus::Pending,
                ..record(100)
            })
        }

        async fn delete_audio(&self, id: AudioId) -> Result<(), ApiError> {
            self.record(Call::Delete(id))
        }

        async fn reanalyze(&self, id: AudioId) -> Result<(), ApiError> {
            self.record(Call::Reanalyze(id))
        }

        async fn transcription(&self, id: AudioId) -> Result<Option<String>, ApiError> {
            self.record(Call::Transcription(id))?;
            Ok(Some(format!("words of {id}")))
        }
    }

    async fn loaded(api: MockApi) -> Dashboard<MockApi> {
        let mut dash = Dashboard::new(api, Locale::PtBr);
        dash.load().await.unwrap();
        dash.api.calls.borrow_mut().clear();
        dash
    }

    fn wav(size: usize) -> UploadFile {
        UploadFile::new("new.wav", "audio/wav", vec![0u8; size])
    }

    #[tokio::test]
    async fn test_initial_load_fetches_page_one_and_stats() {
        let mut dash = Dashboard::new(MockApi::new(&[1, 2]), Locale::PtBr);
        dash.load().await.unwrap();
        assert_eq!(dash.api.calls(), vec![Call::List(1, 10), Call::Stats]);
        assert!(!dash.state().is_loading());
        assert_eq!(dash.state().uploads.len(), 2);
        assert_eq!(dash.state().stats.as_ref().unwrap().total_uploads, 2);
    }

    #[tokio::test]
    async fn test_oversized_upload_issues_no_request() {
        let mut dash = loaded(MockApi::new(&[1])).await;
        let file = wav(MAX_UPLOAD_BYTES as usize + 1);
        let err = dash.upload(&file).await.unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
        assert!(dash.api.calls().is_empty());
        assert_eq!(
            dash.state().error.as_deref(),
            Some("Arquivo muito grande. Máximo permitido: 10MB")
        );
    }

    #[tokio::test]
    async fn test_unsupported_type_issues_no_request() {
        let mut dash = loaded(MockApi::new(&[1])).await;
        let file = UploadFile::new("clip.mov", "video/quicktime", vec![0u8; 10]);
        assert!(dash.upload(&file).await.is_err());
        assert!(dash.api.calls().is_empty());
        assert_eq!(
            dash.state().error.as_deref(),
            Some("Tipo de arquivo não suportado. Use MP3, WAV, FLAC, M4A, AAC ou OGG")
        );
    }

    #[tokio::test]
    async fn test_upload_prepends_one_record_and_refreshes_stats_once() {
        let mut dash = loaded(MockApi::new(&[1, 2])).await;
        let id = dash.upload(&wav(1024)).await.unwrap();
        assert_eq!(id, 100);
        let uploads = &dash.state().uploads;
        assert_eq!(uploads.len(), 3);
        assert_eq!(uploads[0].original_filename, "new.wav");
        assert_eq!(uploads[1].id, 1);
        assert_eq!(dash.api.count(|c| *c == Call::Stats), 1);
        assert_eq!(dash.api.count(|c| matches!(c, Call::List(..))), 0);
        assert!(!dash.state().upload_in_progress);
    }

    #[tokio::test]
    async fn test_failed_upload_does_not_touch_list_or_stats() {
        let api = MockApi::new(&[1]).failing(ApiError::Status {
            status: 400,
            message: Some("Arquivo corrompido".into()),
        });
        let mut dash = Dashboard::new(api, Locale::PtBr);
        let _ = dash.upload(&wav(10)).await;
        assert!(dash.state().uploads.is_empty());
        assert_eq!(dash.api.count(|c| *c == Call::Stats), 0);
        assert_eq!(dash.state().error.as_deref(), Some("Arquivo corrompido"));
    }

    #[tokio::test]
    async fn test_upload_transport_failure_message() {
        let api = MockApi::new(&[]).failing(ApiError::Transport("reset".into()));
        let mut dash = Dashboard::new(api, Locale::En);
        let _ = dash.upload(&wav(10)).await;
        assert_eq!(
            dash.state().error.as_deref(),
            Some("Connection error during upload")
        );
    }

    #[tokio::test]
    async fn test_delete_removes_only_matching_record() {
        let mut dash = loaded(MockApi::new(&[1, 2, 3])).await;
        dash.delete(2, |_| true).await.unwrap();
        let ids: Vec<_> = dash.state().uploads.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(dash.api.calls(), vec![Call::Delete(2), Call::Stats]);
    }

    #[tokio::test]
    async fn test_declined_delete_issues_nothing() {
        let mut dash = loaded(MockApi::new(&[1, 2])).await;
        let mut asked = String::new();
        let err = dash
            .delete(1, |prompt| {
                asked = prompt.to_string();
                false
            })
            .await
            .unwrap_err();
        assert_eq!(err, DashboardError::Cancelled);
        assert_eq!(asked, "Tem certeza que deseja excluir este áudio?");
        assert!(dash.api.calls().is_empty());
        assert_eq!(dash.state().uploads.len(), 2);
    }

    #[tokio::test]
    async fn test_reanalyze_resets_record_without_refetch() {
        let mut dash = loaded(MockApi::new(&[1, 2])).await;
        dash.reanalyze(1).await.unwrap();
        assert_eq!(dash.api.calls(), vec![Call::Reanalyze(1)]);
        let first = &dash.state().uploads[0];
        assert_eq!(first.status, AnalysisStatus::Pending);
        assert!(first.bpm.is_none());
        assert!(first.key.is_none());
        assert_eq!(first.lufs, Some(-12.0));
        let second = &dash.state().uploads[1];
        assert_eq!(second.status, AnalysisStatus::Failed);
        assert_eq!(second.bpm, Some(98.0));
    }

    #[tokio::test]
    async fn test_reanalyze_failure_keeps_record() {
        let mut dash = loaded(MockApi::new(&[1])).await;
        dash.api.fail_with = Some(ApiError::Status { status: 500, message: None });
        assert!(dash.reanalyze(1).await.is_err());
        assert_eq!(dash.state().uploads[0].status, AnalysisStatus::Failed);
        assert_eq!(dash.state().error.as_deref(), Some("Erro ao reprocessar áudio"));
    }

    #[tokio::test]
    async fn test_page_change_refetches_once() {
        let mut dash = loaded(MockApi::new(&[1])).await;
        assert!(dash.go_to_page(2).await.unwrap());
        assert_eq!(dash.api.calls(), vec![Call::List(2, 10), Call::Stats]);

        dash.api.calls.borrow_mut().clear();
        assert!(!dash.go_to_page(2).await.unwrap());
        assert!(dash.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_starting_page_is_requested() {
        let mut dash = Dashboard::new(MockApi::new(&[1]), Locale::En).starting_at(3, 25);
        dash.refresh_uploads().await.unwrap();
        assert_eq!(dash.api.calls(), vec![Call::List(3, 25)]);
    }

    #[tokio::test]
    async fn test_transcription_is_memoized() {
        let mut dash = loaded(MockApi::new(&[1])).await;
        let text = dash.toggle_transcription(1).await.unwrap().map(str::to_string);
        assert_eq!(text.as_deref(), Some("words of 1"));

        assert_eq!(dash.toggle_transcription(1).await.unwrap(), None);
        assert_eq!(dash.toggle_transcription(1).await.unwrap(), Some("words of 1"));
        assert_eq!(dash.api.calls(), vec![Call::Transcription(1)]);
    }

    #[tokio::test]
    async fn test_list_failure_shows_generic_message() {
        let api = MockApi::new(&[1]).failing(ApiError::Status { status: 500, message: None });
        let mut dash = Dashboard::new(api, Locale::PtBr);
        assert!(dash.load().await.is_err());
        assert!(!dash.state().is_loading());
        assert_eq!(dash.state().error.as_deref(), Some("Erro ao carregar uploads"));
        // stats still attempted
        assert_eq!(dash.api.count(|c| *c == Call::Stats), 1);
    }
}
