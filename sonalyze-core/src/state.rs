use std::collections::HashMap;

use crate::error::{ApiError, DashboardError};
use crate::messages::{Locale, Message};
use crate::spectrum::{render_spectrum, SpectrumPoint};
use crate::types::{AnalysisStatus, AudioId, AudioUpload, Stats, UploadsPage, UserProfile};
use crate::validate::validate_upload;

/// Page size used by the dashboard.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Loading,
    Ready,
}

/// What the caller has to do after a successful mutation.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowUp {
    Nothing,
    RefreshStats,
}

/// Outcome of asking for a transcription.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TranscriptionStep {
    /// Already cached; visibility was toggled locally.
    Toggled,
    /// Not cached yet; the caller must fetch it.
    Fetch,
}

/// Local mirror of the server state plus the view's own toggles.
///
/// Every transition is a plain method so that the web view (which keeps this
/// inside a signal) and the [`Dashboard`](crate::dashboard::Dashboard)
/// controller share the same rules.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardState {
    pub locale: Locale,
    pub mode: ViewMode,
    pub uploads: Vec<AudioUpload>,
    pub stats: Option<Stats>,
    pub profile: Option<UserProfile>,
    /// Banner text. Replaced by the next failure, never cleared on a timer.
    pub error: Option<String>,
    pub current_page: u32,
    pub total_pages: u32,
    pub per_page: u32,
    pub upload_in_progress: bool,
    pub showing_registration: bool,
    pub spectrum_for: Option<AudioId>,
    pub transcription_for: Option<AudioId>,
    transcriptions: HashMap<AudioId, String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl DashboardState {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            mode: ViewMode::Loading,
            uploads: Vec::new(),
            stats: None,
            profile: None,
            error: None,
            current_page: 1,
            total_pages: 1,
            per_page: DEFAULT_PAGE_SIZE,
            upload_in_progress: false,
            showing_registration: false,
            spectrum_for: None,
            transcription_for: None,
            transcriptions: HashMap::new(),
        }
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn is_loading(&self) -> bool {
        self.mode == ViewMode::Loading
    }

    fn fail(&mut self, message: Message) {
        self.error = Some(message.text(self.locale).to_string());
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // ── Listing ──────────────────────────────────────────────────────

    pub fn finish_list(&mut self, result: Result<UploadsPage, ApiError>) -> Result<(), ApiError> {
        self.mode = ViewMode::Ready;
        match result {
            Ok(page) => {
                self.uploads = page.audios;
                self.total_pages = page.pages.max(1);
                Ok(())
            }
            Err(e) => {
                log::warn!("listing uploads failed: {e}");
                self.fail(match &e {
                    ApiError::Status { .. } | ApiError::Decode(_) => Message::LoadUploadsFailed,
                    ApiError::Transport(_) => Message::ConnectionError,
                });
                Err(e)
            }
        }
    }

    /// Statistics are non-critical: failures are logged, never shown.
    pub fn finish_stats(&mut self, result: Result<Stats, ApiError>) {
        match result {
            Ok(stats) => self.stats = Some(stats),
            Err(e) => log::warn!("loading statistics failed: {e}"),
        }
    }

    /// Move to `page`, clamped to the known page range. Returns whether the
    /// page actually changed (and so whether a refetch is due).
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.clamp(1, self.total_pages.max(1));
        if page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Position on `page` before its size is known, e.g. when a caller
    /// opens a specific page directly. Only the lower bound applies.
    pub fn start_at(&mut self, page: u32, per_page: u32) {
        self.current_page = page.max(1);
        self.per_page = per_page.max(1);
    }

    pub fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    // ── Upload ───────────────────────────────────────────────────────

    /// Pre-flight for an upload. On `Ok` the upload flag is raised and the
    /// caller must issue the request and then call [`finish_upload`].
    ///
    /// [`finish_upload`]: Self::finish_upload
    pub fn begin_upload(&mut self, size: u64, mime: &str) -> Result<(), DashboardError> {
        if self.upload_in_progress {
            return Err(DashboardError::UploadInProgress);
        }
        if let Err(e) = validate_upload(size, mime) {
            self.fail(e.message());
            return Err(e.into());
        }
        self.upload_in_progress = true;
        self.error = None;
        Ok(())
    }

    pub fn finish_upload(
        &mut self,
        result: Result<AudioUpload, ApiError>,
    ) -> Result<FollowUp, ApiError> {
        self.upload_in_progress = false;
        match result {
            Ok(audio) => {
                log::info!("uploaded {} as #{}", audio.original_filename, audio.id);
                self.uploads.insert(0, audio);
                Ok(FollowUp::RefreshStats)
            }
            Err(e) => {
                self.error = Some(e.user_message(
                    Message::UploadFailed,
                    Message::UploadConnectionError,
                    true,
                    self.locale,
                ));
                Err(e)
            }
        }
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Question to put to the user before deleting.
    pub fn delete_prompt(&self) -> &'static str {
        Message::ConfirmDelete.text(self.locale)
    }

    pub fn finish_delete(
        &mut self,
        id: AudioId,
        result: Result<(), ApiError>,
    ) -> Result<FollowUp, ApiError> {
        match result {
            Ok(()) => {
                self.uploads.retain(|a| a.id != id);
                self.transcriptions.remove(&id);
                if self.spectrum_for == Some(id) {
                    self.spectrum_for = None;
                }
                if self.transcription_for == Some(id) {
                    self.transcription_for = None;
                }
                Ok(FollowUp::RefreshStats)
            }
            Err(e) => {
                self.error = Some(e.user_message(
                    Message::DeleteFailed,
                    Message::ConnectionError,
                    false,
                    self.locale,
                ));
                Err(e)
            }
        }
    }

    // ── Reanalyze ────────────────────────────────────────────────────

    /// On success the record is optimistically reset; the real values show
    /// up on the next listing.
    pub fn finish_reanalyze(
        &mut self,
        id: AudioId,
        result: Result<(), ApiError>,
    ) -> Result<FollowUp, ApiError> {
        match result {
            Ok(()) => {
                if let Some(audio) = self.uploads.iter_mut().find(|a| a.id == id) {
                    audio.status = AnalysisStatus::Pending;
                    audio.bpm = None;
                    audio.key = None;
                }
                Ok(FollowUp::Nothing)
            }
            Err(e) => {
                self.error = Some(e.user_message(
                    Message::ReanalyzeFailed,
                    Message::ConnectionError,
                    false,
                    self.locale,
                ));
                Err(e)
            }
        }
    }

    // ── Transcription ────────────────────────────────────────────────

    pub fn request_transcription(&mut self, id: AudioId) -> TranscriptionStep {
        if !self.transcriptions.contains_key(&id) {
            return TranscriptionStep::Fetch;
        }
        self.transcription_for = if self.transcription_for == Some(id) {
            None
        } else {
            Some(id)
        };
        TranscriptionStep::Toggled
    }

    pub fn finish_transcription(
        &mut self,
        id: AudioId,
        result: Result<Option<String>, ApiError>,
    ) -> Result<(), ApiError> {
        match result {
            Ok(text) => {
                let text = text
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| Message::TranscriptionUnavailable.text(self.locale).to_string());
                self.transcriptions.insert(id, text);
                self.transcription_for = Some(id);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message(
                    Message::TranscriptionFailed,
                    Message::TranscriptionConnectionError,
                    false,
                    self.locale,
                ));
                Err(e)
            }
        }
    }

    pub fn transcription(&self, id: AudioId) -> Option<&str> {
        self.transcriptions.get(&id).map(String::as_str)
    }

    /// Transcription text currently open, if any.
    pub fn visible_transcription(&self) -> Option<(AudioId, &str)> {
        let id = self.transcription_for?;
        self.transcription(id).map(|t| (id, t))
    }

    // ── Playback ─────────────────────────────────────────────────────

    /// Fetching the audio for the inline player failed.
    pub fn playback_failed(&mut self, id: AudioId, err: &ApiError) {
        log::warn!("loading audio #{id} failed: {err}");
        self.error = Some(err.user_message(
            Message::AudioLoadFailed,
            Message::ConnectionError,
            true,
            self.locale,
        ));
    }

    // ── Toggles ──────────────────────────────────────────────────────

    pub fn toggle_spectrum(&mut self, id: AudioId) {
        self.spectrum_for = if self.spectrum_for == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub fn set_registration(&mut self, open: bool) {
        self.showing_registration = open;
    }

    pub fn upload(&self, id: AudioId) -> Option<&AudioUpload> {
        self.uploads.iter().find(|a| a.id == id)
    }

    /// Binned spectrum for `id`, empty when the record has none.
    pub fn spectrum_points(&self, id: AudioId) -> Vec<SpectrumPoint> {
        self.upload(id)
            .and_then(|a| a.frequency_spectrum.as_deref())
            .map(render_spectrum)
            .unwrap_or_default()
    }
}
