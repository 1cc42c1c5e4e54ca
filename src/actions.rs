//! Dashboard operations for the web view: each one applies a
//! `DashboardState` transition, performs the round trip on the local
//! executor and writes the outcome back into the signal.

use leptos::prelude::*;
use leptos::task::spawn_local;
use sonalyze_core::{ApiError, AudioId, DashboardApi, FollowUp, TranscriptionStep, UploadFile};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader, HtmlInputElement};

use crate::session;
use crate::state::AppState;

/// Current page of uploads plus statistics. Runs on mount and after every
/// page change.
pub fn load_page(state: AppState) {
    refresh_uploads(state);
    refresh_stats(state);
}

pub fn refresh_uploads(state: AppState) {
    let (page, per_page) = state
        .dashboard
        .with_untracked(|d| (d.current_page, d.per_page));
    spawn_local(async move {
        let result = state.client().list_uploads(page, per_page).await;
        state.dashboard.update(|d| {
            let _ = d.finish_list(result);
        });
    });
}

pub fn refresh_stats(state: AppState) {
    spawn_local(async move {
        let result = state.client().fetch_stats().await;
        state.dashboard.update(|d| d.finish_stats(result));
    });
}

fn follow_up(state: AppState, follow: FollowUp) {
    if follow == FollowUp::RefreshStats {
        refresh_stats(state);
    }
}

/// The page-change effect picks up the new page and refetches.
pub fn go_to_page(state: AppState, page: u32) {
    state.dashboard.update(|d| {
        d.set_page(page);
    });
}

pub fn upload(state: AppState, file: File, input: HtmlInputElement) {
    let mime = file.type_();
    let size = file.size() as u64;
    let admitted = state
        .dashboard
        .try_update(|d| d.begin_upload(size, &mime))
        .map(|r| r.is_ok())
        .unwrap_or(false);
    if !admitted {
        return;
    }

    spawn_local(async move {
        let upload = match read_file_bytes(&file).await {
            Ok(bytes) => UploadFile::new(file.name(), mime, bytes),
            Err(e) => {
                log::error!("Failed to read {}: {e}", file.name());
                state.dashboard.update(|d| {
                    let _ = d.finish_upload(Err(ApiError::Transport(e)));
                });
                return;
            }
        };
        let result = state.client().upload(&upload).await;
        let outcome = state.dashboard.try_update(|d| d.finish_upload(result));
        if let Some(Ok(follow)) = outcome {
            input.set_value("");
            follow_up(state, follow);
        }
    });
}

pub fn delete(state: AppState, id: AudioId) {
    let prompt = state.dashboard.with_untracked(|d| d.delete_prompt());
    if !session::confirm(prompt) {
        return;
    }
    spawn_local(async move {
        let result = state.client().delete_audio(id).await;
        if let Some(Ok(follow)) = state.dashboard.try_update(|d| d.finish_delete(id, result)) {
            follow_up(state, follow);
        }
    });
}

pub fn reanalyze(state: AppState, id: AudioId) {
    spawn_local(async move {
        let result = state.client().reanalyze(id).await;
        if let Some(Ok(follow)) = state.dashboard.try_update(|d| d.finish_reanalyze(id, result)) {
            follow_up(state, follow);
        }
    });
}

pub fn toggle_transcription(state: AppState, id: AudioId) {
    let step = state
        .dashboard
        .try_update(|d| d.request_transcription(id));
    if step != Some(TranscriptionStep::Fetch) {
        return;
    }
    spawn_local(async move {
        let result = state.client().transcription(id).await;
        state.dashboard.update(|d| {
            let _ = d.finish_transcription(id, result);
        });
    });
}

/// Fetch the stored audio with the bearer token and hand the player an
/// object URL for it.
pub fn load_audio(
    state: AppState,
    id: AudioId,
    url: RwSignal<Option<String>>,
    loading: RwSignal<bool>,
) {
    loading.set(true);
    spawn_local(async move {
        let result = state.client().download_audio(id).await;
        match result.and_then(|bytes| object_url(&bytes).map_err(ApiError::Decode)) {
            Ok(object) => {
                // row gone before the download finished
                if let Some(Some(orphan)) = url.try_set(Some(object)) {
                    release_audio(&orphan);
                }
            }
            Err(e) => state.dashboard.update(|d| d.playback_failed(id, &e)),
        }
        loading.try_set(false);
    });
}

/// Release an object URL made by [`load_audio`].
pub fn release_audio(url: &str) {
    web_sys::Url::revoke_object_url(url).ok();
}

fn object_url(bytes: &[u8]) -> Result<String, String> {
    let array = js_sys::Uint8Array::new_with_length(bytes.len() as u32);
    array.copy_from(bytes);

    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts)
        .map_err(|e| format!("Failed to create Blob: {e:?}"))?;
    web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {e:?}"))
}

pub fn open_transcription_pdf(state: AppState, id: AudioId) {
    session::open_in_new_tab(&state.client().transcription_pdf_url(id));
}

pub fn open_download(state: AppState, id: AudioId) {
    session::open_in_new_tab(&state.client().download_url(id));
}

async fn read_file_bytes(file: &File) -> Result<Vec<u8>, String> {
    let reader = FileReader::new().map_err(|e| format!("FileReader: {e:?}"))?;
    let reader_clone = reader.clone();

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let onload = Closure::once(move |_: web_sys::Event| {
            resolve.call0(&JsValue::NULL).ok();
        });
        let onerror = Closure::once(move |_: web_sys::Event| {
            reject.call0(&JsValue::NULL).ok();
        });

        reader_clone.set_onloadend(Some(onload.as_ref().unchecked_ref()));
        reader_clone.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        onload.forget();
        onerror.forget();
    });

    reader
        .read_as_array_buffer(file)
        .map_err(|e| format!("read_as_array_buffer: {e:?}"))?;

    JsFuture::from(promise)
        .await
        .map_err(|e| format!("FileReader await: {e:?}"))?;

    let result = reader.result().map_err(|e| format!("result: {e:?}"))?;
    let array_buffer = result
        .dyn_into::<js_sys::ArrayBuffer>()
        .map_err(|_| "Expected ArrayBuffer".to_string())?;
    Ok(js_sys::Uint8Array::new(&array_buffer).to_vec())
}
