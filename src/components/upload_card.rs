use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use sonalyze_core::validate::ALLOWED_MIME_TYPES;
use crate::actions;
use crate::components::tr;
use crate::state::AppState;

#[component]
pub fn UploadCard() -> impl IntoView {
    let state = expect_context::<AppState>();
    let locale = move || state.dashboard.with(|d| d.locale);
    let uploading = move || state.dashboard.with(|d| d.upload_in_progress);

    let on_file_input_change = move |ev: web_sys::Event| {
        let Some(target) = ev.target() else { return };
        let input: HtmlInputElement = target.unchecked_into();
        let Some(file) = input.files().and_then(|list| list.get(0)) else { return };
        log::debug!("Selected {} ({} bytes, {})", file.name(), file.size(), file.type_());
        actions::upload(state, file, input);
    };

    view! {
        <div class="card upload-card">
            <div class="card-title">
                {move || tr(locale(), "Upload de Áudio", "Upload audio")}
            </div>
            <label
                for="dropzone-file"
                class=move || if uploading() { "dropzone busy" } else { "dropzone" }
            >
                {move || {
                    if uploading() {
                        view! {
                            <div class="spinner"></div>
                            <p>{tr(locale(), "Processando...", "Processing...")}</p>
                        }
                        .into_any()
                    } else {
                        view! {
                            <p>
                                <span class="strong">
                                    {tr(locale(), "Clique para fazer upload", "Click to upload")}
                                </span>
                            </p>
                            <p class="hint">"MP3, WAV, FLAC, M4A, AAC, OGG (MAX. 10MB)"</p>
                        }
                        .into_any()
                    }
                }}
                <input
                    id="dropzone-file"
                    type="file"
                    accept=ALLOWED_MIME_TYPES.join(",")
                    style="display:none"
                    disabled=uploading
                    on:change=on_file_input_change
                />
            </label>
        </div>
    }
}
