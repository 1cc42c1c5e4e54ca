use leptos::prelude::*;
use sonalyze_core::format::{format_bpm, format_date, format_file_size, format_key, format_lufs, status_class};
use sonalyze_core::messages::status_label;
use sonalyze_core::{AnalysisStatus, AudioId, AudioUpload, Locale};
use crate::actions;
use crate::components::spectrum_chart::SpectrumChart;
use crate::components::tr;
use crate::state::AppState;

/// Identity of a rendered row. A row is rebuilt when its analysis changes,
/// not on unrelated dashboard updates.
type RowKey = (AudioId, AnalysisStatus, Option<u64>, Option<u64>, Option<String>, bool);

fn row_key(audio: &AudioUpload) -> RowKey {
    (
        audio.id,
        audio.status,
        audio.bpm.map(f64::to_bits),
        audio.lufs.map(f64::to_bits),
        audio.key.clone(),
        audio.frequency_spectrum.is_some(),
    )
}

#[component]
pub fn UploadList() -> impl IntoView {
    let state = expect_context::<AppState>();
    let locale = Memo::new(move |_| state.dashboard.with(|d| d.locale));
    let uploads = Memo::new(move |_| state.dashboard.with(|d| d.uploads.clone()));
    let is_empty = Memo::new(move |_| uploads.with(Vec::is_empty));

    view! {
        <div class="card uploads-card">
            <div class="card-title uploads-title">
                <span>{move || tr(locale.get(), "Seus Uploads", "Your uploads")}</span>
                <button class="outline-btn" on:click=move |_| actions::refresh_uploads(state)>
                    {move || tr(locale.get(), "Atualizar", "Refresh")}
                </button>
            </div>
            {move || {
                let locale = locale.get();
                if is_empty.get() {
                    return view! {
                        <div class="empty-state">
                            <p>{tr(locale, "Nenhum upload encontrado", "No uploads found")}</p>
                            <p class="hint">
                                {tr(locale, "Faça seu primeiro upload acima", "Upload your first file above")}
                            </p>
                        </div>
                    }
                    .into_any();
                }
                view! {
                    <div class="upload-rows">
                        <For
                            each=move || uploads.get()
                            key=row_key
                            children=move |audio| view! { <UploadRow audio=audio locale=locale /> }
                        />
                    </div>
                    <Pagination />
                }
                .into_any()
            }}
        </div>
    }
}

#[component]
fn UploadRow(audio: AudioUpload, locale: Locale) -> impl IntoView {
    let state = expect_context::<AppState>();
    let id = audio.id;
    let has_spectrum = audio.frequency_spectrum.is_some();

    let spectrum_shown = move || state.dashboard.with(|d| d.spectrum_for == Some(id));
    let transcription = move || {
        state.dashboard.with(|d| {
            d.visible_transcription()
                .filter(|(shown, _)| *shown == id)
                .map(|(_, text)| text.to_string())
        })
    };

    let completed_actions = audio.is_completed().then(|| view! {
        <button
            class="icon-btn"
            title=tr(locale, "Baixar áudio", "Download audio")
            on:click=move |_| actions::open_download(state, id)
        >
            {"\u{2B73}"}
        </button>
        <button
            class="icon-btn"
            title=tr(locale, "Ver transcrição", "View transcription")
            on:click=move |_| actions::toggle_transcription(state, id)
        >
            {"\u{1F5B9}"}
        </button>
        <button
            class="icon-btn"
            title=tr(locale, "Baixar PDF da Transcrição", "Download transcription PDF")
            on:click=move |_| actions::open_transcription_pdf(state, id)
        >
            "PDF"
        </button>
    });

    let audio_url: RwSignal<Option<String>> = RwSignal::new(None);
    let audio_loading = RwSignal::new(false);
    on_cleanup(move || {
        if let Some(Some(url)) = audio_url.try_get_untracked() {
            actions::release_audio(&url);
        }
    });

    let failed_action = audio.is_failed().then(|| view! {
        <button
            class="icon-btn"
            title=tr(locale, "Tentar reanalisar", "Try analysing again")
            on:click=move |_| actions::reanalyze(state, id)
        >
            {"\u{21BB}"}
        </button>
    });

    view! {
        <div class="upload-row">
            <div class="upload-main">
                <div class="upload-info">
                    <div class="upload-name">
                        <h3>{audio.original_filename.clone()}</h3>
                        <span class=status_class(audio.status)>{status_label(audio.status, locale)}</span>
                    </div>
                    <div class="upload-fields">
                        <div>
                            <span class="field-label">{tr(locale, "Tamanho:", "Size:")}</span>
                            {" "}{format_file_size(audio.filesize)}
                        </div>
                        <div>
                            <span class="field-label">"Upload:"</span>
                            {" "}{format_date(&audio.uploaded_at, locale)}
                        </div>
                        <div>
                            <span class="field-label">"BPM:"</span>
                            {" "}{format_bpm(audio.bpm)}
                        </div>
                        <div>
                            <span class="field-label">{tr(locale, "Tom:", "Key:")}</span>
                            {" "}{format_key(audio.key.as_deref())}
                        </div>
                        <div>
                            <span class="field-label">"LUFS:"</span>
                            {" "}{format_lufs(audio.lufs)}
                        </div>
                        <div>
                            <span class="field-label">{tr(locale, "Espectro:", "Spectrum:")}</span>
                            {" "}
                            {if has_spectrum {
                                view! {
                                    <button
                                        class="link-btn"
                                        on:click=move |_| state.dashboard.update(|d| d.toggle_spectrum(id))
                                    >
                                        {move || if spectrum_shown() {
                                            tr(locale, "Ocultar", "Hide")
                                        } else {
                                            tr(locale, "Ver", "Show")
                                        }}
                                    </button>
                                }
                                .into_any()
                            } else {
                                view! { <span>"-"</span> }.into_any()
                            }}
                        </div>
                    </div>
                </div>
                <div class="upload-actions">
                    {completed_actions}
                    {failed_action}
                    <button
                        class="icon-btn danger"
                        title=tr(locale, "Excluir", "Delete")
                        on:click=move |_| actions::delete(state, id)
                    >
                        {"\u{1F5D1}"}
                    </button>
                </div>
            </div>

            <div class="audio-player">
                {move || match audio_url.get() {
                    Some(url) => view! { <audio controls=true autoplay=true src=url></audio> }.into_any(),
                    None => view! {
                        <button
                            class="outline-btn"
                            disabled=move || audio_loading.get()
                            on:click=move |_| actions::load_audio(state, id, audio_url, audio_loading)
                        >
                            {move || if audio_loading.get() {
                                tr(locale, "Carregando...", "Loading...")
                            } else {
                                tr(locale, "\u{25B6} Ouvir", "\u{25B6} Play")
                            }}
                        </button>
                    }
                    .into_any(),
                }}
            </div>

            {move || transcription().map(|text| view! {
                <div class="transcription-panel">
                    <h4>{tr(locale, "Transcrição:", "Transcription:")}</h4>
                    <p>{text}</p>
                </div>
            })}

            {move || (has_spectrum && spectrum_shown()).then(|| {
                let points = state.dashboard.with_untracked(|d| d.spectrum_points(id));
                view! {
                    <div class="spectrum-panel">
                        <h4>{tr(locale, "Espectro de Frequência:", "Frequency spectrum:")}</h4>
                        <SpectrumChart points=points />
                    </div>
                }
            })}
        </div>
    }
}

#[component]
fn Pagination() -> impl IntoView {
    let state = expect_context::<AppState>();
    let locale = Memo::new(move |_| state.dashboard.with(|d| d.locale));
    let total = Memo::new(move |_| state.dashboard.with(|d| d.total_pages));
    let current = Memo::new(move |_| state.dashboard.with(|d| d.current_page));

    move || {
        let total = total.get();
        (total > 1).then(|| view! {
            <div class="pagination">
                <button
                    class="outline-btn"
                    disabled=move || current.get() <= 1
                    on:click=move |_| actions::go_to_page(state, page_now(state).saturating_sub(1))
                >
                    {move || tr(locale.get(), "Anterior", "Previous")}
                </button>
                {(1..=total).map(|page| view! {
                    <button
                        class=move || if current.get() == page { "page-btn active" } else { "page-btn" }
                        on:click=move |_| actions::go_to_page(state, page)
                    >
                        {page}
                    </button>
                }).collect::<Vec<_>>()}
                <button
                    class="outline-btn"
                    disabled=move || current.get() >= total
                    on:click=move |_| actions::go_to_page(state, page_now(state) + 1)
                >
                    {move || tr(locale.get(), "Próxima", "Next")}
                </button>
            </div>
        })
    }
}

fn page_now(state: AppState) -> u32 {
    state.dashboard.with_untracked(|d| d.current_page)
}
