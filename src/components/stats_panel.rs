use leptos::prelude::*;
use sonalyze_core::format::format_average;
use sonalyze_core::Locale;
use crate::components::tr;
use crate::state::AppState;

fn stat_card(title: &'static str, value: String, caption: &'static str) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-title">{title}</div>
            <div class="stat-value">{value}</div>
            <p class="stat-caption">{caption}</p>
        </div>
    }
}

#[component]
pub fn StatsPanel() -> impl IntoView {
    let state = expect_context::<AppState>();

    move || {
        let (stats, locale) = state.dashboard.with(|d| (d.stats.clone(), d.locale));
        let body = match stats {
            Some(s) => {
                let storage = s.total_size_mb.map(|mb| {
                    stat_card(
                        tr(locale, "Armazenamento", "Storage"),
                        format!("{mb:.2} MB"),
                        tr(locale, "Espaço ocupado pelos arquivos", "Space used by your files"),
                    )
                });
                view! {
                    <div class="stats-grid">
                        {stat_card(
                            tr(locale, "Total de Uploads", "Total uploads"),
                            s.total_uploads.to_string(),
                            tr(locale, "Arquivos de áudio enviados", "Audio files uploaded"),
                        )}
                        {stat_card(
                            tr(locale, "Média de BPM", "Average BPM"),
                            format_average(s.average_bpm),
                            tr(locale, "Batidas por minuto", "Beats per minute"),
                        )}
                        {stat_card(
                            tr(locale, "Média de LUFS", "Average LUFS"),
                            format_average(s.average_lufs),
                            "Loudness Units Full Scale",
                        )}
                        {stat_card(
                            tr(locale, "Arquivos Processados", "Processed files"),
                            s.completed_analyses.to_string(),
                            tr(locale, "Com análise concluída", "Analysis completed"),
                        )}
                        {stat_card(
                            tr(locale, "Arquivos Pendentes", "Pending files"),
                            s.pending_analyses.to_string(),
                            tr(locale, "Aguardando processamento", "Waiting for processing"),
                        )}
                        {stat_card(
                            tr(locale, "Arquivos com Falha", "Failed files"),
                            s.failed_analyses.to_string(),
                            tr(locale, "Falha na análise", "Analysis failed"),
                        )}
                        {storage}
                    </div>
                }
                .into_any()
            }
            None => view! {
                <p class="muted">
                    {tr(locale, "Nenhuma estatística disponível.", "No statistics available.")}
                </p>
            }
            .into_any(),
        };
        view! {
            <div class="card">
                <div class="card-title">{tr(locale, "Estatísticas de Uso", "Usage statistics")}</div>
                <p class="card-description">{description(locale)}</p>
                {body}
            </div>
        }
    }
}

fn description(locale: Locale) -> &'static str {
    tr(
        locale,
        "Visão geral dos seus uploads e análises.",
        "Overview of your uploads and analyses.",
    )
}
