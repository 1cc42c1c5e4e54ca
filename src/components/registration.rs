use leptos::prelude::*;
use crate::components::tr;
use crate::state::AppState;

/// Music registration sub-view. Replaces the whole dashboard while open.
#[component]
pub fn Registration() -> impl IntoView {
    let state = expect_context::<AppState>();
    let locale = state.locale();

    view! {
        <div class="registration">
            <button
                class="outline-btn"
                on:click=move |_| state.dashboard.update(|d| d.set_registration(false))
            >
                {format!("\u{2190} {}", tr(locale, "Voltar ao dashboard", "Back to dashboard"))}
            </button>
            <div class="card">
                <div class="card-title">{tr(locale, "Registro de Música", "Music registration")}</div>
                <p class="card-description">
                    {tr(
                        locale,
                        "Registre uma composição a partir dos seus uploads analisados.",
                        "Register a composition from your analysed uploads.",
                    )}
                </p>
            </div>
        </div>
    }
}
