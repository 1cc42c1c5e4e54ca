use leptos::prelude::*;
use crate::actions;
use crate::components::dashboard::Dashboard;
use crate::session;
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let Some(session) = session::load_session() else {
        log::info!("No stored session; sign-in required");
        return view! {
            <div class="app signed-out">
                <div class="notice">
                    <h1>"Sessão expirada"</h1>
                    <p>"Faça login para acessar seus uploads."</p>
                </div>
            </div>
        }
        .into_any();
    };

    let state = AppState::new(session, session::api_base_url());
    provide_context(state);

    // Uploads and statistics follow the current page: once on mount, then
    // again whenever the page actually changes.
    let current_page = Memo::new(move |_| state.dashboard.with(|d| d.current_page));
    Effect::new(move |_| {
        let page = current_page.get();
        log::debug!("Loading page {page}");
        actions::load_page(state);
    });

    view! {
        <div class="app">
            <Dashboard />
        </div>
    }
    .into_any()
}
