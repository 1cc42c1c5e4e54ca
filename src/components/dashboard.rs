use leptos::prelude::*;
use sonalyze_core::Locale;
use crate::components::profile_panel::ProfilePanel;
use crate::components::registration::Registration;
use crate::components::stats_panel::StatsPanel;
use crate::components::tr;
use crate::components::upload_card::UploadCard;
use crate::components::upload_list::UploadList;
use crate::state::{AppState, DashboardTab};

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = expect_context::<AppState>();
    let loading = move || state.dashboard.with(|d| d.is_loading());
    let registering = move || state.dashboard.with(|d| d.showing_registration);

    move || {
        if loading() {
            let locale = state.locale();
            view! {
                <div class="loading-screen">
                    <div class="spinner"></div>
                    <p>{tr(locale, "Carregando dashboard...", "Loading dashboard...")}</p>
                </div>
            }
            .into_any()
        } else if registering() {
            view! { <Registration /> }.into_any()
        } else {
            view! {
                <div class="dashboard">
                    <Header />
                    <ErrorBanner />
                    <Tabs />
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();
    let locale = move || state.dashboard.with(|d| d.locale);
    let name = move || {
        state
            .dashboard
            .with(|d| d.profile.as_ref().map(|p| p.name.clone()).unwrap_or_default())
    };

    let on_toggle_lang = move |_: web_sys::MouseEvent| {
        state.dashboard.update(|d| {
            d.locale = match d.locale {
                Locale::PtBr => Locale::En,
                Locale::En => Locale::PtBr,
            };
        });
    };

    view! {
        <div class="header">
            <div class="header-text">
                <h1>{move || format!("{}, {}!", tr(locale(), "Bem-vindo", "Welcome"), name())}</h1>
                <p>{move || tr(
                    locale(),
                    "Gerencie seus uploads de áudio e visualize as análises",
                    "Manage your audio uploads and view their analysis",
                )}</p>
            </div>
            <div class="header-actions">
                <button class="lang-btn" on:click=on_toggle_lang>
                    {move || locale().tag()}
                </button>
                <button
                    class="primary-btn"
                    on:click=move |_| state.dashboard.update(|d| d.set_registration(true))
                >
                    {move || tr(locale(), "+ Criar Registro", "+ New registration")}
                </button>
            </div>
        </div>
    }
}

#[component]
fn ErrorBanner() -> impl IntoView {
    let state = expect_context::<AppState>();

    move || {
        state.dashboard.with(|d| d.error.clone()).map(|msg| {
            let label = tr(state.locale(), "Erro:", "Error:");
            view! {
                <div class="error-banner" role="alert">
                    <strong>{label}</strong>
                    <span>{" "}{msg}</span>
                    <button
                        class="error-dismiss"
                        on:click=move |_| state.dashboard.update(|d| d.dismiss_error())
                    >
                        {"\u{00D7}"}
                    </button>
                </div>
            }
        })
    }
}

#[component]
fn Tabs() -> impl IntoView {
    let state = expect_context::<AppState>();
    let locale = move || state.dashboard.with(|d| d.locale);

    let tab_button = move |tab: DashboardTab, pt: &'static str, en: &'static str| {
        view! {
            <button
                class=move || if state.tab.get() == tab { "tab active" } else { "tab" }
                on:click=move |_| state.tab.set(tab)
            >
                {move || tr(locale(), pt, en)}
            </button>
        }
    };

    view! {
        <div class="tabs">
            <div class="tab-list">
                {tab_button(DashboardTab::Uploads, "Uploads", "Uploads")}
                {tab_button(DashboardTab::Stats, "Estatísticas", "Statistics")}
                {tab_button(DashboardTab::Profile, "Perfil", "Profile")}
            </div>
            {move || match state.tab.get() {
                DashboardTab::Uploads => view! {
                    <UploadCard />
                    <UploadList />
                }
                .into_any(),
                DashboardTab::Stats => view! { <StatsPanel /> }.into_any(),
                DashboardTab::Profile => view! { <ProfilePanel /> }.into_any(),
            }}
        </div>
    }
}
