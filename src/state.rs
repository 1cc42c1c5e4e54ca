use leptos::prelude::*;
use sonalyze_api::ApiClient;
use sonalyze_core::{DashboardState, Locale};

use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum DashboardTab {
    #[default]
    Uploads,
    Stats,
    Profile,
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub dashboard: RwSignal<DashboardState>,
    pub tab: RwSignal<DashboardTab>,
    base_url: StoredValue<String>,
    token: StoredValue<String>,
}

impl AppState {
    pub fn new(session: Session, base_url: String) -> Self {
        Self {
            dashboard: RwSignal::new(
                DashboardState::new(Locale::PtBr).with_profile(session.user),
            ),
            tab: RwSignal::new(DashboardTab::Uploads),
            base_url: StoredValue::new(base_url),
            token: StoredValue::new(session.token),
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url.get_value(), self.token.get_value())
    }

    pub fn locale(&self) -> Locale {
        self.dashboard.with_untracked(|d| d.locale)
    }
}
