pub mod app;
pub mod dashboard;
pub mod profile_panel;
pub mod registration;
pub mod spectrum_chart;
pub mod stats_panel;
pub mod upload_card;
pub mod upload_list;

use sonalyze_core::Locale;

/// Pick the label for the active locale.
pub(crate) fn tr(locale: Locale, pt: &'static str, en: &'static str) -> &'static str {
    match locale {
        Locale::PtBr => pt,
        Locale::En => en,
    }
}
