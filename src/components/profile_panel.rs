use leptos::prelude::*;
use crate::components::tr;
use crate::session;
use crate::state::AppState;

#[component]
pub fn ProfilePanel() -> impl IntoView {
    let state = expect_context::<AppState>();

    move || {
        let (profile, locale) = state
            .dashboard
            .with(|d| (d.profile.clone().unwrap_or_default(), d.locale));
        let full_name = format!("{} {}", profile.name, profile.surname).trim().to_string();
        view! {
            <div class="card profile-card">
                <div class="card-title">{tr(locale, "Perfil do Usuário", "User profile")}</div>
                <p><strong>{tr(locale, "Nome:", "Name:")}</strong>{" "}{full_name}</p>
                <p><strong>"Email:"</strong>{" "}{profile.email}</p>
                {profile.phone.map(|phone| view! {
                    <p><strong>{tr(locale, "Telefone:", "Phone:")}</strong>{" "}{phone}</p>
                })}
                {profile.age.map(|age| view! {
                    <p><strong>{tr(locale, "Idade:", "Age:")}</strong>{" "}{age}</p>
                })}
                <button class="primary-btn" on:click=move |_| session::logout()>
                    {tr(locale, "Sair", "Sign out")}
                </button>
            </div>
        }
    }
}
