use sonalyze_core::UserProfile;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

/// Credentials left in `localStorage` by the sign-in page.
#[derive(Clone, Debug)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Read the stored session, if the user is signed in.
pub fn load_session() -> Option<Session> {
    let storage = local_storage()?;
    let token = storage.get_item(TOKEN_KEY).ok()??;
    if token.trim().is_empty() {
        return None;
    }
    let user = storage
        .get_item(USER_KEY)
        .ok()
        .flatten()
        .and_then(|json| match serde_json::from_str::<UserProfile>(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("Ignoring unreadable stored user: {e}");
                None
            }
        })
        .unwrap_or_default();
    Some(Session { token, user })
}

/// Forget the session and return to the sign-in page.
pub fn logout() {
    if let Some(storage) = local_storage() {
        storage.remove_item(TOKEN_KEY).ok();
        storage.remove_item(USER_KEY).ok();
    }
    if let Some(window) = web_sys::window() {
        window.location().reload().ok();
    }
}

/// Origin the dashboard was served from; the API lives on the same host.
pub fn api_base_url() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Open `url` in a new browser tab.
pub fn open_in_new_tab(url: &str) {
    let Some(window) = web_sys::window() else { return };
    if let Err(e) = window.open_with_url_and_target(url, "_blank") {
        log::error!("Failed to open {url}: {e:?}");
    }
}

/// Ask the user a yes/no question with the browser's dialog.
pub fn confirm(prompt: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(prompt).ok())
        .unwrap_or(false)
}
