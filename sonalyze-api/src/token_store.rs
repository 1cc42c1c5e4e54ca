use std::path::{Path, PathBuf};

/// App identifier used for the config directory name.
const APP_IDENTIFIER: &str = "com.sonalyze.app";
const TOKEN_FILENAME: &str = "token.txt";

/// Environment variable consulted when no token is passed or stored.
pub const TOKEN_ENV: &str = "SONALYZE_TOKEN";

/// Resolve the directory where app config lives.
///
/// On Windows: `%APPDATA%\com.sonalyze.app\`
/// On macOS:   `~/Library/Application Support/com.sonalyze.app/`
/// On Linux:   `$XDG_CONFIG_HOME/com.sonalyze.app/` or `~/.config/com.sonalyze.app/`
fn app_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(|d| PathBuf::from(d).join(APP_IDENTIFIER))
    }
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join("Library/Application Support").join(APP_IDENTIFIER))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
            .map(|d| d.join(APP_IDENTIFIER))
    }
}

/// Bearer-token file, defaulting to the per-user config directory.
#[derive(Clone, Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn default_location() -> Option<Self> {
        app_config_dir().map(|d| Self::at(d.join(TOKEN_FILENAME)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token, if any.
    pub fn load(&self) -> Option<String> {
        let token = std::fs::read_to_string(&self.path).ok()?;
        let token = token.trim().to_string();
        if token.is_empty() { None } else { Some(token) }
    }

    pub fn save(&self, token: &str) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config dir: {e}"))?;
        }
        std::fs::write(&self.path, token.trim())
            .map_err(|e| format!("Failed to write token: {e}"))
    }

    pub fn clear(&self) -> Result<(), String> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .map_err(|e| format!("Failed to remove token: {e}"))?;
        }
        Ok(())
    }
}

/// Resolve a bearer token from (in priority order):
/// 1. Explicit `--token` argument
/// 2. Stored token file
/// 3. `SONALYZE_TOKEN` environment variable (a `.env` file is loaded by the caller)
pub fn resolve_token(explicit: Option<&str>, store: Option<&TokenStore>) -> Option<String> {
    if let Some(t) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Some(t.to_string());
    }
    if let Some(t) = store.and_then(TokenStore::load) {
        return Some(t);
    }
    std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty())
}
