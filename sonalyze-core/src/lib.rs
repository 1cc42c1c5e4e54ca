pub mod api;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod messages;
pub mod spectrum;
pub mod state;
pub mod types;
pub mod validate;

pub use api::DashboardApi;
pub use dashboard::Dashboard;
pub use error::{ApiError, DashboardError, ValidationError};
pub use messages::{Locale, Message};
pub use state::{DashboardState, FollowUp, TranscriptionStep, ViewMode, DEFAULT_PAGE_SIZE};
pub use types::*;
