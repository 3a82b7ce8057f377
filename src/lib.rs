pub mod api;
pub mod app;
pub mod approvals;
pub mod checklist;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod machine;
pub mod models;
pub mod router;
pub mod shell;
pub mod state;
pub mod stats;
pub mod ui;
pub mod views;

pub use api::ApiClient;
pub use app::App;
pub use config::ClientConfig;
pub use errors::AppError;
pub use state::AppState;
