pub mod app;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{ensure_seeded, load_data, resolve_data_path};
