// ABOUTME: Daybook CLI library: backend wiring, route gating, and logging setup
// ABOUTME: Shared by the daybook binary and its integration tests

pub mod app;
pub mod error;
pub mod logging;
pub mod routes;

pub use app::App;
pub use error::{CliError, CliResult};
pub use routes::Screen;
