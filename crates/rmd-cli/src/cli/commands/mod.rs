//! CLI command handlers. Each command is in its own file.

mod duration;
mod frame;
mod probe;

pub use duration::run_duration;
pub use frame::run_frame;
pub use probe::run_probe;
