pub mod config;
pub mod logging;

pub mod estimate;
pub mod fetch;
pub mod mp3;
pub mod retry;
