pub mod app;
pub mod config;
pub mod format;
pub mod logging;
pub mod system;
