pub mod app;
pub mod config;
pub mod logging;
pub mod notify;
pub mod version;
