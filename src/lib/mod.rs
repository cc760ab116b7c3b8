pub mod components;
pub mod config;
pub mod host;
pub mod render;
pub mod router;
pub mod types;
pub mod utils;
