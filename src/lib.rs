pub mod analysis;
pub mod app;
pub mod cache;
pub mod colors;
pub mod conditions;
pub mod config;
pub mod format;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod render;
pub mod stations;
pub mod verify;
