pub mod cli;
pub mod config;
pub mod error;
pub mod importer;
pub mod logging;
pub mod render;
pub mod scan;
