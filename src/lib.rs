pub mod config;
pub mod error;
pub mod format;
pub mod report;
pub mod system;
