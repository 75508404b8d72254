pub mod collector;
pub mod disk;
pub mod platform;
pub mod process;
pub mod provider;
pub mod snapshot;
