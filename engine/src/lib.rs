pub mod config;
pub mod games;
pub mod logger;

pub use logger::LogLevel;
