pub mod chill;
pub mod config;
