pub mod chill;
pub mod commands;
pub mod config;
pub mod error;
pub mod record;
pub mod service;
pub mod units;
pub mod xtypes;

use clap::ValueEnum;
use serde::Serialize;

pub use chill::{Algorithm, ChillTime};
pub use error::XTypeError;

#[derive(Clone, Copy, ValueEnum, Debug, Default, Serialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
