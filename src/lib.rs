//! TEDL data - подготовка датасета термоэлектрических материалов

pub mod attributes;
pub mod config;
pub mod data;
pub mod error;
pub mod preprocessing;
pub mod sample;
pub mod types;

pub use types::*;
pub use data::*;
pub use preprocessing::*;

// Re-export для удобства
pub use attributes::{resolve, AttrSpec};
pub use config::SampleConfig;
pub use error::{DataError, Result};
pub use sample::Sample;
