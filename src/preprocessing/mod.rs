/// Модуль предобработки данных

pub mod filter;
pub mod normalization;
pub mod split;

pub use filter::FormulaFilter;
pub use normalization::{normalize, MinMaxNormalizer, NormalizeMode};
pub use split::{Split, Splitter};
