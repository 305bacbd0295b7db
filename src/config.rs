/// Настройки выборки

use serde::{Deserialize, Serialize};

use crate::attributes::AttrSpec;
use crate::data::DEFAULT_ENDPOINT;
use crate::error::Result;
use crate::preprocessing::NormalizeMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Признаки; отсутствие означает "parent+beta"
    #[serde(default)]
    pub x_attributes: Option<AttrSpec>,
    /// Целевые атрибуты
    #[serde(default)]
    pub y_attributes: Option<AttrSpec>,
    #[serde(default = "default_test_proportion")]
    pub test_proportion: f64,
    #[serde(default = "default_x_normalize")]
    pub x_normalize: NormalizeMode,
    #[serde(default)]
    pub y_normalize: NormalizeMode,
    /// Подстроки формулы через пробел
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_test_proportion() -> f64 { 0.1 }
fn default_x_normalize() -> NormalizeMode { NormalizeMode::MinMax }
fn default_endpoint() -> String { DEFAULT_ENDPOINT.to_string() }

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            x_attributes: None,
            y_attributes: None,
            test_proportion: default_test_proportion(),
            x_normalize: default_x_normalize(),
            y_normalize: NormalizeMode::None,
            filter: None,
            seed: None,
            endpoint: default_endpoint(),
        }
    }
}

impl SampleConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
