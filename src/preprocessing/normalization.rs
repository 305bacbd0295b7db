//! Нормализация данных

#![allow(non_snake_case)]

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DataError, Result};

/// Режим нормализации столбцов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizeMode {
    #[default]
    None,
    MinMax,
    /// Сейчас масштабирует так же, как MinMax
    ZIndex,
}

impl NormalizeMode {
    pub fn is_enabled(self) -> bool {
        self != NormalizeMode::None
    }
}

impl From<bool> for NormalizeMode {
    fn from(flag: bool) -> Self {
        if flag {
            NormalizeMode::MinMax
        } else {
            NormalizeMode::None
        }
    }
}

impl FromStr for NormalizeMode {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(NormalizeMode::None),
            "minmax" => Ok(NormalizeMode::MinMax),
            "z-index" => Ok(NormalizeMode::ZIndex),
            other => Err(DataError::InvalidConfig(format!(
                "unknown normalize mode '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for NormalizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeMode::None => f.write_str("none"),
            NormalizeMode::MinMax => f.write_str("minmax"),
            NormalizeMode::ZIndex => f.write_str("z-index"),
        }
    }
}

impl Serialize for NormalizeMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            NormalizeMode::None => serializer.serialize_bool(false),
            NormalizeMode::MinMax => serializer.serialize_str("minmax"),
            NormalizeMode::ZIndex => serializer.serialize_str("z-index"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModeRepr {
    Flag(bool),
    Name(String),
}

/// Принимает `null`, `true`/`false`, `"minmax"`, `"z-index"`
impl<'de> Deserialize<'de> for NormalizeMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Option::<ModeRepr>::deserialize(deserializer)? {
            None => Ok(NormalizeMode::None),
            Some(ModeRepr::Flag(flag)) => Ok(flag.into()),
            Some(ModeRepr::Name(name)) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Min-max масштабирование по столбцам
pub struct MinMaxNormalizer {
    min: Option<Array1<f64>>,
    range: Option<Array1<f64>>,
    is_fitted: bool,
}

impl MinMaxNormalizer {
    pub fn new() -> Self {
        Self {
            min: None,
            range: None,
            is_fitted: false,
        }
    }

    pub fn fit(&mut self, X: &Array2<f64>) -> Result<()> {
        if X.nrows() == 0 {
            return Err(DataError::EmptyDataset);
        }

        let min = X.fold_axis(Axis(0), f64::INFINITY, |acc, v| acc.min(*v));
        let max = X.fold_axis(Axis(0), f64::NEG_INFINITY, |acc, v| acc.max(*v));
        let range = &max - &min;

        for (j, r) in range.iter().enumerate() {
            if *r <= 0.0 {
                tracing::warn!("Column {} is constant, leaving it unscaled", j);
            }
        }

        self.min = Some(min);
        self.range = Some(range);
        self.is_fitted = true;
        Ok(())
    }

    pub fn transform(&self, X: &Array2<f64>) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(DataError::NotFitted);
        }

        let min = self.min.as_ref().ok_or(DataError::NotFitted)?;
        let range = self.range.as_ref().ok_or(DataError::NotFitted)?;

        if X.ncols() != min.len() {
            return Err(DataError::InvalidConfig(format!(
                "expected {} columns, got {}",
                min.len(),
                X.ncols()
            )));
        }

        // (X - min) / (max - min); постоянные столбцы остаются как есть
        let mut normalized = X.clone();
        for mut row in normalized.rows_mut() {
            for (j, val) in row.iter_mut().enumerate() {
                if range[j] > 0.0 {
                    *val = (*val - min[j]) / range[j];
                }
            }
        }

        Ok(normalized)
    }

    pub fn fit_transform(&mut self, X: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(X)?;
        self.transform(X)
    }
}

impl Default for MinMaxNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Нормализует матрицу согласно режиму; форма и порядок сохраняются
pub fn normalize(X: &Array2<f64>, mode: NormalizeMode) -> Result<Array2<f64>> {
    if !mode.is_enabled() || X.nrows() == 0 {
        return Ok(X.clone());
    }

    tracing::debug!("Normalizing {}x{} matrix ({})", X.nrows(), X.ncols(), mode);

    MinMaxNormalizer::new().fit_transform(X)
}
