//! Набор записей одной загрузки

use ndarray::Array2;

use crate::data::fetcher::{JsonObject, RecordSource};
use crate::data::shaper::RecordShaper;
use crate::error::{DataError, Result};
use crate::types::{AttrValue, Attribute, PickedRecord, RawRecord};

/// Сырые записи, выбранные записи и формулы - параллельные списки одной длины
#[derive(Debug, Clone)]
pub struct Dataset {
    attributes: Vec<Attribute>,
    raw: Vec<RawRecord>,
    picked: Vec<PickedRecord>,
    formulas: Vec<String>,
}

impl Dataset {
    /// Одна загрузка из источника и формирование всех записей
    pub fn load<S: RecordSource + ?Sized>(source: &S, attributes: Vec<Attribute>) -> Result<Self> {
        let records = source.fetch()?;
        Self::from_records(&records, attributes)
    }

    pub fn from_records(records: &[JsonObject], attributes: Vec<Attribute>) -> Result<Self> {
        let shaper = RecordShaper::new(&attributes);

        let mut raw = Vec::with_capacity(records.len());
        let mut picked = Vec::with_capacity(records.len());
        let mut formulas = Vec::with_capacity(records.len());

        for (i, object) in records.iter().enumerate() {
            let (raw_row, picked_row) = shaper.shape(object, i as i64 + 1)?;
            formulas.push(raw_row.formula().to_string());
            raw.push(raw_row);
            picked.push(picked_row);
        }

        tracing::info!(
            "Dataset built: {} records, {} attributes",
            raw.len(),
            attributes.len()
        );

        Ok(Self {
            attributes,
            raw,
            picked,
            formulas,
        })
    }

    /// Строки значений в порядке конфигурации, формулы и сама конфигурация
    pub fn array(&self) -> (Vec<Vec<AttrValue>>, &[String], &[Attribute]) {
        let rows = self
            .picked
            .iter()
            .map(|row| row.values().cloned().collect())
            .collect();
        (rows, &self.formulas, &self.attributes)
    }

    /// Числовая матрица (строки x атрибуты); текстовые атрибуты не допускаются
    pub fn matrix(&self) -> Result<Array2<f64>> {
        let mut matrix = Array2::zeros((self.picked.len(), self.attributes.len()));
        for (i, row) in self.picked.iter().enumerate() {
            for (j, (attribute, value)) in self.attributes.iter().zip(row.values()).enumerate() {
                matrix[[i, j]] = value
                    .as_f64()
                    .ok_or(DataError::NonNumericAttribute(*attribute))?;
            }
        }
        Ok(matrix)
    }

    pub fn dict(&self) -> &[PickedRecord] {
        &self.picked
    }

    pub fn raw(&self) -> &[RawRecord] {
        &self.raw
    }

    pub fn formulas(&self) -> &[String] {
        &self.formulas
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
