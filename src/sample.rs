//! Выборка: признаки и цели из двух загрузок, фильтр, нормализация, разбиение

use ndarray::{Array2, Axis};

use crate::attributes::resolve;
use crate::config::SampleConfig;
use crate::data::{Dataset, HttpRecordFetcher, RecordSource};
use crate::error::Result;
use crate::preprocessing::filter::joint_indices;
use crate::preprocessing::{normalize, Split, Splitter};
use crate::types::Attribute;

pub struct Sample {
    x_attributes: Vec<Attribute>,
    y_attributes: Vec<Attribute>,
    formula: Vec<String>,
    raw_x: Array2<f64>,
    raw_y: Array2<f64>,
    norm_x: Array2<f64>,
    norm_y: Array2<f64>,
    split: Split,
    train_x: Array2<f64>,
    test_x: Array2<f64>,
    train_y: Array2<f64>,
    test_y: Array2<f64>,
    train_formula: Vec<String>,
    test_formula: Vec<String>,
}

impl Sample {
    /// Две загрузки с сервера: для признаков и для целей
    pub fn load(config: &SampleConfig) -> Result<Self> {
        let fetcher = HttpRecordFetcher::with_url(&config.endpoint);
        Self::from_source(&fetcher, config)
    }

    pub fn from_source<S: RecordSource + ?Sized>(source: &S, config: &SampleConfig) -> Result<Self> {
        let x = Dataset::load(source, resolve(config.x_attributes.as_ref()))?;
        let y = Dataset::load(source, resolve(config.y_attributes.as_ref()))?;
        Self::from_datasets(&x, &y, config)
    }

    /// Наборы должны совпадать по формулам построчно: явного ключа для соединения нет
    pub fn from_datasets(x: &Dataset, y: &Dataset, config: &SampleConfig) -> Result<Self> {
        let indices = joint_indices(x.formulas(), y.formulas(), config.filter.as_deref())?;

        let raw_x = x.matrix()?.select(Axis(0), &indices);
        let raw_y = y.matrix()?.select(Axis(0), &indices);
        let formula: Vec<String> = indices.iter().map(|&i| x.formulas()[i].clone()).collect();

        let norm_x = normalize(&raw_x, config.x_normalize)?;
        let norm_y = normalize(&raw_y, config.y_normalize)?;

        let split = Splitter::new(config.seed).split(indices.len(), config.test_proportion)?;

        let pick = |rows: &[usize]| -> Vec<String> { rows.iter().map(|&i| formula[i].clone()).collect() };
        let train_formula = pick(&split.train);
        let test_formula = pick(&split.test);

        Ok(Self {
            x_attributes: x.attributes().to_vec(),
            y_attributes: y.attributes().to_vec(),
            train_x: norm_x.select(Axis(0), &split.train),
            test_x: norm_x.select(Axis(0), &split.test),
            train_y: norm_y.select(Axis(0), &split.train),
            test_y: norm_y.select(Axis(0), &split.test),
            train_formula,
            test_formula,
            formula,
            raw_x,
            raw_y,
            norm_x,
            norm_y,
            split,
        })
    }

    /// (train_x, test_x, train_y, test_y, test_formula)
    pub fn data(&self) -> (&Array2<f64>, &Array2<f64>, &Array2<f64>, &Array2<f64>, &[String]) {
        (
            &self.train_x,
            &self.test_x,
            &self.train_y,
            &self.test_y,
            &self.test_formula,
        )
    }

    pub fn x_attributes(&self) -> &[Attribute] {
        &self.x_attributes
    }

    pub fn y_attributes(&self) -> &[Attribute] {
        &self.y_attributes
    }

    /// Формулы строк, прошедших фильтр
    pub fn formula(&self) -> &[String] {
        &self.formula
    }

    pub fn train_formula(&self) -> &[String] {
        &self.train_formula
    }

    pub fn raw_x(&self) -> &Array2<f64> {
        &self.raw_x
    }

    pub fn raw_y(&self) -> &Array2<f64> {
        &self.raw_y
    }

    pub fn norm_x(&self) -> &Array2<f64> {
        &self.norm_x
    }

    pub fn norm_y(&self) -> &Array2<f64> {
        &self.norm_y
    }

    /// Индексы относительно отфильтрованных строк
    pub fn split(&self) -> &Split {
        &self.split
    }
}
