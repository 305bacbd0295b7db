//! Загрузка записей с сервера TEDL

use serde_json::{Map, Value};

use crate::error::{DataError, Result};

pub const DEFAULT_ENDPOINT: &str = "http://tedesignlab.org/plot";

/// JSON-объект одной записи в исходном виде
pub type JsonObject = Map<String, Value>;

/// Источник сырых записей
pub trait RecordSource {
    fn fetch(&self) -> Result<Vec<JsonObject>>;
}

/// Один блокирующий GET без повторов и пагинации
#[derive(Debug, Clone)]
pub struct HttpRecordFetcher {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpRecordFetcher {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_ENDPOINT)
    }

    pub fn with_url(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpRecordFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSource for HttpRecordFetcher {
    fn fetch(&self) -> Result<Vec<JsonObject>> {
        tracing::info!("Fetching records from {}", self.endpoint);

        let body: Value = self
            .client
            .get(&self.endpoint)
            .query(&[("elements", "")])
            .send()?
            .error_for_status()?
            .json()?;

        let records = into_objects(body)?;
        tracing::info!("Fetched {} records", records.len());
        Ok(records)
    }
}

/// Заранее загруженные записи (без сети)
#[derive(Debug, Clone, Default)]
pub struct StaticRecords {
    records: Vec<JsonObject>,
}

impl StaticRecords {
    pub fn new(records: Vec<JsonObject>) -> Self {
        Self { records }
    }

    /// Ожидает JSON-массив объектов, как в ответе сервера
    pub fn from_value(body: Value) -> Result<Self> {
        Ok(Self::new(into_objects(body)?))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }
}

impl RecordSource for StaticRecords {
    fn fetch(&self) -> Result<Vec<JsonObject>> {
        Ok(self.records.clone())
    }
}

fn into_objects(body: Value) -> Result<Vec<JsonObject>> {
    let items = match body {
        Value::Array(items) => items,
        other => {
            return Err(DataError::UnexpectedBody(format!(
                "expected array, got {}",
                kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(object) => Ok(object),
            other => Err(DataError::UnexpectedBody(format!(
                "element {} is {}, expected object",
                i,
                kind(&other)
            ))),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
