//! Формирование сырой и выбранной записи из JSON-объекта

use std::collections::BTreeMap;

use serde_json::Value;

use crate::data::fetcher::JsonObject;
use crate::error::{DataError, Result};
use crate::types::{AttrValue, Attribute, Coercion, PickedRecord, RawRecord, FIELD_TABLE};

pub struct RecordShaper<'a> {
    attributes: &'a [Attribute],
}

impl<'a> RecordShaper<'a> {
    pub fn new(attributes: &'a [Attribute]) -> Self {
        Self { attributes }
    }

    /// `id` задается вызывающим (счетчик с 1), остальные поля читаются по таблице.
    /// Отсутствующий ключ - ошибка для всей загрузки.
    pub fn shape(&self, object: &JsonObject, id: i64) -> Result<(RawRecord, PickedRecord)> {
        let mut fields = BTreeMap::new();
        fields.insert(Attribute::Id, AttrValue::Int(id));

        for (attribute, key, coercion) in FIELD_TABLE {
            let value = object.get(*key).ok_or_else(|| DataError::MalformedRecord {
                id,
                field: key.to_string(),
                reason: "is missing".to_string(),
            })?;

            let coerced = coerce(value, *coercion).map_err(|reason| DataError::MalformedRecord {
                id,
                field: key.to_string(),
                reason,
            })?;
            fields.insert(*attribute, coerced);
        }

        let raw = RawRecord::new(fields);
        let picked = PickedRecord::pick(&raw, self.attributes);
        Ok((raw, picked))
    }
}

fn coerce(value: &Value, coercion: Coercion) -> std::result::Result<AttrValue, String> {
    match coercion {
        Coercion::Int => to_int(value).map(AttrValue::Int),
        Coercion::Float => to_float(value).map(AttrValue::Float),
        Coercion::Text => Ok(AttrValue::Text(to_text(value))),
    }
}

fn to_int(value: &Value) -> std::result::Result<i64, String> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(v)
            } else {
                match n.as_f64() {
                    // дробная часть отбрасывается
                    Some(v) if v.is_finite() && v.abs() < i64::MAX as f64 => Ok(v.trunc() as i64),
                    _ => Err(format!("is out of integer range: {}", n)),
                }
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("is not an integer: {:?}", s)),
        Value::Bool(b) => Ok(*b as i64),
        other => Err(format!("is not an integer: {}", other)),
    }
}

fn to_float(value: &Value) -> std::result::Result<f64, String> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| format!("is not a float: {}", n)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("is not a float: {:?}", s)),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(format!("is not a float: {}", other)),
    }
}

fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Полный объект в формате ответа сервера
    pub(crate) fn sample_object(formula: &str, bandgap: f64) -> JsonObject {
        let mut object = JsonObject::new();
        for (_, key, coercion) in FIELD_TABLE {
            let value = match coercion {
                Coercion::Int => json!(2),
                Coercion::Float => json!(1.5),
                Coercion::Text => json!("12345"),
            };
            object.insert(key.to_string(), value);
        }
        object.insert("formula".to_string(), json!(formula));
        object.insert("bandgap".to_string(), json!(bandgap));
        object
    }

    #[test]
    fn test_shape_uses_renamed_source_keys() {
        let mut object = sample_object("Al2O3", 0.8);
        object.insert("b".to_string(), json!(110.5));
        object.insert("kappa".to_string(), json!("3.25"));
        object.insert("vol".to_string(), json!(42));
        object.insert("avgelectron".to_string(), json!(1.9));

        let attributes = [Attribute::B, Attribute::KappaTotal, Attribute::Vol];
        let (raw, picked) = RecordShaper::new(&attributes).shape(&object, 7).unwrap();

        assert_eq!(raw.id(), 7);
        assert_eq!(raw.formula(), "Al2O3");
        assert_eq!(raw.get(Attribute::B), Some(&AttrValue::Float(110.5)));
        assert_eq!(raw.get(Attribute::KappaTotal), Some(&AttrValue::Float(3.25)));
        assert_eq!(raw.get(Attribute::Vol), Some(&AttrValue::Float(42.0)));
        assert_eq!(raw.get(Attribute::AvgElectroneg), Some(&AttrValue::Float(1.9)));
        assert_eq!(raw.get(Attribute::HeaviestAtomNo), None);

        let values: Vec<_> = picked.values().cloned().collect();
        assert_eq!(
            values,
            vec![AttrValue::Float(110.5), AttrValue::Float(3.25), AttrValue::Float(42.0)]
        );
    }

    #[test]
    fn test_integer_fields_are_coerced() {
        let mut object = sample_object("AlSO", 1.0);
        object.insert("spacegroup".to_string(), json!(225.9));
        object.insert("numofatoms".to_string(), json!(" 12 "));
        object.insert("icsd".to_string(), json!(98765));

        let (raw, _) = RecordShaper::new(&[]).shape(&object, 1).unwrap();
        assert_eq!(raw.get(Attribute::SpaceGroup), Some(&AttrValue::Int(225)));
        assert_eq!(raw.get(Attribute::NumOfAtoms), Some(&AttrValue::Int(12)));
        assert_eq!(raw.get(Attribute::Icsd), Some(&AttrValue::Text("98765".to_string())));
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let mut object = sample_object("AlSO", 1.0);
        object.remove("kappa");

        let err = RecordShaper::new(&[]).shape(&object, 3).unwrap_err();
        match err {
            DataError::MalformedRecord { id, field, .. } => {
                assert_eq!(id, 3);
                assert_eq!(field, "kappa");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_uncoercible_value_is_fatal() {
        let mut object = sample_object("AlSO", 1.0);
        object.insert("density".to_string(), json!("dense"));
        assert!(RecordShaper::new(&[]).shape(&object, 1).is_err());

        let mut object = sample_object("AlSO", 1.0);
        object.insert("maxnn".to_string(), json!(null));
        assert!(RecordShaper::new(&[]).shape(&object, 1).is_err());
    }

    #[test]
    fn test_picked_unknown_to_raw_defaults_to_zero() {
        let object = sample_object("AlSO", 1.0);
        let attributes = [Attribute::HeaviestAtomNo, Attribute::Id];
        let (_, picked) = RecordShaper::new(&attributes).shape(&object, 5).unwrap();
        assert_eq!(picked.get(Attribute::HeaviestAtomNo), Some(&AttrValue::Int(0)));
        assert_eq!(picked.get(Attribute::Id), Some(&AttrValue::Int(5)));
    }
}
