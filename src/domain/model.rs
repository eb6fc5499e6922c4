use crate::utils::error::{MathApiError, Result};
use crate::utils::validation;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A number as it appears in a request or response body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Real(f64),
}

impl Numeric {
    /// Integral values become `Int` so that `4 * 4` is rendered as `16`, not `16.0`.
    pub fn from_f64(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
            Numeric::Int(value as i64)
        } else {
            Numeric::Real(value)
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Numeric::Int(v) => v as f64,
            Numeric::Real(v) => v,
        }
    }

    pub fn is_finite(self) -> bool {
        self.value().is_finite()
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match *self {
            Numeric::Int(v) => serializer.serialize_i64(v),
            Numeric::Real(v) => serializer.serialize_f64(v),
        }
    }
}

/// Raw query parameters of a single request.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn number(&self, name: &str) -> Result<Numeric> {
        let raw = self.get(name).ok_or_else(|| MathApiError::missing(name))?;
        validation::parse_number(name, raw)
    }

    pub fn optional_number(&self, name: &str) -> Result<Option<Numeric>> {
        self.get(name)
            .map(|raw| validation::parse_number(name, raw))
            .transpose()
    }

    pub fn number_list(&self, name: &str) -> Result<Vec<Numeric>> {
        let raw = self.get(name).ok_or_else(|| MathApiError::missing(name))?;
        validation::parse_number_list(name, raw)
    }
}

impl From<HashMap<String, String>> for QueryParams {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Number(Numeric),
    List(Vec<Numeric>),
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Field::Number(n) => n.serialize(serializer),
            Field::List(items) => items.serialize(serializer),
        }
    }
}

/// Echoed inputs followed by computed outputs, serialized as one flat JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputationResult {
    fields: Vec<(&'static str, Field)>,
}

impl ComputationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, name: &'static str, value: Numeric) -> Self {
        self.fields.push((name, Field::Number(value)));
        self
    }

    pub fn input_list(mut self, name: &'static str, values: Vec<Numeric>) -> Self {
        self.fields.push((name, Field::List(values)));
        self
    }

    pub fn output(mut self, name: &'static str, value: f64) -> Self {
        self.fields.push((name, Field::Number(Numeric::from_f64(value))));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Field::Number(n) => Some(n.value()),
            Field::List(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rejects overflowed or NaN outputs, which JSON cannot carry.
    pub fn ensure_finite(self) -> Result<Self> {
        for (name, field) in &self.fields {
            if let Field::Number(n) = field {
                if !n.is_finite() {
                    return Err(MathApiError::undefined(format!(
                        "'{}' is not a finite number",
                        name
                    )));
                }
            }
        }
        Ok(self)
    }
}

impl Serialize for ComputationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
