use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::warn;

/// Result of coercing one JSON value to a number.
///
/// `Absent` covers missing keys, `null`, containers and strings that do not
/// parse as a number. Rendering code turns it into a gap.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FieldValue {
    Number(f64),
    #[default]
    Absent,
}

impl FieldValue {
    /// The single coercion rule shared by every extraction path.
    #[must_use]
    pub fn coerce(value: &Value) -> Self {
        match value {
            Value::Number(number) => number.as_f64().map_or(Self::Absent, Self::Number),
            Value::Bool(flag) => Self::Number(if *flag { 1.0 } else { 0.0 }),
            Value::String(text) => text
                .trim()
                .parse::<f64>()
                .map_or(Self::Absent, Self::Number),
            Value::Null | Value::Array(_) | Value::Object(_) => Self::Absent,
        }
    }

    #[must_use]
    pub fn from_option(value: Option<&Value>) -> Self {
        value.map_or(Self::Absent, Self::coerce)
    }

    /// Returns the number or the NaN sentinel.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Number(value) => value,
            Self::Absent => f64::NAN,
        }
    }

    #[must_use]
    pub fn unwrap_or(self, fallback: f64) -> f64 {
        match self {
            Self::Number(value) => value,
            Self::Absent => fallback,
        }
    }

    #[must_use]
    pub fn is_present(self) -> bool {
        matches!(self, Self::Number(_))
    }
}

/// Walks `path` through nested JSON objects.
///
/// Returns `None` as soon as an intermediate node is not an object or a key
/// is missing. Arrays are never indexed.
#[must_use]
pub fn lookup<'a, S: AsRef<str>>(node: &'a Value, path: &[S]) -> Option<&'a Value> {
    let mut current = node;
    for key in path {
        current = current.as_object()?.get(key.as_ref())?;
    }
    Some(current)
}

/// Nested-path lookup coerced to `f64`, NaN when the value is unavailable.
#[must_use]
pub fn get<S: AsRef<str>>(node: &Value, path: &[S]) -> f64 {
    FieldValue::from_option(lookup(node, path)).as_f64()
}

/// Serde adapter reading an optional number through [`FieldValue::coerce`].
///
/// Values that do not coerce to a finite number load as `None`.
pub(crate) fn deserialize_coerced<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match FieldValue::coerce(&value) {
        FieldValue::Number(number) if number.is_finite() => Ok(Some(number)),
        _ => {
            if !value.is_null() {
                warn!(%value, "ignoring non-numeric setting");
            }
            Ok(None)
        }
    }
}

/// One sample of a shot log.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Value,
}

impl Record {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields: Value::Object(fields),
        }
    }

    /// Raw `time` value; unit is ambiguous until normalized.
    #[must_use]
    pub fn time(&self) -> FieldValue {
        FieldValue::from_option(lookup(&self.fields, &["time"]))
    }

    #[must_use]
    pub fn field<S: AsRef<str>>(&self, path: &[S]) -> FieldValue {
        FieldValue::from_option(lookup(&self.fields, path))
    }

    #[must_use]
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> f64 {
        get(&self.fields, path)
    }

    #[must_use]
    pub fn setpoints(&self) -> Setpoints {
        match lookup(&self.fields, &["shot", "setpoints"]) {
            Some(node @ Value::Object(_)) => Setpoints {
                pressure: FieldValue::from_option(lookup(node, &["pressure"])),
                flow: FieldValue::from_option(lookup(node, &["flow"])),
                power: FieldValue::from_option(lookup(node, &["power"])),
                active: lookup(node, &["active"]).cloned(),
            },
            _ => Setpoints::default(),
        }
    }

    #[must_use]
    pub fn as_json(&self) -> &Value {
        &self.fields
    }
}

/// Goal values recorded with one sample.
///
/// `active` is carried through untouched; it never gates the goals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Setpoints {
    pub pressure: FieldValue,
    pub flow: FieldValue,
    pub power: FieldValue,
    pub active: Option<Value>,
}
