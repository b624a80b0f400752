//! Three-state attribute values exchanged with the configuration host.
//!
//! Every attribute the host hands to a resource is either known, null, or
//! unknown (the last only while planning). [`Value`] is the dynamic form,
//! [`Attr`] the typed view, and [`Object`] the attribute map a resource
//! receives and returns.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Number, Value as Json};
use thiserror::Error;

/// Errors raised when a typed view does not match the stored value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("attribute \"{attribute}\": expected {expected}, found {found}")]
    TypeMismatch {
        attribute: String,
        expected: &'static str,
        found: &'static str,
    },
}

fn mismatch(attribute: &str, expected: &'static str, found: &Value) -> ValueError {
    ValueError::TypeMismatch {
        attribute: attribute.to_string(),
        expected,
        found: found.type_name(),
    }
}

/// A dynamically typed attribute value.
#[derive(Debug, Clone)]
pub enum Value {
    /// Not yet known; only valid inside a plan.
    Unknown,
    /// Explicitly absent.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Unordered collection. Compared as a set.
    Set(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

static NULL: Value = Value::Null;

impl Value {
    /// Build a set value, dropping duplicates and sorting elements.
    pub fn set_of(items: impl IntoIterator<Item = Value>) -> Value {
        let mut items: Vec<Value> = items.into_iter().collect();
        items.sort_by(canonical_cmp);
        items.dedup();
        Value::Set(items)
    }

    /// Name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unknown => "unknown",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int64",
            Value::Float(_) => "float64",
            Value::String(_) => "string",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    /// Neither null nor unknown.
    pub fn is_known(&self) -> bool {
        !self.is_null() && !self.is_unknown()
    }

    /// Whether this value or any nested element is unknown.
    pub fn contains_unknown(&self) -> bool {
        match self {
            Value::Unknown => true,
            Value::Set(items) => items.iter().any(Value::contains_unknown),
            Value::Map(entries) => entries.values().any(Value::contains_unknown),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view. Floats are truncated toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) => Some(f.trunc() as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&[Value]> {
        match self {
            Value::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Convert from host JSON. Arrays become sets, objects become maps.
    pub fn from_json(json: &Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            Json::String(s) => Value::String(s.clone()),
            Json::Array(items) => Value::Set(items.iter().map(Value::from_json).collect()),
            Json::Object(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert to host JSON. Unknown values are emitted as `null`; callers
    /// report them separately.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Unknown | Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::Number((*i).into()),
            Value::Float(f) => Number::from_f64(*f).map(Json::Number).unwrap_or(Json::Null),
            Value::String(s) => Json::String(s.clone()),
            Value::Set(items) => {
                let mut sorted = items.clone();
                sorted.sort_by(canonical_cmp);
                Json::Array(sorted.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => Json::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Whether a set contains the same element more than once.
    pub fn has_duplicates(&self) -> bool {
        match self {
            Value::Set(items) => {
                let mut sorted = items.clone();
                sorted.sort_by(canonical_cmp);
                sorted.windows(2).any(|w| w[0] == w[1])
            }
            _ => false,
        }
    }
}

/// Total order used to normalise sets.
fn canonical_cmp(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Unknown => 0,
            Value::Null => 1,
            Value::Bool(_) => 2,
            Value::Int(_) | Value::Float(_) => 3,
            Value::String(_) => 4,
            Value::Set(_) => 5,
            Value::Map(_) => 6,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (x @ (Value::Int(_) | Value::Float(_)), y @ (Value::Int(_) | Value::Float(_))) => x
            .as_f64()
            .unwrap_or_default()
            .partial_cmp(&y.as_f64().unwrap_or_default())
            .unwrap_or(Ordering::Equal),
        _ => rank(a).cmp(&rank(b)),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unknown, Value::Unknown) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                let normalise = |items: &[Value]| {
                    let mut sorted = items.to_vec();
                    sorted.sort_by(canonical_cmp);
                    sorted.dedup();
                    sorted
                };
                normalise(a) == normalise(b)
            }
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<BTreeSet<i64>> for Value {
    fn from(v: BTreeSet<i64>) -> Self {
        Value::Set(v.into_iter().map(Value::Int).collect())
    }
}

impl From<BTreeSet<String>> for Value {
    fn from(v: BTreeSet<String>) -> Self {
        Value::Set(v.into_iter().map(Value::String).collect())
    }
}

impl From<BTreeMap<String, String>> for Value {
    fn from(v: BTreeMap<String, String>) -> Self {
        Value::Map(v.into_iter().map(|(k, v)| (k, Value::String(v))).collect())
    }
}

impl From<BTreeMap<String, i64>> for Value {
    fn from(v: BTreeMap<String, i64>) -> Self {
        Value::Map(v.into_iter().map(|(k, v)| (k, Value::Int(v))).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Attr<T>> for Value {
    fn from(v: Attr<T>) -> Self {
        match v {
            Attr::Null => Value::Null,
            Attr::Unknown => Value::Unknown,
            Attr::Known(v) => v.into(),
        }
    }
}

/// Typed three-state view of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Attr<T> {
    #[default]
    Null,
    Unknown,
    Known(T),
}

impl<T> Attr<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Attr::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_known(self) -> Option<T> {
        match self {
            Attr::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Attr::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Attr::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Attr::Known(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Attr<U> {
        match self {
            Attr::Null => Attr::Null,
            Attr::Unknown => Attr::Unknown,
            Attr::Known(v) => Attr::Known(f(v)),
        }
    }
}

impl<T> From<Option<T>> for Attr<T> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Attr::Null, Attr::Known)
    }
}

/// Attribute map handed between the host and a resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    values: BTreeMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of an attribute; absent attributes read as null.
    pub fn get(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&NULL)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder form of [`Object::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn boolean(&self, name: &str) -> Result<Attr<bool>, ValueError> {
        match self.get(name) {
            Value::Null => Ok(Attr::Null),
            Value::Unknown => Ok(Attr::Unknown),
            Value::Bool(b) => Ok(Attr::Known(*b)),
            other => Err(mismatch(name, "bool", other)),
        }
    }

    pub fn int(&self, name: &str) -> Result<Attr<i64>, ValueError> {
        match self.get(name) {
            Value::Null => Ok(Attr::Null),
            Value::Unknown => Ok(Attr::Unknown),
            v @ (Value::Int(_) | Value::Float(_)) => Ok(v.as_i64().into()),
            other => Err(mismatch(name, "int64", other)),
        }
    }

    pub fn float(&self, name: &str) -> Result<Attr<f64>, ValueError> {
        match self.get(name) {
            Value::Null => Ok(Attr::Null),
            Value::Unknown => Ok(Attr::Unknown),
            v @ (Value::Int(_) | Value::Float(_)) => Ok(v.as_f64().into()),
            other => Err(mismatch(name, "float64", other)),
        }
    }

    pub fn string(&self, name: &str) -> Result<Attr<String>, ValueError> {
        match self.get(name) {
            Value::Null => Ok(Attr::Null),
            Value::Unknown => Ok(Attr::Unknown),
            Value::String(s) => Ok(Attr::Known(s.clone())),
            other => Err(mismatch(name, "string", other)),
        }
    }

    pub fn int_set(&self, name: &str) -> Result<Attr<BTreeSet<i64>>, ValueError> {
        self.collection(name, "set of int64", |item| item.as_i64())
    }

    pub fn string_set(&self, name: &str) -> Result<Attr<BTreeSet<String>>, ValueError> {
        self.collection(name, "set of string", |item| item.as_str().map(str::to_string))
    }

    pub fn string_map(&self, name: &str) -> Result<Attr<BTreeMap<String, String>>, ValueError> {
        match self.get(name) {
            Value::Null => Ok(Attr::Null),
            Value::Unknown => Ok(Attr::Unknown),
            Value::Map(entries) => {
                let mut out = BTreeMap::new();
                for (key, value) in entries {
                    match value {
                        Value::Unknown => return Ok(Attr::Unknown),
                        Value::String(s) => {
                            out.insert(key.clone(), s.clone());
                        }
                        other => return Err(mismatch(name, "map of string", other)),
                    }
                }
                Ok(Attr::Known(out))
            }
            other => Err(mismatch(name, "map of string", other)),
        }
    }

    fn collection<T: Ord>(
        &self,
        name: &str,
        expected: &'static str,
        convert: impl Fn(&Value) -> Option<T>,
    ) -> Result<Attr<BTreeSet<T>>, ValueError> {
        match self.get(name) {
            Value::Null => Ok(Attr::Null),
            Value::Unknown => Ok(Attr::Unknown),
            Value::Set(items) => {
                let mut out = BTreeSet::new();
                for item in items {
                    if item.is_unknown() {
                        return Ok(Attr::Unknown);
                    }
                    out.insert(convert(item).ok_or_else(|| mismatch(name, expected, item))?);
                }
                Ok(Attr::Known(out))
            }
            other => Err(mismatch(name, expected, other)),
        }
    }

    /// Replace every remaining unknown with null. Applied state never
    /// carries unknowns.
    pub fn resolve_unknowns(&mut self) {
        for value in self.values.values_mut() {
            if value.contains_unknown() {
                *value = Value::Null;
            }
        }
    }

    /// Names of attributes whose value is (or contains) unknown.
    pub fn unknown_names(&self) -> Vec<String> {
        self.values
            .iter()
            .filter(|(_, v)| v.contains_unknown())
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Build from host JSON; `unknown` lists attributes the host marks as
    /// not yet known.
    pub fn from_json(json: &Map<String, Json>, unknown: &[String]) -> Object {
        let mut object = Object::new();
        for (name, value) in json {
            object.set(name.clone(), Value::from_json(value));
        }
        for name in unknown {
            object.set(name.clone(), Value::Unknown);
        }
        object
    }

    pub fn to_json(&self) -> Map<String, Json> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
