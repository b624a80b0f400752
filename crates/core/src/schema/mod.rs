//! Schema catalogue.
//!
//! Each resource kind publishes an ordered attribute map describing its typed
//! surface: semantic type, required/optional/computed flags, sensitivity,
//! defaults, plan modifiers, validators and a markdown description. The host
//! uses it to validate configuration and compute plans.

mod plan;
mod validator;

pub use plan::Plan;
pub use validator::{Validator, ABSOLUTE_PATH, HTTP_URL};

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::Diagnostic;
use crate::value::{Object, Value};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Semantic type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrType {
    Bool,
    Int64,
    Float64,
    String,
    Set(Box<AttrType>),
    Map(Box<AttrType>),
}

impl AttrType {
    /// Type name used in schema output and diagnostics.
    pub fn name(&self) -> String {
        match self {
            AttrType::Bool => "bool".to_string(),
            AttrType::Int64 => "int64".to_string(),
            AttrType::Float64 => "float64".to_string(),
            AttrType::String => "string".to_string(),
            AttrType::Set(inner) => format!("set({})", inner.name()),
            AttrType::Map(inner) => format!("map({})", inner.name()),
        }
    }

    /// Whether a value conforms to this type. Null and unknown always do.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null | Value::Unknown) => true,
            (AttrType::Bool, Value::Bool(_)) => true,
            (AttrType::Int64, Value::Int(_)) => true,
            (AttrType::Int64, Value::Float(f)) => f.fract() == 0.0,
            (AttrType::Float64, Value::Int(_) | Value::Float(_)) => true,
            (AttrType::String, Value::String(_)) => true,
            (AttrType::Set(inner), Value::Set(items)) => {
                items.iter().all(|item| !item.is_null() && inner.accepts(item))
            }
            (AttrType::Map(inner), Value::Map(entries)) => {
                entries.values().all(|item| !item.is_null() && inner.accepts(item))
            }
            _ => false,
        }
    }
}

impl Serialize for AttrType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

/// Plan-time behaviour attached to an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanModifier {
    /// Keep the prior state value instead of marking the attribute unknown.
    UseStateForUnknown,
    /// A change to this attribute destroys and recreates the resource.
    RequiresReplace,
}

/// One attribute in a schema.
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub ty: AttrType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
    pub description: String,
}

impl Attribute {
    fn of(ty: AttrType) -> Self {
        Self {
            ty,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            default: None,
            plan_modifiers: Vec::new(),
            validators: Vec::new(),
            description: String::new(),
        }
    }

    pub fn bool() -> Self {
        Self::of(AttrType::Bool)
    }

    pub fn int64() -> Self {
        Self::of(AttrType::Int64)
    }

    pub fn float64() -> Self {
        Self::of(AttrType::Float64)
    }

    pub fn string() -> Self {
        Self::of(AttrType::String)
    }

    pub fn int_set() -> Self {
        Self::of(AttrType::Set(Box::new(AttrType::Int64)))
    }

    pub fn string_set() -> Self {
        Self::of(AttrType::Set(Box::new(AttrType::String)))
    }

    pub fn string_map() -> Self {
        Self::of(AttrType::Map(Box::new(AttrType::String)))
    }

    pub fn int_map() -> Self {
        Self::of(AttrType::Map(Box::new(AttrType::Int64)))
    }

    pub fn with_type(ty: AttrType) -> Self {
        Self::of(ty)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Static default; implies optional + computed.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self.optional = true;
        self.computed = true;
        self
    }

    pub fn use_state_for_unknown(mut self) -> Self {
        self.plan_modifiers.push(PlanModifier::UseStateForUnknown);
        self
    }

    pub fn requires_replace(mut self) -> Self {
        self.plan_modifiers.push(PlanModifier::RequiresReplace);
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set by the service only.
    pub fn is_computed_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }

    pub fn has_modifier(&self, modifier: PlanModifier) -> bool {
        self.plan_modifiers.contains(&modifier)
    }

    /// Check a configured value against type, set and validator rules.
    pub fn check(&self, name: &str, value: &Value) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if self.is_computed_only() && !value.is_null() {
            diagnostics.push(
                Diagnostic::error(
                    "Invalid Configuration for Read-Only Attribute",
                    format!("\"{}\" is computed by the service and cannot be set", name),
                )
                .at(name),
            );
            return diagnostics;
        }

        if self.required && value.is_null() {
            diagnostics.push(
                Diagnostic::error(
                    "Missing Configuration for Required Attribute",
                    format!("\"{}\" must be set", name),
                )
                .at(name),
            );
            return diagnostics;
        }

        if !value.is_known() {
            return diagnostics;
        }

        if !self.ty.accepts(value) {
            diagnostics.push(
                Diagnostic::error(
                    "Incorrect Attribute Value Type",
                    format!(
                        "expected {}, got {}",
                        self.ty.name(),
                        value.type_name()
                    ),
                )
                .at(name),
            );
            return diagnostics;
        }

        if value.has_duplicates() {
            diagnostics.push(
                Diagnostic::error(
                    "Duplicate Set Element",
                    format!("\"{}\" contains the same element more than once", name),
                )
                .at(name),
            );
        }

        for validator in &self.validators {
            if let Err(detail) = validator.check(value) {
                diagnostics.push(Diagnostic::error("Invalid Attribute Value", detail).at(name));
            }
        }

        diagnostics
    }
}

/// Ordered attribute map for one resource kind or data source.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub description: String,
    attributes: Vec<(String, Attribute)>,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute, replacing any previous one with the same name.
    pub fn attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.insert(name, attribute);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, attribute: Attribute) {
        let name = name.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = attribute,
            None => self.attributes.push((name, attribute)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attributes carrying the sensitive flag.
    pub fn sensitive_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, a)| a.sensitive)
            .map(|(n, _)| n)
            .collect()
    }

    /// Validate a configuration against this schema.
    pub fn validate(&self, config: &Object) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for (name, _) in config.iter() {
            if self.get(name).is_none() {
                diagnostics.push(
                    Diagnostic::error(
                        "Unsupported Argument",
                        format!("an argument named \"{}\" is not expected here", name),
                    )
                    .at(name.as_str()),
                );
            }
        }

        for (name, attribute) in self.iter() {
            diagnostics.extend(attribute.check(name, config.get(name)));
        }

        diagnostics
    }

    /// Restrict an object to the attributes of this schema, filling absent
    /// ones with null.
    pub fn conform(&self, object: &Object) -> Object {
        self.names()
            .map(|name| (name.to_string(), object.get(name).clone()))
            .collect()
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Attributes<'a>(&'a [(String, Attribute)]);

        impl Serialize for Attributes<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (name, attribute) in self.0 {
                    map.serialize_entry(name, attribute)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("description", &self.description)?;
        map.serialize_entry("attributes", &Attributes(&self.attributes))?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::new("Sample")
            .attribute(
                "id",
                Attribute::int64()
                    .computed()
                    .use_state_for_unknown()
                    .describe("ID."),
            )
            .attribute("name", Attribute::string().required().describe("Name."))
            .attribute(
                "method",
                Attribute::int64()
                    .optional()
                    .computed()
                    .validator(Validator::one_of_int(&[1, 2])),
            )
            .attribute("tags", Attribute::int_set().optional())
            .attribute("api_key", Attribute::string().optional().sensitive())
    }

    #[test]
    fn test_validate_accepts_valid_config() {
        let config = Object::new()
            .with("name", "test")
            .with("method", 2_i64)
            .with("tags", Value::Set(vec![Value::Int(1)]));
        assert!(sample().validate(&config).is_empty());
    }

    #[test]
    fn test_validate_rejects_out_of_range_enum() {
        let config = Object::new().with("name", "test").with("method", 3_i64);
        let diagnostics = sample().validate(&config);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("method"));
    }

    #[test]
    fn test_validate_rejects_missing_required() {
        let diagnostics = sample().validate(&Object::new());
        assert!(diagnostics
            .iter()
            .any(|d| d.attribute.as_deref() == Some("name")));
    }

    #[test]
    fn test_validate_rejects_computed_only_and_unknown_names() {
        let config = Object::new()
            .with("name", "test")
            .with("id", 4_i64)
            .with("bogus", true);
        let diagnostics = sample().validate(&config);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_validate_rejects_duplicate_tags() {
        let config = Object::new()
            .with("name", "test")
            .with("tags", Value::Set(vec![Value::Int(1), Value::Int(1)]));
        let diagnostics = sample().validate(&config);
        assert_eq!(diagnostics[0].summary, "Duplicate Set Element");
    }

    #[test]
    fn test_validate_rejects_wrong_type() {
        let config = Object::new().with("name", 5_i64);
        let diagnostics = sample().validate(&config);
        assert_eq!(diagnostics[0].summary, "Incorrect Attribute Value Type");
    }

    #[test]
    fn test_unknown_values_skip_validation() {
        let config = Object::new()
            .with("name", Value::Unknown)
            .with("method", Value::Unknown);
        assert!(sample().validate(&config).is_empty());
    }

    #[test]
    fn test_sensitive_names() {
        assert_eq!(sample().sensitive_names(), vec!["api_key"]);
    }

    #[test]
    fn test_schema_serializes_in_declaration_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        let id = json.find("\"id\"").unwrap();
        let name = json.find("\"name\"").unwrap();
        assert!(id < name);
        assert!(json.contains("\"use_state_for_unknown\""));
    }
}
