use crate::value::{Object, Value};

use super::{PlanModifier, Schema};

/// Planned state for one resource instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub state: Object,
    /// Attributes whose change forces destroy-and-recreate.
    pub requires_replace: Vec<String>,
}

impl Plan {
    /// Whether the plan differs from the prior state.
    pub fn has_changes(&self, prior: Option<&Object>) -> bool {
        prior.map_or(true, |prior| &self.state != prior)
    }
}

impl Schema {
    /// Compute the planned state from configuration and optional prior
    /// state.
    ///
    /// Configured values win, then static defaults. Attributes the service
    /// computes become unknown unless they carry `UseStateForUnknown` and the
    /// prior state knows them. A configuration identical to prior state plans
    /// no change at all.
    pub fn plan(&self, config: &Object, prior: Option<&Object>) -> Plan {
        let mut proposed = Object::new();
        let mut open = Vec::new();

        for (name, attribute) in self.iter() {
            let configured = config.get(name);
            if !configured.is_null() && !attribute.is_computed_only() {
                proposed.set(name, configured.clone());
            } else if let Some(default) = &attribute.default {
                proposed.set(name, default.clone());
            } else if attribute.computed {
                open.push(name);
            } else {
                proposed.set(name, Value::Null);
            }
        }

        if let Some(prior) = prior {
            let unchanged = proposed.iter().all(|(name, value)| prior.get(name) == value);
            if unchanged {
                return Plan {
                    state: self.conform(prior),
                    requires_replace: Vec::new(),
                };
            }
        }

        for name in open {
            let keep_prior = self
                .get(name)
                .is_some_and(|a| a.has_modifier(PlanModifier::UseStateForUnknown));
            let value = match prior {
                Some(prior) if keep_prior && prior.get(name).is_known() => prior.get(name).clone(),
                _ => Value::Unknown,
            };
            proposed.set(name, value);
        }

        let requires_replace = match prior {
            Some(prior) => self
                .iter()
                .filter(|(_, a)| a.has_modifier(PlanModifier::RequiresReplace))
                .filter(|(name, _)| {
                    let planned = proposed.get(name);
                    !planned.is_unknown() && planned != prior.get(name)
                })
                .map(|(name, _)| name.to_string())
                .collect(),
            None => Vec::new(),
        };

        Plan {
            state: proposed,
            requires_replace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Attribute;

    fn schema() -> Schema {
        Schema::new("Test")
            .attribute("id", Attribute::int64().computed().use_state_for_unknown())
            .attribute("path", Attribute::string().required().requires_replace())
            .attribute("label", Attribute::string().optional())
            .attribute("accessible", Attribute::bool().computed())
            .attribute("enable", Attribute::bool().default_value(true))
    }

    #[test]
    fn test_create_plan_marks_computed_unknown() {
        let config = Object::new().with("path", "/tv");
        let plan = schema().plan(&config, None);

        assert!(plan.state.get("id").is_unknown());
        assert!(plan.state.get("accessible").is_unknown());
        assert!(plan.state.get("label").is_null());
        assert_eq!(plan.state.get("enable"), &Value::Bool(true));
        assert!(plan.requires_replace.is_empty());
    }

    #[test]
    fn test_update_plan_keeps_id_from_state() {
        let prior = Object::new()
            .with("id", 7_i64)
            .with("path", "/tv")
            .with("label", Value::Null)
            .with("accessible", true)
            .with("enable", true);
        let config = Object::new().with("path", "/tv").with("label", "new");

        let plan = schema().plan(&config, Some(&prior));
        assert_eq!(plan.state.get("id"), &Value::Int(7));
        assert!(plan.state.get("accessible").is_unknown());
        assert_eq!(plan.state.get("label"), &Value::from("new"));
        assert!(plan.has_changes(Some(&prior)));
    }

    #[test]
    fn test_unchanged_config_plans_no_diff() {
        let prior = Object::new()
            .with("id", 7_i64)
            .with("path", "/tv")
            .with("label", "x")
            .with("accessible", true)
            .with("enable", true);
        let config = Object::new().with("path", "/tv").with("label", "x");

        let plan = schema().plan(&config, Some(&prior));
        assert_eq!(plan.state, prior);
        assert!(!plan.has_changes(Some(&prior)));
    }

    #[test]
    fn test_requires_replace_detected() {
        let prior = Object::new()
            .with("id", 7_i64)
            .with("path", "/tv")
            .with("accessible", true)
            .with("enable", true);
        let config = Object::new().with("path", "/anime");

        let plan = schema().plan(&config, Some(&prior));
        assert_eq!(plan.requires_replace, vec!["path".to_string()]);
    }
}
