//! In-memory configuration document.
//!
//! `Document` -> `IndicatorGroup` -> `Instance` -> `Parameter`, serialized
//! as JSON. Lookups are limited to: instance by type name and id, instances
//! by category, named parameter of an instance, attribute fetch, and
//! enumeration of all instances with their type name.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tachart_types::{Category, CompoundKey};

use crate::error::ConfigError;

/// Root of the store document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// One group per type name, in document order.
    #[serde(default)]
    pub indicators: Vec<IndicatorGroup>,
}

/// All configured instances of one type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorGroup {
    /// Type name the instances are dispatched on.
    pub identifier: String,
    /// Optional human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Configured instances.
    #[serde(default)]
    pub instances: Vec<Instance>,
}

/// One configured instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Positive id, unique within the group.
    pub id: u32,
    /// Raw category attribute; absent or empty means `DEFAULT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Ordered parameters with unique names.
    #[serde(default)]
    pub params: Vec<Parameter>,
}

/// Named raw parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, unique within the instance.
    pub name: String,
    /// Optional type hint.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,
    /// Raw text value.
    pub value: String,
}

impl Parameter {
    /// Creates an untyped parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: None,
            value: value.into(),
        }
    }

    /// Sets the type hint.
    #[must_use]
    pub fn with_type(mut self, hint: impl Into<String>) -> Self {
        self.type_hint = Some(hint.into());
        self
    }
}

impl Instance {
    /// Named parameter child.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Mutable named parameter child.
    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.params.iter_mut().find(|p| p.name == name)
    }

    /// `true` if the category attribute equals `category`. An absent or
    /// empty attribute equals `DEFAULT`.
    #[must_use]
    pub fn in_category(&self, category: Category) -> bool {
        match self.category.as_deref() {
            None | Some("") => category == Category::Default,
            Some(raw) => raw == category.as_str(),
        }
    }
}

impl IndicatorGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            description: None,
            instances: Vec::new(),
        }
    }

    /// Highest id in use, 0 when the group is empty.
    #[must_use]
    pub fn max_id(&self) -> u32 {
        self.instances.iter().map(|i| i.id).max().unwrap_or(0)
    }
}

impl Document {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Format`] for invalid JSON and the duplicate or
    /// key errors of [`Document::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let document: Document = serde_json::from_str(text)?;
        document.validate()?;
        Ok(document)
    }

    /// Pretty-printed JSON text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Format`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks identifiers, ids and parameter names.
    ///
    /// # Errors
    /// Returns the first violation found in document order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut groups = HashSet::new();
        for group in &self.indicators {
            if !groups.insert(group.identifier.as_str()) {
                return Err(ConfigError::DuplicateGroup(group.identifier.clone()));
            }

            let mut ids = HashSet::new();
            for instance in &group.instances {
                let key = CompoundKey::new(group.identifier.as_str(), instance.id)?;
                if !ids.insert(instance.id) {
                    return Err(ConfigError::DuplicateInstance {
                        type_name: group.identifier.clone(),
                        id: instance.id,
                    });
                }

                let mut names = HashSet::new();
                for param in &instance.params {
                    if !names.insert(param.name.as_str()) {
                        return Err(ConfigError::DuplicateParameter {
                            key: key.to_string(),
                            name: param.name.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Group by type name.
    #[must_use]
    pub fn group(&self, type_name: &str) -> Option<&IndicatorGroup> {
        self.indicators.iter().find(|g| g.identifier == type_name)
    }

    /// Mutable group by type name.
    pub fn group_mut(&mut self, type_name: &str) -> Option<&mut IndicatorGroup> {
        self.indicators.iter_mut().find(|g| g.identifier == type_name)
    }

    /// Instance by type name and id.
    #[must_use]
    pub fn instance(&self, key: &CompoundKey) -> Option<&Instance> {
        self.group(key.type_name())?
            .instances
            .iter()
            .find(|i| i.id == key.id())
    }

    /// Mutable instance by type name and id.
    pub fn instance_mut(&mut self, key: &CompoundKey) -> Option<&mut Instance> {
        self.group_mut(key.type_name())?
            .instances
            .iter_mut()
            .find(|i| i.id == key.id())
    }

    /// All instances with their type name, in document order.
    pub fn instances(&self) -> impl Iterator<Item = (&str, &Instance)> {
        self.indicators.iter().flat_map(|group| {
            group
                .instances
                .iter()
                .map(move |instance| (group.identifier.as_str(), instance))
        })
    }

    /// Keys of all instances, in document order.
    ///
    /// Entries that do not form a valid key are skipped; a validated
    /// document has none.
    pub fn keys(&self) -> impl Iterator<Item = CompoundKey> + '_ {
        self.instances()
            .filter_map(|(type_name, instance)| CompoundKey::new(type_name, instance.id).ok())
    }

    /// Keys of the instances in `category`, anywhere in the document.
    pub fn keys_in_category(&self, category: Category) -> impl Iterator<Item = CompoundKey> + '_ {
        self.instances()
            .filter(move |(_, instance)| instance.in_category(category))
            .filter_map(|(type_name, instance)| CompoundKey::new(type_name, instance.id).ok())
    }
}
