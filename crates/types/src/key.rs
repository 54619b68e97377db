//! Compound `TypeName_InstanceID` keys.
//!
//! This is the only place that knows the textual key format. Everything
//! else passes [`CompoundKey`] values around.

use std::fmt;
use std::str::FromStr;

use crate::error::ParamError;

/// Separator between the type name and the instance id.
pub const KEY_SEPARATOR: char = '_';

/// Address of one configured indicator instance.
///
/// The text form is `"{type_name}_{id}"`. Parsing splits on the last
/// separator, so type names may themselves contain underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompoundKey {
    type_name: String,
    id: u32,
}

impl CompoundKey {
    /// Creates a key from its parts.
    ///
    /// # Errors
    /// Returns [`ParamError::InvalidKey`] if the type name is empty or the id is zero.
    pub fn new(type_name: impl Into<String>, id: u32) -> Result<Self, ParamError> {
        let type_name = type_name.into();
        if type_name.is_empty() || id == 0 {
            return Err(ParamError::InvalidKey(format!(
                "{type_name}{KEY_SEPARATOR}{id}"
            )));
        }
        Ok(Self { type_name, id })
    }

    /// Declared indicator kind, selects the factory routine.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Instance id within the type name group.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns a key for the same instance id under another type name.
    ///
    /// # Errors
    /// Returns [`ParamError::InvalidKey`] if `type_name` is empty.
    pub fn sibling(&self, type_name: &str) -> Result<Self, ParamError> {
        Self::new(type_name, self.id)
    }
}

impl fmt::Display for CompoundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{KEY_SEPARATOR}{}", self.type_name, self.id)
    }
}

impl FromStr for CompoundKey {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (type_name, raw_id) = s
            .rsplit_once(KEY_SEPARATOR)
            .ok_or_else(|| ParamError::InvalidKey(s.to_string()))?;

        // `u32::from_str` accepts a leading '+', which would break the round trip.
        if raw_id.is_empty() || !raw_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParamError::InvalidKey(s.to_string()));
        }
        let id = raw_id
            .parse::<u32>()
            .map_err(|_| ParamError::InvalidKey(s.to_string()))?;

        // Leading zeros would map two spellings onto one key.
        if raw_id.len() > 1 && raw_id.starts_with('0') {
            return Err(ParamError::InvalidKey(s.to_string()));
        }

        Self::new(type_name, id).map_err(|_| ParamError::InvalidKey(s.to_string()))
    }
}

impl TryFrom<&str> for CompoundKey {
    type Error = ParamError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
