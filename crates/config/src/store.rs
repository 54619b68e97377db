//! Persistent configuration store.
//!
//! Every mutation rewrites the whole document to a temporary file in the
//! store directory and renames it over the store file. The in-memory
//! document only changes after the rename succeeded.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tachart_types::{Category, CompoundKey, ParamKind};
use tempfile::NamedTempFile;

use crate::document::{Document, IndicatorGroup, Instance};
use crate::error::ConfigError;

/// Environment variable overriding the store location.
pub const STORE_PATH_ENV: &str = "TACHART_INDICATOR_STORE";

/// Store location used when [`STORE_PATH_ENV`] is unset.
pub const DEFAULT_STORE_PATH: &str = "config/indicators.json";

/// Resolves the store file path from the environment.
#[must_use]
pub fn resolve_store_path() -> PathBuf {
    let path = std::env::var(STORE_PATH_ENV).unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
    PathBuf::from(path)
}

/// Owns the configuration document and its backing file.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    document: Document,
}

impl ConfigStore {
    /// Loads an existing store file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] if the file cannot be read and a
    /// format or duplicate error if the document is malformed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let document = Document::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            instances = document.instances().count(),
            "loaded indicator store"
        );
        Ok(Self { path, document })
    }

    /// Loads the store file, creating an empty one if it does not exist.
    ///
    /// # Errors
    /// As [`ConfigStore::open`]; [`ConfigError::Persistence`] if the empty
    /// document cannot be written.
    pub fn open_or_init(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if path.exists() {
            return Self::open(path);
        }

        if let Some(dir) = parent_dir(&path)
            && !dir.exists()
        {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Persistence {
                path: path.clone(),
                source,
            })?;
        }
        let document = Document::default();
        write_atomic(&path, &document)?;
        tracing::info!(path = %path.display(), "created empty indicator store");
        Ok(Self { path, document })
    }

    /// Wraps an in-memory document bound to `path` without touching the disk.
    ///
    /// # Errors
    /// Returns the first violation of [`Document::validate`].
    pub fn from_document(path: impl Into<PathBuf>, document: Document) -> Result<Self, ConfigError> {
        document.validate()?;
        Ok(Self {
            path: path.into(),
            document,
        })
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only view of the document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn instance(&self, key: &CompoundKey) -> Result<&Instance, ConfigError> {
        self.document
            .instance(key)
            .ok_or_else(|| ConfigError::not_found(format!("indicator instance {key}")))
    }

    /// Raw value of a parameter.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`] if the instance or parameter is missing.
    pub fn get_parameter(&self, key: &CompoundKey, name: &str) -> Result<String, ConfigError> {
        self.instance(key)?
            .parameter(name)
            .map(|p| p.value.clone())
            .ok_or_else(|| missing_parameter(key, name))
    }

    /// Overwrites a parameter value and persists the document.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`] if the instance or parameter is
    /// missing and [`ConfigError::Persistence`] if the write fails. In both
    /// cases the in-memory document is unchanged.
    pub fn set_parameter(
        &mut self,
        key: &CompoundKey,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let mut next = self.document.clone();
        let param = next
            .instance_mut(key)
            .ok_or_else(|| ConfigError::not_found(format!("indicator instance {key}")))?
            .parameter_mut(name)
            .ok_or_else(|| missing_parameter(key, name))?;
        param.value = value.into();

        self.commit(next)?;
        tracing::debug!(%key, parameter = name, "parameter updated");
        Ok(())
    }

    /// Checks the stored value of a parameter against its declared type hint.
    ///
    /// Parameters without a hint, or with a hint that names no known kind,
    /// always pass.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`] for a missing instance or parameter
    /// and [`ConfigError::Param`] if the value does not convert.
    pub fn check_parameter(&self, key: &CompoundKey, name: &str) -> Result<(), ConfigError> {
        let param = self
            .instance(key)?
            .parameter(name)
            .ok_or_else(|| missing_parameter(key, name))?;
        if let Some(kind) = param.type_hint.as_deref().and_then(ParamKind::from_hint) {
            kind.validate(&param.value)?;
        }
        Ok(())
    }

    /// Keys of every configured instance, in document order.
    #[must_use]
    pub fn all_keys(&self) -> Vec<CompoundKey> {
        self.document.keys().collect()
    }

    /// Keys of the instances tagged with `category`. Instances without a
    /// category attribute count as `DEFAULT`.
    #[must_use]
    pub fn keys_for_category(&self, category: Category) -> Vec<CompoundKey> {
        self.document.keys_in_category(category).collect()
    }

    /// Category of an instance, `DEFAULT` when absent or empty.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`] for a missing instance and
    /// [`ConfigError::Param`] for an unknown category symbol.
    pub fn category(&self, key: &CompoundKey) -> Result<Category, ConfigError> {
        let raw = self.instance(key)?.category.as_deref();
        Ok(Category::from_attribute(raw)?)
    }

    /// Ordered `(name, raw value)` pairs of an instance.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`] for a missing instance.
    pub fn parameters_for(&self, key: &CompoundKey) -> Result<Vec<(String, String)>, ConfigError> {
        Ok(self
            .instance(key)?
            .params
            .iter()
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect())
    }

    /// Copies an instance under the next free id of its group and persists.
    ///
    /// The new id is one above the highest id ever present in the group, so
    /// gaps are never reused.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`] for a missing instance and
    /// [`ConfigError::Persistence`] if the write fails.
    pub fn duplicate(&mut self, key: &CompoundKey) -> Result<CompoundKey, ConfigError> {
        let mut copy = self.instance(key)?.clone();

        let mut next = self.document.clone();
        let group = next
            .group_mut(key.type_name())
            .ok_or_else(|| ConfigError::not_found(format!("indicator group {}", key.type_name())))?;
        let id = next_id(group)?;
        copy.id = id;
        group.instances.push(copy);
        let new_key = CompoundKey::new(key.type_name(), id)?;

        self.commit(next)?;
        tracing::debug!(source = %key, duplicate = %new_key, "instance duplicated");
        Ok(new_key)
    }

    /// Description of the type name group, empty if the group has none.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`] if the group does not exist.
    pub fn description(&self, key: &CompoundKey) -> Result<String, ConfigError> {
        self.document
            .group(key.type_name())
            .map(|g| g.description.clone().unwrap_or_default())
            .ok_or_else(|| ConfigError::not_found(format!("indicator group {}", key.type_name())))
    }

    /// Declared type hint of a parameter, empty if undeclared.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`] if the instance or parameter is missing.
    pub fn parameter_type(&self, key: &CompoundKey, name: &str) -> Result<String, ConfigError> {
        self.instance(key)?
            .parameter(name)
            .map(|p| p.type_hint.clone().unwrap_or_default())
            .ok_or_else(|| missing_parameter(key, name))
    }

    fn commit(&mut self, next: Document) -> Result<(), ConfigError> {
        write_atomic(&self.path, &next)?;
        self.document = next;
        Ok(())
    }
}

fn missing_parameter(key: &CompoundKey, name: &str) -> ConfigError {
    ConfigError::not_found(format!("parameter {name:?} of {key}"))
}

fn next_id(group: &IndicatorGroup) -> Result<u32, ConfigError> {
    group
        .max_id()
        .checked_add(1)
        .ok_or_else(|| ConfigError::IdsExhausted(group.identifier.clone()))
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|dir| !dir.as_os_str().is_empty())
}

/// Writes `document` to a temporary sibling of `path` and renames it into place.
fn write_atomic(path: &Path, document: &Document) -> Result<(), ConfigError> {
    let persistence = |source| ConfigError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    let text = document.to_json()?;
    let dir = parent_dir(path).unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(persistence)?;
    tmp.write_all(text.as_bytes()).map_err(persistence)?;
    tmp.as_file().sync_all().map_err(persistence)?;
    tmp.persist(path).map_err(|e| persistence(e.error))?;

    tracing::debug!(path = %path.display(), bytes = text.len(), "indicator store persisted");
    Ok(())
}
