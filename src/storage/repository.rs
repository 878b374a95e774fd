use crate::foundation::error::{CardError, CardResult};
use crate::normalize::migrate::migrate_str;
use crate::scene::model::CustomizationSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::xxh3_64;

/// Identifier of a stored configuration.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecId(String);

impl SpecId {
    /// Wrap an id, rejecting anything that is not `[A-Za-z0-9_-]+`.
    pub fn new(id: impl Into<String>) -> CardResult<Self> {
        let id = id.into();
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CardError::persistence(format!("invalid spec id \"{id}\"")));
        }
        Ok(Self(id))
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stores finished configurations as opaque, fully serializable trees.
pub trait SpecRepository {
    /// Persist `spec` and return its id.
    fn save(&mut self, spec: &CustomizationSpec) -> CardResult<SpecId>;
    /// Load a previously saved spec.
    fn load(&self, id: &SpecId) -> CardResult<CustomizationSpec>;
}

/// Repository kept in memory; ids are sequential.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    next: u64,
    specs: BTreeMap<SpecId, String>,
}

impl InMemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored specs.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// `true` when nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl SpecRepository for InMemoryRepository {
    fn save(&mut self, spec: &CustomizationSpec) -> CardResult<SpecId> {
        let id = SpecId(format!("spec-{:06}", self.next));
        self.next += 1;
        self.specs.insert(id.clone(), serde_json::to_string(spec)?);
        Ok(id)
    }

    fn load(&self, id: &SpecId) -> CardResult<CustomizationSpec> {
        let json = self
            .specs
            .get(id)
            .ok_or_else(|| CardError::persistence(format!("no spec with id \"{id}\"")))?;
        Ok(migrate_str(json)?.spec)
    }
}

/// Repository writing one pretty-printed JSON file per spec.
///
/// Ids are content hashes, so saving an identical spec twice yields the same id and file.
#[derive(Debug, Clone)]
pub struct JsonDirRepository {
    dir: PathBuf,
}

impl JsonDirRepository {
    /// Use `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> CardResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            CardError::persistence(format!("failed to create {}: {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    /// Backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &SpecId) -> PathBuf {
        self.dir.join(format!("{}.json", id.as_str()))
    }
}

impl SpecRepository for JsonDirRepository {
    fn save(&mut self, spec: &CustomizationSpec) -> CardResult<SpecId> {
        let json = serde_json::to_string_pretty(spec)?;
        let id = SpecId(format!("{:016x}", xxh3_64(json.as_bytes())));
        let path = self.path_for(&id);
        std::fs::write(&path, json.as_bytes()).map_err(|e| {
            CardError::persistence(format!("failed to write {}: {e}", path.display()))
        })?;
        tracing::debug!(id = %id, path = %path.display(), "saved spec");
        Ok(id)
    }

    fn load(&self, id: &SpecId) -> CardResult<CustomizationSpec> {
        let path = self.path_for(id);
        let json = std::fs::read_to_string(&path).map_err(|e| {
            CardError::persistence(format!("failed to read {}: {e}", path.display()))
        })?;
        Ok(migrate_str(&json)?.spec)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/repository.rs"]
mod tests;
