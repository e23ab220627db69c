use crate::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;
use std::collections::HashMap;
use std::path::Path;

/// Holds machine learning models that an agent has loaded, keyed by a name
/// of the caller's choosing.
///
/// [`ModelStore::load`] does not cache anything on its own. Callers that want
/// to reuse a model put it in the store with [`ModelStore::insert`] (or use
/// [`ModelStore::load_into`]) and fetch it back with [`ModelStore::get`].
///
/// Model files are bincode blobs. They are decoded as-is: there is no
/// checksum or format version, so a file written for a different model type
/// may fail to decode or decode into garbage.
#[derive(Default)]
pub struct ModelStore {
    models: HashMap<String, Box<dyn Any>>,
}

impl ModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<M: DeserializeOwned, P: AsRef<Path>>(path: P) -> GameAgentResult<M> {
        let path = path.as_ref();
        let model_load_error = |source: ModelLoadFailure| {
            GameAgentError::new(GameAgentErrorVariant::ModelLoad {
                path: path.to_path_buf(),
                source,
            })
        };
        let serialized = std::fs::read(path).map_err(|e| model_load_error(e.into()))?;
        bincode::deserialize(&serialized).map_err(|e| model_load_error(e.into()))
    }

    pub fn save<M: Serialize, P: AsRef<Path>>(path: P, model: &M) -> GameAgentResult<()> {
        let path = path.as_ref();
        let model_save_error = |source: ModelLoadFailure| {
            GameAgentError::new(GameAgentErrorVariant::ModelSave {
                path: path.to_path_buf(),
                source,
            })
        };
        let serialized = bincode::serialize(model).map_err(|e| model_save_error(e.into()))?;
        std::fs::write(path, serialized).map_err(|e| model_save_error(e.into()))
    }

    pub fn load_into<M, P>(&mut self, name: &str, path: P) -> GameAgentResult<()>
    where
        M: DeserializeOwned + 'static,
        P: AsRef<Path>,
    {
        let model: M = Self::load(path)?;
        self.insert(name, model);
        Ok(())
    }

    pub fn insert<M: 'static>(&mut self, name: &str, model: M) -> Option<Box<dyn Any>> {
        self.models.insert(name.to_string(), Box::new(model))
    }

    /// Returns the model stored under `name` if it has type `M`.
    pub fn get<M: 'static>(&self, name: &str) -> Option<&M> {
        self.models.get(name).and_then(|model| model.downcast_ref())
    }

    pub fn get_mut<M: 'static>(&mut self, name: &str) -> Option<&mut M> {
        self.models
            .get_mut(name)
            .and_then(|model| model.downcast_mut())
    }

    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Any>> {
        self.models.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl std::fmt::Debug for ModelStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelStore")
            .field("models", &self.models.keys().collect::<Vec<_>>())
            .finish()
    }
}
