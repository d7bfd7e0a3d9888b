use std::any::Any;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{error, info};
use parking_lot::Mutex;

use super::{Loadable, ResourceError};
use crate::string_key::to_lower;

/// Shared handle to a cached resource.
pub type Res<T> = Arc<T>;

type Entry = Arc<dyn Any + Send + Sync>;

/// Maps canonical (lowercased) keys to one shared instance each.
///
/// The cache never mutates an instance after insertion. Entries stay alive
/// until [`remove_all`](Self::remove_all) and every outside holder drop them.
pub struct ResourceManager {
    root: PathBuf,
    resources: Mutex<HashMap<String, Entry>>,
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ResourceManager {
    /// Creates a cache whose loaders resolve names against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            resources: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a resource name to a file path under the asset root.
    pub fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Returns the cached `T` for `name`, loading it on first request.
    /// Failures are logged and yield `None`.
    pub fn get<T: Loadable>(&self, name: &str, args: T::Args) -> Option<Res<T>> {
        self.get_with_id(name, name, args)
    }

    /// Like [`get`](Self::get) but caches under `id` while loading `name`.
    pub fn get_with_id<T: Loadable>(&self, id: &str, name: &str, args: T::Args) -> Option<Res<T>> {
        match self.try_get_with_id(id, name, args) {
            Ok(resource) => Some(resource),
            Err(ResourceError::Load { name, source }) => {
                error!("Could not load resource {name}: {source:#}");
                None
            }
            Err(err) => {
                error!("{err}");
                None
            }
        }
    }

    pub fn try_get<T: Loadable>(&self, name: &str, args: T::Args) -> Result<Res<T>, ResourceError> {
        self.try_get_with_id(name, name, args)
    }

    pub fn try_get_with_id<T: Loadable>(
        &self,
        id: &str,
        name: &str,
        args: T::Args,
    ) -> Result<Res<T>, ResourceError> {
        let key = to_lower(id);
        let cached = self.resources.lock().get(&key).cloned();
        if let Some(entry) = cached {
            return downcast(entry, &key);
        }

        // Load without holding the lock: loaders may request nested resources.
        let mut resource = T::default();
        resource
            .load(name, args, self)
            .map_err(|source| ResourceError::Load {
                name: name.to_string(),
                source,
            })?;
        info!("Loaded resource: {name} (key '{key}')");

        let loaded: Entry = Arc::new(resource);
        let entry = Arc::clone(
            self.resources
                .lock()
                .entry(key.clone())
                .or_insert(loaded),
        );
        downcast(entry, &key)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.resources.lock().contains_key(&to_lower(id))
    }

    pub fn len(&self) -> usize {
        self.resources.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.lock().is_empty()
    }

    /// Drops every cache entry.
    pub fn remove_all(&self) {
        self.resources.lock().clear();
    }
}

fn downcast<T: Loadable>(entry: Entry, key: &str) -> Result<Res<T>, ResourceError> {
    entry.downcast::<T>().map_err(|_| ResourceError::TypeMismatch {
        key: key.to_string(),
    })
}
