use gloo::storage::{LocalStorage, Storage};
use memorama_core::{KeyValueStore, StoreError};

/// Browser local storage as the engine's key/value backend.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LocalStorageBackend;

impl KeyValueStore for LocalStorageBackend {
    fn get(&self, key: &str) -> memorama_core::Result<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|err| StoreError::Read(format!("{:?}", err)))
    }

    fn set(&mut self, key: &str, value: String) -> memorama_core::Result<()> {
        LocalStorage::raw()
            .set_item(key, &value)
            .map_err(|err| StoreError::Write(format!("{:?}", err)))
    }
}
