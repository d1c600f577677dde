use super::entity_store::EntityStore;
use super::fs_backend::FsBackend;
use std::path::PathBuf;

/// Production store: one JSON document in `data_dir`.
pub type FileDatastore = EntityStore<FsBackend>;

impl FileDatastore {
    pub fn new(data_dir: PathBuf) -> Self {
        EntityStore::with_backend(FsBackend::new(data_dir))
    }
}
