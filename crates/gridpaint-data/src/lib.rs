//! Data-driven loading of entity prototypes and editor settings from RON,
//! JSON or TOML files.

pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, Format, deserialize_file};

use gridpaint_core::prototype::{PrototypeRegistry, PrototypeRegistryBuilder};
use schema::PrototypeData;
use std::path::Path;
use tracing::debug;

/// Base name of the prototype file inside a data directory.
pub const PROTOTYPES_FILE: &str = "prototypes";

/// Load a prototype registry from a single file.
///
/// TOML files hold the list under a top-level `prototypes` key; RON and JSON
/// files are a bare list.
pub fn load_prototypes(path: &Path) -> Result<PrototypeRegistry, DataLoadError> {
    let entries: Vec<PrototypeData> = loader::deserialize_list(path, PROTOTYPES_FILE)?;

    let mut builder = PrototypeRegistryBuilder::new();
    for entry in entries {
        builder.register(entry.into_prototype(path)?);
    }
    let registry = builder.build().map_err(|source| DataLoadError::Registry {
        file: path.to_path_buf(),
        source,
    })?;

    debug!(file = %path.display(), count = registry.len(), "loaded prototypes");
    Ok(registry)
}

/// Load `prototypes.{ron,toml,json}` from a data directory.
pub fn load_prototypes_from_dir(dir: &Path) -> Result<PrototypeRegistry, DataLoadError> {
    let path = loader::require_data_file(dir, PROTOTYPES_FILE)?;
    load_prototypes(&path)
}
