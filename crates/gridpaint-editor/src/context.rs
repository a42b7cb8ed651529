use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::event::EventBus;
use gridpaint_core::prototype::PrototypeRegistry;
use gridpaint_spatial::Blueprint;
use std::path::Path;
use std::sync::Arc;

/// Everything a placement operation reads or mutates: the committed
/// blueprint, the pending visual refresh events and the settings.
///
/// Passed explicitly into every preview operation.
#[derive(Debug)]
pub struct EditorContext {
    pub blueprint: Blueprint,
    pub events: EventBus,
    pub config: EditorConfig,
}

impl EditorContext {
    /// An empty blueprint over `config.area`.
    pub fn new(registry: Arc<PrototypeRegistry>, config: EditorConfig) -> Self {
        let blueprint = Blueprint::new(registry, config.area);
        Self::with_blueprint(blueprint, config)
    }

    /// Edit an existing blueprint.
    pub fn with_blueprint(blueprint: Blueprint, config: EditorConfig) -> Self {
        Self {
            blueprint,
            events: EventBus::new(config.event_capacity),
            config,
        }
    }

    /// Load `prototypes.*` and the optional `editor.*` from a data directory.
    pub fn from_data_dir(dir: &Path) -> Result<Self, EditorError> {
        let registry = gridpaint_data::load_prototypes_from_dir(dir)?;
        let config = EditorConfig::from_dir(dir)?;
        Ok(Self::new(Arc::new(registry), config))
    }
}
