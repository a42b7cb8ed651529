//! Editor settings, loaded from `editor.{ron,json,toml}`.

use gridpaint_data::DataLoadError;
use gridpaint_data::loader::{deserialize_file, find_data_file};
use gridpaint_spatial::EditableArea;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Base name of the editor settings file inside a data directory.
pub const EDITOR_FILE: &str = "editor";

/// Settings shared by every placement operation.
///
/// Every field has a default, so a data file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Shift of the two-cell rail grid, in cells per axis.
    pub rail_move_offset: (i32, i32),
    pub area: EditableArea,
    /// Ring buffer capacity of each editor event kind.
    pub event_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            rail_move_offset: (0, 0),
            area: EditableArea::default(),
            event_capacity: 256,
        }
    }
}

impl EditorConfig {
    /// Read settings from a RON, JSON or TOML file.
    pub fn from_file(path: &Path) -> Result<Self, DataLoadError> {
        let config: EditorConfig = deserialize_file(path)?;
        debug!(file = %path.display(), ?config, "loaded editor config");
        Ok(config)
    }

    /// Read `editor.{ron,json,toml}` from a data directory, or the defaults
    /// when there is none.
    pub fn from_dir(dir: &Path) -> Result<Self, DataLoadError> {
        match find_data_file(dir, EDITOR_FILE)? {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpaint_spatial::GridPosition;
    use std::fs;
    use std::path::PathBuf;

    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "gridpaint_config_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.rail_move_offset, (0, 0));
        assert_eq!(config.event_capacity, 256);
        assert!(config.area.contains(GridPosition::new(-200, 199)));
        assert!(!config.area.contains(GridPosition::new(200, 0)));
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let dir = make_test_dir("ron");
        let path = dir.join("editor.ron");
        fs::write(&path, "(rail_move_offset: (1, 0))").unwrap();

        let config = EditorConfig::from_file(&path).unwrap();
        assert_eq!(config.rail_move_offset, (1, 0));
        assert_eq!(config.area, EditableArea::default());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn toml_area() {
        let dir = make_test_dir("toml");
        fs::write(
            dir.join("editor.toml"),
            r#"
event_capacity = 16

[area]
min = { x = 0, y = 0 }
max = { x = 9, y = 9 }
"#,
        )
        .unwrap();

        let config = EditorConfig::from_dir(&dir).unwrap();
        assert_eq!(config.event_capacity, 16);
        assert_eq!(
            config.area,
            EditableArea::new(GridPosition::new(0, 0), GridPosition::new(9, 9))
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = make_test_dir("missing");
        assert_eq!(EditorConfig::from_dir(&dir).unwrap(), EditorConfig::default());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        let dir = make_test_dir("bad");
        let path = dir.join("editor.json");
        fs::write(&path, r#"{"event_capacity": "lots"}"#).unwrap();
        assert!(matches!(
            EditorConfig::from_file(&path),
            Err(DataLoadError::Parse { .. })
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
