//! Reading editor data files.
//!
//! A data file is found by base name inside a directory and parsed according
//! to its extension: `.ron`, `.toml` or `.json`. Exactly one of the three may
//! exist for a given base name.

use gridpaint_core::prototype::PrototypeError;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("no {file}.{{ron,toml,json}} in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    #[error("{file} is not a .ron, .toml or .json file")]
    UnsupportedFormat { file: PathBuf },

    /// The same base name exists in two formats.
    #[error("ambiguous data file: both {a} and {b} exist")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    #[error("failed to parse {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A direction was neither a cardinal index nor a direction name.
    #[error("invalid direction '{value}' in {file}")]
    InvalidDirection { file: PathBuf, value: String },

    /// The prototypes did not form a valid registry.
    #[error("invalid prototypes in {file}: {source}")]
    Registry {
        file: PathBuf,
        #[source]
        source: PrototypeError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DataLoadError {
    fn parse(file: &Path, detail: impl ToString) -> Self {
        DataLoadError::Parse {
            file: file.to_path_buf(),
            detail: detail.to_string(),
        }
    }
}

// ===========================================================================
// Formats
// ===========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    /// Lookup order when searching a directory.
    pub const ALL: [Format; 3] = [Format::Ron, Format::Toml, Format::Json];

    pub fn extension(self) -> &'static str {
        match self {
            Format::Ron => "ron",
            Format::Toml => "toml",
            Format::Json => "json",
        }
    }
}

/// The format implied by `path`'s extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    let ext = path.extension().and_then(|e| e.to_str());
    Format::ALL
        .into_iter()
        .find(|f| Some(f.extension()) == ext)
        .ok_or_else(|| DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        })
}

// ===========================================================================
// Lookup
// ===========================================================================

/// Find `{base_name}.ron|toml|json` in `dir`, if any.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut present = Format::ALL
        .into_iter()
        .map(|f| dir.join(format!("{base_name}.{}", f.extension())))
        .filter(|p| p.is_file());

    let first = present.next();
    match (first, present.next()) {
        (Some(a), Some(b)) => Err(DataLoadError::ConflictingFormats { a, b }),
        (first, _) => Ok(first),
    }
}

pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Parsing
// ===========================================================================

/// Parse `content` as `format`. `path` only labels errors.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    path: &Path,
) -> Result<T, DataLoadError> {
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| DataLoadError::parse(path, e)),
        Format::Json => serde_json::from_str(content).map_err(|e| DataLoadError::parse(path, e)),
        Format::Toml => toml::from_str(content).map_err(|e| DataLoadError::parse(path, e)),
    }
}

pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    deserialize_str(&content, format, path)
}

/// Parse a file holding a list of `T`.
///
/// TOML has no top-level arrays, so there the list lives under `toml_key`
/// (`[[toml_key]]` tables). RON and JSON files are the bare list.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    if format != Format::Toml {
        return deserialize_str(&content, format, path);
    }

    let mut table: toml::Table =
        toml::from_str(&content).map_err(|e| DataLoadError::parse(path, e))?;
    table
        .remove(toml_key)
        .ok_or_else(|| DataLoadError::parse(path, format!("no `{toml_key}` array")))?
        .try_into()
        .map_err(|e: toml::de::Error| DataLoadError::parse(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Tile {
        name: String,
        #[serde(default)]
        size: u32,
    }

    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "gridpaint_loader_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn format_from_extension() {
        for format in Format::ALL {
            let path = PathBuf::from(format!("editor.{}", format.extension()));
            assert_eq!(detect_format(&path).unwrap(), format);
        }
        for bad in ["editor.yaml", "editor", "editor.RON.bak"] {
            assert!(matches!(
                detect_format(Path::new(bad)),
                Err(DataLoadError::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn lookup_by_base_name() {
        let dir = make_test_dir("lookup");
        assert_eq!(find_data_file(&dir, "editor").unwrap(), None);

        fs::write(dir.join("editor.toml"), "").unwrap();
        fs::write(dir.join("prototypes.json"), "[]").unwrap();
        assert_eq!(
            find_data_file(&dir, "editor").unwrap(),
            Some(dir.join("editor.toml"))
        );

        // A directory with a data-file name is not a data file.
        fs::create_dir_all(dir.join("tiles.ron")).unwrap();
        assert_eq!(find_data_file(&dir, "tiles").unwrap(), None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn two_formats_are_ambiguous() {
        let dir = make_test_dir("ambiguous");
        fs::write(dir.join("editor.ron"), "()").unwrap();
        fs::write(dir.join("editor.json"), "{}").unwrap();

        let err = find_data_file(&dir, "editor").unwrap_err();
        assert!(matches!(err, DataLoadError::ConflictingFormats { .. }));
        assert!(require_data_file(&dir, "editor").is_err());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn required_file_names_base_and_dir() {
        let dir = make_test_dir("required");
        let err = require_data_file(&dir, "prototypes").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("prototypes.{ron,toml,json}"));
        assert!(message.contains(&dir.display().to_string()));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn same_value_in_every_format() {
        let ron = r#"(name: "pump", size: 2)"#;
        let toml = "name = \"pump\"\nsize = 2";
        let json = r#"{"name": "pump", "size": 2}"#;
        let expected = Tile {
            name: "pump".into(),
            size: 2,
        };

        for (content, format) in [(ron, Format::Ron), (toml, Format::Toml), (json, Format::Json)] {
            let tile: Tile = deserialize_str(content, format, Path::new("inline")).unwrap();
            assert_eq!(tile, expected);
        }
    }

    #[test]
    fn parse_errors_carry_the_file() {
        let dir = make_test_dir("parse");
        let path = dir.join("tiles.json");
        fs::write(&path, "[{\"name\": ").unwrap();

        let err = deserialize_file::<Vec<Tile>>(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::Parse { ref file, .. } if *file == path));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = make_test_dir("io");
        let err = deserialize_file::<Tile>(&dir.join("gone.ron")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io(_)));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn toml_list_under_key() {
        let dir = make_test_dir("toml_list");
        let path = dir.join("tiles.toml");
        fs::write(
            &path,
            "[[tiles]]\nname = \"belt\"\n\n[[tiles]]\nname = \"pump\"\nsize = 2\n",
        )
        .unwrap();

        let tiles: Vec<Tile> = deserialize_list(&path, "tiles").unwrap();
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[1].size, 2);

        let missing: Result<Vec<Tile>, _> = deserialize_list(&path, "prototypes");
        assert!(matches!(missing, Err(DataLoadError::Parse { .. })));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn ron_list_is_bare() {
        let dir = make_test_dir("ron_list");
        let path = dir.join("tiles.ron");
        fs::write(&path, r#"[(name: "belt"), (name: "chest", size: 1)]"#).unwrap();

        let tiles: Vec<Tile> = deserialize_list(&path, "tiles").unwrap();
        assert_eq!(tiles[0].name, "belt");
        assert_eq!(tiles[0].size, 0);

        let _ = fs::remove_dir_all(&dir);
    }
}
