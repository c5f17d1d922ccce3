//! Configuration file discovery and loading

use super::scilla_config::ScillaFmtConfig;
use crate::error::ScillaError;
use crate::result::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched in each directory, in priority order.
pub const CONFIG_FILE_NAMES: [&str; 5] = [
    ".scillafmt.toml",
    ".scillafmt.json",
    "scillafmt.yaml",
    "scillafmt.yml",
    "scillafmt.json",
];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover config file by traversing upward from start_path
    ///
    /// Starts from the given directory and moves up the directory tree until
    /// a config is found or the filesystem root is reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| ScillaError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    ///
    /// The parser is chosen by extension: TOML, JSON or YAML.
    pub fn load_from_file(path: &Path) -> Result<ScillaFmtConfig> {
        let content = fs::read_to_string(path).map_err(|e| ScillaError::io_error(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());

        let parsed = match ext {
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            _ => Err("unsupported file extension (expected .toml, .json, .yaml or .yml)".to_string()),
        };

        parsed.map_err(|message| {
            ScillaError::config_error(format!(
                "Failed to load config from '{}': {message}",
                path.display()
            ))
        })
    }

    /// Load config from path or auto-discover
    ///
    /// A custom path must exist. Without one, the search starts at
    /// `start_dir` (or the current directory), and the defaults are returned
    /// when no file is found.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<ScillaFmtConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(ScillaError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(ScillaFmtConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NewlineStyle;
    use tempfile::TempDir;

    fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
        let path = dir.join(filename);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_file_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            ".scillafmt.toml",
            "[formatter]\nindentUnit = \"    \"\nnewline = \"crlf\"\n\n[trace]\nrules = true\n",
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        let formatter = config.formatter.unwrap();
        assert_eq!(formatter.indent_unit.as_deref(), Some("    "));
        assert_eq!(formatter.newline, Some(NewlineStyle::Crlf));
        assert_eq!(config.trace.unwrap().rules, Some(true));
    }

    #[test]
    fn test_load_from_file_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "scillafmt.json",
            r#"{
                "formatter": {
                    "endWithNewline": false
                }
            }"#,
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(config.formatter.unwrap().end_with_newline, Some(false));
    }

    #[test]
    fn test_load_from_file_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "scillafmt.yaml",
            "formatter:\n  indentPatternAlternative: true\n",
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        let options = config.format_options().unwrap();
        assert!(options.indent_pattern_alternative);
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(temp_dir.path(), "scillafmt.ini", "x=1");
        let error = ConfigLoader::load_from_file(&config_path).unwrap_err();
        assert!(error.to_string().contains("unsupported file extension"));
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(temp_dir.path(), "scillafmt.json", "{ nope");
        let error = ConfigLoader::load_from_file(&config_path).unwrap_err();
        assert_eq!(error.kind(), crate::error::ErrorKind::Config);
    }

    #[test]
    fn test_auto_discover() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("contracts/nested");
        fs::create_dir_all(&nested).unwrap();

        create_temp_config(temp_dir.path(), "scillafmt.json", r#"{}"#);

        let found = ConfigLoader::auto_discover(&nested).unwrap();
        assert_eq!(
            found.and_then(|p| p.file_name().map(|n| n.to_owned())),
            Some("scillafmt.json".into())
        );
    }

    #[test]
    fn test_auto_discover_prefers_dotfile() {
        let temp_dir = TempDir::new().unwrap();
        create_temp_config(temp_dir.path(), "scillafmt.json", r#"{}"#);
        create_temp_config(temp_dir.path(), ".scillafmt.toml", "");

        let found = ConfigLoader::auto_discover(temp_dir.path()).unwrap().unwrap();
        assert!(found.ends_with(".scillafmt.toml"));
    }

    #[test]
    fn test_load_with_custom_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "custom.yml",
            "formatter:\n  maxLineLength: 80\n",
        );
        let config = ConfigLoader::load(Some(&config_path), None).unwrap();
        assert_eq!(config.formatter.unwrap().max_line_length, Some(80));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Some(Path::new("nonexistent.json")), None);
        assert!(result.is_err());
        let result = ConfigLoader::load_from_file(Path::new("nonexistent.json"));
        assert!(result.is_err());
    }
}
