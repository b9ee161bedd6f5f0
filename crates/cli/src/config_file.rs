//! Config file discovery and loading.
//!
//! Configuration comes from an explicit `--config` path, or from the
//! first matching file found walking up from the working directory.
//! With neither, the built-in defaults apply (every rule enabled).

use anyhow::{Context, Result};
use prose_linter::PipelineConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
const CONFIG_FILES: &[&str] = &[".proserc.yaml", ".proserc.yml", ".proserc.json", "prose.toml"];

/// An effective configuration and where it came from.
pub struct LoadedConfig {
    pub config: PipelineConfig,
    /// `None` when no file was found and the defaults apply.
    pub path: Option<PathBuf>,
}

/// Resolve the configuration for a command.
///
/// An explicit path must load successfully; discovery failures fall
/// back to the defaults only when no config file exists at all.
pub fn load_effective_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_config(path)?;
        return Ok(LoadedConfig {
            config,
            path: Some(path.to_path_buf()),
        });
    }

    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    match find_config(&cwd) {
        Some(path) => {
            let config = load_config(&path)?;
            Ok(LoadedConfig {
                config,
                path: Some(path),
            })
        }
        None => Ok(LoadedConfig {
            config: PipelineConfig::default(),
            path: None,
        }),
    }
}

/// Find a config file by walking up the directory tree from the given
/// start directory.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "checking directory for config files");
        for file_name in CONFIG_FILES {
            let candidate = current_dir.join(file_name);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), checked_dirs, "found config file");
                return Some(candidate);
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "no config file found");
            return None;
        }
    }
}

/// Load a config from the specified path.
/// Automatically detects the format based on file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("cannot read config `{}`", path.display()))?;
    load_config_from_str(&contents, path)
}

/// Parse a config string; the path supplies the format and shows up in
/// error messages.
///
/// Rule names are not checked here; pipeline construction validates
/// them against the built-in set.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<PipelineConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let config = match extension {
        "yml" | "yaml" => serde_yaml::from_str(contents)
            .with_context(|| format!("invalid YAML config `{}`", path.display()))?,
        "json" => serde_json::from_str(contents)
            .with_context(|| format!("invalid JSON config `{}`", path.display()))?,
        "toml" => toml::from_str(contents)
            .with_context(|| format!("invalid TOML config `{}`", path.display()))?,
        _ => anyhow::bail!(
            "unsupported config format `{}` (expected .yaml, .yml, .json, or .toml)",
            path.display()
        ),
    };

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_yaml_config() {
        let yaml = "\npreset: recommended\nrules:\n  passive-voice: off\n";

        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file.flush().unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(!config.is_enabled("passive-voice"));
        assert!(config.is_enabled("spelling"));
    }

    #[test]
    fn test_load_json_config() {
        let json = r#"{ "rules": { "repeated-words": "error" } }"#;

        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(config.is_enabled("repeated-words"));
        assert_eq!(
            config.get_severity("repeated-words"),
            Some(prose_types::RuleSeverity::Error)
        );
    }

    #[test]
    fn test_load_toml_config() {
        let toml = "preset = \"recommended\"\n\n[rules]\n\"passive-voice\" = \"off\"\n";

        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(toml.as_bytes()).unwrap();
        file.flush().unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(!config.is_enabled("passive-voice"));
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let mut file = NamedTempFile::with_suffix(".ini").unwrap();
        file.write_all(b"preset = recommended").unwrap();
        file.flush().unwrap();

        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        // `rules` must be a map, not a scalar
        let result = load_config_from_str("rules: 42\n", Path::new(".proserc.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let result = load_config_from_str("presets: recommended\n", Path::new(".proserc.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".proserc.yaml");
        fs::write(&config_path, "preset: recommended").unwrap();

        let found = find_config(temp_dir.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".proserc.yaml");
        fs::write(&config_path, "preset: recommended").unwrap();

        let sub_dir = temp_dir.path().join("docs");
        fs::create_dir(&sub_dir).unwrap();

        let found = find_config(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_config_file_priority() {
        let temp_dir = tempfile::tempdir().unwrap();

        fs::write(temp_dir.path().join(".proserc.yaml"), "preset: recommended").unwrap();
        fs::write(temp_dir.path().join("prose.toml"), "preset = \"none\"").unwrap();

        let found = find_config(temp_dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), ".proserc.yaml");
    }
}
