use dirs::home_dir;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_SECTION: &str = "DEFAULT";
const FALLBACK_EDITOR: &str = "vi";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LauncherConfig {
    pub directories: Vec<PathBuf>,
    pub editor: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("config line {line_no} is not a key, comment or section: {line:?}")]
    Parse { line_no: usize, line: String },
}

pub fn load_config(path: &Path) -> Result<LauncherConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&raw)
}

/// Reads the `[DEFAULT]` section of an INI-style file. Indented lines continue
/// the previous key's value, one entry per line.
pub fn parse_config(raw: &str) -> Result<LauncherConfig, ConfigError> {
    let values = parse_default_section(raw)?;

    let directories = values
        .get("directories")
        .map(|value| {
            value
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(expand_home)
                .collect()
        })
        .unwrap_or_default();

    let editor = values
        .get("editor")
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(editor_from_env)
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string());

    Ok(LauncherConfig {
        directories,
        editor,
    })
}

enum ContinuationTarget {
    Nothing,
    Ignored,
    Key(String),
}

fn parse_default_section(raw: &str) -> Result<BTreeMap<String, String>, ConfigError> {
    let mut values: BTreeMap<String, String> = BTreeMap::new();
    let mut section: Option<String> = None;
    let mut target = ContinuationTarget::Nothing;

    for (index, line) in raw.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if line.starts_with(char::is_whitespace) {
            match &target {
                ContinuationTarget::Key(key) => {
                    if let Some(value) = values.get_mut(key) {
                        value.push('\n');
                        value.push_str(trimmed);
                    }
                    continue;
                }
                ContinuationTarget::Ignored => continue,
                ContinuationTarget::Nothing => {}
            }
        }

        if let Some(name) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            section = Some(name.trim().to_string());
            target = ContinuationTarget::Nothing;
            continue;
        }

        let Some((key, value)) = trimmed.split_once(['=', ':']) else {
            return Err(ConfigError::Parse {
                line_no: index + 1,
                line: line.to_string(),
            });
        };

        if section.as_deref() != Some(DEFAULT_SECTION) {
            target = ContinuationTarget::Ignored;
            continue;
        }

        let key = key.trim().to_lowercase();
        values.insert(key.clone(), value.trim().to_string());
        target = ContinuationTarget::Key(key);
    }

    Ok(values)
}

fn expand_home(entry: &str) -> PathBuf {
    if entry == "~" {
        if let Some(home) = home_dir() {
            return home;
        }
    }
    if let Some(rest) = entry.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(entry)
}

fn editor_from_env() -> Option<String> {
    ["VISUAL", "EDITOR"]
        .into_iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
