use dirs::data_dir;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR_NAME: &str = "terminal-game-client";

const DEFAULT_CONFIG: &str = "[DEFAULT]
# Directories containing symlinks to the game executables.
# List one directory per line and put at least one space in front of each.
directories =
 ~/Games
# Editor used to open the record, config and help files.
editor = vi
";

const DEFAULT_RECORD: &str = "{}
";

const DEFAULT_HELP: &str = "How to use

- Add Game: list a folder under `directories` in the configuration file.
  The folder must contain symlinks to the actual game executables.
- Key Bindings: h/Left and l/Right switch tabs, j/Down and k/Up move one line,
  Ctrl+D/PgDn and Ctrl+U/PgUp move 20 lines, Enter performs the action of the
  current tab, Ctrl+C or Ctrl+Q quits.
- Configuration File: change the game directories and the editor in config.conf
  next to this file. Restart the application after changing it.
- Record File: playtime.json holds the playtime per title as HH:MM:SS.
  Restart the application after changing it.
- Command Prefix: some games do not run without a prefix such as `wine64 `.
  Press e on any tab, type the prefix and press Enter (Esc cancels). The prefix
  is put in front of the game path exactly as typed, so end it with a space
  when the path is a separate argument.
";

#[derive(Debug, Error)]
pub enum ResolveDataDirError {
    #[error("user data directory not found")]
    DataDirNotFound,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataPaths {
    pub root: PathBuf,
    pub config: PathBuf,
    pub record: PathBuf,
    pub help: PathBuf,
    pub log: PathBuf,
}

impl DataPaths {
    pub fn under(root: PathBuf) -> Self {
        Self {
            config: root.join("config.conf"),
            record: root.join("playtime.json"),
            help: root.join("help"),
            log: root.join("launcher.log"),
            root,
        }
    }
}

pub fn resolve_data_dir() -> Result<PathBuf, ResolveDataDirError> {
    if let Some(override_dir) = std::env::var_os("TGC_DATA_DIR") {
        return Ok(PathBuf::from(override_dir));
    }

    let Some(base) = data_dir() else {
        return Err(ResolveDataDirError::DataDirNotFound);
    };

    Ok(base.join(APP_DIR_NAME))
}

/// Creates the data directory and seeds the config, record and help files.
/// Existing files are left untouched.
pub fn ensure_data_files(paths: &DataPaths) -> io::Result<()> {
    fs::create_dir_all(&paths.root)?;
    create_if_missing(&paths.config, DEFAULT_CONFIG)?;
    create_if_missing(&paths.record, DEFAULT_RECORD)?;
    create_if_missing(&paths.help, DEFAULT_HELP)?;
    Ok(())
}

fn create_if_missing(path: &Path, content: &str) -> io::Result<()> {
    if path.is_file() {
        return Ok(());
    }
    fs::write(path, content)
}
