use crate::domain::DiscoveredGame;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Clone, Debug, Default)]
pub struct DiscoverOutput {
    pub games: Vec<DiscoveredGame>,
    pub missing_dirs: Vec<PathBuf>,
    pub unreadable_entries: usize,
}

/// Lists the immediate entries of every configured directory. Entry names
/// become titles; symlinks are kept as links and resolved only at launch.
pub fn discover_games(directories: &[PathBuf]) -> DiscoverOutput {
    let mut output = DiscoverOutput::default();

    for dir in directories {
        if !dir.is_dir() {
            output.missing_dirs.push(dir.clone());
            continue;
        }

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::warn!(dir = %dir.display(), %error, "skipping unreadable entry");
                    output.unreadable_entries += 1;
                    continue;
                }
            };

            output.games.push(DiscoveredGame {
                title: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
            });
        }
    }

    output
}
