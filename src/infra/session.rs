use crate::domain::GameEntry;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;
use thiserror::Error;

const STDERR_LOG_LIMIT: usize = 4096;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to resolve {path}: {source}")]
    Resolve {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LaunchCommand {
    /// Prefix and path exactly as concatenated, for display and logs.
    pub text: String,
    pub argv: Vec<OsString>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SessionOutcome {
    pub elapsed_secs: u64,
    pub exit_code: Option<i32>,
}

/// Builds `prefix + path`. Only the prefix is split into words; the path is
/// never split, and is glued to the last prefix word unless the prefix is
/// empty or ends in whitespace.
pub fn build_launch_command(prefix: &str, resolved: &Path) -> LaunchCommand {
    let text = format!("{prefix}{}", resolved.display());
    let mut argv = prefix
        .split_whitespace()
        .map(OsString::from)
        .collect::<Vec<_>>();

    let path_is_separate = prefix.is_empty() || prefix.ends_with(char::is_whitespace);
    match argv.last_mut() {
        Some(last) if !path_is_separate => last.push(resolved.as_os_str()),
        _ => argv.push(resolved.as_os_str().to_os_string()),
    }

    LaunchCommand { text, argv }
}

/// Runs one game to completion and reports the wall-clock seconds it took.
/// Blocks the calling thread until the child exits.
pub fn run_session(entry: &GameEntry, prefix: &str) -> Result<SessionOutcome, LaunchError> {
    let resolved = fs::canonicalize(&entry.path).map_err(|source| LaunchError::Resolve {
        path: entry.path.display().to_string(),
        source,
    })?;
    let command = build_launch_command(prefix, &resolved);
    let Some((program, args)) = command.argv.split_first() else {
        return Err(LaunchError::Spawn {
            command: command.text,
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
        });
    };

    tracing::info!(title = %entry.title, command = %command.text, "starting session");
    let started = Instant::now();
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            command: command.text.clone(),
            source,
        })?;

    // Drains stderr while waiting.
    let output = child
        .wait_with_output()
        .map_err(|source| LaunchError::Wait {
            command: command.text.clone(),
            source,
        })?;
    let elapsed_secs = started.elapsed().as_secs();

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr: &str = stderr.as_ref();
        let tail_start = stderr.len().saturating_sub(STDERR_LOG_LIMIT);
        let tail_start = (tail_start..stderr.len())
            .find(|index| stderr.is_char_boundary(*index))
            .unwrap_or(stderr.len());
        tracing::debug!(
            title = %entry.title,
            status = %output.status,
            stderr = %stderr.get(tail_start..).unwrap_or_default(),
            "game exited unsuccessfully"
        );
    }
    tracing::info!(title = %entry.title, elapsed_secs, "session finished");

    Ok(SessionOutcome {
        elapsed_secs,
        exit_code: output.status.code(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn argv(command: &LaunchCommand) -> Vec<&str> {
        command
            .argv
            .iter()
            .map(|arg| arg.to_str().expect("utf-8"))
            .collect()
    }

    #[test]
    fn empty_prefix_runs_the_path_itself() {
        let command = build_launch_command("", Path::new("/games/My Game/run"));
        assert_eq!(command.text, "/games/My Game/run");
        assert_eq!(argv(&command), vec!["/games/My Game/run"]);
    }

    #[test]
    fn prefix_with_trailing_space_keeps_path_as_argument() {
        let command = build_launch_command("env  WINEDEBUG=-all wine64 ", Path::new("/g/a b.exe"));
        assert_eq!(command.text, "env  WINEDEBUG=-all wine64 /g/a b.exe");
        assert_eq!(argv(&command), vec!["env", "WINEDEBUG=-all", "wine64", "/g/a b.exe"]);
    }

    #[test]
    fn prefix_without_trailing_space_is_glued_verbatim() {
        let command = build_launch_command("wine64", Path::new("/g/game.exe"));
        assert_eq!(command.text, "wine64/g/game.exe");
        assert_eq!(argv(&command), vec!["wine64/g/game.exe"]);

        let command = build_launch_command("run --file=", Path::new("/g/x"));
        assert_eq!(argv(&command), vec!["run", "--file=/g/x"]);
    }

    fn entry(path: PathBuf) -> GameEntry {
        GameEntry {
            title: "Test".to_string(),
            path,
            playtime_secs: 0,
        }
    }

    #[test]
    fn missing_target_fails_to_resolve() {
        let error = run_session(&entry(PathBuf::from("/definitely/not/here")), "")
            .expect_err("should fail");
        assert!(matches!(error, LaunchError::Resolve { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn unknown_prefix_program_fails_to_spawn() {
        let dir = tempfile::tempdir().expect("tempdir");
        let game = dir.path().join("game");
        fs::write(&game, "").expect("write");

        let error = run_session(&entry(game), "tgc-no-such-program-7f3a ")
            .expect_err("should fail");
        assert!(matches!(error, LaunchError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlink_and_reports_exit() {
        let target = Path::new("/bin/true");
        if !target.exists() {
            return;
        }
        let dir = tempfile::tempdir().expect("tempdir");
        let link = dir.path().join("True");
        std::os::unix::fs::symlink(target, &link).expect("symlink");

        let outcome = run_session(&entry(link), "").expect("run");
        assert_eq!(outcome.exit_code, Some(0));
        assert!(outcome.elapsed_secs <= 1);
    }

    #[cfg(unix)]
    #[test]
    fn measures_whole_seconds_through_prefix() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = dir.path().join("slow-game");
        fs::write(&script, "sleep 1\nexit 3\n").expect("write");

        let outcome = run_session(&entry(script), "sh ").expect("run");
        assert!(outcome.elapsed_secs >= 1);
        assert_eq!(outcome.exit_code, Some(3));
    }
}
