//! Reads file listings produced by git and publishes them as immutable
//! snapshots.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::ListingConfig;
use crate::models::{CommitFile, File, SubmoduleConfig};

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line_no}: malformed status entry '{line}'")]
    Malformed { line_no: usize, line: String },
}

/// Everything one refresh produced. Readers hold an `Arc` to it, so a
/// redraw never sees half of one refresh and half of another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub version: u64,
    pub files: Vec<File>,
    pub commit_files: Vec<CommitFile>,
    pub submodules: Vec<SubmoduleConfig>,
}

const RENAME_ARROW: &str = " -> ";

/// Parses `git status --porcelain` (v1) output.
pub fn parse_status_listing(input: &str) -> Result<Vec<File>, ListingError> {
    let mut files = Vec::new();

    for (i, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let malformed = || ListingError::Malformed {
            line_no: i + 1,
            line: line.to_string(),
        };

        let (Some(status), Some(rest)) = (line.get(..2), line.get(3..)) else {
            return Err(malformed());
        };
        if line.as_bytes()[2] != b' ' {
            return Err(malformed());
        }

        // only renames and copies carry a second path
        let file = if status.contains(|c: char| matches!(c, 'R' | 'C')) {
            leading_path(rest, Some(RENAME_ARROW)).and_then(|(previous, tail)| {
                let (name, tail) = leading_path(tail.strip_prefix(RENAME_ARROW)?, None)?;
                (!previous.is_empty() && !name.is_empty() && tail.is_empty())
                    .then(|| File::new(name, status).renamed_from(previous))
            })
        } else {
            leading_path(rest, None).and_then(|(name, tail)| {
                (!name.is_empty() && tail.is_empty()).then(|| File::new(name, status))
            })
        };
        files.push(file.ok_or_else(malformed)?);
    }

    Ok(files)
}

/// Parses `git diff --name-status` output. Renames and copies list the old
/// path first; only the new one is kept.
pub fn parse_name_status_listing(input: &str) -> Result<Vec<CommitFile>, ListingError> {
    let mut files = Vec::new();

    for (i, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let malformed = || ListingError::Malformed {
            line_no: i + 1,
            line: line.to_string(),
        };

        let (status, paths) = line.split_once('\t').ok_or_else(malformed)?;
        let last = paths.rsplit('\t').next().unwrap_or(paths);
        let (name, tail) = leading_path(last, None).ok_or_else(malformed)?;

        let code: String = status.chars().take(1).collect();
        if code.is_empty() || name.is_empty() || !tail.is_empty() {
            return Err(malformed());
        }

        files.push(CommitFile::new(name, code));
    }

    Ok(files)
}

/// Parses a `.gitmodules` file. Sections without a `path` are skipped.
pub fn parse_gitmodules(input: &str) -> Vec<SubmoduleConfig> {
    let mut modules = Vec::new();
    let mut current: Option<SubmoduleConfig> = None;

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            modules.extend(current.take().filter(|m| !m.path.is_empty()));
            current = line
                .strip_prefix("[submodule")
                .and_then(|h| h.strip_suffix(']'))
                .map(|name| SubmoduleConfig {
                    name: name.trim().trim_matches('"').to_string(),
                    path: String::new(),
                    url: String::new(),
                });
            continue;
        }

        let (Some(module), Some((key, value))) = (current.as_mut(), line.split_once('=')) else {
            continue;
        };
        match key.trim() {
            "path" => module.path = value.trim().to_string(),
            "url" => module.url = value.trim().to_string(),
            _ => {}
        }
    }

    modules.extend(current.filter(|m| !m.path.is_empty()));
    modules
}

/// Reads one path from the front of `s` and returns it with the unread rest.
/// Quoted paths end at their closing quote, bare ones at `terminator` or the
/// end of input. `None` means the quoting is broken.
fn leading_path<'a>(s: &'a str, terminator: Option<&str>) -> Option<(String, &'a str)> {
    if let Some(quoted) = s.strip_prefix('"') {
        let end = closing_quote(quoted)?;
        return Some((unescape_c_style(&quoted[..end])?, &quoted[end + 1..]));
    }

    let end = terminator.and_then(|t| s.find(t)).unwrap_or(s.len());
    Some((s[..end].to_string(), &s[end..]))
}

fn closing_quote(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Decodes git's C-style quoting. Octal escapes are raw bytes, so multi-byte
/// UTF-8 characters arrive as several of them.
fn unescape_c_style(s: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(s.len());
    let mut iter = s.bytes();

    while let Some(b) = iter.next() {
        if b != b'\\' {
            bytes.push(b);
            continue;
        }

        let decoded = match iter.next()? {
            b'\\' => b'\\',
            b'"' => b'"',
            b'a' => 0x07,
            b'b' => 0x08,
            b't' => b'\t',
            b'n' => b'\n',
            b'v' => 0x0b,
            b'f' => 0x0c,
            b'r' => b'\r',
            first @ b'0'..=b'3' => {
                let mut value = first - b'0';
                for _ in 0..2 {
                    let digit = iter.next().filter(|d| (b'0'..=b'7').contains(d))?;
                    value = value * 8 + (digit - b'0');
                }
                value
            }
            _ => return None,
        };
        bytes.push(decoded);
    }

    Some(String::from_utf8_lossy(&bytes).into_owned())
}

fn read(path: &Path) -> Result<String, ListingError> {
    std::fs::read_to_string(path).map_err(|source| ListingError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads every configured listing into one snapshot. Missing sources yield
/// empty lists.
pub fn load_snapshot(config: &ListingConfig, version: u64) -> Result<Snapshot, ListingError> {
    let files = match &config.files {
        Some(path) => parse_status_listing(&read(path)?)?,
        None => Vec::new(),
    };
    let commit_files = match &config.commit_files {
        Some(path) => parse_name_status_listing(&read(path)?)?,
        None => Vec::new(),
    };
    let submodules = match &config.submodules {
        Some(path) => parse_gitmodules(&read(path)?),
        None => Vec::new(),
    };

    Ok(Snapshot {
        version,
        files,
        commit_files,
        submodules,
    })
}

#[derive(Debug)]
pub enum LoaderCommand {
    Refresh,
}

#[derive(Debug)]
pub enum LoaderMessage {
    Loaded(Arc<Snapshot>),
    Error(String),
}

/// Spawns the background loader. Every `Refresh` produces either a complete
/// new snapshot or an error; nothing partial is ever sent.
pub fn spawn_loader(
    config: ListingConfig,
) -> (mpsc::Sender<LoaderCommand>, mpsc::Receiver<LoaderMessage>) {
    let (command_tx, mut command_rx) = mpsc::channel::<LoaderCommand>(16);
    let (message_tx, message_rx) = mpsc::channel::<LoaderMessage>(16);

    tokio::spawn(async move {
        let mut version = 0;
        while let Some(LoaderCommand::Refresh) = command_rx.recv().await {
            version += 1;
            let config = config.clone();
            let loaded =
                tokio::task::spawn_blocking(move || load_snapshot(&config, version)).await;

            let message = match loaded {
                Ok(Ok(snapshot)) => {
                    tracing::info!(
                        version,
                        files = snapshot.files.len(),
                        commit_files = snapshot.commit_files.len(),
                        submodules = snapshot.submodules.len(),
                        "listing loaded"
                    );
                    LoaderMessage::Loaded(Arc::new(snapshot))
                }
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "listing failed to load");
                    LoaderMessage::Error(e.to_string())
                }
                Err(e) => {
                    tracing::error!(error = %e, "listing loader task failed");
                    LoaderMessage::Error(e.to_string())
                }
            };

            if message_tx.send(message).await.is_err() {
                break;
            }
        }
    });

    (command_tx, message_rx)
}
