//! Output writers for `apdu-gen`.
//!
//! File destinations are replaced atomically: the document is written to a
//! uniquely named hidden sibling file, synced, then renamed over the
//! destination. A failed run therefore never leaves a truncated file behind.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::{ErrorKind, Write};
use tempfile::{Builder, NamedTempFile};
use tracing::{info, warn};

use crate::error::GenError;

const TEMP_SUFFIX: &str = ".apdu-gen.tmp";

/// Where the generated document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Standard output.
    Stdout,
    /// A file that is created or replaced.
    File(Utf8PathBuf),
}

impl Destination {
    /// Interprets the positional arguments of a run.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::TooManyArguments`] when more than one argument is
    /// given.
    pub fn from_args(args: &[String]) -> Result<Self, GenError> {
        match args {
            [] => Ok(Self::Stdout),
            [path] => Ok(Self::File(Utf8PathBuf::from(path))),
            _ => Err(GenError::TooManyArguments { count: args.len() }),
        }
    }
}

/// Writes `content` to standard output.
///
/// # Errors
///
/// Returns [`GenError::Stdout`] if the write or flush fails.
pub fn write_stdout(content: &str) -> Result<(), GenError> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(content.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(GenError::Stdout)
}

/// Atomically replaces the file at `path` with `content`.
///
/// The document is staged in a uniquely named hidden sibling, so concurrent
/// runs targeting the same destination never share a temporary file. The
/// parent directory must already exist.
///
/// # Errors
///
/// Returns [`GenError::InvalidDestination`] if `path` has no file name and
/// [`GenError::Io`] if any filesystem step fails.
pub fn write_atomic(path: &Utf8Path, content: &str) -> Result<(), GenError> {
    let (parent, file_name) = split_destination(path)?;
    let mut temp = Builder::new()
        .prefix(&format!(".{file_name}."))
        .suffix(TEMP_SUFFIX)
        .tempfile_in(parent)
        .map_err(|source| GenError::Io {
            path: parent.to_path_buf(),
            source,
        })?;

    let staged = temp
        .write_all(content.as_bytes())
        .and_then(|()| temp.as_file().sync_all());
    if let Err(source) = staged {
        discard_temp(path, temp);
        return Err(GenError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    if let Err(err) = temp.persist(path) {
        discard_temp(path, err.file);
        return Err(GenError::Io {
            path: path.to_path_buf(),
            source: err.error,
        });
    }

    info!(path = %path, bytes = content.len(), "wrote declarations");
    Ok(())
}

/// Verifies that the file at `path` already holds `content`.
///
/// # Errors
///
/// Returns [`GenError::Stale`] if the file is missing or differs, and
/// [`GenError::Io`] if it cannot be read.
pub fn check_up_to_date(path: &Utf8Path, content: &str) -> Result<(), GenError> {
    let (dir, file_name) = open_parent(path)?;
    match dir.read_to_string(file_name) {
        Ok(existing) if existing == content => {
            info!(path = %path, "declarations are up to date");
            Ok(())
        }
        Ok(_) => Err(GenError::Stale(path.to_path_buf())),
        Err(err) if err.kind() == ErrorKind::NotFound => Err(GenError::Stale(path.to_path_buf())),
        Err(source) => Err(GenError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn split_destination(path: &Utf8Path) -> Result<(&Utf8Path, &str), GenError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| GenError::InvalidDestination(path.to_path_buf()))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    Ok((parent, file_name))
}

fn open_parent(path: &Utf8Path) -> Result<(Dir, &str), GenError> {
    let (parent, file_name) = split_destination(path)?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|source| {
        GenError::Io {
            path: parent.to_path_buf(),
            source,
        }
    })?;
    Ok((dir, file_name))
}

fn discard_temp(path: &Utf8Path, temp: NamedTempFile) {
    let temp_path = temp.path().to_path_buf();
    if let Err(err) = temp.close() {
        warn!(
            path = %path,
            temp = %temp_path.display(),
            error = %err,
            "failed to remove temporary file"
        );
    }
}
