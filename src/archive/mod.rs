//! Resource archive (`data.dat`)
//!
//! A flat file of concatenated chunk records: no header, no index, no
//! padding. Records are found by walking the file front to back.
//!
//! - `chunk`: record type and the fixed-width header codec
//! - `scan`: sequential, bounds-checked reader
//! - `mutate`: append, remove-by-rebuild, clear
//!
//! Duplicate writes and removals of unknown names are reported as outcomes,
//! not errors, so packaging scripts can be re-run safely.

pub mod chunk;
mod mutate;
pub mod scan;

pub use chunk::{AllocTracker, Chunk, ChunkHeader, ChunkKind, HEADER_SIZE};
pub use mutate::{RemoveOutcome, WriteOutcome};
pub use scan::{RecordHead, RecordSpan};

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default archive file name, relative to the working directory
pub const DEFAULT_ARCHIVE: &str = "data.dat";

/// Archive error types
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive file does not exist
    #[error("`{}` doesn't exist", .path.display())]
    Missing { path: PathBuf },
    /// Open/read/write failure
    #[error("I/O error on `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A record is truncated or its header is inconsistent
    #[error("corrupt archive at byte {offset}: {reason}")]
    Corrupt { offset: u64, reason: String },
    /// No record with that name (and kind)
    #[error("could not find {kind} `{name}` in archive")]
    NotFound { name: String, kind: ChunkKind },
    /// The payload could not be turned into a live resource
    #[error("could not load {kind} data `{name}`: {reason}")]
    Decode {
        name: String,
        kind: ChunkKind,
        reason: String,
    },
    /// Records need a name to be addressable
    #[error("chunk names must not be empty")]
    EmptyName,
}

impl ArchiveError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Handle to one archive file.
///
/// Cheap to construct; nothing touches the disk until an operation runs.
/// Payload buffers handed out by this handle are counted by its tracker.
#[derive(Debug, Clone)]
pub struct Archive {
    path: PathBuf,
    tracker: AllocTracker,
}

impl Default for Archive {
    fn default() -> Self {
        Self::new(DEFAULT_ARCHIVE)
    }
}

impl Archive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tracker: AllocTracker::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Live payload buffers handed out by this archive
    pub fn tracker(&self) -> &AllocTracker {
        &self.tracker
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Size of the archive file in bytes
    pub fn len(&self) -> Result<u64> {
        if !self.exists() {
            return Err(ArchiveError::Missing {
                path: self.path.clone(),
            });
        }
        std::fs::metadata(&self.path)
            .map(|m| m.len())
            .map_err(|e| ArchiveError::io(&self.path, e))
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    /// Open for a front-to-back walk, returning the reader and total length
    fn open_for_scan(&self) -> Result<(BufReader<File>, u64)> {
        if !self.exists() {
            return Err(ArchiveError::Missing {
                path: self.path.clone(),
            });
        }
        let file = File::open(&self.path).map_err(|e| ArchiveError::io(&self.path, e))?;
        let total = file
            .metadata()
            .map_err(|e| ArchiveError::io(&self.path, e))?
            .len();
        Ok((BufReader::new(file), total))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────────────────

    /// Names of every record, in append order
    pub fn list_names(&self) -> Result<Vec<String>> {
        let (reader, total) = self.open_for_scan()?;
        scan::scan_names(reader, total, &self.path)
    }

    /// Position, kind and size of every record without reading payloads
    pub fn list_spans(&self) -> Result<Vec<RecordSpan>> {
        let (reader, total) = self.open_for_scan()?;
        scan::scan_spans(reader, total, &self.path)
    }

    /// Every record with its payload, in append order
    pub fn list_chunks(&self) -> Result<Vec<Chunk>> {
        let mut chunks = Vec::new();
        self.visit_chunks(
            |_| true,
            |chunk| {
                chunks.push(chunk);
                Ok(())
            },
        )?;
        Ok(chunks)
    }

    /// Stream the records accepted by `filter` through `visit` one at a time.
    ///
    /// Rejected records never get payload storage, so peak memory stays at
    /// one record plus whatever `visit` keeps.
    pub fn visit_chunks<F, V>(&self, filter: F, visit: V) -> Result<()>
    where
        F: FnMut(&RecordHead) -> bool,
        V: FnMut(Chunk) -> Result<()>,
    {
        let (reader, total) = self.open_for_scan()?;
        scan::scan_chunks(reader, total, &self.path, &self.tracker, filter, visit)
    }

    /// First record named `name`, restricted to `kind` when given
    pub fn read_chunk(&self, name: &str, kind: Option<ChunkKind>) -> Result<Chunk> {
        let mut taken = false;
        let mut found = None;
        self.visit_chunks(
            |head| {
                let hit = !taken
                    && head.name == name
                    && kind.map_or(true, |k| head.header.kind == k);
                taken |= hit;
                hit
            },
            |chunk| {
                found = Some(chunk);
                Ok(())
            },
        )?;
        found.ok_or_else(|| ArchiveError::NotFound {
            name: name.to_string(),
            kind: kind.unwrap_or_default(),
        })
    }

    pub fn read_font(&self, name: &str) -> Result<Chunk> {
        self.read_chunk(name, Some(ChunkKind::Font))
    }

    pub fn read_texture(&self, name: &str) -> Result<Chunk> {
        self.read_chunk(name, Some(ChunkKind::Texture))
    }

    pub fn read_sound(&self, name: &str) -> Result<Chunk> {
        self.read_chunk(name, Some(ChunkKind::Sound))
    }

    pub fn read_shader(&self, name: &str) -> Result<Chunk> {
        self.read_chunk(name, Some(ChunkKind::Shader))
    }

    /// Whether a record with this name exists; a missing archive has none
    pub fn chunk_exists(&self, name: &str) -> Result<bool> {
        if !self.exists() {
            return Ok(false);
        }
        Ok(self.list_names()?.iter().any(|n| n == name))
    }
}
