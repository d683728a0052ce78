//! Archive mutation: append, remove, clear
//!
//! Appends go straight to the end of the file. Removal rebuilds the whole
//! archive in memory without the target record and overwrites the file, which
//! is fine for a packaging-time artifact.

use super::chunk::{write_record, ChunkKind};
use super::scan::locate_records;
use super::{Archive, ArchiveError, Result};
use log::{info, warn};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Result of an append
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A new record of `bytes` encoded bytes was appended
    Written { bytes: u64 },
    /// A record with that name already existed; nothing was written
    Duplicate,
}

/// Result of a removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The record (`bytes` encoded bytes) was cut out of the archive
    Removed { bytes: u64 },
    /// No record had that name; the archive is untouched
    NotPresent,
}

impl Archive {
    /// Names currently stored, treating a missing archive as empty
    fn existing_names(&self) -> Result<Vec<String>> {
        if self.exists() {
            self.list_names()
        } else {
            Ok(Vec::new())
        }
    }

    /// Append the contents of `source` as a record named after the path.
    ///
    /// Names are unique across all kinds; a duplicate is skipped with a
    /// warning. The archive is created on first append.
    pub fn write_chunk(&self, kind: ChunkKind, source: impl AsRef<Path>) -> Result<WriteOutcome> {
        let source = source.as_ref();
        let name = source.to_string_lossy();

        if self.existing_names()?.iter().any(|n| *n == name) {
            warn!("Trying to add duplicate data `{}`", name);
            return Ok(WriteOutcome::Duplicate);
        }

        let payload = std::fs::read(source).map_err(|e| ArchiveError::io(source, e))?;
        self.append(kind, &name, &payload)
    }

    /// Append `payload` under an explicit name
    pub fn write_bytes(&self, kind: ChunkKind, name: &str, payload: &[u8]) -> Result<WriteOutcome> {
        if self.existing_names()?.iter().any(|n| n == name) {
            warn!("Trying to add duplicate data `{}`", name);
            return Ok(WriteOutcome::Duplicate);
        }
        self.append(kind, name, payload)
    }

    fn append(&self, kind: ChunkKind, name: &str, payload: &[u8]) -> Result<WriteOutcome> {
        if name.is_empty() {
            return Err(ArchiveError::EmptyName);
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path())
            .map_err(|e| ArchiveError::io(self.path(), e))?;
        let mut writer = BufWriter::new(file);
        let bytes = write_record(&mut writer, kind, name, payload)
            .and_then(|bytes| writer.flush().map(|()| bytes))
            .map_err(|e| ArchiveError::io(self.path(), e))?;

        info!(
            "Wrote {} `{}` ({} bytes) to `{}`",
            kind,
            name,
            bytes,
            self.path().display()
        );
        Ok(WriteOutcome::Written { bytes })
    }

    pub fn write_texture(&self, source: impl AsRef<Path>) -> Result<WriteOutcome> {
        self.write_chunk(ChunkKind::Texture, source)
    }

    pub fn write_font(&self, source: impl AsRef<Path>) -> Result<WriteOutcome> {
        self.write_chunk(ChunkKind::Font, source)
    }

    pub fn write_sound(&self, source: impl AsRef<Path>) -> Result<WriteOutcome> {
        self.write_chunk(ChunkKind::Sound, source)
    }

    pub fn write_shader(&self, source: impl AsRef<Path>) -> Result<WriteOutcome> {
        self.write_chunk(ChunkKind::Shader, source)
    }

    /// Cut the first record named `name` out of the archive.
    ///
    /// Removing a name that isn't there is a no-op with a warning.
    pub fn remove_chunk(&self, name: &str) -> Result<RemoveOutcome> {
        if !self.list_names()?.iter().any(|n| n == name) {
            warn!("Chunk named `{}` doesn't exist!", name);
            return Ok(RemoveOutcome::NotPresent);
        }

        let previous = std::fs::read(self.path()).map_err(|e| ArchiveError::io(self.path(), e))?;
        let spans = locate_records(&previous, self.path())?;
        let Some(span) = spans.into_iter().find(|span| span.name == name) else {
            // The file changed between the two reads
            warn!("Chunk named `{}` vanished while removing it", name);
            return Ok(RemoveOutcome::NotPresent);
        };

        // pre = [  ][xx][  ][  ]
        //           ^ start, size
        // new = [  ][  ][  ]
        let start = span.offset as usize;
        let end = start + span.size as usize;
        let mut rebuilt = Vec::with_capacity(previous.len() - span.size as usize);
        rebuilt.extend_from_slice(&previous[..start]);
        rebuilt.extend_from_slice(&previous[end..]);

        warn!("Overwriting `{}`", self.path().display());
        std::fs::write(self.path(), &rebuilt).map_err(|e| ArchiveError::io(self.path(), e))?;

        info!(
            "Removed `{}` ({} bytes) from `{}`",
            name,
            span.size,
            self.path().display()
        );
        Ok(RemoveOutcome::Removed { bytes: span.size })
    }

    /// Truncate the archive to zero bytes (creating it if needed)
    pub fn clear_all(&self) -> Result<()> {
        File::create(self.path()).map_err(|e| ArchiveError::io(self.path(), e))?;
        warn!("`{}` cleared", self.path().display());
        Ok(())
    }
}
