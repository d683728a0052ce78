//! Chunk records
//!
//! A chunk is one named, typed blob inside the archive. On disk every chunk is
//! a fixed 20-byte header followed by the name and the payload:
//!
//! ```text
//! +--------------------------+
//! | kind         i32 LE      |  -1 none, 0 font, 1 texture, 2 sound, 3 shader
//! | byte_length  u64 LE      |  payload length
//! | name_length  u64 LE      |  name length in bytes
//! +--------------------------+
//! | name         UTF-8       |
//! | payload      raw bytes   |
//! +--------------------------+
//! ```
//!
//! The widths match the old native layout on 64-bit little-endian hosts, but
//! are now fixed instead of following the host.

use log::warn;
use std::cell::Cell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Size of the encoded `kind` field
pub const KIND_SIZE: usize = 4;
/// Size of each encoded length field
pub const LEN_SIZE: usize = 8;
/// Size of the fixed part of every record
pub const HEADER_SIZE: usize = KIND_SIZE + LEN_SIZE * 2;

/// What a chunk's payload holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChunkKind {
    /// Reset state of a freed record
    #[default]
    None,
    Font,
    Texture,
    Sound,
    Shader,
}

impl ChunkKind {
    pub const ALL: [ChunkKind; 4] = [
        ChunkKind::Font,
        ChunkKind::Texture,
        ChunkKind::Sound,
        ChunkKind::Shader,
    ];

    /// Value written to disk
    pub fn to_raw(self) -> i32 {
        match self {
            ChunkKind::None => -1,
            ChunkKind::Font => 0,
            ChunkKind::Texture => 1,
            ChunkKind::Sound => 2,
            ChunkKind::Shader => 3,
        }
    }

    /// Parse an on-disk value, `None` for anything unknown
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            -1 => Some(ChunkKind::None),
            0 => Some(ChunkKind::Font),
            1 => Some(ChunkKind::Texture),
            2 => Some(ChunkKind::Sound),
            3 => Some(ChunkKind::Shader),
            _ => None,
        }
    }

    /// Human-readable label used in diagnostics
    pub fn label(self) -> &'static str {
        match self {
            ChunkKind::None => "chunk",
            ChunkKind::Font => "font",
            ChunkKind::Texture => "texture",
            ChunkKind::Sound => "sound",
            ChunkKind::Shader => "shader",
        }
    }

    /// Guess the kind from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "ttf" | "otf" => Some(ChunkKind::Font),
            "png" | "jpg" | "jpeg" | "bmp" => Some(ChunkKind::Texture),
            "wav" | "ogg" | "flac" => Some(ChunkKind::Sound),
            "vert" | "frag" | "glsl" => Some(ChunkKind::Shader),
            _ => None,
        }
    }

    /// Parse a label as produced by [`ChunkKind::label`]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Allocation tracking
// ─────────────────────────────────────────────────────────────────────────────

/// Counts payload buffers that are currently alive.
///
/// Purely diagnostic: once every chunk handed out by an archive has been
/// freed or dropped, `outstanding()` is back to zero. Clones share the count.
#[derive(Debug, Clone, Default)]
pub struct AllocTracker {
    live: Rc<Cell<usize>>,
}

impl AllocTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of payload buffers not yet released
    pub fn outstanding(&self) -> usize {
        self.live.get()
    }

    fn acquire(&self) {
        self.live.set(self.live.get() + 1);
    }

    fn release(&self) {
        let live = self.live.get();
        debug_assert!(live > 0, "payload released more times than allocated");
        self.live.set(live.saturating_sub(1));
    }
}

/// Payload storage owned by exactly one chunk
#[derive(Debug)]
struct Payload {
    bytes: Vec<u8>,
    tracker: AllocTracker,
}

impl Payload {
    fn zeroed(size: usize, tracker: &AllocTracker) -> Self {
        tracker.acquire();
        Self {
            bytes: vec![0; size],
            tracker: tracker.clone(),
        }
    }
}

impl Clone for Payload {
    fn clone(&self) -> Self {
        self.tracker.acquire();
        Self {
            bytes: self.bytes.clone(),
            tracker: self.tracker.clone(),
        }
    }
}

impl Drop for Payload {
    fn drop(&mut self) {
        self.tracker.release();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Header
// ─────────────────────────────────────────────────────────────────────────────

/// The fixed-width part of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub kind: ChunkKind,
    pub byte_length: u64,
    pub name_length: u64,
}

impl ChunkHeader {
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[..KIND_SIZE].copy_from_slice(&self.kind.to_raw().to_le_bytes());
        buf[KIND_SIZE..KIND_SIZE + LEN_SIZE].copy_from_slice(&self.byte_length.to_le_bytes());
        buf[KIND_SIZE + LEN_SIZE..].copy_from_slice(&self.name_length.to_le_bytes());
        buf
    }

    /// Decode a header; the error is a short reason for the scanner to report
    pub fn decode(buf: &[u8; HEADER_SIZE]) -> Result<Self, String> {
        let mut kind = [0u8; KIND_SIZE];
        let mut byte_length = [0u8; LEN_SIZE];
        let mut name_length = [0u8; LEN_SIZE];
        kind.copy_from_slice(&buf[..KIND_SIZE]);
        byte_length.copy_from_slice(&buf[KIND_SIZE..KIND_SIZE + LEN_SIZE]);
        name_length.copy_from_slice(&buf[KIND_SIZE + LEN_SIZE..]);

        let raw_kind = i32::from_le_bytes(kind);
        let kind = ChunkKind::from_raw(raw_kind)
            .ok_or_else(|| format!("unknown chunk kind {}", raw_kind))?;

        Ok(Self {
            kind,
            byte_length: u64::from_le_bytes(byte_length),
            name_length: u64::from_le_bytes(name_length),
        })
    }

    /// Encoded size of the whole record this header starts
    pub fn record_size(&self) -> u64 {
        HEADER_SIZE as u64 + self.name_length + self.byte_length
    }
}

/// Write one complete record, returning the number of bytes written
pub fn write_record<W: Write>(
    writer: &mut W,
    kind: ChunkKind,
    name: &str,
    payload: &[u8],
) -> io::Result<u64> {
    let header = ChunkHeader {
        kind,
        byte_length: payload.len() as u64,
        name_length: name.len() as u64,
    };
    writer.write_all(&header.encode())?;
    writer.write_all(name.as_bytes())?;
    writer.write_all(payload)?;
    Ok(header.record_size())
}

// ─────────────────────────────────────────────────────────────────────────────
// Chunk
// ─────────────────────────────────────────────────────────────────────────────

/// One archive record held in memory
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    pub kind: ChunkKind,
    pub byte_length: u64,
    pub name: String,
    data: Option<Payload>,
}

impl Chunk {
    /// A record with no payload storage yet
    pub fn new(kind: ChunkKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            byte_length: 0,
            name,
            data: None,
        }
    }

    /// Encoded name length, always taken from `name`
    pub fn name_length(&self) -> u64 {
        self.name.len() as u64
    }

    pub fn header(&self) -> ChunkHeader {
        ChunkHeader {
            kind: self.kind,
            byte_length: self.byte_length,
            name_length: self.name_length(),
        }
    }

    /// Exact encoded size of this record
    pub fn total_size(&self) -> u64 {
        self.header().record_size()
    }

    /// Reserve exactly `size` zeroed payload bytes.
    ///
    /// Refuses (with a warning) when storage already exists, so a buffer is
    /// never replaced behind the owner's back.
    pub fn allocate(&mut self, size: u64, tracker: &AllocTracker) {
        if self.data.is_some() {
            warn!("Chunk `{}` data is already allocated!", self.name);
            return;
        }
        self.data = Some(Payload::zeroed(size as usize, tracker));
        self.byte_length = size;
    }

    pub fn is_allocated(&self) -> bool {
        self.data.is_some()
    }

    /// Payload bytes (empty when nothing is allocated)
    pub fn data(&self) -> &[u8] {
        self.data.as_ref().map(|p| p.bytes.as_slice()).unwrap_or(&[])
    }

    pub fn data_mut(&mut self) -> Option<&mut [u8]> {
        self.data.as_mut().map(|p| p.bytes.as_mut_slice())
    }

    /// Reset the record and release its payload
    pub fn free(&mut self) {
        self.kind = ChunkKind::None;
        self.byte_length = 0;
        self.name.clear();
        // Dropping the payload releases it from the tracker
        self.data = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = ChunkHeader {
            kind: ChunkKind::Texture,
            byte_length: 0x0102,
            name_length: 3,
        };
        let bytes = header.encode();
        assert_eq!(&bytes[..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[4..12], &[0x02, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[12..20], &[3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(ChunkHeader::decode(&bytes), Ok(header));
    }

    #[test]
    fn test_none_kind_is_minus_one() {
        let header = ChunkHeader {
            kind: ChunkKind::None,
            byte_length: 0,
            name_length: 0,
        };
        assert_eq!(&header.encode()[..4], &[0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[..4].copy_from_slice(&7i32.to_le_bytes());
        assert!(ChunkHeader::decode(&bytes).is_err());
    }

    #[test]
    fn test_total_size() {
        let tracker = AllocTracker::new();
        let mut chunk = Chunk::new(ChunkKind::Font, "font.ttf");
        chunk.allocate(100, &tracker);
        assert_eq!(chunk.total_size(), HEADER_SIZE as u64 + 8 + 100);
        assert_eq!(chunk.total_size(), chunk.header().record_size());
    }

    #[test]
    fn test_renamed_chunk_header_follows_name() {
        let mut chunk = Chunk::new(ChunkKind::Font, "a.ttf");
        chunk.name = "fonts/longer.ttf".to_string();
        assert_eq!(chunk.header().name_length, 16);
        assert_eq!(chunk.total_size(), chunk.header().record_size());

        let mut out = Vec::new();
        write_record(&mut out, chunk.kind, &chunk.name, chunk.data()).unwrap();
        assert_eq!(out.len() as u64, chunk.total_size());
    }

    #[test]
    fn test_write_record_matches_total_size() {
        let mut out = Vec::new();
        let written = write_record(&mut out, ChunkKind::Shader, "a.frag", b"void main(){}").unwrap();
        assert_eq!(written as usize, out.len());
        assert_eq!(&out[HEADER_SIZE..HEADER_SIZE + 6], b"a.frag");
    }

    #[test]
    fn test_allocate_twice_keeps_first_buffer() {
        let tracker = AllocTracker::new();
        let mut chunk = Chunk::new(ChunkKind::Sound, "beep.wav");
        chunk.allocate(4, &tracker);
        chunk.data_mut().unwrap().copy_from_slice(&[1, 2, 3, 4]);

        chunk.allocate(16, &tracker);
        assert_eq!(chunk.data(), &[1, 2, 3, 4]);
        assert_eq!(chunk.byte_length, 4);
        assert_eq!(tracker.outstanding(), 1);
    }

    #[test]
    fn test_free_resets_and_releases() {
        let tracker = AllocTracker::new();
        let mut chunk = Chunk::new(ChunkKind::Texture, "tile.png");
        chunk.allocate(8, &tracker);
        assert_eq!(tracker.outstanding(), 1);

        chunk.free();
        assert_eq!(chunk.kind, ChunkKind::None);
        assert_eq!(chunk.byte_length, 0);
        assert_eq!(chunk.name_length(), 0);
        assert!(chunk.name.is_empty());
        assert!(!chunk.is_allocated());
        assert_eq!(tracker.outstanding(), 0);

        // A second free has nothing left to release
        chunk.free();
        assert_eq!(tracker.outstanding(), 0);
    }

    #[test]
    fn test_clone_and_drop_balance() {
        let tracker = AllocTracker::new();
        let mut chunk = Chunk::new(ChunkKind::Font, "f.ttf");
        chunk.allocate(2, &tracker);
        let copy = chunk.clone();
        assert_eq!(tracker.outstanding(), 2);
        drop(copy);
        drop(chunk);
        assert_eq!(tracker.outstanding(), 0);
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(ChunkKind::from_extension("PNG"), Some(ChunkKind::Texture));
        assert_eq!(ChunkKind::from_extension("ttf"), Some(ChunkKind::Font));
        assert_eq!(ChunkKind::from_extension("frag"), Some(ChunkKind::Shader));
        assert_eq!(ChunkKind::from_extension("txt"), None);
        assert_eq!(ChunkKind::from_label("Sound"), Some(ChunkKind::Sound));
        assert_eq!(ChunkKind::from_label("chunk"), None);
    }
}
