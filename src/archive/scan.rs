//! Sequential archive scanner
//!
//! Walks records front to back, bounded by the total byte count (the archive
//! stores no record count). Every length is checked against the bytes that
//! remain before anything is read or allocated, and the walk stops at the
//! first inconsistency.

use super::chunk::{AllocTracker, Chunk, ChunkHeader, ChunkKind, HEADER_SIZE};
use super::{ArchiveError, Result};
use std::io::{self, Read};
use std::path::Path;

/// Header and name of a record whose payload has not been consumed yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHead {
    /// Byte offset of the record's first header byte
    pub offset: u64,
    pub header: ChunkHeader,
    pub name: String,
}

/// Position and extent of one record inside an in-memory archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSpan {
    pub offset: u64,
    pub size: u64,
    pub kind: ChunkKind,
    pub name: String,
}

/// Cursor over a stream of records.
///
/// Every `next_head` must be followed by exactly one `read_payload` or
/// `skip_payload` to keep the cursor aligned.
pub struct ChunkScanner<'a, R> {
    reader: R,
    path: &'a Path,
    position: u64,
    total: u64,
    record_start: u64,
}

impl<'a, R: Read> ChunkScanner<'a, R> {
    /// `total` is the number of bytes the stream holds; `path` is only used
    /// for error context
    pub fn new(reader: R, total: u64, path: &'a Path) -> Self {
        Self {
            reader,
            path,
            position: 0,
            total,
            record_start: 0,
        }
    }

    fn remaining(&self) -> u64 {
        self.total - self.position
    }

    fn corrupt(&self, reason: impl Into<String>) -> ArchiveError {
        ArchiveError::Corrupt {
            offset: self.record_start,
            reason: reason.into(),
        }
    }

    /// Fill `buf` completely, a short read means the record is truncated
    fn read_exact(&mut self, buf: &mut [u8], what: &str) -> Result<()> {
        match self.reader.read_exact(buf) {
            Ok(()) => {
                self.position += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(self.corrupt(format!("short read in {}", what)))
            }
            Err(e) => Err(ArchiveError::io(self.path, e)),
        }
    }

    /// Read the next record's header and name, `None` at the end
    pub fn next_head(&mut self) -> Result<Option<RecordHead>> {
        if self.position >= self.total {
            return Ok(None);
        }
        self.record_start = self.position;

        if self.remaining() < HEADER_SIZE as u64 {
            return Err(self.corrupt(format!(
                "truncated header ({} of {} bytes)",
                self.remaining(),
                HEADER_SIZE
            )));
        }
        let mut raw = [0u8; HEADER_SIZE];
        self.read_exact(&mut raw, "header")?;
        let header = ChunkHeader::decode(&raw).map_err(|reason| self.corrupt(reason))?;

        if header.name_length > self.remaining() {
            return Err(self.corrupt(format!(
                "name length {} exceeds the {} bytes left",
                header.name_length,
                self.remaining()
            )));
        }
        let mut name = vec![0u8; header.name_length as usize];
        self.read_exact(&mut name, "name")?;
        let name = String::from_utf8(name).map_err(|_| self.corrupt("name is not valid UTF-8"))?;

        if header.byte_length > self.remaining() {
            return Err(self.corrupt(format!(
                "payload length {} exceeds the {} bytes left",
                header.byte_length,
                self.remaining()
            )));
        }

        Ok(Some(RecordHead {
            offset: self.record_start,
            header,
            name,
        }))
    }

    /// Consume the payload of `head` into a fresh chunk
    pub fn read_payload(&mut self, head: RecordHead, tracker: &AllocTracker) -> Result<Chunk> {
        let mut chunk = Chunk::new(head.header.kind, head.name);
        chunk.allocate(head.header.byte_length, tracker);
        if let Some(buf) = chunk.data_mut() {
            self.read_exact(buf, "payload")?;
        }
        Ok(chunk)
    }

    /// Consume the payload of `head` without keeping it
    pub fn skip_payload(&mut self, head: &RecordHead) -> Result<()> {
        let wanted = head.header.byte_length;
        let skipped = io::copy(&mut (&mut self.reader).take(wanted), &mut io::sink())
            .map_err(|e| ArchiveError::io(self.path, e))?;
        self.position += skipped;
        if skipped < wanted {
            return Err(self.corrupt("short read in payload"));
        }
        Ok(())
    }
}

/// Names of all records, in on-disk order. Empty names are skipped.
pub fn scan_names<R: Read>(reader: R, total: u64, path: &Path) -> Result<Vec<String>> {
    let mut scanner = ChunkScanner::new(reader, total, path);
    let mut names = Vec::new();
    while let Some(head) = scanner.next_head()? {
        scanner.skip_payload(&head)?;
        if !head.name.is_empty() {
            names.push(head.name);
        }
    }
    Ok(names)
}

/// Hand every record accepted by `filter` to `visit`, one at a time.
///
/// Rejected records are skipped without ever allocating their payload, and an
/// accepted record is released as soon as `visit` returns with it.
pub fn scan_chunks<R, F, V>(
    reader: R,
    total: u64,
    path: &Path,
    tracker: &AllocTracker,
    mut filter: F,
    mut visit: V,
) -> Result<()>
where
    R: Read,
    F: FnMut(&RecordHead) -> bool,
    V: FnMut(Chunk) -> Result<()>,
{
    let mut scanner = ChunkScanner::new(reader, total, path);
    while let Some(head) = scanner.next_head()? {
        if filter(&head) {
            let chunk = scanner.read_payload(head, tracker)?;
            visit(chunk)?;
        } else {
            scanner.skip_payload(&head)?;
        }
    }
    Ok(())
}

/// Offsets, kinds and encoded sizes of every record, payloads skipped
pub fn scan_spans<R: Read>(reader: R, total: u64, path: &Path) -> Result<Vec<RecordSpan>> {
    let mut scanner = ChunkScanner::new(reader, total, path);
    let mut spans = Vec::new();
    while let Some(head) = scanner.next_head()? {
        scanner.skip_payload(&head)?;
        spans.push(RecordSpan {
            offset: head.offset,
            size: head.header.record_size(),
            kind: head.header.kind,
            name: head.name,
        });
    }
    Ok(spans)
}

/// Offsets and encoded sizes of every record in an in-memory archive
pub fn locate_records(bytes: &[u8], path: &Path) -> Result<Vec<RecordSpan>> {
    scan_spans(bytes, bytes.len() as u64, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::chunk::write_record;

    fn sample() -> Vec<u8> {
        let mut bytes = Vec::new();
        write_record(&mut bytes, ChunkKind::Font, "a.ttf", b"AAAA").unwrap();
        write_record(&mut bytes, ChunkKind::Texture, "b.png", b"BB").unwrap();
        write_record(&mut bytes, ChunkKind::Sound, "c.wav", b"CCCCCC").unwrap();
        bytes
    }

    fn path() -> &'static Path {
        Path::new("test.dat")
    }

    #[test]
    fn test_scan_names_in_order() {
        let bytes = sample();
        let names = scan_names(bytes.as_slice(), bytes.len() as u64, path()).unwrap();
        assert_eq!(names, vec!["a.ttf", "b.png", "c.wav"]);
    }

    #[test]
    fn test_scan_names_skips_empty_names() {
        let mut bytes = Vec::new();
        write_record(&mut bytes, ChunkKind::None, "", b"xyz").unwrap();
        write_record(&mut bytes, ChunkKind::Font, "f.ttf", b"f").unwrap();
        let names = scan_names(bytes.as_slice(), bytes.len() as u64, path()).unwrap();
        assert_eq!(names, vec!["f.ttf"]);
    }

    #[test]
    fn test_scan_chunks_filter_never_allocates_rejected() {
        let bytes = sample();
        let tracker = AllocTracker::new();
        let mut seen = Vec::new();
        scan_chunks(
            bytes.as_slice(),
            bytes.len() as u64,
            path(),
            &tracker,
            |head| head.header.kind == ChunkKind::Texture,
            |chunk| {
                assert_eq!(tracker.outstanding(), 1);
                seen.push((chunk.name.clone(), chunk.data().to_vec()));
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(seen, vec![("b.png".to_string(), b"BB".to_vec())]);
        assert_eq!(tracker.outstanding(), 0);
    }

    #[test]
    fn test_locate_records() {
        let bytes = sample();
        let spans = locate_records(&bytes, path()).unwrap();
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].offset, 0);
        assert_eq!(spans[0].size, (HEADER_SIZE + 5 + 4) as u64);
        assert_eq!(spans[1].offset, spans[0].size);
        assert_eq!(spans[2].kind, ChunkKind::Sound);
        let end = spans[2].offset + spans[2].size;
        assert_eq!(end, bytes.len() as u64);
    }

    #[test]
    fn test_truncated_payload_is_corrupt() {
        let mut bytes = sample();
        bytes.truncate(bytes.len() - 2);
        let err = scan_names(bytes.as_slice(), bytes.len() as u64, path()).unwrap_err();
        let last_offset = (HEADER_SIZE + 5 + 4 + HEADER_SIZE + 5 + 2) as u64;
        match err {
            ArchiveError::Corrupt { offset, .. } => assert_eq!(offset, last_offset),
            other => panic!("expected corrupt archive, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_header_is_corrupt() {
        let mut bytes = sample();
        bytes.extend_from_slice(&[0, 0, 0]);
        let err = locate_records(&bytes, path()).unwrap_err();
        assert!(matches!(err, ArchiveError::Corrupt { .. }));
    }

    #[test]
    fn test_oversized_name_length_is_corrupt() {
        let header = ChunkHeader {
            kind: ChunkKind::Font,
            byte_length: 0,
            name_length: u64::MAX,
        };
        let bytes = header.encode().to_vec();
        let err = scan_names(bytes.as_slice(), bytes.len() as u64, path()).unwrap_err();
        assert!(matches!(err, ArchiveError::Corrupt { offset: 0, .. }));
    }

    #[test]
    fn test_invalid_utf8_name_is_corrupt() {
        let mut bytes = Vec::new();
        let header = ChunkHeader {
            kind: ChunkKind::Font,
            byte_length: 0,
            name_length: 2,
        };
        bytes.extend_from_slice(&header.encode());
        bytes.extend_from_slice(&[0xc3, 0x28]);
        let err = scan_names(bytes.as_slice(), bytes.len() as u64, path()).unwrap_err();
        assert!(matches!(err, ArchiveError::Corrupt { .. }));
    }

    #[test]
    fn test_stream_shorter_than_declared_total_is_corrupt() {
        // Total claims more bytes than the reader actually has
        let bytes = sample();
        let tracker = AllocTracker::new();
        let err = scan_chunks(
            &bytes[..bytes.len() - 1],
            bytes.len() as u64,
            path(),
            &tracker,
            |_| true,
            |_| Ok(()),
        )
        .unwrap_err();
        assert!(matches!(err, ArchiveError::Corrupt { .. }));
        assert_eq!(tracker.outstanding(), 0);
    }
}
