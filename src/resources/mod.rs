//! Resource cache
//!
//! Decoded resources keyed by the name of the archive chunk they came from.
//! Loading is always explicit: `get` never touches the archive.

mod decoders;

use crate::archive::{Archive, ArchiveError, Chunk, ChunkKind, Result};
use log::{debug, info};
use macroquad::prelude::{Font, Texture2D};
use std::collections::HashMap;

/// Turns raw chunk bytes into a live resource
pub trait Decode: Sized {
    /// Only chunks of this kind are handed to `decode`
    const KIND: ChunkKind;

    /// The error is a human-readable reason, wrapped into
    /// `ArchiveError::Decode` by the cache
    fn decode(name: &str, bytes: &[u8]) -> std::result::Result<Self, String>;
}

fn decode_chunk<T: Decode>(chunk: &Chunk) -> Result<T> {
    T::decode(&chunk.name, chunk.data()).map_err(|reason| ArchiveError::Decode {
        name: chunk.name.clone(),
        kind: T::KIND,
        reason,
    })
}

/// Name -> decoded resource of one kind
pub struct ResourceCache<T> {
    entries: HashMap<String, T>,
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: Decode> ResourceCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every chunk of `T::KIND` in the archive.
    ///
    /// Chunks of other kinds are skipped without being buffered, and each
    /// payload is released right after decoding. Entries with the same name
    /// are replaced. The first decode failure aborts the batch; anything
    /// decoded before it stays cached. Returns how many were loaded.
    pub fn load_all(&mut self, archive: &Archive) -> Result<usize> {
        let mut loaded = 0;
        let entries = &mut self.entries;
        archive.visit_chunks(
            |head| head.header.kind == T::KIND,
            |chunk| {
                let value = decode_chunk::<T>(&chunk)?;
                debug!("Loaded {} `{}`", T::KIND, chunk.name);
                entries.insert(chunk.name.clone(), value);
                loaded += 1;
                Ok(())
            },
        )?;
        info!(
            "Loaded {} {}(s) from `{}`",
            loaded,
            T::KIND,
            archive.path().display()
        );
        Ok(loaded)
    }

    /// Decode a single named chunk of `T::KIND` and cache it
    pub fn load_one(&mut self, archive: &Archive, name: &str) -> Result<&T> {
        let chunk = archive.read_chunk(name, Some(T::KIND))?;
        let value = decode_chunk::<T>(&chunk)?;
        drop(chunk);

        self.entries.insert(name.to_string(), value);
        debug!("Loaded {} `{}`", T::KIND, name);
        self.get(name)
    }

    /// A previously loaded resource
    pub fn get(&self, name: &str) -> Result<&T> {
        self.entries.get(name).ok_or_else(|| ArchiveError::NotFound {
            name: name.to_string(),
            kind: T::KIND,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// The caches a typical app needs
#[derive(Default)]
pub struct Resources {
    pub textures: ResourceCache<Texture2D>,
    pub fonts: ResourceCache<Font>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every texture and font the archive holds
    pub fn load_all(&mut self, archive: &Archive) -> Result<()> {
        self.textures.load_all(archive)?;
        self.fonts.load_all(archive)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Texture stand-in that needs no GPU
    #[derive(Debug, PartialEq)]
    struct Pixels(Vec<u8>);

    impl Decode for Pixels {
        const KIND: ChunkKind = ChunkKind::Texture;

        fn decode(_name: &str, bytes: &[u8]) -> std::result::Result<Self, String> {
            if bytes.starts_with(b"bad") {
                return Err("not an image".to_string());
            }
            Ok(Pixels(bytes.to_vec()))
        }
    }

    /// Font stand-in that only remembers its name
    struct Glyphs(String);

    impl Decode for Glyphs {
        const KIND: ChunkKind = ChunkKind::Font;

        fn decode(name: &str, _bytes: &[u8]) -> std::result::Result<Self, String> {
            Ok(Glyphs(name.to_string()))
        }
    }

    fn setup_test_archive() -> (TempDir, Archive) {
        let dir = TempDir::new().unwrap();
        let archive = Archive::new(dir.path().join("data.dat"));
        archive.write_bytes(ChunkKind::Texture, "grass.png", b"green").unwrap();
        archive.write_bytes(ChunkKind::Font, "mono.ttf", b"glyphs").unwrap();
        archive.write_bytes(ChunkKind::Texture, "stone.png", b"grey").unwrap();
        archive.write_bytes(ChunkKind::Sound, "step.wav", b"RIFF").unwrap();
        (dir, archive)
    }

    #[test]
    fn test_load_all_keeps_only_matching_kind() {
        let (_dir, archive) = setup_test_archive();
        let mut cache = ResourceCache::<Pixels>::new();

        assert_eq!(cache.load_all(&archive).unwrap(), 2);
        assert_eq!(cache.names(), vec!["grass.png", "stone.png"]);
        assert_eq!(cache.get("grass.png").unwrap(), &Pixels(b"green".to_vec()));
        assert!(!cache.contains("mono.ttf"));
        assert_eq!(archive.tracker().outstanding(), 0);

        let mut fonts = ResourceCache::<Glyphs>::new();
        assert_eq!(fonts.load_all(&archive).unwrap(), 1);
        assert_eq!(fonts.get("mono.ttf").unwrap().0, "mono.ttf");
    }

    #[test]
    fn test_get_never_loads() {
        let (_dir, archive) = setup_test_archive();
        let cache = ResourceCache::<Pixels>::new();
        assert!(cache.is_empty());
        assert!(matches!(
            cache.get("grass.png"),
            Err(ArchiveError::NotFound { kind: ChunkKind::Texture, .. })
        ));
        assert!(archive.chunk_exists("grass.png").unwrap());
    }

    #[test]
    fn test_load_one() {
        let (_dir, archive) = setup_test_archive();
        let mut cache = ResourceCache::<Pixels>::new();

        assert_eq!(cache.load_one(&archive, "stone.png").unwrap(), &Pixels(b"grey".to_vec()));
        assert_eq!(cache.len(), 1);

        // Right name, wrong kind
        assert!(matches!(
            cache.load_one(&archive, "mono.ttf"),
            Err(ArchiveError::NotFound { .. })
        ));
        assert_eq!(archive.tracker().outstanding(), 0);
    }

    #[test]
    fn test_reload_overwrites_entry() {
        let (_dir, archive) = setup_test_archive();
        let mut cache = ResourceCache::<Pixels>::new();
        cache.load_all(&archive).unwrap();

        archive.remove_chunk("grass.png").unwrap();
        archive.write_bytes(ChunkKind::Texture, "grass.png", b"brown").unwrap();
        cache.load_one(&archive, "grass.png").unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("grass.png").unwrap(), &Pixels(b"brown".to_vec()));
    }

    #[test]
    fn test_decode_failure_aborts_batch() {
        let (_dir, archive) = setup_test_archive();
        archive.write_bytes(ChunkKind::Texture, "broken.png", b"bad data").unwrap();
        archive.write_bytes(ChunkKind::Texture, "after.png", b"fine").unwrap();

        let mut cache = ResourceCache::<Pixels>::new();
        match cache.load_all(&archive).unwrap_err() {
            ArchiveError::Decode { name, kind, .. } => {
                assert_eq!(name, "broken.png");
                assert_eq!(kind, ChunkKind::Texture);
            }
            other => panic!("expected decode error, got {:?}", other),
        }
        assert!(!cache.contains("after.png"));
        assert_eq!(archive.tracker().outstanding(), 0);
    }

    #[test]
    fn test_load_one_decode_failure() {
        let (_dir, archive) = setup_test_archive();
        archive.write_bytes(ChunkKind::Texture, "broken.png", b"bad data").unwrap();

        let mut cache = ResourceCache::<Pixels>::new();
        match cache.load_one(&archive, "broken.png").unwrap_err() {
            ArchiveError::Decode { name, kind, reason } => {
                assert_eq!(name, "broken.png");
                assert_eq!(kind, ChunkKind::Texture);
                assert_eq!(reason, "not an image");
            }
            other => panic!("expected decode error, got {:?}", other),
        }
        assert!(!cache.contains("broken.png"));
        assert_eq!(archive.tracker().outstanding(), 0);
    }

    #[test]
    fn test_missing_archive() {
        let dir = TempDir::new().unwrap();
        let archive = Archive::new(dir.path().join("absent.dat"));
        let mut cache = ResourceCache::<Pixels>::new();
        assert!(matches!(
            cache.load_all(&archive),
            Err(ArchiveError::Missing { .. })
        ));
    }
}
