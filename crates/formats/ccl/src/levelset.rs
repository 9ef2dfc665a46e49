use std::path::Path;

use log::debug;
use rand::Rng;

use crate::cursor::{Cursor, Writer};
use crate::error::{Error, Result};
use crate::level::{deep_copy, Level, LevelRef, Mode};
use crate::variant::Variant;

/// An ordered collection of levels plus the container magic identifying the
/// target engine variant.
///
/// Level numbers are recomputed 1..N at write time regardless of the stored
/// values, so reordering the collection before a write is always safe.
#[derive(Debug)]
pub struct Levelset {
    variant: Variant,
    levels: Vec<LevelRef>,
    dirty: bool,
}

impl Levelset {
    /// Create a set of `count` fresh levels, auto-named `"Level <i>"` and
    /// each given a random password.
    pub fn new(count: usize) -> Self {
        let mut set = Self {
            variant: Variant::default(),
            levels: Vec::with_capacity(count),
            dirty: false,
        };
        for _ in 0..count {
            set.add_level();
        }
        set.dirty = false;
        set
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn set_variant(&mut self, variant: Variant) {
        if self.variant != variant {
            self.variant = variant;
            self.dirty = true;
        }
    }

    pub fn levels(&self) -> &[LevelRef] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, index: usize) -> &LevelRef {
        &self.levels[index]
    }

    /// Whether the set has unsaved changes. Cleared on read and write.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Append a fresh level, auto-named after its 1-based position and given
    /// a random password. Returns a handle to it.
    pub fn add_level(&mut self) -> LevelRef {
        let mut level = Level::new();
        level.name = format!("Level {}", self.levels.len() + 1);
        level.password = random_password();
        let level = level.into_ref();
        self.levels.push(LevelRef::clone(&level));
        self.dirty = true;
        level
    }

    /// Append an already-constructed level.
    pub fn push_level(&mut self, level: LevelRef) {
        self.levels.push(level);
        self.dirty = true;
    }

    /// Insert a level at `index`, shifting later levels down.
    pub fn insert_level(&mut self, index: usize, level: LevelRef) {
        self.levels.insert(index, level);
        self.dirty = true;
    }

    /// Remove and return the level at `index`; the caller takes over the
    /// returned handle.
    pub fn take_level(&mut self, index: usize) -> LevelRef {
        self.dirty = true;
        self.levels.remove(index)
    }

    /// Read a whole levelset.
    ///
    /// A failure in any level propagates immediately; the partially built
    /// set is dropped with it. Reads are not atomic across levels.
    pub fn read(c: &mut Cursor) -> Result<Levelset> {
        let magic = c.read_u32()?;
        let variant =
            Variant::from_magic(magic).ok_or(Error::InvalidHeader { magic })?;

        let count = c.read_u16()? as usize;
        debug!("reading {variant} levelset, {count} levels");

        let mut levels = Vec::with_capacity(count);
        for _ in 0..count {
            levels.push(Level::read(c, Mode::Stored)?.into_ref());
        }
        Ok(Levelset {
            variant,
            levels,
            dirty: false,
        })
    }

    /// Write the whole levelset: magic, count, then every level renumbered
    /// 1..N in sequence order. Returns bytes produced.
    pub fn write(&mut self, w: &mut Writer) -> usize {
        let start = w.position();
        w.write_u32(self.variant.magic());
        w.write_u16(self.levels.len() as u16);

        for (i, level) in self.levels.iter().enumerate() {
            let mut level = level.borrow_mut();
            // Levels may have been reordered since the last read.
            level.level_num = (i + 1) as u16;
            level.write(w, Mode::Stored);
        }

        self.dirty = false;
        debug!(
            "wrote {} levelset, {} levels, {} bytes",
            self.variant,
            self.levels.len(),
            w.position() - start
        );
        w.position() - start
    }

    /// Read a levelset from a file.
    pub fn load(path: &Path) -> Result<Levelset> {
        let data = std::fs::read(path)?;
        Self::read(&mut Cursor::new(&data))
    }

    /// Write the levelset to a file, renumbering as [`write`](Self::write)
    /// does.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        let mut w = Writer::new();
        self.write(&mut w);
        std::fs::write(path, w.into_bytes())?;
        Ok(())
    }
}

impl Clone for Levelset {
    /// Deep copy: every level is duplicated, not shared.
    fn clone(&self) -> Self {
        Self {
            variant: self.variant,
            levels: self.levels.iter().map(deep_copy).collect(),
            dirty: false,
        }
    }
}

impl Default for Levelset {
    fn default() -> Self {
        Self::new(0)
    }
}

/// A 4-letter uppercase password. Unpredictable-looking, nothing more.
pub fn random_password() -> String {
    let mut rng = rand::thread_rng();
    (0..4).map(|_| rng.gen_range(b'A'..=b'Z') as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_set_names_levels_in_order() {
        let set = Levelset::new(1);
        assert_eq!(set.level(0).borrow().name, "Level 1");

        let mut set = set;
        set.add_level();
        assert_eq!(set.len(), 2);
        assert_eq!(set.level(1).borrow().name, "Level 2");
    }

    #[test]
    fn random_password_is_four_uppercase_letters() {
        for _ in 0..50 {
            let p = random_password();
            assert_eq!(p.len(), 4);
            assert!(p.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn fresh_levels_get_distinct_passwords() {
        let set = Levelset::new(8);
        let first = set.level(0).borrow().password.clone();
        // 26^4 combinations; eight identical draws would mean a broken RNG.
        assert!(set
            .levels()
            .iter()
            .skip(1)
            .any(|l| l.borrow().password != first));
    }

    #[test]
    fn write_renumbers_sequentially() {
        let mut set = Levelset::new(3);
        set.level(0).borrow_mut().level_num = 42;
        set.level(2).borrow_mut().level_num = 7;

        let mut w = Writer::new();
        set.write(&mut w);
        for (i, level) in set.levels().iter().enumerate() {
            assert_eq!(level.borrow().level_num, (i + 1) as u16);
        }
    }

    #[test]
    fn take_and_insert_reorder_levels() {
        let mut set = Levelset::new(3);
        let first = set.take_level(0);
        assert_eq!(set.len(), 2);
        set.insert_level(2, first);
        assert_eq!(set.level(2).borrow().name, "Level 1");
    }

    #[test]
    fn clone_is_deep() {
        let set = Levelset::new(2);
        let copy = set.clone();
        copy.level(0).borrow_mut().name = "Mutated".into();
        assert_eq!(set.level(0).borrow().name, "Level 1");
    }

    #[test]
    fn unknown_magic_is_rejected() {
        let mut w = Writer::new();
        w.write_u32(0xDEAD_BEEF);
        w.write_u16(0);
        let bytes = w.into_bytes();
        let err = Levelset::read(&mut Cursor::new(&bytes)).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader { magic: 0xDEAD_BEEF }));
    }

    #[test]
    fn dirty_tracks_mutation_and_clears_on_write() {
        let mut set = Levelset::new(1);
        assert!(!set.is_dirty());
        set.add_level();
        assert!(set.is_dirty());
        set.write(&mut Writer::new());
        assert!(!set.is_dirty());
    }
}
