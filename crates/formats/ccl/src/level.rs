use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

use crate::cursor::{Cursor, Writer};
use crate::error::{Error, Result};
use crate::map::{Point, TileMap};

/// Map-format marker preceding the tile layers. Only format 1 exists.
const MAP_MARKER: u16 = 1;

/// Shared handle to a level. The level is released when the last handle
/// drops; use [`deep_copy`] for an independent value copy instead.
pub type LevelRef = Rc<RefCell<Level>>;

/// Produce an independent deep copy of a shared level.
pub fn deep_copy(level: &LevelRef) -> LevelRef {
    Rc::new(RefCell::new(level.borrow().clone()))
}

/// Whether a level is framed for file storage or for the clipboard.
///
/// The clipboard form omits the outer size field and reads the field-section
/// size as an independent byte count rather than a value checked against the
/// outer budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Stored,
    Clipboard,
}

/// The six known optional-field kinds of the level format.
///
/// Parsing dispatches over this closed set; any other wire tag is an error,
/// never silently skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTag {
    Name,
    Traps,
    Cloners,
    Password,
    Hint,
    Movers,
}

impl FieldTag {
    pub fn from_wire(tag: u8) -> Option<Self> {
        match tag {
            3 => Some(FieldTag::Name),
            4 => Some(FieldTag::Traps),
            5 => Some(FieldTag::Cloners),
            6 => Some(FieldTag::Password),
            7 => Some(FieldTag::Hint),
            10 => Some(FieldTag::Movers),
            _ => None,
        }
    }

    pub fn wire(self) -> u8 {
        match self {
            FieldTag::Name => 3,
            FieldTag::Traps => 4,
            FieldTag::Cloners => 5,
            FieldTag::Password => 6,
            FieldTag::Hint => 7,
            FieldTag::Movers => 10,
        }
    }
}

/// A pressure-plate-to-trap wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapLink {
    pub button: Point,
    pub trap: Point,
}

/// A button-to-cloning-machine wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloneLink {
    pub button: Point,
    pub clone: Point,
}

/// One level: metadata, its tile map, and the auxiliary link tables used by
/// the game logic layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Level {
    /// Position of the level within its set. Recomputed on levelset write.
    pub level_num: u16,
    /// Time limit in seconds; 0 means untimed.
    pub timer: u16,
    /// Number of chips required to open the socket.
    pub chips: u16,
    pub name: String,
    pub hint: String,
    /// Stored obfuscated on the wire.
    pub password: String,
    pub map: TileMap,
    pub traps: Vec<TrapLink>,
    pub cloners: Vec<CloneLink>,
    pub movers: Vec<Point>,
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap this level in a shared handle.
    pub fn into_ref(self) -> LevelRef {
        Rc::new(RefCell::new(self))
    }

    /// Every trap position wired to the button at `button`.
    pub fn traps_linked_to(&self, button: Point) -> Vec<Point> {
        self.traps
            .iter()
            .filter(|t| t.button == button)
            .map(|t| t.trap)
            .collect()
    }

    /// Every button position wired to the trap at `trap`.
    pub fn trap_buttons_for(&self, trap: Point) -> Vec<Point> {
        self.traps
            .iter()
            .filter(|t| t.trap == trap)
            .map(|t| t.button)
            .collect()
    }

    /// Every cloning machine wired to the button at `button`.
    pub fn cloners_linked_to(&self, button: Point) -> Vec<Point> {
        self.cloners
            .iter()
            .filter(|c| c.button == button)
            .map(|c| c.clone)
            .collect()
    }

    /// Every button position wired to the cloning machine at `clone`.
    pub fn cloner_buttons_for(&self, clone: Point) -> Vec<Point> {
        self.cloners
            .iter()
            .filter(|c| c.clone == clone)
            .map(|c| c.button)
            .collect()
    }

    /// Whether `pos` participates in the forced-move list.
    pub fn is_mover_at(&self, pos: Point) -> bool {
        self.movers.contains(&pos)
    }

    /// Wire a button to a trap. Appends only if the exact pair is not
    /// already linked.
    pub fn connect_trap(&mut self, button: Point, trap: Point) {
        let link = TrapLink { button, trap };
        if !self.traps.contains(&link) {
            self.traps.push(link);
        }
    }

    /// Wire a button to a cloning machine. Appends only if the exact pair is
    /// not already linked.
    pub fn connect_cloner(&mut self, button: Point, clone: Point) {
        let link = CloneLink { button, clone };
        if !self.cloners.contains(&link) {
            self.cloners.push(link);
        }
    }

    /// Add `pos` to the forced-move list if not already present.
    pub fn add_mover(&mut self, pos: Point) {
        if !self.movers.contains(&pos) {
            self.movers.push(pos);
        }
    }

    /// Read one level.
    ///
    /// Stored mode begins with a `u16` declaring the level's total byte
    /// length; every subsequent read is debited against that budget.
    /// Clipboard mode has no outer framing and budgets only the field
    /// section. On any error the level under construction is abandoned.
    pub fn read(c: &mut Cursor, mode: Mode) -> Result<Level> {
        let mut level = Level::new();
        let mut budget: i32 = match mode {
            Mode::Stored => c.read_u16()? as i32,
            Mode::Clipboard => 0,
        };

        level.level_num = c.read_u16()?;
        level.timer = c.read_u16()?;
        level.chips = c.read_u16()?;
        budget -= 6;

        let marker = c.read_u16()?;
        if marker != MAP_MARKER {
            return Err(Error::InvalidMapMarker { found: marker });
        }
        let map_start = c.position();
        level.map = TileMap::read(c)?;
        budget -= (c.position() - map_start) as i32 + 2;

        budget -= 2;
        let declared = c.read_u16()?;
        let mut remaining = match mode {
            Mode::Clipboard => declared as i32,
            Mode::Stored => {
                if declared as i32 != budget {
                    return Err(Error::SizeMismatch {
                        declared,
                        expected: budget,
                    });
                }
                budget
            }
        };

        // The loop ends when the declared length is used up; a field
        // claiming more than remains is a distinct error.
        while remaining > 0 {
            let field_offset = c.position();
            let tag = c.read_u8()?;
            let size = c.read_u8()?;
            remaining -= size as i32 + 2;
            if remaining < 0 {
                return Err(Error::TruncatedRecord { offset: field_offset });
            }
            let Some(field) = FieldTag::from_wire(tag) else {
                return Err(Error::UnrecognizedField {
                    tag,
                    offset: field_offset,
                });
            };
            trace!("field {field:?} ({size} bytes) at offset {field_offset:#x}");
            level.read_field(c, field, size)?;
        }

        if remaining != 0 {
            return Err(match mode {
                Mode::Stored => Error::ChecksumMismatch { residual: remaining },
                Mode::Clipboard => Error::CorruptClipboardData { residual: remaining },
            });
        }
        Ok(level)
    }

    fn read_field(&mut self, c: &mut Cursor, field: FieldTag, size: u8) -> Result<()> {
        match field {
            FieldTag::Name => self.name = c.read_string(size as usize)?,
            FieldTag::Hint => self.hint = c.read_string(size as usize)?,
            FieldTag::Password => self.password = c.read_password(size as usize)?,
            FieldTag::Traps => {
                if size % 10 != 0 {
                    return Err(Error::InvalidFieldSize { tag: field.wire(), size });
                }
                for _ in 0..size / 10 {
                    let button = read_point16(c)?;
                    let trap = read_point16(c)?;
                    // In-game trap state; meaningless at rest.
                    let _ = c.read_u16()?;
                    self.traps.push(TrapLink { button, trap });
                }
            }
            FieldTag::Cloners => {
                if size % 8 != 0 {
                    return Err(Error::InvalidFieldSize { tag: field.wire(), size });
                }
                for _ in 0..size / 8 {
                    let button = read_point16(c)?;
                    let clone = read_point16(c)?;
                    self.cloners.push(CloneLink { button, clone });
                }
            }
            FieldTag::Movers => {
                if size % 2 != 0 {
                    return Err(Error::InvalidFieldSize { tag: field.wire(), size });
                }
                for _ in 0..size / 2 {
                    let x = c.read_u8()? as i16;
                    let y = c.read_u8()? as i16;
                    self.movers.push(Point::new(x, y));
                }
            }
        }
        Ok(())
    }

    /// Write one level. Returns bytes produced.
    ///
    /// Both size fields are written as placeholders and backpatched once the
    /// true byte counts are known; neither is knowable up front and the
    /// format has no trailer.
    pub fn write(&self, w: &mut Writer, mode: Mode) -> usize {
        let level_start = w.position();
        if mode == Mode::Stored {
            w.write_u16(0); // backpatched: level size
        }

        w.write_u16(self.level_num);
        w.write_u16(self.timer);
        w.write_u16(self.chips);

        w.write_u16(MAP_MARKER);
        self.map.write(w);

        let field_start = w.position();
        w.write_u16(0); // backpatched: field section size

        if !self.name.is_empty() {
            w.write_u8(FieldTag::Name.wire());
            w.write_u8(encoded_len(&self.name));
            w.write_string(&self.name);
        }
        if !self.hint.is_empty() {
            w.write_u8(FieldTag::Hint.wire());
            w.write_u8(encoded_len(&self.hint));
            w.write_string(&self.hint);
        }
        if !self.password.is_empty() {
            w.write_u8(FieldTag::Password.wire());
            w.write_u8(encoded_len(&self.password));
            w.write_password(&self.password);
        }
        if !self.traps.is_empty() {
            w.write_u8(FieldTag::Traps.wire());
            w.write_u8((self.traps.len() * 10) as u8);
            for t in &self.traps {
                write_point16(w, t.button);
                write_point16(w, t.trap);
                w.write_u16(0); // reserved state word
            }
        }
        if !self.cloners.is_empty() {
            w.write_u8(FieldTag::Cloners.wire());
            w.write_u8((self.cloners.len() * 8) as u8);
            for cl in &self.cloners {
                write_point16(w, cl.button);
                write_point16(w, cl.clone);
            }
        }
        if !self.movers.is_empty() {
            w.write_u8(FieldTag::Movers.wire());
            w.write_u8((self.movers.len() * 2) as u8);
            for m in &self.movers {
                w.write_u8(m.x as u8);
                w.write_u8(m.y as u8);
            }
        }

        let end = w.position();
        if mode == Mode::Stored {
            // The outer size excludes its own two bytes.
            w.patch_u16(level_start, (end - level_start - 2) as u16);
        }
        w.patch_u16(field_start, (end - field_start - 2) as u16);
        end - level_start
    }
}

/// Encoded length of a string field: one byte per character plus the
/// NUL terminator.
fn encoded_len(s: &str) -> u8 {
    (s.chars().count() + 1) as u8
}

fn read_point16(c: &mut Cursor) -> Result<Point> {
    let x = c.read_u16()? as i16;
    let y = c.read_u16()? as i16;
    Ok(Point::new(x, y))
}

fn write_point16(w: &mut Writer, p: Point) {
    w.write_u16(p.x as u16);
    w.write_u16(p.y as u16);
}
