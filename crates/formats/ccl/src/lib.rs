//! Reader/writer for Chip's Challenge levelset (.dat/.ccl) files.
//!
//! Three-layer architecture:
//! - **Layer 1** (`cursor`): Raw byte I/O — little-endian integers, the RLE
//!   tile codec, NUL-terminated and obfuscated strings
//! - **Layer 2** (`map`/`level`): The dual-layer tile map and the per-level
//!   tagged-field record with its length/budget discipline
//! - **Layer 3** (`levelset`): The container — magic, level count, sequential
//!   levels renumbered on write
//!
//! Round-tripping is byte-exact: reading a file and writing it back produces
//! identical bytes. Every framing violation surfaces as a distinct
//! [`Error`]; nothing is silently recovered.

pub mod cursor;
pub mod error;
pub mod level;
pub mod levelset;
pub mod map;
pub mod sniff;
pub mod variant;

pub use cursor::{Cursor, Writer};
pub use error::{Error, Result};
pub use level::{deep_copy, CloneLink, FieldTag, Level, LevelRef, Mode, TrapLink};
pub use levelset::{random_password, Levelset};
pub use map::{Point, Tile, TileMap, MAP_HEIGHT, MAP_WIDTH};
pub use sniff::{classify, ContainerKind};
pub use variant::Variant;
