//! Fixture generator for ccl unit tests.
//!
//! Generates small synthetic levelset and clipboard binaries into
//! `tests/fixtures/`. These are committed to the repo and serve as
//! regression inputs for the integration tests (`tests/round_trip.rs`,
//! `tests/sniff_files.rs`).
//!
//! # Usage
//!
//! ```
//! cargo run -p ccl --bin gen_fixtures
//! ```
//!
//! Every fixture is round-tripped through the reader before being written,
//! so a generator that emits unreadable bytes fails loudly here rather than
//! in a test run.

use ccl::{Cursor, Level, Levelset, Mode, Point, Variant, Writer};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn main() -> std::io::Result<()> {
    std::fs::create_dir_all(FIXTURES_DIR)?;

    write("two_levels_ms.dat", build_two_levels_ms())?;
    write("wired_lynx.dat", build_wired_lynx())?;
    write("clip_single_level.bin", build_clip_single_level())?;

    Ok(())
}

fn write(name: &str, data: Vec<u8>) -> std::io::Result<()> {
    let path = format!("{FIXTURES_DIR}/{name}");
    std::fs::write(&path, &data)?;
    println!("wrote {name} ({} bytes)", data.len());
    Ok(())
}

// ── Fixture 1: two_levels_ms ─────────────────────────────────────────────────

/// Minimal MS set: two near-empty levels with names, passwords, and a hint.
///
/// Validates:
/// - Container header (magic + count)
/// - String and password field framing
/// - Sequential renumbering on write
pub fn build_two_levels_ms() -> Vec<u8> {
    let mut set = Levelset::new(2);
    {
        let first = set.level(0);
        let mut first = first.borrow_mut();
        first.timer = 100;
        first.chips = 11;
        first.password = "BDHP".into();
        first.hint = "Collect chips to get past the chip socket.".into();
        first.map.set_fg(Point::new(0, 0), 0x6E);
    }
    {
        let second = set.level(1);
        let mut second = second.borrow_mut();
        second.password = "JXMJ".into();
        second.map.set_fg(Point::new(31, 31), 0x15);
    }
    assemble(set)
}

// ── Fixture 2: wired_lynx ────────────────────────────────────────────────────

/// One Lynx level exercising every list-typed field.
///
/// Validates:
/// - Trap entries (10 bytes each, reserved state word zero)
/// - Cloner entries (8 bytes each)
/// - Mover entries (2 bytes each)
pub fn build_wired_lynx() -> Vec<u8> {
    let mut set = Levelset::new(1);
    set.set_variant(Variant::Lynx);
    {
        let level = set.level(0);
        let mut level = level.borrow_mut();
        level.timer = 200;
        level.password = "TONY".into();
        level.connect_trap(Point::new(2, 3), Point::new(4, 5));
        level.connect_trap(Point::new(2, 4), Point::new(4, 6));
        level.connect_cloner(Point::new(10, 10), Point::new(20, 20));
        level.add_mover(Point::new(7, 7));
        level.add_mover(Point::new(8, 7));
        level.map.push(Point::new(4, 5), 0x27);
    }
    assemble(set)
}

// ── Fixture 3: clip_single_level ─────────────────────────────────────────────

/// A single level in clipboard framing (no outer size field).
pub fn build_clip_single_level() -> Vec<u8> {
    let mut level = Level::new();
    level.level_num = 1;
    level.name = "Pasted".into();
    level.password = "KCRE".into();
    level.add_mover(Point::new(3, 9));

    let mut w = Writer::new();
    level.write(&mut w, Mode::Clipboard);
    let bytes = w.into_bytes();

    let decoded = Level::read(&mut Cursor::new(&bytes), Mode::Clipboard)
        .expect("clipboard fixture failed to decode");
    assert_eq!(decoded, level, "clipboard round-trip mismatch");
    bytes
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn assemble(mut set: Levelset) -> Vec<u8> {
    let mut w = Writer::new();
    set.write(&mut w);
    let bytes = w.into_bytes();

    // Verify round-trip: the reader must reproduce the exact bytes.
    let mut decoded = Levelset::read(&mut Cursor::new(&bytes)).expect("fixture failed to decode");
    let mut rt = Writer::new();
    decoded.write(&mut rt);
    assert_eq!(rt.into_bytes(), bytes, "fixture round-trip mismatch");
    bytes
}
