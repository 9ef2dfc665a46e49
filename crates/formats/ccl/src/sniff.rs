use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::variant::Variant;

/// What the leading bytes of a file say about its container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// One of the four known levelset magics.
    Recognized(Variant),
    /// Some other leading value; assumed to be a different, externally
    /// defined reference format rather than a corrupt levelset.
    Alternate,
    /// The file could not be opened or holds fewer than 4 bytes.
    Unreadable,
}

/// Classify a file by its first 4 bytes.
///
/// This is a standalone pre-check; the read pipeline does its own header
/// validation. `Unreadable` does not imply the file is invalid, only that no
/// magic could be read.
pub fn classify(path: &Path) -> ContainerKind {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return ContainerKind::Unreadable,
    };
    let mut magic = [0u8; 4];
    if file.read_exact(&mut magic).is_err() {
        return ContainerKind::Unreadable;
    }
    match Variant::from_magic(u32::from_le_bytes(magic)) {
        Some(variant) => ContainerKind::Recognized(variant),
        None => ContainerKind::Alternate,
    }
}
