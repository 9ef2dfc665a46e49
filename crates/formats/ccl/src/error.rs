use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unexpected end of data at offset {offset:#x} (need {need} bytes, have {have})")]
    UnexpectedEof {
        offset: usize,
        need: usize,
        have: usize,
    },

    #[error("RLE run at offset {offset:#x} overruns the tile layer")]
    RleOverrun { offset: usize },

    #[error("RLE data at offset {offset:#x} ends before the tile layer is full")]
    RleUnderrun { offset: usize },

    #[error("unrecognized levelset magic {magic:#010x}")]
    InvalidHeader { magic: u32 },

    #[error("invalid map marker {found} (expected 1)")]
    InvalidMapMarker { found: u16 },

    #[error("field section size {declared} does not match remaining level size {expected}")]
    SizeMismatch { declared: u16, expected: i32 },

    #[error("field {tag:#04x} payload size {size} is not a multiple of its entry size")]
    InvalidFieldSize { tag: u8, size: u8 },

    #[error("unrecognized field tag {tag:#04x} at offset {offset:#x}")]
    UnrecognizedField { tag: u8, offset: usize },

    #[error("field at offset {offset:#x} claims more bytes than the level declares")]
    TruncatedRecord { offset: usize },

    #[error("level data ends with {residual} bytes unaccounted for")]
    ChecksumMismatch { residual: i32 },

    #[error("clipboard data ends with {residual} bytes unaccounted for")]
    CorruptClipboardData { residual: i32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
