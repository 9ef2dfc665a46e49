/// Levelset container variant, identified by the file's leading magic.
///
/// Known magics:
/// - `0x0002AAAC`: MS ruleset
/// - `0x0102AAAC`: Lynx ruleset
/// - `0x0003AAAC`: MS ruleset with PGChips extensions
/// - `0x0103AAAC`: Lynx ruleset with PGChips extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Ms,
    Lynx,
    MsPg,
    LynxPg,
}

impl Variant {
    /// The magic value written at the start of the container.
    pub const fn magic(self) -> u32 {
        match self {
            Variant::Ms => 0x0002_AAAC,
            Variant::Lynx => 0x0102_AAAC,
            Variant::MsPg => 0x0003_AAAC,
            Variant::LynxPg => 0x0103_AAAC,
        }
    }

    /// Classify a magic value, if it is one of the four known containers.
    pub fn from_magic(magic: u32) -> Option<Self> {
        match magic {
            0x0002_AAAC => Some(Variant::Ms),
            0x0102_AAAC => Some(Variant::Lynx),
            0x0003_AAAC => Some(Variant::MsPg),
            0x0103_AAAC => Some(Variant::LynxPg),
            _ => None,
        }
    }

    /// Whether the set targets the Lynx ruleset.
    pub fn lynx_ruleset(self) -> bool {
        matches!(self, Variant::Lynx | Variant::LynxPg)
    }

    /// Whether the set uses the PGChips tile extensions.
    pub fn has_pg_chips(self) -> bool {
        matches!(self, Variant::MsPg | Variant::LynxPg)
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Ms
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Variant::Ms => "MS",
            Variant::Lynx => "Lynx",
            Variant::MsPg => "MS+PGChips",
            Variant::LynxPg => "Lynx+PGChips",
        };
        f.write_str(name)
    }
}
