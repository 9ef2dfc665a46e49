use crate::cursor::{Cursor, Writer};
use crate::error::Result;

/// A single tile code. Opaque to the codec beyond its numeric value.
pub type Tile = u8;

/// Map width in tiles.
pub const MAP_WIDTH: i16 = 32;
/// Map height in tiles.
pub const MAP_HEIGHT: i16 = 32;

const MAP_CELLS: usize = (MAP_WIDTH as usize) * (MAP_HEIGHT as usize);

/// A tile coordinate pair. No bounds are enforced at the type level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// A fixed 32×32 two-layer tile map.
///
/// The foreground layer is what is currently visible; the background layer
/// holds one level of "under" state. At most two tiles are ever retained per
/// cell: [`push`](TileMap::push) discards whatever was in the background slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    fg: Box<[Tile; MAP_CELLS]>,
    bg: Box<[Tile; MAP_CELLS]>,
}

impl Default for TileMap {
    fn default() -> Self {
        Self {
            fg: Box::new([0; MAP_CELLS]),
            bg: Box::new([0; MAP_CELLS]),
        }
    }
}

impl TileMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(pos: Point) -> usize {
        (pos.y as usize) * (MAP_WIDTH as usize) + (pos.x as usize)
    }

    pub fn get_fg(&self, pos: Point) -> Tile {
        self.fg[Self::cell(pos)]
    }

    pub fn get_bg(&self, pos: Point) -> Tile {
        self.bg[Self::cell(pos)]
    }

    pub fn set_fg(&mut self, pos: Point, tile: Tile) {
        self.fg[Self::cell(pos)] = tile;
    }

    pub fn set_bg(&mut self, pos: Point, tile: Tile) {
        self.bg[Self::cell(pos)] = tile;
    }

    /// Place `tile` at `pos`, preserving the previous foreground tile in the
    /// background slot. Whatever occupied the background is lost; the cell is
    /// a fixed 2-deep stack.
    pub fn push(&mut self, pos: Point, tile: Tile) {
        let cell = Self::cell(pos);
        self.bg[cell] = self.fg[cell];
        self.fg[cell] = tile;
    }

    /// Remove and return the foreground tile at `pos`, promoting the
    /// background tile. Popping an exposed cell yields the empty tile.
    pub fn pop(&mut self, pos: Point) -> Tile {
        let cell = Self::cell(pos);
        let tile = self.fg[cell];
        self.fg[cell] = self.bg[cell];
        self.bg[cell] = 0;
        tile
    }

    /// Copy a `width` × `height` region of both layers from `src`.
    ///
    /// The copy is silently clamped so the destination rectangle never
    /// exceeds the map bounds; truncation is the documented policy here, not
    /// an error.
    pub fn copy_region(
        &mut self,
        src: &TileMap,
        src_origin: Point,
        dest_origin: Point,
        mut width: i16,
        mut height: i16,
    ) {
        if dest_origin.x + width > MAP_WIDTH {
            width = MAP_WIDTH - dest_origin.x;
        }
        if dest_origin.y + height > MAP_HEIGHT {
            height = MAP_HEIGHT - dest_origin.y;
        }

        for y in 0..height {
            for x in 0..width {
                let from = Self::cell(Point::new(src_origin.x + x, src_origin.y + y));
                let to = Self::cell(Point::new(dest_origin.x + x, dest_origin.y + y));
                self.fg[to] = src.fg[from];
                self.bg[to] = src.bg[from];
            }
        }
    }

    /// Scan row-major for the next cell whose foreground or background equals
    /// `tile`, starting just after `start` and wrapping past the last row.
    ///
    /// The start cell itself is never a match; returning to it without a hit
    /// ends the scan with `None`. `start` must lie within the map.
    pub fn find_next(&self, start: Point, tile: Tile) -> Option<Point> {
        let mut pos = start;
        loop {
            pos.x += 1;
            if pos.x >= MAP_WIDTH {
                pos.x = 0;
                pos.y += 1;
                if pos.y >= MAP_HEIGHT {
                    pos.y = 0;
                }
            }
            if pos == start {
                return None;
            }
            if self.get_fg(pos) == tile || self.get_bg(pos) == tile {
                return Some(pos);
            }
        }
    }

    /// Read both layers from their RLE encoding, foreground first.
    pub fn read(c: &mut Cursor) -> Result<TileMap> {
        let mut map = TileMap::default();
        c.read_rle(&mut map.fg[..])?;
        c.read_rle(&mut map.bg[..])?;
        Ok(map)
    }

    /// Write both layers RLE-compressed, foreground first. Returns bytes
    /// produced.
    pub fn write(&self, w: &mut Writer) -> usize {
        let mut n = w.write_rle(&self.fg[..]);
        n += w.write_rle(&self.bg[..]);
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_is_a_two_deep_stack() {
        let mut map = TileMap::new();
        let pos = Point::new(4, 7);
        map.set_fg(pos, 0x15);

        map.push(pos, 0x21);
        assert_eq!(map.get_fg(pos), 0x21);
        assert_eq!(map.get_bg(pos), 0x15);

        assert_eq!(map.pop(pos), 0x21);
        assert_eq!(map.get_fg(pos), 0x15);
        assert_eq!(map.get_bg(pos), 0);
    }

    #[test]
    fn second_push_discards_the_buried_tile() {
        let mut map = TileMap::new();
        let pos = Point::new(0, 0);
        map.set_fg(pos, 1);
        map.push(pos, 2);
        map.push(pos, 3);

        assert_eq!(map.pop(pos), 3);
        assert_eq!(map.pop(pos), 2);
        // Tile 1 is gone; the cell is now empty.
        assert_eq!(map.pop(pos), 0);
    }

    #[test]
    fn find_next_wraps_to_origin() {
        let mut map = TileMap::new();
        map.set_fg(Point::new(2, 1), 0x6D);
        let found = map.find_next(Point::new(10, 20), 0x6D);
        assert_eq!(found, Some(Point::new(2, 1)));
    }

    #[test]
    fn find_next_matches_background_layer() {
        let mut map = TileMap::new();
        map.set_bg(Point::new(31, 31), 0x0A);
        assert_eq!(
            map.find_next(Point::new(0, 0), 0x0A),
            Some(Point::new(31, 31))
        );
    }

    #[test]
    fn find_next_excludes_the_start_cell() {
        let mut map = TileMap::new();
        let start = Point::new(5, 5);
        map.set_fg(start, 0x33);
        assert_eq!(map.find_next(start, 0x33), None);
    }

    #[test]
    fn find_next_without_match_is_none() {
        let map = TileMap::new();
        assert_eq!(map.find_next(Point::new(0, 0), 0x42), None);
    }

    #[test]
    fn copy_region_clamps_at_the_edge() {
        let mut src = TileMap::new();
        for y in 0..MAP_HEIGHT {
            for x in 0..MAP_WIDTH {
                src.set_fg(Point::new(x, y), 0x2A);
            }
        }

        let mut dest = TileMap::new();
        dest.copy_region(&src, Point::new(0, 0), Point::new(30, 30), 8, 8);

        // Only the 2×2 corner inside bounds is written.
        assert_eq!(dest.get_fg(Point::new(30, 30)), 0x2A);
        assert_eq!(dest.get_fg(Point::new(31, 31)), 0x2A);
        assert_eq!(dest.get_fg(Point::new(29, 30)), 0);
        assert_eq!(dest.get_fg(Point::new(29, 29)), 0);
    }

    #[test]
    fn copy_region_moves_both_layers() {
        let mut src = TileMap::new();
        src.set_fg(Point::new(1, 1), 7);
        src.set_bg(Point::new(1, 1), 8);

        let mut dest = TileMap::new();
        dest.copy_region(&src, Point::new(1, 1), Point::new(10, 10), 1, 1);
        assert_eq!(dest.get_fg(Point::new(10, 10)), 7);
        assert_eq!(dest.get_bg(Point::new(10, 10)), 8);
    }

    #[test]
    fn rle_round_trip_preserves_both_layers() {
        let mut map = TileMap::new();
        map.set_fg(Point::new(0, 0), 0x6E);
        map.set_bg(Point::new(12, 3), 0x04);
        map.push(Point::new(31, 0), 0x15);

        let mut w = Writer::new();
        let written = map.write(&mut w);
        let bytes = w.into_bytes();
        assert_eq!(written, bytes.len());

        let decoded = TileMap::read(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(decoded, map);
    }
}
