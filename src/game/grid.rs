/// A cell on the game grid, in tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The toroidal playing field, measured in tiles
///
/// Immutable after construction. All coordinate arithmetic goes through
/// `wrap`, so positions never leave `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a grid from pixel dimensions and a tile size
    ///
    /// Both resulting dimensions must be at least one tile.
    pub fn from_pixels(width_px: u32, height_px: u32, tile_size: u32) -> Self {
        let width = (width_px / tile_size) as i32;
        let height = (height_px / tile_size) as i32;
        assert!(width > 0 && height > 0, "grid must be at least 1x1 tiles");
        Self { width, height }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Normalize any coordinate pair onto the torus
    ///
    /// Floored modulo, so negative inputs wrap to the far edge.
    pub fn wrap(&self, x: i32, y: i32) -> Cell {
        Cell::new(x.rem_euclid(self.width), y.rem_euclid(self.height))
    }
}
