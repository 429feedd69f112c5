use grid_util::point::Point;

pub const DEFAULT_GRID_SIZE: usize = 41;
pub const DEFAULT_CELL_SIZE: i32 = 16;
pub const DEFAULT_ORIGIN: (i32, i32) = (20, 60);

/// Screen-space rectangle of a cell, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Where the grid sits on screen and how many cells it has per side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub size: usize,
    pub cell_size: i32,
    /// Pixel position of the top left corner of the grid.
    pub origin: Point,
}

impl Default for GridLayout {
    fn default() -> GridLayout {
        GridLayout {
            size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            origin: Point::new(DEFAULT_ORIGIN.0, DEFAULT_ORIGIN.1),
        }
    }
}

impl GridLayout {
    pub fn with_size(size: usize) -> GridLayout {
        GridLayout {
            size,
            ..GridLayout::default()
        }
    }

    /// Side length of the whole grid in pixels.
    pub fn extent(&self) -> i32 {
        self.size as i32 * self.cell_size
    }

    /// Maps a pixel position to `(row, col)`, or [None] if it falls outside the grid.
    pub fn cell_at(&self, pixel: Point) -> Option<(usize, usize)> {
        let dx = pixel.x - self.origin.x;
        let dy = pixel.y - self.origin.y;
        let extent = self.extent();
        if dx < 0 || dy < 0 || dx >= extent || dy >= extent {
            return None;
        }
        Some(((dy / self.cell_size) as usize, (dx / self.cell_size) as usize))
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> CellRect {
        CellRect {
            x: self.origin.x + col as i32 * self.cell_size,
            y: self.origin.y + row as i32 * self.cell_size,
            width: self.cell_size,
            height: self.cell_size,
        }
    }

    /// Line segments separating the cells, including the outer border.
    pub fn grid_lines(&self) -> Vec<(Point, Point)> {
        let (x0, y0) = (self.origin.x, self.origin.y);
        let extent = self.extent();
        (0..=self.size as i32)
            .flat_map(|i| {
                let offset = i * self.cell_size;
                [
                    (Point::new(x0 + offset, y0), Point::new(x0 + offset, y0 + extent)),
                    (Point::new(x0, y0 + offset), Point::new(x0 + extent, y0 + offset)),
                ]
            })
            .collect()
    }
}
