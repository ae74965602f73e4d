//! Axis-aligned rectangles in grid coordinates

/// A rectangle of cells, anchored at its top-left cell.
///
/// `row`/`col` give the top-left corner; `height`/`width` are cell counts
/// and are at least 1 for any rectangle covering a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Top row
    pub row: usize,
    /// Left column
    pub col: usize,
    /// Number of rows covered
    pub height: usize,
    /// Number of columns covered
    pub width: usize,
}

impl Rect {
    /// Create a rectangle from its top-left cell and size.
    pub fn new(row: usize, col: usize, height: usize, width: usize) -> Self {
        Self {
            row,
            col,
            height,
            width,
        }
    }

    /// Create the smallest rectangle covering two inclusive corner cells.
    pub fn from_corners(top: usize, left: usize, bottom: usize, right: usize) -> Self {
        Self::new(top, left, bottom - top + 1, right - left + 1)
    }

    /// Number of cells covered.
    #[inline]
    pub fn area(&self) -> usize {
        self.height * self.width
    }

    /// Last row covered (inclusive).
    #[inline]
    pub fn bottom(&self) -> usize {
        self.row + self.height - 1
    }

    /// Last column covered (inclusive).
    #[inline]
    pub fn right(&self) -> usize {
        self.col + self.width - 1
    }

    /// Check whether a cell lies inside the rectangle.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.height
            && col >= self.col
            && col < self.col + self.width
    }

    /// Grow the rectangle so that it covers `(row, col)`.
    pub fn expand_to(&mut self, row: usize, col: usize) {
        let bottom = self.bottom().max(row);
        let right = self.right().max(col);
        self.row = self.row.min(row);
        self.col = self.col.min(col);
        self.height = bottom - self.row + 1;
        self.width = right - self.col + 1;
    }
}
