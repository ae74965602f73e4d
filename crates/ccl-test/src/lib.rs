//! ccl-test - Regression test framework for ccl
//!
//! This crate provides a small regression test harness and the inputs the
//! labeling tests share:
//!
//! - [`RegParams`] - Indexed value and grid comparisons with a final report
//! - [`simple_test_image`] - Synthetic grayscale image with four squares
//! - [`grid_from_text`] - Build binary grids from `#`/`.` pictures
//! - [`SimpleRng`] - Seeded generator for reproducible random grids
//!
//! # Usage
//!
//! ```ignore
//! use ccl_test::{RegParams, simple_test_image};
//!
//! let mut rp = RegParams::new("label");
//! rp.compare_values(4.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to print compared grids

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode, format_grid};

use ccl_core::{Grid, Rect};

/// Side length of [`simple_test_image`].
pub const SIMPLE_IMAGE_SIZE: usize = 100;

/// The filled squares of [`simple_test_image`], in raster order of their
/// top-left cells.
pub fn simple_test_squares() -> [Rect; 4] {
    [
        Rect::from_corners(10, 10, 30, 30),
        Rect::from_corners(10, 70, 30, 90),
        Rect::from_corners(40, 40, 60, 60),
        Rect::from_corners(70, 10, 90, 30),
    ]
}

/// Create a 100x100 grayscale image with four filled 21x21 squares.
///
/// Background is 0 and the squares are 255.
pub fn simple_test_image() -> Grid<u8> {
    let mut grid = Grid::new(SIMPLE_IMAGE_SIZE, SIMPLE_IMAGE_SIZE);
    for square in simple_test_squares() {
        for row in square.row..=square.bottom() {
            for col in square.col..=square.right() {
                grid[(row, col)] = 255;
            }
        }
    }
    grid
}

/// Build a binary grid from a picture: `#` is foreground, `.` background.
///
/// Each string is one row; surrounding whitespace is ignored.
pub fn grid_from_text(name: &str, rows: &[&str]) -> TestResult<Grid<u8>> {
    let cells: Vec<Vec<u8>> = rows
        .iter()
        .map(|line| line.trim().chars().map(|c| u8::from(c == '#')).collect())
        .collect();
    Grid::from_rows(&cells).map_err(|source| TestError::GridBuild {
        name: name.to_string(),
        source,
    })
}

/// Simple linear congruential generator for reproducible randomness
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a generator from a seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw value
    pub fn next_u64(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// Uniform value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        // Top 53 bits give a uniformly spaced double
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in `[0, bound)`
    pub fn next_below(&mut self, bound: u64) -> u64 {
        (self.next_f64() * bound as f64) as u64
    }
}

/// Random binary grid where each cell is foreground with probability `density`.
pub fn random_binary_grid(
    rng: &mut SimpleRng,
    rows: usize,
    cols: usize,
    density: f64,
) -> Grid<u8> {
    let mut grid = Grid::new(rows, cols);
    for cell in grid.data_mut() {
        *cell = u8::from(rng.next_f64() < density);
    }
    grid
}

/// Random grayscale grid with values drawn uniformly from `[0, 255]`.
pub fn random_gray_grid(rng: &mut SimpleRng, rows: usize, cols: usize) -> Grid<u8> {
    let mut grid = Grid::new(rows, cols);
    for cell in grid.data_mut() {
        *cell = rng.next_below(256) as u8;
    }
    grid
}
