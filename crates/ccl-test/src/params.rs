//! Regression test parameters and operations

use crate::error::TestError;
use ccl_core::Grid;
use std::fmt::Debug;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare computed values with expected ones (default)
    #[default]
    Compare,
    /// Compare and also print intermediate grids for inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse a mode name, case-insensitively.
    ///
    /// Only `display` selects [`RegTestMode::Display`]. Anything else,
    /// including the unset variable and `generate` (there are no golden
    /// files to write), runs in [`RegTestMode::Compare`].
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("display") {
            Self::Display
        } else {
            Self::Compare
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of a regression test: the test name, the index of the
/// current check, the mode, and the failures recorded so far. Checks do
/// not panic; call [`RegParams::cleanup`] at the end and assert on it.
pub struct RegParams {
    /// Name of the test (e.g., "conncomp")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Recorded failures
    failures: Vec<TestError>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            });
            false
        } else {
            true
        }
    }

    /// Compare two grids for exact equality of shape and contents
    pub fn compare_grids<T>(&mut self, expected: &Grid<T>, actual: &Grid<T>) -> bool
    where
        T: Copy + PartialEq + Debug,
    {
        self.index += 1;

        if expected.shape() != actual.shape() {
            eprintln!(
                "  shape mismatch: expected {:?}, got {:?}",
                expected.shape(),
                actual.shape()
            );
            self.fail(TestError::GridMismatch { index: self.index });
            return false;
        }

        let mismatch = expected
            .iter_cells()
            .zip(actual.data())
            .find(|((_, _, e), a)| e != *a);

        if let Some(((row, col, e), a)) = mismatch {
            eprintln!("  cell ({row}, {col}): expected {e:?}, got {a:?}");
            self.fail(TestError::GridMismatch { index: self.index });
            return false;
        }

        if self.display() {
            eprintln!("  [{}] {}", self.index, format_grid(actual));
        }
        true
    }

    fn fail(&mut self, error: TestError) {
        eprintln!("Failure in {}_reg: {}", self.test_name, error);
        self.failures.push(error);
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.is_success() {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.is_success()
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Get list of failures
    pub fn failures(&self) -> &[TestError] {
        &self.failures
    }
}

/// Render a grid as text, one line per row.
pub fn format_grid<T: Copy + Debug>(grid: &Grid<T>) -> String {
    let mut out = format!("{}x{}", grid.rows(), grid.cols());
    for row in grid.iter_rows() {
        out.push('\n');
        let cells: Vec<String> = row.iter().map(|v| format!("{v:?}")).collect();
        out.push_str(&cells.join(" "));
    }
    out
}
