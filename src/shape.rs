//! Shape tags: which triangle of a matrix a view exposes, and how the diagonal is treated.

use std::ops::Range;

/// Side of the diagonal a triangular region lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UPLO {
    Upper,
    Lower,
}

impl UPLO {
    /// The opposite side, which is where the region ends up after transposition
    pub fn transpose(self) -> Self {
        match self {
            UPLO::Upper => UPLO::Lower,
            UPLO::Lower => UPLO::Upper,
        }
    }
}

/// How the main diagonal belongs to a triangular region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagonalMode {
    /// The stored diagonal is part of the region.
    Included,
    /// The diagonal is outside the region and reads as zero.
    Strict,
    /// The diagonal is outside the region and reads as one. It is never read or written.
    Unit,
}

/// One of the six triangular regions a view can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeTag {
    Upper,
    Lower,
    StrictlyUpper,
    StrictlyLower,
    UnitUpper,
    UnitLower,
}

/// Transformation applied to the matrix underneath a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    Identity,
    Transpose,
    Conjugate,
    /// Conjugate transpose
    Adjoint,
}

impl Transform {
    /// Whether rows and columns trade places under this transform
    pub fn swaps_traversal(self) -> bool {
        matches!(self, Transform::Transpose | Transform::Adjoint)
    }

    /// Whether values are complex-conjugated under this transform
    pub fn conjugates(self) -> bool {
        matches!(self, Transform::Conjugate | Transform::Adjoint)
    }
}

/// Value a view reports for a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Implied {
    /// The stored value
    Stored,
    Zero,
    One,
}

impl ShapeTag {
    pub const ALL: [ShapeTag; 6] = [
        ShapeTag::Upper,
        ShapeTag::Lower,
        ShapeTag::StrictlyUpper,
        ShapeTag::StrictlyLower,
        ShapeTag::UnitUpper,
        ShapeTag::UnitLower,
    ];

    pub fn from_parts(side: UPLO, mode: DiagonalMode) -> Self {
        match (side, mode) {
            (UPLO::Upper, DiagonalMode::Included) => ShapeTag::Upper,
            (UPLO::Lower, DiagonalMode::Included) => ShapeTag::Lower,
            (UPLO::Upper, DiagonalMode::Strict) => ShapeTag::StrictlyUpper,
            (UPLO::Lower, DiagonalMode::Strict) => ShapeTag::StrictlyLower,
            (UPLO::Upper, DiagonalMode::Unit) => ShapeTag::UnitUpper,
            (UPLO::Lower, DiagonalMode::Unit) => ShapeTag::UnitLower,
        }
    }

    pub fn side(self) -> UPLO {
        match self {
            ShapeTag::Upper | ShapeTag::StrictlyUpper | ShapeTag::UnitUpper => UPLO::Upper,
            ShapeTag::Lower | ShapeTag::StrictlyLower | ShapeTag::UnitLower => UPLO::Lower,
        }
    }

    pub fn diagonal_mode(self) -> DiagonalMode {
        match self {
            ShapeTag::Upper | ShapeTag::Lower => DiagonalMode::Included,
            ShapeTag::StrictlyUpper | ShapeTag::StrictlyLower => DiagonalMode::Strict,
            ShapeTag::UnitUpper | ShapeTag::UnitLower => DiagonalMode::Unit,
        }
    }

    pub fn is_upper(self) -> bool {
        self.side() == UPLO::Upper
    }

    pub fn is_lower(self) -> bool {
        self.side() == UPLO::Lower
    }

    pub fn is_unit(self) -> bool {
        self.diagonal_mode() == DiagonalMode::Unit
    }

    /// Tag of the transposed view: same diagonal treatment, other side
    pub fn transpose(self) -> Self {
        Self::from_parts(self.side().transpose(), self.diagonal_mode())
    }

    /// Tag of the view after `transform`, along with whether row and column traversal must be
    /// swapped when reading the underlying buffer.
    pub fn apply(self, transform: Transform) -> (ShapeTag, bool) {
        let swap = transform.swaps_traversal();
        let tag = if swap { self.transpose() } else { self };
        (tag, swap)
    }

    /// Whether cell `(i, j)` is stored and writable through a view with this tag.
    ///
    /// The test is `j >= i` (upper) or `j <= i` (lower) for any matrix shape, so the columns to
    /// the right of the leading square block lie entirely inside an upper region and the rows
    /// below it lie entirely inside a lower region.
    pub fn contains(self, i: usize, j: usize) -> bool {
        let strict = self.diagonal_mode() != DiagonalMode::Included;
        match self.side() {
            UPLO::Upper => j > i || (j == i && !strict),
            UPLO::Lower => j < i || (j == i && !strict),
        }
    }

    /// What a view with this tag reports for cell `(i, j)`
    pub fn implied(self, i: usize, j: usize) -> Implied {
        if i == j {
            match self.diagonal_mode() {
                DiagonalMode::Included => Implied::Stored,
                DiagonalMode::Strict => Implied::Zero,
                DiagonalMode::Unit => Implied::One,
            }
        } else if self.contains(i, j) {
            Implied::Stored
        } else {
            Implied::Zero
        }
    }

    /// Columns of row `i` inside the region, for a matrix with `ncols` columns
    pub(crate) fn row_range(self, i: usize, ncols: usize) -> Range<usize> {
        let skip = self.diagonal_offset();
        match self.side() {
            UPLO::Upper => (i + skip).min(ncols)..ncols,
            UPLO::Lower => 0..(i + 1 - skip).min(ncols),
        }
    }

    /// Rows of column `j` inside the region, for a matrix with `nrows` rows
    pub(crate) fn col_range(self, j: usize, nrows: usize) -> Range<usize> {
        self.transpose().row_range(j, nrows)
    }

    fn diagonal_offset(self) -> usize {
        match self.diagonal_mode() {
            DiagonalMode::Included => 0,
            DiagonalMode::Strict | DiagonalMode::Unit => 1,
        }
    }
}

impl From<UPLO> for ShapeTag {
    fn from(side: UPLO) -> Self {
        ShapeTag::from_parts(side, DiagonalMode::Included)
    }
}
