/// Failures raised by engine construction and simulation calls.
/// Every variant is terminal for the call that raised it.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FlowError {
    /// Height and membership rasters disagree on shape.
    #[error("height matrix {height:?} and membership matrix {membership:?} must be the same dimension")]
    ShapeMismatch {
        height: (usize, usize),
        membership: (usize, usize),
    },
    /// A membership cell lies outside `1..=levels`.
    #[error("membership value {value} at ({row}, {col}) outside 1..={levels}")]
    MembershipOutOfRange {
        row: usize,
        col: usize,
        value: u16,
        levels: usize,
    },
    /// A particle coordinate lies outside the raster.
    #[error("cell ({row}, {col}) outside {rows}x{cols} raster")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// Subset density was asked for a particle that does not exist.
    #[error("particle index {index} out of range (have {len})")]
    ParticleIndexOutOfRange { index: usize, len: usize },
    /// No descent candidate survived; the stay direction should always qualify.
    #[error("no valid descent directions found at ({row}, {col})")]
    EmptyTieSet { row: usize, col: usize },
}
