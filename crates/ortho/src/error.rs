/// Errors reported by the fallible operations of this crate.
///
/// Most operations in this crate cannot fail. The ones that can are programmer errors that
/// normally abort the operation with a panic whose message is this type's [`Display`] output, the
/// same way slice indexing does. Some of them also have a `checked_*` form that returns this type
/// instead.
///
/// Inverting a singular matrix is *not* an error: [`matrices::invert3`] and [`matrices::invert4`]
/// report it by returning `false`.
///
/// [`Display`]: std::fmt::Display
/// [`matrices::invert3`]: crate::matrices::invert3
/// [`matrices::invert4`]: crate::matrices::invert4
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Integer arithmetic produced a value outside the range of the element type.
    #[error("integer overflow during {op}")]
    Overflow { op: &'static str },

    /// An elementary row operation was given a row index outside of the matrix.
    #[error("row index {row} out of range for matrix with {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            Error::Overflow { op: "add" }.to_string(),
            "integer overflow during add"
        );
        assert_eq!(
            Error::RowOutOfRange { row: 4, rows: 4 }.to_string(),
            "row index 4 out of range for matrix with 4 rows"
        );
    }
}
