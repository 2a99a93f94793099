#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A loader for textual Sudoku templates.
//!
//! A template is a sequence of `field_size * field_size` whitespace-separated
//! integers in row-major order, 0 meaning an empty cell. Line breaks carry no
//! meaning and anything after the expected number of values is ignored.
//!
//! Loading failures are fatal precondition violations for the solver: the
//! caller reports them and aborts instead of retrying.

use crate::sudoku::board::SudokuBoard;
use std::io::{self, BufRead};
use std::path::Path;

/// The ways loading a template can fail.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The source could not be read at all.
    #[error("failed to read the template: {0}")]
    Io(#[from] io::Error),

    /// The source ended before `field_size * field_size` values were found.
    #[error("template ended early: expected {expected} values, found {found}")]
    UnexpectedEnd {
        /// Number of values a full grid requires.
        expected: usize,
        /// Number of values actually present.
        found: usize,
    },

    /// A token could not be parsed as a cell value.
    #[error("template contains a non-numeric token: {token:?}")]
    InvalidToken {
        /// The offending token.
        token: String,
    },

    /// A value was numeric but outside `[0, field_size]`.
    #[error("template value {value} is outside 0..={field_size}")]
    ValueOutOfRange {
        /// The offending value.
        value: usize,
        /// The side length of the grid.
        field_size: usize,
    },
}

/// Parses a template from a `BufRead` source into a [`SudokuBoard`] whose
/// initial candidate mask has been computed.
///
/// # Errors
///
/// Returns a [`TemplateError`] if the source cannot be read, runs out of
/// values, or contains a token that is not an integer in `[0, field_size]`.
pub fn parse_template<R: BufRead>(
    reader: R,
    field_size: usize,
    block_size: usize,
) -> Result<SudokuBoard, TemplateError> {
    let expected = field_size * field_size;
    let mut cells: Vec<u8> = Vec::with_capacity(expected);

    for line in reader.lines() {
        let line = line?;

        for token in line.split_whitespace() {
            if cells.len() == expected {
                break;
            }

            let value: usize = token.parse().map_err(|_| TemplateError::InvalidToken {
                token: token.to_owned(),
            })?;

            if value > field_size {
                return Err(TemplateError::ValueOutOfRange { value, field_size });
            }

            #[allow(clippy::cast_possible_truncation)]
            cells.push(value as u8);
        }

        if cells.len() == expected {
            break;
        }
    }

    if cells.len() < expected {
        return Err(TemplateError::UnexpectedEnd {
            expected,
            found: cells.len(),
        });
    }

    Ok(SudokuBoard::from_cells(field_size, block_size, cells))
}

/// Loads a template file.
///
/// This is a convenience function that opens the file, wraps it in a
/// `BufReader`, and then calls [`parse_template`].
///
/// # Errors
///
/// Returns a [`TemplateError`] if the file cannot be opened or its content is
/// not a well-formed template.
pub fn parse_template_file(
    path: &Path,
    field_size: usize,
    block_size: usize,
) -> Result<SudokuBoard, TemplateError> {
    let file = std::fs::File::open(path)?;
    parse_template(io::BufReader::new(file), field_size, block_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use std::io::Cursor;

    #[test]
    fn test_parse_simple_template() {
        let content = "1 0 0 0\n0 0 0 2\n0 3 0 0\n0 0 4 0\n";
        let board = parse_template(Cursor::new(content), 4, 2).unwrap();

        assert_eq!(board.get(0, 0), 1);
        assert_eq!(board.get(1, 3), 2);
        assert_eq!(board.get(2, 1), 3);
        assert_eq!(board.get(3, 2), 4);
        assert_eq!(board.empty_cell_count(), 12);
    }

    #[test]
    fn test_parse_ignores_line_structure() {
        // The same grid, one value per line.
        let values = [1, 0, 0, 0, 0, 0, 0, 2, 0, 3, 0, 0, 0, 0, 4, 0];
        let content = values.iter().map(ToString::to_string).join("\n");

        let board = parse_template(Cursor::new(content), 4, 2).unwrap();
        assert_eq!(board.get(0, 0), 1);
        assert_eq!(board.get(3, 2), 4);
    }

    #[test]
    fn test_parse_ignores_trailing_values() {
        let content = "0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 99 garbage";
        let board = parse_template(Cursor::new(content), 4, 2).unwrap();
        assert_eq!(board.empty_cell_count(), 16);
    }

    #[test]
    fn test_parse_short_template() {
        let content = "1 2 3";
        let err = parse_template(Cursor::new(content), 4, 2).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::UnexpectedEnd {
                expected: 16,
                found: 3
            }
        ));
    }

    #[test]
    fn test_parse_bad_token() {
        let content = "1 2 x 4";
        let err = parse_template(Cursor::new(content), 4, 2).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidToken { token } if token == "x"));
    }

    #[test]
    fn test_parse_value_out_of_range() {
        let content = "1 2 5 4";
        let err = parse_template(Cursor::new(content), 4, 2).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::ValueOutOfRange {
                value: 5,
                field_size: 4
            }
        ));
    }

    #[test]
    fn test_parse_missing_file() {
        let err =
            parse_template_file(Path::new("does/not/exist.sudoku"), 4, 2).unwrap_err();
        assert!(matches!(err, TemplateError::Io(_)));
    }

    #[test]
    fn test_parse_computes_initial_candidates() {
        let content = "1 0 0 0\n0 0 0 0\n0 0 0 0\n0 0 0 0\n";
        let board = parse_template(Cursor::new(content), 4, 2).unwrap();

        assert!(!board.is_candidate(0, 2, 1));
        assert!(board.is_candidate(0, 2, 4));
    }
}
