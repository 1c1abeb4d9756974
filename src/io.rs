//! Reader and printer for the plaintext board format.
//!
//! The format is a header line `size steps` followed by `size` grid lines
//! of `size` characters, `'x'` for a live cell and anything else dead.
//! Grid lines run transposed relative to storage: character `i` of line `j`
//! is cell `(i, j)`, and the printer emits the same orientation, so a
//! read-then-print round trip reproduces the grid bytes exactly.

use std::io::{BufRead, Write};
use std::str::FromStr;

use log::debug;

use crate::error::{LifeError, Result};
use crate::lockstep::Board;

const ALIVE_CHAR: u8 = b'x';
const DEAD_CHAR: u8 = b' ';

fn malformed(message: impl Into<String>) -> LifeError {
    LifeError::MalformedInput {
        message: message.into(),
    }
}

fn parse_token<T: FromStr>(token: Option<&str>, what: &str) -> Result<T> {
    token
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| malformed(format!("header needs an unsigned `{what}` value")))
}

/// Reads a board and its step count.
///
/// Header tokens beyond the first two are discarded along with the rest of
/// the header line. Grid lines shorter than `size` leave the missing cells
/// dead; characters beyond `size` are ignored.
pub fn read_board<R: BufRead>(input: R) -> Result<(Board, u64)> {
    let mut lines = input.lines();
    let header = lines
        .next()
        .ok_or_else(|| malformed("missing `size steps` header"))??;
    let mut tokens = header.split_whitespace();
    let size: usize = parse_token(tokens.next(), "size")?;
    let steps: u64 = parse_token(tokens.next(), "steps")?;

    let mut board = Board::allocate(size)?;
    for col in 0..size {
        let line = lines
            .next()
            .ok_or_else(|| malformed(format!("expected {size} grid lines, found {col}")))??;
        for (row, byte) in line.bytes().take(size).enumerate() {
            if byte == ALIVE_CHAR {
                board.set_cell(row, col, true)?;
            }
        }
    }
    debug!("read {size}x{size} board, {steps} steps");
    Ok((board, steps))
}

/// Prints the board in the transposed text orientation.
pub fn write_board<W: Write>(mut output: W, board: &Board) -> Result<()> {
    let size = board.size();
    let mut line = vec![DEAD_CHAR; size + 1];
    line[size] = b'\n';
    for col in 0..size {
        for row in 0..size {
            line[row] = if board.get(row, col)? {
                ALIVE_CHAR
            } else {
                DEAD_CHAR
            };
        }
        output.write_all(&line)?;
    }
    Ok(())
}
