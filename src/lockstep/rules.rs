//! Cell transition rules: clamped neighborhood counting and B3/S23.

use crate::error::Result;
use crate::lockstep::board::Board;

/// Live-neighbor count for `(row, col)`, in `[0, 8]`.
///
/// The 3x3 window is clamped at the grid edges, so edge and corner cells
/// see fewer than eight neighbors and the grid never wraps. Reads only
/// `current`; any number of workers may call it concurrently.
pub fn count_live_neighbors(board: &Board, row: usize, col: usize) -> Result<u8> {
    let last = board.size() - 1;
    let mut count = 0u8;
    for r in row.saturating_sub(1)..=(row + 1).min(last) {
        for c in col.saturating_sub(1)..=(col + 1).min(last) {
            if board.get(r, c)? {
                count += 1;
            }
        }
    }
    if board.get(row, col)? {
        count -= 1;
    }
    Ok(count)
}

/// B3/S23 transition: birth on exactly three live neighbors, survival on
/// two or three.
#[inline(always)]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true,
        (false, 3) => true,
        _ => false,
    }
}
