//! Win condition checking
//!
//! A player wins by forming a line of exactly five stones in any of the
//! four directions. Six or more in a row (an overline) does not win.

use crate::board::{Grid, Pos, Stone, DIRECTIONS};

/// Number of stones needed to win
pub const WIN_LENGTH: usize = 5;

/// Count consecutive `player` stones starting next to `pos` and walking
/// in direction (dr, dc). The cell at `pos` itself is not counted.
#[inline]
pub fn count_in_direction(grid: &Grid, pos: Pos, dr: i32, dc: i32, player: Stone) -> usize {
    let mut count = 0;
    let mut r = i32::from(pos.row) + dr;
    let mut c = i32::from(pos.col) + dc;
    while grid.stone_at(r, c) == Some(player) {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

/// Length of the `player` run through `pos` along one direction,
/// counting `pos` itself whatever it holds.
#[inline]
pub fn run_length(grid: &Grid, pos: Pos, dr: i32, dc: i32, player: Stone) -> usize {
    1 + count_in_direction(grid, pos, dr, dc, player)
        + count_in_direction(grid, pos, -dr, -dc, player)
}

/// Fast win check at a specific position.
///
/// Only checks the 4 lines through `pos`. No allocation.
#[inline]
pub fn check_winner(grid: &Grid, pos: Pos, player: Stone) -> bool {
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| run_length(grid, pos, dr, dc, player) == WIN_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn grid(rows: &[&str]) -> Grid {
        Board::from_rows(rows).unwrap().grid().clone()
    }

    fn any_win(grid: &Grid, player: Stone) -> bool {
        grid.occupied()
            .filter(|&(_, s)| s == player)
            .any(|(pos, _)| check_winner(grid, pos, player))
    }

    #[test]
    fn test_five_in_row_horizontal() {
        let g = grid(&[
            ".......",
            ".XXXXX.",
            ".......",
            "OOOO...",
            ".......",
            "..O....",
            ".......",
        ]);
        assert!(check_winner(&g, Pos::new(1, 3), Stone::Black));
        assert!(any_win(&g, Stone::Black));
        assert!(!any_win(&g, Stone::White));
    }

    #[test]
    fn test_five_in_row_vertical() {
        let g = grid(&[
            "X.O....",
            "X.O....",
            "X.O....",
            "X.O....",
            "X......",
            ".......",
            ".......",
        ]);
        assert!(check_winner(&g, Pos::new(0, 0), Stone::Black));
        assert!(check_winner(&g, Pos::new(4, 0), Stone::Black));
    }

    #[test]
    fn test_five_in_row_diagonal() {
        let g = grid(&[
            "O......",
            ".O..X..",
            "..O..X.",
            "...O..X",
            "....O..",
            ".X.....",
            "X......",
        ]);
        assert!(check_winner(&g, Pos::new(2, 2), Stone::White));
        assert!(any_win(&g, Stone::White));
    }

    #[test]
    fn test_diagonal_sw_five() {
        let g = grid(&[
            "....O..",
            "...O...",
            "..O....",
            ".O.....",
            "O......",
            "XXX....",
            "XX.....",
        ]);
        assert!(check_winner(&g, Pos::new(4, 0), Stone::White));
        assert!(check_winner(&g, Pos::new(0, 4), Stone::White));
    }

    #[test]
    fn test_six_in_row_does_not_win() {
        let g = grid(&[
            "XXXXXX.",
            ".......",
            "OOO.OO.",
            ".......",
            ".......",
            ".......",
            "O......",
        ]);
        for col in 0..6 {
            assert!(!check_winner(&g, Pos::new(0, col), Stone::Black));
        }
        assert!(!any_win(&g, Stone::Black));
        assert_eq!(run_length(&g, Pos::new(0, 2), 0, 1, Stone::Black), 6);
    }

    #[test]
    fn test_four_in_row_not_win() {
        let g = grid(&[
            ".XXXX..",
            ".......",
            ".OOO...",
            ".......",
            "O......",
            ".......",
            ".......",
        ]);
        assert!(!check_winner(&g, Pos::new(0, 2), Stone::Black));
        assert!(!any_win(&g, Stone::Black));
    }

    #[test]
    fn test_check_on_empty_cell_counts_neighbours() {
        // XX_XX: the gap completes exactly five
        let g = grid(&[
            "XX.XX..",
            ".......",
            "OOOO...",
            ".......",
            ".......",
            ".......",
            ".......",
        ]);
        assert!(check_winner(&g, Pos::new(0, 2), Stone::Black));
        assert_eq!(count_in_direction(&g, Pos::new(0, 2), 0, 1, Stone::Black), 2);
        assert_eq!(count_in_direction(&g, Pos::new(0, 2), 0, -1, Stone::Black), 2);
    }

    #[test]
    fn test_five_at_corner() {
        let g = grid(&[
            "..O....",
            "...O...",
            "X...O..",
            ".X...O.",
            "..X...O",
            "...X...",
            "....X..",
        ]);
        assert!(check_winner(&g, Pos::new(6, 4), Stone::Black));
        assert!(check_winner(&g, Pos::new(4, 6), Stone::White));
    }

    #[test]
    fn test_empty_not_five() {
        let g = Grid::new(15);
        assert!(!any_win(&g, Stone::Black));
        assert!(!any_win(&g, Stone::White));
    }
}
