//! Fixed-size cell grid shared by the board, the rules and the evaluators

use super::{Pos, Stone, MAX_SIZE};

/// Square grid of cells, indexed row-major.
///
/// The grid is the only thing heuristics see: it carries no turn or
/// history information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Stone>,
    /// Number of non-empty cells
    stones: usize,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        debug_assert!(size <= MAX_SIZE, "board size {size} exceeds {MAX_SIZE}");
        Self {
            size,
            cells: vec![Stone::Empty; size * size],
            stones: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if signed coordinates fall on the grid
    #[inline]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.size && (pos.col as usize) < self.size
    }

    /// Get stone at position. Callers guarantee `pos` is in bounds.
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.to_index(self.size)]
    }

    /// Stone at signed coordinates, `None` when off the grid
    #[inline]
    pub fn stone_at(&self, row: i32, col: i32) -> Option<Stone> {
        if self.in_bounds(row, col) {
            Some(self.cells[row as usize * self.size + col as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Overwrite a cell, keeping the stone count in sync
    #[inline]
    pub(crate) fn set(&mut self, pos: Pos, stone: Stone) {
        let idx = pos.to_index(self.size);
        match (self.cells[idx], stone) {
            (Stone::Empty, Stone::Empty) => {}
            (Stone::Empty, _) => self.stones += 1,
            (_, Stone::Empty) => self.stones -= 1,
            _ => {}
        }
        self.cells[idx] = stone;
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.stones
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stones == self.cells.len()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.stones == 0
    }

    /// Center cell (`size / 2` on both axes)
    #[inline]
    pub fn center(&self) -> Pos {
        #[allow(clippy::cast_possible_truncation)]
        let c = (self.size / 2) as u8;
        Pos::new(c, c)
    }

    /// Twice the Manhattan distance from `pos` to the geometric center.
    ///
    /// Doubling keeps the value integral on even-sized boards, where the
    /// center falls between cells.
    #[inline]
    pub fn center_distance2(&self, pos: Pos) -> u32 {
        let span = self.size as i32 - 1;
        ((2 * i32::from(pos.row) - span).abs() + (2 * i32::from(pos.col) - span).abs()) as u32
    }

    /// Iterate over all occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, Stone)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, s)| **s != Stone::Empty)
            .map(move |(idx, s)| (Pos::from_index(idx, size), *s))
    }

    /// Raw row-major cell slice
    #[inline]
    pub fn cells(&self) -> &[Stone] {
        &self.cells
    }
}
