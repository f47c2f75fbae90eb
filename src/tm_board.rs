// Board model: cell grid, mine placement, adjacency counts and flood-fill reveal
// Pure state and algorithms, no terminal I/O

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info};

use crate::tm_error::{GameError, Result};

/// Grid position, column first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub col: usize,
    pub row: usize,
}

impl Coord {
    pub const fn new(col: usize, row: usize) -> Self {
        Coord { col, row }
    }

    /// True if `other` lies in the 3x3 square centered on `self`
    pub fn touches(&self, other: Coord) -> bool {
        self.col.abs_diff(other.col) <= 1 && self.row.abs_diff(other.row) <= 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Covered,
    Flagged,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Result of a single reveal request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Target is flagged, nothing changed
    Blocked,
    /// Target was safe; `opened` counts cells newly uncovered, flood included
    Safe { opened: usize },
    /// Target was a mine
    Mine,
}

/// A single cell on the minesweeper board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub mine: bool,       // Contains a mine
    pub adj: u8,          // Adjacent mine count (0-8), unused for mines
    pub state: CellState, // Covered / Flagged / Revealed
    pub position: Coord,
}

impl Cell {
    pub fn is_revealed(&self) -> bool {
        self.state == CellState::Revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.state == CellState::Flagged
    }
}

/// Minefield plus cursor
#[derive(Debug, Clone)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    cells: Vec<Cell>, // Row-major
    cursor: Coord,
    mines: usize,      // Mines the board is meant to hold, placed or not
    initialized: bool, // Mines placed
}

impl Board {
    /// Create a covered, mine-free board. Mines are placed on the first reveal.
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "board must not be empty");
        let mut cells = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                cells.push(Cell {
                    mine: false,
                    adj: 0,
                    state: CellState::Covered,
                    position: Coord::new(col, row),
                });
            }
        }
        Board {
            width,
            height,
            cells,
            cursor: Coord::new(0, 0),
            mines: 0,
            initialized: false,
        }
    }

    /// Announce how many mines the first reveal will place
    pub fn with_mine_total(mut self, mines: usize) -> Self {
        self.mines = mines;
        self
    }

    /// Build an already initialized board with mines at fixed positions
    #[cfg(test)]
    pub fn with_mines(width: usize, height: usize, mines: &[Coord]) -> Self {
        let mut board = Board::new(width, height);
        board.arm(mines);
        board
    }

    pub fn contains(&self, pos: Coord) -> bool {
        pos.col < self.width && pos.row < self.height
    }

    /// Pull a coordinate back inside the grid
    pub fn clamp(&self, pos: Coord) -> Coord {
        Coord::new(pos.col.min(self.width - 1), pos.row.min(self.height - 1))
    }

    fn index(&self, pos: Coord) -> usize {
        debug_assert!(self.contains(pos), "coordinate {pos:?} outside {}x{}", self.width, self.height);
        let pos = self.clamp(pos);
        pos.row * self.width + pos.col
    }

    pub fn cell(&self, pos: Coord) -> &Cell {
        &self.cells[self.index(pos)]
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    #[cfg(test)]
    pub fn set_cursor(&mut self, pos: Coord) {
        self.cursor = self.clamp(pos);
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Mines actually placed so far
    pub fn mine_count(&self) -> usize {
        self.cells().filter(|c| c.mine).count()
    }

    pub fn flag_count(&self) -> usize {
        self.cells().filter(|c| c.is_flagged()).count()
    }

    /// Mine counter shown to the player; negative when over-flagged.
    /// Counts against the announced total so it is right before the first reveal.
    pub fn remaining_mines(&self) -> isize {
        self.mines as isize - self.flag_count() as isize
    }

    /// Positions of the up-to-8 neighbors, row-major, clipped to the grid
    pub fn neighbor_coords(&self, pos: Coord) -> Vec<Coord> {
        let pos = self.clamp(pos);
        let mut out = Vec::with_capacity(8);
        for row in pos.row.saturating_sub(1)..=(pos.row + 1).min(self.height - 1) {
            for col in pos.col.saturating_sub(1)..=(pos.col + 1).min(self.width - 1) {
                if col == pos.col && row == pos.row {
                    continue;
                }
                out.push(Coord::new(col, row));
            }
        }
        out
    }

    pub fn neighbors_of(&self, pos: Coord) -> Vec<&Cell> {
        self.neighbor_coords(pos)
            .into_iter()
            .map(|c| self.cell(c))
            .collect()
    }

    /// Randomly place `count` mines outside the 3x3 square around `exclude_center`.
    /// Samples from the eligible cells directly, so it never retries.
    pub fn place_mines<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        exclude_center: Coord,
        rng: &mut R,
    ) -> Result<()> {
        if self.initialized {
            return Err(GameError::MinesAlreadyPlaced);
        }
        let center = self.clamp(exclude_center);
        let eligible: Vec<Coord> = self
            .cells
            .iter()
            .map(|c| c.position)
            .filter(|&p| !center.touches(p))
            .collect();
        if count > eligible.len() {
            return Err(GameError::TooManyMines {
                requested: count,
                eligible: eligible.len(),
            });
        }
        let mines: Vec<Coord> = eligible.choose_multiple(rng, count).copied().collect();
        self.arm(&mines);
        info!(count, col = center.col, row = center.row, "mines placed");
        Ok(())
    }

    /// Mark mines and compute adjacency for every safe cell
    fn arm(&mut self, mines: &[Coord]) {
        for &m in mines {
            let idx = self.index(m);
            self.cells[idx].mine = true;
        }
        for idx in 0..self.cells.len() {
            if self.cells[idx].mine {
                continue;
            }
            let pos = self.cells[idx].position;
            let adj = self.neighbors_of(pos).iter().filter(|c| c.mine).count();
            self.cells[idx].adj = adj as u8;
        }
        self.mines = mines.len();
        self.initialized = true;
    }

    /// Reveal a cell; zero-count cells open their whole zero region and its numbered border
    pub fn reveal(&mut self, pos: Coord) -> RevealOutcome {
        let idx = self.index(pos);
        let cell = &mut self.cells[idx];
        if cell.is_flagged() {
            return RevealOutcome::Blocked;
        }
        let newly = !cell.is_revealed();
        cell.state = CellState::Revealed;
        if cell.mine {
            return RevealOutcome::Mine;
        }
        let (start, zero) = (cell.position, cell.adj == 0);
        let mut opened = usize::from(newly);
        if zero {
            opened += self.flood_from(start);
        }
        debug!(col = start.col, row = start.row, opened, "revealed");
        RevealOutcome::Safe { opened }
    }

    // Worklist flood-fill; flags on cells the fill reaches are cleared, only a
    // directly targeted flag blocks a reveal
    fn flood_from(&mut self, start: Coord) -> usize {
        let mut pending = VecDeque::from([start]);
        let mut visited = HashSet::from([start]);
        let mut opened = 0;
        while let Some(pos) = pending.pop_front() {
            for next in self.neighbor_coords(pos) {
                if !visited.insert(next) {
                    continue;
                }
                let idx = self.index(next);
                let cell = &mut self.cells[idx];
                if cell.is_revealed() {
                    continue;
                }
                cell.state = CellState::Revealed;
                opened += 1;
                if !cell.mine && cell.adj == 0 {
                    pending.push_back(next);
                }
            }
        }
        opened
    }

    /// Covered <-> Flagged; revealed cells are left as they are
    pub fn toggle_flag(&mut self, pos: Coord) {
        let idx = self.index(pos);
        let cell = &mut self.cells[idx];
        cell.state = match cell.state {
            CellState::Covered => CellState::Flagged,
            CellState::Flagged => CellState::Covered,
            CellState::Revealed => CellState::Revealed,
        };
    }

    /// Every safe cell revealed; flags and mines do not matter
    pub fn check_victory(&self) -> bool {
        self.initialized && self.cells.iter().all(|c| c.mine || c.is_revealed())
    }

    /// Move the cursor one step, clamped on all four edges
    pub fn move_cursor(&mut self, dir: Direction) {
        let Coord { col, row } = self.cursor;
        self.cursor = match dir {
            Direction::Up => Coord::new(col, row.saturating_sub(1)),
            Direction::Left => Coord::new(col.saturating_sub(1), row),
            Direction::Down => Coord::new(col, (row + 1).min(self.height - 1)),
            Direction::Right => Coord::new((col + 1).min(self.width - 1), row),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn revealed(board: &Board) -> Vec<Coord> {
        board
            .cells()
            .filter(|c| c.is_revealed())
            .map(|c| c.position)
            .collect()
    }

    #[test]
    fn fresh_board_is_covered_and_not_won() {
        let board = Board::new(30, 10);
        assert_eq!(board.cells().count(), 300);
        assert!(board.cells().all(|c| c.state == CellState::Covered && !c.mine));
        assert_eq!(board.cursor(), Coord::new(0, 0));
        assert!(!board.is_initialized());
        assert!(!board.check_victory());
    }

    #[test]
    fn place_mines_avoids_start_square() {
        for (seed, center) in [(1, Coord::new(0, 0)), (2, Coord::new(5, 5)), (3, Coord::new(29, 9))] {
            let mut board = Board::new(30, 10);
            let mut rng = StdRng::seed_from_u64(seed);
            board.place_mines(15, center, &mut rng).unwrap();

            assert!(board.is_initialized());
            assert_eq!(board.mine_count(), 15);
            assert_eq!(board.remaining_mines(), 15);
            assert!(board.cells().filter(|c| c.mine).all(|c| !center.touches(c.position)));
        }
    }

    #[test]
    fn seeded_placement_is_reproducible() {
        let layout = |seed| {
            let mut board = Board::new(30, 10);
            board
                .place_mines(15, Coord::new(4, 4), &mut StdRng::seed_from_u64(seed))
                .unwrap();
            board.cells().filter(|c| c.mine).map(|c| c.position).collect::<Vec<_>>()
        };
        assert_eq!(layout(42), layout(42));
    }

    #[test]
    fn place_mines_rejects_overfull_requests() {
        let mut rng = StdRng::seed_from_u64(0);

        let mut board = Board::new(3, 3);
        let err = board.place_mines(1, Coord::new(1, 1), &mut rng).unwrap_err();
        assert!(matches!(err, GameError::TooManyMines { requested: 1, eligible: 0 }));
        assert!(!board.is_initialized());

        // corner exclusion is clipped to 4 cells
        let mut board = Board::new(3, 3);
        assert!(board.place_mines(6, Coord::new(0, 0), &mut rng).is_err());
        board.place_mines(5, Coord::new(0, 0), &mut rng).unwrap();
        assert_eq!(board.mine_count(), 5);
    }

    #[test]
    fn place_mines_runs_once() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut board = Board::new(10, 10);
        board.place_mines(3, Coord::new(0, 0), &mut rng).unwrap();
        let err = board.place_mines(3, Coord::new(0, 0), &mut rng).unwrap_err();
        assert!(matches!(err, GameError::MinesAlreadyPlaced));
        assert_eq!(board.mine_count(), 3);
    }

    #[test]
    fn adjacency_counts_on_known_layout() {
        let mines = [Coord::new(1, 1), Coord::new(3, 1), Coord::new(2, 3)];
        let board = Board::with_mines(5, 5, &mines);
        // 9 marks a mine
        let expected = [
            [1, 1, 2, 1, 1],
            [1, 9, 2, 9, 1],
            [1, 2, 3, 2, 1],
            [0, 1, 9, 1, 0],
            [0, 1, 1, 1, 0],
        ];
        for (row, line) in expected.iter().enumerate() {
            for (col, &n) in line.iter().enumerate() {
                let cell = board.cell(Coord::new(col, row));
                if n == 9 {
                    assert!(cell.mine, "expected mine at {col},{row}");
                } else {
                    assert!(!cell.mine);
                    assert_eq!(cell.adj, n, "count at {col},{row}");
                }
            }
        }
    }

    #[test]
    fn neighbors_are_clipped_and_ordered() {
        let board = Board::new(5, 5);
        assert_eq!(
            board.neighbor_coords(Coord::new(0, 0)),
            vec![Coord::new(1, 0), Coord::new(0, 1), Coord::new(1, 1)]
        );
        assert_eq!(board.neighbors_of(Coord::new(2, 2)).len(), 8);
        assert_eq!(board.neighbors_of(Coord::new(4, 2)).len(), 5);
        assert_eq!(
            board.neighbor_coords(Coord::new(4, 4)),
            board.neighbor_coords(Coord::new(4, 4))
        );
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        let wall: Vec<Coord> = (0..5).map(|row| Coord::new(2, row)).collect();
        let mut board = Board::with_mines(5, 5, &wall);

        let outcome = board.reveal(Coord::new(0, 0));

        assert_eq!(outcome, RevealOutcome::Safe { opened: 10 });
        let mut open = revealed(&board);
        open.sort();
        let mut expected: Vec<Coord> = (0..5)
            .flat_map(|row| [Coord::new(0, row), Coord::new(1, row)])
            .collect();
        expected.sort();
        assert_eq!(open, expected);
        assert!(board.cells().filter(|c| c.position.col >= 2).all(|c| !c.is_revealed()));
    }

    #[test]
    fn flood_fill_uncovers_flagged_cells() {
        let wall: Vec<Coord> = (0..5).map(|row| Coord::new(2, row)).collect();
        let mut board = Board::with_mines(5, 5, &wall);
        board.toggle_flag(Coord::new(0, 4));

        assert_eq!(board.reveal(Coord::new(0, 0)), RevealOutcome::Safe { opened: 10 });
        assert!(board.cell(Coord::new(0, 4)).is_revealed());
        assert_eq!(board.flag_count(), 0);
    }

    #[test]
    fn flag_at_chokepoint_does_not_cut_the_region() {
        let mut board = Board::with_mines(5, 1, &[Coord::new(4, 0)]);
        board.toggle_flag(Coord::new(1, 0));

        assert_eq!(board.reveal(Coord::new(0, 0)), RevealOutcome::Safe { opened: 4 });
        let cols: Vec<usize> = revealed(&board).iter().map(|c| c.col).collect();
        assert_eq!(cols, vec![0, 1, 2, 3]);
        assert!(board.check_victory());
    }

    #[test]
    fn flag_on_mine_next_to_region_stays() {
        let mut board = Board::with_mines(3, 3, &[Coord::new(2, 2)]);
        board.toggle_flag(Coord::new(2, 2));
        board.reveal(Coord::new(0, 0));
        assert!(board.cell(Coord::new(2, 2)).is_flagged());
    }

    #[test]
    fn numbered_cell_opens_alone() {
        let mut board = Board::with_mines(5, 5, &[Coord::new(2, 2)]);
        assert_eq!(board.reveal(Coord::new(1, 1)), RevealOutcome::Safe { opened: 1 });
        assert_eq!(revealed(&board), vec![Coord::new(1, 1)]);
        // second reveal of the same cell opens nothing new
        assert_eq!(board.reveal(Coord::new(1, 1)), RevealOutcome::Safe { opened: 0 });
    }

    #[test]
    fn flagged_cell_blocks_reveal() {
        let mut board = Board::with_mines(3, 3, &[Coord::new(2, 2)]);
        board.toggle_flag(Coord::new(0, 0));
        assert_eq!(board.reveal(Coord::new(0, 0)), RevealOutcome::Blocked);
        assert!(revealed(&board).is_empty());
    }

    #[test]
    fn toggle_flag_is_its_own_inverse() {
        let mut board = Board::new(4, 4).with_mine_total(3);
        let pos = Coord::new(2, 3);
        board.toggle_flag(pos);
        assert_eq!(board.cell(pos).state, CellState::Flagged);
        assert_eq!(board.remaining_mines(), 2);
        board.toggle_flag(pos);
        assert_eq!(board.cell(pos).state, CellState::Covered);
    }

    #[test]
    fn counter_uses_announced_total_before_placement() {
        let mut board = Board::new(30, 10).with_mine_total(15);
        assert_eq!(board.mine_count(), 0);
        assert_eq!(board.remaining_mines(), 15);
        board.toggle_flag(Coord::new(3, 3));
        assert_eq!(board.remaining_mines(), 14);
    }

    #[test]
    fn toggle_flag_ignores_revealed_cells() {
        let mut board = Board::with_mines(3, 3, &[Coord::new(1, 1)]);
        board.reveal(Coord::new(0, 0));
        board.toggle_flag(Coord::new(0, 0));
        assert_eq!(board.cell(Coord::new(0, 0)).state, CellState::Revealed);
    }

    #[test]
    fn victory_ignores_unflagged_mine() {
        let mine = Coord::new(1, 1);
        let mut board = Board::with_mines(3, 3, &[mine]);
        let safe: Vec<Coord> = board
            .cells()
            .map(|c| c.position)
            .filter(|&p| p != mine)
            .collect();
        for (i, &pos) in safe.iter().enumerate() {
            assert!(!board.check_victory());
            assert_eq!(board.reveal(pos), RevealOutcome::Safe { opened: 1 }, "step {i}");
        }
        assert!(board.check_victory());
        assert_eq!(board.cell(mine).state, CellState::Covered);
    }

    #[test]
    fn single_mine_scenario_reveals_precomputed_closure() {
        let mine = Coord::new(1, 3);
        let mut board = Board::with_mines(5, 5, &[mine]);

        assert_eq!(board.reveal(Coord::new(0, 0)), RevealOutcome::Safe { opened: 21 });

        let covered: Vec<Coord> = board
            .cells()
            .filter(|c| !c.is_revealed())
            .map(|c| c.position)
            .collect();
        assert_eq!(
            covered,
            vec![Coord::new(0, 3), Coord::new(1, 3), Coord::new(0, 4), Coord::new(1, 4)]
        );
        assert!(!board.check_victory());

        assert_eq!(board.reveal(mine), RevealOutcome::Mine);
        assert!(board.cell(mine).is_revealed());
    }

    #[test]
    fn cursor_is_clamped_on_every_edge() {
        let mut board = Board::new(30, 10);
        board.move_cursor(Direction::Up);
        board.move_cursor(Direction::Left);
        assert_eq!(board.cursor(), Coord::new(0, 0));

        board.set_cursor(Coord::new(29, 9));
        board.move_cursor(Direction::Right);
        board.move_cursor(Direction::Down);
        assert_eq!(board.cursor(), Coord::new(29, 9));

        board.move_cursor(Direction::Up);
        board.move_cursor(Direction::Left);
        assert_eq!(board.cursor(), Coord::new(28, 8));
    }

    #[test]
    fn set_cursor_clamps_out_of_range() {
        let mut board = Board::new(5, 4);
        board.set_cursor(Coord::new(50, 50));
        assert_eq!(board.cursor(), Coord::new(4, 3));
    }
}
