//! Board module - manages the game grid
//!
//! The board is a 6x14 grid where each cell can be empty or hold one color.
//! Uses a flat array for better cache locality and zero-allocation hot paths.
//! Coordinates: (x, y) where x ranges 0..5 (left to right), y ranges 0..13
//! (floor to top). Row 13 is the buffer row: gravity never pulls cells out of
//! it and only a freshly spawned child cell can occupy it.
//!
//! Chain resolution is split into four steps the orchestrator drives tick by
//! tick: [`Board::resolve_fall_plan`], [`Board::advance_fall`],
//! [`Board::find_groups`] and [`Board::advance_erase`].

use arrayvec::ArrayVec;

use crate::scoring::{calculate_erase_score, connect_bonus, EraseScore};
use crate::types::{
    BoardEvent, Cell, Color, Pos, ScoringMode, BOARD_HEIGHT, BOARD_SIZE, BOARD_WIDTH,
    FALL_FRAMES_PER_CELL, MIN_GROUP_SIZE,
};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

// One bit per column in the visited mask.
const _: () = assert!(WIDTH <= 8);

/// Reserved event slots: one move and one destroy per cell between drains
pub const EVENT_CAPACITY: usize = 2 * BOARD_SIZE;

/// Search order for neighbours: up, right, down, left
const NEIGHBORS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// A cell that has to drop during chain resolution.
///
/// The grid already holds the cell at `dest_row`; the descriptor only drives
/// the visual drop from `source_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallDescriptor {
    pub column: i8,
    pub source_row: i8,
    pub dest_row: i8,
}

/// Visual state of an in-flight falling cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallingCell {
    pub column: i8,
    pub dest_row: i8,
    /// Current drawn row, between `dest_row` and the source row
    pub row: f32,
}

/// The game board - 6 columns x 14 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x), row 0 at the floor
    cells: [Cell; BOARD_SIZE],
    falls: ArrayVec<FallDescriptor, BOARD_SIZE>,
    fall_frames: u32,
    erases: ArrayVec<Pos, BOARD_SIZE>,
    erase_elapsed: f32,
    erase_scale: f32,
    last_erase_score: Option<EraseScore>,
    score: u32,
    events: Vec<BoardEvent>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            falls: ArrayVec::new(),
            fall_frames: 0,
            erases: ArrayVec::new(),
            erase_elapsed: 0.0,
            erase_scale: 1.0,
            last_erase_score: None,
            score: 0,
            events: Vec::with_capacity(EVENT_CAPACITY),
        }
    }

    /// Build a board from a picture, top row first.
    ///
    /// `.` is empty and the color letters are `g r y b p c`. Fewer rows than
    /// the board height fill the bottom of the board. Returns `None` for a
    /// row that is too wide, too many rows, or an unknown character.
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_rules_core::Board;
    /// use puyo_rules_core::types::{Color, Pos};
    ///
    /// let board = Board::from_ascii(&["r.", "rb"]).unwrap();
    /// assert_eq!(board.get(Pos::new(0, 1)), Some(Some(Color::Red)));
    /// assert_eq!(board.get(Pos::new(1, 0)), Some(Some(Color::Blue)));
    /// assert_eq!(board.get(Pos::new(1, 1)), Some(None));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Option<Self> {
        if rows.len() > HEIGHT {
            return None;
        }
        let mut board = Self::new();
        for (i, row) in rows.iter().enumerate() {
            let y = (rows.len() - 1 - i) as i8;
            if row.chars().count() > WIDTH {
                return None;
            }
            for (x, ch) in row.chars().enumerate() {
                if ch == '.' {
                    continue;
                }
                let color = Color::from_str(&ch.to_string())?;
                board.settle(Pos::new(x as i8, y), color);
            }
        }
        Some(board)
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(pos: Pos) -> Option<usize> {
        if !pos.in_bounds() {
            return None;
        }
        Some((pos.y as usize) * WIDTH + (pos.x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at a position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        Self::index(pos).map(|idx| self.cells[idx])
    }

    /// Color at a position, `None` when empty or out of bounds
    fn color_at(&self, pos: Pos) -> Cell {
        self.get(pos).flatten()
    }

    /// Check if a position is inside the board and empty
    pub fn occupy(&self, pos: Pos) -> bool {
        matches!(self.get(pos), Some(None))
    }

    /// Check if a position is inside the board and filled
    pub fn is_occupied(&self, pos: Pos) -> bool {
        matches!(self.get(pos), Some(Some(_)))
    }

    /// Write a color into an empty cell.
    ///
    /// Returns false without touching the board if the position is out of
    /// bounds or already filled. On success a [`BoardEvent::Created`] is queued.
    pub fn settle(&mut self, pos: Pos, color: Color) -> bool {
        if !self.occupy(pos) {
            return false;
        }
        let Some(idx) = Self::index(pos) else {
            return false;
        };
        self.cells[idx] = Some(color);
        self.events.push(BoardEvent::Created { pos, color });
        true
    }

    /// Find every floating cell and move it onto its landing spot.
    ///
    /// Columns are scanned bottom to top, so each landing spot only depends
    /// on cells that are already resolved. The grid is updated immediately;
    /// the returned work only concerns the drop animation driven by
    /// [`Board::advance_fall`]. The buffer row is left alone.
    ///
    /// Returns true if at least one cell has to fall.
    pub fn resolve_fall_plan(&mut self) -> bool {
        self.falls.clear();
        self.fall_frames = 0;

        let mut landing = [0i8; WIDTH];

        for y in 0..(HEIGHT - 1) as i8 {
            for x in 0..WIDTH as i8 {
                let pos = Pos::new(x, y);
                let Some(color) = self.color_at(pos) else {
                    continue;
                };

                let column = x as usize;
                let dest = landing[column];
                landing[column] = y + 1;

                if y == 0 || self.is_occupied(pos.down()) {
                    continue;
                }

                let to = Pos::new(x, dest);
                if let (Some(from_idx), Some(to_idx)) = (Self::index(pos), Self::index(to)) {
                    self.cells[to_idx] = Some(color);
                    self.cells[from_idx] = None;
                }
                self.falls.push(FallDescriptor {
                    column: x,
                    source_row: y,
                    dest_row: dest,
                });
                self.events.push(BoardEvent::Moved { from: pos, to });

                landing[column] = dest + 1;
            }
        }

        !self.falls.is_empty()
    }

    /// Advance the drop animation by one tick.
    ///
    /// Returns true while any cell is still in flight.
    pub fn advance_fall(&mut self) -> bool {
        self.fall_frames += 1;
        let dropped = (self.fall_frames / FALL_FRAMES_PER_CELL) as i32;

        self.falls
            .retain(|f| (f.source_row as i32) > (f.dest_row as i32) + dropped);

        !self.falls.is_empty()
    }

    /// Descriptors still in flight
    pub fn fall_plan(&self) -> &[FallDescriptor] {
        &self.falls
    }

    /// Drawn rows of the cells still in flight
    pub fn falling(&self) -> impl Iterator<Item = FallingCell> + '_ {
        let dy = self.fall_frames as f32 / FALL_FRAMES_PER_CELL as f32;
        self.falls.iter().map(move |f| FallingCell {
            column: f.column,
            dest_row: f.dest_row,
            row: (f.source_row as f32 - dy).max(f.dest_row as f32),
        })
    }

    /// Collect every connected same-colored group of four or more cells.
    ///
    /// Every cell is visited at most once: a bit per cell marks it as soon
    /// as it is discovered, and groups are grown from an explicit worklist.
    /// The erase set is rebuilt from scratch on each call.
    ///
    /// With [`ScoringMode::Enabled`] the step's score is added to the
    /// pending score (see [`Board::pop_score`]).
    ///
    /// Returns true if anything is going to be erased.
    pub fn find_groups(&mut self, mode: ScoringMode) -> bool {
        self.erases.clear();
        self.erase_elapsed = 0.0;
        self.erase_scale = 1.0;
        self.last_erase_score = None;

        let mut visited = [0u8; HEIGHT];
        let mut filled = 0usize;
        let mut color_bits = 0u32;
        let mut connect_sum = 0u32;

        let mut group: ArrayVec<Pos, BOARD_SIZE> = ArrayVec::new();
        let mut worklist: ArrayVec<Pos, BOARD_SIZE> = ArrayVec::new();

        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if visited[y] & (1 << x) != 0 {
                    continue;
                }
                visited[y] |= 1 << x;

                let start = Pos::new(x as i8, y as i8);
                let Some(color) = self.color_at(start) else {
                    continue;
                };

                group.clear();
                worklist.push(start);
                while let Some(pos) = worklist.pop() {
                    group.push(pos);
                    for offset in NEIGHBORS {
                        let next = pos.offset(offset);
                        if !next.in_bounds() || self.color_at(next) != Some(color) {
                            continue;
                        }
                        let (nx, ny) = (next.x as usize, next.y as usize);
                        if visited[ny] & (1 << nx) != 0 {
                            continue;
                        }
                        visited[ny] |= 1 << nx;
                        worklist.push(next);
                    }
                }

                filled += group.len();
                if group.len() >= MIN_GROUP_SIZE {
                    connect_sum += connect_bonus(group.len());
                    color_bits |= 1 << color.id();
                    for &pos in &group {
                        self.erases.push(pos);
                    }
                }
            }
        }

        if let ScoringMode::Enabled(chain_index) = mode {
            if !self.erases.is_empty() {
                let all_clear = self.erases.len() == filled;
                let score = calculate_erase_score(
                    self.erases.len(),
                    chain_index,
                    connect_sum,
                    color_bits,
                    all_clear,
                );
                self.score = self.score.saturating_add(score.total);
                self.last_erase_score = Some(score);
            }
        }

        !self.erases.is_empty()
    }

    /// Cells marked by the last [`Board::find_groups`] and not yet cleared
    pub fn erase_set(&self) -> &[Pos] {
        &self.erases
    }

    /// Score breakdown of the last scored group search that erased something
    pub fn last_erase_score(&self) -> Option<EraseScore> {
        self.last_erase_score
    }

    /// Advance the erase animation by `dt_secs` seconds of real time.
    ///
    /// Marked cells swell briefly and then shrink; once the size multiplier
    /// reaches zero they are cleared from the grid and a
    /// [`BoardEvent::Destroyed`] is queued for each.
    ///
    /// Returns true while the animation is still running.
    pub fn advance_erase(&mut self, dt_secs: f32) -> bool {
        self.erase_elapsed += dt_secs;
        let scale = erase_scale_at(self.erase_elapsed);

        if scale <= 0.0 {
            for &pos in &self.erases {
                if let Some(idx) = Self::index(pos) {
                    self.cells[idx] = None;
                }
                self.events.push(BoardEvent::Destroyed { pos });
            }
            self.erases.clear();
            self.erase_scale = 0.0;
            return false;
        }

        self.erase_scale = scale;
        true
    }

    /// Size multiplier for the cells in the erase set
    pub fn erase_scale(&self) -> f32 {
        self.erase_scale
    }

    /// Take the accumulated score, leaving zero behind
    pub fn pop_score(&mut self) -> u32 {
        std::mem::take(&mut self.score)
    }

    /// Take the queued presentation events.
    ///
    /// The queue keeps its capacity, so draining once per tick never
    /// allocates.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, BoardEvent> {
        self.events.drain(..)
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write color ids (0 for empty) into `out[y][x]`, row 0 at the floor
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * WIDTH + x].map(|c| c.id()).unwrap_or(0);
            }
        }
    }

    /// Color ids of the whole grid, `[y][x]` with row 0 at the floor
    pub fn snapshot(&self) -> [[u8; WIDTH]; HEIGHT] {
        let mut grid = [[0u8; WIDTH]; HEIGHT];
        self.write_u8_grid(&mut grid);
        grid
    }

    /// Clear the entire board, including any chain in progress
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
        self.falls.clear();
        self.fall_frames = 0;
        self.erases.clear();
        self.erase_elapsed = 0.0;
        self.erase_scale = 1.0;
        self.last_erase_score = None;
        self.score = 0;
        self.events.push(BoardEvent::Cleared);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Erase animation size curve: starts at 1, peaks around 0.1s, then
/// shrinks through zero shortly after 0.43s.
pub fn erase_scale_at(t: f32) -> f32 {
    1.0 - 10.0 * ((t - 0.1) * (t - 0.1) - 0.1 * 0.1)
}
