use crate::piece::Piece;
use crate::types::{Rotation, BOARD_HEIGHT, BOARD_WIDTH, NEXT_QUEUE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub axis_color: u8,
    pub child_color: u8,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            axis_color: value.axis_color.id(),
            child_color: value.child_color.id(),
            rotation: value.rotation,
            x: value.axis.x,
            y: value.axis.y,
        }
    }
}

/// Plain-data view of a running game, color ids only (0 is empty)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// `[y][x]`, row 0 at the floor
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<PieceSnapshot>,
    pub next_pairs: [(u8, u8); NEXT_QUEUE_LEN],
    pub erasing: usize,
    pub falling: usize,
    pub score: u32,
    pub chain: u32,
    pub max_chain: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.next_pairs = [(0, 0); NEXT_QUEUE_LEN];
        self.erasing = 0;
        self.falling = 0;
        self.score = 0;
        self.chain = 0;
        self.max_chain = 0;
        self.game_over = false;
    }

    /// Whether the board has no chain work in progress
    pub fn is_stable(&self) -> bool {
        self.erasing == 0 && self.falling == 0
    }

    pub fn filled(&self) -> usize {
        self.board
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c != 0)
            .count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next_pairs: [(0, 0); NEXT_QUEUE_LEN],
            erasing: 0,
            falling: 0,
            score: 0,
            chain: 0,
            max_chain: 0,
            game_over: false,
        };
        s.clear();
        s
    }
}
