//! Session - the tick loop that drives a board and its controlled pair
//!
//! A session alternates between player control and chain resolution.
//! After a lock the board is compacted and searched for groups until it is
//! stable; every round that erases something is the next link of the chain.
//! Only then is the next pair requested.
//!
//! ```text
//! Start -> FallCheck -> (Falling -> FallCheck)* -> EraseCheck
//!   EraseCheck -> Erasing -> FallCheck        (something erased)
//!   EraseCheck -> Spawn -> Control | GameOver (stable)
//!   Control -> FallCheck                      (piece locked)
//! ```

use crate::config::SessionConfig;
use crate::core::{
    Board, GameSnapshot, NextQueue, PairSource, PieceController, PieceSnapshot, EVENT_CAPACITY,
};
use crate::input::InputTracker;
use crate::log::{EventLog, LogRecord};
use crate::types::{BoardEvent, Color, KeyMask, ScoringMode, NEXT_QUEUE_LEN};

/// Where the session is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Resolving the initial board, without scoring
    Start,
    Spawn,
    Control,
    FallCheck,
    Falling,
    EraseCheck,
    Erasing,
    /// Terminal: the spawn position was blocked
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Spawn => "spawn",
            Phase::Control => "control",
            Phase::FallCheck => "fall_check",
            Phase::Falling => "falling",
            Phase::EraseCheck => "erase_check",
            Phase::Erasing => "erasing",
            Phase::GameOver => "game_over",
        }
    }
}

/// A single-player game
#[derive(Debug)]
pub struct Session<S: PairSource = NextQueue> {
    board: Board,
    controller: PieceController,
    input: InputTracker,
    source: S,
    config: SessionConfig,
    log: EventLog,
    phase: Phase,
    /// True until the initial board has settled
    starting: bool,
    chain: u32,
    max_chain: u32,
    score: u64,
    pieces: u32,
    ticks: u64,
    /// Board events raised by the last tick
    events: Vec<BoardEvent>,
}

impl Session<NextQueue> {
    /// Empty board and a seeded queue from `config`
    pub fn new(config: SessionConfig) -> Self {
        let source = NextQueue::new(config.seed, config.color_count);
        Self::with_board(Board::new(), source, config)
    }
}

impl<S: PairSource> Session<S> {
    /// Start from a prepared position.
    ///
    /// The position is resolved once with scoring suppressed before the
    /// first pair spawns.
    pub fn with_board(board: Board, mut source: S, config: SessionConfig) -> Self {
        source.initialize();
        Self {
            board,
            controller: PieceController::new(),
            input: InputTracker::new(),
            source,
            config: config.normalized(),
            log: EventLog::disabled(),
            phase: Phase::Start,
            starting: true,
            chain: 0,
            max_chain: 0,
            score: 0,
            pieces: 0,
            ticks: 0,
            events: Vec::with_capacity(EVENT_CAPACITY),
        }
    }

    /// Attach an event log
    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    /// Advance one tick with the currently held keys.
    ///
    /// `dt_secs` only drives the erase animation; everything else counts
    /// ticks. Returns the phase for the next tick. The board events of this
    /// tick replace the previous ones (see [`Session::events`]).
    pub fn tick(&mut self, held: KeyMask, dt_secs: f32) -> Phase {
        self.input.update(held);
        self.events.clear();

        let mut locked = false;
        match self.phase {
            Phase::Start => {
                self.starting = true;
                self.phase = Phase::FallCheck;
            }
            Phase::Spawn => self.spawn(),
            Phase::Control => {
                if !self.controller.control(&mut self.board, &self.input) {
                    locked = true;
                    self.chain = 0;
                    self.phase = Phase::FallCheck;
                }
            }
            Phase::FallCheck => {
                self.phase = if self.board.resolve_fall_plan() {
                    Phase::Falling
                } else {
                    Phase::EraseCheck
                };
            }
            Phase::Falling => {
                if !self.board.advance_fall() {
                    self.phase = Phase::FallCheck;
                }
            }
            Phase::EraseCheck => self.erase_check(),
            Phase::Erasing => {
                if !self.board.advance_erase(dt_secs) {
                    self.phase = Phase::FallCheck;
                }
            }
            Phase::GameOver => {}
        }

        self.events.extend(self.board.drain_events());
        if locked {
            self.log_lock();
        }

        self.ticks += 1;
        self.phase
    }

    fn spawn(&mut self) {
        let (axis, child) = self.source.take_next();
        if !self.controller.spawn(&self.board, axis, child) {
            self.phase = Phase::GameOver;
            self.log.record(&LogRecord::GameOver {
                tick: self.ticks,
                pieces: self.pieces,
                max_chain: self.max_chain,
                total: self.score,
            });
            return;
        }

        self.pieces += 1;
        self.phase = Phase::Control;
        self.log.record(&LogRecord::Spawn {
            tick: self.ticks,
            piece: self.pieces,
            axis_color: axis.id(),
            child_color: child.id(),
        });
    }

    fn erase_check(&mut self) {
        let mode = if self.starting {
            ScoringMode::Suppressed
        } else {
            ScoringMode::Enabled(self.chain + 1)
        };

        if self.board.find_groups(mode) {
            if !self.starting {
                self.chain += 1;
                let step = self.board.last_erase_score();
                self.log.record(&LogRecord::Chain {
                    tick: self.ticks,
                    chain: self.chain,
                    erased: self.board.erase_set().len(),
                    score: step.map(|s| s.total).unwrap_or(0),
                    all_clear: step.map(|s| s.all_clear).unwrap_or(false),
                });
            }
            self.phase = Phase::Erasing;
            return;
        }

        let gained = self.board.pop_score();
        if !self.starting {
            self.max_chain = self.max_chain.max(self.chain);
            self.score += gained as u64;
            self.log.record(&LogRecord::Settled {
                tick: self.ticks,
                chain: self.chain,
                score: gained,
                total: self.score,
            });
        }
        self.starting = false;
        self.phase = Phase::Spawn;
    }

    fn log_lock(&mut self) {
        let drop_score = self.controller.pop_score();
        self.score += drop_score as u64;

        let mut cells = [(0i8, 0i8, 0u8); 2];
        let created = self.events.iter().filter_map(|e| match e {
            BoardEvent::Created { pos, color } => Some((pos.x, pos.y, color.id())),
            _ => None,
        });
        for (slot, cell) in cells.iter_mut().zip(created) {
            *slot = cell;
        }

        self.log.record(&LogRecord::Lock {
            tick: self.ticks,
            piece: self.pieces,
            cells,
            drop_score,
        });
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Total score, chains and soft drop points included
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Links in the current (or last finished) chain
    pub fn chain(&self) -> u32 {
        self.chain
    }

    pub fn max_chain(&self) -> u32 {
        self.max_chain
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn controller(&self) -> &PieceController {
        &self.controller
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Upcoming pairs as `(axis, child)`, front first
    pub fn next_pairs(&self) -> Vec<(Color, Color)> {
        let mut pairs = Vec::with_capacity(NEXT_QUEUE_LEN);
        self.source.peek(|_, pair| pairs.push(pair));
        pairs
    }

    /// Board events raised during the last tick
    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot {
            board: self.board.snapshot(),
            active: self.controller.piece().map(PieceSnapshot::from),
            erasing: self.board.erase_set().len(),
            falling: self.board.fall_plan().len(),
            score: u32::try_from(self.score).unwrap_or(u32::MAX),
            chain: self.chain,
            max_chain: self.max_chain,
            game_over: self.is_game_over(),
            ..GameSnapshot::default()
        };
        self.source.peek(|i, (axis, child)| {
            if let Some(slot) = snap.next_pairs.get_mut(i) {
                *slot = (axis.id(), child.id());
            }
        });
        snap
    }

    /// Flush the event log
    pub fn finish(&mut self) -> anyhow::Result<()> {
        self.log.flush()
    }

    /// Run until game over or `max_ticks`, feeding `script(tick)` as input
    pub fn run_with(&mut self, mut script: impl FnMut(u64) -> KeyMask) -> Phase {
        let dt = self.config.tick_secs;
        while !self.is_game_over() && self.ticks < self.config.max_ticks as u64 {
            let held = script(self.ticks);
            self.tick(held, dt);
        }
        self.phase
    }
}
