//! Game session - the single owner of all mutable game state
//!
//! Turn sequence: spawn → gravity / player moves → lock → sweep → score and
//! level update → spawn. Full rows are not removed at lock time: they are
//! marked and the session enters the `Clearing` phase, a blocking window in
//! which gravity, lock delay and every intent are ignored. Once the window
//! elapses the rows are compacted, points are awarded and the next piece
//! spawns.
//!
//! Time is virtual: the session clock only advances through [`GameSession::tick`],
//! so a paused session (which receives no ticks) never accumulates time.

use arrayvec::ArrayVec;

use crate::board::{Board, RowList};
use crate::event::SessionEvent;
use crate::lock::{LockController, LockState};
use crate::piece::ActivePiece;
use crate::rng::{PieceSource, SevenBag};
use crate::scoring::{drop_interval_ms, level_for_lines, ClearAward};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Intent, PieceKind, RotateDir, Rules, HARD_DROP_BONUS, NEXT_QUEUE_LEN};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Created, not started yet
    Idle,
    /// A piece is falling (or paused)
    Playing,
    /// Full rows are marked and will be removed when the window elapses
    Clearing { rows: RowList, remaining_ms: u32 },
    /// Terminal until the next start
    Over,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession<S: PieceSource = SevenBag> {
    source: S,
    rules: Rules,
    board: Board,
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    can_hold: bool,
    next: ArrayVec<PieceKind, NEXT_QUEUE_LEN>,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    drop_counter_ms: u32,
    now_ms: u64,
    lock: LockController,
    phase: Phase,
    paused: bool,
    events: Vec<SessionEvent>,
}

impl GameSession<SevenBag> {
    /// Session fed by a seeded 7-bag
    pub fn with_seed(seed: u32, rules: Rules) -> Self {
        Self::new(SevenBag::new(seed), rules)
    }
}

impl<S: PieceSource> GameSession<S> {
    /// Create an idle session. Call [`GameSession::start`] to play.
    pub fn new(source: S, rules: Rules) -> Self {
        Self {
            source,
            rules,
            board: Board::new(),
            active: None,
            hold: None,
            can_hold: true,
            next: ArrayVec::new(),
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: drop_interval_ms(1),
            drop_counter_ms: 0,
            now_ms: 0,
            lock: LockController::new(&rules),
            phase: Phase::Idle,
            paused: false,
            events: Vec::with_capacity(16),
        }
    }

    /// Begin a fresh game, discarding any previous one.
    pub fn start(&mut self) {
        self.source.restart();
        self.board.clear();
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.next.clear();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = drop_interval_ms(1);
        self.drop_counter_ms = 0;
        self.lock = LockController::new(&self.rules);
        self.paused = false;
        self.phase = Phase::Playing;
        self.events.push(SessionEvent::Started);

        self.fill_next();
        self.spawn_next();
    }

    /// Force game over. Returns the final score, or `None` when no game was running.
    pub fn end(&mut self) -> Option<u32> {
        match self.phase {
            Phase::Playing | Phase::Clearing { .. } => {
                self.enter_game_over();
                Some(self.score)
            }
            Phase::Idle | Phase::Over => None,
        }
    }

    /// End the current game (if any) and start a new one.
    pub fn reset(&mut self) -> Option<u32> {
        let final_score = self.end();
        self.start();
        final_score
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn animating(&self) -> bool {
        matches!(self.phase, Phase::Clearing { .. })
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::Over
    }

    /// Running and accepting ticks
    pub fn running(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::Clearing { .. }) && !self.paused
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Session clock in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access, for setting up scripted positions.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn next_queue(&self) -> &[PieceKind] {
        &self.next
    }

    pub fn lock_state(&self) -> LockState {
        self.lock.state()
    }

    pub fn is_grounded(&self) -> bool {
        self.lock.is_grounded()
    }

    /// Take all events recorded since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SessionEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self
            .active
            .as_ref()
            .map(|p| ActiveSnapshot::from_piece(p, self.lock.is_grounded()));
        out.ghost_y = self.active.as_ref().map(|p| p.landing_y(&self.board));
        for (slot, kind) in out.next.iter_mut().zip(self.next.iter()) {
            *slot = *kind;
        }
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.started = self.started();
        out.paused = self.paused;
        out.animating = self.animating();
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the session clock by `elapsed_ms`.
    ///
    /// Runs gravity and the lock-delay check, or counts down the clearing
    /// window. Returns true if the board or piece changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.running() {
            return false;
        }
        self.now_ms += elapsed_ms as u64;

        if let Phase::Clearing { rows, remaining_ms } = &mut self.phase {
            *remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
            if *remaining_ms > 0 {
                return false;
            }
            let rows = rows.clone();
            self.complete_clear(&rows);
            return true;
        }

        if self.active.is_none() {
            return false;
        }

        let mut changed = false;
        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.drop_interval_ms {
            changed |= self.step_down();
        }

        if self.lock.expired(self.now_ms) {
            self.finalize(false);
            changed = true;
        }

        changed
    }

    /// Apply a player intent. Returns whether it changed anything.
    ///
    /// Intents are ignored before start, during the clearing window, and after
    /// game over. While paused only `TogglePause` is accepted.
    pub fn apply(&mut self, intent: Intent) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        if intent == Intent::TogglePause {
            return self.toggle_pause();
        }
        if self.paused || self.active.is_none() {
            return false;
        }

        if let Some(dir) = intent.rotation() {
            return self.rotate(dir);
        }
        match intent {
            Intent::MoveLeft => self.shift(-1),
            Intent::MoveRight => self.shift(1),
            Intent::SoftDrop => self.step_down(),
            Intent::HardDrop => self.hard_drop(),
            Intent::Hold => self.hold(),
            Intent::RotateCw | Intent::RotateCcw | Intent::Rotate180 | Intent::TogglePause => {
                false
            }
        }
    }

    fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.events.push(if self.paused {
            SessionEvent::Paused
        } else {
            SessionEvent::Resumed
        });
        true
    }

    fn fill_next(&mut self) {
        while !self.next.is_full() {
            let kind = self.source.next_kind();
            self.next.push(kind);
        }
    }

    /// Dequeue the next kind and make it the active piece.
    /// Returns false (and ends the game) when it cannot be placed.
    fn spawn_next(&mut self) -> bool {
        self.fill_next();
        let Some(kind) = self.next.pop_at(0) else {
            return false;
        };
        self.fill_next();

        self.can_hold = true;
        self.place(kind)
    }

    /// Put a fresh `kind` piece at the spawn position, or end the game if it collides.
    fn place(&mut self, kind: PieceKind) -> bool {
        let piece = ActivePiece::spawn(kind);
        self.lock.clear();
        self.drop_counter_ms = 0;

        if piece.collides(&self.board) {
            self.enter_game_over();
            return false;
        }

        self.active = Some(piece);
        self.events.push(SessionEvent::Spawned { kind });
        true
    }

    fn enter_game_over(&mut self) {
        // Rows marked for clearing are removed unscored.
        if let Phase::Clearing { rows, .. } = &self.phase {
            let rows = rows.clone();
            self.board.clear_rows(&rows);
        }
        self.phase = Phase::Over;
        self.active = None;
        self.paused = false;
        self.lock.clear();
        self.events.push(SessionEvent::GameOver { score: self.score });
    }

    fn shift(&mut self, dx: i8) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if !piece.shift(dx, 0, &self.board) {
            return false;
        }
        let resting = piece.is_resting(&self.board);
        self.lock.moved(resting, self.now_ms);
        true
    }

    fn rotate(&mut self, dir: RotateDir) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if !piece.rotate(dir, &self.board) {
            return false;
        }
        let resting = piece.is_resting(&self.board);
        self.lock.moved(resting, self.now_ms);
        true
    }

    /// One row down (gravity or soft drop). On failure the piece grounds;
    /// it never locks here.
    fn step_down(&mut self) -> bool {
        self.drop_counter_ms = 0;
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if piece.shift(0, 1, &self.board) {
            let resting = piece.is_resting(&self.board);
            self.lock.moved(resting, self.now_ms);
            true
        } else {
            self.lock.ground(self.now_ms);
            false
        }
    }

    fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let distance = piece.drop_distance(&self.board);
        piece.position.y += distance;
        self.score = self.score.saturating_add(HARD_DROP_BONUS);
        self.finalize(true);
        true
    }

    fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(current) = self.active.as_ref().map(|p| p.kind) else {
            return false;
        };

        match self.hold.replace(current) {
            None => {
                self.events.push(SessionEvent::Held {
                    kind: current,
                    swapped_in: None,
                });
                self.active = None;
                self.spawn_next();
            }
            Some(held) => {
                self.events.push(SessionEvent::Held {
                    kind: current,
                    swapped_in: Some(held),
                });
                self.active = None;
                self.place(held);
            }
        }

        self.can_hold = false;
        true
    }

    /// Merge the active piece and start the row sweep.
    fn finalize(&mut self, hard_drop: bool) {
        let Some(piece) = self.active.take() else {
            return;
        };
        self.board.merge(&piece.shape, piece.position);
        self.lock.clear();
        self.events.push(SessionEvent::Locked {
            kind: piece.kind,
            hard_drop,
        });

        let rows = self.board.find_full_rows();
        if rows.is_empty() {
            self.spawn_next();
            return;
        }

        if self.rules.clear_delay_ms == 0 {
            self.complete_clear(&rows);
            return;
        }

        self.board.mark_rows(&rows);
        self.phase = Phase::Clearing {
            rows,
            remaining_ms: self.rules.clear_delay_ms,
        };
    }

    /// Compact the cleared rows, award points and spawn the next piece.
    fn complete_clear(&mut self, rows: &[usize]) {
        self.board.clear_rows(rows);

        let all_clear = self.board.is_empty();
        // Line score and all-clear bonus both use the level the rows were cleared at.
        let award = ClearAward::new(rows.len(), self.level, all_clear);
        self.score = self.score.saturating_add(award.total());
        self.lines += award.lines;
        self.level = level_for_lines(self.lines);
        self.drop_interval_ms = drop_interval_ms(self.level);
        self.events.push(SessionEvent::LinesCleared {
            lines: award.lines,
            points: award.total(),
            all_clear,
            level: self.level,
        });

        self.phase = Phase::Playing;
        self.spawn_next();
    }
}
