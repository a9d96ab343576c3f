//! Session module - the playable game loop
//!
//! Owns the grid, the falling pair, scoring, progression, the garbage
//! scheduler and the RNG. Callers drive it with `tick(elapsed_ms)` plus
//! discrete intents and read state back through snapshots; nothing here
//! blocks, draws or sleeps.

use crate::core::chain::{resolve_all, ChainRound};
use crate::core::garbage::GarbageScheduler;
use crate::core::grid::Grid;
use crate::core::piece::PuyoPair;
use crate::core::progression::ProgressionTracker;
use crate::core::rng::SimpleRng;
use crate::core::snapshot::{GameSnapshot, PairSnapshot};
use crate::types::{GameIntent, PuyoColor, GRID_HEIGHT, GRID_WIDTH};

/// What one `tick` call produced
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// A pair settled during this tick (or a buffered earlier settle)
    pub landed: bool,
    /// Chain rounds resolved by that settle, in order
    pub chain_rounds: Vec<ChainRound>,
    /// Garbage blocks released onto the grid
    pub garbage_dropped: u32,
    /// Session is (now) terminal
    pub game_over: bool,
}

/// A complete single-player session
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    /// Falling pair; `None` only once the session is over
    active: Option<PuyoPair>,
    next_pair: (PuyoColor, PuyoColor),
    rng: SimpleRng,
    score: u32,
    max_chain: u32,
    progression: ProgressionTracker,
    garbage: GarbageScheduler,
    fall_timer_ms: u32,
    play_time_ms: u64,
    game_over: bool,
    /// Results of a landing triggered by an intent, surfaced by the next
    /// `tick` call
    buffered: TickResult,
}

impl GameSession {
    /// Start a fresh session; the seed fully determines pair colors and
    /// garbage placement.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let first = rng.next_pair();
        let next_pair = rng.next_pair();
        Self {
            grid: Grid::new(),
            active: Some(PuyoPair::at_spawn(first.0, first.1)),
            next_pair,
            rng,
            score: 0,
            max_chain: 0,
            progression: ProgressionTracker::new(),
            garbage: GarbageScheduler::new(),
            fall_timer_ms: 0,
            play_time_ms: 0,
            game_over: false,
            buffered: TickResult::default(),
        }
    }

    /// Advance the simulation by `elapsed_ms` (frame-scale). Pending
    /// garbage drains onto the grid regardless of the piece state, so
    /// blocks can land while a pair is still falling. Applies at most one
    /// gravity step; a blocked step lands the pair and runs the full
    /// resolution pipeline. Results buffered by an earlier soft-drop
    /// landing are folded into the returned value.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickResult {
        let mut result = std::mem::take(&mut self.buffered);

        if self.game_over {
            result.game_over = true;
            return result;
        }

        self.play_time_ms += u64::from(elapsed_ms);
        self.garbage
            .accumulate(elapsed_ms, self.progression.current_level());
        let dropped = self.garbage.drain(&mut self.grid, &mut self.rng);
        if dropped > 0 {
            log::debug!("released {dropped} garbage blocks");
            result.garbage_dropped += dropped;
        }

        self.fall_timer_ms += elapsed_ms;
        let interval = self.progression.fall_interval_ms();
        if self.fall_timer_ms >= interval {
            self.fall_timer_ms = 0;
            let stepped = match self.active.as_mut() {
                Some(pair) => pair.try_move(&self.grid, 0, 1),
                None => true,
            };
            if !stepped {
                let rounds = self.land();
                result.landed = true;
                result.chain_rounds.extend(rounds);
            }
        }

        result.game_over = self.game_over;
        result
    }

    /// Move the falling pair horizontally; `dx` is -1 or +1
    pub fn try_move(&mut self, dx: i8) -> bool {
        if self.game_over {
            return false;
        }
        match self.active.as_mut() {
            Some(pair) => pair.try_move(&self.grid, dx, 0),
            None => false,
        }
    }

    /// Drop the pair one row and restart the fall timer. A blocked drop
    /// lands the pair immediately; its chain rounds surface in the next
    /// `tick` result.
    pub fn try_soft_drop(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(pair) = self.active.as_mut() else {
            return false;
        };
        if pair.try_move(&self.grid, 0, 1) {
            self.fall_timer_ms = 0;
            return true;
        }
        let rounds = self.land();
        self.buffered.landed = true;
        self.buffered.chain_rounds.extend(rounds);
        true
    }

    /// Rotate the falling pair clockwise, with wall kicks
    pub fn try_rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        match self.active.as_mut() {
            Some(pair) => pair.try_rotate(&self.grid),
            None => false,
        }
    }

    /// Dispatch a discrete intent to the matching method
    pub fn apply_intent(&mut self, intent: GameIntent) -> bool {
        match intent {
            GameIntent::MoveLeft => self.try_move(-1),
            GameIntent::MoveRight => self.try_move(1),
            GameIntent::SoftDrop => self.try_soft_drop(),
            GameIntent::Rotate => self.try_rotate(),
        }
    }

    /// Settle the active pair: commit, resolve chains, score, level, then
    /// spawn the next pair or end the game.
    fn land(&mut self) -> Vec<ChainRound> {
        if let Some(pair) = self.active.take() {
            pair.commit(&mut self.grid);
        }
        self.grid.compact_columns();

        let rounds = resolve_all(&mut self.grid);
        if !rounds.is_empty() {
            let gained: u32 = rounds.iter().map(|r| r.score).sum();
            self.score += gained;
            self.max_chain = self.max_chain.max(rounds.len() as u32);
            log::debug!(
                "chain depth {} cleared {} cells for {} points",
                rounds.len(),
                rounds.iter().map(ChainRound::cleared_count).sum::<u32>(),
                gained
            );
            if self.progression.record_rounds(rounds.len() as u32) {
                log::info!("level up to {}", self.progression.current_level());
            }
        }

        match PuyoPair::spawn(&self.grid, self.next_pair.0, self.next_pair.1) {
            Ok(pair) => {
                self.active = Some(pair);
                self.next_pair = self.rng.next_pair();
                self.fall_timer_ms = 0;
            }
            Err(_) => {
                self.game_over = true;
                log::info!(
                    "game over: score {} level {} after {} ms",
                    self.score,
                    self.progression.current_level(),
                    self.play_time_ms
                );
            }
        }

        rounds
    }

    /// End the session now, as a blocked spawn would
    pub fn end(&mut self) {
        if !self.game_over {
            self.active = None;
            self.game_over = true;
            log::info!(
                "session ended: score {} level {} after {} ms",
                self.score,
                self.progression.current_level(),
                self.play_time_ms
            );
        }
    }

    /// Rebuild the session in place, reseeding from the current RNG state
    /// so consecutive games stay on one deterministic stream
    pub fn reset(&mut self) {
        *self = Self::new(self.rng.state());
    }

    /// Fill `out` with the current state without allocating
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for y in 0..GRID_HEIGHT as usize {
            for x in 0..GRID_WIDTH as usize {
                out.grid[y][x] = self.grid.cells()[y * GRID_WIDTH as usize + x];
            }
        }
        out.active = self.active.map(|pair| PairSnapshot {
            x: pair.x,
            y: pair.y,
            rotation: pair.rotation,
            pivot_color: pair.pivot_color,
            satellite_color: pair.satellite_color,
        });
        out.next_pair = self.next_pair;
        out.score = self.score;
        out.level = self.progression.current_level();
        out.max_chain = self.max_chain;
        out.pending_garbage = self.garbage.pending();
        out.play_time_ms = self.play_time_ms;
        out.game_over = self.game_over;
    }

    /// Current state as plain data
    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.progression.current_level()
    }

    /// Deepest chain resolved by any single placement this session
    pub fn max_chain(&self) -> u32 {
        self.max_chain
    }

    pub fn play_time_ms(&self) -> u64 {
        self.play_time_ms
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }
}
