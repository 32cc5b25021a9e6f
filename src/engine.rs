//! Stack engine - the drop/rescue state machine
//!
//! Owns the playfield (placed stack or lit grid), the in-flight block, the
//! score/combo counters and the session progression. The host drives it
//! with exactly two mutating calls per frame at most: one `advance` from
//! its tick source and one `drop` from player input. The engine owns no
//! timers and performs no I/O; every outcome is a synchronous return value
//! plus drained events.
//!
//! Callers must not issue overlapping or reentrant `drop()` calls; the
//! engine is synchronous and non-reentrant by construction, so debouncing
//! redundant input belongs at the host's call boundary, not in here.

use arrayvec::ArrayVec;

use crate::config::EngineConfig;
use crate::difficulty;
use crate::grid::Grid;
use crate::mover::{width_for_row, ContinuousMover, GridMover};
use crate::overlap::{column_overlap, columns_match, overlap};
use crate::providers::{CurrencyLedger, PowerUpProvider, StatsRecorder};
use crate::session::GameSession;
use crate::snapshot::{BlockSnapshot, EngineSnapshot, MoverSnapshot};
use crate::types::*;

/// Bounded event queue; drained by the host via [`StackEngine::take_events`].
pub type EventQueue = ArrayVec<EngineEvent, 8>;

/// A placed block in the continuous presentation.
///
/// Immutable once placed; the moving block is not a `Block` until it lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub id: u32,
    /// Left edge.
    pub x: f32,
    /// Bottom edge; the camera scrolls, blocks never move vertically.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color_index: u8,
    pub is_moving: bool,
}

/// Playfield storage, one variant per presentation geometry.
#[derive(Debug, Clone, PartialEq)]
enum Field {
    Continuous {
        stack: Vec<Block>,
        mover: Option<ContinuousMover>,
        next_block_id: u32,
    },
    Grid {
        grid: Grid,
        mover: Option<GridMover>,
    },
}

/// How a single drop resolved against the row below.
enum Placement {
    /// First block of the run; placed unconditionally.
    Base,
    /// Zero overlap, extra life consumed, block restored to the row below.
    Rescued,
    /// Overlapping placement, chopped to the overlap region.
    Landed { perfect: bool },
    /// Zero overlap and no rescue available.
    Missed,
}

/// The core state machine.
///
/// `AwaitingFirstBlock -> NormalPlay -> (GameOver | Won)`, with
/// `NormalPlay` self-looping once per drop. Terminal phases accept only
/// [`reset`](StackEngine::reset).
#[derive(Debug)]
pub struct StackEngine<P: PowerUpProvider> {
    config: EngineConfig,
    powerups: P,
    session: GameSession,
    field: Field,
    phase: Phase,
    paused: bool,
    score: u32,
    combo: u32,
    blocks_placed: u32,
    perfect_stacks: u32,
    highest_combo: u32,
    stats_recorded: bool,
    events: EventQueue,
}

impl<P: PowerUpProvider> StackEngine<P> {
    /// Create an engine in `AwaitingFirstBlock`; call
    /// [`start`](StackEngine::start) to spawn the first moving block.
    pub fn new(geometry: Geometry, mode: GameMode, config: EngineConfig, powerups: P) -> Self {
        let field = Self::fresh_field(geometry, mode, &config);
        Self {
            config,
            powerups,
            session: GameSession::new(mode),
            field,
            phase: Phase::AwaitingFirstBlock,
            paused: false,
            score: 0,
            combo: 0,
            blocks_placed: 0,
            perfect_stacks: 0,
            highest_combo: 0,
            stats_recorded: false,
            events: EventQueue::new(),
        }
    }

    fn fresh_field(geometry: Geometry, mode: GameMode, config: &EngineConfig) -> Field {
        match geometry {
            Geometry::Continuous => Field::Continuous {
                stack: Vec::new(),
                mover: None,
                next_block_id: 0,
            },
            Geometry::Grid => {
                let rows = match mode {
                    GameMode::Classic => config.classic_rows,
                    GameMode::Infinite => config.infinite_initial_rows,
                };
                Field::Grid {
                    grid: Grid::new(rows),
                    mover: None,
                }
            }
        }
    }

    /// Spawn the first moving block. Idempotent.
    pub fn start(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        log::info!(
            "session start: mode={} geometry={}",
            self.session.mode().as_str(),
            self.geometry().as_str()
        );
        self.spawn_next();
    }

    /// Tear down the current run and begin a fresh one in `mode`.
    ///
    /// The only way out of a terminal phase. Geometry and config carry over.
    pub fn reset(&mut self, mode: GameMode) {
        let geometry = self.geometry();
        self.session = GameSession::new(mode);
        self.field = Self::fresh_field(geometry, mode, &self.config);
        self.phase = Phase::AwaitingFirstBlock;
        self.paused = false;
        self.score = 0;
        self.combo = 0;
        self.blocks_placed = 0;
        self.perfect_stacks = 0;
        self.highest_combo = 0;
        self.stats_recorded = false;
        self.events.clear();
        self.start();
    }

    // --- observable state ------------------------------------------------

    pub fn geometry(&self) -> Geometry {
        match self.field {
            Field::Continuous { .. } => Geometry::Continuous,
            Field::Grid { .. } => Geometry::Grid,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.session.mode()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn level(&self) -> u32 {
        self.session.level()
    }

    pub fn blocks_per_row(&self) -> u8 {
        self.session.blocks_per_row()
    }

    pub fn speed(&self) -> f32 {
        self.session.speed()
    }

    pub fn alignment_tolerance(&self) -> f32 {
        self.session.alignment_tolerance()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn prize_state(&self) -> PrizeState {
        self.session.prize_state()
    }

    pub fn should_apply_forced_drop(&self) -> bool {
        self.session.should_apply_forced_drop()
    }

    /// The four tallies reported at termination, readable at any time.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            score: self.score,
            blocks_placed: self.blocks_placed,
            perfect_stacks: self.perfect_stacks,
            highest_combo: self.highest_combo,
        }
    }

    /// Placed blocks, bottom first (continuous presentation).
    pub fn stack(&self) -> Option<&[Block]> {
        match &self.field {
            Field::Continuous { stack, .. } => Some(stack),
            Field::Grid { .. } => None,
        }
    }

    /// The lit-cell matrix (grid presentation).
    pub fn grid(&self) -> Option<&Grid> {
        match &self.field {
            Field::Grid { grid, .. } => Some(grid),
            Field::Continuous { .. } => None,
        }
    }

    /// Extent of the in-flight block as (left edge, width).
    pub fn current_extent(&self) -> Option<(f32, f32)> {
        match &self.field {
            Field::Continuous { mover, .. } => mover.as_ref().map(|m| m.extent()),
            Field::Grid { .. } => None,
        }
    }

    /// Columns of the in-flight run (grid presentation).
    pub fn current_columns(&self) -> Option<&[u8]> {
        match &self.field {
            Field::Grid { mover, .. } => mover.as_ref().map(|m| m.columns()),
            Field::Continuous { .. } => None,
        }
    }

    /// Rows successfully placed so far in this run.
    pub fn rows_placed(&self) -> usize {
        match &self.field {
            Field::Continuous { stack, .. } => stack.len(),
            Field::Grid { grid, .. } => grid.current_row(),
        }
    }

    /// Drain the pending events, oldest first.
    pub fn take_events(&mut self) -> EventQueue {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let (stack, grid_rows, current_row, moving) = match &self.field {
            Field::Continuous { stack, mover, .. } => (
                stack.iter().map(BlockSnapshot::from).collect(),
                Vec::new(),
                0,
                mover.as_ref().map(|m| MoverSnapshot::Continuous {
                    x: m.x(),
                    width: m.width(),
                }),
            ),
            Field::Grid { grid, mover } => (
                Vec::new(),
                grid.cells().to_vec(),
                grid.current_row(),
                mover.as_ref().map(|m| MoverSnapshot::Grid {
                    columns: m.columns().to_vec(),
                }),
            ),
        };
        EngineSnapshot {
            geometry: self.geometry(),
            mode: self.session.mode(),
            phase: self.phase,
            level: self.session.level(),
            blocks_per_row: self.session.blocks_per_row(),
            speed: self.session.speed(),
            alignment_tolerance: self.session.alignment_tolerance(),
            score: self.score,
            combo: self.combo,
            prize_state: self.session.prize_state(),
            forced_drop_pending: self.session.should_apply_forced_drop(),
            stack,
            grid_rows,
            current_row,
            moving,
        }
    }

    // --- pause -----------------------------------------------------------

    /// Freeze lateral motion. Idempotent; the engine holds no timers, so
    /// pausing is nothing more than ignoring ticks.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Idempotent counterpart of [`pause`](StackEngine::pause).
    pub fn resume(&mut self) {
        self.paused = false;
    }

    // --- simulation ------------------------------------------------------

    /// Advance lateral motion by `dt` seconds.
    ///
    /// The power-up speed multiplier is read from the provider on every
    /// call (activation and expiry are owned externally, so caching it
    /// across ticks would be wrong). No-op while paused.
    pub fn advance(&mut self, dt: f32) -> Result<(), EngineError> {
        if self.phase.is_terminal() {
            return Err(self.reject("advance"));
        }
        if self.paused {
            return Ok(());
        }

        let level = self.session.level();
        let multiplier = self.powerups.speed_multiplier();
        match &mut self.field {
            Field::Continuous {
                mover: Some(m), ..
            } => {
                let speed = self.session.speed() * multiplier.max(0.0);
                let (min_x, max_x) = self.config.travel_bounds(m.width());
                m.advance(dt, speed, min_x, max_x);
            }
            Field::Grid {
                grid,
                mover: Some(m),
            } => {
                let interval = difficulty::scaled_grid_move_interval(level, multiplier);
                if m.advance(dt, interval) > 0 {
                    let row = grid.current_row();
                    grid.paint_row(row, m.columns());
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Resolve a drop of the in-flight block.
    ///
    /// Outcomes are deterministic game logic, never errors; `Err` is
    /// reserved for caller-contract violations (terminal phase, paused, or
    /// no block in flight).
    pub fn drop(&mut self) -> Result<DropOutcome, EngineError> {
        if self.phase.is_terminal() || self.paused {
            return Err(self.reject("drop"));
        }

        let placement = match &mut self.field {
            Field::Continuous {
                stack,
                mover,
                next_block_id,
            } => {
                let Some(m) = mover.take() else {
                    log::warn!("drop rejected: no block in flight");
                    return Err(EngineError::InvalidTransition);
                };
                if let Some(&top) = stack.last() {
                    let ov = overlap(m.x(), m.width(), top.x, top.width);
                    if ov.is_miss() {
                        if self.powerups.has_extra_life() && self.powerups.consume_extra_life() {
                            // Full recovery: the rescued block matches the
                            // row below exactly, no shrink.
                            Self::push_block(stack, next_block_id, &self.config, top.x, top.width);
                            Placement::Rescued
                        } else {
                            Placement::Missed
                        }
                    } else {
                        let width = ov.width.max(self.config.min_block_width);
                        Self::push_block(stack, next_block_id, &self.config, ov.start, width);
                        Placement::Landed {
                            perfect: ov.is_perfect(),
                        }
                    }
                } else {
                    // Base block: placed wherever it is, unconditionally.
                    Self::push_block(stack, next_block_id, &self.config, m.x(), m.width());
                    Placement::Base
                }
            }
            Field::Grid { grid, mover } => {
                let Some(m) = mover.take() else {
                    log::warn!("drop rejected: no block in flight");
                    return Err(EngineError::InvalidTransition);
                };
                let row = grid.current_row();
                if row == 0 {
                    grid.paint_row(0, m.columns());
                    grid.advance_row();
                    Placement::Base
                } else {
                    let below = grid.lit_columns(row - 1);
                    let inter = column_overlap(m.columns(), &below);
                    if inter.is_empty() {
                        if self.powerups.has_extra_life() && self.powerups.consume_extra_life() {
                            // Rescue restores all lit columns of the row
                            // below, which on a wider-than-usual previous
                            // row can differ from the run that missed.
                            grid.paint_row(row, &below);
                            grid.advance_row();
                            Placement::Rescued
                        } else {
                            grid.clear_row(row);
                            Placement::Missed
                        }
                    } else {
                        let perfect = columns_match(m.columns(), &below);
                        grid.paint_row(row, &inter);
                        grid.advance_row();
                        Placement::Landed { perfect }
                    }
                }
            }
        };

        let (outcome, score_delta, perfect) = match placement {
            Placement::Missed => {
                self.phase = Phase::GameOver;
                let stats = self.stats();
                self.push_event(EngineEvent::SessionEnded { won: false, stats });
                log::info!(
                    "game over: level={} score={} blocks={}",
                    self.session.level(),
                    self.score,
                    self.blocks_placed
                );
                return Ok(DropOutcome::GameOver);
            }
            Placement::Base => (DropOutcome::Placed, self.config.normal_stack_score, false),
            Placement::Rescued => (
                DropOutcome::RescuedByExtraLife,
                self.config.normal_stack_score,
                false,
            ),
            Placement::Landed { perfect: true } => (
                DropOutcome::PlacedPerfect,
                self.config.perfect_stack_bonus,
                true,
            ),
            Placement::Landed { perfect: false } => {
                (DropOutcome::Placed, self.config.normal_stack_score, false)
            }
        };

        self.phase = Phase::NormalPlay;
        self.score += score_delta;
        self.blocks_placed += 1;
        if perfect {
            self.combo += 1;
            self.perfect_stacks += 1;
            self.highest_combo = self.highest_combo.max(self.combo);
        } else {
            self.combo = 0;
        }

        if matches!(placement, Placement::Rescued) {
            self.push_event(EngineEvent::Rescued);
        } else {
            self.push_event(EngineEvent::BlockPlaced {
                perfect,
                combo: self.combo,
                score_delta,
            });
        }

        if let Some(prize) = self.session.complete_level() {
            log::info!("prize triggered at level {}: {:?}", self.session.level(), prize);
            self.push_event(EngineEvent::PrizeTriggered(prize));
        }

        if self.session.mode() == GameMode::Classic
            && self.rows_placed() >= self.config.classic_rows
        {
            self.phase = Phase::Won;
            let stats = self.stats();
            self.push_event(EngineEvent::SessionEnded { won: true, stats });
            log::info!("session won: score={} blocks={}", self.score, self.blocks_placed);
            return Ok(DropOutcome::Won);
        }

        self.spawn_next();
        Ok(outcome)
    }

    /// Put a fresh moving block in flight, sized for the current level.
    ///
    /// Infinite-mode grid expansion happens here, atomically before the
    /// spawn, so a new row always has headroom. No-op if a block is
    /// already in flight or the run has ended.
    pub fn spawn_next(&mut self) {
        if self.phase.is_terminal() {
            return;
        }

        if self.session.mode() == GameMode::Infinite {
            let mut expanded = None;
            if let Field::Grid { grid, mover } = &mut self.field {
                if mover.is_none() && grid.needs_expansion(self.config.expansion_margin) {
                    let added = self.config.expansion_rows;
                    grid.expand(added);
                    log::debug!("grid expanded by {added} rows to {}", grid.rows());
                    expanded = Some(added);
                }
            }
            if let Some(added_rows) = expanded {
                self.push_event(EngineEvent::GridExpanded { added_rows });
            }
        }

        let blocks = self.session.blocks_per_row();
        match &mut self.field {
            Field::Continuous { stack, mover, .. } => {
                if mover.is_some() {
                    return;
                }
                let prev_width = stack
                    .last()
                    .map(|b| b.width)
                    .unwrap_or(self.config.base_block_width);
                let width = width_for_row(blocks, prev_width, &self.config);
                let (min_x, _) = self.config.travel_bounds(width);
                *mover = Some(ContinuousMover::new(width, min_x));
            }
            Field::Grid { grid, mover } => {
                if mover.is_some() {
                    return;
                }
                let m = GridMover::new(blocks);
                let row = grid.current_row();
                // Visible while moving, not just after the drop.
                grid.paint_row(row, m.columns());
                *mover = Some(m);
            }
        }
    }

    // --- collaborators ---------------------------------------------------

    /// Collect the pending prize, awarding its base coin amount to the
    /// ledger. Returns the amount awarded.
    ///
    /// Coin multipliers are applied by the currency side, never here. A
    /// second call without a new prize returns `NoPrizePending`, so
    /// double-award is impossible.
    pub fn acknowledge_prize(
        &mut self,
        ledger: &mut dyn CurrencyLedger,
    ) -> Result<u32, EngineError> {
        let Some(prize) = self.session.take_prize() else {
            log::warn!("acknowledge_prize with no prize pending");
            return Err(EngineError::NoPrizePending);
        };
        let coins = match prize {
            PrizeState::MajorPrize => self.config.major_prize_coins,
            _ => self.config.minor_prize_coins,
        };
        ledger.award(coins);
        log::info!("prize collected: {:?} ({coins} coins)", prize);
        Ok(coins)
    }

    /// Report the final tallies to the recorder. Only valid once the run
    /// has terminated; repeated calls record nothing further.
    pub fn finish_session(
        &mut self,
        recorder: &mut dyn StatsRecorder,
    ) -> Result<(), EngineError> {
        if !self.phase.is_terminal() {
            return Err(self.reject("finish_session"));
        }
        if !self.stats_recorded {
            recorder.record_game(&self.stats());
            self.stats_recorded = true;
        }
        Ok(())
    }

    // --- internals -------------------------------------------------------

    fn push_block(
        stack: &mut Vec<Block>,
        next_block_id: &mut u32,
        config: &EngineConfig,
        x: f32,
        width: f32,
    ) {
        let index = stack.len();
        stack.push(Block {
            id: *next_block_id,
            x,
            y: index as f32 * config.block_height,
            width,
            height: config.block_height,
            color_index: (index % config.color_count.max(1) as usize) as u8,
            is_moving: false,
        });
        *next_block_id = next_block_id.wrapping_add(1);
    }

    fn push_event(&mut self, event: EngineEvent) {
        if self.events.is_full() {
            // Host stopped draining; keep the most recent events.
            log::debug!("event queue full, dropping oldest");
            self.events.remove(0);
        }
        self.events.push(event);
    }

    fn reject(&self, op: &str) -> EngineError {
        log::warn!(
            "{op} rejected: phase={:?} paused={}",
            self.phase,
            self.paused
        );
        EngineError::InvalidTransition
    }
}
