//! Game session - level progression, prizes and the forced-drop hook
//!
//! Owns everything derived from the level counter: block count, speed,
//! alignment tolerance, the Classic-mode prize thresholds and the
//! forced-drop cadence. The engine calls [`GameSession::complete_level`]
//! after every successful placement.

use crate::difficulty;
use crate::types::*;

/// Per-run progression state, recreated on every new game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    mode: GameMode,
    level: u32,
    blocks_per_row: u8,
    speed: f32,
    alignment_tolerance: f32,
    prize_state: PrizeState,
    forced_drop_counter: u32,
    forced_drop_pending: bool,
}

impl GameSession {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            level: 1,
            blocks_per_row: difficulty::blocks_per_row(1, mode),
            speed: difficulty::speed(1, mode),
            alignment_tolerance: difficulty::alignment_tolerance(1, mode),
            prize_state: PrizeState::None,
            forced_drop_counter: 0,
            forced_drop_pending: false,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn blocks_per_row(&self) -> u8 {
        self.blocks_per_row
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn alignment_tolerance(&self) -> f32 {
        self.alignment_tolerance
    }

    pub fn prize_state(&self) -> PrizeState {
        self.prize_state
    }

    /// Hook for a mechanic the product never wired up: the counter fires
    /// every [`FORCED_DROP_INTERVAL`] levels and this getter reports it,
    /// but nothing in the engine applies an effect.
    pub fn should_apply_forced_drop(&self) -> bool {
        self.forced_drop_pending
    }

    /// Advance to the next level and recompute every derived field.
    ///
    /// Returns the prize triggered by this level crossing, if any. A prize
    /// already pending blocks new triggers until it is acknowledged.
    pub fn complete_level(&mut self) -> Option<PrizeState> {
        self.level += 1;
        self.blocks_per_row = difficulty::blocks_per_row(self.level, self.mode);
        self.speed = difficulty::speed(self.level, self.mode);
        self.alignment_tolerance = difficulty::alignment_tolerance(self.level, self.mode);

        self.forced_drop_counter += 1;
        if self.forced_drop_counter >= FORCED_DROP_INTERVAL {
            self.forced_drop_counter = 0;
            self.forced_drop_pending = true;
        } else {
            self.forced_drop_pending = false;
        }

        if self.mode == GameMode::Classic && self.prize_state == PrizeState::None {
            let triggered = match self.level {
                MINOR_PRIZE_LEVEL => Some(PrizeState::MinorPrize),
                MAJOR_PRIZE_LEVEL => Some(PrizeState::MajorPrize),
                _ => None,
            };
            if let Some(prize) = triggered {
                self.prize_state = prize;
                return Some(prize);
            }
        }
        None
    }

    /// Take the pending prize, resetting the state to `None`.
    ///
    /// Returns `None` when nothing is pending, which makes double-award
    /// impossible even if the caller invokes acknowledgement twice.
    pub fn take_prize(&mut self) -> Option<PrizeState> {
        match self.prize_state {
            PrizeState::None => None,
            prize => {
                self.prize_state = PrizeState::None;
                Some(prize)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_level(session: &mut GameSession, level: u32) {
        while session.level() < level {
            session.complete_level();
        }
    }

    #[test]
    fn new_session_starts_at_level_one() {
        let s = GameSession::new(GameMode::Classic);
        assert_eq!(s.level(), 1);
        assert_eq!(s.blocks_per_row(), 3);
        assert_eq!(s.speed(), BASE_SPEED);
        assert_eq!(s.prize_state(), PrizeState::None);
        assert!(!s.should_apply_forced_drop());
    }

    #[test]
    fn derived_fields_follow_the_curve() {
        let mut s = GameSession::new(GameMode::Classic);
        run_to_level(&mut s, 10);
        assert_eq!(s.blocks_per_row(), 1);
        assert!((s.speed() - 3.525).abs() < 1e-6);
    }

    #[test]
    fn blocks_per_row_never_increases_within_a_run() {
        let mut s = GameSession::new(GameMode::Infinite);
        let mut prev = s.blocks_per_row();
        for _ in 0..40 {
            s.complete_level();
            assert!(s.blocks_per_row() <= prev);
            prev = s.blocks_per_row();
        }
    }

    #[test]
    fn minor_prize_fires_at_exact_threshold() {
        let mut s = GameSession::new(GameMode::Classic);
        run_to_level(&mut s, 10);
        assert_eq!(s.prize_state(), PrizeState::None);

        let triggered = s.complete_level();
        assert_eq!(s.level(), MINOR_PRIZE_LEVEL);
        assert_eq!(triggered, Some(PrizeState::MinorPrize));
        assert_eq!(s.prize_state(), PrizeState::MinorPrize);
    }

    #[test]
    fn unacknowledged_prize_blocks_the_next_threshold() {
        let mut s = GameSession::new(GameMode::Classic);
        run_to_level(&mut s, MAJOR_PRIZE_LEVEL);
        // The minor prize from level 11 is still pending.
        assert_eq!(s.prize_state(), PrizeState::MinorPrize);

        assert_eq!(s.take_prize(), Some(PrizeState::MinorPrize));
        assert_eq!(s.take_prize(), None);
    }

    #[test]
    fn major_prize_fires_once_minor_is_collected() {
        let mut s = GameSession::new(GameMode::Classic);
        run_to_level(&mut s, MINOR_PRIZE_LEVEL);
        s.take_prize();
        run_to_level(&mut s, MAJOR_PRIZE_LEVEL);
        assert_eq!(s.prize_state(), PrizeState::MajorPrize);
    }

    #[test]
    fn infinite_mode_never_triggers_prizes() {
        let mut s = GameSession::new(GameMode::Infinite);
        for _ in 0..30 {
            assert_eq!(s.complete_level(), None);
        }
        assert_eq!(s.prize_state(), PrizeState::None);
    }

    #[test]
    fn forced_drop_fires_every_five_levels() {
        let mut s = GameSession::new(GameMode::Classic);
        let mut fired_at = Vec::new();
        for _ in 0..15 {
            s.complete_level();
            if s.should_apply_forced_drop() {
                fired_at.push(s.level());
            }
        }
        assert_eq!(fired_at, vec![6, 11, 16]);
    }
}
