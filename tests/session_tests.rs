//! Integration tests for level progression, prizes and grid expansion

use stacker_core::{
    CurrencyLedger, DropOutcome, EngineConfig, EngineError, EngineEvent, GameMode, Geometry,
    NoPowerUps, Phase, PrizeState, StackEngine,
};

#[derive(Default)]
struct FakeLedger {
    awarded: Vec<u32>,
}

impl CurrencyLedger for FakeLedger {
    fn award(&mut self, amount: u32) {
        self.awarded.push(amount);
    }
}

fn classic(geometry: Geometry) -> StackEngine<NoPowerUps> {
    let mut e = StackEngine::new(geometry, GameMode::Classic, EngineConfig::default(), NoPowerUps);
    e.start();
    e
}

fn infinite(geometry: Geometry) -> StackEngine<NoPowerUps> {
    let mut e = StackEngine::new(
        geometry,
        GameMode::Infinite,
        EngineConfig::default(),
        NoPowerUps,
    );
    e.start();
    e
}

/// Undisturbed drops always land; level advances one per drop.
fn drop_times(e: &mut StackEngine<NoPowerUps>, n: u32) {
    for _ in 0..n {
        e.drop().unwrap();
    }
}

#[test]
fn test_minor_prize_flow_through_engine() {
    let mut e = classic(Geometry::Continuous);
    drop_times(&mut e, 10);
    assert_eq!(e.level(), 11);
    assert_eq!(e.prize_state(), PrizeState::MinorPrize);
    assert!(matches!(
        e.take_events().last(),
        Some(EngineEvent::PrizeTriggered(PrizeState::MinorPrize))
    ));

    let mut ledger = FakeLedger::default();
    assert_eq!(e.acknowledge_prize(&mut ledger), Ok(50));
    assert_eq!(ledger.awarded, vec![50]);
    assert_eq!(e.prize_state(), PrizeState::None);

    // No double award.
    assert_eq!(
        e.acknowledge_prize(&mut ledger),
        Err(EngineError::NoPrizePending)
    );
    assert_eq!(ledger.awarded, vec![50]);
}

#[test]
fn test_major_prize_requires_minor_collected_first() {
    let mut e = classic(Geometry::Continuous);
    let mut ledger = FakeLedger::default();

    drop_times(&mut e, 10);
    e.acknowledge_prize(&mut ledger).unwrap();

    drop_times(&mut e, 4);
    assert_eq!(e.level(), 15);
    assert_eq!(e.prize_state(), PrizeState::MajorPrize);
    assert_eq!(e.acknowledge_prize(&mut ledger), Ok(150));
    assert_eq!(ledger.awarded, vec![50, 150]);

    // The final row both wins the run and leaves nothing pending.
    assert_eq!(e.drop().unwrap(), DropOutcome::Won);
    assert_eq!(e.prize_state(), PrizeState::None);
}

#[test]
fn test_unacknowledged_minor_blocks_major() {
    let mut e = classic(Geometry::Continuous);
    drop_times(&mut e, 14);
    assert_eq!(e.level(), 15);
    // Still the minor prize from level 11.
    assert_eq!(e.prize_state(), PrizeState::MinorPrize);
}

#[test]
fn test_forced_drop_cadence() {
    let mut e = classic(Geometry::Continuous);
    assert!(!e.should_apply_forced_drop());

    drop_times(&mut e, 5);
    assert_eq!(e.level(), 6);
    assert!(e.should_apply_forced_drop());

    drop_times(&mut e, 1);
    assert!(!e.should_apply_forced_drop());

    drop_times(&mut e, 4);
    assert_eq!(e.level(), 11);
    assert!(e.should_apply_forced_drop());
}

#[test]
fn test_infinite_mode_never_wins_or_pays_prizes() {
    let mut e = infinite(Geometry::Continuous);
    for _ in 0..20 {
        let outcome = e.drop().unwrap();
        assert_ne!(outcome, DropOutcome::Won);
    }
    assert_eq!(e.level(), 21);
    assert_eq!(e.phase(), Phase::NormalPlay);
    assert_eq!(e.prize_state(), PrizeState::None);

    let mut ledger = FakeLedger::default();
    assert_eq!(
        e.acknowledge_prize(&mut ledger),
        Err(EngineError::NoPrizePending)
    );
}

#[test]
fn test_infinite_grid_expansion_rebases_rows() {
    let mut e = infinite(Geometry::Grid);
    assert_eq!(e.grid().unwrap().rows(), 20);

    // Fifteen placements bring the cursor within the expansion margin.
    drop_times(&mut e, 15);

    let grid = e.grid().unwrap();
    assert_eq!(grid.rows(), 40);
    assert_eq!(grid.current_row(), 35);
    // Row 14 content (a two-column run at level 15) moved to index 34.
    assert_eq!(grid.lit_columns(34).as_slice(), &[0, 1]);
    assert!(grid.lit_columns(14).is_empty());
    // The next run is already painted above it.
    assert_eq!(grid.lit_columns(35).as_slice(), &[0]);

    assert!(matches!(
        e.take_events().last(),
        Some(EngineEvent::GridExpanded { added_rows: 20 })
    ));

    // Play continues seamlessly on the rebased grid: the single-column run
    // still overlaps the wider row below it.
    assert_eq!(e.drop().unwrap(), DropOutcome::Placed);
    assert_eq!(e.phase(), Phase::NormalPlay);
}

#[test]
fn test_reset_clears_prizes_and_progression() {
    let mut e = classic(Geometry::Continuous);
    drop_times(&mut e, 10);
    assert_eq!(e.prize_state(), PrizeState::MinorPrize);

    e.reset(GameMode::Classic);
    assert_eq!(e.level(), 1);
    assert_eq!(e.score(), 0);
    assert_eq!(e.prize_state(), PrizeState::None);
    assert!(e.take_events().is_empty());
    assert!(!e.should_apply_forced_drop());
}
