//! Integration tests for recording results and advancing winners.

mod common;

use common::{draft_with_players, match_at, started, ProbeStore};
use pickleball_bracket::{
    BracketEngine, BracketError, MatchState, MemoryStore, RecordOutcome, Slot, TournamentStatus,
};
use std::sync::{Arc, Barrier};
use std::thread;
use uuid::Uuid;

#[test]
fn winner_advances_into_successor_slot_only() {
    let (engine, tid, p) = started(8);
    let m1 = match_at(&engine, tid, 1, 1);
    let before = match_at(&engine, tid, 2, 1);

    let outcome = engine.record_winner(m1.id, p[0]).unwrap();
    assert_eq!(
        outcome,
        RecordOutcome::Advanced {
            next_match_id: before.id,
            slot: Slot::One
        }
    );

    let after = match_at(&engine, tid, 2, 1);
    assert_eq!(after.player1, Some(p[0]));
    assert_eq!(after.player2, before.player2);
    assert_eq!(after.winner, None);
    assert_eq!(match_at(&engine, tid, 1, 1).winner, Some(p[0]));
}

#[test]
fn even_order_fills_slot_two() {
    let (engine, tid, p) = started(8);
    let m4 = match_at(&engine, tid, 1, 4);
    engine.record_winner(m4.id, p[7]).unwrap();
    let r2 = match_at(&engine, tid, 2, 2);
    assert_eq!(r2.player1, None);
    assert_eq!(r2.player2, Some(p[7]));
}

#[test]
fn winner_not_in_match_is_rejected_without_writes() {
    let engine = BracketEngine::new(ProbeStore::default());
    let (tid, p) = draft_with_players(&engine, 4);
    engine.start_tournament(tid).unwrap();
    let m1 = match_at(&engine, tid, 1, 1);
    engine.store().reset_writes();

    for outsider in [p[2], Uuid::new_v4()] {
        assert_eq!(
            engine.record_winner(m1.id, outsider),
            Err(BracketError::InvalidWinner {
                match_id: m1.id,
                winner: outsider
            })
        );
    }
    assert_eq!(engine.store().writes(), 0);
    assert_eq!(match_at(&engine, tid, 1, 1).winner, None);
}

#[test]
fn unknown_match_is_not_found() {
    let (engine, _, p) = started(2);
    let id = Uuid::new_v4();
    assert_eq!(
        engine.record_winner(id, p[0]),
        Err(BracketError::MatchNotFound(id))
    );
}

#[test]
fn empty_later_round_match_rejects_any_winner() {
    let (engine, tid, p) = started(4);
    let fin = match_at(&engine, tid, 2, 1);
    assert_eq!(fin.state(), MatchState::Empty);
    assert!(matches!(
        engine.record_winner(fin.id, p[0]),
        Err(BracketError::InvalidWinner { .. })
    ));
}

#[test]
fn final_sets_only_its_own_winner() {
    let engine = BracketEngine::new(ProbeStore::default());
    let (tid, p) = draft_with_players(&engine, 2);
    engine.start_tournament(tid).unwrap();
    let fin = match_at(&engine, tid, 1, 1);
    engine.store().reset_writes();

    let outcome = engine.record_winner(fin.id, p[1]).unwrap();
    assert_eq!(
        outcome,
        RecordOutcome::BracketDecided {
            tournament_id: tid,
            champion: p[1]
        }
    );
    assert_eq!(engine.store().writes(), 1);
    assert_eq!(match_at(&engine, tid, 1, 1).winner, Some(p[1]));
}

#[test]
fn same_winner_again_is_unchanged_and_different_is_rejected() {
    let engine = BracketEngine::new(ProbeStore::default());
    let (tid, p) = draft_with_players(&engine, 4);
    engine.start_tournament(tid).unwrap();
    let m1 = match_at(&engine, tid, 1, 1);
    engine.record_winner(m1.id, p[0]).unwrap();
    engine.store().reset_writes();

    assert_eq!(
        engine.record_winner(m1.id, p[0]),
        Ok(RecordOutcome::Unchanged)
    );
    assert_eq!(
        engine.record_winner(m1.id, p[1]),
        Err(BracketError::WinnerAlreadyDecided {
            match_id: m1.id,
            winner: p[0]
        })
    );
    assert_eq!(engine.store().writes(), 0);
    assert_eq!(match_at(&engine, tid, 2, 1).player1, Some(p[0]));
}

#[test]
fn failed_propagation_rolls_back_the_winner() {
    let engine = BracketEngine::new(ProbeStore::default());
    let (tid, p) = draft_with_players(&engine, 4);
    engine.start_tournament(tid).unwrap();
    let m1 = match_at(&engine, tid, 1, 1);
    engine.store().fail_on("set_player_slot");

    assert!(matches!(
        engine.record_winner(m1.id, p[0]),
        Err(BracketError::Store(_))
    ));
    assert_eq!(match_at(&engine, tid, 1, 1).winner, None);
    assert_eq!(match_at(&engine, tid, 2, 1).player1, None);
}

#[test]
fn four_player_tournament_end_to_end() {
    let (engine, tid, p) = started(4);
    let m1 = match_at(&engine, tid, 1, 1);
    let m2 = match_at(&engine, tid, 1, 2);
    let fin = match_at(&engine, tid, 2, 1);
    assert_eq!((m1.player1, m1.player2), (Some(p[0]), Some(p[1])));
    assert_eq!((m2.player1, m2.player2), (Some(p[2]), Some(p[3])));
    assert_eq!((fin.player1, fin.player2, fin.next), (None, None, None));

    engine.record_winner(m1.id, p[0]).unwrap();
    assert_eq!(match_at(&engine, tid, 2, 1).player1, Some(p[0]));
    assert_eq!(match_at(&engine, tid, 2, 1).state(), MatchState::Ready);

    engine.record_winner(m2.id, p[3]).unwrap();
    assert_eq!(match_at(&engine, tid, 2, 1).player2, Some(p[3]));

    assert_eq!(
        engine.complete_tournament(tid),
        Err(BracketError::FinalUndecided(tid))
    );

    let outcome = engine.record_winner(fin.id, p[0]).unwrap();
    assert_eq!(
        outcome,
        RecordOutcome::BracketDecided {
            tournament_id: tid,
            champion: p[0]
        }
    );
    let bracket = engine.bracket(tid).unwrap();
    assert_eq!(bracket.champion.as_ref().map(|c| c.user_id), Some(p[0]));
    assert!(bracket.matches().all(|m| m.state == MatchState::Decided));

    // Status only moves on request.
    assert_eq!(
        engine.tournament(tid).unwrap().status,
        TournamentStatus::InProgress
    );
    engine.complete_tournament(tid).unwrap();
    assert_eq!(
        engine.tournament(tid).unwrap().status,
        TournamentStatus::Completed
    );
    assert!(matches!(
        engine.complete_tournament(tid),
        Err(BracketError::InvalidStatus { .. })
    ));
}

#[test]
fn concurrent_feeders_both_land_in_successor() {
    for _ in 0..50 {
        let (engine, tid, p) = started(8);
        let engine = Arc::new(engine);
        let m1 = match_at(&engine, tid, 1, 1);
        let m2 = match_at(&engine, tid, 1, 2);
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = [(m1.id, p[0]), (m2.id, p[3])]
            .into_iter()
            .map(|(match_id, winner)| {
                let engine = Arc::clone(&engine);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    engine.record_winner(match_id, winner)
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap().is_ok());
        }

        let r2 = match_at(&engine, tid, 2, 1);
        assert_eq!(r2.player1, Some(p[0]));
        assert_eq!(r2.player2, Some(p[3]));
    }
}

#[test]
fn concurrent_full_round_on_sixteen_players() {
    let (engine, tid, p) = started(16);
    let engine = Arc::new(engine);
    let round_one: Vec<_> = (1..=8).map(|o| match_at(&engine, tid, 1, o)).collect();
    let barrier = Arc::new(Barrier::new(round_one.len()));

    let handles: Vec<_> = round_one
        .iter()
        .map(|m| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            let (id, winner) = (m.id, m.player2.unwrap());
            thread::spawn(move || {
                barrier.wait();
                engine.record_winner(id, winner)
            })
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap().is_ok());
    }

    for order in 1..=4u32 {
        let m = match_at(&engine, tid, 2, order);
        let i = (order as usize - 1) * 4;
        assert_eq!(m.player1, Some(p[i + 1]));
        assert_eq!(m.player2, Some(p[i + 3]));
    }
}

#[test]
fn matches_belong_to_their_own_tournament() {
    let engine = BracketEngine::new(MemoryStore::new());
    let (a, _) = draft_with_players(&engine, 2);
    let (b, _) = draft_with_players(&engine, 4);
    engine.start_tournament(a).unwrap();
    engine.start_tournament(b).unwrap();
    assert_eq!(engine.bracket(a).unwrap().matches().count(), 1);
    assert_eq!(engine.bracket(b).unwrap().matches().count(), 3);
    assert!(engine
        .bracket(b)
        .unwrap()
        .matches()
        .all(|m| engine.get_match(m.id).unwrap().tournament_id == b));
}
