//! Shared helpers: a store wrapper that counts writes and can fail on demand.

#![allow(dead_code)]

use pickleball_bracket::store::{MatchStore, RosterStore, TournamentStore, UserDirectory};
use pickleball_bracket::{
    BracketEngine, BracketError, BracketMatch, BracketStore, MatchId, MemoryStore, Participant,
    Slot, StoreError, StoreTx, Tournament, TournamentId, TournamentStatus, User, UserId,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Wraps a `MemoryStore`; counts write calls (committed or not) and fails the
/// named write operation when armed.
#[derive(Default)]
pub struct ProbeStore {
    inner: MemoryStore,
    writes: AtomicUsize,
    fail_on: Mutex<Option<&'static str>>,
}

impl ProbeStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn reset_writes(&self) {
        self.writes.store(0, Ordering::SeqCst);
    }

    /// Make every later call to the write operation `op` fail.
    pub fn fail_on(&self, op: &'static str) {
        *self.fail_on.lock().unwrap() = Some(op);
    }
}

impl BracketStore for ProbeStore {
    fn with_transaction<T, F>(&self, f: F) -> Result<T, BracketError>
    where
        F: FnOnce(&mut dyn StoreTx) -> Result<T, BracketError>,
    {
        let fail_on = *self.fail_on.lock().unwrap();
        self.inner.with_transaction(|tx| {
            let mut probe = ProbeTx {
                inner: tx,
                writes: &self.writes,
                fail_on,
            };
            f(&mut probe)
        })
    }
}

struct ProbeTx<'a> {
    inner: &'a mut dyn StoreTx,
    writes: &'a AtomicUsize,
    fail_on: Option<&'static str>,
}

impl ProbeTx<'_> {
    fn write(&self, op: &'static str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_on == Some(op) {
            return Err(StoreError::Unavailable(format!("injected failure in {op}")));
        }
        Ok(())
    }
}

impl UserDirectory for ProbeTx<'_> {
    fn insert_user(&mut self, user: &User) -> Result<(), StoreError> {
        self.write("insert_user")?;
        self.inner.insert_user(user)
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.inner.get_user(id)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.inner.find_user_by_email(email)
    }
}

impl TournamentStore for ProbeTx<'_> {
    fn insert_tournament(&mut self, tournament: &Tournament) -> Result<(), StoreError> {
        self.write("insert_tournament")?;
        self.inner.insert_tournament(tournament)
    }

    fn get_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError> {
        self.inner.get_tournament(id)
    }

    fn list_tournaments(&self, limit: usize) -> Result<Vec<Tournament>, StoreError> {
        self.inner.list_tournaments(limit)
    }

    fn set_tournament_status(
        &mut self,
        id: TournamentId,
        status: TournamentStatus,
    ) -> Result<(), StoreError> {
        self.write("set_tournament_status")?;
        self.inner.set_tournament_status(id, status)
    }
}

impl RosterStore for ProbeTx<'_> {
    fn get_participants(&self, tournament_id: TournamentId) -> Result<Vec<Participant>, StoreError> {
        self.inner.get_participants(tournament_id)
    }

    fn insert_participant(&mut self, participant: &Participant) -> Result<(), StoreError> {
        self.write("insert_participant")?;
        self.inner.insert_participant(participant)
    }
}

impl MatchStore for ProbeTx<'_> {
    fn create_matches(&mut self, matches: &[BracketMatch]) -> Result<(), StoreError> {
        self.write("create_matches")?;
        self.inner.create_matches(matches)
    }

    fn get_match(&self, id: MatchId) -> Result<Option<BracketMatch>, StoreError> {
        self.inner.get_match(id)
    }

    fn list_matches(&self, tournament_id: TournamentId) -> Result<Vec<BracketMatch>, StoreError> {
        self.inner.list_matches(tournament_id)
    }

    fn set_match_winner(&mut self, id: MatchId, winner: UserId) -> Result<(), StoreError> {
        self.write("set_match_winner")?;
        self.inner.set_match_winner(id, winner)
    }

    fn set_player_slot(&mut self, id: MatchId, slot: Slot, player: UserId) -> Result<(), StoreError> {
        self.write("set_player_slot")?;
        self.inner.set_player_slot(id, slot, player)
    }
}

/// Admin plus a draft tournament with `n` players joined in order; returns
/// (tournament id, player ids by seed).
pub fn draft_with_players<S: BracketStore>(
    engine: &BracketEngine<S>,
    n: usize,
) -> (TournamentId, Vec<UserId>) {
    let admin = engine
        .register_user("Admin", &format!("admin-{}@example.com", uuid::Uuid::new_v4()))
        .unwrap();
    let t = engine.create_tournament("Spring Open", admin.id).unwrap();
    let players: Vec<UserId> = (0..n)
        .map(|i| {
            let u = engine
                .register_user(
                    &format!("P{}", i + 1),
                    &format!("p{}-{}@example.com", i + 1, uuid::Uuid::new_v4()),
                )
                .unwrap();
            engine.join_tournament(t.id, u.id).unwrap();
            u.id
        })
        .collect();
    (t.id, players)
}

/// Started tournament of `n` players on a plain memory store.
pub fn started(n: usize) -> (BracketEngine<MemoryStore>, TournamentId, Vec<UserId>) {
    let engine = BracketEngine::new(MemoryStore::new());
    let (tid, players) = draft_with_players(&engine, n);
    engine.start_tournament(tid).unwrap();
    (engine, tid, players)
}

/// The stored match at (`round`, `order`).
pub fn match_at<S: BracketStore>(
    engine: &BracketEngine<S>,
    tid: TournamentId,
    round: u32,
    order: u32,
) -> BracketMatch {
    let id = engine.bracket(tid).unwrap().find(round, order).unwrap().id;
    engine.get_match(id).unwrap()
}
