//! Process-wide counters for arcade sessions.
//! Read by the CLI's debug output and by tests; nothing is exported over the network.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};

static SESSIONS_DECLINED: AtomicU64 = AtomicU64::new(0);
static HIGH_SCORE_REPAIRS: AtomicU64 = AtomicU64::new(0);

static CABINETS: OnceLock<Mutex<HashMap<&'static str, CabinetTally>>> = OnceLock::new();

/// A play request that the gate turned away (disabled, locked, short on coins, no coin case).
pub fn inc_session_declined() {
    SESSIONS_DECLINED.fetch_add(1, Ordering::Relaxed);
}

/// A stored high score above the ceiling was reset to zero.
pub fn inc_high_score_repairs() {
    HIGH_SCORE_REPAIRS.fetch_add(1, Ordering::Relaxed);
}

/// Coin flow through one minigame cabinet.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CabinetTally {
    pub sessions_started: u64,
    pub sessions_settled: u64,
    /// Entry fees actually debited (zero under free play).
    pub coins_taken: u64,
    /// Rewards credited before the balance multiplier.
    pub coins_paid: u64,
}

impl CabinetTally {
    /// Coins the cabinet has kept (positive) or given away (negative).
    pub fn house_edge(&self) -> i64 {
        self.coins_taken as i64 - self.coins_paid as i64
    }
}

fn cabinets() -> MutexGuard<'static, HashMap<&'static str, CabinetTally>> {
    // Counters stay usable after a panicking holder; they are plain integers.
    CABINETS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn record_session_entry(slug: &'static str, fee: u32) -> CabinetTally {
    let mut guard = cabinets();
    let tally = guard.entry(slug).or_default();
    tally.sessions_started = tally.sessions_started.saturating_add(1);
    tally.coins_taken = tally.coins_taken.saturating_add(fee as u64);
    *tally
}

pub fn record_session_settled(slug: &'static str, reward: u32) -> CabinetTally {
    let mut guard = cabinets();
    let tally = guard.entry(slug).or_default();
    tally.sessions_settled = tally.sessions_settled.saturating_add(1);
    tally.coins_paid = tally.coins_paid.saturating_add(reward as u64);
    *tally
}

pub fn cabinet_tallies() -> HashMap<&'static str, CabinetTally> {
    cabinets().clone()
}

#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    pub sessions_declined: u64,
    pub high_score_repairs: u64,
    pub sessions_started: u64,
    pub sessions_settled: u64,
    pub coins_taken: u64,
    pub coins_paid: u64,
}

pub fn snapshot() -> Snapshot {
    let mut snap = Snapshot {
        sessions_declined: SESSIONS_DECLINED.load(Ordering::Relaxed),
        high_score_repairs: HIGH_SCORE_REPAIRS.load(Ordering::Relaxed),
        ..Snapshot::default()
    };
    for tally in cabinets().values() {
        snap.sessions_started += tally.sessions_started;
        snap.sessions_settled += tally.sessions_settled;
        snap.coins_taken += tally.coins_taken;
        snap.coins_paid += tally.coins_paid;
    }
    snap
}
