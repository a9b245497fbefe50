//! Coin ledger: the only path by which session logic touches the coin balance.
//!
//! Invariant: the stored balance stays within `0..=MAX_COINS`. Debits go through
//! [`CoinLedger::try_take`], credits through [`CoinLedger::add`].

use log::debug;

use crate::arcade::errors::ArcadeResult;
use crate::storage::{StatKey, StatStore};

/// Coin system limit.
pub const MAX_COINS: u32 = 9999;

/// Multiplier value meaning x1.0.
pub const MULTIPLIER_SCALE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinPolicy {
    /// Reward multiplier scaled by [`MULTIPLIER_SCALE`].
    pub multiplier: u32,
    /// Skip affordability checks and never debit.
    pub free_play: bool,
}

impl Default for CoinPolicy {
    fn default() -> Self {
        Self {
            multiplier: MULTIPLIER_SCALE,
            free_play: false,
        }
    }
}

pub struct CoinLedger<'s, S: StatStore + ?Sized> {
    store: &'s mut S,
    policy: CoinPolicy,
}

impl<'s, S: StatStore + ?Sized> CoinLedger<'s, S> {
    pub fn new(store: &'s mut S, policy: CoinPolicy) -> Self {
        Self { store, policy }
    }

    pub fn balance(&self) -> ArcadeResult<u32> {
        Ok(self.store.get(StatKey::Coins)?.min(MAX_COINS))
    }

    pub fn has_enough(&self, cost: u32) -> ArcadeResult<bool> {
        if self.policy.free_play {
            return Ok(true);
        }
        Ok(self.balance()? >= cost)
    }

    /// Debit `cost` if affordable. Returns false and leaves the balance untouched otherwise.
    pub fn try_take(&mut self, cost: u32) -> ArcadeResult<bool> {
        if self.policy.free_play {
            return Ok(true);
        }
        let balance = self.balance()?;
        if balance < cost {
            return Ok(false);
        }
        let remaining = balance - cost;
        self.store.set(StatKey::Coins, remaining)?;
        debug!("coins: took {} ({} -> {})", cost, balance, remaining);
        Ok(true)
    }

    /// Credit `amount`, then scale the whole new balance by the multiplier, then cap.
    ///
    /// The multiplier applies to the post-credit total, not only to `amount`.
    pub fn add(&mut self, amount: u32) -> ArcadeResult<u32> {
        let balance = self.balance()?;
        let mut total = balance as u64 + amount as u64;
        total = total.saturating_mul(self.policy.multiplier as u64) / MULTIPLIER_SCALE as u64;
        let capped = total.min(MAX_COINS as u64) as u32;
        self.store.set(StatKey::Coins, capped)?;
        debug!("coins: added {} ({} -> {})", amount, balance, capped);
        Ok(capped)
    }
}
