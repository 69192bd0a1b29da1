use crate::model::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pairwise debt book. `owed[payee][payer]` is the net amount `payer`
/// currently owes `payee`. For any pair at most one direction is nonzero;
/// zero entries are never stored, so two ledgers with equal balances
/// compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    owed: BTreeMap<PlayerId, BTreeMap<PlayerId, u32>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owed(&self, payee: PlayerId, payer: PlayerId) -> u32 {
        self.owed
            .get(&payee)
            .and_then(|debts| debts.get(&payer))
            .copied()
            .unwrap_or(0)
    }

    /// Overwrite the amount `payer` owes `payee`.
    pub fn set_owed(&mut self, payee: PlayerId, payer: PlayerId, amount: u32) {
        if amount == 0 {
            if let Some(debts) = self.owed.get_mut(&payee) {
                debts.remove(&payer);
                if debts.is_empty() {
                    self.owed.remove(&payee);
                }
            }
        } else {
            self.owed.entry(payee).or_default().insert(payer, amount);
        }
    }

    /// Increase what `payer` owes `payee`, netting against any debt in the
    /// opposite direction first so the one-direction invariant holds.
    pub fn credit(&mut self, payee: PlayerId, payer: PlayerId, amount: u32) {
        if amount == 0 {
            return;
        }
        let reverse = self.owed(payer, payee);
        if reverse >= amount {
            self.set_owed(payer, payee, reverse - amount);
        } else {
            self.set_owed(payer, payee, 0);
            let forward = self.owed(payee, payer);
            self.set_owed(payee, payer, forward + (amount - reverse));
        }
    }

    /// Net position: credits held minus debts owed.
    pub fn total_for(&self, player: PlayerId) -> i64 {
        let credits: i64 = self
            .owed
            .get(&player)
            .map(|debts| debts.values().map(|amount| i64::from(*amount)).sum())
            .unwrap_or(0);
        let debts: i64 = self
            .owed
            .iter()
            .filter(|(payee, _)| **payee != player)
            .filter_map(|(_, debts)| debts.get(&player))
            .map(|amount| i64::from(*amount))
            .sum();
        credits - debts
    }

    /// Changeover voiding: every entry is zeroed except debts owed to the
    /// new `winner` and the winner's own debts to this event's `opponents`,
    /// which the settlement consumes immediately afterwards.
    pub fn clear_for_changeover(&mut self, winner: PlayerId, opponents: &[PlayerId]) {
        self.owed.retain(|payee, debts| {
            if *payee == winner {
                return true;
            }
            if opponents.contains(payee) {
                debts.retain(|payer, _| *payer == winner);
                return !debts.is_empty();
            }
            false
        });
    }

    pub fn clear_pair(&mut self, payee: PlayerId, payer: PlayerId) {
        self.set_owed(payee, payer, 0);
    }

    pub fn is_empty(&self) -> bool {
        self.owed.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (PlayerId, PlayerId, u32)> + '_ {
        self.owed.iter().flat_map(|(payee, debts)| {
            debts
                .iter()
                .map(move |(payer, amount)| (*payee, *payer, *amount))
        })
    }
}
