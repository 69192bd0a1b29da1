use crate::game::history::{HistoryEntry, ScoreDeltas};
use crate::game::scoring::{carried_total, CarryOver};
use crate::model::dealer::{DealerEdge, DealerState};
use crate::model::ledger::Ledger;
use crate::model::player::{PlayerId, Roster, RosterError};
use crate::model::streak::StreakTracker;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::debug;

/// Live state of one table session. Exactly one writer mutates it, one
/// action at a time; every mutating action records an undo snapshot
/// before it touches anything.
///
/// Player ids handed to the action methods must come from this session's
/// roster. An unknown id is a caller bug and panics; recoverable validation
/// (positive amounts, target selection) belongs to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    roster: Roster,
    ledger: Ledger,
    dealer: DealerState,
    streaks: StreakTracker,
    history: Vec<HistoryEntry>,
}

enum WinKind {
    Discard { loser: PlayerId },
    SelfDraw,
}

impl SessionState {
    pub fn new(roster: Roster) -> Self {
        let dealer = DealerState::new(roster.first_seat());
        Self {
            roster,
            ledger: Ledger::new(),
            dealer,
            streaks: StreakTracker::new(),
            history: Vec::new(),
        }
    }

    pub fn standard() -> Self {
        Self::new(Roster::standard())
    }

    pub(crate) fn from_parts(
        roster: Roster,
        ledger: Ledger,
        dealer: DealerState,
        streaks: StreakTracker,
        history: Vec<HistoryEntry>,
    ) -> Self {
        Self {
            roster,
            ledger,
            dealer,
            streaks,
            history,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn dealer(&self) -> &DealerState {
        &self.dealer
    }

    pub fn streaks(&self) -> &StreakTracker {
        &self.streaks
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Net position of every player. The values sum to zero.
    pub fn totals(&self) -> ScoreDeltas {
        self.roster
            .ids()
            .map(|id| (id, self.ledger.total_for(id)))
            .collect()
    }

    /// Discard win: `loser` pays the full settled amount.
    pub fn win_by_discard(&mut self, winner: PlayerId, loser: PlayerId, fan: u32) -> ScoreDeltas {
        self.require(winner);
        self.require(loser);
        assert!(winner != loser, "winner and loser must differ");
        let action = format!(
            "{} wins off {} ({fan} fan)",
            self.name(winner),
            self.name(loser)
        );
        self.settle_win(winner, fan, WinKind::Discard { loser }, action)
    }

    /// Self-draw win: every opponent pays its own settled amount.
    pub fn win_by_self_draw(&mut self, winner: PlayerId, fan: u32) -> ScoreDeltas {
        self.require(winner);
        let action = format!("{} self-draws ({fan} fan)", self.name(winner));
        self.settle_win(winner, fan, WinKind::SelfDraw, action)
    }

    fn settle_win(
        &mut self,
        winner: PlayerId,
        fan: u32,
        kind: WinKind,
        action: String,
    ) -> ScoreDeltas {
        assert!(fan > 0, "fan value must be positive");
        let entry = self.snapshot(&action);
        let before = self.totals();

        let opponents = match kind {
            WinKind::Discard { loser } => vec![loser],
            WinKind::SelfDraw => self.roster.opponents_of(winner),
        };

        let prior_winner = self.streaks.current_winner();
        let changeover = prior_winner.is_some_and(|prior| prior != winner);
        // The dethroned winner's claim on the new winner has to be read
        // before the changeover voids the rest of the book.
        let prev_on_old = match prior_winner {
            Some(old) if changeover => self.ledger.owed(old, winner),
            _ => 0,
        };
        if changeover {
            self.ledger.clear_for_changeover(winner, &opponents);
        }

        for &opponent in &opponents {
            let edge = DealerEdge::classify(winner, opponent, self.dealer.dealer());
            let base = if edge.applies() {
                fan + self.dealer.win_bonus()
            } else {
                fan
            };
            let existing = self.ledger.owed(winner, opponent);

            if prior_winner == Some(winner) && existing > 0 {
                let carry = CarryOver::Continuing { prev: existing };
                self.ledger
                    .set_owed(winner, opponent, carried_total(base, carry));
            } else if changeover && prior_winner == Some(opponent) && prev_on_old > 0 {
                // The spared debt flips direction here; drop the old entry
                // so only one side of the pair stays nonzero.
                self.ledger.clear_pair(opponent, winner);
                let carry = CarryOver::Dethroned { prev_on_old };
                self.ledger
                    .set_owed(winner, opponent, carried_total(base, carry));
            } else {
                self.ledger.credit(winner, opponent, base);
            }
        }

        self.streaks.record_win(winner, &opponents);
        self.dealer.advance(winner, &self.roster);

        self.finish(entry, before)
    }

    /// Flat side payment: every opponent pays `amount` to `player`.
    pub fn special_collect(&mut self, player: PlayerId, amount: u32) -> ScoreDeltas {
        self.require(player);
        assert!(amount > 0, "amount must be positive");
        let action = format!("{} collects {amount} from each player", self.name(player));
        let entry = self.snapshot(&action);
        let before = self.totals();
        for opponent in self.roster.opponents_of(player) {
            self.ledger.credit(player, opponent, amount);
        }
        self.finish(entry, before)
    }

    /// Flat side payment: `player` pays `amount` to every opponent.
    pub fn special_pay(&mut self, player: PlayerId, amount: u32) -> ScoreDeltas {
        self.require(player);
        assert!(amount > 0, "amount must be positive");
        let action = format!("{} pays {amount} to each player", self.name(player));
        let entry = self.snapshot(&action);
        let before = self.totals();
        for opponent in self.roster.opponents_of(player) {
            self.ledger.credit(opponent, player, amount);
        }
        self.finish(entry, before)
    }

    /// False-win penalty: `player` pays each listed opponent its amount.
    /// Zero amounts are allowed and transfer nothing.
    pub fn special_false_win(
        &mut self,
        player: PlayerId,
        payouts: &BTreeMap<PlayerId, u32>,
    ) -> ScoreDeltas {
        self.require(player);
        for opponent in payouts.keys() {
            self.require(*opponent);
            assert!(*opponent != player, "false win cannot pay the player itself");
        }
        let action = format!("{} pays out a false win", self.name(player));
        let entry = self.snapshot(&action);
        let before = self.totals();
        for (&opponent, &amount) in payouts {
            self.ledger.credit(opponent, player, amount);
        }
        self.finish(entry, before)
    }

    /// Manual dealer override; always restarts the dealer run at 1.
    pub fn set_dealer(&mut self, player: PlayerId) {
        self.require(player);
        let action = format!("Dealer set to {}", self.name(player));
        let entry = self.snapshot(&action);
        let before = self.totals();
        self.dealer.set(player);
        self.finish(entry, before);
    }

    /// Buy out of a long streak: clears the (current winner, loser) count
    /// and the matching debt, leaving every other pairing alone. Returns
    /// false, changing nothing, when the streak is below the threshold.
    pub fn surrender(&mut self, loser: PlayerId) -> bool {
        self.require(loser);
        if !self.streaks.is_surrenderable(loser) {
            return false;
        }
        let winner = self
            .streaks
            .current_winner()
            .expect("surrenderable streak has a current winner");
        let action = format!("{} surrenders to {}", self.name(loser), self.name(winner));
        let entry = self.snapshot(&action);
        let before = self.totals();
        self.streaks.clear_pair(winner, loser);
        self.ledger.clear_pair(winner, loser);
        self.finish(entry, before);
        true
    }

    /// Undo exactly the most recent mutating action. Returns false when
    /// there is nothing to undo.
    pub fn restore_last(&mut self) -> bool {
        let Some(entry) = self.history.pop() else {
            return false;
        };
        debug!(action = %entry.action, "restoring pre-action state");
        self.ledger = entry.ledger;
        self.streaks = StreakTracker::from_parts(entry.current_winner_id, entry.la_counts);
        self.dealer = DealerState::from_parts(entry.dealer_id, entry.consecutive_wins);
        true
    }

    /// Back to a fresh session: scores, streaks, dealer, and history all
    /// return to their initial values; players keep their ids and names.
    pub fn reset(&mut self) {
        debug!("resetting session");
        self.ledger = Ledger::new();
        self.streaks.reset();
        self.dealer = DealerState::new(self.roster.first_seat());
        self.history.clear();
    }

    pub fn rename_player(&mut self, id: PlayerId, name: &str) -> Result<(), RosterError> {
        self.roster.rename(id, name)
    }

    /// Reseat the table. Seating only affects future dealer rotation; it
    /// is not an undoable scoring action.
    pub fn reorder_seats(&mut self, order: &[PlayerId]) -> Result<(), RosterError> {
        self.roster.reorder(order)
    }

    /// Random seat draw.
    pub fn shuffle_seats<R: Rng>(&mut self, rng: &mut R) {
        self.roster.shuffle(rng);
    }

    fn require(&self, id: PlayerId) {
        assert!(self.roster.contains(id), "unknown player id {id}");
    }

    fn name(&self, id: PlayerId) -> String {
        self.roster
            .name_of(id)
            .expect("name lookup for known player")
            .to_string()
    }

    fn snapshot(&self, action: &str) -> HistoryEntry {
        HistoryEntry {
            ledger: self.ledger.clone(),
            la_counts: self.streaks.counts().clone(),
            current_winner_id: self.streaks.current_winner(),
            dealer_id: self.dealer.dealer(),
            consecutive_wins: self.dealer.consecutive_wins(),
            action: action.to_string(),
            score_deltas: ScoreDeltas::new(),
        }
    }

    fn finish(&mut self, mut entry: HistoryEntry, before: ScoreDeltas) -> ScoreDeltas {
        let after = self.totals();
        let deltas: ScoreDeltas = after
            .iter()
            .map(|(id, total)| (*id, total - before.get(id).copied().unwrap_or(0)))
            .collect();
        debug!(action = %entry.action, ?deltas, "action applied");
        entry.score_deltas = deltas.clone();
        self.history.push(entry);
        deltas
    }
}
