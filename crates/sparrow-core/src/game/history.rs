use crate::model::ledger::Ledger;
use crate::model::player::PlayerId;
use crate::model::streak::StreakCounts;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Net score movement per player produced by one action. Every player
/// appears, including those unaffected.
pub type ScoreDeltas = BTreeMap<PlayerId, i64>;

/// One undoable step: the complete engine state captured before the action
/// ran, the action described for display, and the per-player deltas it
/// produced. Entries are append-only; restore pops the newest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub ledger: Ledger,
    pub la_counts: StreakCounts,
    pub current_winner_id: Option<PlayerId>,
    pub dealer_id: PlayerId,
    pub consecutive_wins: u32,
    pub action: String,
    pub score_deltas: ScoreDeltas,
}

#[cfg(test)]
mod tests {
    use super::HistoryEntry;
    use crate::model::ledger::Ledger;
    use crate::model::player::PlayerId;
    use std::collections::BTreeMap;

    #[test]
    fn entry_roundtrips_through_json() {
        let mut ledger = Ledger::new();
        ledger.set_owed(PlayerId(1), PlayerId(2), 9);

        let entry = HistoryEntry {
            ledger,
            la_counts: BTreeMap::new(),
            current_winner_id: Some(PlayerId(1)),
            dealer_id: PlayerId(1),
            consecutive_wins: 2,
            action: "Alice wins off Bob (5 fan)".to_string(),
            score_deltas: BTreeMap::from([
                (PlayerId(1), 9),
                (PlayerId(2), -9),
                (PlayerId(3), 0),
                (PlayerId(4), 0),
            ]),
        };

        let json = serde_json::to_string(&entry).unwrap();
        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
