use crate::game::history::HistoryEntry;
use crate::game::session::SessionState;
use crate::model::dealer::DealerState;
use crate::model::ledger::Ledger;
use crate::model::player::{Player, PlayerId, Roster};
use crate::model::streak::{StreakCounts, StreakTracker};
use serde::{Deserialize, Serialize};

/// Serializable image of a whole session, including the undo history.
/// Restoring a snapshot reproduces identical derived totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub players: Vec<Player>,
    pub ledger: Ledger,
    pub la_counts: StreakCounts,
    pub current_winner_id: Option<PlayerId>,
    pub dealer_id: PlayerId,
    pub consecutive_wins: u32,
    pub history: Vec<HistoryEntry>,
}

impl SessionSnapshot {
    pub fn capture(state: &SessionState) -> Self {
        SessionSnapshot {
            players: state.roster().players().to_vec(),
            ledger: state.ledger().clone(),
            la_counts: state.streaks().counts().clone(),
            current_winner_id: state.streaks().current_winner(),
            dealer_id: state.dealer().dealer(),
            consecutive_wins: state.dealer().consecutive_wins(),
            history: state.history().to_vec(),
        }
    }

    pub fn restore(self) -> SessionState {
        let roster = Roster::from_players(self.players);
        let streaks = StreakTracker::from_parts(self.current_winner_id, self.la_counts);
        let dealer = DealerState::from_parts(self.dealer_id, self.consecutive_wins);
        SessionState::from_parts(roster, self.ledger, dealer, streaks, self.history)
    }

    pub fn to_json(state: &SessionState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
