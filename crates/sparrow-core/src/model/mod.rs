pub mod dealer;
pub mod ledger;
pub mod player;
pub mod streak;

pub use dealer::{DealerEdge, DealerState};
pub use ledger::Ledger;
pub use player::{Player, PlayerId, Roster, RosterError};
pub use streak::{StreakCounts, StreakTracker, SURRENDER_THRESHOLD};
