pub mod history;
pub mod scoring;
pub mod serialization;
pub mod session;

pub use history::{HistoryEntry, ScoreDeltas};
pub use serialization::SessionSnapshot;
pub use session::SessionState;
