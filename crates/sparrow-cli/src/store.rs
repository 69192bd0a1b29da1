use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sparrow_core::game::serialization::SessionSnapshot;
use sparrow_core::game::session::SessionState;

/// Persistence is a best-effort side channel: the engine state lives in the
/// session file between invocations, and a failed write never corrupts the
/// scores already recorded there.
pub fn load(path: &Path) -> Result<SessionState> {
    let json = fs::read_to_string(path).with_context(|| {
        format!(
            "reading session file {} (run `new` to start a session)",
            path.display()
        )
    })?;
    let snapshot: SessionSnapshot = serde_json::from_str(&json)
        .with_context(|| format!("parsing session file {}", path.display()))?;
    Ok(snapshot.restore())
}

pub fn save(path: &Path, state: &SessionState) -> Result<()> {
    let json = serde_json::to_string_pretty(&SessionSnapshot::capture(state))
        .context("serializing session")?;
    fs::write(path, json).with_context(|| format!("writing session file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load, save};
    use sparrow_core::game::session::SessionState;
    use sparrow_core::model::player::PlayerId;

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut state = SessionState::standard();
        state.win_by_discard(PlayerId(1), PlayerId(2), 5);
        save(&path, &state).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }
}
