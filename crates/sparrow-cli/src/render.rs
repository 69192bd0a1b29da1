use sparrow_core::game::history::ScoreDeltas;
use sparrow_core::game::session::SessionState;
use sparrow_core::model::player::Roster;

/// Standings table: seat, name, net total, dealer marker, and the live
/// streak summary when someone holds the winner role.
pub fn totals_table(state: &SessionState) -> String {
    let totals = state.totals();
    let mut out = String::new();
    for (seat, player) in state.roster().players().iter().enumerate() {
        let total = totals.get(&player.id()).copied().unwrap_or(0);
        out.push_str(&format!(
            "{:>2}  {:<16} {:>7}",
            seat + 1,
            player.name(),
            signed(total)
        ));
        if state.dealer().dealer() == player.id() {
            out.push_str(&format!(
                "  dealer x{}",
                state.dealer().consecutive_wins()
            ));
        }
        out.push('\n');
    }
    if let Some(winner) = state.streaks().current_winner() {
        let streaks: Vec<String> = state
            .roster()
            .players()
            .iter()
            .filter_map(|player| {
                let count = state.streaks().count(winner, player.id());
                (count > 0).then(|| format!("{} x{count}", player.name()))
            })
            .collect();
        let name = state.roster().name_of(winner).unwrap_or("?");
        if streaks.is_empty() {
            out.push_str(&format!("Current winner: {name}\n"));
        } else {
            out.push_str(&format!(
                "Current winner: {name} (la: {})\n",
                streaks.join(", ")
            ));
        }
    }
    for (payee, payer, amount) in state.ledger().entries() {
        let payee = state.roster().name_of(payee).unwrap_or("?");
        let payer = state.roster().name_of(payer).unwrap_or("?");
        out.push_str(&format!("{payer} owes {payee} {amount}\n"));
    }
    out
}

/// One line of per-player movements, in seat order.
pub fn deltas_line(roster: &Roster, deltas: &ScoreDeltas) -> String {
    let parts: Vec<String> = roster
        .players()
        .iter()
        .map(|player| {
            let delta = deltas.get(&player.id()).copied().unwrap_or(0);
            format!("{} {}", player.name(), signed(delta))
        })
        .collect();
    format!("{}\n", parts.join(", "))
}

/// The full action log, oldest first.
pub fn history_log(state: &SessionState) -> String {
    if state.history().is_empty() {
        return "No actions recorded.\n".to_string();
    }
    let mut out = String::new();
    for (index, entry) in state.history().iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", index + 1, entry.action));
        out.push_str(&format!(
            "     {}",
            deltas_line(state.roster(), &entry.score_deltas)
        ));
    }
    out
}

/// Seat order on one line, for reseat confirmations.
pub fn seating_line(roster: &Roster) -> String {
    let names: Vec<&str> = roster.players().iter().map(|player| player.name()).collect();
    format!("Seating: {}\n", names.join(" -> "))
}

fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}
