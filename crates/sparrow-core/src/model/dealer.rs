use crate::model::player::{PlayerId, Roster};

/// Dealer seat plus the dealer's consecutive-win run. The run is always at
/// least 1; it resets whenever the seat changes hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerState {
    dealer: PlayerId,
    consecutive_wins: u32,
}

impl DealerState {
    pub fn new(dealer: PlayerId) -> Self {
        Self {
            dealer,
            consecutive_wins: 1,
        }
    }

    pub fn from_parts(dealer: PlayerId, consecutive_wins: u32) -> Self {
        Self {
            dealer,
            consecutive_wins: consecutive_wins.max(1),
        }
    }

    pub fn dealer(&self) -> PlayerId {
        self.dealer
    }

    pub fn consecutive_wins(&self) -> u32 {
        self.consecutive_wins
    }

    /// Bonus granted when the dealer seat is on either side of a win:
    /// 1 for the first dealer win, then 3, 5, ...
    pub fn win_bonus(&self) -> u32 {
        2 * self.consecutive_wins - 1
    }

    /// Advance after a resolved win. The dealer keeps the seat by winning;
    /// any other winner passes the seat to the next player at the table.
    pub fn advance(&mut self, winner: PlayerId, roster: &Roster) {
        if winner == self.dealer {
            self.consecutive_wins += 1;
        } else {
            self.dealer = roster.next_after(self.dealer);
            self.consecutive_wins = 1;
        }
    }

    /// Manual override for a dealer change outside the win sequence.
    pub fn set(&mut self, dealer: PlayerId) {
        self.dealer = dealer;
        self.consecutive_wins = 1;
    }
}

/// Which side of a settled pairing holds the dealer seat. The two player
/// cases are mutually exclusive because there is a single dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerEdge {
    WinnerIsDealer,
    OpponentIsDealer,
    Neither,
}

impl DealerEdge {
    pub fn classify(winner: PlayerId, opponent: PlayerId, dealer: PlayerId) -> Self {
        if winner == dealer {
            DealerEdge::WinnerIsDealer
        } else if opponent == dealer {
            DealerEdge::OpponentIsDealer
        } else {
            DealerEdge::Neither
        }
    }

    pub fn applies(&self) -> bool {
        !matches!(self, DealerEdge::Neither)
    }
}

#[cfg(test)]
mod tests {
    use super::{DealerEdge, DealerState};
    use crate::model::player::{PlayerId, Roster};

    #[test]
    fn dealer_win_extends_the_run() {
        let roster = Roster::standard();
        let mut state = DealerState::new(PlayerId(1));

        state.advance(PlayerId(1), &roster);
        assert_eq!(state.dealer(), PlayerId(1));
        assert_eq!(state.consecutive_wins(), 2);
    }

    #[test]
    fn other_winner_passes_seat_to_next_player() {
        let roster = Roster::standard();
        let mut state = DealerState::new(PlayerId(1));
        state.advance(PlayerId(1), &roster);

        // Player 3 wins but the seat still moves to player 2.
        state.advance(PlayerId(3), &roster);
        assert_eq!(state.dealer(), PlayerId(2));
        assert_eq!(state.consecutive_wins(), 1);
    }

    #[test]
    fn seat_passes_along_current_seating_order() {
        let mut roster = Roster::standard();
        roster
            .reorder(&[PlayerId(4), PlayerId(2), PlayerId(1), PlayerId(3)])
            .unwrap();
        let mut state = DealerState::new(PlayerId(2));
        state.advance(PlayerId(3), &roster);
        assert_eq!(state.dealer(), PlayerId(1));
    }

    #[test]
    fn win_bonus_is_two_n_minus_one() {
        let roster = Roster::standard();
        let mut state = DealerState::new(PlayerId(1));
        assert_eq!(state.win_bonus(), 1);
        state.advance(PlayerId(1), &roster);
        assert_eq!(state.win_bonus(), 3);
        state.advance(PlayerId(1), &roster);
        assert_eq!(state.win_bonus(), 5);
    }

    #[test]
    fn manual_override_resets_the_run() {
        let roster = Roster::standard();
        let mut state = DealerState::new(PlayerId(1));
        state.advance(PlayerId(1), &roster);
        state.set(PlayerId(4));
        assert_eq!(state.dealer(), PlayerId(4));
        assert_eq!(state.consecutive_wins(), 1);
    }

    #[test]
    fn from_parts_clamps_zero_runs() {
        let state = DealerState::from_parts(PlayerId(2), 0);
        assert_eq!(state.consecutive_wins(), 1);
    }

    #[test]
    fn edge_classification_is_exclusive() {
        let dealer = PlayerId(2);
        assert_eq!(
            DealerEdge::classify(PlayerId(2), PlayerId(3), dealer),
            DealerEdge::WinnerIsDealer
        );
        assert_eq!(
            DealerEdge::classify(PlayerId(1), PlayerId(2), dealer),
            DealerEdge::OpponentIsDealer
        );
        assert_eq!(
            DealerEdge::classify(PlayerId(1), PlayerId(3), dealer),
            DealerEdge::Neither
        );
        assert!(!DealerEdge::classify(PlayerId(1), PlayerId(3), dealer).applies());
    }
}
