use core::fmt;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Stable identifier assigned at session creation. Ids are never reused,
/// even when seats are reordered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The table's players in seat order. Membership is fixed for the life of
/// a session; only names and seat order change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    seats: Vec<Player>,
}

impl Roster {
    pub const SEATS: usize = 4;

    /// Four players with placeholder names, ids 1 through 4.
    pub fn standard() -> Self {
        let seats = (1..=Self::SEATS as u8)
            .map(|id| Player::new(PlayerId(id), format!("Player {id}")))
            .collect();
        Self { seats }
    }

    pub fn with_names(names: &[String]) -> Result<Self, RosterError> {
        if names.len() != Self::SEATS {
            return Err(RosterError::WrongPlayerCount(names.len()));
        }
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(RosterError::EmptyName);
        }
        let seats = names
            .iter()
            .enumerate()
            .map(|(index, name)| Player::new(PlayerId(index as u8 + 1), name.trim()))
            .collect();
        Ok(Self { seats })
    }

    /// Rebuild a roster from serialized players, trusting their ids.
    pub fn from_players(players: Vec<Player>) -> Self {
        Self { seats: players }
    }

    pub fn players(&self) -> &[Player] {
        &self.seats
    }

    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.seats.iter().map(Player::id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.seats.iter().any(|player| player.id() == id)
    }

    pub fn name_of(&self, id: PlayerId) -> Option<&str> {
        self.seats
            .iter()
            .find(|player| player.id() == id)
            .map(Player::name)
    }

    pub fn id_by_name(&self, name: &str) -> Option<PlayerId> {
        self.seats
            .iter()
            .find(|player| player.name().eq_ignore_ascii_case(name))
            .map(Player::id)
    }

    /// The player seated first, i.e. the dealer at session start.
    pub fn first_seat(&self) -> PlayerId {
        self.seats[0].id()
    }

    /// The seat after `id`, wrapping around the table.
    pub fn next_after(&self, id: PlayerId) -> PlayerId {
        let index = self
            .seats
            .iter()
            .position(|player| player.id() == id)
            .expect("seat lookup for known player");
        self.seats[(index + 1) % self.seats.len()].id()
    }

    /// Everyone but `id`, in seat order.
    pub fn opponents_of(&self, id: PlayerId) -> Vec<PlayerId> {
        self.seats
            .iter()
            .map(Player::id)
            .filter(|other| *other != id)
            .collect()
    }

    pub fn rename(&mut self, id: PlayerId, name: &str) -> Result<(), RosterError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RosterError::EmptyName);
        }
        let player = self
            .seats
            .iter_mut()
            .find(|player| player.id() == id)
            .ok_or(RosterError::UnknownPlayer(id))?;
        player.name = trimmed.to_string();
        Ok(())
    }

    /// Reseat the table. `order` must list every current player exactly once.
    pub fn reorder(&mut self, order: &[PlayerId]) -> Result<(), RosterError> {
        if order.len() != self.seats.len() {
            return Err(RosterError::NotAPermutation);
        }
        let mut reordered = Vec::with_capacity(self.seats.len());
        for id in order {
            let player = self
                .seats
                .iter()
                .find(|player| player.id() == *id)
                .ok_or(RosterError::UnknownPlayer(*id))?;
            if reordered.iter().any(|seated: &Player| seated.id() == *id) {
                return Err(RosterError::NotAPermutation);
            }
            reordered.push(player.clone());
        }
        self.seats = reordered;
        Ok(())
    }

    /// Random seat draw before play starts.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.seats.shuffle(rng);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    UnknownPlayer(PlayerId),
    WrongPlayerCount(usize),
    NotAPermutation,
    EmptyName,
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::UnknownPlayer(id) => write!(f, "unknown player id: {id}"),
            RosterError::WrongPlayerCount(count) => {
                write!(f, "expected {} players, got {count}", Roster::SEATS)
            }
            RosterError::NotAPermutation => {
                write!(f, "seat order must list every player exactly once")
            }
            RosterError::EmptyName => write!(f, "player name must not be empty"),
        }
    }
}
