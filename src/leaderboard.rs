use crate::error::GameError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Lifetime totals for one player. Scores accumulate across matches and are
/// never reset or decremented.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerRecord {
    pub score: u32,
    pub games_won: u32,
}

/// Whether a registration created the player or found them already present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    Created,
    Existing,
}

/// One row of a leaderboard view.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PlayerRow {
    pub name: String,
    pub score: u32,
    pub games_won: u32,
}

/// Both orderings of the same rows, produced together so they can never
/// disagree about membership.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Standings {
    pub by_name: Vec<PlayerRow>,
    pub by_score: Vec<PlayerRow>,
    pub total_players: usize,
}

/// Cumulative cross-match stats, keyed by exact (case-sensitive) name.
#[derive(Debug, Default)]
pub struct Leaderboard {
    players: BTreeMap<String, PlayerRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a trimmed name, leaving an existing record untouched.
    pub fn register(&mut self, name: &str) -> Result<(String, Registration), GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::validation("Player name is required"));
        }
        let registration = if self.players.contains_key(name) {
            Registration::Existing
        } else {
            self.players
                .insert(name.to_string(), PlayerRecord::default());
            Registration::Created
        };
        Ok((name.to_string(), registration))
    }

    /// Auto-registration at match start. The caller has already validated
    /// the name, so this cannot fail.
    pub fn ensure(&mut self, name: &str) {
        self.players.entry(name.to_string()).or_default();
    }

    /// Posts a finished match: round wins accumulate into scores, and the
    /// strict winner gains a game. A drawn match awards no game to anyone.
    pub fn apply_match_result(&mut self, name1: &str, name2: &str, score1: u32, score2: u32) {
        self.players.entry(name1.to_string()).or_default().score += score1;
        self.players.entry(name2.to_string()).or_default().score += score2;
        if score1 > score2 {
            self.players.entry(name1.to_string()).or_default().games_won += 1;
        } else if score2 > score1 {
            self.players.entry(name2.to_string()).or_default().games_won += 1;
        }
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.get(name)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Read-only views: case-insensitive ascending name order, and descending
    /// score order. Both sorts are stable over the map's name order, so equal
    /// keys always come out the same way.
    pub fn standings(&self) -> Standings {
        let rows: Vec<PlayerRow> = self
            .players
            .iter()
            .map(|(name, record)| PlayerRow {
                name: name.clone(),
                score: record.score,
                games_won: record.games_won,
            })
            .collect();

        let mut by_name = rows.clone();
        by_name.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        let mut by_score = rows;
        by_score.sort_by(|a, b| b.score.cmp(&a.score));

        Standings {
            total_players: by_name.len(),
            by_name,
            by_score,
        }
    }
}
