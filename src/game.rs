use crate::choice::Choice;
use crate::error::GameError;
use serde::Serialize;
use std::cmp::Ordering;

/// Every match runs exactly this many rounds.
pub const ROUNDS_TOTAL: u32 = 10;

/// How a single exchange of choices fell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Player1,
    Player2,
    Tie,
}

/// Resolves one exchange. Equal choices tie; otherwise exactly one side wins.
pub fn resolve(choice1: Choice, choice2: Choice) -> RoundOutcome {
    if choice1 == choice2 {
        RoundOutcome::Tie
    } else if choice1.beats(choice2) {
        RoundOutcome::Player1
    } else {
        RoundOutcome::Player2
    }
}

/// Everything a played round reports back, including match completion.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RoundReport {
    pub round_number: u32,
    pub player1_choice: Choice,
    pub player2_choice: Choice,
    pub round_winner: String,
    pub player1_score: u32,
    pub player2_score: u32,
    pub game_complete: bool,
    pub game_winner: Option<String>,
    pub last_winner: Option<String>,
}

/// Read-only view of the match fields.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    pub player1: String,
    pub player2: String,
    pub player1_score: u32,
    pub player2_score: u32,
    pub round_number: u32,
    pub game_active: bool,
    pub last_winner: Option<String>,
}

/// The single current match. A fresh value is inactive with empty names;
/// `start` overwrites everything, and the final round deactivates it until
/// the next `start`.
#[derive(Clone, Debug, Default)]
pub struct Game {
    player1: String,
    player2: String,
    player1_score: u32,
    player2_score: u32,
    round_number: u32,
    active: bool,
    last_winner: Option<String>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every field for a fresh match. Names must already be validated;
    /// any prior match is discarded without being archived.
    pub fn start(&mut self, player1: &str, player2: &str) {
        self.player1 = player1.to_string();
        self.player2 = player2.to_string();
        self.player1_score = 0;
        self.player2_score = 0;
        self.round_number = 0;
        self.active = true;
        self.last_winner = None;
    }

    /// The match must be running and under the round cap. Checked before
    /// any input parsing so state errors always win.
    pub fn ensure_playable(&self) -> Result<(), GameError> {
        if !self.active {
            return Err(GameError::state("No active game. Start a new game first."));
        }
        if self.round_number >= ROUNDS_TOTAL {
            return Err(GameError::state("Game is complete. Start a new game."));
        }
        Ok(())
    }

    /// Plays one round with both choices already in hand. On the final round
    /// the match deactivates and the report carries the match winner.
    pub fn play_round(
        &mut self,
        player1_choice: Choice,
        player2_choice: Choice,
    ) -> Result<RoundReport, GameError> {
        self.ensure_playable()?;

        let round_winner = match resolve(player1_choice, player2_choice) {
            RoundOutcome::Player1 => {
                self.player1_score += 1;
                self.player1.clone()
            }
            RoundOutcome::Player2 => {
                self.player2_score += 1;
                self.player2.clone()
            }
            RoundOutcome::Tie => "Tie".to_string(),
        };

        self.round_number += 1;

        let game_complete = self.round_number >= ROUNDS_TOTAL;
        let mut game_winner = None;
        if game_complete {
            let winner = match self.player1_score.cmp(&self.player2_score) {
                Ordering::Greater => self.player1.clone(),
                Ordering::Less => self.player2.clone(),
                Ordering::Equal => "Tie".to_string(),
            };
            // A drawn match leaves nobody to retain for the next setup.
            self.last_winner = if winner == "Tie" {
                None
            } else {
                Some(winner.clone())
            };
            self.active = false;
            game_winner = Some(winner);
        }

        Ok(RoundReport {
            round_number: self.round_number,
            player1_choice,
            player2_choice,
            round_winner,
            player1_score: self.player1_score,
            player2_score: self.player2_score,
            game_complete,
            game_winner,
            last_winner: self.last_winner.clone(),
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            player1: self.player1.clone(),
            player2: self.player2.clone(),
            player1_score: self.player1_score,
            player2_score: self.player2_score,
            round_number: self.round_number,
            game_active: self.active,
            last_winner: self.last_winner.clone(),
        }
    }

    pub fn player1(&self) -> &str {
        &self.player1
    }

    pub fn player2(&self) -> &str {
        &self.player2
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.player1_score, self.player2_score)
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn last_winner(&self) -> Option<&str> {
        self.last_winner.as_deref()
    }
}
