use crate::choice::Choice;
use crate::error::GameError;
use crate::game::{Game, GameSnapshot, RoundReport};
use crate::leaderboard::{Leaderboard, Registration, Standings};
use crate::opponent::{ChoiceSource, UniformChoice};

/// Owns every piece of mutable state in the process: the leaderboard, the
/// single current match, and the opponent's choice source. All mutation goes
/// through these methods, so callers only ever need one lock around one value.
pub struct Arena {
    leaderboard: Leaderboard,
    game: Game,
    choices: Box<dyn ChoiceSource>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::with_choices(Box::new(UniformChoice))
    }
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an arena around an injected choice source. Tests pass a
    /// scripted source to make whole matches deterministic.
    pub fn with_choices(choices: Box<dyn ChoiceSource>) -> Self {
        Self {
            leaderboard: Leaderboard::new(),
            game: Game::new(),
            choices,
        }
    }

    pub fn register_player(&mut self, name: &str) -> Result<(String, Registration), GameError> {
        self.leaderboard.register(name)
    }

    /// Starts a fresh match between two distinct trimmed names, registering
    /// either one that is new. A failed start leaves any running match alone.
    pub fn start_game(&mut self, player1: &str, player2: &str) -> Result<(String, String), GameError> {
        let player1 = player1.trim();
        let player2 = player2.trim();
        if player1.is_empty() || player2.is_empty() {
            return Err(GameError::validation("Both player names are required"));
        }
        if player1 == player2 {
            return Err(GameError::validation("Players must have different names"));
        }
        self.leaderboard.ensure(player1);
        self.leaderboard.ensure(player2);
        self.game.start(player1, player2);
        Ok((player1.to_string(), player2.to_string()))
    }

    /// Plays one round of the current match against the opponent source.
    /// The lifecycle check runs before the choice is parsed, and the choice
    /// source is only consulted once both have passed. When the round
    /// completes the match, the result is posted to the leaderboard.
    pub fn play_round(&mut self, player1_choice: &str) -> Result<RoundReport, GameError> {
        self.game.ensure_playable()?;
        let choice = player1_choice.parse::<Choice>()?;
        let reply = self.choices.pick();

        let report = self.game.play_round(choice, reply)?;
        if report.game_complete {
            self.leaderboard.apply_match_result(
                self.game.player1(),
                self.game.player2(),
                report.player1_score,
                report.player2_score,
            );
        }
        Ok(report)
    }

    pub fn standings(&self) -> Standings {
        self.leaderboard.standings()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn game(&self) -> &Game {
        &self.game
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::PlayerRecord;
    use crate::opponent::ScriptedChoices;
    use pretty_assertions::assert_eq;

    fn scripted(script: Vec<Choice>) -> Arena {
        Arena::with_choices(Box::new(ScriptedChoices::new(script)))
    }

    #[test]
    fn test_register_then_reregister() {
        let mut arena = Arena::new();
        assert_eq!(
            arena.register_player(" Alice ").unwrap(),
            ("Alice".to_string(), Registration::Created)
        );
        assert_eq!(
            arena.register_player("Alice").unwrap(),
            ("Alice".to_string(), Registration::Existing)
        );
        assert_eq!(arena.leaderboard().len(), 1);
    }

    #[test]
    fn test_start_auto_registers_both_players() {
        let mut arena = Arena::new();
        arena.start_game("Alice", "Bob").unwrap();

        assert_eq!(arena.leaderboard().get("Alice"), Some(&PlayerRecord::default()));
        assert_eq!(arena.leaderboard().get("Bob"), Some(&PlayerRecord::default()));

        let snapshot = arena.snapshot();
        assert_eq!(snapshot.player1, "Alice");
        assert_eq!(snapshot.player2, "Bob");
        assert!(snapshot.game_active);
        assert_eq!(snapshot.round_number, 0);
    }

    #[test]
    fn test_start_trims_names() {
        let mut arena = Arena::new();
        let (player1, player2) = arena.start_game("  Alice  ", " Bob ").unwrap();
        assert_eq!(player1, "Alice");
        assert_eq!(player2, "Bob");
    }

    #[test]
    fn test_start_requires_both_names() {
        let mut arena = Arena::new();
        for (p1, p2) in [("", "Bob"), ("Alice", ""), ("", ""), ("   ", "Bob")] {
            let err = arena.start_game(p1, p2).unwrap_err();
            assert_eq!(err, GameError::validation("Both player names are required"));
        }
        assert!(arena.leaderboard().is_empty());
        assert!(!arena.snapshot().game_active);
    }

    #[test]
    fn test_start_rejects_identical_names_and_keeps_match() {
        let mut arena = scripted(vec![Choice::Scissors]);
        arena.start_game("Alice", "Bob").unwrap();
        arena.play_round("rock").unwrap();

        let err = arena.start_game("Carol", "Carol").unwrap_err();
        assert_eq!(err, GameError::validation("Players must have different names"));

        // The failed start must not have disturbed the running match.
        let snapshot = arena.snapshot();
        assert_eq!(snapshot.player1, "Alice");
        assert_eq!(snapshot.round_number, 1);
        assert!(snapshot.game_active);
        assert_eq!(arena.leaderboard().get("Carol"), None);
    }

    #[test]
    fn test_play_without_start_is_a_state_error() {
        let mut arena = Arena::new();
        let err = arena.play_round("rock").unwrap_err();
        assert_eq!(
            err,
            GameError::state("No active game. Start a new game first.")
        );
        assert!(arena.leaderboard().is_empty());
    }

    #[test]
    fn test_state_error_beats_invalid_choice() {
        let mut arena = Arena::new();
        let err = arena.play_round("lizard").unwrap_err();
        assert_eq!(
            err,
            GameError::state("No active game. Start a new game first.")
        );
    }

    #[test]
    fn test_completed_match_rejects_even_bad_choices() {
        let mut arena = scripted(vec![Choice::Scissors]);
        arena.start_game("Alice", "Bob").unwrap();
        for _ in 0..10 {
            arena.play_round("rock").unwrap();
        }

        let err = arena.play_round("lizard").unwrap_err();
        assert_eq!(
            err,
            GameError::state("No active game. Start a new game first.")
        );
    }

    #[test]
    fn test_invalid_choice_mutates_nothing() {
        let mut arena = scripted(vec![Choice::Rock]);
        arena.start_game("Alice", "Bob").unwrap();

        let err = arena.play_round("lizard").unwrap_err();
        assert_eq!(
            err,
            GameError::validation("Invalid choice. Must be rock, paper, or scissors.")
        );

        let snapshot = arena.snapshot();
        assert_eq!(snapshot.round_number, 0);
        assert_eq!((snapshot.player1_score, snapshot.player2_score), (0, 0));
        assert!(snapshot.game_active);

        // The rejected round must not have consumed an opponent move.
        let report = arena.play_round("paper").unwrap();
        assert_eq!(report.player2_choice, Choice::Rock);
    }

    #[test]
    fn test_choice_is_case_insensitive() {
        let mut arena = scripted(vec![Choice::Scissors]);
        arena.start_game("Alice", "Bob").unwrap();

        let report = arena.play_round("ROCK").unwrap();
        assert_eq!(report.player1_choice, Choice::Rock);
        assert_eq!(report.round_winner, "Alice");
    }

    #[test]
    fn test_full_match_posts_to_leaderboard_once() {
        // Bob takes the first six rounds, Alice the last four.
        let mut script = vec![Choice::Paper; 6];
        script.extend(vec![Choice::Scissors; 4]);
        let mut arena = scripted(script);
        arena.start_game("Alice", "Bob").unwrap();

        let mut last = None;
        for _ in 0..10 {
            last = Some(arena.play_round("rock").unwrap());
        }

        let report = last.unwrap();
        assert!(report.game_complete);
        assert_eq!(report.game_winner.as_deref(), Some("Bob"));
        assert_eq!((report.player1_score, report.player2_score), (4, 6));

        assert_eq!(
            arena.leaderboard().get("Alice"),
            Some(&PlayerRecord {
                score: 4,
                games_won: 0
            })
        );
        assert_eq!(
            arena.leaderboard().get("Bob"),
            Some(&PlayerRecord {
                score: 6,
                games_won: 1
            })
        );

        // Further plays fail and leave the totals alone.
        arena.play_round("rock").unwrap_err();
        assert_eq!(
            arena.leaderboard().get("Bob"),
            Some(&PlayerRecord {
                score: 6,
                games_won: 1
            })
        );
    }

    #[test]
    fn test_totals_accumulate_across_matches() {
        let mut arena = scripted(vec![Choice::Scissors]);
        arena.start_game("Alice", "Bob").unwrap();
        for _ in 0..10 {
            arena.play_round("rock").unwrap();
        }
        arena.start_game("Alice", "Bob").unwrap();
        for _ in 0..10 {
            arena.play_round("rock").unwrap();
        }

        assert_eq!(
            arena.leaderboard().get("Alice"),
            Some(&PlayerRecord {
                score: 20,
                games_won: 2
            })
        );
        assert_eq!(
            arena.leaderboard().get("Bob"),
            Some(&PlayerRecord {
                score: 0,
                games_won: 0
            })
        );
    }

    #[test]
    fn test_drawn_match_leaves_no_last_winner() {
        let mut script = vec![Choice::Paper; 5];
        script.extend(vec![Choice::Scissors; 5]);
        let mut arena = scripted(script);
        arena.start_game("Alice", "Bob").unwrap();

        let mut last = None;
        for _ in 0..10 {
            last = Some(arena.play_round("rock").unwrap());
        }

        let report = last.unwrap();
        assert_eq!(report.game_winner.as_deref(), Some("Tie"));
        assert_eq!(report.last_winner, None);
        assert_eq!(arena.snapshot().last_winner, None);
        assert_eq!(arena.leaderboard().get("Alice").unwrap().games_won, 0);
    }

    #[test]
    fn test_last_winner_visible_between_matches() {
        let mut arena = scripted(vec![Choice::Scissors]);
        arena.start_game("Alice", "Bob").unwrap();
        for _ in 0..10 {
            arena.play_round("rock").unwrap();
        }

        let snapshot = arena.snapshot();
        assert!(!snapshot.game_active);
        assert_eq!(snapshot.last_winner.as_deref(), Some("Alice"));
    }
}
