pub mod arena;
pub mod choice;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod opponent;
pub mod server;

pub use arena::Arena;
pub use choice::Choice;
pub use error::GameError;
pub use game::{resolve, Game, GameSnapshot, RoundOutcome, RoundReport, ROUNDS_TOTAL};
pub use leaderboard::{Leaderboard, PlayerRecord, PlayerRow, Registration, Standings};
pub use opponent::{ChoiceSource, ScriptedChoices, UniformChoice};
pub use server::{AppState, Server};
