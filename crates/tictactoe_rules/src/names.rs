//! Display labels for players.

use crate::Mark;
use tracing::{debug, instrument};

/// Name shown for the X seat when no name was given.
pub const DEFAULT_PLAYER1_NAME: &str = "Player 1";

/// Name shown for the O seat when no name was given.
pub const DEFAULT_PLAYER2_NAME: &str = "Player 2";

/// Source of the two seat names for a game.
///
/// Player 1 plays X, player 2 plays O.
pub trait PlayerRoster {
    /// Stored name for the X seat.
    fn player1_name(&self) -> Option<&str>;

    /// Stored name for the O seat.
    fn player2_name(&self) -> Option<&str>;

    /// Name for the seat playing `mark`, falling back to the positional
    /// default when the stored name is missing or empty.
    fn name_for(&self, mark: Mark) -> &str {
        let (stored, default) = match mark {
            Mark::X => (self.player1_name(), DEFAULT_PLAYER1_NAME),
            Mark::O => (self.player2_name(), DEFAULT_PLAYER2_NAME),
        };
        match stored {
            Some(name) if !name.is_empty() => name,
            _ => default,
        }
    }
}

/// Plain pair of optional names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerNames {
    /// X seat.
    pub player1: Option<String>,
    /// O seat.
    pub player2: Option<String>,
}

impl PlayerNames {
    /// Creates a roster from two optional names.
    pub fn new(player1: Option<String>, player2: Option<String>) -> Self {
        Self { player1, player2 }
    }
}

impl PlayerRoster for PlayerNames {
    fn player1_name(&self) -> Option<&str> {
        self.player1.as_deref()
    }

    fn player2_name(&self) -> Option<&str> {
        self.player2.as_deref()
    }
}

/// Label for the player holding `mark`: glyph, space, name, trailing space.
///
/// ```
/// use tictactoe_rules::{player_label, Mark, PlayerNames};
///
/// let names = PlayerNames::new(Some("Alice".into()), None);
/// assert_eq!(player_label(Mark::X, &names), "❌ Alice ");
/// assert_eq!(player_label(Mark::O, &names), "⭕ Player 2 ");
/// ```
#[instrument(level = "trace", skip(roster))]
pub fn player_label<R: PlayerRoster + ?Sized>(mark: Mark, roster: &R) -> String {
    format!("{} {} ", mark.glyph(), roster.name_for(mark))
}

/// Label for a raw sign string.
///
/// Returns an empty string for anything other than `"X"` or `"O"` so page
/// rendering never fails on a stray value. Prefer [`player_label`] where a
/// typed [`Mark`] is available.
#[instrument(level = "trace", skip(roster))]
pub fn label_from_sign<R: PlayerRoster + ?Sized>(sign: &str, roster: &R) -> String {
    match sign.parse::<Mark>() {
        Ok(mark) => player_label(mark, roster),
        Err(_) => {
            debug!(sign, "Unrecognized sign, no label");
            String::new()
        }
    }
}
