//! Random encouragement messages shown to the player whose turn it is.

use crate::EmptyEncouragements;
use rand::Rng;
use tracing::instrument;

/// Built-in messages used when no list is configured.
pub const DEFAULT_ENCOURAGEMENTS: &[&str] = &[
    "Show them what you got!",
    "You've got this!",
    "Think three moves ahead.",
    "The center square is calling.",
    "Corners win games.",
    "Stay sharp, block that line!",
    "Make it count!",
    "Fortune favors the bold.",
];

/// A fixed, non-empty list of encouragement strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encouragements {
    entries: Vec<String>,
}

impl Encouragements {
    /// Creates a picker over `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyEncouragements`] if `entries` is empty.
    #[instrument(skip(entries), fields(count = entries.len()))]
    pub fn new(entries: Vec<String>) -> Result<Self, EmptyEncouragements> {
        if entries.is_empty() {
            return Err(EmptyEncouragements);
        }
        Ok(Self { entries })
    }

    /// All configured entries.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Picks an entry uniformly at random from the thread-local generator.
    pub fn pick(&self) -> &str {
        self.pick_with(&mut rand::thread_rng())
    }

    /// Picks an entry uniformly at random from `rng`.
    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        let index = rng.gen_range(0..self.entries.len());
        &self.entries[index]
    }
}

impl Default for Encouragements {
    fn default() -> Self {
        Self {
            entries: DEFAULT_ENCOURAGEMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_empty_list_rejected() {
        assert_eq!(Encouragements::new(Vec::new()), Err(EmptyEncouragements));
    }

    #[test]
    fn test_pick_returns_configured_entry() {
        let picker = Encouragements::default();
        let picked = picker.pick();
        assert!(DEFAULT_ENCOURAGEMENTS.contains(&picked));
    }

    #[test]
    fn test_single_entry() {
        let picker = Encouragements::new(vec!["Go!".to_string()]).unwrap();
        assert_eq!(picker.pick(), "Go!");
    }

    #[test]
    fn test_more_than_one_value_over_many_picks() {
        let picker = Encouragements::default();
        let seen: HashSet<&str> = (0..50).map(|_| picker.pick()).collect();
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_every_entry_reachable() {
        let picker = Encouragements::new(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<&str> = (0..200).map(|_| picker.pick_with(&mut rng)).collect();
        assert_eq!(seen.len(), 3);
    }
}
