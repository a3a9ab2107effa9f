use rand::Rng;

pub const CLUES: [&str; 5] = ["Dog", "Cat", "Wolf", "Eerie looking donkey", "Mouse"];

const TITLE_PREFIX: &str = "Draw The ";

/// Pick a clue uniformly at random.
pub fn random_clue<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CLUES[rng.random_range(0..CLUES.len())]
}

/// Window title for a clue, e.g. "Draw The Dog".
pub fn title_for(clue: &str) -> String {
    format!("{TITLE_PREFIX}{clue}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn title_is_prefixed() {
        assert_eq!(title_for("Eerie looking donkey"), "Draw The Eerie looking donkey");
    }

    #[test]
    fn random_clue_comes_from_the_list_and_covers_it() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let clue = random_clue(&mut rng);
            assert!(CLUES.contains(&clue));
            seen.insert(clue);
        }
        assert_eq!(seen.len(), CLUES.len());
    }
}
