//! Built-in feature catalogue.

use crate::feature::{Condition, Feature};

/// The features shipped with the app, in display order.
pub fn default_features() -> Vec<Feature> {
    vec![
        Feature::new("flashcards", "Flashcards", Condition::none())
            .with_description("Spaced-repetition review of studied words"),
        Feature::new("daily-quiz", "Daily Quiz", Condition::none().level(2)),
        Feature::new(
            "card-collection",
            "Card Collection",
            Condition::none().level(3).xp(500),
        )
        .with_description("Collect a card for every mastered word"),
        Feature::new("essay", "Essay Mode", Condition::none().level(5).xp(1500)),
        Feature::new("streak-freeze", "Streak Freeze", Condition::none().streak(3)),
        Feature::new("leaderboard", "Leaderboard", Condition::none().xp(1000)),
        Feature::new(
            "challenge-mode",
            "Challenge Mode",
            Condition::none().level(4).streak(7),
        ),
        Feature::new(
            "custom-decks",
            "Custom Decks",
            Condition::none().achievement("first-words"),
        ),
        Feature::new(
            "pronunciation-lab",
            "Pronunciation Lab",
            Condition::none().level(2).xp(200).streak(7),
        ),
        Feature::new(
            "mentor-mode",
            "Mentor Mode",
            Condition::none().level(6).achievement("wordsmith"),
        ),
    ]
}
