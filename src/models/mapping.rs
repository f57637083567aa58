use std::collections::HashMap;

use super::{Emotion, Mode};

/// Category lists for one emotion, one per selection mode
///
/// Order matters: the relaxation engine tries the longest prefix first, so
/// lists go from most to least characteristic.
#[derive(Debug, Clone, Default)]
pub struct CategoryRow {
    pub matches: Vec<String>,
    pub lifts: Vec<String>,
}

impl CategoryRow {
    pub fn new(matches: &[&str], lifts: &[&str]) -> Self {
        Self {
            matches: matches.iter().map(|s| s.to_string()).collect(),
            lifts: lifts.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Immutable emotion → category table
///
/// Built once at startup and shared read-only; tests can construct
/// alternate tables instead of patching global state. Lookups for an
/// emotion with no row fall back to the Neutral row.
#[derive(Debug, Clone, Default)]
pub struct MoodCategories {
    rows: HashMap<Emotion, CategoryRow>,
}

impl MoodCategories {
    pub fn new(rows: HashMap<Emotion, CategoryRow>) -> Self {
        Self { rows }
    }

    /// Ordered category list for an emotion and mode
    ///
    /// Falls back to the Neutral row when the emotion has no entry; an
    /// empty slice when even Neutral is missing.
    pub fn categories_for(&self, emotion: Emotion, mode: Mode) -> &[String] {
        let row = self
            .rows
            .get(&emotion)
            .or_else(|| self.rows.get(&Emotion::Neutral));

        match row {
            Some(row) => match mode {
                Mode::Match => &row.matches,
                Mode::Lift => &row.lifts,
            },
            None => &[],
        }
    }

    /// Default Open Library subject table
    pub fn book_defaults() -> Self {
        let mut rows = HashMap::new();
        rows.insert(
            Emotion::Happy,
            CategoryRow::new(
                &["Humor", "Romance", "Family life", "Comics & graphic novels"],
                &["Adventure stories", "Fantasy fiction", "Travel"],
            ),
        );
        rows.insert(
            Emotion::Sad,
            CategoryRow::new(
                &["Domestic fiction", "Psychological fiction", "Biographies", "Music"],
                &["Humor", "Romance", "Inspiration", "Friendship"],
            ),
        );
        rows.insert(
            Emotion::Angry,
            CategoryRow::new(
                &["Thrillers", "Crime", "Revenge", "Dystopias"],
                &["Sports stories", "Humor"],
            ),
        );
        rows.insert(
            Emotion::Fear,
            CategoryRow::new(
                &["Horror", "Ghost stories", "Supernatural", "Mystery fiction"],
                &["Fantasy fiction", "Adventure stories", "Young adult fiction"],
            ),
        );
        rows.insert(
            Emotion::Disgust,
            CategoryRow::new(
                &["True crime", "War", "Corruption", "Social psychology"],
                &["History", "Biography", "Inspirational"],
            ),
        );
        rows.insert(
            Emotion::Surprise,
            CategoryRow::new(
                &["Mystery fiction", "Time travel", "Heist", "Science fiction"],
                &["Romance", "Humor"],
            ),
        );
        rows.insert(
            Emotion::Neutral,
            CategoryRow::new(
                &["Coming of age", "Slice of life", "Essays", "Documentary films"],
                &["Humor", "Travel", "Adventure stories"],
            ),
        );
        Self::new(rows)
    }

    /// Default TMDB genre-name table
    pub fn movie_defaults() -> Self {
        let mut rows = HashMap::new();
        rows.insert(
            Emotion::Happy,
            CategoryRow::new(
                &["Comedy", "Romance", "Family", "Animation"],
                &["Adventure", "Sci-Fi", "Fantasy"],
            ),
        );
        rows.insert(
            Emotion::Sad,
            CategoryRow::new(
                &["Drama", "Music", "Biography"],
                &["Comedy", "Family", "Animation", "Romance"],
            ),
        );
        rows.insert(
            Emotion::Angry,
            CategoryRow::new(&["Action", "Crime", "Thriller"], &["Comedy", "Sports"]),
        );
        rows.insert(
            Emotion::Fear,
            CategoryRow::new(
                &["Horror", "Thriller", "Mystery"],
                &["Animation", "Adventure", "Fantasy"],
            ),
        );
        rows.insert(
            Emotion::Disgust,
            CategoryRow::new(
                &["Documentary", "Crime", "War"],
                &["Drama", "Biography", "History"],
            ),
        );
        rows.insert(
            Emotion::Surprise,
            CategoryRow::new(
                &["Mystery", "Sci-Fi", "Adventure", "Fantasy"],
                &["Comedy", "Romance"],
            ),
        );
        rows.insert(
            Emotion::Neutral,
            CategoryRow::new(&["Drama", "Documentary", "Comedy"], &["Comedy", "Adventure"]),
        );
        Self::new(rows)
    }
}
