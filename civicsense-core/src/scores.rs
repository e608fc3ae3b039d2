//! Civic score categories and additive updates

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Civic score category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hygiene,
    Empathy,
    Discipline,
    Environment,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Hygiene,
        Category::Empathy,
        Category::Discipline,
        Category::Environment,
    ];

    /// Wire name, also the key inside `civic_scores`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hygiene => "hygiene",
            Self::Empathy => "empathy",
            Self::Discipline => "discipline",
            Self::Environment => "environment",
        }
    }

    /// Capitalised label shown on mission cards.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Hygiene => "Hygiene",
            Self::Empathy => "Empathy",
            Self::Discipline => "Discipline",
            Self::Environment => "Environment",
        }
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cat| cat.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_owned()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category accumulators stored on each user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CivicScores {
    pub hygiene: i64,
    pub empathy: i64,
    pub discipline: i64,
    pub environment: i64,
}

impl CivicScores {
    pub fn get(&self, category: Category) -> i64 {
        match category {
            Category::Hygiene => self.hygiene,
            Category::Empathy => self.empathy,
            Category::Discipline => self.discipline,
            Category::Environment => self.environment,
        }
    }

    fn slot(&mut self, category: Category) -> &mut i64 {
        match category {
            Category::Hygiene => &mut self.hygiene,
            Category::Empathy => &mut self.empathy,
            Category::Discipline => &mut self.discipline,
            Category::Environment => &mut self.environment,
        }
    }

    /// Add every delta to its accumulator, saturating at the i64 bounds.
    pub fn apply(&mut self, deltas: &ScoreDeltas) {
        for (category, delta) in deltas.iter() {
            let slot = self.slot(category);
            *slot = slot.saturating_add(delta);
        }
    }
}

/// Validated score increments, keyed by recognised category only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreDeltas(BTreeMap<Category, i64>);

impl ScoreDeltas {
    /// Build deltas from already typed increments.
    pub fn from_earned<I, K>(earned: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        Self::from_values(earned.into_iter().map(|(name, delta)| (name, Some(delta))))
    }

    /// Build deltas from the raw `scores_earned` map of a request.
    ///
    /// `None` marks a value that was not an integer. An empty input is
    /// rejected as missing. Unknown category names are dropped whatever
    /// their value; a recognised one must carry an integer. If nothing
    /// recognised remains the whole input is rejected.
    pub fn from_values<I, K>(earned: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, Option<i64>)>,
        K: AsRef<str>,
    {
        let mut seen_any = false;
        let mut deltas = BTreeMap::new();

        for (name, delta) in earned {
            seen_any = true;
            let Ok(category) = name.as_ref().parse::<Category>() else {
                continue;
            };
            let delta = delta.ok_or(ValidationError::NonIntegerScore(category.as_str()))?;
            deltas.insert(category, delta);
        }

        if !seen_any {
            return Err(ValidationError::missing("scores_earned"));
        }
        if deltas.is_empty() {
            return Err(ValidationError::NoRecognizedCategories);
        }
        Ok(Self(deltas))
    }

    /// Delta for a category, 0 when the request did not mention it.
    pub fn get(&self, category: Category) -> i64 {
        self.0.get(&category).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, i64)> + '_ {
        self.0.iter().map(|(cat, delta)| (*cat, *delta))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
