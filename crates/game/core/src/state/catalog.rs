//! Category and difficulty identity shared by questions, unlocks, and results.

/// Question category.
///
/// [`Category::All`] is a wildcard used only for filtering: it matches every
/// category when building a queue and never appears on a question.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Category {
    /// Wildcard matching every category.
    #[default]
    All,
    General,
    Science,
    History,
    Geography,
    Sports,
    Entertainment,
    Technology,
    Literature,
}

impl Category {
    /// Returns true when a question tagged `other` passes this filter.
    pub fn matches(&self, other: Category) -> bool {
        matches!(self, Category::All) || *self == other
    }

    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Category::All)
    }
}

/// Ordered difficulty tiers.
///
/// Declaration order is the unlock chain: each tier is unlocked by clearing the
/// one before it. [`Difficulty::Rookie`] is always playable.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    #[default]
    Rookie,
    Amateur,
    Pro,
    Master,
    Legend,
    Genius,
}

impl Difficulty {
    /// Every tier in unlock order.
    pub const ALL: [Difficulty; 6] = [
        Difficulty::Rookie,
        Difficulty::Amateur,
        Difficulty::Pro,
        Difficulty::Master,
        Difficulty::Legend,
        Difficulty::Genius,
    ];

    /// Multiplier applied to base points and coins earned at this tier.
    pub const fn points_multiplier(&self) -> u32 {
        match self {
            Difficulty::Rookie => 1,
            Difficulty::Amateur => 2,
            Difficulty::Pro => 3,
            Difficulty::Master => 4,
            Difficulty::Legend => 5,
            Difficulty::Genius => 6,
        }
    }

    /// Position in the unlock chain (Rookie = 0).
    pub const fn rank(&self) -> usize {
        *self as usize
    }

    /// The tier unlocked by clearing this one, if any.
    pub fn next(&self) -> Option<Difficulty> {
        Self::ALL.get(self.rank() + 1).copied()
    }

    /// The tier that must be unlocked before this one becomes reachable.
    pub fn previous(&self) -> Option<Difficulty> {
        self.rank().checked_sub(1).map(|rank| Self::ALL[rank])
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }
}
