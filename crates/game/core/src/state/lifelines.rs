//! Lifeline inventory: per-kind counters that never go negative.

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, QuizError};

/// Consumable lifeline kinds.
#[derive(
    Clone,
    Copy,
    Debug,
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
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LifelineKind {
    /// Hides two wrong options.
    FiftyFifty,
    /// Moves past the current question without scoring it.
    Skip,
    /// Adds time to the running countdown.
    ExtraTime,
}

impl LifelineKind {
    pub const ALL: [LifelineKind; 3] = [
        LifelineKind::FiftyFifty,
        LifelineKind::Skip,
        LifelineKind::ExtraTime,
    ];
}

/// Counters for each lifeline kind.
///
/// `try_consume` is the only way to spend; it checks and decrements in one
/// step so a lifeline the player doesn't own can never be used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LifelineInventory {
    counts: BTreeMap<LifelineKind, u32>,
}

impl LifelineInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory holding `amount` of every kind.
    pub fn uniform(amount: u32) -> Self {
        let mut inventory = Self::new();
        for kind in LifelineKind::ALL {
            inventory.counts.insert(kind, amount);
        }
        inventory
    }

    pub fn with(mut self, kind: LifelineKind, amount: u32) -> Self {
        self.counts.insert(kind, amount);
        self
    }

    pub fn quantity(&self, kind: LifelineKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Spends one lifeline if any remain. Returns false and leaves the
    /// inventory untouched otherwise.
    pub fn try_consume(&mut self, kind: LifelineKind) -> bool {
        match self.counts.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Adds `amount` lifelines of `kind`; returns the new quantity.
    pub fn credit(&mut self, kind: LifelineKind, amount: u32) -> Result<u32, LifelineError> {
        if amount == 0 {
            return Err(LifelineError::ZeroAmount(kind));
        }
        let count = self.counts.entry(kind).or_insert(0);
        *count = count.saturating_add(amount);
        Ok(*count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LifelineKind, u32)> + '_ {
        LifelineKind::ALL
            .into_iter()
            .map(|kind| (kind, self.quantity(kind)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LifelineError {
    #[error("cannot credit zero {0} lifelines")]
    ZeroAmount(LifelineKind),
}

impl QuizError for LifelineError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroAmount(_) => "LIFELINE_ZERO_AMOUNT",
        }
    }
}
