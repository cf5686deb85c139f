use crate::enums::Sentiment;
use crate::error::InputError;
use serde::{Deserialize, Serialize};

/// A 0..=100 fear & greed sentiment reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u8")]
pub struct FearGreedIndex(u8);

impl FearGreedIndex {
    /// The neutral reading.
    pub const NEUTRAL: Self = Self(50);

    pub fn new(value: u32) -> Result<Self, InputError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .map(Self)
            .ok_or(InputError::SentimentOutOfRange(value))
    }

    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn sentiment(&self) -> Sentiment {
        match self.0 {
            0..=49 => Sentiment::Fear,
            50 => Sentiment::Neutral,
            _ => Sentiment::Greed,
        }
    }
}

impl Default for FearGreedIndex {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl TryFrom<u32> for FearGreedIndex {
    type Error = InputError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FearGreedIndex> for u8 {
    fn from(index: FearGreedIndex) -> Self {
        index.0
    }
}
