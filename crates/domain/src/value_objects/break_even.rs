use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a break-even search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakEven {
    /// Break-even is reached after this many whole months.
    Months(u32),
    /// The search cap was hit, or the position can never catch up.
    Unreachable,
}

impl BreakEven {
    /// Months to break even, if reachable.
    #[must_use]
    pub fn months(&self) -> Option<u32> {
        match self {
            BreakEven::Months(m) => Some(*m),
            BreakEven::Unreachable => None,
        }
    }

    #[must_use]
    pub fn is_reachable(&self) -> bool {
        matches!(self, BreakEven::Months(_))
    }
}

impl fmt::Display for BreakEven {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakEven::Months(1) => write!(f, "1 month"),
            BreakEven::Months(m) => write!(f, "{m} months"),
            BreakEven::Unreachable => write!(f, "unreachable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(BreakEven::Months(0).to_string(), "0 months");
        assert_eq!(BreakEven::Months(1).to_string(), "1 month");
        assert_eq!(BreakEven::Unreachable.to_string(), "unreachable");
    }

    #[test]
    fn test_months_accessor() {
        assert_eq!(BreakEven::Months(7).months(), Some(7));
        assert_eq!(BreakEven::Unreachable.months(), None);
        assert!(!BreakEven::Unreachable.is_reachable());
    }
}
