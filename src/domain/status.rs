//! Order status labels carried by status broadcasts.

use std::fmt;

/// Outcome reported in a status broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Orders settled; profit and quota usage are credited.
    Complete,
    /// Orders failed; informational only, nothing is credited.
    Failed,
}

impl OrderStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Complete => "Complete ✅",
            Self::Failed => "Failed 🚫",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
