use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Opaque handle returned on submission and used for every later poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchReference(Uuid);

impl SearchReference {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SearchReference {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for SearchReference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| format!("Invalid search reference: {}", s))
    }
}

impl fmt::Display for SearchReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
