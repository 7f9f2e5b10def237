//! The two co-funding parties and who paid for a transaction

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two people sharing the household budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    PartyA,
    PartyB,
}

impl Party {
    /// The other person
    pub fn other(&self) -> Self {
        match self {
            Self::PartyA => Self::PartyB,
            Self::PartyB => Self::PartyA,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PartyA => write!(f, "Party A"),
            Self::PartyB => write!(f, "Party B"),
        }
    }
}

/// Who paid for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Buyer {
    PartyA,
    PartyB,
    /// Paid from a joint account or card
    Joint,
}

impl Buyer {
    /// All buyers in display order
    pub fn all() -> &'static [Self] {
        &[Self::PartyA, Self::PartyB, Self::Joint]
    }

    /// The individual who paid, if it was not a joint payment
    pub fn party(&self) -> Option<Party> {
        match self {
            Self::PartyA => Some(Party::PartyA),
            Self::PartyB => Some(Party::PartyB),
            Self::Joint => None,
        }
    }

    /// Swap the two parties, leaving joint payments alone
    pub fn swapped(&self) -> Self {
        match self {
            Self::PartyA => Self::PartyB,
            Self::PartyB => Self::PartyA,
            Self::Joint => Self::Joint,
        }
    }
}

impl From<Party> for Buyer {
    fn from(party: Party) -> Self {
        match party {
            Party::PartyA => Self::PartyA,
            Party::PartyB => Self::PartyB,
        }
    }
}

impl fmt::Display for Buyer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PartyA => write!(f, "Party A"),
            Self::PartyB => write!(f, "Party B"),
            Self::Joint => write!(f, "Joint"),
        }
    }
}
