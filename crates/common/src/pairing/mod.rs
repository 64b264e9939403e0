//! Giver -> recipient assignment
//!
//! Two assigners live here:
//!
//! - [`greedy`]: a single forward scan with no backtracking. This is the
//!   assignment the tool has always produced. It can strand a giver with no
//!   eligible recipient; the result is then incomplete rather than an error.
//! - [`cyclic`]: rotates the shuffled order by a random non-zero offset. It is
//!   always a complete derangement, but only runs when asked for.
//!
//! Both consume an already shuffled order; see [`draw`] for the usual entry
//! point.

mod assignment;
pub mod cyclic;
pub mod greedy;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::participant::Participant;
use crate::shuffle::Randomizer;

pub use assignment::{Pair, PairAssignment};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum PairingError {
    #[error("at least 2 participants are needed for a complete draw, got {0}")]
    TooFewParticipants(usize),
    #[error("rotation offset {offset} is invalid for {count} participants")]
    InvalidOffset { offset: usize, count: usize },
    #[error("unknown pairing strategy '{0}', expected 'greedy' or 'cyclic'")]
    UnknownStrategy(String),
}

/// How a shuffled order is turned into pairs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// First eligible taker wins; may leave givers unassigned
    #[default]
    Greedy,
    /// Rotate the order by a random non-zero offset; always complete
    Cyclic,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Greedy => f.write_str("greedy"),
            Strategy::Cyclic => f.write_str("cyclic"),
        }
    }
}

impl FromStr for Strategy {
    type Err = PairingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(Strategy::Greedy),
            "cyclic" => Ok(Strategy::Cyclic),
            other => Err(PairingError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Shuffle `participants` and assign pairs with the given strategy.
pub fn draw<R: Rng>(
    participants: &[Participant],
    strategy: Strategy,
    randomizer: &mut Randomizer<R>,
) -> Result<PairAssignment, PairingError> {
    let order = randomizer.shuffle(participants);

    let assignment = match strategy {
        Strategy::Greedy => greedy::assign(&order),
        Strategy::Cyclic => {
            let offset = randomizer
                .offset(order.len())
                .ok_or(PairingError::TooFewParticipants(order.len()))?;
            cyclic::assign(&order, offset)?
        }
    };

    let unassigned = assignment.unassigned(participants);
    if unassigned.is_empty() {
        tracing::info!(
            %strategy,
            pairs = assignment.len(),
            "assigned every participant"
        );
    } else {
        let names: Vec<&str> = unassigned.iter().map(|p| p.as_str()).collect();
        tracing::warn!(
            %strategy,
            pairs = assignment.len(),
            participants = participants.len(),
            unassigned = ?names,
            "draw left givers without a recipient"
        );
    }

    Ok(assignment)
}
