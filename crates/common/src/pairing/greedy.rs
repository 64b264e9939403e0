use crate::participant::Participant;

use super::PairAssignment;

/// Assign recipients with a single greedy pass over `order`.
///
/// Each giver, in order, takes the first participant in `order` who is not
/// themselves, has not been taken yet, and does not already give to them.
/// There is no backtracking: a giver left with no eligible taker gets no entry.
///
/// The scan always closes a 3-cycle before moving on, so the result is
/// complete exactly when the number of participants is a multiple of 3.
/// Otherwise the last giver in `order` is stranded. Deterministic for a given
/// `order`; O(n²).
pub fn assign(order: &[Participant]) -> PairAssignment {
    let mut pairs = PairAssignment::new();

    for giver in order {
        for taker in order {
            let already_gave = pairs.recipient_of(giver).is_some();
            let already_took = pairs.is_taken(taker);
            let giving_to_giver = pairs.recipient_of(taker) == Some(giver);

            if !already_gave && !already_took && !giving_to_giver && giver != taker {
                pairs.insert(giver.clone(), taker.clone());
                break;
            }
        }

        if pairs.recipient_of(giver).is_none() {
            tracing::debug!(%giver, "no eligible recipient left for giver");
        }
    }

    pairs
}
