use crate::participant::Participant;

use super::{PairAssignment, PairingError};

/// Give `order[i]` to `order[(i + offset) % n]`.
///
/// Any offset in `1..n` yields a complete derangement: the rotation has no
/// fixed point and is a bijection. Combined with a uniform shuffle this covers
/// only permutations made of equal-length cycles, which is fine for a gift
/// exchange.
pub fn assign(order: &[Participant], offset: usize) -> Result<PairAssignment, PairingError> {
    let count = order.len();
    if count < 2 {
        return Err(PairingError::TooFewParticipants(count));
    }
    if offset == 0 || offset >= count {
        return Err(PairingError::InvalidOffset { offset, count });
    }

    let mut pairs = PairAssignment::new();
    for (index, giver) in order.iter().enumerate() {
        let recipient = &order[(index + offset) % count];
        pairs.insert(giver.clone(), recipient.clone());
    }
    Ok(pairs)
}

#[cfg(test)]
mod test {
    use super::*;

    fn people(n: usize) -> Vec<Participant> {
        (0..n).map(|i| Participant::new(format!("p{i}"))).collect()
    }

    #[test]
    fn test_every_offset_is_complete() {
        for n in 2..9 {
            let order = people(n);
            for offset in 1..n {
                let pairs = assign(&order, offset).unwrap();
                assert!(pairs.is_complete(&order), "n={n} offset={offset}");
                for pair in &pairs {
                    assert_ne!(pair.giver, pair.recipient);
                }
            }
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(
            assign(&people(1), 1),
            Err(PairingError::TooFewParticipants(1))
        );
        assert_eq!(assign(&[], 1), Err(PairingError::TooFewParticipants(0)));
        assert_eq!(
            assign(&people(3), 0),
            Err(PairingError::InvalidOffset { offset: 0, count: 3 })
        );
        assert_eq!(
            assign(&people(3), 3),
            Err(PairingError::InvalidOffset { offset: 3, count: 3 })
        );
    }

    #[test]
    fn test_rotation() {
        let order = people(4);
        let pairs = assign(&order, 1).unwrap();
        assert_eq!(pairs.recipient_of(&order[0]), Some(&order[1]));
        assert_eq!(pairs.recipient_of(&order[3]), Some(&order[0]));
    }
}
