use std::collections::{HashMap, HashSet};

use crate::participant::Participant;

/// One giver and the participant they give to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub giver: Participant,
    pub recipient: Participant,
}

/// Mapping from giver to recipient.
///
/// Pairs iterate in the order they were assigned. Insertion keeps the mapping
/// injective and free of self-assignment; anything else is left to the
/// assigners, including whether every participant ends up with an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairAssignment {
    pairs: Vec<Pair>,
    by_giver: HashMap<Participant, usize>,
    by_recipient: HashMap<Participant, usize>,
}

impl PairAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `giver -> recipient`.
    ///
    /// Returns `false` and leaves the mapping untouched if the pair would be a
    /// self-assignment, or if either side is already used.
    pub(crate) fn insert(&mut self, giver: Participant, recipient: Participant) -> bool {
        if giver == recipient
            || self.by_giver.contains_key(&giver)
            || self.by_recipient.contains_key(&recipient)
        {
            return false;
        }
        let index = self.pairs.len();
        self.by_giver.insert(giver.clone(), index);
        self.by_recipient.insert(recipient.clone(), index);
        self.pairs.push(Pair { giver, recipient });
        true
    }

    pub fn recipient_of(&self, giver: &Participant) -> Option<&Participant> {
        self.by_giver
            .get(giver)
            .map(|&index| &self.pairs[index].recipient)
    }

    pub fn giver_of(&self, recipient: &Participant) -> Option<&Participant> {
        self.by_recipient
            .get(recipient)
            .map(|&index| &self.pairs[index].giver)
    }

    pub fn is_taken(&self, recipient: &Participant) -> bool {
        self.by_recipient.contains_key(recipient)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pair> {
        self.pairs.iter()
    }

    /// Participants that were never assigned a recipient, in input order
    pub fn unassigned<'a>(&self, participants: &'a [Participant]) -> Vec<&'a Participant> {
        participants
            .iter()
            .filter(|p| !self.by_giver.contains_key(*p))
            .collect()
    }

    /// Every participant gives exactly once and receives exactly once.
    pub fn is_complete(&self, participants: &[Participant]) -> bool {
        let everyone: HashSet<&Participant> = participants.iter().collect();
        self.len() == everyone.len()
            && everyone
                .iter()
                .all(|p| self.by_giver.contains_key(*p) && self.by_recipient.contains_key(*p))
    }
}

impl<'a> IntoIterator for &'a PairAssignment {
    type Item = &'a Pair;
    type IntoIter = std::slice::Iter<'a, Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
