//! Pickup/dropoff pairing.

use std::collections::HashMap;

use super::registry::NodeIndex;

/// Outcome of recording a pickup/dropoff pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairInsert {
    /// The pair was new.
    Added,
    /// The exact pair was already present.
    Duplicate,
    /// The pickup already has a different dropoff.
    SourceTaken,
    /// The dropoff already has a different pickup.
    DestinationTaken,
}

/// Bijection between passenger source nodes and destination nodes.
///
/// The forward and inverse maps are always updated together, so every
/// source has exactly one destination and vice versa.
#[derive(Debug, Clone, Default)]
pub struct Pairing {
    source_to_dest: HashMap<NodeIndex, NodeIndex>,
    dest_to_source: HashMap<NodeIndex, NodeIndex>,
}

impl Pairing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `source` is dropped off at `dest`.
    ///
    /// Leaves the pairing untouched unless the result is [`PairInsert::Added`].
    pub fn insert(&mut self, source: NodeIndex, dest: NodeIndex) -> PairInsert {
        match (
            self.source_to_dest.get(&source),
            self.dest_to_source.get(&dest),
        ) {
            (Some(&d), _) if d == dest => PairInsert::Duplicate,
            (Some(_), _) => PairInsert::SourceTaken,
            (None, Some(_)) => PairInsert::DestinationTaken,
            (None, None) => {
                self.source_to_dest.insert(source, dest);
                self.dest_to_source.insert(dest, source);
                PairInsert::Added
            }
        }
    }

    /// Destination paired with `source`.
    pub fn dest_of(&self, source: NodeIndex) -> Option<NodeIndex> {
        self.source_to_dest.get(&source).copied()
    }

    /// Source paired with `dest`.
    pub fn source_of(&self, dest: NodeIndex) -> Option<NodeIndex> {
        self.dest_to_source.get(&dest).copied()
    }

    /// Number of passengers.
    pub fn len(&self) -> usize {
        self.source_to_dest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_to_dest.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup_both_ways() {
        let mut pairing = Pairing::new();
        assert_eq!(pairing.insert(NodeIndex(1), NodeIndex(2)), PairInsert::Added);

        assert_eq!(pairing.dest_of(NodeIndex(1)), Some(NodeIndex(2)));
        assert_eq!(pairing.source_of(NodeIndex(2)), Some(NodeIndex(1)));
        assert_eq!(pairing.dest_of(NodeIndex(2)), None);
        assert_eq!(pairing.len(), 1);
    }

    #[test]
    fn repeated_pair_is_duplicate() {
        let mut pairing = Pairing::new();
        pairing.insert(NodeIndex(1), NodeIndex(2));
        assert_eq!(
            pairing.insert(NodeIndex(1), NodeIndex(2)),
            PairInsert::Duplicate
        );
        assert_eq!(pairing.len(), 1);
    }

    #[test]
    fn conflicting_pairs_are_rejected() {
        let mut pairing = Pairing::new();
        pairing.insert(NodeIndex(1), NodeIndex(3));

        assert_eq!(
            pairing.insert(NodeIndex(1), NodeIndex(4)),
            PairInsert::SourceTaken
        );
        assert_eq!(
            pairing.insert(NodeIndex(2), NodeIndex(3)),
            PairInsert::DestinationTaken
        );
        assert_eq!(pairing.dest_of(NodeIndex(1)), Some(NodeIndex(3)));
        assert_eq!(pairing.source_of(NodeIndex(4)), None);
        assert_eq!(pairing.dest_of(NodeIndex(2)), None);
    }
}
