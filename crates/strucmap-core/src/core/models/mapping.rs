use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Asserts that a contiguous run of canonical structure positions on one chain corresponds to a
/// contiguous run of reference sequence positions.
///
/// Both runs are expected to have equal extent; this is not re-validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeMapping {
    pub chain_id: char,
    pub structure_start: isize,
    pub structure_end: isize,
    pub reference_start: isize,
    pub reference_end: isize,
}

impl RangeMapping {
    pub fn new(
        chain_id: char,
        structure: RangeInclusive<isize>,
        reference: RangeInclusive<isize>,
    ) -> Self {
        Self {
            chain_id,
            structure_start: *structure.start(),
            structure_end: *structure.end(),
            reference_start: *reference.start(),
            reference_end: *reference.end(),
        }
    }

    /// All reference positions covered by this range, inclusive on both ends.
    pub fn reference_positions(&self) -> RangeInclusive<isize> {
        self.reference_start..=self.reference_end
    }

    /// Canonical structure position that corresponds to `reference_position`.
    pub fn structure_position(&self, reference_position: isize) -> isize {
        reference_position - self.reference_start + self.structure_start
    }

    /// Reference position that corresponds to the canonical `structure_position`.
    pub fn reference_position(&self, structure_position: isize) -> isize {
        structure_position - self.structure_start + self.reference_start
    }

    pub fn covers_reference(&self, reference_position: isize) -> bool {
        self.reference_positions().contains(&reference_position)
    }
}

/// Every range known for one reference accession.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessionMapping {
    pub identifier: String,
    pub name: String,
    pub ranges: Vec<RangeMapping>,
}

/// The externally supplied accession → ranges table.
///
/// Accessions iterate in lexicographic order and ranges in insertion order; the reference
/// resolver relies on this order being stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMappings {
    accessions: BTreeMap<String, AccessionMapping>,
}

impl ReferenceMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the full mapping of one accession.
    pub fn insert(&mut self, accession: &str, mapping: AccessionMapping) {
        self.accessions.insert(accession.to_string(), mapping);
    }

    /// Appends a range to an accession, creating the accession entry when needed.
    pub fn add_range(&mut self, accession: &str, range: RangeMapping) -> &mut Self {
        self.accessions
            .entry(accession.to_string())
            .or_insert_with(|| AccessionMapping {
                identifier: accession.to_string(),
                ..Default::default()
            })
            .ranges
            .push(range);
        self
    }

    pub fn get(&self, accession: &str) -> Option<&AccessionMapping> {
        self.accessions.get(accession)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AccessionMapping)> {
        self.accessions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The first range of `accession` that lies on `chain_id`.
    pub fn chain_mapping(&self, accession: &str, chain_id: char) -> Option<&RangeMapping> {
        self.accessions
            .get(accession)?
            .ranges
            .iter()
            .find(|range| range.chain_id == chain_id)
    }

    pub fn len(&self) -> usize {
        self.accessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_arithmetic_maps_reference_to_structure_and_back() {
        let range = RangeMapping::new('C', 1..=21, 25..=45);
        assert_eq!(range.structure_position(30), 6);
        assert_eq!(range.reference_position(6), 30);
        for i in range.reference_positions() {
            assert_eq!(range.reference_position(range.structure_position(i)), i);
        }
    }

    #[test]
    fn covers_reference_is_inclusive() {
        let range = RangeMapping::new('A', 1..=21, 25..=45);
        assert!(range.covers_reference(25));
        assert!(range.covers_reference(45));
        assert!(!range.covers_reference(24));
        assert!(!range.covers_reference(46));
    }

    #[test]
    fn add_range_creates_accession_and_preserves_order() {
        let mut mappings = ReferenceMappings::new();
        mappings
            .add_range("P01308", RangeMapping::new('B', 1..=30, 25..=54))
            .add_range("P01308", RangeMapping::new('A', 1..=21, 90..=110));

        let entry = mappings.get("P01308").unwrap();
        assert_eq!(entry.identifier, "P01308");
        assert_eq!(entry.ranges.len(), 2);
        assert_eq!(entry.ranges[0].chain_id, 'B');
        assert_eq!(entry.ranges[1].chain_id, 'A');
    }

    #[test]
    fn chain_mapping_returns_first_range_on_chain() {
        let mut mappings = ReferenceMappings::new();
        mappings
            .add_range("P1", RangeMapping::new('A', 1..=10, 1..=10))
            .add_range("P1", RangeMapping::new('A', 20..=30, 40..=50));

        let found = mappings.chain_mapping("P1", 'A').unwrap();
        assert_eq!(found.structure_start, 1);
        assert!(mappings.chain_mapping("P1", 'Z').is_none());
        assert!(mappings.chain_mapping("P2", 'A').is_none());
    }

    #[test]
    fn iteration_is_lexicographic_by_accession() {
        let mut mappings = ReferenceMappings::new();
        mappings.add_range("Q9", RangeMapping::new('A', 1..=2, 1..=2));
        mappings.add_range("P0", RangeMapping::new('B', 1..=2, 1..=2));
        let keys: Vec<_> = mappings.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["P0", "Q9"]);
        assert_eq!(mappings.len(), 2);
    }
}
