use nalgebra::Point3;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The record tag an atom was read from.
///
/// `ATOM` records carry polymer residues and are grouped into chains; `HETATM` records carry
/// ligands, ions, water and modified residues and are kept apart from the chain model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub enum RecordKind {
    /// Standard polymer atom (`ATOM`).
    #[default]
    Atom,
    /// Hetero atom (`HETATM`).
    Hetero,
}

impl RecordKind {
    /// The six-character record tag as it appears in column 1 of a PDB line.
    pub fn tag(self) -> &'static str {
        match self {
            RecordKind::Atom => "ATOM",
            RecordKind::Hetero => "HETATM",
        }
    }
}

impl FromStr for RecordKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ATOM" => Ok(RecordKind::Atom),
            "HETATM" => Ok(RecordKind::Hetero),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single atom as described by one coordinate record.
///
/// Atoms are immutable once scanned. Ownership lives in the structure's atom arena and the
/// owning [`Residue`](super::residue::Residue) refers to them by [`AtomId`](super::ids::AtomId).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Atom serial number (columns 7-11).
    pub serial: usize,
    /// Atom name, e.g. "CA" (columns 13-16).
    pub name: String,
    /// Residue type code exactly as written in the record, e.g. "ALA" or "HOH".
    pub residue_name: String,
    /// Chain identifier (column 22).
    pub chain_id: char,
    /// Residue sequence number in the atom record numbering (columns 23-26).
    pub residue_number: isize,
    /// Orthogonal coordinates in Angstroms.
    pub position: Point3<f64>,
    /// Occupancy (columns 55-60).
    pub occupancy: f64,
    /// Isotropic temperature factor (columns 61-66).
    pub b_factor: f64,
    /// Element symbol (columns 77-78).
    pub element: String,
    /// Formal charge as written, e.g. "2+" (columns 79-80).
    pub charge: String,
    /// Which record tag produced this atom.
    pub record: RecordKind,
}

impl Atom {
    /// Creates an `ATOM` record atom with zeroed physical properties.
    ///
    /// # Arguments
    ///
    /// * `serial` - The atom serial number.
    /// * `name` - The atom name.
    /// * `residue_name` - The residue type code of the owning residue.
    /// * `chain_id` - The chain identifier.
    /// * `residue_number` - The residue number in atom record numbering.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(
        serial: usize,
        name: &str,
        residue_name: &str,
        chain_id: char,
        residue_number: isize,
        position: Point3<f64>,
    ) -> Self {
        Self {
            serial,
            name: name.to_string(),
            residue_name: residue_name.to_string(),
            chain_id,
            residue_number,
            position,
            occupancy: 0.0,
            b_factor: 0.0,
            element: String::new(),
            charge: String::new(),
            record: RecordKind::default(),
        }
    }

    pub fn is_hetero(&self) -> bool {
        self.record == RecordKind::Hetero
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new(7, "CA", "GLY", 'B', 12, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.serial, 7);
        assert_eq!(atom.name, "CA");
        assert_eq!(atom.residue_name, "GLY");
        assert_eq!(atom.chain_id, 'B');
        assert_eq!(atom.residue_number, 12);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.occupancy, 0.0);
        assert_eq!(atom.b_factor, 0.0);
        assert_eq!(atom.element, "");
        assert_eq!(atom.charge, "");
        assert_eq!(atom.record, RecordKind::Atom);
        assert!(!atom.is_hetero());
    }

    #[test]
    fn record_kind_parses_tags_with_padding() {
        assert_eq!(RecordKind::from_str("ATOM  "), Ok(RecordKind::Atom));
        assert_eq!(RecordKind::from_str("HETATM"), Ok(RecordKind::Hetero));
        assert_eq!(RecordKind::from_str("SEQRES"), Err(()));
    }

    #[test]
    fn record_kind_display_matches_tag() {
        assert_eq!(RecordKind::Hetero.to_string(), "HETATM");
        assert_eq!(format!("{}", RecordKind::Atom), "ATOM");
    }
}
