use super::atom::Atom;
use super::residue::{Residue, ResidueKind};
use super::structure::{ChainBounds, Structure};

/// Incrementally assembles a [`Structure`] from scanned records.
///
/// `ATOM` record atoms are grouped into residues keyed by (chain, source position) as they
/// arrive; `HETATM` record atoms go to the hetero list. Canonical sequences are appended per
/// chain. Chain bounds are fixed when [`build`](Self::build) is called.
pub struct StructureBuilder {
    structure: Structure,
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self {
            structure: Structure::default(),
        }
    }

    pub fn id(&mut self, id: &str) -> &mut Self {
        self.structure.id = Some(id.to_string());
        self
    }

    /// Stores the raw atom record text on the structure.
    pub fn source(&mut self, raw_pdb: String) -> &mut Self {
        self.structure.raw_pdb = raw_pdb;
        self
    }

    pub fn add_atom(&mut self, atom: Atom) -> &mut Self {
        if atom.is_hetero() {
            return self.add_hetero_atom(atom);
        }

        let chain_id = atom.chain_id;
        let position = atom.residue_number;
        let structure = &mut self.structure;

        let residue_id = *structure
            .chains
            .entry(chain_id)
            .or_default()
            .entry(position)
            .or_insert_with(|| {
                structure
                    .residues
                    .insert(Residue::new(chain_id, position, &atom.residue_name))
            });

        let atom_id = structure.atoms.insert(atom);
        structure.residues[residue_id].add_atom(atom_id);
        self
    }

    fn add_hetero_atom(&mut self, atom: Atom) -> &mut Self {
        let structure = &mut self.structure;
        if !structure.hetero_groups.contains(&atom.residue_name) {
            structure.hetero_groups.push(atom.residue_name.clone());
        }
        structure.hetero_atoms.push(atom);
        self
    }

    /// Appends one residue token to a chain's canonical sequence.
    pub fn add_canonical_residue(&mut self, chain_id: char, token: &str) -> &mut Self {
        self.structure
            .canonical_chains
            .entry(chain_id)
            .or_default()
            .push(ResidueKind::classify(token));
        self
    }

    pub fn build(mut self) -> Structure {
        let structure = &mut self.structure;
        structure.bounds = structure
            .chains
            .iter()
            .filter_map(|(&chain_id, residues)| {
                let (&start, _) = residues.first_key_value()?;
                let (&end, _) = residues.last_key_value()?;
                Some((chain_id, ChainBounds { start, end }))
            })
            .collect();
        self.structure
    }
}
