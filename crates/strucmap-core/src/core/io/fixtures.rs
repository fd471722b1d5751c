//! Fixed-column record text for tests.
//!
//! The synthetic entry is a trimmed insulin dimer: chain A carries residues 1-5 of a 21 residue
//! canonical sequence, chain B carries residues 3-7 of a 30 residue canonical sequence but is
//! numbered from 101, and one zinc site spans both chains.

use crate::core::models::atom::RecordKind;

pub const ENTRY_ID: &str = "1ZNI";

pub const CHAIN_A_SEQRES: [&str; 21] = [
    "GLY", "ILE", "VAL", "GLU", "GLN", "CYS", "CYS", "THR", "SER", "ILE", "CYS", "SER", "LEU",
    "TYR", "GLN", "LEU", "GLU", "ASN", "TYR", "CYS", "ASN",
];

pub const CHAIN_B_SEQRES: [&str; 30] = [
    "PHE", "VAL", "ASN", "GLN", "HIS", "LEU", "CYS", "GLY", "SER", "HIS", "LEU", "VAL", "GLU",
    "ALA", "LEU", "TYR", "LEU", "VAL", "CYS", "GLY", "GLU", "ARG", "GLY", "PHE", "PHE", "TYR",
    "THR", "PRO", "LYS", "THR",
];

#[allow(clippy::too_many_arguments)]
pub fn atom_line(
    record: RecordKind,
    serial: usize,
    name: &str,
    residue_name: &str,
    chain_id: char,
    residue_number: isize,
    [x, y, z]: [f64; 3],
    occupancy: f64,
    b_factor: f64,
    element: &str,
) -> String {
    format!(
        "{:<6}{:>5} {:<4}{:1}{:>3} {:1}{:>4}{:1}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}{:>2}",
        record.tag(),
        serial,
        name,
        "",
        residue_name,
        chain_id,
        residue_number,
        "",
        x,
        y,
        z,
        occupancy,
        b_factor,
        element,
        ""
    )
}

pub fn seqres_line(serial: usize, chain_id: char, declared: usize, residues: &[&str]) -> String {
    format!(
        "SEQRES {:>3} {:1} {:>4}  {}",
        serial,
        chain_id,
        declared,
        residues.join(" ")
    )
}

/// `SEQRES` lines for a whole chain, thirteen residues per line.
pub fn seqres_lines(chain_id: char, residues: &[&str]) -> Vec<String> {
    residues
        .chunks(13)
        .enumerate()
        .map(|(i, chunk)| seqres_line(i + 1, chain_id, residues.len(), chunk))
        .collect()
}

pub fn site_line(serial: usize, name: &str, blocks: &[Option<(&str, char, isize)>]) -> String {
    let declared = blocks.iter().flatten().count();
    let blocks: Vec<String> = blocks
        .iter()
        .map(|block| match block {
            Some((residue, chain, position)) => {
                format!("{:>3} {:1}{:>4}{:1}", residue, chain, position, "")
            }
            None => " ".repeat(10),
        })
        .collect();
    format!(
        "SITE   {:>3} {:>3} {:>2} {}",
        serial,
        name,
        declared,
        blocks.join(" ")
    )
}

/// Two atoms (`N`, `CA`) per residue, numbered consecutively from `first_position`.
///
/// B-factors are `10 + 2k` and `12 + 2k` for the k-th residue, so residue means step by 2.
pub fn residue_atoms(
    chain_id: char,
    first_position: isize,
    residues: &[&str],
    first_serial: usize,
) -> Vec<String> {
    residues
        .iter()
        .enumerate()
        .flat_map(|(k, residue)| {
            let position = first_position + k as isize;
            let base = 10.0 + 2.0 * k as f64;
            let x = 3.8 * k as f64;
            [
                atom_line(RecordKind::Atom, first_serial + 2 * k, "N", residue, chain_id, position, [x, 0.0, 0.0], 1.0, base, "N"),
                atom_line(RecordKind::Atom, first_serial + 2 * k + 1, "CA", residue, chain_id, position, [x + 1.46, 0.0, 0.0], 1.0, base + 2.0, "C"),
            ]
        })
        .collect()
}

/// Complete atom record text of the synthetic entry.
pub fn entry_pdb() -> String {
    let mut lines = vec![format!("HEADER    HORMONE                                 19-SEP-02   {ENTRY_ID}")];
    lines.push("REMARK 800 SITE_IDENTIFIER: AC1".to_string());
    lines.push("REMARK 800 EVIDENCE_CODE: SOFTWARE".to_string());
    lines.push("REMARK 800 SITE_DESCRIPTION: BINDING SITE FOR RESIDUE ZN B 201".to_string());
    lines.extend(seqres_lines('A', &CHAIN_A_SEQRES));
    lines.extend(seqres_lines('B', &CHAIN_B_SEQRES));
    lines.push(site_line(
        1,
        "AC1",
        &[
            Some(("HIS", 'B', 103)),
            None,
            Some(("GLU", 'A', 4)),
            Some(("CYS", 'A', 1)),
        ],
    ));
    lines.extend(residue_atoms('A', 1, &CHAIN_A_SEQRES[0..5], 1));
    lines.push("TER      11      GLN A   5".to_string());
    lines.extend(residue_atoms('B', 101, &CHAIN_B_SEQRES[2..7], 12));
    lines.push("TER      22      CYS B 105".to_string());
    lines.push(atom_line(RecordKind::Hetero, 23, "ZN", "ZN", 'B', 201, [5.0, 5.0, 5.0], 1.0, 15.0, "ZN"));
    lines.push(atom_line(RecordKind::Hetero, 24, "O", "HOH", 'A', 301, [9.0, 1.0, 0.0], 1.0, 30.0, "O"));
    lines.push(atom_line(RecordKind::Hetero, 25, "O", "HOH", 'A', 302, [9.5, 2.0, 0.0], 1.0, 31.0, "O"));
    lines.push("END".to_string());
    lines.join("\n")
}

/// Metadata text of the synthetic entry.
pub fn entry_cif() -> String {
    format!(
        "data_{ENTRY_ID}
#
_entry.id   {ENTRY_ID}
#
_struct.entry_id                  {ENTRY_ID}
_struct.title                     'Zinc-bound insulin dimer'
_struct.pdbx_descriptor           Insulin
#
_exptl.entry_id          {ENTRY_ID}
_exptl.method            'X-RAY DIFFRACTION'
_exptl.crystals_number   1
#
_refine.entry_id                 {ENTRY_ID}
_refine.pdbx_refine_id           'X-RAY DIFFRACTION'
_refine.ls_d_res_high            1.200
_refine.ls_d_res_low             20.00
#
_pdbx_database_status.status_code                     REL
_pdbx_database_status.recvd_initial_deposition_date   2002-09-19
#
"
    )
}

/// SIFTS mapping document of the synthetic entry.
pub fn entry_sifts_json() -> String {
    format!(
        r#"{{
  "{}": {{
    "UniProt": {{
      "P01308": {{
        "identifier": "INS_HUMAN",
        "name": "INS_HUMAN",
        "mappings": [
          {{"entity_id": 1, "chain_id": "A", "struct_asym_id": "A",
            "start": {{"residue_number": 1}}, "end": {{"residue_number": 21}},
            "unp_start": 90, "unp_end": 110}},
          {{"entity_id": 2, "chain_id": "B", "struct_asym_id": "B",
            "start": {{"residue_number": 1}}, "end": {{"residue_number": 30}},
            "unp_start": 25, "unp_end": 54}}
        ]
      }}
    }},
    "Pfam": {{}}
  }}
}}"#,
        ENTRY_ID.to_lowercase()
    )
}
