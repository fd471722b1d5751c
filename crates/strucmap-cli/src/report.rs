//! Plain-text, JSON and CSV renderings of a loaded structure.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use strucmap::core::models::metadata::EntryMetadata;
use strucmap::core::models::residue::Residue;
use strucmap::core::models::structure::Structure;
use strucmap::core::utils::identifiers::is_amino_acid;

#[derive(Debug, Serialize)]
pub struct ChainSummary {
    pub chain_id: char,
    pub start: isize,
    pub end: isize,
    pub offset: Option<isize>,
    pub observed: usize,
    pub canonical_length: usize,
    /// Canonical residues outside the standard amino acid table.
    pub nonstandard: usize,
    pub sequence: String,
}

#[derive(Debug, Serialize)]
pub struct SiteSummary {
    pub name: String,
    pub residues: Vec<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EntrySummary<'a> {
    pub id: Option<&'a str>,
    pub metadata: Option<&'a EntryMetadata>,
    pub total_length: usize,
    pub chains: Vec<ChainSummary>,
    /// Accession → number of covered reference positions.
    pub references: BTreeMap<String, usize>,
    pub sites: Vec<SiteSummary>,
    pub hetero_groups: &'a [String],
}

impl<'a> EntrySummary<'a> {
    pub fn from_structure(structure: &'a Structure) -> Self {
        let chains = structure
            .chain_ids()
            .map(|chain_id| {
                let bounds = structure.bounds(chain_id);
                let canonical = structure.canonical_sequence_string(chain_id).unwrap_or_default();
                ChainSummary {
                    chain_id,
                    start: bounds.map_or(0, |b| b.start),
                    end: bounds.map_or(0, |b| b.end),
                    offset: structure.offset(chain_id),
                    observed: structure.chain_residues(chain_id).map_or(0, Iterator::count),
                    canonical_length: canonical.chars().count(),
                    nonstandard: canonical.chars().filter(|&c| !is_amino_acid(c)).count(),
                    sequence: canonical,
                }
            })
            .collect();

        let references = structure
            .reference_accessions()
            .map(|acc| (acc.to_string(), structure.reference_coverage(acc).unwrap_or(0)))
            .collect();

        let sites = structure
            .site_names()
            .into_iter()
            .map(|name| SiteSummary {
                name: name.to_string(),
                residues: structure
                    .site_residues(name)
                    .unwrap_or_default()
                    .into_iter()
                    .map(residue_label)
                    .collect(),
                description: structure.site_description(name).map(str::to_string),
            })
            .collect();

        Self {
            id: structure.id(),
            metadata: structure.metadata(),
            total_length: structure.total_length(),
            chains,
            references,
            sites,
            hetero_groups: structure.hetero_groups(),
        }
    }

    /// One-line summary used by batch output.
    pub fn to_line(&self) -> String {
        let chains: String = self.chains.iter().map(|c| c.chain_id).collect();
        let resolution = self
            .metadata
            .map_or_else(|| "-".to_string(), |m| format!("{:.2}", m.resolution));
        format!(
            "{}\tchains={}\tresidues={}\tresolution={}\treferences={}\tsites={}",
            self.id.unwrap_or("-"),
            chains,
            self.total_length,
            resolution,
            self.references.len(),
            self.sites.len()
        )
    }
}

/// Multi-line human readable summary.
impl fmt::Display for EntrySummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Entry {}", self.id.unwrap_or("-"))?;
        if let Some(meta) = self.metadata {
            writeln!(f, "  Title:      {}", meta.title)?;
            writeln!(f, "  Method:     {}", meta.method)?;
            writeln!(f, "  Resolution: {:.2} Å", meta.resolution)?;
            writeln!(f, "  Deposited:  {}", meta.deposition_date)?;
        }
        writeln!(f, "  Residues:   {}", self.total_length)?;

        writeln!(f, "Chains:")?;
        for chain in &self.chains {
            let offset = chain.offset.map_or_else(|| "-".to_string(), |o| o.to_string());
            writeln!(
                f,
                "  {}  {}..{}  offset {}  observed {}/{}  {}",
                chain.chain_id,
                chain.start,
                chain.end,
                offset,
                chain.observed,
                chain.canonical_length,
                chain.sequence
            )?;
        }

        if !self.references.is_empty() {
            writeln!(f, "References:")?;
            for (accession, covered) in &self.references {
                writeln!(f, "  {accession}  {covered} positions")?;
            }
        }
        if !self.sites.is_empty() {
            writeln!(f, "Sites:")?;
            for site in &self.sites {
                writeln!(
                    f,
                    "  {}  [{}]  {}",
                    site.name,
                    site.residues.join(", "),
                    site.description.as_deref().unwrap_or("")
                )?;
            }
        }
        if !self.hetero_groups.is_empty() {
            writeln!(f, "Hetero groups: {}", self.hetero_groups.join(", "))?;
        }
        Ok(())
    }
}

/// Short label such as `HIS B103`.
pub fn residue_label(residue: &Residue) -> String {
    format!(
        "{} {}{}",
        residue.code3().to_uppercase(),
        residue.chain_id,
        residue.struct_position
    )
}

/// One line describing a residue in every numbering.
pub fn residue_detail(residue: &Residue) -> String {
    let canonical = residue
        .position
        .map_or_else(|| "-".to_string(), |p| p.to_string());
    let reference = residue.reference.as_ref().map_or_else(
        || "-".to_string(),
        |r| format!("{}:{}", r.accession, r.position),
    );
    format!(
        "{}  name={}  canonical={}  reference={}  atoms={}  mean_b={:.2}  z={:.2}",
        residue_label(residue),
        residue.name(),
        canonical,
        reference,
        residue.atoms().len(),
        residue.mean_b_factor,
        residue.norm_mean_b_factor
    )
}

/// One CSV row of the residue table.
#[derive(Debug, Serialize, PartialEq)]
pub struct ResidueRow {
    pub chain: char,
    pub struct_position: isize,
    pub canonical_position: Option<isize>,
    pub name: String,
    pub code3: String,
    pub code1: char,
    pub accession: Option<String>,
    pub reference_position: Option<isize>,
    pub atoms: usize,
    pub mean_b_factor: f64,
    pub norm_mean_b_factor: f64,
    pub sites: String,
}

fn round_to(value: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Residue rows in chain then source-position order.
pub fn residue_rows(structure: &Structure, precision: usize, include_unmapped: bool) -> Vec<ResidueRow> {
    let site_names = structure.site_names();
    let mut rows = Vec::new();

    for chain_id in structure.chain_ids() {
        let Some(residues) = structure.chain_residues(chain_id) else {
            continue;
        };
        for residue in residues {
            if !include_unmapped && residue.reference.is_none() {
                continue;
            }
            let sites: Vec<&str> = site_names
                .iter()
                .copied()
                .filter(|name| {
                    structure
                        .site_residues(name)
                        .is_some_and(|members| members.iter().any(|m| std::ptr::eq(*m, residue)))
                })
                .collect();
            rows.push(ResidueRow {
                chain: residue.chain_id,
                struct_position: residue.struct_position,
                canonical_position: residue.position,
                name: residue.name().to_string(),
                code3: residue.code3().to_string(),
                code1: residue.code1(),
                accession: residue.reference_accession().map(str::to_string),
                reference_position: residue.reference_position(),
                atoms: residue.atoms().len(),
                mean_b_factor: round_to(residue.mean_b_factor, precision),
                norm_mean_b_factor: round_to(residue.norm_mean_b_factor, precision),
                sites: sites.join(";"),
            });
        }
    }
    rows
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use strucmap::core::models::mapping::{RangeMapping, ReferenceMappings};
    use strucmap::engine::config::LoadConfig;
    use strucmap::engine::progress::ProgressReporter;
    use strucmap::workflows::load::{self, StructureInput};

    pub(crate) const PDB: &str = "\
SEQRES   1 A    6  MET LYS HIS GLY CYS ALA
SITE     1 AC1  2 HIS A  12  CYS A  14
ATOM      1  CA  LYS A  11       1.000   0.000   0.000  1.00 10.00           C
ATOM      2  CA  HIS A  12       4.800   0.000   0.000  1.00 20.00           C
ATOM      3  CA  GLY A  13       8.600   0.000   0.000  1.00 30.00           C
ATOM      4  CA  CYS A  14      12.400   0.000   0.000  1.00 40.00           C
HETATM    5 ZN    ZN A 101      10.000   2.000   0.000  1.00 15.00          ZN
END";

    pub(crate) const CIF: &str = "\
data_9TST
_struct.title 'Test entry'
_exptl.method 'SOLUTION NMR'
_refine.ls_d_res_high 2.5
_pdbx_database_status.recvd_initial_deposition_date 2020-02-29
";

    pub(crate) fn mappings() -> ReferenceMappings {
        let mut mappings = ReferenceMappings::new();
        mappings.add_range("Q00001", RangeMapping::new('A', 2..=4, 40..=42));
        mappings
    }

    pub(crate) fn structure() -> Structure {
        let input = StructureInput::new(PDB.to_string(), CIF.to_string())
            .with_id("9TST")
            .with_mappings(mappings());
        load::run(input, &LoadConfig::default(), &ProgressReporter::new()).unwrap()
    }

    #[test]
    fn summary_collects_chains_references_and_sites() {
        let structure = structure();
        let summary = EntrySummary::from_structure(&structure);

        assert_eq!(summary.id, Some("9TST"));
        assert_eq!(summary.total_length, 4);
        assert_eq!(summary.chains.len(), 1);
        let chain = &summary.chains[0];
        assert_eq!((chain.start, chain.end, chain.offset), (11, 14, Some(1)));
        assert_eq!(chain.sequence, "MKHGCA");
        assert_eq!(chain.nonstandard, 0);
        assert_eq!(summary.references.get("Q00001"), Some(&3));
        assert_eq!(summary.sites[0].residues, vec!["HIS A12", "CYS A14"]);
        assert_eq!(summary.hetero_groups, &["ZN".to_string()]);
    }

    #[test]
    fn text_and_line_renderings_mention_key_facts() {
        let structure = structure();
        let summary = EntrySummary::from_structure(&structure);

        let text = summary.to_string();
        assert!(text.contains("Entry 9TST"));
        assert!(text.contains("Resolution: 2.50"));
        assert!(text.contains("Deposited:  2020-02-29"));
        assert!(text.contains("offset 1"));
        assert!(text.contains("Q00001  3 positions"));
        assert!(text.contains("Hetero groups: ZN"));

        let line = summary.to_line();
        assert!(line.starts_with("9TST\tchains=A\tresidues=4"));
        assert!(line.contains("sites=1"));
    }

    #[test]
    fn summary_serializes_to_json() {
        let structure = structure();
        let json = serde_json::to_value(EntrySummary::from_structure(&structure)).unwrap();
        assert_eq!(json["metadata"]["deposition_date"], "2020-02-29");
        assert_eq!(json["chains"][0]["chain_id"], "A");
        assert_eq!(json["references"]["Q00001"], 3);
    }

    #[test]
    fn rows_carry_every_numbering_and_site_membership() {
        let structure = structure();
        let rows = residue_rows(&structure, 2, true);

        assert_eq!(rows.len(), 4);
        let his = &rows[1];
        assert_eq!((his.chain, his.struct_position, his.canonical_position), ('A', 12, Some(3)));
        assert_eq!(his.accession.as_deref(), Some("Q00001"));
        assert_eq!(his.reference_position, Some(41));
        assert_eq!(his.sites, "AC1");
        assert_eq!(rows[2].sites, "");

        let mapped = residue_rows(&structure, 2, false);
        assert_eq!(mapped.len(), 3);
        assert!(mapped.iter().all(|row| row.accession.is_some()));
    }

    #[test]
    fn detail_line_shows_all_coordinates() {
        let structure = structure();
        let detail = residue_detail(structure.residue_at('A', 12).unwrap());
        assert!(detail.starts_with("HIS A12"));
        assert!(detail.contains("canonical=3"));
        assert!(detail.contains("reference=Q00001:41"));
        assert!(detail.contains("mean_b=20.00"));
    }
}
