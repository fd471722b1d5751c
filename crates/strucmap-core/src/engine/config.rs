/// Options controlling which pipeline stages a load runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// Entry identifier stored on the structure and used to pick the SIFTS entry.
    pub entry_id: Option<String>,
    /// Resolve `SITE` records and `REMARK 800` descriptions.
    pub extract_sites: bool,
    /// Keep `HETATM` records as hetero atoms.
    pub scan_hetero_atoms: bool,
    /// Parse metadata on a second rayon task while the atom pipeline runs.
    pub concurrent_metadata: bool,
    /// Project reference positions when mappings are supplied.
    pub resolve_reference_positions: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            entry_id: None,
            extract_sites: true,
            scan_hetero_atoms: true,
            concurrent_metadata: true,
            resolve_reference_positions: true,
        }
    }
}

#[derive(Default)]
pub struct LoadConfigBuilder {
    entry_id: Option<String>,
    extract_sites: Option<bool>,
    scan_hetero_atoms: Option<bool>,
    concurrent_metadata: Option<bool>,
    resolve_reference_positions: Option<bool>,
}

impl LoadConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_id(mut self, id: impl Into<String>) -> Self {
        self.entry_id = Some(id.into());
        self
    }
    pub fn extract_sites(mut self, enabled: bool) -> Self {
        self.extract_sites = Some(enabled);
        self
    }
    pub fn scan_hetero_atoms(mut self, enabled: bool) -> Self {
        self.scan_hetero_atoms = Some(enabled);
        self
    }
    pub fn concurrent_metadata(mut self, enabled: bool) -> Self {
        self.concurrent_metadata = Some(enabled);
        self
    }
    pub fn resolve_reference_positions(mut self, enabled: bool) -> Self {
        self.resolve_reference_positions = Some(enabled);
        self
    }

    /// Unset options take their [`LoadConfig::default`] values.
    pub fn build(self) -> LoadConfig {
        let defaults = LoadConfig::default();
        LoadConfig {
            entry_id: self.entry_id,
            extract_sites: self.extract_sites.unwrap_or(defaults.extract_sites),
            scan_hetero_atoms: self.scan_hetero_atoms.unwrap_or(defaults.scan_hetero_atoms),
            concurrent_metadata: self
                .concurrent_metadata
                .unwrap_or(defaults.concurrent_metadata),
            resolve_reference_positions: self
                .resolve_reference_positions
                .unwrap_or(defaults.resolve_reference_positions),
        }
    }
}
