use crate::view_model::{AppViewModel, PendingGeneSearch};
use crate::{AcmgRating, FrontendSettings, GeneRecord, GenomeRelease, SeqvarQuery};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    version: Option<String>,
    settings: Option<FrontendSettings>,
    gene: Option<GeneRecord>,
    pending_gene_search: Option<PendingGeneSearch>,
    acmg_query: Option<SeqvarQuery>,
    acmg_rating: Option<AcmgRating>,
    errors: Vec<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            version: self.version.clone(),
            settings: self.settings.clone(),
            gene: self.gene.clone(),
            pending_gene_search: self.pending_gene_search.clone(),
            acmg_query: self.acmg_query.clone(),
            acmg_rating: self.acmg_rating.clone(),
            errors: self.errors.clone(),
            dirty: self.dirty,
        }
    }

    pub fn gene(&self) -> Option<&GeneRecord> {
        self.gene.as_ref()
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_version(&mut self, version: String) {
        self.version = Some(version);
        self.dirty = true;
    }

    pub(crate) fn set_settings(&mut self, settings: FrontendSettings) {
        self.settings = Some(settings);
        self.dirty = true;
    }

    pub(crate) fn restore_gene(&mut self, gene: GeneRecord) {
        self.gene = Some(gene);
        self.dirty = true;
    }

    pub(crate) fn begin_gene_search(&mut self, symbol: String, release: GenomeRelease) {
        self.pending_gene_search = Some(PendingGeneSearch { symbol, release });
        self.dirty = true;
    }

    /// Replaces the current gene wholesale and closes the pending search.
    pub(crate) fn finish_gene_search(&mut self, gene: GeneRecord) {
        self.pending_gene_search = None;
        self.gene = Some(gene);
        self.dirty = true;
    }

    pub(crate) fn fail_gene_search(&mut self, error: String) {
        let context = match self.pending_gene_search.take() {
            Some(search) => format!("gene search {} ({})", search.symbol, search.release),
            None => "gene search".to_string(),
        };
        self.record_error(&context, &error);
    }

    pub(crate) fn begin_acmg(&mut self, query: SeqvarQuery) {
        self.acmg_query = Some(query);
        self.acmg_rating = None;
        self.dirty = true;
    }

    pub(crate) fn set_acmg_rating(&mut self, rating: AcmgRating) {
        self.acmg_rating = Some(rating);
        self.dirty = true;
    }

    pub(crate) fn record_error(&mut self, context: &str, error: &str) {
        self.errors.push(format!("{context}: {error}"));
        self.dirty = true;
    }
}
