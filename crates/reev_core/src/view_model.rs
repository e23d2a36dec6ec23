use serde::Serialize;

use crate::{AcmgRating, FrontendSettings, GeneRecord, GenomeRelease, SeqvarQuery};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingGeneSearch {
    pub symbol: String,
    pub release: GenomeRelease,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AppViewModel {
    pub version: Option<String>,
    pub settings: Option<FrontendSettings>,
    pub gene: Option<GeneRecord>,
    pub pending_gene_search: Option<PendingGeneSearch>,
    pub acmg_query: Option<SeqvarQuery>,
    pub acmg_rating: Option<AcmgRating>,
    pub errors: Vec<String>,
    #[serde(skip)]
    pub dirty: bool,
}
