use crate::{AcmgRating, FrontendSettings, GeneRecord, GenomeRelease, SeqvarQuery};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Session came up; load version and settings.
    Started,
    /// Gene record rehydrated from storage (or nothing stored yet).
    GeneRestored(Option<GeneRecord>),
    /// User asked for a gene by symbol.
    GeneSearchSubmitted {
        symbol: String,
        release: GenomeRelease,
    },
    /// User asked for the ACMG rating of a sequence variant.
    AcmgRequested(SeqvarQuery),
    VersionLoaded(Result<String, String>),
    SettingsLoaded(Result<FrontendSettings, String>),
    GeneLoaded(Result<GeneRecord, String>),
    AcmgLoaded(Result<AcmgRating, String>),
    /// Outcome of mirroring a fetched gene into storage.
    GenePersisted(Result<GeneRecord, String>),
}
