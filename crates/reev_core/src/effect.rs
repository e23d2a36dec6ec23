use crate::{GeneRecord, GenomeRelease, SeqvarQuery};

/// IO the reducer asks the platform layer to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchVersion,
    FetchSettings,
    SearchGene {
        symbol: String,
        release: GenomeRelease,
    },
    FetchAcmgRating(SeqvarQuery),
    /// Mirror the record into persistent storage; answered by `GenePersisted`.
    PersistGene(GeneRecord),
}
