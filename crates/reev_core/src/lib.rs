//! REEV core: domain records and the pure session reducer.
mod effect;
mod msg;
mod record;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use record::{
    AcmgRating, FrontendSettings, GeneRecord, GenomeRelease, ParseReleaseError, RecordError,
    SeqvarQuery,
};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, PendingGeneSearch};
