use reev_core::{Effect, Msg};
use reev_engine::{
    AcmgClient, ClientConfig, ClientError, GeneSearchClient, GeneStore, KeyValueStorage,
    MiscClient, SettingsClient,
};
use reev_logging::{reev_error, reev_info, reev_warn};

/// Executes reducer effects against the API clients and the gene store.
pub struct EffectRunner<S> {
    misc: MiscClient,
    settings: SettingsClient,
    genes: GeneSearchClient,
    acmg: AcmgClient,
    store: GeneStore<S>,
}

impl<S: KeyValueStorage> EffectRunner<S> {
    pub fn new(config: &ClientConfig, store: GeneStore<S>) -> Result<Self, ClientError> {
        Ok(Self {
            misc: MiscClient::new(config)?,
            settings: SettingsClient::new(config)?,
            genes: GeneSearchClient::new(config)?,
            acmg: AcmgClient::new(config)?,
            store,
        })
    }

    pub fn store(&self) -> &GeneStore<S> {
        &self.store
    }

    /// Runs one effect; fetches come back as the message carrying their result.
    pub async fn run(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::FetchVersion => {
                let result = self.misc.fetch_version().await;
                Some(Msg::VersionLoaded(report("version", result)))
            }
            Effect::FetchSettings => {
                let result = self.settings.fetch_frontend_settings().await;
                Some(Msg::SettingsLoaded(report("frontend settings", result)))
            }
            Effect::SearchGene { symbol, release } => {
                reev_info!("SearchGene symbol={} release={}", symbol, release);
                let result = self.genes.search_gene(&symbol, release).await;
                Some(Msg::GeneLoaded(report("gene search", result)))
            }
            Effect::FetchAcmgRating(query) => {
                reev_info!("FetchAcmgRating variant={}", query);
                let result = self.acmg.fetch_acmg_rating(&query).await;
                Some(Msg::AcmgLoaded(report("acmg rating", result)))
            }
            Effect::PersistGene(record) => {
                let result = match self.store.set_gene_data(record.clone()) {
                    Ok(()) => Ok(record),
                    Err(err) => {
                        reev_error!("Failed to persist gene data: {}", err);
                        Err(err.to_string())
                    }
                };
                Some(Msg::GenePersisted(result))
            }
        }
    }
}

fn report<T>(what: &str, result: Result<T, ClientError>) -> Result<T, String> {
    result.map_err(|err| {
        reev_warn!("{} failed: {}", what, err);
        err.to_string()
    })
}
