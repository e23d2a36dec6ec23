use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::FetchVersion, Effect::FetchSettings],
        Msg::GeneRestored(restored) => {
            if let Some(gene) = restored {
                state.restore_gene(gene);
            }
            Vec::new()
        }
        Msg::GeneSearchSubmitted { symbol, release } => {
            let symbol = symbol.trim();
            if symbol.is_empty() {
                return (state, Vec::new());
            }
            state.begin_gene_search(symbol.to_string(), release);
            vec![Effect::SearchGene {
                symbol: symbol.to_string(),
                release,
            }]
        }
        Msg::AcmgRequested(query) => {
            state.begin_acmg(query.clone());
            vec![Effect::FetchAcmgRating(query)]
        }
        Msg::VersionLoaded(result) => {
            match result {
                Ok(version) => state.set_version(version),
                Err(err) => state.record_error("version", &err),
            }
            Vec::new()
        }
        Msg::SettingsLoaded(result) => {
            match result {
                Ok(settings) => state.set_settings(settings),
                Err(err) => state.record_error("frontend settings", &err),
            }
            Vec::new()
        }
        Msg::GeneLoaded(result) => match result {
            // The view only switches once the record is in storage.
            Ok(gene) => vec![Effect::PersistGene(gene)],
            Err(err) => {
                state.fail_gene_search(err);
                Vec::new()
            }
        },
        Msg::GenePersisted(result) => {
            match result {
                Ok(gene) => state.finish_gene_search(gene),
                Err(err) => state.fail_gene_search(format!("saving gene data: {err}")),
            }
            Vec::new()
        }
        Msg::AcmgLoaded(result) => {
            match result {
                Ok(rating) => state.set_acmg_rating(rating),
                Err(err) => state.record_error("acmg rating", &err),
            }
            Vec::new()
        }
    };

    (state, effects)
}
