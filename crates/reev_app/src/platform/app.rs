use std::collections::VecDeque;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use reev_core::{update, AppState, AppViewModel, GenomeRelease, Msg, SeqvarQuery};
use reev_engine::{FileStorage, GeneStore, KeyValueStorage};
use reev_logging::{reev_error, reev_info};

use super::config::{apply_env_overrides, load_config, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};

#[derive(Debug, Parser)]
#[command(name = "reev_app", about = "Headless REEV client: gene lookup and ACMG rating")]
pub struct Cli {
    /// RON configuration file.
    #[arg(long, default_value = CONFIG_FILENAME)]
    pub config: PathBuf,
    /// Gene symbol to look up, e.g. BRCA1.
    #[arg(long)]
    pub gene: Option<String>,
    #[arg(long, default_value = "grch37")]
    pub release: GenomeRelease,
    /// Sequence variant to rate.
    #[arg(long, value_name = "CHROM:POS:REF:ALT")]
    pub variant: Option<String>,
    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,
    #[arg(short, long)]
    pub verbose: bool,
}

/// One application session: reducer state plus the runner owning clients
/// and the gene store.
pub struct Session<S> {
    state: AppState,
    runner: EffectRunner<S>,
}

impl<S: KeyValueStorage> Session<S> {
    /// Starts from whatever the store rehydrated.
    pub fn new(runner: EffectRunner<S>) -> Self {
        let restored = runner.store().gene_data().cloned();
        let (state, _) = update(AppState::new(), Msg::GeneRestored(restored));
        Self { state, runner }
    }

    /// Feeds `msg` through the reducer and runs effects until nothing is left.
    pub async fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                if let Some(next) = self.runner.run(effect).await {
                    inbox.push_back(next);
                }
            }
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn store(&self) -> &GeneStore<S> {
        self.runner.store()
    }
}

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(cli.log, level);

    let config = apply_env_overrides(load_config(&cli.config)?, |name| {
        std::env::var(name).ok()
    });
    let acmg_query = cli
        .variant
        .as_deref()
        .map(|variant| SeqvarQuery::parse(cli.release, variant))
        .transpose()
        .context("parsing --variant")?;

    let store = GeneStore::open(FileStorage::new(&config.data_dir))
        .with_context(|| format!("opening gene store in {}", config.data_dir.display()))?;
    let runner =
        EffectRunner::new(&config.client_config(), store).context("building API clients")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    let mut session = Session::new(runner);
    runtime.block_on(async {
        session.dispatch(Msg::Started).await;
        if let Some(symbol) = cli.gene {
            session
                .dispatch(Msg::GeneSearchSubmitted {
                    symbol,
                    release: cli.release,
                })
                .await;
        }
        if let Some(query) = acmg_query {
            session.dispatch(Msg::AcmgRequested(query)).await;
        }
    });

    let view = session.view();
    for error in &view.errors {
        reev_error!("{}", error);
    }
    reev_info!("Session finished with {} error(s)", view.errors.len());
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
