use clap::Parser;

fn main() -> anyhow::Result<()> {
    reev_app::run_app(reev_app::Cli::parse())
}
