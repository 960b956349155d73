use anyhow::Result;
use tracing_subscriber::EnvFilter;
use trophy_harvest::{
    cli::{Cli, Commands},
    fetch::HttpClients,
    pipeline::{run, RandomPacer, RunMode},
    schema::table_names,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse_args();
    let config = cli.config();

    let mode = match cli.command() {
        Commands::Run => RunMode::Full,
        Commands::Decks => RunMode::DecksOnly,
        Commands::ListTables => {
            println!("Tables in {:?}:\n", config.database);
            for name in table_names() {
                println!("  {}", name);
            }
            return Ok(());
        }
    };

    let clients = HttpClients::from_config(&config)?;
    let mut pacer = RandomPacer::new(config.pacing.clone());

    run(&config, &clients.services(), &mut pacer, mode)?;

    Ok(())
}
