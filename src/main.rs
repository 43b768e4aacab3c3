use anyhow::Context;
use clap::Parser;
use hospital_records::domain::ports::ConfigProvider;
use hospital_records::utils::logger;
use hospital_records::{CliConfig, HospitalManagement, LocalStorage, Menu};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    logger::init_logger(&config).context("Failed to initialise logging")?;

    tracing::info!("Starting hospital records manager");
    tracing::debug!("Resolved config: {:?}", config);

    let storage = LocalStorage::new(config.data_file());
    let mut store = HospitalManagement::open(storage);
    if !store.is_synced() {
        println!("Error loading data!");
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Menu::new(&mut store, stdin.lock(), stdout.lock())
        .run()
        .context("Menu terminated unexpectedly")?;

    tracing::info!("Exiting");
    Ok(())
}
