//! Config command - Manage node configuration

use eyre::Result;
use tracing::info;

use crate::{cli::ConfigArgs, config::PodiumConfig, dirs::DataDirs};

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    let dirs = DataDirs::new(&args.datadir)?;
    let path = dirs.config_file();

    if args.init {
        if path.exists() {
            info!("Configuration already exists at {}", path.display());
        } else {
            PodiumConfig::default().save(&path)?;
            info!("Wrote default configuration to {}", path.display());
        }
    }

    if args.show || !args.init {
        let config = PodiumConfig::load_or_create(&path)?;
        config.validate()?;
        println!("# {}", path.display());
        print!("{}", config.to_toml()?);
    }

    Ok(())
}
