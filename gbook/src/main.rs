use color_eyre::eyre::{Result, bail};
use gbook::{
  build,
  cli::{Cli, Commands},
  config::Config,
  watch,
};
use log::{LevelFilter, info};

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init { output, force } => {
      // Check if file already exists and that we're not forcing overwrite
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      Config::generate_default_config(output)?;
      info!(
        "Configuration file created at {}. Edit it to customize site \
         generation.",
        output.display()
      );
      Ok(())
    },

    Commands::Build(opts) => {
      let config = Config::load(opts)?;
      build::build(&config)?;
      Ok(())
    },

    Commands::Watch(opts) => {
      let config = Config::load(opts)?;
      watch::watch(&config)?;
      Ok(())
    },
  }
}
