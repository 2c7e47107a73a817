use anyhow::Context;
use clap::Parser;
use deskedit::cli::{self, CliArgs};
use deskedit::config::EditorConfig;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let (config, config_error) = match deskedit::config::load_editor_config() {
        Ok(config) => (config, None),
        Err(err) => (EditorConfig::default(), Some(err)),
    };

    deskedit::logging::init(args.debug || config.debug_logging);
    tracing::info!("starting deskedit");
    if let Some(err) = config_error {
        tracing::warn!(%err, "unusable config.json; using defaults");
    }

    cli::run(&args, &config)
        .with_context(|| format!("failed to process {}", args.input.display()))?;
    Ok(())
}
