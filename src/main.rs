// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, open the records file and hand it
//   to the UI loop.
// - Returns `anyhow::Result` so a failed load or save exits non-zero.

use anyhow::Context;
use healthrec_cli::{
    config::Config,
    store::RecordStore,
    ui::{main_menu, DialoguerPrompter},
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; quiet by default so they don't interleave with
    // prompts. `RUST_LOG=healthrec_cli=debug` for more.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("healthrec_cli=warn")),
        )
        .init();

    let config = Config::from_env();
    let mut store = RecordStore::open(&config.data_file)
        .with_context(|| format!("Opening records file {:?}", config.data_file))?;
    tracing::debug!("Using records file {:?}", store.path());

    // Start the interactive menu. This call blocks until the user quits.
    main_menu(&mut store, &mut DialoguerPrompter)?;
    Ok(())
}
