use anyhow::Result;
use clap::Parser;
use covcompare::analysis::{self, AnalysisError};
use covcompare::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = args.into_config();
    tracing::debug!("analysis config: {:?}", config);

    if let Err(err) = analysis::run(&config) {
        // No report was produced; keep the message in the progress style
        if let Some(AnalysisError::NoCoverage { .. }) = err.downcast_ref::<AnalysisError>() {
            eprintln!("❌ {}", err);
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}
