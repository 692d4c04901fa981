use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

/// Set up stderr logging. Stdout stays reserved for the confirmation line.
///
/// Default level is WARN; `RUST_LOG` (target=level list, e.g. `placeholder_shot=debug`)
/// overrides it when it parses.
pub fn init_logging() {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(Level::WARN));

    let format = tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
