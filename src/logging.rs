// Logging setup.
// Errors go to stderr, everything else to stdout. The debug flag from the
// command line decides whether debug records are emitted at all.

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

fn max_level(debug: bool) -> Level {
    if debug {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install the process-wide subscriber. Later calls are no-ops.
pub fn init(debug: bool) {
    let writer = std::io::stderr.with_max_level(Level::ERROR).or_else(std::io::stdout);
    let _ = tracing_subscriber::fmt()
        .with_max_level(max_level(debug))
        .with_target(false)
        .with_writer(writer)
        .try_init();
}
