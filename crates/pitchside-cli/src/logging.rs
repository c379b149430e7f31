use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "pitchside=info";
const VERBOSE_DIRECTIVE: &str = "pitchside=debug";

/// Installs a stderr subscriber so logs never mix with command output.
///
/// `RUST_LOG` wins when set; otherwise core and CLI log at info, or debug
/// with `--verbose`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    // An already-installed subscriber is kept.
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init();
}

fn default_directives(verbose: bool) -> String {
    let level = if verbose {
        VERBOSE_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    };
    format!("{level},{}", level.replacen("pitchside", "pitchside_core", 1))
}
