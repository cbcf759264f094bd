//! Tracing subscriber setup.
//!
//! | Flag(s)   | Filter                               |
//! |-----------|--------------------------------------|
//! | (none)    | `info,marketplace=debug,sqlx=warn`   |
//! | `-v`      | `debug,sqlx=info`                    |
//! | `-vv`     | `trace`                              |
//! | `--quiet` | `error`                              |
//!
//! `RUST_LOG` overrides all of the above. Logs go to stderr so command
//! output on stdout stays pipeable.

use tracing_subscriber::EnvFilter;

use crate::cli::GlobalArgs;

/// Installs the global subscriber. Call once, before any command runs.
pub fn init_tracing(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(args)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))
}

fn default_directives(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "info,marketplace=debug,sqlx=warn",
        1 => "debug,sqlx=info",
        _ => "trace",
    }
}
