use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;
mod terminal;

fn main() -> ExitCode {
    disable_core_dumps();

    let args: Vec<String> = env::args().collect();
    let flags = match cli::parse(&args) {
        Ok(flags) => flags,
        Err(e) => {
            cli::prompts::error(&format!("{e}\nRun `xkpass --help` for usage."));
            return ExitCode::from(2);
        }
    };

    init_logging(flags.log_filter());
    cli::run(flags)
}

/// Log to stderr. `--quiet`/`--verbose` win over `RUST_LOG`, default `warn`.
fn init_logging(flag_filter: Option<&str>) {
    let filter = match flag_filter {
        Some(filter) => EnvFilter::new(filter),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .try_init();
}

/// Keep passwords out of core dumps.
#[cfg(target_os = "linux")]
fn disable_core_dumps() {
    unsafe { libc::prctl(libc::PR_SET_DUMPABLE, 0) };
}

#[cfg(not(target_os = "linux"))]
fn disable_core_dumps() {}
