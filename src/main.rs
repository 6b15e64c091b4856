use taskflow::error::exit_code_for;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Warnings by default; RUST_LOG overrides. Output goes to stderr.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(err) = taskflow::run() {
        eprintln!("error: {err:#}");
        std::process::exit(exit_code_for(&err));
    }
}
