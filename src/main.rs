use clap::Parser;
use ruuvi_relay::app::{Options, run};
use std::panic::{self, PanicHookInfo};
use tracing::{Level, error};
use tracing_subscriber::EnvFilter;

/// Exit codes for the application
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_PANIC: i32 = 2;

/// Install the `tracing` subscriber. `RUST_LOG` wins over `--log-level`.
fn init_tracing(options: &Options) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = options
            .log_level()
            .parse::<Level>()
            .unwrap_or(Level::INFO);
        EnvFilter::default().add_directive(level.into())
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    let options = Options::parse();
    init_tracing(&options);

    // Request handlers run on spawned tasks, so a panic there is reported to the
    // caller as a 500. Anything else panicking takes the process down with a
    // distinct exit code for the supervisor.
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info: &PanicHookInfo| {
        let on_runtime_worker = std::thread::current()
            .name()
            .is_some_and(|name| name.starts_with("tokio-runtime-worker"));
        if on_runtime_worker {
            error!("handler panicked: {info}");
            default_hook(info);
        } else {
            eprintln!("Panic! {}", info);
            std::process::exit(EXIT_PANIC);
        }
    }));

    match run(options).await {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(why) => {
            error!("{why}");
            eprintln!("error: {}", why);
            std::process::exit(EXIT_ERROR);
        }
    }
}
