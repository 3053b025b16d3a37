use std::env;
use std::process::ExitCode;

use log::{debug, info};

use spkmeans::{Invocation, PipelineConfig, Verbosity};

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .try_init();
}

fn run() -> spkmeans::Result<String> {
    let invocation = Invocation::from_args(env::args().skip(1))?;
    info!(
        "Running goal {} on {:?} (k = {:?})",
        invocation.goal, invocation.path, invocation.k
    );
    invocation.run(PipelineConfig::default())
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!("{}", err);
            println!("{}", Verbosity::from_env().message(&err));
            ExitCode::FAILURE
        }
    }
}
