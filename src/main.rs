use clap::Parser;

use crate::opts::{Opts, Subcommand};
use crate::prelude::*;

mod models;
mod opts;
mod predictor;
mod prelude;
mod tracing;
mod web;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = crate::tracing::init(opts.sentry_dsn.clone(), opts.traces_sample_rate)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting…");

    let result = run_subcommand(opts).await;
    if let Err(error) = &result {
        error!("fatal error: {:#}", error);
    }
    result
}

async fn run_subcommand(opts: Opts) -> Result {
    match opts.subcommand {
        Subcommand::Web(opts) => web::run(opts).await,
    }
}
