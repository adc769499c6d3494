mod cli;
mod commands;

use clap::Parser;

use crate::cli::CliArgs;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    if let Err(err) = commands::run(args).await {
        let report = miette::miette!("{:#}", err);
        eprintln!("{:?}", report);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
