use clap::Parser;
use log::LevelFilter;

mod args;
mod cli;
use args::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
