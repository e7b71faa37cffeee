mod cli;

use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::Cli::parse();
    cli::init_logging(args.verbose);
    cli::run(args)
}
