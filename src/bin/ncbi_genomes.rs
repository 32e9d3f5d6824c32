use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ncbi_genomes::cli::{COMMAND_NAME, GetGenomesArgs, run_get_genomes};

#[derive(Parser)]
#[command(name = "ncbi-genomes")]
#[command(about = "Retrieve genome assemblies and their metadata from NCBI")]
#[command(version, author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = COMMAND_NAME, about = "retrieve one or more NCBI Genomes")]
    GetGenomes(GetGenomesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Commands::GetGenomes(args) = cli.command;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run_get_genomes(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(code)
        }
    }
}
