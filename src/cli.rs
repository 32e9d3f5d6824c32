//! The `get-genomes` subcommand. A host CLI mounts [`GetGenomesArgs`] as a
//! subcommand and calls [`run_get_genomes`].

use std::fs;

use camino::Utf8PathBuf;
use clap::Args;

use crate::app::{App, RunOptions, RunResult};
use crate::config::ConfigLoader;
use crate::domain::Accession;
use crate::download::Destination;
use crate::error::GenomesError;
use crate::output::JsonOutput;
use crate::transport::HttpTransport;

pub const COMMAND_NAME: &str = "get-genomes";

#[derive(Debug, Clone, Default, Args)]
pub struct GetGenomesArgs {
    /// Assembly accessions, e.g. GCA_002440745.1
    pub accessions: Vec<String>,

    /// Read additional accessions from a file, one per line
    #[arg(long, value_name = "FILE")]
    pub from_file: Option<Utf8PathBuf>,

    /// Output CSV
    #[arg(short, long, value_name = "CSV")]
    pub output: Option<Utf8PathBuf>,

    /// Directory for downloaded genomes
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<Utf8PathBuf>,

    /// Download the genome of each accession
    #[arg(long)]
    pub download: bool,

    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Print the resolved records as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Turn on verbose reporting
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Turn off non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl GetGenomesArgs {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "info,ncbi_genomes=debug"
        } else {
            "info"
        }
    }

    /// Positional accessions followed by those from `--from-file`. Blank
    /// lines and `#` comments in the file are ignored.
    pub fn collect_accessions(&self) -> Result<Vec<Accession>, GenomesError> {
        let mut raw = self.accessions.clone();
        if let Some(path) = &self.from_file {
            let content = fs::read_to_string(path.as_std_path())
                .map_err(|err| GenomesError::Filesystem(format!("read {path}: {err}")))?;
            raw.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(str::to_string),
            );
        }
        raw.iter().map(|value| value.parse()).collect()
    }

    pub fn run_options(&self) -> Result<RunOptions, GenomesError> {
        if self.output.is_none() && !self.download {
            return Err(GenomesError::NothingToDo);
        }
        let download = if self.download {
            let dir = self
                .output_dir
                .clone()
                .ok_or(GenomesError::MissingOutputDir)?;
            Some(Destination::in_dir(dir))
        } else {
            None
        };
        Ok(RunOptions {
            csv_output: self.output.clone(),
            download,
        })
    }
}

pub fn run_get_genomes(args: &GetGenomesArgs) -> Result<RunResult, GenomesError> {
    let accessions = args.collect_accessions()?;
    if accessions.is_empty() {
        return Err(GenomesError::NoAccessions);
    }
    let options = args.run_options()?;
    let config = ConfigLoader::resolve(args.config.as_deref())?;

    let transport = HttpTransport::new(config.timeout)?;
    let app = App::new(transport, &config);
    let result = app.run(&accessions, &options)?;

    if args.json {
        JsonOutput::print_run(&result)
            .map_err(|err| GenomesError::Filesystem(format!("write stdout: {err}")))?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn args(accessions: &[&str]) -> GetGenomesArgs {
        GetGenomesArgs {
            accessions: accessions.iter().map(|s| s.to_string()).collect(),
            ..GetGenomesArgs::default()
        }
    }

    #[test]
    fn log_level_follows_flags() {
        let mut args = args(&[]);
        assert_eq!(args.log_level(), "info");
        args.verbose = true;
        assert_eq!(args.log_level(), "info,ncbi_genomes=debug");
        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), "error");
    }

    #[test]
    fn nothing_requested_is_rejected() {
        let args = args(&["GCA_002440745.1"]);
        assert_matches!(args.run_options(), Err(GenomesError::NothingToDo));
    }

    #[test]
    fn download_needs_output_dir() {
        let mut args = args(&["GCA_002440745.1"]);
        args.download = true;
        assert_matches!(args.run_options(), Err(GenomesError::MissingOutputDir));

        args.output_dir = Some(Utf8PathBuf::from("out"));
        let options = args.run_options().unwrap();
        assert!(options.download.is_some());
        assert!(options.csv_output.is_none());
    }

    #[test]
    fn no_accessions_fails_before_network() {
        let mut args = args(&[]);
        args.output = Some(Utf8PathBuf::from("out.csv"));
        assert_matches!(run_get_genomes(&args), Err(GenomesError::NoAccessions));
    }

    #[test]
    fn accessions_file_skips_comments() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("accs.txt");
        fs::write(&path, "# batch\nGCA_002440745.1\n\n  GCF_000005845.2  \n").unwrap();

        let mut args = args(&["GCA_000000001.1"]);
        args.from_file = Some(Utf8PathBuf::from_path_buf(path).unwrap());
        let accessions = args.collect_accessions().unwrap();
        let names = accessions.iter().map(Accession::as_str).collect::<Vec<_>>();
        assert_eq!(names, vec!["GCA_000000001.1", "GCA_002440745.1", "GCF_000005845.2"]);
    }

    #[test]
    fn malformed_accession_is_reported() {
        let args = args(&["GCA002440745"]);
        assert_matches!(
            args.collect_accessions(),
            Err(GenomesError::InvalidAccessionFormat(_))
        );
    }
}
