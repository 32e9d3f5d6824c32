use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum GenomesError {
    #[error("invalid accession '{0}': expected exactly one underscore, e.g. GCA_002440745.1")]
    #[diagnostic(code(ncbi_genomes::accession))]
    InvalidAccessionFormat(String),

    #[error("request to {url} failed: {message}")]
    Fetch { url: String, message: String },

    #[error("{url} returned status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("no 'Taxid:' line in assembly report {0}")]
    TaxidNotFound(String),

    #[error("failed to parse taxonomy response: {0}")]
    Parse(String),

    #[error("no genome URL resolved for {0}")]
    MissingGenomeUrl(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("no accessions given")]
    #[diagnostic(help("pass accessions as arguments or with --from-file"))]
    NoAccessions,

    #[error("nothing to do")]
    #[diagnostic(help("request CSV output with -o/--output and/or genome download with --download"))]
    NothingToDo,

    #[error("--download requires --output-dir")]
    MissingOutputDir,
}

impl GenomesError {
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            GenomesError::InvalidAccessionFormat(_)
                | GenomesError::NoAccessions
                | GenomesError::NothingToDo
                | GenomesError::MissingOutputDir
        )
    }

    pub fn is_network(&self) -> bool {
        matches!(
            self,
            GenomesError::Fetch { .. } | GenomesError::FetchStatus { .. }
        )
    }

    /// Process exit status: 2 for usage errors, 3 for network errors, 1
    /// otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_usage() {
            2
        } else if self.is_network() {
            3
        } else {
            1
        }
    }
}
