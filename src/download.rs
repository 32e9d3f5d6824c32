use std::fs;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::domain::GenomeInfoRecord;
use crate::error::GenomesError;
use crate::transport::Transport;

/// Where a genome archive is written. Without a filename the record's
/// `<accession>.genomic.fna.gz` is used; without a directory the path is
/// relative to the working directory.
#[derive(Debug, Clone, Default)]
pub struct Destination {
    pub output_dir: Option<Utf8PathBuf>,
    pub filename: Option<String>,
}

impl Destination {
    pub fn in_dir(dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            output_dir: Some(dir.into()),
            filename: None,
        }
    }

    pub fn path_for(&self, record: &GenomeInfoRecord) -> Utf8PathBuf {
        let filename = self
            .filename
            .clone()
            .unwrap_or_else(|| record.default_filename());
        match &self.output_dir {
            Some(dir) => dir.join(filename),
            None => Utf8PathBuf::from(filename),
        }
    }

    /// `<accession>.info.csv` in the same directory as the genome.
    pub fn info_path_for(&self, record: &GenomeInfoRecord) -> Utf8PathBuf {
        let filename = format!("{}.info.csv", record.ident());
        match &self.output_dir {
            Some(dir) => dir.join(filename),
            None => Utf8PathBuf::from(filename),
        }
    }
}

pub struct GenomeFetcher;

impl GenomeFetcher {
    /// Downloads the record's genome archive and returns the written path and
    /// its size in bytes. An existing file at the target path is replaced.
    pub fn download(
        transport: &dyn Transport,
        record: &GenomeInfoRecord,
        destination: &Destination,
    ) -> Result<(Utf8PathBuf, u64), GenomesError> {
        let url = record
            .genome_url()
            .ok_or_else(|| GenomesError::MissingGenomeUrl(record.ident().to_string()))?;
        if let Some(dir) = &destination.output_dir {
            ensure_dir(dir)?;
        }
        let path = destination.path_for(record);

        debug!("downloading genome: {url}");
        let bytes = transport.fetch(url)?;
        write_bytes_atomic(&path, &bytes)?;
        debug!(path = %path, bytes = bytes.len(), "genome written");
        Ok((path, bytes.len() as u64))
    }
}

fn ensure_dir(dir: &Utf8Path) -> Result<(), GenomesError> {
    fs::create_dir_all(dir.as_std_path())
        .map_err(|err| GenomesError::Filesystem(format!("create {dir}: {err}")))
}

pub fn write_bytes_atomic(path: &Utf8Path, content: &[u8]) -> Result<(), GenomesError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".ncbi-genomes")
        .tempfile_in(parent.as_std_path())
        .map_err(|err| GenomesError::Filesystem(format!("create temp file in {parent}: {err}")))?;
    temp.write_all(content)
        .map_err(|err| GenomesError::Filesystem(format!("write {path}: {err}")))?;
    temp.persist(path.as_std_path())
        .map_err(|err| GenomesError::Filesystem(format!("write {path}: {}", err.error)))?;
    Ok(())
}
