use camino::Utf8PathBuf;
use indexmap::IndexSet;
use serde::Serialize;
use tracing::{info, warn};

use crate::assembly_report::extract_taxid;
use crate::config::ResolvedConfig;
use crate::domain::{Accession, GenomeInfoRecord};
use crate::download::{Destination, GenomeFetcher};
use crate::error::GenomesError;
use crate::listing::{DirectoryLocator, FtpListingLocator};
use crate::records::write_records;
use crate::taxonomy::TaxonomyLookup;
use crate::transport::Transport;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub csv_output: Option<Utf8PathBuf>,
    /// Genomes are downloaded only when set.
    pub download: Option<Destination>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadedGenome {
    pub ident: String,
    pub path: String,
    pub bytes: u64,
    pub info_csv: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub records: Vec<GenomeInfoRecord>,
    pub csv_output: Option<String>,
    pub downloads: Vec<DownloadedGenome>,
}

pub struct App<T: Transport, L: DirectoryLocator = FtpListingLocator> {
    transport: T,
    locator: L,
    taxonomy: TaxonomyLookup,
}

impl<T: Transport> App<T, FtpListingLocator> {
    pub fn new(transport: T, config: &ResolvedConfig) -> Self {
        Self::with_locator(
            transport,
            FtpListingLocator::new(&config.genomes_base_url),
            config,
        )
    }
}

impl<T: Transport, L: DirectoryLocator> App<T, L> {
    pub fn with_locator(transport: T, locator: L, config: &ResolvedConfig) -> Self {
        Self {
            transport,
            locator,
            taxonomy: TaxonomyLookup::new(&config.taxonomy_url),
        }
    }

    /// Resolves every accession (duplicates dropped, first-seen order kept),
    /// then writes the CSV and downloads genomes as requested. Each downloaded
    /// genome gets a one-row `<accession>.info.csv` beside it. Any error other
    /// than a missing taxid aborts the whole batch.
    pub fn run(
        &self,
        accessions: &[Accession],
        options: &RunOptions,
    ) -> Result<RunResult, GenomesError> {
        let unique = accessions.iter().collect::<IndexSet<_>>();

        let mut records = Vec::with_capacity(unique.len());
        for accession in unique {
            info!("starting work on '{accession}'");
            let record = self.resolve(accession)?;
            info!("info retrieved for {accession} - {}", record.display_name());
            records.push(record);
        }

        if let Some(path) = &options.csv_output {
            info!("writing CSV output to '{path}'");
            write_records(path, &records)?;
        }

        let mut downloads = Vec::new();
        if let Some(destination) = &options.download {
            for record in &records {
                if record.genome_url().is_none() {
                    warn!("skipping download for {}: no genome URL", record.ident());
                    continue;
                }
                let (path, bytes) = GenomeFetcher::download(&self.transport, record, destination)?;
                info!("wrote {bytes} bytes to '{path}'");
                let info_csv = destination.info_path_for(record);
                write_records(&info_csv, std::slice::from_ref(record))?;
                downloads.push(DownloadedGenome {
                    ident: record.ident().to_string(),
                    path: path.to_string(),
                    bytes,
                    info_csv: info_csv.to_string(),
                });
            }
        }

        Ok(RunResult {
            records,
            csv_output: options.csv_output.as_ref().map(|path| path.to_string()),
            downloads,
        })
    }

    /// Listing → assembly report → taxonomy name for one accession.
    pub fn resolve(&self, accession: &Accession) -> Result<GenomeInfoRecord, GenomesError> {
        let Some(urls) = self.locator.resolve_directory(&self.transport, accession)? else {
            warn!("no assembly directory found for {accession}");
            return Ok(GenomeInfoRecord::new(accession.as_str(), None, String::new()));
        };

        let display_name = match extract_taxid(&self.transport, &urls.assembly_report_url) {
            Ok(taxid) => self.taxonomy.lookup_name(&self.transport, &taxid)?,
            Err(err @ GenomesError::TaxidNotFound(_)) => {
                warn!("{err}; leaving display name empty");
                String::new()
            }
            Err(err) => return Err(err),
        };

        Ok(GenomeInfoRecord::new(
            accession.as_str(),
            Some(urls),
            display_name,
        ))
    }
}
