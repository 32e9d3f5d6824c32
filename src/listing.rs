use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::{Accession, AssemblyUrls};
use crate::error::GenomesError;
use crate::transport::Transport;

pub const DEFAULT_GENOMES_BASE_URL: &str = "https://ftp.ncbi.nlm.nih.gov/genomes/all";

static HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*<a href="([^"]*)""#).expect("valid href pattern"));

/// Finds the assembly directory that holds an accession's files.
pub trait DirectoryLocator {
    /// `Ok(None)` means the listing was fetched but holds no matching entry.
    fn resolve_directory(
        &self,
        transport: &dyn Transport,
        accession: &Accession,
    ) -> Result<Option<AssemblyUrls>, GenomesError>;
}

/// Locates assemblies by scraping the HTML index pages of the genomes FTP tree.
#[derive(Debug, Clone)]
pub struct FtpListingLocator {
    base_url: String,
}

impl FtpListingLocator {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn directory_url(&self, accession: &Accession) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            accession.db(),
            accession.grouped_number()
        )
    }
}

impl Default for FtpListingLocator {
    fn default() -> Self {
        Self::new(DEFAULT_GENOMES_BASE_URL)
    }
}

impl DirectoryLocator for FtpListingLocator {
    fn resolve_directory(
        &self,
        transport: &dyn Transport,
        accession: &Accession,
    ) -> Result<Option<AssemblyUrls>, GenomesError> {
        let url = self.directory_url(accession);
        debug!("opening directory: {url}");
        let listing = transport.fetch_text(&url)?;
        debug!("done!");

        let entries = parse_listing(&listing);
        let Some(name) = find_entry(&entries, accession) else {
            return Ok(None);
        };
        Ok(Some(AssemblyUrls {
            genome_url: format!("{url}/{name}/{name}_genomic.fna.gz"),
            assembly_report_url: format!("{url}/{name}/{name}_assembly_report.txt"),
        }))
    }
}

/// Entry names linked from a directory index page, in page order.
pub fn parse_listing(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| HREF.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().trim_end_matches('/').to_string())
        .collect()
}

/// First entry whose database matches and whose accession part starts with
/// the query, so `GCA_002440745` also matches `GCA_002440745.1_ASM244074v1`.
pub fn find_entry<'a>(entries: &'a [String], accession: &Accession) -> Option<&'a str> {
    entries
        .iter()
        .map(String::as_str)
        .find(|name| {
            let mut parts = name.split('_');
            match (parts.next(), parts.next()) {
                (Some(db), Some(acc)) => db == accession.db() && acc.starts_with(accession.acc()),
                _ => false,
            }
        })
}
