#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;

use ncbi_genomes::error::GenomesError;
use ncbi_genomes::transport::Transport;

pub const DIR_URL: &str = "https://ftp.ncbi.nlm.nih.gov/genomes/all/GCA/002/440/745";
pub const ENTRY: &str = "GCA_002440745.1_ASM244074v1";
pub const TAX_URL: &str =
    "https://www.ncbi.nlm.nih.gov/taxonomy/?term=1898047&report=taxon&format=text";
pub const GENOME_BYTES: &[u8] = b"\x1f\x8b\x08\x00fake-gzip-payload";

/// Serves canned responses keyed by URL and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: HashMap<String, Vec<u8>>,
    pub requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.to_string(), body.into());
        self
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|requested| requested.as_str() == url)
            .count()
    }
}

impl Transport for MockTransport {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, GenomesError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| GenomesError::FetchStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}

pub fn fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{name}")).unwrap()
}

pub fn genome_url() -> String {
    format!("{DIR_URL}/{ENTRY}/{ENTRY}_genomic.fna.gz")
}

pub fn report_url() -> String {
    format!("{DIR_URL}/{ENTRY}/{ENTRY}_assembly_report.txt")
}

/// Everything needed to resolve and download GCA_002440745.1.
pub fn pelagibacter_transport() -> MockTransport {
    MockTransport::default()
        .with(DIR_URL, fixture("listing_GCA_002440745.html"))
        .with(&report_url(), fixture("assembly_report_GCA_002440745.1.txt"))
        .with(TAX_URL, fixture("taxonomy_1898047.html"))
        .with(&genome_url(), GENOME_BYTES.to_vec())
}
