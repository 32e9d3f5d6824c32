use tracing::debug;

use crate::error::GenomesError;
use crate::transport::Transport;

const TAXID_LABEL: &str = "Taxid:";

pub fn extract_taxid(
    transport: &dyn Transport,
    assembly_report_url: &str,
) -> Result<String, GenomesError> {
    debug!("opening assembly report: {assembly_report_url}");
    let report = transport.fetch_text(assembly_report_url)?;
    debug!("done!");

    parse_taxid(&report)
        .ok_or_else(|| GenomesError::TaxidNotFound(assembly_report_url.to_string()))
}

/// Value of the first `Taxid:` line, e.g. `# Taxid:          1915` gives `1915`.
pub fn parse_taxid(report: &str) -> Option<String> {
    report.lines().find_map(|line| {
        let (_, rest) = line.split_once(TAXID_LABEL)?;
        Some(rest.trim().to_string())
    })
}
