use quick_xml::Writer;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tracing::debug;

use crate::error::GenomesError;
use crate::transport::Transport;

pub const DEFAULT_TAXONOMY_URL: &str = "https://www.ncbi.nlm.nih.gov/taxonomy/";

/// Resolves a taxid to the organism name rendered by the NCBI taxonomy
/// browser in its plain-text report.
#[derive(Debug, Clone)]
pub struct TaxonomyLookup {
    base_url: String,
}

impl TaxonomyLookup {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    pub fn query_url(&self, taxid: &str) -> String {
        format!(
            "{}?term={}&report=taxon&format=text",
            self.base_url, taxid
        )
    }

    pub fn lookup_name(
        &self,
        transport: &dyn Transport,
        taxid: &str,
    ) -> Result<String, GenomesError> {
        let url = self.query_url(taxid);
        debug!("opening tax url: {url}");
        let content = transport.fetch_text(&url)?;
        debug!("done!");

        parse_display_name(&content)
    }
}

impl Default for TaxonomyLookup {
    fn default() -> Self {
        Self::new(DEFAULT_TAXONOMY_URL)
    }
}

/// Parses the response as a single-rooted document, serializes the root back
/// out and drops a `<pre>` wrapper around it. Entities stay escaped, as in the
/// serialized document.
pub fn parse_display_name(content: &str) -> Result<String, GenomesError> {
    let root = serialize_root(content)?;
    let inner = root.strip_prefix("<pre>").unwrap_or(&root);
    let inner = inner.strip_suffix("</pre>").unwrap_or(inner);
    Ok(inner.trim().to_string())
}

fn serialize_root(content: &str) -> Result<String, GenomesError> {
    let mut reader = Reader::from_str(content);
    let mut writer = Writer::new(Vec::new());
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|err| GenomesError::Parse(err.to_string()))?;
        match event {
            Event::Eof => break,
            Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_)
                if depth == 0 =>
            {
                continue;
            }
            Event::Text(ref text) if depth == 0 => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(GenomesError::Parse(
                        "text content outside the root element".to_string(),
                    ));
                }
                continue;
            }
            Event::Start(_) | Event::Empty(_) if depth == 0 && seen_root => {
                return Err(GenomesError::Parse(
                    "extra content after the root element".to_string(),
                ));
            }
            Event::Start(_) => {
                depth += 1;
                seen_root = true;
            }
            Event::Empty(_) => {
                seen_root = true;
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| GenomesError::Parse("unexpected end tag".to_string()))?;
            }
            _ => {}
        }
        writer
            .write_event(event)
            .map_err(|err| GenomesError::Parse(err.to_string()))?;
    }

    if !seen_root {
        return Err(GenomesError::Parse("document is empty".to_string()));
    }
    if depth != 0 {
        return Err(GenomesError::Parse("unclosed element".to_string()));
    }
    String::from_utf8(writer.into_inner()).map_err(|err| GenomesError::Parse(err.to_string()))
}
