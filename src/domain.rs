use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenomesError;

/// An assembly accession of the form `<DB>_<NUMBER>[.<VERSION>]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accession {
    raw: String,
    db: String,
    acc: String,
}

impl Accession {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Database code, e.g. `GCA`.
    pub fn db(&self) -> &str {
        &self.db
    }

    /// Everything after the underscore, version included.
    pub fn acc(&self) -> &str {
        &self.acc
    }

    pub fn number(&self) -> &str {
        match self.acc.split_once('.') {
            Some((number, _)) => number,
            None => &self.acc,
        }
    }

    pub fn version(&self) -> &str {
        match self.acc.split_once('.') {
            Some((_, version)) => version,
            None => "1",
        }
    }

    /// `000005845` becomes `000/005/845`.
    pub fn grouped_number(&self) -> String {
        let chars = self.number().chars().collect::<Vec<_>>();
        chars
            .chunks(3)
            .map(|group| group.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for Accession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for Accession {
    type Err = GenomesError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let parts = trimmed.split('_').collect::<Vec<_>>();
        let [db, acc] = parts.as_slice() else {
            return Err(GenomesError::InvalidAccessionFormat(value.to_string()));
        };
        if db.is_empty() || acc.is_empty() {
            return Err(GenomesError::InvalidAccessionFormat(value.to_string()));
        }
        Ok(Self {
            raw: trimmed.to_string(),
            db: db.to_string(),
            acc: acc.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyUrls {
    pub genome_url: String,
    pub assembly_report_url: String,
}

/// Resolved information for one accession. Column order of the CSV output
/// follows field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomeInfoRecord {
    ident: String,
    genome_url: Option<String>,
    assembly_report_url: Option<String>,
    display_name: String,
}

impl GenomeInfoRecord {
    pub fn new(ident: &str, urls: Option<AssemblyUrls>, display_name: String) -> Self {
        let (genome_url, assembly_report_url) = match urls {
            Some(urls) => (Some(urls.genome_url), Some(urls.assembly_report_url)),
            None => (None, None),
        };
        Self {
            ident: ident.to_string(),
            genome_url,
            assembly_report_url,
            display_name,
        }
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn genome_url(&self) -> Option<&str> {
        self.genome_url.as_deref()
    }

    pub fn assembly_report_url(&self) -> Option<&str> {
        self.assembly_report_url.as_deref()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn default_filename(&self) -> String {
        format!("{}.genomic.fna.gz", self.ident)
    }
}
