use std::fs;

use camino::Utf8Path;
use csv::{ReaderBuilder, WriterBuilder};

use crate::domain::GenomeInfoRecord;
use crate::error::GenomesError;

pub const COLUMNS: [&str; 4] = ["ident", "genome_url", "assembly_report_url", "display_name"];

/// Writes the header followed by one row per record. Unresolved URLs become
/// empty fields.
pub fn write_records(path: &Utf8Path, records: &[GenomeInfoRecord]) -> Result<(), GenomesError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
        fs::create_dir_all(parent.as_std_path())
            .map_err(|err| GenomesError::Filesystem(format!("create {parent}: {err}")))?;
    }
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_path(path.as_std_path())
        .map_err(|err| GenomesError::Csv(format!("{path}: {err}")))?;
    wtr.write_record(COLUMNS)
        .map_err(|err| GenomesError::Csv(format!("{path}: {err}")))?;
    for record in records {
        wtr.serialize(record)
            .map_err(|err| GenomesError::Csv(format!("{path}: {err}")))?;
    }
    wtr.flush()
        .map_err(|err| GenomesError::Filesystem(format!("write {path}: {err}")))?;
    Ok(())
}

pub fn read_records(path: &Utf8Path) -> Result<Vec<GenomeInfoRecord>, GenomesError> {
    let mut rdr = ReaderBuilder::new()
        .from_path(path.as_std_path())
        .map_err(|err| GenomesError::Csv(format!("{path}: {err}")))?;
    rdr.deserialize()
        .collect::<Result<Vec<GenomeInfoRecord>, _>>()
        .map_err(|err| GenomesError::Csv(format!("{path}: {err}")))
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;

    use super::*;
    use crate::domain::AssemblyUrls;

    #[test]
    fn empty_batch_still_has_header() {
        let temp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("info.csv")).unwrap();
        write_records(&path, &[]).unwrap();
        let content = fs::read_to_string(path.as_std_path()).unwrap();
        assert_eq!(content, "ident,genome_url,assembly_report_url,display_name\n");
    }

    #[test]
    fn rows_follow_column_order() {
        let temp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("nested/info.csv")).unwrap();
        let record = GenomeInfoRecord::new(
            "GCA_1_x",
            Some(AssemblyUrls {
                genome_url: "g".to_string(),
                assembly_report_url: "r".to_string(),
            }),
            "Name, with comma".to_string(),
        );
        write_records(&path, &[record]).unwrap();
        let content = fs::read_to_string(path.as_std_path()).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert_eq!(row, "GCA_1_x,g,r,\"Name, with comma\"");
    }
}
