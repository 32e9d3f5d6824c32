use camino::Utf8PathBuf;

use ncbi_genomes::app::{App, RunOptions};
use ncbi_genomes::config::ResolvedConfig;
use ncbi_genomes::domain::Accession;
use ncbi_genomes::download::Destination;
use ncbi_genomes::records::read_records;
use ncbi_genomes::transport::HttpTransport;

#[test]
#[ignore]
fn fetch_real_assembly() {
    let temp = tempfile::tempdir().unwrap();
    let out_dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
    let csv_path = out_dir.join("GCA_002440745.1.info.csv");
    let config = ResolvedConfig::default();
    let app = App::new(HttpTransport::new(config.timeout).unwrap(), &config);
    let acc: Accession = "GCA_002440745.1".parse().unwrap();

    let options = RunOptions {
        csv_output: Some(csv_path.clone()),
        download: Some(Destination::in_dir(out_dir.clone())),
    };
    let result = app.run(&[acc], &options).unwrap();

    let record = &result.records[0];
    assert!(record.genome_url().unwrap().ends_with("_genomic.fna.gz"));
    assert!(
        record
            .assembly_report_url()
            .unwrap()
            .ends_with("_assembly_report.txt")
    );
    let genome = out_dir.join("GCA_002440745.1.genomic.fna.gz");
    assert!(std::fs::metadata(genome.as_std_path()).unwrap().len() > 0);
    assert_eq!(read_records(&csv_path).unwrap().len(), 1);
}
