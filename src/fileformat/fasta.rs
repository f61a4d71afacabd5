use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use log::{debug, warn};
use seq_io::fasta::Reader as FastaReader;
use seq_io::fasta::Record as FastaRecord;

///////////////////////////////
/// Read a FASTA file into (tag, sequence) pairs, in file order.
/// Possibly gzip-compressed. Malformed records are warned about, not
/// rejected: parsing stops at the first bad record and whatever was read
/// so far is returned.
pub fn read_fasta(path: &PathBuf) -> anyhow::Result<Vec<(String, Vec<u8>)>> {
    let file = File::open(path)
        .with_context(|| format!("Could not open fasta file {}", path.display()))?;
    let (reader, compression) = niffler::get_reader(Box::new(file))
        .with_context(|| format!("Could not read fasta file {}", path.display()))?;
    debug!(
        "Opened file {} with compression {:?}",
        path.display(),
        compression
    );

    let mut reader = FastaReader::new(reader);
    let mut records: Vec<(String, Vec<u8>)> = vec![];
    while let Some(result) = reader.next() {
        match result {
            Ok(record) => {
                let tag = String::from_utf8_lossy(record.head()).to_string();
                let seq = record.full_seq().to_vec();
                records.push((tag, seq));
            }
            Err(e) => {
                warn!(
                    "Malformed record in {} after {} records: {}",
                    path.display(),
                    records.len(),
                    e
                );
                break;
            }
        }
    }

    if records.is_empty() {
        warn!("No records in fasta file {}", path.display());
    }
    Ok(records)
}
