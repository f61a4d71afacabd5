use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use crossbeam::channel::Sender;
use log::{debug, warn};
use seq_io::fastq::OwnedRecord;
use seq_io::fastq::Reader as FastqReader;

///////////////////////////////
/// One read pair, as read from the two mate files in lockstep
#[derive(Debug, Clone)]
pub struct RecordPair {
    pub r1: OwnedRecord,
    pub r2: OwnedRecord,
}

pub type ListRecordPair = Arc<Vec<RecordPair>>;

/// Chunking keeps workers asleep until they have enough to do and
/// amortizes the channel send
const CHUNK_SIZE: usize = 1000;

///////////////////////////////
/// Open a FASTQ file, possibly gzip-compressed
pub fn open_fastq(path: &PathBuf) -> anyhow::Result<FastqReader<Box<dyn std::io::Read>>> {
    let file = File::open(path)
        .with_context(|| format!("Could not open fastq file {}", path.display()))?;
    let (reader, compression) = niffler::get_reader(Box::new(file))
        .with_context(|| format!("Could not read fastq file {}", path.display()))?;
    debug!(
        "Opened file {} with compression {:?}",
        path.display(),
        compression
    );
    Ok(FastqReader::new(reader))
}

///////////////////////////////
/// Read both mate files in lockstep and send chunks of pairs to the
/// worker threads. `max_reads` of 0 means unlimited. Unequal files are
/// truncated to the shorter one with a warning.
pub fn read_pair_chunks(
    r1_file: &mut FastqReader<Box<dyn std::io::Read>>,
    r2_file: &mut FastqReader<Box<dyn std::io::Read>>,
    max_reads: usize,
    tx: &Sender<Option<ListRecordPair>>,
) -> usize {
    let mut num_read = 0;
    let mut done = false;
    while !done {
        let mut list_recpair: Vec<RecordPair> = Vec::with_capacity(CHUNK_SIZE);
        while list_recpair.len() < CHUNK_SIZE {
            if max_reads > 0 && num_read >= max_reads {
                done = true;
                break;
            }

            let r1 = match r1_file.next() {
                Some(record) => record.expect("Error reading record from mate 1 file"),
                None => {
                    done = true;
                    break;
                }
            };
            let r2 = match r2_file.next() {
                Some(record) => record.expect("Error reading record from mate 2 file"),
                None => {
                    warn!("Mate 2 file has fewer records than mate 1 file; truncating");
                    done = true;
                    break;
                }
            };

            list_recpair.push(RecordPair {
                r1: r1.to_owned_record(),
                r2: r2.to_owned_record(),
            });
            num_read += 1;

            if num_read % 100000 == 0 {
                println!("read: {:?}", num_read);
            }
        }

        if !list_recpair.is_empty() {
            let _ = tx.send(Some(Arc::new(list_recpair)));
        }
    }
    num_read
}
