pub mod fasta;
pub mod fastq;
pub mod stats;

pub use fasta::read_fasta;
pub use fastq::open_fastq;
pub use fastq::read_pair_chunks;
pub use fastq::ListRecordPair;
pub use fastq::RecordPair;
pub use stats::print_funnel_report;
pub use stats::print_id_breakdown;
pub use stats::write_stats_files;
