use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use clap::Args;
use log::{debug, info};
use seq_io::fastq::Record as FastqRecord;

use super::determine_thread_count;
use crate::aggregate::{Funnel, StatsMatrices};
use crate::fileformat;
use crate::fileformat::ListRecordPair;
use crate::matching;
use crate::params::{
    DemuxParams, DEFAULT_BARCODE_LENGTHS, DEFAULT_ID_MATCH_CUTOFF, DEFAULT_STOP_MATCH_CUTOFF,
};
use crate::refmodel::RefModel;

pub const DEFAULT_PATH_OUTDIR: &str = ".";

#[derive(Args)]
pub struct DemuxCMD {
    // FASTQ for mate 1 (carries ID and RNA barcode blocks)
    #[arg(short = '1', value_parser)]
    pub path_forward: PathBuf,

    // FASTQ for mate 2 (reads into the RT stop region)
    #[arg(short = '2', value_parser)]
    pub path_reverse: PathBuf,

    // Reference RNA sequences
    #[arg(short = 'r', long = "rna", value_parser)]
    pub path_rna: PathBuf,

    // Adapter sequence; first record is used
    #[arg(short = 'a', long = "adapter", value_parser)]
    pub path_adapter: PathBuf,

    // RT primer sequences
    #[arg(short = 'p', long = "primers", value_parser)]
    pub path_primers: PathBuf,

    // Optional: cap on read pairs consumed; 0 = unlimited
    #[arg(short = 'N', long = "max-reads", value_parser, default_value_t = 0)]
    pub max_reads: usize,

    // Optional: mismatch cutoff for primer ID matching
    #[arg(long = "id-cutoff", value_parser, default_value_t = DEFAULT_ID_MATCH_CUTOFF)]
    pub id_cutoff: usize,

    // Optional: mismatch cutoff for RT stop location
    #[arg(long = "stop-cutoff", value_parser, default_value_t = DEFAULT_STOP_MATCH_CUTOFF)]
    pub stop_cutoff: usize,

    // Optional: barcode block lengths, outermost first
    #[arg(long = "barcode-lengths", value_parser, default_value = DEFAULT_BARCODE_LENGTHS)]
    pub barcode_lengths: String,

    // Output directory for the per-condition stats files
    #[arg(short = 'o', long = "outdir", value_parser, default_value = DEFAULT_PATH_OUTDIR)]
    pub path_outdir: PathBuf,

    // Thread settings
    #[arg(short = '@', value_parser = clap::value_parser!(usize))]
    num_threads_total: Option<usize>,
}

impl DemuxCMD {
    /// Run the commandline option.
    /// Takes raw paired FASTQ files, assigns each pair to a condition,
    /// RNA and RT stop, and writes one count matrix per condition.
    pub fn try_execute(&mut self) -> Result<()> {
        let barcode_lengths = parse_barcode_lengths(&self.barcode_lengths)?;

        let num_threads_work = determine_thread_count(self.num_threads_total);
        println!("Using threads: {}", num_threads_work);

        let params = DemuxParams {
            id_match_cutoff: self.id_cutoff,
            stop_match_cutoff: self.stop_cutoff,
            barcode_lengths,
            max_reads: self.max_reads,
        };

        let demux = Demux {
            path_forward: self.path_forward.clone(),
            path_reverse: self.path_reverse.clone(),
            path_rna: self.path_rna.clone(),
            path_adapter: self.path_adapter.clone(),
            path_primers: self.path_primers.clone(),
            path_outdir: self.path_outdir.clone(),
            params,
            threads_work: num_threads_work,
        };
        Demux::run(Arc::new(demux))?;

        println!("Demux has finished successfully");
        Ok(())
    }
}

fn parse_barcode_lengths(spec: &str) -> Result<Vec<usize>> {
    let mut lengths: Vec<usize> = vec![];
    for part in spec.split(',') {
        let m: usize = match part.trim().parse() {
            Ok(m) => m,
            Err(_) => bail!("Cannot parse barcode block length '{}'", part),
        };
        if m == 0 {
            bail!("Barcode block lengths must be nonzero");
        }
        lengths.push(m);
    }
    if lengths.is_empty() {
        bail!("No barcode block lengths given");
    }
    Ok(lengths)
}

////////////////
///
pub struct Demux {
    pub path_forward: PathBuf,
    pub path_reverse: PathBuf,
    pub path_rna: PathBuf,
    pub path_adapter: PathBuf,
    pub path_primers: PathBuf,
    pub path_outdir: PathBuf,

    pub params: DemuxParams,
    pub threads_work: usize,
}

impl Demux {
    pub fn run(params: Arc<Demux>) -> Result<()> {
        info!("Running command: demux");

        // Load the reference model up front; bad reference data is fatal
        // before any read is touched
        let rna_records = fileformat::read_fasta(&params.path_rna)?;
        let adapter_records = fileformat::read_fasta(&params.path_adapter)?;
        let primer_records = fileformat::read_fasta(&params.path_primers)?;

        let adapter = match adapter_records.first() {
            Some((_tag, seq)) => seq.clone(),
            None => bail!(
                "No adapter sequence in {}",
                params.path_adapter.display()
            ),
        };

        let model = RefModel::build(
            rna_records,
            &adapter,
            primer_records,
            &params.params.barcode_lengths,
        )?;
        let model = Arc::new(model);
        println!(
            "Parsed {} reference RNAs (longest {} nt), {} primers, ID length {} nt",
            model.rnas.len(),
            model.rnas.max_len(),
            model.primers.len(),
            model.primers.id_length()
        );

        if !params.path_outdir.exists() {
            fs::create_dir_all(&params.path_outdir)?;
        }

        // Open fastq files
        let mut forward_file = fileformat::open_fastq(&params.path_forward)?;
        let mut reverse_file = fileformat::open_fastq(&params.path_reverse)?;

        // Start worker threads. Each worker keeps a private funnel and a
        // private matrix set; merging afterwards is a plain sum, so shard
        // order cannot change the result. Limit how many chunks can be in
        // the air at the same time.
        let partials = Arc::new(Mutex::new(Vec::<(Funnel, StatsMatrices)>::new()));
        let thread_pool_work = threadpool::ThreadPool::new(params.threads_work);
        let (tx, rx) = crossbeam::channel::bounded::<Option<ListRecordPair>>(100);

        for tidx in 0..params.threads_work {
            let rx = rx.clone();
            let model = Arc::clone(&model);
            let run_params = params.params.clone();
            let partials = Arc::clone(&partials);
            debug!("Starting worker thread {}", tidx);

            thread_pool_work.execute(move || {
                let mut funnel = Funnel::new();
                let mut stats = StatsMatrices::new(
                    model.primers.len(),
                    model.rnas.len(),
                    model.rnas.max_len(),
                );

                while let Ok(Some(list_pairs)) = rx.recv() {
                    for pair in list_pairs.iter() {
                        let records = matching::classify_pair(
                            &model,
                            &run_params,
                            pair.r1.seq(),
                            pair.r2.seq(),
                            &mut funnel,
                        );
                        for rec in &records {
                            stats.record(rec);
                        }
                    }
                }

                let mut partials = partials.lock().unwrap();
                partials.push((funnel, stats));
            });
        }

        // Read the fastq files, send to worker threads
        println!("Starting to read input files");
        let num_read = fileformat::read_pair_chunks(
            &mut forward_file,
            &mut reverse_file,
            params.params.max_reads,
            &tx,
        );
        println!("Finished reading: {} read pairs", num_read);

        // Send termination signals to workers, then wait for them to complete
        for _ in 0..params.threads_work {
            let _ = tx.send(None);
        }
        thread_pool_work.join();

        // Merge the per-worker partial results
        let mut funnel = Funnel::new();
        let mut stats = StatsMatrices::new(
            model.primers.len(),
            model.rnas.len(),
            model.rnas.max_len(),
        );
        {
            let partials = partials.lock().unwrap();
            for (one_funnel, one_stats) in partials.iter() {
                funnel.merge(one_funnel);
                stats.merge(one_stats);
            }
        }

        fileformat::print_funnel_report(&funnel);
        fileformat::print_id_breakdown(&stats, &model.primers);
        fileformat::write_stats_files(&params.path_outdir, &stats)?;

        info!("done!");
        Ok(())
    }
}
