pub mod demux;

pub use demux::Demux;
pub use demux::DemuxCMD;

///////////////////////////////
/// How many worker threads to run; defaults to what the machine offers
pub fn determine_thread_count(num_threads_total: Option<usize>) -> usize {
    let n = num_threads_total.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });
    n.max(1)
}
