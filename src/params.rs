pub const DEFAULT_ID_MATCH_CUTOFF: usize = 2;
pub const DEFAULT_STOP_MATCH_CUTOFF: usize = 4;
pub const DEFAULT_BARCODE_LENGTHS: &str = "7,4,8,20";

///////////////////////////////
/// Run-wide matching parameters, threaded explicitly through model
/// construction and the per-read matching stages
#[derive(Debug, Clone)]
pub struct DemuxParams {
    /// Max mismatches tolerated when matching the primer ID
    pub id_match_cutoff: usize,

    /// Max mismatches tolerated when locating the RT stop in mate 2
    pub stop_match_cutoff: usize,

    /// Barcode block lengths, outermost block (nearest the 3' end) first
    pub barcode_lengths: Vec<usize>,

    /// Cap on read pairs consumed; 0 means unlimited
    pub max_reads: usize,
}

impl Default for DemuxParams {
    fn default() -> DemuxParams {
        DemuxParams {
            id_match_cutoff: DEFAULT_ID_MATCH_CUTOFF,
            stop_match_cutoff: DEFAULT_STOP_MATCH_CUTOFF,
            barcode_lengths: vec![7, 4, 8, 20],
            max_reads: 0,
        }
    }
}
