pub mod barcode;
pub mod distance;
pub mod policy;
pub mod rtstop;

pub use barcode::match_id;
pub use distance::best_offsets;
pub use distance::seq_distance;
pub use distance::OffsetScan;
pub use rtstop::downstream_template;
pub use rtstop::locate_stop;
pub use rtstop::StopHit;

use crate::aggregate::{Funnel, Stage};
use crate::params::DemuxParams;
use crate::refmodel::RefModel;

/// Innermost configured block: the primer binding site, used as a filter
/// that the read really starts where it should
const PRIMER_SITE_BLOCK: usize = 0;
/// The two RNA-identifying blocks. The short spacer block between them
/// carries too little sequence to discriminate and is not looked up.
const RNA_BLOCK_PRIMARY: usize = 1;
const RNA_BLOCK_SECONDARY: usize = 3;

///////////////////////////////
/// One classified read pair. Weight is 1/k when the pair tied between k
/// equally good stop positions, so every pair contributes total mass 1.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub id_idx: usize,
    pub rna_idx: usize,
    pub stop: usize,
    pub weight: f64,
}

///////////////////////////////
/// Run one read pair through the full funnel:
/// primer binding site -> ID -> RNA barcode -> RT stop.
/// Returns the weighted match records; empty means the pair was dropped
/// at whatever stage the funnel last counted.
pub fn classify_pair(
    model: &RefModel,
    params: &DemuxParams,
    read1: &[u8],
    read2: &[u8],
    funnel: &mut Funnel,
) -> Vec<MatchRecord> {
    funnel.record(Stage::Total);

    let id_len = model.primers.id_length();

    // primer binding site -- better be there!
    let site = model.blocks.locate(read1, PRIMER_SITE_BLOCK, id_len);
    if site.index == 0 {
        return vec![];
    }
    funnel.record(Stage::PrimerSite);

    // ID block, with mismatch tolerance
    let id_idx = match match_id(read1, &model.primers, params.id_match_cutoff) {
        Some(idx) => idx,
        None => return vec![],
    };
    funnel.record(Stage::IdMatch);

    // RNA barcode blocks, exact lookups only
    static NO_RNAS: [usize; 0] = [];
    let primary = if model.blocks.num_blocks() > RNA_BLOCK_PRIMARY {
        model.blocks.locate(read1, RNA_BLOCK_PRIMARY, id_len).rnas
    } else {
        &NO_RNAS[..]
    };
    let secondary = if model.blocks.num_blocks() > RNA_BLOCK_SECONDARY {
        model.blocks.locate(read1, RNA_BLOCK_SECONDARY, id_len).rnas
    } else {
        &NO_RNAS[..]
    };
    let candidates = policy::combine_candidates(primary, secondary);
    if candidates.is_empty() {
        return vec![];
    }
    funnel.record(Stage::RnaBarcode);

    // where did the RT stop? mate 2 against the downstream template
    let stops = locate_stop(
        model,
        id_idx,
        &candidates,
        read2,
        params.stop_match_cutoff,
    );
    if stops.is_empty() {
        return vec![];
    }
    funnel.record(Stage::RtStop);

    let weight = 1.0 / stops.len() as f64;
    stops
        .into_iter()
        .map(|hit| MatchRecord {
            id_idx,
            rna_idx: hit.rna_idx,
            stop: hit.offset,
            weight,
        })
        .collect()
}
