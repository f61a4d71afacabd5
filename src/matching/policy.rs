//! Compatibility policies for ambiguous matches. Both functions encode
//! observable tie-breaks that downstream count tables depend on; a cleaner
//! variant can be swapped in behind the same signatures, but the defaults
//! must stay byte-compatible with previously recorded outputs.

use log::debug;

use super::distance::OffsetScan;

///////////////////////////////
/// Combine the candidate RNAs from the two barcode block lookups.
/// Concatenated, then reversed: when several RNAs share a barcode value
/// the last-registered one gets tried first.
pub fn combine_candidates(primary: &[usize], shifted: &[usize]) -> Vec<usize> {
    let mut all: Vec<usize> = primary.iter().chain(shifted.iter()).copied().collect();
    all.reverse();
    all
}

///////////////////////////////
/// Walk the candidate RNAs in order and commit to the first one that
/// yields any within-cutoff offset; only offset ties within that RNA are
/// kept. Candidates after it are never examined, even if one of them
/// would score better globally. The best near-miss across rejected
/// candidates is logged, never emitted.
pub fn first_acceptable_rna<F>(
    candidates: &[usize],
    cutoff: usize,
    mut scan: F,
) -> Vec<(usize, usize)>
where
    F: FnMut(usize) -> Option<OffsetScan>,
{
    let mut near_miss: Option<(usize, usize, usize)> = None;

    for &rna_idx in candidates {
        let result = match scan(rna_idx) {
            Some(result) => result,
            None => continue,
        };

        if result.best_dist > cutoff {
            let better = match near_miss {
                Some((_, _, dist)) => result.best_dist < dist,
                None => true,
            };
            if better {
                near_miss = Some((rna_idx, result.best_offset, result.best_dist));
            }
            continue;
        }

        return result
            .hits
            .iter()
            .map(|&offset| (rna_idx, offset))
            .collect();
    }

    if let Some((rna_idx, offset, dist)) = near_miss {
        debug!(
            "no RT stop within cutoff; best near-miss: RNA {} offset {} with {} mismatches",
            rna_idx, offset, dist
        );
    }
    vec![]
}
