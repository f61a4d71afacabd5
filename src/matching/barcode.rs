use itertools::Itertools;

use super::distance::seq_distance;
use crate::refmodel::PrimerLibrary;

///////////////////////////////
/// Match the leading bases of mate 1 against every known primer ID with
/// mismatch tolerance. Returns the 1-based index of the best ID, or None
/// if even the best exceeds the cutoff. Ties go to the lowest reference
/// index (stable min).
pub fn match_id(read: &[u8], primers: &PrimerLibrary, cutoff: usize) -> Option<usize> {
    let take = primers.id_length().min(read.len());
    let prefix = &read[..take];

    let best = primers
        .entries()
        .iter()
        .position_min_by_key(|entry| seq_distance(prefix, &entry.id, cutoff))?;

    let dist = seq_distance(prefix, &primers.entries()[best].id, cutoff);
    if dist > cutoff {
        return None;
    }
    Some(best + 1)
}
