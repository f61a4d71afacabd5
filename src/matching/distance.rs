///////////////////////////////
/// Hamming distance with an early exit once the cutoff is exceeded.
/// Lengths may differ; only the overlapping prefix is compared. That
/// laxness is relied on by ID matching, where a short ID is compared
/// against a full-width read prefix.
pub fn seq_distance(a: &[u8], b: &[u8], cutoff: usize) -> usize {
    let mut dist = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        if x != y {
            dist += 1;
            if dist > cutoff {
                break;
            }
        }
    }
    dist
}

///////////////////////////////
/// Outcome of sliding a read across a template
pub struct OffsetScan {
    /// Offsets tied at the best distance, ascending; empty when the best
    /// distance exceeded the cutoff
    pub hits: Vec<usize>,
    /// Best offset seen, kept for near-miss diagnostics
    pub best_offset: usize,
    pub best_dist: usize,
}

///////////////////////////////
/// Brute-force scan of `read` against every window of `template`.
/// Offsets run 0..(template - read), exclusive: the final zero-slack
/// window is never tested. This is the hot path; keep it free of policy
/// so a vectorized version can drop in.
pub fn best_offsets(template: &[u8], read: &[u8], cutoff: usize) -> Option<OffsetScan> {
    if template.len() <= read.len() {
        return None;
    }

    let mut best_dist = usize::MAX;
    let mut best_offset = 0;
    let mut hits: Vec<usize> = vec![];

    for offset in 0..(template.len() - read.len()) {
        let window = &template[offset..offset + read.len()];
        let dist = seq_distance(window, read, cutoff);

        if dist < best_dist {
            best_dist = dist;
            best_offset = offset;
            hits.clear();
            hits.push(offset);
        } else if dist == best_dist {
            hits.push(offset);
        }
    }

    if best_dist > cutoff {
        hits.clear();
    }
    Some(OffsetScan {
        hits,
        best_offset,
        best_dist,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_distance() {
        assert_eq!(seq_distance(b"ACGT", b"ACGT", 4), 0);
        assert_eq!(seq_distance(b"ACGT", b"ACGA", 4), 1);
        assert_eq!(seq_distance(b"AAAA", b"TTTT", 4), 4);
    }

    #[test]
    fn test_seq_distance_early_exit() {
        // stops at cutoff + 1, never reporting the full distance
        assert_eq!(seq_distance(b"AAAAAAAA", b"TTTTTTTT", 2), 3);
    }

    #[test]
    fn test_seq_distance_unequal_lengths() {
        // only the overlapping prefix is compared
        assert_eq!(seq_distance(b"ACGTACGT", b"ACG", 4), 0);
        assert_eq!(seq_distance(b"ACG", b"ACGTACGT", 4), 0);
    }

    #[test]
    fn test_best_offsets_exact() {
        let scan = best_offsets(b"AAACGTAAA", b"CGT", 4).unwrap();
        assert_eq!(scan.hits, vec![3]);
        assert_eq!(scan.best_dist, 0);
    }

    #[test]
    fn test_best_offsets_collects_ties() {
        let scan = best_offsets(b"ACGACGAA", b"ACG", 0).unwrap();
        assert_eq!(scan.hits, vec![0, 3]);
        assert_eq!(scan.best_dist, 0);
    }

    #[test]
    fn test_best_offsets_over_cutoff() {
        let scan = best_offsets(b"AAAAAAAA", b"TTT", 1).unwrap();
        assert!(scan.hits.is_empty());
        assert!(scan.best_dist > 1);
        assert_eq!(scan.best_offset, 0);
    }

    #[test]
    fn test_best_offsets_short_template() {
        assert!(best_offsets(b"ACG", b"ACG", 4).is_none());
        assert!(best_offsets(b"AC", b"ACG", 4).is_none());
    }

    #[test]
    fn test_final_window_is_never_scanned() {
        // the only in-cutoff window sits at the zero-slack offset
        let scan = best_offsets(b"TTTACG", b"ACG", 0).unwrap();
        assert!(scan.hits.is_empty());
    }
}
