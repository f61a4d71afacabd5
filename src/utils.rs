use anyhow::bail;

/// Complement of a single nucleotide. U complements to A, so both RNA and
/// DNA inputs work; anything outside the alphabet is rejected.
fn complement(c: u8) -> Option<u8> {
    match c {
        b'A' => Some(b'T'),
        b'T' | b'U' => Some(b'A'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        _ => None,
    }
}

/// Reverse complement over the A/C/G/U/T alphabet.
pub fn revcomp(seq: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(seq.len());
    for &c in seq.iter().rev() {
        match complement(c) {
            Some(rc) => out.push(rc),
            None => bail!("'{}' is not in the nucleic acid alphabet", c as char),
        }
    }
    Ok(out)
}

/// DNA equivalent of an RNA sequence (U -> T)
pub fn rna_to_dna(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .map(|&c| if c == b'U' { b'T' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revcomp_dna() {
        let seq = b"ATGCTTCCAGAA";
        let actual = revcomp(seq).unwrap();
        let expected = b"TTCTGGAAGCAT";
        assert_eq!(actual, expected)
    }

    #[test]
    fn test_revcomp_rna() {
        let seq = b"AUGC";
        let actual = revcomp(seq).unwrap();
        let expected = b"GCAT";
        assert_eq!(actual, expected)
    }

    #[test]
    fn test_revcomp_rejects_bad_alphabet() {
        assert!(revcomp(b"ATXG").is_err());
    }

    #[test]
    fn test_rna_to_dna() {
        assert_eq!(rna_to_dna(b"AUGCU"), b"ATGCT");
    }
}
