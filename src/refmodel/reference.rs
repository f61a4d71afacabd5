use crate::utils::{revcomp, rna_to_dna};

///////////////////////////////
/// One reference RNA with its precomputed derived sequences
pub struct RnaEntry {
    pub tag: String,
    pub seq: Vec<u8>,
    pub revcomp: Vec<u8>,
    pub dna: Vec<u8>,
}

///////////////////////////////
/// The ordered reference RNA set. RNA indices are 1-based everywhere,
/// matching the numbering used in the output matrices.
pub struct RnaLibrary {
    entries: Vec<RnaEntry>,
    max_len: usize,
}

impl RnaLibrary {
    pub fn from_records(records: Vec<(String, Vec<u8>)>) -> anyhow::Result<RnaLibrary> {
        let mut entries = Vec::with_capacity(records.len());
        let mut max_len = 0;
        for (tag, seq) in records {
            max_len = max_len.max(seq.len());
            let rc = revcomp(&seq)?;
            let dna = rna_to_dna(&seq);
            entries.push(RnaEntry {
                tag,
                seq,
                revcomp: rc,
                dna,
            });
        }
        Ok(RnaLibrary { entries, max_len })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the longest reference RNA; stop offsets run 0..=max_len
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Access by 1-based reference index
    pub fn entry(&self, idx: usize) -> &RnaEntry {
        &self.entries[idx - 1]
    }

    pub fn entries(&self) -> &[RnaEntry] {
        &self.entries
    }
}
