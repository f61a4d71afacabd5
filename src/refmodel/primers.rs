use anyhow::bail;
use log::info;

use crate::utils::revcomp;

///////////////////////////////
/// One RT primer, decomposed into adapter + ID + shared priming site.
/// The ID substring is what encodes the experimental condition.
pub struct PrimerEntry {
    pub tag: String,
    pub seq: Vec<u8>,
    pub id: Vec<u8>,
    pub id_rc: Vec<u8>,
}

///////////////////////////////
/// The ordered primer/condition set. Primer indices are 1-based, matching
/// the numbering of the output stats files.
pub struct PrimerLibrary {
    entries: Vec<PrimerEntry>,
    adapter: Vec<u8>,
    adapter_rc: Vec<u8>,
    shared_suffix_len: usize,
    id_length: usize,
}

impl PrimerLibrary {
    /// Decompose primers into adapter, ID and the shared 3' priming site.
    /// The priming site length is found by scanning position-by-position
    /// from the 3' end until the primers first disagree.
    pub fn decompose(
        records: Vec<(String, Vec<u8>)>,
        adapter: &[u8],
    ) -> anyhow::Result<PrimerLibrary> {
        if records.is_empty() {
            bail!("no primer sequences given");
        }

        let mut shared_suffix_len = None;
        'scan: for k in 1..adapter.len() {
            let mut suffix_nt = None;
            for (tag, seq) in &records {
                if seq.len() < k {
                    bail!(
                        "primer '{}' is shorter than the scanned 3' suffix ({} nt)",
                        tag,
                        k
                    );
                }
                let nt = seq[seq.len() - k];
                match suffix_nt {
                    None => suffix_nt = Some(nt),
                    Some(prev) if prev != nt => {
                        // the previous position was the last shared one
                        shared_suffix_len = Some(k - 1);
                        break 'scan;
                    }
                    Some(_) => {}
                }
            }
        }

        let shared_suffix_len = match shared_suffix_len {
            Some(n) if n >= 1 => n,
            Some(_) => bail!(
                "primers disagree at their final nucleotide; no shared priming site"
            ),
            None => bail!(
                "primers share a 3' suffix at least as long as the adapter; \
                 reference data looks malformed"
            ),
        };
        info!("shared primer site length: {} nt", shared_suffix_len);

        let mut entries = Vec::with_capacity(records.len());
        let mut id_length = 0;
        for (tag, seq) in records {
            let pos = match find_subsequence(&seq, adapter) {
                Some(pos) => pos,
                None => bail!("primer '{}' does not contain the adapter sequence", tag),
            };

            // strip the adapter, then the shared priming suffix
            let mut id = Vec::with_capacity(seq.len() - adapter.len());
            id.extend_from_slice(&seq[..pos]);
            id.extend_from_slice(&seq[pos + adapter.len()..]);
            id.truncate(id.len().saturating_sub(shared_suffix_len));

            id_length = id_length.max(id.len());
            let id_rc = revcomp(&id)?;
            entries.push(PrimerEntry {
                tag,
                seq,
                id,
                id_rc,
            });
        }
        info!("ID length: {} nt", id_length);

        let adapter_rc = revcomp(adapter)?;
        Ok(PrimerLibrary {
            entries,
            adapter: adapter.to_vec(),
            adapter_rc,
            shared_suffix_len,
            id_length,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Access by 1-based primer index
    pub fn entry(&self, idx: usize) -> &PrimerEntry {
        &self.entries[idx - 1]
    }

    pub fn entries(&self) -> &[PrimerEntry] {
        &self.entries
    }

    pub fn adapter(&self) -> &[u8] {
        &self.adapter
    }

    pub fn adapter_rc(&self) -> &[u8] {
        &self.adapter_rc
    }

    pub fn shared_suffix_len(&self) -> usize {
        self.shared_suffix_len
    }

    /// Length of the longest primer ID
    pub fn id_length(&self) -> usize {
        self.id_length
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
