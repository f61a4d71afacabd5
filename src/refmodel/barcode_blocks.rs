use rustc_hash::FxHashMap;

use super::RnaLibrary;

///////////////////////////////
/// One fixed-length barcode window cut from the reverse complement of
/// every reference RNA. A bidirectional mapping: distinct barcode values
/// get 1-based indices in first-seen order, and each index maps back to
/// the (1-based) RNA indices sharing that value. Barcodes may be
/// degenerate, so several RNAs can sit behind one value.
pub struct BarcodeBlock {
    /// 1-based inclusive window within the RNA reverse complement
    pub start: usize,
    pub stop: usize,

    values: Vec<Vec<u8>>,
    value_to_index: FxHashMap<Vec<u8>, usize>,
    rnas: Vec<Vec<usize>>,
}

impl BarcodeBlock {
    fn new(start: usize, stop: usize) -> BarcodeBlock {
        BarcodeBlock {
            start,
            stop,
            values: vec![],
            value_to_index: FxHashMap::default(),
            rnas: vec![],
        }
    }

    fn insert(&mut self, value: &[u8], rna_idx: usize) {
        let idx = match self.value_to_index.get(value) {
            Some(&idx) => idx,
            None => {
                self.values.push(value.to_vec());
                self.rnas.push(vec![]);
                let idx = self.values.len();
                self.value_to_index.insert(value.to_vec(), idx);
                idx
            }
        };
        self.rnas[idx - 1].push(rna_idx);
    }

    pub fn width(&self) -> usize {
        self.stop - self.start + 1
    }

    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    /// 1-based index of a barcode value; 0 means no match
    pub fn index_of(&self, value: &[u8]) -> usize {
        self.value_to_index.get(value).copied().unwrap_or(0)
    }

    /// RNA indices behind a (nonzero) barcode index
    pub fn rnas_for(&self, index: usize) -> &[usize] {
        &self.rnas[index - 1]
    }

    pub fn value(&self, index: usize) -> &[u8] {
        &self.values[index - 1]
    }
}

///////////////////////////////
/// Result of looking up one block window in a read
pub struct BlockHit<'a> {
    /// 1-based barcode index; 0 = no match
    pub index: usize,
    /// Candidate RNA indices, empty when no match
    pub rnas: &'a [usize],
    /// The substring that was looked up
    pub matched: &'a [u8],
}

///////////////////////////////
/// All barcode blocks, built once and read-only during matching
pub struct BarcodeBlockSet {
    blocks: Vec<BarcodeBlock>,
}

impl BarcodeBlockSet {
    /// Cut blocks from each RNA's reverse complement, walking inward from
    /// the 3' end. Lengths are configured outermost-first and consumed in
    /// reverse, so block 0 is the innermost configured length (the primer
    /// binding site when using the default layout).
    pub fn build(rnas: &RnaLibrary, lengths: &[usize]) -> BarcodeBlockSet {
        let mut blocks = Vec::with_capacity(lengths.len());

        let mut offset = 1;
        for &m in lengths.iter().rev() {
            let start = offset;
            let stop = offset + m - 1;
            let mut block = BarcodeBlock::new(start, stop);

            for (i, entry) in rnas.entries().iter().enumerate() {
                let rc = &entry.revcomp;
                if rc.len() < stop {
                    // RNA too short to carry this block; it gets no barcode here
                    continue;
                }
                block.insert(&rc[start - 1..stop], i + 1);
            }

            blocks.push(block);
            offset += m;
        }

        BarcodeBlockSet { blocks }
    }

    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn block(&self, block_index: usize) -> Option<&BarcodeBlock> {
        self.blocks.get(block_index)
    }

    /// Look up the window of `read` covered by a block, shifted by
    /// `additional_offset` (the ID block precedes the RNA barcode blocks
    /// in mate 1, and its length varies per call site). Exact equality
    /// only; a read too short to cover the window is a no-match, since a
    /// truncated substring can never equal a full-length barcode.
    pub fn locate<'a>(
        &'a self,
        read: &'a [u8],
        block_index: usize,
        additional_offset: usize,
    ) -> BlockHit<'a> {
        static NO_RNAS: [usize; 0] = [];

        let block = &self.blocks[block_index];
        let start = block.start + additional_offset;
        let stop = block.stop + additional_offset;

        let matched = match read.get(start - 1..stop) {
            Some(sub) => sub,
            None => {
                return BlockHit {
                    index: 0,
                    rnas: &NO_RNAS[..],
                    matched: &read[0..0],
                }
            }
        };

        let index = block.index_of(matched);
        let rnas = if index > 0 {
            block.rnas_for(index)
        } else {
            &NO_RNAS[..]
        };
        BlockHit {
            index,
            rnas,
            matched,
        }
    }
}
