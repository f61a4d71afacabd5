pub mod barcode_blocks;
pub mod primers;
pub mod reference;

pub use barcode_blocks::BarcodeBlock;
pub use barcode_blocks::BarcodeBlockSet;
pub use barcode_blocks::BlockHit;
pub use primers::PrimerLibrary;
pub use reference::RnaEntry;
pub use reference::RnaLibrary;

///////////////////////////////
/// All prebuilt lookup structures needed to classify read pairs:
/// the reference RNAs, the decomposed primers, and the barcode
/// block tables cut from each RNA's reverse complement
pub struct RefModel {
    pub rnas: RnaLibrary,
    pub primers: PrimerLibrary,
    pub blocks: BarcodeBlockSet,
}

impl RefModel {
    /// Build the model from parsed FASTA records. Inconsistent reference
    /// data (no shared primer suffix, a primer without the adapter) is a
    /// fatal error; nothing can be recovered mid-run from bad references.
    pub fn build(
        rna_records: Vec<(String, Vec<u8>)>,
        adapter: &[u8],
        primer_records: Vec<(String, Vec<u8>)>,
        barcode_lengths: &[usize],
    ) -> anyhow::Result<RefModel> {
        let rnas = RnaLibrary::from_records(rna_records)?;
        let primers = PrimerLibrary::decompose(primer_records, adapter)?;
        let blocks = BarcodeBlockSet::build(&rnas, barcode_lengths);

        Ok(RefModel {
            rnas,
            primers,
            blocks,
        })
    }
}
