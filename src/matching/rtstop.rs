use super::distance;
use super::policy;
use crate::refmodel::RefModel;

///////////////////////////////
/// One accepted RT stop: mate 2 aligned at `offset` within the expected
/// downstream template of RNA `rna_idx` (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopHit {
    pub rna_idx: usize,
    pub offset: usize,
}

/// The expected downstream sequence for one RNA under one condition:
/// the DNA form of the RNA, then the reverse-complemented ID, then the
/// reverse-complemented adapter.
pub fn downstream_template(model: &RefModel, rna_idx: usize, id_idx: usize) -> Vec<u8> {
    let dna = &model.rnas.entry(rna_idx).dna;
    let id_rc = &model.primers.entry(id_idx).id_rc;
    let adapter_rc = model.primers.adapter_rc();

    let mut template = Vec::with_capacity(dna.len() + id_rc.len() + adapter_rc.len());
    template.extend_from_slice(dna);
    template.extend_from_slice(id_rc);
    template.extend_from_slice(adapter_rc);
    template
}

///////////////////////////////
/// Find where reverse transcription stopped: slide mate 2 across each
/// candidate RNA's downstream template and take the tied best offsets of
/// the first RNA with any within-cutoff window. The returned hits carry
/// an implicit weight of 1/len.
pub fn locate_stop(
    model: &RefModel,
    id_idx: usize,
    candidates: &[usize],
    read2: &[u8],
    cutoff: usize,
) -> Vec<StopHit> {
    policy::first_acceptable_rna(candidates, cutoff, |rna_idx| {
        let template = downstream_template(model, rna_idx, id_idx);
        distance::best_offsets(&template, read2, cutoff)
    })
    .into_iter()
    .map(|(rna_idx, offset)| StopHit { rna_idx, offset })
    .collect()
}
