use log::warn;
use ndarray::Array2;

use crate::matching::MatchRecord;

///////////////////////////////
/// The successive filter stages a read pair must survive. Order is the
/// pipeline order; a pair counted at one stage was counted at every
/// earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Total = 0,
    PrimerSite = 1,
    IdMatch = 2,
    RnaBarcode = 3,
    RtStop = 4,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Total => "total",
            Stage::PrimerSite => "primer binding site",
            Stage::IdMatch => "Primer ID match",
            Stage::RnaBarcode => "RNA barcode match",
            Stage::RtStop => "Found RT stop match",
        }
    }

    pub const ALL: [Stage; 5] = [
        Stage::Total,
        Stage::PrimerSite,
        Stage::IdMatch,
        Stage::RnaBarcode,
        Stage::RtStop,
    ];
}

///////////////////////////////
/// Per-stage survivor counts, in first-reached order. Merging across
/// shards is a stage-wise sum.
#[derive(Debug, Clone, Default)]
pub struct Funnel {
    counts: Vec<u64>,
}

impl Funnel {
    pub fn new() -> Funnel {
        Funnel { counts: vec![] }
    }

    pub fn record(&mut self, stage: Stage) {
        let idx = stage as usize;
        if self.counts.len() == idx {
            self.counts.push(0);
        }
        self.counts[idx] += 1;
    }

    pub fn count(&self, stage: Stage) -> u64 {
        self.counts.get(stage as usize).copied().unwrap_or(0)
    }

    /// (stage name, count) pairs for every stage any read reached
    pub fn reached(&self) -> Vec<(&'static str, u64)> {
        Stage::ALL
            .iter()
            .take(self.counts.len())
            .map(|&s| (s.name(), self.counts[s as usize]))
            .collect()
    }

    pub fn merge(&mut self, other: &Funnel) {
        if other.counts.len() > self.counts.len() {
            self.counts.resize(other.counts.len(), 0);
        }
        for (i, &c) in other.counts.iter().enumerate() {
            self.counts[i] += c;
        }
    }
}

///////////////////////////////
/// Accumulated weight per (condition, RNA, stop offset), one dense
/// matrix of shape (n_rna, max_len + 1) per condition, plus the total
/// weight assigned to each condition
pub struct StatsMatrices {
    per_id: Vec<Array2<f64>>,
    id_total: Vec<f64>,
    n_rna: usize,
    n_pos: usize,
}

impl StatsMatrices {
    pub fn new(n_ids: usize, n_rna: usize, max_len: usize) -> StatsMatrices {
        let n_pos = max_len + 1;
        StatsMatrices {
            per_id: (0..n_ids).map(|_| Array2::zeros((n_rna, n_pos))).collect(),
            id_total: vec![0.0; n_ids],
            n_rna,
            n_pos,
        }
    }

    /// Accumulate one match record. An out-of-range index points at an
    /// index-derivation bug upstream; the record is skipped and logged
    /// rather than aborting a long run.
    pub fn record(&mut self, rec: &MatchRecord) {
        if rec.id_idx == 0 || rec.id_idx > self.per_id.len() {
            warn!("Problem in ID idx {} {}", rec.id_idx, self.per_id.len());
            return;
        }
        if rec.rna_idx == 0 || rec.rna_idx > self.n_rna {
            warn!("Problem in RNA idx {} {}", rec.rna_idx, self.n_rna);
            return;
        }
        if rec.stop >= self.n_pos {
            warn!("Problem in stop idx {} {}", rec.stop, self.n_pos);
            return;
        }

        self.per_id[rec.id_idx - 1][[rec.rna_idx - 1, rec.stop]] += rec.weight;
        self.id_total[rec.id_idx - 1] += rec.weight;
    }

    pub fn num_ids(&self) -> usize {
        self.per_id.len()
    }

    /// Matrix for a 1-based condition index
    pub fn matrix(&self, id_idx: usize) -> &Array2<f64> {
        &self.per_id[id_idx - 1]
    }

    /// Total weight assigned to a 1-based condition index
    pub fn total(&self, id_idx: usize) -> f64 {
        self.id_total[id_idx - 1]
    }

    /// Element-wise sum; merging shards this way is associative and
    /// commutative, so shard order cannot change the result
    pub fn merge(&mut self, other: &StatsMatrices) {
        assert_eq!(self.per_id.len(), other.per_id.len());
        for (mine, theirs) in self.per_id.iter_mut().zip(other.per_id.iter()) {
            *mine += theirs;
        }
        for (mine, theirs) in self.id_total.iter_mut().zip(other.id_total.iter()) {
            *mine += theirs;
        }
    }
}
