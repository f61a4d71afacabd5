//! End-to-end pipeline properties on synthetic in-memory data: a 2-RNA
//! reference set with the default 7+4+8+20 barcode layout, two primers
//! sharing a 7 nt priming suffix, and hand-built read pairs.

use mapdemux::aggregate::{Funnel, Stage, StatsMatrices};
use mapdemux::matching::{classify_pair, downstream_template, MatchRecord};
use mapdemux::params::DemuxParams;
use mapdemux::refmodel::RefModel;
use mapdemux::utils::revcomp;

const ADAPTER: &[u8] = b"AGATCGGAAGAGC";

// Both primers: adapter + 4 nt ID + shared priming suffix ACCTTCG
const PRIMER_1: &[u8] = b"AGATCGGAAGAGCAAGTACCTTCG"; // ID AAGT
const PRIMER_2: &[u8] = b"AGATCGGAAGAGCCGTAACCTTCG"; // ID CGTA

// Reverse complements of the two reference RNAs, laid out as the blocks
// appear in mate 1: shared 20 nt primer binding site, then the 8, 4 and
// 7 nt RNA barcode blocks, then one trailing base
const RC_1: &[u8] = b"CTAGCATGGCTTAACGGTCAACGGATCATGCACAGTTGAT";
const RC_2: &[u8] = b"CTAGCATGGCTTAACGGTCATGCCTAGTGACTGTACAACG";

fn model() -> RefModel {
    let rna1 = revcomp(RC_1).unwrap();
    let rna2 = revcomp(RC_2).unwrap();
    RefModel::build(
        vec![("rna1".to_string(), rna1), ("rna2".to_string(), rna2)],
        ADAPTER,
        vec![
            ("RTB000".to_string(), PRIMER_1.to_vec()),
            ("RTB001".to_string(), PRIMER_2.to_vec()),
        ],
        &[7, 4, 8, 20],
    )
    .unwrap()
}

fn mate1(id: &[u8], rc: &[u8]) -> Vec<u8> {
    let mut read = id.to_vec();
    read.extend_from_slice(rc);
    read
}

fn run(
    model: &RefModel,
    params: &DemuxParams,
    pairs: &[(Vec<u8>, Vec<u8>)],
) -> (Funnel, StatsMatrices) {
    let mut funnel = Funnel::new();
    let mut stats = StatsMatrices::new(
        model.primers.len(),
        model.rnas.len(),
        model.rnas.max_len(),
    );
    for (r1, r2) in pairs {
        for rec in classify_pair(model, params, r1, r2, &mut funnel) {
            stats.record(&rec);
        }
    }
    (funnel, stats)
}

#[test]
fn exact_match_gets_weight_one() {
    let model = model();
    let params = DemuxParams::default();

    let read2 = downstream_template(&model, 1, 1)[5..25].to_vec();
    let mut funnel = Funnel::new();
    let records = classify_pair(&model, &params, &mate1(b"AAGT", RC_1), &read2, &mut funnel);

    assert_eq!(
        records,
        vec![MatchRecord {
            id_idx: 1,
            rna_idx: 1,
            stop: 5,
            weight: 1.0,
        }]
    );
    assert_eq!(funnel.count(Stage::RtStop), 1);
}

#[test]
fn id_accepted_at_cutoff_rejected_beyond() {
    let model = model();
    let params = DemuxParams::default();
    let read2 = downstream_template(&model, 1, 1)[5..25].to_vec();

    // CCGT has exactly 2 mismatches against AAGT (and 3 against CGTA)
    let mut funnel = Funnel::new();
    let records = classify_pair(&model, &params, &mate1(b"CCGT", RC_1), &read2, &mut funnel);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id_idx, 1);

    // CCCT has 3 mismatches against both IDs: over the cutoff
    let mut funnel = Funnel::new();
    let records = classify_pair(&model, &params, &mate1(b"CCCT", RC_1), &read2, &mut funnel);
    assert!(records.is_empty());
    assert_eq!(funnel.count(Stage::PrimerSite), 1);
    assert_eq!(funnel.count(Stage::IdMatch), 0);
}

#[test]
fn tied_stop_positions_split_the_weight() {
    let model = model();
    let params = DemuxParams::default();

    // CGTT occurs twice in the downstream template of rna1 (offsets 17
    // and 24), nowhere else exactly
    let mut funnel = Funnel::new();
    let records = classify_pair(&model, &params, &mate1(b"AAGT", RC_1), b"CGTT", &mut funnel);

    assert_eq!(records.len(), 2);
    assert_eq!(
        records.iter().map(|r| r.stop).collect::<Vec<_>>(),
        vec![17, 24]
    );
    for rec in &records {
        assert_eq!(rec.id_idx, 1);
        assert_eq!(rec.rna_idx, 1);
        assert_eq!(rec.weight, 0.5);
    }
    let total: f64 = records.iter().map(|r| r.weight).sum();
    assert_eq!(total, 1.0);
}

/// 10 read pairs: 6 fully valid, 1 failing ID, 1 failing the RNA
/// barcode, 1 failing the RT stop, 1 garbage
fn end_to_end_pairs(model: &RefModel) -> Vec<(Vec<u8>, Vec<u8>)> {
    let t11 = downstream_template(model, 1, 1);
    let t21 = downstream_template(model, 2, 1);
    let t12 = downstream_template(model, 1, 2);
    let t22 = downstream_template(model, 2, 2);

    let mut no_barcode = mate1(b"AAGT", &RC_1[..20]);
    no_barcode.extend_from_slice(&[b'T'; 20]);

    vec![
        (mate1(b"AAGT", RC_1), t11[5..25].to_vec()),
        (mate1(b"AAGT", RC_2), t21[0..20].to_vec()),
        (mate1(b"CGTA", RC_1), t12[10..30].to_vec()),
        (mate1(b"CGTA", RC_2), t22[3..23].to_vec()),
        (mate1(b"AAGT", RC_1), b"CGTT".to_vec()),
        (mate1(b"CGTA", RC_2), t22[7..27].to_vec()),
        // ID with 3 mismatches: dropped after the primer site stage
        (mate1(b"CCCT", RC_1), t11[5..25].to_vec()),
        // primer site present but unknown RNA barcodes
        (no_barcode, t11[5..25].to_vec()),
        // mate 2 nowhere near any template window
        (mate1(b"AAGT", RC_1), vec![b'A'; 20]),
        // garbage mate 1: no primer binding site at all
        (vec![b'T'; 44], t11[5..25].to_vec()),
    ]
}

#[test]
fn end_to_end_funnel_and_weight_conservation() {
    let model = model();
    let params = DemuxParams::default();
    let pairs = end_to_end_pairs(&model);

    let (funnel, stats) = run(&model, &params, &pairs);

    assert_eq!(funnel.count(Stage::Total), 10);
    assert_eq!(funnel.count(Stage::PrimerSite), 9);
    assert_eq!(funnel.count(Stage::IdMatch), 8);
    assert_eq!(funnel.count(Stage::RnaBarcode), 7);
    assert_eq!(funnel.count(Stage::RtStop), 6);

    // every accepted pair contributes total mass 1
    let total_weight: f64 = (1..=model.primers.len()).map(|id| stats.total(id)).sum();
    assert!((total_weight - funnel.count(Stage::RtStop) as f64).abs() < 1e-9);
}

#[test]
fn rejected_reads_leave_no_weight() {
    let model = model();
    let params = DemuxParams::default();

    // only rejected pairs
    let pairs = vec![
        (vec![b'T'; 44], vec![b'A'; 20]),
        (mate1(b"CCCT", RC_1), vec![b'A'; 20]),
    ];
    let (funnel, stats) = run(&model, &params, &pairs);

    assert_eq!(funnel.count(Stage::RtStop), 0);
    for id in 1..=model.primers.len() {
        assert_eq!(stats.total(id), 0.0);
        assert!(stats.matrix(id).iter().all(|&v| v == 0.0));
    }
}

#[test]
fn runs_are_deterministic() {
    let model = model();
    let params = DemuxParams::default();
    let pairs = end_to_end_pairs(&model);

    let (funnel_a, stats_a) = run(&model, &params, &pairs);
    let (funnel_b, stats_b) = run(&model, &params, &pairs);

    assert_eq!(funnel_a.reached(), funnel_b.reached());
    for id in 1..=model.primers.len() {
        assert_eq!(stats_a.matrix(id), stats_b.matrix(id));
        assert_eq!(stats_a.total(id), stats_b.total(id));
    }
}

#[test]
fn sharded_processing_matches_single_threaded() {
    let model = model();
    let params = DemuxParams::default();
    let pairs = end_to_end_pairs(&model);

    let (full_funnel, full_stats) = run(&model, &params, &pairs);

    let (mut funnel, mut stats) = run(&model, &params, &pairs[..4]);
    let (shard_funnel, shard_stats) = run(&model, &params, &pairs[4..]);
    funnel.merge(&shard_funnel);
    stats.merge(&shard_stats);

    assert_eq!(funnel.reached(), full_funnel.reached());
    for id in 1..=model.primers.len() {
        assert_eq!(stats.matrix(id), full_stats.matrix(id));
        assert_eq!(stats.total(id), full_stats.total(id));
    }
}
