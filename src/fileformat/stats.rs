use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use ndarray::Array2;

use crate::aggregate::{Funnel, StatsMatrices};
use crate::refmodel::PrimerLibrary;

/// One fixed-width matrix row per RNA, columns = stop offsets 0..=L
pub fn write_matrix<W: Write>(writer: &mut W, matrix: &Array2<f64>) -> anyhow::Result<()> {
    for row in matrix.rows() {
        for v in row.iter() {
            write!(writer, "{:8.1}", v)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

///////////////////////////////
/// Write one stats file per condition, named by 1-based condition index
pub fn write_stats_files(
    outdir: &PathBuf,
    stats: &StatsMatrices,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(stats.num_ids());
    for id_idx in 1..=stats.num_ids() {
        let path = outdir.join(format!("stats_ID{}.txt", id_idx));
        let file = File::create(&path)
            .with_context(|| format!("Could not create output file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_matrix(&mut writer, stats.matrix(id_idx))?;
        writer.flush()?;

        println!("Output: {}", path.display());
        paths.push(path);
    }
    Ok(paths)
}

///////////////////////////////
/// Human-readable survivor counts per funnel stage
pub fn print_funnel_report(funnel: &Funnel) {
    println!();
    println!("Purification table:");
    for (name, count) in funnel.reached() {
        println!("{:8} {}", count, name);
    }
}

///////////////////////////////
/// Total weight assigned per condition, in reference order
pub fn print_id_breakdown(stats: &StatsMatrices, primers: &PrimerLibrary) {
    println!();
    println!("ID breakdown");
    for (i, entry) in primers.entries().iter().enumerate() {
        println!("{:7} {}", stats.total(i + 1) as i64, entry.tag);
    }
    println!();
}
