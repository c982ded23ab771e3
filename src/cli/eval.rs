//! The evaluation driver: load inputs, run the orchestrator, emit results.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::cli::{Cli, OutputFormat};
use crate::core::alignment::TaggedAlignment;
use crate::core::sequence::SequenceSet;
use crate::core::stats::EvalSummary;
use crate::matching::orchestrator::evaluate_weighting;
use crate::parsing::{
    blast::BlastReader, expression::read_expression, fasta::read_fasta, psl::PslReader,
    read_alignments, AlignmentFormat, ParseError,
};
use crate::report::{write_plot, write_stats};

/// Execute the evaluation.
///
/// # Errors
///
/// Returns an error for invalid option combinations, unreadable or malformed
/// inputs, or an unsupported format/filter combination.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    if !cli.no_expr && (cli.a_expr.is_none() || cli.b_expr.is_none()) {
        anyhow::bail!("either supply both --a-expr and --b-expr, or pass --no-expr");
    }

    info!("reading sequences");
    let a = read_fasta(&cli.a_seqs)
        .with_context(|| format!("failed to read {}", cli.a_seqs.display()))?;
    let b = read_fasta(&cli.b_seqs)
        .with_context(|| format!("failed to read {}", cli.b_seqs.display()))?;
    info!(
        assembly = a.len(),
        reference = b.len(),
        "loaded sequence sets"
    );

    let real_taus = match (&cli.a_expr, &cli.b_expr) {
        (Some(a_expr), Some(b_expr)) => {
            info!("reading expression estimates");
            let tau_a = read_expression(a_expr, &a)
                .with_context(|| format!("failed to read {}", a_expr.display()))?;
            let tau_b = read_expression(b_expr, &b)
                .with_context(|| format!("failed to read {}", b_expr.display()))?;
            Some((tau_a, tau_b))
        }
        _ => None,
    };

    info!("reading alignments");
    let a_to_b = load_alignments(&cli.a_to_b, cli.alignment_type, &a, &b, cli)?;
    let b_to_a = load_alignments(&cli.b_to_a, cli.alignment_type, &b, &a, cli)?;
    info!(
        a_to_b = a_to_b.len(),
        b_to_a = b_to_a.len(),
        "admitted alignments"
    );

    let weighted = real_taus.map(|(tau_a, tau_b)| {
        info!("scoring with estimated expression weights");
        let (scored, _) = evaluate_weighting(
            &a_to_b, &b_to_a, &a.lengths, &b.lengths, &tau_a, &tau_b, cli.readlen,
        );
        scored
    });

    info!("scoring with uniform weights");
    let (unweighted, coverage_fractions) = evaluate_weighting(
        &a_to_b,
        &b_to_a,
        &a.lengths,
        &b.lengths,
        &a.uniform_weights(),
        &b.uniform_weights(),
        cli.readlen,
    );

    let summary = EvalSummary {
        weighted,
        unweighted,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Text => {
            if let Some(weighted) = &summary.weighted {
                write_stats(&mut out, "weighted", weighted)?;
            }
            write_stats(&mut out, "unweighted", &summary.unweighted)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &summary)?;
            writeln!(out)?;
        }
    }

    let plot = File::create(&cli.plot_output)
        .with_context(|| format!("failed to create {}", cli.plot_output.display()))?;
    let mut plot = BufWriter::new(plot);
    write_plot(&mut plot, &coverage_fractions)?;
    plot.flush()?;

    info!("done");
    Ok(())
}

/// Reads and admits one direction's alignments of `src` against `dst`.
fn load_alignments(
    path: &Path,
    format: AlignmentFormat,
    src: &SequenceSet,
    dst: &SequenceSet,
    cli: &Cli,
) -> anyhow::Result<Vec<TaggedAlignment>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let input = BufReader::new(file);
    let alignments: Result<_, ParseError> = match format {
        AlignmentFormat::Psl => {
            let mut reader = PslReader::new(input, src, dst, cli.strand_specific);
            read_alignments(&mut reader, cli.readlen)
        }
        AlignmentFormat::Blast => {
            let mut reader = BlastReader::new(input, src, dst, cli.strand_specific)?;
            read_alignments(&mut reader, cli.readlen)
        }
    };
    alignments.with_context(|| format!("failed to parse {}", path.display()))
}
