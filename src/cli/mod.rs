//! Command-line interface for asm-eval.
//!
//! The tool takes the two sequence sets, pre-computed alignments in both
//! directions, and the read length, and prints precision/recall/F1 for the
//! five accounting schemes:
//!
//! ```text
//! # Score an assembly against a reference transcript set
//! asm-eval --a-seqs assembly.fa --b-seqs reference.fa \
//!     --a-to-b a_to_b.psl --b-to-a b_to_a.psl \
//!     --alignment-type psl --readlen 76 \
//!     --a-expr assembly.isoforms.results --b-expr reference.isoforms.results \
//!     --plot-output coverage.txt
//!
//! # Without expression estimates (uniform weights only)
//! asm-eval ... --no-expr
//!
//! # JSON output for scripting
//! asm-eval ... --format json
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::parsing::AlignmentFormat;

pub mod eval;

#[derive(Parser)]
#[command(name = "asm-eval")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Score a transcriptome assembly against a reference using pairwise alignments")]
#[command(
    long_about = "asm-eval computes alignment-based accuracy statistics between an assembly (A) and a reference transcript set (B).\n\nFor five definitions of a unit of agreement (positions, position pairs, spaced pairs, k-mer windows, whole transcripts), overlapping alignments are greedily reduced to non-overlapping claims and the correctly recovered units are summed, weighted by each sequence's relative abundance. Recall uses the A-to-B alignments, precision the B-to-A alignments."
)]
pub struct Cli {
    /// The assembly sequences, in FASTA format
    #[arg(long, value_name = "FILE")]
    pub a_seqs: PathBuf,

    /// The reference sequences, in FASTA format
    #[arg(long, value_name = "FILE")]
    pub b_seqs: PathBuf,

    /// Assembly expression estimates (RSEM *.isoforms.results)
    #[arg(long, value_name = "FILE")]
    pub a_expr: Option<PathBuf>,

    /// Reference expression estimates (RSEM *.isoforms.results)
    #[arg(long, value_name = "FILE")]
    pub b_expr: Option<PathBuf>,

    /// Do not use expression estimates; only uniform-weight scores are produced
    #[arg(long, conflicts_with_all = ["a_expr", "b_expr"])]
    pub no_expr: bool,

    /// Alignments of the assembly to the reference
    #[arg(long, value_name = "FILE")]
    pub a_to_b: PathBuf,

    /// Alignments of the reference to the assembly
    #[arg(long, value_name = "FILE")]
    pub b_to_a: PathBuf,

    /// Alignment input format
    #[arg(long, value_enum)]
    pub alignment_type: AlignmentFormat,

    /// Read length: the window size k and the minimum aligned length for a
    /// record to be admitted
    #[arg(long)]
    pub readlen: usize,

    /// Output file for per-reference fractional coverage, one value per line
    #[arg(long, value_name = "FILE")]
    pub plot_output: PathBuf,

    /// Discard alignments to the reverse strand
    #[arg(long)]
    pub strand_specific: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
