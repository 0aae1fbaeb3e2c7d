use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use seedalign::align::{self, AlignOpt};
use seedalign::index::IndexConfig;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "seedalign", author, version, about = "Seed-and-extend short-read aligner on an FM-index", arg_required_else_help = true)]
struct Cli {
    /// Verbose logging (debug level unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Index the first sequence of a FASTA reference in memory and align FASTQ reads to it
    Align {
        /// Reference FASTA file
        reference: PathBuf,
        /// Reads FASTQ file
        reads: PathBuf,
        /// Output SAM path (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long = "match", default_value_t = 2)]
        match_score: i32,
        #[arg(long = "mismatch", default_value_t = 1)]
        mismatch_penalty: i32,
        #[arg(long = "gap-open", default_value_t = 2)]
        gap_open: i32,
        #[arg(long = "gap-ext", default_value_t = 1)]
        gap_extend: i32,
        /// Seed (k-mer) length
        #[arg(short = 'k', long = "seed-len", default_value_t = 12)]
        seed_len: usize,
        /// Suffix array sampling interval
        #[arg(long = "sa-interval", default_value_t = 32)]
        sa_interval: usize,
        /// Rank checkpoint interval
        #[arg(long = "checkpoint-interval", default_value_t = 5)]
        checkpoint_interval: usize,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
}

fn init_logger(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Align {
            reference,
            reads,
            out,
            match_score,
            mismatch_penalty,
            gap_open,
            gap_extend,
            seed_len,
            sa_interval,
            checkpoint_interval,
            threads,
        } => {
            let opt = AlignOpt {
                match_score,
                mismatch_penalty,
                gap_open,
                gap_extend,
                seed_len,
            };
            let idx_cfg = IndexConfig {
                sample_interval: sa_interval,
                checkpoint_interval,
            };
            align::align_fastq(&reference, &reads, out.as_deref(), &opt, &idx_cfg, threads)?;
            Ok(())
        }
    }
}
