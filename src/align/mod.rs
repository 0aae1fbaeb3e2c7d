pub mod affine;
pub mod extend;
pub mod finalize;
pub mod seed;

use anyhow::Context;
use rayon::prelude::*;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::{AlignError, Result};
use crate::index::{build_index, FMIndex, IndexConfig};
use crate::io::fasta::read_reference;
use crate::io::fastq::{FastqReader, FastqRecord};
use crate::util::dna;

pub use affine::{global_affine, global_affine_with_buf, AffineBuffer, GlobalAlignment, ScoringParams};
pub use extend::{extend_seeds, Extension};
pub use finalize::{edit_distance, mapping_quality, to_cigar};
pub use seed::{generate_seeds, Seed};

/// 每批并行比对的 read 数
const BATCH_SIZE: usize = 4096;

/// 比对参数：打分与种子长度
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlignOpt {
    pub match_score: i32,
    pub mismatch_penalty: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
    pub seed_len: usize,
}

impl Default for AlignOpt {
    fn default() -> Self {
        Self {
            match_score: 2,
            mismatch_penalty: 1,
            gap_open: 2,
            gap_extend: 1,
            seed_len: 12,
        }
    }
}

impl AlignOpt {
    pub fn validate(&self) -> Result<()> {
        if self.mismatch_penalty < 0 || self.gap_open < 0 || self.gap_extend < 0 {
            return Err(AlignError::InvalidConfig(format!(
                "penalties must be non-negative (mismatch={}, gap-open={}, gap-ext={})",
                self.mismatch_penalty, self.gap_open, self.gap_extend
            )));
        }
        if self.seed_len == 0 {
            return Err(AlignError::InvalidConfig("seed length must be at least 1".into()));
        }
        Ok(())
    }

    pub fn scoring(&self) -> ScoringParams {
        ScoringParams {
            match_score: self.match_score,
            mismatch_penalty: self.mismatch_penalty,
            gap_open: self.gap_open,
            gap_extend: self.gap_extend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentResult {
    /// 0-based 参考起点
    pub ref_start: usize,
    pub score: i32,
    pub cigar: String,
    pub mapq: u8,
    pub nm: u32,
}

/// 单条 read 的比对：种子 → 延伸 → CIGAR / MAPQ。
///
/// 返回 `Ok(None)` 表示未比对上（read 或参考为空，或没有落在参考内的候选窗口）。
/// 种子长度为 0、超过 read 长度或罚分为负时返回配置错误。
pub fn align_read(fm: &FMIndex, read: &[u8], opt: &AlignOpt) -> Result<Option<AlignmentResult>> {
    opt.validate()?;
    if read.is_empty() {
        return Ok(None);
    }
    if opt.seed_len > read.len() {
        return Err(AlignError::SeedTooLong { seed_len: opt.seed_len, read_len: read.len() });
    }
    if fm.reference().is_empty() {
        return Ok(None);
    }

    let norm = dna::normalize_seq(read);
    let seeds = generate_seeds(fm, &dna::encode(&norm), opt.seed_len);
    log::trace!("{} seeds, {} hits", seeds.len(), seed::total_hits(&seeds));

    let Some(ext) = extend_seeds(fm.reference(), &norm, &seeds, opt.scoring()) else {
        return Ok(None);
    };

    Ok(Some(AlignmentResult {
        ref_start: ext.ref_start,
        score: ext.score,
        cigar: to_cigar(&ext.aligned_ref, &ext.aligned_read),
        mapq: mapping_quality(ext.score, read.len()),
        nm: edit_distance(&ext.aligned_ref, &ext.aligned_read),
    }))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignStats {
    pub reads: usize,
    pub mapped: usize,
}

fn align_record(fm: &FMIndex, rec: &FastqRecord, opt: &AlignOpt) -> Option<AlignmentResult> {
    match align_read(fm, &rec.seq, opt) {
        Ok(res) => res,
        Err(e) => {
            log::warn!("read '{}' left unmapped: {}", rec.id, e);
            None
        }
    }
}

pub fn write_sam_header<W: Write>(out: &mut W, ref_name: &str, ref_len: usize) -> anyhow::Result<()> {
    writeln!(out, "@HD\tVN:1.6\tSO:unsorted")?;
    writeln!(out, "@SQ\tSN:{}\tLN:{}", ref_name, ref_len)?;
    writeln!(out, "@PG\tID:seedalign\tPN:seedalign\tVN:{}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

pub fn write_sam_record<W: Write>(
    out: &mut W,
    ref_name: &str,
    rec: &FastqRecord,
    res: Option<&AlignmentResult>,
) -> anyhow::Result<()> {
    let seq = String::from_utf8_lossy(&rec.seq);
    let qual = String::from_utf8_lossy(&rec.qual);
    match res {
        Some(a) => writeln!(
            out,
            "{}\t0\t{}\t{}\t{}\t{}\t*\t0\t0\t{}\t{}\tNM:i:{}\tAS:i:{}",
            rec.id,
            ref_name,
            a.ref_start + 1, // 1-based
            a.mapq,
            a.cigar,
            seq,
            qual,
            a.nm,
            a.score,
        )?,
        // unmapped: FLAG 4, RNEXT/PNEXT/SEQ/QUAL as per SAM minimal
        None => writeln!(out, "{}\t4\t*\t0\t0\t*\t*\t0\t0\t{}\t{}", rec.id, seq, qual)?,
    }
    Ok(())
}

/// 读取全部 FASTQ 记录并输出 SAM。read 按批次在 `threads` 个线程上并行比对，
/// 索引只读共享，输出顺序与输入一致。
pub fn align_reads<R: BufRead, W: Write>(
    fm: &FMIndex,
    ref_name: &str,
    mut reader: FastqReader<R>,
    mut out: W,
    opt: &AlignOpt,
    threads: usize,
) -> anyhow::Result<AlignStats> {
    opt.validate()?;
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads.max(1)).build()?;

    write_sam_header(&mut out, ref_name, fm.reference().len())?;

    let mut stats = AlignStats::default();
    loop {
        let mut batch: Vec<FastqRecord> = Vec::with_capacity(BATCH_SIZE);
        while batch.len() < BATCH_SIZE {
            match reader.next_record()? {
                Some(rec) => batch.push(rec),
                None => break,
            }
        }
        if batch.is_empty() {
            break;
        }

        let results: Vec<Option<AlignmentResult>> =
            pool.install(|| batch.par_iter().map(|rec| align_record(fm, rec, opt)).collect());

        for (rec, res) in batch.iter().zip(&results) {
            write_sam_record(&mut out, ref_name, rec, res.as_ref())?;
            stats.reads += 1;
            if res.is_some() {
                stats.mapped += 1;
            }
        }
        log::debug!("processed {} reads", stats.reads);
    }

    out.flush()?;
    Ok(stats)
}

/// 从 FASTA 的第一条序列建索引，比对 FASTQ 中所有 read，写出 SAM（未指定输出时写 stdout）。
pub fn align_fastq(
    reference_path: &Path,
    reads_path: &Path,
    out_path: Option<&Path>,
    opt: &AlignOpt,
    idx_cfg: &IndexConfig,
    threads: usize,
) -> anyhow::Result<AlignStats> {
    let reference = read_reference(reference_path)?;
    log::info!("reference: {} ({} bp)", reference.id, reference.seq.len());

    let fm = build_index(&reference.seq, idx_cfg)?;
    log::info!("FM index built");

    let fq = std::fs::File::open(reads_path)
        .with_context(|| format!("cannot open reads FASTQ '{}'", reads_path.display()))?;
    let reader = FastqReader::new(std::io::BufReader::new(fq));

    let out: Box<dyn Write> = match out_path {
        Some(p) => Box::new(std::io::BufWriter::new(
            std::fs::File::create(p).with_context(|| format!("cannot create '{}'", p.display()))?,
        )),
        None => Box::new(std::io::BufWriter::new(std::io::stdout())),
    };

    let stats = align_reads(&fm, &reference.id, reader, out, opt, threads)?;
    log::info!("aligned {} reads, {} mapped", stats.reads, stats.mapped);
    Ok(stats)
}
