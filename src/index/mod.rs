//! 索引构建：后缀数组 → BWT → FM 索引（检查点 rank + 稀疏 SA）。

pub mod bwt;
pub mod fm;
pub mod psa;
pub mod sa;

use crate::error::{AlignError, Result};
use crate::util::dna;

pub use fm::FMIndex;

/// 索引调优参数，每个索引各自持有，互不影响。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// SA 采样间隔 K：只保留文本位置为 K 倍数的行
    pub sample_interval: usize,
    /// rank 检查点间隔 C
    pub checkpoint_interval: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { sample_interval: 32, checkpoint_interval: 5 }
    }
}

impl IndexConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sample_interval == 0 {
            return Err(AlignError::InvalidConfig("sample interval must be at least 1".into()));
        }
        if self.checkpoint_interval == 0 {
            return Err(AlignError::InvalidConfig("checkpoint interval must be at least 1".into()));
        }
        Ok(())
    }
}

/// 对单条参考序列构建 FM 索引。空参考序列得到只含哨兵的索引。
pub fn build_index(reference: &[u8], cfg: &IndexConfig) -> Result<FMIndex> {
    cfg.validate()?;

    let norm = dna::normalize_seq(reference);
    let mut text = dna::encode(&norm);
    text.push(dna::SENTINEL);

    let sa_arr = sa::build_sa(&text);
    let bwt_arr = bwt::build_bwt(&text, &sa_arr);
    let fm = FMIndex::build(norm, bwt_arr, &sa_arr, cfg);

    log::debug!(
        "built FM index: ref_len={}, checkpoints={}, sampled_rows={} (K={}, C={})",
        reference.len(),
        fm.checkpoints.len() / dna::SIGMA,
        fm.psa.len(),
        fm.psa.interval(),
        cfg.checkpoint_interval,
    );
    Ok(fm)
}
