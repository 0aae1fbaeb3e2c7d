use crate::index::fm::FMIndex;

/// 定长种子：read 上偏移 `offset` 处的 k-mer，以及它在参考上的全部精确匹配位置（升序）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub offset: usize,
    pub positions: Vec<u32>,
}

/// 滑动窗口生成种子：对 read 的每个偏移 i ∈ [0, len-k]，取 k-mer 做反向搜索，
/// 并把命中区间内的每一行解析成文本位置。
///
/// 返回按偏移稠密排列的列表（长度 len-k+1），无匹配的偏移对应空位置列表。
/// `k == 0` 或 `k > len` 时返回空列表，参数校验由调用方负责。
pub fn generate_seeds(fm: &FMIndex, query_alpha: &[u8], k: usize) -> Vec<Seed> {
    let n = query_alpha.len();
    if k == 0 || k > n {
        return Vec::new();
    }

    (0..=n - k)
        .map(|offset| {
            let kmer = &query_alpha[offset..offset + k];
            let (l, r) = fm.backward_search(kmer);
            let positions = fm.locate(l, r);
            log::trace!("seed offset={} hits={}", offset, positions.len());
            Seed { offset, positions }
        })
        .collect()
}

/// 所有种子命中总数
pub fn total_hits(seeds: &[Seed]) -> usize {
    seeds.iter().map(|s| s.positions.len()).sum()
}
