use super::psa::PartialSuffixArray;
use super::IndexConfig;
use crate::util::dna;

/// FM 索引：
/// - 字母以 [0..sigma) 编码（0 预留为 $），文本末尾带一个哨兵。
/// - 每隔 `checkpoint_interval` 行保存一次累计计数（含该行），rank 查询从最近的
///   检查点向后顺扫补偿。
/// - 只保存稀疏采样的 SA，定位时沿 LF 映射回退到采样行。
#[derive(Debug, Clone)]
pub struct FMIndex {
    pub sigma: u8,
    pub checkpoint_interval: u32,
    /// c[a] = BWT 中字母 < a 的累计数量，即 a 在首列第一次出现的行；c[sigma] = n
    pub c: Vec<u32>,
    /// BWT 序列（含哨兵，长度 n）
    pub bwt: Vec<u8>,
    /// 检查点（按检查点存储，行优先展平）：checkpoints[cp * sigma + a] = bwt[0..=cp*C] 中 a 的个数
    pub checkpoints: Vec<u32>,
    pub psa: PartialSuffixArray,
    /// 规范化后的参考序列（ASCII，不含哨兵）
    pub text: Vec<u8>,
}

/// 统计 BWT 中各字母的出现次数，按字母序做前缀和。
pub fn build_first_occurrences(bwt: &[u8], sigma: usize) -> Vec<u32> {
    let mut freq = vec![0u32; sigma];
    for &ch in bwt {
        let ci = ch as usize;
        if ci < sigma {
            freq[ci] += 1;
        }
    }
    let mut c = vec![0u32; sigma + 1];
    let mut acc = 0u32;
    for a in 0..sigma {
        c[a] = acc;
        acc += freq[a];
    }
    c[sigma] = acc;
    c
}

/// 从左到右扫描 BWT，在第 0, C, 2C, ... 行（含该行）快照完整计数向量。
pub fn build_checkpoints(bwt: &[u8], sigma: usize, interval: usize) -> Vec<u32> {
    let n = bwt.len();
    let num = if n == 0 { 0 } else { (n + interval - 1) / interval };
    let mut checkpoints = Vec::with_capacity(num * sigma);
    let mut running = vec![0u32; sigma];
    for (i, &ch) in bwt.iter().enumerate() {
        let ci = ch as usize;
        if ci < sigma {
            running[ci] += 1;
        }
        if i % interval == 0 {
            checkpoints.extend_from_slice(&running);
        }
    }
    checkpoints
}

impl FMIndex {
    /// `text` 为规范化后的参考序列（不含哨兵），`bwt`/`sa` 基于编码并追加哨兵后的文本。
    pub fn build(text: Vec<u8>, bwt: Vec<u8>, sa: &[u32], cfg: &IndexConfig) -> Self {
        let sigma = dna::SIGMA;
        let interval = cfg.checkpoint_interval.max(1);
        let c = build_first_occurrences(&bwt, sigma);
        let checkpoints = build_checkpoints(&bwt, sigma, interval);
        let psa = PartialSuffixArray::build(sa, cfg.sample_interval);
        Self {
            sigma: sigma as u8,
            checkpoint_interval: interval as u32,
            c,
            bwt,
            checkpoints,
            psa,
            text,
        }
    }

    /// BWT 长度（含哨兵）
    #[inline]
    pub fn len(&self) -> usize {
        self.bwt.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bwt.is_empty()
    }

    /// 字母 a 是否出现在文本中
    #[inline]
    pub fn contains(&self, a: u8) -> bool {
        let ai = a as usize;
        ai < self.sigma as usize && self.c[ai + 1] > self.c[ai]
    }

    /// 返回 bwt[0..=idx] 中 a 的出现次数
    #[inline]
    pub fn rank(&self, idx: usize, a: u8) -> usize {
        let sigma_us = self.sigma as usize;
        let interval = self.checkpoint_interval as usize;
        let cp = idx / interval;
        let base = self.checkpoints[cp * sigma_us + a as usize] as usize;
        let start = cp * interval + 1;
        let add = self.bwt[start..=idx].iter().filter(|&&ch| ch == a).count();
        base + add
    }

    /// 返回 bwt[0..pos) 中 a 的出现次数
    #[inline]
    pub fn occ(&self, a: u8, pos: usize) -> usize {
        if pos == 0 { 0 } else { self.rank(pos - 1, a) }
    }

    /// LF 映射：第 row 行末列字符在首列中对应的行
    #[inline]
    pub fn lf(&self, row: usize) -> usize {
        let a = self.bwt[row];
        self.c[a as usize] as usize + self.rank(row, a) - 1
    }

    /// 反向搜索精确匹配，pat 已是编码后的字母表。
    ///
    /// 返回半开行区间 `(top, bot)`；无匹配时返回空区间 `(0, 0)`。
    pub fn backward_search(&self, pat: &[u8]) -> (usize, usize) {
        if self.bwt.is_empty() {
            return (0, 0);
        }
        // 闭区间 [top, bot]
        let mut top = 0usize;
        let mut bot = self.bwt.len() - 1;
        for &a in pat.iter().rev() {
            if !self.contains(a) {
                return (0, 0);
            }
            // rank(top) 包含 top 行本身，若 bwt[top] == a 需要扣掉
            let at_top = usize::from(self.bwt[top] == a);
            let before = self.rank(top, a) - at_top;
            let through = self.rank(bot, a);
            if through <= before {
                return (0, 0);
            }
            let first = self.c[a as usize] as usize;
            top = first + before;
            bot = first + through - 1;
        }
        (top, bot + 1)
    }

    /// 沿 LF 回退直到命中采样行，返回该行对应的文本位置。
    pub fn resolve(&self, row: usize) -> u32 {
        let n = self.bwt.len();
        let mut row = row;
        let mut steps = 0usize;
        loop {
            if let Some(pos) = self.psa.get(row) {
                return ((pos as usize + steps) % n) as u32;
            }
            row = self.lf(row);
            steps += 1;
        }
    }

    /// 取出区间 [l, r) 内所有行的文本位置，升序。
    pub fn locate(&self, l: usize, r: usize) -> Vec<u32> {
        let mut positions: Vec<u32> = (l..r).map(|row| self.resolve(row)).collect();
        positions.sort_unstable();
        positions
    }

    /// 由 BWT 逆推原文（不含哨兵），从哨兵所在的第 0 行出发逐步 LF。
    pub fn extract_text(&self) -> Vec<u8> {
        let n = self.bwt.len();
        if n == 0 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(n - 1);
        let mut row = 0usize;
        for _ in 0..n - 1 {
            out.push(dna::from_alphabet(self.bwt[row]));
            row = self.lf(row);
        }
        out.reverse();
        out
    }

    pub fn reference(&self) -> &[u8] {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;
    use proptest::prelude::*;

    fn index_of(seq: &[u8], k: usize, c: usize) -> FMIndex {
        let cfg = IndexConfig { sample_interval: k, checkpoint_interval: c };
        build_index(seq, &cfg).unwrap()
    }

    fn naive_positions(text: &[u8], pat: &[u8]) -> Vec<u32> {
        if pat.is_empty() || pat.len() > text.len() {
            return Vec::new();
        }
        text.windows(pat.len())
            .enumerate()
            .filter(|(_, w)| *w == pat)
            .map(|(i, _)| i as u32)
            .collect()
    }

    #[test]
    fn first_occurrences_prefix_sum() {
        // A C T G A $ T A
        let bwt = [1u8, 2, 4, 3, 1, 0, 4, 1];
        let c = build_first_occurrences(&bwt, dna::SIGMA);
        assert_eq!(c, vec![0, 1, 4, 5, 6, 8, 8]);
    }

    #[test]
    fn checkpoints_are_inclusive_snapshots() {
        let bwt = [1u8, 2, 4, 3, 1, 0, 4, 1];
        let cp = build_checkpoints(&bwt, dna::SIGMA, 5);
        // 第 0 行与第 5 行
        assert_eq!(cp.len(), 2 * dna::SIGMA);
        assert_eq!(&cp[..6], &[0, 1, 0, 0, 0, 0]);
        assert_eq!(&cp[6..], &[1, 2, 1, 1, 1, 0]);
    }

    #[test]
    fn rank_matches_linear_count() {
        let fm = index_of(b"GATTACAGATTACACCGT", 3, 5);
        for idx in 0..fm.len() {
            for a in 0..dna::SIGMA as u8 {
                let expect = fm.bwt[..=idx].iter().filter(|&&ch| ch == a).count();
                assert_eq!(fm.rank(idx, a), expect, "idx={} a={}", idx, a);
            }
        }
    }

    #[test]
    fn occ_is_exclusive_rank() {
        let fm = index_of(b"ACGTTGCAAGGCTT", 4, 3);
        for a in 0..dna::SIGMA as u8 {
            assert_eq!(fm.occ(a, 0), 0);
            for pos in 1..=fm.len() {
                assert_eq!(fm.occ(a, pos), fm.rank(pos - 1, a));
            }
        }
    }

    #[test]
    fn backward_search_gattaca() {
        let fm = index_of(b"GATTACAGATTACA", 2, 5);
        let pat = dna::encode(b"ATT");
        let (l, r) = fm.backward_search(&pat);
        assert_eq!(r - l, 2);
        assert_eq!(fm.locate(l, r), vec![1, 8]);
    }

    #[test]
    fn backward_search_no_match_is_empty() {
        let fm = index_of(b"GATTACAGATTACA", 2, 5);
        assert_eq!(fm.backward_search(&dna::encode(b"GG")), (0, 0));
        // 字母 N 不在文本中
        assert_eq!(fm.backward_search(&dna::encode(b"ANT")), (0, 0));
        let empty = index_of(b"", 2, 5);
        assert_eq!(empty.backward_search(&dna::encode(b"A")), (0, 0));
    }

    #[test]
    fn lf_walk_recovers_text() {
        let seq = b"ACGTTGCAAGGCTTAACCGGTTA";
        for c in [1, 2, 5, 16] {
            let fm = index_of(seq, 4, c);
            assert_eq!(fm.extract_text(), seq.to_vec());
        }
    }

    #[test]
    fn resolve_handles_every_sampling_interval() {
        let seq = b"TTAGGCATCGATCGATTTAGC";
        let full = index_of(seq, 1, 5);
        let expected: Vec<u32> = (0..full.len()).map(|row| full.resolve(row)).collect();
        for k in [2, 3, 7, 64] {
            let fm = index_of(seq, k, 3);
            for (row, &pos) in expected.iter().enumerate() {
                assert_eq!(fm.resolve(row), pos, "k={} row={}", k, row);
            }
        }
    }

    proptest! {
        #[test]
        fn search_agrees_with_naive_scan(
            text in proptest::collection::vec(prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')], 1..120),
            start in 0usize..120,
            len in 1usize..6,
            k in 1usize..9,
            c in 1usize..9,
        ) {
            let fm = index_of(&text, k, c);
            let s = start % text.len();
            let e = (s + len).min(text.len());
            let pat = &text[s..e];
            let (l, r) = fm.backward_search(&dna::encode(pat));
            prop_assert_eq!(fm.locate(l, r), naive_positions(&text, pat));
        }

        #[test]
        fn absent_pattern_yields_empty(text in "[AC]{1,60}", pat in "[GT]{1,4}") {
            let fm = index_of(text.as_bytes(), 4, 5);
            let (l, r) = fm.backward_search(&dna::encode(pat.as_bytes()));
            prop_assert!(l >= r);
            prop_assert!(fm.locate(l, r).is_empty());
        }

        #[test]
        fn bwt_roundtrip(text in "[ACGT]{0,100}") {
            let fm = index_of(text.as_bytes(), 5, 4);
            prop_assert_eq!(fm.extract_text(), text.into_bytes());
        }
    }
}
