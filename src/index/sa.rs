use std::cmp::Ordering;

/// 倍增过程中每个后缀的排序键：(起点, 前半段 rank, 后半段 rank)。
/// 后半段越过文本末尾时记为 -1。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SuffixRank {
    index: usize,
    rank0: i64,
    rank1: i64,
}

impl SuffixRank {
    #[inline]
    fn key(&self) -> (i64, i64) {
        (self.rank0, self.rank1)
    }

    /// 先比较 rank 对，相同则按原始下标，保证结果可复现
    fn compare(&self, other: &Self) -> Ordering {
        self.key()
            .cmp(&other.key())
            .then(self.index.cmp(&other.index))
    }
}

/// 构建后缀数组（倍增法，O(n log² n)）。
///
/// 输入为数值化文本（0:$,1:A,2:C,3:G,4:T,5:N），初始 rank 取自第 i 与 i+1 个字符，
/// 之后每轮把比较窗口 k 翻倍（4, 8, ...），直到所有 rank 互不相同或 k ≥ 2n。
pub fn build_sa(text: &[u8]) -> Vec<u32> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }

    let mut suffixes: Vec<SuffixRank> = (0..n)
        .map(|i| SuffixRank {
            index: i,
            rank0: text[i] as i64,
            rank1: if i + 1 < n { text[i + 1] as i64 } else { -1 },
        })
        .collect();
    suffixes.sort_unstable_by(SuffixRank::compare);

    // pos_of[text_pos] = 该后缀当前在 suffixes 中的行号
    let mut pos_of = vec![0usize; n];
    let mut k = 4usize;
    while k < 2 * n {
        // 重新分配稠密 rank：rank 对相同的后缀共享同一个新 rank
        let mut rank = 0i64;
        let mut prev = suffixes[0].key();
        suffixes[0].rank0 = 0;
        pos_of[suffixes[0].index] = 0;
        for i in 1..n {
            let cur = suffixes[i].key();
            if cur != prev {
                rank += 1;
            }
            prev = cur;
            suffixes[i].rank0 = rank;
            pos_of[suffixes[i].index] = i;
        }

        if rank as usize == n - 1 {
            break;
        }

        let half = k / 2;
        let snapshot: Vec<i64> = suffixes.iter().map(|s| s.rank0).collect();
        for s in suffixes.iter_mut() {
            let next = s.index + half;
            s.rank1 = if next < n { snapshot[pos_of[next]] } else { -1 };
        }
        suffixes.sort_unstable_by(SuffixRank::compare);
        k <<= 1;
    }

    suffixes.into_iter().map(|s| s.index as u32).collect()
}
