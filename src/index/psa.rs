use std::collections::HashMap;

/// 稀疏采样的后缀数组：只保留文本位置是 `interval` 倍数的行。
///
/// 采样依据是 `sa[row]` 的值（文本位置），而不是行号本身；
/// 位置 0 一定被采样，因此任意行沿 LF 回退至多 `interval` 步即可命中。
#[derive(Debug, Clone)]
pub struct PartialSuffixArray {
    interval: u32,
    samples: HashMap<u32, u32>,
}

impl PartialSuffixArray {
    pub fn build(sa: &[u32], interval: usize) -> Self {
        let k = interval.max(1) as u32;
        let samples: HashMap<u32, u32> = sa
            .iter()
            .enumerate()
            .filter(|&(_, &pos)| pos % k == 0)
            .map(|(row, &pos)| (row as u32, pos))
            .collect();
        Self { interval: k, samples }
    }

    #[inline]
    pub fn get(&self, row: usize) -> Option<u32> {
        self.samples.get(&(row as u32)).copied()
    }

    pub fn interval(&self) -> usize {
        self.interval as usize
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_by_text_position_not_row() {
        // GATTACA$ 的后缀数组
        let sa = [7u32, 6, 4, 1, 5, 0, 3, 2];
        let psa = PartialSuffixArray::build(&sa, 2);
        // 文本位置 6, 4, 0, 2 被采样，对应行 1, 2, 5, 7
        assert_eq!(psa.len(), 4);
        assert_eq!(psa.get(1), Some(6));
        assert_eq!(psa.get(2), Some(4));
        assert_eq!(psa.get(5), Some(0));
        assert_eq!(psa.get(7), Some(2));
        assert_eq!(psa.get(0), None);
        assert_eq!(psa.get(3), None);
    }

    #[test]
    fn interval_one_keeps_every_row() {
        let sa = [3u32, 0, 2, 1];
        let psa = PartialSuffixArray::build(&sa, 1);
        assert_eq!(psa.len(), 4);
        for (row, &pos) in sa.iter().enumerate() {
            assert_eq!(psa.get(row), Some(pos));
        }
    }

    #[test]
    fn empty_sa() {
        let psa = PartialSuffixArray::build(&[], 4);
        assert!(psa.is_empty());
        assert_eq!(psa.interval(), 4);
    }
}
