//! 对齐结果收尾：CIGAR、编辑距离（NM）与比对质量（MAPQ）。
//!
//! 约定：`aligned_ref` 为参考窗口，`aligned_read` 为 read；read 一侧的空位记为 D，
//! 参考一侧的空位记为 I。

use std::fmt::Write as _;

pub const MAX_MAPQ: u8 = 60;

/// CIGAR 操作
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CigarOp {
    M = b'M', // Match/mismatch
    I = b'I', // Insertion to reference
    D = b'D', // Deletion from reference
}

impl CigarOp {
    #[inline]
    pub const fn to_char(self) -> char {
        self as u8 as char
    }

    /// 由一列对齐字符判断操作；两侧同时为空位时返回 None
    #[inline]
    fn of_column(r: u8, q: u8) -> Option<Self> {
        match (r == b'-', q == b'-') {
            (false, false) => Some(Self::M),
            (false, true) => Some(Self::D),
            (true, false) => Some(Self::I),
            (true, true) => None,
        }
    }
}

pub fn ops_to_cigar(ops: &[CigarOp]) -> String {
    let mut cigar = String::new();
    let Some((&first, rest)) = ops.split_first() else {
        return cigar;
    };
    let mut cur = first;
    let mut len = 1usize;
    for &op in rest {
        if op == cur {
            len += 1;
        } else {
            let _ = write!(&mut cigar, "{}{}", len, cur.to_char());
            cur = op;
            len = 1;
        }
    }
    let _ = write!(&mut cigar, "{}{}", len, cur.to_char());
    cigar
}

/// 逐列扫描两条等长对齐串，合并相同操作为游程。
pub fn to_cigar(aligned_ref: &[u8], aligned_read: &[u8]) -> String {
    let ops: Vec<CigarOp> = aligned_ref
        .iter()
        .zip(aligned_read)
        .filter_map(|(&r, &q)| CigarOp::of_column(r, q))
        .collect();
    ops_to_cigar(&ops)
}

/// 错配数加空位列数
pub fn edit_distance(aligned_ref: &[u8], aligned_read: &[u8]) -> u32 {
    aligned_ref
        .iter()
        .zip(aligned_read)
        .filter(|&(&r, &q)| r != q)
        .count() as u32
}

/// 以 `2 * read_len` 作为满分估计比对质量，结果落在 [0, 60]。
///
/// 得分达到或超过满分时直接返回上限，避免 log10(0)。
pub fn mapping_quality(score: i32, read_len: usize) -> u8 {
    let max_possible = 2 * read_len as u64;
    if score < 0 || max_possible == 0 {
        return 0;
    }
    let probability = score as f64 / max_possible as f64;
    if probability <= 0.0 {
        return 0;
    }
    if probability >= 1.0 {
        return MAX_MAPQ;
    }
    let quality = -10.0 * (1.0 - probability).log10();
    quality.floor().min(MAX_MAPQ as f64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cigar_all_match() {
        assert_eq!(to_cigar(b"GATTACA", b"GATTACA"), "7M");
        // 错配也记作 M
        assert_eq!(to_cigar(b"GATTACA", b"GATCACA"), "7M");
    }

    #[test]
    fn cigar_gap_in_read_is_deletion() {
        assert_eq!(to_cigar(b"ACGT", b"AC-T"), "2M1D1M");
    }

    #[test]
    fn cigar_gap_in_ref_is_insertion() {
        assert_eq!(to_cigar(b"AC--T", b"ACGGT"), "2M2I1M");
    }

    #[test]
    fn cigar_flushes_trailing_runs() {
        assert_eq!(to_cigar(b"ACG--", b"A-GTT"), "1M1D1M2I");
        assert_eq!(to_cigar(b"", b""), "");
    }

    #[test]
    fn ops_runs_merge() {
        use CigarOp::*;
        assert_eq!(ops_to_cigar(&[M, M, I, D, D, M]), "2M1I2D1M");
        assert_eq!(ops_to_cigar(&[]), "");
    }

    #[test]
    fn nm_counts_mismatches_and_gaps() {
        assert_eq!(edit_distance(b"ACGT", b"ACGT"), 0);
        assert_eq!(edit_distance(b"ACGT", b"AGGT"), 1);
        assert_eq!(edit_distance(b"AC--T", b"ACGGA"), 3);
    }

    #[test]
    fn mapq_bounds() {
        assert_eq!(mapping_quality(0, 50), 0);
        assert_eq!(mapping_quality(-5, 50), 0);
        assert_eq!(mapping_quality(100, 50), MAX_MAPQ);
        assert_eq!(mapping_quality(500, 50), MAX_MAPQ);
        assert_eq!(mapping_quality(10, 0), 0);
    }

    #[test]
    fn mapq_phred_scale() {
        // p = 0.5 -> 3.01
        assert_eq!(mapping_quality(50, 50), 3);
        // p = 0.8 -> 6.99
        assert_eq!(mapping_quality(80, 50), 6);
        // p = 0.95 -> 13.01
        assert_eq!(mapping_quality(95, 50), 13);
        // p = 0.98 -> 16.99
        assert_eq!(mapping_quality(98, 50), 16);
    }
}
