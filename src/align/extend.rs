use std::collections::HashSet;

use super::affine::{global_affine_with_buf, AffineBuffer, ScoringParams};
use super::seed::Seed;

/// 种子延伸得到的最佳全局对齐
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// 参考窗口起点（0-based）
    pub ref_start: usize,
    pub score: i32,
    pub aligned_ref: Vec<u8>,
    pub aligned_read: Vec<u8>,
}

/// 由种子偏移与命中位置推出参考窗口 `[p - offset, p - offset + read_len)`；
/// 窗口越出参考两端时返回 None。
#[inline]
fn window(offset: usize, pos: u32, read_len: usize, ref_len: usize) -> Option<(usize, usize)> {
    let start = (pos as usize).checked_sub(offset)?;
    let end = start + read_len;
    (end <= ref_len).then_some((start, end))
}

/// 对每个 (偏移, 命中位置) 取出参考窗口，与整条 read 做仿射全局对齐，保留得分最高者。
///
/// 同一窗口只计算一次；同分时保留最先遇到的窗口（偏移升序、位置升序）。
/// 没有任何合法窗口时返回 None。
pub fn extend_seeds(
    reference: &[u8],
    read: &[u8],
    seeds: &[Seed],
    p: ScoringParams,
) -> Option<Extension> {
    let mut buf = AffineBuffer::new();
    let mut visited: HashSet<usize> = HashSet::new();
    let mut best: Option<Extension> = None;

    for seed in seeds {
        for &pos in &seed.positions {
            let Some((start, end)) = window(seed.offset, pos, read.len(), reference.len()) else {
                log::trace!("skip out-of-bounds window: offset={} pos={}", seed.offset, pos);
                continue;
            };
            if !visited.insert(start) {
                continue;
            }

            let aln = global_affine_with_buf(&reference[start..end], read, p, &mut buf);
            if best.as_ref().map_or(true, |b| aln.score > b.score) {
                best = Some(Extension {
                    ref_start: start,
                    score: aln.score,
                    aligned_ref: aln.aligned_s,
                    aligned_read: aln.aligned_t,
                });
            }
        }
    }

    if let Some(b) = &best {
        log::debug!(
            "best window ref_start={} score={} ({} windows evaluated)",
            b.ref_start,
            b.score,
            visited.len()
        );
    }
    best
}
