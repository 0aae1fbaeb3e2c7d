const NEG_INF: i32 = i32::MIN / 4;

/// 打分参数：罚分均以正数给出，计算时减去。
/// 长度为 L 的空位代价为 `gap_open + (L-1) * gap_extend`。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoringParams {
    pub match_score: i32,
    pub mismatch_penalty: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
}

/// middle 矩阵每个格子的来源
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// 匹配 / 错配
    Diag,
    /// 来自 lower：t 中的空位，消耗 s 的一个字符
    Up,
    /// 来自 upper：s 中的空位，消耗 t 的一个字符
    Left,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Middle,
    Lower,
    Upper,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalAlignment {
    pub score: i32,
    /// 对齐后的 s，空位记为 `-`
    pub aligned_s: Vec<u8>,
    /// 对齐后的 t，与 aligned_s 等长
    pub aligned_t: Vec<u8>,
}

/// DP 工作缓冲区，可跨调用复用
pub struct AffineBuffer {
    lower: Vec<i32>,
    middle: Vec<i32>,
    upper: Vec<i32>,
    trace: Vec<Step>,
}

impl Default for AffineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl AffineBuffer {
    pub fn new() -> Self {
        Self {
            lower: Vec::new(),
            middle: Vec::new(),
            upper: Vec::new(),
            trace: Vec::new(),
        }
    }

    fn resize(&mut self, size: usize) {
        self.lower.clear();
        self.middle.clear();
        self.upper.clear();
        self.trace.clear();
        self.lower.resize(size, NEG_INF);
        self.middle.resize(size, NEG_INF);
        self.upper.resize(size, NEG_INF);
        self.trace.resize(size, Step::Diag);
    }
}

/// 仿射空位全局（端到端）对齐，三矩阵 Gotoh 递推。
pub fn global_affine(s: &[u8], t: &[u8], p: ScoringParams) -> GlobalAlignment {
    global_affine_with_buf(s, t, p, &mut AffineBuffer::new())
}

/// 同 [`global_affine`]，使用调用方提供的缓冲区。
///
/// 同分时 middle 的来源优先级为 Diag > Left(upper) > Up(lower)；
/// 空位状态内同分时优先延伸而不是重新开启。
pub fn global_affine_with_buf(
    s: &[u8],
    t: &[u8],
    p: ScoringParams,
    buf: &mut AffineBuffer,
) -> GlobalAlignment {
    let m = s.len();
    let n = t.len();
    let cols = n + 1;

    buf.resize((m + 1) * cols);
    let AffineBuffer { lower, middle, upper, trace } = buf;

    let leading_gap = |len: usize| -(p.gap_open + (len as i32 - 1) * p.gap_extend);

    middle[0] = 0;
    for i in 1..=m {
        let idx = i * cols;
        lower[idx] = leading_gap(i);
        middle[idx] = lower[idx];
        trace[idx] = Step::Up;
    }
    for j in 1..=n {
        upper[j] = leading_gap(j);
        middle[j] = upper[j];
        trace[j] = Step::Left;
    }

    for i in 1..=m {
        for j in 1..=n {
            let idx = i * cols + j;
            let up_idx = (i - 1) * cols + j;
            let left_idx = i * cols + (j - 1);
            let diag_idx = (i - 1) * cols + (j - 1);

            lower[idx] = (lower[up_idx] - p.gap_extend).max(middle[up_idx] - p.gap_open);
            upper[idx] = (upper[left_idx] - p.gap_extend).max(middle[left_idx] - p.gap_open);

            let subst = if s[i - 1] == t[j - 1] {
                p.match_score
            } else {
                -p.mismatch_penalty
            };
            let diag = middle[diag_idx] + subst;

            let (val, step) = if diag >= upper[idx] && diag >= lower[idx] {
                (diag, Step::Diag)
            } else if upper[idx] >= lower[idx] {
                (upper[idx], Step::Left)
            } else {
                (lower[idx], Step::Up)
            };
            middle[idx] = val;
            trace[idx] = step;
        }
    }

    let score = middle[m * cols + n];

    // backtrack from (m, n)
    let mut aligned_s = Vec::with_capacity(m + n);
    let mut aligned_t = Vec::with_capacity(m + n);
    let mut state = State::Middle;
    let mut i = m;
    let mut j = n;

    while i > 0 || j > 0 {
        let idx = i * cols + j;
        match state {
            State::Middle => {
                if i == 0 {
                    state = State::Upper;
                } else if j == 0 {
                    state = State::Lower;
                } else {
                    match trace[idx] {
                        Step::Diag => {
                            aligned_s.push(s[i - 1]);
                            aligned_t.push(t[j - 1]);
                            i -= 1;
                            j -= 1;
                        }
                        Step::Up => state = State::Lower,
                        Step::Left => state = State::Upper,
                    }
                }
            }
            State::Lower => {
                let extends = i > 1 && lower[idx] == lower[idx - cols] - p.gap_extend;
                aligned_s.push(s[i - 1]);
                aligned_t.push(b'-');
                i -= 1;
                if !extends {
                    state = State::Middle;
                }
            }
            State::Upper => {
                let extends = j > 1 && upper[idx] == upper[idx - 1] - p.gap_extend;
                aligned_s.push(b'-');
                aligned_t.push(t[j - 1]);
                j -= 1;
                if !extends {
                    state = State::Middle;
                }
            }
        }
    }

    aligned_s.reverse();
    aligned_t.reverse();

    GlobalAlignment { score, aligned_s, aligned_t }
}
