pub const SIGMA: usize = 6; // {0:$, 1:A, 2:C, 3:G, 4:T, 5:N}

/// 哨兵字符的编码
pub const SENTINEL: u8 = 0;

#[inline]
pub fn to_alphabet(b: u8) -> u8 {
    match b.to_ascii_uppercase() {
        b'$' => SENTINEL,
        b'A' => 1,
        b'C' => 2,
        b'G' => 3,
        b'T' | b'U' => 4,
        _ => 5, // map others to N
    }
}

#[inline]
pub fn from_alphabet(a: u8) -> u8 {
    match a {
        0 => b'$',
        1 => b'A',
        2 => b'C',
        3 => b'G',
        4 => b'T',
        _ => b'N',
    }
}

/// 大写化并把 ACGTN 以外的字符归为 N（U 视为 T）。
pub fn normalize_seq(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .map(|&b| match b.to_ascii_uppercase() {
            up @ (b'A' | b'C' | b'G' | b'T' | b'N') => up,
            b'U' => b'T',
            _ => b'N',
        })
        .collect()
}

/// 规范化后的序列编码为数值字母表，不附加哨兵。
pub fn encode(seq: &[u8]) -> Vec<u8> {
    seq.iter().map(|&b| to_alphabet(b)).collect()
}
