//! 库层错误类型。
//!
//! 只有调用方传入的非法配置会以错误返回；无匹配、窗口越界、空输入等情况
//! 在内部就地处理。

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// 索引或打分参数不合法（间隔为 0、罚分为负等）
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// 种子长度超过 read 长度
    #[error("seed length {seed_len} exceeds read length {read_len}")]
    SeedTooLong { seed_len: usize, read_len: usize },
}

pub type Result<T> = std::result::Result<T, AlignError>;
