//! # seedalign
//!
//! 基于 FM 索引的极简短读段比对器（seed-and-extend）。
//!
//! 本 crate 提供：
//!
//! - **索引构建**：后缀数组（倍增法）→ BWT → FM 索引（检查点 rank + 稀疏采样 SA）
//! - **种子查找**：定长 k-mer 滑窗 + 反向搜索
//! - **种子延伸**：三矩阵仿射空位全局对齐（Gotoh）
//! - **结果收尾**：CIGAR、NM 与 MAPQ
//!
//! ## 快速示例
//!
//! ```rust,no_run
//! use seedalign::{align_read, build_index, AlignOpt, IndexConfig};
//!
//! let fm = build_index(b"GATTACAGATTACA", &IndexConfig::default()).unwrap();
//! let opt = AlignOpt { match_score: 1, seed_len: 3, ..AlignOpt::default() };
//! if let Some(hit) = align_read(&fm, b"ATTACA", &opt).unwrap() {
//!     println!("pos={} cigar={} mapq={}", hit.ref_start, hit.cigar, hit.mapq);
//! }
//! ```
//!
//! ## 模块说明
//!
//! - [`index`] — 索引构建（后缀数组、BWT、稀疏 SA、FM 索引）
//! - [`align`] — 种子、仿射对齐、延伸与收尾，以及 FASTQ → SAM 驱动
//! - [`io`] — FASTA / FASTQ 文件解析
//! - [`util`] — DNA 字母表编码

pub mod align;
pub mod error;
pub mod index;
pub mod io;
pub mod util;

pub use align::{align_read, AlignOpt, AlignmentResult};
pub use error::{AlignError, Result};
pub use index::{build_index, FMIndex, IndexConfig};
