//! FASTA / FASTQ 文件解析。

pub mod fasta;
pub mod fastq;
