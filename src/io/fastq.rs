use anyhow::{anyhow, Result};
use std::io::BufRead;

#[derive(Debug, Clone)]
pub struct FastqRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
    pub qual: Vec<u8>,
}

/// 四行格式的 FASTQ 读取器；记录之间的空行被跳过，不支持折行的序列。
pub struct FastqReader<R: BufRead> {
    reader: R,
    buf: String,
    records: usize,
    done: bool,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: String::new(), records: 0, done: false }
    }

    fn read_line(&mut self) -> Result<bool> {
        self.buf.clear();
        Ok(self.reader.read_line(&mut self.buf)? > 0)
    }

    pub fn next_record(&mut self) -> Result<Option<FastqRecord>> {
        if self.done { return Ok(None); }
        let rec_no = self.records + 1;

        // header line starting with '@'
        loop {
            if !self.read_line()? { self.done = true; return Ok(None); }
            if !self.buf.trim().is_empty() { break; }
        }
        let Some(header) = self.buf.strip_prefix('@') else {
            return Err(anyhow!("FASTQ record {}: header not starting with '@'", rec_no));
        };
        let header = header.trim_end();
        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        // sequence line
        if !self.read_line()? { return Err(anyhow!("FASTQ record {} ('{}'): unexpected EOF after header", rec_no, id)); }
        let seq = self.buf.trim_end().as_bytes().to_vec();

        // plus line
        if !self.read_line()? || !self.buf.starts_with('+') {
            return Err(anyhow!("FASTQ record {} ('{}'): missing '+' line", rec_no, id));
        }

        // quality line
        if !self.read_line()? { return Err(anyhow!("FASTQ record {} ('{}'): missing quality line", rec_no, id)); }
        let qual = self.buf.trim_end().as_bytes().to_vec();
        if qual.len() != seq.len() {
            return Err(anyhow!(
                "FASTQ record {} ('{}'): seq/qual length mismatch ({} vs {})",
                rec_no, id, seq.len(), qual.len()
            ));
        }

        self.records = rec_no;
        Ok(Some(FastqRecord { id, desc, seq, qual }))
    }
}
