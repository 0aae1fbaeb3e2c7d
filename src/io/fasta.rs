use anyhow::{bail, Context, Result};
use std::io::BufRead;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    /// 原样保留大小写，规范化在建索引时完成
    pub seq: Vec<u8>,
}

pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    line_no: usize,
    done: bool,
    peek_header: Option<String>,
}

fn split_header(header: &str) -> (String, Option<String>) {
    let mut parts = header.splitn(2, char::is_whitespace);
    let id = parts.next().unwrap_or("").to_string();
    let desc = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    (id, desc)
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_no: 0,
            done: false,
            peek_header: None,
        }
    }

    fn read_line(&mut self) -> Result<usize> {
        self.buf.clear();
        let n = self.reader.read_line(&mut self.buf)?;
        if n > 0 {
            self.line_no += 1;
        }
        Ok(n)
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        let header = match self.peek_header.take() {
            Some(h) => h,
            None => loop {
                if self.read_line()? == 0 {
                    self.done = true;
                    return Ok(None);
                }
                if let Some(h) = self.buf.strip_prefix('>') {
                    break h.trim().to_string();
                }
                if !self.buf.trim().is_empty() {
                    bail!("FASTA line {}: sequence data before the first '>' header", self.line_no);
                }
            },
        };
        let (id, desc) = split_header(&header);

        let mut seq: Vec<u8> = Vec::new();
        loop {
            if self.read_line()? == 0 {
                self.done = true;
                break;
            }
            if let Some(h) = self.buf.strip_prefix('>') {
                self.peek_header = Some(h.trim().to_string());
                break;
            }
            seq.extend(self.buf.bytes().filter(|b| !b.is_ascii_whitespace()));
        }

        Ok(Some(FastaRecord { id, desc, seq }))
    }
}

/// 读取 FASTA 文件中的第一条序列作为参考；其余序列被忽略。
pub fn read_reference(path: &Path) -> Result<FastaRecord> {
    let fh = std::fs::File::open(path)
        .with_context(|| format!("cannot open reference FASTA '{}'", path.display()))?;
    let mut reader = FastaReader::new(std::io::BufReader::new(fh));
    let Some(rec) = reader.next_record()? else {
        bail!("FASTA file '{}' contains no sequences", path.display());
    };
    if reader.next_record()?.is_some() {
        log::warn!(
            "'{}' has more than one sequence; only '{}' is indexed",
            path.display(),
            rec.id
        );
    }
    Ok(rec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_simple_fasta() {
        let data = b">chr1 first\nACgTNN\n>chr2\nAAA\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));

        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.id, "chr1");
        assert_eq!(r1.desc.as_deref(), Some("first"));
        assert_eq!(r1.seq, b"ACgTNN");

        let r2 = r.next_record().unwrap().unwrap();
        assert_eq!(r2.id, "chr2");
        assert_eq!(r2.desc, None);
        assert_eq!(r2.seq, b"AAA");

        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn multiline_sequence_with_crlf() {
        let data = b">ref desc\r\nGATT\r\n ACA \r\n\r\nGATTACA\r\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));
        let rec = r.next_record().unwrap().unwrap();
        assert_eq!(rec.id, "ref");
        assert_eq!(rec.seq, b"GATTACAGATTACA");
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn empty_record_is_kept() {
        let data = b">empty\n>next\nAC\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));
        assert!(r.next_record().unwrap().unwrap().seq.is_empty());
        assert_eq!(r.next_record().unwrap().unwrap().seq, b"AC");
    }

    #[test]
    fn sequence_before_header_is_rejected() {
        let data = b"\nACGT\n>chr1\nACGT\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));
        let err = r.next_record().unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }
}
