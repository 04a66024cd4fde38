//! Streaming delimiter-separated record readers

use crate::{Error, Location, Result};
use std::io::BufRead;

/// Iterator over the records of a byte stream split on a delimiter.
///
/// The delimiter may be several bytes long (for example `b"\r\n"`). It is
/// stripped from each record. A trailing delimiter at end of input does not
/// produce an empty final record. An empty delimiter yields the whole
/// stream as a single record.
pub struct Records<R> {
    reader: R,
    delimiter: Vec<u8>,
    location: Location,
    finished: bool,
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R, delimiter: impl AsRef<[u8]>, location: Location) -> Self {
        Self {
            reader,
            delimiter: delimiter.as_ref().to_vec(),
            location,
            finished: false,
        }
    }

    fn next_record(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        let mut record = Vec::new();

        let Some(&last) = self.delimiter.last() else {
            self.reader.read_to_end(&mut record)?;
            self.finished = true;
            return Ok((!record.is_empty()).then_some(record));
        };

        loop {
            let read = self.reader.read_until(last, &mut record)?;
            if read == 0 {
                self.finished = true;
                return Ok((!record.is_empty()).then_some(record));
            }
            if record.ends_with(&self.delimiter) {
                record.truncate(record.len() - self.delimiter.len());
                return Ok(Some(record));
            }
        }
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.finished = true;
                Some(Err(Error::io(&self.location, e)))
            }
        }
    }
}

/// Iterator over UTF-8 lines; accepts both `\n` and `\r\n` endings.
pub struct Lines<R> {
    records: Records<R>,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R, location: Location) -> Self {
        Self {
            records: Records::new(reader, b"\n", location),
        }
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(record.and_then(|mut bytes| {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            String::from_utf8(bytes).map_err(|e| {
                Error::io(
                    &self.records.location,
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e),
                )
            })
        }))
    }
}
