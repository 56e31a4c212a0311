use std::io::{self, Read};

/// A forward-only big-endian byte cursor over any `io::Read`.
///
/// All header parsers in this crate take a `&mut Reader<R>` already
/// advanced to the start of the structure they parse, and leave it
/// positioned immediately past the last byte they consumed.
#[derive(Debug, Default)]
pub(crate) struct Reader<R> {
    inner: R,
    position: u64,
    num_records: u16,
}

impl<R: Read> Reader<R> {
    pub(crate) fn new(inner: R) -> Reader<R> {
        Reader {
            inner,
            position: 0,
            num_records: 0,
        }
    }

    pub(crate) fn get_position(&self) -> u64 {
        self.position
    }

    /// Advance the reader to `n`, discarding bytes in between. A request to
    /// move backward is a no-op: this reader can only read forward over an
    /// arbitrary `io::Read`, and malformed input (e.g. an inconsistent
    /// MOBI `header_length`) can ask for exactly that without it being a
    /// bug in the caller.
    pub(crate) fn set_position(&mut self, n: u64) -> io::Result<()> {
        if n > self.position {
            let skip = n - self.position;
            io::copy(&mut self.inner.by_ref().take(skip), &mut io::sink())?;
            self.position = n;
        }
        Ok(())
    }

    pub(crate) fn set_num_records(&mut self, n: u16) {
        self.num_records = n;
    }

    pub(crate) fn num_records(&self) -> u16 {
        self.num_records
    }

    /// Byte offset of the end of the PDB record-info table (`num_records`
    /// entries of 8 bytes each) relative to the start of the PDB header.
    pub(crate) fn position_after_records(&self) -> u64 {
        78 + self.num_records as u64 * 8
    }

    pub(crate) fn read_u8(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf)?;
        self.position += 1;
        Ok(buf[0])
    }

    pub(crate) fn read_u16_be(&mut self) -> io::Result<u16> {
        let mut buf = [0u8; 2];
        self.inner.read_exact(&mut buf)?;
        self.position += 2;
        Ok(u16::from_be_bytes(buf))
    }

    pub(crate) fn read_u32_be(&mut self) -> io::Result<u32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        self.position += 4;
        Ok(u32::from_be_bytes(buf))
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> io::Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf)?;
        self.position += len as u64;
        Ok(buf)
    }

    /// Read `len` bytes from the current position as a lossily-decoded
    /// UTF-8 string, trimming trailing NUL bytes.
    pub(crate) fn read_string_header(&mut self, len: usize) -> io::Result<String> {
        let buf = self.read_bytes(len)?;
        Ok(trim_nul(&buf))
    }

    /// Seek forward to `start` (absolute offset from the beginning of the
    /// stream) and read `len` bytes as a lossily-decoded string. Used for
    /// fields addressed by an offset stored earlier in the same record,
    /// such as the MOBI `fullname`.
    pub(crate) fn read_string_at(&mut self, start: u64, len: usize) -> io::Result<String> {
        self.set_position(start)?;
        self.read_string_header(len)
    }

    /// Consume the remainder of the stream, returning everything read
    /// through this reader so far plus everything left unread.
    pub(crate) fn read_to_end(&mut self) -> io::Result<Vec<u8>> {
        let mut rest = Vec::new();
        self.inner.read_to_end(&mut rest)?;
        Ok(rest)
    }
}

fn trim_nul(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_big_endian_ints() {
        let data = vec![0x00, 0x01, 0x00, 0x00, 0x00, 0x02];
        let mut reader = Reader::new(Cursor::new(data));
        assert_eq!(reader.read_u16_be().unwrap(), 1);
        assert_eq!(reader.read_u32_be().unwrap(), 2);
    }

    #[test]
    fn trims_nul_padding() {
        let mut data = b"hello".to_vec();
        data.extend_from_slice(&[0u8; 5]);
        let mut reader = Reader::new(Cursor::new(data));
        assert_eq!(reader.read_string_header(10).unwrap(), "hello");
    }

    #[test]
    fn seeks_forward_for_string_at() {
        let mut data = vec![0u8; 4];
        data.extend_from_slice(b"book");
        let mut reader = Reader::new(Cursor::new(data));
        assert_eq!(reader.read_string_at(4, 4).unwrap(), "book");
    }

    #[test]
    fn tracks_position() {
        let data = vec![0u8; 10];
        let mut reader = Reader::new(Cursor::new(data));
        reader.read_u32_be().unwrap();
        assert_eq!(reader.get_position(), 4);
        reader.set_position(8).unwrap();
        assert_eq!(reader.get_position(), 8);
    }
}
