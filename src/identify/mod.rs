//! Declarative magic-byte file identification.

pub(crate) mod builtins;
pub mod filetype;
pub(crate) mod offset;
pub(crate) mod rule;

pub use filetype::FileType;

use crate::error::IdentificationError;
use crate::text::is_text;
use std::io::Read;

/// Reads up to `max_len` bytes of `stream` and tries every registered
/// identifier program in order, returning the first match.
///
/// Crate-private: `Program` is an internal rule-DSL type, never
/// re-exported, so this can't be a public signature without leaking it.
/// [`crate::identify_file`] is the public entry point.
pub(crate) fn identify_stream<R: Read>(
    stream: &mut R,
    programs: &[(FileType, rule::Program)],
    max_len: usize,
) -> Result<Option<FileType>, IdentificationError> {
    let mut data = vec![0u8; max_len];
    let mut total = 0;
    loop {
        match stream.read(&mut data[total..])? {
            0 => break,
            n => total += n,
        }
        if total == data.len() {
            break;
        }
    }
    data.truncate(total);

    let textfile = is_text(&data);

    for (filetype, program) in programs {
        if textfile && !program.accepts_text {
            continue;
        }
        if !textfile && !program.accepts_binary {
            continue;
        }
        if program.matches(&data)? {
            return Ok(Some(*filetype));
        }
    }
    Ok(None)
}

pub(crate) fn identify_file<P: AsRef<std::path::Path>>(
    path: P,
    programs: &[(FileType, rule::Program)],
    max_len: usize,
) -> Result<Option<FileType>, IdentificationError> {
    let mut file = std::fs::File::open(path)?;
    identify_stream(&mut file, programs, max_len)
}

/// The buffer size needed to run every builtin program, the largest
/// `max_size` across the whole table.
pub(crate) fn builtin_max_data_buffer_size() -> usize {
    builtins::builtin_programs()
        .iter()
        .map(|(_, program)| program.max_size)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn identifies_a_mobi_pdb_header() {
        let programs = builtins::builtin_programs();
        let max_len = builtin_max_data_buffer_size();
        let mut data = vec![0u8; 68];
        data[60..68].copy_from_slice(b"BOOKMOBI");
        let mut cursor = Cursor::new(data);
        let result = identify_stream(&mut cursor, &programs, max_len).unwrap();
        assert_eq!(result, Some(FileType::Mobi));
    }

    #[test]
    fn unmatched_binary_returns_none() {
        let programs = builtins::builtin_programs();
        let max_len = builtin_max_data_buffer_size();
        let mut cursor = Cursor::new(vec![0u8; 128]);
        let result = identify_stream(&mut cursor, &programs, max_len).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn identifies_plain_xml() {
        let programs = builtins::builtin_programs();
        let max_len = builtin_max_data_buffer_size();
        let mut cursor = Cursor::new(b"<?xml version=\"1.0\"?><root/>".to_vec());
        let result = identify_stream(&mut cursor, &programs, max_len).unwrap();
        assert_eq!(result, Some(FileType::Xml));
    }
}
