use super::offset::Offset;
use crate::error::IdentificationError;
use regex::bytes::Regex;
use std::sync::Arc;

/// An expected big-endian integer field within a `Rule::Struct` match,
/// together with its width in bytes. Replaces the reference
/// implementation's `struct.calcsize`/pack-descriptor-string approach
/// (spec Design Notes §9) with typed fields.
#[derive(Debug, Clone, Copy)]
pub(crate) enum StructField {
    U8(u8),
    U16(u16),
    U32(u32),
}

impl StructField {
    fn width(self) -> usize {
        match self {
            StructField::U8(_) => 1,
            StructField::U16(_) => 2,
            StructField::U32(_) => 4,
        }
    }

    fn matches(self, bytes: &[u8]) -> bool {
        match self {
            StructField::U8(v) => bytes.first() == Some(&v),
            StructField::U16(v) => bytes.len() >= 2 && u16::from_be_bytes([bytes[0], bytes[1]]) == v,
            StructField::U32(v) => {
                bytes.len() >= 4 && u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) == v
            }
        }
    }
}

type FuncRule = Arc<dyn Fn(&[u8]) -> Option<usize> + Send + Sync>;

#[derive(Clone)]
pub(crate) enum Rule {
    String {
        offset: Offset,
        literal: Vec<u8>,
    },
    Struct {
        offset: Offset,
        fields: Vec<StructField>,
    },
    Search {
        offset: Offset,
        window: usize,
        needle: Vec<u8>,
    },
    Regex {
        offset: Offset,
        window: usize,
        pattern: Regex,
    },
    /// Escape hatch: a callback examines the tail slice starting at the
    /// resolved offset and returns the new cursor position on success.
    Func {
        offset: Offset,
        func: FuncRule,
    },
}

/// An ordered rule sequence plus the text/binary gating flags.
#[derive(Clone)]
pub(crate) struct Program {
    pub(crate) rules: Vec<Rule>,
    pub(crate) accepts_text: bool,
    pub(crate) accepts_binary: bool,
    pub(crate) min_size: usize,
    pub(crate) max_size: usize,
}

impl Program {
    /// Runs the program against a zero-initialized cursor. `Ok(true)` means
    /// every rule matched; `Ok(false)` means some rule's comparison failed
    /// (not a match, not an error); `Err` surfaces a resolved-offset or
    /// regex failure.
    pub(crate) fn matches(&self, data: &[u8]) -> Result<bool, IdentificationError> {
        if data.len() < self.min_size {
            return Ok(false);
        }

        let mut cursor: usize = 0;
        for rule in &self.rules {
            match rule {
                Rule::String { offset, literal } => {
                    let off = offset.resolve(cursor)?;
                    let end = off + literal.len();
                    if end > data.len() || &data[off..end] != literal.as_slice() {
                        return Ok(false);
                    }
                    cursor = end;
                }
                Rule::Struct { offset, fields } => {
                    let off = offset.resolve(cursor)?;
                    let mut pos = off;
                    for field in fields {
                        let width = field.width();
                        if pos + width > data.len() || !field.matches(&data[pos..pos + width]) {
                            return Ok(false);
                        }
                        pos += width;
                    }
                    cursor = pos;
                }
                Rule::Search {
                    offset,
                    window,
                    needle,
                } => {
                    let off = offset.resolve(cursor)?;
                    let end = (off + window).min(data.len());
                    if off >= end {
                        return Ok(false);
                    }
                    match find_subslice(&data[off..end], needle) {
                        Some(pos) => cursor = off + pos + needle.len(),
                        None => return Ok(false),
                    }
                }
                Rule::Regex {
                    offset,
                    window,
                    pattern,
                } => {
                    let off = offset.resolve(cursor)?;
                    let end = (off + window).min(data.len());
                    if off >= end {
                        return Ok(false);
                    }
                    match pattern.find(&data[off..end]) {
                        Some(m) => cursor = off + m.end(),
                        None => return Ok(false),
                    }
                }
                Rule::Func { offset, func } => {
                    let off = offset.resolve(cursor)?;
                    match func(&data[off..]) {
                        Some(new_cursor) => cursor = new_cursor,
                        None => return Ok(false),
                    }
                }
            }
        }
        Ok(true)
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return if needle.is_empty() { Some(0) } else { None };
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Accumulates rules, then computes `min_size`/`max_size` on `build()`,
/// mirroring `_calc_identifier_sizes` in the reference implementation: a
/// static replay of cursor arithmetic using only rule shapes, not data.
pub(crate) struct ProgramBuilder {
    rules: Vec<Rule>,
    accepts_text: bool,
    accepts_binary: bool,
}

impl ProgramBuilder {
    pub(crate) fn text_only() -> Self {
        ProgramBuilder {
            rules: Vec::new(),
            accepts_text: true,
            accepts_binary: false,
        }
    }

    pub(crate) fn binary_only() -> Self {
        ProgramBuilder {
            rules: Vec::new(),
            accepts_text: false,
            accepts_binary: true,
        }
    }

    pub(crate) fn string(mut self, offset: Offset, literal: &[u8]) -> Self {
        self.rules.push(Rule::String {
            offset,
            literal: literal.to_vec(),
        });
        self
    }

    pub(crate) fn struct_(mut self, offset: Offset, fields: Vec<StructField>) -> Self {
        self.rules.push(Rule::Struct { offset, fields });
        self
    }

    pub(crate) fn search(mut self, offset: Offset, window: usize, needle: &[u8]) -> Self {
        self.rules.push(Rule::Search {
            offset,
            window,
            needle: needle.to_vec(),
        });
        self
    }

    pub(crate) fn regex(self, offset: Offset, window: usize, pattern: &str) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid builtin regex {:?}: {}", pattern, e));
        self.regex_compiled(offset, window, pattern)
    }

    fn regex_compiled(mut self, offset: Offset, window: usize, pattern: Regex) -> Self {
        self.rules.push(Rule::Regex {
            offset,
            window,
            pattern,
        });
        self
    }

    #[allow(dead_code)]
    pub(crate) fn func(mut self, offset: Offset, func: FuncRule) -> Self {
        self.rules.push(Rule::Func { offset, func });
        self
    }

    pub(crate) fn build(self) -> Program {
        let mut min_size = 4096usize;
        let mut max_size = 0usize;
        let mut cpos = 0usize;

        for rule in &self.rules {
            let (minsz, maxsz);
            match rule {
                Rule::String { offset, literal } => {
                    let off = offset.resolve(cpos).unwrap_or(0);
                    cpos = off + literal.len();
                    minsz = cpos;
                    maxsz = cpos;
                }
                Rule::Struct { offset, fields } => {
                    let off = offset.resolve(cpos).unwrap_or(0);
                    let size: usize = fields.iter().map(|f| f.width()).sum();
                    cpos = off + size;
                    minsz = cpos;
                    maxsz = cpos;
                }
                Rule::Search { offset, window, .. } | Rule::Regex { offset, window, .. } => {
                    let off = offset.resolve(cpos).unwrap_or(0);
                    cpos = off;
                    minsz = cpos;
                    maxsz = off + window;
                }
                Rule::Func { offset, .. } => {
                    let off = offset.resolve(cpos).unwrap_or(0);
                    cpos = off;
                    minsz = cpos;
                    maxsz = cpos;
                }
            }
            min_size = min_size.min(minsz);
            max_size = max_size.max(maxsz);
        }

        Program {
            rules: self.rules,
            accepts_text: self.accepts_text,
            accepts_binary: self.accepts_binary,
            min_size,
            max_size,
        }
    }
}
