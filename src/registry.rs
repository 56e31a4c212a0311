//! The pluggable registry: two tiers (builtin, extra) per subsystem, with
//! extras shadowing builtins on lookup and an explicit chain-or-replace
//! choice on registration.
//!
//! Grounded on `biblio/plugs.py`'s `add_pluggable`/`find_pluggable`/
//! `iterate_pluggables` trio: a subsystem name, an ordered builtin map
//! populated once at import time, and an ordered extra map user code can
//! add to later. `override=False` there means "append to a list under
//! this key"; `override=True` means "replace the key's single value".
//! This registry keeps the same two behaviors but picks concrete Rust
//! types per subsystem instead of storing arbitrary objects.

use crate::error::RegistryError;
use crate::identify::builtins;
use crate::identify::rule::Program;
use crate::identify::FileType;
use crate::metadata::EbookMetadata;
use crate::process;
use indexmap::IndexMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    Identifiers,
    Parsers,
}

pub(crate) type ParserFn =
    Arc<dyn Fn(&[u8]) -> Result<EbookMetadata, crate::error::ParserError> + Send + Sync>;

#[derive(Default)]
struct IdentifierTier {
    rules: IndexMap<FileType, Vec<Program>>,
}

impl IdentifierTier {
    fn add(&mut self, filetype: FileType, program: Program, chain: bool) {
        let entry = self.rules.entry(filetype).or_default();
        if chain {
            entry.push(program);
        } else {
            entry.clear();
            entry.push(program);
        }
    }

    fn iter(&self) -> impl Iterator<Item = (FileType, &Program)> {
        self.rules
            .iter()
            .flat_map(|(ft, programs)| programs.iter().map(move |p| (*ft, p)))
    }
}

#[derive(Default)]
struct ParserTier {
    parsers: IndexMap<FileType, ParserFn>,
}

/// Holds both subsystems' builtin and extra tiers. Constructed once via
/// [`Registry::bootstrap`]; extras can be registered afterward with
/// [`Registry::add_identifier`] / [`Registry::add_parser`].
pub struct Registry {
    identifier_builtin: IdentifierTier,
    identifier_extra: IdentifierTier,
    parser_builtin: ParserTier,
    parser_extra: ParserTier,
    max_data_buffer_size: usize,
}

impl Registry {
    /// Wires up the builtin identifier table and the builtin parser table.
    pub fn bootstrap() -> Registry {
        let mut identifier_builtin = IdentifierTier::default();
        let mut max_data_buffer_size = 0;
        for (filetype, program) in builtins::builtin_programs() {
            max_data_buffer_size = max_data_buffer_size.max(program.max_size);
            identifier_builtin.add(filetype, program, false);
        }

        let mut parser_builtin = ParserTier::default();
        for (filetype, parser) in process::builtin_parsers() {
            parser_builtin.parsers.insert(filetype, parser);
        }

        Registry {
            identifier_builtin,
            identifier_extra: IdentifierTier::default(),
            parser_builtin,
            parser_extra: ParserTier::default(),
            max_data_buffer_size,
        }
    }

    pub fn max_data_buffer_size(&self) -> usize {
        self.max_data_buffer_size
    }

    /// Registers an identifier program under `filetype`. `chain = false`
    /// replaces any existing extra programs for this type; `chain = true`
    /// appends an alternative.
    ///
    /// Crate-private: [`Program`] is an internal representation (not
    /// re-exported), built only by the builtin rule table today. A
    /// future public identifier-registration API would need to export
    /// [`Program`]/`ProgramBuilder`/`Offset` first.
    pub(crate) fn add_identifier(&mut self, filetype: FileType, program: Program, chain: bool) {
        self.max_data_buffer_size = self.max_data_buffer_size.max(program.max_size);
        self.identifier_extra.add(filetype, program, chain);
    }

    /// Registers a parser for `filetype`. Extras always replace a prior
    /// extra registration for the same type (parsers are singular per
    /// type, unlike identifier rules).
    pub fn add_parser(&mut self, filetype: FileType, parser: ParserFn) {
        self.parser_extra.parsers.insert(filetype, parser);
    }

    /// All identifier programs, extras first then builtins, in
    /// registration order within each tier. Crate-private for the same
    /// reason as [`Registry::add_identifier`]: `Program` isn't public API.
    pub(crate) fn iterate_identifiers(&self) -> impl Iterator<Item = (FileType, &Program)> {
        self.identifier_extra.iter().chain(self.identifier_builtin.iter())
    }

    /// Looks up the parser for `filetype`, preferring an extra
    /// registration over the builtin one.
    pub(crate) fn find_parser(&self, filetype: FileType) -> Option<&ParserFn> {
        self.parser_extra
            .parsers
            .get(&filetype)
            .or_else(|| self.parser_builtin.parsers.get(&filetype))
    }

    /// Validates that `subsystem` is one this registry actually serves.
    /// Every subsystem value is valid today; this exists because the
    /// original registry could be asked about subsystem names that were
    /// never initialized, and callers that thread a `Subsystem` through
    /// dynamically (e.g. a future CLI `--subsystem` flag) still get a
    /// typed error instead of a panic.
    pub fn check_subsystem(subsystem: Subsystem) -> Result<(), RegistryError> {
        match subsystem {
            Subsystem::Identifiers | Subsystem::Parsers => Ok(()),
        }
    }
}
