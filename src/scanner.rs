// Copyright 2026 the tickscan developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::line_char_nums::{LineCharNums, LineNum};
use crate::parity::Parity;
use crate::source_chars::{CharError, CharKind, CharLoc, CharRead};

/// The character whose balance this whole tool exists to check.
const TICK: char = '`';

/// A fatal condition that ends a scan without a summary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Deserialize, Serialize)]
pub enum ScanError {
    #[error("invalid utf-8 byte 0x{byte:02x} at offset {offset} (line {line})")]
    InvalidUtf8 { byte: u8, offset: u64, line: LineNum },

    #[error("input ends inside a utf-8 sequence at offset {offset}")]
    TruncatedUtf8 { offset: u64 },

    #[error("read failed at offset {offset}: {message}")]
    Io { offset: u64, message: String },
}

impl ScanError {
    /// Attaches the stream location to a decode-level error.
    fn at(loc: CharLoc, err: CharError) -> Self {
        match err {
            CharError::InvalidUtf8(byte) => Self::InvalidUtf8 {
                byte,
                offset: loc.offset,
                line: loc.line_char.line(),
            },
            CharError::TruncatedUtf8 => Self::TruncatedUtf8 { offset: loc.offset },
            CharError::Io(message) => Self::Io {
                offset: loc.offset,
                message,
            },
        }
    }
}

/// One observable outcome of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum ScanResult {
    /// A backtick, and the running count including it.
    Backtick { line_char: LineCharNums, total: u64 },

    /// The running count was odd when this line ended.
    UnclosedLine { line: LineNum },

    /// End of input: the whole-file count and its parity verdict.
    Summary { total: u64, parity: Parity },

    /// Decode or read failure. Nothing follows it, and in particular no
    /// summary: a failed scan has no verdict.
    Error(ScanError),
}

impl ScanResult {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns if this is the last result a scan yields.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Summary { .. } | Self::Error(_))
    }
}

/// Walks the char stream counting backticks.
///
/// Yields one `Backtick` per backtick found and one `UnclosedLine` per
/// line end at which the running count is odd. The stream closes with a
/// single `Summary`, or with an `Error` if decoding fails. The count is
/// cumulative across the whole input and never resets, so once a span is
/// left open every following line end warns until another backtick closes
/// it.
pub struct Scanner<I> {
    chars: I,
    count: u64,
    yielded_final: bool,
}

impl<I: Iterator<Item = CharRead>> Scanner<I> {
    pub fn new(chars: I) -> Self {
        Self {
            chars,
            count: 0,
            yielded_final: false,
        }
    }

    /// Handles one char-stream item. `None` means nothing to report.
    fn step(&mut self, read: CharRead) -> Option<ScanResult> {
        match read.kind {
            CharKind::Char(TICK) => {
                self.count += 1;
                Some(ScanResult::Backtick {
                    line_char: read.loc.line_char,
                    total: self.count,
                })
            }
            CharKind::Char(_) => None,
            CharKind::Eol => {
                if Parity::of(self.count).is_odd() {
                    Some(ScanResult::UnclosedLine {
                        line: read.loc.line_char.line(),
                    })
                } else {
                    None
                }
            }
            CharKind::Eof => Some(ScanResult::Summary {
                total: self.count,
                parity: Parity::of(self.count),
            }),
            CharKind::Error(err) => Some(ScanResult::Error(ScanError::at(read.loc, err))),
        }
    }
}

impl<I: Iterator<Item = CharRead>> Iterator for Scanner<I> {
    type Item = ScanResult;

    fn next(&mut self) -> Option<ScanResult> {
        if self.yielded_final {
            return None;
        }

        loop {
            let read = self.chars.next()?;

            if let Some(result) = self.step(read) {
                self.yielded_final = result.is_final();
                return Some(result);
            }
        }
    }
}

impl<I: Iterator<Item = CharRead>> FusedIterator for Scanner<I> {}
