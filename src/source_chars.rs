// Copyright 2026 the tickscan developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::io::BufRead;
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use crate::line_char_nums::LineCharNums;
use crate::source_bytes::{source_bytes, ByteItem, ByteRead};

/// Where a stream item sits in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CharLoc {
    /// Absolute byte offset of the item's first byte.
    pub offset: u64,
    /// 1-based line and char position.
    pub line_char: LineCharNums,
}

/// Decode-level failures. Location-free; the scanner attaches the location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum CharError {
    /// A byte that starts no valid UTF-8 sequence.
    InvalidUtf8(u8),
    /// The input ended partway through a UTF-8 sequence.
    TruncatedUtf8,
    /// The underlying reader failed.
    Io(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum CharKind {
    /// A decoded character that is not a line terminator.
    Char(char),
    /// A line terminator: LF, CRLF, or a lone CR.
    Eol,
    /// End of input.
    Eof,
    Error(CharError),
}

/// One item of the char stream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CharRead {
    pub loc: CharLoc,
    pub kind: CharKind,
}

impl CharRead {
    /// Returns if this item ends a line.
    pub fn is_eol(&self) -> bool {
        matches!(self.kind, CharKind::Eol)
    }

    /// Returns if this item ends the input.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, CharKind::Eof)
    }
}

/// Decodes an offset-tagged byte stream into located chars.
///
/// Bytes accumulate in a small buffer until `std::str::from_utf8` completes
/// a character or rejects the sequence. An incomplete prefix just waits for
/// the next byte. A byte that rejects a pending sequence without continuing
/// it is kept and decoded as the start of the next character.
/// Line terminators come out as `Eol` items and are excluded from char
/// numbering; an LF directly after a CR belongs to the CR's terminator.
/// A non-empty final line without a terminator is closed by a synthetic
/// `Eol` just before `Eof`. A clean stream ends with exactly one `Eof`;
/// a stream that dies mid-sequence ends with the error item instead.
pub struct SourceChars<I> {
    bytes: I,
    /// Bytes of the character currently being decoded.
    buf: [u8; 4],
    buf_len: usize,
    /// Offset of `buf[0]` in the input.
    char_offset: u64,
    line_char: LineCharNums,
    /// The previous character was a CR; an immediately following LF is part
    /// of the same terminator.
    prev_was_cr: bool,
    /// Yielded before pulling more bytes (the `Eof` behind a synthetic `Eol`).
    queued: Option<CharRead>,
    finished: bool,
}

/// Convenience: the full byte-to-char stage over a reader.
pub fn source_chars(input: Box<dyn BufRead>) -> SourceChars<impl Iterator<Item = ByteRead>> {
    SourceChars::new(source_bytes(input))
}

impl<I: Iterator<Item = ByteRead>> SourceChars<I> {
    pub fn new(bytes: I) -> Self {
        Self {
            bytes,
            buf: [0u8; 4],
            buf_len: 0,
            char_offset: 0,
            line_char: LineCharNums::one_one(),
            prev_was_cr: false,
            queued: None,
            finished: false,
        }
    }

    fn loc(&self) -> CharLoc {
        CharLoc {
            offset: self.char_offset,
            line_char: self.line_char,
        }
    }

    /// Turns a decoded character into a stream item, advancing the position.
    /// `None` means the character was the LF of a CRLF, already reported.
    fn complete_char(&mut self, ch: char) -> Option<CharRead> {
        let was_cr = self.prev_was_cr;
        self.prev_was_cr = ch == '\r';

        if was_cr && ch == '\n' {
            return None;
        }

        let loc = self.loc();
        if ch == '\r' || ch == '\n' {
            self.line_char.inc_line();
            Some(CharRead {
                loc,
                kind: CharKind::Eol,
            })
        } else {
            self.line_char.inc_char();
            Some(CharRead {
                loc,
                kind: CharKind::Char(ch),
            })
        }
    }

    /// Decodes the byte left behind when a rejected sequence did not
    /// include its terminating byte. A completed char (or a second
    /// rejection) is queued behind the error about to be returned; an
    /// incomplete prefix stays in the buffer and waits.
    fn queue_leftover(&mut self) {
        debug_assert_eq!(self.buf_len, 1);
        debug_assert!(self.queued.is_none());

        match std::str::from_utf8(&self.buf[..self.buf_len]) {
            Ok(s) => {
                debug_assert_eq!(s.chars().count(), 1);
                let ch = s.chars().next().unwrap();
                self.buf_len = 0;

                self.queued = self.complete_char(ch);
            }
            Err(err) => {
                if err.error_len().is_some() {
                    let bad = self.buf[0];
                    self.buf_len = 0;

                    self.queued = Some(CharRead {
                        loc: self.loc(),
                        kind: CharKind::Error(CharError::InvalidUtf8(bad)),
                    });
                }
                // An incomplete prefix waits for the next byte.
            }
        }
    }
}

impl<I: Iterator<Item = ByteRead>> Iterator for SourceChars<I> {
    type Item = CharRead;

    fn next(&mut self) -> Option<CharRead> {
        if self.finished {
            return None;
        }

        if let Some(read) = self.queued.take() {
            self.finished = read.is_eof();
            return Some(read);
        }

        loop {
            let Some(read) = self.bytes.next() else {
                // The byte stage ends after its Eof item (or we stopped
                // pulling at a fatal error); either way there is no more.
                self.finished = true;
                return None;
            };

            match read.item {
                ByteItem::Byte(byte) => {
                    if self.buf_len == 0 {
                        self.char_offset = read.offset;
                    }
                    debug_assert!(self.buf_len < 4);
                    self.buf[self.buf_len] = byte;
                    self.buf_len += 1;

                    match std::str::from_utf8(&self.buf[..self.buf_len]) {
                        Ok(s) => {
                            debug_assert_eq!(s.chars().count(), 1);
                            let ch = s.chars().next().unwrap();
                            self.buf_len = 0;

                            if let Some(item) = self.complete_char(ch) {
                                return Some(item);
                            }
                            // Swallowed the LF of a CRLF; keep pulling.
                        }
                        Err(err) => match err.error_len() {
                            None => {
                                // Valid prefix of a longer sequence.
                            }
                            Some(len) => {
                                debug_assert_eq!(err.valid_up_to(), 0);
                                let bad = self.buf[0];
                                let loc = self.loc();

                                // A byte can reject a pending sequence
                                // without belonging to it; it starts the
                                // next character rather than vanishing
                                // with the rejected bytes.
                                self.buf.copy_within(len..self.buf_len, 0);
                                self.buf_len -= len;
                                self.char_offset += len as u64;
                                self.prev_was_cr = false;

                                if self.buf_len != 0 {
                                    self.queue_leftover();
                                }

                                return Some(CharRead {
                                    loc,
                                    kind: CharKind::Error(CharError::InvalidUtf8(bad)),
                                });
                            }
                        },
                    }
                }
                ByteItem::Io(message) => {
                    let loc = CharLoc {
                        offset: read.offset,
                        line_char: self.line_char,
                    };
                    return Some(CharRead {
                        loc,
                        kind: CharKind::Error(CharError::Io(message)),
                    });
                }
                ByteItem::Eof => {
                    if self.buf_len != 0 {
                        // char_offset still points at the start of the
                        // incomplete sequence.
                        self.buf_len = 0;
                        return Some(CharRead {
                            loc: self.loc(),
                            kind: CharKind::Error(CharError::TruncatedUtf8),
                        });
                    }

                    self.char_offset = read.offset;

                    if !self.line_char.char().is_one() {
                        // The final line has content but no terminator; its
                        // end still counts as a line end.
                        let eol = CharRead {
                            loc: self.loc(),
                            kind: CharKind::Eol,
                        };
                        self.line_char.inc_line();
                        self.queued = Some(CharRead {
                            loc: self.loc(),
                            kind: CharKind::Eof,
                        });
                        return Some(eol);
                    }

                    self.finished = true;
                    return Some(CharRead {
                        loc: self.loc(),
                        kind: CharKind::Eof,
                    });
                }
            }
        }
    }
}

impl<I: Iterator<Item = ByteRead>> FusedIterator for SourceChars<I> {}
