// Copyright 2026 the tickscan developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::io::{BufRead, Read};

use serde::{Deserialize, Serialize};

/// One step of the raw input. Read failures and end of input are items
/// too, so every step still carries an offset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum ByteItem {
    Byte(u8),
    Io(String),
    Eof,
}

/// A byte item tagged with its absolute offset in the input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ByteRead {
    pub offset: u64,
    pub item: ByteItem,
}

/// Adapts a reader into an iterator of offset-tagged byte items.
///
/// The stream carries read failures in-band so the char stage can attach a
/// location to them, and ends with exactly one `ByteItem::Eof`.
pub fn source_bytes(input: Box<dyn BufRead>) -> impl Iterator<Item = ByteRead> {
    let bytes = input.bytes();

    let bytes_then_eof = bytes.map(Some).chain(std::iter::once(None));

    bytes_then_eof.scan(0u64, |offset, opt_read| {
        let read = ByteRead {
            offset: *offset,
            item: match opt_read {
                Some(Ok(byte)) => ByteItem::Byte(byte),
                Some(Err(err)) => ByteItem::Io(err.to_string()),
                None => ByteItem::Eof,
            },
        };
        *offset += 1;

        Some(read)
    })
}
