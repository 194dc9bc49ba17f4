// Copyright 2026 the tickscan developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

pub mod line_char_nums;
pub mod parity;
pub mod report;
pub mod scanner;
pub mod source_bytes;
pub mod source_chars;

#[cfg(test)]
mod test_util;
