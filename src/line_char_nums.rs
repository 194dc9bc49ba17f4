// Copyright 2026 the tickscan developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LineNum(u64);

impl LineNum {
    /// Returns line number 1.
    pub const fn one() -> Self {
        Self(1)
    }

    /// Returns the given line number. Line numbers are 1-based.
    pub const fn new(n: u64) -> Self {
        assert!(n >= 1, "line numbers are 1-based");
        Self(n)
    }

    pub fn inc(&mut self) {
        self.0 += 1;
    }
}

impl Display for LineNum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CharNum(u64);

impl CharNum {
    /// Returns char number 1.
    pub const fn one() -> Self {
        Self(1)
    }

    /// Returns the given char number. Char numbers are 1-based and count
    /// decoded characters, not bytes.
    pub const fn new(n: u64) -> Self {
        assert!(n >= 1, "char numbers are 1-based");
        Self(n)
    }

    /// Returns true iff char number is 1.
    pub const fn is_one(&self) -> bool {
        self.0 == 1
    }

    pub fn inc(&mut self) {
        self.0 += 1;
    }
}

impl Display for CharNum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A (line, char) position, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct LineCharNums {
    line: LineNum,
    char: CharNum,
}

impl LineCharNums {
    /// Returns (line, char) number (1, 1).
    pub const fn one_one() -> Self {
        Self {
            line: LineNum::one(),
            char: CharNum::one(),
        }
    }

    pub const fn new(line: LineNum, char: CharNum) -> Self {
        Self { line, char }
    }

    /// Returns the (one-based) line number.
    pub const fn line(&self) -> LineNum {
        self.line
    }

    /// Returns the (one-based) char number.
    pub const fn char(&self) -> CharNum {
        self.char
    }

    /// Increments the line number, resets the char number to 1.
    pub fn inc_line(&mut self) {
        self.line.inc();
        self.char = CharNum::one();
    }

    /// Increments the char number. Does not affect the line number.
    pub fn inc_char(&mut self) {
        self.char.inc();
    }
}
