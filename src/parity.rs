// Copyright 2026 the tickscan developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use serde::{Deserialize, Serialize};

/// Whether a running backtick count is even or odd.
///
/// Odd parity at a line end is the unclosed-span heuristic: some opening
/// backtick is still waiting for its closing partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    /// Returns the parity of `count`.
    pub const fn of(count: u64) -> Self {
        if count % 2 == 1 {
            Self::Odd
        } else {
            Self::Even
        }
    }

    /// Returns true iff odd.
    pub const fn is_odd(&self) -> bool {
        matches!(self, Self::Odd)
    }
}
