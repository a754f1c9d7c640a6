// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use once_cell::race::OnceBox;

/// A cell that is written at most once.
///
/// Concurrent first reads may all compute the value,
/// but only one of the results gets published,
/// and every reader sees that one from then on.
pub struct Memo<T> {
    cell: OnceBox<T>,
}

impl<T> Memo<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceBox::new(),
        }
    }

    /// Returns the published value,
    /// computing (and trying to publish) it first if there is none yet.
    pub fn get_or_init<F>(&self, init: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.cell.get_or_init(|| Box::new(init()))
    }

    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("Memo").field(value).finish(),
            None => f.write_str("Memo(<not computed>)"),
        }
    }
}
