// nmlrs/src/options.rs

//! Binding and printing options, plus the legacy per-thread flag words.
//!
//! Entry points that take no explicit [`Options`] read a snapshot of the
//! calling thread's flag words through [`Options::current`]. The words are
//! set with [`set_namelist_processing_flags`] and [`set_print_namelist_flags`].

use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Binding flag: keep current values instead of resetting to defaults.
pub const STICKY_NAMELIST_DEFAULTS: u32 = 0x0001;

/// Printing flag: omit scalar items that still hold their default.
pub const PRINT_NAMELIST_NODEFAULTS: u32 = 1;

/// Printing flag: single-space layout with short continuation indent.
pub const PRINT_NAMELIST_COMPACT: u32 = 2;

/// Default soft line width of printed output.
pub const DEFAULT_COLUMN_WIDTH: usize = 120;

thread_local! {
    static PROCESSING_FLAGS: Cell<u32> = Cell::new(0);
    static PRINT_FLAGS: Cell<u32> = Cell::new(0);
}

/// Set the calling thread's binding flags.
pub fn set_namelist_processing_flags(flags: u32) {
    PROCESSING_FLAGS.with(|cell| cell.set(flags));
}

/// Set the calling thread's printing flags.
pub fn set_print_namelist_flags(flags: u32) {
    PRINT_FLAGS.with(|cell| cell.set(flags));
}

/// Options for binding and printing namelists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Do not reset items to their defaults before binding
    pub sticky_defaults: bool,
    /// Omit scalar items equal to their default when printing
    pub no_defaults: bool,
    /// Compact printed layout
    pub compact: bool,
    /// Soft line width for printed output
    pub column_width: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            sticky_defaults: false,
            no_defaults: false,
            compact: false,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl Options {
    /// Create options with every flag clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from legacy binding and printing flag words.
    pub fn from_flags(process: u32, print: u32) -> Self {
        Self {
            sticky_defaults: process & STICKY_NAMELIST_DEFAULTS != 0,
            no_defaults: print & PRINT_NAMELIST_NODEFAULTS != 0,
            compact: print & PRINT_NAMELIST_COMPACT != 0,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }

    /// Snapshot of the calling thread's flag words.
    pub fn current() -> Self {
        let process = PROCESSING_FLAGS.with(Cell::get);
        let print = PRINT_FLAGS.with(Cell::get);
        Self::from_flags(process, print)
    }

    pub fn with_sticky_defaults(mut self, sticky: bool) -> Self {
        self.sticky_defaults = sticky;
        self
    }

    pub fn with_no_defaults(mut self, no_defaults: bool) -> Self {
        self.no_defaults = no_defaults;
        self
    }

    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn with_column_width(mut self, width: usize) -> Self {
        self.column_width = width;
        self
    }

    /// Binding flags as a legacy flag word.
    pub fn process_flags(&self) -> u32 {
        if self.sticky_defaults {
            STICKY_NAMELIST_DEFAULTS
        } else {
            0
        }
    }

    /// Printing flags as a legacy flag word.
    pub fn print_flags(&self) -> u32 {
        let mut flags = 0;
        if self.no_defaults {
            flags |= PRINT_NAMELIST_NODEFAULTS;
        }
        if self.compact {
            flags |= PRINT_NAMELIST_COMPACT;
        }
        flags
    }
}
