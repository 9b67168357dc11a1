//! Cell identifiers and the document-scoped identifier allocator.
//!
//! This module provides the [`CellId`] type, a `Copy` handle that stores
//! decimal identifiers inline and interns named ones in a global string
//! interner, and the [`IdAllocator`] which hands out fresh decimal
//! identifiers for the cells of one document.
//!
//! Two identifiers are reserved on every page: [`ROOT_ID`] (`"0"`) for the
//! implicit root cell and [`LAYER_ID`] (`"1"`) for the default layer. The
//! allocator never returns either of them.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Identifier of the implicit root cell of every page.
pub const ROOT_ID: &str = "0";

/// Identifier of the default layer of every page.
pub const LAYER_ID: &str = "1";

/// Global string interner for named identifiers.
///
/// Interned names live for the rest of the process. Decimal identifiers,
/// including everything [`IdAllocator`] issues, bypass the interner, so
/// building many documents does not grow it.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut interner)
}

/// Identifier of a cell within a diagram document.
///
/// Copying and comparing identifiers is cheap. Canonical decimal identifiers
/// (`"0"`, `"3"`, `"42"`) are stored as numbers; any other name is interned.
/// `CellId::new("5")` and the fifth allocated identifier are equal. The
/// textual form is what ends up in the `id`, `parent`, `source`, and `target`
/// attributes of the rendered document.
///
/// # Examples
///
/// ```
/// use mxdraft_core::identifier::CellId;
///
/// let layer = CellId::default_layer();
/// assert_eq!(layer, "1");
/// assert!(layer.is_reserved());
///
/// let state = CellId::new("AttenteCarte");
/// assert!(!state.is_reserved());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(Repr);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Repr {
    Number(u64),
    Name(DefaultSymbol),
}

impl CellId {
    /// Creates a `CellId` from its textual form.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        match parse_canonical(name) {
            Some(number) => Self::number(number),
            None => Self(Repr::Name(with_interner(|interner| {
                interner.get_or_intern(name)
            }))),
        }
    }

    fn number(number: u64) -> Self {
        Self(Repr::Number(number))
    }

    /// The identifier of the implicit root cell (`"0"`).
    pub fn root() -> Self {
        Self::number(0)
    }

    /// The identifier of the default layer (`"1"`).
    pub fn default_layer() -> Self {
        Self::number(1)
    }

    /// Returns `true` for the root and default layer identifiers.
    pub fn is_reserved(&self) -> bool {
        *self == Self::root() || *self == Self::default_layer()
    }
}

/// Parses `name` as a decimal number written without sign or leading zeros.
///
/// Only such names round-trip through their number, so `"007"` stays a name.
fn parse_canonical(name: &str) -> Option<u64> {
    let canonical = name == "0" || (!name.starts_with('0') && !name.is_empty());
    if !canonical || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Number(number) => write!(f, "{number}"),
            Repr::Name(symbol) => with_interner(|interner| match interner.resolve(symbol) {
                Some(name) => f.write_str(name),
                None => Err(fmt::Error),
            }),
        }
    }
}

impl From<&str> for CellId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for CellId {
    /// Allows direct comparison with string slices: `id == "3"`
    fn eq(&self, other: &str) -> bool {
        match self.0 {
            Repr::Number(number) => parse_canonical(other) == Some(number),
            Repr::Name(symbol) => {
                with_interner(|interner| interner.resolve(symbol) == Some(other))
            }
        }
    }
}

impl PartialEq<&str> for CellId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Issues fresh cell identifiers for one document.
///
/// Identifiers are decimal strings drawn from a monotonically increasing
/// counter. The counter starts past the reserved identifiers and is advanced
/// before every issue, so the first identifier handed out is `"3"`. There is
/// no reuse and no recycling.
///
/// The allocator is owned by a single document and is not meant to be shared
/// between threads.
///
/// # Examples
///
/// ```
/// use mxdraft_core::identifier::IdAllocator;
///
/// let mut ids = IdAllocator::new();
/// assert_eq!(ids.next_id(), "3");
/// assert_eq!(ids.next_id(), "4");
/// assert_eq!(ids.issued(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct IdAllocator {
    counter: u64,
    issued: u64,
}

impl IdAllocator {
    const FIRST_COUNTER: u64 = 2;

    /// Creates an allocator that has not issued anything yet.
    pub fn new() -> Self {
        Self {
            counter: Self::FIRST_COUNTER,
            issued: 0,
        }
    }

    /// Returns a fresh identifier that was never returned before.
    pub fn next_id(&mut self) -> CellId {
        self.counter += 1;
        self.issued += 1;
        CellId::number(self.counter)
    }

    /// Number of identifiers issued so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
