//! Interface composition: base-interface delegation by opnum range.

use dmrp_core::SyntaxId;

use super::error::TableError;
use super::table::{Lookup, OpTable};

/// Longest base chain `validate` accepts before declaring a cycle.
const MAX_BASE_DEPTH: usize = 8;

/// Static description of one RPC interface.
///
/// An interface's opnum space is `[0, opnum_end())`. The prefix
/// `[0, base_opnums())` is a verbatim copy of the base interface's space and
/// is dispatched by the base; the rest belongs to `ops`.
#[derive(Debug)]
pub struct InterfaceDef {
    pub name: &'static str,
    pub syntax: SyntaxId,
    pub base: Option<&'static InterfaceDef>,
    pub ops: OpTable,
}

/// Where an opnum is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Delegate to the base interface's dispatcher with the same opnum.
    Base {
        interface: &'static str,
        opnum: u32,
    },
    /// Look the opnum up in this interface's own table.
    Local,
}

/// An opnum resolved through the whole base chain.
#[derive(Debug, Clone, Copy)]
pub struct Resolved {
    /// The interface whose table owns the opnum.
    pub owner: &'static InterfaceDef,
    pub lookup: Lookup,
}

impl InterfaceDef {
    /// Size of the inherited opnum prefix (`B`).
    #[must_use]
    pub fn base_opnums(&self) -> u32 {
        self.base.map_or(0, InterfaceDef::opnum_end)
    }

    /// One past the highest opnum this interface answers, inherited ones included.
    #[must_use]
    pub fn opnum_end(&self) -> u32 {
        self.ops.end().max(self.base_opnums())
    }

    #[must_use]
    pub fn route(&self, opnum: u32) -> Route {
        match self.base {
            Some(base) if opnum < self.base_opnums() => Route::Base {
                interface: base.name,
                opnum,
            },
            _ => Route::Local,
        }
    }

    /// Follows base delegation until the owning table is reached.
    #[must_use]
    pub fn resolve(&'static self, opnum: u32) -> Resolved {
        let mut owner = self;
        for _ in 0..=MAX_BASE_DEPTH {
            match (owner.route(opnum), owner.base) {
                (Route::Base { .. }, Some(base)) => owner = base,
                _ => break,
            }
        }
        Resolved {
            owner,
            lookup: owner.ops.lookup(opnum),
        }
    }

    /// This interface followed by its bases, nearest first.
    pub fn chain(&'static self) -> impl Iterator<Item = &'static InterfaceDef> {
        std::iter::successors(Some(self), |def| def.base).take(MAX_BASE_DEPTH + 1)
    }

    /// Checks the table against the composition rules: local slots start at
    /// the base boundary, cover `[B, N)` with no gaps, and never repeat.
    ///
    /// # Errors
    ///
    /// Returns the first [`TableError`] found, checking bases first.
    pub fn validate(&'static self) -> Result<(), TableError> {
        if self.chain().count() > MAX_BASE_DEPTH {
            return Err(TableError::BaseCycle {
                interface: self.name,
            });
        }
        if let Some(base) = self.base {
            base.validate()?;
        }

        let base_end = self.base_opnums();
        let end = self.ops.end();
        let slots = self.ops.slots();

        for (i, slot) in slots.iter().enumerate() {
            if slot.opnum < base_end {
                return Err(TableError::OverlapsBase {
                    interface: self.name,
                    opnum: slot.opnum,
                    base_end,
                });
            }
            if slots[..i].iter().any(|prev| prev.opnum == slot.opnum) {
                return Err(TableError::DuplicateOpnum {
                    interface: self.name,
                    opnum: slot.opnum,
                });
            }
        }

        if let Some(opnum) = (base_end..end).find(|opnum| self.ops.lookup(*opnum) == Lookup::Unknown)
        {
            return Err(TableError::Gap {
                interface: self.name,
                opnum,
            });
        }
        Ok(())
    }
}
