//! Operation registry: the static opnum table of one interface.

/// What occupies an opnum slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// A live operation with its request and response shape names.
    Operation {
        request: &'static str,
        response: &'static str,
    },
    /// A slot kept only to preserve numbering; never dispatched.
    Reserved,
}

/// One opnum slot of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpSlot {
    pub opnum: u32,
    /// Protocol name, for logs and tooling only. Routing is by opnum.
    pub name: &'static str,
    pub kind: SlotKind,
}

impl OpSlot {
    #[must_use]
    pub const fn operation(
        opnum: u32,
        name: &'static str,
        request: &'static str,
        response: &'static str,
    ) -> Self {
        Self {
            opnum,
            name,
            kind: SlotKind::Operation { request, response },
        }
    }

    #[must_use]
    pub const fn reserved(opnum: u32, name: &'static str) -> Self {
        Self {
            opnum,
            name,
            kind: SlotKind::Reserved,
        }
    }

    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(self.kind, SlotKind::Reserved)
    }
}

/// Result of [`OpTable::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Operation(&'static OpSlot),
    Reserved(&'static OpSlot),
    Unknown,
}

/// The local opnum slots of one interface, excluding inherited base slots.
///
/// Slots need not be stored in opnum order; tables hold a few dozen entries
/// and lookup is a linear probe. [`InterfaceDef::validate`] checks that the
/// slots cover their range exactly once.
///
/// [`InterfaceDef::validate`]: super::InterfaceDef::validate
#[derive(Debug, Clone, Copy)]
pub struct OpTable {
    slots: &'static [OpSlot],
}

impl OpTable {
    #[must_use]
    pub const fn new(slots: &'static [OpSlot]) -> Self {
        Self { slots }
    }

    /// One past the highest local opnum, or 0 for an empty table.
    #[must_use]
    pub fn end(&self) -> u32 {
        self.slots
            .iter()
            .map(|slot| slot.opnum.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub const fn slots(&self) -> &'static [OpSlot] {
        self.slots
    }

    #[must_use]
    pub fn lookup(&self, opnum: u32) -> Lookup {
        match self.slots.iter().find(|slot| slot.opnum == opnum) {
            Some(slot) if slot.is_reserved() => Lookup::Reserved(slot),
            Some(slot) => Lookup::Operation(slot),
            None => Lookup::Unknown,
        }
    }

    /// Live operations, in declaration order.
    pub fn operations(&self) -> impl Iterator<Item = &'static OpSlot> {
        self.slots.iter().filter(|slot| !slot.is_reserved())
    }

    /// Reserved slots, in declaration order.
    pub fn reserved(&self) -> impl Iterator<Item = &'static OpSlot> {
        self.slots.iter().filter(|slot| slot.is_reserved())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SLOTS: [OpSlot; 4] = [
        OpSlot::operation(3, "EnumDisks", "EnumDisksRequest", "EnumDisksResponse"),
        OpSlot::operation(5, "Eject", "EjectRequest", "EjectResponse"),
        OpSlot::reserved(4, "Reserved_Opnum4"),
        OpSlot::reserved(6, "Reserved_Opnum6"),
    ];
    static TABLE: OpTable = OpTable::new(&SLOTS);

    #[test]
    fn end_is_one_past_highest_opnum() {
        assert_eq!(TABLE.end(), 7);
        assert_eq!(OpTable::new(&[]).end(), 0);
    }

    #[test]
    fn lookup_classifies_every_slot() {
        assert!(matches!(TABLE.lookup(3), Lookup::Operation(slot) if slot.name == "EnumDisks"));
        assert!(matches!(TABLE.lookup(4), Lookup::Reserved(slot) if slot.opnum == 4));
        assert!(matches!(TABLE.lookup(5), Lookup::Operation(_)));
        assert!(matches!(TABLE.lookup(6), Lookup::Reserved(_)));
    }

    #[test]
    fn lookup_outside_table_is_unknown() {
        assert_eq!(TABLE.lookup(0), Lookup::Unknown);
        assert_eq!(TABLE.lookup(7), Lookup::Unknown);
        assert_eq!(TABLE.lookup(u32::MAX), Lookup::Unknown);
    }

    #[test]
    fn operations_and_reserved_partition_the_slots() {
        let live: Vec<u32> = TABLE.operations().map(|s| s.opnum).collect();
        let reserved: Vec<u32> = TABLE.reserved().map(|s| s.opnum).collect();
        assert_eq!(live, vec![3, 5]);
        assert_eq!(reserved, vec![4, 6]);
    }
}
