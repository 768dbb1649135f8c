//! Address table: label or variable name → Hack memory address.

use crate::table::ProbeTable;

/// Names the Hack platform reserves, with their fixed addresses.
pub const RESERVED_ADDRESSES: [(&str, u16); 23] = [
    ("SP", 0),
    ("LCL", 1),
    ("ARG", 2),
    ("THIS", 3),
    ("THAT", 4),
    ("R0", 0),
    ("R1", 1),
    ("R2", 2),
    ("R3", 3),
    ("R4", 4),
    ("R5", 5),
    ("R6", 6),
    ("R7", 7),
    ("R8", 8),
    ("R9", 9),
    ("R10", 10),
    ("R11", 11),
    ("R12", 12),
    ("R13", 13),
    ("R14", 14),
    ("R15", 15),
    ("SCREEN", 16384),
    ("KBD", 24576),
];

#[derive(Debug, Clone, Default)]
pub struct AddressTable {
    entries: ProbeTable<u16>,
}

impl AddressTable {
    /// An empty table with no reserved names.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table already holding every entry of [`RESERVED_ADDRESSES`].
    pub fn with_reserved() -> Self {
        let mut table = Self::new();
        table.seed_reserved();
        table
    }

    pub fn seed_reserved(&mut self) {
        for (name, address) in RESERVED_ADDRESSES {
            self.add_entry(name, address);
        }
    }

    pub fn add_entry(&mut self, name: &str, address: u16) {
        self.entries.insert(name, address);
    }

    pub fn address_of(&self, name: &str) -> Option<u16> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_names_present_before_any_insert() {
        let t = AddressTable::with_reserved();
        assert_eq!(t.address_of("SCREEN"), Some(16384));
        assert_eq!(t.address_of("KBD"), Some(24576));
        assert_eq!(t.address_of("SP"), Some(0));
        assert_eq!(t.address_of("R15"), Some(15));
        assert_eq!(t.len(), 23);
    }

    #[test]
    fn test_plain_table_is_empty() {
        let t = AddressTable::new();
        assert!(t.is_empty());
        assert_eq!(t.address_of("SCREEN"), None);
    }

    #[test]
    fn test_add_entry_is_idempotent() {
        let mut t = AddressTable::with_reserved();
        t.add_entry("LOOP", 16);
        let occupied = t.len();
        t.add_entry("LOOP", 16);
        assert_eq!(t.len(), occupied);
        assert_eq!(t.address_of("LOOP"), Some(16));
    }

    #[test]
    fn test_reserved_name_can_be_overwritten() {
        let mut t = AddressTable::with_reserved();
        t.add_entry("R0", 99);
        assert_eq!(t.address_of("R0"), Some(99));
        assert_eq!(t.len(), 23);
    }

    #[test]
    fn test_missing_name() {
        let t = AddressTable::with_reserved();
        assert!(!t.contains("END"));
        assert_eq!(t.address_of("END"), None);
        assert!(t.contains("THAT"));
    }
}
