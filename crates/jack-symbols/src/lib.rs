//! Scope tables for the Jack toolchain.
//!
//! Both tables share one linear-probing map ([`ProbeTable`]) keyed by name.
//! [`VariableTable`] tracks declared variables for code generation and
//! [`AddressTable`] maps labels and reserved Hack names to addresses.

pub mod addresses;
pub mod table;
pub mod variables;

pub use addresses::{AddressTable, RESERVED_ADDRESSES};
pub use table::{hash_name, ProbeTable, INITIAL_CAPACITY};
pub use variables::{VarKind, Variable, VariableTable};
