//! Variable table: declared name → type, kind and ordinal.

use std::fmt;

use crate::table::ProbeTable;

/// Storage class of a declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Static,
    Field,
    Arg,
    Var,
}

impl VarKind {
    fn slot(self) -> usize {
        match self {
            VarKind::Static => 0,
            VarKind::Field => 1,
            VarKind::Arg => 2,
            VarKind::Var => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Static => "static",
            VarKind::Field => "field",
            VarKind::Arg => "arg",
            VarKind::Var => "var",
        }
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Declared type: `int`, `char`, `boolean` or a class name
    pub ty: String,
    pub kind: VarKind,
    /// Ordinal among the variables of the same kind
    pub index: u16,
}

#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    entries: ProbeTable<Variable>,
    /// Next unused ordinal per kind; never decreases.
    next_index: [u16; 4],
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name` with an explicit ordinal, replacing any earlier entry.
    pub fn add_entry(&mut self, name: &str, ty: impl Into<String>, kind: VarKind, index: u16) {
        let var = Variable {
            ty: ty.into(),
            kind,
            index,
        };
        let next = &mut self.next_index[kind.slot()];
        *next = (*next).max(index.saturating_add(1));
        self.entries.insert(name, var);
    }

    /// Records `name` with the next free ordinal of `kind` and returns it.
    ///
    /// Redefining a name with its current kind keeps its ordinal. A name that
    /// changes kind takes a fresh ordinal; the one it held is not reused.
    pub fn define(&mut self, name: &str, ty: impl Into<String>, kind: VarKind) -> u16 {
        let index = match self.entries.get(name) {
            Some(v) if v.kind == kind => v.index,
            _ => self.next_index[kind.slot()],
        };
        self.add_entry(name, ty, kind, index);
        index
    }

    /// Number of ordinals handed out for `kind`.
    pub fn var_count(&self, kind: VarKind) -> usize {
        usize::from(self.next_index[kind.slot()])
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.entries.get(name)
    }

    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.get(name).map(|v| v.ty.as_str())
    }

    pub fn kind_of(&self, name: &str) -> Option<VarKind> {
        self.get(name).map(|v| v.kind)
    }

    pub fn index_of(&self, name: &str) -> Option<u16> {
        self.get(name).map(|v| v.index)
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
