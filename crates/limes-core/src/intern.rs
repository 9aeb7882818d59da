//! Symbol name interning.
//!
//! Symbols are stored once per arena and referred to by a dense
//! [`SymbolId`]. Names never leave the table, so ids stay valid for the
//! lifetime of the arena.

use hashbrown::HashMap;

use crate::expr::SymbolId;

/// Bidirectional map between symbol names and ids.
#[derive(Debug, Default)]
pub struct InternTable {
    ids: HashMap<String, SymbolId>,
    names: Vec<String>,
}

impl InternTable {
    /// Returns the id for `name`, allocating one on first use.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct names are interned.
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = SymbolId::try_from(self.names.len()).expect("symbol table capacity exceeded");
        self.ids.insert(name.to_owned(), id);
        self.names.push(name.to_owned());
        id
    }

    /// Looks up the name of an interned symbol.
    #[must_use]
    pub fn name(&self, id: SymbolId) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// Looks up the id of a name without interning it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.ids.get(name).copied()
    }

    /// Number of interned names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
