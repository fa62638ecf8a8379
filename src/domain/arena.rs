use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

/// Handle to a node cell in the [`TaxArena`].
pub type NodeId = Index;

/// Mutable reference cell for a taxonomic identity.
///
/// During tree assembly the cell of the first clade member is rewritten to carry
/// the clade string; the other members are marked spent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxRef {
    ident: String,
    rank: String,
    /// Position of `rank` in the taxonomy
    level: usize,
    /// Number of rewrites, diagnostics only
    counter: u32,
    spent: bool,
}

impl TaxRef {
    pub fn new(ident: impl Into<String>, rank: impl Into<String>, level: usize) -> Self {
        Self {
            ident: ident.into(),
            rank: rank.into(),
            level,
            counter: 0,
            spent: false,
        }
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn rank(&self) -> &str {
        &self.rank
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn is_spent(&self) -> bool {
        self.spent
    }

    /// Still takes part in tree assembly.
    pub fn is_live(&self) -> bool {
        !self.spent && !self.ident.is_empty()
    }

    /// Rewrite identity and position.
    pub fn change(&mut self, ident: impl Into<String>, rank: impl Into<String>, level: usize) {
        self.ident = ident.into();
        self.rank = rank.into();
        self.level = level;
        self.counter += 1;
    }

    /// Fold this cell into a sibling's clade: blank it and move it to `rank`.
    pub fn retire(&mut self, rank: impl Into<String>, level: usize) {
        self.change(String::new(), rank, level);
        self.spent = true;
    }
}

impl fmt::Display for TaxRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}@{}", self.ident, self.rank, self.level)
    }
}

/// Arena owning every [`TaxRef`] of a taxonomic dictionary.
///
/// Hierarchy groups refer to cells by [`NodeId`], so rewriting a cell is visible
/// from every group it belongs to.
#[derive(Debug, Default)]
pub struct TaxArena {
    arena: Arena<TaxRef>,
}

impl TaxArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, node: TaxRef) -> NodeId {
        self.arena.insert(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&TaxRef> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut TaxRef> {
        self.arena.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Ids among `ids` whose cells are still live, in the given order.
    pub fn live(&self, ids: &[NodeId]) -> Vec<NodeId> {
        ids.iter()
            .copied()
            .filter(|&id| self.get(id).is_some_and(TaxRef::is_live))
            .collect()
    }
}
