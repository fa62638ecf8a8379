//! Newick serialisation of a taxonomic dictionary

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, instrument, trace};

use crate::domain::arena::TaxRef;
use crate::domain::dictionary::TaxonomicDictionary;
use crate::domain::error::DomainError;

/// Name of the clade joining whatever is left after the most general rank.
pub const ROOT_CLADE: &str = "life";

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s").unwrap_or_else(|_| unreachable!()))
}

/// Newick identifiers cannot carry whitespace.
pub fn newick_safe(text: &str) -> String {
    whitespace().replace_all(text, "_").into_owned()
}

/// Format `(ident:d,...)name` where `d` is `at` minus each member's level.
pub fn string_clade<'a, I>(members: I, name: &str, at: usize) -> String
where
    I: IntoIterator<Item = &'a TaxRef>,
{
    let inner: Vec<String> = members
        .into_iter()
        .map(|node| {
            let distance = at as f64 - node.level() as f64;
            format!("{}:{:.1}", newick_safe(node.ident()), distance)
        })
        .collect();
    format!("({}){}", inner.join(","), newick_safe(name))
}

/// Collapse the dictionary's hierarchy into a Newick tree string.
///
/// Rewrites the arena cells in place; the dictionary is left in its
/// post-assembly state.
#[instrument(level = "debug", skip_all, fields(idents = dict.len()))]
pub fn tax_tree(dict: &mut TaxonomicDictionary) -> Result<String, DomainError> {
    let (taxonomy, hierarchy, arena) = dict.assembly_parts();

    for (level, (rank, clades)) in taxonomy.ranks().iter().zip(hierarchy).enumerate() {
        for clade in clades {
            let live = arena.live(&clade.members);
            if live.len() < 2 {
                continue;
            }
            let name = format!("{}_{}", clade.label, rank);
            let clade_string = string_clade(live.iter().filter_map(|&id| arena.get(id)), &name, level);
            trace!("{}: {}", rank, clade_string);

            if let Some(first) = arena.get_mut(live[0]) {
                first.change(clade_string, rank.as_str(), level);
            }
            for &id in &live[1..] {
                if let Some(node) = arena.get_mut(id) {
                    node.retire(rank.as_str(), level);
                }
            }
        }
    }

    let remaining: Vec<_> = hierarchy
        .last()
        .map(|clades| {
            let ids: Vec<_> = clades.iter().flat_map(|c| c.members.iter().copied()).collect();
            arena.live(&ids)
        })
        .unwrap_or_default();
    debug!("{} live nodes after the most general rank", remaining.len());

    let tree = match remaining.as_slice() {
        [] => return Err(DomainError::EmptyTree),
        [only] => arena
            .get(*only)
            .map(|node| newick_safe(node.ident()))
            .ok_or(DomainError::EmptyTree)?,
        many => string_clade(
            many.iter().filter_map(|&id| arena.get(id)),
            ROOT_CLADE,
            taxonomy.len(),
        ),
    };
    Ok(format!("{tree};"))
}
