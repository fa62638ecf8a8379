//! Taxonomic tree from a resolved store

use tracing::{info, instrument, warn};

use crate::application::ApplicationResult;
use crate::domain::{
    tax_tree, DomainError, LineageSource, LineageTable, ResolutionStore, TaxonomicDictionary,
    Taxonomy,
};

/// A Newick tree and the dictionary it was assembled from.
#[derive(Debug)]
pub struct TaxonomicTree {
    pub newick: String,
    pub dictionary: TaxonomicDictionary,
}

/// Builds taxonomic dictionaries and trees from resolved names.
#[derive(Debug, Clone)]
pub struct TreeService {
    taxonomy: Taxonomy,
    lineage: LineageSource,
}

impl TreeService {
    pub fn new(taxonomy: Taxonomy, lineage: LineageSource) -> Self {
        Self { taxonomy, lineage }
    }

    /// Dictionary over the resolved terms of `store`.
    ///
    /// Terms whose rank path cannot be placed in the taxonomy are left out.
    pub fn dictionary(&self, store: &ResolutionStore) -> ApplicationResult<TaxonomicDictionary> {
        let table = self.placeable(store.lineage_table(self.lineage));
        Ok(TaxonomicDictionary::new(
            &table.idents,
            &table.ranks,
            &table.lineages,
            self.taxonomy.clone(),
        )?)
    }

    fn placeable(&self, table: LineageTable) -> LineageTable {
        let mut kept = LineageTable::default();
        let rows = table
            .idents
            .into_iter()
            .zip(table.ranks)
            .zip(table.lineages);
        for ((ident, ranks), lineage) in rows {
            match self.check_row(&ident, &ranks, &lineage) {
                Ok(()) => {
                    kept.idents.push(ident);
                    kept.ranks.push(ranks);
                    kept.lineages.push(lineage);
                }
                Err(e) => warn!("leaving {} out of the tree: {}", ident, e),
            }
        }
        kept
    }

    fn check_row(
        &self,
        ident: &str,
        ranks: &[String],
        lineage: &[String],
    ) -> Result<(), DomainError> {
        if ranks.len() != lineage.len() {
            return Err(DomainError::MisalignedLineage {
                ident: ident.to_string(),
                ranks: ranks.len(),
                lineage: lineage.len(),
            });
        }
        let rank = ranks
            .iter()
            .rev()
            .find(|r| !r.is_empty())
            .ok_or_else(|| DomainError::MissingRanks(ident.to_string()))?;
        self.taxonomy.level(rank).map(|_| ())
    }

    #[instrument(level = "debug", skip_all)]
    pub fn build(&self, store: &ResolutionStore) -> ApplicationResult<TaxonomicTree> {
        let mut dictionary = self.dictionary(store)?;
        let newick = tax_tree(&mut dictionary)?;
        info!("tree over {} names", dictionary.len());
        Ok(TaxonomicTree { newick, dictionary })
    }
}
