use crate::schema::{InterestType, OwnershipDataset};
use log::debug;
use std::collections::BTreeMap;

/// Per-tract royalty rates, keyed by lease number, with a default rate.
///
/// Built from every MI row in the dataset, placeholder owners included; the
/// placeholder exclusion rule governs report rows and totals, not the burden
/// a lease actually carries. The default is the rate on the first MI row
/// seen for the tract and is set exactly once.
#[derive(Debug, Clone, Default)]
pub struct RoyaltyBurdens {
    by_tract: BTreeMap<String, TractBurdens>,
}

#[derive(Debug, Clone)]
struct TractBurdens {
    default: f64,
    by_lease: BTreeMap<String, f64>,
}

impl RoyaltyBurdens {
    pub fn from_dataset(dataset: &OwnershipDataset) -> Self {
        let mut by_tract: BTreeMap<String, TractBurdens> = BTreeMap::new();

        for record in dataset
            .records
            .iter()
            .filter(|r| r.interest_type == InterestType::Mi)
        {
            let entry = by_tract
                .entry(record.tract.clone())
                .or_insert_with(|| TractBurdens {
                    default: record.lease_royalty,
                    by_lease: BTreeMap::new(),
                });
            if !record.lease_no.is_empty() {
                // Repeated lease numbers keep the last-seen rate.
                entry.by_lease.insert(record.lease_no.clone(), record.lease_royalty);
            }
        }

        debug!("Built royalty burden lookup covering {} tracts", by_tract.len());
        RoyaltyBurdens { by_tract }
    }

    /// Royalty rate for (tract, lease). Falls back to the tract's default
    /// rate when the lease has no entry, and to 0 when the tract has no MI
    /// rows at all.
    pub fn resolve(&self, tract: &str, lease: &str) -> f64 {
        match self.by_tract.get(tract) {
            Some(burdens) => burdens
                .by_lease
                .get(lease)
                .copied()
                .unwrap_or(burdens.default),
            None => 0.0,
        }
    }

    pub fn covered_tracts(&self) -> usize {
        self.by_tract.len()
    }
}
