use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::tract::sort_tracts;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum InterestType {
    #[schemars(
        description = "Mineral interest: the landowner's royalty position. Row value is the owner's decimal interest, burdened by the lease royalty rate and any non-participating royalty carved out of it."
    )]
    Mi,

    #[schemars(
        description = "Non-participating royalty interest: a royalty carved out of a mineral owner's share, entitled to revenue but not to lease or bonus participation."
    )]
    Npri,

    #[schemars(
        description = "Overriding royalty interest: a royalty carved out of the working interest, expiring with the underlying lease."
    )]
    Ori,

    #[schemars(
        description = "Working interest: the cost-bearing operator share. Net revenue is what remains after landowner royalty and overriding royalty burdens."
    )]
    Wi,
}

impl InterestType {
    /// All interest types in report order.
    pub const ALL: [InterestType; 4] = [
        InterestType::Mi,
        InterestType::Npri,
        InterestType::Ori,
        InterestType::Wi,
    ];

    /// The type code as it appears in the TYPE column of source data.
    pub fn code(&self) -> &'static str {
        match self {
            InterestType::Mi => "MI",
            InterestType::Npri => "NPRI",
            InterestType::Ori => "ORI",
            InterestType::Wi => "WI",
        }
    }

    /// Sheet name used for this category in generated reports. The MI
    /// category reports under "LORI" because its sheet presents the
    /// landowner royalty chain.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            InterestType::Mi => "LORI",
            InterestType::Npri => "NPRI",
            InterestType::Ori => "ORI",
            InterestType::Wi => "WI",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            InterestType::Mi => "Landowner Royalty Interests",
            InterestType::Npri => "Non-Participating Royalty Interests",
            InterestType::Ori => "Overriding Royalty Interests",
            InterestType::Wi => "Working Interests",
        }
    }

    /// Parses a TYPE cell. Codes are matched exactly after trimming, so
    /// unrecognized or differently-cased values are rejected rather than
    /// guessed at.
    pub fn from_code(code: &str) -> Option<InterestType> {
        match code.trim() {
            "MI" => Some(InterestType::Mi),
            "NPRI" => Some(InterestType::Npri),
            "ORI" => Some(InterestType::Ori),
            "WI" => Some(InterestType::Wi),
            _ => None,
        }
    }
}

impl Default for InterestType {
    fn default() -> Self {
        Self::Mi
    }
}

/// One ownership row from the combined data source.
///
/// Numeric fields are already coerced (missing or unparseable cells read as
/// 0). The `Option<f64>` fields track whether their source column existed at
/// all: `None` means the column was absent and the category formula falls
/// back to another field, which is different from a present-but-empty cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct OwnershipRecord {
    #[schemars(description = "Owner name exactly as given in source data")]
    pub owner: String,

    #[schemars(description = "Interest category this row belongs to")]
    pub interest_type: InterestType,

    #[schemars(
        description = "Canonical tract key (normalized so '1.0' and '1' refer to the same tract)"
    )]
    pub tract: String,

    #[serde(default)]
    #[schemars(description = "Lease number label, empty when the row has no lease")]
    pub lease_no: String,

    #[serde(default)]
    #[schemars(description = "Requirement/curative label from the REQ column")]
    pub requirement: String,

    #[serde(default)]
    #[schemars(
        description = "Decimal ownership interest in the tract. Base value for MI and WI rows, and the fallback for NPRI/ORI/WI (TRACT) when those columns are absent."
    )]
    pub decimal_interest: f64,

    #[serde(default)]
    #[schemars(description = "Royalty rate reserved under the lease (MI rows)")]
    pub lease_royalty: f64,

    #[serde(default)]
    #[schemars(description = "Non-participating royalty burden subtracted from an MI row's revenue interest")]
    pub npri_burdens: f64,

    #[serde(default)]
    #[schemars(
        description = "NPRI interest fraction. None when the source had no NPRI column, in which case decimal_interest is used."
    )]
    pub npri_interest: Option<f64>,

    #[serde(default)]
    #[schemars(description = "Fraction of the mineral interest burdened by this royalty (NPRI and ORI rows)")]
    pub interest_burdened: f64,

    #[serde(default)]
    #[schemars(description = "This owner's share of the carved-out NPRI")]
    pub share_of_npri: f64,

    #[serde(default)]
    #[schemars(
        description = "ORI interest fraction. None when the source had no ORI column, in which case decimal_interest is used."
    )]
    pub ori_interest: Option<f64>,

    #[serde(default)]
    #[schemars(description = "This owner's share of the overriding royalty")]
    pub share_of_ori: f64,

    #[serde(default)]
    #[schemars(description = "Overriding royalty burdens carried by a WI row")]
    pub ori_burdens: f64,

    #[serde(default)]
    #[schemars(
        description = "Working interest share in the tract. None when the source had no WI (TRACT) column, in which case decimal_interest is used."
    )]
    pub wi_tract: Option<f64>,

    #[serde(default)]
    #[schemars(
        description = "Net revenue interest for this row in this tract, as carried in the source data"
    )]
    pub tract_nri: f64,

    #[serde(default)]
    #[schemars(description = "Net acres attributed to this row (MI and WI rows)")]
    pub net_acres: f64,

    #[serde(default)]
    #[schemars(description = "Acres burdened by an overriding royalty (ORI rows)")]
    pub acres_burdened: f64,

    #[serde(default)]
    #[schemars(description = "Names of the working interest owners burdened by this row")]
    pub burdened_owners: String,

    #[serde(default)]
    #[schemars(description = "Legal description of the tract, when carried on the row")]
    pub legal_description: String,

    #[serde(default)]
    #[schemars(
        description = "Gross acres of the whole tract. None when the source had no Tract Gross Acres column, in which case net_acres is used."
    )]
    pub tract_gross_acres: Option<f64>,
}

impl OwnershipRecord {
    /// NPRI interest with the absent-column fallback applied.
    pub fn npri_value(&self) -> f64 {
        self.npri_interest.unwrap_or(self.decimal_interest)
    }

    /// ORI interest with the absent-column fallback applied.
    pub fn ori_value(&self) -> f64 {
        self.ori_interest.unwrap_or(self.decimal_interest)
    }

    /// WI (TRACT) share with the absent-column fallback applied.
    pub fn wi_tract_value(&self) -> f64 {
        self.wi_tract.unwrap_or(self.decimal_interest)
    }

    /// Gross acres with the absent-column fallback applied.
    pub fn gross_acres_value(&self) -> f64 {
        self.tract_gross_acres.unwrap_or(self.net_acres)
    }

    /// True when the owner is a "no owner" placeholder marker rather than a
    /// real party. Placeholder rows are excluded from every report sheet and
    /// every total.
    pub fn is_placeholder(&self) -> bool {
        crate::utils::is_placeholder_owner(&self.owner)
    }
}

/// Descriptive facts about a tract, taken from the first record seen for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TractInfo {
    pub legal_description: String,
    pub gross_acres: f64,
}

/// Row counts recorded while loading ownership data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LoadStats {
    #[schemars(description = "Data rows scanned in the selected source table")]
    pub rows_scanned: usize,

    #[schemars(description = "Rows that became ownership records")]
    pub records_loaded: usize,

    #[schemars(description = "Rows dropped because their tract cell was empty after normalization")]
    pub dropped_empty_tract: usize,

    #[schemars(description = "Rows dropped because their TYPE cell matched no interest category")]
    pub dropped_unknown_type: usize,
}

/// Headline counts for a loaded dataset.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub unique_tracts: usize,
    pub unique_owners: usize,

    #[schemars(description = "Record count per interest type code")]
    pub records_by_type: BTreeMap<String, usize>,
}

/// A loaded ownership dataset plus its load statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct OwnershipDataset {
    pub records: Vec<OwnershipRecord>,

    #[serde(default)]
    pub stats: LoadStats,
}

impl OwnershipDataset {
    pub fn new(records: Vec<OwnershipRecord>) -> Self {
        let stats = LoadStats {
            rows_scanned: records.len(),
            records_loaded: records.len(),
            ..LoadStats::default()
        };
        OwnershipDataset { records, stats }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Unique tract keys in first-appearance order.
    pub fn unique_tracts(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.tract) {
                seen.push(record.tract.clone());
            }
        }
        seen
    }

    /// Unique tract keys in report order.
    pub fn sorted_tracts(&self) -> Vec<String> {
        let mut tracts = self.unique_tracts();
        sort_tracts(&mut tracts);
        tracts
    }

    /// Records of one interest category, placeholder owners excluded.
    pub fn category_records(&self, interest_type: InterestType) -> Vec<&OwnershipRecord> {
        self.records
            .iter()
            .filter(|r| r.interest_type == interest_type && !r.is_placeholder())
            .collect()
    }

    /// Per-tract descriptive info, taken from the first record seen for each
    /// tract regardless of category.
    pub fn tract_info(&self) -> BTreeMap<String, TractInfo> {
        let mut info: BTreeMap<String, TractInfo> = BTreeMap::new();
        for record in &self.records {
            info.entry(record.tract.clone()).or_insert_with(|| TractInfo {
                legal_description: record.legal_description.clone(),
                gross_acres: record.gross_acres_value(),
            });
        }
        info
    }

    /// A copy holding only records whose tract appears in `allocations`.
    /// Unit-based reporting covers participating tracts only.
    pub fn restricted_to(&self, allocations: &AllocationTable) -> OwnershipDataset {
        let records: Vec<OwnershipRecord> = self
            .records
            .iter()
            .filter(|r| allocations.contains(&r.tract))
            .cloned()
            .collect();
        let stats = LoadStats {
            rows_scanned: self.stats.rows_scanned,
            records_loaded: records.len(),
            ..self.stats.clone()
        };
        OwnershipDataset { records, stats }
    }

    pub fn summary(&self) -> DatasetSummary {
        let mut owners = Vec::new();
        let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
        for record in &self.records {
            if !owners.contains(&record.owner) {
                owners.push(record.owner.clone());
            }
            *by_type.entry(record.interest_type.code().to_string()).or_insert(0) += 1;
        }
        DatasetSummary {
            total_records: self.records.len(),
            unique_tracts: self.unique_tracts().len(),
            unique_owners: owners.len(),
            records_by_type: by_type,
        }
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(OwnershipDataset)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// One tract's row in the unit allocation table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TractAllocation {
    #[schemars(description = "Canonical tract key")]
    pub tract: String,

    #[schemars(description = "Legal description as given in the schedule")]
    pub legal_description: String,

    #[schemars(description = "Acres the tract contributes to the unit")]
    pub acres: f64,

    #[schemars(
        description = "Fraction of unit production allocated to this tract. Allocations across the unit are expected to sum to 1.0."
    )]
    pub allocation: f64,
}

/// Tract allocation factors for a unit, in schedule order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AllocationTable {
    pub entries: Vec<TractAllocation>,
}

impl AllocationTable {
    pub fn new(entries: Vec<TractAllocation>) -> Self {
        AllocationTable { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, tract: &str) -> bool {
        self.entries.iter().any(|e| e.tract == tract)
    }

    pub fn get(&self, tract: &str) -> Option<&TractAllocation> {
        self.entries.iter().find(|e| e.tract == tract)
    }

    /// Allocation factor for a tract, 0 when the tract is not in the unit.
    pub fn allocation_for(&self, tract: &str) -> f64 {
        self.get(tract).map(|e| e.allocation).unwrap_or(0.0)
    }

    /// Tract keys in report order.
    pub fn sorted_tracts(&self) -> Vec<String> {
        let mut tracts: Vec<String> = self.entries.iter().map(|e| e.tract.clone()).collect();
        sort_tracts(&mut tracts);
        tracts
    }

    /// Sum of allocation factors across the unit.
    pub fn total_allocation(&self) -> f64 {
        self.entries.iter().map(|e| e.allocation).sum()
    }
}
