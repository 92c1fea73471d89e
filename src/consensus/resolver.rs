use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use thiserror::Error;
use tracing::debug;

use crate::consensus::vote::{Agreement, PLACEHOLDER_ORDER};
use crate::core::feature::{FeatureRecord, GffRecord};
use crate::core::types::Tool;

#[derive(Error, Debug)]
pub enum ConsensusError {
    #[error("{tool} reports two different records at start {start}")]
    AmbiguousKey { tool: Tool, start: u64 },

    #[error("Malformed input at start {start}: {message}")]
    MalformedInput { start: u64, message: String },
}

/// One optional value per tool, indexed by [`Tool`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSlots<T>([Option<T>; 3]);

impl<T> ToolSlots<T> {
    pub fn new() -> Self {
        Self([None, None, None])
    }
}

impl<T> Default for ToolSlots<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Tool> for ToolSlots<T> {
    type Output = Option<T>;

    fn index(&self, tool: Tool) -> &Self::Output {
        &self.0[tool.index()]
    }
}

impl<T> IndexMut<Tool> for ToolSlots<T> {
    fn index_mut(&mut self, tool: Tool) -> &mut Self::Output {
        &mut self.0[tool.index()]
    }
}

/// The complete record sets of all three tools
#[derive(Debug, Clone, Default)]
pub struct ToolSets {
    sets: [Vec<FeatureRecord>; 3],
}

impl ToolSets {
    pub fn new(
        eggnog: Vec<FeatureRecord>,
        operon: Vec<FeatureRecord>,
        cd_search: Vec<FeatureRecord>,
    ) -> Self {
        Self {
            sets: [eggnog, operon, cd_search],
        }
    }

    pub fn get(&self, tool: Tool) -> &[FeatureRecord] {
        &self.sets[tool.index()]
    }

    pub fn set(&mut self, tool: Tool, records: Vec<FeatureRecord>) {
        self.sets[tool.index()] = records;
    }
}

/// Every tool's record at one start coordinate
#[derive(Debug, Clone)]
pub struct ConsensusEntry<'a> {
    pub start: u64,
    pub records: ToolSlots<&'a FeatureRecord>,
}

impl<'a> ConsensusEntry<'a> {
    pub fn new(start: u64) -> Self {
        Self {
            start,
            records: ToolSlots::new(),
        }
    }

    /// Labels in trust order; `None` when the tool has no record or no label here
    pub fn labels(&self) -> [Option<&'a str>; 3] {
        Tool::ALL.map(|tool| self.records[tool].and_then(FeatureRecord::label))
    }

    pub fn agreement(&self) -> Agreement {
        Agreement::classify(self.labels())
    }
}

/// Where a resolved feature came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Origin {
    Consensus { tool: Tool, agreement: Agreement },
    Reference,
}

/// The single record kept for one coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFeature {
    pub row: GffRecord,
    pub origin: Origin,
}

impl ResolvedFeature {
    pub fn start(&self) -> u64 {
        self.row.start
    }

    /// The tool whose record was kept, if the feature came out of consensus
    pub fn chosen_tool(&self) -> Option<Tool> {
        match self.origin {
            Origin::Consensus { tool, .. } => Some(tool),
            Origin::Reference => None,
        }
    }
}

/// Join the three record sets on start coordinate.
///
/// Keys are ordered by first appearance across eggNOG-mapper, Operon-mapper and
/// Batch CD-Search. A record repeated verbatim within one tool is collapsed.
///
/// # Errors
///
/// Returns `ConsensusError::AmbiguousKey` if one tool has two different records
/// at the same start, or `ConsensusError::MalformedInput` if a record is filed
/// under a tool other than the one that produced it.
pub fn build_entries(sets: &ToolSets) -> Result<IndexMap<u64, ConsensusEntry<'_>>, ConsensusError> {
    let mut entries: IndexMap<u64, ConsensusEntry<'_>> = IndexMap::new();

    for tool in Tool::ALL {
        for record in sets.get(tool) {
            let start = record.start();
            if record.tool != tool {
                return Err(ConsensusError::MalformedInput {
                    start,
                    message: format!("{} record found in {tool} set", record.tool),
                });
            }

            let entry = entries
                .entry(start)
                .or_insert_with(|| ConsensusEntry::new(start));

            let existing = entry.records[tool];
            match existing {
                Some(existing) if existing == record => {
                    debug!(%tool, start, "Collapsing duplicate record");
                }
                Some(_) => return Err(ConsensusError::AmbiguousKey { tool, start }),
                None => entry.records[tool] = Some(record),
            }
        }
    }

    Ok(entries)
}

/// Choose one record per start coordinate.
///
/// # Errors
///
/// Returns `ConsensusError::MalformedInput` if an entry holds no record at all.
pub fn resolve(
    entries: &IndexMap<u64, ConsensusEntry<'_>>,
) -> Result<Vec<ResolvedFeature>, ConsensusError> {
    let mut resolved = Vec::with_capacity(entries.len());

    for entry in entries.values() {
        let agreement = entry.agreement();
        let (tool, record) = select(entry, agreement)?;

        debug!(
            start = entry.start,
            %agreement,
            %tool,
            "Resolved feature"
        );

        resolved.push(ResolvedFeature {
            row: record.row.clone(),
            origin: Origin::Consensus { tool, agreement },
        });
    }

    Ok(resolved)
}

/// Build entries from the three sets and resolve them
///
/// # Errors
///
/// Propagates errors from [`build_entries`] and [`resolve`].
pub fn resolve_sets(sets: &ToolSets) -> Result<Vec<ResolvedFeature>, ConsensusError> {
    let entries = build_entries(sets)?;
    resolve(&entries)
}

fn select<'a>(
    entry: &ConsensusEntry<'a>,
    agreement: Agreement,
) -> Result<(Tool, &'a FeatureRecord), ConsensusError> {
    let winner = agreement.winner();
    if let Some(record) = entry.records[winner] {
        return Ok((winner, record));
    }

    // A labelled winner always has a record; only the unlabelled case can get here
    if agreement == Agreement::AllMissing {
        if let Some((tool, record)) = PLACEHOLDER_ORDER
            .into_iter()
            .find_map(|tool| entry.records[tool].map(|record| (tool, record)))
        {
            debug!(start = entry.start, %tool, "No Operon-mapper record, using fallback");
            return Ok((tool, record));
        }
    }

    Err(ConsensusError::MalformedInput {
        start: entry.start,
        message: format!("no record from {winner} to represent {agreement}"),
    })
}
