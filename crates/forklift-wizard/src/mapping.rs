//! Network and storage mapping reconciliation.
//!
//! Mappings are label pairs. They are recomputed whenever the sources used by
//! the selected VMs, the available targets, or the target namespace change.
//! User edits survive as long as they stay valid; mappings that stop being
//! valid are dropped and their sources reported as unmapped, never silently
//! re-defaulted.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One source label mapped to one destination label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Mapping {
    pub source: String,
    pub destination: String,
}

impl Mapping {
    pub fn new(source: &str, destination: &str) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
        }
    }
}

/// A source offered in the mapping editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MappingSource {
    pub label: String,
    pub used_by_selected_vms: bool,
    pub is_mapped: bool,
}

/// Whether defaults have been generated yet.
///
/// `Tracked(vec![])` (every mapping invalidated) is different from
/// `NotGenerated`: only the latter may be filled with defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "mappings", rename_all = "camelCase")]
pub enum MappingState {
    #[default]
    NotGenerated,
    Tracked(Vec<Mapping>),
}

impl MappingState {
    pub fn mappings(&self) -> &[Mapping] {
        match self {
            Self::NotGenerated => &[],
            Self::Tracked(mappings) => mappings,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Tracked(_))
    }
}

/// Everything the calculator looks at besides the current mappings.
#[derive(Debug, Clone, Copy)]
pub struct MappingInputs<'a> {
    /// Source labels used by the selected VMs, deduplicated.
    pub used_sources: &'a [String],
    /// Destination labels currently available.
    pub targets: &'a [String],
    /// Destination for generated mappings; `None` defers generation.
    pub default_destination: Option<&'a str>,
    /// A destination that is valid even when absent from `targets`.
    pub always_valid: Option<&'a str>,
}

impl MappingInputs<'_> {
    fn is_valid_destination(&self, destination: &str) -> bool {
        self.always_valid == Some(destination) || self.targets.iter().any(|t| t == destination)
    }

    fn is_used(&self, source: &str) -> bool {
        self.used_sources.iter().any(|s| s == source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    /// Sorted, deduplicated destination labels.
    pub target_labels: Vec<String>,
    /// Used sources with no mapping.
    pub unmapped_sources: Vec<String>,
    pub mappings: MappingState,
}

pub fn calculate(current: &MappingState, inputs: &MappingInputs) -> Calculation {
    let mut target_labels = inputs.targets.to_vec();
    target_labels.sort();
    target_labels.dedup();

    match current {
        MappingState::NotGenerated => match inputs.default_destination {
            Some(destination) if !inputs.used_sources.is_empty() => Calculation {
                target_labels,
                unmapped_sources: Vec::new(),
                mappings: MappingState::Tracked(
                    inputs
                        .used_sources
                        .iter()
                        .map(|source| Mapping::new(source, destination))
                        .collect(),
                ),
            },
            _ => Calculation {
                target_labels,
                unmapped_sources: inputs.used_sources.to_vec(),
                mappings: MappingState::NotGenerated,
            },
        },
        MappingState::Tracked(mappings) => {
            let mut valid: Vec<Mapping> = Vec::with_capacity(mappings.len());
            for mapping in mappings {
                if inputs.is_used(&mapping.source)
                    && inputs.is_valid_destination(&mapping.destination)
                    && !valid.iter().any(|m| m.source == mapping.source)
                {
                    valid.push(mapping.clone());
                }
            }

            if valid.len() != mappings.len() {
                tracing::debug!(
                    kept = valid.len(),
                    dropped = mappings.len() - valid.len(),
                    "dropping mappings invalidated by upstream change"
                );
            }

            let unmapped_sources = inputs
                .used_sources
                .iter()
                .filter(|source| !valid.iter().any(|m| &m.source == *source))
                .cloned()
                .collect();

            Calculation {
                target_labels,
                unmapped_sources,
                mappings: MappingState::Tracked(valid),
            }
        }
    }
}

/// Build the editor's source list: every known source label plus any used
/// label the inventory does not list.
pub fn mapping_sources(
    known_labels: &[String],
    used_sources: &[String],
    mappings: &[Mapping],
) -> Vec<MappingSource> {
    let mut labels: Vec<&String> = known_labels.iter().collect();
    for used in used_sources {
        if !labels.contains(&used) {
            labels.push(used);
        }
    }

    labels
        .into_iter()
        .map(|label| MappingSource {
            label: label.clone(),
            used_by_selected_vms: used_sources.contains(label),
            is_mapped: mappings.iter().any(|m| &m.source == label),
        })
        .collect()
}

/// Map the first unmapped source used by the VMs to the first target.
///
/// Returns `None` when there is nothing to add.
pub fn add_mapping(
    sources: &[MappingSource],
    targets: &[String],
    mappings: &[Mapping],
) -> Option<Vec<Mapping>> {
    let next_source = sources
        .iter()
        .find(|s| s.used_by_selected_vms && !s.is_mapped)?;
    let next_destination = targets.first()?;

    let mut updated = mappings.to_vec();
    updated.push(Mapping::new(&next_source.label, next_destination));
    Some(updated)
}

/// Remove the mapping for `source`. `None` if it is not mapped.
pub fn delete_mapping(mappings: &[Mapping], source: &str) -> Option<Vec<Mapping>> {
    if !mappings.iter().any(|m| m.source == source) {
        return None;
    }
    Some(
        mappings
            .iter()
            .filter(|m| m.source != source)
            .cloned()
            .collect(),
    )
}

/// Replace `current` with `next` in place.
///
/// `None` when `current` is not mapped, `next` names a source the VMs do not
/// use or an unavailable destination, `next.source` is already mapped
/// elsewhere, or nothing changes.
pub fn replace_mapping(
    sources: &[MappingSource],
    inputs: &MappingInputs,
    mappings: &[Mapping],
    current: &Mapping,
    next: &Mapping,
) -> Option<Vec<Mapping>> {
    let index = mappings.iter().position(|m| m.source == current.source)?;
    if !sources
        .iter()
        .any(|s| s.label == next.source && s.used_by_selected_vms)
    {
        return None;
    }
    if !inputs.is_valid_destination(&next.destination) {
        return None;
    }

    let source_changed = current.source != next.source;
    let destination_changed = mappings[index].destination != next.destination;
    if !source_changed && !destination_changed {
        return None;
    }
    if source_changed && mappings.iter().any(|m| m.source == next.source) {
        return None;
    }

    let mut updated = mappings.to_vec();
    updated[index] = next.clone();
    Some(updated)
}
