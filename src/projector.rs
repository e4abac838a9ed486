//! Readout projection and node inhibition mapping.
//!
//! Both are pure functions of the simulation state and the static tables;
//! they are recomputed in full on every state change.

use serde::{Deserialize, Serialize};

use crate::drug::ActiveDrug;
use crate::effects::DrugEffectTable;
use crate::explanation::{ExplanationCatalog, ExplanationSet};
use crate::node::NodeId;
use crate::readout::{ReadoutKey, ReadoutState, StatusClass};
use crate::state::{CascadePhase, SimulationState};

/// Status shown while the cascade is idle.
#[must_use]
pub const fn idle_status(key: ReadoutKey) -> StatusClass {
    match key {
        ReadoutKey::CvTone => StatusClass::Balanced,
        _ => StatusClass::Normal,
    }
}

/// Status shown while the cascade is triggered and untreated.
#[must_use]
pub const fn triggered_status(key: ReadoutKey) -> StatusClass {
    match key {
        ReadoutKey::InflammationVasc
        | ReadoutKey::InflammationLeuk
        | ReadoutKey::Cns
        | ReadoutKey::Uterus => StatusClass::Increased,
        ReadoutKey::Resolution => StatusClass::Suppressed,
        ReadoutKey::Platelets | ReadoutKey::Stomach | ReadoutKey::Kidney => StatusClass::Normal,
        ReadoutKey::Bronchi => StatusClass::Constricted,
        ReadoutKey::CvTone => StatusClass::Mixed,
    }
}

/// One projected readout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedReadout {
    /// Readout key.
    pub key: ReadoutKey,
    /// Value to display.
    #[serde(flatten)]
    pub state: ReadoutState,
}

/// A value for every readout, in [`ReadoutKey::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReadoutProjection {
    readouts: Vec<ProjectedReadout>,
}

impl ReadoutProjection {
    /// Value for `key`.
    #[must_use]
    pub fn get(&self, key: ReadoutKey) -> &ReadoutState {
        &self.readouts[key.index()].state
    }

    /// All readouts in panel order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectedReadout> {
        self.readouts.iter()
    }
}

/// Computes the value of every readout.
///
/// # Examples
///
/// ```
/// use aacascade::{project, DrugEffectTable, ExplanationCatalog, ReadoutKey, SimulationState, StatusClass};
///
/// let table = DrugEffectTable::builtin();
/// let catalog = ExplanationCatalog::builtin();
/// let readouts = project(&SimulationState::initial(), &table, &catalog);
/// assert_eq!(readouts.get(ReadoutKey::CvTone).status, StatusClass::Balanced);
/// ```
#[must_use]
pub fn project(
    state: &SimulationState,
    table: &DrugEffectTable,
    catalog: &ExplanationCatalog,
) -> ReadoutProjection {
    let drug = match (state.phase(), state.active_drug()) {
        (CascadePhase::Idle, _) => None,
        (CascadePhase::Triggered, ActiveDrug::Applied(drug)) => Some(table.spec(drug)),
        (CascadePhase::Triggered, ActiveDrug::None | ActiveDrug::Untreated) => None,
    };
    let readouts = ReadoutKey::ALL
        .into_iter()
        .map(|key| {
            let value = match state.phase() {
                CascadePhase::Idle => ReadoutState::with_default_text(
                    idle_status(key),
                    catalog.get(ExplanationSet::Baseline, key),
                ),
                CascadePhase::Triggered => drug
                    .and_then(|spec| spec.override_for(key))
                    .cloned()
                    .unwrap_or_else(|| {
                        ReadoutState::with_default_text(
                            triggered_status(key),
                            catalog.get(ExplanationSet::Triggered, key),
                        )
                    }),
            };
            ProjectedReadout { key, state: value }
        })
        .collect();
    ReadoutProjection { readouts }
}

/// Visual state of one diagram node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeVisual {
    /// Node.
    pub node: NodeId,
    /// True if drawn as inhibited.
    pub inhibited: bool,
}

/// Maps every node in the universe to its visual state.
#[must_use]
pub fn node_visuals(state: &SimulationState) -> Vec<NodeVisual> {
    NodeId::ALL
        .into_iter()
        .map(|node| NodeVisual {
            node,
            inhibited: state.is_inhibited(node),
        })
        .collect()
}
