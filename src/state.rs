//! Cascade state machine.
//!
//! The machine is the only mutator of [`SimulationState`]. Every transition
//! builds the next state in full and swaps it in with a single assignment,
//! so a reader never observes the drug slot and the inhibition set out of
//! step with each other.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::drug::{ActiveDrug, DrugId};
use crate::effects::DrugEffectTable;
use crate::error::PreconditionError;
use crate::node::NodeId;

/// Phase of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadePhase {
    /// No stimulus applied. Initial phase.
    #[default]
    Idle,
    /// Stimulus applied; persists until reset.
    Triggered,
}

/// The owned, mutable simulation aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimulationState {
    phase: CascadePhase,
    active_drug: ActiveDrug,
    inhibited_nodes: BTreeSet<NodeId>,
}

impl SimulationState {
    /// The state at process start and after every reset.
    #[must_use]
    pub fn initial() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> CascadePhase {
        self.phase
    }

    /// Current drug slot.
    #[must_use]
    pub const fn active_drug(&self) -> ActiveDrug {
        self.active_drug
    }

    /// Nodes currently drawn as inhibited.
    #[must_use]
    pub const fn inhibited_nodes(&self) -> &BTreeSet<NodeId> {
        &self.inhibited_nodes
    }

    /// Returns true if `node` is inhibited.
    #[must_use]
    pub fn is_inhibited(&self, node: NodeId) -> bool {
        self.inhibited_nodes.contains(&node)
    }

    /// Returns true if the cascade has been triggered.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.phase == CascadePhase::Triggered
    }
}

/// What a machine operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transition {
    /// Idle to triggered.
    Triggered,
    /// Trigger while already triggered; nothing changed.
    AlreadyTriggered,
    /// A drug replaced whatever was active before.
    DrugApplied {
        /// Drug now active.
        drug: DrugId,
        /// Drug slot before the change.
        previous: ActiveDrug,
    },
    /// Returned to the initial state.
    Reset {
        /// Phase before the reset.
        from: CascadePhase,
    },
}

impl Transition {
    /// Returns true if the state may have changed.
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(self, Self::AlreadyTriggered)
    }
}

/// Owns the simulation state and the effect table it applies.
#[derive(Debug, Clone)]
pub struct CascadeMachine {
    state: SimulationState,
    table: DrugEffectTable,
}

impl Default for CascadeMachine {
    fn default() -> Self {
        Self::new(DrugEffectTable::builtin())
    }
}

impl CascadeMachine {
    /// Creates a machine in the initial state.
    #[must_use]
    pub fn new(table: DrugEffectTable) -> Self {
        Self {
            state: SimulationState::initial(),
            table,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Effect table in use.
    #[must_use]
    pub const fn table(&self) -> &DrugEffectTable {
        &self.table
    }

    /// Applies the stimulus.
    ///
    /// Idempotent: a second call while triggered changes nothing and
    /// reports [`Transition::AlreadyTriggered`].
    pub fn trigger(&mut self) -> Transition {
        if self.state.is_triggered() {
            tracing::debug!("trigger ignored: cascade already triggered");
            return Transition::AlreadyTriggered;
        }
        self.state = SimulationState {
            phase: CascadePhase::Triggered,
            active_drug: ActiveDrug::Untreated,
            inhibited_nodes: BTreeSet::new(),
        };
        tracing::debug!("cascade triggered");
        Transition::Triggered
    }

    /// Applies `drug`, fully replacing any previous drug and its inhibitions.
    ///
    /// # Errors
    ///
    /// Returns `PreconditionError::NotTriggered` if the cascade is idle; the
    /// state is left unchanged.
    pub fn apply_drug(&mut self, drug: DrugId) -> Result<Transition, PreconditionError> {
        if !self.state.is_triggered() {
            tracing::warn!(%drug, "drug rejected: cascade not triggered");
            return Err(PreconditionError::NotTriggered);
        }
        let previous = self.state.active_drug;
        self.state = SimulationState {
            phase: CascadePhase::Triggered,
            active_drug: ActiveDrug::Applied(drug),
            inhibited_nodes: self.table.spec(drug).inhibition_set(),
        };
        tracing::info!(
            %drug,
            %previous,
            inhibited = self.state.inhibited_nodes.len(),
            "drug applied"
        );
        Ok(Transition::DrugApplied { drug, previous })
    }

    /// Returns to the initial state. Always succeeds.
    pub fn reset(&mut self) -> Transition {
        let from = self.state.phase;
        self.state = SimulationState::initial();
        tracing::info!(?from, "simulation reset");
        Transition::Reset { from }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let machine = CascadeMachine::default();
        let state = machine.state();
        assert_eq!(state.phase(), CascadePhase::Idle);
        assert_eq!(state.active_drug(), ActiveDrug::None);
        assert!(state.inhibited_nodes().is_empty());
    }

    #[test]
    fn test_trigger_is_idempotent() {
        let mut machine = CascadeMachine::default();
        assert_eq!(machine.trigger(), Transition::Triggered);
        let once = machine.state().clone();
        assert_eq!(machine.trigger(), Transition::AlreadyTriggered);
        assert_eq!(machine.state(), &once);
        assert_eq!(once.active_drug(), ActiveDrug::Untreated);
    }

    #[test]
    fn test_apply_drug_requires_trigger() {
        let mut machine = CascadeMachine::default();
        let before = machine.state().clone();
        let err = machine.apply_drug(DrugId::Nsaid).unwrap_err();
        assert_eq!(err, PreconditionError::NotTriggered);
        assert_eq!(machine.state(), &before);
    }

    #[test]
    fn test_apply_drug_sets_inhibitions() {
        let mut machine = CascadeMachine::default();
        machine.trigger();
        let t = machine.apply_drug(DrugId::Loxi).unwrap();
        assert_eq!(
            t,
            Transition::DrugApplied {
                drug: DrugId::Loxi,
                previous: ActiveDrug::Untreated
            }
        );
        assert!(machine.state().is_inhibited(NodeId::Lox5));
        assert!(!machine.state().is_inhibited(NodeId::Cox1));
    }

    #[test]
    fn test_second_drug_replaces_first() {
        let mut machine = CascadeMachine::default();
        machine.trigger();
        machine.apply_drug(DrugId::Aspirin).unwrap();
        machine.apply_drug(DrugId::Csteroid).unwrap();
        let expected = machine.table().spec(DrugId::Csteroid).inhibition_set();
        assert_eq!(machine.state().inhibited_nodes(), &expected);
        assert!(!machine.state().is_inhibited(NodeId::Cox1));
        assert_eq!(machine.state().active_drug(), ActiveDrug::Applied(DrugId::Csteroid));
    }

    #[test]
    fn test_reset_from_any_phase() {
        let mut machine = CascadeMachine::default();
        assert_eq!(machine.reset(), Transition::Reset { from: CascadePhase::Idle });

        machine.trigger();
        machine.apply_drug(DrugId::Ccb).unwrap();
        assert_eq!(machine.reset(), Transition::Reset { from: CascadePhase::Triggered });
        assert_eq!(machine.state(), &SimulationState::initial());
    }

    #[test]
    fn test_transition_changed() {
        assert!(Transition::Triggered.changed());
        assert!(!Transition::AlreadyTriggered.changed());
    }
}
