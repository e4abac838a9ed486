//! A running cascade session.
//!
//! [`CascadeSession`] is the inbound half of the renderer boundary. It owns
//! the state machine, the interaction coordinator and the renderer, turns
//! host events into state changes, and repaints everything after each one.

use serde::Serialize;

use crate::config::SessionConfig;
use crate::drug::DrugId;
use crate::effects::DrugEffectTable;
use crate::error::{CascadeResult, ValidationError};
use crate::explanation::ExplanationCatalog;
use crate::interaction::{InteractionCoordinator, Reaction, ShowContext, TooltipTarget};
use crate::projector::{node_visuals, project, ReadoutProjection};
use crate::renderer::Renderer;
use crate::state::{CascadeMachine, SimulationState, Transition};

/// Serializable view of a session at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot<'a> {
    /// Simulation state.
    pub state: &'a SimulationState,
    /// Readouts currently painted.
    pub readouts: &'a ReadoutProjection,
    /// Anchor of the open tooltip, if any.
    pub tooltip: Option<String>,
}

/// Cascade state, interaction state and the renderer they paint to.
#[derive(Debug)]
pub struct CascadeSession<R: Renderer> {
    machine: CascadeMachine,
    catalog: ExplanationCatalog,
    coordinator: InteractionCoordinator,
    readouts: ReadoutProjection,
    renderer: R,
}

fn show_context<'a>(
    readouts: &'a ReadoutProjection,
    machine: &'a CascadeMachine,
) -> ShowContext<'a> {
    ShowContext {
        readouts,
        inhibited: machine.state().inhibited_nodes(),
    }
}

impl<R: Renderer> CascadeSession<R> {
    /// Creates a session and paints its initial state.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if `config` is invalid.
    pub fn new(
        config: SessionConfig,
        table: DrugEffectTable,
        catalog: ExplanationCatalog,
        renderer: R,
    ) -> Result<Self, ValidationError> {
        config.validate()?;
        let machine = CascadeMachine::new(table);
        let readouts = project(machine.state(), machine.table(), &catalog);
        let mut session = Self {
            machine,
            catalog,
            coordinator: InteractionCoordinator::new(config),
            readouts,
            renderer,
        };
        session.renderer.reveal_cascade_diagram(false);
        session.renderer.set_trigger_control_enabled(true);
        session.repaint();
        tracing::debug!(mode = ?config.input_mode, "session started");
        Ok(session)
    }

    /// Creates a session with the built-in tables.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if `config` is invalid.
    pub fn builtin(config: SessionConfig, renderer: R) -> Result<Self, ValidationError> {
        Self::new(
            config,
            DrugEffectTable::builtin(),
            ExplanationCatalog::builtin(),
            renderer,
        )
    }

    /// Current simulation state.
    #[must_use]
    pub const fn state(&self) -> &SimulationState {
        self.machine.state()
    }

    /// Readouts as last painted.
    #[must_use]
    pub const fn readouts(&self) -> &ReadoutProjection {
        &self.readouts
    }

    /// Interaction state.
    #[must_use]
    pub const fn coordinator(&self) -> &InteractionCoordinator {
        &self.coordinator
    }

    /// The renderer.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Consumes the session, returning the renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Snapshot for transcripts.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            state: self.machine.state(),
            readouts: &self.readouts,
            tooltip: self.coordinator.active().map(|a| a.target.anchor_id()),
        }
    }

    /// Stimulus applied.
    pub fn on_trigger(&mut self) -> Transition {
        let transition = self.machine.trigger();
        if transition.changed() {
            self.renderer.reveal_cascade_diagram(true);
            self.renderer.set_trigger_control_enabled(false);
            self.repaint();
        }
        transition
    }

    /// Drug control activated.
    ///
    /// # Errors
    ///
    /// Returns `CascadeError::Precondition` if the cascade is idle. The
    /// notice is shown through the renderer and nothing else changes.
    pub fn on_apply_drug(&mut self, drug: DrugId, now_ms: u64) -> CascadeResult<Transition> {
        let transition = match self.machine.apply_drug(drug) {
            Ok(transition) => transition,
            Err(err) => {
                self.renderer.show_notice(&err.to_string());
                return Err(err.into());
            }
        };
        let reaction = self.coordinator.force_close(now_ms);
        self.paint(reaction);
        self.repaint();
        Ok(transition)
    }

    /// Reset control activated.
    pub fn on_reset(&mut self) -> Transition {
        let reaction = self.coordinator.reset();
        self.paint(reaction);
        let transition = self.machine.reset();
        self.renderer.reveal_cascade_diagram(false);
        self.renderer.set_trigger_control_enabled(true);
        self.repaint();
        transition
    }

    /// Pointer entered `target`.
    pub fn on_hover_enter(&mut self, target: TooltipTarget) {
        let ctx = show_context(&self.readouts, &self.machine);
        let reaction = self.coordinator.hover_enter(target, ctx);
        self.paint(reaction);
    }

    /// Pointer left `target`.
    pub fn on_hover_leave(&mut self, target: &TooltipTarget, now_ms: u64) {
        let reaction = self.coordinator.hover_leave(target, now_ms);
        self.paint(reaction);
    }

    /// Pointer entered the tooltip body.
    pub fn on_tooltip_enter(&mut self) {
        let reaction = self.coordinator.tooltip_enter();
        self.paint(reaction);
    }

    /// Pointer left the tooltip body.
    pub fn on_tooltip_leave(&mut self, now_ms: u64) {
        let reaction = self.coordinator.tooltip_leave(now_ms);
        self.paint(reaction);
    }

    /// Click or tap on `target`.
    ///
    /// # Errors
    ///
    /// Returns `CascadeError::Precondition` if the tap applies a drug while
    /// the cascade is idle.
    pub fn on_tap(&mut self, target: TooltipTarget, now_ms: u64) -> CascadeResult<()> {
        let ctx = show_context(&self.readouts, &self.machine);
        match self.coordinator.tap(target, ctx, now_ms) {
            Reaction::ApplyDrug(drug) => self.on_apply_drug(drug, now_ms).map(|_| ()),
            reaction => {
                self.paint(reaction);
                Ok(())
            }
        }
    }

    /// Finger down on `target`.
    pub fn on_press_start(&mut self, target: &TooltipTarget, now_ms: u64) {
        let reaction = self.coordinator.press_start(target, now_ms);
        self.paint(reaction);
    }

    /// Finger moved during a press.
    pub fn on_press_move(&mut self) {
        let reaction = self.coordinator.press_move();
        self.paint(reaction);
    }

    /// Finger lifted.
    pub fn on_press_end(&mut self) {
        let reaction = self.coordinator.press_end();
        self.paint(reaction);
    }

    /// Long-press detected by the host.
    pub fn on_long_press(&mut self, target: TooltipTarget) {
        let ctx = show_context(&self.readouts, &self.machine);
        let reaction = self.coordinator.long_press(target, ctx);
        self.paint(reaction);
    }

    /// Tap outside the active target and the tooltip.
    pub fn on_outside_tap(&mut self, now_ms: u64) {
        let reaction = self.coordinator.outside_tap(now_ms);
        self.paint(reaction);
    }

    /// Tap on a nested term inside the open tooltip.
    pub fn on_term_tap(&mut self, index: usize) {
        let reaction = self.coordinator.term_tap(index);
        self.paint(reaction);
    }

    /// Fires due timers.
    pub fn tick(&mut self, now_ms: u64) {
        let ctx = show_context(&self.readouts, &self.machine);
        let reaction = self.coordinator.tick(ctx, now_ms);
        self.paint(reaction);
    }

    fn paint(&mut self, reaction: Reaction) {
        match reaction {
            Reaction::Show { content, anchor } => self.renderer.show_tooltip(&content, &anchor),
            Reaction::Hide => self.renderer.hide_tooltip(),
            Reaction::TermExpanded(index) => self.renderer.set_expanded_term(index),
            Reaction::None | Reaction::ApplyDrug(_) => {}
        }
    }

    fn repaint(&mut self) {
        self.readouts = project(self.machine.state(), self.machine.table(), &self.catalog);
        for readout in self.readouts.iter() {
            self.renderer.set_readout(readout.key, &readout.state);
        }
        for visual in node_visuals(self.machine.state()) {
            self.renderer.set_node_inhibited(visual.node, visual.inhibited);
        }
    }
}
