//! Tooltip coordinator.
//!
//! Decides what the single logical tooltip shows and when it opens or
//! closes, for both the pointer and the touch input model. Owns the two
//! timers the interaction needs: the hide debounce and the long-press.

use std::collections::BTreeSet;

use crate::config::{InputMode, SessionConfig};
use crate::drug::DrugId;
use crate::node::NodeId;
use crate::projector::ReadoutProjection;

use super::content::{resolve_content, ContentOverride, TooltipContent};
use super::target::TooltipTarget;
use super::timer::SingleShotTimer;

/// Read-only view of the simulation the coordinator needs.
#[derive(Debug, Clone, Copy)]
pub struct ShowContext<'a> {
    /// Current readouts, for readout explanations.
    pub readouts: &'a ReadoutProjection,
    /// Currently inhibited nodes, whose tooltips are suppressed.
    pub inhibited: &'a BTreeSet<NodeId>,
}

/// What the host must do in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Nothing visible changes.
    None,
    /// Show (or replace) the tooltip.
    Show {
        /// Content to draw.
        content: TooltipContent,
        /// Element id to anchor to.
        anchor: String,
    },
    /// Hide the tooltip.
    Hide,
    /// Run the drug control's primary action.
    ApplyDrug(DrugId),
    /// Nested term expansion changed inside the open tooltip.
    TermExpanded(Option<usize>),
}

/// The tooltip that is logically open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTooltip {
    /// Target it belongs to.
    pub target: TooltipTarget,
    /// Content shown.
    pub content: TooltipContent,
}

/// Single-active-tooltip coordinator.
#[derive(Debug, Clone)]
pub struct InteractionCoordinator {
    config: SessionConfig,
    active: Option<ActiveTooltip>,
    expanded_term: Option<usize>,
    hide_timer: SingleShotTimer<()>,
    long_press: SingleShotTimer<DrugId>,
    // Drug whose tooltip a long-press opened; swallows the tap that ends the press.
    long_press_shown: Option<DrugId>,
}

impl InteractionCoordinator {
    /// Creates a coordinator with nothing open.
    #[must_use]
    pub const fn new(config: SessionConfig) -> Self {
        Self {
            config,
            active: None,
            expanded_term: None,
            hide_timer: SingleShotTimer::new("hide"),
            long_press: SingleShotTimer::new("long_press"),
            long_press_shown: None,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The open tooltip, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&ActiveTooltip> {
        self.active.as_ref()
    }

    /// Returns true if a tooltip is open.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.active.is_some()
    }

    /// Index of the expanded nested term, if any.
    #[must_use]
    pub const fn expanded_term(&self) -> Option<usize> {
        self.expanded_term
    }

    /// Returns true if a hide is waiting to commit.
    #[must_use]
    pub const fn hide_pending(&self) -> bool {
        self.hide_timer.is_armed()
    }

    /// Returns true if a long-press is being timed.
    #[must_use]
    pub const fn long_press_pending(&self) -> bool {
        self.long_press.is_armed()
    }

    fn is_active(&self, target: &TooltipTarget) -> bool {
        self.active.as_ref().is_some_and(|a| &a.target == target)
    }

    /// Opens the tooltip for `target`, replacing whatever was open.
    ///
    /// Suppressed (no-op) for inhibited nodes. Cancels every outstanding
    /// timer before showing.
    pub fn request_show(
        &mut self,
        target: TooltipTarget,
        overrides: &ContentOverride,
        ctx: ShowContext<'_>,
    ) -> Reaction {
        if let TooltipTarget::Node { node } = &target {
            if ctx.inhibited.contains(node) && !target.is_info_affordance() {
                tracing::debug!(%node, "tooltip suppressed for inhibited node");
                return Reaction::None;
            }
        }
        self.hide_timer.cancel();
        self.long_press.cancel();
        self.long_press_shown = None;

        let content = resolve_content(&target, overrides, ctx.readouts);
        let anchor = target.anchor_id();
        tracing::debug!(%anchor, "tooltip shown");
        self.active = Some(ActiveTooltip {
            target,
            content: content.clone(),
        });
        self.expanded_term = None;
        Reaction::Show { content, anchor }
    }

    /// Pointer entered `target`. Ignored in touch mode.
    pub fn hover_enter(&mut self, target: TooltipTarget, ctx: ShowContext<'_>) -> Reaction {
        if self.config.input_mode != InputMode::Pointer {
            return Reaction::None;
        }
        self.request_show(target, &ContentOverride::none(), ctx)
    }

    /// Pointer left `target`; arms the hide debounce. Ignored in touch mode.
    pub fn hover_leave(&mut self, target: &TooltipTarget, now_ms: u64) -> Reaction {
        if self.config.input_mode == InputMode::Pointer && self.is_active(target) {
            self.hide_timer.arm(now_ms, self.config.hide_delay_ms, ());
        }
        Reaction::None
    }

    /// Pointer entered the tooltip body; keeps it open.
    pub fn tooltip_enter(&mut self) -> Reaction {
        self.hide_timer.cancel();
        Reaction::None
    }

    /// Pointer left the tooltip body.
    pub fn tooltip_leave(&mut self, now_ms: u64) -> Reaction {
        if self.config.input_mode == InputMode::Pointer && self.active.is_some() {
            self.hide_timer.arm(now_ms, self.config.hide_delay_ms, ());
        }
        Reaction::None
    }

    /// Click or tap on `target`.
    ///
    /// Pointer: a drug control applies its drug; other targets are hover
    /// driven and ignore clicks. Touch: taps toggle the target's tooltip; a
    /// short tap on a drug control applies the drug unless it ends a
    /// long-press or closes that control's open tooltip.
    pub fn tap(&mut self, target: TooltipTarget, ctx: ShowContext<'_>, now_ms: u64) -> Reaction {
        match (self.config.input_mode, target.primary_drug()) {
            (InputMode::Pointer, Some(drug)) => Reaction::ApplyDrug(drug),
            (InputMode::Pointer, None) => Reaction::None,
            (InputMode::Touch, Some(drug)) => {
                self.long_press.cancel();
                if self.long_press_shown.take() == Some(drug) {
                    return Reaction::None;
                }
                if self.is_active(&target) {
                    return self.force_close(now_ms);
                }
                Reaction::ApplyDrug(drug)
            }
            (InputMode::Touch, None) => {
                if self.is_active(&target) {
                    self.force_close(now_ms)
                } else {
                    self.request_show(target, &ContentOverride::none(), ctx)
                }
            }
        }
    }

    /// Finger down on `target`. Starts long-press timing on drug controls.
    pub fn press_start(&mut self, target: &TooltipTarget, now_ms: u64) -> Reaction {
        if self.config.input_mode != InputMode::Touch {
            return Reaction::None;
        }
        let Some(drug) = target.primary_drug() else {
            return Reaction::None;
        };
        self.long_press_shown = None;
        self.long_press.arm(now_ms, self.config.long_press_ms, drug);
        Reaction::None
    }

    /// Finger moved; the press is no longer a long-press candidate.
    pub fn press_move(&mut self) -> Reaction {
        self.long_press.cancel();
        Reaction::None
    }

    /// Finger lifted before the threshold.
    pub fn press_end(&mut self) -> Reaction {
        self.long_press.cancel();
        Reaction::None
    }

    /// Long-press detected by the host. Ignored in pointer mode.
    pub fn long_press(&mut self, target: TooltipTarget, ctx: ShowContext<'_>) -> Reaction {
        if self.config.input_mode != InputMode::Touch {
            return Reaction::None;
        }
        self.long_press.cancel();
        let drug = target.primary_drug();
        let reaction = self.request_show(target, &ContentOverride::none(), ctx);
        if matches!(reaction, Reaction::Show { .. }) {
            self.long_press_shown = drug;
        }
        reaction
    }

    /// Tap outside both the active target and the tooltip body.
    pub fn outside_tap(&mut self, now_ms: u64) -> Reaction {
        if self.active.is_none() {
            return Reaction::None;
        }
        self.force_close(now_ms)
    }

    /// Tap on the nested term at `index` inside the open tooltip.
    ///
    /// Expands it, collapsing any other; tapping the expanded term collapses
    /// it. Never closes the tooltip. Out-of-range indices are ignored.
    pub fn term_tap(&mut self, index: usize) -> Reaction {
        let Some(active) = &self.active else {
            return Reaction::None;
        };
        if active.content.body.term(index).is_none() {
            return Reaction::None;
        }
        self.expanded_term = if self.expanded_term == Some(index) {
            None
        } else {
            Some(index)
        };
        Reaction::TermExpanded(self.expanded_term)
    }

    /// Fires due timers.
    pub fn tick(&mut self, ctx: ShowContext<'_>, now_ms: u64) -> Reaction {
        if let Some(drug) = self.long_press.fire_if_due(now_ms) {
            let reaction =
                self.request_show(TooltipTarget::DrugControl { drug }, &ContentOverride::none(), ctx);
            self.long_press_shown = Some(drug);
            return reaction;
        }
        if self.hide_timer.fire_if_due(now_ms).is_some() {
            return self.close();
        }
        Reaction::None
    }

    /// Closes the open tooltip after the forced-hide delay.
    pub fn force_close(&mut self, now_ms: u64) -> Reaction {
        if self.active.is_none() {
            self.hide_timer.cancel();
            return Reaction::None;
        }
        self.long_press_shown = None;
        if self.config.forced_hide_delay_ms == 0 {
            return self.close();
        }
        self.hide_timer.arm(now_ms, self.config.forced_hide_delay_ms, ());
        Reaction::None
    }

    /// Drops every timer and closes the tooltip immediately.
    pub fn reset(&mut self) -> Reaction {
        self.long_press.cancel();
        self.close()
    }

    fn close(&mut self) -> Reaction {
        self.hide_timer.cancel();
        self.expanded_term = None;
        // The swallowed tap belongs to the tooltip the long-press opened.
        self.long_press_shown = None;
        if self.active.take().is_some() {
            tracing::debug!("tooltip hidden");
            Reaction::Hide
        } else {
            Reaction::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::DrugEffectTable;
    use crate::explanation::ExplanationCatalog;
    use crate::projector::project;
    use crate::readout::ReadoutKey;
    use crate::state::SimulationState;

    struct Fixture {
        readouts: ReadoutProjection,
        inhibited: BTreeSet<NodeId>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                readouts: project(
                    &SimulationState::initial(),
                    &DrugEffectTable::builtin(),
                    &ExplanationCatalog::builtin(),
                ),
                inhibited: BTreeSet::new(),
            }
        }

        fn ctx(&self) -> ShowContext<'_> {
            ShowContext {
                readouts: &self.readouts,
                inhibited: &self.inhibited,
            }
        }
    }

    fn pointer() -> InteractionCoordinator {
        InteractionCoordinator::new(SessionConfig::for_mode(InputMode::Pointer))
    }

    fn touch() -> InteractionCoordinator {
        InteractionCoordinator::new(SessionConfig::for_mode(InputMode::Touch))
    }

    const COX1: TooltipTarget = TooltipTarget::Node { node: NodeId::Cox1 };
    const NSAID: TooltipTarget = TooltipTarget::DrugControl { drug: DrugId::Nsaid };

    #[test]
    fn test_hover_shows_and_leave_hides_after_grace() {
        let fx = Fixture::new();
        let mut c = pointer();
        assert!(matches!(c.hover_enter(COX1, fx.ctx()), Reaction::Show { .. }));
        c.hover_leave(&COX1, 1000);
        assert!(c.hide_pending());
        assert_eq!(c.tick(fx.ctx(), 1199), Reaction::None);
        assert!(c.is_visible());
        assert_eq!(c.tick(fx.ctx(), 1200), Reaction::Hide);
        assert!(!c.is_visible());
    }

    #[test]
    fn test_entering_tooltip_body_cancels_hide() {
        let fx = Fixture::new();
        let mut c = pointer();
        c.hover_enter(COX1, fx.ctx());
        c.hover_leave(&COX1, 0);
        c.tooltip_enter();
        assert_eq!(c.tick(fx.ctx(), 10_000), Reaction::None);
        assert!(c.is_visible());

        c.tooltip_leave(10_000);
        assert_eq!(c.tick(fx.ctx(), 10_200), Reaction::Hide);
    }

    #[test]
    fn test_new_show_cancels_pending_hide() {
        let fx = Fixture::new();
        let mut c = pointer();
        c.hover_enter(COX1, fx.ctx());
        c.hover_leave(&COX1, 0);
        let other = TooltipTarget::Readout { key: ReadoutKey::Kidney };
        assert!(matches!(c.hover_enter(other.clone(), fx.ctx()), Reaction::Show { .. }));
        assert_eq!(c.tick(fx.ctx(), 1000), Reaction::None);
        assert_eq!(c.active().unwrap().target, other);
    }

    #[test]
    fn test_leave_of_stale_target_is_ignored() {
        let fx = Fixture::new();
        let mut c = pointer();
        c.hover_enter(NSAID, fx.ctx());
        c.hover_leave(&COX1, 0);
        assert!(!c.hide_pending());
    }

    #[test]
    fn test_pointer_click_applies_drug() {
        let fx = Fixture::new();
        let mut c = pointer();
        assert_eq!(c.tap(NSAID, fx.ctx(), 0), Reaction::ApplyDrug(DrugId::Nsaid));
        assert_eq!(c.tap(COX1, fx.ctx(), 0), Reaction::None);
        assert_eq!(c.press_start(&NSAID, 0), Reaction::None);
        assert!(!c.long_press_pending());
    }

    #[test]
    fn test_inhibited_node_is_suppressed() {
        let mut fx = Fixture::new();
        fx.inhibited.insert(NodeId::Cox1);
        let mut c = pointer();
        assert_eq!(c.hover_enter(COX1, fx.ctx()), Reaction::None);
        assert!(!c.is_visible());

        let info = TooltipTarget::InfoIcon { key: ReadoutKey::Platelets };
        assert!(matches!(c.hover_enter(info, fx.ctx()), Reaction::Show { .. }));
    }

    #[test]
    fn test_touch_tap_toggles() {
        let fx = Fixture::new();
        let mut c = touch();
        assert_eq!(c.hover_enter(COX1, fx.ctx()), Reaction::None);
        assert!(matches!(c.tap(COX1, fx.ctx(), 0), Reaction::Show { .. }));
        assert_eq!(c.tap(COX1, fx.ctx(), 10), Reaction::Hide);
        assert!(!c.is_visible());
    }

    #[test]
    fn test_touch_tap_on_other_target_replaces() {
        let fx = Fixture::new();
        let mut c = touch();
        c.tap(COX1, fx.ctx(), 0);
        let other = TooltipTarget::Readout { key: ReadoutKey::Uterus };
        let reaction = c.tap(other.clone(), fx.ctx(), 10);
        let Reaction::Show { anchor, .. } = reaction else {
            panic!("expected Reaction::Show");
        };
        assert_eq!(anchor, "readout-uterus");
        assert_eq!(c.active().unwrap().target, other);
    }

    #[test]
    fn test_long_press_shows_without_applying() {
        let fx = Fixture::new();
        let mut c = touch();
        c.press_start(&NSAID, 0);
        assert!(c.long_press_pending());
        assert_eq!(c.tick(fx.ctx(), 499), Reaction::None);
        assert!(matches!(c.tick(fx.ctx(), 500), Reaction::Show { .. }));

        // The click that ends the long-press is swallowed.
        c.press_end();
        assert_eq!(c.tap(NSAID, fx.ctx(), 600), Reaction::None);
        assert!(c.is_visible());

        // A later short tap on the same control closes its tooltip.
        c.press_start(&NSAID, 1000);
        c.press_end();
        assert_eq!(c.tap(NSAID, fx.ctx(), 1100), Reaction::Hide);
    }

    #[test]
    fn test_short_tap_cancels_long_press() {
        let fx = Fixture::new();
        let mut c = touch();
        c.press_start(&NSAID, 0);
        c.press_end();
        assert_eq!(c.tap(NSAID, fx.ctx(), 100), Reaction::ApplyDrug(DrugId::Nsaid));
        assert_eq!(c.tick(fx.ctx(), 10_000), Reaction::None);
        assert!(!c.is_visible());
    }

    #[test]
    fn test_press_move_cancels_long_press() {
        let fx = Fixture::new();
        let mut c = touch();
        c.press_start(&NSAID, 0);
        c.press_move();
        assert_eq!(c.tick(fx.ctx(), 1000), Reaction::None);
    }

    #[test]
    fn test_host_long_press_swallows_following_tap() {
        let fx = Fixture::new();
        let mut c = touch();
        assert!(matches!(c.long_press(NSAID, fx.ctx()), Reaction::Show { .. }));
        assert_eq!(c.tap(NSAID, fx.ctx(), 0), Reaction::None);
    }

    #[test]
    fn test_outside_tap_closes() {
        let fx = Fixture::new();
        let mut c = touch();
        assert_eq!(c.outside_tap(0), Reaction::None);
        c.tap(COX1, fx.ctx(), 0);
        assert_eq!(c.outside_tap(5), Reaction::Hide);
    }

    #[test]
    fn test_pointer_forced_close_is_delayed() {
        let fx = Fixture::new();
        let mut c = pointer();
        c.hover_enter(COX1, fx.ctx());
        assert_eq!(c.force_close(100), Reaction::None);
        assert!(c.is_visible());
        assert_eq!(c.tick(fx.ctx(), 150), Reaction::Hide);
    }

    #[test]
    fn test_nested_terms_toggle_one_at_a_time() {
        let fx = Fixture::new();
        let mut c = touch();
        let term_count = {
            c.tap(COX1, fx.ctx(), 0);
            c.active().unwrap().content.body.terms().count()
        };
        assert!(term_count >= 1);

        assert_eq!(c.term_tap(0), Reaction::TermExpanded(Some(0)));
        assert_eq!(c.term_tap(0), Reaction::TermExpanded(None));
        assert_eq!(c.term_tap(0), Reaction::TermExpanded(Some(0)));
        assert_eq!(c.term_tap(term_count), Reaction::None);
        assert!(c.is_visible());

        assert_eq!(c.outside_tap(0), Reaction::Hide);
        assert_eq!(c.expanded_term(), None);
        assert_eq!(c.term_tap(0), Reaction::None);
    }

    #[test]
    fn test_reset_drops_everything() {
        let fx = Fixture::new();
        let mut c = touch();
        c.tap(COX1, fx.ctx(), 0);
        c.press_start(&NSAID, 0);
        assert_eq!(c.reset(), Reaction::Hide);
        assert!(!c.long_press_pending());
        assert_eq!(c.tick(fx.ctx(), 10_000), Reaction::None);
    }

    #[test]
    fn test_closed_long_press_tooltip_does_not_swallow_later_tap() {
        let fx = Fixture::new();
        let mut c = touch();
        c.long_press(NSAID, fx.ctx());
        assert_eq!(c.outside_tap(100), Reaction::Hide);
        assert_eq!(c.tap(NSAID, fx.ctx(), 5_000), Reaction::ApplyDrug(DrugId::Nsaid));
    }

    #[test]
    fn test_replaced_long_press_tooltip_does_not_swallow_later_tap() {
        let fx = Fixture::new();
        let mut c = touch();
        c.press_start(&NSAID, 0);
        assert!(matches!(c.tick(fx.ctx(), 500), Reaction::Show { .. }));
        assert!(matches!(c.tap(COX1, fx.ctx(), 700), Reaction::Show { .. }));
        assert_eq!(c.tap(NSAID, fx.ctx(), 900), Reaction::ApplyDrug(DrugId::Nsaid));
    }

    #[test]
    fn test_press_keeps_pending_forced_close() {
        let fx = Fixture::new();
        let mut c = InteractionCoordinator::new(SessionConfig {
            forced_hide_delay_ms: 100,
            ..SessionConfig::for_mode(InputMode::Touch)
        });
        c.tap(COX1, fx.ctx(), 0);
        assert_eq!(c.outside_tap(10), Reaction::None);
        c.press_start(&NSAID, 20);
        assert!(c.hide_pending());
        c.press_end();
        assert_eq!(c.tick(fx.ctx(), 110), Reaction::Hide);
        assert!(!c.is_visible());
    }

    #[test]
    fn test_touch_never_arms_hide_delay() {
        let fx = Fixture::new();
        let mut c = touch();
        c.tap(COX1, fx.ctx(), 0);
        c.hover_leave(&COX1, 0);
        c.tooltip_leave(0);
        assert!(!c.hide_pending());
        assert_eq!(c.tick(fx.ctx(), 60_000), Reaction::None);
        assert!(c.is_visible());
    }
}
