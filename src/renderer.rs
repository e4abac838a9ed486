//! Presentation boundary.
//!
//! The core never draws anything. It pushes commands through [`Renderer`],
//! and the host turns them into pixels, DOM updates or terminal output.
//! [`RecordingRenderer`] keeps every command for tests and headless use.

use serde::{Deserialize, Serialize};

use crate::interaction::TooltipContent;
use crate::node::NodeId;
use crate::readout::{ReadoutKey, ReadoutState};

/// Sink for everything the core wants displayed.
pub trait Renderer {
    /// Paint one readout row.
    fn set_readout(&mut self, key: ReadoutKey, state: &ReadoutState);

    /// Mark a diagram node as inhibited or active.
    fn set_node_inhibited(&mut self, node: NodeId, inhibited: bool);

    /// Show or hide the cascade diagram.
    fn reveal_cascade_diagram(&mut self, visible: bool);

    /// Enable or disable the trigger control.
    fn set_trigger_control_enabled(&mut self, enabled: bool);

    /// Show the tooltip anchored to the element with id `anchor`.
    fn show_tooltip(&mut self, content: &TooltipContent, anchor: &str);

    /// Hide the tooltip.
    fn hide_tooltip(&mut self);

    /// Show a user-facing notice, e.g. a rejected operation.
    fn show_notice(&mut self, message: &str);

    /// Expand the nested term at `index` in the open tooltip, or collapse all.
    fn set_expanded_term(&mut self, index: Option<usize>);
}

/// A recorded renderer call.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum RenderCommand {
    SetReadout { key: ReadoutKey, state: ReadoutState },
    SetNodeInhibited { node: NodeId, inhibited: bool },
    RevealCascadeDiagram { visible: bool },
    SetTriggerControlEnabled { enabled: bool },
    ShowTooltip { content: TooltipContent, anchor: String },
    HideTooltip,
    ShowNotice { message: String },
    SetExpandedTerm { index: Option<usize> },
}

/// Renderer that records commands.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    commands: Vec<RenderCommand>,
}

impl RecordingRenderer {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command so far.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Drains the recorded commands.
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Most recent state painted for `key`.
    #[must_use]
    pub fn last_readout(&self, key: ReadoutKey) -> Option<&ReadoutState> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            RenderCommand::SetReadout { key: k, state } if *k == key => Some(state),
            _ => None,
        })
    }

    /// Most recent inhibition flag painted for `node`.
    #[must_use]
    pub fn node_inhibited(&self, node: NodeId) -> Option<bool> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            RenderCommand::SetNodeInhibited { node: n, inhibited } if *n == node => Some(*inhibited),
            _ => None,
        })
    }

    /// Anchor of the tooltip currently shown, if the last tooltip command
    /// was a show.
    #[must_use]
    pub fn visible_tooltip(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            RenderCommand::ShowTooltip { anchor, .. } => Some(Some(anchor.as_str())),
            RenderCommand::HideTooltip => Some(None),
            _ => None,
        })?
    }

    /// Notices shown so far.
    pub fn notices(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            RenderCommand::ShowNotice { message } => Some(message.as_str()),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn set_readout(&mut self, key: ReadoutKey, state: &ReadoutState) {
        self.commands.push(RenderCommand::SetReadout {
            key,
            state: state.clone(),
        });
    }

    fn set_node_inhibited(&mut self, node: NodeId, inhibited: bool) {
        self.commands
            .push(RenderCommand::SetNodeInhibited { node, inhibited });
    }

    fn reveal_cascade_diagram(&mut self, visible: bool) {
        self.commands
            .push(RenderCommand::RevealCascadeDiagram { visible });
    }

    fn set_trigger_control_enabled(&mut self, enabled: bool) {
        self.commands
            .push(RenderCommand::SetTriggerControlEnabled { enabled });
    }

    fn show_tooltip(&mut self, content: &TooltipContent, anchor: &str) {
        self.commands.push(RenderCommand::ShowTooltip {
            content: content.clone(),
            anchor: anchor.to_string(),
        });
    }

    fn hide_tooltip(&mut self) {
        self.commands.push(RenderCommand::HideTooltip);
    }

    fn show_notice(&mut self, message: &str) {
        self.commands.push(RenderCommand::ShowNotice {
            message: message.to_string(),
        });
    }

    fn set_expanded_term(&mut self, index: Option<usize>) {
        self.commands.push(RenderCommand::SetExpandedTerm { index });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readout::StatusClass;
    use crate::rich_text::RichText;

    #[test]
    fn test_last_readout_wins() {
        let mut r = RecordingRenderer::new();
        r.set_readout(
            ReadoutKey::Kidney,
            &ReadoutState::with_default_text(StatusClass::Normal, "a"),
        );
        r.set_readout(
            ReadoutKey::Kidney,
            &ReadoutState::with_default_text(StatusClass::Impaired, "b"),
        );
        assert_eq!(
            r.last_readout(ReadoutKey::Kidney).unwrap().status,
            StatusClass::Impaired
        );
        assert!(r.last_readout(ReadoutKey::Uterus).is_none());
    }

    #[test]
    fn test_visible_tooltip_tracks_show_and_hide() {
        let mut r = RecordingRenderer::new();
        assert_eq!(r.visible_tooltip(), None);
        let content = TooltipContent {
            title: "COX-1".to_string(),
            body: RichText::parse_lossy("body"),
        };
        r.show_tooltip(&content, "node-cox1");
        r.set_node_inhibited(NodeId::Cox1, true);
        assert_eq!(r.visible_tooltip(), Some("node-cox1"));
        r.hide_tooltip();
        assert_eq!(r.visible_tooltip(), None);
        assert_eq!(r.take().len(), 3);
        assert!(r.commands().is_empty());
    }

    #[test]
    fn test_term_expansion_is_recorded() {
        let mut r = RecordingRenderer::new();
        r.set_expanded_term(Some(2));
        r.set_expanded_term(None);
        assert_eq!(
            r.take(),
            vec![
                RenderCommand::SetExpandedTerm { index: Some(2) },
                RenderCommand::SetExpandedTerm { index: None },
            ]
        );
    }

    #[test]
    fn test_commands_serialize_tagged() {
        let json = serde_json::to_value(RenderCommand::SetTriggerControlEnabled { enabled: false })
            .unwrap();
        assert_eq!(json["cmd"], "set_trigger_control_enabled");
        assert_eq!(json["enabled"], false);
    }
}
