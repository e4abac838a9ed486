//! Tooltip content resolution.

use serde::{Deserialize, Serialize};

use crate::error::NO_DETAILS;
use crate::projector::ReadoutProjection;
use crate::rich_text::RichText;

use super::target::TooltipTarget;

/// What a tooltip displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipContent {
    /// Heading.
    pub title: String,
    /// Body with expandable terms.
    pub body: RichText,
}

/// Explicit name and body supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentOverride {
    /// Replaces the target's own title.
    pub name: Option<String>,
    /// Replaces the target's own body (term markup).
    pub info: Option<String>,
}

impl ContentOverride {
    /// No overrides.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            name: None,
            info: None,
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// Resolves title and body for `target`.
///
/// Precedence: explicit override, then the target's own contextual data
/// (the readout's current explanation, the drug's blurb, the node's info,
/// the term's definition), then [`NO_DETAILS`].
#[must_use]
pub fn resolve_content(
    target: &TooltipTarget,
    overrides: &ContentOverride,
    readouts: &ReadoutProjection,
) -> TooltipContent {
    let (own_name, own_info): (&str, Option<&str>) = match target {
        TooltipTarget::Node { node } => (node.name(), Some(node.info())),
        TooltipTarget::Term { label, definition } => (label.as_str(), Some(definition.as_str())),
        TooltipTarget::Readout { key } | TooltipTarget::InfoIcon { key } => {
            (key.label(), Some(readouts.get(*key).explanation.as_str()))
        }
        TooltipTarget::DrugControl { drug } => (drug.label(), Some(drug.info())),
        TooltipTarget::Element { id } => (id.as_str(), None),
    };

    let title = non_empty(overrides.name.as_deref())
        .or_else(|| non_empty(Some(own_name)))
        .unwrap_or("Details");
    let body = non_empty(overrides.info.as_deref())
        .or_else(|| non_empty(own_info))
        .unwrap_or_else(|| {
            tracing::warn!(%target, "no tooltip details");
            NO_DETAILS
        });

    TooltipContent {
        title: title.to_string(),
        body: RichText::parse_lossy(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drug::DrugId;
    use crate::effects::DrugEffectTable;
    use crate::explanation::ExplanationCatalog;
    use crate::node::NodeId;
    use crate::projector::project;
    use crate::readout::ReadoutKey;
    use crate::state::SimulationState;

    fn idle_readouts() -> ReadoutProjection {
        project(
            &SimulationState::initial(),
            &DrugEffectTable::builtin(),
            &ExplanationCatalog::builtin(),
        )
    }

    #[test]
    fn test_override_wins() {
        let content = resolve_content(
            &TooltipTarget::Node { node: NodeId::Cox1 },
            &ContentOverride {
                name: Some("Custom".to_string()),
                info: Some("Custom body".to_string()),
            },
            &idle_readouts(),
        );
        assert_eq!(content.title, "Custom");
        assert_eq!(content.body.plain(), "Custom body");
    }

    #[test]
    fn test_readout_uses_current_explanation() {
        let readouts = idle_readouts();
        let content = resolve_content(
            &TooltipTarget::InfoIcon { key: ReadoutKey::Bronchi },
            &ContentOverride::none(),
            &readouts,
        );
        assert_eq!(content.title, "Bronchial Tone");
        assert_eq!(content.body.to_string(), readouts.get(ReadoutKey::Bronchi).explanation);
    }

    #[test]
    fn test_drug_uses_blurb() {
        let content = resolve_content(
            &TooltipTarget::DrugControl { drug: DrugId::Ltra },
            &ContentOverride::none(),
            &idle_readouts(),
        );
        assert_eq!(content.title, DrugId::Ltra.label());
        assert_eq!(content.body.term(0).unwrap().label, "CysLT₁ receptor");
    }

    #[test]
    fn test_unknown_element_falls_back() {
        let content = resolve_content(
            &TooltipTarget::Element { id: "legend".to_string() },
            &ContentOverride::none(),
            &idle_readouts(),
        );
        assert_eq!(content.title, "legend");
        assert_eq!(content.body.plain(), NO_DETAILS);
    }

    #[test]
    fn test_empty_term_definition_falls_back() {
        let content = resolve_content(
            &TooltipTarget::Term {
                label: "EETs".to_string(),
                definition: String::new(),
            },
            &ContentOverride {
                name: None,
                info: Some("  ".to_string()),
            },
            &idle_readouts(),
        );
        assert_eq!(content.title, "EETs");
        assert_eq!(content.body.plain(), NO_DETAILS);
    }
}
