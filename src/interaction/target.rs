//! Things a tooltip can be anchored to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::drug::DrugId;
use crate::error::{LookupKind, LookupMiss};
use crate::node::NodeId;
use crate::readout::ReadoutKey;

/// A hover or tap target.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TooltipTarget {
    /// A pathway node on the diagram.
    Node { node: NodeId },
    /// A glossary term in page text.
    Term { label: String, definition: String },
    /// A readout panel row.
    Readout { key: ReadoutKey },
    /// The "more info" icon on a readout row.
    InfoIcon { key: ReadoutKey },
    /// A drug-apply control.
    DrugControl { drug: DrugId },
    /// An element no catalog knows.
    Element { id: String },
}

impl TooltipTarget {
    /// Renderer element id the tooltip is anchored to.
    #[must_use]
    pub fn anchor_id(&self) -> String {
        match self {
            Self::Node { node } => node.element_id().to_string(),
            Self::Term { label, .. } => format!("term-{label}"),
            Self::Readout { key } => format!("readout-{key}"),
            Self::InfoIcon { key } => format!("info-{key}"),
            Self::DrugControl { drug } => drug.control_id().to_string(),
            Self::Element { id } => id.clone(),
        }
    }

    /// Returns true for explicit "more info" entry points, which stay
    /// active even when the element they belong to is inhibited.
    #[must_use]
    pub const fn is_info_affordance(&self) -> bool {
        matches!(self, Self::InfoIcon { .. })
    }

    /// Drug applied by this target's primary action, if it has one.
    #[must_use]
    pub const fn primary_drug(&self) -> Option<DrugId> {
        match self {
            Self::DrugControl { drug } => Some(*drug),
            _ => None,
        }
    }

    /// Maps a renderer element id back to a target.
    ///
    /// Recognises `node-…`, `drug-…`, `readout-<key>` and `info-<key>`.
    ///
    /// # Errors
    ///
    /// Returns `LookupMiss` for anything else.
    pub fn from_element_id(id: &str) -> Result<Self, LookupMiss> {
        let miss = || LookupMiss::new(LookupKind::Element, id);
        if id.starts_with("node-") {
            return NodeId::from_element_id(id).map(|node| Self::Node { node });
        }
        if id.starts_with("drug-") {
            return DrugId::from_control_id(id).map(|drug| Self::DrugControl { drug });
        }
        if let Some(key) = id.strip_prefix("readout-") {
            return key.parse().map(|key| Self::Readout { key }).map_err(|_| miss());
        }
        if let Some(key) = id.strip_prefix("info-") {
            return key.parse().map(|key| Self::InfoIcon { key }).map_err(|_| miss());
        }
        Err(miss())
    }

    /// Like [`TooltipTarget::from_element_id`], but unknown ids become
    /// [`TooltipTarget::Element`] so the caller can still show fallback text.
    #[must_use]
    pub fn resolve(id: &str) -> Self {
        Self::from_element_id(id).unwrap_or_else(|miss| {
            tracing::warn!(%miss, "unresolved tooltip target");
            Self::Element { id: id.to_string() }
        })
    }
}

impl fmt::Display for TooltipTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.anchor_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_ids_resolve_back() {
        let targets = [
            TooltipTarget::Node { node: NodeId::Cox2 },
            TooltipTarget::Readout { key: ReadoutKey::Bronchi },
            TooltipTarget::InfoIcon { key: ReadoutKey::CvTone },
            TooltipTarget::DrugControl { drug: DrugId::AceInhibitor },
        ];
        for target in targets {
            assert_eq!(TooltipTarget::from_element_id(&target.anchor_id()).unwrap(), target);
        }
    }

    #[test]
    fn test_unknown_ids_are_misses() {
        for id in ["node-missing", "drug-placebo", "readout-heart", "panel-1"] {
            let err = TooltipTarget::from_element_id(id).unwrap_err();
            assert_eq!(err.name, id);
        }
    }

    #[test]
    fn test_resolve_falls_back_to_element() {
        assert_eq!(
            TooltipTarget::resolve("legend"),
            TooltipTarget::Element { id: "legend".to_string() }
        );
        assert_eq!(
            TooltipTarget::resolve("drug-ccb"),
            TooltipTarget::DrugControl { drug: DrugId::Ccb }
        );
    }

    #[test]
    fn test_only_info_icons_are_affordances() {
        assert!(TooltipTarget::InfoIcon { key: ReadoutKey::Kidney }.is_info_affordance());
        assert!(!TooltipTarget::Node { node: NodeId::Ace }.is_info_affordance());
        assert_eq!(
            TooltipTarget::DrugControl { drug: DrugId::Loxi }.primary_drug(),
            Some(DrugId::Loxi)
        );
    }
}
