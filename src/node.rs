//! Diagram node universe.
//!
//! Every pathway element the diagram draws (enzymes, lipid mediators and the
//! receptor or channel targets of the cardiovascular drugs) is a [`NodeId`].
//! The universe is fixed; drug effect specs refer to nodes only through it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LookupKind, LookupMiss};

/// Broad role of a node in the diagram.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Enzyme,
    Mediator,
    Target,
}

/// A named pathway element.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeId {
    // Upstream
    Pla2,
    ArachidonicAcid,
    // COX branch
    Cox1,
    Cox2,
    Pgh2,
    Pge2,
    Pgi2,
    Txa2,
    Pgf2a,
    // LOX branch
    Lox5,
    Lta4,
    Ltb4,
    CysLts,
    CysLt1Receptor,
    Lipoxins,
    // CYP450 branch
    Cyp450,
    Eets,
    Hete20,
    // Cardiovascular targets
    Beta1Receptor,
    Beta2Receptor,
    Ace,
    AngiotensinII,
    LTypeCaChannel,
}

impl NodeId {
    /// Every node, in diagram order.
    pub const ALL: [Self; 23] = [
        Self::Pla2,
        Self::ArachidonicAcid,
        Self::Cox1,
        Self::Cox2,
        Self::Pgh2,
        Self::Pge2,
        Self::Pgi2,
        Self::Txa2,
        Self::Pgf2a,
        Self::Lox5,
        Self::Lta4,
        Self::Ltb4,
        Self::CysLts,
        Self::CysLt1Receptor,
        Self::Lipoxins,
        Self::Cyp450,
        Self::Eets,
        Self::Hete20,
        Self::Beta1Receptor,
        Self::Beta2Receptor,
        Self::Ace,
        Self::AngiotensinII,
        Self::LTypeCaChannel,
    ];

    /// Renderer element id (`node-cox1`).
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Pla2 => "node-pla2",
            Self::ArachidonicAcid => "node-aa",
            Self::Cox1 => "node-cox1",
            Self::Cox2 => "node-cox2",
            Self::Pgh2 => "node-pgh2",
            Self::Pge2 => "node-pge2",
            Self::Pgi2 => "node-pgi2",
            Self::Txa2 => "node-txa2",
            Self::Pgf2a => "node-pgf2a",
            Self::Lox5 => "node-5lox",
            Self::Lta4 => "node-lta4",
            Self::Ltb4 => "node-ltb4",
            Self::CysLts => "node-cyslts",
            Self::CysLt1Receptor => "node-cyslt1r",
            Self::Lipoxins => "node-lipoxins",
            Self::Cyp450 => "node-cyp450",
            Self::Eets => "node-eets",
            Self::Hete20 => "node-20hete",
            Self::Beta1Receptor => "node-beta1",
            Self::Beta2Receptor => "node-beta2",
            Self::Ace => "node-ace",
            Self::AngiotensinII => "node-ang2",
            Self::LTypeCaChannel => "node-ltype-ca",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pla2 => "Phospholipase A₂",
            Self::ArachidonicAcid => "Arachidonic Acid",
            Self::Cox1 => "COX-1",
            Self::Cox2 => "COX-2",
            Self::Pgh2 => "PGH₂",
            Self::Pge2 => "PGE₂",
            Self::Pgi2 => "PGI₂ (Prostacyclin)",
            Self::Txa2 => "TXA₂",
            Self::Pgf2a => "PGF₂α",
            Self::Lox5 => "5-LOX",
            Self::Lta4 => "LTA₄",
            Self::Ltb4 => "LTB₄",
            Self::CysLts => "CysLTs",
            Self::CysLt1Receptor => "CysLT₁ Receptor",
            Self::Lipoxins => "Lipoxins",
            Self::Cyp450 => "CYP450",
            Self::Eets => "EETs",
            Self::Hete20 => "20-HETE",
            Self::Beta1Receptor => "β₁ Receptor",
            Self::Beta2Receptor => "β₂ Receptor",
            Self::Ace => "ACE",
            Self::AngiotensinII => "Angiotensin II",
            Self::LTypeCaChannel => "L-type Ca²⁺ Channel",
        }
    }

    /// Role in the diagram.
    #[must_use]
    pub const fn kind(self) -> NodeKind {
        match self {
            Self::Pla2 | Self::Cox1 | Self::Cox2 | Self::Lox5 | Self::Cyp450 | Self::Ace => {
                NodeKind::Enzyme
            }
            Self::CysLt1Receptor
            | Self::Beta1Receptor
            | Self::Beta2Receptor
            | Self::LTypeCaChannel => NodeKind::Target,
            _ => NodeKind::Mediator,
        }
    }

    /// Tooltip body in term markup.
    #[must_use]
    pub const fn info(self) -> &'static str {
        match self {
            Self::Pla2 => "Releases [[arachidonic acid|A 20-carbon omega-6 fatty acid stored in membrane phospholipids]] from cell membranes in response to a stimulus. Inhibited indirectly by corticosteroids via [[annexin-1|A glucocorticoid-induced protein that restrains PLA₂]].",
            Self::ArachidonicAcid => "The shared substrate of the COX, LOX and CYP450 branches.",
            Self::Cox1 => "Constitutive [[cyclooxygenase|Enzyme converting arachidonic acid into PGH₂]]; supplies housekeeping prostanoids for gastric protection, renal perfusion and platelet TXA₂.",
            Self::Cox2 => "Inducible [[cyclooxygenase|Enzyme converting arachidonic acid into PGH₂]] upregulated at sites of inflammation; also the main source of vascular PGI₂.",
            Self::Pgh2 => "Unstable endoperoxide intermediate converted by tissue-specific synthases into the individual prostanoids.",
            Self::Pge2 => "Drives [[vasodilation|Widening of blood vessels]], pain sensitisation and fever via the [[hypothalamus|Brain region controlling temperature]]; protects the gastric mucosa.",
            Self::Pgi2 => "Endothelial prostanoid that dilates vessels and inhibits platelet aggregation.",
            Self::Txa2 => "Platelet-derived prostanoid that promotes [[platelet aggregation|Platelet clumping]] and vasoconstriction.",
            Self::Pgf2a => "Contracts uterine smooth muscle and contributes to bronchoconstriction.",
            Self::Lox5 => "[[5-lipoxygenase|Enzyme converting arachidonic acid into leukotrienes]], activated with its partner protein FLAP in leukocytes.",
            Self::Lta4 => "Unstable leukotriene precursor converted into LTB₄ or the cysteinyl leukotrienes.",
            Self::Ltb4 => "Potent [[chemoattractant|Substance attracting cells]] for neutrophils.",
            Self::CysLts => "LTC₄, LTD₄ and LTE₄: cause [[bronchoconstriction|Narrowing of airways]], mucus secretion and vascular leak.",
            Self::CysLt1Receptor => "Receptor through which cysteinyl leukotrienes constrict airways; the target of leukotriene receptor antagonists.",
            Self::Lipoxins => "[[Pro-resolving|Promoting the resolution of inflammation]] lipid mediators that help switch off inflammation.",
            Self::Cyp450 => "Epoxygenases and ω-hydroxylases that form EETs and 20-HETE.",
            Self::Eets => "[[Epoxyeicosatrienoic acids|Generally vasodilatory CYP450 products]] with anti-inflammatory actions.",
            Self::Hete20 => "[[20-Hydroxyeicosatetraenoic acid|A CYP450 product, often vasoconstricting]] that raises vascular tone.",
            Self::Beta1Receptor => "Cardiac adrenergic receptor raising heart rate, contractility and renin release.",
            Self::Beta2Receptor => "Adrenergic receptor relaxing bronchial and vascular smooth muscle.",
            Self::Ace => "[[Angiotensin-converting enzyme|Converts angiotensin I to angiotensin II and degrades bradykinin]].",
            Self::AngiotensinII => "Potent vasoconstrictor that also stimulates aldosterone release.",
            Self::LTypeCaChannel => "Voltage-gated calcium channel driving contraction of vascular smooth muscle and myocardium.",
        }
    }

    /// Looks a node up by its renderer element id.
    ///
    /// # Errors
    ///
    /// Returns `LookupMiss` if no node uses `element_id`.
    pub fn from_element_id(element_id: &str) -> Result<Self, LookupMiss> {
        Self::ALL
            .into_iter()
            .find(|n| n.element_id() == element_id)
            .ok_or_else(|| LookupMiss::new(LookupKind::Node, element_id))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

impl FromStr for NodeId {
    type Err = LookupMiss;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_element_id(s)
    }
}
