//! Drug identifiers and controls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LookupKind, LookupMiss};

/// A drug class the user can apply.
///
/// # Examples
///
/// ```
/// use aacascade::DrugId;
///
/// let drug: DrugId = "betaBlocker".parse().unwrap();
/// assert_eq!(drug.control_id(), "drug-beta-blocker");
/// ```
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrugId {
    Nsaid,
    Cox2i,
    Aspirin,
    Csteroid,
    Loxi,
    Ltra,
    BetaBlocker,
    AceInhibitor,
    Ccb,
}

impl DrugId {
    /// Every drug, in control panel order.
    pub const ALL: [Self; 9] = [
        Self::Nsaid,
        Self::Cox2i,
        Self::Aspirin,
        Self::Csteroid,
        Self::Loxi,
        Self::Ltra,
        Self::BetaBlocker,
        Self::AceInhibitor,
        Self::Ccb,
    ];

    /// Wire key (`nsaid`, `betaBlocker`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nsaid => "nsaid",
            Self::Cox2i => "cox2i",
            Self::Aspirin => "aspirin",
            Self::Csteroid => "csteroid",
            Self::Loxi => "loxi",
            Self::Ltra => "ltra",
            Self::BetaBlocker => "betaBlocker",
            Self::AceInhibitor => "aceInhibitor",
            Self::Ccb => "ccb",
        }
    }

    /// Renderer id of the control that applies this drug.
    #[must_use]
    pub const fn control_id(self) -> &'static str {
        match self {
            Self::Nsaid => "drug-nsaid",
            Self::Cox2i => "drug-cox2i",
            Self::Aspirin => "drug-aspirin",
            Self::Csteroid => "drug-csteroid",
            Self::Loxi => "drug-loxi",
            Self::Ltra => "drug-ltra",
            Self::BetaBlocker => "drug-beta-blocker",
            Self::AceInhibitor => "drug-ace-inhibitor",
            Self::Ccb => "drug-ccb",
        }
    }

    /// Control label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nsaid => "NSAID (e.g., Ibuprofen)",
            Self::Cox2i => "COX-2 Inhibitor (e.g., Celecoxib)",
            Self::Aspirin => "Low-dose Aspirin",
            Self::Csteroid => "Corticosteroid (e.g., Prednisolone)",
            Self::Loxi => "5-LOX Inhibitor (e.g., Zileuton)",
            Self::Ltra => "LTRA (e.g., Montelukast)",
            Self::BetaBlocker => "Beta-blocker (e.g., Propranolol)",
            Self::AceInhibitor => "ACE Inhibitor (e.g., Ramipril)",
            Self::Ccb => "Calcium Channel Blocker (e.g., Amlodipine)",
        }
    }

    /// Static tooltip blurb for the control, in term markup.
    #[must_use]
    pub const fn info(self) -> &'static str {
        match self {
            Self::Nsaid => "Non-selective, reversible inhibitor of [[COX-1|Cyclooxygenase-1]] and [[COX-2|Cyclooxygenase-2]]. Reduces prostaglandin-driven pain, fever and inflammation at the cost of gastric and renal prostanoids.",
            Self::Cox2i => "Selective [[COX-2|Cyclooxygenase-2]] inhibitor. Spares COX-1 gastric protection but lowers vascular PGI₂ while platelet TXA₂ persists.",
            Self::Aspirin => "Irreversibly acetylates [[COX-1|Cyclooxygenase-1]] in anucleate platelets, abolishing [[TXA₂|Thromboxane A₂]] for the platelet's lifespan.",
            Self::Csteroid => "Induces [[annexin-1|A glucocorticoid-induced protein that restrains PLA₂]] and suppresses COX-2 expression, damping every downstream branch.",
            Self::Loxi => "Blocks [[5-LOX|5-Lipoxygenase]], preventing formation of LTB₄ and the cysteinyl leukotrienes.",
            Self::Ltra => "Antagonises the [[CysLT₁ receptor|Receptor mediating leukotriene bronchoconstriction]] without changing leukotriene synthesis.",
            Self::BetaBlocker => "Blocks [[β-adrenergic receptors|Receptors for adrenaline and noradrenaline]]. Non-selective agents also block bronchial β₂ receptors.",
            Self::AceInhibitor => "Inhibits [[ACE|Angiotensin-converting enzyme]], lowering angiotensin II and raising bradykinin.",
            Self::Ccb => "Blocks [[L-type calcium channels|Voltage-gated channels driving smooth muscle contraction]] in vascular smooth muscle.",
        }
    }

    /// Looks a drug up by the id of its control.
    ///
    /// # Errors
    ///
    /// Returns `LookupMiss` if no drug uses `control_id`.
    pub fn from_control_id(control_id: &str) -> Result<Self, LookupMiss> {
        Self::ALL
            .into_iter()
            .find(|d| d.control_id() == control_id)
            .ok_or_else(|| LookupMiss::new(LookupKind::Drug, control_id))
    }
}

impl fmt::Display for DrugId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrugId {
    type Err = LookupMiss;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| LookupMiss::new(LookupKind::Drug, s))
    }
}

/// The drug slot of the simulation state.
///
/// `None` and `Untreated` are distinct: the first means nothing was
/// selected because the cascade is idle, the second means the cascade was
/// triggered and no drug has been applied yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "drug", rename_all = "snake_case")]
pub enum ActiveDrug {
    /// Nothing selected (idle).
    #[default]
    None,
    /// Triggered, no drug applied.
    Untreated,
    /// A drug is applied.
    Applied(DrugId),
}

impl ActiveDrug {
    /// Returns the applied drug, if any.
    #[must_use]
    pub const fn drug(self) -> Option<DrugId> {
        match self {
            Self::Applied(drug) => Some(drug),
            Self::None | Self::Untreated => None,
        }
    }
}

impl fmt::Display for ActiveDrug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Untreated => f.write_str("untreated"),
            Self::Applied(drug) => write!(f, "{drug}"),
        }
    }
}
