//! Explanation catalog.
//!
//! Static baseline and triggered-state explanations per readout. Drug
//! specific explanations live with the drug effect table.

use serde::{Deserialize, Serialize};

use crate::readout::ReadoutKey;

/// Which generic explanation set to read.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationSet {
    /// No stimulus applied.
    Baseline,
    /// Stimulus applied, no drug.
    Triggered,
}

const BASELINE: [&str; 10] = [
    "No inflammatory stimulus active. [[Vascular|Blood vessels]] tone is normal.",
    "No significant [[leukocyte|White blood cells involved in immunity]] recruitment or activation.",
    "No ongoing [[inflammation|The body's response to injury or infection]] to resolve.",
    "Baseline [[CNS|Central Nervous System (brain and spinal cord)]] activity; normal temperature and pain thresholds.",
    "Normal baseline [[platelet|Small blood cells crucial for clotting]] activity.",
    "Normal baseline [[bronchial|Airways in the lungs]] tone.",
    "Balanced baseline [[cardiovascular|Related to the heart and blood vessels]] tone.",
    "Normal [[gastric protective mechanisms|Mechanisms that protect the stomach lining from acid and damage, often involving prostaglandins]].",
    "Normal baseline [[kidney function|Function of the kidneys in filtering blood and producing urine]].",
    "Baseline [[uterine tone|Muscle tone of the uterus]].",
];

const TRIGGERED: [&str; 10] = [
    "Stimulus causes release of [[vasodilating|Widening of blood vessels]] [[PGs|Prostaglandins, a class of eicosanoids]] ([[PGE₂|Prostaglandin E₂]], [[PGI₂|Prostacyclin or PGI₂]]) & [[CysLTs|Cysteinyl Leukotrienes (LTC₄, LTD₄, LTE₄)]], increasing [[permeability|How easily fluids/cells pass through vessel walls]].",
    "Stimulus causes [[LTB₄|Leukotriene B₄, a potent chemoattractant]] release, a potent [[neutrophil|A type of white blood cell]] [[chemoattractant|Substance attracting cells]].",
    "[[Pro-inflammatory|Promoting inflammation]] signals initially dominate over [[pro-resolving|Promoting the resolution of inflammation]] pathways (e.g., [[Lipoxins|Anti-inflammatory lipid mediators]]).",
    "Stimulus triggers [[PGE₂|Prostaglandin E₂]] synthesis affecting [[hypothalamus|Brain region controlling temperature]] (fever) and [[nerve endings|Nerve endings that sense pain]] (pain).",
    "Stimulus may slightly alter [[platelet aggregation|Platelet clumping]] balance between [[TXA₂|Thromboxane A₂, pro-aggregatory]] & [[PGI₂|Prostacyclin, anti-aggregatory]].",
    "Stimulus triggers [[CysLT|Cysteinyl Leukotrienes]] release, causing [[bronchoconstriction|Narrowing of airways]].",
    "Complex mix: Vasodilating [[PGs|Prostaglandins]]/[[EETs|Epoxyeicosatrienoic acids, generally vasodilatory]] vs Vasoconstricting [[TXA₂|Thromboxane A₂]]/[[20-HETE|20-Hydroxyeicosatetraenoic acid, often vasoconstricting]].",
    "Baseline [[gastric protection|Stomach lining protection]] via [[COX-1|Cyclooxygenase-1]] derived [[PGs|Prostaglandins]] may be initially overwhelmed or later affected.",
    "Baseline function maintained, but changes in [[renal prostanoids|Prostaglandins, important for renal blood flow and function]] begin.",
    "Stimulus triggers [[PG|Prostaglandins]] release ([[PGE₂|Prostaglandin E₂]]/[[PGF₂α|Prostaglandin F₂ alpha, causes uterine contraction]]) increasing tone/[[contractions|Muscle tightening]].",
];

/// Generic explanations for the idle and untreated triggered phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationCatalog {
    baseline: Vec<String>,
    triggered: Vec<String>,
}

impl Default for ExplanationCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ExplanationCatalog {
    /// The shipped catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            baseline: BASELINE.iter().map(ToString::to_string).collect(),
            triggered: TRIGGERED.iter().map(ToString::to_string).collect(),
        }
    }

    /// Builds a catalog from explicit entries, indexed by [`ReadoutKey::index`].
    ///
    /// Missing or empty entries fall back to generic text on lookup.
    #[must_use]
    pub fn from_entries(baseline: Vec<String>, triggered: Vec<String>) -> Self {
        Self {
            baseline,
            triggered,
        }
    }

    /// Explanation for `key` in the given set.
    ///
    /// Never fails: a missing entry yields the generic phase text.
    #[must_use]
    pub fn get(&self, set: ExplanationSet, key: ReadoutKey) -> &str {
        let (entries, fallback) = match set {
            ExplanationSet::Baseline => (&self.baseline, "Baseline state."),
            ExplanationSet::Triggered => (&self.triggered, "Triggered state."),
        };
        match entries.get(key.index()) {
            Some(text) if !text.is_empty() => text,
            _ => {
                tracing::warn!(readout = %key, ?set, "explanation missing, using fallback");
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rich_text::RichText;

    #[test]
    fn test_every_key_has_both_texts() {
        let catalog = ExplanationCatalog::builtin();
        for key in ReadoutKey::ALL {
            assert!(!catalog.get(ExplanationSet::Baseline, key).is_empty());
            assert!(!catalog.get(ExplanationSet::Triggered, key).is_empty());
        }
    }

    #[test]
    fn test_builtin_markup_is_well_formed() {
        let catalog = ExplanationCatalog::builtin();
        for key in ReadoutKey::ALL {
            for set in [ExplanationSet::Baseline, ExplanationSet::Triggered] {
                RichText::parse(catalog.get(set, key)).unwrap();
            }
        }
    }

    #[test]
    fn test_bronchi_triggered_mentions_cysteinyl_leukotrienes() {
        let catalog = ExplanationCatalog::builtin();
        let text = RichText::parse(catalog.get(ExplanationSet::Triggered, ReadoutKey::Bronchi)).unwrap();
        assert_eq!(text.term(0).unwrap().label, "CysLT");
    }

    #[test]
    fn test_missing_entry_falls_back() {
        let catalog = ExplanationCatalog::from_entries(Vec::new(), vec![String::new()]);
        assert_eq!(catalog.get(ExplanationSet::Baseline, ReadoutKey::Cns), "Baseline state.");
        assert_eq!(
            catalog.get(ExplanationSet::Triggered, ReadoutKey::InflammationVasc),
            "Triggered state."
        );
    }
}
