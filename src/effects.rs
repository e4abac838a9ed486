//! Drug effect table.
//!
//! Declarative data: for every drug, the nodes it inhibits or blocks and the
//! readouts it changes relative to the untreated triggered cascade. The
//! table carries no logic beyond lookup and validation; projection lives in
//! [`crate::projector`].

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::drug::DrugId;
use crate::error::{CascadeResult, ValidationError};
use crate::node::NodeId;
use crate::readout::{ReadoutKey, ReadoutState, StatusClass};
use crate::rich_text::RichText;

/// One readout a drug changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadoutOverride {
    /// Readout being overridden.
    pub readout: ReadoutKey,
    /// Value shown while the drug is active.
    #[serde(flatten)]
    pub state: ReadoutState,
}

/// Everything one drug does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugEffectSpec {
    /// Drug described.
    pub drug: DrugId,
    /// Enzymes inhibited.
    #[serde(default)]
    pub inhibited_enzymes: Vec<NodeId>,
    /// Mediators, receptors or channels blocked.
    #[serde(default)]
    pub blocked_mediators: Vec<NodeId>,
    /// Readouts that differ from the untreated triggered cascade.
    #[serde(default)]
    pub readouts: Vec<ReadoutOverride>,
}

impl DrugEffectSpec {
    /// Override for `key`, if this drug changes it.
    #[must_use]
    pub fn override_for(&self, key: ReadoutKey) -> Option<&ReadoutState> {
        self.readouts
            .iter()
            .find(|o| o.readout == key)
            .map(|o| &o.state)
    }

    /// Union of inhibited enzymes and blocked mediators.
    #[must_use]
    pub fn inhibition_set(&self) -> BTreeSet<NodeId> {
        self.inhibited_enzymes
            .iter()
            .chain(&self.blocked_mediators)
            .copied()
            .collect()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = BTreeSet::new();
        for o in &self.readouts {
            if !seen.insert(o.readout) {
                return Err(ValidationError::DuplicateOverride {
                    drug: self.drug.to_string(),
                    readout: o.readout.to_string(),
                });
            }
            if !o.readout.permits(o.state.status) {
                return Err(ValidationError::StatusNotPermitted {
                    readout: o.readout.to_string(),
                    status: o.state.status.to_string(),
                });
            }
            let field = format!("{}.{}", self.drug, o.readout);
            if o.state.status_text.trim().is_empty() {
                return Err(ValidationError::EmptyText {
                    field: format!("{field}.status_text"),
                });
            }
            if o.state.explanation.trim().is_empty() {
                return Err(ValidationError::EmptyText {
                    field: format!("{field}.explanation"),
                });
            }
            RichText::parse_field(&field, &o.state.explanation)?;
        }
        Ok(())
    }
}

/// On-disk shape of a table, before validation.
#[derive(Debug, Deserialize)]
struct TableFile {
    drugs: Vec<DrugEffectSpec>,
}

/// Effect specs for every drug, indexed by [`DrugId`].
///
/// Always complete: every constructor, including deserialization, validates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableFile")]
pub struct DrugEffectTable {
    drugs: Vec<DrugEffectSpec>,
}

impl TryFrom<TableFile> for DrugEffectTable {
    type Error = ValidationError;

    fn try_from(file: TableFile) -> Result<Self, Self::Error> {
        Self::from_specs(file.drugs)
    }
}

impl Default for DrugEffectTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DrugEffectTable {
    /// The shipped table.
    #[must_use]
    pub fn builtin() -> Self {
        let drugs = BUILTIN
            .iter()
            .map(|raw| DrugEffectSpec {
                drug: raw.drug,
                inhibited_enzymes: raw.enzymes.to_vec(),
                blocked_mediators: raw.mediators.to_vec(),
                readouts: raw
                    .readouts
                    .iter()
                    .map(|&(readout, text, status, explanation)| ReadoutOverride {
                        readout,
                        state: ReadoutState::new(text, status, explanation),
                    })
                    .collect(),
            })
            .collect();
        Self { drugs }
    }

    /// Builds a table from specs, validating completeness and contents.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if a drug is missing or duplicated, or a
    /// spec fails validation.
    pub fn from_specs(mut specs: Vec<DrugEffectSpec>) -> Result<Self, ValidationError> {
        specs.sort_by_key(|s| s.drug);
        for pair in specs.windows(2) {
            if pair[0].drug == pair[1].drug {
                return Err(ValidationError::DuplicateDrug {
                    drug: pair[0].drug.to_string(),
                });
            }
        }
        for drug in DrugId::ALL {
            if !specs.iter().any(|s| s.drug == drug) {
                return Err(ValidationError::MissingDrug {
                    drug: drug.to_string(),
                });
            }
        }
        for spec in &specs {
            spec.validate()?;
        }
        Ok(Self { drugs: specs })
    }

    /// Parses and validates a table from JSON.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed JSON, or a validation error.
    pub fn from_json(json: &str) -> CascadeResult<Self> {
        let file: TableFile = serde_json::from_str(json)?;
        Ok(Self::from_specs(file.drugs)?)
    }

    /// Reads, parses and validates a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an I/O, parse or validation error.
    pub fn from_path(path: &Path) -> CascadeResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Validates the table in place.
    ///
    /// # Errors
    ///
    /// See [`DrugEffectTable::from_specs`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        Self::from_specs(self.drugs.clone()).map(|_| ())
    }

    /// Spec for `drug`.
    #[must_use]
    pub fn spec(&self, drug: DrugId) -> &DrugEffectSpec {
        // Sorted and complete after construction, so the index is the ordinal.
        &self.drugs[drug as usize]
    }

    /// All specs, in [`DrugId::ALL`] order.
    #[must_use]
    pub fn specs(&self) -> &[DrugEffectSpec] {
        &self.drugs
    }
}

type RawOverride = (ReadoutKey, &'static str, StatusClass, &'static str);

struct RawSpec {
    drug: DrugId,
    enzymes: &'static [NodeId],
    mediators: &'static [NodeId],
    readouts: &'static [RawOverride],
}

use NodeId as N;
use ReadoutKey as R;
use StatusClass as S;

const BUILTIN: [RawSpec; 9] = [
    RawSpec {
        drug: DrugId::Nsaid,
        enzymes: &[N::Cox1, N::Cox2],
        mediators: &[N::Pgh2, N::Pge2, N::Pgi2, N::Txa2, N::Pgf2a],
        readouts: &[
            (R::InflammationVasc, "Reduced", S::Reduced, "Less [[PGE₂|Prostaglandin E₂]] and [[PGI₂|Prostacyclin]] means less vasodilation and oedema; leukotriene-driven leak persists."),
            (R::InflammationLeuk, "Increased", S::Increased, "COX blockade leaves [[LTB₄|Leukotriene B₄]] untouched; [[substrate shunting|Diversion of arachidonic acid into the LOX branch when COX is blocked]] may even raise it."),
            (R::Resolution, "Impaired", S::Impaired, "Prostaglandin-driven [[class switching|The shift from pro-inflammatory to pro-resolving mediator production]] toward lipoxins is delayed."),
            (R::Cns, "Reduced", S::Reduced, "Less [[PGE₂|Prostaglandin E₂]] in the [[hypothalamus|Brain region controlling temperature]] and at nerve endings: antipyretic and analgesic."),
            (R::Platelets, "Reduced", S::Reduced, "Reversible blockade of platelet [[COX-1|Cyclooxygenase-1]] transiently lowers [[TXA₂|Thromboxane A₂, pro-aggregatory]]."),
            (R::Bronchi, "Constricted", S::Constricted, "[[Substrate shunting|Diversion of arachidonic acid into the LOX branch]] toward [[CysLTs|Cysteinyl Leukotrienes]] can worsen bronchoconstriction in [[AERD|Aspirin-exacerbated respiratory disease]]."),
            (R::CvTone, "Vasoconstricted", S::Vasoconstricted, "Loss of vasodilating [[PGs|Prostaglandins]] and renal salt retention can raise blood pressure."),
            (R::Stomach, "Impaired", S::Impaired, "Loss of [[COX-1|Cyclooxygenase-1]] [[cytoprotective|Protecting cells from damage]] prostaglandins reduces mucus and bicarbonate: ulcer risk."),
            (R::Kidney, "Impaired", S::Impaired, "Loss of [[renal prostanoids|Prostaglandins maintaining renal blood flow]] can reduce filtration and cause salt and water retention."),
            (R::Uterus, "Relaxed", S::Relaxed, "Less [[PGF₂α|Prostaglandin F₂ alpha, causes uterine contraction]] and PGE₂ reduces contractions (used for [[dysmenorrhoea|Painful menstruation]])."),
        ],
    },
    RawSpec {
        drug: DrugId::Cox2i,
        enzymes: &[N::Cox2],
        mediators: &[N::Pge2, N::Pgi2],
        readouts: &[
            (R::InflammationVasc, "Reduced", S::Reduced, "Inflammatory [[COX-2|Cyclooxygenase-2]] derived [[PGE₂|Prostaglandin E₂]] falls: less vasodilation and swelling."),
            (R::Cns, "Reduced", S::Reduced, "Less inducible [[PGE₂|Prostaglandin E₂]] relieves pain and fever."),
            (R::Platelets, "Mildly Increased", S::IncreasedMild, "Platelet [[TXA₂|Thromboxane A₂]] (COX-1) is untouched while endothelial [[PGI₂|Prostacyclin, anti-aggregatory]] falls: a prothrombotic tilt."),
            (R::CvTone, "Vasoconstricted", S::Vasoconstricted, "Unopposed [[TXA₂|Thromboxane A₂]] and reduced [[PGI₂|Prostacyclin]] shift tone toward constriction: raised cardiovascular risk."),
            (R::Stomach, "Normal", S::Normal, "[[COX-1|Cyclooxygenase-1]] gastric protection is largely spared."),
            (R::Kidney, "Impaired", S::Impaired, "[[COX-2|Cyclooxygenase-2]] is constitutive in the kidney: salt retention and reduced filtration still occur."),
            (R::Uterus, "Reduced", S::Reduced, "Less inducible [[PG|Prostaglandin]] production lowers uterine contractility."),
        ],
    },
    RawSpec {
        drug: DrugId::Aspirin,
        enzymes: &[N::Cox1],
        mediators: &[N::Txa2],
        readouts: &[
            (R::Resolution, "Promoted", S::Promoted, "Acetylated COX-2 produces [[aspirin-triggered lipoxins|15-epi-lipoxins, pro-resolving mediators]]."),
            (R::Platelets, "Strongly Reduced", S::ReducedStrong, "Irreversible [[COX-1|Cyclooxygenase-1]] acetylation in platelets, which cannot resynthesise the enzyme, abolishes [[TXA₂|Thromboxane A₂]] for 7 to 10 days."),
            (R::Bronchi, "Constricted", S::Constricted, "Can precipitate bronchospasm in [[AERD|Aspirin-exacerbated respiratory disease]] via shunting to [[CysLTs|Cysteinyl Leukotrienes]]."),
            (R::CvTone, "Mixed", S::Mixed, "[[TXA₂|Thromboxane A₂]] driven constriction falls while endothelial [[PGI₂|Prostacyclin]] recovers between doses: net antithrombotic."),
            (R::Stomach, "Impaired", S::Impaired, "Even low doses reduce [[COX-1|Cyclooxygenase-1]] gastric protection: bleeding risk."),
        ],
    },
    RawSpec {
        drug: DrugId::Csteroid,
        enzymes: &[N::Pla2, N::Cox2],
        mediators: &[N::ArachidonicAcid],
        readouts: &[
            (R::InflammationVasc, "Strongly Reduced", S::ReducedStrong, "Less [[arachidonic acid|Substrate of all eicosanoid branches]] release and COX-2 induction suppress prostaglandins and leukotrienes alike."),
            (R::InflammationLeuk, "Strongly Reduced", S::ReducedStrong, "[[LTB₄|Leukotriene B₄]] falls and [[cytokine|Signalling proteins of the immune system]] genes are repressed: leukocyte recruitment drops."),
            (R::Resolution, "Promoted", S::Promoted, "[[Annexin-1|A glucocorticoid-induced protein that restrains PLA₂]] is itself pro-resolving."),
            (R::Cns, "Reduced", S::Reduced, "Less [[PGE₂|Prostaglandin E₂]] relieves inflammatory pain and fever."),
            (R::Bronchi, "Normal", S::Normal, "Less [[CysLT|Cysteinyl Leukotrienes]] production and calmer airway inflammation relieve bronchoconstriction."),
            (R::Stomach, "Reduced", S::Reduced, "Modest gastric risk alone; markedly raised in combination with NSAIDs."),
        ],
    },
    RawSpec {
        drug: DrugId::Loxi,
        enzymes: &[N::Lox5],
        mediators: &[N::Lta4, N::Ltb4, N::CysLts, N::Lipoxins],
        readouts: &[
            (R::InflammationVasc, "Reduced", S::Reduced, "[[CysLT|Cysteinyl Leukotrienes]] driven leak falls; prostaglandin vasodilation persists."),
            (R::InflammationLeuk, "Reduced", S::Reduced, "No [[LTB₄|Leukotriene B₄]]: [[neutrophil|A type of white blood cell]] recruitment falls."),
            (R::Resolution, "Reduced", S::Reduced, "[[5-LOX|5-Lipoxygenase]] is also needed to make [[lipoxins|Anti-inflammatory lipid mediators]]: pro-resolving output falls."),
            (R::Bronchi, "Dilated", S::Dilated, "No [[CysLTs|Cysteinyl Leukotrienes]]: [[bronchoconstriction|Narrowing of airways]] is relieved."),
        ],
    },
    RawSpec {
        drug: DrugId::Ltra,
        enzymes: &[],
        mediators: &[N::CysLt1Receptor],
        readouts: &[
            (R::InflammationVasc, "Reduced", S::Reduced, "[[CysLT|Cysteinyl Leukotrienes]] mediated vascular leak is blocked at the receptor."),
            (R::Bronchi, "Dilated", S::Dilated, "[[CysLT₁|Cysteinyl leukotriene receptor 1]] blockade prevents leukotriene bronchoconstriction even though CysLTs are still made."),
        ],
    },
    RawSpec {
        drug: DrugId::BetaBlocker,
        enzymes: &[],
        mediators: &[N::Beta1Receptor, N::Beta2Receptor],
        readouts: &[
            (R::Bronchi, "Constricted", S::Constricted, "Blocking bronchial [[β₂ receptors|Adrenergic receptors relaxing airway smooth muscle]] removes adrenergic bronchodilation: hazardous in asthma."),
            (R::CvTone, "Reduced", S::Reduced, "Lower heart rate, contractility and [[renin|Kidney enzyme that starts angiotensin production]] release reduce cardiac output and blood pressure."),
        ],
    },
    RawSpec {
        drug: DrugId::AceInhibitor,
        enzymes: &[N::Ace],
        mediators: &[N::AngiotensinII],
        readouts: &[
            (R::CvTone, "Vasodilated", S::Vasodilated, "Less [[angiotensin II|A potent vasoconstrictor]] and more [[bradykinin|A vasodilator peptide degraded by ACE]], which also stimulates PGI₂ release."),
            (R::Kidney, "Reduced", S::Reduced, "Efferent arteriolar dilation lowers filtration pressure; combined with NSAIDs this risks [[acute kidney injury|A sudden fall in kidney function]]."),
        ],
    },
    RawSpec {
        drug: DrugId::Ccb,
        enzymes: &[],
        mediators: &[N::LTypeCaChannel],
        readouts: &[
            (R::CvTone, "Vasodilated", S::Vasodilated, "Reduced [[Ca²⁺|Calcium ions]] entry relaxes arterial smooth muscle."),
            (R::Uterus, "Relaxed", S::Relaxed, "Calcium channel blockade relaxes uterine smooth muscle ([[tocolysis|Suppression of premature labour]])."),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        DrugEffectTable::builtin().validate().unwrap();
    }

    #[test]
    fn test_spec_index_matches_drug() {
        let table = DrugEffectTable::builtin();
        for drug in DrugId::ALL {
            assert_eq!(table.spec(drug).drug, drug);
        }
    }

    #[test]
    fn test_nsaid_overrides() {
        let table = DrugEffectTable::builtin();
        let nsaid = table.spec(DrugId::Nsaid);
        assert_eq!(nsaid.override_for(ReadoutKey::Platelets).unwrap().status, StatusClass::Reduced);
        assert_eq!(
            nsaid.override_for(ReadoutKey::Bronchi).unwrap().status,
            StatusClass::Constricted
        );
        assert!(nsaid.inhibition_set().contains(&NodeId::Cox1));
        assert!(nsaid.inhibition_set().contains(&NodeId::Txa2));
    }

    #[test]
    fn test_loxi_leaves_cns_alone() {
        let table = DrugEffectTable::builtin();
        assert!(table.spec(DrugId::Loxi).override_for(ReadoutKey::Cns).is_none());
    }

    #[test]
    fn test_ltra_inhibits_no_enzyme() {
        let table = DrugEffectTable::builtin();
        let ltra = table.spec(DrugId::Ltra);
        assert!(ltra.inhibited_enzymes.is_empty());
        assert_eq!(ltra.inhibition_set().len(), 1);
    }

    #[test]
    fn test_json_round_trip_preserves_table() {
        let table = DrugEffectTable::builtin();
        let json = serde_json::to_string(&table).unwrap();
        let parsed = DrugEffectTable::from_json(&json).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_reject_missing_drug() {
        let mut specs = DrugEffectTable::builtin().specs().to_vec();
        specs.retain(|s| s.drug != DrugId::Ccb);
        let err = DrugEffectTable::from_specs(specs).unwrap_err();
        assert_eq!(err, ValidationError::MissingDrug { drug: "ccb".to_string() });
    }

    #[test]
    fn test_reject_duplicate_drug() {
        let mut specs = DrugEffectTable::builtin().specs().to_vec();
        specs.push(specs[0].clone());
        let err = DrugEffectTable::from_specs(specs).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateDrug { .. }));
    }

    #[test]
    fn test_reject_status_not_permitted() {
        let mut specs = DrugEffectTable::builtin().specs().to_vec();
        specs[0].readouts[0] = ReadoutOverride {
            readout: ReadoutKey::Bronchi,
            state: ReadoutState::with_default_text(StatusClass::Balanced, "x"),
        };
        let err = DrugEffectTable::from_specs(specs).unwrap_err();
        assert!(matches!(err, ValidationError::StatusNotPermitted { .. }));
    }

    #[test]
    fn test_reject_duplicate_override() {
        let mut specs = DrugEffectTable::builtin().specs().to_vec();
        let first = specs[0].readouts[0].clone();
        specs[0].readouts.push(first);
        let err = DrugEffectTable::from_specs(specs).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateOverride { .. }));
    }

    #[test]
    fn test_reject_empty_explanation() {
        let mut specs = DrugEffectTable::builtin().specs().to_vec();
        specs[2].readouts[0].state.explanation = "  ".to_string();
        let err = DrugEffectTable::from_specs(specs).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyText { .. }));
    }

    #[test]
    fn test_from_path_reads_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("effects.json");
        let json = serde_json::to_string_pretty(&DrugEffectTable::builtin()).unwrap();
        std::fs::write(&path, json).unwrap();

        let table = DrugEffectTable::from_path(&path).unwrap();
        assert_eq!(table.specs().len(), DrugId::ALL.len());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = DrugEffectTable::from_json("{\"drugs\": 3}").unwrap_err();
        assert!(!err.is_validation());
    }
}
