//! Readout registry.
//!
//! A readout is one observable physiological effect slot the simulation
//! reports on. The set of readouts is closed, and each readout accepts only
//! a small, fixed set of status classes so that no arbitrary string ever
//! reaches the renderer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LookupKind, LookupMiss};
use crate::rich_text::RichText;

/// Identifier of a physiological readout.
///
/// # Examples
///
/// ```
/// use aacascade::ReadoutKey;
///
/// let key: ReadoutKey = "cvTone".parse().unwrap();
/// assert_eq!(key, ReadoutKey::CvTone);
/// assert_eq!(key.label(), "Cardiovascular Tone");
/// ```
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadoutKey {
    InflammationVasc,
    InflammationLeuk,
    Resolution,
    Cns,
    Platelets,
    Bronchi,
    CvTone,
    Stomach,
    Kidney,
    Uterus,
}

impl ReadoutKey {
    /// Every readout, in panel order.
    pub const ALL: [Self; 10] = [
        Self::InflammationVasc,
        Self::InflammationLeuk,
        Self::Resolution,
        Self::Cns,
        Self::Platelets,
        Self::Bronchi,
        Self::CvTone,
        Self::Stomach,
        Self::Kidney,
        Self::Uterus,
    ];

    /// Position of this key in [`ReadoutKey::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wire name (`inflammationVasc`, `cvTone`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InflammationVasc => "inflammationVasc",
            Self::InflammationLeuk => "inflammationLeuk",
            Self::Resolution => "resolution",
            Self::Cns => "cns",
            Self::Platelets => "platelets",
            Self::Bronchi => "bronchi",
            Self::CvTone => "cvTone",
            Self::Stomach => "stomach",
            Self::Kidney => "kidney",
            Self::Uterus => "uterus",
        }
    }

    /// Panel label, also used as the tooltip title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InflammationVasc => "Inflammation (Vascular)",
            Self::InflammationLeuk => "Inflammation (Leukocytes)",
            Self::Resolution => "Inflammation Resolution",
            Self::Cns => "Pain & Fever (CNS)",
            Self::Platelets => "Platelet Aggregation",
            Self::Bronchi => "Bronchial Tone",
            Self::CvTone => "Cardiovascular Tone",
            Self::Stomach => "Stomach Protection",
            Self::Kidney => "Kidney Function",
            Self::Uterus => "Uterine Tone",
        }
    }

    /// Status classes this readout may display.
    #[must_use]
    pub const fn permitted(self) -> &'static [StatusClass] {
        use StatusClass as S;
        match self {
            Self::InflammationVasc | Self::InflammationLeuk => &[
                S::Normal,
                S::Increased,
                S::IncreasedMild,
                S::Reduced,
                S::ReducedStrong,
                S::Suppressed,
            ],
            Self::Resolution => &[S::Normal, S::Suppressed, S::Reduced, S::Promoted, S::Impaired],
            Self::Cns => &[
                S::Normal,
                S::Increased,
                S::IncreasedMild,
                S::Reduced,
                S::ReducedStrong,
            ],
            Self::Platelets => &[
                S::Normal,
                S::Increased,
                S::IncreasedMild,
                S::Reduced,
                S::ReducedStrong,
                S::Mixed,
            ],
            Self::Bronchi => &[S::Normal, S::Constricted, S::Dilated, S::Mixed],
            Self::CvTone => &[
                S::Balanced,
                S::Mixed,
                S::Vasodilated,
                S::Vasoconstricted,
                S::Reduced,
            ],
            Self::Stomach | Self::Kidney => &[S::Normal, S::Impaired, S::Reduced],
            Self::Uterus => &[S::Normal, S::Increased, S::Reduced, S::Relaxed],
        }
    }

    /// Returns true if `status` may be shown on this readout.
    #[must_use]
    pub fn permits(self, status: StatusClass) -> bool {
        self.permitted().contains(&status)
    }
}

impl fmt::Display for ReadoutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadoutKey {
    type Err = LookupMiss;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| LookupMiss::new(LookupKind::Readout, s))
    }
}

/// Symbolic status of a readout.
///
/// Serialized as the CSS class the renderer applies (`status-normal`, ...).
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusClass {
    #[serde(rename = "status-normal")]
    Normal,
    #[serde(rename = "status-increased")]
    Increased,
    #[serde(rename = "status-increased-mild")]
    IncreasedMild,
    #[serde(rename = "status-reduced")]
    Reduced,
    #[serde(rename = "status-reduced-strong")]
    ReducedStrong,
    #[serde(rename = "status-suppressed")]
    Suppressed,
    #[serde(rename = "status-promoted")]
    Promoted,
    #[serde(rename = "status-constricted")]
    Constricted,
    #[serde(rename = "status-dilated")]
    Dilated,
    #[serde(rename = "status-mixed")]
    Mixed,
    #[serde(rename = "status-balanced")]
    Balanced,
    #[serde(rename = "status-vasodilated")]
    Vasodilated,
    #[serde(rename = "status-vasoconstricted")]
    Vasoconstricted,
    #[serde(rename = "status-impaired")]
    Impaired,
    #[serde(rename = "status-relaxed")]
    Relaxed,
}

impl StatusClass {
    /// CSS class name.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Normal => "status-normal",
            Self::Increased => "status-increased",
            Self::IncreasedMild => "status-increased-mild",
            Self::Reduced => "status-reduced",
            Self::ReducedStrong => "status-reduced-strong",
            Self::Suppressed => "status-suppressed",
            Self::Promoted => "status-promoted",
            Self::Constricted => "status-constricted",
            Self::Dilated => "status-dilated",
            Self::Mixed => "status-mixed",
            Self::Balanced => "status-balanced",
            Self::Vasodilated => "status-vasodilated",
            Self::Vasoconstricted => "status-vasoconstricted",
            Self::Impaired => "status-impaired",
            Self::Relaxed => "status-relaxed",
        }
    }

    /// Default human label for this status.
    #[must_use]
    pub const fn default_text(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Increased => "Increased",
            Self::IncreasedMild => "Mildly Increased",
            Self::Reduced => "Reduced",
            Self::ReducedStrong => "Strongly Reduced",
            Self::Suppressed => "Suppressed",
            Self::Promoted => "Promoted",
            Self::Constricted => "Constricted",
            Self::Dilated => "Dilated",
            Self::Mixed => "Mixed",
            Self::Balanced => "Balanced",
            Self::Vasodilated => "Vasodilated",
            Self::Vasoconstricted => "Vasoconstricted",
            Self::Impaired => "Impaired",
            Self::Relaxed => "Relaxed",
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// The value a readout displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadoutState {
    /// Human label (`"Reduced"`).
    pub status_text: String,
    /// Status class.
    pub status: StatusClass,
    /// Explanation in term markup.
    pub explanation: String,
}

impl ReadoutState {
    /// Creates a readout state.
    #[must_use]
    pub fn new(
        status_text: impl Into<String>,
        status: StatusClass,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            status_text: status_text.into(),
            status,
            explanation: explanation.into(),
        }
    }

    /// Creates a readout state labelled with the status' default text.
    #[must_use]
    pub fn with_default_text(status: StatusClass, explanation: impl Into<String>) -> Self {
        Self::new(status.default_text(), status, explanation)
    }

    /// Parses the explanation markup.
    #[must_use]
    pub fn explanation_text(&self) -> RichText {
        RichText::parse_lossy(&self.explanation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keys_indexed_in_order() {
        for (i, key) in ReadoutKey::ALL.into_iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn test_key_round_trips_through_str() {
        for key in ReadoutKey::ALL {
            assert_eq!(key.as_str().parse::<ReadoutKey>().unwrap(), key);
        }
        assert!("heart".parse::<ReadoutKey>().is_err());
    }

    #[test]
    fn test_key_serde_uses_wire_names() {
        let json = serde_json::to_string(&ReadoutKey::InflammationVasc).unwrap();
        assert_eq!(json, "\"inflammationVasc\"");
    }

    #[test]
    fn test_status_serializes_as_css_class() {
        for status in [StatusClass::Balanced, StatusClass::ReducedStrong, StatusClass::Vasoconstricted] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.css_class()));
        }
    }

    #[test]
    fn test_baseline_statuses_are_permitted() {
        for key in ReadoutKey::ALL {
            let idle = if key == ReadoutKey::CvTone {
                StatusClass::Balanced
            } else {
                StatusClass::Normal
            };
            assert!(key.permits(idle), "{key} must permit {idle}");
        }
        assert!(!ReadoutKey::Bronchi.permits(StatusClass::Balanced));
    }

    #[test]
    fn test_readout_state_default_text() {
        let state = ReadoutState::with_default_text(StatusClass::Constricted, "x");
        assert_eq!(state.status_text, "Constricted");
    }
}
