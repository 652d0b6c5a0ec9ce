// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

/// Finding severity, ordered from least to most serious.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warn,
    Fail,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed catalog of diagnostic finding codes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FindingCode {
    ThrottleClosure,
    ThrottleOk,
    Underboost,
    BoostOk,
    CompProtect,
    WgRange,
    WgSatClosed,
    WgPolarityUncertain,
    EmpRatio,
    EmpRatioRpm,
    FrpDrop,
    FrpOk,
    HpfpAtLimit,
    AfrMiss,
    AfrOk,
    Knock,
    AirchargeMiss,
    TrimsCruise,
    AfrCruiseVar,
}

impl FindingCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThrottleClosure => "THROTTLE_CLOSURE",
            Self::ThrottleOk => "THROTTLE_OK",
            Self::Underboost => "UNDERBOOST",
            Self::BoostOk => "BOOST_OK",
            Self::CompProtect => "COMP_PROTECT",
            Self::WgRange => "WG_RANGE",
            Self::WgSatClosed => "WG_SAT_CLOSED",
            Self::WgPolarityUncertain => "WG_POLARITY_UNCERTAIN",
            Self::EmpRatio => "EMP_RATIO",
            Self::EmpRatioRpm => "EMP_RATIO_RPM",
            Self::FrpDrop => "FRP_DROP",
            Self::FrpOk => "FRP_OK",
            Self::HpfpAtLimit => "HPFP_AT_LIMIT",
            Self::AfrMiss => "AFR_MISS",
            Self::AfrOk => "AFR_OK",
            Self::Knock => "KNOCK",
            Self::AirchargeMiss => "AIRCHARGE_MISS",
            Self::TrimsCruise => "TRIMS_CRUISE",
            Self::AfrCruiseVar => "AFR_CRUISE_VAR",
        }
    }

    /// Human-readable headline shown next to the finding.
    pub fn title(self) -> &'static str {
        match self {
            Self::ThrottleClosure => "Throttle closure during WOT",
            Self::ThrottleOk => "Throttle stayed open",
            Self::Underboost => "Underboost vs target",
            Self::BoostOk => "Boost tracking looks good",
            Self::CompProtect => "Turbo component protection may be limiting boost",
            Self::WgRange => "Wastegate position range",
            Self::WgSatClosed => "WG appears near closed extreme during underboost",
            Self::WgPolarityUncertain => "WG polarity may be inverted/uncertain",
            Self::EmpRatio => "EMP to boost ratio",
            Self::EmpRatioRpm => "EMP:Boost by RPM (median per bin)",
            Self::FrpDrop => "Fuel rail pressure not tracking target",
            Self::FrpOk => "Fuel rail pressure tracks well",
            Self::HpfpAtLimit => "HPFP control appears near its high end during FRP shortfall",
            Self::AfrMiss => "AFR not tracking commanded",
            Self::AfrOk => "AFR tracking looks good",
            Self::Knock => "Knock retard (worst cylinder)",
            Self::AirchargeMiss => "Air Charge not meeting desired",
            Self::TrimsCruise => "Fuel trims during steady cruise",
            Self::AfrCruiseVar => "AFR variability at cruise",
        }
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One evidence value: a number, a label, or a nested structure.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, PartialEq)]
pub enum EvidenceValue {
    Null,
    Number(f64),
    Text(String),
    List(Vec<EvidenceValue>),
    Map(Evidence),
}

impl EvidenceValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl From<f64> for EvidenceValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<usize> for EvidenceValue {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<Option<f64>> for EvidenceValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for EvidenceValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EvidenceValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<EvidenceValue>> for EvidenceValue {
    fn from(value: Vec<EvidenceValue>) -> Self {
        Self::List(value)
    }
}

impl From<Evidence> for EvidenceValue {
    fn from(value: Evidence) -> Self {
        Self::Map(value)
    }
}

/// Key-ordered evidence map attached to a [`Finding`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Evidence(BTreeMap<String, EvidenceValue>);

impl Evidence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<EvidenceValue>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&EvidenceValue> {
        self.0.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(EvidenceValue::as_number)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(EvidenceValue::as_text)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single diagnostic observation about a segment.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Finding {
    pub code: FindingCode,
    pub severity: Severity,
    pub title: String,
    pub detail: String,
    pub evidence: Evidence,
}

impl Finding {
    /// Creates a finding titled after its code.
    pub fn new(
        code: FindingCode,
        severity: Severity,
        detail: impl Into<String>,
        evidence: Evidence,
    ) -> Self {
        Self {
            code,
            severity,
            title: code.title().to_string(),
            detail: detail.into(),
            evidence,
        }
    }
}
