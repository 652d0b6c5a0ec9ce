// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::boost::BoostStats;
use logtool_core::stats::{difference, pearson};
use logtool_core::{Field, TableSlice};
use std::fmt;

const POLARITY_CORR_THRESHOLD: f64 = 0.2;

/// Best-effort reading of what a rising wastegate position means.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WgPolarity {
    #[cfg_attr(feature = "serde", serde(rename = "higher=more_open"))]
    HigherMoreOpen,
    #[cfg_attr(feature = "serde", serde(rename = "higher=more_closed"))]
    HigherMoreClosed,
    #[cfg_attr(feature = "serde", serde(rename = "unknown"))]
    Unknown,
}

impl WgPolarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HigherMoreOpen => "higher=more_open",
            Self::HigherMoreClosed => "higher=more_closed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WgPolarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infers wastegate polarity from its correlation with boost error.
///
/// More opening means less boost, so a gate position that rises together with
/// `target - actual` reads as "higher = more open". Missing channels, constant
/// series, or non-finite samples give [`WgPolarity::Unknown`].
pub fn infer_wg_polarity(slice: &TableSlice<'_>) -> WgPolarity {
    let Some([wg, target, actual]) = slice.columns([
        Field::WgPosAct,
        Field::BoostTargetPsi,
        Field::BoostActualPsi,
    ]) else {
        return WgPolarity::Unknown;
    };
    let err = difference(target, actual);
    match pearson(wg, &err) {
        Some(corr) if corr > POLARITY_CORR_THRESHOLD => WgPolarity::HigherMoreOpen,
        Some(corr) if corr < -POLARITY_CORR_THRESHOLD => WgPolarity::HigherMoreClosed,
        _ => WgPolarity::Unknown,
    }
}

/// Values derived once per WOT evaluation and shared between rules.
#[derive(Clone, Debug, PartialEq)]
pub struct WotContext {
    polarity: WgPolarity,
    boost: Option<BoostStats>,
}

impl WotContext {
    pub fn from_slice(slice: &TableSlice<'_>) -> Self {
        Self {
            polarity: infer_wg_polarity(slice),
            boost: BoostStats::from_slice(slice),
        }
    }

    pub fn polarity(&self) -> WgPolarity {
        self.polarity
    }

    /// Boost error statistics, when boost target and actual were logged.
    pub fn boost(&self) -> Option<&BoostStats> {
        self.boost.as_ref()
    }

    pub fn underboost(&self) -> bool {
        self.boost.as_ref().is_some_and(BoostStats::is_underboost)
    }
}
