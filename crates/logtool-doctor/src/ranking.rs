// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Additive, explainable scoring of root-cause hypotheses for a WOT pull.
//!
//! Scores come from a static table of `(trigger, deltas)` rules applied in
//! order, plus one direct signal read from the slice. Categories are then
//! clamped at zero, stably sorted, filtered and capped.

use crate::cause::CauseCategory;
use logtool_core::stats::{difference, nan_median};
use logtool_core::{Field, Finding, FindingCode, TableSlice};

use CauseCategory::{
    BoostLeakPostTurbo, FuelingSystemLimit, PreTurbineExhaustLeak,
    TorqueOrTractionLimiting, TurbineChokingOrExhaustRestriction,
    TurboComponentProtectionLimiting, WastegateMechanicalOrControlIssue,
};

/// Causes scoring below this are not reported.
pub const MIN_RANKED_SCORE: f64 = 1.0;
pub const MAX_RANKED_CAUSES: usize = 5;
const DETAILED_RATIONALE_COUNT: usize = 3;

const DETAILED_FALLBACK: &str = "Scored by heuristic signals from this pull.";
const GENERIC_RATIONALE: &str = "Scored by heuristic signals.";

/// One ranked hypothesis with its explanation and remediation steps.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct RankedCause {
    pub cause: CauseCategory,
    pub score: f64,
    pub rationale: String,
    pub next_steps: Vec<String>,
}

#[derive(Clone, Copy, Debug)]
enum Trigger {
    Finding(FindingCode),
    FindingDuringUnderboost(FindingCode),
    AllFindings(&'static [FindingCode]),
    EmpRatioAbove(f64),
    /// `lo < ratio <= hi`
    EmpRatioWithin(f64, f64),
    EmpRatioBelow(f64),
    PreThrottleDropAbove(f64),
}

struct ScoreRule {
    trigger: Trigger,
    deltas: &'static [(CauseCategory, f64)],
}

const SCORE_RULES: &[ScoreRule] = &[
    ScoreRule {
        trigger: Trigger::Finding(FindingCode::Underboost),
        deltas: &[
            (TorqueOrTractionLimiting, 0.5),
            (TurboComponentProtectionLimiting, 0.5),
            (TurbineChokingOrExhaustRestriction, 0.5),
            (BoostLeakPostTurbo, 0.5),
            (PreTurbineExhaustLeak, 0.5),
            (WastegateMechanicalOrControlIssue, 0.5),
            (FuelingSystemLimit, 0.5),
        ],
    },
    ScoreRule {
        trigger: Trigger::Finding(FindingCode::ThrottleClosure),
        deltas: &[(TorqueOrTractionLimiting, 4.0)],
    },
    ScoreRule {
        trigger: Trigger::FindingDuringUnderboost(FindingCode::ThrottleOk),
        deltas: &[(TorqueOrTractionLimiting, -1.0)],
    },
    ScoreRule {
        trigger: Trigger::Finding(FindingCode::CompProtect),
        deltas: &[(TurboComponentProtectionLimiting, 4.0)],
    },
    ScoreRule {
        trigger: Trigger::Finding(FindingCode::FrpDrop),
        deltas: &[(FuelingSystemLimit, 3.0)],
    },
    ScoreRule {
        trigger: Trigger::Finding(FindingCode::HpfpAtLimit),
        deltas: &[(FuelingSystemLimit, 2.0)],
    },
    ScoreRule {
        trigger: Trigger::Finding(FindingCode::AfrMiss),
        deltas: &[(FuelingSystemLimit, 1.5)],
    },
    ScoreRule {
        trigger: Trigger::AllFindings(&[FindingCode::FrpOk, FindingCode::AfrOk]),
        deltas: &[(FuelingSystemLimit, -1.0)],
    },
    ScoreRule {
        trigger: Trigger::EmpRatioAbove(2.5),
        deltas: &[
            (TurbineChokingOrExhaustRestriction, 4.0),
            (PreTurbineExhaustLeak, 1.0),
        ],
    },
    ScoreRule {
        trigger: Trigger::EmpRatioWithin(2.2, 2.5),
        deltas: &[
            (TurbineChokingOrExhaustRestriction, 3.0),
            (PreTurbineExhaustLeak, 0.7),
        ],
    },
    ScoreRule {
        trigger: Trigger::EmpRatioBelow(1.8),
        deltas: &[
            (TurbineChokingOrExhaustRestriction, -0.5),
            (BoostLeakPostTurbo, 1.0),
        ],
    },
    ScoreRule {
        trigger: Trigger::FindingDuringUnderboost(FindingCode::WgSatClosed),
        deltas: &[
            (TurbineChokingOrExhaustRestriction, 1.2),
            (BoostLeakPostTurbo, 1.2),
            (PreTurbineExhaustLeak, 1.0),
            (WastegateMechanicalOrControlIssue, -0.5),
        ],
    },
    ScoreRule {
        trigger: Trigger::Finding(FindingCode::WgPolarityUncertain),
        deltas: &[(WastegateMechanicalOrControlIssue, 2.5)],
    },
    ScoreRule {
        trigger: Trigger::PreThrottleDropAbove(2.0),
        deltas: &[
            (BoostLeakPostTurbo, 1.0),
            (TurbineChokingOrExhaustRestriction, 0.5),
        ],
    },
];

/// Everything the score table can react to, gathered once per call.
struct Signals<'f> {
    findings: &'f [Finding],
    underboost: bool,
    emp_ratio: Option<f64>,
    pre_throttle_drop: Option<f64>,
}

impl<'f> Signals<'f> {
    fn gather(slice: &TableSlice<'_>, findings: &'f [Finding]) -> Self {
        let emp_ratio = find(findings, FindingCode::EmpRatio)
            .and_then(|finding| finding.evidence.number("emp_boost_gauge_ratio_median"));
        let pre_throttle_drop = slice
            .columns([Field::PreThrottlePActPsi, Field::MapPsi])
            .and_then(|[pre, map]| nan_median(&difference(pre, map)));
        Self {
            findings,
            underboost: has(findings, FindingCode::Underboost),
            emp_ratio,
            pre_throttle_drop,
        }
    }

    fn has(&self, code: FindingCode) -> bool {
        has(self.findings, code)
    }

    fn fires(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Finding(code) => self.has(code),
            Trigger::FindingDuringUnderboost(code) => self.underboost && self.has(code),
            Trigger::AllFindings(codes) => codes.iter().all(|code| self.has(*code)),
            Trigger::EmpRatioAbove(limit) => self.emp_ratio.is_some_and(|r| r > limit),
            Trigger::EmpRatioWithin(lo, hi) => self.emp_ratio.is_some_and(|r| r > lo && r <= hi),
            Trigger::EmpRatioBelow(limit) => self.emp_ratio.is_some_and(|r| r < limit),
            Trigger::PreThrottleDropAbove(limit) => {
                self.pre_throttle_drop.is_some_and(|d| d > limit)
            }
        }
    }

    /// Evidence sentences shared by the top-ranked causes.
    fn detailed_rationale(&self) -> String {
        let mut bits = Vec::new();
        if self.underboost {
            bits.push("Underboost is present.".to_string());
        }
        if self.has(FindingCode::ThrottleClosure) {
            bits.push("Throttle closure detected.".to_string());
        }
        if self.has(FindingCode::CompProtect) {
            bits.push("Component protection indicated.".to_string());
        }
        if let Some(r) = self.emp_ratio {
            bits.push(format!("EMP:Boost≈{r:.2}."));
        }
        if self.has(FindingCode::WgSatClosed) {
            bits.push("WG near closed extreme during underboost.".to_string());
        }
        if self.has(FindingCode::FrpDrop) {
            bits.push("FRP shortfall present.".to_string());
        }
        if bits.is_empty() {
            DETAILED_FALLBACK.to_string()
        } else {
            bits.join(" ")
        }
    }
}

fn has(findings: &[Finding], code: FindingCode) -> bool {
    findings.iter().any(|finding| finding.code == code)
}

fn find(findings: &[Finding], code: FindingCode) -> Option<&Finding> {
    findings.iter().find(|finding| finding.code == code)
}

fn score_with(signals: &Signals<'_>) -> [(CauseCategory, f64); 7] {
    let mut scores = CauseCategory::ALL.map(|cause| (cause, 0.0));
    for rule in SCORE_RULES {
        if !signals.fires(rule.trigger) {
            continue;
        }
        for (cause, delta) in rule.deltas {
            scores[cause.index()].1 += delta;
        }
    }
    for (_, score) in &mut scores {
        *score = score.max(0.0);
    }
    scores
}

/// Clamped score of every category, in catalog order.
pub fn score_causes(slice: &TableSlice<'_>, findings: &[Finding]) -> [(CauseCategory, f64); 7] {
    score_with(&Signals::gather(slice, findings))
}

/// Ranks root-cause hypotheses for one WOT pull.
///
/// Returns at most [`MAX_RANKED_CAUSES`] entries scoring at least
/// [`MIN_RANKED_SCORE`], highest first; equal scores keep catalog order. The
/// first three carry a rationale built from the pull's evidence, the rest a
/// generic one.
pub fn rank_causes_wot(slice: &TableSlice<'_>, findings: &[Finding]) -> Vec<RankedCause> {
    let signals = Signals::gather(slice, findings);
    let mut scored = score_with(&signals).to_vec();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let detailed = signals.detailed_rationale();
    let ranked = scored
        .into_iter()
        .filter(|(_, score)| *score >= MIN_RANKED_SCORE)
        .take(MAX_RANKED_CAUSES)
        .enumerate()
        .map(|(rank, (cause, score))| RankedCause {
            cause,
            score,
            rationale: if rank < DETAILED_RATIONALE_COUNT {
                detailed.clone()
            } else {
                GENERIC_RATIONALE.to_string()
            },
            next_steps: cause.next_steps().iter().map(|s| s.to_string()).collect(),
        })
        .collect::<Vec<_>>();

    log::debug!(
        "ranked {} cause(s) for slice starting at {}",
        ranked.len(),
        slice.start()
    );
    ranked
}
