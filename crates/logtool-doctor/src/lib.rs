// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod cause;
pub mod ranking;
pub mod report;

pub use cause::CauseCategory;
pub use ranking::{MAX_RANKED_CAUSES, MIN_RANKED_SCORE, RankedCause, rank_causes_wot, score_causes};
pub use report::{AnalysisConfig, SegmentReport, analyze, detect_segments, make_reports};
