// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use logtool_core::LogError;
use std::fmt;
use std::str::FromStr;

/// Root-cause hypotheses scored for a WOT pull, in catalog order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CauseCategory {
    TorqueOrTractionLimiting,
    TurboComponentProtectionLimiting,
    TurbineChokingOrExhaustRestriction,
    BoostLeakPostTurbo,
    PreTurbineExhaustLeak,
    WastegateMechanicalOrControlIssue,
    FuelingSystemLimit,
}

impl CauseCategory {
    pub const ALL: [CauseCategory; 7] = [
        CauseCategory::TorqueOrTractionLimiting,
        CauseCategory::TurboComponentProtectionLimiting,
        CauseCategory::TurbineChokingOrExhaustRestriction,
        CauseCategory::BoostLeakPostTurbo,
        CauseCategory::PreTurbineExhaustLeak,
        CauseCategory::WastegateMechanicalOrControlIssue,
        CauseCategory::FuelingSystemLimit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TorqueOrTractionLimiting => "torque_or_traction_limiting",
            Self::TurboComponentProtectionLimiting => "turbo_component_protection_limiting",
            Self::TurbineChokingOrExhaustRestriction => "turbine_choking_or_exhaust_restriction",
            Self::BoostLeakPostTurbo => "boost_leak_post_turbo",
            Self::PreTurbineExhaustLeak => "pre_turbine_exhaust_leak",
            Self::WastegateMechanicalOrControlIssue => "wastegate_mechanical_or_control_issue",
            Self::FuelingSystemLimit => "fueling_system_limit",
        }
    }

    /// Position in [`CauseCategory::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Ordered remediation steps for this hypothesis.
    pub fn next_steps(self) -> &'static [&'static str; 3] {
        match self {
            Self::TorqueOrTractionLimiting => &[
                "Log again including any available torque/traction/limit flags (if accessible) and verify pedal vs throttle closure alignment.",
                "Repeat the same pull with TC fully disabled (where safe/legal) to see if throttle closure disappears.",
                "Check IAT/MAT/ECT during the event; thermal strategies can trigger closure.",
            ],
            Self::TurboComponentProtectionLimiting => &[
                "Compare 'Turbo Maximum Boost - Component Protection' vs boost target across RPM; if it sits below target, reduce target/load in that region.",
                "Inspect IAT/MAT and coolant temps; component protection often correlates with heat.",
                "Review intake/exhaust/turbo sizing vs requested pressure ratio.",
            ],
            Self::TurbineChokingOrExhaustRestriction => &[
                "Compute EMP:Boost by RPM; if it climbs sharply up top, reduce high-RPM boost target or improve exhaust flow/turbine capacity.",
                "Check for exhaust restrictions (collapsed flex, clogged cat) and verify downpipe/cat health.",
                "Verify turbo/wastegate hardware and manifold to turbo sealing; high EMP can also occur with pre-turb leaks.",
            ],
            Self::BoostLeakPostTurbo => &[
                "Perform a charge-pipe/IC pressure test to your typical peak boost (e.g., 20–25 psi) and listen/soap-test for leaks.",
                "Review clamps/couplers, BPV connections, and intercooler end-tanks; re-log after fixing any leak.",
                "At steady cruise, look for elevated positive trims (STFT/LTFT) that support unmetered air or leaks.",
            ],
            Self::PreTurbineExhaustLeak => &[
                "Inspect manifold-to-turbo gasket, turbo inlet flange, and any welds for soot trails or ticking noise on cold start.",
                "Smoke test the exhaust pre-turb if possible; re-torque hardware after heat-cycling.",
                "Compare EMP behavior before/after repair; leaks can alter boost response and EMP.",
            ],
            Self::WastegateMechanicalOrControlIssue => &[
                "Verify wastegate actuator preload and that the arm moves freely through full travel.",
                "Confirm the logged WG position meaning (is higher more open or more closed?) and check for sensor scaling issues.",
                "If possible, run a controlled test at lower boost target to see if WG position responds predictably.",
            ],
            Self::FuelingSystemLimit => &[
                "Check FRP Actual vs Desired at peak load; if shortfall grows with RPM, reduce load/boost or revise HPFP targets.",
                "Inspect LPFP supply (if you can log it) and fuel quality; verify injector characterization if AFR misses commanded.",
                "Re-log with consistent fuel and temps to confirm repeatability.",
            ],
        }
    }
}

impl fmt::Display for CauseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CauseCategory {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cause| cause.as_str() == s)
            .ok_or_else(|| LogError::invalid_input(format!("unknown cause category: {s}")))
    }
}
