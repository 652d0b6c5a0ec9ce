// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::LogError;
use std::fmt;
use std::str::FromStr;

/// Canonical telemetry channel names.
///
/// Ingestion maps platform-specific header names onto this catalog; everything
/// downstream addresses columns by `Field` only.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    TimeS,
    Rpm,
    Gear,
    AppPct,
    ThrottlePct,
    AfrActual,
    AfrCmd,
    StftPct,
    LtftPct,
    FrpActualPsi,
    FrpTargetPsi,
    HpfpSpillFf,
    HpfpSpillFinal,
    FuelStatus,
    BoostActualPsi,
    BoostTargetPsi,
    MapPsi,
    BaroPsi,
    PreThrottlePActPsi,
    PreThrottlePDesPsi,
    EmpPsi,
    IatC,
    MatC,
    BatteryV,
    WgPosAct,
    WgPosDes,
    TurboPidI,
    TurboPidPd,
    TurboCompProtectPsi,
    AirchargePct,
    AirchargeDesPct,
    KnockRefV,
    #[cfg_attr(feature = "serde", serde(rename = "knock_ratio_1"))]
    KnockRatio1,
    #[cfg_attr(feature = "serde", serde(rename = "knock_ratio_2"))]
    KnockRatio2,
    IgnCyl1,
    IgnCyl2,
    IgnCyl3,
    IgnCyl4,
    KrCyl1,
    KrCyl2,
    KrCyl3,
    KrCyl4,
}

impl Field {
    pub const ALL: [Field; 42] = [
        Field::TimeS,
        Field::Rpm,
        Field::Gear,
        Field::AppPct,
        Field::ThrottlePct,
        Field::AfrActual,
        Field::AfrCmd,
        Field::StftPct,
        Field::LtftPct,
        Field::FrpActualPsi,
        Field::FrpTargetPsi,
        Field::HpfpSpillFf,
        Field::HpfpSpillFinal,
        Field::FuelStatus,
        Field::BoostActualPsi,
        Field::BoostTargetPsi,
        Field::MapPsi,
        Field::BaroPsi,
        Field::PreThrottlePActPsi,
        Field::PreThrottlePDesPsi,
        Field::EmpPsi,
        Field::IatC,
        Field::MatC,
        Field::BatteryV,
        Field::WgPosAct,
        Field::WgPosDes,
        Field::TurboPidI,
        Field::TurboPidPd,
        Field::TurboCompProtectPsi,
        Field::AirchargePct,
        Field::AirchargeDesPct,
        Field::KnockRefV,
        Field::KnockRatio1,
        Field::KnockRatio2,
        Field::IgnCyl1,
        Field::IgnCyl2,
        Field::IgnCyl3,
        Field::IgnCyl4,
        Field::KrCyl1,
        Field::KrCyl2,
        Field::KrCyl3,
        Field::KrCyl4,
    ];

    /// Per-cylinder knock retard channels, in cylinder order.
    pub const KNOCK_RETARD: [Field; 4] = [Field::KrCyl1, Field::KrCyl2, Field::KrCyl3, Field::KrCyl4];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TimeS => "time_s",
            Self::Rpm => "rpm",
            Self::Gear => "gear",
            Self::AppPct => "app_pct",
            Self::ThrottlePct => "throttle_pct",
            Self::AfrActual => "afr_actual",
            Self::AfrCmd => "afr_cmd",
            Self::StftPct => "stft_pct",
            Self::LtftPct => "ltft_pct",
            Self::FrpActualPsi => "frp_actual_psi",
            Self::FrpTargetPsi => "frp_target_psi",
            Self::HpfpSpillFf => "hpfp_spill_ff",
            Self::HpfpSpillFinal => "hpfp_spill_final",
            Self::FuelStatus => "fuel_status",
            Self::BoostActualPsi => "boost_actual_psi",
            Self::BoostTargetPsi => "boost_target_psi",
            Self::MapPsi => "map_psi",
            Self::BaroPsi => "baro_psi",
            Self::PreThrottlePActPsi => "pre_throttle_p_act_psi",
            Self::PreThrottlePDesPsi => "pre_throttle_p_des_psi",
            Self::EmpPsi => "emp_psi",
            Self::IatC => "iat_c",
            Self::MatC => "mat_c",
            Self::BatteryV => "battery_v",
            Self::WgPosAct => "wg_pos_act",
            Self::WgPosDes => "wg_pos_des",
            Self::TurboPidI => "turbo_pid_i",
            Self::TurboPidPd => "turbo_pid_pd",
            Self::TurboCompProtectPsi => "turbo_comp_protect_psi",
            Self::AirchargePct => "aircharge_pct",
            Self::AirchargeDesPct => "aircharge_des_pct",
            Self::KnockRefV => "knock_ref_v",
            Self::KnockRatio1 => "knock_ratio_1",
            Self::KnockRatio2 => "knock_ratio_2",
            Self::IgnCyl1 => "ign_cyl1",
            Self::IgnCyl2 => "ign_cyl2",
            Self::IgnCyl3 => "ign_cyl3",
            Self::IgnCyl4 => "ign_cyl4",
            Self::KrCyl1 => "kr_cyl1",
            Self::KrCyl2 => "kr_cyl2",
            Self::KrCyl3 => "kr_cyl3",
            Self::KrCyl4 => "kr_cyl4",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = LogError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == raw)
            .ok_or_else(|| LogError::invalid_input(format!("unknown canonical field '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::Field;
    use std::collections::BTreeSet;

    #[test]
    fn names_are_unique_and_roundtrip() {
        let names = Field::ALL.iter().map(|f| f.as_str()).collect::<BTreeSet<_>>();
        assert_eq!(names.len(), Field::ALL.len());
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().expect("known name"), field);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("boost_psi".parse::<Field>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_names_match_as_str() {
        for field in Field::ALL {
            let encoded = serde_json::to_string(&field).expect("field should serialize");
            assert_eq!(encoded, format!("\"{}\"", field.as_str()));
        }
    }
}
