// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::context::WotContext;
use logtool_core::stats::nan_min;
use logtool_core::{Evidence, EvidenceValue, Field, Finding, FindingCode, Severity, TableSlice};

const KNOCK_WARN_DEG: f64 = 2.0;
const KNOCK_FAIL_DEG: f64 = 4.0;

/// Worst knock retard across whichever cylinder channels were logged.
///
/// Retard is logged as a negative correction, so the worst value is the
/// minimum.
pub(crate) fn evaluate(slice: &TableSlice<'_>, _ctx: &WotContext) -> Option<Vec<Finding>> {
    let channels = Field::KNOCK_RETARD
        .into_iter()
        .filter_map(|field| slice.column(field).map(|values| (field, values)))
        .collect::<Vec<_>>();
    let worst = channels
        .iter()
        .filter_map(|(_, values)| nan_min(values))
        .min_by(|a, b| a.total_cmp(b))?;

    let severity = if worst.abs() >= KNOCK_FAIL_DEG {
        Severity::Fail
    } else if worst.abs() >= KNOCK_WARN_DEG {
        Severity::Warn
    } else {
        Severity::Info
    };
    let names = channels
        .iter()
        .map(|(field, _)| EvidenceValue::from(field.as_str()))
        .collect::<Vec<_>>();
    Some(vec![Finding::new(
        FindingCode::Knock,
        severity,
        format!("Worst KR observed {worst:.1}."),
        Evidence::new()
            .with("worst_kr", worst)
            .with("kr_columns", names),
    )])
}

#[cfg(test)]
mod tests {
    use super::evaluate;
    use crate::context::WotContext;
    use crate::test_support::{constant, pull};
    use logtool_core::{EvidenceValue, Field, Finding, FindingCode, Severity};

    fn knock(channels: Vec<(Field, Vec<f64>)>) -> Option<Vec<Finding>> {
        let table = pull(10, channels);
        let slice = table.as_slice();
        evaluate(&slice, &WotContext::from_slice(&slice))
    }

    #[test]
    fn worst_cylinder_drives_severity() {
        let mut cyl3 = constant(10, 0.0);
        cyl3[6] = -2.5;
        let findings = knock(vec![
            (Field::KrCyl1, constant(10, -0.5)),
            (Field::KrCyl3, cyl3),
        ])
        .expect("knock channels present");
        let finding = &findings[0];
        assert_eq!(finding.code, FindingCode::Knock);
        assert_eq!(finding.severity, Severity::Warn);
        assert_eq!(finding.evidence.number("worst_kr"), Some(-2.5));
        assert_eq!(
            finding.evidence.get("kr_columns"),
            Some(&EvidenceValue::List(vec!["kr_cyl1".into(), "kr_cyl3".into()]))
        );
        assert_eq!(finding.detail, "Worst KR observed -2.5.");
    }

    #[test]
    fn boundaries_are_inclusive() {
        let at = |v: f64| knock(vec![(Field::KrCyl2, constant(10, v))]).expect("present")[0].severity;
        assert_eq!(at(-1.9), Severity::Info);
        assert_eq!(at(-2.0), Severity::Warn);
        assert_eq!(at(-4.0), Severity::Fail);
    }

    #[test]
    fn no_cylinder_channels_skips() {
        assert!(knock(Vec::new()).is_none());
    }
}
