use super::domain::{FactorKind, FactorStatus, MetricsRecord, RiskAssessment, RiskFactor, RiskTier};

/// Scores a metrics record: `0.4 * attendance + 0.3 * assignment rate + 0.3 * test score`.
///
/// Rounding happens once on the weighted sum; factor statuses are evaluated on the
/// unrounded percentages while the displayed `value` is rounded.
pub fn assess(record: &MetricsRecord) -> RiskAssessment {
    let inputs = FactorKind::ordered().map(|kind| (kind, raw_value(record, kind)));

    let weighted: f64 = inputs
        .iter()
        .map(|(kind, value)| kind.weight() * value)
        .sum();
    let score = round_pct(weighted);

    let factors = inputs.map(|(kind, value)| RiskFactor {
        kind,
        name: kind.label(),
        value: round_pct(value),
        weight: kind.weight(),
        status: FactorStatus::from_value(value),
    });

    RiskAssessment {
        score,
        tier: RiskTier::from_score(score),
        factors,
    }
}

fn raw_value(record: &MetricsRecord, kind: FactorKind) -> f64 {
    match kind {
        FactorKind::Attendance => record.attendance_pct(),
        FactorKind::AssignmentCompletion => record.assignment_rate_pct(),
        FactorKind::TestScores => record.test_score_pct(),
    }
}

pub(crate) fn round_pct(value: f64) -> u32 {
    value.round().max(0.0) as u32
}
