use super::domain::{FactorKind, FactorStatus, RiskFactor};

/// Suggested interventions for a factor breakdown, in factor order.
///
/// Critical factors contribute two actions, warnings one, good factors none.
pub fn recommend(factors: &[RiskFactor]) -> Vec<String> {
    factors
        .iter()
        .flat_map(|factor| interventions(factor.kind, factor.status))
        .map(|action| action.to_string())
        .collect()
}

fn interventions(kind: FactorKind, status: FactorStatus) -> &'static [&'static str] {
    match (kind, status) {
        (_, FactorStatus::Good) => &[],
        (FactorKind::Attendance, FactorStatus::Critical) => &[
            "Schedule immediate counseling session for attendance issues",
            "Contact parents/guardians about attendance concerns",
        ],
        (FactorKind::Attendance, FactorStatus::Warning) => {
            &["Monitor attendance closely and send weekly reports"]
        }
        (FactorKind::AssignmentCompletion, FactorStatus::Critical) => &[
            "Provide additional academic support and tutoring",
            "Create personalized assignment schedule",
        ],
        (FactorKind::AssignmentCompletion, FactorStatus::Warning) => {
            &["Check in weekly about assignment progress"]
        }
        (FactorKind::TestScores, FactorStatus::Critical) => &[
            "Arrange peer tutoring or study groups",
            "Consider alternative assessment methods",
        ],
        (FactorKind::TestScores, FactorStatus::Warning) => &["Offer additional practice materials"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor(kind: FactorKind, status: FactorStatus) -> RiskFactor {
        RiskFactor {
            kind,
            name: kind.label(),
            value: 0,
            weight: kind.weight(),
            status,
        }
    }

    #[test]
    fn empty_breakdown_yields_nothing() {
        assert!(recommend(&[]).is_empty());
    }

    #[test]
    fn critical_emits_two_and_warning_one() {
        let actions = recommend(&[
            factor(FactorKind::Attendance, FactorStatus::Critical),
            factor(FactorKind::AssignmentCompletion, FactorStatus::Good),
            factor(FactorKind::TestScores, FactorStatus::Warning),
        ]);

        assert_eq!(
            actions,
            vec![
                "Schedule immediate counseling session for attendance issues",
                "Contact parents/guardians about attendance concerns",
                "Offer additional practice materials",
            ]
        );
    }

    #[test]
    fn repeated_factors_are_not_deduplicated() {
        let warning = factor(FactorKind::AssignmentCompletion, FactorStatus::Warning);
        let actions = recommend(&[warning.clone(), warning]);
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], actions[1]);
    }
}
