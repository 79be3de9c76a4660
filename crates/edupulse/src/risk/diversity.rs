use super::domain::{RiskAssessment, RiskTier};
use super::engine::round_pct;
use serde::Serialize;
use std::collections::BTreeMap;

/// Head count and rounded share for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierShare {
    pub count: usize,
    pub percentage_pct: u32,
}

/// Cohort distribution by tier. Tiers with no students are absent rather than zero.
///
/// Percentages are rounded independently, so their sum may drift from 100 by up to
/// one less than the number of tiers present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RiskDistribution(BTreeMap<RiskTier, TierShare>);

impl RiskDistribution {
    pub fn get(&self, tier: RiskTier) -> Option<&TierShare> {
        self.0.get(&tier)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RiskTier, &TierShare)> {
        self.0.iter().map(|(tier, share)| (*tier, share))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_count(&self) -> usize {
        self.0.values().map(|share| share.count).sum()
    }

    pub fn total_percentage(&self) -> u32 {
        self.0.values().map(|share| share.percentage_pct).sum()
    }
}

/// Groups assessments by tier. An empty cohort yields an empty distribution.
pub fn diversity(assessments: &[RiskAssessment]) -> RiskDistribution {
    distribution_of(assessments.iter().map(|assessment| assessment.tier))
}

pub(crate) fn distribution_of<I>(tiers: I) -> RiskDistribution
where
    I: IntoIterator<Item = RiskTier>,
{
    let mut counts: BTreeMap<RiskTier, usize> = BTreeMap::new();
    for tier in tiers {
        *counts.entry(tier).or_insert(0) += 1;
    }

    let total: usize = counts.values().sum();
    if total == 0 {
        return RiskDistribution::default();
    }

    let shares = counts
        .into_iter()
        .map(|(tier, count)| {
            let percentage_pct = round_pct(100.0 * count as f64 / total as f64);
            (
                tier,
                TierShare {
                    count,
                    percentage_pct,
                },
            )
        })
        .collect();

    RiskDistribution(shares)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cohort_is_an_empty_mapping() {
        let distribution = diversity(&[]);
        assert!(distribution.is_empty());
        assert_eq!(distribution.total_percentage(), 0);
    }

    #[test]
    fn absent_tiers_are_omitted() {
        let distribution = distribution_of([RiskTier::Low, RiskTier::Low, RiskTier::High]);
        assert_eq!(distribution.len(), 2);
        assert!(distribution.get(RiskTier::Medium).is_none());
        assert_eq!(
            distribution.get(RiskTier::Low),
            Some(&TierShare {
                count: 2,
                percentage_pct: 67
            })
        );
        assert_eq!(distribution.get(RiskTier::High).map(|s| s.percentage_pct), Some(33));
    }

    #[test]
    fn rounding_drift_stays_within_tier_count() {
        let distribution = distribution_of([RiskTier::Low, RiskTier::Medium, RiskTier::High]);
        let total = distribution.total_percentage() as i64;
        let drift = (total - 100).abs();
        assert!(drift < distribution.len() as i64, "drift {drift} too large");
        assert_eq!(distribution.total_count(), 3);
    }
}
