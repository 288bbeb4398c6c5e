use crate::model::{
    ComparableCompany, FinancialRecord, ProjectionRow, Segment, ValuationError,
};

/// Median multiples for one market segment.
#[derive(Debug, Clone)]
pub struct SegmentMultiples {
    pub segment: Segment,
    /// Companies in the segment.
    pub companies: usize,
    /// Companies left in the EV/EBITDA sample after dropping non-positive
    /// EBITDA.
    pub ebitda_sample: usize,
    pub ev_revenue_median: f64,
    pub ev_ebitda_median: f64,
}

/// A named valuation estimate, in dollars.
#[derive(Debug, Clone)]
pub struct ValuationEstimate {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct MultiplesValuation {
    pub segments: Vec<SegmentMultiples>,
    /// Four estimates per segment: {revenue, EBITDA} x {current, forward}.
    pub estimates: Vec<ValuationEstimate>,
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

fn segment_multiples(
    comparables: &[ComparableCompany],
    segment: Segment,
) -> Result<SegmentMultiples, ValuationError> {
    let members: Vec<&ComparableCompany> = comparables
        .iter()
        .filter(|c| c.segment == segment)
        .collect();
    let ev_revenue: Vec<f64> = members.iter().map(|c| c.ev_revenue()).collect();
    let ev_ebitda: Vec<f64> = members.iter().filter_map(|c| c.ev_ebitda()).collect();

    let ev_revenue_median = median(&ev_revenue).ok_or_else(|| {
        ValuationError::Domain(format!("no comparable companies in the {segment} segment"))
    })?;
    let ev_ebitda_median = median(&ev_ebitda).ok_or_else(|| {
        ValuationError::Domain(format!(
            "no {segment} comparables with positive EBITDA for the EV/EBITDA median"
        ))
    })?;

    Ok(SegmentMultiples {
        segment,
        companies: members.len(),
        ebitda_sample: ev_ebitda.len(),
        ev_revenue_median,
        ev_ebitda_median,
    })
}

/// Applies each segment's median multiples to the subject's current-year
/// and final-forecast-year revenue and EBITDA, yielding four estimates per
/// segment.
pub fn value(
    comparables: &[ComparableCompany],
    current: &FinancialRecord,
    forward: &ProjectionRow,
) -> Result<MultiplesValuation, ValuationError> {
    let mut segments = Vec::new();
    let mut estimates = Vec::new();

    for segment in [Segment::Public, Segment::Private] {
        let multiples = segment_multiples(comparables, segment)?;
        estimates.push(ValuationEstimate {
            label: format!("{segment} EV/Revenue Current"),
            value: current.revenue * multiples.ev_revenue_median,
        });
        estimates.push(ValuationEstimate {
            label: format!("{segment} EV/Revenue Forward"),
            value: forward.revenue * multiples.ev_revenue_median,
        });
        estimates.push(ValuationEstimate {
            label: format!("{segment} EV/EBITDA Current"),
            value: current.ebitda * multiples.ev_ebitda_median,
        });
        estimates.push(ValuationEstimate {
            label: format!("{segment} EV/EBITDA Forward"),
            value: forward.ebitda * multiples.ev_ebitda_median,
        });
        segments.push(multiples);
    }

    Ok(MultiplesValuation {
        segments,
        estimates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(name: &str, segment: Segment, ev: f64, revenue: f64, ebitda: f64) -> ComparableCompany {
        ComparableCompany {
            name: name.to_string(),
            segment,
            enterprise_value: ev,
            revenue,
            ebitda,
        }
    }

    fn sample_comparables() -> Vec<ComparableCompany> {
        vec![
            comp("Pub A", Segment::Public, 300.0, 100.0, 20.0), // 3.0x, 15x
            comp("Pub B", Segment::Public, 400.0, 100.0, 25.0), // 4.0x, 16x
            comp("Pub C", Segment::Public, 500.0, 100.0, 25.0), // 5.0x, 20x
            comp("Prv A", Segment::Private, 600.0, 100.0, 0.0), // 6.0x, excluded
            comp("Prv B", Segment::Private, 700.0, 100.0, 20.0), // 7.0x, 35x
            comp("Prv C", Segment::Private, 800.0, 100.0, 25.0), // 8.0x, 32x
        ]
    }

    fn subject() -> (FinancialRecord, ProjectionRow) {
        let current = FinancialRecord {
            year: 2024,
            revenue: 10e6,
            cogs: 3e6,
            operating_expenses: 4e6,
            ebitda: 3e6,
            depreciation: 0.25e6,
            capex: 0.3e6,
            working_capital_change: 0.2e6,
        };
        let forward = ProjectionRow {
            year: 2029,
            revenue: 30e6,
            ebitda: 10e6,
            ebitda_margin: 1.0 / 3.0,
            depreciation: 0.75e6,
            ebit: 9.25e6,
            interest_expense: 0.15e6,
            net_income: 6.8e6,
            capex: 0.9e6,
            working_capital_change: 0.6e6,
            free_cash_flow: 6.05e6,
        };
        (current, forward)
    }

    #[test]
    fn medians_and_estimates_per_segment() {
        let (current, forward) = subject();
        let result = value(&sample_comparables(), &current, &forward).unwrap();
        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.estimates.len(), 8);

        let public = &result.segments[0];
        assert!((public.ev_revenue_median - 4.0).abs() < 1e-12);
        assert!((public.ev_ebitda_median - 16.0).abs() < 1e-12);

        let private = &result.segments[1];
        assert_eq!(private.companies, 3);
        assert_eq!(private.ebitda_sample, 2);
        assert!((private.ev_revenue_median - 7.0).abs() < 1e-12);
        // Even-sized sample after exclusion: midpoint of 32x and 35x.
        assert!((private.ev_ebitda_median - 33.5).abs() < 1e-12);

        let current_public_revenue = &result.estimates[0];
        assert_eq!(current_public_revenue.label, "Public EV/Revenue Current");
        assert!((current_public_revenue.value - 40e6).abs() < 1e-3);
    }

    #[test]
    fn median_is_order_insensitive() {
        let (current, forward) = subject();
        let mut shuffled = sample_comparables();
        shuffled.reverse();
        shuffled.swap(0, 2);
        let a = value(&sample_comparables(), &current, &forward).unwrap();
        let b = value(&shuffled, &current, &forward).unwrap();
        for (x, y) in a.segments.iter().zip(b.segments.iter()) {
            assert!((x.ev_revenue_median - y.ev_revenue_median).abs() < 1e-12);
            assert!((x.ev_ebitda_median - y.ev_ebitda_median).abs() < 1e-12);
        }
    }

    #[test]
    fn negative_ebitda_is_excluded_like_zero() {
        let (current, forward) = subject();
        let mut comps = sample_comparables();
        comps[3].ebitda = -5.0;
        let result = value(&comps, &current, &forward).unwrap();
        assert_eq!(result.segments[1].ebitda_sample, 2);
    }

    #[test]
    fn empty_segment_is_a_domain_error() {
        let (current, forward) = subject();
        let public_only: Vec<ComparableCompany> = sample_comparables()
            .into_iter()
            .filter(|c| c.segment == Segment::Public)
            .collect();
        let err = value(&public_only, &current, &forward).unwrap_err();
        assert!(matches!(err, ValuationError::Domain(_)));
    }

    #[test]
    fn all_zero_ebitda_segment_is_a_domain_error() {
        let (current, forward) = subject();
        let mut comps = sample_comparables();
        for c in comps.iter_mut().filter(|c| c.segment == Segment::Private) {
            c.ebitda = 0.0;
        }
        let err = value(&comps, &current, &forward).unwrap_err();
        assert!(matches!(err, ValuationError::Domain(_)));
    }
}
