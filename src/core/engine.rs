use super::types::{CashFlow, ProjectionPoint};

const MONTHS_PER_YEAR: i64 = 12;

// Only the recorded points are rounded; the running balance keeps full precision.
pub fn simulate(
    start_value: f64,
    horizon_years: u32,
    annual_return: f64,
    cash_flows: &[CashFlow],
) -> Vec<ProjectionPoint> {
    let monthly_rate = annual_return / 100.0 / 12.0;
    let total_months = i64::from(horizon_years) * MONTHS_PER_YEAR;

    let mut points = Vec::with_capacity(horizon_years as usize + 1);
    points.push(ProjectionPoint {
        year: 0,
        value: start_value.round(),
    });

    let mut balance = start_value;
    for month in 1..=total_months {
        balance *= 1.0 + monthly_rate;
        balance += net_flow_for_month(cash_flows, month, horizon_years);
        balance = balance.max(0.0);

        if month % MONTHS_PER_YEAR == 0 {
            points.push(ProjectionPoint {
                year: (month / MONTHS_PER_YEAR) as u32,
                value: balance.round(),
            });
        }
    }
    points
}

pub fn simulate_final_value(
    start_value: f64,
    horizon_years: u32,
    annual_return: f64,
    cash_flows: &[CashFlow],
) -> f64 {
    simulate(start_value, horizon_years, annual_return, cash_flows)
        .last()
        .map(|point| point.value)
        .unwrap_or_else(|| start_value.round())
}

fn net_flow_for_month(cash_flows: &[CashFlow], month: i64, horizon_years: u32) -> f64 {
    cash_flows
        .iter()
        .filter(|flow| flow_applies_in_month(flow, month, horizon_years))
        .map(|flow| flow.kind.sign() * flow.amount)
        .sum()
}

fn flow_applies_in_month(flow: &CashFlow, month: i64, horizon_years: u32) -> bool {
    let start_month = (i64::from(flow.start_year) - 1) * MONTHS_PER_YEAR + 1;
    if flow.kind.is_recurring() {
        let end_month = i64::from(flow.end_year.unwrap_or(horizon_years)) * MONTHS_PER_YEAR;
        (start_month..=end_month).contains(&month)
    } else {
        month == start_month
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CashFlowKind;
    use proptest::prelude::{prop_assert, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn flow(kind: CashFlowKind, amount: f64, start_year: u32, end_year: Option<u32>) -> CashFlow {
        CashFlow {
            kind,
            amount,
            start_year,
            end_year,
        }
    }

    #[test]
    fn records_start_balance_and_one_point_per_year() {
        let points = simulate(1_000.4, 3, 0.0, &[]);
        let years: Vec<u32> = points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![0, 1, 2, 3]);
        assert_eq!(points[0].value, 1_000.0);
        assert_eq!(points[3].value, 1_000.0);
    }

    #[test]
    fn zero_horizon_returns_only_starting_point() {
        let points = simulate(5_000.0, 0, 12.0, &[flow(CashFlowKind::Sip, 100.0, 1, None)]);
        assert_eq!(points, vec![ProjectionPoint { year: 0, value: 5_000.0 }]);
        assert_eq!(simulate_final_value(5_000.0, 0, 12.0, &[]), 5_000.0);
    }

    #[test]
    fn growth_is_applied_before_the_months_contribution() {
        // 12 deposits of 1000 at 1% a month, each deposited after that month's growth:
        // 1000 * ((1.01^12 - 1) / 0.01) = 12682.503...
        let flows = [flow(CashFlowKind::Sip, 1_000.0, 1, Some(1))];
        let points = simulate(0.0, 2, 12.0, &flows);
        assert_eq!(points[1].value, 12_683.0);
        // Year 2 only compounds.
        assert_approx_tol(points[2].value, 12_682.503 * 1.01f64.powi(12), 1.0);
    }

    #[test]
    fn lumpsum_lands_once_in_first_month_of_its_year() {
        let flows = [flow(CashFlowKind::Lumpsum, 100_000.0, 2, None)];
        let values: Vec<f64> = simulate(0.0, 3, 0.0, &flows)
            .iter()
            .map(|p| p.value)
            .collect();
        assert_eq!(values, vec![0.0, 0.0, 100_000.0, 100_000.0]);
    }

    #[test]
    fn swp_defaults_to_running_until_horizon() {
        let flows = [flow(CashFlowKind::Swp, 100.0, 2, None)];
        let points = simulate(10_000.0, 3, 0.0, &flows);
        assert_eq!(points[1].value, 10_000.0);
        assert_eq!(points[2].value, 8_800.0);
        assert_eq!(points[3].value, 7_600.0);
    }

    #[test]
    fn sip_window_respects_end_year() {
        let flows = [flow(CashFlowKind::Sip, 500.0, 1, Some(2))];
        let points = simulate(0.0, 4, 0.0, &flows);
        assert_eq!(points[2].value, 12_000.0);
        assert_eq!(points[4].value, 12_000.0);
    }

    #[test]
    fn inverted_range_contributes_nothing() {
        let flows = [flow(CashFlowKind::Sip, 500.0, 4, Some(2))];
        let points = simulate(1_000.0, 5, 0.0, &flows);
        assert!(points.iter().all(|p| p.value == 1_000.0));
    }

    #[test]
    fn large_withdrawal_floors_balance_at_zero_then_later_flows_rebuild() {
        let flows = [
            flow(CashFlowKind::Withdrawal, 1_000_000.0, 1, None),
            flow(CashFlowKind::Lumpsum, 2_000.0, 3, None),
        ];
        let points = simulate(50_000.0, 3, 10.0, &flows);
        assert_eq!(points[1].value, 0.0);
        assert_eq!(points[2].value, 0.0);
        assert!(points[3].value > 2_000.0);
    }

    #[test]
    fn flows_in_the_same_month_net_before_the_floor() {
        let flows = [
            flow(CashFlowKind::Withdrawal, 1_500.0, 1, None),
            flow(CashFlowKind::Lumpsum, 1_000.0, 1, None),
        ];
        let points = simulate(1_000.0, 1, 0.0, &flows);
        assert_eq!(points[1].value, 500.0);
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let flows = [
            flow(CashFlowKind::Sip, 12_345.67, 1, Some(7)),
            flow(CashFlowKind::Swp, 4_321.0, 5, None),
            flow(CashFlowKind::Lumpsum, 250_000.0, 3, None),
        ];
        let a = simulate(987_654.32, 12, 9.75, &flows);
        let b = simulate(987_654.32, 12, 9.75, &flows);
        assert_eq!(a, b);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_flow_free_simulation_matches_monthly_closed_form(
            start in 1u32..10_000_000,
            years in 1u32..41,
            rate_bp in 0u32..2001
        ) {
            let start = start as f64;
            let rate = rate_bp as f64 / 100.0;
            let expected = start * (1.0 + rate / 1200.0).powi((years * 12) as i32);
            let actual = simulate_final_value(start, years, rate, &[]);
            prop_assert!(
                (actual - expected).abs() <= 0.5 + expected * 1e-9,
                "expected {expected}, got {actual}"
            );
        }

        #[test]
        fn prop_points_never_go_negative(
            start in 0u32..2_000_000,
            years in 1u32..30,
            rate_bp in -1_000i32..2_001,
            withdrawal in 1u32..500_000,
            swp in 1u32..50_000,
            swp_start in 1u32..10,
            sip in 1u32..20_000
        ) {
            let flows = [
                flow(CashFlowKind::Withdrawal, withdrawal as f64, 1, None),
                flow(CashFlowKind::Swp, swp as f64, swp_start, None),
                flow(CashFlowKind::Sip, sip as f64, 2, Some(4)),
            ];
            let points = simulate(start as f64, years, rate_bp as f64 / 100.0, &flows);
            prop_assert!(points.len() == years as usize + 1);
            for point in &points {
                prop_assert!(point.value >= 0.0);
                prop_assert!(point.value.fract() == 0.0);
            }
        }
    }
}
