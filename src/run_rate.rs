/// Cumulative run rate after a delivery.
///
/// `over` is 0-indexed, `ball` is 1-indexed within the over; both already
/// count legal deliveries only, as supplied by the extraction source.
pub fn current_run_rate(over: u32, ball: u32, cumulative_runs: u32) -> f64 {
    let total_balls = over * 6 + ball;
    if total_balls == 0 {
        return 0.0;
    }
    let overs_bowled = f64::from(total_balls) / 6.0;
    round2(f64::from(cumulative_runs) / overs_bowled)
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_balls_guards_division() {
        assert_eq!(current_run_rate(0, 0, 0), 0.0);
        assert_eq!(current_run_rate(0, 0, 5), 0.0);
    }

    #[test]
    fn one_full_over() {
        // 6 legal balls, 6 runs -> exactly 6.0 per over.
        assert_eq!(current_run_rate(1, 0, 6), 6.0);
    }

    #[test]
    fn mid_over_rate_rounds_to_two_decimals() {
        // 7 balls, 10 runs -> 10 / (7/6) = 8.5714... -> 8.57
        assert_eq!(current_run_rate(1, 1, 10), 8.57);
    }

    #[test]
    fn first_ball_boundary() {
        assert_eq!(current_run_rate(0, 1, 4), 24.0);
    }
}
