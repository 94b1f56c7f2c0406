use super::types::AllocationEntry;

// Percentages are not normalised: a set summing to 60 yields 60% of the weighted rate.
pub fn weighted_return(entries: &[AllocationEntry]) -> f64 {
    let contributions: Vec<f64> = entries
        .iter()
        .filter(|entry| entry.allocation_percentage > 0.0)
        .filter_map(|entry| {
            entry
                .return_rate
                .map(|rate| entry.allocation_percentage * rate)
        })
        .collect();
    if contributions.is_empty() {
        return 0.0;
    }
    contributions.iter().sum::<f64>() / 100.0
}
