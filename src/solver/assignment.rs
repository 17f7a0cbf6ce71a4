//! Global electron assignment by strict occupation-number ranking.
//!
//! This is the aufbau-style rule at the heart of the effective oxidation state method: the N
//! physically occupied natural-orbital slots across the whole system are taken to be the N
//! globally highest occupation numbers, regardless of which fragment they originate from. The
//! greedy global ranking is a deliberate approximation to a true combinatorial assignment; it
//! lives in its own module so an alternative rule (for example charge-conserving local
//! rounding) can be substituted without touching the rest of the solver.

use crate::error::FragosError;

/// Distributes `electron_count` electrons over fragments by descending
/// occupation number.
///
/// `occupations` holds one array per fragment. The arrays are flattened in
/// enumeration order (fragment index, then orbital slot), ranked by a stable
/// descending sort so ties keep their encounter order, and the top
/// `electron_count` entries are counted per fragment.
///
/// The returned counts always sum to exactly `electron_count`.
pub(crate) fn assign_by_ranking(
    occupations: &[Vec<f64>],
    electron_count: usize,
) -> Result<Vec<usize>, FragosError> {
    for (fragment, values) in occupations.iter().enumerate() {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(FragosError::NonFiniteOccupation { fragment });
        }
    }

    let mut ranked: Vec<(f64, usize)> = occupations
        .iter()
        .enumerate()
        .flat_map(|(fragment, values)| values.iter().map(move |&value| (value, fragment)))
        .collect();

    if ranked.len() < electron_count {
        return Err(FragosError::NotEnoughOccupationSlots {
            needed: electron_count,
            available: ranked.len(),
        });
    }

    // Stable sort: equal occupation numbers keep fragment-then-slot order.
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut counts = vec![0usize; occupations.len()];
    for &(_, fragment) in ranked.iter().take(electron_count) {
        counts[fragment] += 1;
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_electron_count() {
        let occupations = vec![
            vec![0.9, 0.7, 0.1],
            vec![0.8, 0.2, 0.05],
            vec![0.3, 0.25, 0.0],
        ];
        for n in 0..=9 {
            let counts = assign_by_ranking(&occupations, n).unwrap();
            assert_eq!(counts.iter().sum::<usize>(), n);
        }
    }

    #[test]
    fn test_highest_occupations_win_across_fragments() {
        let occupations = vec![vec![0.9, 0.4], vec![0.8, 0.1]];
        let counts = assign_by_ranking(&occupations, 3).unwrap();
        // Top three are 0.9 (frag 0), 0.8 (frag 1), 0.4 (frag 0).
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn test_ties_resolved_by_enumeration_order() {
        let occupations = vec![vec![0.5], vec![0.5], vec![0.5]];
        let counts = assign_by_ranking(&occupations, 2).unwrap();
        assert_eq!(counts, vec![1, 1, 0]);

        // Tie within one fragment against a later fragment.
        let occupations = vec![vec![0.5, 0.5], vec![0.5]];
        let counts = assign_by_ranking(&occupations, 2).unwrap();
        assert_eq!(counts, vec![2, 0]);
    }

    #[test]
    fn test_zero_electrons() {
        let counts = assign_by_ranking(&[vec![0.9], vec![0.8]], 0).unwrap();
        assert_eq!(counts, vec![0, 0]);
        assert!(assign_by_ranking(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn test_nan_is_rejected() {
        let occupations = vec![vec![0.9], vec![f64::NAN]];
        let err = assign_by_ranking(&occupations, 1).unwrap_err();
        assert!(matches!(
            err,
            FragosError::NonFiniteOccupation { fragment: 1 }
        ));
    }

    #[test]
    fn test_too_few_slots() {
        let err = assign_by_ranking(&[vec![0.9, 0.8]], 3).unwrap_err();
        assert!(matches!(
            err,
            FragosError::NotEnoughOccupationSlots {
                needed: 3,
                available: 2,
            }
        ));
    }
}
