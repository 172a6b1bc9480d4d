//! Aggregate rating recomputation.

use verdura_core::models::plant::Review;

/// Recompute a plant's rating from its full review sequence.
///
/// Returns the arithmetic mean of the review stars rounded half-up to
/// one decimal place, or `0.0` when the sequence is empty.
///
/// Always recomputed from the complete current sequence rather than
/// maintained as a running average, so repeated mutations cannot
/// accumulate floating-point drift.
pub fn recompute(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.stars)).sum();
    let mean = f64::from(total) / reviews.len() as f64;
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn review(stars: u8) -> Review {
        Review {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            stars,
            comment: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_sequence_is_zero() {
        assert_eq!(recompute(&[]), 0.0);
    }

    #[test]
    fn single_review_is_its_stars() {
        assert_eq!(recompute(&[review(5)]), 5.0);
        assert_eq!(recompute(&[review(1)]), 1.0);
    }

    #[test]
    fn mean_is_rounded_to_one_decimal() {
        // (5 + 3) / 2 = 4.0
        assert_eq!(recompute(&[review(5), review(3)]), 4.0);
        // (5 + 4 + 4) / 3 = 4.333... -> 4.3
        assert_eq!(recompute(&[review(5), review(4), review(4)]), 4.3);
        // (5 + 5 + 4) / 3 = 4.666... -> 4.7
        assert_eq!(recompute(&[review(5), review(5), review(4)]), 4.7);
    }

    #[test]
    fn half_values_round_up() {
        // (4 + 5) / 2 = 4.5 stays 4.5; (1 + 2 + 2 + 2) / 4 = 1.75 -> 1.8
        assert_eq!(recompute(&[review(4), review(5)]), 4.5);
        assert_eq!(
            recompute(&[review(1), review(2), review(2), review(2)]),
            1.8
        );
    }

    #[test]
    fn editing_a_star_changes_the_mean_deterministically() {
        let mut reviews = vec![review(5), review(3)];
        assert_eq!(recompute(&reviews), 4.0);
        reviews[1].stars = 1;
        assert_eq!(recompute(&reviews), 3.0);
    }
}
