//! Rating entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::RatingCategory;
use super::status::RatingStatus;

/// A rating left by a client for a member.
///
/// At most one rating exists per (client, member, category, product,
/// service) combination; duplicates are rejected with a conflict.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rating {
    /// Unique rating identifier.
    pub id: Uuid,
    /// The rating client's profile.
    pub client_id: Uuid,
    /// The rated member's profile.
    pub member_id: Uuid,
    /// What the rating targets.
    pub rating_category: RatingCategory,
    /// The rated product, if any.
    pub product_id: Option<Uuid>,
    /// The rated service, if any.
    pub service_id: Option<Uuid>,
    /// Overall rating, 1..=5.
    pub overall_rating: i32,
    /// Quality sub-rating, 1..=5.
    pub quality_rating: Option<i32>,
    /// Communication sub-rating, 1..=5.
    pub communication_rating: Option<i32>,
    /// Value-for-money sub-rating, 1..=5.
    pub value_rating: Option<i32>,
    /// Timeliness sub-rating, 1..=5.
    pub timeliness_rating: Option<i32>,
    /// Short review headline.
    pub review_title: Option<String>,
    /// Full review text.
    pub review_text: Option<String>,
    /// Moderation state.
    pub status: RatingStatus,
    /// The admin who last moderated this rating.
    pub moderated_by_admin_id: Option<Uuid>,
    /// When the rating was last moderated.
    pub moderated_at: Option<DateTime<Utc>>,
    /// When the rating was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRating {
    /// The rating client's profile.
    pub client_id: Uuid,
    /// The rated member's profile.
    pub member_id: Uuid,
    /// What the rating targets.
    pub rating_category: RatingCategory,
    /// The rated product, if any.
    pub product_id: Option<Uuid>,
    /// The rated service, if any.
    pub service_id: Option<Uuid>,
    /// Overall rating, 1..=5.
    pub overall_rating: i32,
    /// Quality sub-rating.
    pub quality_rating: Option<i32>,
    /// Communication sub-rating.
    pub communication_rating: Option<i32>,
    /// Value-for-money sub-rating.
    pub value_rating: Option<i32>,
    /// Timeliness sub-rating.
    pub timeliness_rating: Option<i32>,
    /// Short review headline.
    pub review_title: Option<String>,
    /// Full review text.
    pub review_text: Option<String>,
}

/// Recomputed aggregate over a member's ACTIVE ratings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RatingAggregate {
    /// Mean overall rating (0 when there are no ratings).
    pub average: f32,
    /// Number of ACTIVE ratings.
    pub total: i32,
    /// Count of 1-star ratings.
    pub one_star: i32,
    /// Count of 2-star ratings.
    pub two_star: i32,
    /// Count of 3-star ratings.
    pub three_star: i32,
    /// Count of 4-star ratings.
    pub four_star: i32,
    /// Count of 5-star ratings.
    pub five_star: i32,
}

impl RatingAggregate {
    /// Compute the aggregate from a list of overall star values.
    pub fn from_stars(stars: &[i32]) -> Self {
        let mut agg = Self::default();
        for &s in stars {
            match s {
                1 => agg.one_star += 1,
                2 => agg.two_star += 1,
                3 => agg.three_star += 1,
                4 => agg.four_star += 1,
                5 => agg.five_star += 1,
                _ => continue,
            }
            agg.total += 1;
        }
        if agg.total > 0 {
            let sum: i32 = stars.iter().filter(|s| (1..=5).contains(*s)).sum();
            agg.average = sum as f32 / agg.total as f32;
        }
        agg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_from_stars() {
        let agg = RatingAggregate::from_stars(&[5, 5, 4, 3, 5]);
        assert_eq!(agg.total, 5);
        assert!((agg.average - 4.4).abs() < f32::EPSILON);
        assert_eq!(agg.five_star, 3);
        assert_eq!(agg.four_star, 1);
        assert_eq!(agg.three_star, 1);
        assert_eq!(agg.one_star, 0);
    }

    #[test]
    fn test_aggregate_after_hiding_one() {
        // Hiding one 5-star rating means recomputing over the remainder.
        let agg = RatingAggregate::from_stars(&[5, 4, 3, 5]);
        assert_eq!(agg.total, 4);
        assert!((agg.average - 4.25).abs() < f32::EPSILON);
        assert_eq!(agg.five_star, 2);
    }

    #[test]
    fn test_aggregate_empty() {
        let agg = RatingAggregate::from_stars(&[]);
        assert_eq!(agg.total, 0);
        assert_eq!(agg.average, 0.0);
    }
}
