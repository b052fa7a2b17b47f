use chrono::{DateTime, Utc};

use crate::models::{InteractionInput, InteractionType, NewInteraction};

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

/// Client-caused interaction validation failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid interaction type '{0}', expected one of view, like, dislike, rating, share, comment")]
    InvalidInteractionType(String),

    #[error("rating {0} is out of range, must be between 1.0 and 5.0")]
    RatingOutOfRange(f64),

    #[error("rating is required for interactions of type rating")]
    MissingRating,
}

/// Maps a raw interaction to its canonical form
///
/// Rules, in order:
/// 1. the type must be one of the six known kinds;
/// 2. a supplied rating must lie in `[1.0, 5.0]` and forces the type to `rating`;
/// 3. a `rating` interaction must carry a rating.
///
/// `now` becomes `created_at`; caller-supplied timestamps are never accepted.
pub fn validate_interaction(
    input: InteractionInput,
    now: DateTime<Utc>,
) -> Result<NewInteraction, ValidationError> {
    let mut interaction_type: InteractionType = input
        .interaction_type
        .parse()
        .map_err(|_| ValidationError::InvalidInteractionType(input.interaction_type.clone()))?;

    if let Some(rating) = input.rating {
        // NaN fails the range check as well
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ValidationError::RatingOutOfRange(rating));
        }
        interaction_type = InteractionType::Rating;
    }

    if interaction_type == InteractionType::Rating && input.rating.is_none() {
        return Err(ValidationError::MissingRating);
    }

    Ok(NewInteraction {
        user_id: input.user_id,
        content_id: input.content_id,
        interaction_type,
        rating: input.rating,
        created_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(interaction_type: &str, rating: Option<f64>) -> InteractionInput {
        InteractionInput {
            user_id: 1,
            content_id: 2,
            interaction_type: interaction_type.to_string(),
            rating,
        }
    }

    #[test]
    fn test_plain_view_is_accepted() {
        let now = Utc::now();
        let result = validate_interaction(input("view", None), now).unwrap();
        assert_eq!(result.interaction_type, InteractionType::View);
        assert_eq!(result.rating, None);
        assert_eq!(result.created_at, now);
        assert_eq!(result.user_id, 1);
        assert_eq!(result.content_id, 2);
    }

    #[test]
    fn test_rating_overrides_stated_type() {
        for kind in ["view", "like", "dislike", "share", "comment", "rating"] {
            let result = validate_interaction(input(kind, Some(4.5)), Utc::now()).unwrap();
            assert_eq!(result.interaction_type, InteractionType::Rating, "stated {}", kind);
            assert_eq!(result.rating, Some(4.5));
        }
    }

    #[test]
    fn test_rating_bounds_are_inclusive() {
        assert!(validate_interaction(input("rating", Some(1.0)), Utc::now()).is_ok());
        assert!(validate_interaction(input("rating", Some(5.0)), Utc::now()).is_ok());
    }

    #[test]
    fn test_rating_out_of_range() {
        for rating in [0.99, 5.01, -3.0, 10.0] {
            assert_eq!(
                validate_interaction(input("like", Some(rating)), Utc::now()),
                Err(ValidationError::RatingOutOfRange(rating))
            );
        }
    }

    #[test]
    fn test_nan_rating_is_out_of_range() {
        let result = validate_interaction(input("rating", Some(f64::NAN)), Utc::now());
        assert!(matches!(result, Err(ValidationError::RatingOutOfRange(_))));
    }

    #[test]
    fn test_missing_rating() {
        assert_eq!(
            validate_interaction(input("rating", None), Utc::now()),
            Err(ValidationError::MissingRating)
        );
    }

    #[test]
    fn test_invalid_type_checked_before_rating() {
        assert_eq!(
            validate_interaction(input("bookmark", Some(9.0)), Utc::now()),
            Err(ValidationError::InvalidInteractionType("bookmark".to_string()))
        );
    }

    #[test]
    fn test_validation_is_deterministic() {
        let now = Utc::now();
        let first = validate_interaction(input("comment", None), now);
        let second = validate_interaction(input("comment", None), now);
        assert_eq!(first, second);
    }
}
