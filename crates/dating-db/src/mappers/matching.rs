//! Swipe and match model -> entity mappers

use dating_core::entities::{Match, Swipe};
use dating_core::value_objects::UserId;

use crate::models::{MatchModel, SwipeModel};

impl From<SwipeModel> for Swipe {
    fn from(model: SwipeModel) -> Self {
        Swipe {
            user_id: UserId::new(model.user_id),
            swiped_user_id: UserId::new(model.swiped_user_id),
            interested: model.swipe_status,
            created_at: model.created_at,
        }
    }
}

impl From<MatchModel> for Match {
    fn from(model: MatchModel) -> Self {
        Match {
            id: model.id,
            user1_id: UserId::new(model.user1_id),
            user2_id: UserId::new(model.user2_id),
            created_at: model.created_at,
        }
    }
}
