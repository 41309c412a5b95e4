mod engagement;
mod foods;

pub(crate) use engagement::{Engagement, PgEngagementRepository};
pub(crate) use foods::{PgFoodsRepository, try_get_joined_food};
