use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_feedbacks, submit_feedback};

pub fn init_feedbacks_router() -> Router<AppState> {
    Router::new().route("/feedbacks", get(get_feedbacks).post(submit_feedback))
}
