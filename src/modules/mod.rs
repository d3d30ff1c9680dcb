pub mod auth;
pub mod camps;
pub mod feedbacks;
pub mod payments;
pub mod registrations;
pub mod users;
