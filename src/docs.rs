use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use carecamp_core::pagination::PaginationMeta;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{IssueTokenDto, MessageResponse, TokenResponse};
use crate::modules::camps::model::{Camp, CreateCampDto, UpdateCampDto};
use crate::modules::feedbacks::model::{Feedback, SubmitFeedbackDto};
use crate::modules::payments::model::{
    CreatePaymentIntentDto, Payment, PaymentIntentResponse, RecordPaymentDto,
};
use crate::modules::registrations::model::{
    CreateRegistrationDto, PaginatedRegistrationsResponse, Registration,
};
use crate::modules::users::model::{
    AdminStatusResponse, PaginatedUsersResponse, UpdateProfileDto, UpsertUserDto, User,
};
use crate::modules::{auth, camps, feedbacks, payments, registrations, users};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::controller::issue_token,
        auth::controller::logout,
        users::controller::create_user,
        users::controller::get_users,
        users::controller::update_profile,
        users::controller::delete_user,
        users::controller::get_admin_status,
        camps::controller::get_camps,
        camps::controller::get_camp,
        camps::controller::create_camp,
        camps::controller::update_camp,
        camps::controller::delete_camp,
        registrations::controller::create_registration,
        registrations::controller::get_registrations,
        registrations::controller::confirm_registration,
        registrations::controller::get_user_registrations,
        registrations::controller::get_user_registration,
        registrations::controller::delete_registration,
        registrations::controller::cancel_registration,
        payments::controller::create_payment_intent,
        payments::controller::record_payment,
        payments::controller::get_payment_history,
        feedbacks::controller::get_feedbacks,
        feedbacks::controller::submit_feedback,
    ),
    components(schemas(
        IssueTokenDto,
        TokenResponse,
        MessageResponse,
        ErrorResponse,
        User,
        UpsertUserDto,
        UpdateProfileDto,
        PaginatedUsersResponse,
        AdminStatusResponse,
        Camp,
        CreateCampDto,
        UpdateCampDto,
        Registration,
        CreateRegistrationDto,
        PaginatedRegistrationsResponse,
        Payment,
        CreatePaymentIntentDto,
        PaymentIntentResponse,
        RecordPaymentDto,
        Feedback,
        SubmitFeedbackDto,
        PaginationMeta,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Session token issuance and logout"),
        (name = "Users", description = "Accounts and profiles"),
        (name = "Camps", description = "Medical camp listings"),
        (name = "Registrations", description = "Camp enrollments"),
        (name = "Payments", description = "Checkout and payment history"),
        (name = "Feedbacks", description = "Participant feedback"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
            );
        }
    }
}
