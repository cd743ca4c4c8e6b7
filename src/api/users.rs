use std::sync::Arc;

use poem::Request;
use poem_openapi::param::Path;
use poem_openapi::payload::{Json, PlainText};
use poem_openapi::{OpenApi, Tags};

use crate::app_data::AppData;
use crate::coordinators::{AuthCoordinator, BookingCoordinator, UserCoordinator};
use crate::errors::{AuthError, BookingApiError, UserApiError};
use crate::providers::TokenProvider;
use crate::types::dto::auth::AuthenticatedUserDto;
use crate::types::dto::booking::{BookingRequest, UserBookingDto};
use crate::types::dto::common::EmptyResponse;
use crate::types::dto::user::{CreateUserRequest, UpdateUserInfoRequest, UserInfoDto, UserSummaryDto};
use crate::types::internal::context::RequestContext;

/// Resident directory, authentication and booking endpoints
pub struct UsersApi {
    auth_coordinator: Arc<AuthCoordinator>,
    user_coordinator: Arc<UserCoordinator>,
    booking_coordinator: Arc<BookingCoordinator>,
    token_provider: Arc<TokenProvider>,
}

impl UsersApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: Arc::new(AuthCoordinator::new(app_data.clone())),
            user_coordinator: Arc::new(UserCoordinator::new(app_data.clone())),
            booking_coordinator: Arc::new(BookingCoordinator::new(app_data.clone())),
            token_provider: app_data.providers.token_provider.clone(),
        }
    }

    fn context(&self, req: &Request) -> RequestContext {
        RequestContext::from_request(req, &self.token_provider)
    }
}

#[derive(Tags)]
enum UserTags {
    /// Residents and their profiles
    Users,
    /// Logon and token issuance
    Authentication,
    /// Amenity booking requests
    Bookings,
}

#[OpenApi]
impl UsersApi {
    /// Get an authorised user's profile
    #[oai(path = "/users/:user_id", method = "get", tag = "UserTags::Users")]
    async fn get_authorised_user_by_id(&self, user_id: Path<i32>) -> Result<Json<UserInfoDto>, UserApiError> {
        self.user_coordinator
            .get_authorised_user_by_id(user_id.0)
            .await
            .map(Json)
            .map_err(UserApiError::from_internal_error)
    }

    /// List all authorised users
    #[oai(path = "/users", method = "get", tag = "UserTags::Users")]
    async fn get_all_authorised_users(&self) -> Result<Json<Vec<UserSummaryDto>>, UserApiError> {
        self.user_coordinator
            .get_all_authorised_users()
            .await
            .map(Json)
            .map_err(UserApiError::from_internal_error)
    }

    /// Verify credentials and issue a bearer token
    ///
    /// The response carries the previous logon time; call
    /// `/users/lastLogon/update/{userId}` to record this one.
    #[oai(
        path = "/users/authenticate/:user_name/:pass_word",
        method = "post",
        tag = "UserTags::Authentication"
    )]
    async fn authenticate(
        &self,
        req: &Request,
        user_name: Path<String>,
        pass_word: Path<String>,
    ) -> Result<Json<AuthenticatedUserDto>, AuthError> {
        let ctx = self.context(req);

        self.auth_coordinator
            .authenticate(&ctx, &user_name.0, &pass_word.0)
            .await
            .map(Json)
            .map_err(AuthError::from_internal_error)
    }

    /// Record the current time as the user's last logon
    #[oai(path = "/users/lastLogon/update/:user_id", method = "post", tag = "UserTags::Users")]
    async fn update_last_logon(&self, req: &Request, user_id: Path<i32>) -> Result<PlainText<String>, UserApiError> {
        let ctx = self.context(req);

        self.user_coordinator
            .update_last_logon(&ctx, user_id.0)
            .await
            .map(PlainText)
            .map_err(UserApiError::from_internal_error)
    }

    /// Register a user with a profile and the Member role
    #[oai(path = "/users/create", method = "post", tag = "UserTags::Users")]
    async fn create_user(&self, req: &Request, body: Json<CreateUserRequest>) -> Result<EmptyResponse, UserApiError> {
        let ctx = self.context(req);

        self.user_coordinator
            .create_user(&ctx, body.0)
            .await
            .map(|_| EmptyResponse::Ok)
            .map_err(UserApiError::from_internal_error)
    }

    /// Update a profile (requires a bearer token with the Member role)
    #[oai(path = "/users/userInfo/update", method = "post", tag = "UserTags::Users")]
    async fn update_user_info(
        &self,
        req: &Request,
        body: Json<UpdateUserInfoRequest>,
    ) -> Result<EmptyResponse, UserApiError> {
        let ctx = self.context(req);

        self.user_coordinator
            .update_user_info(&ctx, body.0)
            .await
            .map(|_| EmptyResponse::Ok)
            .map_err(UserApiError::from_internal_error)
    }

    /// Search profiles by name or email
    #[oai(path = "/users/search", method = "post", tag = "UserTags::Users")]
    async fn search_user_info(&self, body: PlainText<String>) -> Result<Json<Vec<UserInfoDto>>, UserApiError> {
        self.user_coordinator
            .search_user_info(&body.0)
            .await
            .map(Json)
            .map_err(UserApiError::from_internal_error)
    }

    /// Request an amenity booking
    #[oai(path = "/users/booking", method = "post", tag = "UserTags::Bookings")]
    async fn save_booking(&self, req: &Request, body: Json<BookingRequest>) -> Result<EmptyResponse, BookingApiError> {
        let ctx = self.context(req);

        self.booking_coordinator
            .save_booking(&ctx, body.0)
            .await
            .map(|_| EmptyResponse::Ok)
            .map_err(BookingApiError::from_internal_error)
    }

    /// A user's booking requests ordered by start time
    #[oai(path = "/users/requests/:user_id", method = "get", tag = "UserTags::Bookings")]
    async fn get_users_bookings(&self, user_id: Path<i32>) -> Result<Json<Vec<UserBookingDto>>, BookingApiError> {
        self.booking_coordinator
            .get_users_bookings(user_id.0)
            .await
            .map(Json)
            .map_err(BookingApiError::from_internal_error)
    }
}
