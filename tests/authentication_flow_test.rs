mod common;

use chrono::{DateTime, Duration};

use society_backend::coordinators::{AdminCoordinator, AuthCoordinator, BookingCoordinator, UserCoordinator};
use society_backend::errors::internal::{AuthorizationError, CredentialError};
use society_backend::errors::{AuthError, InternalError};
use society_backend::providers::role_provider::{ROLE_ADMIN, ROLE_MEMBER, extract_roles};
use society_backend::types::dto::booking::BookingRequest;
use society_backend::types::dto::user::{CreateUserRequest, UpdateUserInfoRequest, UserProfileFields};
use society_backend::types::internal::context::RequestContext;

fn profile(first: &str, last: &str, email: &str) -> UserProfileFields {
    UserProfileFields {
        prim_first_name: first.to_string(),
        prim_middle_name: None,
        prim_last_name: last.to_string(),
        sec_first_name: None,
        sec_middle_name: None,
        sec_last_name: None,
        email_id: Some(email.to_string()),
        alter_email_id: None,
        primary_mobile: None,
        secondary_mobile: None,
        correspondence_address: Some("Tower B, Flat 1203".to_string()),
        is_board_member: false,
        is_secondary_owner: false,
    }
}

async fn register(users: &UserCoordinator, username: &str, first: &str, last: &str) -> i32 {
    users
        .create_user(
            &RequestContext::new(),
            CreateUserRequest {
                username: username.to_string(),
                password: "correct horse battery".to_string(),
                profile: profile(first, last, &format!("{}@society.example", username)),
            },
        )
        .await
        .expect("Failed to register user")
}

#[tokio::test]
async fn test_register_authenticate_and_update_profile() {
    let app_data = common::setup_app_data().await;
    let users = UserCoordinator::new(app_data.clone());
    let auth = AuthCoordinator::new(app_data.clone());
    let user_id = register(&users, "meera", "Meera", "Iyer").await;

    let session = auth
        .authenticate(&RequestContext::new(), "meera", "correct horse battery")
        .await
        .unwrap();
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.first_name, "Meera");
    assert_eq!(session.roles, extract_roles([ROLE_MEMBER]));

    // The issued token carries the persisted roles
    let principal = app_data.providers.token_provider.validate_token(&session.token).unwrap();
    assert_eq!(principal.user_id, user_id);
    assert!(principal.has_role(ROLE_MEMBER));

    let ctx = RequestContext::new().with_principal(principal);
    let before = users.get_authorised_user_by_id(user_id).await.unwrap();
    users
        .update_user_info(
            &ctx,
            UpdateUserInfoRequest {
                user_info_id: session.user_info_id,
                version: before.version,
                profile: profile("Meera", "Iyer-Shah", "meera@society.example"),
                flat_ids: None,
                parking_ids: None,
            },
        )
        .await
        .unwrap();

    let after = users.get_authorised_user_by_id(user_id).await.unwrap();
    assert_eq!(after.profile.prim_last_name, "Iyer-Shah");
    assert_eq!(users.search_user_info("shah").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_pairs_share_one_response() {
    let app_data = common::setup_app_data().await;
    let users = UserCoordinator::new(app_data.clone());
    let auth = AuthCoordinator::new(app_data.clone());
    register(&users, "meera", "Meera", "Iyer").await;

    let wrong_password = auth.authenticate(&RequestContext::new(), "meera", "nope").await;
    let unknown_user = auth.authenticate(&RequestContext::new(), "nobody", "nope").await;

    let messages: Vec<String> = [wrong_password, unknown_user]
        .into_iter()
        .map(|result| match result {
            Err(err @ InternalError::Credential(CredentialError::InvalidCredentials)) => {
                AuthError::from_internal_error(err).message()
            }
            other => panic!("Expected InvalidCredentials, got: {:?}", other.map(|_| ())),
        })
        .collect();

    assert_eq!(messages[0], messages[1]);
}

#[tokio::test]
async fn test_profile_update_without_member_role_changes_nothing() {
    let app_data = common::setup_app_data().await;
    let users = UserCoordinator::new(app_data.clone());
    let admin = AdminCoordinator::new(app_data.clone());
    let auth = AuthCoordinator::new(app_data.clone());
    let user_id = register(&users, "meera", "Meera", "Iyer").await;

    let cli = RequestContext::for_cli("revoke_role");
    assert!(admin.revoke_role(&cli, "meera", ROLE_MEMBER).await.unwrap());
    assert!(admin.grant_role(&cli, "meera", ROLE_ADMIN).await.unwrap());

    let session = auth
        .authenticate(&RequestContext::new(), "meera", "correct horse battery")
        .await
        .unwrap();
    assert_eq!(session.roles, extract_roles([ROLE_ADMIN]));

    let principal = app_data.providers.token_provider.validate_token(&session.token).unwrap();
    let before = users.get_authorised_user_by_id(user_id).await.unwrap();

    let result = users
        .update_user_info(
            &RequestContext::new().with_principal(principal),
            UpdateUserInfoRequest {
                user_info_id: before.user_info_id,
                version: before.version,
                profile: profile("Changed", "Name", "changed@society.example"),
                flat_ids: None,
                parking_ids: None,
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(InternalError::Authorization(AuthorizationError::RoleRequired { .. }))
    ));
    assert_eq!(users.get_authorised_user_by_id(user_id).await.unwrap(), before);
}

#[tokio::test]
async fn test_booking_history_is_ordered_by_start() {
    let app_data = common::setup_app_data().await;
    let users = UserCoordinator::new(app_data.clone());
    let admin = AdminCoordinator::new(app_data.clone());
    let bookings = BookingCoordinator::new(app_data.clone());
    let user_id = register(&users, "meera", "Meera", "Iyer").await;

    let cli = RequestContext::for_cli("add_amenity");
    let hall = admin.add_amenity(&cli, "Party Hall", None).await.unwrap();
    let court = admin.add_amenity(&cli, "Tennis Court", None).await.unwrap();

    assert!(bookings.get_users_bookings(user_id).await.unwrap().is_empty());

    let base = DateTime::from_timestamp(1_735_689_600, 0).unwrap();
    for (amenity_id, offset_days) in [(hall.amenity_id, 3), (court.amenity_id, 1)] {
        let start = base + Duration::days(offset_days);
        bookings
            .save_booking(
                &RequestContext::new(),
                BookingRequest {
                    user_id,
                    amenity_id,
                    start_time: start,
                    end_time: start + Duration::hours(2),
                    purpose: None,
                },
            )
            .await
            .unwrap();
    }

    let history = bookings.get_users_bookings(user_id).await.unwrap();
    let names: Vec<&str> = history.iter().map(|b| b.amenity_name.as_str()).collect();
    assert_eq!(names, vec!["Tennis Court", "Party Hall"]);
}
