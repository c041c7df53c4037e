use crate::auth::password::verify_password;
use crate::database::error::StoreError;
use crate::error::{RequestError, ValidationError};
use crate::models::user::{
    EditProfileRequest, LogInRequest, UpdateProfilePictureRequest, UpdateSocialLinksRequest,
};
use crate::models::IdParam;
use crate::tests::{link, memory_state, sign_up_request};

fn log_in_request(email: &str, password: &str) -> LogInRequest {
    LogInRequest {
        email: Some(email.to_string()),
        password: Some(password.to_string()),
    }
}

#[tokio::test]
async fn sign_up_stores_hash_and_returns_token() {
    let (store, state) = memory_state();

    let response = state
        .users
        .sign_up(sign_up_request("a@x.com", "a_user", "hunter22"))
        .await
        .unwrap();
    assert_eq!(response.user.email, "a@x.com");
    assert_eq!(response.user.social_links.len(), 1);

    let claims = state.tokens.verify(&response.token).unwrap();
    assert_eq!(claims.user_id().unwrap(), response.user.id);
    assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);

    let stored = store.stored_user("a@x.com").unwrap();
    assert_ne!(stored.password_hash, "hunter22");
    assert!(verify_password("hunter22", &stored.password_hash));
}

#[tokio::test]
async fn sign_up_rejects_taken_email() {
    let (store, state) = memory_state();
    state
        .users
        .sign_up(sign_up_request("a@x.com", "a_user", "hunter22"))
        .await
        .unwrap();

    let second = state
        .users
        .sign_up(sign_up_request("a@x.com", "other_user", "hunter33"))
        .await;
    assert!(matches!(
        second,
        Err(RequestError::Validation(ValidationError::AlreadyExists))
    ));
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn sign_up_rejects_taken_username() {
    let (store, state) = memory_state();
    state
        .users
        .sign_up(sign_up_request("a@x.com", "a_user", "hunter22"))
        .await
        .unwrap();

    let second = state
        .users
        .sign_up(sign_up_request("b@x.com", "a_user", "hunter33"))
        .await;
    assert!(matches!(
        second,
        Err(RequestError::Store(StoreError::UniqueViolation { .. }))
    ));
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn sign_up_rejects_missing_fields() {
    let (store, state) = memory_state();
    let mut request = sign_up_request("a@x.com", "a_user", "hunter22");
    request.password = Some("   ".to_string());

    let result = state.users.sign_up(request).await;
    assert!(matches!(
        result,
        Err(RequestError::Validation(ValidationError::MissingFields))
    ));
    assert_eq!(store.user_count(), 0);
}

#[tokio::test]
async fn log_in_checks_password() {
    let (_, state) = memory_state();
    let signed_up = state
        .users
        .sign_up(sign_up_request("a@x.com", "a_user", "hunter22"))
        .await
        .unwrap();

    let logged_in = state
        .users
        .log_in(log_in_request("a@x.com", "hunter22"))
        .await
        .unwrap();
    assert_eq!(logged_in.user.id, signed_up.user.id);
    let claims = state.tokens.verify(&logged_in.token).unwrap();
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);

    let wrong = state
        .users
        .log_in(log_in_request("a@x.com", "hunter23"))
        .await;
    assert!(matches!(wrong, Err(RequestError::BadCredentials)));
}

#[tokio::test]
async fn log_in_unknown_email() {
    let (_, state) = memory_state();
    let result = state
        .users
        .log_in(log_in_request("nobody@x.com", "hunter22"))
        .await;
    assert!(matches!(result, Err(RequestError::UnknownUser)));
}

#[tokio::test]
async fn edit_profile_rehashes_password_and_replaces_links() {
    let (store, state) = memory_state();
    let created = state
        .users
        .sign_up(sign_up_request("a@x.com", "a_user", "hunter22"))
        .await
        .unwrap()
        .user;

    let mut profile = sign_up_request("a@x.com", "renamed", "new-password");
    profile.sociallinks = Some(vec![link("mastodon"), link("gitlab")]);
    let request = EditProfileRequest {
        id: Some(IdParam::Text(created.id.to_string())),
        profile,
    };
    let edited = state.users.edit_profile(created.id, request).await.unwrap();

    assert_eq!(edited.user.username, "renamed");
    let names: Vec<_> = edited
        .user
        .social_links
        .iter()
        .map(|link| link.name.as_str())
        .collect();
    assert_eq!(names, ["mastodon", "gitlab"]);
    assert!(state.tokens.verify(&edited.token).is_ok());

    let stored = store.stored_user("a@x.com").unwrap();
    assert!(verify_password("new-password", &stored.password_hash));
    assert!(!verify_password("hunter22", &stored.password_hash));
}

#[tokio::test]
async fn edit_profile_of_unknown_user() {
    let (_, state) = memory_state();
    let request = EditProfileRequest {
        id: Some(IdParam::Number(42)),
        profile: sign_up_request("a@x.com", "a_user", "hunter22"),
    };
    let result = state.users.edit_profile(42, request).await;
    assert!(matches!(
        result,
        Err(RequestError::Validation(ValidationError::NotFound))
    ));
}

#[tokio::test]
async fn edit_profile_of_another_user_is_forbidden() {
    let (store, state) = memory_state();
    let victim = state
        .users
        .sign_up(sign_up_request("a@x.com", "a_user", "hunter22"))
        .await
        .unwrap()
        .user;
    let intruder = state
        .users
        .sign_up(sign_up_request("b@x.com", "b_user", "hunter33"))
        .await
        .unwrap()
        .user;

    let request = EditProfileRequest {
        id: Some(IdParam::Number(victim.id.into())),
        profile: sign_up_request("a@x.com", "a_user", "taken-over"),
    };
    let result = state.users.edit_profile(intruder.id, request).await;
    assert!(matches!(result, Err(RequestError::Forbidden)));

    let stored = store.stored_user("a@x.com").unwrap();
    assert!(verify_password("hunter22", &stored.password_hash));
}

#[tokio::test]
async fn update_profile_picture() {
    let (_, state) = memory_state();
    let created = state
        .users
        .sign_up(sign_up_request("a@x.com", "a_user", "hunter22"))
        .await
        .unwrap()
        .user;

    let request = UpdateProfilePictureRequest {
        id: Some(IdParam::Number(created.id.into())),
        url: Some("https://pics/new.png".to_string()),
    };
    let updated = state
        .users
        .update_profile_picture(created.id, request)
        .await
        .unwrap();
    assert_eq!(updated.profile_picture_url, "https://pics/new.png");
    assert_eq!(updated.email, created.email);

    let request = UpdateProfilePictureRequest {
        id: Some(IdParam::Number(999)),
        url: Some("https://pics/new.png".to_string()),
    };
    let missing = state.users.update_profile_picture(999, request).await;
    assert!(matches!(
        missing,
        Err(RequestError::Validation(ValidationError::NotFound))
    ));

    let request = UpdateProfilePictureRequest {
        id: Some(IdParam::Number(created.id.into())),
        url: Some("https://pics/other.png".to_string()),
    };
    let foreign = state.users.update_profile_picture(999, request).await;
    assert!(matches!(foreign, Err(RequestError::Forbidden)));
}

#[tokio::test]
async fn update_social_links_replaces_set() {
    let (_, state) = memory_state();
    let created = state
        .users
        .sign_up(sign_up_request("a@x.com", "a_user", "hunter22"))
        .await
        .unwrap()
        .user;

    let request = UpdateSocialLinksRequest {
        user_id: Some(IdParam::Number(created.id.into())),
        social_links: Some(vec![link("linkedin")]),
    };
    let updated = state
        .users
        .update_social_links(created.id, request)
        .await
        .unwrap();
    assert_eq!(updated.social_links.len(), 1);
    assert_eq!(updated.social_links[0].name, "linkedin");
    assert_eq!(updated.social_links[0].user_id, created.id);

    let fetched = state
        .users
        .get_by_id(&created.id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.social_links, updated.social_links);

    let request = UpdateSocialLinksRequest {
        user_id: Some(IdParam::Number(created.id.into())),
        social_links: Some(vec![link("spam")]),
    };
    let foreign = state.users.update_social_links(created.id + 1, request).await;
    assert!(matches!(foreign, Err(RequestError::Forbidden)));
}

#[tokio::test]
async fn lookups_by_id_email_and_username() {
    let (_, state) = memory_state();
    let created = state
        .users
        .sign_up(sign_up_request("a@x.com", "a_user", "hunter22"))
        .await
        .unwrap()
        .user;

    let by_id = state.users.get_by_id(&created.id.to_string()).await.unwrap();
    assert_eq!(by_id.map(|user| user.id), Some(created.id));

    let by_email = state
        .users
        .get_by_email(Some("a@x.com".to_string()))
        .await
        .unwrap();
    assert_eq!(by_email.map(|user| user.username), Some("a_user".to_string()));

    let by_username = state
        .users
        .get_by_username(Some("a_user".to_string()))
        .await
        .unwrap();
    assert_eq!(by_username.map(|user| user.email), Some("a@x.com".to_string()));

    assert!(state.users.get_by_id("77").await.unwrap().is_none());
    assert!(state
        .users
        .get_by_email(Some("b@x.com".to_string()))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn lookups_reject_bad_input() {
    let (_, state) = memory_state();
    assert!(matches!(
        state.users.get_by_id("abc").await,
        Err(RequestError::Validation(ValidationError::InvalidInput { .. }))
    ));
    assert!(matches!(
        state.users.get_by_username(None).await,
        Err(RequestError::Validation(ValidationError::MissingFields))
    ));
}
