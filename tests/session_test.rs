//! Sign-in, session persistence and gate resolution against stub services.

mod common;

use common::TestContext;
use helpdesk::auth::{resolve_session, sign_in};
use helpdesk::config::AuthConfig;
use helpdesk::remote::HelpRequest;
use helpdesk::tui::gate::{GateScreen, screen_for};
use helpdesk::{Config, Credentials, HelpdeskError, SessionPhase};

#[tokio::test]
async fn test_first_run_lands_on_login() {
    let test = TestContext::new();
    let ctx = &test.ctx;

    let phase = resolve_session(&ctx.sessions, ctx.auth.as_ref(), ctx.auth_enabled()).await;
    assert!(matches!(phase, SessionPhase::Anonymous));
    assert_eq!(screen_for(&phase), GateScreen::Login);
}

#[tokio::test]
async fn test_sign_in_survives_restart() {
    let test = TestContext::new();
    let ctx = &test.ctx;

    let credentials = Credentials::new("ana@citimax.test", "hunter22").unwrap();
    let session = sign_in(&ctx.sessions, ctx.auth.as_ref(), &credentials)
        .await
        .unwrap();
    assert_eq!(session.email, "ana@citimax.test");

    let phase = resolve_session(&ctx.sessions, ctx.auth.as_ref(), true).await;
    assert_eq!(
        screen_for(&phase),
        GateScreen::Dashboard {
            user: "ana@citimax.test".to_string()
        }
    );

    ctx.sessions.clear().unwrap();
    let phase = resolve_session(&ctx.sessions, ctx.auth.as_ref(), true).await;
    assert_eq!(screen_for(&phase), GateScreen::Login);
}

#[tokio::test]
async fn test_wrong_password_is_not_persisted() {
    let test = TestContext::new();
    let ctx = &test.ctx;

    let credentials = Credentials::new("ana@citimax.test", "wrong").unwrap();
    let err = sign_in(&ctx.sessions, ctx.auth.as_ref(), &credentials)
        .await
        .unwrap_err();
    assert!(matches!(err, HelpdeskError::Auth(_)));
    assert!(ctx.sessions.load().unwrap().is_none());
}

#[tokio::test]
async fn test_disabled_auth_skips_login() {
    let config = Config {
        auth: AuthConfig {
            enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let test = TestContext::with_config(config);
    let ctx = &test.ctx;

    let phase = resolve_session(&ctx.sessions, ctx.auth.as_ref(), ctx.auth_enabled()).await;
    assert_eq!(
        screen_for(&phase),
        GateScreen::Dashboard {
            user: "guest".to_string()
        }
    );
}

#[tokio::test]
async fn test_help_request_reaches_relay() {
    let test = TestContext::new();

    let request = HelpRequest::new("ben@citimax.test", "Locked out of email").unwrap();
    test.ctx.relay.submit(&request).await.unwrap();

    let submitted = test.relay.submitted.lock().unwrap();
    assert_eq!(
        submitted.as_slice(),
        [(
            "ben@citimax.test".to_string(),
            "Locked out of email".to_string()
        )]
    );
}

#[test]
fn test_help_request_requires_both_fields() {
    assert!(matches!(
        HelpRequest::new("", "Locked out"),
        Err(HelpdeskError::Validation(_))
    ));
    assert!(matches!(
        HelpRequest::new("ben@citimax.test", "   "),
        Err(HelpdeskError::Validation(_))
    ));
}
