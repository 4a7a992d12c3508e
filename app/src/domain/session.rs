//! Login form submission and session state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::calls::call_service;
use crate::domain::ports::{ListingService, NoticeSink};
use crate::domain::sync::lock;
use crate::domain::{Error, LoginCredentials, LoginValidationError, Notice};

/// Result of [`SessionController::login`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// The credentials were accepted; the session is authenticated.
    Authenticated,
    /// The service rejected the credentials.
    Rejected,
    /// A field was blank; the service was not called.
    Invalid(LoginValidationError),
    /// The call failed or timed out.
    Failed(Error),
    /// Another login is in flight.
    InFlight,
}

impl LoginOutcome {
    /// Domain error for a login that did not authenticate.
    pub fn error(&self) -> Option<Error> {
        match self {
            Self::Rejected => Some(Error::authentication_failed("invalid credentials")),
            Self::Invalid(reason) => Some(Error::invalid_request(reason.to_string())),
            Self::Failed(error) => Some(error.clone()),
            Self::Authenticated | Self::InFlight => None,
        }
    }
}

/// Rendering copy of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    username: Option<String>,
    logging_in: bool,
}

impl SessionSnapshot {
    /// Signed-in user, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Whether a session is established.
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    /// Whether a login call is in flight.
    pub fn is_logging_in(&self) -> bool {
        self.logging_in
    }
}

/// State machine behind the login screen.
pub struct SessionController<S> {
    service: Arc<S>,
    notices: Arc<dyn NoticeSink>,
    request_timeout: Duration,
    state: Mutex<SessionSnapshot>,
}

impl<S> SessionController<S> {
    /// Create a signed-out session.
    pub fn new(service: Arc<S>, notices: Arc<dyn NoticeSink>, request_timeout: Duration) -> Self {
        Self {
            service,
            notices,
            request_timeout,
            state: Mutex::new(SessionSnapshot::default()),
        }
    }

    /// Copy of the session for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        lock(&self.state).clone()
    }

    /// Whether a session is established.
    pub fn is_authenticated(&self) -> bool {
        lock(&self.state).is_authenticated()
    }

    /// Whether the login button should be enabled for the given field values.
    pub fn can_submit(&self, username: &str, password: &str) -> bool {
        LoginCredentials::validate(username, password).is_ok()
            && !lock(&self.state).logging_in
    }

    /// Sign out.
    pub fn logout(&self) {
        let mut state = lock(&self.state);
        if let Some(username) = state.username.take() {
            info!(%username, "signed out");
        }
    }
}

impl<S> SessionController<S>
where
    S: ListingService,
{
    /// Submit the login form.
    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        let credentials = match LoginCredentials::try_from_parts(username, password) {
            Ok(credentials) => credentials,
            Err(error) => {
                debug!(%error, "login form incomplete");
                self.notices.publish(Notice::error(
                    "Error",
                    "Please enter both username and password",
                ));
                return LoginOutcome::Invalid(error);
            }
        };

        {
            let mut state = lock(&self.state);
            if state.logging_in {
                return LoginOutcome::InFlight;
            }
            state.logging_in = true;
        }

        let result = call_service(
            "login",
            self.request_timeout,
            self.service.authenticate(&credentials),
        )
        .await;

        let outcome = {
            let mut state = lock(&self.state);
            state.logging_in = false;
            match result {
                Ok(true) => {
                    state.username = Some(credentials.username().to_owned());
                    LoginOutcome::Authenticated
                }
                Ok(false) => LoginOutcome::Rejected,
                Err(error) => LoginOutcome::Failed(error),
            }
        };

        match &outcome {
            LoginOutcome::Authenticated => {
                info!(username = credentials.username(), "signed in");
            }
            LoginOutcome::Rejected => {
                info!(username = credentials.username(), "credentials rejected");
                self.notices
                    .publish(Notice::error("Login Failed", "Invalid credentials"));
            }
            LoginOutcome::Failed(error) => {
                warn!(%error, "login request failed");
                self.notices
                    .publish(Notice::error("Error", "An error occurred while logging in"));
            }
            LoginOutcome::Invalid(_) | LoginOutcome::InFlight => {}
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::calls::DEFAULT_REQUEST_TIMEOUT;
    use crate::domain::ports::{ListingServiceError, MockListingService, MockNoticeSink};
    use rstest::rstest;

    fn make_session(
        service: MockListingService,
        notices: MockNoticeSink,
    ) -> SessionController<MockListingService> {
        SessionController::new(Arc::new(service), Arc::new(notices), DEFAULT_REQUEST_TIMEOUT)
    }

    fn notices_expecting(title: &'static str, body: &'static str) -> MockNoticeSink {
        let mut notices = MockNoticeSink::new();
        notices
            .expect_publish()
            .withf(move |notice| notice.title() == title && notice.body() == body)
            .times(1)
            .return_const(());
        notices
    }

    #[tokio::test]
    async fn accepted_credentials_authenticate() {
        let mut service = MockListingService::new();
        service
            .expect_authenticate()
            .withf(|credentials| {
                credentials.username() == "test" && credentials.password() == "password"
            })
            .times(1)
            .returning(|_| Ok(true));
        let mut notices = MockNoticeSink::new();
        notices.expect_publish().never();

        let session = make_session(service, notices);

        assert_eq!(
            session.login("test", "password").await,
            LoginOutcome::Authenticated
        );
        assert!(session.is_authenticated());
        assert_eq!(session.snapshot().username(), Some("test"));

        session.logout();
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn rejected_credentials_notify() {
        let mut service = MockListingService::new();
        service.expect_authenticate().returning(|_| Ok(false));

        let session = make_session(service, notices_expecting("Login Failed", "Invalid credentials"));

        assert_eq!(session.login("test", "wrong").await, LoginOutcome::Rejected);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn service_failure_notifies() {
        let mut service = MockListingService::new();
        service
            .expect_authenticate()
            .returning(|_| Err(ListingServiceError::unavailable("offline")));

        let session = make_session(
            service,
            notices_expecting("Error", "An error occurred while logging in"),
        );

        assert!(matches!(
            session.login("test", "password").await,
            LoginOutcome::Failed(_)
        ));
        assert!(!session.snapshot().is_logging_in());
    }

    #[rstest]
    #[case(LoginOutcome::Rejected, Some(ErrorCode::AuthenticationFailed))]
    #[case(
        LoginOutcome::Invalid(LoginValidationError::EmptyPassword),
        Some(ErrorCode::InvalidRequest)
    )]
    #[case(
        LoginOutcome::Failed(Error::service_unavailable("offline")),
        Some(ErrorCode::ServiceUnavailable)
    )]
    #[case(LoginOutcome::Authenticated, None)]
    #[case(LoginOutcome::InFlight, None)]
    fn outcomes_map_to_error_codes(#[case] outcome: LoginOutcome, #[case] code: Option<ErrorCode>) {
        assert_eq!(outcome.error().map(|error| error.code()), code);
    }

    #[tokio::test]
    async fn padded_username_signs_in_trimmed() {
        let mut service = MockListingService::new();
        service
            .expect_authenticate()
            .withf(|credentials| credentials.username() == "test")
            .times(1)
            .returning(|_| Ok(true));
        let mut notices = MockNoticeSink::new();
        notices.expect_publish().never();

        let session = make_session(service, notices);

        assert_eq!(
            session.login(" test ", "password").await,
            LoginOutcome::Authenticated
        );
        assert_eq!(session.snapshot().username(), Some("test"));
    }

    #[rstest]
    #[case("", "password", LoginValidationError::EmptyUsername)]
    #[case("   ", "password", LoginValidationError::EmptyUsername)]
    #[case("test", "", LoginValidationError::EmptyPassword)]
    #[tokio::test]
    async fn blank_fields_never_reach_the_service(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let mut service = MockListingService::new();
        service.expect_authenticate().never();

        let session = make_session(
            service,
            notices_expecting("Error", "Please enter both username and password"),
        );

        assert!(!session.can_submit(username, password));
        assert_eq!(
            session.login(username, password).await,
            LoginOutcome::Invalid(expected)
        );
    }
}
