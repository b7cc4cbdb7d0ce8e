//! Login form state, the simulated credential check and the session flag.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};

use async_trait::async_trait;
use shared::{
    domain::Credentials,
    error::{AuthenticationError, ValidationError},
    validation::validate_credentials,
};
use tokio::{sync::watch, task::JoinHandle};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use crate::config::ShellConfig;

pub const ACCEPTED_IDENTIFIER: &str = "test@app.com";
pub const ACCEPTED_SECRET: &str = "password";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFormState {
    pub identifier: String,
    pub secret: String,
    pub is_submitting: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub authenticated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was valid and the credential check is running.
    Started,
    /// Input was rejected before any async work.
    Rejected(ValidationError),
    /// An earlier attempt is still pending; nothing changed.
    AlreadyPending,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<(), AuthenticationError>;
}

/// Accepts only the built-in demo account after a fixed latency.
pub struct FixedCredentialAuthenticator {
    latency: Duration,
}

impl FixedCredentialAuthenticator {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl Authenticator for FixedCredentialAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<(), AuthenticationError> {
        tokio::time::sleep(self.latency).await;
        if credentials.identifier == ACCEPTED_IDENTIFIER && credentials.secret == ACCEPTED_SECRET {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }
}

pub struct AuthSessionController {
    inner: Arc<AuthInner>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

struct AuthInner {
    form: watch::Sender<LoginFormState>,
    session: watch::Sender<SessionState>,
    // Bumped by every logout so a pending attempt can tell the session was closed.
    session_epoch: AtomicU64,
    authenticator: Arc<dyn Authenticator>,
}

impl AuthSessionController {
    pub fn new(config: &ShellConfig) -> Self {
        Self::with_authenticator(Arc::new(FixedCredentialAuthenticator::new(
            config.login_delay,
        )))
    }

    pub fn with_authenticator(authenticator: Arc<dyn Authenticator>) -> Self {
        let (form, _) = watch::channel(LoginFormState::default());
        let (session, _) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(AuthInner {
                form,
                session,
                session_epoch: AtomicU64::new(0),
                authenticator,
            }),
            pending: Mutex::new(None),
        }
    }

    pub fn form(&self) -> LoginFormState {
        self.inner.form.borrow().clone()
    }

    pub fn session(&self) -> SessionState {
        *self.inner.session.borrow()
    }

    pub fn subscribe_form(&self) -> watch::Receiver<LoginFormState> {
        self.inner.form.subscribe()
    }

    pub fn subscribe_session(&self) -> watch::Receiver<SessionState> {
        self.inner.session.subscribe()
    }

    pub fn session_stream(&self) -> WatchStream<SessionState> {
        WatchStream::new(self.subscribe_session())
    }

    pub fn set_identifier(&self, value: impl Into<String>) {
        let value = value.into();
        self.inner.form.send_if_modified(|form| {
            if form.identifier == value {
                return false;
            }
            form.identifier = value;
            true
        });
    }

    pub fn set_secret(&self, value: impl Into<String>) {
        let value = value.into();
        self.inner.form.send_if_modified(|form| {
            if form.secret == value {
                return false;
            }
            form.secret = value;
            true
        });
    }

    pub fn submit(&self) -> SubmitOutcome {
        let mut outcome = SubmitOutcome::AlreadyPending;
        let mut accepted = None;

        self.inner.form.send_if_modified(|form| {
            if form.is_submitting {
                return false;
            }
            form.error = None;
            let credentials = Credentials::new(form.identifier.clone(), form.secret.clone());
            match validate_credentials(&credentials) {
                Err(err) => {
                    form.error = Some(err.to_string());
                    outcome = SubmitOutcome::Rejected(err);
                }
                Ok(()) => {
                    form.is_submitting = true;
                    accepted = Some(credentials);
                    outcome = SubmitOutcome::Started;
                }
            }
            true
        });

        match outcome {
            SubmitOutcome::AlreadyPending => {
                debug!("login: submit ignored while an attempt is pending");
            }
            SubmitOutcome::Rejected(err) => {
                debug!(reason = %err, "login: input rejected");
            }
            SubmitOutcome::Started => {}
        }

        let Some(credentials) = accepted else {
            return outcome;
        };

        let epoch = self.inner.session_epoch.load(Ordering::SeqCst);
        info!(identifier = %credentials.identifier, "login: attempt started");
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            inner.resolve_attempt(credentials, epoch).await;
        });
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }

        outcome
    }

    /// Closes the session. Form fields are kept as they are.
    pub fn logout(&self) {
        self.inner.session_epoch.fetch_add(1, Ordering::SeqCst);
        let changed = self.inner.session.send_if_modified(|session| {
            let was_authenticated = session.authenticated;
            session.authenticated = false;
            was_authenticated
        });
        if changed {
            info!("login: session closed");
        }
    }

    /// Cancels any pending attempt and releases the controller.
    pub fn dispose(self) {
        debug!("login: controller disposed");
    }

    fn cancel_pending(&self) {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = pending {
            task.abort();
        }
    }
}

impl Drop for AuthSessionController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

impl AuthInner {
    async fn resolve_attempt(&self, credentials: Credentials, epoch: u64) {
        let result = self.authenticator.authenticate(&credentials).await;
        let session_closed = self.session_epoch.load(Ordering::SeqCst) != epoch;

        match result {
            Ok(()) if session_closed => {
                warn!(
                    identifier = %credentials.identifier,
                    "login: attempt resolved after logout; session stays closed"
                );
            }
            Ok(()) => {
                self.session.send_replace(SessionState {
                    authenticated: true,
                });
                info!(identifier = %credentials.identifier, "login: authenticated");
            }
            Err(err) => {
                info!(identifier = %credentials.identifier, reason = %err, "login: rejected");
                self.form.send_modify(|form| form.error = Some(err.to_string()));
            }
        }

        self.form.send_modify(|form| form.is_submitting = false);
    }
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
