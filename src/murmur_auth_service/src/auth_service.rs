use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, patch, post},
};
use murmur_adapters::config::AllowedOrigins;
use murmur_axum::{
    SessionLifetime, VerificationConfig,
    routes::{
        check_username, login, logout, refresh_session, register, reset_password,
        send_verification, verify_email,
    },
};
use murmur_core::{
    AccountStore, CredentialBlacklist, CredentialCodec, EmailClient, EphemeralStore,
    PasswordHasher, PasswordHistoryStore, SessionStore,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Main authentication service that provides all credential and session
/// lifecycle routes.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Create a new AuthService from the port implementations.
    ///
    /// # Note on Architecture
    /// Stores implement Clone via internal shared state for thread-safe
    /// sharing. Each route is given exactly the state it needs.
    #[allow(clippy::too_many_arguments)]
    pub fn new<Eph, A, P, Se, B, C, H, E>(
        ephemeral_store: Eph,
        account_store: A,
        password_history_store: P,
        session_store: Se,
        credential_blacklist: B,
        credential_codec: C,
        password_hasher: H,
        email_client: E,
        verification: VerificationConfig,
        session_lifetime: SessionLifetime,
    ) -> Self
    where
        Eph: EphemeralStore + Clone + 'static,
        A: AccountStore + Clone + 'static,
        P: PasswordHistoryStore + Clone + 'static,
        Se: SessionStore + Clone + 'static,
        B: CredentialBlacklist + Clone + 'static,
        C: CredentialCodec + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let router = Router::new()
            // Starting a proof needs the ephemeral store, accounts and mail
            .route("/send-verification", post(send_verification::<Eph, A, E>))
            .with_state((
                ephemeral_store.clone(),
                account_store.clone(),
                email_client,
                verification.clone(),
            ))
            // Confirming a code only touches the ephemeral store
            .route("/verify-email", post(verify_email::<Eph>))
            .with_state((ephemeral_store.clone(), verification))
            // Registration consumes the token and creates the account
            .route("/register", post(register::<A, Eph, H>))
            .with_state((
                account_store.clone(),
                ephemeral_store.clone(),
                password_hasher.clone(),
            ))
            .route("/check-username", get(check_username::<A>))
            .with_state(account_store.clone())
            // Login opens a session
            .route("/login", post(login::<A, Se, C, H>))
            .with_state((
                account_store.clone(),
                session_store.clone(),
                credential_codec.clone(),
                password_hasher.clone(),
                session_lifetime.clone(),
            ))
            // Rotation needs the session row and both revocation layers
            .route("/token/refresh", post(refresh_session::<Se, C, B>))
            .with_state((
                session_store.clone(),
                credential_codec.clone(),
                credential_blacklist.clone(),
                session_lifetime,
            ))
            .route("/logout", post(logout::<Se, C, B>))
            .with_state((
                session_store.clone(),
                credential_codec,
                credential_blacklist.clone(),
            ))
            // Reset composes the whole stack
            .route(
                "/reset-password",
                patch(reset_password::<Eph, A, P, H, Se, B>),
            )
            .with_state((
                ephemeral_store,
                account_store,
                password_history_store,
                password_hasher,
                session_store,
                credential_blacklist,
            ));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AuthService into a nested router that can be mounted on
    /// another application.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
