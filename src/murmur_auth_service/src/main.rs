use color_eyre::eyre::Result;
use murmur_adapters::{
    Argon2PasswordHasher, JwtCodecConfig, JwtCredentialCodec, MailjetEmailClient,
    PostgresAccountStore, PostgresPasswordHistoryStore, PostgresSessionStore,
    RedisCredentialBlacklist, RedisEphemeralStore,
    config::{AuthServiceSetting, prod},
};
use murmur_auth_service::{AuthService, configure_postgresql, configure_redis};
use murmur_axum::{SessionLifetime, VerificationConfig};
use murmur_core::Email;
use reqwest::Client as HttpClient;
use secrecy::Secret;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    let config = AuthServiceSetting::load();

    // Setup database connection pool and run migrations
    let pg_pool = configure_postgresql(&config.postgres.url).await?;

    // Setup Redis connection, shared by the ephemeral store and blacklist
    let redis_conn = configure_redis(&config.redis.host_name)?;

    // Create stores
    let ephemeral_store = RedisEphemeralStore::new(redis_conn.clone());
    let account_store = PostgresAccountStore::new(pg_pool.clone());
    let password_history_store = PostgresPasswordHistoryStore::new(pg_pool.clone());
    let session_store = PostgresSessionStore::new(pg_pool);
    let credential_blacklist = RedisCredentialBlacklist::new(
        redis_conn,
        config.auth.jwt.refresh_ttl_in_seconds as u64,
    );

    // Credential codec and password hasher
    let credential_codec = JwtCredentialCodec::new(JwtCodecConfig {
        jwt_secret: config.auth.jwt.secret.clone(),
        access_ttl_in_seconds: config.auth.jwt.access_ttl_in_seconds,
    });
    let password_hasher = Argon2PasswordHasher::new();

    // Create email client
    let http_client = HttpClient::builder()
        .timeout(config.email_client.timeout())
        .build()?;

    let email_client = MailjetEmailClient::new(
        config.email_client.base_url.clone(),
        Email::try_from(Secret::from(config.email_client.sender.clone()))?,
        config.email_client.sender_name.clone(),
        config.email_client.api_key.clone(),
        config.email_client.secret_key.clone(),
        http_client,
    );

    // Create the auth service
    let auth_service = AuthService::new(
        ephemeral_store,
        account_store,
        password_history_store,
        session_store,
        credential_blacklist,
        credential_codec,
        password_hasher,
        email_client,
        VerificationConfig {
            otp_salt: config.auth.otp_salt.clone(),
        },
        SessionLifetime {
            refresh_ttl_in_seconds: config.auth.jwt.refresh_ttl_in_seconds,
        },
    );

    // Get allowed origins from config
    let allowed_origins = config.auth.allowed_origins.clone();

    // Run as standalone server
    let listener = tokio::net::TcpListener::bind(prod::APP_ADDRESS).await?;
    tracing::info!("Starting murmur auth service...");

    auth_service
        .run_standalone(listener, Some(allowed_origins))
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
