//! # Murmur - Credential & Session Lifecycle Library
//!
//! This is a facade crate that re-exports the public APIs of the murmur
//! service components. Use this crate to get access to the whole
//! credential and session lifecycle stack in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Username`, `OtpCode`,
//!   `SingleUseToken`, `SessionRecord`, etc.
//! - **Port traits**: `EphemeralStore`, `AccountStore`, `SessionStore`,
//!   `PasswordHistoryStore`, `CredentialBlacklist`, `CredentialCodec`,
//!   `PasswordHasher`, `EmailClient`
//! - **Use cases**: `InitiateVerificationUseCase`, `LoginUseCase`,
//!   `RotateSessionUseCase`, `ResetPasswordUseCase`, etc.
//! - **Adapters**: `RedisEphemeralStore`, `PostgresAccountStore`,
//!   `JwtCredentialCodec`, `MailjetEmailClient`, etc.
//! - **Service**: `AuthService` - the main entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use murmur_core::*;
}

// Re-export most commonly used core types at the root level
pub use murmur_core::{
    Account, ClientOrigin, Email, OtpCode, Password, SessionRecord, SingleUseToken, Username,
    VerificationFlow,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use murmur_core::{
        AccountStore, AccountStoreError, CredentialBlacklist, CredentialBlacklistError,
        CredentialCodec, CredentialCodecError, EmailClient, EphemeralStore, EphemeralStoreError,
        PasswordHasher, PasswordHasherError, PasswordHistoryStore, PasswordHistoryStoreError,
        RefreshClaims, SessionRotation, SessionStore, SessionStoreError,
    };
}

// Re-export port traits at root level
pub use murmur_core::{
    AccountStore, CredentialBlacklist, CredentialCodec, EmailClient, EphemeralStore,
    PasswordHasher, PasswordHistoryStore, SessionStore,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use murmur_application::*;
}

// Re-export use cases at root level
pub use murmur_application::{
    ConfirmVerificationUseCase, InitiateVerificationUseCase, LoginUseCase, LogoutUseCase,
    RegisterUseCase, ResetPasswordUseCase, RevocationCoordinator, RotateSessionUseCase,
    SingleUseTokenIssuer,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use murmur_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use murmur_adapters::email::*;
    }

    /// Credential codec implementations
    pub mod credentials {
        pub use murmur_adapters::credentials::*;
    }

    /// Password hashing
    pub mod hashing {
        pub use murmur_adapters::hashing::*;
    }

    /// Configuration
    pub mod config {
        pub use murmur_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use murmur_adapters::{
    Argon2PasswordHasher, JwtCodecConfig, JwtCredentialCodec, MailjetEmailClient, MockEmailClient,
    persistence::{
        InMemoryAccountStore, InMemoryCredentialBlacklist, InMemoryEphemeralStore,
        InMemoryPasswordHistoryStore, InMemorySessionStore, PostgresAccountStore,
        PostgresPasswordHistoryStore, PostgresSessionStore, RedisCredentialBlacklist,
        RedisEphemeralStore,
    },
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use murmur_auth_service::{
    AuthService, configure_postgresql, configure_redis, get_redis_client,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
