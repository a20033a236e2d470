pub mod env {
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const REDIS_HOST_NAME_ENV_VAR: &str = "REDIS_HOST_NAME";
    pub const MAILJET_API_KEY_ENV_VAR: &str = "MAILJET_API_KEY";
    pub const MAILJET_SECRET_KEY_ENV_VAR: &str = "MAILJET_SECRET_KEY";
    pub const OTP_SALT_ENV_VAR: &str = "OTP_SALT";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "MURMUR_ALLOWED_ORIGINS";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.mailjet.com/";
        pub const SENDER: &str = "no-reply@murmur.social";
        pub const SENDER_NAME: &str = "Murmur";
        pub const TIMEOUT: Duration = std::time::Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const SENDER_NAME: &str = "Murmur Test";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}
