pub mod account;
pub mod email;
pub mod otp_code;
pub mod password;
pub mod session;
pub mod single_use_token;
pub mod username;
pub mod verification_flow;
