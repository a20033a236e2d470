pub mod check_username;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod reset_password;
pub mod send_verification;
pub mod verify_email;

pub use check_username::check_username;
pub use login::login;
pub use logout::logout;
pub use refresh::refresh_session;
pub use register::register;
pub use reset_password::reset_password;
pub use send_verification::send_verification;
pub use verify_email::verify_email;
