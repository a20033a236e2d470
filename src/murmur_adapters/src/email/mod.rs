pub mod mailjet_email_client;
pub mod mock_email_client;

pub use mailjet_email_client::MailjetEmailClient;
pub use mock_email_client::{MockEmailClient, SentEmail};
