use murmur_core::{Email, EmailClient};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

#[derive(Clone)]
pub struct MailjetEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    sender_name: String,
    api_key: Secret<String>,
    secret_key: Secret<String>,
}

impl MailjetEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        sender_name: String,
        api_key: Secret<String>,
        secret_key: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            sender_name,
            api_key,
            secret_key,
        }
    }
}

#[async_trait::async_trait]
impl EmailClient for MailjetEmailClient {
    #[tracing::instrument(name = "Sending email", skip_all)]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        let base = Url::parse(&self.base_url).map_err(|e| e.to_string())?;
        let url = base.join(SEND_PATH).map_err(|e| e.to_string())?;

        let request_body = SendEmailRequest {
            messages: vec![Message {
                from: Participant {
                    email: self.sender.as_ref().expose_secret(),
                    name: &self.sender_name,
                },
                to: vec![Participant {
                    email: recipient.as_ref().expose_secret(),
                    name: "You",
                }],
                subject,
                text_part: content,
                html_part: content,
            }],
        };

        let request = self
            .http_client
            .post(url)
            .basic_auth(
                self.api_key.expose_secret(),
                Some(self.secret_key.expose_secret()),
            )
            .json(&request_body);

        request
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

const SEND_PATH: &str = "/v3.1/send";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    messages: Vec<Message<'a>>,
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct Message<'a> {
    from: Participant<'a>,
    to: Vec<Participant<'a>>,
    subject: &'a str,
    text_part: &'a str,
    #[serde(rename = "HTMLPart")]
    html_part: &'a str,
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct Participant<'a> {
    email: &'a str,
    name: &'a str,
}
