use crate::config::email_conf::SmtpSecurity;
use crate::config::{ConfigError, EmailConfig};
use crate::model::quote::Quote;
use crate::service::quote_service::QuoteNotifier;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info, instrument};

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("SMTP error: {0}")]
    SmtpError(String),

    #[error("Message building error: {0}")]
    MessageError(String),

    #[error("Address error: {0}")]
    AddressError(String),
}

impl From<ConfigError> for EmailError {
    fn from(err: ConfigError) -> Self {
        EmailError::ConfigError(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub bcc: Option<String>,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Quote confirmations over SMTP.
pub struct SmtpEmailService {
    pub config: EmailConfig,
    /// Brand shown in subjects and signatures
    pub site_name: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    #[instrument(skip(config), fields(host = %config.smtp_host, port = config.smtp_port))]
    pub fn new(config: EmailConfig, site_name: String) -> Result<Self, EmailError> {
        info!("Initializing SMTP email service");
        config.validate()?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            .port(config.smtp_port)
            .timeout(Some(std::time::Duration::from_secs(config.connection_timeout_secs)));

        let tls = match config.security {
            SmtpSecurity::None => Tls::None,
            SmtpSecurity::StartTls | SmtpSecurity::Tls => {
                let params = TlsParameters::new(config.smtp_host.clone())
                    .map_err(|e| EmailError::ConfigError(format!("TLS configuration error: {}", e)))?;
                if config.security == SmtpSecurity::StartTls {
                    Tls::Required(params)
                } else {
                    Tls::Wrapper(params)
                }
            }
        };
        builder = builder.tls(tls);

        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        let transport = builder.build();
        info!("SMTP email service initialized successfully");
        Ok(Self { config, site_name, transport })
    }

    #[instrument(skip(self, message), fields(to = %message.to, subject = %message.subject))]
    pub async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        let email = self.build_message(message)?;
        self.transport.send(email).await.map_err(|e| {
            error!("Failed to send email: {}", e);
            EmailError::SmtpError(format!("Failed to send email: {}", e))
        })?;
        info!("Email sent successfully");
        Ok(())
    }

    /// Confirmation to the customer, copied to the office inbox when one
    /// is configured.
    pub async fn send_quote_confirmation_email(&self, quote: &Quote) -> Result<(), EmailError> {
        let message = quote_confirmation(quote, &self.site_name, self.config.notify_email.clone());
        self.send_email(message).await
    }

    fn build_message(&self, message: EmailMessage) -> Result<Message, EmailError> {
        let from: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid from address: {}", e)))?;
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid to address: {}", e)))?;

        let mut builder = Message::builder().from(from).to(to).subject(&message.subject);
        if let Some(bcc) = &message.bcc {
            let bcc: Mailbox = bcc
                .parse()
                .map_err(|e| EmailError::AddressError(format!("Invalid bcc address: {}", e)))?;
            builder = builder.bcc(bcc);
        }

        builder
            .multipart(
                MultiPart::alternative()
                    .singlepart(SinglePart::builder().header(ContentType::TEXT_PLAIN).body(message.text_body))
                    .singlepart(SinglePart::builder().header(ContentType::TEXT_HTML).body(message.html_body)),
            )
            .map_err(|e| EmailError::MessageError(format!("Failed to build multipart message: {}", e)))
    }
}

#[async_trait]
impl QuoteNotifier for SmtpEmailService {
    async fn quote_received(&self, quote: &Quote) -> Result<(), String> {
        self.send_quote_confirmation_email(quote).await.map_err(|e| e.to_string())
    }
}

/// Builds the confirmation text and HTML. Customer input is escaped in
/// the HTML part.
pub fn quote_confirmation(quote: &Quote, site_name: &str, bcc: Option<String>) -> EmailMessage {
    let delivery = quote.delivery_date.format("%B %-d, %Y").to_string();

    let text_body = format!(
        "Hello {name},\n\n\
         Thanks for requesting a dumpster quote from {site}. We will contact you within 24 hours.\n\n\
         Size: {size}\nProject: {project}\nService: {service}\nRental: {duration}\n\
         Delivery date: {delivery}\nDelivery address: {address} ({zip})\n\n\
         The {site} Team",
        name = quote.name,
        site = site_name,
        size = quote.dumpster_size,
        project = quote.project_type,
        service = quote.service_type,
        duration = quote.rental_duration,
        delivery = delivery,
        address = quote.address,
        zip = quote.zip_code,
    );

    let row = |label: &str, value: &str| {
        format!("<tr><th align=\"left\">{}</th><td>{}</td></tr>", label, html_escape::encode_text(value))
    };
    let html_body = format!(
        "<!DOCTYPE html><html><body style=\"font-family: Arial, sans-serif; color: #333;\">\
         <h2>{site}</h2><p>Hello {name},</p>\
         <p>Thanks for requesting a dumpster quote. We will contact you within 24 hours.</p>\
         <table>{rows}</table><p>The {site} Team</p></body></html>",
        site = html_escape::encode_text(site_name),
        name = html_escape::encode_text(&quote.name),
        rows = [
            row("Size", &quote.dumpster_size),
            row("Project", &quote.project_type),
            row("Service", &quote.service_type),
            row("Rental", &quote.rental_duration),
            row("Delivery date", &delivery),
            row("Delivery address", &format!("{} ({})", quote.address, quote.zip_code)),
        ]
        .concat(),
    );

    EmailMessage {
        to: quote.email.clone(),
        bcc,
        subject: format!("Your dumpster quote request - {}", site_name),
        text_body,
        html_body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn quote() -> Quote {
        Quote {
            id: None,
            name: "Jane <b>Doe</b>".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-123-4567".to_string(),
            address: "123 Main St".to_string(),
            zip_code: "90001".to_string(),
            city_id: None,
            dumpster_size: "20-yard".to_string(),
            project_type: "home-renovation".to_string(),
            service_type: "residential".to_string(),
            rental_duration: "7-days".to_string(),
            delivery_date: NaiveDate::from_ymd_opt(2030, 1, 15).unwrap(),
            message: None,
            status: "pending".to_string(),
            created_at: String::new(),
        }
    }

    #[test]
    fn test_confirmation_escapes_html() {
        let message = quote_confirmation(&quote(), "DumpsterRentalPro", None);
        assert_eq!(message.to, "jane@example.com");
        assert!(message.html_body.contains("Jane &lt;b&gt;Doe&lt;/b&gt;"));
        assert!(message.text_body.contains("January 15, 2030"));
    }

    #[tokio::test]
    async fn test_service_builds_from_test_config() {
        let service = SmtpEmailService::new(EmailConfig::from_test_env(), "Test".to_string());
        assert!(service.is_ok());
    }
}
