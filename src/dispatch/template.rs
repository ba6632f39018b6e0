//! src/dispatch/template.rs
use crate::domain::Submission;
use htmlescape::encode_minimal;

/// The notification the site owner receives for one submission.
#[derive(Debug)]
pub struct ContactEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl ContactEmail {
    pub fn render(submission: &Submission, site_name: &str) -> Self {
        let name = submission.name.as_ref();
        let email = submission.email.as_ref();
        let message = submission.message.as_ref();

        let subject = format!("Message from {} on {}", name, site_name);

        let html = format!(
            "<h1>New message from {site}</h1>\
             <p><strong>Name:</strong> {name}</p>\
             <p><strong>Email:</strong> <a href=\"mailto:{email}\">{email}</a></p>\
             <p><strong>Message:</strong></p>\
             <p>{message}</p>",
            site = encode_minimal(site_name),
            name = encode_minimal(name),
            email = encode_minimal(email),
            message = encode_minimal(message).replace('\n', "<br/>"),
        );

        let text = format!(
            "New message from {}\n\nName: {}\nEmail: {}\n\n{}\n",
            site_name, name, email, message
        );

        Self {
            subject,
            html,
            text,
        }
    }
}
