//! Contact link building

/// Maintainer address surfaced by the About endpoint
pub const CONTACT_EMAIL: &str = "hello@studybell.dev";

const CONTACT_SUBJECT: &str = "Contact about Study Bell";
const CONTACT_BODY: &str = "Hi, I would like to get in touch about the Study Bell timer.";

/// Build a mailto URL with percent-encoded subject and body
pub fn mailto_link(address: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        address,
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}

/// The prebuilt contact link for the About endpoint
pub fn contact_mailto() -> String {
    mailto_link(CONTACT_EMAIL, CONTACT_SUBJECT, CONTACT_BODY)
}
