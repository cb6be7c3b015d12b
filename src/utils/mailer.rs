use log::info;

/// "Send" the verification email. Actual delivery is deliberately out of
/// scope; the link is logged so it can be followed during development.
pub fn send_verification_email(email: &str, name: &str, verify_url: &str) {
    info!(
        "verification email for {} <{}>: {}",
        name, email, verify_url
    );
}

pub fn verification_url(frontend_url: &str, token: &str) -> String {
    format!("{}/verify-email/{}", frontend_url.trim_end_matches('/'), token)
}
