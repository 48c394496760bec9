//! HTML body of the confirmation email.

/// Route the confirmation link points at, relative to the origin host
pub const CONFIRM_EMAIL_PATH: &str = "/api/auth/confirm_email/";

/// Builds the confirmation link for `token` under `origin_host`.
pub fn confirmation_link(origin_host: &str, token: &str) -> String {
    format!("{}{}{}", origin_host.trim_end_matches('/'), CONFIRM_EMAIL_PATH, token)
}

/// Renders the confirmation email for `username`.
///
/// Both the username and the link are HTML-escaped.
pub fn render_verification_email(origin_host: &str, username: &str, token: &str) -> String {
    let link = escape_html(&confirmation_link(origin_host, token));
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Confirm your email</title></head>
<body>
  <p>Hi {username},</p>
  <p>Thanks for registering. Please confirm your email address by following the link below:</p>
  <p><a href="{link}">{link}</a></p>
  <p>If you did not create an account, you can ignore this message.</p>
</body>
</html>
"#,
        username = escape_html(username),
        link = link,
    )
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
