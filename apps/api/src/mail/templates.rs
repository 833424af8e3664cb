/// Password reset email. Placeholders: `name`, `reset_password_link`,
/// `support_email`, `year`.
pub const RESET_PASSWORD: &str = include_str!("../../templates/reset_password.html");

pub const RESET_PASSWORD_SUBJECT: &str = "Password Reset Request - Your Action Required";

/// Substitutes every `{{key}}` occurrence with the HTML-escaped value.
/// Unknown placeholders are left as-is.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{{{key}}}}}"), &escape_html(value))
    })
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
