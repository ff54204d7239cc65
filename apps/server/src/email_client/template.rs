//! Renders a contact message into the HTML and plain-text email bodies.

use crate::contact::models::ContactMessage;

pub fn subject(msg: &ContactMessage) -> String {
    format!("Portfolio Contact: {}", msg.name)
}

pub fn render_html(msg: &ContactMessage) -> String {
    format!(
        "<h2>New Contact Form Submission</h2>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Email:</strong> {}</p>\n\
         <h3>Message:</h3>\n\
         <p>{}</p>",
        escape_html(&msg.name),
        escape_html(&msg.email),
        escape_html(&msg.message).replace('\n', "<br>"),
    )
}

pub fn render_text(msg: &ContactMessage) -> String {
    format!(
        "New Contact Form Submission\n\nName: {}\nEmail: {}\n\nMessage:\n{}",
        msg.name, msg.email, msg.message
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ada <script>".to_string(),
            email: "ada@example.com".to_string(),
            message: "Line one & \"two\"\nLine 'three'".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_html_body_escapes_user_input_and_breaks_lines() {
        let html = render_html(&message());
        assert!(html.contains("Ada &lt;script&gt;"));
        assert!(html.contains("Line one &amp; &quot;two&quot;<br>Line &#039;three&#039;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_text_body_is_unescaped() {
        let text = render_text(&message());
        assert!(text.starts_with("New Contact Form Submission"));
        assert!(text.contains("Name: Ada <script>"));
        assert!(text.ends_with("Line one & \"two\"\nLine 'three'"));
    }

    #[test]
    fn test_subject_names_sender() {
        assert_eq!(subject(&message()), "Portfolio Contact: Ada <script>");
    }
}
