use askama::Template;

/// A bare page with a title and one paragraph.
#[derive(Template)]
#[template(path = "message.html")]
pub struct MessageTemplate {
    pub api_hostname: String,
    pub title: String,
    pub message: String,
}
