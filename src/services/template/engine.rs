//! MiniJinja template engine wrapper

use minijinja::{Environment, Error, ErrorKind};
use serde::Serialize;

pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self, Error> {
        let mut env = Environment::new();

        // Configure MiniJinja
        env.set_debug(cfg!(debug_assertions));

        // Templates are compiled into the binary
        env.add_template("base.html", include_str!("../../web/templates/base.html"))?;
        env.add_template("home.html", include_str!("../../web/templates/home.html"))?;
        env.add_template("bot.html", include_str!("../../web/templates/bot.html"))?;

        env.add_filter("datetime", format_datetime);
        env.add_filter("truncate", truncate_text);

        Ok(Self { env })
    }

    /// Render a template with context
    pub fn render<S: Serialize>(&self, template_name: &str, ctx: S) -> Result<String, Error> {
        self.env.get_template(template_name)?.render(ctx)
    }

    pub fn add_template_owned(&mut self, name: String, content: String) -> Result<(), Error> {
        self.env.add_template_owned(name, content)
    }
}

// Chat timestamps arrive as RFC 3339 strings
fn format_datetime(value: String) -> Result<String, Error> {
    let dt = chrono::DateTime::parse_from_rfc3339(&value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, format!("invalid timestamp: {e}")))?;
    Ok(dt.format("%Y-%m-%d %H:%M").to_string())
}

fn truncate_text(value: String, length: Option<usize>) -> String {
    let max_length = length.unwrap_or(50);
    if value.chars().count() <= max_length {
        value
    } else {
        let cut: String = value.chars().take(max_length).collect();
        format!("{cut}...")
    }
}
