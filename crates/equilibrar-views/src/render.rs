use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ViewError;

const TEMPLATES: [(&str, &str); 5] = [
    ("layout.html", include_str!("../templates/layout.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("admin.html", include_str!("../templates/admin.html")),
    ("coordinator.html", include_str!("../templates/coordinator.html")),
    ("professional.html", include_str!("../templates/professional.html")),
];

/// Compiled page templates. Built once and shared.
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self, ViewError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())
            .map_err(|e| ViewError::TemplateParse(e.to_string()))?;
        Ok(Self { tera })
    }

    /// Render `template` with the fields of `page` as template variables.
    pub fn render(&self, template: &str, page: &impl Serialize) -> Result<String, ViewError> {
        let value = serde_json::to_value(page)?;
        let context =
            Context::from_value(value).map_err(|e| ViewError::TemplateRender(e.to_string()))?;
        let html = self.tera.render(template, &context)?;
        tracing::debug!(template, bytes = html.len(), "page rendered");
        Ok(html)
    }
}
