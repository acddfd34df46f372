//! Plain-text renderer used to print the active page.

use pagecraft_core::content::ElementContent;
use pagecraft_core::{ElementKind, ElementRenderer, InteractionController, StyleMap};
use std::fmt::Write;

const MAX_SUMMARY: usize = 40;

/// Renders each element as a one-line description of its content.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineRenderer;

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_SUMMARY {
        return text.to_string();
    }
    let head: String = text.chars().take(MAX_SUMMARY - 1).collect();
    format!("{head}…")
}

fn quoted(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| format!("\"{}\"", clip(text)))
}

fn count(n: usize, what: &str) -> Option<String> {
    Some(format!("{n} {what}{}", if n == 1 { "" } else { "s" }))
}

fn summary(content: &ElementContent) -> Option<String> {
    match content {
        ElementContent::Text(c) => quoted(&c.text),
        ElementContent::Heading(c) => {
            let level = format!("{:?}", c.level).to_lowercase();
            Some(quoted(&c.text).map_or(level.clone(), |t| format!("{level} {t}")))
        }
        ElementContent::Button(c) => match (quoted(&c.text), c.link.is_empty()) {
            (Some(t), false) => Some(format!("{t} -> {}", c.link)),
            (t, _) => t,
        },
        ElementContent::Image(c) => quoted(&c.alt).or_else(|| quoted(&c.src)),
        ElementContent::Video(c) => quoted(&c.url),
        ElementContent::Icon(c) => quoted(&c.icon_type),
        ElementContent::Divider | ElementContent::Container | ElementContent::Section => None,
        ElementContent::Header(c) => quoted(&c.logo),
        ElementContent::Footer(c) => quoted(&c.copyright),
        ElementContent::Navbar(c) => quoted(&c.brand),
        ElementContent::Hero(c) => quoted(&c.title),
        ElementContent::Card(c) => quoted(&c.title),
        ElementContent::Grid(c) => Some(format!("{} columns, {} items", c.columns, c.items.len())),
        ElementContent::Testimonial(c) => quoted(&c.author).map(|a| format!("{a} {}", "*".repeat(c.rating.min(5).into()))),
        ElementContent::Pricing(c) => {
            let price = format!("{}{}{}", c.currency, c.price, c.period);
            let popular = if c.popular { " (popular)" } else { "" };
            Some(format!("{} {price}{popular}", quoted(&c.title).unwrap_or_default()).trim().to_string())
        }
        ElementContent::Team(c) => quoted(&c.name),
        ElementContent::Cta(c) => quoted(&c.title),
        ElementContent::Contact(c) => quoted(&c.title).or_else(|| count(c.items.len(), "item")),
        ElementContent::Stats(c) => count(c.items.len(), "stat"),
        ElementContent::Features(c) => quoted(&c.title).or_else(|| count(c.items.len(), "feature")),
        ElementContent::List(c) => count(c.items.len(), "item"),
    }
}

impl ElementRenderer for OutlineRenderer {
    type Output = String;

    fn render(&self, kind: ElementKind, content: &ElementContent, styles: &StyleMap) -> String {
        let mut line = kind.to_string();
        if let Some(summary) = summary(content) {
            let _ = write!(line, " {summary}");
        }
        if let Some(bg) = styles.get("backgroundColor") {
            let _ = write!(line, " bg={bg}");
        }
        line
    }
}

/// Outline of the controller's active page, back to front.
pub fn outline(controller: &InteractionController) -> String {
    let doc = controller.document();
    let page = controller.active_page();
    let name = doc.page(page).map_or("?", |p| p.name.as_str());
    let canvas = controller.canvas_size();

    let mut out = String::new();
    let _ = writeln!(out, "Page \"{name}\" ({}x{})", canvas.width, canvas.height);
    let selected = controller.selection().primary();
    for (index, element) in doc.elements_on_page(page).enumerate() {
        let g = element.geometry;
        let marker = if Some(element.id()) == selected { '>' } else { ' ' };
        let lock = if element.locked { " [locked]" } else { "" };
        let _ = writeln!(
            out,
            "{marker}{index:>3}  {:>6},{:<6} {:>5}x{:<5} {}{lock}",
            g.x,
            g.y,
            g.width,
            g.height,
            OutlineRenderer.render_element(element),
        );
    }
    out
}
