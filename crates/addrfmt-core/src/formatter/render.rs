// crates/addrfmt-core/src/formatter/render.rs

//! Template engine glue.
//!
//! Catalog templates are mustache documents. They are rendered with
//! `handlebars`, which understands `{{key}}`/`{{{key}}}` directly; the two
//! mustache-only constructs are supplied as helpers:
//!
//! - `{{#key}}…{{/key}}` sections, via `blockHelperMissing`;
//! - `{{#first}} a || b {{/first}}`, emitting the first non-empty alternative.
//!
//! Escaping is disabled: address output is plain text, never HTML.
//!
//! Inverted sections (`{{^key}}…{{/key}}`) are not supported; a template
//! using one fails to parse and is reported as a `Config` error.

use crate::address::ComponentMap;
use crate::error::{AddrFmtError, Result};
use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, Renderable,
};
use once_cell::sync::Lazy;
use regex::Regex;

static ALTERNATIVES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\|\|\s*").expect("static regex"));

/// Renders catalog templates against a component map.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_helper("first", Box::new(FirstHelper));
        registry.register_helper("blockHelperMissing", Box::new(SectionHelper));
        Self { registry }
    }

    /// Renders `template` with the components as context.
    ///
    /// ```rust
    /// use addrfmt_core::formatter::TemplateRenderer;
    /// use addrfmt_core::ComponentMap;
    ///
    /// let mut map = ComponentMap::new();
    /// map.insert("town".into(), "Springfield".into());
    /// map.insert("road".into(), "Main St & 5th".into());
    ///
    /// let out = TemplateRenderer::new()
    ///     .render("{{road}}\n{{#first}} {{{city}}} || {{{town}}} {{/first}}", &map)
    ///     .unwrap();
    /// assert_eq!(out, "Main St & 5th\nSpringfield");
    /// ```
    pub fn render(&self, template: &str, components: &ComponentMap) -> Result<String> {
        self.registry
            .render_template(template, components)
            .map_err(|e| AddrFmtError::Config(format!("template could not be rendered: {e}")))
    }
}

/// The first non-blank entry of a `||`-separated list, trimmed.
pub fn first_alternative(text: &str) -> Option<&str> {
    ALTERNATIVES
        .split(text)
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// Collects rendered output into a string.
#[derive(Default)]
struct Capture(String);

impl Output for Capture {
    fn write(&mut self, seg: &str) -> std::io::Result<()> {
        self.0.push_str(seg);
        Ok(())
    }
}

struct FirstHelper;

impl HelperDef for FirstHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let Some(template) = h.template() else {
            return Ok(());
        };
        let mut inner = Capture::default();
        template.render(r, ctx, rc, &mut inner)?;
        if let Some(choice) = first_alternative(&inner.0) {
            out.write(choice)?;
        }
        Ok(())
    }
}

/// Mustache section: body rendered only when the key is non-empty.
struct SectionHelper;

impl HelperDef for SectionHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let present = ctx
            .data()
            .get(h.name())
            .is_some_and(|v| v.as_str().map_or(!v.is_null(), |s| !s.is_empty()));
        let branch = if present { h.template() } else { h.inverse() };
        if let Some(template) = branch {
            template.render(r, ctx, rc, out)?;
        }
        Ok(())
    }
}
