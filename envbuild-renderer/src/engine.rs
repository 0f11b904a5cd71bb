//! Single-pass substitution engine — [`Renderer`] and [`render`].

use std::collections::HashSet;

use envbuild_core::{EscapePolicy, Environment, Parameter, UnresolvedPolicy};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::token::{tokenize, Segment};

/// Knobs for a render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub escape: EscapePolicy,
    pub unresolved: UnresolvedPolicy,
}

/// Output of a render plus what did not line up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Distinct token names with no matching parameter, in template order.
    pub unresolved: Vec<String>,
    /// Parameter keys no token referenced, in fetch order.
    pub unused: Vec<String>,
}

/// Renders `.env.template` text against a [`RenderContext`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Renderer { options }
    }

    /// Replace every `%TOKEN%` in `template` with its double-quoted value.
    ///
    /// Unknown tokens are kept literally unless the options say to fail.
    pub fn render(&self, ctx: &RenderContext, template: &str) -> Result<Rendered, RenderError> {
        let mut text = String::with_capacity(template.len());
        let mut used: HashSet<&str> = HashSet::new();
        let mut unresolved: Vec<String> = Vec::new();

        for segment in tokenize(template, |name| ctx.get(name).is_some()) {
            match segment {
                Segment::Literal(s) => text.push_str(s),
                Segment::Token(name) => {
                    let value = ctx.get(name).unwrap_or_default();
                    text.push('"');
                    text.push_str(&self.prepare(name, value)?);
                    text.push('"');
                    used.insert(name);
                }
                Segment::Unresolved(name) => {
                    text.push('%');
                    text.push_str(name);
                    if !unresolved.iter().any(|n| n == name) {
                        unresolved.push(name.to_string());
                    }
                }
            }
        }

        if !unresolved.is_empty() && self.options.unresolved == UnresolvedPolicy::Fail {
            return Err(RenderError::Unresolved { names: unresolved });
        }

        let unused = ctx
            .keys()
            .filter(|key| !used.contains(key))
            .map(str::to_string)
            .collect();

        Ok(Rendered {
            text,
            unresolved,
            unused,
        })
    }

    fn prepare(&self, key: &str, value: &str) -> Result<String, RenderError> {
        match self.options.escape {
            EscapePolicy::Verbatim => Ok(value.to_string()),
            EscapePolicy::Escape => Ok(escape(value)),
            EscapePolicy::Reject => match unsafe_char(value) {
                Some(found) => Err(RenderError::UnsafeValue {
                    key: key.to_string(),
                    found,
                }),
                None => Ok(value.to_string()),
            },
        }
    }
}

/// Render with default options: values escaped, unknown tokens kept.
pub fn render(
    environment: &Environment,
    template: &str,
    parameters: &[Parameter],
) -> Result<String, RenderError> {
    let ctx = RenderContext::new(environment, parameters);
    Ok(Renderer::default().render(&ctx, template)?.text)
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

fn unsafe_char(value: &str) -> Option<&'static str> {
    value.chars().find_map(|ch| match ch {
        '"' => Some("a double quote"),
        '\n' => Some("a newline"),
        '\r' => Some("a carriage return"),
        _ => None,
    })
}
