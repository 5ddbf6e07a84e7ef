//! Custom element overrides
//!
//! Post bodies may embed JSX-style elements such as
//! `<FakeTask status="Done">...</FakeTask>`. Each capitalised element name
//! that has a registered override is replaced by that override's markup.
//! Elements without an override, and anything inside fenced code blocks,
//! are left untouched.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::helpers::slugify;

lazy_static! {
    static ref OPEN_TAG: Regex = Regex::new(
        r#"<([A-Z][A-Za-z0-9]*)((?:\s+[A-Za-z_][-A-Za-z0-9_:.]*(?:\s*=\s*(?:"[^"]*"|'[^']*'|\{[^}]*\}))?)*)\s*(/?)>"#
    )
    .expect("open tag pattern");
    static ref ATTRIBUTE: Regex = Regex::new(
        r#"([A-Za-z_][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|\{([^}]*)\}))?"#
    )
    .expect("attribute pattern");
}

/// What an override receives: the element's attributes and its children,
/// already rendered to HTML
#[derive(Debug, Clone, Default)]
pub struct ElementProps {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: String,
}

impl ElementProps {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attribute value, or `default` when missing or empty
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).filter(|v| !v.is_empty()).unwrap_or(default)
    }
}

pub type ComponentFn = dyn Fn(&ElementProps) -> String + Send + Sync;

/// Registry of custom element renderers, keyed by element name
#[derive(Clone, Default)]
pub struct ComponentOverrides {
    components: HashMap<String, Arc<ComponentFn>>,
}

impl ComponentOverrides {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry posts are rendered with by default
    pub fn with_defaults() -> Self {
        let mut overrides = Self::new();
        overrides.register("FakeTask", fake_task);
        overrides
    }

    /// Register (or replace) the renderer for an element name
    pub fn register<F>(&mut self, name: &str, render: F) -> &mut Self
    where
        F: Fn(&ElementProps) -> String + Send + Sync + 'static,
    {
        self.components.insert(name.to_string(), Arc::new(render));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ComponentFn>> {
        self.components.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Replace known elements in `source` with numbered placeholders
    ///
    /// Returns the rewritten source and the markup for each placeholder.
    /// Children are rendered through `render_children` before the override
    /// sees them.
    pub(crate) fn expand(
        &self,
        source: &str,
        render_children: &dyn Fn(&str) -> String,
    ) -> (String, Vec<String>) {
        let mut rendered = Vec::new();
        if self.is_empty() {
            return (source.to_string(), rendered);
        }

        let fences = fenced_ranges(source);
        let in_fence = |i: usize| fences.iter().any(|r| r.contains(&i));

        let mut out = String::with_capacity(source.len());
        let mut copied = 0;
        let mut pos = 0;

        while let Some(caps) = OPEN_TAG.captures_at(source, pos) {
            let Some(whole) = caps.get(0) else {
                break;
            };
            let name = caps.get(1).map_or("", |m| m.as_str());

            let render: &ComponentFn = match self.get(name) {
                Some(component) if !in_fence(whole.start()) => component.as_ref(),
                _ => {
                    pos = whole.end();
                    continue;
                }
            };

            let self_closing = caps.get(3).is_some_and(|m| m.as_str() == "/");
            let body_start = whole.end();
            let (children_src, next) = if self_closing {
                ("", body_start)
            } else {
                let close = format!("</{}>", name);
                match find_close(source, body_start, &close, &fences) {
                    Some(end) => (&source[body_start..end], end + close.len()),
                    None => ("", body_start),
                }
            };

            let children = if children_src.trim().is_empty() {
                String::new()
            } else {
                render_children(&dedent(children_src))
            };

            let props = ElementProps {
                name: name.to_string(),
                attributes: parse_attributes(caps.get(2).map_or("", |m| m.as_str())),
                children,
            };

            out.push_str(&source[copied..whole.start()]);
            out.push_str(&placeholder(rendered.len()));
            rendered.push(render(&props));

            copied = next;
            pos = next;
        }

        out.push_str(&source[copied..]);
        (out, rendered)
    }
}

impl fmt::Debug for ComponentOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.components.keys().collect();
        names.sort();
        f.debug_struct("ComponentOverrides")
            .field("components", &names)
            .finish()
    }
}

/// Marker left in the markdown and swapped for component markup afterwards
pub(crate) fn placeholder(index: usize) -> String {
    format!("<!--component:{}-->", index)
}

fn parse_attributes(raw: &str) -> IndexMap<String, String> {
    ATTRIBUTE
        .captures_iter(raw)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str().to_string();
            let value = if let Some(v) = caps.get(2).or_else(|| caps.get(3)) {
                v.as_str().to_string()
            } else if let Some(expr) = caps.get(4) {
                unquote(expr.as_str().trim()).to_string()
            } else {
                "true".to_string()
            };
            Some((key, value))
        })
        .collect()
}

/// `{"text"}` and `{'text'}` expressions carry plain strings
fn unquote(expr: &str) -> &str {
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = expr
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    expr
}

/// First closing tag at or after `from` that is outside a code fence
fn find_close(source: &str, from: usize, close: &str, fences: &[Range<usize>]) -> Option<usize> {
    source[from..]
        .match_indices(close)
        .map(|(i, _)| from + i)
        .find(|i| !fences.iter().any(|r| r.contains(i)))
}

/// Byte ranges of fenced code blocks (``` or ~~~)
fn fenced_ranges(source: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut open: Option<(usize, char, usize)> = None;
    let mut offset = 0;

    for line in source.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        let indent = line.len() - line.trim_start_matches(' ').len();
        if indent > 3 {
            continue;
        }
        let trimmed = line[indent..].trim_end();
        let Some(marker) = trimmed.chars().next().filter(|c| *c == '`' || *c == '~') else {
            continue;
        };
        let run = trimmed.chars().take_while(|c| *c == marker).count();
        if run < 3 {
            continue;
        }

        match open {
            None => open = Some((start, marker, run)),
            Some((fence_start, open_marker, open_run))
                if marker == open_marker && run >= open_run && trimmed.len() == run =>
            {
                ranges.push(fence_start..offset);
                open = None;
            }
            Some(_) => {}
        }
    }

    if let Some((fence_start, _, _)) = open {
        ranges.push(fence_start..source.len());
    }

    ranges
}

/// Strip the indentation shared by all non-blank lines
fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Built-in `FakeTask` element: a task card with status and priority badges
pub fn fake_task(props: &ElementProps) -> String {
    let task_id = props.get_or("taskId", "");
    let title = props.get_or("title", "");
    let status = props.get_or("status", "Open");
    let assignee = props.get_or("assignee", "");
    let priority = props.get_or("priority", "Normal");
    let description = props.get_or("description", "");

    let mut html = String::from(r#"<div class="task"><div class="task-header">"#);
    html.push_str(&format!(
        r#"<span class="task-id">{}</span>"#,
        html_escape(task_id)
    ));
    if !title.is_empty() {
        html.push_str(&format!(
            r#"<h2 class="task-title">{}</h2>"#,
            html_escape(title)
        ));
    }
    html.push_str(r#"</div><div class="task-meta">"#);
    html.push_str(&format!(
        r#"<span class="task-status task-status-{}">{}</span>"#,
        slugify(status),
        html_escape(status)
    ));
    if !assignee.is_empty() {
        html.push_str(&format!(
            r#"<span class="task-assignee">👤 {}</span>"#,
            html_escape(assignee)
        ));
    }
    html.push_str(&format!(
        r#"<span class="task-priority task-priority-{}">⚡ {}</span>"#,
        slugify(priority),
        html_escape(priority)
    ));
    html.push_str("</div>");
    if !description.is_empty() {
        html.push_str(&format!(
            r#"<div class="task-description">{}</div>"#,
            html_escape(description)
        ));
    }
    html.push_str(&format!(
        r#"<div class="task-body">{}</div></div>"#,
        props.children
    ));
    html
}

/// Simple HTML escaping
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
