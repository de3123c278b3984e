//! Page template substitution.
//!
//! Templates are plain HTML with `{{title}}`, `{{body}}` and `{{styles}}`
//! markers. Values are inserted verbatim: title and styles come from the
//! site author, body is already-rendered HTML.

/// A substitutable template marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateToken {
    Title,
    Body,
    Styles,
}

impl TemplateToken {
    /// All tokens, in marker scan order.
    pub const ALL: [Self; 3] = [Self::Title, Self::Body, Self::Styles];

    /// Marker text as written in templates.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Title => "{{title}}",
            Self::Body => "{{body}}",
            Self::Styles => "{{styles}}",
        }
    }
}

/// Values for a template render. Absent values leave their marker untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TemplateTokens<'a> {
    pub title: Option<&'a str>,
    pub body: Option<&'a str>,
    pub styles: Option<&'a str>,
}

impl<'a> TemplateTokens<'a> {
    /// Tokens with no values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: &'a str) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_styles(mut self, styles: &'a str) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Value for a token, if present.
    #[must_use]
    pub fn get(&self, token: TemplateToken) -> Option<&'a str> {
        match token {
            TemplateToken::Title => self.title,
            TemplateToken::Body => self.body,
            TemplateToken::Styles => self.styles,
        }
    }
}

/// Substitute every marker whose token has a value.
///
/// The template is scanned once, so inserted values are never themselves
/// searched for markers. Never fails: unknown `{{...}}` sequences and
/// markers without a value are copied through.
///
/// # Example
///
/// ```
/// use folio_renderer::{TemplateTokens, render_template};
///
/// let html = render_template(
///     "<title>{{title}}</title>{{styles}}",
///     TemplateTokens::new().with_title("Home"),
/// );
/// assert_eq!(html, "<title>Home</title>{{styles}}");
/// ```
#[must_use]
pub fn render_template(template: &str, tokens: TemplateTokens<'_>) -> String {
    let mut out = String::with_capacity(template.len() + tokens.body.map_or(0, str::len));
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let matched = TemplateToken::ALL
            .into_iter()
            .find(|token| candidate.starts_with(token.marker()));

        match matched.and_then(|token| tokens.get(token).map(|value| (token, value))) {
            Some((token, value)) => {
                out.push_str(value);
                rest = &candidate[token.marker().len()..];
            }
            None => {
                out.push('{');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
