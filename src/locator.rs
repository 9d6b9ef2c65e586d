use std::fmt;

/// How a [`Locator`] finds its element(s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Plain CSS selector
    Css(String),
    /// Raw XPath expression
    XPath(String),
    /// ARIA-ish role plus accessible name (substring match)
    Role { role: String, name: String },
    /// Form control associated with a `<label>` containing the text
    Label(String),
    /// Any element whose text contains the value
    Text(String),
    /// CSS selector narrowed to elements containing the text
    CssWithText { css: String, text: String },
}

/// Query handed to the WebDriver once a locator is actually resolved
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    Css(String),
    XPath(String),
}

impl Query {
    pub fn as_fantoccini(&self) -> fantoccini::Locator<'_> {
        match self {
            Query::Css(css) => fantoccini::Locator::Css(css),
            Query::XPath(xpath) => fantoccini::Locator::XPath(xpath),
        }
    }
}

/// Named, lazily resolved reference to zero or more elements.
///
/// A locator is only a description. Nothing touches the browser until a
/// [`PageHandle`](crate::handle::PageHandle) is asked to act on it, so page
/// objects can build all of their locators up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    name: String,
    strategy: Strategy,
}

impl Locator {
    pub fn new(name: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            strategy,
        }
    }

    pub fn css(name: impl Into<String>, css: impl Into<String>) -> Self {
        Self::new(name, Strategy::Css(css.into()))
    }

    pub fn xpath(name: impl Into<String>, xpath: impl Into<String>) -> Self {
        Self::new(name, Strategy::XPath(xpath.into()))
    }

    pub fn role(
        name: impl Into<String>,
        role: impl Into<String>,
        accessible: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            Strategy::Role {
                role: role.into(),
                name: accessible.into(),
            },
        )
    }

    pub fn label(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, Strategy::Label(text.into()))
    }

    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, Strategy::Text(text.into()))
    }

    pub fn css_with_text(
        name: impl Into<String>,
        css: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            Strategy::CssWithText {
                css: css.into(),
                text: text.into(),
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Compile the strategy into a driver query
    pub fn query(&self) -> Query {
        match &self.strategy {
            Strategy::Css(css) => Query::Css(css.clone()),
            Strategy::XPath(xpath) => Query::XPath(xpath.clone()),
            Strategy::Role { role, name } => Query::XPath(role_xpath(role, name)),
            Strategy::Label(text) => Query::XPath(label_xpath(text)),
            Strategy::Text(text) => Query::XPath(format!(
                "//body//*[{}][not(*[{}])]",
                contains_text(text),
                contains_text(text)
            )),
            Strategy::CssWithText { css, text } => {
                Query::XPath(format!("{}[{}]", css_to_xpath(css), contains_text(text)))
            }
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.strategy {
            Strategy::Css(css) => write!(f, "{} ({})", self.name, css),
            Strategy::XPath(xpath) => write!(f, "{} ({})", self.name, xpath),
            Strategy::Role { role, name } => {
                write!(f, "{} (role={} name={:?})", self.name, role, name)
            }
            Strategy::Label(text) => write!(f, "{} (label={:?})", self.name, text),
            Strategy::Text(text) => write!(f, "{} (text={:?})", self.name, text),
            Strategy::CssWithText { css, text } => {
                write!(f, "{} ({} has-text={:?})", self.name, css, text)
            }
        }
    }
}

/// Quote a string as an XPath literal, falling back to `concat()` when it
/// holds both quote characters
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{}'", value)
    } else if !value.contains('"') {
        format!("\"{}\"", value)
    } else {
        let parts: Vec<String> = value
            .split('\'')
            .map(|part| format!("'{}'", part))
            .collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

fn contains_text(text: &str) -> String {
    format!("contains(normalize-space(.), {})", xpath_literal(text))
}

fn labelled_by(text: &str) -> String {
    format!(
        "@id = //label[{}]/@for or @aria-label = {}",
        contains_text(text),
        xpath_literal(text)
    )
}

fn role_xpath(role: &str, name: &str) -> String {
    let text = contains_text(name);
    let literal = xpath_literal(name);
    match role {
        "button" => format!(
            "//button[{text}] | //input[(@type='submit' or @type='button') and contains(@value, {literal})] | //*[@role='button'][{text}]"
        ),
        "link" => format!("//a[{text}] | //*[@role='link'][{text}]"),
        "heading" => format!(
            "//*[self::h1 or self::h2 or self::h3 or self::h4 or self::h5 or self::h6][{text}] | //*[@role='heading'][{text}]"
        ),
        "textbox" => format!(
            "//input[not(@type) or @type='text' or @type='email' or @type='tel' or @type='search' or @type='url'][{labelled} or contains(@placeholder, {literal})] | //textarea[{labelled}] | //label[{text}]//input[not(@type) or @type='text' or @type='email']",
            labelled = labelled_by(name)
        ),
        "checkbox" => format!(
            "//input[@type='checkbox'][{labelled}] | //label[{text}]//input[@type='checkbox']",
            labelled = labelled_by(name)
        ),
        other => format!("//*[@role={}][{text}]", xpath_literal(other)),
    }
}

fn label_xpath(text: &str) -> String {
    format!(
        "//*[self::input or self::textarea or self::select][{labelled}] | //label[{text}]//*[self::input or self::textarea or self::select]",
        labelled = labelled_by(text),
        text = contains_text(text)
    )
}

/// Translate the simple CSS subset used by page objects (`tag`, `#id`,
/// `.class`, `[attr=value]`) into a descendant XPath step
fn css_to_xpath(css: &str) -> String {
    let mut tag = String::from("*");
    let mut predicates = Vec::new();
    let mut rest = css.trim();

    let tag_end = rest
        .find(|c: char| c == '#' || c == '.' || c == '[')
        .unwrap_or(rest.len());
    if tag_end > 0 {
        tag = rest[..tag_end].to_string();
    }
    rest = &rest[tag_end..];

    while let Some(kind) = rest.chars().next() {
        let body = &rest[kind.len_utf8()..];
        if kind == '[' {
            let close = body.find(']').unwrap_or(body.len());
            let attr = &body[..close];
            match attr.split_once('=') {
                Some((key, value)) => {
                    let value = value.trim_matches(|c| c == '\'' || c == '"');
                    predicates.push(format!("@{} = {}", key.trim(), xpath_literal(value)));
                }
                None => predicates.push(format!("@{}", attr.trim())),
            }
            rest = body.get(close + 1..).unwrap_or("");
        } else {
            let end = body
                .find(|c: char| c == '#' || c == '.' || c == '[')
                .unwrap_or(body.len());
            let ident = &body[..end];
            if kind == '#' {
                predicates.push(format!("@id = {}", xpath_literal(ident)));
            } else {
                predicates.push(format!(
                    "contains(concat(' ', normalize-space(@class), ' '), {})",
                    xpath_literal(&format!(" {} ", ident))
                ));
            }
            rest = &body[end..];
        }
    }

    let mut xpath = format!("//{}", tag);
    for predicate in predicates {
        xpath.push_str(&format!("[{}]", predicate));
    }
    xpath
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod locator_test;
