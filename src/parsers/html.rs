use crate::parsers::text;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("static selector"));

/// Renders HTML into markdown-flavoured plain text
///
/// Headings keep their `#` markers, list items start with `* `, bold runs are
/// wrapped in `**`, and links become `[text](href "title")`. With
/// `ignore_links` only the link text is kept. Images are always rendered as
/// `![alt](src)`.
pub fn render(html: &str, ignore_links: bool) -> String {
    let doc = Html::parse_document(html);
    let mut renderer = Renderer::new(ignore_links);

    match doc.select(&BODY_SELECTOR).next() {
        Some(body) => renderer.walk(body),
        None => renderer.walk(doc.root_element()),
    }

    ::log::trace!("Rendered {} bytes of markup", html.len());
    text::tidy(&renderer.out)
}

struct Renderer {
    out: String,
    pending_space: bool,
    ignore_links: bool,
}

impl Renderer {
    fn new(ignore_links: bool) -> Self {
        Self {
            out: String::new(),
            pending_space: false,
            ignore_links,
        }
    }

    fn walk(&mut self, element: ElementRef) {
        for child in element.children() {
            match child.value() {
                Node::Text(t) => self.push_text(t),
                Node::Element(_) => {
                    if let Some(el) = ElementRef::wrap(child) {
                        self.element(el);
                    }
                }
                _ => {}
            }
        }
    }

    fn element(&mut self, el: ElementRef) {
        let name = el.value().name();
        match name {
            // Non-content
            "script" | "style" | "noscript" | "template" | "head" | "svg" => {}
            // Headings keep their rank as `#` markers
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse::<usize>().unwrap_or(1);
                self.paragraph_break();
                self.push_token(&"#".repeat(level));
                self.pending_space = true;
                self.walk(el);
                self.paragraph_break();
            }
            "li" => {
                self.line_break();
                self.push_token("*");
                self.pending_space = true;
                self.walk(el);
                self.line_break();
            }
            "p" => {
                self.paragraph_break();
                self.walk(el);
                self.paragraph_break();
            }
            "br" => self.line_break(),
            // Inline markup
            "b" | "strong" => self.wrapped(el, "**", "**"),
            "i" | "em" => self.wrapped(el, "_", "_"),
            "a" => self.link(el),
            "img" => self.image(el),
            // Table cells stay on their row
            "td" | "th" => {
                self.pending_space = true;
                self.walk(el);
                self.pending_space = true;
            }
            // Block containers
            "div" | "section" | "article" | "aside" | "header" | "footer" | "nav" | "main"
            | "figure" | "figcaption" | "table" | "tr" | "ul" | "ol" | "dl" | "dt" | "dd"
            | "blockquote" | "pre" => {
                self.line_break();
                self.walk(el);
                self.line_break();
            }
            _ => self.walk(el),
        }
    }

    /// Renders an inline element's content between `open` and `close`
    fn wrapped(&mut self, el: ElementRef, open: &str, close: &str) {
        let inner = self.render_inner(el);
        let raw: String = el.text().collect();
        if inner.is_empty() {
            if !raw.is_empty() {
                self.pending_space = true;
            }
            return;
        }

        if raw.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }
        self.push_token(&format!("{open}{inner}{close}"));
        if raw.ends_with(char::is_whitespace) {
            self.pending_space = true;
        }
    }

    fn link(&mut self, el: ElementRef) {
        let href = el.value().attr("href");
        let Some(href) = href.filter(|_| !self.ignore_links) else {
            self.walk(el);
            return;
        };

        let label = self.render_inner(el);
        let raw: String = el.text().collect();
        if raw.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }
        match el.value().attr("title") {
            Some(title) => self.push_token(&format!("[{label}]({href} \"{title}\")")),
            None => self.push_token(&format!("[{label}]({href})")),
        }
        if raw.ends_with(char::is_whitespace) {
            self.pending_space = true;
        }
    }

    fn image(&mut self, el: ElementRef) {
        let attrs = el.value();
        let src = attrs.attr("data-src").or_else(|| attrs.attr("src"));
        if let Some(src) = src {
            let alt = attrs.attr("alt").unwrap_or_default();
            self.push_token(&format!("![{alt}]({src})"));
        }
    }

    /// Renders children into a single collapsed line
    fn render_inner(&self, el: ElementRef) -> String {
        let mut inner = Renderer::new(self.ignore_links);
        inner.walk(el);
        text::flatten(&inner.out)
    }

    fn push_text(&mut self, t: &str) {
        if t.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }

        let mut words = t.split_whitespace().peekable();
        while let Some(word) = words.next() {
            self.push_token(word);
            if words.peek().is_some() {
                self.pending_space = true;
            }
        }

        if t.ends_with(char::is_whitespace) {
            self.pending_space = true;
        }
    }

    fn push_token(&mut self, token: &str) {
        if self.pending_space && !self.out.is_empty() && !self.out.ends_with([' ', '\n']) {
            self.out.push(' ');
        }
        self.pending_space = false;
        self.out.push_str(token);
    }

    fn line_break(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        self.pending_space = false;
    }

    fn paragraph_break(&mut self) {
        self.line_break();
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }
}
