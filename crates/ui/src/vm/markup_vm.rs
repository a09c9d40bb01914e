use std::collections::{HashMap, HashSet};

use quiz_core::model::{Prompt, Segment};

/// Render a prompt as HTML. Every text segment is escaped; only the markup
/// produced here reaches the page.
#[must_use]
pub fn prompt_to_html(prompt: &Prompt) -> String {
    let mut html = String::new();
    for segment in prompt.segments() {
        match segment {
            Segment::Text(text) => push_escaped(&mut html, text),
            Segment::Emphasis(text) => {
                html.push_str("<strong class=\"emphasis\">");
                push_escaped(&mut html, text);
                html.push_str("</strong>");
            }
            Segment::Blank => {
                html.push_str("<span class=\"blank\">(&nbsp;&nbsp;&nbsp;)</span>");
            }
        }
    }
    html
}

fn push_escaped(html: &mut String, text: &str) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            html.push_str("<br>");
        }
        html.push_str(&ammonia::clean_text(line));
    }
}

#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "span", "br", "em", "strong", "b", "i", "u", "del", "code", "ul", "ol", "li", "a",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}
