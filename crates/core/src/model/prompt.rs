use std::fmt;

/// A piece of question text.
///
/// Prompts never carry raw markup: whatever the generator emitted is reduced to
/// plain text plus these structured markers, and the presentation layer decides
/// how to render them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Emphasis(String),
    /// The fill-in gap, written `( )` by the generator.
    Blank,
}

/// Question text parsed into segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    segments: Vec<Segment>,
}

const EMPHASIS_TAGS: [&str; 5] = ["b", "strong", "u", "em", "i"];
const SKIPPED_CONTENT_TAGS: [&str; 2] = ["script", "style"];

enum Tag {
    Open,
    Close,
    LineBreak,
    SkipContent(&'static str),
    Other,
    NotATag,
}

impl Prompt {
    /// Parse generator text into segments.
    ///
    /// Recognized emphasis: `<b>`, `<strong>`, `<u>`, `<em>`, `<i>` and `**…**`.
    /// `<br>` becomes a newline, `<script>`/`<style>` are dropped with their content,
    /// any other tag is dropped and its inner text kept. Common HTML entities are
    /// decoded. `( )`, `（ ）` and runs of three or more underscores become `Blank`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut depth = 0usize;
        let mut stars = false;
        // Index of the first segment written inside the outermost open emphasis.
        let mut opened_at = None;
        let mut rest = raw;

        while let Some(ch) = rest.chars().next() {
            let emphasized = depth > 0 || stars;
            if ch == '<' {
                if let Some(end) = rest.find('>') {
                    match classify_tag(&rest[1..end]) {
                        Tag::Open => {
                            flush(&mut segments, &mut current, emphasized);
                            if !emphasized {
                                opened_at = Some(segments.len());
                            }
                            depth += 1;
                        }
                        Tag::Close => {
                            flush(&mut segments, &mut current, emphasized);
                            depth = depth.saturating_sub(1);
                        }
                        Tag::LineBreak => current.push('\n'),
                        Tag::SkipContent(name) => {
                            rest = skip_element(rest, name);
                            continue;
                        }
                        Tag::Other => {}
                        Tag::NotATag => {
                            current.push('<');
                            rest = &rest[1..];
                            continue;
                        }
                    }
                    rest = &rest[end + 1..];
                    continue;
                }
            }

            if rest.starts_with("**") {
                flush(&mut segments, &mut current, emphasized);
                if !emphasized {
                    opened_at = Some(segments.len());
                }
                stars = !stars;
                rest = &rest[2..];
                continue;
            }

            current.push(ch);
            rest = &rest[ch.len_utf8()..];
        }

        let unclosed = depth > 0 || stars;
        flush(&mut segments, &mut current, unclosed);
        if unclosed {
            if let Some(start) = opened_at {
                demote_from(&mut segments, start);
            }
        }

        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn has_blank(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Blank))
    }

    /// Text with emphasis dropped and blanks written as `( )`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) | Segment::Emphasis(text) => out.push_str(text),
                Segment::Blank => out.push_str("( )"),
            }
        }
        out
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain_text())
    }
}

fn classify_tag(inner: &str) -> Tag {
    let (closing, body) = match inner.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, inner),
    };
    let name_len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let name = body[..name_len].to_ascii_lowercase();
    if name.is_empty() || !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Tag::NotATag;
    }
    if !is_tag_tail(&body[name_len..]) {
        return Tag::NotATag;
    }

    if name == "br" {
        return Tag::LineBreak;
    }
    if EMPHASIS_TAGS.contains(&name.as_str()) {
        return if closing { Tag::Close } else { Tag::Open };
    }
    if !closing {
        if let Some(skipped) = SKIPPED_CONTENT_TAGS.iter().find(|t| **t == name) {
            return Tag::SkipContent(*skipped);
        }
    }
    Tag::Other
}

/// What may follow a tag name: nothing, a self-closing slash, or attributes.
/// Bare words (`<b and c>`) mean the bracket was prose, not markup.
fn is_tag_tail(tail: &str) -> bool {
    let trimmed = tail.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return true;
    }
    tail.starts_with(char::is_whitespace) && trimmed.contains('=')
}

/// Turn emphasis that never closed back into plain text.
fn demote_from(segments: &mut Vec<Segment>, start: usize) {
    let tail: Vec<Segment> = segments.drain(start.min(segments.len())..).collect();
    for segment in tail {
        match segment {
            Segment::Emphasis(text) | Segment::Text(text) => push_text(segments, text, false),
            Segment::Blank => segments.push(Segment::Blank),
        }
    }
}

/// Skip `<name ...>...</name>`; an unclosed element swallows the rest.
fn skip_element<'a>(rest: &'a str, name: &str) -> &'a str {
    let closing = format!("</{name}");
    let lower = rest.to_ascii_lowercase();
    let Some(start) = lower.find(&closing) else {
        return "";
    };
    match rest[start..].find('>') {
        Some(end) => &rest[start + end + 1..],
        None => "",
    }
}

fn flush(segments: &mut Vec<Segment>, current: &mut String, emphasized: bool) {
    if current.is_empty() {
        return;
    }
    let text = decode_entities(&std::mem::take(current));
    let mut rest = text.as_str();
    let mut buf = String::new();

    while let Some(ch) = rest.chars().next() {
        if let Some(len) = blank_len(rest) {
            push_text(segments, std::mem::take(&mut buf), emphasized);
            segments.push(Segment::Blank);
            rest = &rest[len..];
            continue;
        }
        buf.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    push_text(segments, buf, emphasized);
}

fn push_text(segments: &mut Vec<Segment>, text: String, emphasized: bool) {
    if text.is_empty() {
        return;
    }
    match (segments.last_mut(), emphasized) {
        (Some(Segment::Text(last)), false) | (Some(Segment::Emphasis(last)), true) => {
            last.push_str(&text);
        }
        (_, false) => segments.push(Segment::Text(text)),
        (_, true) => segments.push(Segment::Emphasis(text)),
    }
}

/// Byte length of a blank marker at the start of `s`, if any.
fn blank_len(s: &str) -> Option<usize> {
    let mut chars = s.char_indices();
    let (_, first) = chars.next()?;

    if first == '_' {
        let run = s.chars().take_while(|c| *c == '_').count();
        return (run >= 3).then_some(run);
    }

    if first != '(' && first != '（' {
        return None;
    }
    for (idx, ch) in chars {
        match ch {
            ')' | '）' => return Some(idx + ch.len_utf8()),
            c if c.is_whitespace() => {}
            _ => return None,
        }
    }
    None
}

fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match rest[1..]
            .find(';')
            .filter(|end| *end <= 10)
            .and_then(|end| decode_entity(&rest[1..=end]).map(|ch| (ch, end)))
        {
            Some((ch, end)) => {
                out.push(ch);
                rest = &rest[end + 2..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode the body of one entity (`amp`, `#39`, `#x2019`).
fn decode_entity(body: &str) -> Option<char> {
    if let Some(number) = body.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    match body {
        "nbsp" => Some(' '),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "amp" => Some('&'),
        "rsquo" => Some('\u{2019}'),
        "lsquo" => Some('\u{2018}'),
        "rdquo" => Some('\u{201D}'),
        "ldquo" => Some('\u{201C}'),
        "hellip" => Some('\u{2026}'),
        "mdash" => Some('\u{2014}'),
        "ndash" => Some('\u{2013}'),
        _ => None,
    }
}
