use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

// Initialize syntax highlighting resources once
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

pub const DEFAULT_SYNTAX_THEME: &str = "base16-ocean.dark";
pub const EXCERPT_LENGTH: usize = 160;
pub const WORDS_PER_MINUTE: usize = 265;

/// Split a `---` delimited front matter block from the document body.
/// Returns `None` for the front matter when the document has none.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let trimmed = content.trim_start_matches('\u{feff}');
    let Some(rest) = trimmed
        .strip_prefix("---\n")
        .or_else(|| trimmed.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(front), body);
        }
        offset += line.len();
    }

    // Closing delimiter on the last line with no trailing newline.
    if rest[offset..].trim_end() == "---" {
        return (Some(&rest[..offset]), "");
    }

    (None, content)
}

/// Parser options for a body whose front matter has already been split off.
/// Metadata blocks stay disabled so a leading `---` is a thematic break.
fn body_options() -> Options {
    Options::all().difference(
        Options::ENABLE_YAML_STYLE_METADATA_BLOCKS | Options::ENABLE_PLUSES_DELIMITED_METADATA_BLOCKS,
    )
}

/// Render markdown to HTML, highlighting fenced code blocks.
pub fn render_markdown(content: &str, syntax_theme: &str) -> String {
    let parser = Parser::new_ext(content, body_options());

    let events: Vec<Event> = parser.collect();
    let mut processed_events = Vec::new();
    let mut i = 0;

    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) => {
                let mut code_content = String::new();
                i += 1;

                while i < events.len() {
                    match &events[i] {
                        Event::End(TagEnd::CodeBlock) => break,
                        Event::Text(text) => code_content.push_str(text),
                        _ => {}
                    }
                    i += 1;
                }

                processed_events.push(Event::Html(highlight(&code_content, lang, syntax_theme).into()));
            }
            _ => {
                processed_events.push(events[i].clone());
            }
        }
        i += 1;
    }

    let mut out = String::new();
    html::push_html(&mut out, processed_events.into_iter());

    out
}

fn highlight(code: &str, lang: &str, syntax_theme: &str) -> String {
    let syntax = SYNTAX_SET.find_syntax_by_token(lang).or_else(|| match lang {
        "toml" => SYNTAX_SET.find_syntax_by_name("YAML"),
        "ts" | "tsx" | "typescript" => SYNTAX_SET.find_syntax_by_name("JavaScript"),
        _ => None,
    });
    let theme = THEME_SET
        .themes
        .get(syntax_theme)
        .or_else(|| THEME_SET.themes.get(DEFAULT_SYNTAX_THEME));

    match (syntax, theme) {
        (Some(syntax), Some(theme)) => highlighted_html_for_string(code, &SYNTAX_SET, syntax, theme)
            .unwrap_or_else(|_| plain_code_block(code)),
        _ => plain_code_block(code),
    }
}

fn plain_code_block(code: &str) -> String {
    format!("<pre><code>{}</code></pre>", html_escape::encode_text(code))
}

/// The readable text of a markdown body, without markup or code blocks.
pub fn plain_text(content: &str) -> String {
    let mut text = String::new();
    let mut in_code_block = false;

    for event in Parser::new_ext(content, body_options()) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(t) | Event::Code(t) if !in_code_block => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Prune text to at most `length` characters, cutting on a word boundary.
pub fn excerpt(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }

    let mut out = String::new();
    for word in text.split_whitespace() {
        let needed = if out.is_empty() { word.chars().count() } else { out.chars().count() + 1 + word.chars().count() };
        if needed > length {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }

    if out.is_empty() {
        out = text.chars().take(length).collect();
    }
    out.push('…');
    out
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count()
}

/// Reading time in whole minutes, never less than one.
pub fn time_to_read(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}
