//! Display-only syntax colorizer.
//!
//! A regex tokenizer splits a snippet into keyword/string/number/comment
//! runs and plain text; an Askama template renders the runs as escaped
//! HTML spans. It is not a parser and makes no attempt to be one.

use std::sync::LazyLock;

use askama::Template;
use regex::{Captures, Regex};
use serde::Serialize;

use super::{BackendFile, CatalogError, Language};

/// Keyword set for SQL snippets. Multi-word keywords match as a unit.
static SQL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?P<keyword>CREATE|TABLE|INSERT|INTO|VALUES|PRIMARY KEY|DEFAULT|AUTO_INCREMENT|NOT NULL|FOREIGN KEY|REFERENCES|USE|DATABASE|IF NOT EXISTS)\b",
    )
    .expect("Invalid regex")
});

/// Comments, quoted strings, keywords and numbers for JavaScript snippets.
///
/// Alternatives are tried at each position in this order, so `//` inside a
/// string literal stays part of the string.
static JS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<comment>//[^\n]*)",
        r#"|(?P<string>"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|`(?:[^`\\]|\\.)*`)"#,
        r"|\b(?P<keyword>const|let|var|function|async|await|return|exports|module|require|if|else|try|catch|new)\b",
        r"|\b(?P<number>\d+)\b",
    ))
    .expect("Invalid regex")
});

/// Classification of a run of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Plain,
    Keyword,
    String,
    Number,
    Comment,
}

/// A run of source text with its CSS class (empty for plain text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub class: &'static str,
}

#[derive(Template)]
#[template(path = "code/highlighted.html")]
struct HighlightedCode<'a> {
    language: &'a str,
    tokens: Vec<Token<'a>>,
}

const fn class_for(language: Language, kind: TokenKind) -> &'static str {
    match (language, kind) {
        (_, TokenKind::Plain) => "",
        (Language::Sql, TokenKind::Keyword) => "text-pink-600 font-bold",
        (Language::Javascript, TokenKind::Keyword) => "text-blue-600 font-bold",
        (_, TokenKind::String) => "text-green-600",
        (_, TokenKind::Number) => "text-orange-500",
        (_, TokenKind::Comment) => "text-slate-400 italic",
    }
}

fn kind_of(caps: &Captures<'_>) -> TokenKind {
    if caps.name("comment").is_some() {
        TokenKind::Comment
    } else if caps.name("string").is_some() {
        TokenKind::String
    } else if caps.name("number").is_some() {
        TokenKind::Number
    } else {
        TokenKind::Keyword
    }
}

/// Split `code` into classified runs. Concatenating the runs' text yields
/// `code` unchanged.
#[must_use]
pub fn tokenize(code: &str, language: Language) -> Vec<Token<'_>> {
    let re = match language {
        Language::Sql => &*SQL_RE,
        Language::Javascript => &*JS_RE,
    };

    let token = |kind, text| Token {
        kind,
        text,
        class: class_for(language, kind),
    };

    let mut tokens = Vec::new();
    let mut cursor = 0;
    for caps in re.captures_iter(code) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > cursor {
            if let Some(text) = code.get(cursor..whole.start()) {
                tokens.push(token(TokenKind::Plain, text));
            }
        }
        tokens.push(token(kind_of(&caps), whole.as_str()));
        cursor = whole.end();
    }
    if let Some(rest) = code.get(cursor..).filter(|rest| !rest.is_empty()) {
        tokens.push(token(TokenKind::Plain, rest));
    }
    tokens
}

/// Render `code` as a `<pre><code>` block of escaped, classed spans.
///
/// # Errors
///
/// Returns [`CatalogError::Template`] if the template fails to render.
pub fn to_html(code: &str, language: Language) -> Result<String, CatalogError> {
    let template = HighlightedCode {
        language: language.as_str(),
        tokens: tokenize(code, language),
    };
    Ok(template.render()?)
}

/// Highlight a bundled file.
///
/// # Errors
///
/// Returns [`CatalogError::Template`] if the template fails to render.
pub fn highlight_file(file: &BackendFile) -> Result<String, CatalogError> {
    to_html(file.content, file.language)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds<'a>(tokens: &[Token<'a>]) -> Vec<(TokenKind, &'a str)> {
        tokens.iter().map(|token| (token.kind, token.text)).collect()
    }

    #[test]
    fn test_javascript_runs() {
        let tokens = tokenize("const port = 5000; // fallback", Language::Javascript);
        assert_eq!(
            kinds(&tokens),
            [
                (TokenKind::Keyword, "const"),
                (TokenKind::Plain, " port = "),
                (TokenKind::Number, "5000"),
                (TokenKind::Plain, "; "),
                (TokenKind::Comment, "// fallback"),
            ]
        );
    }

    #[test]
    fn test_comment_marker_inside_string() {
        let tokens = tokenize("const url = 'http://localhost';", Language::Javascript);
        assert!(
            tokens
                .iter()
                .any(|t| t.kind == TokenKind::String && t.text == "'http://localhost'")
        );
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Comment));
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        let tokens = tokenize("constant newer mysql2", Language::Javascript);
        assert_eq!(kinds(&tokens), [(TokenKind::Plain, "constant newer mysql2")]);
    }

    #[test]
    fn test_sql_multiword_keywords() {
        let tokens = tokenize("id INT NOT NULL PRIMARY KEY", Language::Sql);
        let keywords: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Keyword)
            .map(|t| t.text)
            .collect();
        assert_eq!(keywords, ["NOT NULL", "PRIMARY KEY"]);
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Number));
    }

    #[test]
    fn test_tokens_cover_input() {
        for file in super::super::files() {
            let joined: String = tokenize(file.content, file.language)
                .iter()
                .map(|t| t.text)
                .collect();
            assert_eq!(joined, file.content, "{}", file.path);
        }
    }

    #[test]
    fn test_html_is_escaped() {
        let html = to_html("if (a < b) { return \"<b>\"; }", Language::Javascript).expect("render");
        assert!(html.starts_with("<pre class=\"code code-javascript\"><code>"));
        assert!(html.contains("<span class=\"text-blue-600 font-bold\">if</span>"));
        assert!(html.contains("a &#60; b"));
        assert!(!html.contains("a < b"));
        assert!(html.contains("&#34;&#60;b&#62;&#34;"));
    }

    #[test]
    fn test_highlight_bundled_schema() {
        let file = super::super::find("schema.sql").expect("schema");
        let html = highlight_file(file).expect("render");
        assert!(html.contains("<span class=\"text-pink-600 font-bold\">CREATE</span>"));
    }
}
