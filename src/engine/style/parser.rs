//! Font shorthand parser
//!
//! Grammar: `[slant] [weight] <size>[unit] <family>`. Slant and weight may
//! appear in any order; size and family are always the last two tokens.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::{FontSize, FontSlant, FontWeight, Style};

/// Parses font shorthand strings and caches the result per raw string.
#[derive(Debug, Default)]
pub struct StyleParser {
    cache: RwLock<HashMap<String, Arc<Style>>>,
}

impl StyleParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `raw`, returning the cached style when the exact same string
    /// was parsed before.
    pub fn parse(&self, raw: &str) -> Arc<Style> {
        if let Some(style) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(raw)
        {
            log::debug!(target: "StyleParser::Cache", "hit: {raw:?}");
            return Arc::clone(style);
        }

        let style = parse_shorthand(raw);
        log::debug!(target: "StyleParser::Cache", "miss: {raw:?} -> {style:?}");

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        // 同時に解析した場合は先に入った方を使う
        Arc::clone(
            cache
                .entry(raw.to_string())
                .or_insert_with(|| Arc::new(style)),
        )
    }

    /// Number of cached styles
    pub fn len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_shorthand(raw: &str) -> Style {
    let mut lex = Tokenizer::new(raw.trim()).collect_words();
    let mut style = Style::default();

    match lex.pop() {
        Some(family) => style.family = family,
        None => {
            log::debug!(target: "StyleParser::Malformed", "no family in {raw:?}, using default style");
            return style;
        }
    }
    match lex.pop() {
        Some(size) => style.size = FontSize::from_css(&size),
        None => {
            log::debug!(target: "StyleParser::Malformed", "no size in {raw:?}, using default size");
        }
    }

    // キーワードは大文字小文字を区別しない
    if let Some(kw) = FontWeight::KEYWORDS
        .iter()
        .find(|kw| lex.iter().any(|t| t.eq_ignore_ascii_case(kw)))
    {
        style.weight = FontWeight::from_keyword(kw);
    }
    if let Some(kw) = FontSlant::KEYWORDS
        .iter()
        .find(|kw| lex.iter().any(|t| t.eq_ignore_ascii_case(kw)))
    {
        style.slant = FontSlant::from_keyword(kw);
    }

    style
}

/// Shorthand token
#[derive(Debug, Clone, PartialEq)]
enum Token {
    /// Run of word characters (`bold`, `12px`, `50%`, `sans-serif`)
    Word(String),
    /// Quoted family name with the quotes stripped
    Quoted(String),
    /// `/` separating size from line-height
    Slash,
}

struct Tokenizer<'a> {
    chars: std::str::Chars<'a>,
    current: Option<char>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        let mut chars = input.chars();
        let current = chars.next();
        Self { chars, current }
    }

    fn bump(&mut self) {
        self.current = self.chars.next();
    }

    fn next_token(&mut self) -> Option<Token> {
        loop {
            match self.current? {
                c if is_word_char(c) => return Some(self.consume_word()),
                c @ ('"' | '\'') => {
                    self.bump();
                    if let Some(quoted) = self.consume_quoted(c) {
                        return Some(quoted);
                    }
                }
                '/' => {
                    self.bump();
                    return Some(Token::Slash);
                }
                // 空白やカンマは区切りとして読み飛ばす
                _ => self.bump(),
            }
        }
    }

    fn consume_word(&mut self) -> Token {
        let mut word = String::new();
        while let Some(c) = self.current.filter(|c| is_word_char(*c)) {
            word.push(c);
            self.bump();
        }
        Token::Word(word)
    }

    /// Consumes up to the closing quote. An empty quoted group yields no token.
    fn consume_quoted(&mut self, quote: char) -> Option<Token> {
        let mut text = String::new();
        while let Some(c) = self.current {
            self.bump();
            if c == quote {
                break;
            }
            text.push(c);
        }
        (!text.is_empty()).then_some(Token::Quoted(text))
    }

    /// Words in order, dropping the line-height that follows a `/`.
    fn collect_words(mut self) -> Vec<String> {
        let mut words = Vec::new();
        let mut skip_next = false;
        while let Some(token) = self.next_token() {
            match token {
                Token::Slash => skip_next = true,
                Token::Word(w) | Token::Quoted(w) => {
                    if !std::mem::take(&mut skip_next) {
                        words.push(w);
                    }
                }
            }
        }
        words
    }
}

/// `-` と `.` も単語に含める。`sans-serif` や `1.5em` を1トークンとして扱うため
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '%' | '-' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(input: &str) -> Vec<String> {
        Tokenizer::new(input).collect_words()
    }

    #[test]
    fn tokenizes_quoted_family() {
        assert_eq!(
            words(r#"italic 12px "Times New Roman""#),
            vec!["italic", "12px", "Times New Roman"]
        );
        assert_eq!(words("bold 1.5em 'Deja Vu'"), vec!["bold", "1.5em", "Deja Vu"]);
    }

    #[test]
    fn drops_line_height() {
        assert_eq!(words("12px/1.5 serif"), vec!["12px", "serif"]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(words("12px \"Open Sans"), vec!["12px", "Open Sans"]);
    }

    #[test]
    fn shorthand_defaults() {
        let style = parse_shorthand("   ");
        assert_eq!(style, Style::default());

        let style = parse_shorthand("serif");
        assert_eq!(style.family, "serif");
        assert_eq!(style.size, FontSize::Px(10.0));
    }

    #[test]
    fn shorthand_keywords_any_order() {
        let style = parse_shorthand("bold italic 20px gentium");
        assert_eq!(style.weight, FontWeight::Bold);
        assert_eq!(style.slant, FontSlant::Italic);

        let style = parse_shorthand("italic 300 20px gentium");
        assert_eq!(style.weight, FontWeight::Normal);
        assert_eq!(style.slant, FontSlant::Italic);
    }
}
