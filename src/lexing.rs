//! Lexer
//!
//! Turns raw citation text into tokens with the logos lexer. Lexing never fails: whitespace is
//! skipped, and characters outside the token set are dropped silently, so "John 3:16!" lexes the
//! same as "John 3:16".

pub mod stream;
pub mod tokens;

pub use stream::TokenStream;
pub use tokens::{Punctuation, Token};

use logos::Logos;

/// Tokenize citation text, discarding unrecognized characters.
pub fn tokenize(source: &str) -> Vec<Token> {
    Token::lexer(source)
        .filter_map(|result| result.ok())
        .collect()
}

/// Tokenize and keep each token's byte span in `source`.
pub fn tokenize_with_spans(source: &str) -> Vec<(Token, logos::Span)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => tracing::trace!(span = ?lexer.span(), "skipping unrecognized input"),
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizes_citation() {
        let tokens = tokenize("Eph. 1:1-8");
        assert_eq!(
            tokens,
            vec![
                Token::Word("Eph".to_string()),
                Token::Dot,
                Token::Number(1),
                Token::Colon,
                Token::Number(1),
                Token::Dash,
                Token::Number(8),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize(""), vec![]);
        assert_eq!(tokenize("   \t\n"), vec![]);
    }

    #[test]
    fn test_unknown_characters_are_dropped() {
        assert_eq!(
            tokenize("John! 3:16?"),
            vec![
                Token::Word("John".to_string()),
                Token::Number(3),
                Token::Colon,
                Token::Number(16),
            ]
        );
    }

    #[test]
    fn test_letters_and_digits_split() {
        assert_eq!(
            tokenize("1John3"),
            vec![
                Token::Number(1),
                Token::Word("John".to_string()),
                Token::Number(3),
            ]
        );
    }

    #[test]
    fn test_words_in_other_scripts() {
        assert_eq!(
            tokenize("Ésaïe 2:3 Псалтирь"),
            vec![
                Token::Word("Ésaïe".to_string()),
                Token::Number(2),
                Token::Colon,
                Token::Number(3),
                Token::Word("Псалтирь".to_string()),
            ]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize_with_spans("Gen 1");
        assert_eq!(tokens[0], (Token::Word("Gen".to_string()), 0..3));
        assert_eq!(tokens[1], (Token::Number(1), 4..5));
    }
}
