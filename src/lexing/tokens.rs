//! Token definitions for citation text
//!
//! Citations are short and loosely punctuated ("Eph. 1:1 through 8"), so the token set is tiny:
//! words, numbers, and the seven punctuation characters people use between the parts of a
//! reference. Whitespace is skipped by logos and never reaches the parser. Anything else is a
//! lexer error, which the tokenizer drops.

use logos::Logos;
use serde::Serialize;
use std::fmt;

/// All tokens the citation lexer can produce
#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// A run of letters in any script, case preserved
    #[regex(r"\p{Alphabetic}+", |lex| lex.slice().to_string())]
    Word(String),

    /// A run of digits. Values that do not fit saturate at `u32::MAX`
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u32>().unwrap_or(u32::MAX))]
    Number(u32),

    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("-")]
    Dash,
    #[token("/")]
    Slash,
    #[token("\\")]
    Backslash,
    #[token(".")]
    Dot,
}

/// Punctuation as the grammar sees it, after words like "and" or "through" are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Punctuation {
    Colon,
    Semicolon,
    Comma,
    Dash,
    Slash,
    Backslash,
    Dot,
}

impl Punctuation {
    /// Map a connective word onto the punctuation it stands for.
    pub fn from_word(word: &str) -> Option<Punctuation> {
        match word.to_ascii_lowercase().as_str() {
            "and" => Some(Punctuation::Comma),
            "through" | "to" => Some(Punctuation::Dash),
            _ => None,
        }
    }
}

impl Token {
    /// Classify this token as punctuation, either a literal character or a connective word.
    pub fn punctuation(&self) -> Option<Punctuation> {
        match self {
            Token::Colon => Some(Punctuation::Colon),
            Token::Semicolon => Some(Punctuation::Semicolon),
            Token::Comma => Some(Punctuation::Comma),
            Token::Dash => Some(Punctuation::Dash),
            Token::Slash => Some(Punctuation::Slash),
            Token::Backslash => Some(Punctuation::Backslash),
            Token::Dot => Some(Punctuation::Dot),
            Token::Word(word) => Punctuation::from_word(word),
            Token::Number(_) => None,
        }
    }

    pub fn is_punctuation(&self) -> bool {
        self.punctuation().is_some()
    }

    /// A literal dash, or a word that reads as one ("through", "to").
    pub fn is_dash(&self) -> bool {
        self.punctuation() == Some(Punctuation::Dash)
    }

    pub fn as_number(&self) -> Option<u32> {
        match self {
            Token::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Token::Word(word) => Some(word),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => write!(f, "{word}"),
            Token::Number(n) => write!(f, "{n}"),
            Token::Colon => write!(f, ":"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),
            Token::Dash => write!(f, "-"),
            Token::Slash => write!(f, "/"),
            Token::Backslash => write!(f, "\\"),
            Token::Dot => write!(f, "."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<Token> {
        Token::lexer(source).filter_map(|result| result.ok()).collect()
    }

    #[test]
    fn test_words_and_numbers() {
        assert_eq!(
            lex_all("John 3"),
            vec![Token::Word("John".to_string()), Token::Number(3)]
        );
    }

    #[test]
    fn test_all_punctuation_characters() {
        assert_eq!(
            lex_all(": ; , - / \\ ."),
            vec![
                Token::Colon,
                Token::Semicolon,
                Token::Comma,
                Token::Dash,
                Token::Slash,
                Token::Backslash,
                Token::Dot,
            ]
        );
    }

    #[test]
    fn test_number_overflow_saturates() {
        assert_eq!(lex_all("99999999999"), vec![Token::Number(u32::MAX)]);
    }

    #[test]
    fn test_connective_words_are_punctuation() {
        assert_eq!(
            Token::Word("AND".to_string()).punctuation(),
            Some(Punctuation::Comma)
        );
        assert!(Token::Word("through".to_string()).is_dash());
        assert!(Token::Word("To".to_string()).is_dash());
        assert!(!Token::Word("Dragon".to_string()).is_punctuation());
        assert!(!Token::Number(4).is_punctuation());
    }
}
