//! Recursive-descent citation grammar
//!
//! ```text
//! Passage    ::= Book Punct? Chapter (Punct? VerseList)?
//! Book       ::= (Number in 1..=3)? Word+
//! Chapter    ::= Number>0
//! VerseList  ::= (VerseRange | Verse) (Punct (VerseRange | Verse))*
//! VerseRange ::= Number>0 Dash Number>0
//! Verse      ::= Number>0
//! Punct      ::= : ; , . - / \ | "and" | "through" | "to"
//! ```
//!
//! Each rule either consumes what it matched or hands every token it took back to the stream,
//! last one first. A failed rule never leaves the stream half-consumed.

use crate::builder::LocatorBuilder;
use crate::lexing::{Token, TokenStream};

/// Upper bound on the number of verses a single range expands to.
pub const MAX_RANGE_SPAN: u32 = 10_000;

pub struct PassageParser<'a> {
    builder: &'a mut LocatorBuilder,
    ts: TokenStream,
    verses: Vec<u32>,
    truncated: bool,
}

impl<'a> PassageParser<'a> {
    pub fn new(builder: &'a mut LocatorBuilder) -> Self {
        PassageParser {
            builder,
            ts: TokenStream::default(),
            verses: Vec::new(),
            truncated: false,
        }
    }

    /// Run the grammar over `text`, writing results into the builder.
    pub fn parse(mut self, text: &str) {
        self.ts = TokenStream::from_source(text);
        self.passage();

        let leftover = self.ts.drain();
        if !leftover.is_empty() {
            tracing::debug!(text, ?leftover, "ignoring tokens after the citation");
        }
    }

    // Passage ::= Book Punct? Chapter (Punct? VerseList)?
    fn passage(&mut self) {
        let has_book = self.book();
        self.punctuation();
        let has_chapter = self.chapter();
        if has_chapter {
            self.punctuation();
            self.verse_list();
        }

        let verses = std::mem::take(&mut self.verses);
        self.builder.set_verses(verses);
        if self.truncated {
            self.builder.mark_verses_clamped();
        }

        let succeeded = has_book && has_chapter;
        if !succeeded {
            tracing::debug!(has_book, has_chapter, "citation is incomplete");
        }
        self.builder.finish_parse(succeeded);
    }

    // Book ::= (Number in 1..=3)? Word+
    fn book(&mut self) -> bool {
        let mut lead = self.ts.get();
        let prefix = match lead.as_ref().and_then(Token::as_number) {
            Some(n) if (1..=3).contains(&n) => Some(n),
            _ => {
                self.ts.unget(lead.take());
                None
            }
        };

        let mut words = Vec::new();
        loop {
            match self.ts.get() {
                Some(Token::Word(word)) => words.push(word),
                other => {
                    self.ts.unget(other);
                    break;
                }
            }
        }

        if words.is_empty() {
            // a lone small number is a chapter, not a book prefix
            self.ts.unget(lead);
            return false;
        }

        let name = prefix
            .map(|n| n.to_string())
            .into_iter()
            .chain(words)
            .collect::<Vec<_>>()
            .join(" ");
        self.builder.set_book(&name);
        true
    }

    // Punct
    fn punctuation(&mut self) -> bool {
        let token = self.ts.get();
        if token.as_ref().is_some_and(Token::is_punctuation) {
            true
        } else {
            self.ts.unget(token);
            false
        }
    }

    // Chapter ::= Number>0
    fn chapter(&mut self) -> bool {
        let token = self.ts.get();
        match positive(&token) {
            Some(chapter) => {
                self.builder.set_chapter(chapter);
                true
            }
            None => {
                self.ts.unget(token);
                false
            }
        }
    }

    // VerseList ::= (VerseRange | Verse) (Punct (VerseRange | Verse))*
    fn verse_list(&mut self) {
        loop {
            if !self.verse_range() && !self.verse() {
                return;
            }
            if !self.punctuation() {
                return;
            }
        }
    }

    // VerseRange ::= Number>0 Dash Number>0
    fn verse_range(&mut self) -> bool {
        let a = self.ts.get();
        let Some(start) = positive(&a) else {
            self.ts.unget(a);
            return false;
        };

        let dash = self.ts.get();
        if !dash.as_ref().is_some_and(Token::is_dash) {
            self.ts.unget(dash);
            self.ts.unget(a);
            return false;
        }

        let b = self.ts.get();
        let Some(end) = positive(&b) else {
            self.ts.unget(b);
            self.ts.unget(dash);
            self.ts.unget(a);
            return false;
        };

        let (low, high) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        let cap = low.saturating_add(MAX_RANGE_SPAN - 1);
        let high = if high > cap {
            tracing::debug!(low, high, cap, "range too long, truncated");
            self.truncated = true;
            cap
        } else {
            high
        };
        self.verses.extend(low..=high);
        true
    }

    // Verse ::= Number>0
    fn verse(&mut self) -> bool {
        let token = self.ts.get();
        match positive(&token) {
            Some(verse) => {
                self.verses.push(verse);
                true
            }
            None => {
                self.ts.unget(token);
                false
            }
        }
    }
}

fn positive(token: &Option<Token>) -> Option<u32> {
    token
        .as_ref()
        .and_then(Token::as_number)
        .filter(|&n| n > 0)
}
