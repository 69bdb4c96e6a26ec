// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Splitting normalized lines into spanned words

use chumsky::error::Rich;
use chumsky::prelude::*;
use chumsky::span::Spanned;
use std::borrow::Cow;

/// A whitespace-delimited word, along with its byte span within the line
pub type Word<'a> = Spanned<&'a str>;

/// Parser for a line of whitespace-separated words
///
/// Whitespace is anything [`char::is_whitespace`] accepts. The parser accepts any input.
fn words<'a>() -> impl Parser<'a, &'a str, Vec<Word<'a>>, extra::Err<Rich<'a, char>>> {
    let word = any()
        .filter(|c: &char| !c.is_whitespace())
        .repeated()
        .at_least(1)
        .to_slice()
        .map_with(|inner, e| Spanned {
            inner,
            span: e.span(),
        });

    text::whitespace().ignore_then(
        word.then_ignore(text::whitespace())
            .repeated()
            .collect::<Vec<_>>(),
    )
}

/// Split `line` into words
///
/// ```
/// use mal::scan::split_words;
/// let words = split_words("  LOOP: ADD R1, R2 ");
/// let text: Vec<&str> = words.iter().map(|w| w.inner).collect();
/// assert_eq!(text, ["LOOP:", "ADD", "R1,", "R2"]);
/// assert_eq!(words[2].span.into_range(), 12..15);
/// ```
#[must_use]
pub fn split_words(line: &str) -> Vec<Word<'_>> {
    words().parse(line).into_output().unwrap_or_default()
}

/// Turn the words following an opcode into operand tokens
///
/// Commas are deleted from each word, and words made up only of commas are dropped, so
/// `R1,R2` is a single operand `R1R2`, while `R1 , R2` is two.
pub fn operand_tokens<'a, 'w>(
    words: &'w [Word<'a>],
) -> impl Iterator<Item = Spanned<Cow<'a, str>>> + 'w {
    words.iter().filter_map(|&Spanned { inner, span }| {
        let token = if inner.contains(',') {
            Cow::Owned(inner.replace(',', ""))
        } else {
            Cow::Borrowed(inner)
        };
        (!token.is_empty()).then_some(Spanned { inner: token, span })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inner<'a>(words: &[Word<'a>]) -> Vec<&'a str> {
        words.iter().map(|w| w.inner).collect()
    }

    #[test]
    fn empty_and_blank() {
        assert!(split_words("").is_empty());
        assert!(split_words(" \u{a0}  ").is_empty());
    }

    #[test]
    fn spans_index_the_line() {
        let line = "BEQ  R1,R2 \u{2003}x";
        for word in split_words(line) {
            assert_eq!(&line[word.span.into_range()], word.inner);
        }
        assert_eq!(inner(&split_words(line)), ["BEQ", "R1,R2", "x"]);
    }

    #[test]
    fn comma_handling() {
        let words = split_words("ADD R1,R2 , R3,");
        let operands: Vec<_> = operand_tokens(&words[1..]).map(|t| t.inner).collect();
        assert_eq!(operands, ["R1R2", "R3"]);
    }

    #[test]
    fn operand_spans_are_word_spans() {
        let words = split_words("LOADI R1, 9");
        let spans: Vec<_> = operand_tokens(&words[1..])
            .map(|t| t.span.into_range())
            .collect();
        assert_eq!(spans, [6..9, 10..11]);
    }
}
