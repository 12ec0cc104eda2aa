// src/core/protocol/tokenizer.rs

//! Splits a single command line into binary-safe tokens using a shell-style
//! escaped-list grammar: space-separated fields, double-quote quoting, and
//! backslash escaping of the following byte.

use crate::core::errors::ExoDbError;
use bytes::Bytes;

const SEPARATOR: u8 = b' ';
const QUOTE: u8 = b'"';
const ESCAPE: u8 = b'\\';

/// Tokenizes one command line (without the trailing `\r\n`) into a list of
/// binary-safe tokens. The first token is uppercased for dispatch by the
/// caller; this function preserves the raw bytes of every token.
pub fn tokenize(line: &[u8]) -> Result<Vec<Bytes>, ExoDbError> {
    let mut tokens = Vec::new();
    let mut current = Vec::new();
    let mut in_quotes = false;
    let mut have_token = false;
    let mut i = 0;

    while i < line.len() {
        let b = line[i];
        match b {
            ESCAPE => {
                i += 1;
                if i >= line.len() {
                    return Err(ExoDbError::Tokenize(
                        "trailing escape character".to_string(),
                    ));
                }
                current.push(line[i]);
                have_token = true;
            }
            QUOTE => {
                in_quotes = !in_quotes;
                have_token = true;
            }
            SEPARATOR if !in_quotes => {
                if have_token {
                    tokens.push(Bytes::from(std::mem::take(&mut current)));
                    have_token = false;
                }
            }
            _ => {
                current.push(b);
                have_token = true;
            }
        }
        i += 1;
    }

    if in_quotes {
        return Err(ExoDbError::Tokenize("unterminated quote".to_string()));
    }
    if have_token {
        tokens.push(Bytes::from(current));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(s: &str) -> Vec<Vec<u8>> {
        tokenize(s.as_bytes())
            .unwrap()
            .into_iter()
            .map(|b| b.to_vec())
            .collect()
    }

    #[test]
    fn splits_on_space() {
        assert_eq!(tok("SET foo bar"), vec![b"SET".to_vec(), b"foo".to_vec(), b"bar".to_vec()]);
    }

    #[test]
    fn quotes_preserve_spaces() {
        assert_eq!(
            tok(r#"SET foo "hello world""#),
            vec![b"SET".to_vec(), b"foo".to_vec(), b"hello world".to_vec()]
        );
    }

    #[test]
    fn backslash_escapes_next_byte() {
        assert_eq!(tok(r"SET foo bar\ baz"), vec![b"SET".to_vec(), b"foo".to_vec(), b"bar baz".to_vec()]);
    }

    #[test]
    fn collapses_repeated_separators() {
        assert_eq!(tok("GET   foo"), vec![b"GET".to_vec(), b"foo".to_vec()]);
    }

    #[test]
    fn unterminated_quote_errors() {
        assert!(tokenize(br#"SET foo "bar"#).is_err());
    }

    #[test]
    fn trailing_escape_errors() {
        assert!(tokenize(b"SET foo\\").is_err());
    }

    #[test]
    fn is_binary_safe() {
        let line = [b'G', b'E', b'T', b' ', 0x00, 0xFF];
        let tokens = tokenize(&line).unwrap();
        assert_eq!(tokens[1].as_ref(), &[0x00, 0xFF]);
    }
}
