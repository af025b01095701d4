//! Script lexer: raw text into a flat token stream
//!
//! Lenient by design: whitespace, newlines and `;` are discarded as
//! separators, unknown characters are skipped with a diagnostic instead of
//! failing the whole script.

use bevy::prelude::*;

/// One lexical unit of a move script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `Repeat(n){` block opener, count already extracted
    Repeat(u32),
    /// `}` block closer
    Close,
    /// Bare identifier (`MoveUp`), empty call (`MoveUp()`), or argument
    /// call (`Shoot(MoveUp;Radar)`). `args` is the raw text between the
    /// outer parentheses, nested parens kept balanced.
    Call {
        name: String,
        args: Option<String>,
    },
}

impl Token {
    pub fn call(name: &str, args: Option<&str>) -> Self {
        Token::Call {
            name: name.to_string(),
            args: args.map(str::to_string),
        }
    }
}

pub fn tokenize(script: &str) -> Vec<Token> {
    let chars: Vec<char> = script.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() || c == ';' {
            i += 1;
            continue;
        }

        if c == '}' {
            tokens.push(Token::Close);
            i += 1;
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let name: String = chars[start..i].iter().collect();

            let args = if i < chars.len() && chars[i] == '(' {
                Some(read_balanced_args(&chars, &mut i, &name))
            } else {
                None
            };

            // `Repeat(n)` followed by `{` opens a block
            if name == "Repeat" {
                // skip separator whitespace before the brace
                let mut j = i;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                if j < chars.len() && chars[j] == '{' {
                    i = j + 1;
                    tokens.push(Token::Repeat(parse_repeat_count(args.as_deref())));
                    continue;
                }
            }

            tokens.push(Token::Call { name, args });
            continue;
        }

        debug!("skipping unknown character '{}' in script", c);
        i += 1;
    }

    tokens
}

/// Consume `(...)` starting at the opening paren, tracking nesting depth.
/// An unterminated group swallows the rest of the input (lenient).
fn read_balanced_args(chars: &[char], i: &mut usize, name: &str) -> String {
    debug_assert_eq!(chars[*i], '(');
    *i += 1; // opening paren
    let start = *i;
    let mut depth = 1usize;

    while *i < chars.len() {
        match chars[*i] {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let args: String = chars[start..*i].iter().collect();
                    *i += 1; // closing paren
                    return args;
                }
            }
            _ => {}
        }
        *i += 1;
    }

    warn!("unterminated argument list after '{}('", name);
    chars[start..].iter().collect()
}

fn parse_repeat_count(args: Option<&str>) -> u32 {
    let raw = args.unwrap_or("").trim();
    match raw.parse::<u32>() {
        Ok(n) => n,
        // a digit string too large to hold drops the whole block
        Err(_) if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) => {
            warn!("Repeat count '{}' is out of range, repeating 0 times", raw);
            0
        }
        Err(_) => {
            warn!("Repeat count '{}' is not a number, using 1", raw);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_statement_sequence() {
        let tokens = tokenize("MoveRight();MoveUp();MoveUp();");
        assert_eq!(
            tokens,
            vec![
                Token::call("MoveRight", Some("")),
                Token::call("MoveUp", Some("")),
                Token::call("MoveUp", Some("")),
            ]
        );
    }

    #[test]
    fn bare_identifiers_need_no_parens() {
        let tokens = tokenize("MoveUp; Wait ;MoveDown");
        assert_eq!(
            tokens,
            vec![
                Token::call("MoveUp", None),
                Token::call("Wait", None),
                Token::call("MoveDown", None),
            ]
        );
    }

    #[test]
    fn repeat_opener_and_closer() {
        let tokens = tokenize("Repeat(3){MoveUp();}");
        assert_eq!(
            tokens,
            vec![Token::Repeat(3), Token::call("MoveUp", Some("")), Token::Close]
        );
    }

    #[test]
    fn nested_parens_stay_inside_one_call() {
        let tokens = tokenize("Shoot(MoveUp();TurnLeft();Radar)");
        assert_eq!(
            tokens,
            vec![Token::call("Shoot", Some("MoveUp();TurnLeft();Radar"))]
        );
    }

    #[test]
    fn whitespace_and_newlines_are_separators() {
        let tokens = tokenize("MoveUp()\n  MoveDown()\r\n\tWait()");
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn unknown_characters_are_skipped() {
        let tokens = tokenize("?!MoveUp()##%");
        assert_eq!(tokens, vec![Token::call("MoveUp", Some(""))]);
    }

    #[test]
    fn unterminated_args_take_the_rest() {
        let tokens = tokenize("Shoot(MoveUp;Radar");
        assert_eq!(tokens, vec![Token::call("Shoot", Some("MoveUp;Radar"))]);
    }

    #[test]
    fn repeat_without_brace_is_a_plain_call() {
        let tokens = tokenize("Repeat(2);MoveUp()");
        assert_eq!(
            tokens,
            vec![Token::call("Repeat", Some("2")), Token::call("MoveUp", Some(""))]
        );
    }

    #[test]
    fn bad_repeat_count_defaults_to_one() {
        let tokens = tokenize("Repeat(x){MoveUp()}");
        assert_eq!(tokens[0], Token::Repeat(1));
    }

    #[test]
    fn oversized_repeat_count_repeats_zero_times() {
        let tokens = tokenize("Repeat(99999999999){MoveUp()}");
        assert_eq!(tokens[0], Token::Repeat(0));
    }
}
