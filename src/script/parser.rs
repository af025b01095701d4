//! Recursive-descent parser: token stream into a flat command list
//!
//! `Repeat(n){...}` is unrolled at parse time into `n` physical copies of
//! its body, recursively for nested blocks. Unresolvable tokens are
//! dropped, and unbalanced braces simply truncate the parse at
//! end-of-tokens: malformed scripts degrade to fewer actions, never to an
//! error.

use super::resolver::{Command, resolve};
use super::tokenizer::{Token, tokenize};

/// Parse a raw script into its ordered command list
pub fn parse_script(script: &str) -> Vec<Command> {
    let tokens = tokenize(script);
    let (commands, _) = parse_sequence(&tokens, 0);
    commands
}

/// Parse one sequence starting at `index`; a `Close` token ends it and is
/// consumed. Returns the commands plus the index just past the sequence,
/// so nested parses stay reentrant.
pub fn parse_sequence(tokens: &[Token], mut index: usize) -> (Vec<Command>, usize) {
    let mut commands = Vec::new();

    while index < tokens.len() {
        match &tokens[index] {
            Token::Close => {
                index += 1;
                break;
            }
            Token::Repeat(count) => {
                index += 1;
                let (body, next) = parse_sequence(tokens, index);
                index = next;
                for _ in 0..*count {
                    commands.extend(body.iter().cloned());
                }
            }
            token => {
                if let Some(command) = resolve(token) {
                    commands.push(command);
                }
                index += 1;
            }
        }
    }

    (commands, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::MoveDir;

    fn moves(commands: &[Command]) -> Vec<MoveDir> {
        commands
            .iter()
            .map(|c| match c {
                Command::Move(dir) => *dir,
                other => panic!("expected a move, got {:?}", other),
            })
            .collect()
    }

    #[test]
    fn plain_sequence_keeps_order() {
        let commands = parse_script("MoveRight();MoveUp();MoveUp();");
        assert_eq!(
            moves(&commands),
            vec![MoveDir::Right, MoveDir::Up, MoveDir::Up]
        );
    }

    #[test]
    fn repeat_unrolls_n_copies() {
        for n in 0..4 {
            let commands = parse_script(&format!("Repeat({}){{MoveUp();}}", n));
            assert_eq!(commands.len(), n, "Repeat({}) must yield {} actions", n, n);
        }
    }

    #[test]
    fn nested_repeat_unrolls_inside_out() {
        // Repeat(2){X;Repeat(2){Y}} -> [X,Y,Y,X,Y,Y]
        let commands = parse_script("Repeat(2){MoveLeft();Repeat(2){MoveUp()}}");
        assert_eq!(
            moves(&commands),
            vec![
                MoveDir::Left,
                MoveDir::Up,
                MoveDir::Up,
                MoveDir::Left,
                MoveDir::Up,
                MoveDir::Up,
            ]
        );
    }

    #[test]
    fn unknown_tokens_are_omitted() {
        let commands = parse_script("MoveUp();Fly();MoveDown();");
        assert_eq!(moves(&commands), vec![MoveDir::Up, MoveDir::Down]);
    }

    #[test]
    fn radarless_shot_contributes_nothing() {
        let commands = parse_script("MoveUp();Shoot(MoveUp);MoveDown()");
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn missing_close_truncates_quietly() {
        let commands = parse_script("Repeat(3){MoveUp();MoveDown()");
        // Body parsed to end-of-tokens, still unrolled three times
        assert_eq!(commands.len(), 6);
    }

    #[test]
    fn stray_close_ends_the_top_level() {
        let commands = parse_script("MoveUp();};MoveDown()");
        assert_eq!(moves(&commands), vec![MoveDir::Up]);
    }

    #[test]
    fn empty_script_is_empty() {
        assert!(parse_script("").is_empty());
        assert!(parse_script("  ;\n;  ").is_empty());
    }

    #[test]
    fn deeply_nested_repeats() {
        let commands = parse_script("Repeat(2){Repeat(2){Repeat(2){Wait}}}");
        assert_eq!(commands.len(), 8);
        assert!(commands.iter().all(|c| *c == Command::Wait));
    }
}
