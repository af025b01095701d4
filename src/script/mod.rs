//! The move-script DSL: lexing, parsing, and command resolution
//!
//! `"Repeat(2){MoveUp();Shoot(TurnLeft;Radar)}"` flows through
//! [`tokenize`] -> [`parse_script`] into a flat, ordered [`Command`] list
//! ready for paced execution.

mod parser;
mod resolver;
mod tokenizer;

pub use parser::{parse_script, parse_sequence};
pub use resolver::{Command, ShotModifier, resolve, resolve_shot_target};
pub use tokenizer::{Token, tokenize};
