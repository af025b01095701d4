//! Token-to-command resolution and relative shot targeting
//!
//! Commands hold parameters only, never a captured position. A `Shoot`
//! keeps its modifier list and is aimed at invocation time against a fresh
//! radar fix, so a script written before the opponent's last move still
//! targets the most current intelligence.

use bevy::prelude::*;

use crate::actor::{Facing, MoveDir};

use super::tokenizer::Token;

/// Deferred script action bound to no world state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(MoveDir),
    /// Consumes one pacing step without touching the world
    Wait,
    /// Radar-guided shot; modifiers are applied to the radar fix when the
    /// command runs
    Shoot { modifiers: Vec<ShotModifier> },
}

/// Order-sensitive shot modifier, relative to the evolving working facing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotModifier {
    TurnLeft,
    TurnRight,
    /// `MoveUp`: one cell forward
    StepForward,
    /// `MoveDown`: one cell back
    StepBack,
    /// `MoveLeft`: strafe left
    StepLeft,
    /// `MoveRight`: strafe right
    StepRight,
}

/// Map one token to a command, or `None` for anything unresolvable
/// (rejected shots included). Never fails the surrounding parse.
pub fn resolve(token: &Token) -> Option<Command> {
    let Token::Call { name, args } = token else {
        return None;
    };

    match name.as_str() {
        "MoveUp" => resolve_move(MoveDir::Up, args),
        "MoveDown" => resolve_move(MoveDir::Down, args),
        "MoveLeft" => resolve_move(MoveDir::Left, args),
        "MoveRight" => resolve_move(MoveDir::Right, args),
        "Wait" => Some(Command::Wait),
        "Shoot" => resolve_shoot(args.as_deref().unwrap_or("")),
        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

fn resolve_move(dir: MoveDir, args: &Option<String>) -> Option<Command> {
    if let Some(args) = args
        && !args.trim().is_empty()
    {
        warn!("move command ignores arguments '{}'", args.trim());
    }
    Some(Command::Move(dir))
}

/// `Shoot(<modifiers...>;Radar)`. A shot with no `Radar` marker is rejected.
fn resolve_shoot(args: &str) -> Option<Command> {
    let items = split_top_level(args);

    let Some(radar_at) = items.iter().position(|item| item == "Radar") else {
        warn!("Shoot without a Radar argument rejected");
        return None;
    };

    let mut modifiers = Vec::with_capacity(radar_at);
    for item in &items[..radar_at] {
        match parse_modifier(item) {
            Some(modifier) => modifiers.push(modifier),
            None => warn!("unknown shoot modifier '{}', skipped", item),
        }
    }

    if radar_at + 1 < items.len() {
        debug!("shoot arguments after Radar ignored");
    }

    Some(Command::Shoot { modifiers })
}

/// Split on `;` outside any nested parentheses; trims each item and strips
/// an empty trailing call form (`MoveUp()` -> `MoveUp`).
fn split_top_level(args: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    for c in args.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ';' if depth == 0 => {
                push_item(&mut items, &mut current);
            }
            _ => current.push(c),
        }
    }
    push_item(&mut items, &mut current);
    items
}

fn push_item(items: &mut Vec<String>, current: &mut String) {
    let item = current.trim().trim_end_matches("()").trim().to_string();
    if !item.is_empty() {
        items.push(item);
    }
    current.clear();
}

fn parse_modifier(name: &str) -> Option<ShotModifier> {
    match name {
        "TurnLeft" => Some(ShotModifier::TurnLeft),
        "TurnRight" => Some(ShotModifier::TurnRight),
        "MoveUp" => Some(ShotModifier::StepForward),
        "MoveDown" => Some(ShotModifier::StepBack),
        "MoveLeft" => Some(ShotModifier::StepLeft),
        "MoveRight" => Some(ShotModifier::StepRight),
        _ => None,
    }
}

/// Apply modifiers left-to-right to a radar fix; the final working position
/// is the shot's target cell. Pure function of its inputs.
pub fn resolve_shot_target(pos: IVec2, facing: Facing, modifiers: &[ShotModifier]) -> IVec2 {
    let mut pos = pos;
    let mut facing = facing;

    for modifier in modifiers {
        match modifier {
            ShotModifier::TurnLeft => facing = facing.turned_left(),
            ShotModifier::TurnRight => facing = facing.turned_right(),
            ShotModifier::StepForward => pos += facing.delta(),
            ShotModifier::StepBack => pos -= facing.delta(),
            ShotModifier::StepLeft => pos += facing.turned_left().delta(),
            ShotModifier::StepRight => pos += facing.turned_right().delta(),
        }
    }

    pos
}
