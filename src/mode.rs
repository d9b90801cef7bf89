//! Chooses what the planner is looking for this turn.

use serde::{Deserialize, Serialize};

use crate::context::TurnContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Head for the nearest reachable food.
    Forage,
    /// Cut into the space an opponent's body still occupies.
    Pursuit,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Forage => "forage",
            Mode::Pursuit => "pursuit",
        }
    }
}

/// Pursuit when healthier than `health_threshold` and strictly longer than
/// every living rival. A snake alone on the board always forages.
pub fn select(ctx: &TurnContext, health_threshold: i32) -> Mode {
    let you = ctx.you();
    if you.health <= health_threshold {
        return Mode::Forage;
    }

    let mut rivals = ctx.snapshot.rivals().peekable();
    if rivals.peek().is_none() {
        return Mode::Forage;
    }

    if rivals.all(|rival| rival.length() < you.length()) {
        Mode::Pursuit
    } else {
        Mode::Forage
    }
}
