//! Fallback move choice when the planner has nothing usable.

use crate::context::TurnContext;
use crate::safety::{classify, Safety};
use crate::types::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub direction: Direction,
    /// `Unsafe` means no direction qualified and `direction` is the last-resort default.
    pub safety: Safety,
}

impl Resolution {
    pub fn is_last_resort(&self) -> bool {
        self.safety == Safety::Unsafe
    }
}

/// Picks the first Safe direction in `priority`, else the last Risky one seen,
/// else `default`.
pub fn resolve(ctx: &TurnContext, priority: &[Direction], default: Direction) -> Resolution {
    let mut risky = None;

    for &dir in priority {
        match classify(ctx, dir) {
            Safety::Safe => {
                return Resolution {
                    direction: dir,
                    safety: Safety::Safe,
                }
            }
            Safety::Risky => risky = Some(dir),
            Safety::Unsafe => {}
        }
    }

    match risky {
        Some(direction) => Resolution {
            direction,
            safety: Safety::Risky,
        },
        None => Resolution {
            direction: default,
            safety: Safety::Unsafe,
        },
    }
}
