//! Gardener intents.
//!
//! The rendering/input layer decides which keys mean what; this module only sees
//! abstract [`Action`]s. Movement is level-triggered (held), while interact,
//! accelerate and reverse are edge-triggered so that holding a key fires once.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 2D vector for play-field positions and directions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new Vec2.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the length (magnitude) of the vector.
    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Returns a normalized (unit length) version of the vector.
    /// Returns zero vector if the vector has zero length.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            Self::ZERO
        }
    }

    /// Scale the vector by a scalar.
    #[must_use]
    pub fn scale(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// State of a button (pressed, just pressed, released).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    /// Whether the button is currently held down
    pub pressed: bool,
    /// Whether the button was just pressed this frame
    pub just_pressed: bool,
    /// Whether the button was just released this frame
    pub just_released: bool,
}

impl ButtonState {
    /// Update the button state based on whether it's currently pressed.
    pub fn update(&mut self, is_pressed: bool) {
        self.just_pressed = is_pressed && !self.pressed;
        self.just_released = !is_pressed && self.pressed;
        self.pressed = is_pressed;
    }
}

/// Gardener actions an input layer can bind keys to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move up (W / Up by default)
    MoveUp,
    /// Move down (S / Down by default)
    MoveDown,
    /// Move left (A / Left by default)
    MoveLeft,
    /// Move right (D / Right by default)
    MoveRight,
    /// Harvest, weed or plant the current cell (E by default)
    Interact,
    /// Accelerate time around the gardener (Z by default)
    Accelerate,
    /// Reverse time around the gardener (X by default)
    Reverse,
}

impl Action {
    /// Every action, in a stable order.
    pub const ALL: [Action; 7] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Interact,
        Action::Accelerate,
        Action::Reverse,
    ];
}

/// Intents for a single simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Intents {
    /// Held movement direction (-1 to 1 on each axis, y grows downward)
    pub movement: Vec2,
    /// A direction key is held, even if opposite keys cancel out
    #[serde(default)]
    pub moving: bool,
    /// Interact was pressed
    pub interact: bool,
    /// Accelerate was pressed
    pub accelerate: bool,
    /// Reverse was pressed
    pub reverse: bool,
}

impl Intents {
    /// No input at all.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Intents holding a movement direction.
    #[must_use]
    pub fn moving(dx: f32, dy: f32) -> Self {
        Self {
            movement: Vec2::new(dx, dy),
            moving: dx != 0.0 || dy != 0.0,
            ..Self::default()
        }
    }

    /// Intents pressing interact.
    #[must_use]
    pub fn interact() -> Self {
        Self {
            interact: true,
            ..Self::default()
        }
    }

    /// Intents pressing accelerate.
    #[must_use]
    pub fn accelerate() -> Self {
        Self {
            accelerate: true,
            ..Self::default()
        }
    }

    /// Intents pressing reverse.
    #[must_use]
    pub fn reverse() -> Self {
        Self {
            reverse: true,
            ..Self::default()
        }
    }

    /// Check if any movement input is active.
    #[must_use]
    pub fn has_movement(&self) -> bool {
        self.moving || self.movement.x != 0.0 || self.movement.y != 0.0
    }

    /// Same movement with the one-shot actions cleared.
    #[must_use]
    pub fn held_only(&self) -> Self {
        Self {
            movement: self.movement,
            moving: self.moving,
            ..Self::default()
        }
    }

    /// Fold newer intents into pending ones: movement is replaced, presses accumulate.
    pub fn absorb(&mut self, newer: &Intents) {
        self.movement = newer.movement;
        self.moving = newer.moving;
        self.interact |= newer.interact;
        self.accelerate |= newer.accelerate;
        self.reverse |= newer.reverse;
    }
}

/// Turns the set of currently held actions into per-tick [`Intents`].
#[derive(Debug, Default)]
pub struct IntentTracker {
    states: HashMap<Action, ButtonState>,
}

impl IntentTracker {
    /// Create a tracker with nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the actions held this frame and get this frame's intents.
    pub fn update(&mut self, held: &[Action]) -> Intents {
        for action in Action::ALL {
            self.states
                .entry(action)
                .or_default()
                .update(held.contains(&action));
        }

        let axis = |neg: Action, pos: Action| {
            f32::from(u8::from(self.is_held(pos))) - f32::from(u8::from(self.is_held(neg)))
        };

        Intents {
            movement: Vec2::new(
                axis(Action::MoveLeft, Action::MoveRight),
                axis(Action::MoveUp, Action::MoveDown),
            ),
            moving: [
                Action::MoveUp,
                Action::MoveDown,
                Action::MoveLeft,
                Action::MoveRight,
            ]
            .into_iter()
            .any(|action| self.is_held(action)),
            interact: self.just_pressed(Action::Interact),
            accelerate: self.just_pressed(Action::Accelerate),
            reverse: self.just_pressed(Action::Reverse),
        }
    }

    /// Whether an action is currently held.
    #[must_use]
    pub fn is_held(&self, action: Action) -> bool {
        self.states.get(&action).is_some_and(|s| s.pressed)
    }

    /// Whether an action went down this frame.
    #[must_use]
    pub fn just_pressed(&self, action: Action) -> bool {
        self.states.get(&action).is_some_and(|s| s.just_pressed)
    }
}
