//! Logical inputs and the table that decides which spawned player they drive.

use std::collections::BTreeMap;

/// Fixed keyboard layout of the generated page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
    M,
}

/// Held state of the five logical inputs for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub attack: bool,
    pub magic: bool,
}

impl InputFrame {
    pub fn from_keys(keys: &[Key]) -> Self {
        let mut frame = Self::default();
        for key in keys {
            match key {
                Key::Left => frame.left = true,
                Key::Right => frame.right = true,
                Key::Up => frame.up = true,
                Key::Space => frame.attack = true,
                Key::M => frame.magic = true,
            }
        }
        frame
    }

    /// -1, 0 or 1. Left wins when both directions are held.
    pub fn horizontal(&self) -> i8 {
        if self.left {
            -1
        } else if self.right {
            1
        } else {
            0
        }
    }
}

/// Input slot a device feeds, e.g. the keyboard is slot 0.
pub type Slot = usize;

/// Held inputs for one frame, per slot.
pub type Inputs = BTreeMap<Slot, InputFrame>;

/// Inputs with only the keyboard slot populated.
pub fn keyboard(frame: InputFrame) -> Inputs {
    Inputs::from([(0, frame)])
}

/// Which player index (spawn order) each input slot controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    slots: BTreeMap<Slot, usize>,
}

impl Default for Bindings {
    /// The keyboard drives the first spawned player only.
    fn default() -> Self {
        Self::new().bind(0, 0)
    }
}

impl Bindings {
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    pub fn bind(mut self, slot: Slot, player: usize) -> Self {
        self.slots.insert(slot, player);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, usize)> + '_ {
        self.slots.iter().map(|(&s, &p)| (s, p))
    }
}
