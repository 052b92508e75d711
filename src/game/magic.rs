use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Ice,
    Lightning,
    Poison,
}

/// Static per-player magic configuration, fixed at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagicProfile {
    pub element: Element,
    /// Projectile tint as 0xRRGGBB.
    pub color: u32,
    /// Projectile speed in pixels per second.
    pub speed: f32,
}

impl MagicProfile {
    pub const fn new(element: Element, color: u32, speed: f32) -> Self {
        Self {
            element,
            color,
            speed,
        }
    }

    pub fn default_table() -> Vec<Self> {
        vec![
            Self::new(Element::Fire, 0xff0000, 400.0),
            Self::new(Element::Ice, 0x00ffff, 300.0),
            Self::new(Element::Lightning, 0xffff00, 600.0),
            Self::new(Element::Poison, 0x00ff00, 350.0),
        ]
    }
}
