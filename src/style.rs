//! Style catalog: the three closed axes a headshot is styled along.
//!
//! Each axis value maps to a fixed prompt fragment. Lookups by key never
//! fail; unknown keys resolve to the axis default.

use serde::{Deserialize, Serialize};

/// Common behaviour of a style axis.
pub trait StyleAxis: Copy + Default + PartialEq + 'static {
    /// Axis name, used in log messages.
    const NAME: &'static str;

    /// Every value of the axis, in display order.
    const ALL: &'static [Self];

    /// Canonical camelCase key (e.g. `"armsCrossed"`).
    fn key(self) -> &'static str;

    /// Prompt fragment for this value. Never empty.
    fn fragment(self) -> &'static str;

    /// Look up a value by key.
    ///
    /// Matching ignores ASCII case and `-`/`_` separators, so `arms-crossed`
    /// and `ARMS_CROSSED` both find `armsCrossed`.
    fn from_key(key: &str) -> Option<Self> {
        let wanted = normalize_key(key);
        Self::ALL.iter().copied().find(|v| normalize_key(v.key()) == wanted)
    }

    /// Look up a value by key, falling back to the axis default.
    fn resolve(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            let fallback = Self::default();
            tracing::warn!(
                axis = Self::NAME,
                key,
                fallback = fallback.key(),
                "unknown style key, using default"
            );
            fallback
        })
    }
}

fn normalize_key(key: &str) -> String {
    key.chars().filter(|c| *c != '-' && *c != '_').map(|c| c.to_ascii_lowercase()).collect()
}

/// Body pose of the subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pose {
    /// Facing the camera squarely.
    #[default]
    Default,
    /// Arms crossed, assertive.
    ArmsCrossed,
    /// Hand near the chin, thoughtful.
    Thinking,
}

impl StyleAxis for Pose {
    const NAME: &'static str = "pose";
    const ALL: &'static [Self] = &[Self::Default, Self::ArmsCrossed, Self::Thinking];

    fn key(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::ArmsCrossed => "armsCrossed",
            Self::Thinking => "thinking",
        }
    }

    fn fragment(self) -> &'static str {
        match self {
            Self::Default => {
                "The person looks directly at the camera, and the subject's body is also directly facing the camera."
            }
            Self::ArmsCrossed => {
                "The person looks directly at the camera while standing with their arms confidently crossed, conveying a sense of assertiveness and professionalism."
            }
            Self::Thinking => {
                "The person looks directly at the camera with a thoughtful expression, perhaps with a hand gently touching their chin, suggesting intellect and strategy."
            }
        }
    }
}

/// How much of the subject is in frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Framing {
    /// Chest up with headroom.
    #[default]
    ChestUp,
    /// Waist up.
    HalfBody,
    /// Head to toe.
    FullBody,
}

impl StyleAxis for Framing {
    const NAME: &'static str = "framing";
    const ALL: &'static [Self] = &[Self::ChestUp, Self::HalfBody, Self::FullBody];

    fn key(self) -> &'static str {
        match self {
            Self::ChestUp => "chestUp",
            Self::HalfBody => "halfBody",
            Self::FullBody => "fullBody",
        }
    }

    fn fragment(self) -> &'static str {
        match self {
            Self::ChestUp => {
                "The subject is framed from the chest up, with ample headroom and negative space above their head, ensuring the top of their head is not cropped."
            }
            Self::HalfBody => {
                "A half-body shot, capturing the person from the waist up, showing more of their attire and professional posture in the studio setting."
            }
            Self::FullBody => {
                "A full-body studio shot, capturing the person from head to toe, showcasing their complete professional attire and confident stance."
            }
        }
    }
}

/// What the subject is wearing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outfit {
    /// Smart casual blazer.
    #[default]
    Blazer,
    /// Formal business suit.
    Suit,
    /// Button-down shirt.
    Shirt,
    /// Turtleneck sweater.
    Turtleneck,
}

impl StyleAxis for Outfit {
    const NAME: &'static str = "outfit";
    const ALL: &'static [Self] = &[Self::Blazer, Self::Suit, Self::Shirt, Self::Turtleneck];

    fn key(self) -> &'static str {
        match self {
            Self::Blazer => "blazer",
            Self::Suit => "suit",
            Self::Shirt => "shirt",
            Self::Turtleneck => "turtleneck",
        }
    }

    fn fragment(self) -> &'static str {
        match self {
            Self::Blazer => "a smart casual blazer",
            Self::Suit => "a formal business suit",
            Self::Shirt => "a crisp button-down shirt",
            Self::Turtleneck => "a stylish turtleneck sweater for a creative professional look",
        }
    }
}

/// A complete style choice, passed explicitly into each generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleSelection {
    /// Selected pose.
    pub pose: Pose,
    /// Selected framing.
    pub framing: Framing,
    /// Selected outfit.
    pub outfit: Outfit,
}

impl StyleSelection {
    /// Build a selection from raw keys, falling back to defaults per axis.
    #[must_use]
    pub fn resolve(pose: &str, framing: &str, outfit: &str) -> Self {
        Self {
            pose: Pose::resolve(pose),
            framing: Framing::resolve(framing),
            outfit: Outfit::resolve(outfit),
        }
    }
}
