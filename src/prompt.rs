//! Prompt compilation from a style selection.
//!
//! The master template names its slots (`{framing}`, `{pose}`, `{outfit}`,
//! `{angle}`, `{background}`) and is rendered in one left-to-right pass.
//! Text inserted into a slot is never scanned again.

use crate::style::{Framing, Outfit, Pose, StyleAxis, StyleSelection};

/// Master prompt template.
const MASTER_TEMPLATE: &str = "A professional, high-resolution, profile photo, maintaining the exact facial structure, identity, and key features of the person in the input image. {framing} {pose} They are styled for a professional photo studio shoot, wearing {outfit}. The background is a solid '{background}' neutral studio. {angle} with bright and airy soft, diffused studio lighting, gently illuminating the face and creating a subtle catchlight in the eyes, conveying a sense of clarity. Captured on an 85mm f/1.8 lens with a shallow depth of field, exquisite focus on the eyes, and beautiful, soft bokeh. Observe crisp detail on the fabric texture of the clothing, individual strands of hair, and natural, realistic skin texture. The atmosphere exudes confidence, professionalism, and approachability. Clean and bright cinematic color grading with subtle warmth and balanced tones, ensuring a polished and contemporary feel.";

/// Studio background colour embedded in every prompt.
pub const BACKGROUND_COLOR: &str = "#141414";

/// Camera angle, derived from framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Angle {
    /// Lens at the subject's eye height.
    EyeLevel,
    /// Lens above the subject, looking down.
    High,
}

impl Angle {
    /// Full-body shots are taken at eye level; tighter framings from above.
    #[must_use]
    pub fn for_framing(framing: Framing) -> Self {
        match framing {
            Framing::FullBody => Self::EyeLevel,
            Framing::ChestUp | Framing::HalfBody => Self::High,
        }
    }

    /// Prompt fragment for this angle.
    #[must_use]
    pub fn fragment(self) -> &'static str {
        match self {
            Self::EyeLevel => "Shot from an eye-level angle",
            Self::High => "Shot from a high angle",
        }
    }
}

/// Named template slots.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Framing,
    Pose,
    Outfit,
    Angle,
    Background,
}

impl Slot {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "framing" => Some(Self::Framing),
            "pose" => Some(Self::Pose),
            "outfit" => Some(Self::Outfit),
            "angle" => Some(Self::Angle),
            "background" => Some(Self::Background),
            _ => None,
        }
    }
}

/// Resolved fragments for one rendering.
struct Fragments {
    framing: &'static str,
    pose: &'static str,
    outfit: &'static str,
    angle: &'static str,
}

impl Fragments {
    fn get(&self, slot: Slot) -> &'static str {
        match slot {
            Slot::Framing => self.framing,
            Slot::Pose => self.pose,
            Slot::Outfit => self.outfit,
            Slot::Angle => self.angle,
            Slot::Background => BACKGROUND_COLOR,
        }
    }
}

/// Compile the generation prompt for a pose, framing and outfit.
///
/// Pure and deterministic: the same three values always give the same text.
#[must_use]
pub fn compile_prompt(pose: Pose, framing: Framing, outfit: Outfit) -> String {
    let fragments = Fragments {
        framing: framing.fragment(),
        pose: pose.fragment(),
        outfit: outfit.fragment(),
        angle: Angle::for_framing(framing).fragment(),
    };
    render(MASTER_TEMPLATE, &fragments)
}

/// Compile the prompt for a [`StyleSelection`].
#[must_use]
pub fn compile_selection(selection: &StyleSelection) -> String {
    compile_prompt(selection.pose, selection.framing, selection.outfit)
}

/// Render `template`, replacing each known `{slot}` with its fragment.
///
/// A slot name never contains `{`. Unknown, nested or unterminated `{...}`
/// runs are copied through unchanged.
fn render(template: &str, fragments: &Fragments) -> String {
    let mut out = String::with_capacity(template.len() + 512);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').filter(|&close| !after[..close].contains('{'));
        match close {
            Some(close) => {
                let name = &after[..close];
                if let Some(slot) = Slot::from_name(name) {
                    out.push_str(fragments.get(slot));
                } else {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
