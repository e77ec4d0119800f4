//! Fixed trait and attribute palettes.
//!
//! Resolution is pure: the same trait name or attribute type always maps to
//! the same style, and unknown names fall back to gray.

use serde::Serialize;

/// Opacity applied to a trait color to derive its background.
pub const TRAIT_BACKGROUND_ALPHA: f32 = 0.15;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(220, 38, 38);
    pub const BLUE: Rgb = Rgb(37, 99, 235);
    pub const GREEN: Rgb = Rgb(22, 163, 74);
    pub const GRAY: Rgb = Rgb(107, 114, 128);

    pub const LIGHT_BLUE: Rgb = Rgb(173, 216, 230);
    pub const LIGHT_GREEN: Rgb = Rgb(144, 238, 144);
    pub const LIGHT_RED: Rgb = Rgb(255, 182, 182);
    pub const LIGHT_SALMON: Rgb = Rgb(255, 160, 122);
    pub const LIGHT_GRAY: Rgb = Rgb(211, 211, 211);

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// `rgba(r, g, b, alpha)`
    pub fn rgba(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }
}

/// Rendering style of one trait.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitStyle {
    pub trait_name: String,
    /// Foreground color, `#rrggbb`
    pub color: String,
    /// The trait color at 15% opacity
    pub background_color: String,
}

impl TraitStyle {
    /// Signature token, `name:color`.
    pub fn signature_token(&self) -> String {
        format!("{}:{}", self.trait_name, self.color)
    }
}

/// Rendering style of one attribute type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeStyle {
    /// Background color, `#rrggbb`
    pub background: String,
    /// Display label, e.g. "Direction"
    pub label: String,
}

impl AttributeStyle {
    /// Signature token, `attr:color`.
    pub fn signature_token(&self) -> String {
        format!("attr:{}", self.background)
    }
}

/// Color of a trait name. `NEGATION` has none.
pub fn trait_color(name: &str) -> Option<Rgb> {
    match name.trim().to_ascii_uppercase().as_str() {
        "NEGATION" => None,
        "SYMPTOM" => Some(Rgb::RED),
        "DIAGNOSIS" => Some(Rgb::BLUE),
        "SIGN" => Some(Rgb::GREEN),
        _ => Some(Rgb::GRAY),
    }
}

/// Style of a trait, or `None` for `NEGATION`. The name is upper-cased.
pub fn resolve_trait(name: &str) -> Option<TraitStyle> {
    let color = trait_color(name)?;
    Some(TraitStyle {
        trait_name: name.trim().to_ascii_uppercase(),
        color: color.hex(),
        background_color: color.rgba(TRAIT_BACKGROUND_ALPHA),
    })
}

/// Style of an attribute type.
pub fn resolve_attribute(attribute_type: &str) -> AttributeStyle {
    let (color, label) = match attribute_type.trim().to_ascii_uppercase().as_str() {
        "DIRECTION" => (Rgb::LIGHT_BLUE, "Direction"),
        "QUALITY" => (Rgb::LIGHT_GREEN, "Quality"),
        "SYSTEM_ORGAN_SITE" => (Rgb::LIGHT_RED, "Organ"),
        "DX_NAME" => (Rgb::LIGHT_SALMON, "Diagnosis Name"),
        _ => (Rgb::LIGHT_GRAY, attribute_type),
    };
    AttributeStyle {
        background: color.hex(),
        label: label.to_string(),
    }
}

/// Display label of an attribute type.
pub fn attribute_label(attribute_type: &str) -> String {
    resolve_attribute(attribute_type).label
}
