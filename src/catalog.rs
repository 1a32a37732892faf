//! Built-in border presets.
//!
//! Two fixed, ordered tiers. Which tier a caller may use is decided outside this crate.

use crate::foundation::color::Color;
use crate::foundation::core::FrameShape;
use crate::foundation::error::{CircleFxError, CircleFxResult};
use crate::render::border::DrawRequest;
use crate::render::pattern::PatternKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A named pattern + color combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BorderPreset {
    /// Stable unique identifier (kebab-case).
    pub id: &'static str,
    /// Pattern drawn by this preset.
    #[serde(rename = "type")]
    pub pattern: PatternKind,
    /// Primary color.
    pub color: Color,
    /// Display name.
    pub name: &'static str,
    /// Accent color, for patterns that use one.
    #[serde(rename = "secondaryColor", skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<Color>,
}

impl BorderPreset {
    const fn new(id: &'static str, pattern: PatternKind, color: u32, name: &'static str) -> Self {
        Self {
            id,
            pattern,
            color: Color::hex(color),
            name,
            secondary_color: None,
        }
    }

    const fn with_secondary(mut self, color: u32) -> Self {
        self.secondary_color = Some(Color::hex(color));
        self
    }

    /// Tier this preset belongs to.
    pub fn tier(&self) -> Tier {
        if PRIMARY.iter().any(|p| p.id == self.id) {
            Tier::Primary
        } else {
            Tier::Secondary
        }
    }

    /// Render request for this preset.
    pub fn draw_request(&self, size: f64, progress: f64, shape: FrameShape) -> DrawRequest {
        DrawRequest::new(self.pattern, self.color, size)
            .with_secondary(self.secondary_color)
            .with_progress(progress)
            .with_shape(shape)
    }
}

/// Catalog tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// The first, always-listed collection.
    Primary,
    /// The second collection.
    Secondary,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        })
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            other => Err(format!("unknown tier \"{other}\" (expected primary|secondary)")),
        }
    }
}

static PRIMARY: [BorderPreset; 11] = [
    BorderPreset::new("classic-blue", PatternKind::Minimal, 0x3B82F6, "Classic Blue"),
    BorderPreset::new("glow-red", PatternKind::RingGlow, 0xEF4444, "Glow Red"),
    BorderPreset::new("glow-green", PatternKind::RingGlow, 0x10B981, "Glow Green"),
    BorderPreset::new("neon-amber", PatternKind::NeonPulse, 0xF59E0B, "Neon Amber"),
    BorderPreset::new("progress-blue", PatternKind::Progress, 0x3B82F6, "Progress"),
    BorderPreset::new("wave-purple", PatternKind::Zigzag, 0xA855F7, "Wave"),
    BorderPreset::new("cyber-blue", PatternKind::Tech, 0x3B82F6, "Cyber"),
    BorderPreset::new("particles-green", PatternKind::Dots, 0x10B981, "Particles"),
    BorderPreset::new("double-amber", PatternKind::Double, 0xF59E0B, "Double"),
    BorderPreset::new("stardust-gold", PatternKind::FancyStars, 0xFCD34D, "Stardust"),
    BorderPreset::new("ornate-pink", PatternKind::Ornate, 0xEC4899, "Ornate"),
];

static SECONDARY: [BorderPreset; 15] = [
    BorderPreset::new("gradient-sunset", PatternKind::GradientRing, 0xFF4E50, "Sunset")
        .with_secondary(0xF9D423),
    BorderPreset::new("dashed-white", PatternKind::DashedRing, 0xFFFFFF, "Dashed"),
    BorderPreset::new("triple-cyan", PatternKind::TripleRing, 0x06B6D4, "Triple"),
    BorderPreset::new("square-dots-lime", PatternKind::SquareDots, 0x84CC16, "Squares"),
    BorderPreset::new("sun-rays-orange", PatternKind::SunRays, 0xF97316, "Solar"),
    BorderPreset::new("barcode-white", PatternKind::Barcode, 0xFFFFFF, "Data"),
    BorderPreset::new("circuit-green", PatternKind::Circuit, 0x22C55E, "Circuit"),
    BorderPreset::new("dna-blue", PatternKind::Dna, 0x6366F1, "Helix"),
    BorderPreset::new("wave-double-red", PatternKind::WaveDouble, 0xDC2626, "Vibration"),
    BorderPreset::new("glitch-cyan", PatternKind::Glitch, 0x22D3EE, "Glitch")
        .with_secondary(0xF43F5E),
    BorderPreset::new("pixel-green", PatternKind::Pixel, 0x4ADE80, "Retro"),
    BorderPreset::new("shards-white", PatternKind::Shards, 0xF8FAFC, "Crystal"),
    BorderPreset::new("vignette-black", PatternKind::Vignette, 0x000000, "Focus"),
    BorderPreset::new("flower-rose", PatternKind::Flower, 0xFB7185, "Bloom"),
    BorderPreset::new("hex-teal", PatternKind::HexGrid, 0x2DD4BF, "Honeycomb"),
];

/// Primary tier, in display order.
pub fn primary_presets() -> &'static [BorderPreset] {
    &PRIMARY
}

/// Secondary tier, in display order.
pub fn secondary_presets() -> &'static [BorderPreset] {
    &SECONDARY
}

/// One tier's presets.
pub fn presets_for_tier(tier: Tier) -> &'static [BorderPreset] {
    match tier {
        Tier::Primary => primary_presets(),
        Tier::Secondary => secondary_presets(),
    }
}

/// Every preset: primary tier first, then secondary.
pub fn all_presets() -> impl Iterator<Item = &'static BorderPreset> {
    PRIMARY.iter().chain(SECONDARY.iter())
}

/// Look up a preset by exact id.
pub fn preset_by_id(id: &str) -> Option<&'static BorderPreset> {
    let id = id.trim();
    all_presets().find(|p| p.id == id)
}

/// Check catalog integrity: unique non-empty ids and names, and every pattern tag resolvable.
pub fn validate_catalog() -> CircleFxResult<()> {
    let mut seen = HashSet::new();
    for p in all_presets() {
        if p.id.is_empty() || p.name.is_empty() {
            return Err(CircleFxError::validation(format!(
                "preset '{}' has an empty id or name",
                p.id
            )));
        }
        if !seen.insert(p.id) {
            return Err(CircleFxError::validation(format!(
                "duplicate preset id '{}'",
                p.id
            )));
        }
        if PatternKind::from_tag(p.pattern.as_tag()) != Some(p.pattern) {
            return Err(CircleFxError::validation(format!(
                "preset '{}' uses unrecognised pattern '{}'",
                p.id, p.pattern
            )));
        }
    }
    Ok(())
}

/// Flat JSON list of every preset (`id`, `type`, `color`, `name`, optional `secondaryColor`).
pub fn catalog_json() -> CircleFxResult<String> {
    let all: Vec<&BorderPreset> = all_presets().collect();
    serde_json::to_string_pretty(&all).map_err(|e| CircleFxError::serde(e.to_string()))
}

#[cfg(test)]
#[path = "../tests/unit/catalog/catalog.rs"]
mod tests;
