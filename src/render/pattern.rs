use serde::{Deserialize, Serialize};
use std::fmt;

/// Every border-drawing routine the renderer knows.
///
/// The string tag (`as_tag`) is the stable identifier used by catalog records and settings files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    /// Single stroked outline.
    Minimal,
    /// Thick ring with a thin white highlight.
    RingGlow,
    /// Solid outline plus a faint outer halo.
    NeonPulse,
    /// Faint track plus a colored partial outline.
    Progress,
    /// Saw-tooth ring.
    Zigzag,
    /// Gapped arc segments (or corner brackets) over a faint inner outline.
    Tech,
    /// Ring of small filled circles.
    Dots,
    /// Two concentric outlines.
    Double,
    /// Five-pointed stars over a dashed outline.
    FancyStars,
    /// Sinusoidally scalloped ring.
    Ornate,
    /// Outline stroked with a diagonal linear gradient.
    GradientRing,
    /// Dashed outline.
    DashedRing,
    /// Three concentric outlines.
    TripleRing,
    /// Ring of small rotated squares.
    SquareDots,
    /// Short radial rays.
    SunRays,
    /// Radial bars of random length.
    Barcode,
    /// Thin outline with eight node dots.
    Circuit,
    /// Dots offset along a sine helix.
    Dna,
    /// Two offset wavy rings.
    WaveDouble,
    /// Outline drawn three times with random jitter.
    Glitch,
    /// Ring of axis-aligned square pixels.
    Pixel,
    /// Outward-pointing triangles.
    Shards,
    /// Soft radial-gradient inner shadow.
    Vignette,
    /// Petal-modulated ring.
    Flower,
    /// Ring of stroked hexagons.
    HexGrid,
}

impl PatternKind {
    /// All patterns, in catalog order.
    pub const ALL: [PatternKind; 25] = [
        Self::Minimal,
        Self::RingGlow,
        Self::NeonPulse,
        Self::Progress,
        Self::Zigzag,
        Self::Tech,
        Self::Dots,
        Self::Double,
        Self::FancyStars,
        Self::Ornate,
        Self::GradientRing,
        Self::DashedRing,
        Self::TripleRing,
        Self::SquareDots,
        Self::SunRays,
        Self::Barcode,
        Self::Circuit,
        Self::Dna,
        Self::WaveDouble,
        Self::Glitch,
        Self::Pixel,
        Self::Shards,
        Self::Vignette,
        Self::Flower,
        Self::HexGrid,
    ];

    /// Stable kebab-case tag.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::RingGlow => "ring-glow",
            Self::NeonPulse => "neon-pulse",
            Self::Progress => "progress",
            Self::Zigzag => "zigzag",
            Self::Tech => "tech",
            Self::Dots => "dots",
            Self::Double => "double",
            Self::FancyStars => "fancy-stars",
            Self::Ornate => "ornate",
            Self::GradientRing => "gradient-ring",
            Self::DashedRing => "dashed-ring",
            Self::TripleRing => "triple-ring",
            Self::SquareDots => "square-dots",
            Self::SunRays => "sun-rays",
            Self::Barcode => "barcode",
            Self::Circuit => "circuit",
            Self::Dna => "dna",
            Self::WaveDouble => "wave-double",
            Self::Glitch => "glitch",
            Self::Pixel => "pixel",
            Self::Shards => "shards",
            Self::Vignette => "vignette",
            Self::Flower => "flower",
            Self::HexGrid => "hex-grid",
        }
    }

    /// Resolve a tag; `None` for tags this renderer does not implement.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL.into_iter().find(|k| k.as_tag() == tag)
    }

    /// `true` when the output depends on the entropy source.
    pub fn is_stochastic(self) -> bool {
        matches!(self, Self::Barcode | Self::Glitch)
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pattern.rs"]
mod tests;
