// File: crates/weightline-core/src/theme.rs
// Summary: Light/Dark color palettes for chart rendering.

use skia_safe::Color4f;

/// One fixed set of colors per theme, selected per draw from the host's
/// dark-mode flag. Tooltip background/border carry alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartColors {
    pub background: Color4f,
    pub grid: Color4f,
    pub axes: Color4f,
    pub text: Color4f,
    pub line: Color4f,
    pub tooltip_bg: Color4f,
    pub tooltip_border: Color4f,
    pub tooltip_text: Color4f,
}

impl ChartColors {
    pub fn light() -> Self {
        Self {
            background: Color4f::new(1.0, 1.0, 1.0, 1.0),
            grid: Color4f::new(0.9, 0.9, 0.9, 1.0),
            axes: Color4f::new(0.4, 0.4, 0.4, 1.0),
            text: Color4f::new(0.1, 0.1, 0.1, 1.0),
            line: Color4f::new(0.2, 0.5, 0.8, 1.0),
            tooltip_bg: Color4f::new(1.0, 1.0, 1.0, 0.95),
            tooltip_border: Color4f::new(0.8, 0.8, 0.8, 1.0),
            tooltip_text: Color4f::new(0.1, 0.1, 0.1, 1.0),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color4f::new(0.1, 0.1, 0.1, 1.0),
            grid: Color4f::new(0.3, 0.3, 0.3, 1.0),
            axes: Color4f::new(0.7, 0.7, 0.7, 1.0),
            text: Color4f::new(0.9, 0.9, 0.9, 1.0),
            line: Color4f::new(0.3, 0.6, 1.0, 1.0),
            tooltip_bg: Color4f::new(0.2, 0.2, 0.2, 0.95),
            tooltip_border: Color4f::new(0.6, 0.6, 0.6, 1.0),
            tooltip_text: Color4f::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    /// Select the palette for the current theme flag. Cheap enough to call on
    /// every draw; nothing is cached.
    pub fn resolve(is_dark: bool) -> Self {
        if is_dark { Self::dark() } else { Self::light() }
    }
}
