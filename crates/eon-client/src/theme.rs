//! Page theme changes unlocked by growth milestones.

use eon_core::ThemeEffect;

/// Body background once adaptive colours are active.
pub const ADAPTIVE_BACKGROUND: &str =
    "linear-gradient(135deg, #0c1222 0%, #1e1835 50%, #0c1222 100%)";

/// Logo gradient once adaptive colours are active.
pub const ADAPTIVE_LOGO: &str = "linear-gradient(90deg, #60a5fa, #d8b4fe)";

/// Theme overrides the host applies on top of its stylesheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Theme {
    adaptive_colors: bool,
    celebrated: bool,
}

impl Theme {
    /// Apply a milestone effect. Returns `false` if it had already fired.
    pub const fn apply(&mut self, effect: ThemeEffect) -> bool {
        let flag = match effect {
            ThemeEffect::AdaptiveColors => &mut self.adaptive_colors,
            ThemeEffect::Celebration => &mut self.celebrated,
        };
        let fresh = !*flag;
        *flag = true;
        fresh
    }

    /// Background override, if any.
    pub const fn background(&self) -> Option<&'static str> {
        if self.adaptive_colors {
            Some(ADAPTIVE_BACKGROUND)
        } else {
            None
        }
    }

    /// Logo gradient override, if any.
    pub const fn logo(&self) -> Option<&'static str> {
        if self.adaptive_colors {
            Some(ADAPTIVE_LOGO)
        } else {
            None
        }
    }

    /// Whether the celebration burst has fired.
    pub const fn has_celebrated(&self) -> bool {
        self.celebrated
    }
}
