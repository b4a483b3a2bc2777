#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct DisplayFormat {
    /// Hanja glyphs instead of doubled notation letters.
    pub hanja: bool,
    /// ANSI colors and highlighting.
    pub effects: bool,
    pub concise: bool,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            hanja: true,
            effects: true,
            concise: false,
        }
    }
}

impl DisplayFormat {
    pub fn pretty() -> Self {
        Self::default()
    }

    /// Plain letters on one line, suitable for logs and comparisons.
    pub fn string() -> Self {
        Self {
            hanja: false,
            effects: false,
            concise: true,
        }
    }

    pub fn with_concise(&self, concise: bool) -> Self {
        Self { concise, ..*self }
    }

    pub fn with_hanja(&self, hanja: bool) -> Self {
        Self { hanja, ..*self }
    }

    pub fn with_effects(&self, effects: bool) -> Self {
        Self { effects, ..*self }
    }
}
