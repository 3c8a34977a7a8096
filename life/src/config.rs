use thiserror::Error;

/// One display texel, `[r, g, b, a]`.
pub type Rgba = [u8; 4];

pub const ACCENT: Rgba = [0, 255, 200, 255];
pub const BLACK: Rgba = [0, 0, 0, 255];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid width must be at least 1")]
    ZeroWidth,

    #[error("grid height must be at least 1")]
    ZeroHeight,

    #[error("alive threshold {0} is outside 0..=100")]
    ThresholdOutOfRange(u8),

    #[error("grid is {got:?} but the configuration expects {expected:?}")]
    GridMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
}

/// Parameters of a [`crate::Simulation`].
///
/// A cell is seeded alive when a uniform roll in `0..=100` is strictly greater
/// than `alive_threshold`, so the default of 85 seeds roughly 15% of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeConfig {
    pub width: usize,
    pub height: usize,
    pub alive_threshold: u8,
    pub alive_color: Rgba,
    pub dead_color: Rgba,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            alive_threshold: 85,
            alive_color: ACCENT,
            dead_color: BLACK,
        }
    }
}

impl LifeConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_alive_threshold(mut self, alive_threshold: u8) -> Self {
        self.alive_threshold = alive_threshold;
        self
    }

    pub fn with_colors(mut self, alive_color: Rgba, dead_color: Rgba) -> Self {
        self.alive_color = alive_color;
        self.dead_color = dead_color;
        self
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.alive_threshold > 100 {
            return Err(ConfigError::ThresholdOutOfRange(self.alive_threshold));
        }
        Ok(())
    }

    /// Texel for a cell in the given state.
    #[inline]
    pub fn color_of(&self, alive: bool) -> Rgba {
        if alive {
            self.alive_color
        } else {
            self.dead_color
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_window() {
        let config = LifeConfig::default();
        assert_eq!((config.width, config.height), (100, 100));
        assert_eq!(config.cell_count(), 10_000);
        assert_eq!(config.alive_color, [0, 255, 200, 255]);
        assert_eq!(config.dead_color, [0, 0, 0, 255]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert_eq!(LifeConfig::new(0, 10).validate(), Err(ConfigError::ZeroWidth));
        assert_eq!(LifeConfig::new(10, 0).validate(), Err(ConfigError::ZeroHeight));
        assert_eq!(LifeConfig::new(0, 0).validate(), Err(ConfigError::ZeroWidth));
    }

    #[test]
    fn one_by_one_is_valid() {
        assert!(LifeConfig::new(1, 1).validate().is_ok());
    }

    #[test]
    fn rejects_unreachable_threshold() {
        let config = LifeConfig::new(4, 4).with_alive_threshold(101);
        assert_eq!(config.validate(), Err(ConfigError::ThresholdOutOfRange(101)));
        assert!(LifeConfig::new(4, 4).with_alive_threshold(100).validate().is_ok());
    }

    #[test]
    fn color_of_picks_configured_colors() {
        let config = LifeConfig::new(2, 2).with_colors([1, 2, 3, 4], [5, 6, 7, 8]);
        assert_eq!(config.color_of(true), [1, 2, 3, 4]);
        assert_eq!(config.color_of(false), [5, 6, 7, 8]);
    }
}
