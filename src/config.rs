use std::time::Duration;

/// Settings of the randomly filled maze.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeConfig {
    pub grid_width: u8,
    pub grid_height: u8,
    /// Probability that a cell is a floor rather than a wall
    pub floor_likelihood: f64,
    /// Seed for maze generation, random when `None`
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 20,
            floor_likelihood: 0.6,
            seed: None,
        }
    }
}

impl MazeConfig {
    /// Smallest allowed grid dimension
    pub const MIN_DIMENSION: u8 = 4;
    /// Largest allowed grid dimension
    pub const MAX_DIMENSION: u8 = 100;

    pub fn clamp_dimension(n: u8) -> u8 {
        n.clamp(Self::MIN_DIMENSION, Self::MAX_DIMENSION)
    }
}

/// Maps cells to tone pitches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneConfig {
    /// Pitch of the cell at the far grid corner, in Hz
    pub min_frequency: f64,
    /// Pitch span across the grid, in Hz
    pub frequency_range: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            min_frequency: 200.0,
            frequency_range: 100.0,
        }
    }
}

/// Timing of the visualization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualizationConfig {
    /// Delay between search steps at full speed
    pub max_delay: Duration,
    /// Fraction of full speed, within [`VisualizationConfig::SPEED_RANGE`]
    pub solve_step_speed: f64,
    /// Delay between drawing two cells of the found path
    pub draw_delay: Duration,
    pub tone: ToneConfig,
    pub maze: MazeConfig,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            max_delay: Duration::from_millis(50),
            solve_step_speed: 0.5,
            draw_delay: Duration::from_millis(50),
            tone: ToneConfig::default(),
            maze: MazeConfig::default(),
        }
    }
}

impl VisualizationConfig {
    pub const SPEED_RANGE: std::ops::RangeInclusive<f64> = 0.05..=1.0;
    pub const SPEED_INCREMENT: f64 = 0.05;

    /// Delay between two search steps at the current speed.
    pub fn step_delay(&self) -> Duration {
        self.max_delay.div_f64(self.solve_step_speed)
    }

    /// Sets the speed, clamped to [`VisualizationConfig::SPEED_RANGE`].
    pub fn set_speed(&mut self, speed: f64) {
        let speed = if speed.is_nan() {
            *Self::SPEED_RANGE.start()
        } else {
            speed
        };
        // Round to the increment grid so repeated nudges never drift
        let steps = (speed / Self::SPEED_INCREMENT).round();
        self.solve_step_speed =
            (steps * Self::SPEED_INCREMENT).clamp(*Self::SPEED_RANGE.start(), *Self::SPEED_RANGE.end());
    }

    pub fn speed_up(&mut self) {
        self.set_speed(self.solve_step_speed + Self::SPEED_INCREMENT);
    }

    pub fn slow_down(&mut self) {
        self.set_speed(self.solve_step_speed - Self::SPEED_INCREMENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_step_delay() {
        let config = VisualizationConfig::default();
        assert_eq!(config.step_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut config = VisualizationConfig::default();
        config.set_speed(3.0);
        assert_eq!(config.solve_step_speed, 1.0);
        assert_eq!(config.step_delay(), config.max_delay);
        config.set_speed(0.0);
        assert_eq!(config.solve_step_speed, 0.05);
        config.set_speed(f64::NAN);
        assert_eq!(config.solve_step_speed, 0.05);
    }

    #[test]
    fn test_speed_nudges() {
        let mut config = VisualizationConfig::default();
        config.speed_up();
        assert!((config.solve_step_speed - 0.55).abs() < 1e-9);
        config.slow_down();
        config.slow_down();
        assert!((config.solve_step_speed - 0.45).abs() < 1e-9);
        for _ in 0..100 {
            config.speed_up();
        }
        assert_eq!(config.solve_step_speed, 1.0);
    }

    #[test]
    fn test_clamp_dimension() {
        assert_eq!(MazeConfig::clamp_dimension(1), 4);
        assert_eq!(MazeConfig::clamp_dimension(40), 40);
        assert_eq!(MazeConfig::clamp_dimension(255), 100);
    }
}
