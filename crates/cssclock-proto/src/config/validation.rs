use masterror::Error;

use super::{
    ClockConfig, Config, default_background_image, default_hours_image, default_minutes_image,
    default_seconds_image, default_size,
};

/// Errors returned when validating a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    /// The clock face would have no area.
    #[error("clock size must be a positive number of pixels")]
    ZeroSize,

    /// An image file name is blank, so the layer would point at the directory.
    #[error("image name for `{field}` must not be empty")]
    EmptyImageName { field: &'static str },
}

impl ClockConfig {
    /// Checks that the clock can be laid out with the configured values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError::ZeroSize`] for a zero `size` and
    /// [`ConfigValidationError::EmptyImageName`] for a blank file name.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.size == 0 {
            return Err(ConfigValidationError::ZeroSize);
        }

        let names = [
            ("background_image", &self.background_image),
            ("hours_image", &self.hours_image),
            ("minutes_image", &self.minutes_image),
            ("seconds_image", &self.seconds_image),
        ];

        for (field, name) in names {
            if name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyImageName { field });
            }
        }

        Ok(())
    }

    /// Reset every invalid field to its default, keeping the valid ones.
    ///
    /// Returns one error per field that was replaced.
    pub fn sanitize(&mut self) -> Vec<ConfigValidationError> {
        let mut replaced = Vec::new();

        if self.size == 0 {
            self.size = default_size();
            replaced.push(ConfigValidationError::ZeroSize);
        }

        let names: [(&'static str, &mut String, fn() -> String); 4] = [
            (
                "background_image",
                &mut self.background_image,
                default_background_image,
            ),
            ("hours_image", &mut self.hours_image, default_hours_image),
            ("minutes_image", &mut self.minutes_image, default_minutes_image),
            ("seconds_image", &mut self.seconds_image, default_seconds_image),
        ];

        for (field, name, default) in names {
            if name.trim().is_empty() {
                *name = default();
                replaced.push(ConfigValidationError::EmptyImageName { field });
            }
        }

        replaced
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use cssclock_proto::config::Config;
    ///
    /// let config = Config::default();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.clock.validate()
    }

    /// Replace invalid values with their defaults. See [`ClockConfig::sanitize`].
    pub fn sanitize(&mut self) -> Vec<ConfigValidationError> {
        self.clock.sanitize()
    }
}
