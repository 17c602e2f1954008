//! Crop stage options.
//!
//! The option surface keeps the integer encoding used by filter option
//! tables: `w`/`h` have a minimum of 0 (unset), `x`/`y` a minimum of -1
//! (unset). [`CropOptions::to_request`] validates the minimums and converts
//! to the optional-field [`CropRequest`] the resolver works with.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::CropRequest;

/// Error types for option validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An option is below its minimum.
    #[error("Option {option}={value} is out of range (minimum {min})")]
    OutOfRange {
        option: &'static str,
        value: i32,
        min: i32,
    },
}

/// User-facing crop options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropOptions {
    /// Crop width, 0 for the full frame width.
    pub w: i32,
    /// Crop height, 0 for the full frame height.
    pub h: i32,
    /// Left edge, -1 to center horizontally.
    pub x: i32,
    /// Top edge, -1 to center vertically.
    pub y: i32,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            w: 0,
            h: 0,
            x: -1,
            y: -1,
        }
    }
}

impl CropOptions {
    pub const MIN_SIZE: i32 = 0;
    pub const MIN_OFFSET: i32 = -1;

    /// Check every option against its minimum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("w", self.w, Self::MIN_SIZE)?;
        check("h", self.h, Self::MIN_SIZE)?;
        check("x", self.x, Self::MIN_OFFSET)?;
        check("y", self.y, Self::MIN_OFFSET)?;
        Ok(())
    }

    /// Validate and convert to a [`CropRequest`].
    pub fn to_request(&self) -> Result<CropRequest, ConfigError> {
        self.validate()?;
        Ok(CropRequest::from_sentinels(self.w, self.h, self.x, self.y))
    }
}

impl From<CropRequest> for CropOptions {
    fn from(request: CropRequest) -> Self {
        let encode = |v: Option<u32>, unset: i32| {
            v.and_then(|v| i32::try_from(v).ok()).unwrap_or(unset)
        };
        Self {
            w: encode(request.w, 0),
            h: encode(request.h, 0),
            x: encode(request.x, -1),
            y: encode(request.y, -1),
        }
    }
}

fn check(option: &'static str, value: i32, min: i32) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::OutOfRange { option, value, min });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unset() {
        let req = CropOptions::default().to_request().unwrap();
        assert!(req.is_unset());
    }

    #[test]
    fn test_explicit_values() {
        let opts = CropOptions {
            w: 640,
            h: 360,
            x: 0,
            y: 60,
        };
        let req = opts.to_request().unwrap();
        assert_eq!(req, CropRequest::new().with_size(640, 360).with_origin(0, 60));
    }

    #[test]
    fn test_minimums_enforced() {
        let opts = CropOptions {
            w: -1,
            ..CropOptions::default()
        };
        assert_eq!(
            opts.validate(),
            Err(ConfigError::OutOfRange {
                option: "w",
                value: -1,
                min: 0
            })
        );

        let opts = CropOptions {
            y: -2,
            ..CropOptions::default()
        };
        assert_eq!(
            opts.to_request(),
            Err(ConfigError::OutOfRange {
                option: "y",
                value: -2,
                min: -1
            })
        );
    }

    #[test]
    fn test_error_message() {
        let err = ConfigError::OutOfRange {
            option: "x",
            value: -5,
            min: -1,
        };
        assert_eq!(err.to_string(), "Option x=-5 is out of range (minimum -1)");
    }

    #[test]
    fn test_from_request() {
        let req = CropRequest::new().with_size(100, 0).with_origin(2, 4);
        let opts = CropOptions::from(req);
        assert_eq!(
            opts,
            CropOptions {
                w: 100,
                h: 0,
                x: 2,
                y: 4
            }
        );
        assert_eq!(opts.to_request().unwrap(), req);
    }
}
