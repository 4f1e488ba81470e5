//! Transform parameters and the command-line style argument surface.
//!
//! Arguments use single-dash flags:
//!
//! ```text
//! -a | -angle ANGLE_DEGREES
//! -s | -scale SCALE
//! -p | -pivot PIVOT_X PIVOT_Y     (normalized, 0.0 to 1.0)
//! ```
//!
//! Any flag may be given more than once; the last occurrence wins.

use serde::{Deserialize, Serialize};

use crate::error::{ArgsError, WarpError};

/// Usage line printed when the argument list cannot be parsed.
pub const USAGE: &str = "Usage: pivotwarp IMAGE [-a|-angle ANGLE_DEGREES] [-s|-scale SCALE] [-p|-pivot PIVOT_X PIVOT_Y]";

/// A pair of coordinates, used for pivots and per-axis scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub u: f32,
    pub v: f32,
}

impl Vec2 {
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    /// Both components set to `value`.
    pub const fn splat(value: f32) -> Self {
        Self { u: value, v: value }
    }

    /// Image center as a normalized pivot.
    pub const CENTER: Vec2 = Vec2::splat(0.5);
}

/// Rotation, scale and pivot for one transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    /// Rotation in degrees. Any finite value; reduced by periodicity.
    pub angle: f32,
    /// Uniform scale factor, applied to both axes. Must be > 0.
    pub scale: f32,
    /// Pivot as a fraction of the image extent. (0.5, 0.5) is the center.
    pub pivot: Vec2,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            angle: 0.0,
            scale: 1.0,
            pivot: Vec2::CENTER,
        }
    }
}

impl TransformParams {
    /// Create parameters with the default values (no rotation, unit scale,
    /// centered pivot).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_pivot(mut self, u: f32, v: f32) -> Self {
        self.pivot = Vec2::new(u, v);
        self
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Parse an argument list, starting from the defaults.
    ///
    /// The list holds only the transform flags; the program name and the
    /// image path are stripped by the caller.
    pub fn from_args<I, S>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let flag = arg.as_ref();
            match flag {
                "-a" | "-angle" => params.angle = next_number(flag, &mut args)?,
                "-s" | "-scale" => params.scale = next_number(flag, &mut args)?,
                "-p" | "-pivot" => {
                    let u = next_number(flag, &mut args)?;
                    let v = next_number(flag, &mut args)?;
                    params.pivot = Vec2::new(u, v);
                }
                other => return Err(ArgsError::UnknownFlag(other.to_string())),
            }
        }

        Ok(params)
    }

    /// Reject values that would make the inverse matrix undefined.
    ///
    /// A scale of zero divides by zero when the matrix is built, and a
    /// negative scale is outside the parameter domain.
    pub fn validate(&self) -> Result<(), WarpError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(WarpError::InvalidScale(self.scale));
        }
        if !self.angle.is_finite() {
            return Err(WarpError::InvalidParams(format!(
                "angle must be finite, got {}",
                self.angle
            )));
        }
        if !self.pivot.u.is_finite() || !self.pivot.v.is_finite() {
            return Err(WarpError::InvalidParams(format!(
                "pivot must be finite, got ({}, {})",
                self.pivot.u, self.pivot.v
            )));
        }
        Ok(())
    }
}

/// Pull the next argument and parse it as a number for `flag`.
fn next_number<I, S>(flag: &str, args: &mut I) -> Result<f32, ArgsError>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let value = args.next().ok_or_else(|| ArgsError::MissingValue {
        flag: flag.to_string(),
    })?;
    let value = value.as_ref();
    value
        .trim()
        .parse::<f32>()
        .map_err(|_| ArgsError::InvalidNumber {
            flag: flag.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_ARGS: [&str; 0] = [];

    #[test]
    fn test_defaults() {
        let params = TransformParams::new();
        assert_eq!(params.angle, 0.0);
        assert_eq!(params.scale, 1.0);
        assert_eq!(params.pivot, Vec2::new(0.5, 0.5));
        assert!(params.is_default());
    }

    #[test]
    fn test_empty_args_give_defaults() {
        let params = TransformParams::from_args(NO_ARGS).unwrap();
        assert!(params.is_default());
    }

    #[test]
    fn test_short_flags() {
        let params = TransformParams::from_args(["-a", "30", "-s", "2", "-p", "0.25", "0.75"]).unwrap();
        assert_eq!(params.angle, 30.0);
        assert_eq!(params.scale, 2.0);
        assert_eq!(params.pivot, Vec2::new(0.25, 0.75));
    }

    #[test]
    fn test_long_flags() {
        let params =
            TransformParams::from_args(["-angle", "-45.5", "-scale", "0.5", "-pivot", "0", "1"])
                .unwrap();
        assert_eq!(params.angle, -45.5);
        assert_eq!(params.scale, 0.5);
        assert_eq!(params.pivot, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_last_flag_wins() {
        let params = TransformParams::from_args(["-a", "10", "-angle", "20"]).unwrap();
        assert_eq!(params.angle, 20.0);
    }

    #[test]
    fn test_missing_value() {
        let err = TransformParams::from_args(["-angle"]).unwrap_err();
        assert_eq!(
            err,
            ArgsError::MissingValue {
                flag: "-angle".to_string()
            }
        );
    }

    #[test]
    fn test_pivot_missing_second_value() {
        let err = TransformParams::from_args(["-p", "0.5"]).unwrap_err();
        assert!(matches!(err, ArgsError::MissingValue { .. }));
    }

    #[test]
    fn test_non_numeric_value() {
        let err = TransformParams::from_args(["-s", "big"]).unwrap_err();
        assert_eq!(
            err,
            ArgsError::InvalidNumber {
                flag: "-s".to_string(),
                value: "big".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_flag() {
        let err = TransformParams::from_args(["--angle", "10"]).unwrap_err();
        assert_eq!(err, ArgsError::UnknownFlag("--angle".to_string()));
    }

    #[test]
    fn test_owned_strings() {
        let args = vec!["-a".to_string(), "90".to_string()];
        let params = TransformParams::from_args(&args).unwrap();
        assert_eq!(params.angle, 90.0);
    }

    #[test]
    fn test_validate_scale() {
        assert!(TransformParams::new().validate().is_ok());
        assert_eq!(
            TransformParams::new().with_scale(0.0).validate(),
            Err(WarpError::InvalidScale(0.0))
        );
        assert_eq!(
            TransformParams::new().with_scale(-2.0).validate(),
            Err(WarpError::InvalidScale(-2.0))
        );
        assert!(TransformParams::new()
            .with_scale(f32::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_angle_and_pivot() {
        assert!(TransformParams::new().with_angle(720.0).validate().is_ok());
        assert!(TransformParams::new()
            .with_angle(f32::NAN)
            .validate()
            .is_err());
        assert!(TransformParams::new()
            .with_pivot(0.5, f32::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        // serde(default) fills anything the caller leaves out
        let params: TransformParams =
            serde::Deserialize::deserialize(serde::de::value::MapDeserializer::<
                _,
                serde::de::value::Error,
            >::new(
                [("angle", 15.0f32)].into_iter()
            ))
            .unwrap();
        assert_eq!(params.angle, 15.0);
        assert_eq!(params.scale, 1.0);
        assert_eq!(params.pivot, Vec2::CENTER);
    }
}
