//! Dimension calculators.
//!
//! A [`DimensionCalculator`] is built from a strategy and the accumulated
//! transformations, then maps original dimensions to resolved dimensions.
//! Building can fail (missing or mistyped parameter); calculating cannot.
//!
//! | Strategy | Reads | Result (height, width) |
//! |---|---|---|
//! | Proportional | `setRatio` | `(round(r·H), round(r·W))` |
//! | FixedBox | `setHeight`, `setWidth` | `(h, w)` |
//! | FixedWidth | `setWidth` | `(round(w·H/W), w)` |
//! | FixedHeight | `setHeight` | `(h, round(h·W/H))` |
//!
//! Rounding is half away from zero. Every result is at least 1×1.

use super::backend::Dimensions;
use crate::error::{ResizeError, Result};
use crate::types::{ResizeStrategy, Transformation, Transformations};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionCalculator {
    Proportional { ratio: f64 },
    FixedBox { height: u32, width: u32 },
    FixedWidth { width: u32 },
    FixedHeight { height: u32 },
}

impl DimensionCalculator {
    pub fn new(strategy: ResizeStrategy, transformations: &Transformations) -> Result<Self> {
        Ok(match strategy {
            ResizeStrategy::Proportional => DimensionCalculator::Proportional {
                ratio: ratio_param(transformations)?,
            },
            ResizeStrategy::FixedBox => {
                let height = pixel_param(transformations, Transformation::SetHeight)?;
                let width = pixel_param(transformations, Transformation::SetWidth)?;
                DimensionCalculator::FixedBox { height, width }
            }
            ResizeStrategy::FixedWidth => DimensionCalculator::FixedWidth {
                width: pixel_param(transformations, Transformation::SetWidth)?,
            },
            ResizeStrategy::FixedHeight => DimensionCalculator::FixedHeight {
                height: pixel_param(transformations, Transformation::SetHeight)?,
            },
        })
    }

    pub fn calculate(&self, original: Dimensions) -> Dimensions {
        let (h, w) = (original.height as f64, original.width as f64);
        match *self {
            DimensionCalculator::Proportional { ratio } => {
                Dimensions::new(round_dimension(ratio * h), round_dimension(ratio * w))
            }
            DimensionCalculator::FixedBox { height, width } => {
                Dimensions::new(height.max(1), width.max(1))
            }
            DimensionCalculator::FixedWidth { width } => {
                // Zero-width originals keep the target as a square
                let height = if original.width == 0 {
                    width as f64
                } else {
                    width as f64 * h / w
                };
                Dimensions::new(round_dimension(height), width.max(1))
            }
            DimensionCalculator::FixedHeight { height } => {
                let width = if original.height == 0 {
                    height as f64
                } else {
                    height as f64 * w / h
                };
                Dimensions::new(height.max(1), round_dimension(width))
            }
        }
    }
}

/// Round half away from zero and floor at one pixel.
fn round_dimension(value: f64) -> u32 {
    // `as` saturates, and NaN becomes 0 before the floor
    (value.round() as u32).max(1)
}

fn ratio_param(transformations: &Transformations) -> Result<f64> {
    let key = Transformation::SetRatio;
    let value = transformations
        .get(&key)
        .ok_or(ResizeError::MissingParameter(key))?;
    value
        .as_number()
        .ok_or_else(|| ResizeError::wrong_type(key.as_str(), "float", value))
}

fn pixel_param(transformations: &Transformations, key: Transformation) -> Result<u32> {
    let value = transformations
        .get(&key)
        .ok_or(ResizeError::MissingParameter(key))?;
    value
        .as_int()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| ResizeError::wrong_type(key.as_str(), "positive integer", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::value::Value;

    fn params(entries: &[(Transformation, Value)]) -> Transformations {
        entries.iter().cloned().collect()
    }

    fn calc(strategy: ResizeStrategy, entries: &[(Transformation, Value)]) -> DimensionCalculator {
        DimensionCalculator::new(strategy, &params(entries)).unwrap()
    }

    #[test]
    fn proportional_identity_at_ratio_one() {
        let c = calc(
            ResizeStrategy::Proportional,
            &[(Transformation::SetRatio, Value::Float(1.0))],
        );
        for (h, w) in [(1, 1), (400, 800), (333, 777)] {
            assert_eq!(c.calculate(Dimensions::new(h, w)), Dimensions::new(h, w));
        }
    }

    #[test]
    fn proportional_halves() {
        let c = calc(
            ResizeStrategy::Proportional,
            &[(Transformation::SetRatio, Value::Float(0.5))],
        );
        assert_eq!(
            c.calculate(Dimensions::new(600, 800)),
            Dimensions::new(300, 400)
        );
    }

    #[test]
    fn proportional_rounds_half_away_from_zero() {
        let c = calc(
            ResizeStrategy::Proportional,
            &[(Transformation::SetRatio, Value::Float(0.5))],
        );
        assert_eq!(
            c.calculate(Dimensions::new(401, 3)),
            Dimensions::new(201, 2)
        );
    }

    #[test]
    fn proportional_accepts_integer_ratio() {
        let c = calc(
            ResizeStrategy::Proportional,
            &[(Transformation::SetRatio, Value::Int(2))],
        );
        assert_eq!(c.calculate(Dimensions::new(10, 20)), Dimensions::new(20, 40));
    }

    #[test]
    fn fixed_box_ignores_aspect() {
        let c = calc(
            ResizeStrategy::FixedBox,
            &[
                (Transformation::SetWidth, Value::Int(300)),
                (Transformation::SetHeight, Value::Int(100)),
            ],
        );
        assert_eq!(
            c.calculate(Dimensions::new(600, 800)),
            Dimensions::new(100, 300)
        );
    }

    #[test]
    fn fixed_width_preserves_aspect() {
        let c = calc(
            ResizeStrategy::FixedWidth,
            &[(Transformation::SetWidth, Value::Int(200))],
        );
        assert_eq!(
            c.calculate(Dimensions::new(400, 800)),
            Dimensions::new(100, 200)
        );
        assert_eq!(
            c.calculate(Dimensions::new(600, 800)),
            Dimensions::new(150, 200)
        );
    }

    #[test]
    fn fixed_height_preserves_aspect() {
        let c = calc(
            ResizeStrategy::FixedHeight,
            &[(Transformation::SetHeight, Value::Int(300))],
        );
        assert_eq!(
            c.calculate(Dimensions::new(600, 800)),
            Dimensions::new(300, 400)
        );
    }

    #[test]
    fn results_never_collapse_to_zero() {
        let c = calc(
            ResizeStrategy::FixedWidth,
            &[(Transformation::SetWidth, Value::Int(10))],
        );
        assert_eq!(
            c.calculate(Dimensions::new(1, 5000)),
            Dimensions::new(1, 10)
        );
        assert_eq!(c.calculate(Dimensions::new(5, 0)), Dimensions::new(10, 10));

        let tiny = calc(
            ResizeStrategy::Proportional,
            &[(Transformation::SetRatio, Value::Float(0.01))],
        );
        assert_eq!(tiny.calculate(Dimensions::new(3, 3)), Dimensions::new(1, 1));
    }

    #[test]
    fn missing_parameter_names_key() {
        let err = DimensionCalculator::new(ResizeStrategy::FixedWidth, &params(&[])).unwrap_err();
        assert!(matches!(
            err,
            ResizeError::MissingParameter(Transformation::SetWidth)
        ));

        let err = DimensionCalculator::new(ResizeStrategy::Proportional, &params(&[])).unwrap_err();
        assert!(matches!(
            err,
            ResizeError::MissingParameter(Transformation::SetRatio)
        ));
    }

    #[test]
    fn fixed_box_checks_height_first() {
        let err = DimensionCalculator::new(ResizeStrategy::FixedBox, &params(&[])).unwrap_err();
        assert!(matches!(
            err,
            ResizeError::MissingParameter(Transformation::SetHeight)
        ));

        let err = DimensionCalculator::new(
            ResizeStrategy::FixedBox,
            &params(&[(Transformation::SetHeight, Value::Int(100))]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ResizeError::MissingParameter(Transformation::SetWidth)
        ));
    }

    #[test]
    fn wrong_types_rejected() {
        let err = DimensionCalculator::new(
            ResizeStrategy::FixedHeight,
            &params(&[(Transformation::SetHeight, Value::from("300"))]),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongType);

        let err = DimensionCalculator::new(
            ResizeStrategy::Proportional,
            &params(&[(Transformation::SetRatio, Value::from("0.5"))]),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongType);

        let err = DimensionCalculator::new(
            ResizeStrategy::FixedWidth,
            &params(&[(Transformation::SetWidth, Value::Int(-5))]),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongType);
    }
}
