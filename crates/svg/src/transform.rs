use crate::error::SvgError;
use crate::number::rounded;
use cbg_types::Point;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

fn one() -> f64 {
    1.0
}

/// An SVG transform list item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    Matrix {
        #[serde(default = "one")]
        a: f64,
        #[serde(default)]
        b: f64,
        #[serde(default)]
        c: f64,
        #[serde(default = "one")]
        d: f64,
        #[serde(default)]
        e: f64,
        #[serde(default)]
        f: f64,
    },
    Translate {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    Scale {
        x: f64,
        #[serde(default)]
        y: Option<f64>,
    },
    /// Rotation in degrees. With `local`, the rotation centre is taken from
    /// the position of whatever element the transform is applied to.
    Rotate {
        angle: f64,
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
        #[serde(default)]
        local: bool,
    },
    SkewX(f64),
    SkewY(f64),
}

impl Transform {
    pub fn identity() -> Self {
        Transform::Matrix {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn translate(x: f64, y: f64) -> Self {
        Transform::Translate { x, y }
    }

    pub fn scale(x: f64, y: Option<f64>) -> Self {
        Transform::Scale { x, y }
    }

    pub fn rotate(angle: f64, x: Option<f64>, y: Option<f64>) -> Result<Self, SvgError> {
        let t = Transform::Rotate {
            angle,
            x,
            y,
            local: false,
        };
        t.validate()?;
        Ok(t)
    }

    pub fn rotate_about(angle: f64, center: Point) -> Self {
        Transform::Rotate {
            angle,
            x: Some(center.x),
            y: Some(center.y),
            local: false,
        }
    }

    pub fn rotate_locally(angle: f64) -> Self {
        Transform::Rotate {
            angle,
            x: None,
            y: None,
            local: true,
        }
    }

    pub fn validate(&self) -> Result<(), SvgError> {
        if let Transform::Rotate { x, y, .. } = self {
            if x.is_some() != y.is_some() {
                return Err(SvgError::Transform(
                    "Rotation needs both or neither of x and y.".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        match self {
            Transform::Matrix { .. } => "matrix",
            Transform::Translate { .. } => "translate",
            Transform::Scale { .. } => "scale",
            Transform::Rotate { .. } => "rotate",
            Transform::SkewX(_) => "skewX",
            Transform::SkewY(_) => "skewY",
        }
    }

    fn values(&self, position: Option<Point>) -> Vec<f64> {
        match *self {
            Transform::Matrix { a, b, c, d, e, f } => vec![a, b, c, d, e, f],
            Transform::Translate { x, y } => vec![x, y],
            Transform::Scale { x, y } => vec![x, y.unwrap_or(x)],
            Transform::Rotate { angle, x, y, local } => match (x, y, local, position) {
                (Some(x), Some(y), _, _) => vec![angle, x, y],
                (_, _, true, Some(p)) => vec![angle, p.x, p.y],
                _ => vec![angle],
            },
            Transform::SkewX(a) | Transform::SkewY(a) => vec![a],
        }
    }

    /// Render, resolving a local rotation centre against `position`.
    pub fn to_svg(&self, position: Option<Point>) -> String {
        format!(
            "{}({})",
            self.name(),
            self.values(position).into_iter().map(rounded).join(",")
        )
    }

    /// Render a whole transform list.
    pub fn join(transforms: &[Transform], position: Option<Point>) -> String {
        transforms.iter().map(|t| t.to_svg(position)).join(" ")
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_svg(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Transform::identity().to_string(), "matrix(1,0,0,1,0,0)");
        assert_eq!(Transform::scale(2.0, None).to_string(), "scale(2,2)");
        assert_eq!(Transform::translate(0.0, 3.5).to_string(), "translate(0,3.5)");
    }

    #[test]
    fn test_rotation_variants() {
        assert_eq!(Transform::rotate(90.0, None, None).unwrap().to_string(), "rotate(90)");
        assert_eq!(
            Transform::rotate_about(-12.5, Point::new(10.0, 20.0)).to_string(),
            "rotate(-12.5,10,20)"
        );
        assert!(Transform::rotate(90.0, Some(1.0), None).is_err());
    }

    #[test]
    fn test_local_rotation_uses_position() {
        let t = Transform::rotate_locally(180.0);
        assert_eq!(t.to_svg(Some(Point::new(3.0, 4.0))), "rotate(180,3,4)");
        assert_eq!(t.to_svg(None), "rotate(180)");
    }

    #[test]
    fn test_deserialize_and_join() {
        let list: Vec<Transform> = serde_json::from_str(
            r#"[{"translate": {"x": 1}}, {"skew_x": 30}, {"rotate": {"angle": 180, "local": true}}]"#,
        )
        .unwrap();
        assert_eq!(
            Transform::join(&list, Some(Point::new(5.0, 6.0))),
            "translate(1,0) skewX(30) rotate(180,5,6)"
        );
    }
}
