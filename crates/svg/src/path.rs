//! SVG path data, built one command at a time.

use crate::element::Element;
use crate::error::SvgError;
use crate::number::rounded;
use cbg_types::Point;
use itertools::Itertools;

#[derive(Debug, Clone, PartialEq)]
enum Arg {
    Point(Point),
    Scalar(f64),
    Flag(bool),
}

impl Arg {
    fn render(&self) -> String {
        match self {
            Arg::Point(p) => format!("{} {}", rounded(p.x), rounded(p.y)),
            Arg::Scalar(v) => rounded(*v),
            Arg::Flag(f) => if *f { "1" } else { "0" }.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Command {
    letter: char,
    absolute: bool,
    args: Vec<Arg>,
}

impl Command {
    fn render(&self) -> String {
        let letter = if self.absolute {
            self.letter.to_ascii_uppercase()
        } else {
            self.letter
        };
        std::iter::once(letter.to_string())
            .chain(self.args.iter().map(Arg::render))
            .join(" ")
    }
}

/// Accumulates path commands into a `d` attribute.
///
/// Absolute coordinates are the default. Set `relative` to emit the
/// lowercase forms instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pathfinder {
    commands: Vec<Command>,
    pub relative: bool,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relative() -> Self {
        Self {
            commands: Vec::new(),
            relative: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn add(&mut self, letter: char, args: Vec<Arg>) -> &mut Self {
        self.commands.push(Command {
            letter,
            absolute: !self.relative,
            args,
        });
        self
    }

    fn points(points: &[Point]) -> Vec<Arg> {
        points.iter().copied().map(Arg::Point).collect()
    }

    pub fn moveto(&mut self, point: Point) -> &mut Self {
        self.add('m', vec![Arg::Point(point)])
    }

    pub fn lineto(&mut self, point: Point) -> &mut Self {
        self.add('l', vec![Arg::Point(point)])
    }

    pub fn horizontal_lineto(&mut self, x: f64) -> &mut Self {
        self.add('h', vec![Arg::Scalar(x)])
    }

    pub fn vertical_lineto(&mut self, y: f64) -> &mut Self {
        self.add('v', vec![Arg::Scalar(y)])
    }

    /// Cubic Bézier curves: control, control, end; repeated.
    pub fn curveto(&mut self, points: &[Point]) -> Result<&mut Self, SvgError> {
        Self::check_multiple(points, 3, "curveto")?;
        Ok(self.add('c', Self::points(points)))
    }

    pub fn smooth_curveto(&mut self, points: &[Point]) -> Result<&mut Self, SvgError> {
        Self::check_multiple(points, 2, "smooth curveto")?;
        Ok(self.add('s', Self::points(points)))
    }

    pub fn quadratic_bezier_curveto(&mut self, points: &[Point]) -> Result<&mut Self, SvgError> {
        Self::check_multiple(points, 2, "quadratic Bézier curveto")?;
        Ok(self.add('q', Self::points(points)))
    }

    pub fn smooth_quadratic_bezier_curveto(&mut self, point: Point) -> &mut Self {
        self.add('t', vec![Arg::Point(point)])
    }

    pub fn elliptical_arc(
        &mut self,
        radii: Point,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        end: Point,
    ) -> &mut Self {
        self.add(
            'a',
            vec![
                Arg::Point(radii),
                Arg::Scalar(x_axis_rotation),
                Arg::Flag(large_arc),
                Arg::Flag(sweep),
                Arg::Point(end),
            ],
        )
    }

    pub fn closepath(&mut self) -> &mut Self {
        self.add('z', Vec::new())
    }

    fn check_multiple(points: &[Point], n: usize, name: &str) -> Result<(), SvgError> {
        if points.is_empty() || points.len() % n != 0 {
            return Err(SvgError::Path(format!(
                "{} takes a multiple of {} points, got {}.",
                name,
                n,
                points.len()
            )));
        }
        Ok(())
    }

    pub fn data(&self) -> String {
        self.commands.iter().map(Command::render).join(" ")
    }

    pub fn to_element(&self) -> Element {
        Element::new("path").with_attr("d", self.data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_by_default() {
        let mut p = Pathfinder::new();
        p.moveto(Point::new(0.0, 1.0)).lineto(Point::new(2.5, 3.0)).closepath();
        assert_eq!(p.data(), "M 0 1 L 2.5 3 Z");
    }

    #[test]
    fn test_relative_commands_stay_lowercase() {
        let mut p = Pathfinder::relative();
        p.moveto(Point::new(1.0, 1.0)).horizontal_lineto(4.0).vertical_lineto(-2.0);
        assert_eq!(p.data(), "m 1 1 h 4 v -2");
    }

    #[test]
    fn test_curve_point_counts() {
        let mut p = Pathfinder::new();
        let pts = [Point::zero(), Point::new(1.0, 1.0)];
        assert!(p.curveto(&pts).is_err());
        assert!(p.quadratic_bezier_curveto(&pts).is_ok());
        assert!(p.smooth_curveto(&pts[..1]).is_err());
        assert_eq!(p.data(), "Q 0 0 1 1");
    }

    #[test]
    fn test_arc_flags() {
        let mut p = Pathfinder::new();
        p.elliptical_arc(Point::new(2.0, 2.0), 0.0, false, true, Point::new(4.0, 0.0));
        assert_eq!(p.to_element().attr("d"), Some("A 2 2 0 0 1 4 0"));
    }
}
