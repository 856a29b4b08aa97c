use cbg_types::Point;

/// Format a coordinate or length for SVG output.
///
/// At most four decimals are kept (0.1 µm at mm scale). Trailing zeros are
/// trimmed and negative zero is written as `0`.
pub fn rounded(value: f64) -> String {
    let mut s = format!("{:.4}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

pub fn rounded_pair(point: Point) -> (String, String) {
    (rounded(point.x), rounded(point.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded() {
        assert_eq!(rounded(2.0), "2");
        assert_eq!(rounded(0.06), "0.06");
        assert_eq!(rounded(1.0 / 3.0), "0.3333");
        assert_eq!(rounded(-0.00001), "0");
        assert_eq!(rounded(-12.5), "-12.5");
    }
}
