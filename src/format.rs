/// Renders a result so that it can be typed back in: no exponent, no
/// trailing `.0` on whole values, and `-0` shown as `0`.
pub fn format_result(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    format!("{}", x)
}

/// Rounded rendering for history views. Very large or very small values
/// switch to exponent form, which is display-only.
pub fn format_for_display(x: f64, precision: usize) -> String {
    if x.abs() > 1e10 || (x.abs() < 1e-5 && x != 0.0) {
        format!("{:.*e}", precision, x)
    } else {
        let s = format!("{:.*}", precision, x);
        let s = if s.contains('.') {
            s.trim_end_matches('0').trim_end_matches('.')
        } else {
            s.as_str()
        };
        if s == "-0" {
            "0".to_string()
        } else {
            s.to_string()
        }
    }
}
