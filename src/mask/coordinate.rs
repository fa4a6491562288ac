//! Decimal-degree masks for latitude and longitude.

/// Allowed magnitude of a coordinate.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CoordinateBound {
    limit: u32,
    integer_digits: usize,
}

pub(crate) const LATITUDE: CoordinateBound = CoordinateBound {
    limit: 90,
    integer_digits: 2,
};

pub(crate) const LONGITUDE: CoordinateBound = CoordinateBound {
    limit: 180,
    integer_digits: 3,
};

impl CoordinateBound {
    /// Sign, integer part, decimal point and `precision` decimals.
    pub(crate) fn max_length(&self, precision: usize) -> usize {
        let fraction = if precision == 0 { 0 } else { precision + 1 };
        1 + self.integer_digits + fraction
    }

    /// Keeps an optional leading `-`, the integer digits, one decimal point
    /// (`,` is read as `.`) and at most `precision` decimals, then clamps
    /// the magnitude to the bound.
    ///
    /// A clamped value keeps the decimals typed so far, zeroed, so that the
    /// length never shrinks while typing.
    pub(crate) fn format(&self, input: &str, precision: usize) -> (String, bool) {
        let mut negative = false;
        let mut integer = String::new();
        let mut fraction: Option<String> = None;

        for c in input.chars() {
            match c {
                '-' if !negative && integer.is_empty() && fraction.is_none() => negative = true,
                '0'..='9' => match fraction.as_mut() {
                    Some(f) if f.len() < precision => f.push(c),
                    Some(_) => {}
                    None => integer.push(c),
                },
                '.' | ',' if fraction.is_none() => fraction = Some(String::new()),
                _ => {}
            }
        }

        let trimmed = integer.trim_start_matches('0');
        let mut integer = if trimmed.is_empty() && (!integer.is_empty() || fraction.is_some()) {
            "0".to_string()
        } else {
            trimmed.to_string()
        };

        let over_limit = integer.len() > self.integer_digits
            || integer.parse::<u32>().is_ok_and(|v| {
                v > self.limit
                    || (v == self.limit
                        && fraction.as_deref().is_some_and(|f| f.bytes().any(|b| b != b'0')))
            });
        if over_limit {
            integer = self.limit.to_string();
            if let Some(f) = fraction.as_mut() {
                *f = "0".repeat(f.len());
            }
        }

        let mut out = String::with_capacity(self.max_length(precision));
        if negative {
            out.push('-');
        }
        out.push_str(&integer);
        let complete = match &fraction {
            Some(f) if precision > 0 => {
                out.push('.');
                out.push_str(f);
                f.len() == precision
            }
            _ => false,
        };
        (out, complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lat(input: &str) -> String {
        LATITUDE.format(input, 6).0
    }

    fn lng(input: &str) -> String {
        LONGITUDE.format(input, 6).0
    }

    #[test]
    fn test_latitude_typing() {
        assert_eq!(lat("-"), "-");
        assert_eq!(lat("-2"), "-2");
        assert_eq!(lat("-23"), "-23");
        assert_eq!(lat("-23,5"), "-23.5");
        assert_eq!(
            LATITUDE.format("-23.550520", 6),
            ("-23.550520".to_string(), true)
        );
        assert_eq!(lat("-23.5505201234"), "-23.550520");
    }

    #[test]
    fn test_clamps_to_bound() {
        assert_eq!(lat("95"), "90");
        assert_eq!(lat("123"), "90");
        assert_eq!(lat("90.5"), "90.0");
        assert_eq!(lat("-91.25"), "-90.00");
        assert_eq!(lat("90.000"), "90.000");
        assert_eq!(lng("181"), "180");
        assert_eq!(lng("-46.633308"), "-46.633308");
        assert_eq!(lng("179.9"), "179.9");
    }

    #[test]
    fn test_leading_zeros_and_bare_point() {
        assert_eq!(lat("007"), "7");
        assert_eq!(lat("0"), "0");
        assert_eq!(lat("00"), "0");
        assert_eq!(lat("."), "0.");
        assert_eq!(lat("-.5"), "-0.5");
        assert_eq!(lat(""), "");
    }

    #[test]
    fn test_ignores_noise() {
        assert_eq!(lat("1a2"), "12");
        assert_eq!(lat("12.3.4"), "12.34");
        assert_eq!(lat("1-2"), "12");
    }

    #[test]
    fn test_zero_precision() {
        assert_eq!(LATITUDE.format("12.5", 0), ("12".to_string(), false));
        assert_eq!(LATITUDE.format(".", 0).0, "0");
        assert_eq!(LATITUDE.max_length(0), 3);
    }

    #[test]
    fn test_reapplying_is_stable() {
        for input in ["-", "95", "90.5", "-.5", "007", "12.3.4", "-181.1234567"] {
            let once = lat(input);
            assert_eq!(lat(&once), once);
            let once = lng(input);
            assert_eq!(lng(&once), once);
        }
    }
}
