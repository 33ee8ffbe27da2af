use std::time::Instant;

/// Once-per-second frame rate reporter.
///
/// Every frame is counted. Once at least one second has passed since the
/// previous report (or since the baseline), the rate is the number of frames
/// counted divided by the delta time of the frame that closes the window.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    last_report: Instant,
    frames: u32,
}

impl FpsCounter {
    pub fn starting_at(now: Instant) -> Self {
        Self {
            last_report: now,
            frames: 0,
        }
    }

    pub fn reset(&mut self, now: Instant) {
        self.last_report = now;
        self.frames = 0;
    }

    /// Counts the frame that started at `now`, `dt` seconds after the
    /// previous one, and returns the rate when a report is due.
    ///
    /// A frame with a zero delta cannot produce a rate; the report moves to
    /// the next frame.
    pub fn record(&mut self, now: Instant, dt: f64) -> Option<f64> {
        self.frames += 1;

        let elapsed = now.saturating_duration_since(self.last_report).as_secs_f64();
        if elapsed < 1.0 || dt <= 0.0 {
            return None;
        }

        let fps = self.frames as f64 / dt;
        self.frames = 0;
        self.last_report = now;
        Some(fps)
    }
}

/// Window title carrying the frame rate: `"<title> - FPS:<value>"`.
pub fn fps_title(title: &str, fps: f64) -> String {
    format!("{title} - FPS:{}", format_significant(fps, 3))
}

/// Formats `value` with `digits` significant digits like C's `%g`: trailing
/// zeros are dropped, and scientific notation (`1.23e+03`) is used when the
/// rounded exponent is below -4 or at least `digits`.
pub fn format_significant(value: f64, digits: usize) -> String {
    let digits = digits.max(1);

    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }

    // Rounding first decides the exponent: 999.6 becomes 1.00e3.
    let sci = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exponent) = exp.parse::<i32>() else {
        return sci;
    };

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        );
    }

    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    trim_fraction(&format!("{value:.decimals$}")).to_string()
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn no_report_before_one_second() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::starting_at(t0);
        for i in 1..60 {
            assert_eq!(fps.record(t0 + Duration::from_millis(i * 16), 0.016), None);
        }
    }

    #[test]
    fn rate_divides_frames_by_closing_frame_delta() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::starting_at(t0);

        let mut report = None;
        for i in 1..=50 {
            report = fps.record(t0 + Duration::from_millis(i * 20), 0.02);
        }
        let rate = report.expect("report after one second");
        assert!((rate - 2500.0).abs() < 1e-6, "{rate}");
    }

    #[test]
    fn zero_delta_defers_the_report() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::starting_at(t0);
        let late = t0 + Duration::from_secs(2);

        assert_eq!(fps.record(late, 0.0), None);
        let rate = fps.record(late, 0.5).expect("deferred report");
        assert!((rate - 4.0).abs() < 1e-9);
    }

    #[test]
    fn reports_at_most_once_per_second() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::starting_at(t0);

        let reports = (1..=250)
            .filter_map(|i| fps.record(t0 + Duration::from_millis(i * 10), 0.01))
            .count();
        assert_eq!(reports, 2);
    }

    #[test]
    fn significant_digits_match_printf_g() {
        assert_eq!(format_significant(59.94, 3), "59.9");
        assert_eq!(format_significant(60.0, 3), "60");
        assert_eq!(format_significant(144.26, 3), "144");
        assert_eq!(format_significant(9.5, 3), "9.5");
        assert_eq!(format_significant(0.5, 3), "0.5");
        assert_eq!(format_significant(1234.0, 3), "1.23e+03");
        assert_eq!(format_significant(2500.0, 3), "2.5e+03");
        assert_eq!(format_significant(0.00001234, 3), "1.23e-05");
    }

    #[test]
    fn rounding_can_switch_to_exponent_form() {
        assert_eq!(format_significant(999.6, 3), "1e+03");
        assert_eq!(format_significant(99.96, 3), "100");
    }

    #[test]
    fn title_format() {
        assert_eq!(fps_title("DEMO", 59.94), "DEMO - FPS:59.9");
    }
}
