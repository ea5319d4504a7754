// Calendar scheduling: stability to interval days, ladder minutes to
// day fractions, and human-readable labels. Due dates always use the
// exact minute/day arithmetic; the rounded label is display-only.

pub(crate) const MINUTES_PER_DAY: f64 = 1440.0;

/// I = round(S * ln(r) / ln(0.9)), clamped to [1, maximum_interval].
/// At r = 0.9 the interval equals the stability.
pub fn interval_from_stability(
    stability: f64,
    desired_retention: f64,
    maximum_interval: u32,
) -> u32 {
    let raw = stability * desired_retention.ln() / 0.9_f64.ln();
    (raw.round() as i64).clamp(1, i64::from(maximum_interval)) as u32
}

pub(crate) fn step_minutes_as_days(minutes: u32) -> f64 {
    f64::from(minutes) / MINUTES_PER_DAY
}

/// Sub-day intervals render as minutes or hours, everything else as
/// whole or one-decimal days.
pub fn format_interval(days: f64) -> String {
    if days < 1.0 {
        let minutes = days * MINUTES_PER_DAY;
        if minutes < 60.0 {
            format!("{} min", minutes.round().max(1.0) as i64)
        } else {
            let hours = minutes / 60.0;
            if (hours - hours.round()).abs() < 0.05 {
                format!("{} h", hours.round() as i64)
            } else {
                format!("{hours:.1} h")
            }
        }
    } else if (days - days.round()).abs() < 0.05 {
        format!("{} d", days.round() as i64)
    } else {
        format!("{days:.1} d")
    }
}
