//! Discrete color ramps for climate indicators.
//!
//! Each ramp is a step function over inclusive upper-bound thresholds: a value
//! takes the color of the smallest threshold that is >= the value, and the
//! terminal color past the last threshold. Ramp selection is an ordered list of
//! substring predicates over the indicator id; the precedence (temperature,
//! then day counts / heat index, then precipitation) is load-bearing for ids
//! that match more than one family.

pub type Rgb = [u8; 3];

/// A step-function color ramp: ordered `(inclusive upper bound, color)` pairs
/// plus a terminal catch-all color for values above the last bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRamp {
    steps: &'static [(f64, Rgb)],
    terminal: Rgb,
}

impl ColorRamp {
    /// Color for `value`: first step whose bound is >= value, else terminal.
    pub fn pick(&self, value: f64) -> Rgb {
        for &(bound, color) in self.steps {
            if value <= bound {
                return color;
            }
        }
        self.terminal
    }

    /// The ramp's `(bound, color)` steps, for legend rendering.
    pub fn steps(&self) -> &'static [(f64, Rgb)] {
        self.steps
    }

    pub fn terminal(&self) -> Rgb {
        self.terminal
    }
}

/// Annual mean temperature, 14℃..19℃ in 1℃ steps (RdBu-style diverging).
pub const TEMPERATURE_RAMP: ColorRamp = ColorRamp {
    steps: &[
        (14.0, [0x21, 0x66, 0xAC]),
        (15.0, [0x43, 0x93, 0xC3]),
        (16.0, [0x92, 0xC5, 0xDE]),
        (17.0, [0xFD, 0xDB, 0xC7]),
        (18.0, [0xF4, 0xA5, 0x82]),
        (19.0, [0xD6, 0x60, 0x4D]),
    ],
    terminal: [0xB2, 0x18, 0x2B],
};

/// Day counts (hot days, tropical nights, heat-index days), 0..60+ days.
pub const DAYS_RAMP: ColorRamp = ColorRamp {
    steps: &[
        (10.0, [0xFF, 0xFF, 0xCC]),
        (20.0, [0xFF, 0xED, 0xA0]),
        (30.0, [0xFE, 0xD9, 0x76]),
        (40.0, [0xFE, 0xB2, 0x4C]),
        (50.0, [0xFD, 0x8D, 0x3C]),
        (60.0, [0xFC, 0x4E, 0x2A]),
    ],
    terminal: [0xE3, 0x1A, 0x1C],
};

/// Annual precipitation, 0mm..1800mm+.
pub const PRECIPITATION_RAMP: ColorRamp = ColorRamp {
    steps: &[
        (1000.0, [0xE0, 0xF3, 0xF8]),
        (1200.0, [0xAB, 0xD9, 0xE9]),
        (1400.0, [0x74, 0xAD, 0xD1]),
        (1600.0, [0x45, 0x75, 0xB4]),
        (1800.0, [0x31, 0x36, 0x95]),
    ],
    terminal: [0x1A, 0x1A, 0x6E],
};

/// Indicator family a ramp belongs to, derived from the same predicate order
/// as [`select_ramp`] so the legend cannot disagree with the pixel mapper.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RampFamily {
    Temperature,
    DayCount,
    Precipitation,
}

impl RampFamily {
    pub fn ramp(&self) -> &'static ColorRamp {
        match self {
            RampFamily::Temperature => &TEMPERATURE_RAMP,
            RampFamily::DayCount => &DAYS_RAMP,
            RampFamily::Precipitation => &PRECIPITATION_RAMP,
        }
    }
}

/// Resolve an indicator id to its ramp family. Checked in order: temperature
/// tokens, then day-count/heat-index tokens, then precipitation tokens; ids
/// matching none default to the temperature family.
pub fn ramp_family(indicator_id: &str) -> RampFamily {
    if ["temperature", "tg_", "tx_", "tn_"]
        .iter()
        .any(|t| indicator_id.contains(t))
    {
        return RampFamily::Temperature;
    }
    if ["days", "wbgt"].iter().any(|t| indicator_id.contains(t)) {
        return RampFamily::DayCount;
    }
    if ["pr_", "precipitation"]
        .iter()
        .any(|t| indicator_id.contains(t))
    {
        return RampFamily::Precipitation;
    }
    RampFamily::Temperature
}

/// Ramp for an indicator id (see [`ramp_family`] for the precedence).
pub fn select_ramp(indicator_id: &str) -> &'static ColorRamp {
    ramp_family(indicator_id).ramp()
}

impl crate::types::Indicator {
    pub fn family(&self) -> RampFamily {
        ramp_family(self.id())
    }

    pub fn ramp(&self) -> &'static ColorRamp {
        select_ramp(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Indicator;

    #[test]
    fn test_step_function_below_first_threshold() {
        // Any two values at or below the first bound share its color.
        assert_eq!(TEMPERATURE_RAMP.pick(-40.0), TEMPERATURE_RAMP.pick(14.0));
        assert_eq!(TEMPERATURE_RAMP.pick(13.2), [0x21, 0x66, 0xAC]);
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        assert_eq!(TEMPERATURE_RAMP.pick(15.0), [0x43, 0x93, 0xC3]);
        assert_eq!(TEMPERATURE_RAMP.pick(15.0001), [0x92, 0xC5, 0xDE]);
        assert_eq!(DAYS_RAMP.pick(60.0), [0xFC, 0x4E, 0x2A]);
    }

    #[test]
    fn test_terminal_color_above_last_threshold() {
        assert_eq!(TEMPERATURE_RAMP.pick(19.5), [0xB2, 0x18, 0x2B]);
        assert_eq!(DAYS_RAMP.pick(1000.0), [0xE3, 0x1A, 0x1C]);
        assert_eq!(PRECIPITATION_RAMP.pick(5000.0), [0x1A, 0x1A, 0x6E]);
    }

    #[test]
    fn test_monotonic_over_thresholds() {
        // Walking values upward never revisits an earlier step's color index.
        let mut last_idx = 0usize;
        for v in [5.0, 14.5, 15.5, 16.5, 17.5, 18.5, 25.0] {
            let color = TEMPERATURE_RAMP.pick(v);
            let idx = TEMPERATURE_RAMP
                .steps()
                .iter()
                .position(|&(_, c)| c == color)
                .unwrap_or(TEMPERATURE_RAMP.steps().len());
            assert!(idx >= last_idx, "ramp went backwards at {}", v);
            last_idx = idx;
        }
    }

    #[test]
    fn test_family_precedence() {
        assert_eq!(ramp_family("tg_mean_annual"), RampFamily::Temperature);
        assert_eq!(ramp_family("days_tx_above35"), RampFamily::DayCount);
        assert_eq!(ramp_family("wbgt_mean_annual"), RampFamily::DayCount);
        assert_eq!(ramp_family("pr_total_annual"), RampFamily::Precipitation);
        // Temperature tokens win over a later "days" match.
        assert_eq!(ramp_family("tx_hot_days"), RampFamily::Temperature);
        // "days_pr_above50mm" contains both "days" and "pr_": days is checked first.
        assert_eq!(ramp_family("days_pr_above50mm"), RampFamily::DayCount);
        // Unknown ids default to temperature.
        assert_eq!(ramp_family("humidity_index"), RampFamily::Temperature);
    }

    #[test]
    fn test_every_indicator_resolves() {
        for ind in Indicator::ALL {
            // No indicator may fall through to a panic; default family is fine.
            let _ = ind.ramp();
        }
        assert_eq!(Indicator::DaysPrAbove100mm.family(), RampFamily::DayCount);
        assert_eq!(Indicator::PrTotalAnnual.family(), RampFamily::Precipitation);
    }
}
