//! Round-number tick generation and domain nicing.
//!
//! Steps are powers of ten times 1, 2, or 5. Sub-unit steps are carried as a
//! negative inverse increment (`-10.0` means a step of `0.1`) so tick values
//! are computed by division and stay free of accumulated float error.

const E10: f64 = 7.071_067_811_865_475_5; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Returns `(first_index, last_index, increment)` for ticks covering `[start, stop]`.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut first, mut last, increment);
    if power < 0.0 {
        let inc = 10_f64.powf(-power) / factor;
        first = (start * inc).round();
        last = (stop * inc).round();
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        increment = -inc;
    } else {
        let inc = 10_f64.powf(power) * factor;
        first = (start / inc).round();
        last = (stop / inc).round();
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        increment = inc;
    }

    if last < first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (first, last, increment)
}

/// Signed increment between ticks, see the module docs for the sign convention.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).2
}

/// Approximately `count` round-number ticks inside `[start, stop]`.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let (first, last, increment) = tick_spec(low, high, count as f64);
    if !(last >= first) {
        return Vec::new();
    }

    let n = (last - first + 1.0) as usize;
    let value_at = |index: f64| {
        if increment < 0.0 {
            index / -increment
        } else {
            index * increment
        }
    };
    (0..n)
        .map(|offset| {
            let index = if reverse {
                last - offset as f64
            } else {
                first + offset as f64
            };
            value_at(index)
        })
        .collect()
}

/// Extends `[start, stop]` outward to round tick boundaries.
///
/// Iterates until the step stabilizes, at most ten times.
#[must_use]
pub fn nice_domain(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let reverse = stop < start;
    let (mut low, mut high) = if reverse { (stop, start) } else { (start, stop) };
    let mut previous_step: Option<f64> = None;

    for _ in 0..10 {
        let step = tick_increment(low, high, count);
        if previous_step == Some(step) {
            break;
        }
        if step > 0.0 {
            low = (low / step).floor() * step;
            high = (high / step).ceil() * step;
        } else if step < 0.0 {
            low = (low * step).ceil() / step;
            high = (high * step).floor() / step;
        } else {
            break;
        }
        previous_step = Some(step);
    }

    if reverse { (high, low) } else { (low, high) }
}

#[cfg(test)]
mod tests {
    use super::{nice_domain, tick_increment, ticks};

    #[test]
    fn ticks_use_round_steps() {
        assert_eq!(ticks(0.0, 100.0, 6), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn ticks_of_reversed_range_are_descending() {
        assert_eq!(ticks(10.0, 0.0, 2), vec![10.0, 5.0, 0.0]);
    }

    #[test]
    fn sub_unit_increment_is_negative_inverse() {
        assert_eq!(tick_increment(0.0, 1.0, 10), -10.0);
        assert_eq!(tick_increment(0.0, 100.0, 10), 10.0);
    }

    #[test]
    fn nice_domain_extends_to_round_bounds() {
        assert_eq!(nice_domain(0.0, 93.4, 10), (0.0, 100.0));
        assert_eq!(nice_domain(-3.2, 21.7, 10), (-4.0, 22.0));
        assert_eq!(nice_domain(0.0, 0.96, 10), (0.0, 1.0));
    }
}
