/// Progress shown when nobody leads.
pub const NEUTRAL: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leader {
    Red,
    Blue,
    Tie,
}

pub fn leader(red_count: u64, blue_count: u64) -> Leader {
    match red_count.cmp(&blue_count) {
        std::cmp::Ordering::Greater => Leader::Red,
        std::cmp::Ordering::Less => Leader::Blue,
        std::cmp::Ordering::Equal => Leader::Tie,
    }
}

/// Maps the three live counts onto a bar position in `[0, 1]`.
///
/// `0.0` is a full red sweep, `1.0` a full blue sweep and [`NEUTRAL`] a tie
/// (including no votes at all). The distance from the centre is half the gap
/// between the two team proportions of `total_count`.
///
/// The counts arrive from independent subscriptions, so a team count can
/// briefly exceed a stale total. Such inputs are clamped into range.
pub fn project(red_count: u64, blue_count: u64, total_count: u64) -> f64 {
    if total_count == 0 {
        return NEUTRAL;
    }

    let total = total_count as f64;
    let red_proportion = red_count as f64 / total;
    let blue_proportion = blue_count as f64 / total;

    let progress = if red_proportion > blue_proportion {
        NEUTRAL - (red_proportion - blue_proportion) / 2.0
    } else if blue_proportion > red_proportion {
        NEUTRAL + (blue_proportion - red_proportion) / 2.0
    } else {
        NEUTRAL
    };

    progress.clamp(0.0, 1.0)
}
