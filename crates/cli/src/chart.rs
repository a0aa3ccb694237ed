//! Horizontal text bar chart for a recommendation list.

use engine::RecommendationList;

/// Width of the longest possible bar, in characters
pub const BAR_WIDTH: usize = 40;

/// Fraction of the score span added below the minimum and above the maximum
const AXIS_PADDING: f64 = 0.2;

/// Padding used when every score is equal
const FLAT_PADDING: f64 = 0.5;

/// Axis range stretched around the scores so small differences stay visible
pub fn axis_range(scores: &[f64]) -> Option<(f64, f64)> {
    let min = scores.iter().copied().reduce(f64::min)?;
    let max = scores.iter().copied().reduce(f64::max)?;

    let span = max - min;
    if span > 0.0 {
        Some((min - span * AXIS_PADDING, max + span * AXIS_PADDING))
    } else {
        Some((min - FLAT_PADDING, max + FLAT_PADDING))
    }
}

/// Number of bar cells for `value` on the axis `[lo, hi]`
fn bar_len(value: f64, lo: f64, hi: f64, width: usize) -> usize {
    let fraction = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    (fraction * width as f64).round() as usize
}

/// Render one line per recommendation: title, bar, and the value to 2 decimals
pub fn render(list: &RecommendationList, width: usize) -> String {
    let scores: Vec<f64> = list.items.iter().map(|r| r.score).collect();
    let Some((lo, hi)) = axis_range(&scores) else {
        return String::new();
    };

    let title_width = list
        .items
        .iter()
        .map(|r| r.title.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "{:title_width$}  {} axis {:.2} .. {:.2}\n",
        "",
        list.score_kind.label(),
        lo,
        hi
    );
    for item in &list.items {
        let bar = "#".repeat(bar_len(item.score, lo, hi, width));
        out.push_str(&format!(
            "{:title_width$}  {:width$} {:.2}\n",
            item.title, bar, item.score
        ));
    }
    out
}
