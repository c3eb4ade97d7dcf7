//! Tick label wrapping and coloring

use evograph_core::{Color, ValueColorTable};

use crate::options::TickWrapPolicy;

/// Wrap one tick label according to `policy`.
///
/// Wrapping is deterministic: the same label at the same index always yields
/// the same lines.
pub fn wrap_label(label: &str, index: usize, policy: TickWrapPolicy) -> String {
    match policy {
        TickWrapPolicy::FirstSpace => break_first_space(label),
        TickWrapPolicy::Alternating => {
            if index < 3 {
                // the first three labels are always two-line
                break_first_space(label)
            } else if (index - 3) % 2 == 0 {
                label.to_string()
            } else {
                break_first_space(label)
            }
        }
    }
}

fn break_first_space(label: &str) -> String {
    label.replacen(' ', "\n", 1)
}

/// Label color per row, derived from the source series' values: each value is
/// truncated to its integer score and looked up, with the neutral color for
/// gaps and out-of-domain scores.
pub fn tick_colors(values: &[Option<f64>], table: &ValueColorTable) -> Vec<Color> {
    values.iter().map(|v| table.color_for(*v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use evograph_core::DEFAULT_VALUE_COLORS;

    #[test]
    fn test_first_space_policy() {
        assert_eq!(wrap_label("Subir escaleras", 0, TickWrapPolicy::FirstSpace), "Subir\nescaleras");
        // only the first space breaks
        assert_eq!(
            wrap_label("Subir y bajar", 7, TickWrapPolicy::FirstSpace),
            "Subir\ny bajar"
        );
        assert_eq!(wrap_label("Marcha", 2, TickWrapPolicy::FirstSpace), "Marcha");
    }

    #[test]
    fn test_alternating_policy() {
        let wrap = |label, idx| wrap_label(label, idx, TickWrapPolicy::Alternating);
        // indices 0..3 always wrap
        assert_eq!(wrap("a b", 0), "a\nb");
        assert_eq!(wrap("a b", 2), "a\nb");
        // from index 3 on: one line, two lines, one line, ...
        assert_eq!(wrap("a b", 3), "a b");
        assert_eq!(wrap("a b", 4), "a\nb");
        assert_eq!(wrap("a b", 5), "a b");
    }

    #[test]
    fn test_tick_colors() {
        let table = ValueColorTable::defaults();
        let colors = tick_colors(&[Some(2.0), Some(4.9), None, Some(9.0)], &table);
        assert_eq!(colors[0], DEFAULT_VALUE_COLORS[2]);
        assert_eq!(colors[1], DEFAULT_VALUE_COLORS[4]);
        assert_eq!(colors[2], Color::NEUTRAL);
        assert_eq!(colors[3], Color::NEUTRAL);
    }
}
