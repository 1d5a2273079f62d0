//! Line-numbered source excerpts around an error.

use crate::formatting::OutputFormatter;
use std::ops::RangeInclusive;

/// Lines shown on each side of the error line.
pub const CONTEXT_LINES: usize = 5;

/// 1-based, inclusive range of lines to show for an error on `line` in a file
/// of `total_lines` lines. `None` when there is nothing to show.
pub fn excerpt_window(line: usize, total_lines: usize) -> Option<RangeInclusive<usize>> {
    let start = line.saturating_sub(CONTEXT_LINES).max(1);
    let end = line.saturating_add(CONTEXT_LINES).min(total_lines);
    (start <= end).then_some(start..=end)
}

/// Render the excerpt as `<number>: <text>` rows, numbers right-aligned to
/// the widest number in the window, with the error row marked.
///
/// A trailing newline yields a final empty row, so "unexpected end of file"
/// errors reported on the line after the last one still get a marked row.
pub fn render_excerpt(
    content: &str,
    line: usize,
    formatter: &dyn OutputFormatter,
) -> Vec<String> {
    let rows: Vec<&str> = content
        .split('\n')
        .map(|row| row.strip_suffix('\r').unwrap_or(row))
        .collect();
    let Some(window) = excerpt_window(line, rows.len()) else {
        return Vec::new();
    };

    let width = window.end().to_string().len();
    window
        .map(|number| {
            let text = rows[number - 1];
            let text = if number == line {
                formatter.mark_error_line(text)
            } else {
                text.to_string()
            };
            format!("{:>width$}: {}", number, text, width = width)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::{ColoredFormatter, FormattingConfig};
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn plain() -> ColoredFormatter {
        ColoredFormatter::new(FormattingConfig::plain())
    }

    #[test]
    fn test_window_never_starts_before_first_line() {
        assert_eq!(excerpt_window(1, 3), Some(1..=3));
        assert_eq!(excerpt_window(3, 3), Some(1..=3));
    }

    #[test]
    fn test_window_is_clamped_on_both_sides() {
        assert_eq!(excerpt_window(10, 100), Some(5..=15));
        assert_eq!(excerpt_window(98, 100), Some(93..=100));
        assert_eq!(excerpt_window(6, 6), Some(1..=6));
    }

    #[test]
    fn test_empty_content_has_one_empty_row() {
        assert_eq!(excerpt_window(1, 0), None);
        assert_eq!(render_excerpt("", 1, &plain()), vec!["1: <error></error>"]);
    }

    #[test]
    fn test_error_on_first_line_of_three() {
        let rows = render_excerpt("{block}\n{$x}\n{/block}", 1, &plain());
        assert_eq!(
            rows,
            vec!["1: <error>{block}</error>", "2: {$x}", "3: {/block}"]
        );
    }

    #[test]
    fn test_numbers_align_to_widest_in_window() {
        let content: String = (1..=12).map(|n| format!("row {}\n", n)).collect();
        let rows = render_excerpt(&content, 7, &plain());
        assert_eq!(
            rows.join("\n"),
            indoc! {"
                 2: row 2
                 3: row 3
                 4: row 4
                 5: row 5
                 6: row 6
                 7: <error>row 7</error>
                 8: row 8
                 9: row 9
                10: row 10
                11: row 11
                12: row 12"}
        );
    }

    #[test]
    fn test_end_of_file_error_marks_trailing_empty_row() {
        let rows = render_excerpt("<?php\nif (\n", 3, &plain());
        assert_eq!(rows, vec!["1: <?php", "2: if (", "3: <error></error>"]);
    }

    #[test]
    fn test_carriage_returns_are_stripped() {
        let rows = render_excerpt("a\r\nb\r\n", 2, &plain());
        assert_eq!(rows, vec!["1: a", "2: <error>b</error>", "3: "]);
    }

    #[test]
    fn test_line_past_end_shows_tail_without_marker() {
        let rows = render_excerpt("a\nb\n", 5, &plain());
        assert_eq!(rows, vec!["1: a", "2: b", "3: "]);
    }

    proptest! {
        #[test]
        fn prop_window_stays_inside_file(line in 1usize..500, total in 1usize..500) {
            if let Some(window) = excerpt_window(line, total) {
                prop_assert!(*window.start() >= 1);
                prop_assert!(*window.end() <= total);
                prop_assert!(window.end() - window.start() <= 2 * CONTEXT_LINES);
                if line <= total {
                    prop_assert!(window.contains(&line));
                }
            } else {
                prop_assert!(line > total + CONTEXT_LINES);
            }
        }
    }
}
