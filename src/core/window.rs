//! # Page Window
//!
//! Picks which page numbers the pager shows as buttons.
//!
//! Two candidate windows are computed and then merged:
//!
//! ```text
//! A: start anchored  start1 = current - ⌈w/2⌉   end1 = start1 + w - 1
//! B: end anchored    end2   = current + ⌈w/2⌉-1  start2 = end2 - w + 1
//!
//! window = [min(start1, start2), max(end1, end2)]   (each clamped to 1..=total)
//! ```
//!
//! Near the first page A is clipped at 1 and B keeps the full width; near the
//! last page it is the other way round. In the middle both agree and the
//! window is centered on the current page.

use std::ops::RangeInclusive;

/// Returns the inclusive range of page numbers to render.
///
/// Pure and total: any combination of inputs yields a valid (possibly
/// single-page) range. Callers guarantee `1 <= current_page <= total_page`
/// and `window_size >= 1`; out-of-contract inputs are clamped rather than
/// rejected.
pub fn compute_window(current_page: u32, total_page: u32, window_size: u32) -> RangeInclusive<u32> {
    let current = i64::from(current_page);
    let total = i64::from(total_page.max(1));
    let size = i64::from(window_size.max(1));
    // Round-half-up of size / 2
    let half = (size + 1) / 2;

    let start1 = (current - half).max(1);
    let end1 = (start1 + size - 1).min(total);

    let end2 = (current + half - 1).min(total);
    let start2 = (end2 - size + 1).max(1);

    let start = start1.min(start2).max(1);
    let end = end1.max(end2).max(start);

    // Both bounds lie in 1..=total, which came from a u32
    start as u32..=end as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(current: u32, total: u32, size: u32) -> Vec<u32> {
        compute_window(current, total, size).collect()
    }

    #[test]
    fn test_first_page_fills_window_forward() {
        assert_eq!(compute_window(1, 20, 10), 1..=10);
    }

    #[test]
    fn test_last_page_fills_window_backward() {
        assert_eq!(compute_window(20, 20, 10), 11..=20);
    }

    #[test]
    fn test_middle_page_is_centered() {
        assert_eq!(compute_window(10, 20, 10), 5..=14);
    }

    #[test]
    fn test_fewer_pages_than_window_shows_all() {
        assert_eq!(compute_window(3, 5, 10), 1..=5);
        assert_eq!(window(1, 1, 10), vec![1]);
        for current in 1..=7 {
            assert_eq!(compute_window(current, 7, 7), 1..=7);
        }
    }

    #[test]
    fn test_near_start_keeps_full_width() {
        assert_eq!(compute_window(2, 20, 10), 1..=10);
        assert_eq!(compute_window(6, 20, 10), 1..=10);
        assert_eq!(compute_window(7, 20, 10), 2..=11);
    }

    #[test]
    fn test_near_end_keeps_full_width() {
        assert_eq!(compute_window(19, 20, 10), 11..=20);
        assert_eq!(compute_window(16, 20, 10), 11..=20);
    }

    #[test]
    fn test_odd_window_size_rounds_half_up() {
        // half = 3: A = 7..=11, B = 8..=12, merged to six numbers
        assert_eq!(compute_window(10, 20, 5), 7..=12);
        assert_eq!(compute_window(1, 20, 5), 1..=5);
        assert_eq!(compute_window(20, 20, 5), 16..=20);
    }

    #[test]
    fn test_window_of_one() {
        assert_eq!(window(5, 9, 1), vec![4, 5]);
        assert_eq!(window(1, 9, 1), vec![1]);
    }

    #[test]
    fn test_window_always_contains_current_page() {
        for total in 1..=30 {
            for size in 1..=12 {
                for current in 1..=total {
                    let range = compute_window(current, total, size);
                    assert!(range.contains(&current), "{current} not in {range:?}");
                    assert!(*range.start() >= 1 && *range.end() <= total);
                }
            }
        }
    }

    #[test]
    fn test_out_of_contract_inputs_are_clamped() {
        assert_eq!(compute_window(0, 0, 0), 1..=1);
        assert_eq!(compute_window(3, 10, 0), 2..=3);
    }
}
