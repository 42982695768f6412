// Line colors - Fixed palette indexed by line position
pub const PALETTE: [&str; 21] = [
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0",
    "#f032e6", "#bcf60c", "#fabebe", "#008080", "#e6beff", "#9a6324", "#fffac8",
    "#800000", "#aaffc3", "#808000", "#ffd8b1", "#000075", "#808080", "#000000",
];

/// Color for the line at `index` in first-encounter order. The palette has
/// no overflow policy, so lines past the last entry get `None`.
pub fn color_for(index: usize) -> Option<&'static str> {
    PALETTE.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_colors_are_distinct() {
        let colors: HashSet<&str> = (0..PALETTE.len()).filter_map(color_for).collect();
        assert_eq!(colors.len(), 21);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(color_for(0), Some("#e6194b"));
        assert_eq!(color_for(3), color_for(3));
        assert_eq!(color_for(20), Some("#000000"));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(color_for(21), None);
        assert_eq!(color_for(usize::MAX), None);
    }
}
