//! Package list helpers
//!
//! Text utilities shared by profile previews and the CLI.

/// Gap between columns in [`format_cols`] output.
const COLUMN_GAP: usize = 2;

/// Lay out items in aligned columns, row by row.
///
/// The column count grows with the number of items (1 column up to 4
/// items, 2 up to 8, 3 up to 12, 4 beyond). Every line ends with a newline.
/// Returns an empty string for an empty slice.
pub fn format_cols<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let cols = match items.len() {
        0..=4 => 1,
        5..=8 => 2,
        9..=12 => 3,
        _ => 4,
    };
    let width = items
        .iter()
        .map(|item| item.as_ref().chars().count())
        .max()
        .unwrap_or(0)
        + COLUMN_GAP;

    let mut text = String::new();
    for row in items.chunks(cols) {
        let line: String = row
            .iter()
            .map(|item| format!("{:<width$}", item.as_ref(), width = width))
            .collect();
        text.push_str(line.trim_end());
        text.push('\n');
    }
    text
}

/// Sort and deduplicate a list of names in place.
pub fn sorted_unique(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cols_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(format_cols(&empty), "");
    }

    #[test]
    fn test_format_cols_single_column() {
        let text = format_cols(&["a", "b"]);
        assert_eq!(text, "a\nb\n");
    }

    #[test]
    fn test_format_cols_two_columns() {
        let items = ["gnome", "gdm", "firefox", "vim", "htop"];
        let text = format_cols(&items);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "gnome    gdm");
        assert_eq!(lines[2], "htop");
    }

    #[test]
    fn test_format_cols_caps_at_four_columns() {
        let items: Vec<String> = (0..20).map(|i| format!("pkg{:02}", i)).collect();
        let text = format_cols(&items);
        assert_eq!(text.lines().count(), 5);
        assert_eq!(text.lines().next().unwrap().split_whitespace().count(), 4);
    }

    #[test]
    fn test_sorted_unique() {
        let names = vec!["vim".to_string(), "git".to_string(), "vim".to_string()];
        assert_eq!(sorted_unique(names), vec!["git", "vim"]);
    }
}
