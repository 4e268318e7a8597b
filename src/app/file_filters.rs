/// Filter for the open dialog: any file, the buffer is plain text either way.
///
/// FLTK format: "Description\tPattern\nDescription2\tPattern2"
pub fn open_filter() -> String {
    "All Files\t*".to_string()
}

/// Filter for save dialogs: plain text first, everything else second.
pub fn save_filter() -> String {
    ["Plain Text\t*.txt", "All Files\t*"].join("\n")
}

/// File name shown in the window title, falling back to the full path.
pub fn display_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_filter_accepts_everything() {
        assert_eq!(open_filter(), "All Files\t*");
    }

    #[test]
    fn test_save_filter_lists_plain_text_first() {
        let filter = save_filter();
        let lines: Vec<&str> = filter.lines().collect();
        assert_eq!(lines, vec!["Plain Text\t*.txt", "All Files\t*"]);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("/tmp/a.txt"), "a.txt");
        assert_eq!(display_name("notes.md"), "notes.md");
        assert_eq!(display_name("/"), "/");
    }
}
