/// Cleans extracted text line by line.
///
/// Lines are trimmed, empty lines dropped, and a line equal to the line just
/// kept is dropped as well. Only adjacent repeats collapse: `A, B, A` stays.
/// The kept lines are joined with `\n`.
///
/// # Examples
///
/// ```
/// use about_crawler::extract::normalize_text;
///
/// let text = "  Hello  \n\nHello\nWorld\n   \nWorld\nHello";
/// assert_eq!(normalize_text(text), "Hello\nWorld\nHello");
/// ```
pub fn normalize_text(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if kept.last() != Some(&line) {
            kept.push(line);
        }
    }

    kept.join("\n")
}
