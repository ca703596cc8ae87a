//! Conflict marker formatting
//!
//! When both sides of a three-way merge changed the same file to different
//! contents, the working file is replaced with both versions wrapped in
//! markers. The format is fixed; tests compare against it byte for byte.

/// Render the conflict-marked contents for one file
///
/// `ours` is the current branch's version, `theirs` the target branch's.
/// Either side may be the empty string when the file is absent from that
/// side. Non-empty sides are kept newline-terminated so the markers always
/// start at column zero.
pub fn conflict_markers(ours: &str, theirs: &str) -> String {
    let mut text = String::from("<<<<<<< HEAD\n");
    push_section(&mut text, ours);
    text.push_str("=======\n");
    push_section(&mut text, theirs);
    text.push_str(">>>>>>>\n");

    text
}

fn push_section(text: &mut String, content: &str) {
    text.push_str(content);
    if !content.is_empty() && !content.ends_with('\n') {
        text.push('\n');
    }
}
