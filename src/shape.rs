//! Expected-shape pattern compilation.
//!
//! A "shape" is a verbatim snippet of the source we expect to find. It is
//! turned into a regex fragment where every whitespace run containing a line
//! break matches `\s+`, and everything else (including spaces inside a line)
//! matches literally. Reindented or rewrapped code still matches, while the
//! tokens themselves must be exact.

/// Compile an expected text shape into a regex fragment.
///
/// Leading and trailing line-breaking whitespace also becomes `\s+`, so
/// callers control the span edges through the shape text itself.
pub fn shape_pattern(shape: &str) -> String {
    let mut pattern = String::with_capacity(shape.len() * 2);
    let mut literal = String::new();
    let mut chars = shape.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_whitespace() {
            literal.push(c);
            continue;
        }

        let mut run = String::from(c);
        while let Some(&next) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            run.push(next);
            chars.next();
        }

        if run.contains('\n') {
            pattern.push_str(&regex::escape(&literal));
            literal.clear();
            pattern.push_str(r"\s+");
        } else {
            literal.push_str(&run);
        }
    }

    pattern.push_str(&regex::escape(&literal));
    pattern
}
