//! Display titles derived from field names.
//!
//! Titles are shown to the model in prompts and double as the anchors the
//! extractor searches for in a completion, so the transform must be stable.

/// Derive a display title from a field name.
///
/// Underscores become spaces, a space is inserted before every ASCII
/// uppercase letter, the result is trimmed and its first character is
/// uppercased: `my_field` -> `My field`, `myFieldName` -> `My Field Name`.
pub fn to_title(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        match c {
            '_' => spaced.push(' '),
            c if c.is_ascii_uppercase() => {
                spaced.push(' ');
                spaced.push(c);
            }
            c => spaced.push(c),
        }
    }

    let trimmed = spaced.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
