/// Lowercase the title and collapse every run of characters outside
/// `[a-z0-9]` into a single `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_hyphen = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    slug
}

/// `notecard-{n}-{slug}.md` where `n` is the 1-based position.
pub fn notecard_filename(position: usize, title: &str) -> String {
    format!("notecard-{}-{}.md", position + 1, slugify(title))
}
