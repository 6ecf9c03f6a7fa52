/// Derives a URL slug from a display name: lowercase, alphanumerics kept,
/// runs of anything else collapsed to single hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        "profile".to_string()
    } else {
        slug
    }
}

/// Picks the first free slug among `base`, `base-2`, `base-3`, ...
pub fn uniquify(base: &str, taken: &[String]) -> String {
    if !taken.iter().any(|t| t == base) {
        return base.to_string();
    }
    let mut n = 2u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.iter().any(|t| *t == candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("The Midnight Owls"), "the-midnight-owls");
    }

    #[test]
    fn test_slugify_collapses_punctuation() {
        assert_eq!(slugify("Jazz & Blues -- Live!"), "jazz-blues-live");
    }

    #[test]
    fn test_slugify_trims_leading_and_trailing_separators() {
        assert_eq!(slugify("  DJ Set  "), "dj-set");
    }

    #[test]
    fn test_slugify_empty_falls_back() {
        assert_eq!(slugify("!!!"), "profile");
    }

    #[test]
    fn test_uniquify_free_base() {
        assert_eq!(uniquify("owls", &[]), "owls");
    }

    #[test]
    fn test_uniquify_appends_counter() {
        let taken = vec!["owls".to_string(), "owls-2".to_string()];
        assert_eq!(uniquify("owls", &taken), "owls-3");
    }
}
