/// Derive a URL-safe slug from a human-entered title or name.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single hyphen and trims leading/trailing hyphens. Uniqueness is a
/// per-entity concern layered on top of this.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Append a numeric suffix to a base slug: `base-2`, `base-3`, ...
pub fn with_suffix(base: &str, n: u32) -> String {
    format!("{}-{}", base, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Toyota Corolla 2024"), "toyota-corolla-2024");
    }

    #[test]
    fn collapses_runs_of_separators() {
        assert_eq!(slugify("Luxury  --  SUV!!"), "luxury-suv");
        assert_eq!(slugify("a&b,c"), "a-b-c");
    }

    #[test]
    fn trims_leading_and_trailing_hyphens() {
        assert_eq!(slugify("  hello world  "), "hello-world");
        assert_eq!(slugify("---x---"), "x");
    }

    #[test]
    fn empty_and_symbol_only_inputs_yield_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn suffix_appends_counter() {
        assert_eq!(with_suffix("city-tour", 2), "city-tour-2");
    }
}
