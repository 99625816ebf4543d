//! String helpers used to derive human-readable labels.

/// Upper-cases the first character and lower-cases the rest.
///
/// # Examples
///
/// ```
/// use schemaker_core::utils::text::capitalize;
///
/// assert_eq!(capitalize("hello world"), "Hello world");
/// assert_eq!(capitalize("hELLO"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result: String = c.to_uppercase().collect();
        result.extend(chars.flat_map(char::to_lowercase));
        result
    })
}

/// Title-cases a string: a letter that follows a non-letter is upper-cased,
/// every other letter is lower-cased.
///
/// # Examples
///
/// ```
/// use schemaker_core::utils::text::title_case;
///
/// assert_eq!(title_case("red"), "Red");
/// assert_eq!(title_case("dark blue"), "Dark Blue");
/// assert_eq!(title_case("sky_BLUE"), "Sky_Blue");
/// ```
pub fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut previous_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }
    result
}

/// Turns a field key into a label: underscores become spaces and the result
/// is [`capitalize`]d.
///
/// # Examples
///
/// ```
/// use schemaker_core::utils::text::humanize_key;
///
/// assert_eq!(humanize_key("first_name"), "First name");
/// assert_eq!(humanize_key("id"), "Id");
/// ```
pub fn humanize_key(key: &str) -> String {
    capitalize(&key.replace('_', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_unicode() {
        assert_eq!(capitalize("émile"), "Émile");
    }

    #[test]
    fn test_title_case_digits_break_words() {
        assert_eq!(title_case("1st place"), "1St Place");
    }

    #[test]
    fn test_title_case_empty() {
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_humanize_key_leading_underscore() {
        assert_eq!(humanize_key("_private_note"), " private note");
    }

    #[test]
    fn test_humanize_key_mixed_case() {
        assert_eq!(humanize_key("postal_CODE"), "Postal code");
    }
}
