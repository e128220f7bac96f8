//! Naming conventions shared by the overlays and renderers.
//!
//! - [`split_camel_case`] - Split identifiers into words
//! - [`to_camel_case`] - JSON tag names (`"UserID"` -> `"userId"`)
//! - [`to_kebab_case`] - URL path segments (`"StudentGroups"` -> `"student-groups"`)
//! - [`pluralize`] - Collection names (`"Category"` -> `"Categories"`)

/// Plural forms that do not follow the suffix rules.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("foot", "feet"),
];

/// Splits an identifier into words.
///
/// Handles camelCase, PascalCase, acronym runs, and `_`/`-`/space separators:
/// - "StudentGroups" -> ["Student", "Groups"]
/// - "HTTPClient" -> ["HTTP", "Client"]
/// - "userID" -> ["user", "ID"]
/// - "first_name" -> ["first", "name"]
///
/// ## Examples
///
/// ```
/// use blueprint_define::naming::split_camel_case;
///
/// assert_eq!(split_camel_case("createdAt"), vec!["created", "At"]);
/// assert_eq!(split_camel_case("ID"), vec!["ID"]);
/// ```
pub fn split_camel_case(s: &str) -> Vec<&str> {
    let mut words = Vec::new();

    for part in s.split(['_', '-', ' ']).filter(|p| !p.is_empty()) {
        let chars: Vec<(usize, char)> = part.char_indices().collect();
        let mut word_start = 0;

        for i in 1..chars.len() {
            let (idx, current) = chars[i];
            let prev = chars[i - 1].1;

            // "userName" -> "user", "Name"; "HTTPClient" -> "HTTP", "Client"
            let is_new_word = current.is_uppercase()
                && (prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (i + 1 < chars.len() && chars[i + 1].1.is_lowercase() && prev.is_uppercase()));

            if is_new_word {
                words.push(&part[word_start..idx]);
                word_start = idx;
            }
        }

        words.push(&part[word_start..]);
    }

    words
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Converts an identifier to camelCase, used for JSON tags and path params.
///
/// ## Examples
///
/// ```
/// use blueprint_define::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("ID"), "id");
/// assert_eq!(to_camel_case("Meta"), "meta");
/// assert_eq!(to_camel_case("UserID"), "userId");
/// assert_eq!(to_camel_case("firstName"), "firstName");
/// assert_eq!(to_camel_case("created_at"), "createdAt");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let words = split_camel_case(s);
    let mut out = String::with_capacity(s.len());

    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }

    out
}

/// Converts an identifier to kebab-case.
///
/// ```
/// use blueprint_define::naming::to_kebab_case;
///
/// assert_eq!(to_kebab_case("StudentGroups"), "student-groups");
/// assert_eq!(to_kebab_case("Students"), "students");
/// ```
pub fn to_kebab_case(s: &str) -> String {
    split_camel_case(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Pluralizes the last word of an identifier.
///
/// Words that already end in a single `s` are treated as plural and returned
/// unchanged, so resource names may be given in either form.
///
/// ## Examples
///
/// ```
/// use blueprint_define::naming::pluralize;
///
/// assert_eq!(pluralize("Student"), "Students");
/// assert_eq!(pluralize("Students"), "Students");
/// assert_eq!(pluralize("Category"), "Categories");
/// assert_eq!(pluralize("Address"), "Addresses");
/// assert_eq!(pluralize("Person"), "People");
/// assert_eq!(pluralize("StudentGroup"), "StudentGroups");
/// ```
pub fn pluralize(word: &str) -> String {
    let Some(last) = split_camel_case(word).last().copied() else {
        return word.to_string();
    };
    let stem = &word[..word.rfind(last).unwrap_or(0)];
    let lower = last.to_lowercase();

    if let Some((_, plural)) = IRREGULAR_PLURALS.iter().find(|(single, _)| *single == lower) {
        return format!("{stem}{}", match_case(last, plural));
    }

    let plural_last = if lower.ends_with("ss")
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        format!("{last}es")
    } else if lower.ends_with('s') {
        last.to_string()
    } else if lower.ends_with('y')
        && !lower.ends_with("ay")
        && !lower.ends_with("ey")
        && !lower.ends_with("oy")
        && !lower.ends_with("uy")
    {
        format!("{}ies", &last[..last.len() - 1])
    } else {
        format!("{last}s")
    };

    format!("{stem}{plural_last}")
}

// Applies the capitalization of `original` to a lowercase replacement.
fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().all(|c| !c.is_lowercase()) {
        replacement.to_uppercase()
    } else if original.starts_with(char::is_uppercase) {
        capitalize(replacement)
    } else {
        replacement.to_string()
    }
}
