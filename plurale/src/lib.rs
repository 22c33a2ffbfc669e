//! English noun inflection for cased identifiers.
//!
//! [`pluralize`] and [`singularize`] operate on strings that have already
//! been run through a case transform (`adminUser`, `admin-user`, `AdminUser`)
//! and inflect only the final word. Irregular and uncountable nouns are
//! looked up before any suffix rule applies, and the case of the original
//! word is preserved in the replacement.

/// Irregular singular/plural pairs, consulted before suffix rules.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("criterion", "criteria"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("quiz", "quizzes"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Nouns with identical singular and plural forms.
const UNCOUNTABLE: &[&str] = &[
    "audio",
    "deer",
    "equipment",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "series",
    "sheep",
    "species",
    "staff",
    "traffic",
];

/// Nouns ending in `f`/`fe` whose plural takes `-ves`.
const F_TO_VES: &[&str] = &[
    "calf", "elf", "half", "knife", "leaf", "life", "loaf", "shelf", "thief", "wife", "wolf",
];

/// Nouns ending in `o` whose plural takes `-es`.
const O_TO_ES: &[&str] = &["echo", "hero", "potato", "tomato", "veto"];

/// Pluralizes the final word of `input`, preserving its case.
///
/// # Example
/// ```
/// assert_eq!(plurale::pluralize("admin"), "admins");
/// assert_eq!(plurale::pluralize("Person"), "People");
/// assert_eq!(plurale::pluralize("adminUser"), "adminUsers");
/// ```
pub fn pluralize(input: &str) -> String {
    inflect(input, plural_of)
}

/// Singularizes the final word of `input`, preserving its case.
///
/// # Example
/// ```
/// assert_eq!(plurale::singularize("admins"), "admin");
/// assert_eq!(plurale::singularize("People"), "Person");
/// ```
pub fn singularize(input: &str) -> String {
    inflect(input, singular_of)
}

fn inflect(input: &str, rule: fn(&str) -> Option<String>) -> String {
    let (head, word) = split_final_word(input);

    if word.is_empty() {
        return input.to_string();
    }

    let lower = word.to_lowercase();

    match rule(&lower) {
        Some(replacement) => format!("{}{}", head, match_case(&replacement, word)),
        None => input.to_string(),
    }
}

/// Returns the plural of a lowercase word, or `None` if it is unchanged.
fn plural_of(word: &str) -> Option<String> {
    if UNCOUNTABLE.contains(&word) {
        return None;
    }

    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return Some((*plural).to_string());
    }

    // already an irregular plural (e.g. "people")
    if IRREGULAR.iter().any(|(_, plural)| *plural == word) {
        return None;
    }

    if F_TO_VES.contains(&word) {
        let stem = word
            .strip_suffix("fe")
            .or_else(|| word.strip_suffix('f'))
            .unwrap_or(word);
        return Some(format!("{stem}ves"));
    }

    if word.ends_with("ss")
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return Some(format!("{word}es"));
    }

    if let Some(stem) = word.strip_suffix("is") {
        // analysis -> analyses
        return Some(format!("{stem}es"));
    }

    if word.ends_with("us") {
        // bus -> buses, status -> statuses
        return Some(format!("{word}es"));
    }

    if word.ends_with('s') {
        // any other trailing "s" is treated as already plural
        return None;
    }

    if let Some(stem) = word.strip_suffix('y') {
        if stem.chars().last().is_some_and(|c| !is_vowel(c)) {
            return Some(format!("{stem}ies"));
        }
    }

    if word.ends_with('o') && O_TO_ES.contains(&word) {
        return Some(format!("{word}es"));
    }

    Some(format!("{word}s"))
}

/// Returns the singular of a lowercase word, or `None` if it is unchanged.
fn singular_of(word: &str) -> Option<String> {
    if UNCOUNTABLE.contains(&word) {
        return None;
    }

    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == word) {
        return Some((*singular).to_string());
    }

    // already an irregular singular (e.g. "person")
    if IRREGULAR.iter().any(|(singular, _)| *singular == word) {
        return None;
    }

    if let Some(stem) = word.strip_suffix("ies") {
        return Some(format!("{stem}y"));
    }

    if let Some(stem) = word.strip_suffix("ves") {
        let fe_form = format!("{stem}fe");
        if F_TO_VES.contains(&fe_form.as_str()) {
            return Some(fe_form);
        }
        let f_form = format!("{stem}f");
        if F_TO_VES.contains(&f_form.as_str()) {
            return Some(f_form);
        }
        // not a known f-noun, fall through to plain "s" stripping
    }

    if let Some(stem) = word.strip_suffix("es") {
        if stem.ends_with("ss")
            || stem.ends_with('x')
            || stem.ends_with('z')
            || stem.ends_with("ch")
            || stem.ends_with("sh")
            || stem.ends_with("us")
            || O_TO_ES.contains(&stem)
        {
            return Some(stem.to_string());
        }
    }

    if word.ends_with("ss") {
        return None;
    }

    if let Some(stem) = word.strip_suffix('s') {
        return Some(stem.to_string());
    }

    None
}

/// Splits `input` before its final word: the trailing alphabetic run,
/// narrowed to the last camel hump so `adminUser` splits as `admin` / `User`.
fn split_final_word(input: &str) -> (&str, &str) {
    let mut run_start = 0;
    for (i, c) in input.char_indices() {
        if !c.is_alphabetic() {
            run_start = i + c.len_utf8();
        }
    }

    let mut word_start = run_start;
    let mut prev: Option<char> = None;
    for (i, c) in input[run_start..].char_indices() {
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase()) {
            word_start = run_start + i;
        }
        prev = Some(c);
    }

    (&input[..word_start], &input[word_start..])
}

/// Applies the case shape of `original` to `replacement`.
fn match_case(replacement: &str, original: &str) -> String {
    if original.chars().count() > 1 && original.chars().all(|c| c.is_uppercase()) {
        return replacement.to_uppercase();
    }

    if original.chars().next().is_some_and(|c| c.is_uppercase()) {
        let mut chars = replacement.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
    }

    replacement.to_string()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}
