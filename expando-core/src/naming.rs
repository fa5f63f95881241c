//! Name derivation over concatenated capitalised words
//!
//! All functions here work on ordered `Vec`s so that the same input always
//! yields the same generated names.

/// Split an identifier into words at uppercase boundaries.
///
/// Runs of capitals are kept together as an acronym (`HTTPServer` becomes
/// `HTTP`, `Server`), underscores separate words and digits stay attached to
/// the word before them.
pub fn word_split(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Words of `child` left over once the word-suffix it shares with `parent`
/// is removed, compared position by position from the end.
///
/// `suffix_remainder("NavigationAction", "LevelUpgradeViewAction")` is
/// `["Navigation"]`.
pub fn suffix_remainder(child: &str, parent: &str) -> Vec<String> {
    let child_words = word_split(child);
    let parent_words = word_split(parent);
    let shared = child_words
        .iter()
        .rev()
        .zip(parent_words.iter().rev())
        .take_while(|(c, p)| c == p)
        .count();
    child_words[..child_words.len() - shared].to_vec()
}

pub fn initial_uppercased(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `OnUpgradeSuccess` -> `on_upgrade_success`
pub fn to_snake_case(name: &str) -> String {
    word_split(name)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// `level_upgrade_view_action` -> `LevelUpgradeViewAction`
pub fn to_upper_camel_case(name: &str) -> String {
    word_split(name)
        .iter()
        .map(|word| initial_uppercased(word))
        .collect()
}

/// Stem of a role's discriminator: the role name minus the words it shares
/// with the base as a suffix, or the whole role name when nothing is left.
pub fn role_stem(role: &str, base: &str) -> String {
    let remainder = suffix_remainder(role, base);
    if remainder.is_empty() {
        role.to_string()
    } else {
        remainder.concat()
    }
}

/// Name of the discriminator enum generated for `role`
pub fn discriminator_name(role: &str, base: &str, suffix: &str) -> String {
    format!("{}{}", role_stem(role, base), suffix)
}

/// Name of the classify method for a role discriminator stem
pub fn classifier_name(stem: &str) -> String {
    format!("{}_type", to_snake_case(stem))
}

/// Name of the boolean predicate for an enum case
pub fn case_predicate_name(case: &str) -> String {
    format!("is_{}", to_snake_case(case))
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod naming_tests;
