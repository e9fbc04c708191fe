//! Argument group building.
//! Folds flat `NAME=VALUE` tokens into an ordered sequence of groups, each
//! closed by a separator token.

use indexmap::IndexMap;

use crate::constants::GROUP_SEPARATOR;
use crate::mapping::{Mapping, Value};

/// One complete name to value mapping applied in one substitution pass.
///
/// A `None` value means the name was given without `=`: present, but valueless.
pub type ArgumentGroup = IndexMap<String, Option<String>>;

/// Splits a single token on its first `=`.
pub fn parse_pair(token: &str) -> (String, Option<String>) {
    match token.split_once('=') {
        Some((name, value)) => (name.to_string(), Some(value.to_string())),
        None => (token.to_string(), None),
    }
}

/// Folds tokens into groups; every separator closes the current group.
///
/// Always yields at least one (possibly empty) group.
pub fn fold_groups<I, S>(tokens: I) -> Vec<ArgumentGroup>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups = Vec::new();
    let mut current = ArgumentGroup::new();

    for token in tokens {
        let token = token.as_ref();
        if token == GROUP_SEPARATOR {
            groups.push(std::mem::take(&mut current));
        } else {
            let (name, value) = parse_pair(token);
            current.insert(name, value);
        }
    }
    groups.push(current);

    groups
}

/// Builds the argument groups of one invocation.
///
/// # Arguments
/// * `positional` - Leftover positional tokens, `--` separated
/// * `explicit` - Tokens collected from `--arg`/`--next`, in command-line order
///
/// # Returns
/// * `Vec<ArgumentGroup>` - The explicit tokens' groups when any were given,
///   otherwise the positional ones (a single leading `--` is dropped)
pub fn build_groups<S: AsRef<str>>(
    positional: &[S],
    explicit: Option<&[S]>,
) -> Vec<ArgumentGroup> {
    match explicit {
        Some(tokens) if !tokens.is_empty() => fold_groups(tokens),
        _ => {
            let tokens = match positional.first() {
                Some(first) if first.as_ref() == GROUP_SEPARATOR => &positional[1..],
                _ => positional,
            };
            fold_groups(tokens)
        }
    }
}

/// Copies a group into a template mapping.
pub fn to_mapping(group: &ArgumentGroup) -> Mapping {
    group
        .iter()
        .map(|(name, value)| (name.clone(), Value::from(value.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_duplicate_replaces_value() {
        let groups = fold_groups(["a=1", "a=2"]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].get("a"), Some(&Some("2".to_string())));
    }

    #[test]
    fn test_to_mapping_keeps_unset() {
        let groups = fold_groups(["flag", "name=x"]);
        let mapping = to_mapping(&groups[0]);
        assert_eq!(mapping.get("flag"), Some(&Value::Unset));
        assert_eq!(mapping.get("name"), Some(&Value::from("x")));
    }
}
