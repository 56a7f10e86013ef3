//! Interactive numbered-menu selection

use colored::Colorize;
use dialoguer::Input;

use crate::error::{Error, Result};

/// Menu lines `[i] name (id: id)`, index right-aligned to the widest index.
pub fn menu_lines<'a>(entries: impl IntoIterator<Item = (&'a str, String)>) -> Vec<String> {
    let entries: Vec<_> = entries.into_iter().collect();
    let width = entries.len().to_string().len();
    entries
        .iter()
        .enumerate()
        .map(|(i, (name, id))| format!("[{:>width$}] {} (id: {})", i + 1, name, id, width = width))
        .collect()
}

/// 1-based menu choice as a 0-based index, if valid.
pub fn parse_choice(input: &str, count: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n - 1),
        _ => None,
    }
}

/// Let the user pick one of `items` from a menu sorted by name.
///
/// Invalid input prints `[!] Invalid choice: <input>` and asks again.
pub fn select_interactively<'a, T>(
    items: &'a [T],
    what: &str,
    name: impl Fn(&T) -> &str,
    id: impl Fn(&T) -> String,
) -> Result<&'a T> {
    if items.is_empty() {
        return Err(Error::Other(format!("No {} available", what)));
    }

    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| name(a).cmp(name(b)));

    for line in menu_lines(sorted.iter().map(|item| (name(*item), id(*item)))) {
        println!("{}", line);
    }

    let prompt = format!("Select the {} (1-{})", what, sorted.len());
    loop {
        let input: String = Input::new()
            .with_prompt(&prompt)
            .allow_empty(true)
            .interact_text()?;

        match parse_choice(&input, sorted.len()) {
            Some(index) => return Ok(sorted[index]),
            None => println!("{} Invalid choice: {}", "[!]".yellow(), input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_lines_small() {
        let lines = menu_lines(vec![("Linux", "12".to_string()), ("Windows", "7".to_string())]);
        assert_eq!(lines, vec!["[1] Linux (id: 12)", "[2] Windows (id: 7)"]);
    }

    #[test]
    fn test_menu_lines_are_right_aligned() {
        let names: Vec<String> = (0..12).map(|i| format!("g{}", i)).collect();
        let lines = menu_lines(names.iter().map(|n| (n.as_str(), "1".to_string())));

        assert_eq!(lines[0], "[ 1] g0 (id: 1)");
        assert_eq!(lines[11], "[12] g11 (id: 1)");
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice(" 3 ", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("abc", 3), None);
        assert_eq!(parse_choice("", 3), None);
    }

    #[test]
    fn test_select_empty_is_an_error() {
        let items: Vec<(String, u64)> = Vec::new();
        let err = select_interactively(&items, "agent group", |i| i.0.as_str(), |i| i.1.to_string())
            .unwrap_err();
        assert!(err.to_string().contains("No agent group available"));
    }
}
