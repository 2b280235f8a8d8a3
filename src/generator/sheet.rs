//! Selector-keyed rule accumulator.

use std::collections::HashMap;

/// Rules grouped by selector, in the order each selector was first seen.
#[derive(Debug, Default)]
pub struct RuleSheet {
    groups: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl RuleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `rules` under `selector`. Nothing is recorded for an empty
    /// list.
    pub fn extend(&mut self, selector: &str, rules: impl IntoIterator<Item = String>) {
        let mut rules = rules.into_iter().peekable();
        if rules.peek().is_none() {
            return;
        }
        let slot = match self.index.get(selector) {
            Some(&i) => i,
            None => {
                self.groups.push((selector.to_owned(), Vec::new()));
                self.index.insert(selector.to_owned(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].1.extend(rules);
    }

    pub fn push(&mut self, selector: &str, rule: String) {
        self.extend(selector, std::iter::once(rule));
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Serialize the groups whose selector satisfies `keep`, one
    /// `selector { rule rule }` group per line.
    pub fn render(&self, keep: impl Fn(&str) -> bool) -> String {
        self.groups
            .iter()
            .filter(|(selector, _)| keep(selector))
            .map(|(selector, rules)| block(selector, rules))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `selector { a b c }`
pub fn block(selector: &str, rules: &[String]) -> String {
    format!("{selector} {{ {} }}", rules.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_in_first_seen_order() {
        let mut sheet = RuleSheet::new();
        sheet.push(".b", "x: 1;".into());
        sheet.push(".a", "y: 2;".into());
        sheet.push(".b", "z: 3;".into());
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.render(|_| true), ".b { x: 1; z: 3; }\n.a { y: 2; }");
    }

    #[test]
    fn test_empty_rules_add_nothing() {
        let mut sheet = RuleSheet::new();
        sheet.extend(".a", Vec::new());
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_render_filter() {
        let mut sheet = RuleSheet::new();
        sheet.push(":host", "a: 1;".into());
        sheet.push(".cell", "b: 2;".into());
        assert_eq!(sheet.render(|s| s.starts_with(":host")), ":host { a: 1; }");
        assert_eq!(sheet.render(|s| !s.starts_with(":host")), ".cell { b: 2; }");
    }
}
