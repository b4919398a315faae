//! Structural class-list composition for input-like widgets.
//!
//! The emitted tokens are matched by the stylesheet with plain string
//! equality, so both spelling and word order inside combined tokens
//! (`"left right icon"`) are fixed.

use std::fmt;

use indexmap::IndexSet;

pub const INPUT_BASE: [&str; 2] = ["ui", "input"];

/// What is attached before or after an input-like widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decoration {
    #[default]
    None,
    Icon,
    Label,
    Action,
}

impl Decoration {
    fn family(self) -> Option<&'static str> {
        match self {
            Decoration::None => None,
            Decoration::Icon => Some("icon"),
            Decoration::Label => Some("labeled"),
            Decoration::Action => Some("action"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Composition {
    pub prepend: Decoration,
    pub append: Decoration,
    pub fluid: bool,
}

impl Composition {
    pub fn new(prepend: Decoration, append: Decoration) -> Self {
        Self {
            prepend,
            append,
            fluid: false,
        }
    }

    pub fn with_fluid(mut self, fluid: bool) -> Self {
        self.fluid = fluid;
        self
    }
}

/// Ordered set of class tokens. A token may contain spaces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassList {
    tokens: IndexSet<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        list.extend(tokens);
        list
    }

    /// Returns `false` if the token was already present.
    pub fn push(&mut self, token: impl Into<String>) -> bool {
        self.tokens.insert(token.into())
    }

    pub fn extend<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            self.push(token);
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in &self.tokens {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
            first = false;
        }
        Ok(())
    }
}

/// Base tokens followed by one token per decoration family present, then
/// `fluid`. A family attached on both sides yields a single
/// `"left right <family>"` token.
pub fn class_list(base: &[&str], composition: &Composition) -> ClassList {
    let mut classes = ClassList::from_tokens(base.iter().copied());
    for kind in [Decoration::Icon, Decoration::Label, Decoration::Action] {
        let Some(family) = kind.family() else {
            continue;
        };
        let left = composition.prepend == kind;
        let right = composition.append == kind;
        let token = match (left, right) {
            (true, true) => format!("left right {family}"),
            (true, false) => format!("left {family}"),
            (false, true) => format!("right {family}"),
            (false, false) => continue,
        };
        classes.push(token);
    }
    if composition.fluid {
        classes.push("fluid");
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(prepend: Decoration, append: Decoration) -> ClassList {
        class_list(&INPUT_BASE, &Composition::new(prepend, append))
    }

    #[test]
    fn bare_input_only_has_base_tokens() {
        let list = class_list(&INPUT_BASE, &Composition::default());
        assert!(list.contains("ui"));
        assert!(list.contains("input"));
        assert_eq!(list.len(), 2);
        assert_eq!(list.to_string(), "ui input");
    }

    #[test]
    fn single_side_icons() {
        assert!(classes(Decoration::None, Decoration::Icon).contains("right icon"));
        assert!(classes(Decoration::Icon, Decoration::None).contains("left icon"));
    }

    #[test]
    fn icons_on_both_sides_combine() {
        let list = classes(Decoration::Icon, Decoration::Icon);
        assert!(list.contains("left right icon"));
        assert!(!list.contains("left icon"));
        assert!(!list.contains("right icon"));
        assert!(!list.contains("right left icon"));
    }

    #[test]
    fn labels_and_actions() {
        assert!(classes(Decoration::Label, Decoration::None).contains("left labeled"));
        assert!(classes(Decoration::None, Decoration::Label).contains("right labeled"));
        assert!(classes(Decoration::Label, Decoration::Label).contains("left right labeled"));
        assert!(classes(Decoration::Action, Decoration::None).contains("left action"));
        assert!(classes(Decoration::None, Decoration::Action).contains("right action"));
        assert!(classes(Decoration::Action, Decoration::Action).contains("left right action"));
    }

    #[test]
    fn mixed_families_combine_independently() {
        let list = classes(Decoration::Label, Decoration::Icon);
        assert_eq!(list.to_string(), "ui input right icon left labeled");
    }

    #[test]
    fn fluid_is_independent_of_decorations() {
        let composition = Composition::new(Decoration::Action, Decoration::None).with_fluid(true);
        let list = class_list(&INPUT_BASE, &composition);
        assert!(list.contains("fluid"));
        assert!(list.contains("left action"));
        let bare = class_list(&INPUT_BASE, &Composition::default().with_fluid(true));
        assert_eq!(bare.to_string(), "ui input fluid");
    }
}
