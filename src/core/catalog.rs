use crate::domain::ports::RandomSource;
use crate::utils::error::{DesignCodeError, Result};
use crate::utils::validation::validate_non_empty_string;

const BUILTIN: &[(&str, &[&str])] = &[
    (
        "color",
        &[
            "color change",
            "primary color update",
            "secondary palette refinement",
            "accent color adjustment",
            "color contrast fix",
            "dark mode color tweak",
            "color palette expansion",
            "brand color alignment",
            "surface color update",
            "semantic color token fix",
        ],
    ),
    (
        "brand",
        &[
            "brand token change",
            "brand font update",
            "brand spacing alignment",
            "brand asset refresh",
            "brand guideline sync",
        ],
    ),
    (
        "typography",
        &[
            "typography scale update",
            "font weight adjustment",
            "line height refinement",
            "heading hierarchy fix",
            "body text improvement",
            "font family swap",
            "letter spacing tweak",
        ],
    ),
    (
        "spacing",
        &[
            "spacing token update",
            "padding consistency fix",
            "margin alignment",
            "grid gap adjustment",
            "layout spacing refinement",
            "section spacing update",
        ],
    ),
    (
        "components",
        &[
            "button style update",
            "input field refinement",
            "card component update",
            "modal design update",
            "tooltip design tweak",
            "navigation styling fix",
            "dropdown menu update",
            "checkbox style refresh",
            "tab component refinement",
            "badge design update",
        ],
    ),
    (
        "ui_fixes",
        &[
            "UI fixes",
            "hover state fix",
            "focus ring update",
            "active state refinement",
            "disabled state styling",
            "responsive layout tweak",
            "border radius update",
            "shadow refinement",
            "z-index adjustment",
            "overflow fix",
            "alignment correction",
            "visual regression fix",
        ],
    ),
    (
        "motion",
        &[
            "animation duration update",
            "transition easing change",
            "micro-interaction refinement",
            "loading animation tweak",
            "scroll animation fix",
        ],
    ),
    (
        "accessibility",
        &[
            "accessibility contrast fix",
            "focus indicator update",
            "screen reader label add",
            "aria attribute update",
            "keyboard navigation fix",
        ],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick<'a> {
    pub category: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Group {
    category: String,
    messages: Vec<String>,
}

/// Commit messages grouped by category. Every group is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    groups: Vec<Group>,
}

impl Catalog {
    pub fn builtin() -> Self {
        let groups = BUILTIN
            .iter()
            .map(|(category, messages)| Group {
                category: category.to_string(),
                messages: messages.iter().map(|m| m.to_string()).collect(),
            })
            .collect();
        Self { groups }
    }

    pub fn from_groups<I, C, M>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, Vec<M>)>,
        C: Into<String>,
        M: Into<String>,
    {
        let mut built = Vec::new();
        for (category, messages) in groups {
            let category = category.into();
            validate_non_empty_string("messages", &category)?;
            let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
            if messages.is_empty() {
                return Err(DesignCodeError::config(format!(
                    "message category '{}' has no messages",
                    category
                )));
            }
            for message in &messages {
                validate_non_empty_string(&format!("messages.{}", category), message)?;
            }
            built.push(Group { category, messages });
        }

        if built.is_empty() {
            return Err(DesignCodeError::config("message catalog is empty"));
        }
        Ok(Self { groups: built })
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.category.as_str())
    }

    pub fn messages(&self, category: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.messages.as_slice())
    }

    pub fn total_messages(&self) -> usize {
        self.groups.iter().map(|g| g.messages.len()).sum()
    }

    /// Uniform category first, then a uniform message inside it.
    pub fn pick<R: RandomSource>(&self, rng: &mut R) -> Pick<'_> {
        let group = &self.groups[rng.uniform_int(0, self.groups.len() as u64 - 1) as usize];
        let message = &group.messages[rng.uniform_int(0, group.messages.len() as u64 - 1) as usize];
        Pick {
            category: &group.category,
            message,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
