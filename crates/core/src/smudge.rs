//! # Smudge Rules
//!
//! Locale-specific rewrites that canonicalize known, accepted deviations of
//! a translation before placeholders are compared.
//!
//! Rules are grouped into a [`LocaleProfile`] per locale and looked up in an
//! immutable [`SmudgeRegistry`]. The registry shipped with the tool is built
//! once from the tables in [`locales`]; tests and embedders can build their
//! own with [`SmudgeRegistry::builder`].

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

pub mod locales;

#[cfg(test)]
#[path = "smudge_tests.rs"]
mod tests;

lazy_static! {
    static ref BUILTIN_REGISTRY: SmudgeRegistry = locales::builtin_registry();
}

/// What a rule looks for.
#[derive(Debug, Clone)]
pub enum SmudgePattern {
    /// Plain substring, every occurrence is replaced
    Literal(String),

    /// Regular expression; the replacement may refer to capture groups
    Regex(Regex),
}

/// One rewrite of a locale.
#[derive(Debug, Clone)]
pub struct SmudgeRule {
    pub pattern: SmudgePattern,
    pub replacement: String,

    /// Apply the rule to the original string instead of the translation
    pub reverse: bool,
}

impl SmudgeRule {
    /// A rule replacing the substring `pattern` in translations.
    pub fn literal(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: SmudgePattern::Literal(pattern.into()),
            replacement: replacement.into(),
            reverse: false,
        }
    }

    /// A rule replacing matches of `pattern` in translations.
    pub fn regex(pattern: Regex, replacement: impl Into<String>) -> Self {
        Self {
            pattern: SmudgePattern::Regex(pattern),
            replacement: replacement.into(),
            reverse: false,
        }
    }

    /// The same rule, applied to the original string instead.
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Rewrites `text` with this rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use l10n_guard_core::smudge::SmudgeRule;
    ///
    /// let rule = SmudgeRule::literal("z.B.", "e.g.");
    /// assert_eq!(rule.apply("z.B. git log"), "e.g. git log");
    /// ```
    pub fn apply(&self, text: &str) -> String {
        match &self.pattern {
            SmudgePattern::Literal(literal) => text.replace(literal.as_str(), &self.replacement),
            SmudgePattern::Regex(regex) => regex
                .replace_all(text, self.replacement.as_str())
                .into_owned(),
        }
    }
}

/// The rules of one locale.
#[derive(Debug, Clone)]
pub struct LocaleProfile {
    /// Rules in application order
    pub rules: Vec<SmudgeRule>,

    /// Whether keep words of translations are checked for being fragments of
    /// larger words
    pub fragment_filter: bool,
}

impl Default for LocaleProfile {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            fragment_filter: true,
        }
    }
}

/// Immutable lookup of locale profiles.
#[derive(Debug, Clone, Default)]
pub struct SmudgeRegistry {
    profiles: HashMap<String, LocaleProfile>,
}

/// Collects locale profiles for a [`SmudgeRegistry`].
#[derive(Debug, Default)]
pub struct SmudgeRegistryBuilder {
    profiles: HashMap<String, LocaleProfile>,
}

impl SmudgeRegistryBuilder {
    /// Appends `rules` to the profile of `locale`.
    pub fn rules(mut self, locale: &str, rules: Vec<SmudgeRule>) -> Self {
        self.profiles
            .entry(locale.to_string())
            .or_default()
            .rules
            .extend(rules);
        self
    }

    /// Disables the fragment filter for `locale`.
    pub fn without_fragment_filter(mut self, locale: &str) -> Self {
        self.profiles
            .entry(locale.to_string())
            .or_default()
            .fragment_filter = false;
        self
    }

    pub fn build(self) -> SmudgeRegistry {
        SmudgeRegistry {
            profiles: self.profiles,
        }
    }
}

impl SmudgeRegistry {
    pub fn builder() -> SmudgeRegistryBuilder {
        SmudgeRegistryBuilder::default()
    }

    /// The registry with the tables shipped with the tool.
    pub fn builtin() -> &'static SmudgeRegistry {
        &BUILTIN_REGISTRY
    }

    /// The profile of `locale`, falling back to its language (`pt` for
    /// `pt_BR`).
    pub fn profile(&self, locale: &str) -> Option<&LocaleProfile> {
        self.profiles.get(locale).or_else(|| {
            let language = locale.split(|c| c == '_' || c == '@').next()?;
            self.profiles.get(language)
        })
    }

    /// Whether the fragment filter applies to translations of `locale`.
    pub fn fragment_filter(&self, locale: &str) -> bool {
        self.profile(locale).map_or(true, |p| p.fragment_filter)
    }

    /// Applies the rules of `locale` to a message pair.
    ///
    /// Each rule rewrites the translation, or the original string when it is
    /// reversed. Locales without rules leave both strings unchanged.
    ///
    /// # Returns
    ///
    /// The normalized `(msgid, msgstr)` pair
    pub fn normalize(&self, locale: &str, msgid: &str, msgstr: &str) -> (String, String) {
        let mut msgid = msgid.to_string();
        let mut msgstr = msgstr.to_string();
        if let Some(profile) = self.profile(locale) {
            for rule in &profile.rules {
                if rule.reverse {
                    msgid = rule.apply(&msgid);
                } else {
                    msgstr = rule.apply(&msgstr);
                }
            }
        }
        (msgid, msgstr)
    }
}
