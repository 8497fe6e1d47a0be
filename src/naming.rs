use std::borrow::Cow;

use serde::Serialize;

/// Template used when no pattern is configured or pattern naming is switched off.
pub const DEFAULT_TEMPLATE: &str = "image-{i}-split-{index}.png";

/// Substitution values for one slice.
///
/// `findex` and `sindex` are ranks among filtered and whitelisted slices; a
/// missing rank substitutes as the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NameVars {
    pub i: usize,
    pub index: usize,
    pub w: u32,
    pub h: u32,
    pub findex: Option<usize>,
    pub sindex: Option<usize>,
}

/// A file-name template holding `{i}`, `{index}`, `{w}`, `{h}`, `{findex}` and `{sindex}` tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate(String);

impl NameTemplate {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// Picks `pattern` when it is enabled and non-empty, else [`DEFAULT_TEMPLATE`].
    pub fn resolve(pattern: &str, use_pattern: bool) -> Self {
        if use_pattern && !pattern.is_empty() {
            Self::new(pattern)
        } else {
            Self::default()
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitutes every token once, in the order `i`, `index`, `w`, `h`, `findex`, `sindex`.
    ///
    /// Only the first occurrence of each token is replaced; later copies stay literal.
    ///
    /// # Example
    /// ```
    /// use gridcut::{NameTemplate, NameVars};
    ///
    /// let template = NameTemplate::new("image-{i}-{index}-{i}.png");
    /// let vars = NameVars { i: 0, index: 3, ..Default::default() };
    /// assert_eq!(template.format(&vars), "image-0-3-{i}.png");
    /// ```
    pub fn format(&self, vars: &NameVars) -> String {
        let rank = |value: Option<usize>| value.map(|v| v.to_string()).unwrap_or_default();
        let substitutions = [
            ("{i}", vars.i.to_string()),
            ("{index}", vars.index.to_string()),
            ("{w}", vars.w.to_string()),
            ("{h}", vars.h.to_string()),
            ("{findex}", rank(vars.findex)),
            ("{sindex}", rank(vars.sindex)),
        ];
        substitutions
            .iter()
            .fold(Cow::Borrowed(self.0.as_str()), |name, (token, value)| {
                if name.contains(token) {
                    Cow::Owned(name.replacen(token, value, 1))
                } else {
                    name
                }
            })
            .into_owned()
    }
}

impl Default for NameTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_only_first_occurrence_is_replaced() {
        let template = NameTemplate::new("image-{i}-{index}-{i}.png");
        let vars = NameVars {
            i: 0,
            index: 3,
            ..Default::default()
        };
        assert_eq!(template.format(&vars), "image-0-3-{i}.png");
    }

    #[test]
    fn test_all_tokens() {
        let template = NameTemplate::new("{i}/{index}_{w}x{h}_{findex}_{sindex}.png");
        let vars = NameVars {
            i: 1,
            index: 7,
            w: 320,
            h: 200,
            findex: Some(4),
            sindex: Some(2),
        };
        assert_eq!(template.format(&vars), "1/7_320x200_4_2.png");
    }

    #[test]
    fn test_missing_ranks_become_empty() {
        let template = NameTemplate::new("s{sindex}-f{findex}.png");
        assert_eq!(template.format(&NameVars::default()), "s-f.png");
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        assert_eq!(NameTemplate::resolve("", true), NameTemplate::default());
        assert_eq!(NameTemplate::resolve("x-{i}.png", false).as_str(), DEFAULT_TEMPLATE);
        assert_eq!(NameTemplate::resolve("x-{i}.png", true).as_str(), "x-{i}.png");
        // Only the empty string falls back
        assert_eq!(NameTemplate::resolve("  ", true).as_str(), "  ");
    }

    #[test]
    fn test_default_template() {
        let vars = NameVars {
            i: 0,
            index: 2,
            w: 50,
            h: 50,
            ..Default::default()
        };
        assert_eq!(NameTemplate::default().format(&vars), "image-0-split-2.png");
    }
}
