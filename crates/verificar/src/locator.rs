//! Selectors for locating elements on a page.
//!
//! Selectors compile to JavaScript query expressions evaluated in the page,
//! covering the three ways the verification scripts address elements: CSS,
//! visible text content, and accessible role + name.

use serde::{Deserialize, Serialize};

/// Selector for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Selector {
    /// CSS selector (e.g., ".ant-modal-content")
    #[serde(rename = "css")]
    Css {
        /// CSS selector string
        css: String,
    },
    /// Visible text content selector
    #[serde(rename = "text")]
    Text {
        /// Text content to match
        text: String,
    },
    /// Accessible role + name selector (e.g., button "Connect Wallet")
    #[serde(rename = "role")]
    Role {
        /// ARIA role
        role: String,
        /// Accessible name (matched against text content)
        name: String,
    },
    /// CSS selector filtered by text content
    #[serde(rename = "css_with_text")]
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(css: impl Into<String>) -> Self {
        Self::Css { css: css.into() }
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a role + name selector
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: name.into(),
        }
    }

    /// Create a button selector by accessible name
    #[must_use]
    pub fn button(name: impl Into<String>) -> Self {
        Self::role("button", name)
    }

    /// Filter a CSS selector by text content
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        match self {
            Self::Css { css } => Self::CssWithText {
                css,
                text: text.into(),
            },
            other => other,
        }
    }

    /// JavaScript expression resolving to the matched element (or undefined).
    ///
    /// Text and role selectors prefer the last (deepest) visible match so a
    /// click lands on the actual control rather than an ancestor container.
    #[must_use]
    pub fn to_find_query(&self) -> String {
        match self {
            Self::Css { css } => format!("document.querySelector({css:?})"),
            Self::Text { text } => format!(
                "(() => {{ const els = Array.from(document.querySelectorAll('*'))\
                 .filter(el => el.textContent.includes({text:?})); \
                 return els[els.length - 1]; }})()"
            ),
            Self::Role { role, name } => {
                let css = format!("{role}, [role={role:?}]");
                format!(
                    "(() => {{ const els = Array.from(document.querySelectorAll({css:?}))\
                     .filter(el => el.textContent.trim().includes({name:?}) \
                     && el.offsetParent !== null); \
                     return els[0]; }})()"
                )
            }
            Self::CssWithText { css, text } => format!(
                "(() => {{ const els = Array.from(document.querySelectorAll({css:?}))\
                 .filter(el => el.textContent.includes({text:?})); \
                 return els[els.length - 1]; }})()"
            ),
        }
    }

    /// JavaScript expression resolving to `true` when a match is visible
    #[must_use]
    pub fn to_visible_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; \
             return !!el && !!(el.offsetParent || el.getClientRects().length); }})()",
            self.to_find_query()
        )
    }

    /// JavaScript expression clicking a match, resolving to `true` on success
    #[must_use]
    pub fn to_click_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; \
             if (!el) return false; el.click(); return true; }})()",
            self.to_find_query()
        )
    }

    /// The string a page must contain for this selector to match.
    ///
    /// Used by the mock page to decide visibility without a DOM.
    #[must_use]
    pub fn needle(&self) -> &str {
        match self {
            Self::Css { css } => css,
            Self::Text { text } | Self::CssWithText { text, .. } => text,
            Self::Role { name, .. } => name,
        }
    }

    /// Human-readable description for reports and error messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Css { css } => format!("element {css:?}"),
            Self::Text { text } => format!("text {text:?}"),
            Self::Role { role, name } => format!("{role} {name:?}"),
            Self::CssWithText { css, text } => format!("element {css:?} with text {text:?}"),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod constructor_tests {
        use super::*;

        #[test]
        fn test_css_selector() {
            let sel = Selector::css(".ant-modal-content");
            assert_eq!(sel.needle(), ".ant-modal-content");
        }

        #[test]
        fn test_text_selector() {
            let sel = Selector::text("Create Tracking");
            assert_eq!(sel.needle(), "Create Tracking");
        }

        #[test]
        fn test_button_selector() {
            let sel = Selector::button("Connect Wallet");
            assert_eq!(
                sel,
                Selector::Role {
                    role: "button".to_string(),
                    name: "Connect Wallet".to_string(),
                }
            );
        }

        #[test]
        fn test_with_text_combines_css() {
            let sel = Selector::css("button").with_text("Cancel");
            assert_eq!(
                sel,
                Selector::CssWithText {
                    css: "button".to_string(),
                    text: "Cancel".to_string(),
                }
            );
        }

        #[test]
        fn test_with_text_leaves_non_css_untouched() {
            let sel = Selector::text("SupplyChain").with_text("ignored");
            assert_eq!(sel, Selector::text("SupplyChain"));
        }
    }

    mod query_tests {
        use super::*;

        #[test]
        fn test_css_find_query() {
            let q = Selector::css("body").to_find_query();
            assert_eq!(q, "document.querySelector(\"body\")");
        }

        #[test]
        fn test_text_find_query_contains_needle() {
            let q = Selector::text("MetaMask Not Found").to_find_query();
            assert!(q.contains("MetaMask Not Found"));
            assert!(q.contains("textContent.includes"));
        }

        #[test]
        fn test_visible_query_checks_rects() {
            let q = Selector::text("SupplyChain").to_visible_query();
            assert!(q.contains("offsetParent"));
            assert!(q.contains("getClientRects"));
        }

        #[test]
        fn test_click_query_clicks() {
            let q = Selector::button("Add Tracking").to_click_query();
            assert!(q.contains("el.click()"));
            assert!(q.contains("Add Tracking"));
        }
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn test_yaml_round_trip() {
            let sel = Selector::button("Connect Wallet");
            let yaml = serde_yaml_ng::to_string(&sel).unwrap();
            let back: Selector = serde_yaml_ng::from_str(&yaml).unwrap();
            assert_eq!(sel, back);
        }

        #[test]
        fn test_yaml_tagged_form() {
            let sel: Selector = serde_yaml_ng::from_str("type: text\ntext: SupplyChain\n").unwrap();
            assert_eq!(sel, Selector::text("SupplyChain"));
        }
    }
}
