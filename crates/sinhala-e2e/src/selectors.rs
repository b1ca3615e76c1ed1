//! Selector abstraction for the target page.
//!
//! The transliteration UI is an external contract: the input control is
//! reachable only by its placeholder text, and the output region by a card
//! whose displayed text includes the "Sinhala" label, with the rendered text
//! in a nested node carrying a structural class. Those couplings are brittle,
//! so they live behind [`SelectorProvider`] and never leak into case logic.

/// Selector for locating an element, compiled to a JS query expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g. `"textarea.input"`)
    Css(String),
    /// Element carrying an exact `placeholder` attribute
    Placeholder(String),
    /// Child of the first container matching `container_css` whose text
    /// content includes `label`
    LabeledContainer {
        /// Container CSS selector
        container_css: String,
        /// Text the container must display
        label: String,
        /// CSS selector for the nested element
        child_css: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a placeholder selector
    #[must_use]
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self::Placeholder(text.into())
    }

    /// Convert to a JS expression that evaluates to the element or `null`
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::Placeholder(text) => {
                format!("document.querySelector(`[placeholder={text:?}]`)")
            }
            Self::LabeledContainer {
                container_css,
                label,
                child_css,
            } => format!(
                "(() => {{ const c = Array.from(document.querySelectorAll({container_css:?})).find(el => el.textContent.includes({label:?})); return c ? c.querySelector({child_css:?}) : null; }})()"
            ),
        }
    }

    /// JS expression evaluating to `true` when the element exists and is
    /// rendered (participates in layout)
    #[must_use]
    pub fn to_visibility_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; return !!el && el.offsetParent !== null; }})()",
            self.to_query()
        )
    }

    /// JS expression evaluating to the element's rendered text, or `null`
    /// when the element is absent
    #[must_use]
    pub fn to_text_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; return el ? (el.innerText ?? el.textContent ?? '') : null; }})()",
            self.to_query()
        )
    }

    /// JS expression that fills the element with `text` and fires an `input`
    /// event so debounced listeners run; evaluates to `true` on success
    #[must_use]
    pub fn to_fill_query(&self, text: &str) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; el.value = {text:?}; el.dispatchEvent(new Event('input', {{ bubbles: true }})); return true; }})()",
            self.to_query()
        )
    }
}

/// Where to find the input control and the output region on the target page.
///
/// Implementations must be re-derived per target UI; swapping the provider
/// must not touch the driver or runner.
pub trait SelectorProvider: Send + Sync {
    /// Selector for the Singlish input control
    fn input(&self) -> Selector;

    /// Selector for the Sinhala output region
    fn output(&self) -> Selector;
}

/// Placeholder text on the Singlish input control
pub const INPUT_PLACEHOLDER: &str = "Input Your Singlish Text Here.";

/// Displayed label on the output card
pub const OUTPUT_CARD_LABEL: &str = "Sinhala";

/// Selectors for the current Singlish transliteration page.
///
/// Output structure on the page:
/// `<div class="card">…<div class="panel-title mb-2">Sinhala</div>
/// <div class="whitespace-pre-wrap …">…</div>…</div>`
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglishPageSelectors;

impl SelectorProvider for SinglishPageSelectors {
    fn input(&self) -> Selector {
        Selector::placeholder(INPUT_PLACEHOLDER)
    }

    fn output(&self) -> Selector {
        Selector::LabeledContainer {
            container_css: ".card".to_string(),
            label: OUTPUT_CARD_LABEL.to_string(),
            child_css: ".whitespace-pre-wrap".to_string(),
        }
    }
}
