//! Best-effort field lookup shared by every extraction plug-in.
//!
//! A missing element resolves to [`FieldValue::Unavailable`] instead of an
//! error, so one absent field never aborts the record around it.

use scraper::{ElementRef, Selector};

use fareprobe_core::FieldValue;

/// Compiles a selector literal.
///
/// # Panics
///
/// Panics if `css` is not a valid selector; only called with literals.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

/// Element text with each text node trimmed and the pieces joined without a
/// separator.
pub(crate) fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Text of the first `target` inside the first `container` under `scope`.
///
/// Only the first container is consulted: if it lacks a `target`, the field
/// is unavailable even when a later container would have one.
pub(crate) fn nested_text(
    scope: ElementRef<'_>,
    container: &Selector,
    target: &Selector,
) -> FieldValue {
    scope
        .select(container)
        .next()
        .and_then(|c| c.select(target).next())
        .map(stripped_text)
        .into()
}

/// Text of the first `target` under `scope`.
pub(crate) fn first_text(scope: ElementRef<'_>, target: &Selector) -> FieldValue {
    scope.select(target).next().map(stripped_text).into()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    const FRAGMENT: &str = r#"
        <div class="card">
          <div class="airline"><span>no heading</span></div>
          <div class="airline"><h2>Later</h2></div>
          <span class="pounds">
            <b>£</b> 1,234
          </span>
        </div>"#;

    #[test]
    fn stripped_text_joins_trimmed_pieces() {
        let doc = Html::parse_fragment(FRAGMENT);
        let field = first_text(doc.root_element(), &selector("span.pounds"));
        assert_eq!(field, FieldValue::Present("£1,234".to_string()));
    }

    #[test]
    fn nested_text_only_checks_first_container() {
        let doc = Html::parse_fragment(FRAGMENT);
        let field = nested_text(doc.root_element(), &selector("div.airline"), &selector("h2"));
        assert_eq!(field, FieldValue::Unavailable);
    }

    #[test]
    fn missing_target_is_unavailable() {
        let doc = Html::parse_fragment(FRAGMENT);
        let field = first_text(doc.root_element(), &selector("div.deal h4"));
        assert!(field.is_unavailable());
    }

    #[test]
    fn present_but_empty_element_is_not_unavailable() {
        let doc = Html::parse_fragment(r#"<div><h4 class="x">   </h4></div>"#);
        let field = first_text(doc.root_element(), &selector("h4.x"));
        assert_eq!(field, FieldValue::Present(String::new()));
    }
}
