//! Editor state for the create/update form.
//!
//! The screen has a single editor: it is either blank (creating a new
//! offer) or bound to one persisted offer (updating it). Text inputs feed
//! the setters below, which sanitize numeric fields before they ever reach
//! the draft.

use crate::types::{Offer, OfferDraft, OfferId};

/// Strip everything but ASCII digits and `.` from numeric input.
pub fn sanitize_numeric(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

/// Parse the longest leading decimal number in `text`.
///
/// `"1.2.3"` parses as `1.2`. Returns `None` when the prefix holds no digit
/// or is too large to represent.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    text[..end].parse().ok().filter(|v: &f64| v.is_finite())
}

/// Render a numeric draft field back into its input box. Unset and zero
/// both render as an empty box.
pub fn field_text(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => v.to_string(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct OfferEditor {
    draft: OfferDraft,
    selected: Option<OfferId>,
    visible: bool,
}

impl OfferEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a blank editor for a new offer.
    pub fn open_new(&mut self) {
        self.selected = None;
        self.draft = OfferDraft::default();
        self.visible = true;
    }

    /// Show the editor bound to `offer`, prefilled with its fields.
    pub fn open_existing(&mut self, offer: &Offer) {
        self.selected = Some(offer.id.clone());
        self.draft = OfferDraft::from(offer);
        self.visible = true;
    }

    /// Hide the editor. The draft survives until the next `open_*`.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Discard draft and selection and hide the editor.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_title(&mut self, text: &str) {
        self.draft.title = Some(text.to_string());
    }

    pub fn set_description(&mut self, text: &str) {
        self.draft.description = Some(text.to_string());
    }

    /// Unparseable input becomes `0`, never unset.
    pub fn set_discount_percentage(&mut self, text: &str) {
        let value = parse_number(&sanitize_numeric(text)).unwrap_or(0.0);
        self.draft.discount_percentage = Some(value);
    }

    pub fn set_original_price(&mut self, text: &str) {
        self.draft.original_price = parse_number(&sanitize_numeric(text));
    }

    pub fn set_discounted_price(&mut self, text: &str) {
        self.draft.discounted_price = parse_number(&sanitize_numeric(text));
    }

    pub fn draft(&self) -> &OfferDraft {
        &self.draft
    }

    pub fn selected(&self) -> Option<&OfferId> {
        self.selected.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// True when submitting will update an existing offer.
    pub fn is_editing(&self) -> bool {
        self.selected.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Offer"
        } else {
            "Create Offer"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer() -> Offer {
        Offer {
            id: OfferId::parse("abc").unwrap(),
            title: "Shoes".to_string(),
            description: Some("Running".to_string()),
            discount_percentage: 20.0,
            original_price: 100.0,
            discounted_price: 80.0,
        }
    }

    #[test]
    fn sanitize_keeps_digits_and_dots() {
        assert_eq!(sanitize_numeric("12a%"), "12");
        assert_eq!(sanitize_numeric("$1,299.99"), "1299.99");
        assert_eq!(sanitize_numeric("abc"), "");
    }

    #[test]
    fn parse_number_takes_leading_prefix() {
        assert_eq!(parse_number("12"), Some(12.0));
        assert_eq!(parse_number("1.2.3"), Some(1.2));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("x1"), None);
        assert_eq!(parse_number(&"9".repeat(400)), None);
    }

    #[test]
    fn overflowing_price_stays_off_the_wire() {
        let mut editor = OfferEditor::new();
        editor.set_title("Yacht");
        editor.set_original_price(&"9".repeat(400));
        assert_eq!(editor.draft().original_price, None);
        let json = serde_json::to_value(editor.draft()).unwrap();
        assert!(json.get("originalPrice").is_none());
    }

    #[test]
    fn discount_falls_back_to_zero() {
        let mut editor = OfferEditor::new();
        editor.set_discount_percentage("12a%");
        assert_eq!(editor.draft().discount_percentage, Some(12.0));
        editor.set_discount_percentage("abc");
        assert_eq!(editor.draft().discount_percentage, Some(0.0));
    }

    #[test]
    fn prices_are_sanitized_and_unset_when_empty() {
        let mut editor = OfferEditor::new();
        editor.set_original_price("$100");
        editor.set_discounted_price("79.5 USD");
        assert_eq!(editor.draft().original_price, Some(100.0));
        assert_eq!(editor.draft().discounted_price, Some(79.5));
        editor.set_original_price("");
        assert_eq!(editor.draft().original_price, None);
    }

    #[test]
    fn open_existing_selects_and_prefills() {
        let mut editor = OfferEditor::new();
        editor.open_existing(&offer());
        assert!(editor.is_visible());
        assert!(editor.is_editing());
        assert_eq!(editor.selected().map(OfferId::as_str), Some("abc"));
        assert_eq!(editor.draft().title.as_deref(), Some("Shoes"));
        assert_eq!(editor.draft().original_price, Some(100.0));
        assert_eq!(editor.submit_label(), "Update Offer");
    }

    #[test]
    fn open_new_clears_previous_selection() {
        let mut editor = OfferEditor::new();
        editor.open_existing(&offer());
        editor.open_new();
        assert!(editor.is_visible());
        assert!(!editor.is_editing());
        assert!(editor.draft().is_empty());
        assert_eq!(editor.submit_label(), "Create Offer");
    }

    #[test]
    fn close_keeps_draft_reset_discards_it() {
        let mut editor = OfferEditor::new();
        editor.open_new();
        editor.set_title("Hat");
        editor.close();
        assert!(!editor.is_visible());
        assert_eq!(editor.draft().title.as_deref(), Some("Hat"));
        editor.reset();
        assert!(editor.draft().is_empty());
        assert!(editor.selected().is_none());
    }

    #[test]
    fn field_text_hides_zero() {
        assert_eq!(field_text(None), "");
        assert_eq!(field_text(Some(0.0)), "");
        assert_eq!(field_text(Some(12.0)), "12");
        assert_eq!(field_text(Some(79.5)), "79.5");
    }
}
