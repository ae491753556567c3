//! Edit transactions for card entry fields.
//!
//! A text-input widget reports each proposed edit as a range of the current
//! text plus a replacement string. [`propose_edit`] decides what happens to
//! it without touching any state: accept it (with the reformatted text and
//! caret), reject it, forward it to the next field, or ask to move back to the
//! previous field.
//!
//! [`CardEntryField`] wraps that decision in a small stateful field holding
//! the committed text and an optional [`FieldDelegate`].
//!
//! # Example
//!
//! ```
//! use card_entry::{CardEntryField, EditDecision, ExpirationFormat, FixedCalendar};
//!
//! let mut field = CardEntryField::new(ExpirationFormat::new(FixedCalendar::new(25, 3).unwrap()));
//!
//! field.insert_text("2");
//! assert_eq!(field.text(), "02/");
//!
//! field.insert_text("7");
//! field.insert_text("9");
//! assert_eq!(field.text(), "02/");
//! assert!(matches!(field.insert_text("2"), EditDecision::Accept { .. }));
//! assert_eq!(field.text(), "02/2");
//! ```

use std::fmt;

use zeroize::Zeroize;

use crate::calendar::Calendar;
use crate::config::FieldConfig;
use crate::error::EditError;
use crate::expiry::{ExpirationFields, ExpirationFormat};
use crate::filter::{char_len, filter_to_alphabet, strip_formatting, Selection};
use crate::format::Formatted;
use crate::mask::mask_text;
use crate::validity::ValidityState;

/// Formatting and validation rules of one kind of field.
pub trait FieldFormat {
    /// The field's configuration.
    fn config(&self) -> &FieldConfig;

    /// Formats an unformatted value, remapping the caret.
    fn reformat(&self, unformatted: &str, cursor: usize) -> Formatted;

    /// Classifies an unformatted value.
    fn classify(&self, unformatted: &str) -> ValidityState;

    /// Text shown while the field is empty.
    fn placeholder(&self) -> &str {
        ""
    }

    /// Hook applied to an edit after it is spliced in and before reformatting.
    fn adjust_edit<'a>(&self, edit: TentativeEdit<'a>) -> TentativeEdit<'a> {
        edit
    }

    /// `text` with everything but input characters removed.
    fn unformatted(&self, text: &str) -> String {
        let config = self.config();
        strip_formatting(text, |c| config.is_input(c))
    }

    /// Strips, reformats and classifies `text` from scratch.
    ///
    /// The result may be [`ValidityState::Impossible`]; see [`Self::process`]
    /// for the checked version.
    fn on_text_changed(&self, text: &str, cursor: usize) -> Reformatted {
        let config = self.config();
        let (unformatted, cursor) = filter_to_alphabet(text, cursor, |c| config.is_input(c));
        let formatted = self.reformat(&unformatted, cursor);
        let unformatted = self.unformatted(&formatted.text);
        Reformatted {
            length: char_len(&unformatted),
            validity: self.classify(&unformatted),
            text: formatted.text,
            cursor: formatted.cursor,
        }
    }

    /// Like [`Self::on_text_changed`], but fails when the result is too long or
    /// can never become valid.
    fn process(&self, text: &str, cursor: usize) -> Result<Reformatted, EditError> {
        let reformatted = self.on_text_changed(text, cursor);
        let maximum = self.config().max_length;
        if reformatted.length > maximum {
            return Err(EditError::LengthExceeded {
                length: reformatted.length,
                maximum,
            });
        }
        if reformatted.validity.is_impossible() {
            return Err(EditError::ImpossibleDate);
        }
        Ok(reformatted)
    }

    /// Returns true if `text` holds a complete, valid value.
    fn is_complete(&self, text: &str) -> bool {
        let unformatted = self.unformatted(text);
        char_len(&unformatted) == self.config().max_length && self.classify(&unformatted).is_valid()
    }
}

impl<F: FieldFormat + ?Sized> FieldFormat for &F {
    fn config(&self) -> &FieldConfig {
        (**self).config()
    }

    fn reformat(&self, unformatted: &str, cursor: usize) -> Formatted {
        (**self).reformat(unformatted, cursor)
    }

    fn classify(&self, unformatted: &str) -> ValidityState {
        (**self).classify(unformatted)
    }

    fn placeholder(&self) -> &str {
        (**self).placeholder()
    }

    fn adjust_edit<'a>(&self, edit: TentativeEdit<'a>) -> TentativeEdit<'a> {
        (**self).adjust_edit(edit)
    }
}

/// An edit spliced into the text but not yet reformatted or validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TentativeEdit<'a> {
    /// Text after the splice.
    pub text: String,
    /// Caret after the splice.
    pub cursor: usize,
    /// The range that was replaced, in the pre-edit text.
    pub range: Selection,
    /// The inserted string.
    pub replacement: &'a str,
}

/// Output of reformatting a field's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reformatted {
    /// Formatted display text.
    pub text: String,
    /// Caret offset in chars.
    pub cursor: usize,
    /// Classification of the unformatted value.
    pub validity: ValidityState,
    /// Unformatted length.
    pub length: usize,
}

/// Committed text of a field plus its selection.
///
/// Zeroized on drop; `Debug` masks the text.
#[derive(Clone, Default, PartialEq, Eq, Zeroize)]
pub struct FieldState {
    /// Displayed text.
    pub text: String,
    /// Current selection or caret.
    pub selection: Selection,
}

impl FieldState {
    /// A state with the given text and selection (clamped to the text).
    pub fn new(text: impl Into<String>, selection: Selection) -> Self {
        let text = text.into();
        let selection = selection.clamped(char_len(&text));
        Self { text, selection }
    }

    /// A state with the caret at the end of `text`.
    pub fn with_caret_at_end(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = char_len(&text);
        Self {
            text,
            selection: Selection::caret(end),
        }
    }
}

impl fmt::Debug for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldState")
            .field("text", &mask_text(&self.text, |c| c.is_alphanumeric()))
            .field("selection", &self.selection)
            .finish()
    }
}

impl Drop for FieldState {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Outcome of a proposed edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditDecision {
    /// Commit this text and selection.
    Accept {
        /// Reformatted text.
        text: String,
        /// Selection after the edit (always a caret).
        selection: Selection,
        /// Classification of the new value.
        validity: ValidityState,
    },
    /// Keep the previous state and signal invalid input.
    Reject(EditError),
    /// The field is already complete; hand the input to the next field.
    ForwardToNext(String),
    /// Backspace in an empty field; move to the previous field.
    NavigateToPrevious,
    /// Nothing to do (vetoed by a delegate, or nothing to delete).
    Ignored,
}

impl EditDecision {
    /// Returns true for [`EditDecision::Accept`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept { .. })
    }

    /// Returns true for [`EditDecision::Reject`].
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Reject(_))
    }
}

/// Decides the outcome of replacing `range` of `state.text` with `replacement`.
///
/// Out-of-range offsets are clamped to the text. The steps are:
///
/// 1. inserting at the end of an already complete field forwards the input;
/// 2. replacement characters outside both character sets reject the edit;
/// 3. a single-character deletion over a formatting character with a caret
///    selection also deletes the character before it;
/// 4. with `deleting_removes_trailing`, a non-empty range drops everything
///    after it;
/// 5. the edit is spliced in, passed through
///    [`FieldFormat::adjust_edit`], then reformatted and classified.
///    Results that are too long or impossible are rejected.
///
/// # Example
///
/// ```
/// use card_entry::field::{propose_edit, FieldState};
/// use card_entry::{EditDecision, ExpirationFormat, FixedCalendar, Selection, ValidityState};
///
/// let format = ExpirationFormat::new(FixedCalendar::new(25, 3).unwrap());
/// let state = FieldState::with_caret_at_end("");
///
/// assert_eq!(
///     propose_edit(&format, &state, Selection::caret(0), "2"),
///     EditDecision::Accept {
///         text: "02/".to_string(),
///         selection: Selection::caret(3),
///         validity: ValidityState::Incomplete,
///     }
/// );
/// ```
pub fn propose_edit<F>(format: &F, state: &FieldState, range: Selection, replacement: &str) -> EditDecision
where
    F: FieldFormat + ?Sized,
{
    let config = format.config();
    let len = char_len(&state.text);
    let mut range = range.clamped(len);

    if range.start == len && !replacement.is_empty() && format.is_complete(&state.text) {
        tracing::trace!(length = char_len(replacement), "forwarding input to next field");
        return EditDecision::ForwardToNext(replacement.to_string());
    }

    if let Err(error) = config.accepts(replacement) {
        tracing::debug!(%error, "edit rejected");
        return EditDecision::Reject(error);
    }

    let mut chars: Vec<char> = state.text.chars().collect();

    let backspace = range.len() == 1 && state.selection.is_caret() && replacement.is_empty();
    if backspace && range.start > 0 && config.is_formatting(chars[range.start]) {
        range.start -= 1;
    }

    if config.deleting_removes_trailing && !range.is_empty() {
        chars.truncate(range.end);
    }

    let mut text: String = chars[..range.start].iter().collect();
    text.push_str(replacement);
    text.extend(&chars[range.end..]);
    chars.zeroize();

    let edit = format.adjust_edit(TentativeEdit {
        text,
        cursor: range.start + char_len(replacement),
        range,
        replacement,
    });

    match format.process(&edit.text, edit.cursor) {
        Ok(reformatted) => {
            tracing::trace!(
                validity = %reformatted.validity,
                cursor = reformatted.cursor,
                "edit accepted"
            );
            EditDecision::Accept {
                selection: Selection::caret(reformatted.cursor),
                validity: reformatted.validity,
                text: reformatted.text,
            }
        }
        Err(error) => {
            tracing::debug!(
                %error,
                attempted = %mask_text(&edit.text, |c| config.is_input(c)),
                "edit rejected"
            );
            EditDecision::Reject(error)
        }
    }
}

/// Decides the outcome of a backspace key press.
///
/// Deletes the selection, or the character before the caret. An empty field
/// asks to navigate to the previous field; a caret at offset 0 is ignored.
pub fn propose_delete_backward<F>(format: &F, state: &FieldState) -> EditDecision
where
    F: FieldFormat + ?Sized,
{
    let len = char_len(&state.text);
    if len == 0 {
        tracing::trace!("backspace without content");
        return EditDecision::NavigateToPrevious;
    }

    let selection = state.selection.clamped(len);
    if !selection.is_caret() {
        return propose_edit(format, state, selection, "");
    }
    if selection.start == 0 {
        return EditDecision::Ignored;
    }
    propose_edit(format, state, Selection::new(selection.start - 1, selection.start), "")
}

/// Observer and veto point for a [`CardEntryField`].
///
/// All methods default to doing nothing (and allowing every edit), so an
/// implementation only overrides what it cares about.
pub trait FieldDelegate {
    /// Called before the field evaluates an edit; returning false drops it.
    fn should_change(&mut self, _state: &FieldState, _range: Selection, _replacement: &str) -> bool {
        true
    }

    /// Called after an edit is committed.
    fn did_change(&mut self, _text: &str, _validity: ValidityState) {}

    /// Called when an edit is rejected. Drive shake/haptic feedback from here.
    fn did_reject(&mut self, _error: &EditError) {}

    /// Called with input typed past the end of a complete field.
    fn should_forward_input(&mut self, _input: &str) {}

    /// Called when backspace is pressed in an empty field.
    fn backspace_without_content(&mut self) {}
}

/// A single card entry field: committed text, selection and an optional
/// external delegate.
///
/// The committed state doubles as the rollback point: edits are evaluated
/// against it and only replace it once accepted.
pub struct CardEntryField<F> {
    format: F,
    state: FieldState,
    delegate: Option<Box<dyn FieldDelegate>>,
}

/// An expiration date field.
pub type ExpirationField<C = crate::SystemCalendar> = CardEntryField<ExpirationFormat<C>>;

impl<F: FieldFormat> CardEntryField<F> {
    /// An empty field.
    pub fn new(format: F) -> Self {
        Self {
            format,
            state: FieldState::default(),
            delegate: None,
        }
    }

    /// Builder form of [`Self::set_delegate`].
    pub fn with_delegate(mut self, delegate: impl FieldDelegate + 'static) -> Self {
        self.set_delegate(delegate);
        self
    }

    /// Installs the external delegate, replacing any previous one.
    pub fn set_delegate(&mut self, delegate: impl FieldDelegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    /// Removes and returns the external delegate.
    pub fn take_delegate(&mut self) -> Option<Box<dyn FieldDelegate>> {
        self.delegate.take()
    }

    /// The field's format.
    pub fn format(&self) -> &F {
        &self.format
    }

    /// Committed text and selection.
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// Displayed text.
    pub fn text(&self) -> &str {
        &self.state.text
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.state.selection
    }

    /// Text to show while empty.
    pub fn placeholder(&self) -> &str {
        self.format.placeholder()
    }

    /// The text without formatting characters.
    pub fn unformatted_text(&self) -> String {
        self.format.unformatted(&self.state.text)
    }

    /// Classification of the committed text.
    pub fn validity(&self) -> ValidityState {
        self.format.classify(&self.unformatted_text())
    }

    /// Returns true if the field holds a complete, valid value.
    pub fn is_complete(&self) -> bool {
        self.format.is_complete(&self.state.text)
    }

    /// Moves the caret or selection (clamped to the text).
    pub fn select(&mut self, selection: Selection) {
        self.state.selection = selection.clamped(char_len(&self.state.text));
    }

    /// Proposes replacing `range` with `replacement` and applies the outcome.
    pub fn propose_edit(&mut self, range: Selection, replacement: &str) -> EditDecision {
        if let Some(delegate) = self.delegate.as_mut() {
            if !delegate.should_change(&self.state, range, replacement) {
                tracing::trace!("edit vetoed by delegate");
                return EditDecision::Ignored;
            }
        }
        let decision = propose_edit(&self.format, &self.state, range, replacement);
        self.apply(&decision);
        decision
    }

    /// Types `input` over the current selection.
    pub fn insert_text(&mut self, input: &str) -> EditDecision {
        self.propose_edit(self.state.selection, input)
    }

    /// Handles a backspace key press.
    pub fn delete_backward(&mut self) -> EditDecision {
        let len = char_len(&self.state.text);
        let selection = self.state.selection.clamped(len);
        if len == 0 || (selection.is_caret() && selection.start == 0) {
            let decision = propose_delete_backward(&self.format, &self.state);
            self.apply(&decision);
            return decision;
        }

        let range = if selection.is_caret() {
            Selection::new(selection.start - 1, selection.start)
        } else {
            selection
        };
        self.propose_edit(range, "")
    }

    /// Replaces the whole text (e.g. autofill), reformatting it from scratch.
    ///
    /// On error the committed state is left untouched.
    pub fn set_text(&mut self, text: &str) -> Result<ValidityState, EditError> {
        let result = self.format.process(text, char_len(text));
        let decision = match &result {
            Ok(reformatted) => EditDecision::Accept {
                text: reformatted.text.clone(),
                selection: Selection::caret(reformatted.cursor),
                validity: reformatted.validity,
            },
            Err(error) => EditDecision::Reject(error.clone()),
        };
        self.apply(&decision);
        result.map(|reformatted| reformatted.validity)
    }

    /// Empties the field.
    pub fn clear(&mut self) {
        self.state.zeroize();
    }

    fn apply(&mut self, decision: &EditDecision) {
        match decision {
            EditDecision::Accept {
                text,
                selection,
                validity,
            } => {
                self.state = FieldState::new(text.clone(), *selection);
                if let Some(delegate) = self.delegate.as_mut() {
                    delegate.did_change(text, *validity);
                }
            }
            EditDecision::Reject(error) => {
                if let Some(delegate) = self.delegate.as_mut() {
                    delegate.did_reject(error);
                }
            }
            EditDecision::ForwardToNext(input) => {
                if let Some(delegate) = self.delegate.as_mut() {
                    delegate.should_forward_input(input);
                }
            }
            EditDecision::NavigateToPrevious => {
                if let Some(delegate) = self.delegate.as_mut() {
                    delegate.backspace_without_content();
                }
            }
            EditDecision::Ignored => {}
        }
    }
}

impl<C: Calendar> CardEntryField<ExpirationFormat<C>> {
    /// Month and year, available once the field is complete and valid.
    pub fn expiration(&self) -> Option<ExpirationFields> {
        self.format.extract_fields(&self.state.text)
    }

    /// Two-digit month of a complete field.
    pub fn month_string(&self) -> Option<String> {
        self.expiration().map(|fields| fields.month().to_string())
    }

    /// Two-digit year of a complete field.
    pub fn year_string(&self) -> Option<String> {
        self.expiration().map(|fields| fields.year().to_string())
    }
}

impl<F: FieldFormat> fmt::Debug for CardEntryField<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.format.config();
        f.debug_struct("CardEntryField")
            .field("text", &mask_text(&self.state.text, |c| config.is_input(c)))
            .field("selection", &self.state.selection)
            .field("has_delegate", &self.delegate.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::GroupedDigitsFormat;
    use crate::FixedCalendar;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn expiration() -> ExpirationFormat<FixedCalendar> {
        ExpirationFormat::new(FixedCalendar::new(25, 3).unwrap())
    }

    fn accept(text: &str, cursor: usize, validity: ValidityState) -> EditDecision {
        EditDecision::Accept {
            text: text.to_string(),
            selection: Selection::caret(cursor),
            validity,
        }
    }

    fn at_end(text: &str) -> FieldState {
        FieldState::with_caret_at_end(text)
    }

    #[test]
    fn test_type_one() {
        let decision = propose_edit(&expiration(), &at_end(""), Selection::caret(0), "1");
        assert_eq!(decision, accept("1", 1, ValidityState::Incomplete));
    }

    #[test]
    fn test_type_two_pads() {
        let decision = propose_edit(&expiration(), &at_end(""), Selection::caret(0), "2");
        assert_eq!(decision, accept("02/", 3, ValidityState::Incomplete));
    }

    #[test]
    fn test_second_month_digit_adds_slash() {
        let decision = propose_edit(&expiration(), &at_end("1"), Selection::caret(1), "2");
        assert_eq!(decision, accept("12/", 3, ValidityState::Incomplete));
    }

    #[test]
    fn test_invalid_character_rejected() {
        let decision = propose_edit(&expiration(), &at_end("1"), Selection::caret(1), "a");
        assert_eq!(
            decision,
            EditDecision::Reject(EditError::InvalidCharacter {
                position: 0,
                character: 'a'
            })
        );
    }

    #[test]
    fn test_impossible_month_rejected() {
        // There is no month "00".
        let decision = propose_edit(&expiration(), &at_end("0"), Selection::caret(1), "0");
        assert_eq!(decision, EditDecision::Reject(EditError::ImpossibleDate));
    }

    #[test]
    fn test_length_exceeded_rejected() {
        let decision = propose_edit(&expiration(), &at_end("04/27"), Selection::caret(2), "1");
        assert_eq!(
            decision,
            EditDecision::Reject(EditError::LengthExceeded {
                length: 5,
                maximum: 4
            })
        );
    }

    #[test]
    fn test_forward_when_complete() {
        let decision = propose_edit(&expiration(), &at_end("04/27"), Selection::caret(5), "1");
        assert_eq!(decision, EditDecision::ForwardToNext("1".to_string()));
    }

    #[test]
    fn test_backspace_swallows_separator() {
        let decision = propose_edit(&expiration(), &at_end("01/"), Selection::new(2, 3), "");
        assert_eq!(decision, accept("0", 1, ValidityState::Incomplete));
    }

    #[test]
    fn test_selected_separator_deleted_alone() {
        // A selected "/" is not a caret backspace; only trailing removal applies.
        let state = FieldState::new("01/", Selection::new(2, 3));
        let decision = propose_edit(&expiration(), &state, Selection::new(2, 3), "");
        assert_eq!(decision, accept("01/", 3, ValidityState::Incomplete));
    }

    #[test]
    fn test_delete_in_middle_removes_trailing() {
        let state = FieldState::new("04/27", Selection::caret(2));
        let decision = propose_edit(&expiration(), &state, Selection::new(1, 2), "");
        assert_eq!(decision, accept("0", 1, ValidityState::Incomplete));
    }

    #[test]
    fn test_replace_selection_removes_trailing() {
        let state = FieldState::new("04/27", Selection::new(0, 2));
        let decision = propose_edit(&expiration(), &state, Selection::new(0, 2), "1");
        assert_eq!(decision, accept("1", 1, ValidityState::Incomplete));
    }

    #[test]
    fn test_slash_after_lone_digit_pads() {
        let decision = propose_edit(&expiration(), &at_end("1"), Selection::caret(1), "/");
        assert_eq!(decision, accept("01/", 3, ValidityState::Incomplete));
    }

    #[test]
    fn test_slash_elsewhere_is_absorbed() {
        let decision = propose_edit(&expiration(), &at_end("12/"), Selection::caret(3), "/");
        assert_eq!(decision, accept("12/", 3, ValidityState::Incomplete));
    }

    #[test]
    fn test_paste_formatted_value() {
        let decision = propose_edit(&expiration(), &at_end(""), Selection::caret(0), "04/27");
        assert_eq!(decision, accept("04/27", 5, ValidityState::Valid));
    }

    #[test]
    fn test_out_of_range_edit_is_clamped() {
        let decision = propose_edit(&expiration(), &at_end("1"), Selection::new(7, 9), "2");
        assert_eq!(decision, accept("12/", 3, ValidityState::Incomplete));
    }

    #[test]
    fn test_delete_backward_decisions() {
        let format = expiration();
        assert_eq!(
            propose_delete_backward(&format, &at_end("")),
            EditDecision::NavigateToPrevious
        );
        assert_eq!(
            propose_delete_backward(&format, &FieldState::new("12/", Selection::caret(0))),
            EditDecision::Ignored
        );
        assert_eq!(
            propose_delete_backward(&format, &at_end("12/")),
            accept("1", 1, ValidityState::Incomplete)
        );
    }

    #[test]
    fn test_card_number_backspace_over_space() {
        let format = GroupedDigitsFormat::card_number();
        let decision = propose_edit(&format, &at_end("4111 1"), Selection::new(5, 6), "");
        assert_eq!(decision, accept("4111", 4, ValidityState::Incomplete));

        let state = FieldState::new("4111 1", Selection::caret(5));
        let decision = propose_edit(&format, &state, Selection::new(4, 5), "");
        assert_eq!(decision, accept("4111", 3, ValidityState::Incomplete));
    }

    #[test]
    fn test_card_number_insert_in_middle_keeps_tail() {
        let format = GroupedDigitsFormat::card_number();
        let state = FieldState::new("4111 1", Selection::caret(2));
        let decision = propose_edit(&format, &state, Selection::caret(2), "9");
        assert_eq!(decision, accept("4191 11", 3, ValidityState::Incomplete));
    }

    #[derive(Default)]
    struct Events {
        changes: Vec<(String, ValidityState)>,
        rejections: Vec<EditError>,
        forwarded: Vec<String>,
        back: usize,
    }

    struct Recorder(Rc<RefCell<Events>>);

    impl FieldDelegate for Recorder {
        fn did_change(&mut self, text: &str, validity: ValidityState) {
            self.0.borrow_mut().changes.push((text.to_string(), validity));
        }

        fn did_reject(&mut self, error: &EditError) {
            self.0.borrow_mut().rejections.push(error.clone());
        }

        fn should_forward_input(&mut self, input: &str) {
            self.0.borrow_mut().forwarded.push(input.to_string());
        }

        fn backspace_without_content(&mut self) {
            self.0.borrow_mut().back += 1;
        }
    }

    struct Veto;

    impl FieldDelegate for Veto {
        fn should_change(&mut self, _: &FieldState, _: Selection, replacement: &str) -> bool {
            replacement != "9"
        }
    }

    #[test]
    fn test_field_notifies_delegate() {
        let events = Rc::new(RefCell::new(Events::default()));
        let mut field = CardEntryField::new(expiration()).with_delegate(Recorder(events.clone()));

        field.delete_backward();
        field.insert_text("1");
        field.insert_text("x");
        field.insert_text("3");
        field.insert_text("9");
        field.insert_text("5");

        let events = events.borrow();
        assert_eq!(events.back, 1);
        assert_eq!(
            events.changes,
            vec![
                ("1".to_string(), ValidityState::Incomplete),
                ("01/3".to_string(), ValidityState::Incomplete),
                ("01/39".to_string(), ValidityState::Valid),
            ]
        );
        assert_eq!(
            events.rejections,
            vec![EditError::InvalidCharacter {
                position: 0,
                character: 'x'
            }]
        );
        assert_eq!(events.forwarded, vec!["5".to_string()]);
        assert_eq!(field.text(), "01/39");
    }

    #[test]
    fn test_field_forwards_when_complete() {
        let events = Rc::new(RefCell::new(Events::default()));
        let mut field = CardEntryField::new(expiration()).with_delegate(Recorder(events.clone()));
        assert_eq!(field.set_text("0427"), Ok(ValidityState::Valid));
        assert_eq!(field.text(), "04/27");

        assert_eq!(field.insert_text("12"), EditDecision::ForwardToNext("12".to_string()));
        assert_eq!(events.borrow().forwarded, vec!["12".to_string()]);
        assert_eq!(field.text(), "04/27");
    }

    #[test]
    fn test_field_veto() {
        let mut field = CardEntryField::new(GroupedDigitsFormat::security_code(3)).with_delegate(Veto);
        assert_eq!(field.insert_text("9"), EditDecision::Ignored);
        assert!(field.insert_text("1").is_accepted());
        assert_eq!(field.text(), "1");
        assert!(field.take_delegate().is_some());
        assert!(field.insert_text("9").is_accepted());
        assert_eq!(field.text(), "19");
    }

    #[test]
    fn test_field_rejection_keeps_state() {
        let mut field = CardEntryField::new(expiration());
        field.insert_text("1");
        let before = field.state().clone();
        assert!(field.insert_text("x").is_rejected());
        assert_eq!(field.state(), &before);
    }

    #[test]
    fn test_field_expiration_accessors() {
        let mut field = CardEntryField::new(expiration());
        field.insert_text("0");
        assert_eq!(field.expiration(), None);
        field.insert_text("427");
        assert!(field.is_complete());
        assert_eq!(field.month_string().as_deref(), Some("04"));
        assert_eq!(field.year_string().as_deref(), Some("27"));
        assert_eq!(field.placeholder(), "MM/YY");
    }

    #[test]
    fn test_field_set_text_rejects() {
        let mut field = CardEntryField::new(expiration());
        field.insert_text("1");
        assert_eq!(field.set_text("13/99"), Err(EditError::ImpossibleDate));
        assert_eq!(field.text(), "1");
        field.clear();
        assert_eq!(field.text(), "");
        assert_eq!(field.validity(), ValidityState::Empty);
    }

    #[test]
    fn test_field_select_and_delete_range() {
        let mut field = CardEntryField::new(GroupedDigitsFormat::card_number());
        field.insert_text("41111111");
        assert_eq!(field.text(), "4111 1111");
        field.select(Selection::new(0, 4));
        assert!(field.delete_backward().is_accepted());
        assert_eq!(field.text(), "1111");
        assert_eq!(field.selection(), Selection::caret(0));
    }

    #[test]
    fn test_debug_masks_text() {
        let mut field = CardEntryField::new(GroupedDigitsFormat::card_number());
        field.insert_text("4111111111111111");
        let debug = format!("{:?}", field);
        assert!(!debug.contains("4111 1111 1111 1111"));
        assert!(debug.contains("1111"));

        let debug = format!("{:?}", field.state());
        assert!(!debug.contains("4111"));
    }
}
