use std::time::Duration;

use crate::sdk::routing::location::Location;
use crate::sdk::routing::resolver::MIN_QUERY_LEN;

/// Delay between the last keystroke and the resolver call.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(600);

/// Which input field an event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Start,
    End,
}

/// Token handed to the driver on a keystroke: arm a timer for
/// `DEBOUNCE_DELAY`, then pass the token back to `timer_fired`. Tokens
/// from superseded keystrokes are ignored there; the driver never
/// cancels a timer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebounceTimer {
    pub field: Field,
    pub text: String,
}

/// Instruction to invoke the resolver for `text` on behalf of `field`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveRequest {
    pub field: Field,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Pending,
    Fetching,
    Settled,
}

#[derive(Debug)]
struct FieldSearch {
    query: String,
    phase: Phase,
    suggestions: Vec<Location>,
    panel_visible: bool,
}

impl FieldSearch {
    fn new() -> Self {
        Self {
            query: String::new(),
            phase: Phase::Idle,
            suggestions: Vec::new(),
            panel_visible: false,
        }
    }
}

/// Per-field debounce state machine, independent of any view
/// framework. Staleness is judged by query text: only the result of a
/// resolve whose text still matches the field may touch its
/// suggestions. The two fields are fully independent.
#[derive(Debug)]
pub struct SearchController {
    start: FieldSearch,
    end: FieldSearch,
}

impl SearchController {
    pub fn new() -> Self {
        Self {
            start: FieldSearch::new(),
            end: FieldSearch::new(),
        }
    }

    fn field(&self, field: Field) -> &FieldSearch {
        match field {
            Field::Start => &self.start,
            Field::End => &self.end,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldSearch {
        match field {
            Field::Start => &mut self.start,
            Field::End => &mut self.end,
        }
    }

    /// A keystroke. Short queries clear the field immediately; anything
    /// else yields a timer token for the driver to arm.
    pub fn text_changed(&mut self, field: Field, text: &str) -> Option<DebounceTimer> {
        let slot = self.field_mut(field);
        slot.query = text.to_string();

        if text.trim().chars().count() < MIN_QUERY_LEN {
            slot.phase = Phase::Idle;
            slot.suggestions.clear();
            slot.panel_visible = false;
            return None;
        }

        slot.phase = Phase::Pending;
        Some(DebounceTimer {
            field,
            text: text.to_string(),
        })
    }

    /// A debounce timer elapsed. Yields a resolve request unless a
    /// newer keystroke superseded the timer in the meantime.
    pub fn timer_fired(&mut self, timer: &DebounceTimer) -> Option<ResolveRequest> {
        let slot = self.field_mut(timer.field);
        if slot.phase != Phase::Pending || slot.query != timer.text {
            log::debug!("Ignoring superseded debounce timer for {:?}", timer.field);
            return None;
        }
        slot.phase = Phase::Fetching;
        Some(ResolveRequest {
            field: timer.field,
            text: timer.text.clone(),
        })
    }

    /// The resolver finished for `for_text`. Applied (and the panel
    /// revealed, even for an empty list) only if the field's text has
    /// not moved on; stale settlements are dropped without any state
    /// change.
    pub fn resolver_settled(&mut self, field: Field, for_text: &str, results: Vec<Location>) {
        let slot = self.field_mut(field);
        if slot.query != for_text {
            log::debug!(
                "Dropping stale suggestions for {:?}: query moved on from \"{}\"",
                field,
                for_text
            );
            return;
        }
        slot.suggestions = results;
        slot.phase = Phase::Settled;
        slot.panel_visible = true;
    }

    /// Out-of-panel interaction; hides both suggestion panels.
    pub fn dismiss(&mut self) {
        self.start.panel_visible = false;
        self.end.panel_visible = false;
    }

    pub fn query(&self, field: Field) -> &str {
        &self.field(field).query
    }

    pub fn suggestions(&self, field: Field) -> &[Location] {
        &self.field(field).suggestions
    }

    pub fn is_searching(&self, field: Field) -> bool {
        self.field(field).phase == Phase::Fetching
    }

    pub fn panel_visible(&self, field: Field) -> bool {
        self.field(field).panel_visible
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(name: &str) -> Location {
        Location::named(28.6, 77.2, name)
    }

    #[test]
    fn short_text_clears_and_hides_without_a_timer() {
        let mut controller = SearchController::new();

        let timer = controller.text_changed(Field::Start, "co").unwrap();
        let request = controller.timer_fired(&timer).unwrap();
        controller.resolver_settled(Field::Start, &request.text, vec![suggestion("Connaught Place")]);
        assert!(controller.panel_visible(Field::Start));

        assert!(controller.text_changed(Field::Start, "c").is_none());
        assert!(controller.suggestions(Field::Start).is_empty());
        assert!(!controller.panel_visible(Field::Start));
        assert!(!controller.is_searching(Field::Start));
    }

    #[test]
    fn whitespace_only_counts_as_short() {
        let mut controller = SearchController::new();
        assert!(controller.text_changed(Field::End, "  a ").is_none());
    }

    #[test]
    fn superseded_timer_dies_silently() {
        let mut controller = SearchController::new();

        let first = controller.text_changed(Field::Start, "ind").unwrap();
        let second = controller.text_changed(Field::Start, "india").unwrap();

        assert!(controller.timer_fired(&first).is_none());
        let request = controller.timer_fired(&second).unwrap();
        assert_eq!(request.text, "india");
        assert!(controller.is_searching(Field::Start));
    }

    #[test]
    fn stale_settlement_cannot_clobber_a_newer_query() {
        let mut controller = SearchController::new();

        // Resolve issued for "A"...
        let timer_a = controller.text_changed(Field::Start, "india gate").unwrap();
        controller.timer_fired(&timer_a).unwrap();

        // ...then the text moves on to "B" before "A" settles.
        let timer_b = controller.text_changed(Field::Start, "red fort").unwrap();

        controller.resolver_settled(Field::Start, "india gate", vec![suggestion("India Gate")]);
        assert!(controller.suggestions(Field::Start).is_empty());
        assert!(!controller.panel_visible(Field::Start));

        // "B"'s own cycle still works.
        let request_b = controller.timer_fired(&timer_b).unwrap();
        controller.resolver_settled(Field::Start, &request_b.text, vec![suggestion("Red Fort")]);
        assert_eq!(controller.suggestions(Field::Start).len(), 1);
        assert!(controller.panel_visible(Field::Start));
        assert!(!controller.is_searching(Field::Start));
    }

    #[test]
    fn empty_results_still_reveal_the_panel() {
        let mut controller = SearchController::new();
        let timer = controller.text_changed(Field::End, "nowhere").unwrap();
        let request = controller.timer_fired(&timer).unwrap();
        controller.resolver_settled(Field::End, &request.text, Vec::new());

        assert!(controller.suggestions(Field::End).is_empty());
        assert!(controller.panel_visible(Field::End));
    }

    #[test]
    fn fields_never_cross_contaminate() {
        let mut controller = SearchController::new();

        let start_timer = controller.text_changed(Field::Start, "india").unwrap();
        let end_timer = controller.text_changed(Field::End, "qutub").unwrap();

        let start_request = controller.timer_fired(&start_timer).unwrap();
        controller.resolver_settled(Field::Start, &start_request.text, vec![suggestion("India Gate")]);

        assert!(controller.suggestions(Field::End).is_empty());
        assert!(!controller.panel_visible(Field::End));

        let end_request = controller.timer_fired(&end_timer).unwrap();
        controller.resolver_settled(Field::End, &end_request.text, vec![suggestion("Qutub Minar")]);
        assert_eq!(controller.suggestions(Field::Start).len(), 1);
        assert_eq!(controller.suggestions(Field::End).len(), 1);
    }

    #[test]
    fn dismiss_hides_both_panels_but_keeps_suggestions() {
        let mut controller = SearchController::new();

        for (field, text) in [(Field::Start, "india"), (Field::End, "fort")] {
            let timer = controller.text_changed(field, text).unwrap();
            let request = controller.timer_fired(&timer).unwrap();
            controller.resolver_settled(field, &request.text, vec![suggestion(text)]);
        }

        controller.dismiss();
        assert!(!controller.panel_visible(Field::Start));
        assert!(!controller.panel_visible(Field::End));
        assert_eq!(controller.suggestions(Field::Start).len(), 1);
        assert_eq!(controller.suggestions(Field::End).len(), 1);
    }
}
