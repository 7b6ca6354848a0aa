//! Collaborator interfaces for the out-of-scope dialog widgets. Each one is
//! a passive input source: it returns a validated value, or `None` if the
//! user dismissed the prompt. Name-format validation stays with the caller,
//! not the widget.

pub trait TextEntry {
    fn get_text(&mut self, prompt: &str, default: &str) -> Option<String>;
}

pub trait NumericEntry {
    fn get_int(&mut self, prompt: &str, min: i64, max: i64, default: i64) -> Option<i64>;
}

pub trait ChoiceEntry {
    fn get_item(&mut self, label: &str, options: &[String]) -> Option<String>;
}
