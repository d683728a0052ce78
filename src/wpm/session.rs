//! Typing session state
//!
//! Pure bookkeeping: the frame loop feeds in keystrokes and frame deltas,
//! the view reads back per-character status and speed.

use moge::timer::Timer;

/// One editing action from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Char(char),
    Backspace,
    /// Ctrl+Backspace: drop the last word and the separator before it
    DeleteWord,
    Newline,
}

impl Input {
    /// Printable ASCII only; control keys arrive as key codes instead
    pub fn from_char(ch: char) -> Option<Self> {
        if ch == ' ' || ch.is_ascii_graphic() {
            Some(Input::Char(ch))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharStatus {
    Pending,
    Correct,
    Wrong,
}

/// Average word length used for words-per-minute
const CHARS_PER_WORD: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct TypingSession {
    text: Vec<char>,
    typed: Vec<char>,
    timer: Timer,
    done: bool,
}

/// Normalize line endings and strip surrounding whitespace
pub fn prepare_text(raw: &str) -> String {
    raw.replace("\r\n", "\n").trim().to_string()
}

fn is_word_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == '_'
}

impl TypingSession {
    pub fn new(text: &str) -> Self {
        Self {
            text: prepare_text(text).chars().collect(),
            typed: Vec::new(),
            timer: Timer::new(),
            done: false,
        }
    }

    pub fn text(&self) -> &[char] {
        &self.text
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Seconds spent so far, frozen once the text is complete
    pub fn elapsed(&self) -> f32 {
        self.timer.secs()
    }

    pub fn apply(&mut self, input: Input) {
        if self.done {
            return;
        }
        match input {
            Input::Char(ch) => self.typed.push(ch),
            Input::Newline => self.typed.push('\n'),
            Input::Backspace => {
                self.typed.pop();
            }
            Input::DeleteWord => {
                if !self.typed.is_empty() {
                    let mut cut = self.typed.len() - 1;
                    while cut > 0 && !is_word_separator(self.typed[cut]) {
                        cut -= 1;
                    }
                    self.typed.truncate(cut);
                }
            }
        }
        self.typed.truncate(self.text.len());
    }

    /// Advance the clock and latch completion
    pub fn update(&mut self, delta: f32) {
        if self.done {
            return;
        }
        self.timer.tick(delta);
        if self.typed == self.text {
            self.done = true;
        }
    }

    pub fn chars_per_sec(&self) -> f32 {
        let elapsed = self.elapsed();
        if elapsed <= 0.0 {
            return 0.0;
        }
        self.typed.len() as f32 / elapsed
    }

    pub fn wpm(&self) -> f32 {
        self.chars_per_sec() * 60.0 / CHARS_PER_WORD
    }

    pub fn status(&self, index: usize) -> CharStatus {
        match (self.text.get(index), self.typed.get(index)) {
            (Some(want), Some(got)) if want == got => CharStatus::Correct,
            (Some(_), Some(_)) => CharStatus::Wrong,
            _ => CharStatus::Pending,
        }
    }

    /// Number of typed characters that don't match the text
    pub fn mistakes(&self) -> usize {
        (0..self.typed.len())
            .filter(|&i| self.status(i) == CharStatus::Wrong)
            .count()
    }

    pub fn reset(&mut self) {
        self.typed.clear();
        self.timer.reset();
        self.done = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(session: &mut TypingSession, text: &str) {
        for ch in text.chars() {
            let input = if ch == '\n' {
                Input::Newline
            } else {
                Input::Char(ch)
            };
            session.apply(input);
        }
    }

    #[test]
    fn test_prepare_text() {
        assert_eq!(prepare_text("  hello\r\nworld \n\n"), "hello\nworld");
    }

    #[test]
    fn test_status_per_char() {
        let mut session = TypingSession::new("abc");
        type_str(&mut session, "ax");
        assert_eq!(session.status(0), CharStatus::Correct);
        assert_eq!(session.status(1), CharStatus::Wrong);
        assert_eq!(session.status(2), CharStatus::Pending);
        assert_eq!(session.status(9), CharStatus::Pending);
        assert_eq!(session.mistakes(), 1);
    }

    #[test]
    fn test_buffer_capped_at_text_length() {
        let mut session = TypingSession::new("ab");
        type_str(&mut session, "abcdef");
        assert_eq!(session.typed, &['a', 'b']);
    }

    #[test]
    fn test_backspace_and_delete_word() {
        let mut session = TypingSession::new("hello brave new world");
        type_str(&mut session, "hello brave ne");
        session.apply(Input::Backspace);
        assert_eq!(session.typed.iter().collect::<String>(), "hello brave n");

        session.apply(Input::DeleteWord);
        assert_eq!(session.typed.iter().collect::<String>(), "hello brave");
        session.apply(Input::DeleteWord);
        assert_eq!(session.typed.iter().collect::<String>(), "hello");
        session.apply(Input::DeleteWord);
        assert!(session.typed.is_empty());

        // Nothing left to delete
        session.apply(Input::DeleteWord);
        session.apply(Input::Backspace);
        assert!(session.typed.is_empty());
    }

    #[test]
    fn test_done_freezes_clock() {
        let mut session = TypingSession::new("hi\nyo");
        session.update(1.0);
        type_str(&mut session, "hi\nyo");
        session.update(1.0);
        assert!(session.is_done());
        assert_eq!(session.elapsed(), 2.0);

        session.update(5.0);
        session.apply(Input::Backspace);
        assert_eq!(session.elapsed(), 2.0);
        assert_eq!(session.typed.len(), 5);
    }

    #[test]
    fn test_speed() {
        let mut session = TypingSession::new("abcdefghij");
        assert_eq!(session.chars_per_sec(), 0.0);
        type_str(&mut session, "abcde");
        session.update(2.0);
        assert_eq!(session.chars_per_sec(), 2.5);
        assert_eq!(session.wpm(), 30.0);
    }

    #[test]
    fn test_reset() {
        let mut session = TypingSession::new("a");
        type_str(&mut session, "a");
        session.update(0.5);
        assert!(session.is_done());

        session.reset();
        assert!(!session.is_done());
        assert!(session.typed.is_empty());
        assert_eq!(session.elapsed(), 0.0);
    }

    #[test]
    fn test_input_from_char() {
        assert_eq!(Input::from_char('a'), Some(Input::Char('a')));
        assert_eq!(Input::from_char(' '), Some(Input::Char(' ')));
        assert_eq!(Input::from_char('\u{8}'), None);
        assert_eq!(Input::from_char('\r'), None);
        assert_eq!(Input::from_char('é'), None);
    }
}
