// Dialogue typewriter: reveals concatenated lines one character at a time over a duration
// proportional to the text length. A new key throws the running reveal away.

#[derive(Clone, Debug)]
pub struct Typewriter {
    ms_per_char: f64,
    key: Option<usize>,
    chars: Vec<char>,
    elapsed_ms: f64,
    completed: bool,
}

impl Typewriter {
    pub fn new(ms_per_char: f64) -> Self {
        Self {
            ms_per_char: ms_per_char.max(0.0),
            key: None,
            chars: Vec::new(),
            elapsed_ms: 0.0,
            completed: false,
        }
    }

    /// Start revealing `lines` for step `key`. Same key again is a no-op; returns whether
    /// a fresh reveal started.
    pub fn set_text<S: AsRef<str>>(&mut self, key: usize, lines: &[S]) -> bool {
        if self.key == Some(key) {
            return false;
        }
        let joined = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        self.key = Some(key);
        self.chars = joined.chars().collect();
        self.elapsed_ms = 0.0;
        self.completed = false;
        true
    }

    pub fn duration_ms(&self) -> f64 {
        self.chars.len() as f64 * self.ms_per_char
    }

    /// Advance the reveal. True exactly once per key: on the tick the last character shows.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.key.is_none() || self.completed {
            return false;
        }
        self.elapsed_ms += dt.max(0.0);
        if self.elapsed_ms >= self.duration_ms() {
            self.completed = true;
            return true;
        }
        false
    }

    /// Reveal everything now (tap to skip). True if this call completed the reveal.
    pub fn finish(&mut self) -> bool {
        if self.key.is_none() || self.completed {
            return false;
        }
        self.elapsed_ms = self.duration_ms();
        self.completed = true;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn visible_chars(&self) -> usize {
        if self.completed || self.ms_per_char <= 0.0 {
            return self.chars.len();
        }
        ((self.elapsed_ms / self.ms_per_char).floor() as usize).min(self.chars.len())
    }

    pub fn visible_text(&self) -> String {
        self.chars[..self.visible_chars()].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_proportionally_and_completes_once() {
        let mut tw = Typewriter::new(10.0);
        tw.set_text(0, &["Hi", "you"]);
        assert_eq!(tw.duration_ms(), 60.0);
        assert!(!tw.tick(25.0));
        assert_eq!(tw.visible_text(), "Hi");
        assert!(tw.tick(40.0));
        assert_eq!(tw.visible_text(), "Hi\nyou");
        assert!(!tw.tick(100.0));
        assert!(!tw.finish());
    }

    #[test]
    fn new_key_discards_running_reveal() {
        let mut tw = Typewriter::new(10.0);
        tw.set_text(1, &["first line"]);
        tw.tick(30.0);
        assert!(tw.set_text(2, &["second"]));
        assert_eq!(tw.visible_text(), "");
        let fired = (0..20).filter(|_| tw.tick(10.0)).count();
        assert_eq!(fired, 1);
        assert_eq!(tw.visible_text(), "second");
    }

    #[test]
    fn same_key_does_not_restart() {
        let mut tw = Typewriter::new(10.0);
        tw.set_text(3, &["abc"]);
        tw.tick(20.0);
        assert!(!tw.set_text(3, &["abc"]));
        assert_eq!(tw.visible_chars(), 2);
    }

    #[test]
    fn skip_reveals_everything() {
        let mut tw = Typewriter::new(50.0);
        tw.set_text(0, &["skip me"]);
        assert!(tw.finish());
        assert_eq!(tw.visible_text(), "skip me");
        assert!(!tw.tick(1000.0));
    }

    #[test]
    fn empty_text_completes_on_first_tick() {
        let mut tw = Typewriter::new(10.0);
        tw.set_text(0, &[] as &[&str]);
        assert!(tw.tick(0.0));
    }

    #[test]
    fn multibyte_text_counts_characters() {
        let mut tw = Typewriter::new(10.0);
        tw.set_text(0, &["ギフト"]);
        tw.tick(20.0);
        assert_eq!(tw.visible_text(), "ギフ");
    }
}
