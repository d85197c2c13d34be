//! Character-by-character text reveal with a flickering mask.
//!
//! `TextReveal` holds only the revealed prefix. The masked suffix is produced
//! on demand from the caller's RNG and never stored, so two renders with no
//! tick in between can still show different glyphs.

use rand::Rng;
use tracing::debug;

/// Glyphs used for the not-yet-revealed part of the text.
pub const MASK_ALPHABET: &[u8] = b"-_~`!@#$%^&*()+=[]{}|;:,.<>?";

/// Rendered before the first paint instead of real or masked text.
pub const PLACEHOLDER: &str = " ";

pub const DEFAULT_INTERVAL_MS: u32 = 50;

/// Result of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One character was revealed and more remain.
    Advanced,
    /// The last character was revealed; the timer must be released.
    Finished,
    /// Nothing to do: complete or torn down. No state changed.
    Inert,
}

#[derive(Debug, Clone)]
pub struct TextReveal {
    target: String,
    target_len: usize,
    output: String,
    revealed: usize,
    interval_ms: u32,
    painted: bool,
    torn_down: bool,
}

impl TextReveal {
    pub fn new(target: &str, interval_ms: u32) -> Self {
        Self {
            target: target.to_string(),
            target_len: target.chars().count(),
            output: String::new(),
            revealed: 0,
            interval_ms,
            painted: false,
            torn_down: false,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn revealed_text(&self) -> &str {
        &self.output
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.target_len
    }

    /// Whether a repeating timer should currently be running.
    pub fn needs_timer(&self) -> bool {
        !self.torn_down && !self.is_complete()
    }

    pub fn mark_painted(&mut self) {
        self.painted = true;
    }

    pub fn is_painted(&self) -> bool {
        self.painted
    }

    /// Reveals exactly one character, if any remain.
    pub fn tick(&mut self) -> Tick {
        if !self.needs_timer() {
            return Tick::Inert;
        }
        let Some(c) = self.target.chars().nth(self.revealed) else {
            return Tick::Inert;
        };
        self.output.push(c);
        self.revealed += 1;
        if self.is_complete() {
            debug!(len = self.target_len, "text reveal finished");
            Tick::Finished
        } else {
            Tick::Advanced
        }
    }

    /// Swaps the target text. Reveal continues from the current count against
    /// the new target; the already revealed characters are kept as they are,
    /// cut down to the new length if the new target is shorter.
    pub fn retarget(&mut self, target: &str) {
        if self.target == target {
            return;
        }
        self.target = target.to_string();
        self.target_len = target.chars().count();
        if self.revealed > self.target_len {
            self.output = self.output.chars().take(self.target_len).collect();
            self.revealed = self.target_len;
        }
    }

    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    pub fn teardown(&mut self) {
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Fresh random glyphs for every character not yet revealed.
    pub fn masked_remainder<R: Rng>(&self, rng: &mut R) -> String {
        mask(self.target_len.saturating_sub(self.revealed), rng)
    }

    /// Text to display right now.
    pub fn render<R: Rng>(&self, rng: &mut R) -> String {
        if !self.painted {
            return PLACEHOLDER.to_string();
        }
        let mut out = self.output.clone();
        out.push_str(&self.masked_remainder(rng));
        out
    }
}

/// `len` glyphs drawn uniformly from [`MASK_ALPHABET`].
pub fn mask<R: Rng>(len: usize, rng: &mut R) -> String {
    (0..len)
        .map(|_| MASK_ALPHABET[rng.gen_range(0..MASK_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_placeholder_before_paint() {
        let r = TextReveal::new("Ada", DEFAULT_INTERVAL_MS);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(r.render(&mut rng), PLACEHOLDER);
    }

    #[test]
    fn test_tick_reveals_one_char() {
        let mut r = TextReveal::new("héllo", 50);
        assert_eq!(r.tick(), Tick::Advanced);
        assert_eq!(r.tick(), Tick::Advanced);
        assert_eq!(r.revealed_text(), "hé");
        assert_eq!(r.revealed_count(), 2);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(r.masked_remainder(&mut rng).chars().count(), 3);
    }

    #[test]
    fn test_finishes_then_inert() {
        let mut r = TextReveal::new("ab", 50);
        assert_eq!(r.tick(), Tick::Advanced);
        assert_eq!(r.tick(), Tick::Finished);
        assert!(!r.needs_timer());
        assert_eq!(r.tick(), Tick::Inert);
        assert_eq!(r.revealed_text(), "ab");
    }

    #[test]
    fn test_empty_target_never_needs_timer() {
        let mut r = TextReveal::new("", 50);
        assert!(!r.needs_timer());
        assert_eq!(r.tick(), Tick::Inert);
        r.mark_painted();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(r.render(&mut rng), "");
    }

    #[test]
    fn test_render_after_paint_has_target_length() {
        let mut r = TextReveal::new("Lovelace", 50);
        r.mark_painted();
        r.tick();
        let mut rng = StdRng::seed_from_u64(3);
        let shown = r.render(&mut rng);
        assert!(shown.starts_with('L'));
        assert_eq!(shown.chars().count(), 8);
        assert!(shown.chars().skip(1).all(|c| MASK_ALPHABET.contains(&(c as u8))));
    }

    #[test]
    fn test_retarget_keeps_revealed_prefix() {
        let mut r = TextReveal::new("abcdef", 50);
        r.tick();
        r.tick();
        r.retarget("xyz12");
        assert_eq!(r.revealed_text(), "ab");
        assert_eq!(r.tick(), Tick::Advanced);
        assert_eq!(r.revealed_text(), "abz");
    }

    #[test]
    fn test_retarget_shorter_clamps_count() {
        let mut r = TextReveal::new("abcdef", 50);
        for _ in 0..5 {
            r.tick();
        }
        r.retarget("xy");
        assert_eq!(r.revealed_count(), 2);
        assert_eq!(r.revealed_text(), "ab");
        assert!(r.is_complete());
        assert_eq!(r.tick(), Tick::Inert);
    }

    #[test]
    fn test_teardown_stops_ticks() {
        let mut r = TextReveal::new("abc", 50);
        r.tick();
        r.teardown();
        assert_eq!(r.tick(), Tick::Inert);
        assert_eq!(r.revealed_count(), 1);
    }
}
