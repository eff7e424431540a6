//! Text-to-speech seam.

/// Speech synthesis backend.
pub trait Speaker {
    fn speak(&mut self, text: &str, language: &str);

    /// Interrupt any ongoing utterance.
    fn stop(&mut self) {}
}

/// Speaker that only records utterances in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSpeaker;

impl Speaker for TracingSpeaker {
    fn speak(&mut self, text: &str, language: &str) {
        tracing::info!(language, text, "speak");
    }
}

/// Speak trimmed text, interrupting the previous utterance.
/// Blank text is not spoken. Returns whether anything was spoken.
pub fn say(speaker: &mut dyn Speaker, text: &str, language: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    speaker.stop();
    speaker.speak(text, language);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        spoken: Vec<(String, String)>,
        stops: usize,
    }

    impl Speaker for Recorder {
        fn speak(&mut self, text: &str, language: &str) {
            self.spoken.push((text.to_string(), language.to_string()));
        }

        fn stop(&mut self) {
            self.stops += 1;
        }
    }

    #[test]
    fn test_say_trims_and_skips_blank() {
        let mut rec = Recorder::default();
        assert!(!say(&mut rec, "   ", "de-DE"));
        assert!(say(&mut rec, " Guten Tag ", "de-DE"));
        assert_eq!(rec.spoken, vec![("Guten Tag".to_string(), "de-DE".to_string())]);
        assert_eq!(rec.stops, 1);
    }
}
