use serde::{Deserialize, Serialize};

use crate::entities::Directive;

pub trait Speaker {
    /// Stops whatever is being spoken right now.
    fn cancel(&mut self);
    fn speak(&mut self, text: &str);
}

impl Speaker for Vec<Directive> {
    fn cancel(&mut self) {
        self.push(Directive::CancelSpeech);
    }

    fn speak(&mut self, text: &str) {
        self.push(Directive::Speak { text: text.into() });
    }
}

/// Remembers the last spoken instruction so the same words are never
/// announced twice in a row. New instructions pre-empt, they do not queue.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SpeechGuide {
    last_spoken: Option<String>,
}

impl SpeechGuide {
    pub fn announce<S: Speaker + ?Sized>(&mut self, speaker: &mut S, text: &str) -> bool {
        if text.is_empty() || self.last_spoken.as_deref() == Some(text) {
            return false;
        }

        speaker.cancel();
        speaker.speak(text);
        self.last_spoken = Some(text.into());

        true
    }

    pub fn last_spoken(&self) -> Option<&str> {
        self.last_spoken.as_deref()
    }

    pub fn reset(&mut self) {
        self.last_spoken = None;
    }
}

#[cfg(test)]
#[derive(Default)]
struct RecordingSpeaker {
    log: Vec<String>,
}

#[cfg(test)]
impl Speaker for RecordingSpeaker {
    fn cancel(&mut self) {
        self.log.push("cancel".into());
    }

    fn speak(&mut self, text: &str) {
        self.log.push(format!("speak:{}", text));
    }
}

#[test]
fn identical_instructions_are_spoken_once() {
    let mut guide = SpeechGuide::default();
    let mut speaker = RecordingSpeaker::default();

    assert!(guide.announce(&mut speaker, "Head north on Bosso Road"));
    assert!(!guide.announce(&mut speaker, "Head north on Bosso Road"));

    let utterances = speaker.log.iter().filter(|l| l.starts_with("speak:")).count();
    assert_eq!(utterances, 1);
}

#[test]
fn distinct_instruction_cancels_before_speaking() {
    let mut guide = SpeechGuide::default();
    let mut speaker = RecordingSpeaker::default();

    guide.announce(&mut speaker, "Head north");
    guide.announce(&mut speaker, "Turn right");

    assert_eq!(
        speaker.log,
        vec!["cancel", "speak:Head north", "cancel", "speak:Turn right"]
    );
    assert_eq!(guide.last_spoken(), Some("Turn right"));
}

#[test]
fn repeats_allowed_after_something_else_was_said() {
    let mut guide = SpeechGuide::default();
    let mut directives: Vec<Directive> = Vec::new();

    guide.announce(&mut directives, "Turn left");
    guide.announce(&mut directives, "Continue");
    guide.announce(&mut directives, "Turn left");

    let spoken: Vec<&Directive> = directives
        .iter()
        .filter(|d| matches!(d, Directive::Speak { text: _ }))
        .collect();
    assert_eq!(spoken.len(), 3);
}

#[test]
fn empty_text_and_reset() {
    let mut guide = SpeechGuide::default();
    let mut directives: Vec<Directive> = Vec::new();

    assert!(!guide.announce(&mut directives, ""));
    assert!(directives.is_empty());

    guide.announce(&mut directives, "Arrive at destination");
    guide.reset();
    assert_eq!(guide.last_spoken(), None);
    assert!(guide.announce(&mut directives, "Arrive at destination"));
}
