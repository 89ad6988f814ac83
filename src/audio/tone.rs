use std::f32::consts::PI;

/// One note of the ringtone melody
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub frequency_hz: f32,
    /// Offset from the start of the cycle
    pub start_secs: f32,
    pub duration_secs: f32,
}

impl Note {
    fn contains(&self, t: f32) -> bool {
        t >= self.start_secs && t < self.start_secs + self.duration_secs
    }
}

/// A looping sequence of sine notes with short fades to avoid clicks
#[derive(Debug, Clone, PartialEq)]
pub struct ToneSequence {
    pub notes: Vec<Note>,
    pub cycle_secs: f32,
    pub fade_secs: f32,
    pub gain: f32,
}

impl Default for ToneSequence {
    /// C5, E5, G5, C6 ascending, 0.4s each, repeating every 2 seconds
    fn default() -> Self {
        Self::ascending(&[523.25, 659.25, 783.99, 1046.50], 0.4, 2.0)
    }
}

impl ToneSequence {
    /// Back-to-back notes of equal length starting at the top of each cycle
    pub fn ascending(frequencies: &[f32], note_secs: f32, cycle_secs: f32) -> Self {
        let notes = frequencies
            .iter()
            .enumerate()
            .map(|(i, &frequency_hz)| Note {
                frequency_hz,
                start_secs: i as f32 * note_secs,
                duration_secs: note_secs,
            })
            .collect();

        Self {
            notes,
            cycle_secs,
            fade_secs: 0.02,
            gain: 0.3,
        }
    }

    /// The note sounding at `t` seconds since playback started
    pub fn note_at(&self, t: f32) -> Option<&Note> {
        if self.cycle_secs <= 0.0 {
            return None;
        }
        let cycle_time = t.rem_euclid(self.cycle_secs);
        self.notes.iter().find(|note| note.contains(cycle_time))
    }

    /// Signal amplitude in `[-gain, gain]` at `t` seconds
    pub fn sample_at(&self, t: f32) -> f32 {
        let Some(note) = self.note_at(t) else {
            return 0.0;
        };

        let cycle_time = t.rem_euclid(self.cycle_secs);
        let note_time = cycle_time - note.start_secs;

        let envelope = if self.fade_secs > 0.0 {
            let fade_in = (note_time / self.fade_secs).min(1.0);
            let fade_out = ((note.duration_secs - note_time) / self.fade_secs).min(1.0);
            fade_in * fade_out
        } else {
            1.0
        };

        (2.0 * PI * note.frequency_hz * note_time).sin() * self.gain * envelope
    }
}
