use anyhow::{Result, anyhow};
use macroquad::audio::{PlaySoundParams, Sound, load_sound_from_bytes, play_sound};

use crate::game::GameEvent;

const SAMPLE_RATE: u32 = 44_100;

/// Simple WAV (PCM16 mono) sine tone.
pub fn tone(frequency_hz: f32, duration_seconds: f32, volume: f32) -> Vec<u8> {
    let num_samples = (duration_seconds * SAMPLE_RATE as f32) as u32;
    let block_align: u16 = 2; // mono 16-bit
    let byte_rate = SAMPLE_RATE * u32::from(block_align);
    let data_size = num_samples * 2;
    let mut data = Vec::with_capacity(data_size as usize + 44);

    // RIFF header
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&(36 + data_size).to_le_bytes());
    data.extend_from_slice(b"WAVE");
    // fmt chunk
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM
    data.extend_from_slice(&1u16.to_le_bytes()); // channels
    data.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    data.extend_from_slice(&byte_rate.to_le_bytes());
    data.extend_from_slice(&block_align.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes());
    // data chunk
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_size.to_le_bytes());

    let amplitude = volume.clamp(0.0, 1.0) * 0.7;
    for n in 0..num_samples {
        let t = n as f32 / SAMPLE_RATE as f32;
        let sample = (amplitude * (std::f32::consts::TAU * frequency_hz * t).sin() * i16::MAX as f32) as i16;
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}

/// Cue sounds, loaded once at startup and released when dropped.
pub struct Sounds {
    eat: Sound,
    die: Sound,
    select: Sound,
    selected: Sound,
    bonus_appear: Sound,
    bonus_eaten: Sound,
}

async fn load(name: &str, frequency_hz: f32, duration_seconds: f32) -> Result<Sound> {
    load_sound_from_bytes(&tone(frequency_hz, duration_seconds, 0.6))
        .await
        .map_err(|err| anyhow!("loading {name} sound: {err:?}"))
}

impl Sounds {
    pub async fn load() -> Result<Self> {
        Ok(Self {
            eat: load("eat", 880.0, 0.08).await?,
            die: load("die", 110.0, 0.25).await?,
            select: load("select", 440.0, 0.04).await?,
            selected: load("selected", 660.0, 0.1).await?,
            bonus_appear: load("bonus", 1320.0, 0.12).await?,
            bonus_eaten: load("bonus eaten", 990.0, 0.16).await?,
        })
    }

    fn cue(&self, event: GameEvent) -> Option<(&Sound, f32)> {
        match event {
            GameEvent::FoodEaten => Some((&self.eat, 0.35)),
            GameEvent::Crashed(_) => Some((&self.die, 0.6)),
            GameEvent::MenuMoved => Some((&self.select, 0.3)),
            GameEvent::MenuSelected => Some((&self.selected, 0.4)),
            GameEvent::BonusAppeared => Some((&self.bonus_appear, 0.4)),
            GameEvent::BonusEaten => Some((&self.bonus_eaten, 0.45)),
            GameEvent::BonusExpired | GameEvent::AudioToggled(_) => None,
        }
    }

    pub fn play(&self, events: &[GameEvent], enabled: bool) {
        if !enabled {
            return;
        }
        for &event in events {
            if let Some((sound, volume)) = self.cue(event) {
                play_sound(sound, PlaySoundParams { looped: false, volume });
            }
        }
    }
}
