//! Audio backend using the Web Audio API
//!
//! Both effects are synthesized with oscillators, so no sound files ship.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{SoundEffect, SoundPlayer};
use crate::settings::Settings;

pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Gain applied to every effect, from [`Settings::effective_volume`]
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: Settings::default().effective_volume(),
        }
    }

    /// Take volume and mute from player settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Ding - fundamental plus a quieter overtone, long decay
    fn play_ding(&self, ctx: &AudioContext, vol: f32) {
        for (freq, level) in [(1318.5, 0.5), (2637.0, 0.15)] {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                continue;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.6)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.65).ok();
        }
    }

    /// Buzzer - two detuned low sawtooths
    fn play_buzzer(&self, ctx: &AudioContext, vol: f32) {
        for freq in [110.0, 116.0] {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sawtooth) else {
                continue;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain().set_value_at_time(vol * 0.25, t + 0.45).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.55)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.6).ok();
        }
    }
}

impl SoundPlayer for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Correct => self.play_ding(ctx, vol),
            SoundEffect::Incorrect => self.play_buzzer(ctx, vol),
        }
    }
}
