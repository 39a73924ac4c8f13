use birthday_core::{AudioBackend, AudioError, AudioOutput, GainEnvelope, ToneEvent, Waveform};
use wasm_bindgen::JsValue;
use web_sys as web;

const MASTER_GAIN: f32 = 0.8;

fn node_error(label: &str, e: JsValue) -> AudioError {
    log::error!("[audio] {} error: {:?}", label, e);
    AudioError::Node(format!("{label}: {e:?}"))
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, AudioError> {
    let g = web::GainNode::new(audio_ctx).map_err(|e| node_error(label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

/// Opens a fresh `AudioContext` per output. Browsers only allow this after
/// a user gesture, which is when the greeting asks for audio.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebAudioBackend;

pub struct WebAudioOutput {
    ctx: web::AudioContext,
    master: web::GainNode,
    closed: bool,
}

impl AudioBackend for WebAudioBackend {
    type Output = WebAudioOutput;

    fn open(&mut self) -> Result<WebAudioOutput, AudioError> {
        let ctx = web::AudioContext::new()
            .map_err(|e| AudioError::Unavailable(format!("{:?}", e)))?;
        let _ = ctx.resume();
        let master = create_gain(&ctx, MASTER_GAIN, "Master")?;
        master
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| node_error("Master connect", e))?;
        Ok(WebAudioOutput {
            ctx,
            master,
            closed: false,
        })
    }
}

impl WebAudioOutput {
    fn apply_envelope(&self, param: &web::AudioParam, ev: &ToneEvent) -> Result<(), JsValue> {
        let t0 = ev.start_sec;
        let t1 = ev.end_sec();
        match ev.gain {
            GainEnvelope::Swell {
                peak,
                attack_sec,
                floor,
            } => {
                param.set_value_at_time(0.0, t0)?;
                param.linear_ramp_to_value_at_time(peak, t0 + attack_sec as f64)?;
                param.exponential_ramp_to_value_at_time(floor, t1)?;
            }
            GainEnvelope::Decay { start, floor } => {
                param.set_value_at_time(start, t0)?;
                param.exponential_ramp_to_value_at_time(floor, t1)?;
            }
        }
        Ok(())
    }
}

impl AudioOutput for WebAudioOutput {
    fn current_time(&self) -> f64 {
        self.ctx.current_time()
    }

    fn play(&mut self, ev: &ToneEvent) -> Result<(), AudioError> {
        if self.closed {
            return Err(AudioError::Node("context closed".into()));
        }
        let osc = web::OscillatorNode::new(&self.ctx).map_err(|e| node_error("Oscillator", e))?;
        osc.set_type(match ev.waveform {
            Waveform::Sine => web::OscillatorType::Sine,
            Waveform::Sawtooth => web::OscillatorType::Sawtooth,
        });
        let freq = osc.frequency();
        freq.set_value_at_time(ev.frequency.start_hz, ev.start_sec)
            .map_err(|e| node_error("frequency", e))?;
        if !ev.frequency.is_constant() {
            freq.exponential_ramp_to_value_at_time(ev.frequency.end_hz, ev.end_sec())
                .map_err(|e| node_error("frequency ramp", e))?;
        }

        let gain = create_gain(&self.ctx, 0.0, "Tone gain")?;
        self.apply_envelope(&gain.gain(), ev)
            .map_err(|e| node_error("envelope", e))?;

        osc.connect_with_audio_node(&gain)
            .map_err(|e| node_error("Oscillator connect", e))?;
        gain.connect_with_audio_node(&self.master)
            .map_err(|e| node_error("Tone gain connect", e))?;
        osc.start_with_when(ev.start_sec)
            .map_err(|e| node_error("start", e))?;
        osc.stop_with_when(ev.end_sec())
            .map_err(|e| node_error("stop", e))?;
        Ok(())
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let _ = self.master.disconnect();
        let _ = self.ctx.close();
    }
}
