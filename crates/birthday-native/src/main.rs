use std::sync::{Arc, Mutex};
use std::time::Duration;

use birthday_core::{
    AudioBackend, AudioError, AudioOutput, Clock, ElementKind, Greeting, GreetingConfig,
    MonotonicClock, ShellEvent, Synth, ToneEvent,
};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

const FRAME: Duration = Duration::from_millis(16);
const RUN_SECS: u64 = 30;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut greeting =
        Greeting::with_config(MonotonicClock::new(), CpalBackend, GreetingConfig::default())?;
    greeting.mount();
    log::info!("[native] preview running for {}s", RUN_SECS);

    let script = preview_script();
    let mut next_step = 0usize;
    let mut next_report = 0;
    let end = RUN_SECS * 1000;

    while greeting.now() < end {
        let now = greeting.now();
        while next_step < script.len() && script[next_step].0 <= now {
            run_step(&mut greeting, script[next_step].1);
            next_step += 1;
        }
        greeting.tick();
        for event in greeting.drain_events() {
            log_event(&greeting, event);
        }
        // the preview has no DOM; changes are only counted
        greeting.registry_mut().drain_changes();
        if now >= next_report {
            let r = greeting.registry();
            log::info!(
                "[native] t={}ms particles={} bubbles={} confetti={} wishes={}",
                now,
                r.count_where(|k| matches!(k, ElementKind::Particle { .. })),
                r.count_where(|k| matches!(k, ElementKind::Bubble { .. })),
                r.count_where(|k| matches!(k, ElementKind::ConfettiBurst { .. })),
                greeting.wishes().len()
            );
            next_report = now + 5_000;
        }
        std::thread::sleep(FRAME);
    }

    greeting.unmount();
    for event in greeting.drain_events() {
        log_event(&greeting, event);
    }
    log::info!("[native] done");
    Ok(())
}

#[derive(Clone, Copy, Debug)]
enum Step {
    Surprise,
    Wish(&'static str),
    Cut,
    Cake,
    ToggleMusic,
    CloseCard,
}

fn preview_script() -> Vec<(u64, Step)> {
    vec![
        (500, Step::Surprise),
        (1_500, Step::Wish("Many happy returns!")),
        (2_500, Step::Cut),
        (3_000, Step::Cake),
        (3_100, Step::Cut),
        (6_000, Step::Wish("More cake, please")),
        (8_000, Step::CloseCard),
        (12_000, Step::Cake),
        (14_000, Step::Cake),
        (20_000, Step::ToggleMusic),
        (24_000, Step::ToggleMusic),
    ]
}

fn run_step<C: Clock, B: AudioBackend>(greeting: &mut Greeting<C, B>, step: Step) {
    log::info!("[native] {:?}", step);
    match step {
        Step::Surprise => {
            greeting.click_surprise();
        }
        Step::Wish(text) => {
            if let Err(e) = greeting.submit_wish(text) {
                log::warn!("[native] wish refused: {}", e);
            }
        }
        Step::Cut => {
            greeting.cut_cake();
        }
        Step::Cake => {
            greeting.click_cake();
        }
        Step::ToggleMusic => {
            greeting.toggle_music();
        }
        Step::CloseCard => greeting.close_card(),
    }
}

fn log_event<C: Clock, B: AudioBackend>(greeting: &Greeting<C, B>, event: ShellEvent) {
    match event {
        ShellEvent::WishAdded(id) => {
            let text = greeting
                .wishes()
                .wishes()
                .find(|w| w.id == id)
                .map(|w| w.message.as_str())
                .unwrap_or("");
            log::info!("[native] wish added: {:?}", text);
        }
        ShellEvent::StageChanged(stage) => log::info!("[native] cake {}", stage.as_str()),
        other => log::info!("[native] {:?}", other),
    }
}

// ---------------- Native audio (cpal) ----------------

/// Opens one cpal output stream per [`AudioOutput`], each with its own
/// software synth.
struct CpalBackend;

struct CpalOutput {
    synth: Arc<Mutex<Synth>>,
    stream: Option<cpal::Stream>,
}

impl AudioBackend for CpalBackend {
    type Output = CpalOutput;

    fn open(&mut self) -> Result<CpalOutput, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::Unavailable("no output device".into()))?;
        let config = device
            .default_output_config()
            .map_err(|e| AudioError::Unavailable(e.to_string()))?;
        let channels = config.channels() as usize;
        let synth = Arc::new(Mutex::new(Synth::new(config.sample_rate().0 as f32)));

        let err_fn = |err: cpal::StreamError| log::error!("[audio] stream error: {err}");
        let stream_config: cpal::StreamConfig = config.clone().into();
        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &stream_config, channels, Arc::clone(&synth), err_fn)
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &stream_config, channels, Arc::clone(&synth), err_fn)
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &stream_config, channels, Arc::clone(&synth), err_fn)
            }
            other => {
                return Err(AudioError::Unavailable(format!(
                    "unsupported sample format {other:?}"
                )))
            }
        }
        .map_err(|e| AudioError::Unavailable(e.to_string()))?;
        stream.play().map_err(|_| AudioError::Blocked)?;

        log::info!(
            "[audio] output open: {} Hz, {} channel(s)",
            stream_config.sample_rate.0,
            channels
        );
        Ok(CpalOutput {
            synth,
            stream: Some(stream),
        })
    }
}

impl AudioOutput for CpalOutput {
    fn current_time(&self) -> f64 {
        self.synth.lock().map(|s| s.current_time()).unwrap_or(0.0)
    }

    fn play(&mut self, event: &ToneEvent) -> Result<(), AudioError> {
        if self.stream.is_none() {
            return Err(AudioError::Node("output closed".into()));
        }
        let mut synth = self
            .synth
            .lock()
            .map_err(|_| AudioError::Node("synth lock poisoned".into()))?;
        synth.schedule(*event);
        Ok(())
    }

    fn close(&mut self) {
        if let Ok(mut synth) = self.synth.lock() {
            synth.clear();
        }
        self.stream = None;
    }
}

/// Mono synth output copied to every channel of the device frame.
fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    synth: Arc<Mutex<Synth>>,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let mut mono: Vec<f32> = Vec::new();
    device.build_output_stream(
        config,
        move |data: &mut [T], _| {
            let frames = data.len() / channels.max(1);
            mono.resize(frames, 0.0);
            match synth.lock() {
                Ok(mut s) => s.render(&mut mono),
                Err(_) => mono.fill(0.0),
            }
            for (frame, sample) in data.chunks_mut(channels.max(1)).zip(mono.iter()) {
                let value = T::from_sample(*sample);
                for out in frame.iter_mut() {
                    *out = value;
                }
            }
        },
        err_fn,
        None,
    )
}
