// Shared fakes for the core integration tests.

#![allow(dead_code)]

use birthday_core::{AudioBackend, AudioError, AudioOutput, ToneEvent};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default, Debug)]
pub struct AudioLog {
    pub opened: usize,
    pub closed: usize,
    pub played: Vec<ToneEvent>,
}

/// Backend whose outputs write everything into a shared log. The audio clock
/// is a shared cell the test moves by hand.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    pub log: Rc<RefCell<AudioLog>>,
    pub audio_time: Rc<RefCell<f64>>,
    pub fail_open: bool,
}

impl RecordingBackend {
    pub fn failing() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }

    pub fn played(&self) -> Vec<ToneEvent> {
        self.log.borrow().played.clone()
    }

    pub fn opened(&self) -> usize {
        self.log.borrow().opened
    }

    pub fn closed(&self) -> usize {
        self.log.borrow().closed
    }
}

pub struct RecordingOutput {
    log: Rc<RefCell<AudioLog>>,
    audio_time: Rc<RefCell<f64>>,
}

impl AudioOutput for RecordingOutput {
    fn current_time(&self) -> f64 {
        *self.audio_time.borrow()
    }

    fn play(&mut self, event: &ToneEvent) -> Result<(), AudioError> {
        self.log.borrow_mut().played.push(*event);
        Ok(())
    }

    fn close(&mut self) {
        self.log.borrow_mut().closed += 1;
    }
}

impl AudioBackend for RecordingBackend {
    type Output = RecordingOutput;

    fn open(&mut self) -> Result<RecordingOutput, AudioError> {
        if self.fail_open {
            return Err(AudioError::Blocked);
        }
        self.log.borrow_mut().opened += 1;
        Ok(RecordingOutput {
            log: self.log.clone(),
            audio_time: self.audio_time.clone(),
        })
    }
}
