use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use morphimate_image::Rgb8;

use super::schedule::FrameSchedule;
use super::supplier::ImageSupplier;
use crate::config::MorphConfig;
use crate::error::MorphError;
use crate::session::MorphSession;

/// A rendered output frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The rendered image.
    pub image: Rgb8,
    /// The label of the image the window morphs away from.
    pub label: String,
    /// Position of the frame in the whole animation.
    pub index: usize,
}

/// Renders frames on a background thread into a bounded queue.
///
/// The producer blocks while `frame_buffer` frames are waiting, so frames are neither dropped
/// nor buffered without bound. It runs until [`FrameProducer::stop`] is called, the producer is
/// dropped, or the supplier or the session fails.
pub struct FrameProducer {
    receiver: Receiver<Frame>,
    stop: Arc<AtomicBool>,
    handle: JoinHandle<Result<(), MorphError>>,
}

impl FrameProducer {
    /// Validate `config` and start rendering frames from `supplier`.
    pub fn spawn<S>(supplier: S, config: MorphConfig) -> Result<Self, MorphError>
    where
        S: ImageSupplier + 'static,
    {
        config.validate()?;

        let (sender, receiver) = mpsc::sync_channel(config.frame_buffer);
        let stop = Arc::new(AtomicBool::new(false));

        let handle = std::thread::Builder::new()
            .name("morph-producer".into())
            .spawn({
                let stop = stop.clone();
                move || {
                    let result = produce(supplier, &config, &sender, &stop);
                    if let Err(e) = &result {
                        log::warn!("frame producer stopped with an error: {e}");
                    }
                    result
                }
            })
            .map_err(|e| MorphError::Spawn(e.to_string()))?;

        log::info!("frame producer started");

        Ok(Self {
            receiver,
            stop,
            handle,
        })
    }

    /// Block until the next frame, or `None` once the producer has finished.
    pub fn recv(&self) -> Option<Frame> {
        self.receiver.recv().ok()
    }

    /// Wait at most `timeout` for the next frame.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Frame, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Take the next frame if one is waiting.
    pub fn try_recv(&self) -> Result<Frame, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Whether the producer thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the producer, wait for it and return its result.
    ///
    /// Frames still in the queue are discarded.
    pub fn stop(self) -> Result<(), MorphError> {
        let Self {
            receiver,
            stop,
            handle,
        } = self;

        stop.store(true, Ordering::Relaxed);
        // unblocks a pending send
        drop(receiver);

        let result = handle.join().map_err(|_| MorphError::ProducerPanicked)?;
        log::info!("frame producer stopped");
        result
    }
}

fn produce<S: ImageSupplier>(
    mut supplier: S,
    config: &MorphConfig,
    sender: &SyncSender<Frame>,
    stop: &AtomicBool,
) -> Result<(), MorphError> {
    let source = supplier.next_image(config.size)?;
    let target = supplier.next_image(config.size)?;

    let mut label = source.label;
    let mut next_label = target.label;
    let mut session = MorphSession::from_config(
        (source.image, source.points),
        (target.image, target.points),
        config,
    )?;
    let mut index = 0;

    loop {
        for params in FrameSchedule::new(config.morph_steps, config.tweens_per_morph) {
            if stop.load(Ordering::Relaxed) {
                return Ok(());
            }

            let image = session.morph(params.morph, params.blend, params.tween)?;
            let frame = Frame {
                image,
                label: label.clone(),
                index,
            };
            if sender.send(frame).is_err() {
                log::debug!("frame receiver dropped");
                return Ok(());
            }
            index += 1;
        }

        if stop.load(Ordering::Relaxed) {
            return Ok(());
        }

        let next = supplier.next_image(config.size)?;
        session.advance_window(next.image, next.points)?;
        label = std::mem::replace(&mut next_label, next.label);
    }
}
