//! Continuous frame production for an endless chain of morphs.
//!
//! An [`ImageSupplier`] provides images with control points, a [`FrameSchedule`] lays out the
//! session parameters of one window, and a [`FrameProducer`] renders the frames on a background
//! thread into a bounded queue.

mod producer;
mod schedule;
mod supplier;

pub use producer::{Frame, FrameProducer};
pub use schedule::{FrameParams, FrameSchedule};
pub use supplier::{with_frame_corners, ImageSupplier, StripeSupplier, SuppliedImage};
