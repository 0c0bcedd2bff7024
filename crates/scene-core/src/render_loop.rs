//! Per-frame update-and-draw sequence.
//!
//! The host owns scheduling (for the browser, `requestAnimationFrame`); each
//! callback runs [`RenderLoop::tick`] once and then reschedules. The loop
//! has a single running state and no recovery path: a failed draw is
//! reported to the caller and the next frame proceeds as usual.

use crate::camera::PerspectiveCamera;
use crate::clock::TimeSource;
use crate::scene::SceneGraph;
use crate::session::SceneSession;

/// Draws one frame of a scene through a camera.
pub trait Renderer {
    type Error: std::fmt::Debug;
    fn draw(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) -> Result<(), Self::Error>;
}

/// Receives one update per frame (the on-screen stats overlay).
pub trait StatsSink {
    fn update(&mut self, now_secs: f32);
}

impl<R: Renderer> Renderer for Option<R> {
    type Error = R::Error;
    fn draw(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) -> Result<(), R::Error> {
        match self {
            Some(r) => r.draw(scene, camera),
            None => Ok(()),
        }
    }
}

impl<S: StatsSink> StatsSink for Option<S> {
    fn update(&mut self, now_secs: f32) {
        if let Some(s) = self {
            s.update(now_secs);
        }
    }
}

impl StatsSink for crate::stats::FrameStats {
    fn update(&mut self, now_secs: f32) {
        self.record(now_secs);
    }
}

pub struct RenderLoop<C: TimeSource> {
    clock: C,
    frames: u64,
}

impl<C: TimeSource> RenderLoop<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, frames: 0 }
    }

    /// One iteration: orbit step, animations, stats, draw.
    pub fn tick<R: Renderer, S: StatsSink>(
        &mut self,
        session: &mut SceneSession,
        renderer: &mut R,
        stats: &mut S,
    ) -> Result<(), R::Error> {
        session.step_orbit();
        let elapsed = self.clock.elapsed_secs();
        session.animate(elapsed);
        stats.update(elapsed);
        self.frames += 1;
        renderer.draw(session.scene(), session.camera())
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
