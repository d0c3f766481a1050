//! The model-view-update loop: [`Model`], [`Effect`], [`App`].

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use gridsearch_core::{Canvas, Color, Context, Driver, Glyph, Input, compute_frame};

use crate::model::Msg;

/// A side-effect returned by [`Model::update`].
pub enum Effect {
    /// A long-running job on a background thread. It may send any number of
    /// messages and should stop once its context is cancelled.
    Sub(Box<dyn FnOnce(Context, Sender<Msg>) + Send>),
    /// Cancel the running job, if any.
    Cancel,
    /// Stop the application loop.
    End,
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sub(_) => f.write_str("Effect::Sub(..)"),
            Self::Cancel => f.write_str("Effect::Cancel"),
            Self::End => f.write_str("Effect::End"),
        }
    }
}

pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `canvas`.
    fn draw(&self, canvas: &mut Canvas);
}

struct Job {
    ctx: Context,
    handle: JoinHandle<()>,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
    tx: Sender<Msg>,
    rx: Receiver<Msg>,
    job: Option<Job>,
}

/// The message channel an [`App`] reads from. Create it up front when
/// something, such as a logger, must feed the loop before it exists.
pub fn channel() -> (Sender<Msg>, Receiver<Msg>) {
    mpsc::channel()
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(
        model: M,
        driver: D,
        (width, height): (i32, i32),
        (tx, rx): (Sender<Msg>, Receiver<Msg>),
    ) -> Self {
        Self {
            model,
            driver,
            width,
            height,
            tx,
            rx,
            job: None,
        }
    }

    /// Run the loop until the model returns [`Effect::End`].
    ///
    /// Each round polls the driver, drains every pending message (input and
    /// job events alike) through the model, then draws and flushes the
    /// changed cells.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;

        let ctx = Context::new();
        self.tx.send(Msg::Init).ok();

        let mut prev = Canvas::new(self.width, self.height);
        let mut curr = Canvas::new(self.width, self.height);

        let result = self.event_loop(&ctx, &mut prev, &mut curr);
        self.stop_job();
        self.driver.close();
        result
    }

    fn event_loop(
        &mut self,
        ctx: &Context,
        prev: &mut Canvas,
        curr: &mut Canvas,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // Paint the first frame in full.
        invalidate(prev);
        self.process_pending(ctx, prev, curr)?;

        while !ctx.is_done() {
            if let Err(e) = self.driver.poll_msgs(ctx, &self.tx) {
                ctx.cancel();
                return Err(e);
            }
            if ctx.is_done() {
                break;
            }
            self.process_pending(ctx, prev, curr)?;
        }
        Ok(())
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        ctx: &Context,
        prev: &mut Canvas,
        curr: &mut Canvas,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = self.rx.try_recv() {
            needs_draw = true;
            if let Msg::Input(Input::Screen { width, height }) = &msg {
                // The terminal may have dropped what was on screen.
                log::debug!("terminal resized to {width}x{height}");
                invalidate(prev);
            }
            if let Some(effect) = self.model.update(msg) {
                if self.handle_effect(effect, ctx) {
                    return Ok(());
                }
            }
        }

        if needs_draw {
            self.model.draw(curr);
            let frame = compute_frame(prev, curr);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            prev.clone_from(curr);
        }
        Ok(())
    }

    /// Returns `true` if the app should stop.
    fn handle_effect(&mut self, effect: Effect, ctx: &Context) -> bool {
        match effect {
            Effect::End => {
                ctx.cancel();
                true
            }
            Effect::Cancel => {
                if let Some(job) = &self.job {
                    log::debug!("cancelling the running job");
                    job.ctx.cancel();
                }
                false
            }
            Effect::Sub(f) => {
                // A previous job may still be winding down after its last
                // message; the new one replaces it.
                self.stop_job();
                let job_ctx = Context::new();
                let (c, tx) = (job_ctx.clone(), self.tx.clone());
                let handle = thread::spawn(move || f(c, tx));
                self.job = Some(Job {
                    ctx: job_ctx,
                    handle,
                });
                false
            }
        }
    }

    /// Cancel the job, if any, and wait for it.
    fn stop_job(&mut self) {
        if let Some(job) = self.job.take() {
            job.ctx.cancel();
            if job.handle.join().is_err() {
                log::error!("background job panicked");
            }
        }
    }
}

/// Make every cell differ from anything a model draws.
fn invalidate(canvas: &mut Canvas) {
    canvas.fill(Glyph::new('\0', Color::DEFAULT, Color::DEFAULT));
}
