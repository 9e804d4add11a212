use crate::core::utils::geometry::Axis;

/// Events emitted while a rotation batch is generated.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    BatchStart { steps: usize, molecules: usize },
    /// One rotated, sorted clone was produced.
    CloneReady { axis: Axis, step: usize, degrees: i32 },
    BatchFinish { molecules: usize },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + 'a>;

/// Forwards [`Progress`] events to an optional observer.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    /// A reporter that discards every event.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(callback) = &self.callback {
            callback(event);
        }
    }
}
