//! The caller's window into an otherwise opaque carving loop.

use image::RgbImage;

/// Returned from [`SeamObserver::on_seam`] to tell the session whether
/// to keep carving or unwind.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ControlFlow {
    /// Keep carving.
    Continue,
    /// Stop; the session returns `Err(CarveError::Cancelled { partial })`
    /// carrying the image as carved so far.
    Cancel,
}

/// Notified once per seam, after it has been chosen but before it is
/// applied to the image.
pub trait SeamObserver {
    /// Called with the image as it stands immediately before `seam` is
    /// removed or inserted, and the seam itself (one column index per
    /// row, or one row index per column post-transpose).
    fn on_seam(&mut self, image: &RgbImage, seam: &[u32]) -> ControlFlow;
}

impl SeamObserver for () {
    fn on_seam(&mut self, _image: &RgbImage, _seam: &[u32]) -> ControlFlow {
        ControlFlow::Continue
    }
}

impl<F> SeamObserver for F
where
    F: FnMut(&RgbImage, &[u32]) -> ControlFlow,
{
    fn on_seam(&mut self, image: &RgbImage, seam: &[u32]) -> ControlFlow {
        self(image, seam)
    }
}
