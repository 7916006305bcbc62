//! Two equally-sized sample slots with a flag selecting the published one.
//!
//! A writer fills the inactive slot (for example with
//! [`Interpolator::interpolate`](crate::Interpolator::interpolate)) and then
//! flips the flag; a reader only ever looks at the active slot. Mutable access
//! is limited to the inactive slot, so the published samples can never be
//! half-written.

use std::sync::atomic::{AtomicBool, Ordering};

/// A pair of sample buffers with an atomic "which one is active" flag.
///
/// # Examples
///
/// ```
/// use peakmorph::DoubleBuffer;
///
/// let mut buffers = DoubleBuffer::new(4);
/// buffers.inactive_mut().copy_from_slice(&[0.0, 0.5, 1.0, 0.0]);
/// assert_eq!(buffers.active(), &[0.0; 4]);
///
/// buffers.swap();
/// assert_eq!(buffers.active(), &[0.0, 0.5, 1.0, 0.0]);
/// ```
#[derive(Debug)]
pub struct DoubleBuffer {
    slots: [Vec<f64>; 2],
    first_active: AtomicBool,
}

impl DoubleBuffer {
    /// Creates two zeroed slots of `len` samples; the first slot starts active.
    pub fn new(len: usize) -> Self {
        Self {
            slots: [vec![0.0; len], vec![0.0; len]],
            first_active: AtomicBool::new(true),
        }
    }

    /// Samples per slot.
    pub fn len(&self) -> usize {
        self.slots[0].len()
    }

    /// Returns `true` if the slots hold no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The published slot.
    pub fn active(&self) -> &[f64] {
        &self.slots[self.active_index()]
    }

    /// The slot being prepared for the next swap.
    pub fn inactive_mut(&mut self) -> &mut [f64] {
        let index = 1 - self.active_index();
        &mut self.slots[index]
    }

    /// Publishes the inactive slot.
    pub fn swap(&self) {
        self.first_active.fetch_xor(true, Ordering::AcqRel);
    }

    /// Fills the inactive slot with `write` and publishes it if writing succeeds.
    ///
    /// On error the active slot stays published.
    ///
    /// # Examples
    ///
    /// ```
    /// use peakmorph::{DoubleBuffer, Interpolator, TableDescriptor};
    ///
    /// let morph = Interpolator::from_descriptor(TableDescriptor::new(
    ///     vec![0.0, 1.0, 0.0, 0.0, 0.5, 0.0],
    ///     3,
    ///     vec![1, 1],
    /// ))
    /// .unwrap();
    ///
    /// let mut buffers = DoubleBuffer::new(3);
    /// buffers.publish_with(|out| morph.interpolate(1.0, out)).unwrap();
    /// assert_eq!(buffers.active(), &[0.0, 0.5, 0.0]);
    ///
    /// // out-of-range factor: nothing is published
    /// assert!(buffers.publish_with(|out| morph.interpolate(7.0, out)).is_err());
    /// assert_eq!(buffers.active(), &[0.0, 0.5, 0.0]);
    /// ```
    pub fn publish_with<E>(
        &mut self,
        write: impl FnOnce(&mut [f64]) -> Result<(), E>,
    ) -> Result<(), E> {
        write(self.inactive_mut())?;
        self.swap();
        Ok(())
    }

    fn active_index(&self) -> usize {
        if self.first_active.load(Ordering::Acquire) {
            0
        } else {
            1
        }
    }
}
