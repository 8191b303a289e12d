//! Native document kernel seam
//!
//! The kernel trait, opaque handle tokens, and the available backends.

mod memory;
mod traits;

pub use memory::MemoryKernel;
pub use traits::{
    ContainerHandle, DefinitionHandle, DocumentKernel, EntityHandle, KernelError, KernelResult,
    ModelHandle, NullKernel, SceneHandle,
};

/// Get the default document kernel backend
pub fn default_kernel() -> Box<dyn DocumentKernel> {
    Box::new(MemoryKernel::new())
}

/// Process-wide kernel session.
///
/// Pairs [`DocumentKernel::startup`] with [`DocumentKernel::shutdown`].
/// Acquire once, keep alive for the duration of all document operations.
/// Teardown failures are logged rather than raised, since `Drop` cannot
/// propagate.
pub struct Session<'k> {
    kernel: &'k dyn DocumentKernel,
}

impl<'k> Session<'k> {
    /// Initialize the kernel and return the guard
    pub fn open(kernel: &'k dyn DocumentKernel) -> KernelResult<Self> {
        kernel.startup()?;
        Ok(Self { kernel })
    }

    /// The kernel this session guards
    pub fn kernel(&self) -> &'k dyn DocumentKernel {
        self.kernel
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if let Err(error) = self.kernel.shutdown() {
            tracing::warn!(%error, "kernel shutdown failed");
        }
    }
}
