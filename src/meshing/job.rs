//! Background chunk meshing on the rayon pool.
//!
//! ```ignore
//! let mut job = MeshChunkJob::spawn(generator.clone(), volume.clone(), region);
//!
//! // Poll each frame
//! if let Some(result) = job.poll() {
//!     upload(result?);
//! }
//! ```

use std::sync::Arc;

use crossbeam_channel::{self as channel, Receiver, TryRecvError};

use crate::core::{Error, Result};
use crate::meshing::chunk::MeshChunk;
use crate::meshing::generator::MeshChunkGenerator;
use crate::voxel::{ChunkRegion, VoxelVolume};

/// A single chunk being meshed off the calling thread.
///
/// Dropping the job cancels delivery; the worker finishes and its result is
/// discarded.
pub struct MeshChunkJob {
    region: ChunkRegion,
    receiver: Option<Receiver<Result<MeshChunk>>>,
}

impl MeshChunkJob {
    /// Start meshing `region` of `volume`.
    ///
    /// The generator is shared, so registering rules while jobs run needs a
    /// separate generator (or waiting for the jobs first).
    pub fn spawn<V: VoxelVolume + 'static>(
        generator: Arc<MeshChunkGenerator>,
        volume: Arc<V>,
        region: ChunkRegion,
    ) -> Self {
        let (sender, receiver) = channel::bounded(1);

        rayon::spawn(move || {
            let result = generator.generate_chunk(&*volume, region);
            // Receiver dropped = cancelled
            let _ = sender.send(result);
        });

        Self {
            region,
            receiver: Some(receiver),
        }
    }

    pub fn region(&self) -> ChunkRegion {
        self.region
    }

    /// Check if the result hasn't been taken yet
    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Take the result if it's ready (non-blocking).
    ///
    /// Returns `None` while the worker is running and after the result has
    /// been taken.
    pub fn poll(&mut self) -> Option<Result<MeshChunk>> {
        let receiver = self.receiver.as_ref()?;

        match receiver.try_recv() {
            Ok(result) => {
                self.receiver = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.receiver = None;
                log::error!("Mesh job for {:?} dropped its result", self.region);
                Some(Err(Error::JobAborted))
            }
        }
    }

    /// Block until the chunk is meshed.
    pub fn wait(mut self) -> Result<MeshChunk> {
        let receiver = self.receiver.take().ok_or(Error::JobAborted)?;
        receiver.recv().map_err(|_| Error::JobAborted)?
    }
}
