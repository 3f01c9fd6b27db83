//! # Trajectory Serialization Utilities
//!
//! Functions for saving and loading a run's frames.
//! Uses `serde` for serialization, `bincode` as the binary format and
//! `serde_json` for the export read by external renderers.

use crate::run::Trajectory;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

// --- Error Type ---
#[derive(thiserror::Error, Debug)]
pub enum SerializationError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization Error (Bincode): {0}")]
    Bincode(#[from] bincode::Error),
    #[error("Serialization Error (JSON): {0}")]
    Json(#[from] serde_json::Error),
    #[error("Trajectory holds no frames")]
    EmptyTrajectory,
}

// --- Binary Format ---

/// Saves a trajectory to a file in bincode format.
///
/// # Arguments
/// * `trajectory`: Frames to write, initial frame first.
/// * `path`: Destination file; created or truncated.
pub fn save<P: AsRef<Path>>(trajectory: &Trajectory, path: P) -> Result<(), SerializationError> {
    if trajectory.is_empty() {
        return Err(SerializationError::EmptyTrajectory);
    }
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, trajectory)?;
    writer.flush()?;
    info!(
        path = %path.as_ref().display(),
        frames = trajectory.len(),
        "trajectory saved"
    );
    Ok(())
}

/// Loads a trajectory written by [`save`].
///
/// Frames out of step order are kept as-is but reported, since a renderer
/// would play them back in file order.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Trajectory, SerializationError> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let trajectory: Trajectory = bincode::deserialize_from(reader)?;
    if trajectory.is_empty() {
        return Err(SerializationError::EmptyTrajectory);
    }
    warn_on_gaps(&trajectory);
    Ok(trajectory)
}

// --- JSON Export ---

/// Writes the trajectory as pretty-printed JSON.
pub fn export_json<P: AsRef<Path>>(
    trajectory: &Trajectory,
    path: P,
) -> Result<(), SerializationError> {
    if trajectory.is_empty() {
        return Err(SerializationError::EmptyTrajectory);
    }
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, trajectory)?;
    writer.flush()?;
    Ok(())
}

pub fn import_json<P: AsRef<Path>>(path: P) -> Result<Trajectory, SerializationError> {
    let file = File::open(path.as_ref())?;
    let trajectory: Trajectory = serde_json::from_reader(BufReader::new(file))?;
    if trajectory.is_empty() {
        return Err(SerializationError::EmptyTrajectory);
    }
    warn_on_gaps(&trajectory);
    Ok(trajectory)
}

fn warn_on_gaps(trajectory: &Trajectory) {
    for pair in trajectory.frames().windows(2) {
        let (prev, next) = (pair[0].step_index(), pair[1].step_index());
        if next != prev + 1 {
            warn!(prev, next, "non-consecutive step indices in loaded trajectory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::optim::SeedStrategy;
    use crate::run::Run;

    fn sample() -> Trajectory {
        let config = RunConfig {
            total_frames: 25,
            ..Default::default()
        };
        Run::new(config, SeedStrategy::Seeded(42))
            .unwrap()
            .collect_trajectory()
    }

    #[test]
    fn bincode_file_preserves_frames_exactly() {
        let traj = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.bin");
        save(&traj, &path).unwrap();
        assert_eq!(load(&path).unwrap(), traj);
    }

    #[test]
    fn json_export_is_readable_back() {
        let traj = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        export_json(&traj, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"step_index\""));
        assert!(text.contains("\"x_min\""));
        assert_eq!(import_json(&path).unwrap().len(), traj.len());
    }

    #[test]
    fn empty_trajectory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bin");
        assert!(matches!(
            save(&Trajectory::new(), &path),
            Err(SerializationError::EmptyTrajectory)
        ));
    }

    #[test]
    fn garbage_file_is_a_bincode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.bin");
        std::fs::write(&path, [0xffu8; 3]).unwrap();
        assert!(matches!(load(&path), Err(SerializationError::Bincode(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load("/no/such/trajectory.bin"),
            Err(SerializationError::Io(_))
        ));
    }
}
