//! Writing result artifacts to disk.
//!
//! | File | Source |
//! |------|--------|
//! | `state_vector.json` | stored state-vector result, pretty JSON |
//! | `circuit_diagram.png` | simulation result |
//! | `histogram.png` | simulation result |
//! | `bloch_sphere_<i>.png` | state-vector result, one per image |

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::debug;

use qlab_hal::{SimulationResult, StateVectorResult};

use crate::error::{SessionError, SessionResult};

/// File name of the state-vector export.
pub const STATE_VECTOR_FILE: &str = "state_vector.json";

/// File name of the circuit diagram.
pub const CIRCUIT_DIAGRAM_FILE: &str = "circuit_diagram.png";

/// File name of the histogram.
pub const HISTOGRAM_FILE: &str = "histogram.png";

/// An image payload paired with the file it belongs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArtifact<'a> {
    /// Target file name.
    pub file_name: String,
    /// Base64 PNG data as received.
    pub data: &'a str,
}

/// Images carried by a simulation result.
pub fn simulation_images(result: &SimulationResult) -> Vec<ImageArtifact<'_>> {
    vec![
        ImageArtifact {
            file_name: CIRCUIT_DIAGRAM_FILE.to_string(),
            data: &result.circuit_diagram,
        },
        ImageArtifact {
            file_name: HISTOGRAM_FILE.to_string(),
            data: &result.histogram,
        },
    ]
}

/// Images carried by a state-vector result.
pub fn bloch_images(result: &StateVectorResult) -> Vec<ImageArtifact<'_>> {
    result
        .bloch_spheres()
        .iter()
        .enumerate()
        .map(|(i, data)| ImageArtifact {
            file_name: format!("bloch_sphere_{i}.png"),
            data,
        })
        .collect()
}

/// Serialize `result` as two-space indented JSON into `dir/state_vector.json`.
pub fn write_state_vector(dir: &Path, result: &StateVectorResult) -> SessionResult<PathBuf> {
    let json = serde_json::to_string_pretty(result)?;
    let path = dir.join(STATE_VECTOR_FILE);
    write_file(&path, json.as_bytes())?;
    Ok(path)
}

/// Decode one image and write it under `dir`.
pub fn write_image(dir: &Path, artifact: &ImageArtifact<'_>) -> SessionResult<PathBuf> {
    let bytes = BASE64
        .decode(artifact.data.trim())
        .map_err(|source| SessionError::Image {
            name: artifact.file_name.clone(),
            source,
        })?;
    let path = dir.join(&artifact.file_name);
    write_file(&path, &bytes)?;
    Ok(path)
}

fn write_file(path: &Path, contents: &[u8]) -> SessionResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| SessionError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
