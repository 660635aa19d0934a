use crate::errors::{Error, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Numbered frame path inside `frames_dir`, zero padded so ffmpeg's glob
/// picks the frames up in order.
pub fn frame_path(frames_dir: &Path, i_frame: usize) -> PathBuf {
    return frames_dir.join(format!("frame_{:06}.png", i_frame));
}

/// Stitch rendered frames into an MP4 by shelling out to ffmpeg. The frames
/// are left on disk, so a failed stitch (e.g. no ffmpeg on the host) loses
/// nothing.
pub fn stitch_frames(frames_dir: &Path, output: &Path, fps: usize) -> Result<()> {
    let pattern: PathBuf = frames_dir.join("frame_%06d.png");
    info!("stitching frames in {} to {}", frames_dir.display(), output.display());

    let status: ExitStatus = Command::new("ffmpeg")
        .args([
            "-y", // overwrite existing output
            "-framerate",
            &fps.to_string(),
            "-i",
        ])
        .arg(&pattern)
        .args(["-pix_fmt", "yuv420p"])
        .arg(output)
        .status()?;

    if !status.success() {
        warn!("ffmpeg exited with {}, frames kept in {}", status, frames_dir.display());
        return Err(Error::Render(format!("ffmpeg failed with {}", status)));
    }

    return Ok(());
}
