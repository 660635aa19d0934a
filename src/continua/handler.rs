use crate::errors::{Error, Result};

/// Display order of the continuum bands.
pub const CONTINUA_NAMES: [&str; 6] = ["slow-", "slow+", "alfven-", "alfven+", "thermal", "doppler"];

pub const N_CONTINUA: usize = CONTINUA_NAMES.len();

const DEFAULT_COLORS: [&str; N_CONTINUA] = ["red", "red", "cyan", "cyan", "green", "grey"];

/// Holds the display colors for the continuum bands behind a validating
/// setter: a rejected assignment leaves the previous list untouched.
#[derive(Debug, Clone)]
pub struct ContinuaHandler {
    continua_colors: Vec<String>,
}

impl ContinuaHandler {
    pub fn new() -> ContinuaHandler {
        return ContinuaHandler {
            continua_colors: DEFAULT_COLORS.iter().map(|color| color.to_string()).collect(),
        };
    }

    pub fn continua_colors(&self) -> &[String] {
        return &self.continua_colors;
    }

    pub fn color_for(&self, name: &str) -> Option<&str> {
        let index: usize = CONTINUA_NAMES.iter().position(|&band| band == name)?;
        return Some(&self.continua_colors[index]);
    }

    /// Replace the color list. `None` means "no change"; a list of the wrong
    /// length or with empty entries is rejected before any mutation.
    pub fn set_continua_colors(&mut self, colors: Option<Vec<String>>) -> Result<()> {
        let Some(colors) = colors else {
            return Ok(());
        };
        if colors.len() != N_CONTINUA {
            return Err(Error::InvalidColors {
                expected: N_CONTINUA,
                actual: colors.len(),
            });
        }
        if colors.iter().any(|color| color.trim().is_empty()) {
            return Err(Error::InvalidColors {
                expected: N_CONTINUA,
                actual: colors.len(),
            });
        }
        self.continua_colors = colors;
        return Ok(());
    }
}

impl Default for ContinuaHandler {
    fn default() -> ContinuaHandler {
        return ContinuaHandler::new();
    }
}
