use crate::errors::{Error, Result};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration handed to the external Legolas solver. Mirrors the namelist
/// groups of a parfile; the parameter map carries the equilibrium constants
/// (k2, k3, cte_rho0, ...) verbatim. Ordered map, so generated parfiles are
/// byte-stable between runs.
#[derive(Debug, Clone)]
pub struct LegolasConfig {
    pub geometry: String,
    pub x_start: f64,
    pub x_end: f64,
    pub gridpoints: usize,
    pub parameters: BTreeMap<String, f64>,
    pub equilibrium_type: String,
    pub flow: bool,
    pub external_gravity: bool,
    pub logging_level: usize,
    pub show_results: bool,
    pub write_eigenfunctions: bool,
    pub write_matrices: bool,
    pub basename_datfile: String,
    pub basename_logfile: String,
    pub output_folder: PathBuf,
}

impl LegolasConfig {
    pub fn new(equilibrium_type: &str, output_folder: &Path) -> LegolasConfig {
        return LegolasConfig {
            geometry: "Cartesian".to_string(),
            x_start: 0.0,
            x_end: 1.0,
            gridpoints: 51,
            parameters: BTreeMap::new(),
            equilibrium_type: equilibrium_type.to_string(),
            flow: false,
            external_gravity: false,
            logging_level: 0,
            show_results: false,
            write_eigenfunctions: false,
            write_matrices: false,
            basename_datfile: equilibrium_type.to_string(),
            basename_logfile: equilibrium_type.to_string(),
            output_folder: output_folder.to_path_buf(),
        };
    }

    pub fn with_parameter(mut self, name: &str, value: f64) -> LegolasConfig {
        self.parameters.insert(name.to_string(), value);
        return self;
    }

    pub fn validate(&self) -> Result<()> {
        if self.gridpoints == 0 {
            return Err(Error::Config("gridpoints must be positive".to_string()));
        }
        if self.x_end <= self.x_start {
            return Err(Error::Config(format!("x range is empty (x_start={}, x_end={})", self.x_start, self.x_end)));
        }
        if self.geometry != "Cartesian" && self.geometry != "cylindrical" {
            return Err(Error::Config(format!("unknown geometry '{}'", self.geometry)));
        }
        if self.equilibrium_type.is_empty() {
            return Err(Error::Config("equilibrium_type must be set".to_string()));
        }
        return Ok(());
    }

    /// Render the Fortran namelist text of this configuration.
    pub fn to_namelist(&self) -> Result<String> {
        self.validate()?;

        let mut text: String = String::new();
        let _ = writeln!(text, "&gridlist");
        let _ = writeln!(text, "  geometry = '{}'", self.geometry);
        let _ = writeln!(text, "  x_start = {:?}", self.x_start);
        let _ = writeln!(text, "  x_end = {:?}", self.x_end);
        let _ = writeln!(text, "  gridpoints = {}", self.gridpoints);
        let _ = writeln!(text, "/\n");

        let _ = writeln!(text, "&equilibriumlist");
        let _ = writeln!(text, "  equilibrium_type = '{}'", self.equilibrium_type);
        let _ = writeln!(text, "  use_defaults = .false.");
        let _ = writeln!(text, "/\n");

        let _ = writeln!(text, "&physicslist");
        let _ = writeln!(text, "  flow = {}", fortran_bool(self.flow));
        let _ = writeln!(text, "  external_gravity = {}", fortran_bool(self.external_gravity));
        let _ = writeln!(text, "/\n");

        if !self.parameters.is_empty() {
            let _ = writeln!(text, "&paramlist");
            for (name, value) in &self.parameters {
                let _ = writeln!(text, "  {} = {:?}", name, value);
            }
            let _ = writeln!(text, "/\n");
        }

        let _ = writeln!(text, "&savelist");
        let _ = writeln!(text, "  write_eigenfunctions = {}", fortran_bool(self.write_eigenfunctions));
        let _ = writeln!(text, "  write_matrices = {}", fortran_bool(self.write_matrices));
        let _ = writeln!(text, "  show_results = {}", fortran_bool(self.show_results));
        let _ = writeln!(text, "  logging_level = {}", self.logging_level);
        let _ = writeln!(text, "  basename_datfile = '{}'", self.basename_datfile);
        let _ = writeln!(text, "  basename_logfile = '{}'", self.basename_logfile);
        let _ = writeln!(text, "  output_folder = '{}'", self.output_folder.display());
        let _ = writeln!(text, "/");

        return Ok(text);
    }

    /// Write the parfile next to the configured output folder and return its
    /// path.
    pub fn write_parfile(&self, basename: &str) -> Result<PathBuf> {
        let namelist: String = self.to_namelist()?;
        fs::create_dir_all(&self.output_folder)?;
        let path: PathBuf = self.output_folder.join(format!("{}.par", basename));
        fs::write(&path, namelist)?;
        return Ok(path);
    }
}

fn fortran_bool(value: bool) -> &'static str {
    if value { ".true." } else { ".false." }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namelist_contains_all_groups() {
        let config: LegolasConfig = LegolasConfig::new("kelvin_helmholtz", Path::new("/tmp/legolas_output"))
            .with_parameter("k2", 0.0)
            .with_parameter("k3", 1.0)
            .with_parameter("cte_rho0", 1.0);
        let namelist: String = config.to_namelist().unwrap();

        for group in ["&gridlist", "&equilibriumlist", "&physicslist", "&paramlist", "&savelist"] {
            assert!(namelist.contains(group), "missing group {}", group);
        }
        assert!(namelist.contains("equilibrium_type = 'kelvin_helmholtz'"));
        assert!(namelist.contains("k3 = 1.0"));
        assert!(namelist.contains("flow = .false."));
    }

    #[test]
    fn test_parameters_are_ordered() {
        let config: LegolasConfig = LegolasConfig::new("adiabatic_homo", Path::new("/tmp/legolas_output"))
            .with_parameter("k3", 1.0)
            .with_parameter("k2", 0.0);
        let namelist: String = config.to_namelist().unwrap();
        let k2_position: usize = namelist.find("k2 = ").unwrap();
        let k3_position: usize = namelist.find("k3 = ").unwrap();
        assert!(k2_position < k3_position);
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let mut config: LegolasConfig = LegolasConfig::new("adiabatic_homo", Path::new("/tmp/legolas_output"));
        config.gridpoints = 0;
        assert!(config.validate().is_err());

        let mut config: LegolasConfig = LegolasConfig::new("adiabatic_homo", Path::new("/tmp/legolas_output"));
        config.geometry = "toroidal".to_string();
        assert!(config.validate().is_err());

        let mut config: LegolasConfig = LegolasConfig::new("adiabatic_homo", Path::new("/tmp/legolas_output"));
        config.x_end = config.x_start;
        assert!(config.validate().is_err());
    }
}
