//! One-shot loading and indexing of the reference data directory.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};
use vs_core::Curve;

use crate::error::{DataError, DataResult};
use crate::fluid::{CUSTOM_FLUID_NAME, Fluid, FluidTables};
use crate::schema::{CurveFile, CvTableFile, DiametersFile, IndexFile, ValveConstantsFile};
use crate::valve::{CvTable, Valve};

/// Immutable, fully validated reference data.
///
/// Constructed once at startup and passed by reference to every sizing
/// computation; there is no global registry and no invalidation path short
/// of rebuilding the store.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    valves: BTreeMap<String, Valve>,
    fluids: BTreeMap<String, Fluid>,
    reynolds_correction: Curve,
}

impl ReferenceStore {
    /// Load every table under `dir`. Any missing, malformed, or mutually
    /// inconsistent file is fatal.
    pub fn load(dir: &Path) -> DataResult<Self> {
        let valves_dir = dir.join("valves");
        let fluids_dir = dir.join("fluids");

        let valve_index: IndexFile = read_yaml(&valves_dir.join("index.yaml"))?;
        let mut valves = BTreeMap::new();
        for name in &valve_index.names {
            let valve = load_valve(&valves_dir.join(name), name)?;
            debug!(valve = %name, diameters = valve.cv.diameters().count(), "loaded valve");
            valves.insert(name.clone(), valve);
        }

        let reynolds_correction =
            load_reynolds_correction(&fluids_dir.join("reynolds_correction.yaml"))?;

        let fluid_index: IndexFile = read_yaml(&fluids_dir.join("index.yaml"))?;
        let mut fluids = BTreeMap::new();
        for name in &fluid_index.names {
            let fluid = load_fluid(&fluids_dir.join(name), name)?;
            debug!(fluid = %name, "loaded fluid");
            fluids.insert(name.clone(), fluid);
        }
        // The user-defined sentinel is always present, tables or not.
        fluids.insert(
            CUSTOM_FLUID_NAME.to_string(),
            Fluid::custom(CUSTOM_FLUID_NAME),
        );

        info!(
            valves = valves.len(),
            fluids = fluids.len(),
            "reference data loaded"
        );

        Ok(ReferenceStore {
            valves,
            fluids,
            reynolds_correction,
        })
    }

    /// Build a store from already-constructed parts. Intended for tests with
    /// synthetic reference data.
    pub fn from_parts(
        valves: Vec<Valve>,
        fluids: Vec<Fluid>,
        reynolds_correction: Curve,
    ) -> Self {
        ReferenceStore {
            valves: valves.into_iter().map(|v| (v.name.clone(), v)).collect(),
            fluids: fluids.into_iter().map(|f| (f.name.clone(), f)).collect(),
            reynolds_correction,
        }
    }

    pub fn valve(&self, name: &str) -> Option<&Valve> {
        self.valves.get(name)
    }

    pub fn fluid(&self, name: &str) -> Option<&Fluid> {
        self.fluids.get(name)
    }

    pub fn valves(&self) -> impl Iterator<Item = &Valve> {
        self.valves.values()
    }

    pub fn fluids(&self) -> impl Iterator<Item = &Fluid> {
        self.fluids.values()
    }

    pub fn reynolds_correction(&self) -> &Curve {
        &self.reynolds_correction
    }

    /// Valve names sorted for display (case- and punctuation-insensitive).
    pub fn valve_names(&self) -> Vec<&str> {
        sorted_names(self.valves.keys())
    }

    /// Fluid names sorted for display, with the sentinel last.
    pub fn fluid_names(&self) -> Vec<&str> {
        let mut names = sorted_names(self.fluids.keys().filter(|n| *n != CUSTOM_FLUID_NAME));
        if self.fluids.contains_key(CUSTOM_FLUID_NAME) {
            names.push(CUSTOM_FLUID_NAME);
        }
        names
    }
}

fn sorted_names<'a>(names: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut names: Vec<&str> = names.map(String::as_str).collect();
    names.sort_by_key(|n| normalized_key(n));
    names
}

/// Display-sort key: alphanumeric characters only, lowercased.
fn normalized_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> DataResult<T> {
    let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| DataError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

fn load_curve(path: &Path, what: &str) -> DataResult<Curve> {
    let file: CurveFile = read_yaml(path)?;
    Curve::new(file.points).map_err(|source| DataError::Curve {
        what: what.to_string(),
        source,
    })
}

fn load_valve(dir: &Path, name: &str) -> DataResult<Valve> {
    let cv_file: CvTableFile = read_yaml(&dir.join("cv.yaml"))?;
    let cv = CvTable::new(
        name,
        cv_file.openings,
        cv_file
            .rows
            .into_iter()
            .map(|row| (row.diameter, row.cv))
            .collect(),
    )?;

    let fl = load_curve(&dir.join("fl.yaml"), &format!("FL curve for valve '{name}'"))?;
    let constants: ValveConstantsFile = read_yaml(&dir.join("constants.yaml"))?;
    let diameters: DiametersFile = read_yaml(&dir.join("diameters.yaml"))?;

    Valve::new(
        name.to_string(),
        constants.style,
        cv,
        fl,
        diameters.available,
        constants.max_opening,
        constants.reynolds_factor,
        constants.critical_pressure_ratio,
        constants.max_velocity_without_erosion,
    )
}

fn load_fluid(dir: &Path, name: &str) -> DataResult<Fluid> {
    let curve = |file: &str, property: &str| {
        load_curve(
            &dir.join(file),
            &format!("{property} curve for fluid '{name}'"),
        )
    };

    let tables = FluidTables {
        specific_gravity: curve("specific_gravity.yaml", "specific gravity")?,
        vapor_pressure: curve("vapor_pressure.yaml", "vapor pressure")?,
        viscosity: curve("viscosity.yaml", "viscosity")?,
        speed_of_sound: curve("speed_of_sound.yaml", "speed of sound")?,
    };
    Ok(Fluid::tabulated(name, tables))
}

fn load_reynolds_correction(path: &Path) -> DataResult<Curve> {
    let curve = load_curve(path, "Reynolds correction table")?;
    if curve.points().any(|(re, factor)| re <= 0.0 || factor < 1.0) {
        return Err(DataError::InvalidValue {
            what: "Reynolds correction table".into(),
            reason: "Reynolds numbers must be positive and factors at least 1".into(),
        });
    }
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_key_strips_punctuation_and_case() {
        assert_eq!(normalized_key("Pinch PA"), "pinchpa");
        assert_eq!(normalized_key("HPBV-2"), "hpbv2");
    }

    #[test]
    fn from_parts_indexes_by_name() {
        let reynolds = Curve::new(vec![(0.01, 240.0), (5000.0, 1.0)]).unwrap();
        let store = ReferenceStore::from_parts(
            Vec::new(),
            vec![Fluid::custom(CUSTOM_FLUID_NAME)],
            reynolds,
        );
        assert!(store.fluid(CUSTOM_FLUID_NAME).is_some());
        assert!(store.valve("missing").is_none());
        assert_eq!(store.fluid_names(), vec![CUSTOM_FLUID_NAME]);
    }
}
