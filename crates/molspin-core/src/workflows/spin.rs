use crate::core::models::molecule::Molecule;
use crate::core::utils::geometry::Axis;
use crate::engine::config::SpinConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

/// The result of spinning a molecule: one rotated, depth-sorted clone per axis and step.
///
/// Every clone owns its own storage. Dropping the batch releases all of them.
#[derive(Debug, Clone)]
pub struct RotationBatch {
    config: SpinConfig,
    x: Vec<Molecule>,
    y: Vec<Molecule>,
    z: Vec<Molecule>,
}

impl RotationBatch {
    /// Total number of clones across all axes.
    pub fn len(&self) -> usize {
        self.x.len() + self.y.len() + self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    pub fn steps(&self) -> usize {
        self.config.steps
    }

    /// All clones rotated about `axis`, indexed by step.
    pub fn axis(&self, axis: Axis) -> &[Molecule] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    pub fn get(&self, axis: Axis, step: usize) -> Option<&Molecule> {
        self.axis(axis).get(step)
    }

    /// Rotation angle, in degrees, applied to the clones at `step`.
    pub fn angle_at(&self, step: usize) -> i32 {
        self.config.angle_at(step)
    }

    /// Iterates over `(axis, step, clone)` triples, axis-major.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, usize, &Molecule)> + '_ {
        Axis::ALL.into_iter().flat_map(move |axis| {
            self.axis(axis)
                .iter()
                .enumerate()
                .map(move |(step, molecule)| (axis, step, molecule))
        })
    }
}

/// Spins `molecule` with the default 72 x 5 degree schedule, producing 216 clones.
pub fn spin(molecule: &Molecule) -> Result<RotationBatch, EngineError> {
    run(molecule, &SpinConfig::default(), &ProgressReporter::new())
}

/// Produces a [`RotationBatch`] for `molecule` according to `config`.
///
/// For each step `i`, three deep copies of the source are rotated by
/// `config.angle_at(i)` about X, Y and Z respectively, then depth-sorted.
/// The source molecule is never modified.
///
/// # Errors
///
/// - [`EngineError::Config`] if `config` is invalid.
/// - [`EngineError::BatchAllocation`] if the batch itself cannot be reserved.
/// - [`EngineError::Molecule`] if a clone cannot be allocated; any clones
///   already produced are released before returning.
#[instrument(skip_all, name = "spin_workflow")]
pub fn run(
    molecule: &Molecule,
    config: &SpinConfig,
    reporter: &ProgressReporter,
) -> Result<RotationBatch, EngineError> {
    config.validate()?;
    let total = config
        .total_molecules()
        .ok_or(EngineError::BatchAllocation {
            requested: usize::MAX,
        })?;
    let mut batch = RotationBatch {
        config: *config,
        x: Vec::new(),
        y: Vec::new(),
        z: Vec::new(),
    };
    for clones in [&mut batch.x, &mut batch.y, &mut batch.z] {
        clones
            .try_reserve_exact(config.steps)
            .map_err(|_| EngineError::BatchAllocation { requested: total })?;
    }

    info!(
        atoms = molecule.atom_count(),
        bonds = molecule.bond_count(),
        steps = config.steps,
        step_degrees = config.step_degrees,
        "Generating rotation batch."
    );
    reporter.report(Progress::BatchStart {
        steps: config.steps,
        molecules: total,
    });

    for step in 0..config.steps {
        let degrees = config.angle_at(step);
        for axis in Axis::ALL {
            let mut clone = molecule.copy()?;
            clone.rotate_axis(axis, degrees);
            clone.sort();
            match axis {
                Axis::X => batch.x.push(clone),
                Axis::Y => batch.y.push(clone),
                Axis::Z => batch.z.push(clone),
            }
            reporter.report(Progress::CloneReady {
                axis,
                step,
                degrees,
            });
        }
    }

    reporter.report(Progress::BatchFinish {
        molecules: batch.len(),
    });
    info!(molecules = batch.len(), "Rotation batch complete.");
    Ok(batch)
}
