//! # Dispatch Registry
//!
//! Maps shape identifiers to pipeline descriptors and runs the pipeline:
//!
//! ```text
//! builder ──► [view rotation + projection] ──► [composer] ──► merge
//! ```
//!
//! The descriptor table is built once per process and never mutated.

use crate::compound::{
    compose, AxisShift, Experimental, Explicit, Nested, Rotational, TransformSchedule,
};
use crate::config::EngineConfig;
use crate::error::GeometryError;
use crate::merge::{check_limits, merge, MergeOptions};
use crate::mesh::{BaseType, GeometryBuffer, GeometryMetadata};
use crate::params::{validate_instance_count, ShapeParameters};
use crate::primitives::{cells, parametric, platonic, sphere, BuildFn, RawShape};
use crate::projection::{project_polytope, rotation4, Plane4, Projection, VIEW_TILT};
use config::constants::{
    DEFAULT_AXIS_SHIFT, EXPERIMENTAL_RATIO, EXPERIMENTAL_STEP, EXPERIMENTAL_TWIST,
    NESTED_CUBE_RATIO, NESTED_SPHERE_RATIO, NESTED_TESSERACT_RATIO,
};
use glam::{DMat4, DVec3};
use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Identifier of a registered shape pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeId {
    Icosahedron,
    Octahedron,
    Tetrahedron,
    Sphere,
    CompoundSphere,
    Hypercube,
    SimpleCompoundHypercube,
    Cube,
    Box,
    CompoundTesseract,
    MegaTesseract,
    MegaTesseract2,
    MegaTesseract3,
    MegaTesseract4,
    Cell16,
    Cell24,
    Compound24Cell,
    Cell120,
    Compound120Cell,
    Cell600,
    Compound600Cell,
    QuantumManifold,
    CompoundQuantumManifold,
    MobiusSphere,
}

impl ShapeId {
    /// Every registered identifier, in table order.
    pub const ALL: [ShapeId; 24] = [
        ShapeId::Icosahedron,
        ShapeId::Octahedron,
        ShapeId::Tetrahedron,
        ShapeId::Sphere,
        ShapeId::CompoundSphere,
        ShapeId::Hypercube,
        ShapeId::SimpleCompoundHypercube,
        ShapeId::Cube,
        ShapeId::Box,
        ShapeId::CompoundTesseract,
        ShapeId::MegaTesseract,
        ShapeId::MegaTesseract2,
        ShapeId::MegaTesseract3,
        ShapeId::MegaTesseract4,
        ShapeId::Cell16,
        ShapeId::Cell24,
        ShapeId::Compound24Cell,
        ShapeId::Cell120,
        ShapeId::Compound120Cell,
        ShapeId::Cell600,
        ShapeId::Compound600Cell,
        ShapeId::QuantumManifold,
        ShapeId::CompoundQuantumManifold,
        ShapeId::MobiusSphere,
    ];

    /// The string tag callers use for this shape.
    pub fn name(self) -> &'static str {
        match self {
            ShapeId::Icosahedron => "icosahedron",
            ShapeId::Octahedron => "octahedron",
            ShapeId::Tetrahedron => "tetrahedron",
            ShapeId::Sphere => "sphere",
            ShapeId::CompoundSphere => "compoundsphere",
            ShapeId::Hypercube => "hypercube",
            ShapeId::SimpleCompoundHypercube => "simplecpdhypercube",
            ShapeId::Cube => "cube",
            ShapeId::Box => "box",
            ShapeId::CompoundTesseract => "cpdtesseract",
            ShapeId::MegaTesseract => "cpd-megatesseract",
            ShapeId::MegaTesseract2 => "cpd-megatesseract-2",
            ShapeId::MegaTesseract3 => "cpd-megatesseract-3",
            ShapeId::MegaTesseract4 => "cpd-megatesseract-4",
            ShapeId::Cell16 => "16cell",
            ShapeId::Cell24 => "24cell",
            ShapeId::Compound24Cell => "compound24cell",
            ShapeId::Cell120 => "120cell",
            ShapeId::Compound120Cell => "compound120cell",
            ShapeId::Cell600 => "600cell",
            ShapeId::Compound600Cell => "compound600cell",
            ShapeId::QuantumManifold => "quantummanifold",
            ShapeId::CompoundQuantumManifold => "compoundquantummanifold",
            ShapeId::MobiusSphere => "mobiussphere",
        }
    }

    /// Returns this shape's pipeline descriptor.
    pub fn descriptor(self) -> &'static PipelineDescriptor {
        &descriptors()[self as usize]
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeId {
    type Err = GeometryError;

    /// Parses a tag, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        name_index().get(key.as_str()).copied().ok_or_else(|| {
            GeometryError::invalid_parameter("shape", format!("unknown shape identifier `{s}`"))
        })
    }
}

/// Transform schedule of a compound pipeline, before parameters are bound.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleKind {
    Nested { ratio: f64 },
    /// Step taken from `axis_shift`, else `DEFAULT_AXIS_SHIFT`.
    AxisShift,
    Rotational { axis: DVec3, sweep: f64 },
    Experimental,
    /// Fixed placements; the instance count is the list length and
    /// `instance_count` does not override it.
    Explicit(Vec<DMat4>),
}

impl ScheduleKind {
    fn bind(&self, params: &ShapeParameters) -> Box<dyn TransformSchedule> {
        match self {
            ScheduleKind::Nested { ratio } => Box::new(Nested { ratio: *ratio }),
            ScheduleKind::AxisShift => Box::new(AxisShift {
                step: params.axis_shift.unwrap_or(DEFAULT_AXIS_SHIFT),
            }),
            ScheduleKind::Rotational { axis, sweep } => Box::new(Rotational {
                axis: *axis,
                sweep: *sweep,
            }),
            ScheduleKind::Experimental => Box::new(Experimental {
                ratio: EXPERIMENTAL_RATIO,
                twist: EXPERIMENTAL_TWIST,
                step: EXPERIMENTAL_STEP,
            }),
            ScheduleKind::Explicit(matrices) => Box::new(Explicit(matrices.clone())),
        }
    }
}

/// How many instances a pipeline produces and how they are placed.
#[derive(Debug, Clone, PartialEq)]
pub enum Composition {
    /// One instance, reported as non-compound.
    Single,
    /// Several instances placed by a schedule.
    Compound {
        schedule: ScheduleKind,
        default_count: usize,
    },
}

impl Composition {
    fn compound(schedule: ScheduleKind, default_count: usize) -> Self {
        Composition::Compound {
            schedule,
            default_count,
        }
    }
}

/// Static description of one shape pipeline.
#[derive(Debug, Clone)]
pub struct PipelineDescriptor {
    pub id: ShapeId,
    pub name: &'static str,
    pub builder: BuildFn,
    pub composition: Composition,
    pub base_type: BaseType,
    pub is_hypercube: bool,
    /// Weld default when `weld` is not given in the parameters.
    pub weld: bool,
    /// 4D rotation applied before projection.
    pub view: Option<(Plane4, f64)>,
}

static DESCRIPTORS: OnceLock<Vec<PipelineDescriptor>> = OnceLock::new();
static NAME_INDEX: OnceLock<HashMap<&'static str, ShapeId>> = OnceLock::new();

/// Returns the descriptor table, indexed by `ShapeId as usize`.
pub fn descriptors() -> &'static [PipelineDescriptor] {
    DESCRIPTORS.get_or_init(build_table)
}

fn name_index() -> &'static HashMap<&'static str, ShapeId> {
    NAME_INDEX.get_or_init(|| ShapeId::ALL.iter().map(|&id| (id.name(), id)).collect())
}

fn build_table() -> Vec<PipelineDescriptor> {
    use Composition::Single;

    let quarter_y = |count| {
        Composition::compound(
            ScheduleKind::Rotational {
                axis: DVec3::Y,
                sweep: FRAC_PI_2,
            },
            count,
        )
    };
    let tilt = Some((Plane4::ZW, VIEW_TILT));
    let legacy = vec![
        DMat4::IDENTITY,
        DMat4::from_translation(DVec3::new(0.0, 0.02, 0.0)) * DMat4::from_scale(DVec3::splat(0.5)),
    ];

    let row = |id: ShapeId,
               builder: BuildFn,
               composition: Composition,
               base_type: BaseType,
               is_hypercube: bool,
               view: Option<(Plane4, f64)>| {
        let weld = matches!(composition, Composition::Compound { .. })
            || id == ShapeId::MobiusSphere;
        PipelineDescriptor {
            id,
            name: id.name(),
            builder,
            composition,
            base_type,
            is_hypercube,
            weld,
            view,
        }
    };

    let mut table = vec![
        row(ShapeId::Icosahedron, platonic::build_icosahedron, Single, BaseType::Icosahedron, false, None),
        row(ShapeId::Octahedron, platonic::build_octahedron, Single, BaseType::Octahedron, false, None),
        row(ShapeId::Tetrahedron, platonic::build_tetrahedron, Single, BaseType::Tetrahedron, false, None),
        row(ShapeId::Sphere, sphere::build_sphere, Single, BaseType::Sphere, false, None),
        row(
            ShapeId::CompoundSphere,
            sphere::build_sphere,
            Composition::compound(ScheduleKind::Nested { ratio: NESTED_SPHERE_RATIO }, 3),
            BaseType::Sphere,
            false,
            None,
        ),
        row(
            ShapeId::Hypercube,
            platonic::build_legacy_box,
            Composition::compound(ScheduleKind::Explicit(legacy), 2),
            BaseType::Box,
            true,
            None,
        ),
        row(
            ShapeId::SimpleCompoundHypercube,
            platonic::build_cube,
            Composition::compound(ScheduleKind::Nested { ratio: NESTED_CUBE_RATIO }, 2),
            BaseType::Box,
            true,
            None,
        ),
        row(ShapeId::Cube, platonic::build_cube, quarter_y(2), BaseType::Box, true, None),
        row(
            ShapeId::Box,
            cells::build_tesseract,
            Composition::compound(
                ScheduleKind::Rotational {
                    axis: DVec3::ONE,
                    sweep: FRAC_PI_2,
                },
                2,
            ),
            BaseType::Tesseract,
            true,
            None,
        ),
        row(ShapeId::CompoundTesseract, cells::build_tesseract, Single, BaseType::Tesseract, true, None),
        row(ShapeId::MegaTesseract, cells::build_tesseract, quarter_y(2), BaseType::Tesseract, true, None),
        row(
            ShapeId::MegaTesseract2,
            cells::build_tesseract,
            Composition::compound(ScheduleKind::Nested { ratio: NESTED_TESSERACT_RATIO }, 3),
            BaseType::Tesseract,
            true,
            None,
        ),
        row(
            ShapeId::MegaTesseract3,
            cells::build_tesseract,
            Composition::compound(ScheduleKind::Experimental, 3),
            BaseType::Tesseract,
            true,
            None,
        ),
        row(
            ShapeId::MegaTesseract4,
            cells::build_tesseract,
            Composition::compound(ScheduleKind::AxisShift, 3),
            BaseType::Tesseract,
            true,
            None,
        ),
        row(ShapeId::Cell16, cells::build_cell_16, Single, BaseType::SixteenCell, false, tilt),
        row(ShapeId::Cell24, cells::build_cell_24, Single, BaseType::TwentyFourCell, false, None),
        row(ShapeId::Compound24Cell, cells::build_cell_24, quarter_y(2), BaseType::TwentyFourCell, false, None),
        row(ShapeId::Cell120, cells::build_cell_120, Single, BaseType::OneHundredTwentyCell, false, None),
        row(
            ShapeId::Compound120Cell,
            cells::build_cell_120,
            quarter_y(2),
            BaseType::OneHundredTwentyCell,
            false,
            None,
        ),
        row(ShapeId::Cell600, cells::build_cell_600, Single, BaseType::SixHundredCell, false, tilt),
        row(
            ShapeId::Compound600Cell,
            cells::build_cell_600,
            quarter_y(2),
            BaseType::SixHundredCell,
            false,
            tilt,
        ),
        row(
            ShapeId::QuantumManifold,
            parametric::build_quantum_manifold,
            Single,
            BaseType::QuantumManifold,
            false,
            None,
        ),
        row(
            ShapeId::CompoundQuantumManifold,
            parametric::build_quantum_manifold,
            Composition::compound(
                ScheduleKind::Rotational {
                    axis: DVec3::X,
                    sweep: PI,
                },
                3,
            ),
            BaseType::QuantumManifold,
            false,
            None,
        ),
        row(
            ShapeId::MobiusSphere,
            parametric::build_mobius_sphere,
            Single,
            BaseType::MobiusSphere,
            false,
            None,
        ),
    ];

    // Legacy concentric cubes were never welded
    if let Some(legacy) = table.get_mut(ShapeId::Hypercube as usize) {
        legacy.weld = false;
    }
    table
}

/// Runs shape pipelines with a fixed set of tolerances.
///
/// # Example
///
/// ```rust
/// use polytope_mesh::{Engine, EngineConfig, ShapeId, ShapeParameters};
///
/// let engine = Engine::new(EngineConfig::new(1e-5, 1e-3).unwrap());
/// let buffer = engine.create(ShapeId::Cell24, &ShapeParameters::default()).unwrap();
/// assert_eq!(buffer.vertex_count(), 24);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with the given tolerances.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the engine tolerances.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Builds the geometry buffer for a registered shape.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for out-of-domain parameters
    /// - `UnsupportedProjection` for a 4D shape with a bad distance
    /// - `TooManyVertices` / `TooManyTriangles` above the mesh limits
    pub fn create(
        &self,
        id: ShapeId,
        params: &ShapeParameters,
    ) -> Result<GeometryBuffer, GeometryError> {
        let descriptor = id.descriptor();
        params.validate()?;

        let solid = match (descriptor.builder)(params)? {
            RawShape::Solid(solid) => solid,
            RawShape::Polytope(polytope) => {
                let projection = Projection::from_params(params)?;
                let view = descriptor
                    .view
                    .map(|(plane, angle)| rotation4(plane, angle));
                project_polytope(
                    polytope,
                    projection,
                    view,
                    self.config.projection_epsilon,
                    params.scale,
                )
            }
        };

        let (parts, metadata) = match &descriptor.composition {
            Composition::Single => (
                vec![solid],
                GeometryMetadata {
                    is_hypercube: descriptor.is_hypercube,
                    ..GeometryMetadata::single(descriptor.base_type)
                },
            ),
            Composition::Compound {
                schedule,
                default_count,
            } => {
                let count = match (schedule, params.instance_count) {
                    (ScheduleKind::Explicit(matrices), _) => matrices.len(),
                    (_, Some(requested)) => validate_instance_count(requested)?,
                    (_, None) => *default_count,
                };
                check_limits(
                    count.saturating_mul(solid.vertex_count()),
                    count.saturating_mul(solid.triangle_count()),
                )?;
                let schedule = schedule.bind(params);
                let parts = compose(
                    &solid,
                    count,
                    schedule.as_ref(),
                    &params.offsets(),
                    params.scale,
                )?;
                let metadata = GeometryMetadata {
                    is_compound: true,
                    base_type: descriptor.base_type,
                    is_hypercube: descriptor.is_hypercube,
                    instance_count: count as u32,
                };
                (parts, metadata)
            }
        };

        let options = MergeOptions {
            weld: params.weld.unwrap_or(descriptor.weld),
            weld_epsilon: self.config.weld_epsilon * params.scale,
        };
        log::debug!(
            "{}: {} part(s), weld={}",
            descriptor.name,
            parts.len(),
            options.weld
        );
        merge(&parts, options, metadata)
    }

    /// Builds a shape by name.
    ///
    /// Unknown names fall back to the icosahedron with default parameters;
    /// the supplied parameters are ignored in that case.
    pub fn create_from_name(
        &self,
        name: &str,
        params: &ShapeParameters,
    ) -> Result<GeometryBuffer, GeometryError> {
        match name.parse::<ShapeId>() {
            Ok(id) => self.create(id, params),
            Err(_) => {
                log::debug!("unknown shape `{name}`, falling back to icosahedron");
                self.create(ShapeId::Icosahedron, &ShapeParameters::default())
            }
        }
    }
}

/// Builds a registered shape with the default tolerances.
///
/// # Example
///
/// ```rust
/// use polytope_mesh::{create, ShapeId, ShapeParameters};
///
/// let params = ShapeParameters::default().with_instance_count(3);
/// let buffer = create(ShapeId::MegaTesseract2, &params).unwrap();
/// assert!(buffer.metadata().is_compound);
/// assert!(buffer.vertex_count() <= 3 * 16);
/// ```
pub fn create(id: ShapeId, params: &ShapeParameters) -> Result<GeometryBuffer, GeometryError> {
    Engine::default().create(id, params)
}

/// Builds a shape by name with the default tolerances; unknown names give
/// the default icosahedron.
pub fn create_from_name(
    name: &str,
    params: &ShapeParameters,
) -> Result<GeometryBuffer, GeometryError> {
    Engine::default().create_from_name(name, params)
}

/// Returns every registered identifier.
pub fn list_shape_identifiers() -> Vec<ShapeId> {
    ShapeId::ALL.to_vec()
}
