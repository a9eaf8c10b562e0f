//! Vertex welding with a uniform spatial hash.

use crate::error::GeometryError;
use glam::DVec3;
use std::collections::HashMap;

type CellKey = (i64, i64, i64);

/// Unifies vertices closer than `epsilon`.
///
/// Vertices are visited in index order. Each one joins the lowest-index
/// representative within `epsilon`, or becomes a representative itself.
/// Triangles left with fewer than three distinct corners are dropped and
/// representatives no triangle uses are removed. Surviving vertices keep
/// their relative order.
///
/// The hash cell size equals `epsilon`, so every candidate lies in one of
/// the 27 cells around the query point.
///
/// Representatives end up more than `epsilon` apart, so a second pass with
/// the same epsilon changes nothing.
///
/// # Errors
///
/// `InvalidParameter` for a non-positive or non-finite epsilon,
/// `InvalidTopology` for out-of-range indices.
///
/// # Example
///
/// ```rust
/// use polytope_mesh::merge::weld::weld;
/// use glam::DVec3;
///
/// let positions = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::new(1e-6, 0.0, 0.0)];
/// let (welded, triangles) = weld(&positions, &[[0, 1, 2], [3, 2, 1]], 1e-4).unwrap();
/// assert_eq!(welded.len(), 3);
/// assert_eq!(triangles, vec![[0, 1, 2], [0, 2, 1]]);
/// ```
pub fn weld(
    positions: &[DVec3],
    triangles: &[[u32; 3]],
    epsilon: f64,
) -> Result<(Vec<DVec3>, Vec<[u32; 3]>), GeometryError> {
    if !(epsilon > 0.0 && epsilon.is_finite()) {
        return Err(GeometryError::invalid_parameter(
            "weldEpsilon",
            format!("must be positive and finite, got {epsilon}"),
        ));
    }

    check_indices(positions.len(), triangles)?;

    let epsilon_squared = epsilon * epsilon;
    let mut grid: HashMap<CellKey, Vec<u32>> = HashMap::new();
    let mut representative = Vec::with_capacity(positions.len());

    for (index, &point) in positions.iter().enumerate() {
        let key = cell_of(point, epsilon);
        let mut best: Option<u32> = None;
        for neighbor in neighbor_cells(key) {
            let Some(candidates) = grid.get(&neighbor) else {
                continue;
            };
            for &candidate in candidates {
                let close = positions[candidate as usize].distance_squared(point) <= epsilon_squared;
                if close && best.map_or(true, |b| candidate < b) {
                    best = Some(candidate);
                }
            }
        }

        match best {
            Some(rep) => representative.push(rep),
            None => {
                let rep = index as u32;
                representative.push(rep);
                grid.entry(key).or_default().push(rep);
            }
        }
    }

    let mapped: Vec<[u32; 3]> = triangles
        .iter()
        .map(|tri| tri.map(|i| representative[i as usize]))
        .filter(|[a, b, c]| a != b && b != c && a != c)
        .collect();

    // Compact to the referenced representatives, in index order.
    let mut used = vec![false; positions.len()];
    for &i in mapped.iter().flatten() {
        used[i as usize] = true;
    }
    let mut remap = vec![u32::MAX; positions.len()];
    let mut compacted = Vec::new();
    for (index, &is_used) in used.iter().enumerate() {
        if is_used {
            remap[index] = compacted.len() as u32;
            compacted.push(positions[index]);
        }
    }

    let triangles = mapped
        .into_iter()
        .map(|tri| tri.map(|i| remap[i as usize]))
        .collect();

    Ok((compacted, triangles))
}

/// Rejects triangles that reference a vertex past `vertex_count`.
pub(crate) fn check_indices(vertex_count: usize, triangles: &[[u32; 3]]) -> Result<(), GeometryError> {
    match triangles
        .iter()
        .find(|tri| tri.iter().any(|&i| i as usize >= vertex_count))
    {
        Some(tri) => Err(GeometryError::invalid_topology(format!(
            "triangle {tri:?} references a vertex past {vertex_count}"
        ))),
        None => Ok(()),
    }
}

fn cell_of(point: DVec3, size: f64) -> CellKey {
    let cell = (point / size).floor();
    (cell.x as i64, cell.y as i64, cell.z as i64)
}

fn neighbor_cells((x, y, z): CellKey) -> impl Iterator<Item = CellKey> {
    (-1..=1).flat_map(move |dx| {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).map(move |dz| {
                (
                    x.saturating_add(dx),
                    y.saturating_add(dy),
                    z.saturating_add(dz),
                )
            })
        })
    })
}
