//! 2D coordinates for a molecular graph.
//!
//! Chains are placed depth-first with 120° zig-zags, then a fixed number of
//! spring-relaxation steps pulls ring closures to bond length. No randomness,
//! so the same molecule always gets the same picture.

use super::smiles::Molecule;
use glam::Vec2;
use std::collections::HashSet;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI, TAU};

pub const BOND_LENGTH: f32 = 1.0;
const RELAX_STEPS: usize = 250;
const SPRING: f32 = 0.25;
const REPULSION: f32 = 0.03;
const REPULSION_RANGE: f32 = 2.5 * BOND_LENGTH;
const COMPONENT_GAP: f32 = 1.5 * BOND_LENGTH;

/// Computes one position per atom, components laid out left to right.
pub fn compute(mol: &Molecule) -> Vec<Vec2> {
    let mut positions = vec![Vec2::ZERO; mol.atoms.len()];
    let adjacency = adjacency(mol);
    let mut cursor_x = 0.0;

    for component in mol.components() {
        place_tree(&component, &adjacency, &mut positions);
        relax(&component, mol, &mut positions);

        let (min, max) = bounds(component.iter().map(|&i| positions[i]));
        let shift = Vec2::new(cursor_x - min.x, -(min.y + max.y) * 0.5);
        for &i in &component {
            positions[i] += shift;
        }
        cursor_x += (max.x - min.x) + COMPONENT_GAP;
    }
    positions
}

/// Bounding box (min, max) of a set of points.
pub fn bounds(points: impl Iterator<Item = Vec2>) -> (Vec2, Vec2) {
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    for p in points {
        min = min.min(p);
        max = max.max(p);
    }
    if min.x > max.x {
        return (Vec2::ZERO, Vec2::ZERO);
    }
    (min, max)
}

fn adjacency(mol: &Molecule) -> Vec<Vec<usize>> {
    let mut adj = vec![Vec::new(); mol.atoms.len()];
    for bond in &mol.bonds {
        if bond.a != bond.b {
            adj[bond.a].push(bond.b);
            adj[bond.b].push(bond.a);
        }
    }
    adj
}

fn place_tree(component: &[usize], adjacency: &[Vec<usize>], positions: &mut [Vec2]) {
    let Some(&root) = component.first() else {
        return;
    };
    let mut placed = vec![false; positions.len()];
    placed[root] = true;
    positions[root] = Vec2::ZERO;

    // (atom, heading from its parent, depth)
    let mut stack = vec![(root, 0.0_f32, 0_usize)];
    while let Some((atom, heading, depth)) = stack.pop() {
        let children: Vec<usize> = adjacency[atom]
            .iter()
            .copied()
            .filter(|&n| !placed[n])
            .collect();
        if children.is_empty() {
            continue;
        }
        let angles = child_angles(heading, children.len(), depth, atom == root);
        for (&child, angle) in children.iter().zip(angles) {
            placed[child] = true;
            positions[child] = positions[atom] + Vec2::from_angle(angle) * BOND_LENGTH;
            stack.push((child, angle, depth + 1));
        }
    }
}

fn child_angles(heading: f32, count: usize, depth: usize, is_root: bool) -> Vec<f32> {
    if is_root {
        // Root fans out evenly, first bond pointing right-up.
        let step = TAU / count as f32;
        let start = if count == 1 { FRAC_PI_3 / 2.0 } else { 0.0 };
        return (0..count).map(|i| start + step * i as f32).collect();
    }
    match count {
        1 => {
            let turn = if depth % 2 == 0 { FRAC_PI_3 } else { -FRAC_PI_3 };
            vec![heading + turn]
        }
        2 => vec![heading + FRAC_PI_3, heading - FRAC_PI_3],
        3 => vec![heading + FRAC_PI_2, heading, heading - FRAC_PI_2],
        n => {
            // Spread over 240° centered on the incoming heading.
            let span = 4.0 * PI / 3.0;
            let step = span / (n - 1) as f32;
            (0..n)
                .map(|i| heading - span / 2.0 + step * i as f32)
                .collect()
        }
    }
}

fn relax(component: &[usize], mol: &Molecule, positions: &mut [Vec2]) {
    if component.len() < 3 {
        return;
    }
    let bonds: Vec<(usize, usize)> = mol
        .bonds
        .iter()
        .filter(|b| b.a != b.b && component.binary_search(&b.a).is_ok())
        .map(|b| (b.a.min(b.b), b.a.max(b.b)))
        .collect();
    let bonded: HashSet<(usize, usize)> = bonds.iter().copied().collect();

    let mut forces = vec![Vec2::ZERO; positions.len()];
    for _ in 0..RELAX_STEPS {
        for &i in component {
            forces[i] = Vec2::ZERO;
        }

        for &(a, b) in &bonds {
            let delta = positions[b] - positions[a];
            let dist = delta.length().max(1e-3);
            let pull = delta / dist * (dist - BOND_LENGTH) * SPRING;
            forces[a] += pull;
            forces[b] -= pull;
        }

        for (k, &i) in component.iter().enumerate() {
            for &j in &component[k + 1..] {
                // component is sorted, so i < j
                if bonded.contains(&(i, j)) {
                    continue;
                }
                let mut delta = positions[i] - positions[j];
                if delta.length_squared() < 1e-6 {
                    // Coincident atoms: separate along a fixed, index-derived direction.
                    delta = Vec2::from_angle((i * 7 + j) as f32) * 1e-2;
                }
                let dist = delta.length();
                if dist < REPULSION_RANGE {
                    let push = delta / dist * (REPULSION / (dist * dist)).min(0.5);
                    forces[i] += push;
                    forces[j] -= push;
                }
            }
        }

        for &i in component {
            positions[i] += forces[i].clamp_length_max(0.3);
        }
    }
}
