//! Square SVG depiction of a laid-out molecule.

use super::layout::{bounds, BOND_LENGTH};
use super::smiles::{BondOrder, Molecule};
use glam::Vec2;
use std::fmt::Write;

const BOND_COLOR: &str = "#000000";

fn element_color(element: &str) -> &'static str {
    match element {
        "N" => "#3050F8",
        "O" => "#FF0D0D",
        "S" => "#C8A000",
        "P" => "#FF8000",
        "F" | "Cl" => "#1FAA1F",
        "Br" => "#A62929",
        "I" => "#940094",
        "B" => "#E08080",
        _ => "#333333",
    }
}

/// Pixel geometry derived from the canvas size.
struct Canvas {
    size: f32,
    scale: f32,
    offset: Vec2,
    stroke: f32,
    font: f32,
}

impl Canvas {
    fn fit(positions: &[Vec2], size: u32) -> Self {
        let size = size as f32;
        let padding = size * 0.1;
        let (min, max) = bounds(positions.iter().copied());
        let extent = (max - min).max(Vec2::splat(1e-3));
        let fit = ((size - 2.0 * padding) / extent.x).min((size - 2.0 * padding) / extent.y);
        // Small molecules would otherwise be blown up to the full canvas.
        let scale = fit.min(size / 5.0 / BOND_LENGTH);
        let center = (min + max) * 0.5;
        // Floors give way on tiny canvases so min <= max always holds.
        let max_stroke = size / 60.0;
        let max_font = size / 8.0;
        Self {
            size,
            scale,
            offset: Vec2::splat(size * 0.5) - center * scale,
            stroke: (scale * 0.06).clamp(max_stroke.min(1.0), max_stroke),
            font: (scale * 0.45).clamp(max_font.min(8.0), max_font),
        }
    }

    fn project(&self, p: Vec2) -> Vec2 {
        p * self.scale + self.offset
    }
}

/// Renders the molecule into an SVG document of `size` x `size` pixels with a
/// transparent background.
pub fn draw(mol: &Molecule, positions: &[Vec2], size: u32) -> String {
    let canvas = Canvas::fit(positions, size);
    let points: Vec<Vec2> = positions.iter().map(|&p| canvas.project(p)).collect();
    let labels: Vec<Option<AtomLabel>> = (0..mol.atoms.len())
        .map(|i| atom_label(mol, i))
        .collect();

    let mut out = String::with_capacity(256 + mol.bonds.len() * 96);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
        s = canvas.size
    );

    let label_radius = canvas.font * 0.6;
    for bond in &mol.bonds {
        let (mut a, mut b) = (points[bond.a], points[bond.b]);
        let dir = (b - a).normalize_or_zero();
        if labels[bond.a].is_some() {
            a += dir * label_radius;
        }
        if labels[bond.b].is_some() {
            b -= dir * label_radius;
        }
        draw_bond(&mut out, a, b, bond.order, &canvas);
    }

    for (i, label) in labels.iter().enumerate() {
        if let Some(label) = label {
            draw_label(&mut out, points[i], label, &canvas);
        }
    }

    out.push_str("</svg>");
    out
}

fn draw_bond(out: &mut String, a: Vec2, b: Vec2, order: BondOrder, canvas: &Canvas) {
    let normal = (b - a).normalize_or_zero().perp();
    let gap = canvas.stroke * 2.5;
    match order {
        BondOrder::Single => line(out, a, b, canvas.stroke, false),
        BondOrder::Double => {
            line(out, a + normal * gap * 0.5, b + normal * gap * 0.5, canvas.stroke, false);
            line(out, a - normal * gap * 0.5, b - normal * gap * 0.5, canvas.stroke, false);
        }
        BondOrder::Triple => {
            line(out, a, b, canvas.stroke, false);
            line(out, a + normal * gap, b + normal * gap, canvas.stroke, false);
            line(out, a - normal * gap, b - normal * gap, canvas.stroke, false);
        }
        BondOrder::Quadruple => {
            for k in [-1.5_f32, -0.5, 0.5, 1.5] {
                line(out, a + normal * gap * k, b + normal * gap * k, canvas.stroke, false);
            }
        }
        BondOrder::Aromatic => {
            line(out, a, b, canvas.stroke, false);
            line(out, a + normal * gap, b + normal * gap, canvas.stroke, true);
        }
    }
}

fn line(out: &mut String, a: Vec2, b: Vec2, width: f32, dashed: bool) {
    let _ = write!(
        out,
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}" stroke-linecap="round""#,
        a.x, a.y, b.x, b.y, BOND_COLOR, width
    );
    if dashed {
        let _ = write!(out, r#" stroke-dasharray="{:.1},{:.1}""#, width * 2.0, width * 2.0);
    }
    out.push_str("/>");
}

struct AtomLabel {
    element: &'static str,
    hydrogens: u8,
    isotope: Option<u16>,
    charge: i8,
}

/// Heteroatoms, charged or isotope-labelled atoms and lone atoms get a text
/// label; plain skeletal carbons are drawn as bond vertices only.
fn atom_label(mol: &Molecule, atom: usize) -> Option<AtomLabel> {
    let a = &mol.atoms[atom];
    let plain_carbon =
        a.element == "C" && a.charge == 0 && a.isotope.is_none() && mol.degree(atom) > 0;
    if plain_carbon {
        return None;
    }
    Some(AtomLabel {
        element: a.element,
        hydrogens: mol.implicit_hydrogens(atom),
        isotope: a.isotope,
        charge: a.charge,
    })
}

fn draw_label(out: &mut String, at: Vec2, label: &AtomLabel, canvas: &Canvas) {
    let small = canvas.font * 0.7;
    let _ = write!(
        out,
        r#"<text x="{:.2}" y="{:.2}" fill="{}" font-family="sans-serif" font-size="{:.1}" text-anchor="middle" dominant-baseline="central">"#,
        at.x,
        at.y,
        element_color(label.element),
        canvas.font
    );
    if let Some(isotope) = label.isotope {
        let _ = write!(
            out,
            r#"<tspan baseline-shift="super" font-size="{small:.1}">{isotope}</tspan>"#
        );
    }
    out.push_str(label.element);
    match label.hydrogens {
        0 => {}
        1 => out.push('H'),
        n => {
            let _ = write!(
                out,
                r#"H<tspan baseline-shift="sub" font-size="{small:.1}">{n}</tspan>"#
            );
        }
    }
    if label.charge != 0 {
        let sign = if label.charge > 0 { '+' } else { '-' };
        let magnitude = label.charge.unsigned_abs();
        let text = if magnitude == 1 {
            sign.to_string()
        } else {
            format!("{magnitude}{sign}")
        };
        let _ = write!(
            out,
            r#"<tspan baseline-shift="super" font-size="{small:.1}">{text}</tspan>"#
        );
    }
    out.push_str("</text>");
}
