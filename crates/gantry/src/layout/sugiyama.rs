//! Layered positioning of one scope's members.
//!
//! Wraps the `rust-sugiyama` crate. The algorithm works on unit-spaced
//! abstract coordinates, so its output is rescaled by the largest member
//! size plus the configured spacing. Members that no hint edge touches,
//! and any extra connected components, are stacked below the main layout.
//! The crate panics on some degenerate graphs; those are caught and the
//! scope falls back to a simple row.

use log::debug;
use rust_sugiyama::configure::Config;

use gantry_core::geometry::{Point, Size};

const VERTEX_SPACING: f64 = 3.0;

/// Centers for every member, aligned with the `sizes` slice, in a
/// top-to-bottom layered coordinate space.
pub(super) fn position_members(
    sizes: &[Size],
    hints: &[(usize, usize)],
    horizontal_spacing: f32,
    vertical_spacing: f32,
) -> Vec<Point> {
    if sizes.is_empty() {
        return Vec::new();
    }

    let max_size = sizes
        .iter()
        .copied()
        .reduce(Size::max)
        .unwrap_or_default();
    let x_scale = (max_size.width() + horizontal_spacing) / VERTEX_SPACING as f32;
    let y_scale = (max_size.height() + vertical_spacing) / VERTEX_SPACING as f32;

    let mut positions: Vec<Option<Point>> = vec![None; sizes.len()];

    if !hints.is_empty() {
        let edges: Vec<(u32, u32)> = hints
            .iter()
            .map(|&(from, to)| (from as u32, to as u32))
            .collect();

        let layouts = std::panic::catch_unwind(move || {
            let config = Config {
                minimum_length: 1,
                vertex_spacing: VERTEX_SPACING,
                ..Default::default()
            };
            rust_sugiyama::from_edges(&edges, &config)
        });

        match layouts {
            Ok(results) if !results.is_empty() => {
                // Components are stacked below one another.
                let mut y_offset = 0.0f32;
                for (coords, _, _) in &results {
                    let mut component_min_y = f32::MAX;
                    let mut component_max_y = f32::MIN;
                    for &(id, (x, y)) in coords {
                        if id >= sizes.len() {
                            debug!(id; "Layered engine returned an unknown member id");
                            continue;
                        }
                        let point =
                            Point::new(x as f32 * x_scale, y as f32 * y_scale + y_offset);
                        component_min_y = component_min_y.min(point.y());
                        component_max_y = component_max_y.max(point.y());
                        positions[id] = Some(point);
                    }
                    if component_max_y >= component_min_y {
                        y_offset = component_max_y + max_size.height() + vertical_spacing;
                    }
                }
            }
            Ok(_) => {
                debug!("Layered engine returned no layout; falling back to a row");
            }
            Err(_) => {
                debug!("Layered engine panicked; falling back to a row");
            }
        }
    }

    // Members the engine did not place (no hints, unknown ids, or a
    // fallback) are arranged in a single row below everything placed.
    let placed_max_y = positions
        .iter()
        .flatten()
        .map(|p| p.y() + max_size.height() / 2.0)
        .fold(f32::MIN, f32::max);
    let row_y = if placed_max_y > f32::MIN {
        placed_max_y + vertical_spacing + max_size.height() / 2.0
    } else {
        0.0
    };

    let mut row_x = 0.0f32;
    positions
        .iter()
        .zip(sizes)
        .map(|(position, &size)| match position {
            Some(point) => *point,
            None => {
                let center = Point::new(row_x + size.width() / 2.0, row_y);
                row_x += size.width() + horizontal_spacing;
                center
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scope_yields_no_positions() {
        assert!(position_members(&[], &[], 50.0, 50.0).is_empty());
    }

    #[test]
    fn edgeless_members_form_a_spaced_row() {
        let sizes = [Size::new(40.0, 30.0), Size::new(60.0, 30.0)];
        let positions = position_members(&sizes, &[], 50.0, 50.0);

        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].y(), positions[1].y());
        // Gap between the two boxes equals the horizontal spacing.
        let gap = (positions[1].x() - 30.0) - (positions[0].x() + 20.0);
        assert!((gap - 50.0).abs() < 0.01);
    }

    #[test]
    fn hinted_members_land_on_distinct_layers() {
        let sizes = [Size::new(40.0, 30.0); 3];
        let positions = position_members(&sizes, &[(0, 1), (1, 2)], 50.0, 50.0);

        assert_eq!(positions.len(), 3);
        let mut ys: Vec<f32> = positions.iter().map(|p| p.y()).collect();
        ys.dedup();
        assert_eq!(ys.len(), 3, "chain should occupy three layers: {ys:?}");

        // Layer separation reflects member height plus spacing.
        let step = (ys[1] - ys[0]).abs();
        assert!(step >= 30.0, "layers too close: {step}");
    }

    #[test]
    fn unhinted_member_is_placed_below_the_hinted_ones() {
        let sizes = [Size::new(40.0, 30.0); 3];
        let positions = position_members(&sizes, &[(0, 1)], 50.0, 50.0);

        let connected_max = positions[0].y().max(positions[1].y());
        assert!(positions[2].y() > connected_max);
    }

    #[test]
    fn all_members_receive_a_position() {
        let sizes = [Size::new(80.0, 40.0); 5];
        let hints = [(0, 1), (0, 2), (2, 3)];
        let positions = position_members(&sizes, &hints, 30.0, 40.0);
        assert_eq!(positions.len(), 5);
    }
}
