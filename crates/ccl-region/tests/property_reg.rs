//! Property tests over random grids
//!
//! Every labeling is checked against a breadth-first flood fill, and the
//! resolver and size filter are checked for idempotence and monotonicity.
//! Grids come from a seeded generator, so failures reproduce exactly.

use ccl_core::{Grid, LabelGrid};
use ccl_region::{
    ConnectivityType, EquivalenceMap, IntensityWindow, count_components,
    filter_components_by_size, label_connected_components, label_eight_connectivity,
    label_eight_connectivity_detailed, label_four_connectivity_detailed, scan_eight_way,
    scan_four_way, surviving_labels,
};
use ccl_test::{SimpleRng, random_binary_grid, random_gray_grid};
use std::collections::{BTreeMap, VecDeque};

const ITERATIONS: usize = 400;

/// Reference labeling by flood fill. Returns a component index per cell
/// (`usize::MAX` for background) and the number of components.
fn flood_fill_reference<F>(
    grid: &Grid<u8>,
    connectivity: ConnectivityType,
    is_foreground: F,
) -> (Grid<usize>, usize)
where
    F: Fn(u8) -> bool,
{
    let (rows, cols) = grid.shape();
    let mut comp = Grid::filled(rows, cols, usize::MAX);
    let mut n = 0;

    let offsets: &[(isize, isize)] = match connectivity {
        ConnectivityType::FourWay => &[(-1, 0), (1, 0), (0, -1), (0, 1)],
        ConnectivityType::EightWay => &[
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ],
    };

    for (row, col, value) in grid.iter_cells() {
        if !is_foreground(value) || comp[(row, col)] != usize::MAX {
            continue;
        }
        let mut queue = VecDeque::new();
        comp[(row, col)] = n;
        queue.push_back((row, col));

        while let Some((r, c)) = queue.pop_front() {
            for &(dr, dc) in offsets {
                let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc))
                else {
                    continue;
                };
                if nr >= rows || nc >= cols {
                    continue;
                }
                if is_foreground(grid[(nr, nc)]) && comp[(nr, nc)] == usize::MAX {
                    comp[(nr, nc)] = n;
                    queue.push_back((nr, nc));
                }
            }
        }
        n += 1;
    }

    (comp, n)
}

/// Check that `labels` partitions the foreground exactly like `reference`.
fn assert_same_partition(labels: &LabelGrid, reference: &Grid<usize>, context: &str) {
    let mut forward: BTreeMap<u32, usize> = BTreeMap::new();
    let mut backward: BTreeMap<usize, u32> = BTreeMap::new();

    for ((row, col, label), &comp) in labels.iter_cells().zip(reference.data()) {
        // Background invariance
        assert_eq!(
            label == 0,
            comp == usize::MAX,
            "{context}: background mismatch at ({row}, {col})"
        );
        if label == 0 {
            continue;
        }
        assert_eq!(
            *forward.entry(label).or_insert(comp),
            comp,
            "{context}: label {label} spans two components"
        );
        assert_eq!(
            *backward.entry(comp).or_insert(label),
            label,
            "{context}: component {comp} carries two labels"
        );
    }
}

#[test]
fn four_way_matches_flood_fill() {
    let mut rng = SimpleRng::new(0x4c4142454c);
    for i in 0..ITERATIONS {
        let rows = 1 + rng.next_below(12) as usize;
        let cols = 1 + rng.next_below(12) as usize;
        let density = 0.2 + 0.6 * rng.next_f64();
        let grid = random_binary_grid(&mut rng, rows, cols, density);

        let result = label_four_connectivity_detailed(&grid).unwrap();
        let (reference, n) = flood_fill_reference(&grid, ConnectivityType::FourWay, |v| v != 0);

        let context = format!("4-way iteration {i}");
        assert_same_partition(&result.labels, &reference, &context);
        assert_eq!(count_components(&result.labels), n, "{context}");
        assert_eq!(result.component_count(), n, "{context}");
    }
}

#[test]
fn eight_way_matches_flood_fill() {
    let mut rng = SimpleRng::new(0x38434f4e4e);
    for i in 0..ITERATIONS {
        let rows = 1 + rng.next_below(12) as usize;
        let cols = 1 + rng.next_below(12) as usize;
        let grid = random_gray_grid(&mut rng, rows, cols);
        let a = rng.next_below(256) as u8;
        let b = rng.next_below(256) as u8;
        let window = IntensityWindow::new(a.min(b), a.max(b)).unwrap();

        let result = label_eight_connectivity_detailed(&grid, window).unwrap();
        let (reference, n) =
            flood_fill_reference(&grid, ConnectivityType::EightWay, |v| window.contains(v));

        let context = format!("8-way iteration {i} window {window:?}");
        assert_same_partition(&result.labels, &reference, &context);
        assert_eq!(count_components(&result.labels), n, "{context}");
    }
}

#[test]
fn binary_eight_way_matches_flood_fill() {
    let mut rng = SimpleRng::new(99);
    for i in 0..ITERATIONS {
        let grid = random_binary_grid(&mut rng, 10, 10, 0.45);
        let labels = label_connected_components(&grid, ConnectivityType::EightWay).unwrap();
        let (reference, n) = flood_fill_reference(&grid, ConnectivityType::EightWay, |v| v != 0);

        let context = format!("binary 8-way iteration {i}");
        assert_same_partition(&labels, &reference, &context);
        assert_eq!(count_components(&labels), n, "{context}");
    }
}

/// Whether following parent links from `start` comes back to `start`.
fn on_loop(parent: &[u32], start: u32) -> bool {
    let mut current = parent[start as usize];
    for _ in 0..parent.len() {
        if current == start {
            return true;
        }
        current = parent[current as usize];
    }
    false
}

/// Plain two-pass labeling that overwrites `parent[a] = b` on every union
/// and never repairs. Returns `None` if the parent links ever form a loop.
fn overwrite_only_labeling(
    grid: &Grid<u8>,
    connectivity: ConnectivityType,
) -> Option<LabelGrid> {
    let (rows, cols) = grid.shape();
    let mut labels = LabelGrid::new(rows, cols);
    let mut parent: Vec<u32> = vec![0];

    for (row, col, value) in grid.iter_cells() {
        if value == 0 {
            continue;
        }
        let at = |r: Option<usize>, c: Option<usize>| match (r, c) {
            (Some(r), Some(c)) if c < cols => labels[(r, c)],
            _ => 0,
        };
        let left = at(Some(row), col.checked_sub(1));
        let up = at(row.checked_sub(1), Some(col));

        let label = match connectivity {
            ConnectivityType::FourWay => match (left, up) {
                (0, 0) => 0,
                (l, 0) => l,
                (0, u) => u,
                (l, u) if l == u => l,
                (l, u) => {
                    parent[l as usize] = u;
                    if on_loop(&parent, l) {
                        return None;
                    }
                    u
                }
            },
            ConnectivityType::EightWay => {
                let candidates: Vec<u32> = [
                    left,
                    up,
                    at(row.checked_sub(1), col.checked_sub(1)),
                    at(row.checked_sub(1), Some(col + 1)),
                ]
                .into_iter()
                .filter(|&l| l > 0)
                .collect();
                match candidates.iter().min() {
                    None => 0,
                    Some(&m) => {
                        for &other in candidates.iter().filter(|&&l| l != m) {
                            parent[other as usize] = m;
                            if on_loop(&parent, other) {
                                return None;
                            }
                        }
                        m
                    }
                }
            }
        };
        labels[(row, col)] = if label == 0 {
            let fresh = parent.len() as u32;
            parent.push(fresh);
            fresh
        } else {
            label
        };
    }

    let mut resolved = labels.clone();
    for cell in resolved.data_mut() {
        while parent[*cell as usize] != *cell {
            *cell = parent[*cell as usize];
        }
    }
    Some(resolved)
}

fn is_same_partition(labels: &LabelGrid, reference: &Grid<usize>) -> bool {
    let mut forward: BTreeMap<u32, usize> = BTreeMap::new();
    let mut backward: BTreeMap<usize, u32> = BTreeMap::new();
    labels.data().iter().zip(reference.data()).all(|(&label, &comp)| {
        if label == 0 {
            return comp == usize::MAX;
        }
        *forward.entry(label).or_insert(comp) == comp
            && *backward.entry(comp).or_insert(label) == label
    })
}

#[test]
fn matches_overwrite_only_labeling_when_it_is_correct() {
    let mut rng = SimpleRng::new(0x6f76657277);
    let mut compared = 0;
    for i in 0..ITERATIONS * 5 {
        let grid = random_binary_grid(&mut rng, 7, 7, 0.55);
        for connectivity in [ConnectivityType::FourWay, ConnectivityType::EightWay] {
            let Some(plain) = overwrite_only_labeling(&grid, connectivity) else {
                continue;
            };
            let (reference, _) = flood_fill_reference(&grid, connectivity, |v| v != 0);
            if !is_same_partition(&plain, &reference) {
                continue;
            }
            let labels = label_connected_components(&grid, connectivity).unwrap();
            assert_eq!(labels, plain, "iteration {i} {connectivity:?}");
            compared += 1;
        }
    }
    assert!(compared > ITERATIONS);
}

#[test]
fn provisional_labels_minted_in_raster_order() {
    let mut rng = SimpleRng::new(7);
    for _ in 0..100 {
        let grid = random_binary_grid(&mut rng, 8, 8, 0.5);
        for scan in [
            scan_four_way(&grid).unwrap(),
            scan_eight_way(&grid, IntensityWindow::NONZERO).unwrap(),
        ] {
            let mut next = 1;
            for &label in scan.labels.data() {
                if label >= next {
                    assert_eq!(label, next, "label {label} minted out of order");
                    next += 1;
                }
            }
            assert_eq!(scan.labels_minted(), next - 1);
            assert_eq!(scan.equivalences.len(), scan.labels_minted() as usize);
        }
    }
}

#[test]
fn final_labels_are_roots() {
    let mut rng = SimpleRng::new(11);
    for _ in 0..100 {
        let grid = random_binary_grid(&mut rng, 9, 9, 0.55);
        let result = label_four_connectivity_detailed(&grid).unwrap();
        for &label in result.labels.data().iter().filter(|&&l| l > 0) {
            assert!(label <= result.labels_minted);
            assert_eq!(result.equivalences_after.get(label), Some(label));
        }
    }
}

#[test]
fn resolution_is_idempotent() {
    let mut rng = SimpleRng::new(3);
    for _ in 0..100 {
        let grid = random_binary_grid(&mut rng, 10, 10, 0.5);
        let mut map: EquivalenceMap = scan_eight_way(&grid, IntensityWindow::NONZERO)
            .unwrap()
            .equivalences;
        map.resolve_all().unwrap();
        let once = map.clone();
        map.resolve_all().unwrap();
        assert_eq!(map, once);
        assert!(map.is_resolved());
    }
}

#[test]
fn size_filter_is_monotonic() {
    let mut rng = SimpleRng::new(5);
    for _ in 0..50 {
        let grid = random_binary_grid(&mut rng, 12, 12, 0.4);
        let labels = label_eight_connectivity(&grid, IntensityWindow::NONZERO).unwrap();

        let mut previous = surviving_labels(&labels, 0);
        for threshold in 1..20 {
            let current = surviving_labels(&labels, threshold);
            assert!(current.is_subset(&previous), "threshold {threshold}");

            let filtered = filter_components_by_size(&labels, threshold);
            for (&cell, &orig) in filtered.data().iter().zip(labels.data()) {
                assert!(cell == 0 || cell == orig);
                assert_eq!(cell != 0, current.contains(&orig));
            }
            previous = current;
        }
    }
}

#[test]
fn size_filter_boundary() {
    for size in 1..10usize {
        let row: Vec<u8> = std::iter::repeat_n(1, size).collect();
        let grid = Grid::from_rows(&[row]).unwrap();
        let labels = label_connected_components(&grid, ConnectivityType::FourWay).unwrap();

        let at = filter_components_by_size(&labels, size);
        assert_eq!(count_components(&at), 0, "size {size} at threshold");

        let below = filter_components_by_size(&labels, size - 1);
        assert_eq!(count_components(&below), 1, "size {size} above threshold");
    }
}
