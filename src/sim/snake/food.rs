//! Food placement

use std::collections::{HashSet, VecDeque};

use glam::IVec2;

use crate::rng::RandomSource;

/// Pick a uniformly random cell not in `occupied`, or `None` if the grid is full.
///
/// While free cells outnumber occupied ones this is plain rejection
/// sampling. Past that point it enumerates the free cells instead, so the
/// draw always terminates.
pub fn place_food<R: RandomSource>(
    rng: &mut R,
    grid_size: u32,
    occupied: &VecDeque<IVec2>,
) -> Option<IVec2> {
    let cells = (grid_size as usize) * (grid_size as usize);
    if occupied.len() >= cells {
        return None;
    }

    if occupied.len() * 2 < cells {
        loop {
            let cell = IVec2::new(
                rng.next_below(grid_size) as i32,
                rng.next_below(grid_size) as i32,
            );
            if !occupied.contains(&cell) {
                return Some(cell);
            }
        }
    }

    let taken: HashSet<IVec2> = occupied.iter().copied().collect();
    let g = grid_size as i32;
    let free: Vec<IVec2> = (0..g)
        .flat_map(|y| (0..g).map(move |x| IVec2::new(x, y)))
        .filter(|cell| !taken.contains(cell))
        .collect();
    log::trace!("Dense grid, choosing among {} free cells", free.len());
    let index = rng.next_below(free.len() as u32) as usize;
    free.get(index).copied()
}
