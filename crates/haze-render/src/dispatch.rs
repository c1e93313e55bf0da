//! Row-band parallel evaluation of a per-pixel function.

use std::thread;

use glam::Vec3;

use crate::error::RenderError;

/// Worker count for a requested value; `0` means one per logical CPU.
pub fn worker_count(requested: usize) -> usize {
    if requested == 0 {
        num_cpus::get().max(1)
    } else {
        requested
    }
}

/// Fill `out` (row-major, `width * height`) with `shade(x, y)`.
///
/// Rows are split into contiguous bands, one per worker. Each worker owns its
/// band mutably and shares `shade` read-only, so results do not depend on the
/// worker count.
pub fn dispatch_rows<F>(
    width: u32,
    height: u32,
    workers: usize,
    out: &mut [Vec3],
    shade: F,
) -> Result<(), RenderError>
where
    F: Fn(u32, u32) -> Vec3 + Sync,
{
    let width_px = width as usize;
    let pixels = width_px * height as usize;
    if width == 0 || height == 0 || out.len() < pixels {
        return Err(RenderError::InvalidViewport { width, height });
    }
    let out = &mut out[..pixels];

    let workers = workers.clamp(1, height as usize);
    if workers == 1 {
        shade_band(0, width, out, &shade);
        return Ok(());
    }

    let rows_per_band = (height as usize).div_ceil(workers);
    let shade = &shade;
    thread::scope(|scope| -> Result<(), RenderError> {
        let mut handles = Vec::with_capacity(workers);
        for (band, rows) in out.chunks_mut(rows_per_band * width_px).enumerate() {
            let first_row = (band * rows_per_band) as u32;
            let handle = thread::Builder::new()
                .name(format!("haze-shade-{band}"))
                .spawn_scoped(scope, move || shade_band(first_row, width, rows, shade))
                .map_err(RenderError::WorkerSpawn)?;
            handles.push(handle);
        }
        for handle in handles {
            if let Err(panic) = handle.join() {
                std::panic::resume_unwind(panic);
            }
        }
        Ok(())
    })
}

fn shade_band<F>(first_row: u32, width: u32, rows: &mut [Vec3], shade: &F)
where
    F: Fn(u32, u32) -> Vec3,
{
    for (i, row) in rows.chunks_mut(width as usize).enumerate() {
        let y = first_row + i as u32;
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = shade(x as u32, y);
        }
    }
}
