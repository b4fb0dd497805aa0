use std::panic::{AssertUnwindSafe, catch_unwind};

use rayon::prelude::*;

use crate::foundation::error::{StretchError, StretchResult};
use crate::pixel::buffer::ImageViewMut;
use crate::pixel::channel::Channel;

/// Upper bound on row workers per render call.
pub const MAX_WORKERS: usize = 16;

/// How a render call spreads output rows over worker threads.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    /// Requested worker count; `None` uses the available parallelism.
    pub workers: Option<usize>,
    pub max_workers: usize,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            workers: None,
            max_workers: MAX_WORKERS,
        }
    }
}

impl RenderThreading {
    /// Single worker; every row renders on the calling thread.
    pub fn sequential() -> Self {
        Self {
            workers: Some(1),
            ..Self::default()
        }
    }

    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: Some(workers),
            ..Self::default()
        }
    }

    /// `min(max_workers, requested or available parallelism, rows)`, at least 1.
    pub fn worker_count(&self, rows: usize) -> StretchResult<usize> {
        let requested = match self.workers {
            Some(0) => {
                return Err(StretchError::validation(
                    "render threading 'workers' must be >= 1 when set",
                ));
            }
            Some(n) => n,
            None => std::thread::available_parallelism().map_or(1, |n| n.get()),
        };
        Ok(requested.min(self.max_workers).min(rows).max(1))
    }
}

/// Rows per band when `rows` are shared by `workers`; row `i` belongs to band
/// `i / rows_per_worker`.
pub fn rows_per_worker(rows: usize, workers: usize) -> usize {
    rows.div_ceil(workers.max(1)).max(1)
}

/// Split `dst` into contiguous row bands and run `render_band(first_row, band)` on each.
///
/// Bands never overlap, so workers write without synchronization. Every band runs to
/// completion; a band that errors or panics is reported after all of them joined.
pub(crate) fn run_bands<C, F>(
    dst: ImageViewMut<'_, C>,
    threading: &RenderThreading,
    render_band: F,
) -> StretchResult<()>
where
    C: Channel,
    F: Fn(usize, ImageViewMut<'_, C>) -> StretchResult<()> + Sync,
{
    let rows = dst.height();
    if rows == 0 {
        return Ok(());
    }
    let workers = threading.worker_count(rows)?;
    let bands = dst.split_rows(rows_per_worker(rows, workers));
    tracing::debug!(rows, workers, bands = bands.len(), "row partition");

    let results: Vec<StretchResult<()>> = if bands.len() == 1 {
        bands
            .into_iter()
            .enumerate()
            .map(|(index, (first_row, band))| run_band(index, first_row, band, &render_band))
            .collect()
    } else {
        let pool = build_thread_pool(bands.len())?;
        pool.install(|| {
            bands
                .into_par_iter()
                .enumerate()
                .map(|(index, (first_row, band))| run_band(index, first_row, band, &render_band))
                .collect()
        })
    };

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        tracing::warn!(failed, bands = results.len(), "row workers failed");
    }
    results.into_iter().collect()
}

fn run_band<C, F>(
    index: usize,
    first_row: usize,
    band: ImageViewMut<'_, C>,
    render_band: &F,
) -> StretchResult<()>
where
    C: Channel,
    F: Fn(usize, ImageViewMut<'_, C>) -> StretchResult<()> + Sync,
{
    match catch_unwind(AssertUnwindSafe(|| render_band(first_row, band))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(StretchError::worker(index, err.to_string())),
        Err(payload) => Err(StretchError::worker(index, panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

fn build_thread_pool(threads: usize) -> StretchResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("stretch-row-{i}"))
        .build()
        .map_err(|e| StretchError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/threading.rs"]
mod tests;
