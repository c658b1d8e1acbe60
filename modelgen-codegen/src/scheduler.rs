//! Bounded-parallel rendering and output.
//!
//! Models are independent units of work: each renders, writes its own
//! file, and normalizes the written text. A fixed pool of workers
//! claims units through a shared cursor; the first failure is recorded
//! and raises a cancellation flag so no further units are claimed.
//! Units already in flight finish, and their errors are dropped;
//! first-error reporting is best effort by contract.

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use modelgen_core::write_file;

use crate::render::line_context;
use crate::{Error, Normalizer, Renderer, Result, StructMeta};

/// Suffix of generated model files.
pub const GENERATED_SUFFIX: &str = "gen.rs";

/// Render and write every model into `out_dir`.
///
/// The output directory is created before any unit is dispatched;
/// failing to create it aborts the whole run. Units run on
/// `available_parallelism` workers with no ordering between them;
/// distinct file stems mean distinct output paths.
pub fn run(
    metas: &[&StructMeta],
    renderer: &(dyn Renderer + Sync),
    normalizer: &(dyn Normalizer + Sync),
    out_dir: &Path,
) -> Result<()> {
    if metas.is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(out_dir).map_err(|source| Error::OutputDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let workers = thread::available_parallelism()
        .map(usize::from)
        .unwrap_or(1)
        .min(metas.len());
    let cursor = AtomicUsize::new(0);
    let cancelled = AtomicBool::new(false);
    let first_error: Mutex<Option<Error>> = Mutex::new(None);

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                loop {
                    if cancelled.load(Ordering::Acquire) {
                        break;
                    }
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(meta) = metas.get(index) else {
                        break;
                    };
                    if let Err(err) = generate_one(meta, renderer, normalizer, out_dir) {
                        let mut slot = first_error.lock().unwrap_or_else(|e| e.into_inner());
                        if slot.is_none() {
                            *slot = Some(err);
                        }
                        cancelled.store(true, Ordering::Release);
                        break;
                    }
                }
            });
        }
    });

    match first_error.into_inner().unwrap_or_else(|e| e.into_inner()) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn generate_one(
    meta: &StructMeta,
    renderer: &dyn Renderer,
    normalizer: &dyn Normalizer,
    out_dir: &Path,
) -> Result<()> {
    let rendered = renderer.render(meta).map_err(|source| Error::Render {
        ident: meta.type_ident.clone(),
        source,
    })?;

    let path = out_dir.join(format!("{}.{GENERATED_SUFFIX}", meta.file_stem));
    write_file(&path, &rendered).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;

    let normalized = normalizer
        .normalize(&path, &rendered)
        .map_err(|source| Error::Normalize {
            context: line_context(&rendered, source.line),
            path: path.clone(),
            source,
        })?;
    if normalized != rendered {
        write_file(&path, &normalized).map_err(|source| Error::Write { path, source })?;
    }
    Ok(())
}
