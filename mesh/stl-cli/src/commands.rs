//! Command implementations. Each writes its report to `out`.

use std::io::Write;

use anyhow::{Context, Result};
use stl_io::StlLibrary;
use stl_io::binary::encoded_len;
use tracing::warn;

/// Print one file name per line.
pub fn list<W: Write>(library: &StlLibrary, out: &mut W) -> Result<()> {
    let names = library
        .list()
        .with_context(|| format!("failed to list {}", library.root().display()))?;
    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

/// Print a model as JSON followed by a newline.
///
/// Fails without writing anything if the model holds NaN or infinite
/// components, since JSON has no encoding for them.
pub fn show<W: Write>(library: &StlLibrary, name: &str, pretty: bool, out: &mut W) -> Result<()> {
    let model = library
        .load(name)
        .with_context(|| format!("failed to load {name}"))?;
    model
        .check_finite()
        .with_context(|| format!("cannot print {name} as JSON"))?;
    if pretty {
        serde_json::to_writer_pretty(&mut *out, &model)?;
    } else {
        serde_json::to_writer(&mut *out, &model)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Print name, facet count and encoded size.
pub fn info<W: Write>(library: &StlLibrary, name: &str, out: &mut W) -> Result<()> {
    let model = library
        .load(name)
        .with_context(|| format!("failed to load {name}"))?;
    writeln!(out, "name:   {}", model.name())?;
    writeln!(out, "facets: {}", model.face_count())?;
    if let Some(bytes) = encoded_len(model.face_count()) {
        writeln!(out, "bytes:  {bytes}")?;
    }
    Ok(())
}

/// Decode every listed file. Returns `false` if any failed.
pub fn check<W: Write>(library: &StlLibrary, out: &mut W) -> Result<bool> {
    let names = library
        .list()
        .with_context(|| format!("failed to list {}", library.root().display()))?;

    let mut failed = 0usize;
    for name in &names {
        match library.load(name) {
            Ok(model) => writeln!(out, "ok    {name} ({} facets)", model.face_count())?,
            Err(e) => {
                warn!(name = name.as_str(), error = %e, "STL file failed to decode");
                writeln!(out, "FAIL  {name}: {e}")?;
                failed += 1;
            }
        }
    }
    writeln!(out, "{} checked, {failed} failed", names.len())?;
    Ok(failed == 0)
}
