// Aliquot
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! CSV Output Sink
//!
//! Files are written to a temporary sibling and renamed over the destination
//! only once the last row has been flushed and synced. A failed run leaves the
//! destination exactly as it was.

use crate::density::DensitySample;
use crate::error::{AliquotError, AliquotResult};
use crate::row::{HEADER, ResultRow};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Write the header and every row to `sink`
pub fn write_csv<W: Write>(sink: W, rows: &[ResultRow]) -> AliquotResult<()> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record(row.to_record())?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write one `index,prime,residue,ratio` record per residue of every sample
///
/// Consumes the samples as they are produced. Returns the number of samples.
pub fn write_density_csv<W, I>(sink: W, samples: I) -> AliquotResult<usize>
where
    W: Write,
    I: IntoIterator<Item = DensitySample>,
{
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(["index", "prime", "residue", "ratio"])?;

    let mut written = 0;
    for sample in samples {
        let index = sample.index.to_string();
        let prime = sample.prime.to_string();
        for (residue, ratio) in sample.ratios {
            let residue = residue.to_string();
            let ratio = ratio.to_string();
            writer.write_record([index.as_str(), prime.as_str(), residue.as_str(), ratio.as_str()])?;
        }
        written += 1;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(written)
}

/// Atomically replace `path` with the CSV table of `rows`
pub fn write_csv_file(path: &Path, rows: &[ResultRow]) -> AliquotResult<()> {
    persist_atomically(path, |file| write_csv(file, rows))
}

/// Run `write` against a temporary file next to `path`, then move it into place
pub fn persist_atomically<F>(path: &Path, write: F) -> AliquotResult<()>
where
    F: FnOnce(&mut File) -> AliquotResult<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staging = NamedTempFile::new_in(dir).map_err(|e| AliquotError::io(dir, e))?;
    write(staging.as_file_mut())?;
    staging.as_file().sync_all().map_err(|e| AliquotError::io(staging.path(), e))?;

    let staged = staging.path().to_path_buf();
    staging.persist(path).map_err(|e| AliquotError::io(path, e.error))?;
    debug!(from = %staged.display(), to = %path.display(), "output persisted");
    Ok(())
}
