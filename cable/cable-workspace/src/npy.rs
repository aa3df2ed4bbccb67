//! NumPy `.npy` export of margin grids.
//!
//! # Format
//!
//! ```text
//! UINT8[6]   – Magic "\x93NUMPY"
//! UINT8[2]   – Version 1.0
//! UINT16     – Header length, little endian
//! ASCII      – Python dict literal, space padded, newline terminated
//! REAL64[n]  – Values, little endian, C order
//! ```
//!
//! The preamble plus header is padded to a multiple of 64 bytes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{WorkspaceError, WorkspaceResult};
use crate::sample::MarginGrid;

/// Magic bytes opening every `.npy` file.
pub const NPY_MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Magic, version and header length.
const PREAMBLE_SIZE: usize = 10;

/// Alignment of the data section.
const HEADER_ALIGN: usize = 64;

/// Build the space-padded header dict for an `f8` array of `shape`.
#[must_use]
pub fn npy_header(shape: [usize; 3]) -> String {
    let [nx, ny, nz] = shape;
    let mut header =
        format!("{{'descr': '<f8', 'fortran_order': False, 'shape': ({nx}, {ny}, {nz}), }}");
    let unpadded = PREAMBLE_SIZE + header.len() + 1;
    let padding = (HEADER_ALIGN - unpadded % HEADER_ALIGN) % HEADER_ALIGN;
    header.extend(std::iter::repeat_n(' ', padding));
    header.push('\n');
    header
}

impl MarginGrid {
    /// Write the grid as a `(nx, ny, nz)` float64 array to a `.npy` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cable_workspace::{CableRig, GridSpec, RoofedBox, SampleParams, sample_margin_grid};
    ///
    /// let rig = CableRig::square_frame(0.342, 0.727);
    /// let grid = GridSpec::under_frame(0.342, 0.727, 0.01, 20);
    /// let margins = sample_margin_grid(&rig, &RoofedBox::default(), &grid, &SampleParams::default())?;
    /// margins.write_npy("margins.npy")?;
    /// # Ok::<(), cable_workspace::WorkspaceError>(())
    /// ```
    pub fn write_npy<P: AsRef<Path>>(&self, path: P) -> WorkspaceResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_npy_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the grid in `.npy` format to any writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or the header does not fit in the
    /// version 1.0 length field.
    pub fn write_npy_to<W: Write>(&self, writer: &mut W) -> WorkspaceResult<()> {
        let header = npy_header(self.shape());
        let header_len = u16::try_from(header.len())
            .map_err(|_| WorkspaceError::invalid_grid("npy header too long"))?;

        writer.write_all(NPY_MAGIC)?;
        writer.write_all(&[1, 0])?;
        writer.write_all(&header_len.to_le_bytes())?;
        writer.write_all(header.as_bytes())?;
        for value in &self.values {
            writer.write_all(&value.to_le_bytes())?;
        }
        Ok(())
    }
}
