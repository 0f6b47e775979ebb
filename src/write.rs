//! Byte-sink abstraction the formatter emits through.
//!
//! The surrounding executor hands the engine pre-sized regions of a
//! columnar string buffer; `&mut [u8]` models that region. `Vec<u8>` is
//! the growing variant used by the owned-string entry points.

use crate::Error;

/// A sink of formatted bytes.
pub(crate) trait Write {
    /// Attempts to write an entire buffer into this writer.
    fn write_all(&mut self, data: &[u8]) -> Result<(), Error>;
}

/// Write is implemented for `&mut [u8]` by copying into the slice,
/// overwriting its data.
impl Write for &mut [u8] {
    fn write_all(&mut self, data: &[u8]) -> Result<(), Error> {
        let size = data.len().min(self.len());
        let (a, b) = core::mem::take(self).split_at_mut(size);
        a.copy_from_slice(&data[..size]);
        *self = b;

        if size == data.len() {
            Ok(())
        } else {
            Err(Error::WriteZero)
        }
    }
}

/// Write is implemented for `Vec<u8>` by appending to the vector, growing
/// as needed.
impl Write for Vec<u8> {
    fn write_all(&mut self, data: &[u8]) -> Result<(), Error> {
        self.extend_from_slice(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_write_exhaustion() {
        let mut buf = [0u8; 4];
        let mut cursor = &mut buf[..];
        assert_eq!(cursor.write_all(b"ab"), Ok(()));
        assert_eq!(cursor.write_all(b"cde"), Err(Error::WriteZero));
        assert_eq!(&buf, b"abcd");
    }

    #[test]
    fn test_vec_write_grows() {
        let mut buf = Vec::new();
        assert_eq!(buf.write_all(b"1992"), Ok(()));
        assert_eq!(buf.write_all(b"-03"), Ok(()));
        assert_eq!(buf, b"1992-03".to_vec());
    }
}
