//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Negotiate About Window Size
//!

use crate::result::{CodecError, CodecResult, SubnegotiationErrorKind};
use crate::consts;
use byteorder::{BigEndian, WriteBytesExt};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Represents the Negotiate About Window Size (NAWS) option data.
///
/// # Format
/// The window size is encoded as four bytes in big-endian format:
/// - 2 bytes for columns (width)
/// - 2 bytes for rows (height)
///
/// # Example
/// ```
/// use otelnet_telnetcodec::naws::WindowSize;
///
/// let size = WindowSize::new(80, 24);
/// assert_eq!(size.cols, 80);
/// assert_eq!(size.rows, 24);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowSize {
    /// The number of columns (characters) in the terminal window
    pub cols: u16,
    /// The number of rows (lines) in the terminal window
    pub rows: u16,
}

impl WindowSize {
    /// Creates a new `WindowSize` with the specified columns and rows.
    pub fn new(cols: u16, rows: u16) -> Self {
        WindowSize { cols, rows }
    }

    /// Builds a `WindowSize` from wider integers, rejecting anything that does not fit
    /// the 16 bit NAWS fields.
    pub fn checked(width: u32, height: u32) -> CodecResult<WindowSize> {
        match (u16::try_from(width), u16::try_from(height)) {
            (Ok(cols), Ok(rows)) => Ok(WindowSize { cols, rows }),
            _ => Err(CodecError::InvalidWindowSize { width, height }),
        }
    }

    /// The NAWS subnegotiation data always occupies exactly 4 bytes.
    pub fn len(&self) -> usize {
        4
    }

    /// Encodes this `WindowSize` into a byte buffer using big-endian format.
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> CodecResult<usize> {
        Ok(self.write(&mut dst.writer())?)
    }

    /// Writes the columns followed by the rows as big-endian u16 values.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        writer.write_u16::<BigEndian>(self.cols)?;
        writer.write_u16::<BigEndian>(self.rows)?;
        Ok(4)
    }

    /// Decodes a `WindowSize` from a byte buffer in big-endian format.
    ///
    /// # Errors
    /// Returns `CodecError::SubnegotiationError` with `InsufficientData` if
    /// fewer than 4 bytes are available in the buffer.
    pub fn decode<T: Buf>(src: &mut T) -> CodecResult<WindowSize> {
        // NAWS format: WIDTH-HIGH WIDTH-LOW HEIGHT-HIGH HEIGHT-LOW
        if src.remaining() >= 4 {
            Ok(WindowSize {
                cols: src.get_u16(),
                rows: src.get_u16(),
            })
        } else {
            Err(CodecError::SubnegotiationError {
                option: Some(consts::option::NAWS),
                reason: SubnegotiationErrorKind::InsufficientData {
                    required: 4,
                    available: src.remaining(),
                },
            })
        }
    }

    /// Subnegotiation payload `NAWS <cols16> <rows16>`, unescaped.
    pub fn to_subnegotiation(&self) -> CodecResult<Bytes> {
        let mut payload = BytesMut::with_capacity(1 + self.len());
        payload.put_u8(consts::option::NAWS);
        self.encode(&mut payload)?;
        Ok(payload.freeze())
    }
}

impl Default for WindowSize {
    /// A standard 80x24 terminal.
    fn default() -> Self {
        WindowSize { cols: 80, rows: 24 }
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.cols, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_big_endian() {
        let mut buffer = BytesMut::new();
        assert_eq!(WindowSize::new(0x0102, 0x0304).encode(&mut buffer), Ok(4));
        assert_eq!(&buffer[..], &[1, 2, 3, 4]);
    }

    #[test]
    fn decode_requires_four_bytes() {
        let mut short = Bytes::from_static(&[0, 80, 0]);
        assert!(matches!(
            WindowSize::decode(&mut short),
            Err(CodecError::SubnegotiationError {
                option: Some(31),
                reason: SubnegotiationErrorKind::InsufficientData {
                    required: 4,
                    available: 3
                }
            })
        ));
        let mut full = Bytes::from_static(&[0, 132, 0, 43]);
        assert_eq!(WindowSize::decode(&mut full), Ok(WindowSize::new(132, 43)));
    }

    #[test]
    fn checked_rejects_oversized_dimensions() {
        assert_eq!(WindowSize::checked(65535, 0), Ok(WindowSize::new(65535, 0)));
        assert_eq!(
            WindowSize::checked(65536, 24),
            Err(CodecError::InvalidWindowSize {
                width: 65536,
                height: 24
            })
        );
    }

    #[test]
    fn subnegotiation_payload_leads_with_option() {
        assert_eq!(
            WindowSize::new(80, 24).to_subnegotiation().as_deref(),
            Ok(&[31u8, 0, 80, 0, 24][..])
        );
    }

    #[test]
    fn default_and_display() {
        assert_eq!(WindowSize::default(), WindowSize::new(80, 24));
        assert_eq!(WindowSize::new(100, 30).to_string(), "(100,30)");
    }
}
