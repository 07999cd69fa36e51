//! ESC/POS command framing.

/// ESC @ — initialize the printer.
pub const INITIALIZE: [u8; 2] = [0x1b, 0x40];

/// ESC c 0 2 — clear sticky print-mode state left by earlier jobs.
const RESET_MODE: [u8; 4] = [0x1b, 0x63, 0x30, 0x02];

/// GS V 66 0 — feed to the cut position, then partial cut.
pub const PARTIAL_CUT: [u8; 4] = [0x1d, 0x56, 0x42, 0x00];

/// Full reset sequence sent around a job: initialize, then clear print
/// modes.
pub fn reset_sequence() -> Vec<u8> {
    let mut out = Vec::with_capacity(INITIALIZE.len() + RESET_MODE.len());
    out.extend_from_slice(&INITIALIZE);
    out.extend_from_slice(&RESET_MODE);
    out
}

/// GS v 0 — raster bit image, normal density.
///
/// `bytes_per_row` and `height` describe the band geometry in the
/// little-endian xL xH yL yH header; `data` carries
/// `bytes_per_row * height` packed bytes, one set bit per black dot.
pub fn raster_band(bytes_per_row: usize, height: u32, data: &[u8]) -> Vec<u8> {
    debug_assert_eq!(data.len(), bytes_per_row * height as usize);

    let x = bytes_per_row as u16;
    let y = height as u16;
    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.extend_from_slice(&[0x1d, 0x76, 0x30, 0x00]);
    cmd.extend_from_slice(&[(x & 0xff) as u8, (x >> 8) as u8]);
    cmd.extend_from_slice(&[(y & 0xff) as u8, (y >> 8) as u8]);
    cmd.extend_from_slice(data);
    cmd
}

/// A text line in the printer's default code page, LF-terminated.
pub fn text_line(line: &str) -> Vec<u8> {
    let mut out = line.as_bytes().to_vec();
    out.push(b'\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_sequence_bytes() {
        assert_eq!(
            reset_sequence(),
            vec![0x1b, 0x40, 0x1b, 0x63, 0x30, 0x02]
        );
    }

    #[test]
    fn test_partial_cut_bytes() {
        assert_eq!(PARTIAL_CUT, [0x1d, 0x56, 0x42, 0x00]);
    }

    #[test]
    fn test_raster_band_header() {
        // 72 bytes per row (576px), 256 rows: x = 72, y = 0x0100.
        let data = vec![0u8; 72 * 256];
        let cmd = raster_band(72, 256, &data);
        assert_eq!(&cmd[..8], &[0x1d, 0x76, 0x30, 0x00, 72, 0x00, 0x00, 0x01]);
        assert_eq!(cmd.len(), 8 + data.len());
    }

    #[test]
    fn test_raster_band_carries_data_verbatim() {
        let data = vec![0xAA, 0x55, 0x0F];
        let cmd = raster_band(3, 1, &data);
        assert_eq!(&cmd[8..], &data[..]);
    }

    #[test]
    fn test_text_line_appends_newline() {
        assert_eq!(text_line("Name: jo"), b"Name: jo\n");
    }
}
