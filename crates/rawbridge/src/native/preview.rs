//! TIFF container scan: embedded preview JPEG and XMP block discovery.
//!
//! RAW formats in the TIFF family (ARW, NEF, CR2, DNG, ORF, PEF and
//! others) store one or more JPEG previews across IFD0, IFD1 and SubIFDs,
//! and may carry an XMP packet under a dedicated IFD0 tag. The scan walks
//! the IFD chain once, collects every preview candidate, and keeps the
//! largest; a marker scan over the file body is the fallback for exotic
//! layouts that hide the preview outside any IFD.

use std::io::{Cursor, Read, Seek, SeekFrom};

use thiserror::Error;
use tracing::debug;

const TIFF_MAGIC_LE: [u8; 4] = [0x49, 0x49, 0x2A, 0x00];
const TIFF_MAGIC_BE: [u8; 4] = [0x4D, 0x4D, 0x00, 0x2A];

const TAG_COMPRESSION: u16 = 0x0103;
const TAG_STRIP_OFFSETS: u16 = 0x0111;
const TAG_STRIP_BYTE_COUNTS: u16 = 0x0117;
const TAG_SUBIFD: u16 = 0x014A;
const TAG_JPEG_OFFSET: u16 = 0x0201;
const TAG_JPEG_LENGTH: u16 = 0x0202;
const TAG_XMP: u16 = 0x02BC;

const COMPRESSION_JPEG: u16 = 6;
const COMPRESSION_JPEG_OLD: u16 = 7;

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

// Marker-scan fallback tuning: skip the TIFF header region and reject
// fragments too small to be a real preview.
const SCAN_START: usize = 8192;
const SCAN_MIN_PREVIEW: usize = 50_000;

/// Container-level failures. These map to engine status codes at the
/// call site; absence of a preview or XMP block is not an error here.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("not a TIFF-family container")]
    NotTiff,

    #[error("truncated container: {0}")]
    Truncated(String),
}

/// Result of one container scan.
#[derive(Debug, Default)]
pub struct ContainerScan {
    /// The largest embedded JPEG preview, when one exists.
    pub preview: Option<Vec<u8>>,
    /// The XMP packet bytes, when the source carries one.
    pub xmp: Option<Vec<u8>>,
}

/// Quick header check without parsing the IFD chain.
pub fn is_tiff_container(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && (bytes[..4] == TIFF_MAGIC_LE || bytes[..4] == TIFF_MAGIC_BE)
}

/// Walk the container and collect the best preview plus the XMP block.
pub fn scan_container(bytes: &[u8]) -> Result<ContainerScan, ContainerError> {
    let mut cursor = Cursor::new(bytes);

    let mut header = [0u8; 4];
    cursor
        .read_exact(&mut header)
        .map_err(|e| ContainerError::Truncated(format!("header: {e}")))?;

    let little_endian = if header == TIFF_MAGIC_LE {
        true
    } else if header == TIFF_MAGIC_BE {
        false
    } else {
        return Err(ContainerError::NotTiff);
    };

    let ifd0_offset = read_u32(&mut cursor, little_endian)?;
    let ifd0 = read_ifd(&mut cursor, ifd0_offset, little_endian, bytes.len())?;

    let mut scan = ContainerScan::default();
    let mut candidates: Vec<Vec<u8>> = Vec::new();

    for entry in &ifd0.entries {
        match entry.tag {
            TAG_XMP => {
                if let Some(xmp) = slice_at(bytes, entry.value_offset as usize, entry.count as usize)
                {
                    scan.xmp = Some(xmp.to_vec());
                }
            }
            TAG_SUBIFD if entry.count > 0 => {
                for offset in subifd_offsets(bytes, entry, little_endian) {
                    if let Ok(sub) = read_ifd(&mut cursor, offset, little_endian, bytes.len()) {
                        if let Some(jpeg) = preview_from_entries(&sub.entries, bytes) {
                            candidates.push(jpeg);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    // IFD1 carries the standard EXIF thumbnail.
    if ifd0.next_ifd != 0 {
        if let Ok(ifd1) = read_ifd(&mut cursor, ifd0.next_ifd, little_endian, bytes.len()) {
            if let Some(jpeg) = preview_from_entries(&ifd1.entries, bytes) {
                candidates.push(jpeg);
            }
        }
    }

    // Some formats place the preview tags directly in IFD0.
    if let Some(jpeg) = preview_from_entries(&ifd0.entries, bytes) {
        candidates.push(jpeg);
    }

    scan.preview = candidates.into_iter().max_by_key(Vec::len);

    if scan.preview.is_none() {
        scan.preview = scan_for_jpeg(bytes);
        if scan.preview.is_some() {
            debug!("preview located by marker scan, not by IFD walk");
        }
    }

    Ok(scan)
}

// Multi-SubIFD sources rarely carry more than four sub-images; the cap
// bounds the walk on corrupt counts.
const SUBIFD_WALK_LIMIT: usize = 8;

/// SubIFD offsets named by one entry. With count 1 the entry value is
/// the IFD offset itself; with a larger count it is the offset of a
/// u32 offset array, one element per SubIFD.
fn subifd_offsets(bytes: &[u8], entry: &IfdEntry, little_endian: bool) -> Vec<u32> {
    if entry.count == 1 {
        return vec![entry.value_offset];
    }
    let count = (entry.count as usize).min(SUBIFD_WALK_LIMIT);
    let Some(array) = slice_at(bytes, entry.value_offset as usize, count * 4) else {
        return Vec::new();
    };
    array
        .chunks_exact(4)
        .map(|word| {
            let word = [word[0], word[1], word[2], word[3]];
            if little_endian {
                u32::from_le_bytes(word)
            } else {
                u32::from_be_bytes(word)
            }
        })
        .collect()
}

struct Ifd {
    entries: Vec<IfdEntry>,
    next_ifd: u32,
}

struct IfdEntry {
    tag: u16,
    count: u32,
    value_offset: u32,
}

fn read_u16<R: Read>(reader: &mut R, little_endian: bool) -> Result<u16, ContainerError> {
    let mut buf = [0u8; 2];
    reader
        .read_exact(&mut buf)
        .map_err(|e| ContainerError::Truncated(format!("u16: {e}")))?;
    Ok(if little_endian {
        u16::from_le_bytes(buf)
    } else {
        u16::from_be_bytes(buf)
    })
}

fn read_u32<R: Read>(reader: &mut R, little_endian: bool) -> Result<u32, ContainerError> {
    let mut buf = [0u8; 4];
    reader
        .read_exact(&mut buf)
        .map_err(|e| ContainerError::Truncated(format!("u32: {e}")))?;
    Ok(if little_endian {
        u32::from_le_bytes(buf)
    } else {
        u32::from_be_bytes(buf)
    })
}

fn read_ifd<R: Read + Seek>(
    reader: &mut R,
    offset: u32,
    little_endian: bool,
    file_size: usize,
) -> Result<Ifd, ContainerError> {
    reader
        .seek(SeekFrom::Start(u64::from(offset)))
        .map_err(|e| ContainerError::Truncated(format!("seek to IFD: {e}")))?;

    let entry_count = read_u16(reader, little_endian)?;
    if entry_count > 1000 {
        return Err(ContainerError::Truncated(format!(
            "implausible IFD entry count {entry_count}"
        )));
    }

    let mut entries = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
        let tag = read_u16(reader, little_endian)?;
        let _typ = read_u16(reader, little_endian)?;
        let count = read_u32(reader, little_endian)?;
        let value_offset = read_u32(reader, little_endian)?;

        // Entries pointing past the file are noise; skip them rather
        // than failing the whole scan.
        if value_offset as usize > file_size {
            continue;
        }
        entries.push(IfdEntry {
            tag,
            count,
            value_offset,
        });
    }

    let next_ifd = read_u32(reader, little_endian).unwrap_or(0);
    Ok(Ifd { entries, next_ifd })
}

fn slice_at(bytes: &[u8], offset: usize, length: usize) -> Option<&[u8]> {
    if length == 0 || offset.checked_add(length)? > bytes.len() {
        return None;
    }
    Some(&bytes[offset..offset + length])
}

fn jpeg_at(bytes: &[u8], offset: u32, length: u32) -> Option<Vec<u8>> {
    let data = slice_at(bytes, offset as usize, length as usize)?;
    (data.len() >= 2 && data[..2] == JPEG_SOI).then(|| data.to_vec())
}

/// Pull a JPEG preview out of one IFD's entries, trying the interchange
/// tags first and the strip tags second.
fn preview_from_entries(entries: &[IfdEntry], bytes: &[u8]) -> Option<Vec<u8>> {
    let mut jpeg_offset = None;
    let mut jpeg_length = None;
    let mut strip_offset = None;
    let mut strip_length = None;
    let mut compression = None;

    for entry in entries {
        match entry.tag {
            TAG_JPEG_OFFSET => jpeg_offset = Some(entry.value_offset),
            TAG_JPEG_LENGTH => jpeg_length = Some(entry.value_offset),
            TAG_STRIP_OFFSETS => strip_offset = Some(entry.value_offset),
            TAG_STRIP_BYTE_COUNTS => strip_length = Some(entry.value_offset),
            TAG_COMPRESSION => compression = Some(entry.value_offset as u16),
            _ => {}
        }
    }

    if let (Some(offset), Some(length)) = (jpeg_offset, jpeg_length) {
        if let Some(data) = jpeg_at(bytes, offset, length) {
            return Some(data);
        }
    }

    let strips_are_jpeg = matches!(compression, Some(COMPRESSION_JPEG | COMPRESSION_JPEG_OLD));
    if strips_are_jpeg {
        if let (Some(offset), Some(length)) = (strip_offset, strip_length) {
            if let Some(data) = jpeg_at(bytes, offset, length) {
                return Some(data);
            }
        }
    }

    None
}

/// Fallback: look for SOI/EOI marker pairs in the file body.
fn scan_for_jpeg(bytes: &[u8]) -> Option<Vec<u8>> {
    let start = SCAN_START.min(bytes.len());

    for i in start..bytes.len().saturating_sub(2) {
        if bytes[i..i + 2] != JPEG_SOI {
            continue;
        }
        for j in (i + 2)..bytes.len().saturating_sub(1) {
            if bytes[j..j + 2] == JPEG_EOI {
                let fragment = &bytes[i..j + 2];
                if fragment.len() > SCAN_MIN_PREVIEW {
                    return Some(fragment.to_vec());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiff_header_le(ifd0_offset: u32) -> Vec<u8> {
        let mut data = TIFF_MAGIC_LE.to_vec();
        data.extend_from_slice(&ifd0_offset.to_le_bytes());
        data
    }

    fn ifd_entry_le(tag: u16, count: u32, value: u32) -> Vec<u8> {
        let mut entry = Vec::new();
        entry.extend_from_slice(&tag.to_le_bytes());
        entry.extend_from_slice(&4u16.to_le_bytes()); // type LONG
        entry.extend_from_slice(&count.to_le_bytes());
        entry.extend_from_slice(&value.to_le_bytes());
        entry
    }

    /// Build a minimal LE container: IFD0 at offset 8 with the given
    /// entries, no IFD1, payload appended afterwards.
    fn build_container(entries: &[Vec<u8>], payload_offset: usize, payload: &[u8]) -> Vec<u8> {
        let mut data = tiff_header_le(8);
        data.extend_from_slice(&(entries.len() as u16).to_le_bytes());
        for entry in entries {
            data.extend_from_slice(entry);
        }
        data.extend_from_slice(&0u32.to_le_bytes()); // no IFD1
        if data.len() < payload_offset {
            data.resize(payload_offset, 0);
        }
        data.extend_from_slice(payload);
        data
    }

    #[test]
    fn test_is_tiff_container() {
        assert!(is_tiff_container(&[0x49, 0x49, 0x2A, 0x00, 0, 0, 0, 0]));
        assert!(is_tiff_container(&[0x4D, 0x4D, 0x00, 0x2A, 0, 0, 0, 0]));
        assert!(!is_tiff_container(&JPEG_SOI));
        assert!(!is_tiff_container(&[]));
    }

    #[test]
    fn test_scan_rejects_non_tiff() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert!(matches!(
            scan_container(&jpeg),
            Err(ContainerError::NotTiff)
        ));
    }

    #[test]
    fn test_scan_rejects_truncated_header() {
        assert!(matches!(
            scan_container(&[0x49, 0x49]),
            Err(ContainerError::Truncated(_))
        ));
    }

    #[test]
    fn test_scan_empty_ifd_has_no_preview_no_xmp() {
        let data = build_container(&[], 0, &[]);
        let scan = scan_container(&data).unwrap();
        assert!(scan.preview.is_none());
        assert!(scan.xmp.is_none());
    }

    #[test]
    fn test_scan_finds_interchange_preview_in_ifd0() {
        let preview_offset = 100u32;
        let mut jpeg = JPEG_SOI.to_vec();
        jpeg.extend_from_slice(&[0x01, 0x02, 0x03, 0x04]);
        jpeg.extend_from_slice(&JPEG_EOI);

        let entries = vec![
            ifd_entry_le(TAG_JPEG_OFFSET, 1, preview_offset),
            ifd_entry_le(TAG_JPEG_LENGTH, 1, jpeg.len() as u32),
        ];
        let data = build_container(&entries, preview_offset as usize, &jpeg);

        let scan = scan_container(&data).unwrap();
        assert_eq!(scan.preview.as_deref(), Some(jpeg.as_slice()));
    }

    #[test]
    fn test_scan_finds_strip_preview_with_jpeg_compression() {
        let preview_offset = 100u32;
        let mut jpeg = JPEG_SOI.to_vec();
        jpeg.extend_from_slice(&[0u8; 16]);
        jpeg.extend_from_slice(&JPEG_EOI);

        let entries = vec![
            ifd_entry_le(TAG_COMPRESSION, 1, u32::from(COMPRESSION_JPEG)),
            ifd_entry_le(TAG_STRIP_OFFSETS, 1, preview_offset),
            ifd_entry_le(TAG_STRIP_BYTE_COUNTS, 1, jpeg.len() as u32),
        ];
        let data = build_container(&entries, preview_offset as usize, &jpeg);

        let scan = scan_container(&data).unwrap();
        assert_eq!(scan.preview.as_deref(), Some(jpeg.as_slice()));
    }

    #[test]
    fn test_scan_ignores_strips_with_raw_compression() {
        let preview_offset = 100u32;
        let mut not_jpeg = JPEG_SOI.to_vec();
        not_jpeg.extend_from_slice(&[0u8; 16]);

        let entries = vec![
            ifd_entry_le(TAG_COMPRESSION, 1, 1), // uncompressed strips
            ifd_entry_le(TAG_STRIP_OFFSETS, 1, preview_offset),
            ifd_entry_le(TAG_STRIP_BYTE_COUNTS, 1, not_jpeg.len() as u32),
        ];
        let data = build_container(&entries, preview_offset as usize, &not_jpeg);

        let scan = scan_container(&data).unwrap();
        assert!(scan.preview.is_none());
    }

    #[test]
    fn test_scan_extracts_xmp_packet() {
        let xmp_offset = 100u32;
        let xmp = b"<x:xmpmeta xmlns:x=\"adobe:ns:meta/\"></x:xmpmeta>";

        let entries = vec![ifd_entry_le(TAG_XMP, xmp.len() as u32, xmp_offset)];
        let data = build_container(&entries, xmp_offset as usize, xmp);

        let scan = scan_container(&data).unwrap();
        assert_eq!(scan.xmp.as_deref(), Some(xmp.as_slice()));
        assert!(scan.preview.is_none());
    }

    #[test]
    fn test_scan_prefers_largest_candidate() {
        // Small thumbnail in IFD0, larger preview in the SubIFD.
        let small_offset = 200u32;
        let mut small = JPEG_SOI.to_vec();
        small.extend_from_slice(&[0u8; 8]);
        small.extend_from_slice(&JPEG_EOI);

        let large_offset = 300u32;
        let mut large = JPEG_SOI.to_vec();
        large.extend_from_slice(&[0u8; 64]);
        large.extend_from_slice(&JPEG_EOI);

        // SubIFD at offset 120 with interchange tags for the large JPEG.
        let subifd_offset = 120u32;
        let entries = vec![
            ifd_entry_le(TAG_JPEG_OFFSET, 1, small_offset),
            ifd_entry_le(TAG_JPEG_LENGTH, 1, small.len() as u32),
            ifd_entry_le(TAG_SUBIFD, 1, subifd_offset),
        ];
        let mut data = build_container(&entries, subifd_offset as usize, &[]);

        // Write the SubIFD.
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&ifd_entry_le(TAG_JPEG_OFFSET, 1, large_offset));
        data.extend_from_slice(&ifd_entry_le(TAG_JPEG_LENGTH, 1, large.len() as u32));
        data.extend_from_slice(&0u32.to_le_bytes());

        data.resize(small_offset as usize, 0);
        data.extend_from_slice(&small);
        data.resize(large_offset as usize, 0);
        data.extend_from_slice(&large);

        let scan = scan_container(&data).unwrap();
        assert_eq!(scan.preview.as_deref(), Some(large.as_slice()));
    }

    #[test]
    fn test_subifd_offset_array_is_dereferenced() {
        // SubIFD entry with count 2: the value is the offset of a u32
        // offset array, not an IFD. Both named SubIFDs must be walked.
        let small_offset = 300u32;
        let mut small = JPEG_SOI.to_vec();
        small.extend_from_slice(&[0u8; 8]);
        small.extend_from_slice(&JPEG_EOI);

        let large_offset = 200u32;
        let mut large = JPEG_SOI.to_vec();
        large.extend_from_slice(&[0u8; 64]);
        large.extend_from_slice(&JPEG_EOI);

        let array_offset = 40u32;
        let entries = vec![ifd_entry_le(TAG_SUBIFD, 2, array_offset)];
        let mut offsets = Vec::new();
        offsets.extend_from_slice(&60u32.to_le_bytes());
        offsets.extend_from_slice(&120u32.to_le_bytes());
        let mut data = build_container(&entries, array_offset as usize, &offsets);

        // First SubIFD (offset 60) names the small preview.
        data.resize(60, 0);
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&ifd_entry_le(TAG_JPEG_OFFSET, 1, small_offset));
        data.extend_from_slice(&ifd_entry_le(TAG_JPEG_LENGTH, 1, small.len() as u32));
        data.extend_from_slice(&0u32.to_le_bytes());

        // Second SubIFD (offset 120) names the large preview.
        data.resize(120, 0);
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&ifd_entry_le(TAG_JPEG_OFFSET, 1, large_offset));
        data.extend_from_slice(&ifd_entry_le(TAG_JPEG_LENGTH, 1, large.len() as u32));
        data.extend_from_slice(&0u32.to_le_bytes());

        data.resize(large_offset as usize, 0);
        data.extend_from_slice(&large);
        data.resize(small_offset as usize, 0);
        data.extend_from_slice(&small);

        let scan = scan_container(&data).unwrap();
        assert_eq!(scan.preview.as_deref(), Some(large.as_slice()));
    }

    #[test]
    fn test_subifd_offset_array_truncated_yields_nothing() {
        // Offset array of four SubIFDs claimed, but the file ends before
        // the array does.
        let entries = vec![ifd_entry_le(TAG_SUBIFD, 4, 20)];
        let data = build_container(&entries, 0, &[]);
        assert!(scan_container(&data).unwrap().preview.is_none());
    }

    #[test]
    fn test_marker_scan_fallback_requires_large_fragment() {
        // A valid empty IFD followed by a large JPEG fragment with no IFD
        // entry pointing at it.
        let mut data = build_container(&[], 0, &[]);
        data.resize(10_000, 0);
        data[10_000 - 2..].copy_from_slice(&JPEG_SOI);
        data.resize(70_000, 0);
        data[69_998..].copy_from_slice(&JPEG_EOI);

        let scan = scan_container(&data).unwrap();
        let preview = scan.preview.expect("marker scan should find the fragment");
        assert_eq!(preview[..2], JPEG_SOI);
        assert_eq!(preview[preview.len() - 2..], JPEG_EOI);

        // A small fragment is rejected.
        let mut data = build_container(&[], 0, &[]);
        data.resize(10_000, 0);
        data[10_000 - 2..].copy_from_slice(&JPEG_SOI);
        data.resize(12_000, 0);
        data[11_998..].copy_from_slice(&JPEG_EOI);
        let scan = scan_container(&data).unwrap();
        assert!(scan.preview.is_none());
    }

    #[test]
    fn test_ifd_entry_past_eof_is_skipped() {
        let entries = vec![ifd_entry_le(TAG_JPEG_OFFSET, 1, 0x0010_0000)];
        let data = build_container(&entries, 0, &[]);
        let scan = scan_container(&data).unwrap();
        assert!(scan.preview.is_none());
    }
}
