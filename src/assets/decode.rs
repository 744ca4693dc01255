//! Streaming decode of PNG and JPEG files into surfaces.
//!
//! The destination surface is allocated as soon as the codec reports its final geometry, and
//! codec output lands directly in the surface buffer. Each row is then converted in place from
//! the codec's packed 8-bit layout into premultiplied ARGB words using the same packing helpers
//! as [`Surface::set_pixel`], so decoded and drawn pixels agree bit for bit.

use std::io::Read;

use image::ImageDecoder as _;

use crate::{
    assets::files::{FileGuard, FileSource},
    foundation::{
        error::{SurfaceError, SurfaceResult},
        math::{pack_opaque_argb, pack_premul_argb},
    },
    render::registry::RendererRegistry,
    surface::{
        buffer::{BYTES_PER_PIXEL, PixelBuffer},
        lifecycle::Surface,
    },
};

/// Decoder progress. `Failed` is reachable from every other stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecodeStage {
    /// File handle acquired.
    Opened,
    /// Codec parsed the image header.
    HeaderRead,
    /// Output layout settled to 8-bit gray/RGB with optional alpha.
    NormalizationConfigured,
    /// Destination allocated; rows are being decoded into it.
    RowsStreaming,
    /// Every row decoded and converted.
    Finished,
    /// Decode aborted; codec state and file handle released.
    Failed,
}

impl std::fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Opened => "opened",
            Self::HeaderRead => "header-read",
            Self::NormalizationConfigured => "normalization-configured",
            Self::RowsStreaming => "rows-streaming",
            Self::Finished => "finished",
            Self::Failed => "failed",
        })
    }
}

/// Codec family, chosen from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodecFamily {
    /// PNG; carries native alpha.
    Png,
    /// JPEG; no alpha, decoded as opaque.
    Jpeg,
}

impl CodecFamily {
    /// Pick the family from the final extension of `name`, case-insensitively.
    pub fn from_name(name: &str) -> SurfaceResult<Self> {
        let file = name.rsplit(['/', '\\']).next().unwrap_or(name);
        let Some((_, ext)) = file.rsplit_once('.') else {
            return Err(SurfaceError::unsupported_format(format!(
                "'{name}' has no file extension"
            )));
        };
        if ext.eq_ignore_ascii_case("png") {
            Ok(Self::Png)
        } else if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            Ok(Self::Jpeg)
        } else {
            Err(SurfaceError::unsupported_format(format!(
                "'{name}': no codec for extension '{ext}'"
            )))
        }
    }
}

/// Decoder limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOpts {
    /// Largest accepted `width * height`; larger images fail before allocation.
    pub max_pixels: u64,
}

impl Default for DecodeOpts {
    fn default() -> Self {
        Self {
            max_pixels: 64 * 1024 * 1024,
        }
    }
}

/// Packed 8-bit layout a codec writes before row conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RowLayout {
    Gray,
    GrayAlpha,
    Rgb,
    Rgba,
}

impl RowLayout {
    pub(crate) fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::GrayAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Convert `width` packed pixels at the start of `row` into ARGB words, in place.
    ///
    /// Pixels are visited right to left so a pixel's source bytes are always read before its
    /// slot, which never lies left of the source, is written.
    pub(crate) fn convert_row(self, row: &mut [u8], width: usize) {
        let ch = self.channels();
        for i in (0..width).rev() {
            let s = i * ch;
            let word = match self {
                Self::Gray => pack_opaque_argb(row[s], row[s], row[s]),
                Self::GrayAlpha => pack_premul_argb(row[s], row[s], row[s], row[s + 1]),
                Self::Rgb => pack_opaque_argb(row[s], row[s + 1], row[s + 2]),
                Self::Rgba => pack_premul_argb(row[s], row[s + 1], row[s + 2], row[s + 3]),
            };
            let d = i * BYTES_PER_PIXEL;
            row[d..d + BYTES_PER_PIXEL].copy_from_slice(&word.to_ne_bytes());
        }
    }
}

/// Convert a whole frame that a codec wrote tightly packed at the start of the buffer.
///
/// Rows are spread out to their final stride bottom-up, which keeps every row's source intact
/// until it is moved.
pub(crate) fn convert_packed_frame(px: &mut PixelBuffer, layout: RowLayout) {
    let width = px.width() as usize;
    let stride = px.stride();
    let packed = width * layout.channels();
    let bytes = px.bytes_mut();
    for y in (0..bytes.len() / stride.max(1)).rev() {
        let dst = y * stride;
        bytes.copy_within(y * packed..(y + 1) * packed, dst);
        layout.convert_row(&mut bytes[dst..dst + stride], width);
    }
}

struct DecodeRun<'n> {
    name: &'n str,
    stage: DecodeStage,
}

impl<'n> DecodeRun<'n> {
    fn new(name: &'n str) -> Self {
        tracing::trace!(name, stage = %DecodeStage::Opened, "decode stage");
        Self {
            name,
            stage: DecodeStage::Opened,
        }
    }

    fn advance(&mut self, next: DecodeStage) {
        tracing::trace!(name = self.name, from = %self.stage, to = %next, "decode stage");
        self.stage = next;
    }

    fn fail(&self, msg: impl std::fmt::Display) -> SurfaceError {
        SurfaceError::decode(self.stage, format!("'{}': {msg}", self.name))
    }

    fn check_size(&self, width: u32, height: u32, opts: &DecodeOpts) -> SurfaceResult<()> {
        let pixels = u64::from(width) * u64::from(height);
        if pixels > opts.max_pixels {
            return Err(self.fail(format!(
                "{width}x{height} exceeds the {} pixel limit",
                opts.max_pixels
            )));
        }
        Ok(())
    }
}

/// Decode the PNG or JPEG file `name` from `files` into a new surface on the registry's active
/// backend.
///
/// The codec is chosen from the extension before the file is opened. On any failure the file
/// handle is closed, codec state is dropped and no surface is returned.
#[tracing::instrument(skip(registry, files, opts))]
pub fn decode_surface<F: FileSource>(
    registry: &RendererRegistry,
    files: &F,
    name: &str,
    opts: &DecodeOpts,
) -> SurfaceResult<Surface> {
    let family = CodecFamily::from_name(name)?;
    let file = FileGuard::open(files, name)
        .map_err(|e| SurfaceError::decode(DecodeStage::Opened, format!("open '{name}': {e}")))?;

    let mut run = DecodeRun::new(name);
    let decoded = match family {
        CodecFamily::Png => decode_png(registry, file, &mut run, opts),
        CodecFamily::Jpeg => decode_jpeg(registry, file, &mut run, opts),
    };

    match decoded {
        Ok(surface) => {
            run.advance(DecodeStage::Finished);
            tracing::debug!(
                width = surface.width(),
                height = surface.height(),
                ?family,
                "decoded surface"
            );
            Ok(surface)
        }
        Err(err) => {
            tracing::warn!(stage = %run.stage, error = %err, "decode failed");
            run.advance(DecodeStage::Failed);
            Err(err)
        }
    }
}

fn decode_png<F: FileSource>(
    registry: &RendererRegistry,
    file: FileGuard<'_, F>,
    run: &mut DecodeRun<'_>,
    opts: &DecodeOpts,
) -> SurfaceResult<Surface> {
    let mut decoder = png::Decoder::new(file);
    // Palette, low-bit gray and tRNS expand to 8-bit gray/RGB(A); 16-bit samples are stripped.
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| run.fail(format_args!("png header: {e}")))?;
    run.advance(DecodeStage::HeaderRead);

    let (width, height, interlaced) = {
        let info = reader.info();
        (info.width, info.height, info.interlaced)
    };
    run.check_size(width, height, opts)?;

    let layout = match reader.output_color_type() {
        (png::ColorType::Grayscale, png::BitDepth::Eight) => RowLayout::Gray,
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => RowLayout::GrayAlpha,
        (png::ColorType::Rgb, png::BitDepth::Eight) => RowLayout::Rgb,
        (png::ColorType::Rgba, png::BitDepth::Eight) => RowLayout::Rgba,
        (color, depth) => {
            return Err(run.fail(format_args!(
                "png output {color:?}/{depth:?} does not normalize to 8-bit RGB(A)"
            )));
        }
    };
    run.advance(DecodeStage::NormalizationConfigured);

    let mut surface = Surface::allocate_unsigned(registry, width, height, None)?;
    run.advance(DecodeStage::RowsStreaming);

    let w = width as usize;
    let packed = w * layout.channels();
    if interlaced {
        // Adam7 rows only become whole once every pass has landed, so this path converts the
        // frame in one pass after the codec finishes instead of per row.
        let need = reader.output_buffer_size();
        let px = surface.buffer_mut();
        if need > px.byte_len() {
            return Err(run.fail(format_args!(
                "png frame needs {need} bytes, surface has {}",
                px.byte_len()
            )));
        }
        reader
            .next_frame(&mut px.bytes_mut()[..need])
            .map_err(|e| run.fail(format_args!("png data: {e}")))?;
        convert_packed_frame(px, layout);
    } else {
        let stride = surface.stride();
        for y in 0..height as usize {
            let row = reader
                .next_row()
                .map_err(|e| run.fail(format_args!("png row {y}: {e}")))?
                .ok_or_else(|| run.fail(format_args!("png ended at row {y} of {height}")))?;
            let data = row.data();
            if data.len() < packed {
                return Err(run.fail(format_args!(
                    "png row {y} holds {} bytes, expected {packed}",
                    data.len()
                )));
            }
            let dst = &mut surface.buffer_mut().bytes_mut()[y * stride..(y + 1) * stride];
            dst[..packed].copy_from_slice(&data[..packed]);
            layout.convert_row(dst, w);
        }
        reader
            .finish()
            .map_err(|e| run.fail(format_args!("png trailer: {e}")))?;
    }
    Ok(surface)
}

fn decode_jpeg<F: FileSource>(
    registry: &RendererRegistry,
    mut file: FileGuard<'_, F>,
    run: &mut DecodeRun<'_>,
    opts: &DecodeOpts,
) -> SurfaceResult<Surface> {
    // The JPEG decoder needs a seekable source; the compressed stream is pulled in up front and
    // the handle released before decoding starts.
    let mut compressed = Vec::new();
    file.read_to_end(&mut compressed)
        .map_err(|e| run.fail(format_args!("read: {e}")))?;
    tracing::trace!(bytes = file.bytes_read(), "jpeg stream read");
    drop(file);

    let decoder = image::codecs::jpeg::JpegDecoder::new(std::io::Cursor::new(compressed))
        .map_err(|e| run.fail(format_args!("jpeg header: {e}")))?;
    run.advance(DecodeStage::HeaderRead);

    let (width, height) = decoder.dimensions();
    run.check_size(width, height, opts)?;

    let layout = match decoder.color_type() {
        image::ColorType::L8 => RowLayout::Gray,
        image::ColorType::Rgb8 => RowLayout::Rgb,
        other => {
            return Err(run.fail(format_args!(
                "jpeg output {other:?} does not normalize to 8-bit RGB"
            )));
        }
    };
    run.advance(DecodeStage::NormalizationConfigured);

    let mut surface = Surface::allocate_unsigned(registry, width, height, None)?;
    run.advance(DecodeStage::RowsStreaming);

    let px = surface.buffer_mut();
    let need = usize::try_from(decoder.total_bytes())
        .ok()
        .filter(|&n| n <= px.byte_len())
        .ok_or_else(|| run.fail("jpeg frame does not fit the surface"))?;
    decoder
        .read_image(&mut px.bytes_mut()[..need])
        .map_err(|e| run.fail(format_args!("jpeg data: {e}")))?;
    // The JPEG decoder has no scanline API; conversion runs over the packed frame it wrote,
    // still in place in the surface buffer.
    convert_packed_frame(px, layout);
    Ok(surface)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
