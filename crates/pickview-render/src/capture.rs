//! Reading rendered textures back to the CPU and saving images.

use std::path::Path;

use crate::error::{RenderError, RenderResult};

/// Reads a whole 2D texture back as raw bytes, row padding removed.
///
/// `bytes_per_pixel` must match the texture format (4 for `Rgba8*` and
/// `R32Float`). Blocks until the GPU finishes the copy.
pub fn read_texture_bytes(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    width: u32,
    height: u32,
    bytes_per_pixel: u32,
) -> RenderResult<Vec<u8>> {
    let unpadded_bytes_per_row = width * bytes_per_pixel;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

    let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("capture staging buffer"),
        size: u64::from(padded_bytes_per_row) * u64::from(height),
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("capture encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let buffer_slice = staging_buffer.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    let _ = device.poll(wgpu::PollType::wait_indefinitely());
    rx.recv()
        .map_err(|_| RenderError::CaptureFailed("map callback never ran".into()))?
        .map_err(|e| RenderError::CaptureFailed(format!("buffer map failed: {e:?}")))?;

    let data = buffer_slice.get_mapped_range();
    let mut out = Vec::with_capacity((unpadded_bytes_per_row * height) as usize);
    for row in 0..height {
        let start = (row * padded_bytes_per_row) as usize;
        out.extend_from_slice(&data[start..start + unpadded_bytes_per_row as usize]);
    }
    drop(data);
    staging_buffer.unmap();

    Ok(out)
}

/// Saves tightly packed RGBA8 pixels as an image file (format from the
/// file extension).
pub fn save_image(
    path: impl AsRef<Path>,
    data: &[u8],
    width: u32,
    height: u32,
) -> RenderResult<()> {
    let image = image::RgbaImage::from_raw(width, height, data.to_vec()).ok_or_else(|| {
        RenderError::CaptureFailed(format!(
            "pixel buffer size {} does not match {width}x{height}",
            data.len()
        ))
    })?;
    image.save(path)?;
    Ok(())
}
