//! # Output Module
//!
//! Display-side consumers of a finished frame:
//! - Real-time visualization via TEV (The EXR Viewer)
//! - PNG file export with HDR to LDR conversion
//! - EXR file export preserving full linear HDR precision
//!
//! The renderer hands over unclamped linear pixels; everything about
//! clamping, gamma, and encoding lives here.

use exr::prelude::*;
use image::{ImageBuffer, Rgb};
use log::{debug, info, warn};
use std::net::TcpStream;
use tev_client::{PacketCreateImage, PacketUpdateImage, TevClient};

/// Send an f32 RGB frame to TEV for visualization.
///
/// Establishes a TCP connection to a running TEV instance, creates an image
/// with R/G/B channels, converts the interleaved pixel data to the planar
/// (channel-wise) layout TEV expects, and transmits it. Connection or
/// transmission failures are logged as warnings; nothing panics.
///
/// `tev_address` may be `ip:port` or just `ip` (default port 14158).
pub fn send_image_to_tev(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    tev_address: &str,
    width: u32,
    height: u32,
) {
    // Add default port if not specified
    let tev_address = if tev_address.contains(':') {
        tev_address.to_string()
    } else {
        format!("{}:14158", tev_address)
    };

    debug!("Attempting to connect to TEV at {}", tev_address);

    match TcpStream::connect(&tev_address) {
        Ok(stream) => {
            if let Err(e) = stream.set_nodelay(true) {
                debug!("Failed to set TCP_NODELAY: {}", e);
            }

            let mut client = TevClient::wrap(stream);

            let create_packet = PacketCreateImage {
                image_name: "spheretrace_frame",
                width,
                height,
                channel_names: &["R", "G", "B"],
                grab_focus: true,
            };

            match client.send(create_packet) {
                Ok(_) => debug!("Image created in TEV successfully"),
                Err(e) => {
                    warn!("Failed to create image in TEV: {}", e);
                    return;
                }
            }

            // Convert from interleaved (RGBRGB...) to planar (RRR...GGG...BBB...) for TEV
            let pixel_count = (width * height) as usize;
            let mut rgb_data = Vec::with_capacity(pixel_count * 3);
            for channel in 0..3 {
                for pixel in image.pixels() {
                    rgb_data.push(pixel[channel]);
                }
            }

            let start_time = std::time::Instant::now();
            let update_packet = PacketUpdateImage {
                image_name: "spheretrace_frame",
                grab_focus: false,
                channel_names: &["R", "G", "B"],
                x: 0,
                y: 0,
                width,
                height,
                channel_offsets: &[0, (width * height) as u64, (2 * width * height) as u64],
                channel_strides: &[1, 1, 1],
                data: &rgb_data,
            };

            match client.send(update_packet) {
                Ok(_) => {
                    info!(
                        "Frame sent to TEV at {} in {:.2?}",
                        tev_address,
                        start_time.elapsed()
                    );
                }
                Err(e) => warn!("Failed to send frame data to TEV: {}", e),
            }
        }
        Err(e) => warn!("Failed to connect to TEV on {}: {}", tev_address, e),
    }
}

/// Save an f32 RGB frame as PNG with tone mapping and gamma correction.
///
/// Channels are clamped to [0, 1], run through the sRGB transfer curve
/// (linear segment below 0.0031308, `1.055 * x^(1/2.4) - 0.055` above),
/// and scaled to 8-bit. IO errors are logged as warnings.
pub fn save_image_as_png(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
    width: u32,
    height: u32,
) {
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        let pixel = image.get_pixel(x, y);

        // sRGB standard gamma correction with linear portion for dark values
        let linear_to_gamma = |linear: f32| -> f32 {
            if linear <= 0.0 {
                0.0
            } else if linear <= 0.0031308 {
                12.92 * linear
            } else {
                1.055 * linear.powf(1.0 / 2.4) - 0.055
            }
        };

        Rgb([
            (linear_to_gamma(pixel[0].clamp(0.0, 1.0)) * 255.0) as u8,
            (linear_to_gamma(pixel[1].clamp(0.0, 1.0)) * 255.0) as u8,
            (linear_to_gamma(pixel[2].clamp(0.0, 1.0)) * 255.0) as u8,
        ])
    });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save an f32 RGB frame as EXR with full HDR precision.
///
/// No tone mapping or gamma is applied; the file stores the renderer's
/// linear values as 32-bit floats, suitable for TEV, compositing, or
/// archival. IO errors are logged as warnings.
pub fn save_image_as_exr(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
    width: u32,
    height: u32,
) {
    let pixels = image
        .pixels()
        .map(|rgb| (rgb[0], rgb[1], rgb[2]))
        .collect::<Vec<(f32, f32, f32)>>();

    let result = write_rgb_file(output_path, width as usize, height as usize, |x, y| {
        let index = y * (width as usize) + x;
        pixels[index]
    });

    match result {
        Ok(_) => info!("HDR image saved as EXR: {}", output_path),
        Err(e) => warn!("Failed to save EXR image: {}", e),
    }
}
