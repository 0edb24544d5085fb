use clap::Parser;
use glam::Vec3A;
use log::info;

mod cli;
mod logger;
mod output;

use cli::Args;
use logger::init_logger;
use output::{save_image_as_exr, save_image_as_png, send_image_to_tev};
use spheretrace::camera::Camera;
use spheretrace::framebuffer::FrameBuffer;
use spheretrace::light::Light;
use spheretrace::material::Material;
use spheretrace::plane::Plane;
use spheretrace::renderer::{render, RenderContext, RenderSettings};
use spheretrace::scene::Scene;
use spheretrace::sphere::Sphere;

/// Create the demo scene: a mirror sphere among colored ones over a green
/// ground plane, lit by five colored point lights
fn create_scene() -> Scene {
    let mut scene = Scene::new();

    let mut mirror = Material::default();
    mirror.reflectivity = 0.8;
    scene.spheres.push(Sphere::new(Vec3A::new(0.0, 0.0, -1.0), 1.0, mirror));
    scene.spheres.push(Sphere::new(
        Vec3A::new(1.0, 1.0, 1.0),
        0.3,
        Material::diffuse(Vec3A::new(0.0, 0.0, 1.0)),
    ));
    scene.spheres.push(Sphere::new(
        Vec3A::new(1.0, 5.0, 3.0),
        0.8,
        Material::diffuse(Vec3A::new(0.0, 1.0, 1.0)),
    ));
    scene.spheres.push(Sphere::new(
        Vec3A::new(-3.0, 1.0, 1.0),
        1.3,
        Material::diffuse(Vec3A::new(1.0, 0.0, 1.0)),
    ));
    scene.spheres.push(Sphere::new(
        Vec3A::new(2.0, -1.0, -1.0),
        0.1,
        Material::diffuse(Vec3A::new(0.0, 1.0, 0.0)),
    ));

    scene.planes.push(Plane::new(
        Vec3A::new(0.0, -1.0, 0.0),
        Vec3A::new(0.0, 1.0, 0.0),
        Material::diffuse(Vec3A::new(0.0, 0.25, 0.0)),
    ));

    scene.lights.push(Light::new(Vec3A::new(0.0, 10.0, 0.0), Vec3A::new(1.0, 1.0, 1.0), 1.0));
    scene.lights.push(Light::new(Vec3A::new(3.0, 3.0, 3.0), Vec3A::new(0.9, 0.2, 0.3), 1.0));
    scene.lights.push(Light::new(Vec3A::new(-6.0, 5.0, 10.0), Vec3A::new(0.1, 0.4, 0.7), 1.0));
    scene.lights.push(Light::new(Vec3A::new(6.0, 5.0, 2.0), Vec3A::new(0.9, 0.4, 0.7), 1.0));
    scene.lights.push(Light::new(Vec3A::new(-6.0, 5.0, -5.0), Vec3A::new(0.1, 0.9, 0.7), 1.0));

    scene.ambient = Vec3A::splat(0.2);
    scene
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    info!("Spheretrace - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let settings = RenderSettings {
        max_bounces: args.max_bounces,
        resolution_divisor: args.resolution_divisor,
    };
    let (trace_width, trace_height) = settings.scaled_resolution(args.width, args.height);

    info!(
        "Display {}x{}, traced buffer {}x{}, max bounces {}",
        args.width, args.height, trace_width, trace_height, settings.max_bounces
    );

    let scene = create_scene();
    let camera = Camera::default();

    let ctx = RenderContext {
        scene: &scene,
        camera: &camera,
        settings: &settings,
    };

    let mut buffer = FrameBuffer::new();
    render(&mut buffer, trace_width, trace_height, &ctx);

    let image = buffer.to_image();

    // Send the frame to TEV if requested
    let should_send_to_tev = args.tev || args.tev_address.is_some();
    if should_send_to_tev {
        let tev_address = args.tev_address.as_deref().unwrap_or("localhost:14158");
        send_image_to_tev(&image, tev_address, trace_width, trace_height);
    }

    // Save the frame based on file extension
    if args.output.ends_with(".exr") {
        save_image_as_exr(&image, &args.output, trace_width, trace_height);
    } else if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output, trace_width, trace_height);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .png and .exr formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
